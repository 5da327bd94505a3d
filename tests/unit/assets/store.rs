use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "pulpgfx_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(root: &Path, rel: &str, argb: u32) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    png::write_file(&path, &PixelBuffer::filled(2, 2, argb), &PngMetadata::default()).unwrap();
}

fn opts(capacity: usize) -> ImageStoreOpts {
    ImageStoreOpts { capacity }
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/./b//c.png").unwrap(), "a/b/c.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("a/../b.png").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn opts_default_and_json() {
    assert_eq!(ImageStoreOpts::default().capacity, 64);
    let o: ImageStoreOpts = serde_json::from_str(r#"{"capacity": 3}"#).unwrap();
    assert_eq!(o, opts(3));
    assert!(serde_json::from_str::<ImageStoreOpts>(r#"{"size": 3}"#).is_err());
}

#[test]
fn hits_share_the_decoded_image() {
    let root = temp_dir("store_hits");
    write_png(&root, "sprites/a.png", 0xffff_0000);
    let mut store = ImageStore::new(&root, opts(4));

    let first = store.try_get("sprites/a.png").unwrap();
    let second = store.try_get("sprites/./a.png").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.image.pixel(0, 0), Some(0xffff_0000));
    assert!(store.contains("sprites/a.png"));
    assert_eq!(store.len(), 1);
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn least_recently_used_entry_is_evicted() {
    let root = temp_dir("store_lru");
    for name in ["a", "b", "c"] {
        write_png(&root, &format!("{name}.png"), 0xff00_00ff);
    }
    let mut store = ImageStore::new(&root, opts(2));
    store.try_get("a.png").unwrap();
    store.try_get("b.png").unwrap();
    store.try_get("a.png").unwrap();
    store.try_get("c.png").unwrap();

    assert_eq!(store.len(), 2);
    assert!(store.contains("a.png"));
    assert!(!store.contains("b.png"));
    assert!(store.contains("c.png"));
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn failed_loads_fall_back_to_the_placeholder() {
    let root = temp_dir("store_broken");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("junk.png"), b"not a png").unwrap();
    let mut store = ImageStore::new(&root, opts(4));

    assert!(matches!(store.try_get("junk.png"), Err(PulpError::Decode(_))));
    let missing = store.get("missing.png");
    let junk = store.get("junk.png");
    assert!(Arc::ptr_eq(&missing, &junk));
    assert_eq!(missing.image, PixelBuffer::broken());
    assert!(store.is_empty());
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn insert_remove_and_clear() {
    let mut store = ImageStore::new("unused-root", opts(2));
    let img = DecodedPng {
        image: PixelBuffer::filled(1, 1, 0xff12_3456),
        metadata: PngMetadata::default(),
    };
    store.insert("x/y.png", img.clone()).unwrap();
    store.insert("z.png", img).unwrap();
    assert!(store.insert("../z.png", DecodedPng {
        image: PixelBuffer::broken(),
        metadata: PngMetadata::default(),
    })
    .is_err());

    let cached = store.get("x/y.png");
    assert_eq!(cached.image.pixel(0, 0), Some(0xff12_3456));
    assert!(store.remove("x/y.png").is_some());
    assert!(store.remove("x/y.png").is_none());
    assert_eq!(store.len(), 1);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn zero_capacity_keeps_one_entry() {
    let store = ImageStore::new("unused-root", opts(0));
    assert_eq!(store.capacity(), 1);
}
