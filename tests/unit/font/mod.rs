use super::*;

const A: u32 = 0xffff_0000;
const B: u32 = 0xff00_ff00;
const C: u32 = 0xff00_00ff;

/// Glyphs 'A' (2 px), 'B' (3 px), 'C' (1 px), two rows tall.
fn font(tracking: i16, bearings: Option<Vec<(i16, i16)>>) -> CoreFont {
    let row = [A, A, B, B, B, C];
    let pixels = [row, row].concat();
    let image = PixelBuffer::from_pixels(6, 2, pixels).unwrap();
    let metrics = FontMetrics {
        first_char: u16::from(b'A'),
        last_char: u16::from(b'C'),
        tracking,
        positions: vec![0, 2, 5, 6],
        bearings,
    };
    CoreFont::new(image, metrics).unwrap()
}

#[test]
fn glyph_bounds_follow_positions() {
    let f = font(0, None);
    assert_eq!(f.glyph_bounds(0), IntRect::new(0, 0, 2, 2));
    assert_eq!(f.glyph_bounds(1), IntRect::new(2, 0, 3, 2));
    assert_eq!(f.glyph_bounds(2), IntRect::new(5, 0, 1, 2));
    assert_eq!(f.height(), 2);
}

#[test]
fn missing_letters_fall_back_to_the_other_case() {
    let f = font(0, None);
    assert_eq!(f.glyph_index('B'), Some(1));
    assert_eq!(f.glyph_index('b'), Some(1));
    assert!(!f.has_glyph('b'));
    assert_eq!(f.glyph_index('z'), None);
    assert_eq!(f.glyph_index(' '), None);
}

#[test]
fn missing_characters_fall_back_to_space() {
    let image = PixelBuffer::new(3, 1, false);
    let metrics = FontMetrics {
        first_char: u16::from(b' '),
        last_char: u16::from(b'!'),
        tracking: 0,
        positions: vec![0, 2, 3],
        bearings: None,
    };
    let f = CoreFont::new(image, metrics).unwrap();
    assert_eq!(f.glyph_index('?'), Some(0));
    assert_eq!(f.char_width('\u{e9}'), 2);
}

#[test]
fn string_width_adds_tracking_between_glyphs() {
    assert_eq!(font(0, None).string_width("ABC"), 6);
    assert_eq!(font(1, None).string_width("ABC"), 8);
    assert_eq!(font(1, None).string_width("A"), 2);
    assert_eq!(font(1, None).string_width(""), 0);
    // Unknown characters are skipped entirely.
    assert_eq!(font(1, None).string_width("A?B"), 6);
}

#[test]
fn bearings_adjust_kerning() {
    let f = font(1, Some(vec![(0, -1), (-1, 0), (2, 0)]));
    assert_eq!(f.kerning(0, 1), 1 - 1 - 1);
    assert_eq!(f.kerning(1, 2), 1 + 0 + 2);
    let (glyphs, width) = f.layout("ABC");
    assert_eq!(
        glyphs,
        [
            PlacedGlyph { index: 0, x: 0 },
            PlacedGlyph { index: 1, x: 1 },
            PlacedGlyph { index: 2, x: 7 },
        ]
    );
    assert_eq!(width, 8);
}

#[test]
fn invalid_metrics_are_rejected() {
    let image = PixelBuffer::new(4, 1, false);
    let mut m = FontMetrics {
        first_char: 65,
        last_char: 66,
        tracking: 0,
        positions: vec![0, 2],
        bearings: None,
    };
    assert!(CoreFont::new(image.clone(), m.clone()).is_err());
    m.positions = vec![0, 3, 2];
    assert!(CoreFont::new(image.clone(), m.clone()).is_err());
    m.positions = vec![0, 2, 5];
    assert!(CoreFont::new(image.clone(), m.clone()).is_err());
    m.positions = vec![0, 2, 4];
    m.bearings = Some(vec![(0, 0)]);
    assert!(CoreFont::new(image.clone(), m.clone()).is_err());
    m.bearings = None;
    assert!(CoreFont::new(image, m).is_ok());
}

#[test]
fn from_png_reads_the_font_chunk() {
    let f = font(1, Some(vec![(0, 0), (1, -1), (0, 0)]));
    let meta = png::PngMetadata {
        font: Some(f.metrics().clone()),
        ..Default::default()
    };
    let bytes = png::encode(f.image(), &meta).unwrap();
    let back = CoreFont::from_png(&bytes).unwrap();
    assert_eq!(back.metrics(), f.metrics());
    assert_eq!(back.image().pixels(), f.image().pixels());

    let plain = png::encode(f.image(), &png::PngMetadata::default()).unwrap();
    assert!(matches!(CoreFont::from_png(&plain), Err(PulpError::Decode(_))));
}
