use super::*;

#[test]
fn new_buffers_follow_opacity() {
    let o = PixelBuffer::new(3, 2, true);
    assert!(o.is_opaque());
    assert!(o.pixels().iter().all(|&p| p == OPAQUE_BLACK));

    let t = PixelBuffer::new(3, 2, false);
    assert!(!t.is_opaque());
    assert!(t.pixels().iter().all(|&p| p == 0));
}

#[test]
fn from_pixels_validates_length_and_detects_opacity() {
    assert!(PixelBuffer::from_pixels(2, 2, vec![0; 3]).is_err());
    let b = PixelBuffer::from_pixels(2, 1, vec![0xff00_0000, 0xffff_ffff]).unwrap();
    assert!(b.is_opaque());
    let b = PixelBuffer::from_pixels(2, 1, vec![0xff00_0000, 0x8080_8080]).unwrap();
    assert!(!b.is_opaque());
}

#[test]
fn set_pixel_clears_opacity_on_translucent_write() {
    let mut b = PixelBuffer::new(2, 2, true);
    b.set_pixel(1, 1, 0x4020_2020);
    assert!(!b.is_opaque());
    assert_eq!(b.pixel(1, 1), Some(0x4020_2020));
    assert_eq!(b.pixel(2, 0), None);
}

#[test]
fn argb_unpremultiplies() {
    let b = PixelBuffer::filled(1, 1, 0x80ff_ffff);
    assert_eq!(b.pixel(0, 0), Some(0x8080_8080));
    assert_eq!(b.argb(0, 0), Some(0x80ff_ffff));
}

#[test]
fn crop_copies_rows_and_rejects_out_of_bounds() {
    let pixels = (0..16u32).map(|i| 0xff00_0000 | i).collect();
    let b = PixelBuffer::from_pixels(4, 4, pixels).unwrap();
    let c = b.crop(1, 2, 2, 2).unwrap();
    assert_eq!(c.pixels(), &[0xff00_0009, 0xff00_000a, 0xff00_000d, 0xff00_000e]);
    assert!(c.is_opaque());
    assert!(b.crop(3, 3, 2, 1).is_err());
}

#[test]
fn scaled_solid_stays_solid() {
    let b = PixelBuffer::filled(3, 3, 0xff33_6699);
    let s = b.scaled(7, 5);
    assert_eq!((s.width(), s.height()), (7, 5));
    assert!(s.pixels().iter().all(|&p| p == 0xff33_6699));
}

#[test]
fn rgba_image_roundtrip() {
    let b = PixelBuffer::from_pixels(2, 1, vec![0xff10_2030, 0x8040_4040]).unwrap();
    let img = b.to_rgba_image();
    assert_eq!(img.get_pixel(0, 0).0, [0x10, 0x20, 0x30, 0xff]);
    let back = PixelBuffer::from_rgba_image(&img);
    assert_eq!(back, b);
}

#[test]
fn broken_placeholder_is_visible() {
    let b = PixelBuffer::broken();
    assert!(b.is_opaque());
    assert_eq!(b.pixel(0, 0), Some(0xffff_0000));
    assert_eq!(b.pixel(3, 1), Some(0xffff_ffff));
}
