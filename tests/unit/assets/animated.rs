use super::*;
use crate::assets::png::PngMetadata;

const RED: u32 = 0xffff_0000;
const BLUE: u32 = 0xff00_00ff;

/// Two 2x1 cells side by side: red then blue.
fn sheet() -> PixelBuffer {
    PixelBuffer::from_pixels(4, 1, vec![RED, RED, BLUE, BLUE]).unwrap()
}

fn info(looping: bool) -> AnimationInfo {
    AnimationInfo {
        frames_across: 2,
        frames_down: 1,
        looping,
        frames: vec![1, 0],
        durations_ms: vec![100, 50],
    }
}

#[test]
fn sheet_is_cut_into_cells() {
    let anim = AnimatedImage::from_sheet(&sheet(), &info(true)).unwrap();
    assert_eq!(anim.cell_count(), 2);
    assert_eq!(anim.frame_count(), 2);
    assert_eq!(anim.duration_ms(), 150);
    assert_eq!(anim.frame(0).unwrap().pixels(), &[BLUE, BLUE]);
    assert_eq!(anim.frame(1).unwrap().pixels(), &[RED, RED]);
    assert!(anim.frame(2).is_none());
    assert_eq!(anim.frame_duration_ms(1), Some(50));
}

#[test]
fn looping_wraps_around() {
    let anim = AnimatedImage::from_sheet(&sheet(), &info(true)).unwrap();
    assert_eq!(anim.frame_index_at(0), 0);
    assert_eq!(anim.frame_index_at(99), 0);
    assert_eq!(anim.frame_index_at(100), 1);
    assert_eq!(anim.frame_index_at(149), 1);
    assert_eq!(anim.frame_index_at(150), 0);
    assert_eq!(anim.frame_index_at(1_000_150), 1);
    assert_eq!(anim.frame_at(260).pixels(), &[RED, RED]);
}

#[test]
fn one_shot_holds_the_last_frame() {
    let anim = AnimatedImage::from_sheet(&sheet(), &info(false)).unwrap();
    assert_eq!(anim.frame_index_at(120), 1);
    assert_eq!(anim.frame_index_at(150), 1);
    assert_eq!(anim.frame_index_at(u64::MAX), 1);
    assert_eq!(anim.frame_at(10_000).pixels(), &[RED, RED]);
}

#[test]
fn zero_length_steps_are_skipped() {
    let mut i = info(true);
    i.frames = vec![0, 1, 0];
    i.durations_ms = vec![0, 10, 10];
    let anim = AnimatedImage::from_sheet(&sheet(), &i).unwrap();
    assert_eq!(anim.frame_index_at(0), 1);
    assert_eq!(anim.frame_index_at(15), 2);
}

#[test]
fn invalid_layouts_are_rejected() {
    let bad = |f: fn(&mut AnimationInfo)| {
        let mut i = info(true);
        f(&mut i);
        AnimatedImage::from_sheet(&sheet(), &i).is_err()
    };
    assert!(bad(|i| i.frames_across = 0));
    assert!(bad(|i| i.frames_across = 3));
    assert!(bad(|i| i.frames = vec![0, 2]));
    assert!(bad(|i| {
        i.durations_ms.pop();
    }));
    assert!(bad(|i| {
        i.frames.clear();
        i.durations_ms.clear();
    }));
}

#[test]
fn png_with_anim_chunk_becomes_an_animation() {
    let meta = PngMetadata {
        hotspot: Some(Hotspot { x: 1, y: 0 }),
        animation: Some(info(false)),
        ..Default::default()
    };
    let bytes = png::encode(&sheet(), &meta).unwrap();
    let anim = AnimatedImage::from_png(&bytes).unwrap();
    assert_eq!(anim.frame_count(), 2);
    assert!(!anim.is_looping());
    assert_eq!(anim.hotspot(), Some(Hotspot { x: 1, y: 0 }));
    assert_eq!(anim.frame_at(0).pixels(), &[BLUE, BLUE]);
}

#[test]
fn png_without_anim_chunk_is_a_still() {
    let bytes = png::encode(&sheet(), &PngMetadata::default()).unwrap();
    let anim = AnimatedImage::from_png(&bytes).unwrap();
    assert_eq!(anim.frame_count(), 1);
    assert_eq!(anim.duration_ms(), 0);
    assert_eq!(anim.frame_at(12_345).pixels(), sheet().pixels());
}
