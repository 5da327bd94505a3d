use super::*;
use crate::foundation::fixed::{ONE, ONE_HALF};
use crate::surface::clip::IntRect;

fn source(pixels: &[u32], w: i32, h: i32, opaque: bool, clamp: EdgeClamp) -> ImageSource<'_> {
    ImageSource {
        pixels,
        scan_width: w as usize,
        opaque,
        edge_clamp: clamp,
        rect: IntRect::new(0, 0, w, h),
    }
}

#[test]
fn nearest_clamps_to_rect() {
    let px = [1, 2, 3, 4];
    let src = source(&px, 2, 2, false, EdgeClamp::NONE);
    assert_eq!(nearest(&src, 0, 0), 1);
    assert_eq!(nearest(&src, ONE + ONE_HALF, 0), 2);
    assert_eq!(nearest(&src, -ONE, ONE), 3);
    assert_eq!(nearest(&src, 5 * ONE, 5 * ONE), 4);
}

#[test]
fn nearest_respects_sub_rect_origin() {
    let px = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    let src = ImageSource {
        rect: IntRect::new(1, 1, 2, 2),
        ..source(&px, 3, 3, false, EdgeClamp::NONE)
    };
    assert_eq!(nearest(&src, 0, 0), 5);
    assert_eq!(nearest(&src, ONE, ONE), 9);
}

#[test]
fn bilinear_midpoint_of_black_and_white() {
    let px = [0xff00_0000, 0xffff_ffff];
    let src = source(&px, 2, 1, true, EdgeClamp::NONE);
    assert_eq!(bilinear(&src, ONE_HALF, 0), 0xff80_8080);
}

#[test]
fn bilinear_on_pixel_centers_returns_the_pixel() {
    let px = [0xff10_2030, 0xff40_5060, 0xff70_8090, 0xffa0_b0c0];
    let src = source(&px, 2, 2, true, EdgeClamp::NONE);
    assert_eq!(bilinear(&src, 0, 0), px[0]);
    assert_eq!(bilinear(&src, ONE, ONE), px[3]);
}

#[test]
fn equal_samples_short_circuit() {
    let px = [0x8040_4040; 4];
    let src = source(&px, 2, 2, false, EdgeClamp::NONE);
    assert_eq!(bilinear(&src, ONE / 3, ONE / 5), 0x8040_4040);
}

#[test]
fn unclamped_edge_fades_to_transparent() {
    let px = [0xffff_ffff];
    let src = source(&px, 1, 1, true, EdgeClamp::NONE);
    assert_eq!(bilinear(&src, -ONE_HALF, 0), 0x8080_8080);
}

#[test]
fn clamped_edge_replicates_boundary() {
    let px = [0xffff_ffff];
    let src = source(&px, 1, 1, true, EdgeClamp::ALL);
    assert_eq!(bilinear(&src, -ONE_HALF, -ONE_HALF), 0xffff_ffff);
    assert_eq!(bilinear(&src, ONE_HALF, ONE_HALF), 0xffff_ffff);

    let left_only = source(&px, 1, 1, true, EdgeClamp::LEFT);
    assert_eq!(bilinear(&left_only, -ONE_HALF, 0), 0xffff_ffff);
    assert_eq!(bilinear(&left_only, ONE_HALF, 0), 0x7f7f_7f7f);
}

#[test]
fn weights_sum_to_full_scale() {
    for fx in [0, 1, 77, 128, 254, 255] {
        for fy in [0, 3, 128, 200, 255] {
            let w = weights(fx, fy);
            assert_eq!(w.iter().sum::<u32>(), 255);
        }
    }
}

#[test]
fn empty_rects_sample_as_transparent() {
    let px = [0xffff_ffff; 4];
    for rect in [IntRect::new(0, 0, 0, 0), IntRect::new(1, 1, 0, 1), IntRect::new(0, 0, 2, 0)] {
        let src = ImageSource {
            pixels: &px,
            scan_width: 2,
            opaque: true,
            edge_clamp: EdgeClamp::ALL,
            rect,
        };
        assert_eq!(nearest(&src, 0, 0), 0);
        assert_eq!(bilinear(&src, ONE_HALF, ONE_HALF), 0);
    }
}
