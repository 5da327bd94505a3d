use super::*;
use crate::foundation::fixed::{ONE, ONE_HALF};

#[test]
fn factories_and_parsing_agree() {
    assert_eq!(BlendMode::src_over(), BlendMode::SrcOver);
    assert_eq!(BlendMode::default(), BlendMode::src_over());
    for mode in BlendMode::ALL {
        assert_eq!(mode.name().parse::<BlendMode>().unwrap(), mode);
        assert_eq!(mode.to_string(), mode.name());
    }
    assert!("overlay".parse::<BlendMode>().is_err());
}

#[test]
fn composite_instances_are_shared() {
    for mode in BlendMode::ALL {
        for opaque in [true, false] {
            let a = mode.composite(opaque);
            let b = mode.composite(opaque);
            assert!(std::ptr::addr_eq(a, b), "{mode} {opaque}");
            assert_eq!(a.mode(), mode);
            assert_eq!(a.dest_opaque(), opaque);
        }
        assert!(!std::ptr::addr_eq(mode.composite(true), mode.composite(false)));
    }
}

#[test]
fn opaque_variant_is_alpha_variant_with_opaque_destination() {
    let dsts = [0xff00_0000, 0xffff_ffff, 0xff20_4080];
    let srcs = [0, 0x8080_8080, 0xff12_3456, 0x4010_2030];
    for mode in BlendMode::ALL {
        for &d in &dsts {
            for &s in &srcs {
                let mut a = [d];
                let mut o = [d];
                mode.composite(false).blend(&mut a, 0, s);
                mode.composite(true).blend(&mut o, 0, s);
                assert_eq!(o[0], a[0] | 0xff00_0000, "{mode} {d:08x} {s:08x}");
            }
        }
    }
}

#[test]
fn transparent_source_is_a_no_op_where_declared() {
    for mode in BlendMode::ALL.into_iter().filter(|m| m.ignores_transparent_source()) {
        for d in [0, 0x8040_2010, 0xff20_4080] {
            let mut px = [d];
            mode.composite(false).blend(&mut px, 0, 0);
            assert_eq!(px[0], d, "{mode}");
        }
    }
}

#[test]
fn dst_leaves_everything_alone() {
    let mut px = [0x8040_2010; 4];
    let c = BlendMode::dst().composite(false);
    c.blend(&mut px, 0, 0xffff_ffff);
    c.blend_row(&mut px, 0, 0xffff_ffff, 4);
    assert_eq!(px, [0x8040_2010; 4]);
}

#[test]
fn clear_differs_by_destination_kind() {
    let mut alpha_dest = [0xffff_ffff; 2];
    BlendMode::clear().composite(false).blend_row(&mut alpha_dest, 0, 0xffff_ffff, 2);
    assert_eq!(alpha_dest, [0; 2]);

    let mut opaque_dest = [0xffff_ffff; 2];
    BlendMode::clear().composite(true).blend_row(&mut opaque_dest, 0, 0xffff_ffff, 2);
    assert_eq!(opaque_dest, [0xff00_0000; 2]);
}

#[test]
fn blend_alpha_scales_the_source() {
    let mut px = [0xff00_0000];
    BlendMode::src_over()
        .composite(true)
        .blend_alpha(&mut px, 0, 0xffff_ffff, 0x80);
    assert_eq!(px[0], 0xff80_8080);

    let mut px = [0xff00_0000];
    BlendMode::src_over()
        .composite(true)
        .blend_alpha(&mut px, 0, 0xffff_ffff, 0xff);
    assert_eq!(px[0], 0xffff_ffff);
}

#[test]
fn blend_row_matches_single_pixel_blends() {
    for mode in BlendMode::ALL {
        for src in [0xff33_6699, 0x8020_4060] {
            let mut row = [0x8040_2010, 0xff00_0000, 0, 0xffff_ffff];
            let mut single = row;
            let c = mode.composite(false);
            c.blend_row(&mut row, 1, src, 2);
            c.blend(&mut single, 1, src);
            c.blend(&mut single, 2, src);
            assert_eq!(row, single, "{mode}");
        }
    }
}

fn image<'a>(pixels: &'a [u32], w: i32, h: i32) -> ImageSource<'a> {
    ImageSource {
        pixels,
        scan_width: w as usize,
        opaque: pixels.iter().all(|p| p >> 24 == 0xff),
        edge_clamp: EdgeClamp::NONE,
        rect: IntRect::new(0, 0, w, h),
    }
}

#[test]
fn blend_image_copies_with_identity_span() {
    let src = [0xff00_0001, 0xff00_0002, 0xff00_0003, 0xff00_0004];
    let source = image(&src, 2, 2);
    let span = SampleSpan {
        du: ONE,
        dv_row: ONE,
        ..SampleSpan::default()
    };
    let mut out = [0u32; 9];
    let mut dest = DestTarget {
        pixels: &mut out,
        scan_width: 3,
        offset: 4,
        pixel_count: 2,
        row_count: 2,
    };
    BlendMode::src().composite(false).blend_image(&source, &span, 0xff, &mut dest);
    assert_eq!(
        out,
        [0, 0, 0, 0, 0xff00_0001, 0xff00_0002, 0, 0xff00_0003, 0xff00_0004]
    );
}

#[test]
fn blend_image_with_zero_alpha_is_a_no_op() {
    let src = [0xffff_ffff; 4];
    let source = image(&src, 2, 2);
    let span = SampleSpan {
        du: ONE,
        dv_row: ONE,
        ..SampleSpan::default()
    };
    let mut out = [0x1122_3344u32; 4];
    let mut dest = DestTarget {
        pixels: &mut out,
        scan_width: 2,
        offset: 0,
        pixel_count: 2,
        row_count: 2,
    };
    BlendMode::src().composite(false).blend_image(&source, &span, 0, &mut dest);
    assert_eq!(out, [0x1122_3344; 4]);
}

#[test]
fn blend_image_applies_render_alpha() {
    let src = [0xffff_ffff];
    let source = image(&src, 1, 1);
    let span = SampleSpan {
        du: ONE,
        ..SampleSpan::default()
    };
    let mut out = [0xff00_0000u32];
    let mut dest = DestTarget {
        pixels: &mut out,
        scan_width: 1,
        offset: 0,
        pixel_count: 1,
        row_count: 1,
    };
    BlendMode::src_over().composite(true).blend_image(&source, &span, 0x80, &mut dest);
    assert_eq!(out, [0xff80_8080]);
}

#[test]
fn rotated_span_walks_both_axes() {
    // Transposed read: each destination row walks down a source column.
    let src = [1, 2, 3, 4];
    let source = image(&src, 2, 2);
    let span = SampleSpan {
        dv: ONE,
        du_row: ONE,
        rotated: true,
        ..SampleSpan::default()
    };
    let mut out = [0u32; 4];
    let mut dest = DestTarget {
        pixels: &mut out,
        scan_width: 2,
        offset: 0,
        pixel_count: 2,
        row_count: 2,
    };
    BlendMode::src().composite(false).blend_image(&source, &span, 0xff, &mut dest);
    assert_eq!(out, [1, 3, 2, 4]);
}

#[test]
fn bilinear_span_blends_neighbours() {
    let src = [0xff00_0000, 0xffff_ffff];
    let source = image(&src, 2, 1);
    let span = SampleSpan {
        u: ONE_HALF,
        du: ONE,
        bilinear: true,
        ..SampleSpan::default()
    };
    let mut out = [0u32; 1];
    let mut dest = DestTarget {
        pixels: &mut out,
        scan_width: 1,
        offset: 0,
        pixel_count: 1,
        row_count: 1,
    };
    BlendMode::src().composite(true).blend_image(&source, &span, 0xff, &mut dest);
    assert_eq!(out, [0xff80_8080]);
}

#[test]
fn edge_clamp_bits() {
    let c = EdgeClamp::LEFT | EdgeClamp::TOP;
    assert_eq!(c.bits(), 5);
    assert!(c.contains(EdgeClamp::LEFT));
    assert!(!c.contains(EdgeClamp::RIGHT));
    assert_eq!(EdgeClamp::from_bits(0xff), EdgeClamp::ALL);
    let mut all = EdgeClamp::NONE;
    all |= EdgeClamp::LEFT | EdgeClamp::RIGHT;
    all |= EdgeClamp::TOP | EdgeClamp::BOTTOM;
    assert_eq!(all, EdgeClamp::ALL);
}
