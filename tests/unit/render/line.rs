use super::*;
use crate::foundation::fixed::{ONE, ONE_HALF, to_fixed};
use crate::surface::pixel_buffer::PixelBuffer;

const WHITE: u32 = 0xffff_ffff;
const BLACK: u32 = 0xff00_0000;

fn window() -> Window {
    Window::around(IntRect::new(0, 0, 10, 10))
}

#[test]
fn segments_inside_are_untouched() {
    let seg = clip_segment(ONE, ONE, 5 * ONE, 3 * ONE, &window()).unwrap();
    assert_eq!((seg.x1, seg.y1, seg.x2, seg.y2), (ONE, ONE, 5 * ONE, 3 * ONE));
    assert!(!seg.clipped1 && !seg.clipped2);
}

#[test]
fn segments_outside_are_rejected() {
    assert!(clip_segment(to_fixed(-5), ONE, to_fixed(-3), 4 * ONE, &window()).is_none());
    assert!(clip_segment(ONE, to_fixed(20), 5 * ONE, to_fixed(30), &window()).is_none());
}

#[test]
fn crossing_segments_are_cut_at_the_grown_clip() {
    let seg = clip_segment(to_fixed(-10), 5 * ONE, to_fixed(20), 5 * ONE, &window()).unwrap();
    assert_eq!((seg.x1, seg.x2), (to_fixed(-1), to_fixed(10)));
    assert_eq!((seg.y1, seg.y2), (5 * ONE, 5 * ONE));
    assert!(seg.clipped1 && seg.clipped2);
}

#[test]
fn horizontal_integer_line_is_inclusive() {
    let mut buf = PixelBuffer::filled(10, 10, WHITE);
    let mut g = buf.graphics();
    g.set_color(BLACK);
    g.draw_line(0.0, 0.0, 5.0, 0.0);
    drop(g);
    for x in 0..10 {
        let expected = if x <= 5 { BLACK } else { WHITE };
        assert_eq!(buf.pixel(x, 0), Some(expected), "x = {x}");
        assert_eq!(buf.pixel(x, 1), Some(WHITE));
    }
}

#[test]
fn vertical_line_in_reverse_order() {
    let mut buf = PixelBuffer::filled(4, 6, WHITE);
    let mut g = buf.graphics();
    g.set_color(BLACK);
    g.draw_line(2.0, 4.0, 2.0, 1.0);
    drop(g);
    let column: Vec<u32> = (0..6).map(|y| buf.pixel(2, y).unwrap()).collect();
    assert_eq!(column, [WHITE, BLACK, BLACK, BLACK, BLACK, WHITE]);
}

#[test]
fn diagonal_line_hits_exact_pixels() {
    let mut buf = PixelBuffer::filled(10, 10, WHITE);
    let mut g = buf.graphics();
    g.set_color(BLACK);
    g.draw_line(0.0, 0.0, 4.0, 4.0);
    drop(g);
    for i in 0..=4 {
        assert_eq!(buf.pixel(i, i), Some(BLACK));
    }
    assert_eq!(buf.pixel(1, 2), Some(WHITE));
    assert_eq!(buf.pixel(5, 5), Some(WHITE));
}

#[test]
fn fractional_line_splits_coverage_between_rows() {
    let mut buf = PixelBuffer::filled(10, 10, WHITE);
    let mut g = buf.graphics();
    g.set_color(BLACK);
    g.draw_line_fixed(0, ONE_HALF, 6 * ONE, ONE_HALF);
    drop(g);
    let upper = buf.pixel(3, 0).unwrap();
    let lower = buf.pixel(3, 1).unwrap();
    assert!(upper != WHITE && upper != BLACK, "{upper:08x}");
    assert!(lower != WHITE && lower != BLACK, "{lower:08x}");
    assert_eq!(buf.pixel(3, 2), Some(WHITE));
}

#[test]
fn lines_never_write_outside_the_clip() {
    let mut buf = PixelBuffer::filled(10, 10, WHITE);
    let mut g = buf.graphics();
    g.set_color(BLACK);
    g.set_clip(2, 2, 4, 4);
    g.draw_line(-20.0, -17.0, 30.0, 31.0);
    drop(g);
    for y in 0..10 {
        for x in 0..10 {
            if !(2..6).contains(&x) || !(2..6).contains(&y) {
                assert_eq!(buf.pixel(x, y), Some(WHITE), "({x}, {y})");
            }
        }
    }
    assert_ne!(buf.pixel(3, 5), Some(WHITE));
}

#[test]
fn transparent_color_draws_nothing() {
    let mut buf = PixelBuffer::filled(4, 4, WHITE);
    let mut g = buf.graphics();
    g.set_color(0x00ff_0000);
    g.draw_line(0.0, 0.0, 3.0, 2.0);
    drop(g);
    assert!(buf.pixels().iter().all(|&p| p == WHITE));
}
