use super::*;
use crate::foundation::fixed::{ONE, to_fixed};

#[test]
fn solve_range_positive_step() {
    // Pixel centers at 0.5, 1.5, ... inside [1, 3).
    assert_eq!(solve_range(ONE_HALF, ONE, (ONE, 3 * ONE), 10), 1..3);
    assert_eq!(solve_range(ONE_HALF, ONE, (-ONE, 100 * ONE), 10), 0..10);
    assert_eq!(solve_range(ONE_HALF, ONE, (20 * ONE, 30 * ONE), 10), 10..10);
}

#[test]
fn solve_range_negative_step() {
    // u runs 9.5, 8.5, ... ; inside [2, 5) for u = 4.5, 3.5, 2.5 at i = 5, 6, 7.
    assert_eq!(solve_range(to_fixed(9) + ONE_HALF, -ONE, (2 * ONE, 5 * ONE), 10), 5..8);
}

#[test]
fn solve_range_zero_step() {
    assert_eq!(solve_range(ONE, 0, (0, 2 * ONE), 4), 0..4);
    assert_eq!(solve_range(3 * ONE, 0, (0, 2 * ONE), 4), 0..0);
}

#[test]
fn singular_transform_has_no_inverse() {
    let mut t = Transform::identity();
    t.scale(0, ONE);
    assert!(InverseMap::new(&t).is_none());
}

#[test]
fn centers_invert_translation_and_scale() {
    let mut t = Transform::identity();
    t.translate(to_fixed(10), to_fixed(20));
    t.scale(2 * ONE, 2 * ONE);
    let map = InverseMap::new(&t).unwrap();
    assert_eq!(map.center(10, 20), (ONE / 4, ONE / 4));
    assert_eq!(map.du_x, ONE_HALF);
    assert_eq!(map.dv_x, 0);
    assert_eq!(map.dv_y, ONE_HALF);
}

#[test]
fn scanlines_cover_the_mapped_rect() {
    let mut t = Transform::identity();
    t.translate(to_fixed(2), to_fixed(3));
    let map = InverseMap::new(&t).unwrap();
    let mut rows = Vec::new();
    map.scanlines(
        IntRect::new(0, 0, 10, 10),
        (0, to_fixed(4)),
        (0, to_fixed(2)),
        |s| rows.push(s),
    );
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].y, rows[0].x, rows[0].count), (3, 2, 4));
    assert_eq!((rows[0].u, rows[0].v), (ONE_HALF, ONE_HALF));
    assert_eq!(rows[1].y, 4);
}
