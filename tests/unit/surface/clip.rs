use super::*;

#[test]
fn intersection_shrinks() {
    let a = IntRect::new(0, 0, 10, 10);
    let b = IntRect::new(5, -2, 10, 6);
    assert_eq!(a.intersection(&b), IntRect::new(5, 0, 5, 4));
}

#[test]
fn disjoint_intersection_is_empty() {
    let a = IntRect::new(0, 0, 4, 4);
    let b = IntRect::new(10, 10, 4, 4);
    let i = a.intersection(&b);
    assert!(i.is_empty());
    assert_eq!(i.area(), 0);
}

#[test]
fn union_skips_empty() {
    let a = IntRect::new(1, 1, 2, 2);
    assert_eq!(a.union(&IntRect::default()), a);
    assert_eq!(
        a.union(&IntRect::new(5, 0, 1, 1)),
        IntRect::new(1, 0, 5, 3)
    );
}

#[test]
fn contains_is_half_open() {
    let r = IntRect::new(2, 2, 3, 3);
    assert!(r.contains(2, 2));
    assert!(r.contains(4, 4));
    assert!(!r.contains(5, 4));
    assert!(!r.contains(1, 3));
}

#[test]
fn expanded_grows_every_side() {
    assert_eq!(IntRect::new(2, 3, 4, 5).expanded(1), IntRect::new(1, 2, 6, 7));
}

#[test]
fn huge_extents_saturate_instead_of_overflowing() {
    let huge = IntRect::new(10, 10, i32::MAX, i32::MAX);
    assert_eq!(huge.right(), i32::MAX);
    assert_eq!(huge.bottom(), i32::MAX);
    let clip = IntRect::new(0, 0, 100, 50);
    assert_eq!(clip.intersection(&huge), IntRect::new(10, 10, 90, 40));
    assert_eq!(huge.intersection(&clip), IntRect::new(10, 10, 90, 40));

    let wide = IntRect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
    assert_eq!(wide.union(&huge).width, i32::MAX);
    assert_eq!(huge.expanded(1), IntRect::new(9, 9, i32::MAX - 9, i32::MAX - 9));
}
