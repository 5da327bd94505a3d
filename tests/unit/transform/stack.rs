use super::*;
use crate::foundation::fixed::to_fixed;

#[test]
fn pop_empty_is_error() {
    let mut s = TransformStack::new();
    assert!(matches!(s.pop(), Err(PulpError::EmptyTransformStack)));
}

#[test]
fn push_pop_is_lifo() {
    let mut s = TransformStack::new();
    let mut a = Transform::identity();
    a.translate(to_fixed(1), 0);
    let mut b = a;
    b.scale(to_fixed(3), to_fixed(3));
    s.push(&a);
    s.push(&b);
    assert_eq!(s.pop().unwrap(), b);
    assert_eq!(s.pop().unwrap(), a);
    assert!(s.is_empty());
}

#[test]
fn grows_past_initial_capacity() {
    let mut s = TransformStack::new();
    let start = s.capacity();
    for _ in 0..(start * 3 + 1) {
        s.push(&Transform::identity());
    }
    assert_eq!(s.len(), start * 3 + 1);
    assert!(s.capacity() >= s.len());
}
