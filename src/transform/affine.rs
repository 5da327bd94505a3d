//! Fixed-point affine transform.

use crate::foundation::fixed::{self, ONE};
use crate::surface::clip::IntRect;

/// Fixed-point 2D affine matrix.
///
/// ```text
/// | scale_x  shear_x  translate_x |
/// | shear_y  scale_y  translate_y |
/// ```
///
/// Every mutation recomputes the cached [`Transform::kind`] bitmask, which the rasterizer uses to
/// pick its fast paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transform {
    m00: i32,
    m01: i32,
    m02: i32,
    m10: i32,
    m11: i32,
    m12: i32,
    kind: u8,
}

impl Transform {
    /// No transformation.
    pub const TYPE_IDENTITY: u8 = 0;
    /// Non-zero translation.
    pub const TYPE_TRANSLATE: u8 = 1;
    /// Axis-aligned scale other than 1.
    pub const TYPE_SCALE: u8 = 2;
    /// Any shear or rotation component.
    pub const TYPE_ROTATE: u8 = 4;

    pub const fn identity() -> Self {
        Self {
            m00: ONE,
            m01: 0,
            m02: 0,
            m10: 0,
            m11: ONE,
            m12: 0,
            kind: Self::TYPE_IDENTITY,
        }
    }

    /// Build from raw fixed-point coefficients.
    pub fn from_coefficients(
        scale_x: i32,
        shear_x: i32,
        translate_x: i32,
        shear_y: i32,
        scale_y: i32,
        translate_y: i32,
    ) -> Self {
        let mut t = Self {
            m00: scale_x,
            m01: shear_x,
            m02: translate_x,
            m10: shear_y,
            m11: scale_y,
            m12: translate_y,
            kind: 0,
        };
        t.update_kind();
        t
    }

    pub fn scale_x(&self) -> i32 {
        self.m00
    }

    pub fn shear_x(&self) -> i32 {
        self.m01
    }

    pub fn translate_x(&self) -> i32 {
        self.m02
    }

    pub fn shear_y(&self) -> i32 {
        self.m10
    }

    pub fn scale_y(&self) -> i32 {
        self.m11
    }

    pub fn translate_y(&self) -> i32 {
        self.m12
    }

    /// Bitwise OR of the `TYPE_*` constants describing this matrix.
    pub fn kind(&self) -> u8 {
        self.kind
    }

    pub fn is_identity(&self) -> bool {
        self.kind == Self::TYPE_IDENTITY
    }

    pub fn has_rotation(&self) -> bool {
        self.kind & Self::TYPE_ROTATE != 0
    }

    fn update_kind(&mut self) {
        let mut kind = Self::TYPE_IDENTITY;
        if self.m01 != 0 || self.m10 != 0 {
            kind |= Self::TYPE_ROTATE;
        }
        if self.m00 != ONE || self.m11 != ONE {
            kind |= Self::TYPE_SCALE;
        }
        if self.m02 != 0 || self.m12 != 0 {
            kind |= Self::TYPE_TRANSLATE;
        }
        self.kind = kind;
    }

    /// Reset to identity.
    pub fn clear(&mut self) {
        *self = Self::identity();
    }

    /// Copy another transform into this one.
    pub fn set(&mut self, other: &Transform) {
        *self = *other;
    }

    /// Translate in local (pre-transform) coordinates.
    pub fn translate(&mut self, fx: i32, fy: i32) {
        self.m02 += fixed::mul(self.m00, fx) + fixed::mul(self.m01, fy);
        self.m12 += fixed::mul(self.m10, fx) + fixed::mul(self.m11, fy);
        self.update_kind();
    }

    pub fn scale(&mut self, fx: i32, fy: i32) {
        self.m00 = fixed::mul(self.m00, fx);
        self.m10 = fixed::mul(self.m10, fx);
        self.m01 = fixed::mul(self.m01, fy);
        self.m11 = fixed::mul(self.m11, fy);
        self.update_kind();
    }

    /// Rotate by an angle given as its fixed-point cosine and sine.
    pub fn rotate(&mut self, cos: i32, sin: i32) {
        let n00 = fixed::mul(self.m00, cos) + fixed::mul(self.m01, sin);
        let n01 = fixed::mul(self.m01, cos) - fixed::mul(self.m00, sin);
        let n10 = fixed::mul(self.m10, cos) + fixed::mul(self.m11, sin);
        let n11 = fixed::mul(self.m11, cos) - fixed::mul(self.m10, sin);
        self.m00 = n00;
        self.m01 = n01;
        self.m10 = n10;
        self.m11 = n11;
        self.update_kind();
    }

    /// Rotate by a fixed-point angle in radians.
    pub fn rotate_angle(&mut self, angle: i32) {
        self.rotate(fixed::cos(angle), fixed::sin(angle));
    }

    pub fn shear(&mut self, shx: i32, shy: i32) {
        let n00 = self.m00 + fixed::mul(self.m01, shy);
        let n01 = fixed::mul(self.m00, shx) + self.m01;
        let n10 = self.m10 + fixed::mul(self.m11, shy);
        let n11 = fixed::mul(self.m10, shx) + self.m11;
        self.m00 = n00;
        self.m01 = n01;
        self.m10 = n10;
        self.m11 = n11;
        self.update_kind();
    }

    /// `self = self * other`: `other` is applied first, then the previous `self`.
    pub fn concatenate(&mut self, other: &Transform) {
        if other.is_identity() {
            return;
        }
        *self = Self::product(self, other);
    }

    /// `self = other * self`: the previous `self` is applied first, then `other`.
    pub fn pre_concatenate(&mut self, other: &Transform) {
        if other.is_identity() {
            return;
        }
        *self = Self::product(other, self);
    }

    fn product(a: &Transform, b: &Transform) -> Transform {
        let m = fixed::mul;
        Self::from_coefficients(
            m(a.m00, b.m00) + m(a.m01, b.m10),
            m(a.m00, b.m01) + m(a.m01, b.m11),
            m(a.m00, b.m02) + m(a.m01, b.m12) + a.m02,
            m(a.m10, b.m00) + m(a.m11, b.m10),
            m(a.m10, b.m01) + m(a.m11, b.m11),
            m(a.m10, b.m02) + m(a.m11, b.m12) + a.m12,
        )
    }

    pub fn transform_x(&self, fx: i32, fy: i32) -> i32 {
        fixed::mul(self.m00, fx) + fixed::mul(self.m01, fy) + self.m02
    }

    pub fn transform_y(&self, fx: i32, fy: i32) -> i32 {
        fixed::mul(self.m10, fx) + fixed::mul(self.m11, fy) + self.m12
    }

    /// Determinant of the linear part with 32 fractional bits. Kept wide so large scales never
    /// wrap; callers must check for zero before dividing.
    pub fn determinant(&self) -> i64 {
        i64::from(self.m00) * i64::from(self.m11) - i64::from(self.m01) * i64::from(self.m10)
    }

    /// Map a destination-space point back to local space. `None` when the matrix is singular.
    pub fn inverse_transform_x(&self, fx: i32, fy: i32) -> Option<i32> {
        let det = self.determinant();
        if det == 0 {
            return None;
        }
        let x = i64::from(fx) - i64::from(self.m02);
        let y = i64::from(fy) - i64::from(self.m12);
        Some(fixed::cross_div(x, self.m11.into(), y, self.m01.into(), det))
    }

    /// Map a destination-space point back to local space. `None` when the matrix is singular.
    pub fn inverse_transform_y(&self, fx: i32, fy: i32) -> Option<i32> {
        let det = self.determinant();
        if det == 0 {
            return None;
        }
        let x = i64::from(fx) - i64::from(self.m02);
        let y = i64::from(fy) - i64::from(self.m12);
        Some(fixed::cross_div(y, self.m00.into(), x, self.m10.into(), det))
    }

    pub fn inverse_transform(&self, fx: i32, fy: i32) -> Option<(i32, i32)> {
        Some((
            self.inverse_transform_x(fx, fy)?,
            self.inverse_transform_y(fx, fy)?,
        ))
    }

    /// Integer destination-space bounds of the local rectangle `(0, 0, fw, fh)`.
    pub fn bounds(&self, fw: i32, fh: i32) -> IntRect {
        let xs = [
            self.transform_x(0, 0),
            self.transform_x(fw, 0),
            self.transform_x(0, fh),
            self.transform_x(fw, fh),
        ];
        let ys = [
            self.transform_y(0, 0),
            self.transform_y(fw, 0),
            self.transform_y(0, fh),
            self.transform_y(fw, fh),
        ];
        let (min_x, max_x) = min_max(&xs);
        let (min_y, max_y) = min_max(&ys);
        let x = fixed::to_int_floor(min_x);
        let y = fixed::to_int_floor(min_y);
        IntRect::new(
            x,
            y,
            fixed::to_int_ceil(max_x) - x,
            fixed::to_int_ceil(max_y) - y,
        )
    }

    pub fn from_affine(a: kurbo::Affine) -> Self {
        let [a, b, c, d, e, f] = a.as_coeffs();
        Self::from_coefficients(
            fixed::to_fixed_f64(a),
            fixed::to_fixed_f64(c),
            fixed::to_fixed_f64(e),
            fixed::to_fixed_f64(b),
            fixed::to_fixed_f64(d),
            fixed::to_fixed_f64(f),
        )
    }

    pub fn to_affine(&self) -> kurbo::Affine {
        kurbo::Affine::new([
            fixed::to_f64(self.m00),
            fixed::to_f64(self.m10),
            fixed::to_f64(self.m01),
            fixed::to_f64(self.m11),
            fixed::to_f64(self.m02),
            fixed::to_f64(self.m12),
        ])
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<kurbo::Affine> for Transform {
    fn from(a: kurbo::Affine) -> Self {
        Self::from_affine(a)
    }
}

fn min_max(v: &[i32; 4]) -> (i32, i32) {
    let mut lo = v[0];
    let mut hi = v[0];
    for &x in &v[1..] {
        lo = lo.min(x);
        hi = hi.max(x);
    }
    (lo, hi)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
