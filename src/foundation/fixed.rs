//! 16.16 fixed-point arithmetic.
//!
//! A fixed-point value is an `i32` where one unit is `1/65536`. Every operation here is exact
//! integer arithmetic so repeated transforms are bit-reproducible across platforms.

use std::sync::OnceLock;

/// Number of fractional bits.
pub const FRACTION_BITS: u32 = 16;
/// Fixed-point `1.0`.
pub const ONE: i32 = 1 << FRACTION_BITS;
/// Fixed-point `0.5`.
pub const ONE_HALF: i32 = ONE >> 1;
/// Mask of the fractional bits.
pub const FRACTION_MASK: i32 = ONE - 1;
/// Fixed-point pi.
pub const PI: i32 = 205_887;
/// Fixed-point `2 * pi`.
pub const TWO_PI: i32 = 411_775;
/// Fixed-point `pi / 2`.
pub const HALF_PI: i32 = 102_944;

/// Largest integer that survives `to_int(to_fixed(n))`.
pub const MAX_INT_VALUE: i32 = (1 << 15) - 1;
/// Smallest integer that survives `to_int(to_fixed(n))`.
pub const MIN_INT_VALUE: i32 = -(1 << 15);

const SIN_TABLE_BITS: u32 = 10;
const SIN_TABLE_LEN: usize = 1 << SIN_TABLE_BITS;

#[inline]
pub fn to_fixed(n: i32) -> i32 {
    n << FRACTION_BITS
}

/// Convert a real value, rounding to the nearest representable fixed-point value.
#[inline]
pub fn to_fixed_f64(n: f64) -> i32 {
    (n * f64::from(ONE)).round() as i32
}

#[inline]
pub fn to_f64(f: i32) -> f64 {
    f64::from(f) / f64::from(ONE)
}

/// Convert to an integer, truncating toward zero (the same rule as an `f64 as i32` cast).
#[inline]
pub fn to_int(f: i32) -> i32 {
    if f < 0 {
        -((-f) >> FRACTION_BITS)
    } else {
        f >> FRACTION_BITS
    }
}

#[inline]
pub fn to_int_floor(f: i32) -> i32 {
    f >> FRACTION_BITS
}

#[inline]
pub fn to_int_ceil(f: i32) -> i32 {
    -((-f) >> FRACTION_BITS)
}

#[inline]
pub fn to_int_round(f: i32) -> i32 {
    to_int_floor(f + ONE_HALF)
}

#[inline]
pub fn frac_part(f: i32) -> i32 {
    f & FRACTION_MASK
}

#[inline]
pub fn floor(f: i32) -> i32 {
    f & !FRACTION_MASK
}

#[inline]
pub fn ceil(f: i32) -> i32 {
    -floor(-f)
}

#[inline]
pub fn mul(a: i32, b: i32) -> i32 {
    ((i64::from(a) * i64::from(b)) >> FRACTION_BITS) as i32
}

/// Fixed-point division. `b` must be non-zero.
#[inline]
pub fn div(a: i32, b: i32) -> i32 {
    ((i64::from(a) << FRACTION_BITS) / i64::from(b)) as i32
}

/// `a * b / c` with a 64-bit intermediate. `c` must be non-zero.
#[inline]
pub fn mul_div(a: i32, b: i32, c: i32) -> i32 {
    (i64::from(a) * i64::from(b) / i64::from(c)) as i32
}

/// Narrow a wide intermediate back to fixed point, saturating at the `i32` limits.
#[inline]
pub fn saturate(v: i128) -> i32 {
    v.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

/// `1 / f`, saturated. `f` must be non-zero.
#[inline]
pub fn recip(f: i32) -> i32 {
    saturate((1i128 << (2 * FRACTION_BITS)) / i128::from(f))
}

/// `(a * b - c * d) / det` where the products and `det` carry 32 fractional bits (for example
/// a 2x2 cofactor over a determinant from [`crate::transform::affine::Transform::determinant`]). The
/// result is 16.16, saturated. `det` must be non-zero.
#[inline]
pub fn cross_div(a: i64, b: i64, c: i64, d: i64, det: i64) -> i32 {
    let num = i128::from(a) * i128::from(b) - i128::from(c) * i128::from(d);
    saturate((num << FRACTION_BITS) / i128::from(det))
}

/// Square root of a value with 32 fractional bits, such as a sum of 16.16 squares, as 16.16.
pub fn sqrt_wide(v: u64) -> i64 {
    isqrt_u64(v) as i64
}

#[inline]
pub fn clamp(v: i32, min: i32, max: i32) -> i32 {
    v.clamp(min, max)
}

/// Fixed-point square root. Negative inputs return 0.
pub fn sqrt(f: i32) -> i32 {
    if f <= 0 {
        return 0;
    }
    isqrt_u64((f as u64) << FRACTION_BITS) as i32
}

fn isqrt_u64(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = x.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

fn sin_table() -> &'static [i32; SIN_TABLE_LEN + 1] {
    static TABLE: OnceLock<[i32; SIN_TABLE_LEN + 1]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut t = [0i32; SIN_TABLE_LEN + 1];
        for (i, v) in t.iter_mut().enumerate() {
            let a = (i as f64) * std::f64::consts::FRAC_PI_2 / (SIN_TABLE_LEN as f64);
            *v = to_fixed_f64(a.sin());
        }
        t
    })
}

/// Sine of a fixed-point angle in radians.
pub fn sin(angle: i32) -> i32 {
    let mut a = angle % TWO_PI;
    if a < 0 {
        a += TWO_PI;
    }
    let (a, negate) = if a >= PI { (a - PI, true) } else { (a, false) };
    let a = if a > HALF_PI { PI - a } else { a };

    // Position within the quarter wave, as a 16.16 table index.
    let pos = (i64::from(a) << (SIN_TABLE_BITS + FRACTION_BITS)) / i64::from(HALF_PI);
    let idx = ((pos >> FRACTION_BITS) as usize).min(SIN_TABLE_LEN);
    let frac = (pos & i64::from(FRACTION_MASK)) as i32;
    let table = sin_table();
    let s0 = table[idx];
    let s1 = table[(idx + 1).min(SIN_TABLE_LEN)];
    let v = s0 + mul(s1 - s0, frac);
    if negate { -v } else { v }
}

/// Cosine of a fixed-point angle in radians.
pub fn cos(angle: i32) -> i32 {
    sin(angle.wrapping_add(HALF_PI))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/fixed.rs"]
mod tests;
