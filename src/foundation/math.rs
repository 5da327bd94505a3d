//! Packed ARGB helpers shared by the compositor, the rasterizer and the codecs.
//!
//! Pixels are `u32` in `0xAARRGGBB` order. Stored pixels are premultiplied: every color channel
//! is at most the alpha channel.

/// Opaque black.
pub const OPAQUE_BLACK: u32 = 0xff00_0000;

/// `x * y / 255` rounded to nearest.
#[inline(always)]
pub fn mul_div255(x: u32, y: u32) -> u32 {
    (x * y + 127) / 255
}

#[inline(always)]
pub fn alpha(argb: u32) -> u32 {
    argb >> 24
}

#[inline(always)]
pub fn red(argb: u32) -> u32 {
    (argb >> 16) & 0xff
}

#[inline(always)]
pub fn green(argb: u32) -> u32 {
    (argb >> 8) & 0xff
}

#[inline(always)]
pub fn blue(argb: u32) -> u32 {
    argb & 0xff
}

#[inline(always)]
pub fn pack(a: u32, r: u32, g: u32, b: u32) -> u32 {
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Convert a straight-alpha ARGB color to premultiplied form.
#[inline]
pub fn premultiply(argb: u32) -> u32 {
    let a = alpha(argb);
    match a {
        0 => 0,
        255 => argb,
        _ => pack(
            a,
            mul_div255(red(argb), a),
            mul_div255(green(argb), a),
            mul_div255(blue(argb), a),
        ),
    }
}

/// Convert a premultiplied ARGB pixel back to straight alpha.
#[inline]
pub fn unpremultiply(argb: u32) -> u32 {
    let a = alpha(argb);
    match a {
        0 => 0,
        255 => argb,
        _ => {
            let un = |c: u32| ((c * 255 + a / 2) / a).min(255);
            pack(a, un(red(argb)), un(green(argb)), un(blue(argb)))
        }
    }
}

/// Scale every channel of a premultiplied pixel by `alpha` (0-255).
#[inline(always)]
pub fn scale_pixel(argb: u32, alpha: u32) -> u32 {
    pack(
        mul_div255(self::alpha(argb), alpha),
        mul_div255(red(argb), alpha),
        mul_div255(green(argb), alpha),
        mul_div255(blue(argb), alpha),
    )
}

/// Premultiplied straight-RGBA bytes to a packed premultiplied pixel.
#[inline]
pub fn premultiply_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    premultiply(pack(u32::from(a), u32::from(r), u32::from(g), u32::from(b)))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
