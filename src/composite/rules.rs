//! Per-pixel blend math for every [`BlendMode`](super::BlendMode).
//!
//! All pixels are premultiplied ARGB. Products are scaled with `(a*b + 127) / 255`.

use crate::foundation::math::{alpha, blue, green, mul_div255 as m, pack, red};

/// Blend math for one mode.
pub(crate) trait Rule: 'static {
    /// Composite `src` onto a destination that carries alpha.
    fn blend(dst: u32, src: u32) -> u32;

    /// Composite `src` onto an opaque destination. The result is always opaque.
    #[inline(always)]
    fn blend_onto_opaque(dst: u32, src: u32) -> u32 {
        Self::blend(dst | 0xff00_0000, src) | 0xff00_0000
    }

    /// Same as [`Rule::blend`] for a source whose alpha is `0xff`.
    #[inline(always)]
    fn blend_opaque_src(dst: u32, src: u32) -> u32 {
        Self::blend(dst, src)
    }
}

/// `Fs * S + Fd * D` per channel, saturated at 255.
#[inline(always)]
fn porter_duff(dst: u32, src: u32, fs: u32, fd: u32) -> u32 {
    let ch = |s: u32, d: u32| (m(s, fs) + m(d, fd)).min(255);
    pack(
        ch(alpha(src), alpha(dst)),
        ch(red(src), red(dst)),
        ch(green(src), green(dst)),
        ch(blue(src), blue(dst)),
    )
}

macro_rules! porter_duff_rule {
    ($(#[$doc:meta])* $name:ident, |$sa:ident, $da:ident| ($fs:expr, $fd:expr)) => {
        $(#[$doc])*
        pub(crate) struct $name;

        impl Rule for $name {
            #[inline(always)]
            #[allow(unused_variables)]
            fn blend(dst: u32, src: u32) -> u32 {
                let $sa = alpha(src);
                let $da = alpha(dst);
                porter_duff(dst, src, $fs, $fd)
            }
        }
    };
}

/// Result is fully cleared: `0x00000000`, or opaque black on an opaque destination.
pub(crate) struct Clear;

impl Rule for Clear {
    #[inline(always)]
    fn blend(_dst: u32, _src: u32) -> u32 {
        0
    }

    #[inline(always)]
    fn blend_onto_opaque(_dst: u32, _src: u32) -> u32 {
        0xff00_0000
    }
}

/// Source replaces destination.
pub(crate) struct Src;

impl Rule for Src {
    #[inline(always)]
    fn blend(_dst: u32, src: u32) -> u32 {
        src
    }
}

/// Destination is left untouched.
pub(crate) struct Dst;

impl Rule for Dst {
    #[inline(always)]
    fn blend(dst: u32, _src: u32) -> u32 {
        dst
    }

    #[inline(always)]
    fn blend_onto_opaque(dst: u32, _src: u32) -> u32 {
        dst
    }
}

/// `S + D * (1 - As)`.
pub(crate) struct SrcOver;

impl Rule for SrcOver {
    #[inline(always)]
    fn blend(dst: u32, src: u32) -> u32 {
        let sa = alpha(src);
        if sa == 0xff {
            return src;
        }
        if sa == 0 {
            return dst;
        }
        let inv = 255 - sa;
        pack(
            sa + m(alpha(dst), inv),
            red(src) + m(red(dst), inv),
            green(src) + m(green(dst), inv),
            blue(src) + m(blue(dst), inv),
        )
    }

    #[inline(always)]
    fn blend_onto_opaque(dst: u32, src: u32) -> u32 {
        let sa = alpha(src);
        if sa == 0xff {
            return src;
        }
        if sa == 0 {
            return dst;
        }
        let inv = 255 - sa;
        pack(
            0xff,
            red(src) + m(red(dst), inv),
            green(src) + m(green(dst), inv),
            blue(src) + m(blue(dst), inv),
        )
    }

    #[inline(always)]
    fn blend_opaque_src(_dst: u32, src: u32) -> u32 {
        src
    }
}

/// `S * (1 - Ad) + D`.
pub(crate) struct DstOver;

impl Rule for DstOver {
    #[inline(always)]
    fn blend(dst: u32, src: u32) -> u32 {
        let da = alpha(dst);
        if da == 0xff {
            return dst;
        }
        porter_duff(dst, src, 255 - da, 255)
    }

    #[inline(always)]
    fn blend_onto_opaque(dst: u32, _src: u32) -> u32 {
        dst
    }
}

porter_duff_rule!(
    /// `S * Ad`.
    SrcIn, |sa, da| (da, 0)
);
porter_duff_rule!(
    /// `D * As`.
    DstIn, |sa, da| (0, sa)
);
porter_duff_rule!(
    /// `S * (1 - Ad)`.
    SrcOut, |sa, da| (255 - da, 0)
);
porter_duff_rule!(
    /// `D * (1 - As)`.
    DstOut, |sa, da| (0, 255 - sa)
);
porter_duff_rule!(
    /// `S * Ad + D * (1 - As)`.
    SrcAtop, |sa, da| (da, 255 - sa)
);
porter_duff_rule!(
    /// `S * (1 - Ad) + D * As`.
    DstAtop, |sa, da| (255 - da, sa)
);
porter_duff_rule!(
    /// `S * (1 - Ad) + D * (1 - As)`.
    Xor, |sa, da| (255 - da, 255 - sa)
);

/// Saturating `S + D`.
pub(crate) struct Add;

impl Rule for Add {
    #[inline(always)]
    fn blend(dst: u32, src: u32) -> u32 {
        pack(
            (alpha(src) + alpha(dst)).min(255),
            (red(src) + red(dst)).min(255),
            (green(src) + green(dst)).min(255),
            (blue(src) + blue(dst)).min(255),
        )
    }
}

/// `S * D + S * (1 - Ad) + D * (1 - As)`; alpha `As + Ad - As * Ad`.
pub(crate) struct Multiply;

impl Rule for Multiply {
    #[inline(always)]
    fn blend(dst: u32, src: u32) -> u32 {
        let sa = alpha(src);
        let da = alpha(dst);
        let isa = 255 - sa;
        let ida = 255 - da;
        let ch = |s: u32, d: u32| (m(s, d) + m(s, ida) + m(d, isa)).min(255);
        pack(
            (sa + da - m(sa, da)).min(255),
            ch(red(src), red(dst)),
            ch(green(src), green(dst)),
            ch(blue(src), blue(dst)),
        )
    }

    #[inline(always)]
    fn blend_onto_opaque(dst: u32, src: u32) -> u32 {
        let isa = 255 - alpha(src);
        let ch = |s: u32, d: u32| (m(s, d) + m(d, isa)).min(255);
        pack(
            0xff,
            ch(red(src), red(dst)),
            ch(green(src), green(dst)),
            ch(blue(src), blue(dst)),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/rules.rs"]
mod tests;
