//! Pixel compositing: blend modes, the [`Composite`] strategy trait and image sampling.
//!
//! Every [`BlendMode`] resolves to one of two static compositors, one specialized for opaque
//! destinations and one for destinations with an alpha channel. The per-pixel math is inlined
//! into each compositor's loops through generics, so picking a compositor is the only dynamic
//! dispatch per draw call.

mod blit;
mod compositor;
pub(crate) mod rules;
pub mod sample;

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::foundation::error::PulpError;
use crate::surface::clip::IntRect;

use compositor::{AlphaDest, Compositor, OpaqueDest};
use rules::{
    Add, Clear, Dst, DstAtop, DstIn, DstOut, DstOver, Multiply, Src, SrcAtop, SrcIn, SrcOut,
    SrcOver, Xor,
};

/// Compositing rule applied when drawing source pixels onto a destination.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    Clear,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcAtop,
    DstAtop,
    Xor,
    /// Saturating per-channel addition.
    Add,
    /// Per-channel multiply.
    Multiply,
}

impl BlendMode {
    /// Every mode, in declaration order.
    pub const ALL: [BlendMode; 14] = [
        BlendMode::Clear,
        BlendMode::Src,
        BlendMode::Dst,
        BlendMode::SrcOver,
        BlendMode::DstOver,
        BlendMode::SrcIn,
        BlendMode::DstIn,
        BlendMode::SrcOut,
        BlendMode::DstOut,
        BlendMode::SrcAtop,
        BlendMode::DstAtop,
        BlendMode::Xor,
        BlendMode::Add,
        BlendMode::Multiply,
    ];

    pub const fn clear() -> Self {
        Self::Clear
    }

    pub const fn src() -> Self {
        Self::Src
    }

    pub const fn dst() -> Self {
        Self::Dst
    }

    pub const fn src_over() -> Self {
        Self::SrcOver
    }

    pub const fn dst_over() -> Self {
        Self::DstOver
    }

    pub const fn src_in() -> Self {
        Self::SrcIn
    }

    pub const fn dst_in() -> Self {
        Self::DstIn
    }

    pub const fn src_out() -> Self {
        Self::SrcOut
    }

    pub const fn dst_out() -> Self {
        Self::DstOut
    }

    pub const fn src_atop() -> Self {
        Self::SrcAtop
    }

    pub const fn dst_atop() -> Self {
        Self::DstAtop
    }

    pub const fn xor() -> Self {
        Self::Xor
    }

    pub const fn add() -> Self {
        Self::Add
    }

    pub const fn multiply() -> Self {
        Self::Multiply
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Src => "src",
            Self::Dst => "dst",
            Self::SrcOver => "src_over",
            Self::DstOver => "dst_over",
            Self::SrcIn => "src_in",
            Self::DstIn => "dst_in",
            Self::SrcOut => "src_out",
            Self::DstOut => "dst_out",
            Self::SrcAtop => "src_atop",
            Self::DstAtop => "dst_atop",
            Self::Xor => "xor",
            Self::Add => "add",
            Self::Multiply => "multiply",
        }
    }

    /// `true` when a fully transparent source leaves the destination untouched.
    pub fn ignores_transparent_source(self) -> bool {
        matches!(
            self,
            Self::Dst
                | Self::SrcOver
                | Self::DstOver
                | Self::DstOut
                | Self::SrcAtop
                | Self::Xor
                | Self::Add
                | Self::Multiply
        )
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = PulpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlendMode::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| PulpError::validation(format!("unknown blend mode '{s}'")))
    }
}

macro_rules! static_compositors {
    ($($mode:ident => $rule:ty, $opaque:ident, $alpha:ident;)*) => {
        $(
            static $opaque: Compositor<$rule, OpaqueDest> = Compositor::new(BlendMode::$mode, true);
            static $alpha: Compositor<$rule, AlphaDest> = Compositor::new(BlendMode::$mode, false);
        )*

        impl BlendMode {
            /// The shared compositor for this mode and destination kind.
            ///
            /// The returned reference is address-stable: repeated calls with the same arguments
            /// return the same instance.
            pub fn composite(self, dest_opaque: bool) -> &'static dyn Composite {
                match (self, dest_opaque) {
                    $(
                        (BlendMode::$mode, true) => &$opaque,
                        (BlendMode::$mode, false) => &$alpha,
                    )*
                }
            }
        }
    };
}

static_compositors! {
    Clear => Clear, CLEAR_OPAQUE, CLEAR_ALPHA;
    Src => Src, SRC_OPAQUE, SRC_ALPHA;
    Dst => Dst, DST_OPAQUE, DST_ALPHA;
    SrcOver => SrcOver, SRC_OVER_OPAQUE, SRC_OVER_ALPHA;
    DstOver => DstOver, DST_OVER_OPAQUE, DST_OVER_ALPHA;
    SrcIn => SrcIn, SRC_IN_OPAQUE, SRC_IN_ALPHA;
    DstIn => DstIn, DST_IN_OPAQUE, DST_IN_ALPHA;
    SrcOut => SrcOut, SRC_OUT_OPAQUE, SRC_OUT_ALPHA;
    DstOut => DstOut, DST_OUT_OPAQUE, DST_OUT_ALPHA;
    SrcAtop => SrcAtop, SRC_ATOP_OPAQUE, SRC_ATOP_ALPHA;
    DstAtop => DstAtop, DST_ATOP_OPAQUE, DST_ATOP_ALPHA;
    Xor => Xor, XOR_OPAQUE, XOR_ALPHA;
    Add => Add, ADD_OPAQUE, ADD_ALPHA;
    Multiply => Multiply, MULTIPLY_OPAQUE, MULTIPLY_ALPHA;
}

/// Per-edge clamping policy for image sampling.
///
/// A clamped edge replicates the boundary pixel (hard edge); an unclamped edge fades to
/// transparent under bilinear filtering (soft, anti-aliased edge).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct EdgeClamp(u8);

impl EdgeClamp {
    pub const NONE: EdgeClamp = EdgeClamp(0);
    pub const LEFT: EdgeClamp = EdgeClamp(1);
    pub const RIGHT: EdgeClamp = EdgeClamp(2);
    pub const TOP: EdgeClamp = EdgeClamp(4);
    pub const BOTTOM: EdgeClamp = EdgeClamp(8);
    pub const ALL: EdgeClamp = EdgeClamp(15);

    pub const fn from_bits(bits: u8) -> Self {
        EdgeClamp(bits & 15)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: EdgeClamp) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for EdgeClamp {
    type Output = EdgeClamp;

    fn bitor(self, rhs: EdgeClamp) -> EdgeClamp {
        EdgeClamp(self.0 | rhs.0)
    }
}

impl BitOrAssign for EdgeClamp {
    fn bitor_assign(&mut self, rhs: EdgeClamp) {
        self.0 |= rhs.0;
    }
}

/// Source side of an image blit.
#[derive(Clone, Copy, Debug)]
pub struct ImageSource<'a> {
    pub pixels: &'a [u32],
    pub scan_width: usize,
    pub opaque: bool,
    pub edge_clamp: EdgeClamp,
    /// Sampled region of `pixels`; `(u, v)` coordinates are relative to its origin.
    pub rect: IntRect,
}

/// Walk of fixed-point source coordinates across the destination.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleSpan {
    pub u: i32,
    pub v: i32,
    /// Step per destination pixel.
    pub du: i32,
    pub dv: i32,
    /// Step per destination row.
    pub du_row: i32,
    pub dv_row: i32,
    /// When `false`, `dv` is ignored and each row samples a single source row.
    pub rotated: bool,
    pub bilinear: bool,
}

/// Destination side of an image blit.
#[derive(Debug)]
pub struct DestTarget<'a> {
    pub pixels: &'a mut [u32],
    pub scan_width: usize,
    pub offset: usize,
    pub pixel_count: usize,
    pub row_count: usize,
}

/// Stateless blend strategy for one mode and one destination kind.
///
/// All four operations share semantics across modes; only the per-pixel math differs.
/// Pixels are premultiplied ARGB.
pub trait Composite: Send + Sync {
    fn mode(&self) -> BlendMode;

    /// `true` for the variant specialized for opaque destinations.
    fn dest_opaque(&self) -> bool;

    /// Blend one source pixel into `dest[offset]`.
    fn blend(&self, dest: &mut [u32], offset: usize, src: u32);

    /// Blend one source pixel scaled by `extra_alpha` (0-255).
    fn blend_alpha(&self, dest: &mut [u32], offset: usize, src: u32, extra_alpha: u32);

    /// Blend a solid color across `count` pixels starting at `offset`.
    fn blend_row(&self, dest: &mut [u32], offset: usize, src: u32, count: usize);

    /// Sample `source` along `span` and blend into `dest`. `render_alpha == 0` is a no-op.
    fn blend_image(
        &self,
        source: &ImageSource<'_>,
        span: &SampleSpan,
        render_alpha: u32,
        dest: &mut DestTarget<'_>,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/composite/mod.rs"]
mod tests;
