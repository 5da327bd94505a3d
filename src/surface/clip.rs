/// Integer rectangle in destination pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// The rasterizer clip is always an [`IntRect`] in view space.
pub type ClipRect = IntRect;

impl IntRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, saturated at `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturated at `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Rectangle spanning `x1..x2` by `y1..y2`, with the extent clamped into `0..=i32::MAX`.
    fn from_edges(x1: i32, y1: i32, x2: i32, y2: i32) -> IntRect {
        let extent =
            |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo)).clamp(0, i64::from(i32::MAX)) as i32;
        IntRect::new(x1, y1, extent(x1, x2), extent(y1, y2))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            i64::from(self.width) * i64::from(self.height)
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Intersection; empty rectangles collapse to zero size at the clamped origin.
    pub fn intersection(&self, other: &IntRect) -> IntRect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        IntRect::from_edges(x1, y1, x2, y2)
    }

    /// Grow by `n` pixels on every side.
    pub fn expanded(&self, n: i32) -> IntRect {
        IntRect::from_edges(
            self.x.saturating_sub(n),
            self.y.saturating_sub(n),
            self.right().saturating_add(n),
            self.bottom().saturating_add(n),
        )
    }

    pub fn union(&self, other: &IntRect) -> IntRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        IntRect::from_edges(x1, y1, x2, y2)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/clip.rs"]
mod tests;
