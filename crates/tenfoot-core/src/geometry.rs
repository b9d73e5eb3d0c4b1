#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are abstract layout units (cells for a terminal host, logical
//! pixels for a windowed one), origin at the top-left of the scrollable
//! content. `u32` leaves room for long libraries laid out in pixels.

/// An axis-aligned rectangle in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in units.
    pub width: u32,
    /// Height in units.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Check if `other` lies entirely within this rectangle.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Grow by `margin` on every side, stopping at the content origin.
    #[inline]
    #[must_use]
    pub const fn inflate(self, margin: u32) -> Self {
        let x = self.x.saturating_sub(margin);
        let y = self.y.saturating_sub(margin);
        let right = self.right().saturating_add(margin);
        let bottom = self.bottom().saturating_add(margin);
        Self::new(x, y, right - x, bottom - y)
    }
}
