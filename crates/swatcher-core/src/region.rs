//! Region, Point - Rectangular areas of an image
//!
//! A [`Region`] is anchored at its northwest corner and extends `w` pixels
//! east and `h` pixels south. The east and south edges are exclusive.

use crate::error::{Error, Result};
use std::fmt;

/// A pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    /// Create a new point
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A rectangle region
///
/// Like a pixel, a region is small and `Copy`. It is never clamped to an
/// image: callers that read pixels through it check it first with
/// [`Region::ensure_within`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Left x coordinate
    pub x: u32,
    /// Top y coordinate
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl Region {
    /// Create a new region from its northwest corner and size
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a square region of side `size`
    pub const fn square(x: u32, y: u32, size: u32) -> Self {
        Self::new(x, y, size, size)
    }

    /// Create the region covering a whole `width` x `height` image
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Create a region from its northwest and southeast corners
    ///
    /// Returns `None` if `se` lies west or north of `nw`.
    pub fn from_corners(nw: Point, se: Point) -> Option<Self> {
        let w = se.x.checked_sub(nw.x)?;
        let h = se.y.checked_sub(nw.y)?;
        Some(Self::new(nw.x, nw.y, w, h))
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> u64 {
        self.x as u64 + self.w as u64
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.h as u64
    }

    /// Northwest corner
    #[inline]
    pub fn nw(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Southeast corner (exclusive)
    ///
    /// Saturates at `u32::MAX` for regions that reach past it.
    #[inline]
    pub fn se(&self) -> Point {
        Point::new(self.x.saturating_add(self.w), self.y.saturating_add(self.h))
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Check if the region is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Check if a point is inside the region
    #[inline]
    pub fn contains_point(&self, x: u32, y: u32) -> bool {
        x >= self.x && (x as u64) < self.right() && y >= self.y && (y as u64) < self.bottom()
    }

    /// Check if this region contains another region
    pub fn contains_region(&self, other: &Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if this region overlaps with another
    pub fn overlaps(&self, other: &Region) -> bool {
        (self.x as u64) < other.right()
            && self.right() > other.x as u64
            && (self.y as u64) < other.bottom()
            && self.bottom() > other.y as u64
    }

    /// Check that the region fits inside a `width` x `height` image
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if any edge lies past the image.
    pub fn ensure_within(&self, width: u32, height: u32) -> Result<()> {
        if self.right() > width as u64 || self.bottom() > height as u64 {
            return Err(Error::OutOfRange {
                region: *self,
                width,
                height,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.x,
            self.y,
            self.right(),
            self.bottom()
        )
    }
}
