//! Read-only pixel access for analysis
//!
//! The analysis algorithms never touch a decoder or a storage layout. They
//! read colors through [`PixelSource`], which [`Image`](crate::Image)
//! implements and which tests can implement over any in-memory grid.

use crate::{Region, Rgb};

/// A rectangular grid of colors addressable by `(x, y)`.
pub trait PixelSource {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// May panic if `x >= width()` or `y >= height()`. Callers validate
    /// the area they read with [`Region::ensure_within`] first.
    fn rgb_at(&self, x: u32, y: u32) -> Rgb;

    /// Region covering the whole grid.
    fn bounds(&self) -> Region {
        Region::full(self.width(), self.height())
    }
}

impl<P: PixelSource + ?Sized> PixelSource for &P {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        (**self).rgb_at(x, y)
    }
}
