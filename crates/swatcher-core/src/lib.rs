//! Swatcher Core - Basic data structures for color swatch analysis
//!
//! This crate provides the fundamental types shared by the swatcher crates:
//!
//! - [`Image`] / [`ImageMut`] - Decoded RGBA image container (immutable / mutable)
//! - [`PixelSource`] - Narrow read interface the analysis algorithms work against
//! - [`Rgb`] - Canonical color key, displayed as `rgb(R, G, B)`
//! - [`Region`] - Rectangular area of an image
//! - [`color`] - Packing helpers for 32-bit RGBA pixel words

pub mod error;
pub mod image;
pub mod region;
pub mod source;

pub use error::{Error, Result};
pub use image::{Image, ImageFormat, ImageMut};
pub use region::{Point, Region};
pub use source::PixelSource;

use std::fmt;

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }
}

/// Canonical color key.
///
/// Two pixels have the same color iff all three channels are equal; alpha
/// takes no part in the comparison. The [`Display`](fmt::Display) form is
/// the CSS notation `rgb(R, G, B)`.
///
/// # Example
///
/// ```
/// use swatcher_core::Rgb;
///
/// let c = Rgb::new(255, 0, 128);
/// assert_eq!(c.to_string(), "rgb(255, 0, 128)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode the color part of a packed `0xRRGGBBAA` pixel.
    #[inline]
    pub fn from_pixel(pixel: u32) -> Self {
        let (r, g, b) = color::extract_rgb(pixel);
        Self { r, g, b }
    }

    /// Pack into an opaque `0xRRGGBBAA` pixel.
    #[inline]
    pub fn to_pixel(self) -> u32 {
        color::compose_rgb(self.r, self.g, self.b)
    }

    /// Channels as a tuple.
    #[inline]
    pub fn channels(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        c.channels()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_and_extract() {
        let pixel = color::compose_rgba(10, 20, 30, 40);
        assert_eq!(pixel, 0x0A14_1E28);
        assert_eq!(color::extract_rgba(pixel), (10, 20, 30, 40));
        assert_eq!(color::alpha(color::compose_rgb(1, 2, 3)), 255);
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::new(255, 0, 128).to_string(), "rgb(255, 0, 128)");
        assert_eq!(Rgb::BLACK.to_string(), "rgb(0, 0, 0)");
    }

    #[test]
    fn test_rgb_ignores_alpha() {
        let opaque = Rgb::from_pixel(color::compose_rgba(1, 2, 3, 255));
        let clear = Rgb::from_pixel(color::compose_rgba(1, 2, 3, 0));
        assert_eq!(opaque, clear);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::new(255, 0, 128).to_hex(), "#ff0080");
        assert_eq!(Rgb::from((1, 2, 3)).channels(), (1, 2, 3));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_rgb_serialization() {
        let c = Rgb::new(12, 34, 56);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"r":12,"g":34,"b":56}"#);
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
