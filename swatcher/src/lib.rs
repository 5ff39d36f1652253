//! Swatcher - Representative colors of PNG and JPEG images
//!
//! Samples an image at a configurable accuracy, ranks the exact colors it
//! finds by frequency, and reduces the image to a grid of dominant-color
//! tiles.
//!
//! # Example
//!
//! ```no_run
//! use swatcher::{Accuracy, Swatcher};
//!
//! let swatcher = Swatcher::open("photo.jpg", Accuracy::Medium)?;
//! for color in swatcher.top_swatches(5)? {
//!     println!("{color}");
//! }
//!
//! let composite = swatcher.generate_composite(32)?;
//! println!("{} tiles", composite.len());
//! # Ok::<(), swatcher::Error>(())
//! ```

// Re-export core types (primary data structures used everywhere)
pub use swatcher_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use swatcher_color as analysis;
pub use swatcher_io as io;

pub use swatcher_color::{
    Accuracy, Composite, CompositeOptions, Stride, Swatch, SwatchError, SwatchTally, Tile,
};
pub use swatcher_io::IoError;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from a [`Swatcher`] session
#[derive(Debug, Error)]
pub enum Error {
    /// Loading the image failed
    #[error(transparent)]
    Io(#[from] IoError),

    /// Analysis failed
    #[error(transparent)]
    Swatch(#[from] SwatchError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One decoded image plus the accuracy used to sample it
#[derive(Debug, Clone)]
pub struct Swatcher {
    image: Image,
    accuracy: Accuracy,
    path: Option<PathBuf>,
}

impl Swatcher {
    /// Decode the image at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file is missing, corrupt, or not PNG/JPEG.
    pub fn open<P: AsRef<Path>>(path: P, accuracy: Accuracy) -> Result<Self> {
        let path = path.as_ref();
        let image = swatcher_io::read_image(path)?;
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            %accuracy,
            "opened image"
        );
        Ok(Self {
            image,
            accuracy,
            path: Some(path.to_path_buf()),
        })
    }

    /// Decode the image at `path`, parsing the accuracy from a label such as
    /// `"High"`.
    pub fn open_with_label<P: AsRef<Path>>(path: P, accuracy: &str) -> Result<Self> {
        let accuracy = accuracy.parse::<Accuracy>()?;
        Self::open(path, accuracy)
    }

    /// Wrap an already decoded image
    pub fn from_image(image: Image, accuracy: Accuracy) -> Self {
        Self {
            image,
            accuracy,
            path: None,
        }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }

    pub fn set_accuracy(&mut self, accuracy: Accuracy) {
        self.accuracy = accuracy;
    }

    /// Sampling step derived from the accuracy
    pub fn stride(&self) -> Stride {
        self.accuracy.stride()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Format the image was decoded from
    pub fn format(&self) -> ImageFormat {
        self.image.informat()
    }

    /// Tally colors in `region`, or the whole image when `None`.
    pub fn analyze_pixels(&self, region: Option<Region>) -> Result<SwatchTally> {
        let region = region.unwrap_or_else(|| self.image.bounds());
        Ok(swatcher_color::analyze(&self.image, region, self.stride())?)
    }

    /// Tally colors in the square of edge `size` whose northwest corner is `nw`
    pub fn analyze_square(&self, nw: Point, size: u32) -> Result<SwatchTally> {
        self.analyze_pixels(Some(Region::square(nw.x, nw.y, size)))
    }

    /// The `n` most frequent colors of the whole image.
    ///
    /// # Errors
    ///
    /// * [`SwatchError::InvalidArgument`] if `n == 0`
    /// * [`SwatchError::OutOfRange`] if the image has fewer than `n` sampled colors
    pub fn top_swatches(&self, n: usize) -> Result<Vec<Rgb>> {
        Ok(self.analyze_pixels(None)?.top_swatches(n)?)
    }

    /// The most frequent color of the whole image
    pub fn top_swatch(&self) -> Result<Rgb> {
        Ok(self.analyze_pixels(None)?.top_swatch()?)
    }

    /// Composite with square tiles of edge `tile_size`, scanning every
    /// pixel of each tile.
    pub fn generate_composite(&self, tile_size: u32) -> Result<Composite> {
        self.generate_composite_with(&CompositeOptions::new(tile_size))
    }

    /// Composite with explicit options.
    ///
    /// Pass `.with_tile_stride(self.stride().get())` to sample tiles at the
    /// session accuracy.
    pub fn generate_composite_with(&self, options: &CompositeOptions) -> Result<Composite> {
        Ok(swatcher_color::generate_composite(&self.image, options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_image() {
        let image = Image::new_filled(8, 8, Rgb::new(0, 128, 255)).unwrap();
        let mut s = Swatcher::from_image(image, Accuracy::default());
        assert_eq!(s.stride().get(), 4);
        assert_eq!(s.analyze_pixels(None).unwrap().total(), 4);
        s.set_accuracy(Accuracy::High);
        assert_eq!(s.analyze_pixels(None).unwrap().total(), 64);
        assert_eq!(s.top_swatch().unwrap(), Rgb::new(0, 128, 255));
        assert!(s.path().is_none());
    }

    #[test]
    fn test_session_square() {
        let image = Image::new(6, 6).unwrap();
        let s = Swatcher::from_image(image, Accuracy::High);
        assert_eq!(s.analyze_square(Point::new(2, 2), 4).unwrap().total(), 16);
        assert!(matches!(
            s.analyze_square(Point::new(3, 3), 4),
            Err(Error::Swatch(SwatchError::RegionOutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_open_with_bad_label() {
        assert!(matches!(
            Swatcher::open_with_label("unused.png", "Extreme"),
            Err(Error::Swatch(SwatchError::InvalidArgument(_)))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        assert!(matches!(
            Swatcher::open("/nonexistent/swatcher/missing.png", Accuracy::Low),
            Err(Error::Io(IoError::Io(_)))
        ));
    }
}
