//! Image - The decoded image container
//!
//! `Image` holds a decoded raster as one 32-bit RGBA word per pixel,
//! row-major, with no padding between rows. Whatever the source format,
//! decoders normalize into this layout, so the analysis code reads every
//! image the same way.
//!
//! # Ownership model
//!
//! `Image` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `ImageMut` via [`Image::try_into_mut`]
//! or [`Image::to_mut`], then convert back with `Into<Image>`.

mod access;

use crate::error::{Error, Result};
use crate::{PixelSource, Region, Rgb};
use std::sync::Arc;

/// Image file format
///
/// Records where an image came from. Only [`ImageFormat::Png`] and
/// [`ImageFormat::Jpeg`] can be decoded; the other known formats are
/// recognized so that callers get a precise "unsupported" error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageFormat {
    /// Unknown format, or built in memory
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
    /// BMP format
    Bmp,
    /// GIF format
    Gif,
    /// TIFF format
    Tiff,
    /// WebP format
    WebP,
    /// PNM format
    Pnm,
    /// JPEG 2000
    Jp2,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Tiff => "tif",
            Self::WebP => "webp",
            Self::Pnm => "pnm",
            Self::Jp2 => "jp2",
        }
    }

    /// Guess a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            "gif" => Some(Self::Gif),
            "tif" | "tiff" => Some(Self::Tiff),
            "webp" => Some(Self::WebP),
            "pnm" | "pbm" | "pgm" | "ppm" => Some(Self::Pnm),
            "jp2" | "j2k" => Some(Self::Jp2),
            _ => None,
        }
    }

    /// Guess a format from the extension of `path`.
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// MIME type for this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Unknown => "application/octet-stream",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Bmp => "image/bmp",
            Self::Gif => "image/gif",
            Self::Tiff => "image/tiff",
            Self::WebP => "image/webp",
            Self::Pnm => "image/x-portable-anymap",
            Self::Jp2 => "image/jp2",
        }
    }
}

/// Internal image data
#[derive(Debug)]
struct ImageData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel in the source (1 gray, 2 gray+alpha, 3 RGB, 4 RGBA)
    spp: u32,
    /// Input file format
    informat: ImageFormat,
    /// Packed `0xRRGGBBAA` pixels, `width * height` of them
    data: Vec<u32>,
}

impl ImageData {
    fn new(width: u32, height: u32, fill: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            spp: 3,
            informat: ImageFormat::Unknown,
            data: vec![fill; len],
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn clone_data(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            spp: self.spp,
            informat: self.informat,
            data: self.data.clone(),
        }
    }
}

/// Image - Main image container
///
/// # Examples
///
/// ```
/// use swatcher_core::{Image, Rgb};
///
/// let img = Image::new_filled(640, 480, Rgb::new(255, 0, 0)).unwrap();
/// assert_eq!(img.width(), 640);
/// assert_eq!(img.height(), 480);
/// assert_eq!(img.get_rgb(10, 10), Some(Rgb::new(255, 0, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    inner: Arc<ImageData>,
}

impl Image {
    /// Create a new image with every pixel opaque black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, Rgb::BLACK)
    }

    /// Create a new image with every pixel set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_filled(width: u32, height: u32, fill: Rgb) -> Result<Self> {
        Ok(Image {
            inner: Arc::new(ImageData::new(width, height, fill.to_pixel())?),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the samples per pixel of the source data.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Region covering the whole image.
    #[inline]
    pub fn bounds(&self) -> Region {
        Region::full(self.inner.width, self.inner.height)
    }

    /// Get raw access to the packed pixels.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = self.inner.index(0, y);
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Get the number of strong references to this image.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Try to take unique ownership for in-place modification.
    ///
    /// Fails and hands the image back if other clones are alive.
    pub fn try_into_mut(self) -> std::result::Result<ImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(ImageMut { inner: data }),
            Err(arc) => Err(Image { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> ImageMut {
        ImageMut {
            inner: self.inner.clone_data(),
        }
    }

    /// Check if two images have the same dimensions and pixels.
    ///
    /// Source metadata (format, spp) is not compared.
    pub fn same_pixels(&self, other: &Image) -> bool {
        self.dimensions() == other.dimensions() && self.inner.data == other.inner.data
    }
}

impl PixelSource for Image {
    #[inline]
    fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        Rgb::from_pixel(self.get_pixel_unchecked(x, y))
    }
}

/// Mutable image
///
/// Allows modification of image data. Convert back to an immutable
/// [`Image`] with `Into<Image>` once done.
#[derive(Debug)]
pub struct ImageMut {
    inner: ImageData,
}

impl ImageMut {
    /// Create a new opaque black image for editing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            inner: ImageData::new(width, height, Rgb::BLACK.to_pixel())?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Set the samples per pixel of the source data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless `spp` is in 1..=4.
    pub fn set_spp(&mut self, spp: u32) -> Result<()> {
        if !(1..=4).contains(&spp) {
            return Err(Error::InvalidParameter(format!(
                "samples per pixel must be 1..=4, got {spp}"
            )));
        }
        self.inner.spp = spp;
        Ok(())
    }

    /// Set the input file format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get mutable access to the packed pixels.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Paint every pixel of `region` with `color`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the region extends past the image.
    pub fn fill_region(&mut self, region: Region, color: Rgb) -> Result<()> {
        region.ensure_within(self.inner.width, self.inner.height)?;
        let pixel = color.to_pixel();
        for y in region.y..region.y + region.h {
            let start = self.inner.index(region.x, y);
            self.inner.data[start..start + region.w as usize].fill(pixel);
        }
        Ok(())
    }
}

impl From<ImageMut> for Image {
    fn from(image_mut: ImageMut) -> Self {
        Image {
            inner: Arc::new(image_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_spp() {
        let mut img = ImageMut::new(2, 2).unwrap();
        img.set_spp(3).unwrap();
        assert!(matches!(img.set_spp(0), Err(Error::InvalidParameter(_))));
        assert!(matches!(img.set_spp(5), Err(Error::InvalidParameter(_))));
        let img: Image = img.into();
        assert_eq!(img.spp(), 3);
    }

    #[test]
    fn test_image_creation() {
        let img = Image::new(100, 200).unwrap();
        assert_eq!(img.dimensions(), (100, 200));
        assert_eq!(img.spp(), 3);
        assert_eq!(img.informat(), ImageFormat::Unknown);
        assert_eq!(img.data().len(), 20_000);
        assert_eq!(img.get_rgb(99, 199), Some(Rgb::BLACK));
    }

    #[test]
    fn test_image_creation_invalid() {
        assert!(matches!(
            Image::new(0, 100),
            Err(Error::InvalidDimension {
                width: 0,
                height: 100
            })
        ));
        assert!(Image::new(100, 0).is_err());
    }

    #[test]
    fn test_image_clone_shares_data() {
        let img = Image::new(10, 10).unwrap();
        let img2 = img.clone();
        assert_eq!(img.ref_count(), 2);

        let img = img.try_into_mut().unwrap_err();
        drop(img2);
        let mut img_mut = img.try_into_mut().unwrap();
        img_mut.set_rgb(1, 1, Rgb::WHITE).unwrap();
        let img: Image = img_mut.into();
        assert_eq!(img.get_rgb(1, 1), Some(Rgb::WHITE));
    }

    #[test]
    fn test_to_mut_copies() {
        let img = Image::new_filled(4, 4, Rgb::new(1, 2, 3)).unwrap();
        let mut copy = img.to_mut();
        copy.set_rgb(0, 0, Rgb::WHITE).unwrap();
        let copy: Image = copy.into();
        assert_eq!(img.get_rgb(0, 0), Some(Rgb::new(1, 2, 3)));
        assert_eq!(copy.get_rgb(0, 0), Some(Rgb::WHITE));
        assert!(!img.same_pixels(&copy));
    }

    #[test]
    fn test_fill_region() {
        let mut img = ImageMut::new(8, 8).unwrap();
        img.fill_region(Region::square(4, 4, 4), Rgb::WHITE).unwrap();
        let img: Image = img.into();
        assert_eq!(img.get_rgb(3, 3), Some(Rgb::BLACK));
        assert_eq!(img.get_rgb(4, 4), Some(Rgb::WHITE));
        assert_eq!(img.get_rgb(7, 7), Some(Rgb::WHITE));
        assert_eq!(img.row_data(5)[3..].len(), 5);

        let mut img = img.to_mut();
        assert!(img.fill_region(Region::square(6, 6, 4), Rgb::WHITE).is_err());
    }

    #[test]
    fn test_pixel_source_impl() {
        let img = Image::new_filled(3, 2, Rgb::new(9, 8, 7)).unwrap();
        let src: &dyn PixelSource = &img;
        assert_eq!(src.width(), 3);
        assert_eq!(src.height(), 2);
        assert_eq!(src.rgb_at(2, 1), Rgb::new(9, 8, 7));
        assert_eq!(src.bounds(), Region::full(3, 2));
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("xyz"), None);
        assert_eq!(
            ImageFormat::from_path("out/composite.PNG"),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::from_path("no_extension"), None);
    }
}
