//! Image header reading
//!
//! Provides metadata extraction from image files without decoding pixel data.

use crate::{IoError, IoResult, detect_format_from_bytes};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use swatcher_core::ImageFormat;

/// Image metadata read without decoding pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bits per sample
    pub bps: u32,
    /// Samples per pixel (1 for grayscale, 3 for RGB, 4 for RGBA)
    pub spp: u32,
    /// Whether the image stores palette indices
    pub has_palette: bool,
    /// Detected image format
    pub format: ImageFormat,
}

/// Read image metadata from a file path without decoding pixel data
pub fn read_image_header<P: AsRef<Path>>(path: P) -> IoResult<ImageHeader> {
    let file = File::open(path.as_ref()).map_err(IoError::Io)?;
    let mut reader = BufReader::new(file);
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(IoError::Io)?;
    read_image_header_mem(&data)
}

/// Read image metadata from bytes without decoding pixel data
pub fn read_image_header_mem(data: &[u8]) -> IoResult<ImageHeader> {
    let format = detect_format_from_bytes(data)?;
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::read_header_png(data),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => crate::jpeg::read_header_jpeg(data),

        _ => Err(IoError::UnsupportedFormat(format!("{:?}", format))),
    }
}
