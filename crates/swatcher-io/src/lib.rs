//! swatcher-io - Image I/O for swatcher
//!
//! Decodes image files into [`Image`] buffers of packed RGBA pixels and
//! writes them back out.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature      |
//! |--------|------|-------|--------------|
//! | PNG    | yes  | yes   | `png-format` |
//! | JPEG   | yes  | yes   | `jpeg`       |
//!
//! BMP, GIF, TIFF, WebP, PNM and JPEG 2000 files are recognized by their
//! signatures but rejected with [`IoError::UnsupportedFormat`].
//!
//! The format is always detected from the file contents, never from the
//! extension.

mod error;
pub mod format;
pub mod header;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes, is_decodable};
pub use header::{ImageHeader, read_image_header, read_image_header_mem};
#[cfg(feature = "jpeg")]
pub use jpeg::JpegOptions;
pub use swatcher_core::ImageFormat;

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;
use swatcher_core::Image;

/// Read an image from a file
///
/// # Arguments
/// * `path` - Path to the image file
///
/// # Errors
/// * [`IoError::Io`] if the file cannot be opened or read
/// * [`IoError::UnsupportedFormat`] if the contents are not a decodable format
/// * [`IoError::DecodeError`] if the decoder rejects the data
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    tracing::debug!(path = %path.display(), ?format, "reading image");

    let file = File::open(path).map_err(IoError::Io)?;
    read_image_format(BufReader::new(file), format)
}

/// Read an image from a byte slice
pub fn read_image_mem(data: &[u8]) -> IoResult<Image> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R>(reader: R, format: ImageFormat) -> IoResult<Image>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),

        _ => {
            let _ = reader;
            Err(IoError::UnsupportedFormat(format!("{:?}", format)))
        }
    }
}

/// Write an image to a file in the given format
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), ?format, "writing image");

    let file = File::create(path).map_err(IoError::Io)?;
    let mut writer = BufWriter::new(file);
    write_image_format(image, &mut writer, format)?;
    writer.flush().map_err(IoError::Io)?;
    Ok(())
}

/// Write an image to a byte vector in the given format
pub fn write_image_mem(image: &Image, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(image, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_format<W: Write>(image: &Image, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(image, writer),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(image, writer, &JpegOptions::default()),

        _ => {
            let _ = (image, writer);
            Err(IoError::UnsupportedFormat(format!(
                "cannot write {:?}",
                format
            )))
        }
    }
}

/// Write an image to a file, selecting the format from the file extension.
///
/// Unrecognized or missing extensions fall back to PNG.
pub fn write_image_auto<P: AsRef<Path>>(image: &Image, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = match ImageFormat::from_path(path) {
        Some(f @ (ImageFormat::Png | ImageFormat::Jpeg)) => f,
        _ => ImageFormat::Png,
    };
    write_image(image, path, format)
}
