//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.
//! The extension of a path is never trusted for reading.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use swatcher_core::ImageFormat;

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// GIF87a / GIF89a
    pub const GIF87A: &[u8] = b"GIF87a";
    pub const GIF89A: &[u8] = b"GIF89a";

    /// TIFF little-endian: II 2A 00, big-endian: MM 00 2A
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];

    /// WebP: RIFF....WEBP
    pub const RIFF: &[u8] = b"RIFF";
    pub const WEBP: &[u8] = b"WEBP";

    /// JPEG 2000 JP2 signature box and J2K codestream
    pub const JP2_SIGNATURE: &[u8] = &[0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20];
    pub const J2K_SIGNATURE: &[u8] = &[0xFF, 0x4F, 0xFF, 0x51];
}

/// Number of leading bytes needed to recognize any supported signature
pub const HEADER_PROBE_LEN: usize = 12;

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path).map_err(IoError::Io)?;
    let mut header = [0u8; HEADER_PROBE_LEN];
    let bytes_read = file.read(&mut header).map_err(IoError::Io)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }

    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }

    if data.starts_with(magic::GIF87A) || data.starts_with(magic::GIF89A) {
        return Ok(ImageFormat::Gif);
    }

    if data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE) {
        return Ok(ImageFormat::Tiff);
    }

    if data.len() >= 12 && data.starts_with(magic::RIFF) && &data[8..12] == magic::WEBP {
        return Ok(ImageFormat::WebP);
    }

    if data.starts_with(magic::JP2_SIGNATURE) || data.starts_with(magic::J2K_SIGNATURE) {
        return Ok(ImageFormat::Jp2);
    }

    if data.starts_with(magic::BMP) {
        return Ok(ImageFormat::Bmp);
    }

    // P1..P6
    if data[0] == b'P' && (b'1'..=b'6').contains(&data[1]) {
        return Ok(ImageFormat::Pnm);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}

/// Check whether this build can decode `format`
pub fn is_decodable(format: ImageFormat) -> bool {
    match format {
        ImageFormat::Png => cfg!(feature = "png-format"),
        ImageFormat::Jpeg => cfg!(feature = "jpeg"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let data = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_detect_jpeg() {
        let data = [
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01,
        ];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_detect_recognized_but_undecodable() {
        assert_eq!(
            detect_format_from_bytes(b"GIF89a\x00\x00\x00\x00\x00\x00").unwrap(),
            ImageFormat::Gif
        );
        assert_eq!(
            detect_format_from_bytes(b"BM\x00\x00\x00\x00\x00\x00").unwrap(),
            ImageFormat::Bmp
        );
        assert_eq!(
            detect_format_from_bytes(b"RIFF\x00\x00\x00\x00WEBP").unwrap(),
            ImageFormat::WebP
        );
        assert_eq!(
            detect_format_from_bytes(b"P6\n4 4\n255\n").unwrap(),
            ImageFormat::Pnm
        );
        assert_eq!(
            detect_format_from_bytes(&[0x4D, 0x4D, 0x00, 0x2A, 0, 0, 0, 8]).unwrap(),
            ImageFormat::Tiff
        );
        assert!(!is_decodable(ImageFormat::Gif));
        assert!(!is_decodable(ImageFormat::Unknown));
    }

    #[test]
    fn test_detect_unknown() {
        assert!(matches!(
            detect_format_from_bytes(b"UNKNOWN_FORMAT"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_too_short() {
        assert!(matches!(
            detect_format_from_bytes(b"\x89"),
            Err(IoError::InvalidData(_))
        ));
    }
}
