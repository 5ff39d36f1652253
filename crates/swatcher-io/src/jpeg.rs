//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Grayscale, RGB and CMYK sources are all decoded to
//! opaque 32-bit RGBA pixels.

use crate::header::ImageHeader;
use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::{Read, Write};
use swatcher_core::{Image, ImageFormat, ImageMut, color};

/// Options for JPEG encoding
#[derive(Debug, Clone)]
pub struct JpegOptions {
    /// Quality factor, 1 (smallest) to 100 (best)
    pub quality: u8,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

impl JpegOptions {
    /// Set the quality factor
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }
}

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG metadata unavailable".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let (bytes_pp, spp) = match info.pixel_format {
        PixelFormat::L8 => (1, 1),
        PixelFormat::L16 => (2, 1),
        PixelFormat::RGB24 => (3, 3),
        PixelFormat::CMYK32 => (4, 3),
    };

    let expected = width as usize * height as usize * bytes_pp;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} bytes for {}x{}",
            data.len(),
            width,
            height
        )));
    }

    let mut image = ImageMut::new(width, height)?;
    image.set_spp(spp)?;
    image.set_informat(ImageFormat::Jpeg);

    for (dst, px) in image
        .data_mut()
        .iter_mut()
        .zip(data.chunks_exact(bytes_pp))
    {
        *dst = match info.pixel_format {
            PixelFormat::L8 => color::compose_rgb(px[0], px[0], px[0]),
            // Big-endian samples; keep the high byte
            PixelFormat::L16 => color::compose_rgb(px[0], px[0], px[0]),
            PixelFormat::RGB24 => color::compose_rgb(px[0], px[1], px[2]),
            PixelFormat::CMYK32 => cmyk_to_pixel(px[0], px[1], px[2], px[3]),
        };
    }

    tracing::debug!(width, height, format = ?info.pixel_format, "decoded JPEG");
    Ok(image.into())
}

/// Naive CMYK to RGB conversion (no color profile)
fn cmyk_to_pixel(c: u8, m: u8, y: u8, k: u8) -> u32 {
    let channel = |v: u8| ((255 - v as u32) * (255 - k as u32) / 255) as u8;
    color::compose_rgb(channel(c), channel(m), channel(y))
}

/// Read JPEG header metadata without decoding pixel data
pub fn read_header_jpeg(data: &[u8]) -> IoResult<ImageHeader> {
    let mut decoder = Decoder::new(data);
    decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("JPEG header error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG metadata unavailable".to_string()))?;

    let (bps, spp) = match info.pixel_format {
        PixelFormat::L8 => (8, 1),
        PixelFormat::L16 => (16, 1),
        PixelFormat::RGB24 => (8, 3),
        PixelFormat::CMYK32 => (8, 4),
    };

    Ok(ImageHeader {
        width: info.width as u32,
        height: info.height as u32,
        bps,
        spp,
        has_palette: false,
        format: ImageFormat::Jpeg,
    })
}

/// Write a JPEG image
///
/// Alpha is discarded. JPEG dimensions are limited to 65535 pixels.
pub fn write_jpeg<W: Write>(image: &Image, mut writer: W, options: &JpegOptions) -> IoResult<()> {
    if !(1..=100).contains(&options.quality) {
        return Err(IoError::EncodeError(format!(
            "JPEG quality must be 1..=100, got {}",
            options.quality
        )));
    }
    let too_large = || {
        IoError::EncodeError(format!(
            "image {}x{} exceeds JPEG limits",
            image.width(),
            image.height()
        ))
    };
    let width = u16::try_from(image.width()).map_err(|_| too_large())?;
    let height = u16::try_from(image.height()).map_err(|_| too_large())?;

    let mut rgb = Vec::with_capacity(image.data().len() * 3);
    for &pixel in image.data() {
        let (r, g, b) = color::extract_rgb(pixel);
        rgb.extend_from_slice(&[r, g, b]);
    }

    let mut jpeg_buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg_buf, options.quality);
    encoder
        .encode(&rgb, width, height, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    writer.write_all(&jpeg_buf)?;
    Ok(())
}
