//! PNG image format support
//!
//! Every PNG color type is normalized to 8-bit RGBA pixels on read:
//! palettes and sub-byte depths are expanded, 16-bit samples keep their
//! high byte, and grayscale is replicated across the three channels.

use crate::header::ImageHeader;
use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Cursor, Seek, Write};
use swatcher_core::{Image, ImageFormat, ImageMut, color};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            output_info.bit_depth
        )));
    }
    let spp: usize = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output color type: {:?}",
                other
            )));
        }
    };

    let mut image = ImageMut::new(width, height)?;
    image.set_spp(spp as u32)?;
    image.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let pixels = image.data_mut();

    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..y * bytes_per_row + width as usize * spp];
        let out = &mut pixels[y * width as usize..(y + 1) * width as usize];
        for (dst, px) in out.iter_mut().zip(row.chunks_exact(spp)) {
            *dst = match *px {
                [g] => color::compose_rgb(g, g, g),
                [g, a] => color::compose_rgba(g, g, g, a),
                [r, g, b] => color::compose_rgb(r, g, b),
                [r, g, b, a] => color::compose_rgba(r, g, b, a),
                _ => unreachable!(),
            };
        }
    }

    tracing::debug!(width, height, spp, "decoded PNG");
    Ok(image.into())
}

/// Read PNG header metadata without decoding pixel data
pub fn read_header_png(data: &[u8]) -> IoResult<ImageHeader> {
    let decoder = Decoder::new(Cursor::new(data));
    let reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG header error: {}", e)))?;
    let info = reader.info();

    let spp = match info.color_type {
        ColorType::Grayscale | ColorType::Indexed => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
    };

    Ok(ImageHeader {
        width: info.width,
        height: info.height,
        bps: info.bit_depth as u32,
        spp,
        has_palette: info.color_type == ColorType::Indexed,
        format: ImageFormat::Png,
    })
}

/// Write a PNG image
///
/// Images whose source had an alpha channel (spp 2 or 4) are written as
/// RGBA, everything else as RGB.
pub fn write_png<W: Write>(image: &Image, writer: W) -> IoResult<()> {
    let width = image.width();
    let height = image.height();
    let with_alpha = matches!(image.spp(), 2 | 4);
    let color_type = if with_alpha {
        ColorType::Rgba
    } else {
        ColorType::Rgb
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let samples = if with_alpha { 4 } else { 3 };
    let mut data = Vec::with_capacity(image.data().len() * samples);
    for &pixel in image.data() {
        let (r, g, b, a) = color::extract_rgba(pixel);
        data.extend_from_slice(&[r, g, b]);
        if with_alpha {
            data.push(a);
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatcher_core::Rgb;

    fn encode_raw(width: u32, height: u32, ct: ColorType, depth: BitDepth, data: &[u8]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, width, height);
            encoder.set_color(ct);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buffer
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut img = ImageMut::new(5, 5).unwrap();
        img.set_rgb(0, 0, Rgb::new(255, 0, 0)).unwrap();
        img.set_rgb(1, 1, Rgb::new(0, 255, 0)).unwrap();
        img.set_rgb(2, 2, Rgb::new(0, 0, 255)).unwrap();
        let img: Image = img.into();

        let mut buffer = Vec::new();
        write_png(&img, &mut buffer).unwrap();
        let img2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(img2.informat(), ImageFormat::Png);
        assert_eq!(img2.spp(), 3);
        assert!(img.same_pixels(&img2));
    }

    #[test]
    fn test_png_read_grayscale() {
        let data: Vec<u8> = (0..12).map(|v| v * 20).collect();
        let buffer = encode_raw(4, 3, ColorType::Grayscale, BitDepth::Eight, &data);
        let img = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.spp(), 1);
        assert_eq!(img.get_rgb(1, 0), Some(Rgb::new(20, 20, 20)));
        assert_eq!(img.get_rgb(3, 2), Some(Rgb::new(220, 220, 220)));
    }

    #[test]
    fn test_png_read_rgba_keeps_alpha() {
        let data = [10, 20, 30, 0, 40, 50, 60, 255];
        let buffer = encode_raw(2, 1, ColorType::Rgba, BitDepth::Eight, &data);
        let img = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(img.spp(), 4);
        assert_eq!(img.get_rgba(0, 0), Some((10, 20, 30, 0)));
        assert_eq!(img.get_rgba(1, 0), Some((40, 50, 60, 255)));
    }

    #[test]
    fn test_png_read_16bit_strips_low_byte() {
        let data = [0xAB, 0xCD, 0x12, 0x34, 0xFF, 0x00];
        let buffer = encode_raw(1, 1, ColorType::Rgb, BitDepth::Sixteen, &data);
        let img = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(img.get_rgb(0, 0), Some(Rgb::new(0xAB, 0x12, 0xFF)));
    }

    #[test]
    fn test_png_header() {
        let buffer = encode_raw(7, 3, ColorType::Rgb, BitDepth::Eight, &[0u8; 63]);
        let header = read_header_png(&buffer).unwrap();
        assert_eq!((header.width, header.height), (7, 3));
        assert_eq!(header.spp, 3);
        assert_eq!(header.bps, 8);
        assert!(!header.has_palette);
    }

    #[test]
    fn test_png_truncated() {
        let buffer = encode_raw(4, 4, ColorType::Rgb, BitDepth::Eight, &[7u8; 48]);
        let truncated = &buffer[..buffer.len() / 2];
        assert!(matches!(
            read_png(Cursor::new(truncated)),
            Err(IoError::DecodeError(_))
        ));
    }
}
