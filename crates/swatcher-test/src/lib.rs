//! swatcher-test - Regression test helpers for swatcher
//!
//! Provides [`RegParams`], a small accumulator of named checks that reports
//! every failure at the end of a test instead of stopping at the first one,
//! plus synthetic image fixtures so tests never depend on external files.
//!
//! # Usage
//!
//! ```ignore
//! use swatcher_test::RegParams;
//!
//! let mut rp = RegParams::new("analysis");
//! rp.compare_values(16.0, tally.total() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to print extra diagnostics

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use swatcher_core::{Image, ImageFormat, ImageMut, Rgb};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // swatcher-test is at crates/swatcher-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Build an image filled with a single color
pub fn solid_image(width: u32, height: u32, color: Rgb) -> TestResult<Image> {
    Image::new_filled(width, height, color).map_err(|e| TestError::Fixture {
        name: format!("solid {}x{} {}", width, height, color),
        message: e.to_string(),
    })
}

/// Build an image whose pixel at `(x, y)` is `f(x, y)`
pub fn image_from_fn<F>(width: u32, height: u32, f: F) -> TestResult<Image>
where
    F: Fn(u32, u32) -> Rgb,
{
    let mut image = ImageMut::new(width, height).map_err(|e| TestError::Fixture {
        name: format!("generated {}x{}", width, height),
        message: e.to_string(),
    })?;
    for y in 0..height {
        for x in 0..width {
            image.set_pixel_unchecked(x, y, f(x, y).to_pixel());
        }
    }
    Ok(image.into())
}

/// Write `image` as PNG into the regout directory and return its path
pub fn write_png_fixture(name: &str, image: &Image) -> TestResult<String> {
    let dir = regout_dir();
    std::fs::create_dir_all(&dir)?;
    let path = format!("{}/{}.png", dir, name);
    swatcher_io::write_image(image, &path, ImageFormat::Png).map_err(|e| {
        TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        }
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_from_fn() {
        let img = image_from_fn(3, 2, |x, y| Rgb::new(x as u8, y as u8, 9)).unwrap();
        assert_eq!(img.get_rgb(2, 1), Some(Rgb::new(2, 1, 9)));
        assert_eq!(img.get_rgb(0, 0), Some(Rgb::new(0, 0, 9)));
    }

    #[test]
    fn test_solid_image_rejects_empty() {
        assert!(matches!(
            solid_image(0, 4, Rgb::WHITE),
            Err(TestError::Fixture { .. })
        ));
    }
}
