//! Top swatch selection
//!
//! Reads the head of a ranked [`SwatchTally`]. [`top_swatches`] never
//! truncates: asking for more colors than the tally holds is an error.
//! [`top_swatches_up_to`] returns whatever is available instead.

use crate::{SwatchError, SwatchResult, SwatchTally};
use swatcher_core::Rgb;

/// The `n` most frequent colors, most frequent first.
///
/// # Errors
///
/// * [`SwatchError::InvalidArgument`] if `n == 0`
/// * [`SwatchError::OutOfRange`] if the tally has fewer than `n` colors
pub fn top_swatches(tally: &SwatchTally, n: usize) -> SwatchResult<Vec<Rgb>> {
    if n == 0 {
        return Err(SwatchError::InvalidArgument(
            "swatch count must be at least 1".to_string(),
        ));
    }
    if tally.len() < n {
        return Err(SwatchError::OutOfRange {
            requested: n,
            available: tally.len(),
        });
    }

    Ok(tally.entries()[..n].iter().map(|s| s.color).collect())
}

/// Up to `n` most frequent colors, fewer if the tally is smaller.
///
/// # Errors
///
/// [`SwatchError::InvalidArgument`] if `n == 0`
pub fn top_swatches_up_to(tally: &SwatchTally, n: usize) -> SwatchResult<Vec<Rgb>> {
    if n == 0 {
        return Err(SwatchError::InvalidArgument(
            "swatch count must be at least 1".to_string(),
        ));
    }
    Ok(tally.iter().take(n).map(|s| s.color).collect())
}

/// The most frequent color.
///
/// Ties resolve to the color the scan met first.
pub fn top_swatch(tally: &SwatchTally) -> SwatchResult<Rgb> {
    tally
        .entries()
        .first()
        .map(|s| s.color)
        .ok_or(SwatchError::OutOfRange {
            requested: 1,
            available: 0,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Stride, analyze, analyze_image};
    use swatcher_core::{Image, ImageMut, Region};

    fn three_colors() -> Image {
        // 6 red, 4 green, 2 blue
        let mut img = ImageMut::new(4, 3).unwrap();
        img.fill_region(Region::new(0, 0, 2, 3), Rgb::new(255, 0, 0)).unwrap();
        img.fill_region(Region::new(2, 0, 2, 2), Rgb::new(0, 255, 0)).unwrap();
        img.fill_region(Region::new(2, 2, 2, 1), Rgb::new(0, 0, 255)).unwrap();
        img.into()
    }

    #[test]
    fn test_top_swatches_order() {
        let tally = analyze_image(&three_colors(), Stride::ONE).unwrap();
        assert_eq!(
            top_swatches(&tally, 3).unwrap(),
            vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)]
        );
        assert_eq!(top_swatches(&tally, 1).unwrap(), vec![Rgb::new(255, 0, 0)]);
        assert_eq!(top_swatch(&tally).unwrap(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_top_swatches_zero() {
        let tally = analyze_image(&three_colors(), Stride::ONE).unwrap();
        assert!(matches!(
            top_swatches(&tally, 0),
            Err(SwatchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_top_swatches_too_many() {
        let tally = analyze_image(&three_colors(), Stride::ONE).unwrap();
        assert!(matches!(
            tally.top_swatches(4),
            Err(SwatchError::OutOfRange {
                requested: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn test_top_swatches_up_to() {
        let img = three_colors();
        let tally = analyze_image(&img, Stride::ONE).unwrap();
        assert_eq!(top_swatches_up_to(&tally, 10).unwrap().len(), 3);
        assert_eq!(top_swatches_up_to(&tally, 2).unwrap().len(), 2);
        assert!(top_swatches_up_to(&tally, 0).is_err());

        let empty = analyze(&img, Region::new(0, 0, 0, 0), Stride::ONE).unwrap();
        assert!(top_swatches_up_to(&empty, 3).unwrap().is_empty());
    }

    #[test]
    fn test_top_swatch_empty() {
        let img = three_colors();
        let tally = analyze(&img, Region::new(0, 0, 0, 0), Stride::ONE).unwrap();
        assert!(matches!(
            tally.top_swatch(),
            Err(SwatchError::OutOfRange {
                requested: 1,
                available: 0
            })
        ));
    }
}
