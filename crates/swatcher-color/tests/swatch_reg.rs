//! Swatch analysis regression test
//!
//! Checks sample counts, ranking and top-N selection on synthetic images.
//!
//! Run with:
//! ```
//! cargo test -p swatcher-color --test swatch_reg
//! ```

use swatcher_color::{Accuracy, Stride, SwatchError, analyze, analyze_image};
use swatcher_core::{Image, ImageMut, Region, Rgb};
use swatcher_test::{RegParams, image_from_fn, solid_image};

#[test]
fn swatch_reg() {
    let mut rp = RegParams::new("swatch");

    // Test 1: 4x4 red with one blue pixel
    let mut img = solid_image(4, 4, Rgb::new(255, 0, 0)).unwrap().to_mut();
    img.set_rgb(0, 0, Rgb::new(0, 0, 255)).unwrap();
    let img: Image = img.into();
    let tally = analyze_image(&img, Accuracy::High.stride()).unwrap();
    rp.compare_values(2.0, tally.len() as f64, 0.0);
    rp.compare_values(15.0, tally.count_of(Rgb::new(255, 0, 0)) as f64, 0.0);
    rp.compare_values(1.0, tally.count_of(Rgb::new(0, 0, 255)) as f64, 0.0);
    let top = tally.top_swatch().unwrap().to_string();
    rp.compare_strings(b"rgb(255, 0, 0)", top.as_bytes());

    // Test 2: sample count at each accuracy, odd-sized image
    let noisy = image_from_fn(37, 23, |x, y| {
        Rgb::new((x % 5) as u8 * 50, (y % 3) as u8 * 80, ((x * y) % 7) as u8)
    })
    .unwrap();
    for accuracy in Accuracy::ALL {
        let s = accuracy.stride();
        let tally = analyze_image(&noisy, s).unwrap();
        let expected = s.samples_along(37) * s.samples_along(23);
        rp.compare_values(expected as f64, tally.total() as f64, 0.0);
        let summed: u64 = tally.iter().map(|e| e.count).sum();
        rp.compare_values(tally.total() as f64, summed as f64, 0.0);
    }

    // Test 3: stride 1 over a region counts every pixel once
    let region = Region::new(3, 5, 11, 9);
    let tally = analyze(&noisy, region, Stride::ONE).unwrap();
    rp.compare_values(99.0, tally.total() as f64, 0.0);

    // Test 4: ranking is non-increasing
    let tally = analyze_image(&noisy, Stride::ONE).unwrap();
    let ranked = tally
        .entries()
        .windows(2)
        .all(|w| w[0].count >= w[1].count);
    rp.compare_bool("counts are non-increasing", ranked);

    // Test 5: top-N is a prefix of the ranking and never truncates
    let top3 = tally.top_swatches(3).unwrap();
    let head: Vec<Rgb> = tally.entries()[..3].iter().map(|e| e.color).collect();
    rp.compare_bool("top 3 is the ranked prefix", top3 == head);
    let too_many = tally.top_swatches(tally.len() + 1);
    rp.compare_bool(
        "top N beyond the tally is out of range",
        matches!(too_many, Err(SwatchError::OutOfRange { .. })),
    );

    // Test 6: invalid arguments
    rp.compare_bool(
        "unknown accuracy label",
        matches!("Extreme".parse::<Accuracy>(), Err(SwatchError::InvalidArgument(_))),
    );
    rp.compare_bool(
        "zero stride",
        matches!(Stride::new(0), Err(SwatchError::InvalidArgument(_))),
    );
    rp.compare_bool(
        "zero swatches",
        matches!(tally.top_swatches(0), Err(SwatchError::InvalidArgument(_))),
    );
    rp.compare_bool(
        "region past the right edge",
        matches!(
            analyze(&noisy, Region::new(30, 0, 8, 1), Stride::ONE),
            Err(SwatchError::RegionOutOfBounds { .. })
        ),
    );

    assert!(rp.cleanup());
}

#[test]
fn swatch_tie_reg() {
    let mut rp = RegParams::new("swatch_tie");

    // Two columns of equal size: the left one is scanned first
    let mut img = ImageMut::new(2, 3).unwrap();
    img.fill_region(Region::new(0, 0, 1, 3), Rgb::new(0, 200, 0)).unwrap();
    img.fill_region(Region::new(1, 0, 1, 3), Rgb::new(200, 0, 0)).unwrap();
    let img: Image = img.into();

    let tally = analyze_image(&img, Stride::ONE).unwrap();
    rp.compare_bool(
        "tie resolves to first seen",
        tally.top_swatch().unwrap() == Rgb::new(0, 200, 0),
    );

    assert!(rp.cleanup());
}
