//! Composite regression test
//!
//! Builds tile composites, checks the tile grid, and round trips a rendered
//! composite through PNG.
//!
//! Run with:
//! ```
//! cargo test -p swatcher-color --test composite_reg
//! ```

use std::collections::HashSet;
use swatcher_color::{CompositeOptions, composite_tiles, generate_composite};
use swatcher_core::Rgb;
use swatcher_test::{RegParams, image_from_fn, solid_image, write_png_fixture};

#[test]
fn composite_reg() {
    let mut rp = RegParams::new("composite");

    // Test 1: 8x8 solid red, tile 4
    let red = solid_image(8, 8, Rgb::new(255, 0, 0)).unwrap();
    let composite = generate_composite(&red, &CompositeOptions::new(4)).unwrap();
    rp.compare_values(4.0, composite.len() as f64, 0.0);
    let expected = [(0, 0, 4, 4), (0, 4, 4, 8), (4, 0, 8, 4), (4, 4, 8, 8)];
    for (tile, &(nx, ny, sx, sy)) in composite.tiles().iter().zip(expected.iter()) {
        rp.compare_bool(
            "tile corners",
            (tile.nw.x, tile.nw.y, tile.se.x, tile.se.y) == (nx, ny, sx, sy),
        );
        rp.compare_bool("tile is red", tile.color == Rgb::new(255, 0, 0));
    }

    // Test 2: tile count and geometry on a ragged image
    let stripes = image_from_fn(50, 31, |x, _| {
        if (x / 5) % 2 == 0 {
            Rgb::new(250, 250, 250)
        } else {
            Rgb::new(5, 5, 5)
        }
    })
    .unwrap();
    let composite = generate_composite(&stripes, &CompositeOptions::new(5)).unwrap();
    rp.compare_values((10 * 6) as f64, composite.len() as f64, 0.0);
    let mut covered = HashSet::new();
    let mut disjoint = true;
    for tile in composite.tiles() {
        rp.compare_values(5.0, (tile.se.x - tile.nw.x) as f64, 0.0);
        rp.compare_values(5.0, (tile.se.y - tile.nw.y) as f64, 0.0);
        disjoint &= covered.insert((tile.nw.x, tile.nw.y));
    }
    rp.compare_bool("tiles do not overlap", disjoint);

    // Test 3: the lazy iterator yields the same tiles
    let lazy: Vec<_> = composite_tiles(&stripes, &CompositeOptions::new(5))
        .unwrap()
        .collect();
    rp.compare_bool("lazy tiles match", lazy.as_slice() == composite.tiles());

    // Test 4: rendered stripes survive a PNG round trip
    let rendered = composite.render().unwrap();
    rp.compare_values(50.0, rendered.width() as f64, 0.0);
    rp.compare_values(30.0, rendered.height() as f64, 0.0);
    let path = write_png_fixture("composite_stripes", &rendered).unwrap();
    let back = swatcher_io::read_image(&path).unwrap();
    rp.compare_images(&rendered, &back);

    assert!(rp.cleanup());
}
