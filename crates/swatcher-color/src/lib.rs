//! swatcher-color - Representative colors of raster images
//!
//! This crate finds the colors an image is made of:
//!
//! - **Frequency analysis** ([`analysis`]): sample a region at a stride and
//!   rank exact colors by how often they occur
//! - **Top swatches** ([`top`]): the N most frequent colors of a tally
//! - **Composites** ([`composite`]): one dominant color per square tile
//!
//! All functions read pixels through [`swatcher_core::PixelSource`], so they
//! work on decoded [`swatcher_core::Image`]s and on any other color grid.
//!
//! # Example
//!
//! ```
//! use swatcher_color::{Accuracy, analyze_image};
//! use swatcher_core::{Image, Rgb};
//!
//! let img = Image::new_filled(8, 8, Rgb::new(255, 0, 0)).unwrap();
//! let tally = analyze_image(&img, Accuracy::High.stride()).unwrap();
//! assert_eq!(tally.top_swatch().unwrap().to_string(), "rgb(255, 0, 0)");
//! ```

pub mod analysis;
pub mod composite;
pub mod error;
pub mod top;

// Re-export core types
pub use swatcher_core;

pub use error::{SwatchError, SwatchResult};

pub use analysis::{Accuracy, Stride, Swatch, SwatchTally, analyze, analyze_image};
pub use composite::{
    Composite, CompositeOptions, CompositeTiles, Tile, composite_tiles, generate_composite,
};
pub use top::{top_swatch, top_swatches, top_swatches_up_to};
