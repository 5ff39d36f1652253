//! Tile composites
//!
//! Splits an image into a grid of square tiles and reduces each tile to its
//! dominant color. The grid has `floor(width / tile_size)` columns and
//! `floor(height / tile_size)` rows; a strip narrower than one tile along
//! the right or bottom edge is left out.
//!
//! Tiles are produced column by column: every row of column 0, then every
//! row of column 1, and so on.

use crate::analysis::tally_region;
use crate::{Stride, SwatchError, SwatchResult};
use std::iter::FusedIterator;
use std::time::Instant;
use swatcher_core::{Image, ImageMut, PixelSource, Point, Region, Rgb};

/// Options for composite generation
#[derive(Debug, Clone)]
pub struct CompositeOptions {
    /// Edge length of each square tile in pixels
    pub tile_size: u32,
    /// Sampling step inside each tile (1 scans every pixel)
    pub tile_stride: u32,
    /// Abort with [`SwatchError::DeadlineExceeded`] once this instant passes
    pub deadline: Option<Instant>,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            tile_size: 16,
            tile_stride: 1,
            deadline: None,
        }
    }
}

impl CompositeOptions {
    /// Options with the given tile size and a full scan of each tile
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            ..Default::default()
        }
    }

    /// Set the sampling step inside each tile
    pub fn with_tile_stride(mut self, tile_stride: u32) -> Self {
        self.tile_stride = tile_stride;
        self
    }

    /// Set a deadline for the whole build
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// One tile of a composite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    /// Northwest corner (inclusive)
    pub nw: Point,
    /// Southeast corner (exclusive)
    pub se: Point,
    /// Most frequent color inside the tile
    pub color: Rgb,
}

impl Tile {
    /// Area covered by the tile
    pub fn region(&self) -> Region {
        Region::new(self.nw.x, self.nw.y, self.se.x - self.nw.x, self.se.y - self.nw.y)
    }
}

/// Lazy, column-major iterator over the tiles of a source.
///
/// Each call to `next` analyzes one tile. Deadlines are not checked here;
/// see [`generate_composite`].
pub struct CompositeTiles<'a, S: PixelSource + ?Sized> {
    source: &'a S,
    tile_size: u32,
    stride: Stride,
    columns: u32,
    rows: u32,
    next: u64,
}

impl<S: PixelSource + ?Sized> std::fmt::Debug for CompositeTiles<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeTiles")
            .field("tile_size", &self.tile_size)
            .field("stride", &self.stride)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("next", &self.next)
            .finish()
    }
}

impl<S: PixelSource + ?Sized> CompositeTiles<'_, S> {
    /// Number of tile columns
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Edge length of each tile
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    fn total(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }
}

impl<S: PixelSource + ?Sized> Iterator for CompositeTiles<'_, S> {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next >= self.total() {
            return None;
        }
        let col = (self.next / self.rows as u64) as u32;
        let row = (self.next % self.rows as u64) as u32;
        self.next += 1;

        let nw = Point::new(col * self.tile_size, row * self.tile_size);
        let region = Region::square(nw.x, nw.y, self.tile_size);
        let tally = tally_region(self.source, region, self.stride);
        // A tile is never empty, so the fallback is not reached
        let color = tally.entries().first().map_or(Rgb::BLACK, |s| s.color);
        let se = Point::new(nw.x + self.tile_size, nw.y + self.tile_size);

        tracing::trace!(col, row, %color, "tile");
        Some(Tile { nw, se, color })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total() - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl<S: PixelSource + ?Sized> ExactSizeIterator for CompositeTiles<'_, S> {}

impl<S: PixelSource + ?Sized> FusedIterator for CompositeTiles<'_, S> {}

fn validate(options: &CompositeOptions) -> SwatchResult<Stride> {
    if options.tile_size == 0 {
        return Err(SwatchError::InvalidArgument(
            "tile size must be at least 1".to_string(),
        ));
    }
    Stride::new(options.tile_stride)
}

/// Lazily iterate over the tiles of `source`.
///
/// # Errors
///
/// [`SwatchError::InvalidArgument`] if the tile size or tile stride is zero.
pub fn composite_tiles<'a, S>(
    source: &'a S,
    options: &CompositeOptions,
) -> SwatchResult<CompositeTiles<'a, S>>
where
    S: PixelSource + ?Sized,
{
    let stride = validate(options)?;
    let tile_size = options.tile_size;
    Ok(CompositeTiles {
        source,
        tile_size,
        stride,
        columns: source.width() / tile_size,
        rows: source.height() / tile_size,
        next: 0,
    })
}

/// Build a composite of dominant tile colors.
///
/// A tile size larger than either image dimension gives an empty composite.
///
/// # Errors
///
/// * [`SwatchError::InvalidArgument`] if the tile size or tile stride is zero
/// * [`SwatchError::DeadlineExceeded`] if `options.deadline` passes before
///   the last tile is done
pub fn generate_composite<S>(source: &S, options: &CompositeOptions) -> SwatchResult<Composite>
where
    S: PixelSource + ?Sized,
{
    let mut tiles_iter = composite_tiles(source, options)?;
    let total = tiles_iter.len();
    let (columns, rows) = (tiles_iter.columns(), tiles_iter.rows());
    let mut tiles = Vec::with_capacity(total);

    let expired = || options.deadline.is_some_and(|d| Instant::now() >= d);
    while tiles_iter.len() > 0 {
        if expired() {
            tracing::debug!(completed = tiles.len(), total, "composite deadline exceeded");
            return Err(SwatchError::DeadlineExceeded {
                completed: tiles.len(),
                total,
            });
        }
        tiles.extend(tiles_iter.next());
    }

    tracing::debug!(
        tile_size = options.tile_size,
        columns,
        rows,
        tiles = tiles.len(),
        "built composite"
    );
    Ok(Composite {
        tiles,
        tile_size: options.tile_size,
        columns,
        rows,
    })
}

/// Dominant colors of a tile grid
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composite {
    tiles: Vec<Tile>,
    tile_size: u32,
    columns: u32,
    rows: u32,
}

impl Composite {
    /// Tiles in column-major order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile at grid position `(col, row)`
    pub fn tile_at(&self, col: u32, row: u32) -> Option<&Tile> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        self.tiles.get(col as usize * self.rows as usize + row as usize)
    }

    /// Paint every tile with its color.
    ///
    /// The result is `columns * tile_size` by `rows * tile_size` pixels,
    /// which is the source size minus any dropped edge strips.
    pub fn render(&self) -> SwatchResult<Image> {
        if self.is_empty() {
            return Err(SwatchError::EmptyComposite);
        }
        let mut image = ImageMut::new(self.columns * self.tile_size, self.rows * self.tile_size)?;
        for tile in &self.tiles {
            image.fill_region(tile.region(), tile.color)?;
        }
        Ok(image.into())
    }
}
