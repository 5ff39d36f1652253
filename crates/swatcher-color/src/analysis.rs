//! Color frequency analysis
//!
//! Samples a rectangular region of a [`PixelSource`] on a regular grid and
//! counts how often each exact color occurs:
//!
//! - [`Accuracy`] and [`Stride`] choose the sampling step
//! - [`analyze`] / [`analyze_image`] build a ranked [`SwatchTally`]
//!
//! The sampling grid starts at the region's northwest corner and advances
//! by the stride along both axes, so a region of `w x h` yields exactly
//! `ceil(w / s) * ceil(h / s)` samples.

use crate::{SwatchError, SwatchResult};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use swatcher_core::{PixelSource, Region, Rgb};

/// Sampling fidelity
///
/// Maps to a stride of 1, 2 or 4 pixels along both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accuracy {
    /// Every pixel
    High,
    /// Every second pixel along each axis
    Medium,
    /// Every fourth pixel along each axis
    #[default]
    Low,
}

impl Accuracy {
    /// All levels, finest first
    pub const ALL: [Accuracy; 3] = [Accuracy::High, Accuracy::Medium, Accuracy::Low];

    /// Sampling step for this level
    pub fn stride(self) -> Stride {
        match self {
            Accuracy::High => Stride::ONE,
            Accuracy::Medium => Stride::TWO,
            Accuracy::Low => Stride::FOUR,
        }
    }

    /// Canonical label
    pub fn name(self) -> &'static str {
        match self {
            Accuracy::High => "High",
            Accuracy::Medium => "Medium",
            Accuracy::Low => "Low",
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Accuracy {
    type Err = SwatchError;

    /// Parse a label, exact case first, then ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Accuracy::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .or_else(|| {
                Accuracy::ALL
                    .into_iter()
                    .find(|a| a.name().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| SwatchError::InvalidArgument(format!("unknown accuracy level {:?}", s)))
    }
}

/// Non-zero sampling step in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Stride(NonZeroU32);

impl Stride {
    pub const ONE: Stride = Stride(NonZeroU32::MIN);
    pub const TWO: Stride = match NonZeroU32::new(2) {
        Some(n) => Stride(n),
        None => unreachable!(),
    };
    pub const FOUR: Stride = match NonZeroU32::new(4) {
        Some(n) => Stride(n),
        None => unreachable!(),
    };

    /// Create a stride, rejecting zero
    pub fn new(step: u32) -> SwatchResult<Self> {
        NonZeroU32::new(step)
            .map(Stride)
            .ok_or_else(|| SwatchError::InvalidArgument("stride must be at least 1".to_string()))
    }

    /// Step in pixels
    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Number of samples taken along an axis of `len` pixels
    #[inline]
    pub fn samples_along(self, len: u32) -> u64 {
        (len as u64).div_ceil(self.get() as u64)
    }
}

impl From<Accuracy> for Stride {
    fn from(accuracy: Accuracy) -> Self {
        accuracy.stride()
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// One entry of a frequency table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    pub color: Rgb,
    pub count: u64,
}

/// Ranked color frequency table
///
/// Entries are ordered by count, highest first. Colors with equal counts
/// keep the order in which the scan first met them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwatchTally {
    entries: Vec<Swatch>,
    region: Region,
    stride: Stride,
    total: u64,
}

impl SwatchTally {
    /// Ranked entries
    pub fn entries(&self) -> &[Swatch] {
        &self.entries
    }

    /// Iterate over ranked entries
    pub fn iter(&self) -> std::slice::Iter<'_, Swatch> {
        self.entries.iter()
    }

    /// Number of distinct colors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pixel was sampled
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Region the tally was built from
    pub fn region(&self) -> Region {
        self.region
    }

    /// Stride the tally was built with
    pub fn stride(&self) -> Stride {
        self.stride
    }

    /// Total number of samples
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count for `color`, 0 if it was never sampled
    pub fn count_of(&self, color: Rgb) -> u64 {
        self.entries
            .iter()
            .find(|s| s.color == color)
            .map_or(0, |s| s.count)
    }

    /// The `n` most frequent colors, see [`crate::top_swatches`]
    pub fn top_swatches(&self, n: usize) -> SwatchResult<Vec<Rgb>> {
        crate::top::top_swatches(self, n)
    }

    /// The most frequent color, see [`crate::top_swatch`]
    pub fn top_swatch(&self) -> SwatchResult<Rgb> {
        crate::top::top_swatch(self)
    }

    pub fn into_entries(self) -> Vec<Swatch> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a SwatchTally {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Count colors in `region` of `source`, sampling every `stride` pixels.
///
/// The scan walks x in the outer loop and y in the inner loop, starting at
/// the region's northwest corner. A stride larger than the region samples
/// only that corner. An empty region yields an empty tally.
///
/// # Errors
///
/// [`SwatchError::RegionOutOfBounds`] if the region does not fit inside the
/// source. Regions are never clamped.
pub fn analyze<S>(source: &S, region: Region, stride: Stride) -> SwatchResult<SwatchTally>
where
    S: PixelSource + ?Sized,
{
    let (width, height) = (source.width(), source.height());
    region
        .ensure_within(width, height)
        .map_err(|_| SwatchError::RegionOutOfBounds {
            region,
            width,
            height,
        })?;

    let tally = tally_region(source, region, stride);
    tracing::debug!(
        %region,
        stride = stride.get(),
        samples = tally.total,
        colors = tally.entries.len(),
        "analyzed region"
    );
    Ok(tally)
}

/// Count colors over the whole of `source`
pub fn analyze_image<S>(source: &S, stride: Stride) -> SwatchResult<SwatchTally>
where
    S: PixelSource + ?Sized,
{
    analyze(source, source.bounds(), stride)
}

/// Tally a region already known to lie inside `source`.
pub(crate) fn tally_region<S>(source: &S, region: Region, stride: Stride) -> SwatchTally
where
    S: PixelSource + ?Sized,
{
    let step = stride.get() as usize;
    let mut index: HashMap<Rgb, usize> = HashMap::new();
    let mut entries: Vec<Swatch> = Vec::new();
    let mut total = 0u64;

    for x in (region.x..region.x + region.w).step_by(step) {
        for y in (region.y..region.y + region.h).step_by(step) {
            let color = source.rgb_at(x, y);
            match index.entry(color) {
                Entry::Occupied(e) => entries[*e.get()].count += 1,
                Entry::Vacant(e) => {
                    e.insert(entries.len());
                    entries.push(Swatch { color, count: 1 });
                }
            }
            total += 1;
        }
    }

    // Stable: ties stay in first-seen order
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    SwatchTally {
        entries,
        region,
        stride,
        total,
    }
}
