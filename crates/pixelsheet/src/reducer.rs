//! Color budget reduction.
//!
//! XLSX workbooks cap the number of distinct cell formats, and every distinct
//! pixel color needs its own format. The reducer shrinks an image by 20% per
//! step until its distinct-color count is strictly below a [`ColorCeiling`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use image::imageops::FilterType;
use image::RgbImage;

use crate::source::Resampler;
use crate::{PixelSheetError, Result, XLSX_MAX_COLORS};

/// Upper bound on shrink steps. Each step multiplies both dimensions by 0.8,
/// so about 100 steps take even `u32::MAX` down to zero; 128 leaves headroom.
pub const MAX_SHRINK_STEPS: u32 = 128;

/// Exclusive upper bound on the distinct-color count of a reduced image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorCeiling(usize);

impl ColorCeiling {
    /// The limit imposed by the XLSX format.
    pub const XLSX: Self = Self(XLSX_MAX_COLORS);

    pub fn new(ceiling: usize) -> Result<Self> {
        if ceiling == 0 {
            return Err(PixelSheetError::InvalidCeiling);
        }
        Ok(Self(ceiling))
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Returns true if an image with `colors` distinct colors fits.
    #[inline]
    pub fn admits(self, colors: usize) -> bool {
        colors < self.0
    }
}

impl Default for ColorCeiling {
    fn default() -> Self {
        Self::XLSX
    }
}

impl fmt::Display for ColorCeiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Options for [`reduce`].
#[derive(Clone, Debug)]
pub struct ReduceOptions {
    /// Distinct-color count the result must stay below.
    pub ceiling: ColorCeiling,

    /// Resampling filter used for every shrink step.
    /// Catmull-Rom is a bicubic filter.
    pub filter: FilterType,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            ceiling: ColorCeiling::XLSX,
            filter: FilterType::CatmullRom,
        }
    }
}

/// What the reducer did to an image. Renders as a single human-readable line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReductionReport {
    /// The image already fit under the ceiling.
    Unchanged {
        width: u32,
        height: u32,
        colors: usize,
    },
    /// The image was shrunk `iterations` times.
    Adjusted {
        original_width: u32,
        original_height: u32,
        width: u32,
        height: u32,
        colors: usize,
        iterations: u32,
    },
}

impl ReductionReport {
    pub fn dimensions(&self) -> (u32, u32) {
        match *self {
            ReductionReport::Unchanged { width, height, .. }
            | ReductionReport::Adjusted { width, height, .. } => (width, height),
        }
    }

    pub fn colors(&self) -> usize {
        match *self {
            ReductionReport::Unchanged { colors, .. }
            | ReductionReport::Adjusted { colors, .. } => colors,
        }
    }

    pub fn iterations(&self) -> u32 {
        match *self {
            ReductionReport::Unchanged { .. } => 0,
            ReductionReport::Adjusted { iterations, .. } => iterations,
        }
    }

    pub fn is_adjusted(&self) -> bool {
        matches!(self, ReductionReport::Adjusted { .. })
    }
}

impl fmt::Display for ReductionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReductionReport::Unchanged { .. } => {
                write!(f, "Image valid, no adjustment was necessary...")
            }
            ReductionReport::Adjusted {
                width,
                height,
                colors,
                ..
            } => write!(
                f,
                "Image adjusted in size to ensure xlsx compatibility. \
                 New dimensions: {width} x {height} px with {colors} colors..."
            ),
        }
    }
}

/// An image that fits under the color ceiling, plus how it got there.
#[derive(Clone, Debug)]
pub struct Reduction {
    pub image: RgbImage,
    pub report: ReductionReport,
}

/// `floor(0.8 * dimension)` in exact integer arithmetic.
#[inline]
pub fn shrink_dimension(dimension: u32) -> u32 {
    (u64::from(dimension) * 4 / 5) as u32
}

/// Number of unique RGB triples in `image`.
pub fn count_distinct_colors(image: &RgbImage) -> usize {
    image.pixels().map(|p| p.0).collect::<HashSet<[u8; 3]>>().len()
}

/// Every RGB triple in `image` with the number of pixels that carry it.
pub fn color_histogram(image: &RgbImage) -> HashMap<[u8; 3], usize> {
    let mut histogram = HashMap::new();
    for pixel in image.pixels() {
        *histogram.entry(pixel.0).or_insert(0) += 1;
    }
    histogram
}

/// Shrink `image` until it has fewer distinct colors than `opts.ceiling`.
///
/// The image is measured at least once; when it already fits it is returned
/// untouched. Every shrink step scales both axes by `floor(0.8 * d)`.
///
/// # Errors
/// [`PixelSheetError::DegenerateResize`] when a shrink step would produce a
/// zero width or height. The error carries the last valid dimensions.
///
/// # Example
/// ```ignore
/// use pixelsheet::{reduce, ReduceOptions};
///
/// let reduction = reduce(image, &ReduceOptions::default())?;
/// println!("{}", reduction.report);
/// ```
pub fn reduce(image: RgbImage, opts: &ReduceOptions) -> Result<Reduction> {
    reduce_with(image, opts.ceiling, &opts.filter)
}

/// [`reduce`] with an arbitrary resampler.
pub fn reduce_with<R: Resampler + ?Sized>(
    image: RgbImage,
    ceiling: ColorCeiling,
    resampler: &R,
) -> Result<Reduction> {
    let (width, height) = image.dimensions();
    tracing::debug!(width, height, %ceiling, "validating image color profile");

    let mut state = ReduceState {
        image,
        original: (width, height),
        iterations: 0,
    };

    for _ in 0..=MAX_SHRINK_STEPS {
        let colors = count_distinct_colors(&state.image);
        if ceiling.admits(colors) {
            let reduction = state.finish(colors);
            tracing::debug!(
                iterations = reduction.report.iterations(),
                colors,
                "image fits under color ceiling"
            );
            return Ok(reduction);
        }
        state = state.shrink(colors, resampler)?;
    }

    let (width, height) = state.image.dimensions();
    Err(PixelSheetError::DegenerateResize {
        width,
        height,
        colors: count_distinct_colors(&state.image),
    })
}

/// Fold state of the shrink loop. Every step consumes the previous state.
struct ReduceState {
    image: RgbImage,
    original: (u32, u32),
    iterations: u32,
}

impl ReduceState {
    fn shrink<R: Resampler + ?Sized>(self, colors: usize, resampler: &R) -> Result<Self> {
        let (width, height) = self.image.dimensions();
        let new_width = shrink_dimension(width);
        let new_height = shrink_dimension(height);
        if new_width == 0 || new_height == 0 {
            return Err(PixelSheetError::DegenerateResize {
                width,
                height,
                colors,
            });
        }
        debug_assert!(new_width < width && new_height < height);

        let image = resampler.resample(&self.image, new_width, new_height);
        debug_assert_eq!(image.dimensions(), (new_width, new_height));

        Ok(Self {
            image,
            original: self.original,
            iterations: self.iterations + 1,
        })
    }

    fn finish(self, colors: usize) -> Reduction {
        let (width, height) = self.image.dimensions();
        let report = if self.iterations == 0 {
            ReductionReport::Unchanged {
                width,
                height,
                colors,
            }
        } else {
            ReductionReport::Adjusted {
                original_width: self.original.0,
                original_height: self.original.1,
                width,
                height,
                colors,
                iterations: self.iterations,
            }
        };
        Reduction {
            image: self.image,
            report,
        }
    }
}
