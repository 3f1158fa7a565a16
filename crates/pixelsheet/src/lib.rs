//! # pixelsheet
//!
//! Render raster images as pixel-art XLSX spreadsheets: every pixel becomes a
//! blank cell filled with the pixel's color.
//!
//! ## Features
//!
//! - **Reducer**: shrinks an image by 20% per step until its distinct-color
//!   count fits under the workbook's format limit
//! - **Grid encoder**: turns the pixel grid into `#rrggbb` cell colors
//! - **Sheet writer**: writes the grid as a worksheet of square colored cells
//!
//! ## Quick Start
//!
//! ```ignore
//! use pixelsheet::{convert, CellSize, ConvertOptions};
//!
//! let cell_size = CellSize::new(10).unwrap();
//! let conversion = convert("flower.jpg".as_ref(), cell_size, &ConvertOptions::default())?;
//! println!("{}", conversion.report);
//! ```
//!
//! The individual steps are public as well:
//!
//! ```ignore
//! use pixelsheet::{encode, load_image, reduce, write_workbook, ReduceOptions};
//!
//! let image = load_image("flower.jpg".as_ref())?;
//! let reduction = reduce(image, &ReduceOptions::default())?;
//! let grid = encode(&reduction.image);
//! write_workbook(&grid, cell_size, "output/flower.xlsx".as_ref())?;
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod grid;
pub mod reducer;
pub mod sheet;
pub mod source;
pub mod validate;

pub use grid::{encode, hex_to_rgb, rgb_to_hex, HexGrid};
pub use reducer::{
    color_histogram, count_distinct_colors, reduce, reduce_with, shrink_dimension, ColorCeiling,
    ReduceOptions, Reduction, ReductionReport, MAX_SHRINK_STEPS,
};
pub use sheet::{build_workbook, prepare_output_dir, save_workbook, write_workbook, SinkError};
pub use source::{load_image, Resampler};
pub use validate::{validate_inputs, CellSize, InputError, InputErrors};

/// Maximum number of distinct cell formats an XLSX workbook accepts.
pub const XLSX_MAX_COLORS: usize = 65490;

/// Errors that can occur while turning an image into a workbook.
#[derive(Debug, Error)]
pub enum PixelSheetError {
    /// One or more command line inputs were rejected
    #[error("{0}")]
    InvalidInput(InputErrors),

    /// The image file could not be opened or decoded
    #[error("failed to read image '{}': {source}", .path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image ran out of pixels before its colors fit under the ceiling
    #[error("cannot shrink a {width}x{height} image any further (distinct colors: {colors})")]
    DegenerateResize {
        width: u32,
        height: u32,
        colors: usize,
    },

    /// A color ceiling of zero can never be satisfied
    #[error("color ceiling must be greater than zero")]
    InvalidCeiling,

    /// The workbook could not be built or saved
    #[error("failed to write workbook: {0}")]
    SinkWrite(#[from] SinkError),
}

/// Result type for pixelsheet operations.
pub type Result<T> = core::result::Result<T, PixelSheetError>;

/// Options for a full image to workbook conversion.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Color ceiling and resampling filter used by the reducer.
    pub reduce: ReduceOptions,

    /// Directory the workbook is written into, created when missing.
    pub output_dir: PathBuf,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            reduce: ReduceOptions::default(),
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Outcome of [`convert`].
#[derive(Clone, Debug)]
pub struct Conversion {
    pub report: ReductionReport,
    pub output: PathBuf,
}

/// Path of the workbook written for `input`: `<output_dir>/<input stem>.xlsx`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pixelsheet".to_string());
    output_dir.join(format!("{stem}.xlsx"))
}

/// A step of [`convert_with`] that just completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress<'a> {
    /// The image was decoded; its color profile is checked next.
    Loaded { width: u32, height: u32 },
    /// The reducer accepted the image.
    Reduced(&'a ReductionReport),
    /// Every cell of the worksheet is written, the workbook is not saved yet.
    WorksheetFilled,
    /// The workbook is on disk.
    Saved(&'a Path),
}

/// Load `input`, fit it under the color ceiling and write it as a workbook.
///
/// Nothing is written when the reducer fails.
pub fn convert(input: &Path, cell_size: CellSize, opts: &ConvertOptions) -> Result<Conversion> {
    convert_with(input, cell_size, opts, |_| {})
}

/// [`convert`] reporting each completed step to `progress`.
pub fn convert_with<F>(
    input: &Path,
    cell_size: CellSize,
    opts: &ConvertOptions,
    mut progress: F,
) -> Result<Conversion>
where
    F: FnMut(Progress<'_>),
{
    let image = load_image(input)?;
    let (width, height) = image.dimensions();
    progress(Progress::Loaded { width, height });

    let reduction = reduce(image, &opts.reduce)?;
    progress(Progress::Reduced(&reduction.report));

    let grid = encode(&reduction.image);
    let mut workbook = build_workbook(&grid, cell_size)?;
    progress(Progress::WorksheetFilled);

    prepare_output_dir(&opts.output_dir)?;
    let output = output_path_for(input, &opts.output_dir);
    save_workbook(&mut workbook, &output)?;
    progress(Progress::Saved(&output));

    Ok(Conversion {
        report: reduction.report,
        output,
    })
}
