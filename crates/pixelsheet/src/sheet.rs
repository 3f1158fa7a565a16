//! Writing a [`HexGrid`] as an XLSX worksheet.
//!
//! Every grid entry becomes a blank cell with a solid background fill. Rows
//! and columns are sized to [`CellSize`] pixels so the cells come out square.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};
use thiserror::Error;

use crate::grid::{hex_to_rgb, HexGrid};
use crate::reducer::ColorCeiling;
use crate::validate::CellSize;

/// Worksheet row limit of the XLSX format.
pub const XLSX_MAX_ROWS: usize = 1_048_576;
/// Worksheet column limit of the XLSX format.
pub const XLSX_MAX_COLUMNS: usize = 16_384;

/// Errors raised while building or saving a workbook.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    Xlsx(#[from] XlsxError),

    #[error("failed to create output directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("grid has {colors} distinct colors, a workbook holds fewer than {ceiling}")]
    TooManyColors { colors: usize, ceiling: usize },

    #[error("grid of {width}x{height} cells exceeds the worksheet limits")]
    TooLarge { width: usize, height: usize },

    #[error("invalid cell color '{0}'")]
    InvalidColor(String),
}

/// Create `dir` and its parents if they do not exist yet.
pub fn prepare_output_dir(dir: &Path) -> Result<(), SinkError> {
    std::fs::create_dir_all(dir).map_err(|source| SinkError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn fill_format(hex: &str) -> Result<Format, SinkError> {
    let rgb = hex_to_rgb(hex).ok_or_else(|| SinkError::InvalidColor(hex.to_string()))?;
    let [r, g, b] = rgb.0;
    let color = Color::RGB((u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b));
    Ok(Format::new().set_background_color(color))
}

/// Build an in-memory workbook with one worksheet holding `grid`.
pub fn build_workbook(grid: &HexGrid, cell_size: CellSize) -> Result<Workbook, SinkError> {
    let (width, height) = (grid.width(), grid.height());
    if width > XLSX_MAX_COLUMNS || height > XLSX_MAX_ROWS {
        return Err(SinkError::TooLarge { width, height });
    }

    let ceiling = ColorCeiling::XLSX;
    let colors = grid.distinct_colors();
    if !ceiling.admits(colors) {
        return Err(SinkError::TooManyColors {
            colors,
            ceiling: ceiling.get(),
        });
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let pixels = cell_size.get();

    // One format per color, shared by all cells of that color.
    let mut formats: HashMap<&str, Format> = HashMap::with_capacity(colors);

    for (row, cells) in grid.rows().enumerate() {
        let row = row as u32;
        worksheet.set_row_height_pixels(row, pixels)?;
        for (col, hex) in cells.iter().enumerate() {
            let format = match formats.entry(hex.as_str()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(fill_format(hex)?),
            };
            worksheet.write_blank(row, col as u16, format)?;
        }
    }

    for col in 0..width {
        worksheet.set_column_width_pixels(col as u16, pixels)?;
    }

    tracing::debug!(width, height, colors, "worksheet filled");
    Ok(workbook)
}

/// Save a built workbook to `path`.
pub fn save_workbook(workbook: &mut Workbook, path: &Path) -> Result<(), SinkError> {
    workbook.save(path)?;
    tracing::debug!(path = %path.display(), "workbook saved");
    Ok(())
}

/// Build and save `grid` as an XLSX file at `path`.
pub fn write_workbook(grid: &HexGrid, cell_size: CellSize, path: &Path) -> Result<(), SinkError> {
    let mut workbook = build_workbook(grid, cell_size)?;
    save_workbook(&mut workbook, path)
}
