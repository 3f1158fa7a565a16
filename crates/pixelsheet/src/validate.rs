//! Command line input validation.
//!
//! Every check runs even after an earlier one fails, so the user sees all
//! problems at once.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

/// File extensions the image decoder is built to handle.
pub const VALID_EXTENSIONS: [&str; 4] = ["bmp", "jpeg", "jpg", "png"];

/// Side length of a worksheet cell in pixels, strictly between 0 and 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellSize(u8);

impl CellSize {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 99;

    pub fn new(pixels: u32) -> Option<Self> {
        match u8::try_from(pixels) {
            Ok(px) if (Self::MIN..=Self::MAX).contains(&px) => Some(Self(px)),
            _ => None,
        }
    }

    #[inline]
    pub fn get(self) -> u16 {
        u16::from(self.0)
    }
}

impl FromStr for CellSize {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(CellSize::new)
            .ok_or_else(|| InputError::InvalidCellSize(s.to_string()))
    }
}

/// A single rejected input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no file found at '{}'", .0.display())]
    MissingFile(PathBuf),

    /// The last extension is not in [`VALID_EXTENSIONS`]. Case is ignored, so
    /// `photo.PNG` is accepted even though a case-sensitive suffix check would
    /// reject it.
    #[error(
        "'{}' does not have a valid ending. It ends in '{}'. It must end in one of: {}",
        .path.display(),
        .found.as_deref().unwrap_or(""),
        extension_list()
    )]
    InvalidExtension {
        path: PathBuf,
        found: Option<String>,
    },

    #[error("cell dimension '{0}' must be an integer between 0 and 100 (exclusive)")]
    InvalidCellSize(String),
}

fn extension_list() -> String {
    VALID_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every input problem found in one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputErrors(Vec<InputError>);

impl InputErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputError> {
        self.0.iter()
    }

    fn check<T>(&mut self, result: Result<T, InputError>) -> Option<T> {
        result.map_err(|e| self.0.push(e)).ok()
    }
}

impl fmt::Display for InputErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InputErrors {}

/// Check that `path` points at an existing file.
pub fn validate_image_path(path: &Path) -> Result<(), InputError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(InputError::MissingFile(path.to_path_buf()))
    }
}

/// Check that the last extension of `path` is one of [`VALID_EXTENSIONS`].
/// The comparison ignores ASCII case.
pub fn validate_extension(path: &Path) -> Result<(), InputError> {
    let found = path.extension().map(|ext| ext.to_string_lossy().into_owned());
    match found.as_deref() {
        Some(ext) if VALID_EXTENSIONS.iter().any(|v| v.eq_ignore_ascii_case(ext)) => Ok(()),
        _ => Err(InputError::InvalidExtension {
            path: path.to_path_buf(),
            found: found.map(|ext| format!(".{ext}")),
        }),
    }
}

/// Validate the image path and the raw cell size argument together.
pub fn validate_inputs(path: &Path, cell_size: &str) -> Result<CellSize, InputErrors> {
    let mut errors = InputErrors::default();
    errors.check(validate_image_path(path));
    errors.check(validate_extension(path));
    let cell_size = errors.check(cell_size.parse::<CellSize>());

    match cell_size {
        Some(size) if errors.is_empty() => Ok(size),
        _ => Err(errors),
    }
}
