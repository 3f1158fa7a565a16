//! Decoding image files and resampling decoded images.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageError, ImageReader, RgbImage};

use crate::{PixelSheetError, Result};

/// Produces a resized copy of an image.
///
/// The reducer never asks for a zero width or height.
pub trait Resampler {
    fn resample(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage;
}

impl Resampler for FilterType {
    fn resample(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage {
        imageops::resize(image, width, height, *self)
    }
}

/// Decode the image at `path` into 8-bit RGB.
///
/// The format is sniffed from the file contents, so a PNG saved under a
/// `.jpg` name still loads. Alpha channels are dropped.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let unreadable = |source: ImageError| PixelSheetError::UnreadableImage {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| unreadable(ImageError::IoError(e)))?;
    let image = reader.decode().map_err(unreadable)?;

    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "decoded image"
    );
    Ok(image.to_rgb8())
}
