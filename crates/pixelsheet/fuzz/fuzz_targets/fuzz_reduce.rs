#![no_main]

use arbitrary::Arbitrary;
use image::RgbImage;
use libfuzzer_sys::fuzz_target;
use pixelsheet::{count_distinct_colors, reduce, ColorCeiling, PixelSheetError, ReduceOptions};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    ceiling: u16,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = (input.width as u32).clamp(1, 48);
    let height = (input.height as u32).clamp(1, 48);

    // RGB = 3 bytes per pixel
    let expected_size = (width * height * 3) as usize;
    if input.pixels.len() < expected_size {
        return;
    }
    let Some(image) = RgbImage::from_raw(width, height, input.pixels[..expected_size].to_vec())
    else {
        return;
    };
    let Ok(ceiling) = ColorCeiling::new(input.ceiling as usize) else {
        return;
    };

    let opts = ReduceOptions {
        ceiling,
        ..Default::default()
    };

    // Must terminate; on success the result fits under the ceiling
    match reduce(image, &opts) {
        Ok(reduction) => {
            let colors = count_distinct_colors(&reduction.image);
            assert!(ceiling.admits(colors));
            assert_eq!(reduction.report.colors(), colors);
            let (w, h) = reduction.image.dimensions();
            assert!(w <= width && h <= height);
            assert!(w > 0 && h > 0);
        }
        Err(PixelSheetError::DegenerateResize { width, height, .. }) => {
            assert!(width > 0 && height > 0);
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
});
