use image::{Rgb, RgbImage};
use pixelsheet::*;
use pretty_assertions::assert_eq;

/// Fills every output pixel with its own color, so an image of `w x h`
/// always carries exactly `w * h` distinct colors.
struct UniquePixels;

impl Resampler for UniquePixels {
    fn resample(&self, _image: &RgbImage, width: u32, height: u32) -> RgbImage {
        unique_image(width, height)
    }
}

fn unique_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let i = y * width + x;
        Rgb([(i >> 16) as u8, (i >> 8) as u8, i as u8])
    })
}

fn ceiling(n: usize) -> ColorCeiling {
    ColorCeiling::new(n).unwrap()
}

#[test]
fn test_solid_image_is_unchanged() {
    let img = RgbImage::from_pixel(25, 25, Rgb([255, 255, 255]));
    let reduction = reduce(img.clone(), &ReduceOptions::default()).unwrap();

    assert_eq!(reduction.image, img);
    assert_eq!(
        reduction.report,
        ReductionReport::Unchanged {
            width: 25,
            height: 25,
            colors: 1
        }
    );
    assert_eq!(
        reduction.report.to_string(),
        "Image valid, no adjustment was necessary..."
    );
}

#[test]
fn test_just_below_ceiling_is_unchanged() {
    // 4x4 unique pixels = 16 colors, ceiling 17
    let reduction = reduce_with(unique_image(4, 4), ceiling(17), &UniquePixels).unwrap();
    assert!(!reduction.report.is_adjusted());
    assert_eq!(reduction.image.dimensions(), (4, 4));
}

#[test]
fn test_at_ceiling_shrinks() {
    // 16 colors with ceiling 16: count == ceiling must shrink
    let reduction = reduce_with(unique_image(4, 4), ceiling(16), &UniquePixels).unwrap();
    assert_eq!(
        reduction.report,
        ReductionReport::Adjusted {
            original_width: 4,
            original_height: 4,
            width: 3,
            height: 3,
            colors: 9,
            iterations: 1
        }
    );
}

#[test]
fn test_multiple_iterations_follow_floor_chain() {
    // 10x10 (100) -> 8x8 (64) -> 6x6 (36) < 37
    let reduction = reduce_with(unique_image(10, 10), ceiling(37), &UniquePixels).unwrap();
    assert_eq!(reduction.image.dimensions(), (6, 6));
    assert_eq!(
        reduction.report,
        ReductionReport::Adjusted {
            original_width: 10,
            original_height: 10,
            width: 6,
            height: 6,
            colors: 36,
            iterations: 2
        }
    );
    assert_eq!(
        reduction.report.to_string(),
        "Image adjusted in size to ensure xlsx compatibility. \
         New dimensions: 6 x 6 px with 36 colors..."
    );
}

#[test]
fn test_axes_shrink_independently() {
    // 30x7 (210) -> 24x5 (120) -> 19x4 (76) -> 15x3 (45) < 50
    let reduction = reduce_with(unique_image(30, 7), ceiling(50), &UniquePixels).unwrap();
    assert_eq!(reduction.image.dimensions(), (15, 3));
    assert_eq!(reduction.report.iterations(), 3);
    assert_eq!(reduction.report.colors(), 45);
}

#[test]
fn test_dimensions_match_floor_chain() {
    let (mut w, mut h) = (97u32, 61u32);
    let reduction = reduce_with(unique_image(w, h), ceiling(500), &UniquePixels).unwrap();
    for _ in 0..reduction.report.iterations() {
        w = shrink_dimension(w);
        h = shrink_dimension(h);
    }
    assert_eq!(reduction.image.dimensions(), (w, h));
    assert!((w * h) < 500);
}

#[test]
fn test_result_always_under_ceiling() {
    for n in [2, 3, 10, 50, 200] {
        let reduction = reduce_with(unique_image(40, 40), ceiling(n), &UniquePixels).unwrap();
        assert!(count_distinct_colors(&reduction.image) < n);
        assert_eq!(
            reduction.report.colors(),
            count_distinct_colors(&reduction.image)
        );
    }
}

#[test]
fn test_real_resampling_respects_ceiling() {
    let img = unique_image(60, 40);
    let opts = ReduceOptions {
        ceiling: ceiling(300),
        ..Default::default()
    };
    let reduction = reduce(img, &opts).unwrap();

    let (w, h) = reduction.image.dimensions();
    assert!(reduction.report.is_adjusted());
    assert!(count_distinct_colors(&reduction.image) < 300);
    assert_eq!(reduction.report.dimensions(), (w, h));
    assert!(w < 60 && h < 40);
}

#[test]
fn test_ceiling_of_two() {
    // Two colors side by side; only a single pixel satisfies ceiling 2
    let mut img = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
    img.put_pixel(1, 0, Rgb([255, 255, 255]));
    img.put_pixel(1, 1, Rgb([255, 255, 255]));
    let reduction = reduce_with(img, ceiling(2), &UniquePixels).unwrap();
    assert_eq!(reduction.image.dimensions(), (1, 1));
    assert_eq!(reduction.report.colors(), 1);
}

#[test]
fn test_degenerate_resize_reports_last_dimensions() {
    // Ceiling 1 can never be met: 2x2 -> 1x1 -> 0x0
    let err = reduce_with(unique_image(2, 2), ceiling(1), &UniquePixels).unwrap_err();
    match err {
        PixelSheetError::DegenerateResize {
            width,
            height,
            colors,
        } => assert_eq!((width, height, colors), (1, 1, 1)),
        other => panic!("expected DegenerateResize, got {other:?}"),
    }
}

#[test]
fn test_degenerate_on_thin_image() {
    // Height hits zero first: 10x1 can not shrink at all
    let err = reduce_with(unique_image(10, 1), ceiling(5), &UniquePixels).unwrap_err();
    assert!(matches!(
        err,
        PixelSheetError::DegenerateResize {
            width: 10,
            height: 1,
            colors: 10
        }
    ));
}
