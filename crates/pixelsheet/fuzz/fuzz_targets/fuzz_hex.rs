#![no_main]

use image::Rgb;
use libfuzzer_sys::fuzz_target;
use pixelsheet::{hex_to_rgb, rgb_to_hex};

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary text should never panic
    if let Ok(text) = std::str::from_utf8(data) {
        if let Some(color) = hex_to_rgb(text) {
            assert_eq!(rgb_to_hex(color), text.to_ascii_lowercase());
        }
    }

    if let [r, g, b, ..] = *data {
        let color = Rgb([r, g, b]);
        let hex = rgb_to_hex(color);
        assert_eq!(hex.len(), 7);
        assert_eq!(hex_to_rgb(&hex), Some(color));
    }
});
