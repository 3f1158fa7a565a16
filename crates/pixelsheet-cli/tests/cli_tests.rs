use std::process::{Command, Output};

use image::{Rgb, RgbImage};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn pixelsheet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pixelsheet"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run pixelsheet")
}

#[test]
fn test_invalid_inputs_reported_together() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.gif");

    let output = pixelsheet(&[missing.to_str().unwrap(), "100"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr.lines().count(), 3, "stderr was:\n{stderr}");
    assert!(stderr.contains("no file found"));
    assert!(stderr.contains("does not have a valid ending"));
    assert!(stderr.contains("cell dimension '100'"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_arguments_fail() {
    let output = pixelsheet(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unreadable_image_fails() {
    let dir = tempdir().unwrap();
    let fake = dir.path().join("fake.png");
    std::fs::write(&fake, "not an image").unwrap();

    let output = pixelsheet(&[fake.to_str().unwrap(), "10", "-o", dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read image"));
    assert!(!dir.path().join("fake.xlsx").exists());
}

#[test]
fn test_converts_png() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("flower.png");
    RgbImage::from_fn(6, 4, |x, y| Rgb([x as u8 * 40, y as u8 * 60, 50]))
        .save(&input)
        .unwrap();
    let out_dir = dir.path().join("sheets");

    let output = pixelsheet(&[
        input.to_str().unwrap(),
        "12",
        "-o",
        out_dir.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let workbook = out_dir.join("flower.xlsx");
    assert!(workbook.is_file());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Command line inputs validated successfully...".to_string(),
            "Validating image color profile...".to_string(),
            "Image valid, no adjustment was necessary...".to_string(),
            "Worksheet filled successfully; please wait...".to_string(),
            format!("Workbook successfully saved to {}", workbook.display()),
        ]
    );
}
