//! pixelsheet - Turn images into pixel-art spreadsheets
//!
//! A command-line tool that writes an image as an XLSX workbook with one
//! colored cell per pixel.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use pixelsheet::{convert_with, validate_inputs, ConvertOptions, PixelSheetError, Progress};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pixelsheet")]
#[command(version)]
#[command(about = "Turn an image into a pixel-art XLSX spreadsheet", long_about = None)]
struct Cli {
    /// Input image file (BMP, JPEG, PNG)
    image: PathBuf,

    /// Width and height of every cell in pixels (1-99)
    cell_size: String,

    /// Directory the workbook is written to, as <image stem>.xlsx
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelsheet=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            if e.print().is_err() {
                eprintln!("{e}");
            }
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cell_size =
        validate_inputs(&cli.image, &cli.cell_size).map_err(PixelSheetError::InvalidInput)?;
    println!("Command line inputs validated successfully...");

    let opts = ConvertOptions {
        output_dir: cli.output_dir,
        ..Default::default()
    };
    convert_with(&cli.image, cell_size, &opts, |step| match step {
        Progress::Loaded { width, height } => {
            tracing::info!(width, height, cell_size = cell_size.get(), "loaded {}", cli.image.display());
            println!("Validating image color profile...");
        }
        Progress::Reduced(report) => println!("{report}"),
        Progress::WorksheetFilled => println!("Worksheet filled successfully; please wait..."),
        Progress::Saved(path) => println!("Workbook successfully saved to {}", path.display()),
    })
    .with_context(|| format!("failed to convert '{}'", cli.image.display()))?;

    Ok(())
}
