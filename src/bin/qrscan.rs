use clap::{Parser, Subcommand};
use log::info;
use qr_rectify::tools::{
    ToolError, binary_stats, dataset_iter, grid_image, load_rgb, write_cell_bitmap,
};
use qr_rectify::{Binarization, Detector, Frame, NoOverlay, RgbOverlay, ScanConfig};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

/// Pixels per module when writing the rectified grid
const GRID_SCALE: u32 = 10;

#[derive(Parser)]
#[command(name = "qrscan", version, about = "Locate and rectify QR finder patterns")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Locate, rectify and decode the symbol in a single image
    Detect {
        #[arg(long)]
        image: PathBuf,
        /// Fixed binarization threshold (values above are white)
        #[arg(long, conflicts_with = "otsu")]
        threshold: Option<u8>,
        /// Use Otsu's method instead of a fixed threshold
        #[arg(long)]
        otsu: bool,
        /// Write the input annotated with candidates and corners
        #[arg(long)]
        overlay: Option<PathBuf>,
        /// Write the rectified module grid, upscaled
        #[arg(long)]
        grid: Option<PathBuf>,
        /// Write the rectified module grid as a packed cell bitmap
        #[arg(long)]
        bitmap: Option<PathBuf>,
    },
    /// Decode every image under a directory
    ScanDir {
        #[arg(long)]
        root: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Detect {
            image,
            threshold,
            otsu,
            overlay,
            grid,
            bitmap,
        } => {
            let mut config = ScanConfig::from_env();
            if let Some(threshold) = threshold {
                config = config.with_binarization(Binarization::Fixed(threshold));
            }
            if otsu {
                config = config.with_binarization(Binarization::Otsu);
            }
            let outputs = Outputs {
                overlay: overlay.as_deref(),
                grid: grid.as_deref(),
                bitmap: bitmap.as_deref(),
            };
            detect_cmd(&image, config, outputs)
        }
        Command::ScanDir { root, limit } => scan_dir_cmd(&root, limit),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Optional files written by `detect`
struct Outputs<'a> {
    overlay: Option<&'a Path>,
    grid: Option<&'a Path>,
    bitmap: Option<&'a Path>,
}

fn detect_cmd(image: &Path, config: ScanConfig, outputs: Outputs<'_>) -> Result<(), ToolError> {
    let rgb = load_rgb(image)?;
    println!("Image: {} ({}x{})", image.display(), rgb.width(), rgb.height());

    let detector = Detector::new().with_config(config);
    let binary = detector.binarize(&rgb)?;
    let stats = binary_stats(&binary);
    println!(
        "Binary: black_pixels={} total={} black_ratio={:.2}%",
        stats.black_pixels,
        stats.total_pixels,
        stats.black_ratio * 100.0
    );

    let start = Instant::now();
    let frame = match outputs.overlay {
        Some(path) => {
            let mut overlay = RgbOverlay::new(rgb.clone());
            let frame = detector.process_frame(&rgb, &mut overlay)?;
            overlay.into_inner().save(path)?;
            info!("overlay written to {}", path.display());
            frame
        }
        None => detector.process_frame(&rgb, &mut NoOverlay)?,
    };
    let elapsed = start.elapsed();

    report(&frame);
    println!("Elapsed: {:.2} ms", elapsed.as_secs_f64() * 1000.0);

    if let Some(symbol) = &frame.outcome.symbol {
        if let Some(path) = outputs.grid {
            grid_image(&symbol.grid, GRID_SCALE).save(path)?;
            info!("grid written to {}", path.display());
        }
        if let Some(path) = outputs.bitmap {
            write_cell_bitmap(&symbol.grid, path)?;
            info!("cell bitmap written to {}", path.display());
        }
    }
    Ok(())
}

fn report(frame: &Frame) {
    let outcome = &frame.outcome;
    println!("Candidates: {}", outcome.candidates.len());
    println!("Finder centers: {}", outcome.centers.len());
    for (i, c) in outcome.centers.iter().enumerate() {
        println!("  Center {}: ({}, {})", i, c.x, c.y);
    }
    match &outcome.symbol {
        Some(symbol) => {
            let c = &symbol.corners;
            println!(
                "Corners: top_left=({}, {}) top_right=({}, {}) bottom_left=({}, {}) \
                 bottom_right=({}, {})",
                c.top_left.x,
                c.top_left.y,
                c.top_right.x,
                c.top_right.y,
                c.bottom_left.x,
                c.bottom_left.y,
                symbol.bottom_right.x,
                symbol.bottom_right.y
            );
            if frame.message.is_empty() {
                println!("Message: <not decoded>");
            } else {
                println!("Message: {}", frame.message);
            }
        }
        None => println!("No symbol located"),
    }
}

fn scan_dir_cmd(root: &Path, limit: Option<usize>) -> Result<(), ToolError> {
    if !root.exists() {
        return Err(ToolError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("dataset root not found: {}", root.display()),
        )));
    }
    let images: Vec<PathBuf> = dataset_iter(root, limit).collect();
    if images.is_empty() {
        println!("No images found under {}", root.display());
        return Ok(());
    }

    let detector = Detector::from_env();
    let start = Instant::now();
    // Each file is an independent frame
    let results: Vec<(PathBuf, Result<Frame, ToolError>)> = images
        .into_par_iter()
        .map(|path| {
            let frame = load_rgb(&path).and_then(|rgb| {
                detector
                    .process_frame(&rgb, &mut NoOverlay)
                    .map_err(ToolError::from)
            });
            (path, frame)
        })
        .collect();
    let elapsed = start.elapsed();

    let mut located = 0usize;
    let mut decoded = 0usize;
    for (path, result) in &results {
        let rel = path.strip_prefix(root).unwrap_or(path);
        match result {
            Ok(frame) if !frame.message.is_empty() => {
                located += 1;
                decoded += 1;
                println!("{}: {}", rel.display(), frame.message);
            }
            Ok(frame) if frame.outcome.symbol.is_some() => {
                located += 1;
                println!("{}: located, not decoded", rel.display());
            }
            Ok(frame) => println!(
                "{}: {} finder centers",
                rel.display(),
                frame.outcome.centers.len()
            ),
            Err(err) => println!("{}: error: {}", rel.display(), err),
        }
    }

    let total = results.len();
    println!(
        "Located {}/{}, decoded {}/{} = {:.2}% in {:.2} s",
        located,
        total,
        decoded,
        total,
        decoded as f64 / total as f64 * 100.0,
        elapsed.as_secs_f64()
    );
    Ok(())
}
