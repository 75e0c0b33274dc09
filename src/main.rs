//! som-morph CLI - headless driver for the SOM morphing core.
//!
//! Reproduces the original demo loop without a GUI: sample dark pixels from
//! the active image, feed them to the engine, periodically reset the
//! parameters and swap the active image, and write rendered lattice frames
//! as PNG files.

use clap::{Parser, Subcommand};
use image::{GrayImage, Rgb, RgbImage};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use som_morph::{MorphError, Result, SomConfig, SomEngine, Vec2, Viewport};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Rendered frame width and height in pixels.
const FRAME_SIZE: u32 = 800;

#[derive(Parser)]
#[command(name = "som-morph")]
#[command(version)]
#[command(about = "SOM image morphing demo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Morph between two images, writing lattice frames as PNGs
    Morph {
        /// Left (first) input image
        #[arg(short, long)]
        left: PathBuf,

        /// Right (second) input image
        #[arg(short, long)]
        right: PathBuf,

        /// Output directory for rendered frames
        #[arg(short, long)]
        out: PathBuf,

        /// Lattice width
        #[arg(long, default_value = "10")]
        width: usize,

        /// Lattice height
        #[arg(long, default_value = "10")]
        height: usize,

        /// Total number of training iterations
        #[arg(short = 'n', long, default_value = "3200")]
        iterations: usize,

        /// Reset the engine and swap the active image every N iterations
        #[arg(long, default_value = "1600")]
        swap_every: usize,

        /// Write a frame every N iterations (0 disables frames)
        #[arg(long, default_value = "100")]
        frame_every: usize,

        /// Luma threshold below which a pixel counts as dark (0-255)
        #[arg(long, default_value = "64")]
        threshold: u8,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Morph {
            left,
            right,
            out,
            width,
            height,
            iterations,
            swap_every,
            frame_every,
            threshold,
            seed,
        } => run_morph(
            left, right, out, width, height, iterations, swap_every, frame_every, threshold, seed,
        ),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_morph(
    left: PathBuf,
    right: PathBuf,
    out: PathBuf,
    width: usize,
    height: usize,
    iterations: usize,
    swap_every: usize,
    frame_every: usize,
    threshold: u8,
    seed: Option<u64>,
) -> Result<()> {
    let start_time = Instant::now();

    if swap_every == 0 {
        return Err(MorphError::Config(
            "swap-every must be positive".to_string(),
        ));
    }

    println!("som-morph");
    println!("   Left image:  {}", left.display());
    println!("   Right image: {}", right.display());

    let sources = [
        load_dark_pixels(&left, threshold)?,
        load_dark_pixels(&right, threshold)?,
    ];
    println!(
        "✓ Loaded {} / {} dark pixels",
        sources[0].len(),
        sources[1].len()
    );

    fs::create_dir_all(&out)?;

    let config = SomConfig {
        width,
        height,
        seed,
        ..Default::default()
    };
    let mut engine = SomEngine::new(&config)?;

    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    let bar_style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
        .unwrap()
        .progress_chars("█▓▒░  ");
    let pb = ProgressBar::new(iterations as u64);
    pb.set_style(bar_style);

    let mut active = 0;
    let mut frame_index = 0;

    for tick in 0..iterations {
        let pixels = &sources[active];
        let sample = pixels[rng.gen_range(0..pixels.len())];
        engine.train(sample)?;

        if frame_every > 0 && tick % frame_every == 0 {
            let frame = render_frame(&engine);
            let path = out.join(format!("frame_{:05}.png", frame_index));
            frame
                .save(&path)
                .map_err(|e| MorphError::Image(e.to_string()))?;
            frame_index += 1;
        }

        if (tick + 1) % swap_every == 0 {
            active = 1 - active;
            engine.reset(
                config.initial_learning_rate,
                config.learning_rate_decay,
                config.radius_decay,
            )?;
            info!(
                "Swapped to {} image at iteration {}",
                if active == 0 { "left" } else { "right" },
                tick + 1
            );
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "✓ Wrote {} frames to {} in {:.2?}",
        frame_index,
        out.display(),
        start_time.elapsed()
    );
    Ok(())
}

/// Loads an image and collects its dark pixels as normalized samples.
///
/// Pixel `(x, y)` maps to `(2x/w - 1, 2y/h - 1)`, the engine's input domain.
fn load_dark_pixels(path: &Path, threshold: u8) -> Result<Vec<Vec2>> {
    let img: GrayImage = image::open(path)
        .map_err(|e| MorphError::Image(format!("{}: {}", path.display(), e)))?
        .to_luma8();

    let (w, h) = img.dimensions();
    let pixels: Vec<Vec2> = img
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] < threshold)
        .map(|(x, y, _)| {
            Vec2::new(
                2.0 * x as f64 / w as f64 - 1.0,
                2.0 * y as f64 / h as f64 - 1.0,
            )
        })
        .collect();

    if pixels.is_empty() {
        return Err(MorphError::Image(format!(
            "{}: no pixels darker than {}",
            path.display(),
            threshold
        )));
    }
    Ok(pixels)
}

/// Renders the current lattice mesh to a white frame with black segments.
///
/// The mesh occupies the middle half of the frame, as in the original demo.
fn render_frame(engine: &SomEngine) -> RgbImage {
    let mut frame = RgbImage::from_pixel(FRAME_SIZE, FRAME_SIZE, Rgb([255, 255, 255]));

    let quarter = FRAME_SIZE as f64 / 4.0;
    let half = FRAME_SIZE as f64 / 2.0;
    let viewport = Viewport::new(quarter, quarter, half, half);

    for segment in engine.render_geometry(viewport) {
        draw_line(&mut frame, segment.from, segment.to);
    }
    frame
}

/// Draws a line by sampling one point per pixel of its longer axis.
fn draw_line(frame: &mut RgbImage, from: Vec2, to: Vec2) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;

    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (from.x + t * dx).round();
        let y = (from.y + t * dy).round();
        if x >= 0.0 && y >= 0.0 && x < frame.width() as f64 && y < frame.height() as f64 {
            frame.put_pixel(x as u32, y as u32, Rgb([0, 0, 0]));
        }
    }
}
