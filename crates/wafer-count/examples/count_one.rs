//! Example: count wafers in a single image.
//!
//! Decodes one photograph, runs the counting pipeline and writes the
//! annotated copy as `<stem>_result.<ext>` next to the input (or under
//! `--out-dir`).
//!
//! Run from the workspace root:
//!   cargo run -p wafer-count --example count_one -- --help
//!   cargo run -p wafer-count --example count_one -- --input data/stack.jpg

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Parser;
use wafer_count::{CounterConfig, process};
use wc_batch::{load_rgb, save_rgb};

#[derive(Parser, Debug)]
#[command(about = "Count wafers in one edge-on photograph of a cassette")]
struct Args {
    /// Image to analyze
    #[arg(long, short, default_value = "test_image.jpg")]
    input: PathBuf,

    /// Directory for the annotated image (default: next to the input)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Minimum peak prominence on the 0..255 profile
    #[arg(long, default_value_t = 10.0)]
    prominence: f32,

    /// Disable CLAHE equalization
    #[arg(long)]
    no_clahe: bool,
}

fn result_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_owned());
    let dir = out_dir.unwrap_or_else(|| input.parent().unwrap_or(Path::new(".")));
    dir.join(format!("{stem}_result.{ext}"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.input.exists() {
        bail!("input image {} not found", args.input.display());
    }

    let mut cfg = CounterConfig::default();
    cfg.peaks.prominence = args.prominence;
    if args.no_clahe {
        cfg.preprocess.clahe = None;
    }

    let img = load_rgb(&args.input)?;
    log::info!(
        "loaded {}: {}x{}",
        args.input.display(),
        img.width(),
        img.height()
    );

    let t0 = Instant::now();
    let res = process(&img, &cfg)?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    println!("count: {}", res.count);
    println!(
        "estimated period: {:.2} px{}",
        res.period.period,
        if res.period.is_fallback() {
            " (fallback)"
        } else {
            ""
        }
    );
    println!("min distance: {} px  ({elapsed_ms:.2} ms)", res.min_distance);

    let out_path = result_path(&args.input, args.out_dir.as_deref());
    save_rgb(&out_path, &res.annotated)?;

    println!("annotated image written to {}", out_path.display());
    Ok(())
}
