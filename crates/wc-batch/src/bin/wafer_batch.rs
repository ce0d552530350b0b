//! Counts wafers in every image of a directory.
//!
//!   cargo run -p wc-batch --release -- --input input --output output_results

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use wc_batch::{BatchError, BatchOptions, run_batch, write_json};
use wc_counter::CounterConfig;

#[derive(Parser, Debug)]
#[command(about = "Batch wafer counting over a directory of images")]
struct Args {
    /// Directory with the input images
    #[arg(long, short, default_value = "input")]
    input: PathBuf,

    /// Directory for annotated results
    #[arg(long, short, default_value = "output_results")]
    output: PathBuf,

    /// Also write each normalized profile as CSV
    #[arg(long)]
    save_plot: bool,

    /// JSON file with counter settings; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the batch summary to this JSON file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Worker threads (1 = sequential)
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

fn load_config(path: Option<&PathBuf>) -> Result<CounterConfig> {
    let Some(path) = path else {
        return Ok(CounterConfig::default());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn run(args: Args) -> Result<ExitCode> {
    let cfg = load_config(args.config.as_ref())?;
    let opts = BatchOptions {
        input: args.input,
        output: args.output,
        save_plot: args.save_plot,
        threads: args.threads,
    };

    let summary = match run_batch(&opts, &cfg) {
        Ok(summary) => summary,
        Err(err @ BatchError::MissingInput(_)) => {
            log::error!("{err}");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(report) = &args.report {
        write_json(report, &summary)?;
        log::info!("report written to {}", report.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
