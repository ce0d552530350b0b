use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use wc_counter::{CountError, CounterConfig, process};

use crate::io::{load_rgb, save_rgb, write_profile_csv};

/// Extensions picked up by [`list_images`], compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Also write the normalized profile as `profile_<stem>.csv`.
    pub save_plot: bool,
    /// Worker threads; `0` and `1` both run sequentially.
    pub threads: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input"),
            output: PathBuf::from("output_results"),
            save_plot: false,
            threads: 1,
        }
    }
}

#[derive(Debug)]
pub enum BatchError {
    MissingInput(PathBuf),
    ReadInput { path: PathBuf, source: std::io::Error },
    CreateOutput { path: PathBuf, source: std::io::Error },
    ThreadPool(String),
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput(path) => {
                write!(f, "input directory {} does not exist", path.display())
            }
            Self::ReadInput { path, source } => {
                write!(f, "cannot list {}: {source}", path.display())
            }
            Self::CreateOutput { path, source } => {
                write!(f, "cannot create {}: {source}", path.display())
            }
            Self::ThreadPool(reason) => write!(f, "cannot start worker pool: {reason}"),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadInput { source, .. } | Self::CreateOutput { source, .. } => Some(source),
            Self::MissingInput(_) | Self::ThreadPool(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Decode,
    Pipeline,
    Save,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub name: String,
    pub count: Option<usize>,
    pub period: Option<f32>,
    pub failure: Option<FailureKind>,
    pub message: Option<String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    fn failed(name: String, kind: FailureKind, message: String) -> Self {
        Self {
            name,
            count: None,
            period: None,
            failure: Some(kind),
            message: Some(message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub output: PathBuf,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    /// Percentage of files that were counted and saved.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.total as f64 * 100.0
        }
    }

    fn from_outcomes(output: PathBuf, outcomes: Vec<FileOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            output,
            outcomes,
        }
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(e)))
}

/// Image files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let read_err = |source| BatchError::ReadInput {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn process_file(path: &Path, opts: &BatchOptions, cfg: &CounterConfig) -> FileOutcome {
    let name = file_name(path);

    let img = match load_rgb(path) {
        Ok(img) => img,
        Err(err) => {
            error!("{name}: {err}");
            return FileOutcome::failed(name, FailureKind::Decode, err.to_string());
        }
    };

    let res = match process(&img, cfg) {
        Ok(res) => res,
        Err(err) => {
            error!("{name}: {err}");
            let kind = match err {
                CountError::ImageDecode(_) => FailureKind::Decode,
                CountError::Core(_) => FailureKind::Pipeline,
            };
            return FileOutcome::failed(name, kind, err.to_string());
        }
    };

    let mut saved = save_rgb(&opts.output.join(format!("result_{name}")), &res.annotated);
    if saved.is_ok() && opts.save_plot {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        saved = write_profile_csv(&opts.output.join(format!("profile_{stem}.csv")), &res.profile);
    }
    if let Err(err) = saved {
        error!("{name}: {err:#}");
        return FileOutcome::failed(name, FailureKind::Save, format!("{err:#}"));
    }

    FileOutcome {
        name,
        count: Some(res.count),
        period: Some(res.period.period),
        failure: None,
        message: None,
    }
}

fn log_summary(summary: &BatchSummary) {
    info!("{:<40} | {:>6} | status", "file", "count");
    info!("{}", "-".repeat(60));
    for o in &summary.outcomes {
        let count = o.count.map_or_else(|| "-".to_owned(), |c| c.to_string());
        let status = if o.is_success() { "ok" } else { "FAILED" };
        info!("{:<40} | {:>6} | {status}", o.name, count);
    }
    info!("{}", "-".repeat(60));
    info!(
        "processed {} images: {} succeeded, {} failed",
        summary.total, summary.succeeded, summary.failed
    );
    info!("success rate: {:.1}%", summary.success_rate());
    info!("results saved to {}", summary.output.display());
}

/// Counts every image in `opts.input` and writes annotated copies to
/// `opts.output`.
///
/// A file that fails to load, count or save is recorded in the summary and
/// the batch moves on. Outcomes are listed in input order whatever the
/// thread count.
pub fn run_batch(opts: &BatchOptions, cfg: &CounterConfig) -> Result<BatchSummary, BatchError> {
    if !opts.input.is_dir() {
        return Err(BatchError::MissingInput(opts.input.clone()));
    }

    let files = list_images(&opts.input)?;
    if files.is_empty() {
        warn!("no images found in {}", opts.input.display());
        return Ok(BatchSummary {
            output: opts.output.clone(),
            ..BatchSummary::default()
        });
    }

    fs::create_dir_all(&opts.output).map_err(|source| BatchError::CreateOutput {
        path: opts.output.clone(),
        source,
    })?;
    info!("found {} images in {}", files.len(), opts.input.display());

    let outcomes: Vec<FileOutcome> = if opts.threads <= 1 {
        files.iter().map(|f| process_file(f, opts, cfg)).collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.threads)
            .build()
            .map_err(|err| BatchError::ThreadPool(err.to_string()))?;
        pool.install(|| files.par_iter().map(|f| process_file(f, opts, cfg)).collect())
    };

    let summary = BatchSummary::from_outcomes(opts.output.clone(), outcomes);
    log_summary(&summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use wc_core::Image;
    use wc_counter::CounterConfig;

    use super::{BatchError, BatchOptions, BatchSummary, FailureKind, list_images, run_batch};
    use crate::io::save_rgb;
    use crate::test_dir;

    fn write_stack(path: &Path) {
        let mut img = Image::new_fill(200, 100, [200u8, 200, 200]);
        for y in 0..100 {
            let row = img.row_mut(y);
            for x in [30, 60, 90, 120, 150] {
                row[x] = [40, 40, 40];
            }
        }
        save_rgb(path, &img).expect("save fixture");
    }

    fn options(root: &Path) -> BatchOptions {
        BatchOptions {
            input: root.join("in"),
            output: root.join("out"),
            ..BatchOptions::default()
        }
    }

    #[test]
    fn lists_only_images_sorted_by_name() {
        let dir = test_dir("batch_list");
        for name in ["b.PNG", "a.jpg", "c.txt", "d.Jpeg", "e.bmp", "f"] {
            fs::write(dir.join(name), b"x").expect("write");
        }
        fs::create_dir(dir.join("nested.png")).expect("mkdir");

        let names: Vec<String> = list_images(&dir)
            .expect("list")
            .iter()
            .map(|p| p.file_name().expect("name").to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.jpg", "b.PNG", "d.Jpeg", "e.bmp"]);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_input_directory_is_fatal() {
        let dir = test_dir("batch_missing");
        let err = run_batch(&options(&dir), &CounterConfig::default()).unwrap_err();
        assert!(matches!(err, BatchError::MissingInput(_)));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn empty_input_leaves_no_output_directory() {
        let dir = test_dir("batch_empty");
        let opts = options(&dir);
        fs::create_dir_all(&opts.input).expect("mkdir");
        fs::write(opts.input.join("notes.txt"), b"nothing here").expect("write");

        let summary = run_batch(&opts, &CounterConfig::default()).expect("batch");
        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_rate(), 0.0);
        assert!(!opts.output.exists());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupted_file_is_counted_as_failed() {
        let dir = test_dir("batch_corrupt");
        let opts = options(&dir);
        fs::create_dir_all(&opts.input).expect("mkdir");
        write_stack(&opts.input.join("a_stack.png"));
        fs::write(opts.input.join("b_broken.jpg"), b"\xff\xd8 truncated").expect("write");
        write_stack(&opts.input.join("c_stack.bmp"));

        let summary = run_batch(&opts, &CounterConfig::default()).expect("batch");
        assert_eq!((summary.total, summary.succeeded, summary.failed), (3, 2, 1));
        assert!((summary.success_rate() - 200.0 / 3.0).abs() < 1e-9);

        let broken = &summary.outcomes[1];
        assert_eq!(broken.name, "b_broken.jpg");
        assert_eq!(broken.failure, Some(FailureKind::Decode));
        assert_eq!(summary.outcomes[0].count, Some(5));
        assert_eq!(summary.outcomes[2].count, Some(5));

        assert!(opts.output.join("result_a_stack.png").is_file());
        assert!(opts.output.join("result_c_stack.bmp").is_file());
        assert!(!opts.output.join("result_b_broken.jpg").exists());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn save_plot_writes_profile_csv_and_threads_keep_order() {
        let dir = test_dir("batch_plot");
        let opts = BatchOptions {
            save_plot: true,
            threads: 3,
            ..options(&dir)
        };
        fs::create_dir_all(&opts.input).expect("mkdir");
        for name in ["one.png", "two.png", "three.png"] {
            write_stack(&opts.input.join(name));
        }

        let summary = run_batch(&opts, &CounterConfig::default()).expect("batch");
        let names: Vec<&str> = summary.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["one.png", "three.png", "two.png"]);
        assert_eq!(summary.succeeded, 3);

        let csv = fs::read_to_string(opts.output.join("profile_one.csv")).expect("csv");
        assert_eq!(csv.lines().count(), 201);
        assert_eq!(csv.lines().next(), Some("index,value"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn summary_serializes_to_json() {
        let summary = BatchSummary::default();
        let json = serde_json::to_value(&summary).expect("json");
        assert_eq!(json["total"], 0);
        assert!(json["outcomes"].as_array().expect("array").is_empty());
    }
}
