//! Filesystem side of wafer counting: decoding and encoding rasters, running
//! a whole directory through the pipeline and writing reports.

pub mod batch;
pub mod io;

pub use batch::{
    BatchError, BatchOptions, BatchSummary, FailureKind, FileOutcome, IMAGE_EXTENSIONS,
    list_images, run_batch,
};
pub use io::{load_rgb, save_rgb, write_json, write_profile_csv};

/// Fresh scratch directory for one test.
#[cfg(test)]
pub(crate) fn test_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("wc_batch_{}_{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create test dir");
    dir
}
