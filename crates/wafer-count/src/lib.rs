//! Umbrella crate for the `wafer-count` workspace.
//!
//! Re-exports the image types, the individual profile stages and the
//! [`process`] entry point, so callers only need this one dependency.

pub use wc_core::*;
pub use wc_counter::{
    AnnotateConfig, CountError, CountResult, Counter, CounterConfig, annotate, process,
    process_gray, process_view,
};
pub use wc_enhance::{ClaheConfig, PreprocessConfig, SmoothKind, preprocess};
pub use wc_morph::open_line_binary_u8;
pub use wc_profile::{
    BackgroundConfig, BackgroundMask, GradientConfig, PeakConfig, PeakSet, PeriodConfig,
    PeriodEstimate, background_mask, band_rows, column_means, detect_peaks, estimate_period,
    find_peaks, gradient_profile, min_distance, normalize_profile,
};
