//! 1-D column profiles for edge-on wafer stacks.
//!
//! Coordinates follow the image column index: sample `profile[x]` describes
//! column `x`, and every profile has exactly one sample per column.
//!
//! A stack photographed edge-on shows each wafer gap as a near-vertical dark
//! line, so the horizontal gradient projected over a central band becomes a
//! pulse train with one pulse per gap. The modules here build that train,
//! mask out the holder and empty background, estimate its pitch in the
//! frequency domain and pick one peak per pulse.

pub mod background;
pub mod gradient;
pub mod normalize;
pub mod peaks;
pub mod period;

pub use background::{BackgroundConfig, BackgroundMask, background_mask, column_means};
pub use gradient::{GradientConfig, band_rows, gradient_profile};
pub use normalize::normalize_profile;
pub use peaks::{
    PeakConfig, PeakSet, detect_peaks, find_peaks, local_maxima, min_distance, peak_prominence,
};
pub use period::{PeriodConfig, PeriodEstimate, estimate_period};
