//! Dominant pitch of a profile from its magnitude spectrum.
//!
//! Bin `k` of a length-`n` DFT corresponds to `k / n` cycles per pixel. Only
//! strictly positive frequencies `k = 1..=(n - 1) / 2` are considered, and bins
//! with `k / n <= min_cycles / n` are discarded: a period longer than
//! `n / min_cycles` pixels is treated as illumination drift rather than
//! wafer pitch.

use log::debug;
use rustfft::FftPlanner;
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    /// Minimum number of cycles across the profile for a bin to count.
    pub min_cycles: f32,
    /// Period reported when no bin survives the cutoff.
    pub fallback: f32,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            min_cycles: 10.0,
            fallback: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodEstimate {
    /// Estimated pitch in pixels.
    pub period: f32,
    /// Winning DFT bin, `None` when the fallback was used.
    pub bin: Option<usize>,
    pub magnitude: f32,
}

impl PeriodEstimate {
    pub fn is_fallback(&self) -> bool {
        self.bin.is_none()
    }
}

pub fn estimate_period(profile: &[u8], cfg: &PeriodConfig) -> PeriodEstimate {
    let fallback = PeriodEstimate {
        period: cfg.fallback,
        bin: None,
        magnitude: 0.0,
    };

    let n = profile.len();
    let first_bin = first_valid_bin(n, cfg.min_cycles);
    let last_bin = n.saturating_sub(1) / 2;
    if n == 0 || first_bin > last_bin {
        debug!(
            "no spectral bin above {} cycles for n={n}, using fallback",
            cfg.min_cycles
        );
        return fallback;
    }

    let mean = profile.iter().map(|&v| v as f64).sum::<f64>() / n as f64;
    let mut spectrum: Vec<Complex<f64>> = profile
        .iter()
        .map(|&v| Complex::new(v as f64 - mean, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut spectrum);

    let mut best_bin = first_bin;
    let mut best_mag = spectrum[first_bin].norm();
    for (k, c) in spectrum
        .iter()
        .enumerate()
        .take(last_bin + 1)
        .skip(first_bin + 1)
    {
        let mag = c.norm();
        if mag > best_mag {
            best_mag = mag;
            best_bin = k;
        }
    }

    PeriodEstimate {
        period: (n as f64 / best_bin as f64) as f32,
        bin: Some(best_bin),
        magnitude: best_mag as f32,
    }
}

/// Smallest `k >= 1` with `k / n > min_cycles / n`, i.e. `k > min_cycles`.
fn first_valid_bin(n: usize, min_cycles: f32) -> usize {
    if n == 0 || min_cycles.is_nan() || min_cycles < 1.0 {
        return 1;
    }
    // Saturating cast: huge or infinite cutoffs leave no bin.
    (min_cycles.floor() as usize).saturating_add(1)
}
