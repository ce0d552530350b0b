//! Peak picking on normalized profiles.
//!
//! Selection runs in three passes:
//! 1. Candidates are interior local maxima. A plateau counts once, at its
//!    middle sample (the left one of the two middles for even widths), and
//!    only when the samples on both sides are lower.
//! 2. Candidates are visited from highest to lowest (ties: lower column
//!    first); each one still kept suppresses every kept candidate closer than
//!    `distance`.
//! 3. Survivors need a prominence of at least the threshold.
//!
//! Prominence of a peak: walk left and right until a strictly higher sample
//! or the end of the profile, take the lowest sample on each side, and
//! subtract the higher of those two minima from the peak height.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakConfig {
    /// Fraction of the estimated pitch two peaks must be apart.
    pub distance_factor: f32,
    pub min_distance: usize,
    pub max_distance: usize,
    /// On the `0..=255` profile scale.
    pub prominence: f32,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            distance_factor: 0.6,
            min_distance: 3,
            max_distance: 50,
            prominence: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakSet {
    /// Strictly increasing column indices.
    pub peaks: Vec<usize>,
    pub min_distance: usize,
}

impl PeakSet {
    pub fn count(&self) -> usize {
        self.peaks.len()
    }
}

/// `clamp(round(period * distance_factor), min_distance, max_distance)`.
///
/// NaN and negative periods land on the lower bound; `+inf` saturates to the
/// upper one.
pub fn min_distance(period: f32, cfg: &PeakConfig) -> usize {
    let lo = cfg.min_distance;
    let hi = cfg.max_distance.max(lo);
    let raw = (period * cfg.distance_factor).round() as usize;
    raw.clamp(lo, hi)
}

pub fn local_maxima(x: &[u8]) -> Vec<usize> {
    let n = x.len();
    let mut peaks = Vec::new();
    if n < 3 {
        return peaks;
    }

    let mut i = 1;
    while i < n - 1 {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < n - 1 && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                let left = i;
                let right = ahead - 1;
                peaks.push((left + right) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}

pub fn peak_prominence(x: &[u8], peak: usize) -> f32 {
    let height = x[peak];

    let mut left_min = height;
    for &v in x[..=peak].iter().rev() {
        if v > height {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = height;
    for &v in &x[peak..] {
        if v > height {
            break;
        }
        right_min = right_min.min(v);
    }

    (height - left_min.max(right_min)) as f32
}

fn select_by_distance(x: &[u8], candidates: &[usize], distance: usize) -> Vec<usize> {
    if distance <= 1 {
        return candidates.to_vec();
    }

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        x[candidates[b]]
            .cmp(&x[candidates[a]])
            .then(candidates[a].cmp(&candidates[b]))
    });

    let mut keep = vec![true; candidates.len()];
    for &j in &order {
        if !keep[j] {
            continue;
        }
        let pj = candidates[j];

        for k in (0..j).rev() {
            if pj - candidates[k] >= distance {
                break;
            }
            keep[k] = false;
        }
        for k in (j + 1)..candidates.len() {
            if candidates[k] - pj >= distance {
                break;
            }
            keep[k] = false;
        }
    }

    candidates
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}

pub fn find_peaks(x: &[u8], distance: usize, prominence: f32) -> Vec<usize> {
    let candidates = local_maxima(x);
    let spaced = select_by_distance(x, &candidates, distance);
    spaced
        .into_iter()
        .filter(|&p| peak_prominence(x, p) >= prominence)
        .collect()
}

pub fn detect_peaks(profile: &[u8], period: f32, cfg: &PeakConfig) -> PeakSet {
    let distance = min_distance(period, cfg);
    PeakSet {
        peaks: find_peaks(profile, distance, cfg.prominence),
        min_distance: distance,
    }
}
