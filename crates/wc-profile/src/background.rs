use serde::{Deserialize, Serialize};
use wc_core::ImageView;
use wc_morph::open_line_binary_u8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Lowest allowed threshold, keeps dark exposures from thresholding at ~0.
    pub floor: f32,
    /// Threshold as a fraction of the mean column intensity.
    pub mean_factor: f32,
    /// Length of the opening element; `<= 1` disables the opening.
    pub open_len: usize,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            floor: 40.0,
            mean_factor: 0.4,
            open_len: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundMask {
    /// `1` for stack columns, `0` for background.
    pub mask: Vec<u8>,
    /// Mean intensity of every column.
    pub intensity: Vec<f32>,
    pub threshold: f32,
}

impl BackgroundMask {
    pub fn foreground_columns(&self) -> usize {
        self.mask.iter().filter(|&&m| m != 0).count()
    }
}

pub fn column_means(gray: &ImageView<'_, u8>) -> Vec<f32> {
    let w = gray.width();
    let h = gray.height();
    if h == 0 {
        return vec![0.0; w];
    }

    let mut sums = vec![0u64; w];
    for y in 0..h {
        for (acc, &px) in sums.iter_mut().zip(gray.row(y)) {
            *acc += px as u64;
        }
    }

    let inv_h = 1.0 / h as f64;
    sums.into_iter().map(|s| (s as f64 * inv_h) as f32).collect()
}

/// Marks columns brighter than the adaptive threshold as foreground.
///
/// Operates on the original (unequalized) intensities so the threshold keeps
/// its absolute meaning.
pub fn background_mask(gray: &ImageView<'_, u8>, cfg: &BackgroundConfig) -> BackgroundMask {
    let intensity = column_means(gray);
    let mean = if intensity.is_empty() {
        0.0
    } else {
        intensity.iter().map(|&v| v as f64).sum::<f64>() / intensity.len() as f64
    };
    let threshold = cfg.floor.max(mean as f32 * cfg.mean_factor);

    let raw: Vec<u8> = intensity
        .iter()
        .map(|&v| u8::from(v > threshold))
        .collect();
    let mask = open_line_binary_u8(&raw, cfg.open_len);

    BackgroundMask {
        mask,
        intensity,
        threshold,
    }
}
