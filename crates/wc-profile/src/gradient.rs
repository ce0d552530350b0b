//! Horizontal-gradient projection over a central band of rows.
//!
//! Wafer gaps are near-vertical, so only the x derivative is evaluated. The
//! derivative is the 3x3 Sobel `[-1 0 1] x [1 2 1]^T` with reflect-101
//! borders, so the first and last columns see a mirrored neighborhood and
//! respond with zero on flat content.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use wc_core::{BorderMode, ImageView, map_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    /// The band covers `height / band_divisor` rows around the center row.
    pub band_divisor: usize,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self { band_divisor: 3 }
    }
}

/// Rows averaged into the profile: `[c - crop/2, c + crop/2)` with
/// `c = h / 2`, `crop = h / divisor`.
///
/// Images too short for that range to contain a row fall back to the single
/// center row.
pub fn band_rows(height: usize, divisor: usize) -> Range<usize> {
    if height == 0 {
        return 0..0;
    }
    let center = height / 2;
    let half = (height / divisor.max(1)) / 2;
    let band = center - half..center + half;
    if band.is_empty() {
        center..center + 1
    } else {
        band
    }
}

/// Mean absolute x-gradient of every column over the central band.
pub fn gradient_profile(img: &ImageView<'_, u8>, cfg: &GradientConfig) -> Vec<f32> {
    let w = img.width();
    let h = img.height();
    let mut profile = vec![0.0f32; w];
    if w == 0 || h == 0 {
        return profile;
    }

    let border = BorderMode::<u8>::Reflect101;
    let left: Vec<usize> = (0..w)
        .map(|x| map_index(x as isize - 1, w, &border).unwrap_or(x))
        .collect();
    let right: Vec<usize> = (0..w)
        .map(|x| map_index(x as isize + 1, w, &border).unwrap_or(x))
        .collect();

    let rows = band_rows(h, cfg.band_divisor);
    let n_rows = rows.len();
    for y in rows {
        let ym1 = map_index(y as isize - 1, h, &border).unwrap_or(y);
        let yp1 = map_index(y as isize + 1, h, &border).unwrap_or(y);
        let r0 = img.row(ym1);
        let r1 = img.row(y);
        let r2 = img.row(yp1);

        for (x, acc) in profile.iter_mut().enumerate() {
            let (xm1, xp1) = (left[x], right[x]);
            let plus = r0[xp1] as i32 + 2 * r1[xp1] as i32 + r2[xp1] as i32;
            let minus = r0[xm1] as i32 + 2 * r1[xm1] as i32 + r2[xm1] as i32;
            *acc += (plus - minus).abs() as f32;
        }
    }

    let inv = 1.0 / n_rows as f32;
    for v in &mut profile {
        *v *= inv;
    }
    profile
}

#[cfg(test)]
mod tests {
    use wc_core::Image;

    use super::{GradientConfig, band_rows, gradient_profile};

    #[test]
    fn band_is_the_middle_third() {
        assert_eq!(band_rows(100, 3), 34..66);
        assert_eq!(band_rows(90, 3), 30..60);
        assert_eq!(band_rows(4, 3), 2..3);
        assert_eq!(band_rows(1, 3), 0..1);
        assert_eq!(band_rows(0, 3), 0..0);
    }

    #[test]
    fn vertical_step_gives_single_column_pair() {
        let (w, h) = (8usize, 9usize);
        let mut data = vec![10u8; w * h];
        for y in 0..h {
            for x in 4..w {
                data[y * w + x] = 30;
            }
        }
        let img = Image::from_vec(w, h, data).expect("valid image");
        let profile = gradient_profile(&img.as_view(), &GradientConfig::default());

        assert_eq!(profile.len(), w);
        assert_eq!(profile, vec![0.0, 0.0, 0.0, 80.0, 80.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn horizontal_edges_are_ignored() {
        let (w, h) = (6usize, 12usize);
        let mut data = vec![50u8; w * h];
        for v in &mut data[6 * w..] {
            *v = 200;
        }
        let img = Image::from_vec(w, h, data).expect("valid image");
        let profile = gradient_profile(&img.as_view(), &GradientConfig::default());
        assert!(profile.iter().all(|&v| v == 0.0));
    }
}
