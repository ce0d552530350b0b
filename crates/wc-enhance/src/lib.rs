//! Contrast normalization and denoising ahead of gradient analysis.
//!
//! [`preprocess`] runs CLAHE to flatten uneven illumination across the
//! cassette, then a small separable blur to knock down sensor noise without
//! moving edges.

pub mod clahe;
pub mod conv1d;
pub mod smooth;

use serde::{Deserialize, Serialize};
use wc_core::{BorderMode, Error, Image, ImageView};

pub use clahe::{ClaheConfig, clahe_u8};
pub use smooth::{SmoothKind, smooth_u8};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// `None` skips equalization.
    pub clahe: Option<ClaheConfig>,
    pub smooth: SmoothKind,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            clahe: Some(ClaheConfig::default()),
            smooth: SmoothKind::Binomial3,
        }
    }
}

pub fn preprocess(gray: &ImageView<'_, u8>, cfg: &PreprocessConfig) -> Result<Image<u8>, Error> {
    gray.require_non_empty()?;

    let border = BorderMode::Reflect101;
    let out = match &cfg.clahe {
        Some(clahe_cfg) => {
            let equalized = clahe_u8(gray, clahe_cfg);
            smooth_u8(&equalized.as_view(), cfg.smooth, &border)
        }
        None => smooth_u8(gray, cfg.smooth, &border),
    };
    Ok(out)
}
