use log::debug;
use wc_core::{Image, ImageView, Rgb8, gray_to_rgb, rgb_to_gray};
use wc_enhance::preprocess;
use wc_profile::{
    PeriodEstimate, background_mask, detect_peaks, estimate_period, gradient_profile,
    normalize_profile,
};

use crate::annotate::annotate;
use crate::config::CounterConfig;
use crate::error::CountError;

/// Everything one [`process`] call produces.
#[derive(Debug, Clone)]
pub struct CountResult {
    pub count: usize,
    /// Detected boundary columns, strictly increasing.
    pub peaks: Vec<usize>,
    /// Normalized profile, one sample per column.
    pub profile: Vec<u8>,
    /// Band-averaged `|Gx|` before masking and rescale.
    pub raw_profile: Vec<f32>,
    pub mask: Vec<u8>,
    pub period: PeriodEstimate,
    pub min_distance: usize,
    pub annotated: Image<Rgb8>,
}

pub fn process(image: &Image<Rgb8>, cfg: &CounterConfig) -> Result<CountResult, CountError> {
    process_view(&image.as_view(), cfg)
}

pub fn process_view(
    image: &ImageView<'_, Rgb8>,
    cfg: &CounterConfig,
) -> Result<CountResult, CountError> {
    if image.is_empty() {
        return Err(CountError::ImageDecode(format!(
            "empty image {}x{}",
            image.width(),
            image.height()
        )));
    }

    let gray = rgb_to_gray(image);
    let enhanced = preprocess(&gray.as_view(), &cfg.preprocess)?;

    let background = background_mask(&gray.as_view(), &cfg.background);
    let raw_profile = gradient_profile(&enhanced.as_view(), &cfg.gradient);
    let profile = normalize_profile(&raw_profile, &background.mask);
    debug!(
        "background threshold {:.1}, {} of {} columns foreground",
        background.threshold,
        background.foreground_columns(),
        image.width()
    );

    let period = estimate_period(&profile, &cfg.period);
    debug!(
        "period {:.2} px (bin {:?}, magnitude {:.1})",
        period.period, period.bin, period.magnitude
    );

    let peak_set = detect_peaks(&profile, period.period, &cfg.peaks);
    let count = peak_set.count();
    debug!("count {} with min distance {}", count, peak_set.min_distance);

    let annotated = annotate(image, &peak_set.peaks, count, &cfg.annotate);

    Ok(CountResult {
        count,
        peaks: peak_set.peaks,
        profile,
        raw_profile,
        mask: background.mask,
        period,
        min_distance: peak_set.min_distance,
        annotated,
    })
}

pub fn process_gray(image: &Image<u8>, cfg: &CounterConfig) -> Result<CountResult, CountError> {
    process(&gray_to_rgb(&image.as_view()), cfg)
}

/// A configured pipeline. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    cfg: CounterConfig,
}

impl Counter {
    pub fn new(cfg: CounterConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &CounterConfig {
        &self.cfg
    }

    pub fn process(&self, image: &Image<Rgb8>) -> Result<CountResult, CountError> {
        process(image, &self.cfg)
    }

    pub fn process_gray(&self, image: &Image<u8>) -> Result<CountResult, CountError> {
        process_gray(image, &self.cfg)
    }
}
