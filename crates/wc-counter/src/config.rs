use serde::{Deserialize, Serialize};
use wc_enhance::PreprocessConfig;
use wc_profile::{BackgroundConfig, GradientConfig, PeakConfig, PeriodConfig};

use crate::annotate::AnnotateConfig;

/// Every tunable of the counting pipeline.
///
/// Missing fields deserialize to their defaults, so a JSON file only needs to
/// name what it overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub preprocess: PreprocessConfig,
    pub background: BackgroundConfig,
    pub gradient: GradientConfig,
    pub period: PeriodConfig,
    pub peaks: PeakConfig,
    pub annotate: AnnotateConfig,
}
