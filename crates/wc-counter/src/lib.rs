//! Image-to-count pipeline for a stack of wafers photographed edge-on.
//!
//! [`process`] takes an RGB frame and returns the number of wafers together
//! with the profile it was counted from and an annotated copy of the frame.
//! Each call is independent; [`Counter`] just carries a [`CounterConfig`].

pub mod annotate;
pub mod config;
pub mod error;
mod font;
pub mod pipeline;

pub use annotate::{AnnotateConfig, annotate, count_label, draw_text, draw_vertical_lines};
pub use config::CounterConfig;
pub use error::CountError;
pub use pipeline::{CountResult, Counter, process, process_gray, process_view};
