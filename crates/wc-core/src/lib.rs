//! Foundational primitives for the wafer-count workspace.
//!
//! ## Image Layout
//! Images are row-major with no padding: pixel `(x, y)` lives at
//! `data[y * width + x]`. Owned images hand out borrowed [`ImageView`]s so the
//! processing crates never need to own their input.
//!
//! ## Pixels
//! Grayscale stages work on `u8` intensities. Color images use [`Rgb8`]
//! (`[r, g, b]`). Luma follows ITU-R BT.601 integer weights.
//!
//! ## Border Modes
//! Neighborhood operators resolve out-of-range indices through
//! [`map_index`]. The pipeline itself only uses reflect-101, which mirrors
//! around the edge sample without repeating it.

mod border;
mod error;
mod image;

pub use border::{BorderMode, map_index, sample_or};
pub use error::Error;
pub use image::{Image, ImageView, Rgb8, gray_to_rgb, rgb_to_gray, to_f32};
