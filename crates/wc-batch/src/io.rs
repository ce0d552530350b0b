use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;
use serde::Serialize;
use wc_core::{Image, Rgb8};
use wc_counter::CountError;

/// Reads and decodes `path` into an RGB image.
///
/// The bytes are read first and decoded from memory, so any path the
/// filesystem accepts works regardless of its encoding.
pub fn load_rgb(path: &Path) -> Result<Image<Rgb8>, CountError> {
    let bytes = fs::read(path)
        .map_err(|err| CountError::ImageDecode(format!("{}: {err}", path.display())))?;
    let rgb = image::load_from_memory(&bytes)
        .map_err(|err| CountError::ImageDecode(format!("{}: {err}", path.display())))?
        .into_rgb8();

    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    let pixels = rgb.pixels().map(|p| p.0).collect();
    Ok(Image::from_vec(w, h, pixels)?)
}

/// Encodes `img` with the format implied by the extension of `path`.
pub fn save_rgb(path: &Path, img: &Image<Rgb8>) -> Result<()> {
    let raw: Vec<u8> = img.data().iter().flatten().copied().collect();
    let out = RgbImage::from_raw(img.width() as u32, img.height() as u32, raw)
        .context("pixel buffer does not match image size")?;
    out.save(path).with_context(|| format!("saving {}", path.display()))
}

pub fn write_profile_csv(path: &Path, profile: &[u8]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "index,value")?;
    for (i, v) in profile.iter().enumerate() {
        writeln!(w, "{i},{v}")?;
    }
    w.flush().with_context(|| format!("writing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, value)
        .with_context(|| format!("writing JSON to {}", path.display()))?;
    w.flush().with_context(|| format!("writing {}", path.display()))
}
