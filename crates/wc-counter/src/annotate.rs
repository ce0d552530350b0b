use std::ops::Range;

use serde::{Deserialize, Serialize};
use wc_core::{Image, ImageView, Rgb8};

use crate::font::{ADVANCE, GLYPH_H, GLYPH_W, glyph, is_set};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateConfig {
    pub line_color: Rgb8,
    pub text_color: Rgb8,
    /// Left end of the label baseline, `(x, y)` in pixels.
    pub label_origin: (usize, usize),
    /// Size of one glyph cell in pixels.
    pub text_scale: usize,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            line_color: [255, 0, 0],
            text_color: [0, 255, 0],
            label_origin: (10, 30),
            text_scale: 3,
        }
    }
}

pub fn count_label(count: usize) -> String {
    format!("Count: {count}")
}

/// Returns a copy of `image` with a vertical line at every peak column and
/// the `count` label.
pub fn annotate(
    image: &ImageView<'_, Rgb8>,
    peaks: &[usize],
    count: usize,
    cfg: &AnnotateConfig,
) -> Image<Rgb8> {
    let mut out = image.to_owned_image();
    draw_vertical_lines(&mut out, peaks, cfg.line_color);
    draw_text(
        &mut out,
        &count_label(count),
        cfg.label_origin,
        cfg.text_scale,
        cfg.text_color,
    );
    out
}

pub fn draw_vertical_lines(img: &mut Image<Rgb8>, columns: &[usize], color: Rgb8) {
    let w = img.width();
    for y in 0..img.height() {
        let row = img.row_mut(y);
        for &x in columns.iter().filter(|&&x| x < w) {
            row[x] = color;
        }
    }
}

/// Renders `text` with its baseline-left corner at `origin`; pixels falling
/// outside the image are dropped.
pub fn draw_text(
    img: &mut Image<Rgb8>,
    text: &str,
    origin: (usize, usize),
    scale: usize,
    color: Rgb8,
) {
    if scale == 0 {
        return;
    }

    let (x0, baseline) = origin;
    let advance = ADVANCE.saturating_mul(scale);

    for (i, c) in text.chars().enumerate() {
        let cell_x = x0.saturating_add(i.saturating_mul(advance));
        if cell_x >= img.width() {
            break;
        }

        let rows = glyph(c);
        for gy in 0..GLYPH_H {
            // Row `GLYPH_H - 1` sits directly on the baseline.
            let y1 = baseline.saturating_sub((GLYPH_H - 1 - gy).saturating_mul(scale));
            let y0 = y1.saturating_sub(scale);
            for gx in (0..GLYPH_W).filter(|&gx| is_set(&rows, gx, gy)) {
                let bx0 = cell_x.saturating_add(gx.saturating_mul(scale));
                fill_rect(img, bx0..bx0.saturating_add(scale), y0..y1, color);
            }
        }
    }
}

/// Fills the part of `xs` x `ys` that lies inside the image.
fn fill_rect(img: &mut Image<Rgb8>, xs: Range<usize>, ys: Range<usize>, color: Rgb8) {
    let x1 = xs.end.min(img.width());
    let y1 = ys.end.min(img.height());
    if xs.start >= x1 {
        return;
    }
    for y in ys.start..y1 {
        img.row_mut(y)[xs.start..x1].fill(color);
    }
}
