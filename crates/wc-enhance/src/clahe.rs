//! Contrast-limited adaptive histogram equalization.
//!
//! The image is split into a `tiles_x x tiles_y` grid. Tile size is
//! `ceil(w / tiles_x) x ceil(h / tiles_y)`; when that grid overhangs the
//! image the missing pixels are read through reflect-101 mapping.
//!
//! Each tile gets a clipped-histogram equalization LUT, and every output pixel
//! blends the LUTs of the four tiles whose centers surround it.

use serde::{Deserialize, Serialize};
use wc_core::{BorderMode, Image, ImageView, map_index};

const BINS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaheConfig {
    /// Histogram clip limit relative to a uniform histogram. `<= 0` disables
    /// clipping (plain tiled equalization).
    pub clip_limit: f32,
    pub tiles_x: usize,
    pub tiles_y: usize,
}

impl Default for ClaheConfig {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            tiles_x: 8,
            tiles_y: 8,
        }
    }
}

pub fn clahe_u8(src: &ImageView<'_, u8>, cfg: &ClaheConfig) -> Image<u8> {
    let w = src.width();
    let h = src.height();
    if w == 0 || h == 0 || cfg.tiles_x == 0 || cfg.tiles_y == 0 {
        return src.to_owned_image();
    }

    let tile_w = w.div_ceil(cfg.tiles_x);
    let tile_h = h.div_ceil(cfg.tiles_y);
    let luts = build_luts(src, cfg, tile_w, tile_h);

    let x_weights: Vec<TileWeight> = (0..w)
        .map(|x| TileWeight::new(x, tile_w, cfg.tiles_x))
        .collect();

    let mut out = Image::new_fill(w, h, 0u8);
    for y in 0..h {
        let wy = TileWeight::new(y, tile_h, cfg.tiles_y);
        let row_lo = &luts[wy.lo * cfg.tiles_x..(wy.lo + 1) * cfg.tiles_x];
        let row_hi = &luts[wy.hi * cfg.tiles_x..(wy.hi + 1) * cfg.tiles_x];

        let src_row = src.row(y);
        for ((dst, &px), wx) in out.row_mut(y).iter_mut().zip(src_row).zip(&x_weights) {
            let v = px as usize;
            let top =
                row_lo[wx.lo][v] as f32 * (1.0 - wx.frac) + row_lo[wx.hi][v] as f32 * wx.frac;
            let bot =
                row_hi[wx.lo][v] as f32 * (1.0 - wx.frac) + row_hi[wx.hi][v] as f32 * wx.frac;
            let blended = top * (1.0 - wy.frac) + bot * wy.frac;
            *dst = blended.round().clamp(0.0, 255.0) as u8;
        }
    }

    out
}

/// Neighboring tile indices and blend factor for one pixel coordinate.
#[derive(Debug, Clone, Copy)]
struct TileWeight {
    lo: usize,
    hi: usize,
    frac: f32,
}

impl TileWeight {
    fn new(i: usize, tile: usize, tiles: usize) -> Self {
        let t = i as f32 / tile as f32 - 0.5;
        let base = t.floor();
        let frac = t - base;
        let lo = (base as isize).max(0) as usize;
        let hi = ((base as isize + 1).max(0) as usize).min(tiles - 1);
        Self {
            lo: lo.min(tiles - 1),
            hi,
            frac,
        }
    }
}

fn build_luts(
    src: &ImageView<'_, u8>,
    cfg: &ClaheConfig,
    tile_w: usize,
    tile_h: usize,
) -> Vec<[u8; BINS]> {
    let w = src.width();
    let h = src.height();
    let area = tile_w * tile_h;
    let clip = (cfg.clip_limit > 0.0)
        .then(|| ((cfg.clip_limit * area as f32 / BINS as f32) as usize).max(1));
    let border = BorderMode::<u8>::Reflect101;

    let mut luts = Vec::with_capacity(cfg.tiles_x * cfg.tiles_y);
    for ty in 0..cfg.tiles_y {
        for tx in 0..cfg.tiles_x {
            let mut hist = [0usize; BINS];
            for yy in ty * tile_h..(ty + 1) * tile_h {
                let y = map_index(yy as isize, h, &border).unwrap_or(0);
                let row = src.row(y);
                for xx in tx * tile_w..(tx + 1) * tile_w {
                    let x = map_index(xx as isize, w, &border).unwrap_or(0);
                    hist[row[x] as usize] += 1;
                }
            }

            if let Some(limit) = clip {
                clip_histogram(&mut hist, limit);
            }
            luts.push(equalization_lut(&hist, area));
        }
    }

    luts
}

/// Clips every bin at `limit` and spreads the excess back over all bins.
fn clip_histogram(hist: &mut [usize; BINS], limit: usize) {
    let mut excess = 0usize;
    for bin in hist.iter_mut() {
        if *bin > limit {
            excess += *bin - limit;
            *bin = limit;
        }
    }

    let per_bin = excess / BINS;
    let mut residual = excess - per_bin * BINS;
    for bin in hist.iter_mut() {
        *bin += per_bin;
    }

    if residual > 0 {
        let step = (BINS / residual).max(1);
        for bin in hist.iter_mut().step_by(step) {
            if residual == 0 {
                break;
            }
            *bin += 1;
            residual -= 1;
        }
    }
}

fn equalization_lut(hist: &[usize; BINS], area: usize) -> [u8; BINS] {
    let scale = 255.0 / area as f32;
    let mut lut = [0u8; BINS];
    let mut cdf = 0usize;
    for (dst, &count) in lut.iter_mut().zip(hist.iter()) {
        cdf += count;
        *dst = (cdf as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}
