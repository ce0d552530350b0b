use serde::{Deserialize, Serialize};
use wc_core::{BorderMode, Image, ImageView, to_f32};

use crate::conv1d::convolve_f32;

const BINOMIAL3: [f32; 3] = [0.25, 0.5, 0.25];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SmoothKind {
    None,
    /// Separable `[1 2 1] / 4` in x then y, i.e. a 3x3 Gaussian.
    #[default]
    Binomial3,
}

pub fn smooth_u8(src: &ImageView<'_, u8>, kind: SmoothKind, border: &BorderMode<f32>) -> Image<u8> {
    match kind {
        SmoothKind::None => src.to_owned_image(),
        SmoothKind::Binomial3 => separable_u8(src, &BINOMIAL3, border),
    }
}

fn separable_u8(src: &ImageView<'_, u8>, kernel: &[f32], border: &BorderMode<f32>) -> Image<u8> {
    let w = src.width();
    let h = src.height();
    if w == 0 || h == 0 {
        return src.to_owned_image();
    }

    let src_f = to_f32(src);
    let mut horiz = vec![0.0f32; w * h];
    for (row_in, row_out) in src_f.data().chunks_exact(w).zip(horiz.chunks_exact_mut(w)) {
        convolve_f32(row_in, kernel, border, row_out);
    }

    let mut line = vec![0.0f32; h];
    let mut resp = vec![0.0f32; h];

    let mut out = Image::new_fill(w, h, 0u8);
    let out_data = out.data_mut();
    for x in 0..w {
        for (y, dst) in line.iter_mut().enumerate() {
            *dst = horiz[y * w + x];
        }
        convolve_f32(&line, kernel, border, &mut resp);
        for (y, &v) in resp.iter().enumerate() {
            out_data[y * w + x] = v.round().clamp(0.0, 255.0) as u8;
        }
    }

    out
}
