use wc_core::{BorderMode, sample_or};

/// Convolves `signal` with an odd-length `kernel` centered on each sample.
///
/// Samples outside the signal are resolved with `border`.
pub fn convolve_f32(signal: &[f32], kernel: &[f32], border: &BorderMode<f32>, out: &mut [f32]) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert!(kernel.len() % 2 == 1, "kernel length must be odd");

    let n = signal.len();
    if n == 0 {
        return;
    }
    let radius = kernel.len() / 2;

    // Interior: full kernel footprint in bounds.
    let interior_start = radius.min(n);
    let interior_end = n.saturating_sub(radius).max(interior_start);
    for (i, out_i) in out
        .iter_mut()
        .enumerate()
        .take(interior_end)
        .skip(interior_start)
    {
        let window = &signal[i - radius..=i + radius];
        let mut acc = 0.0f32;
        for (s, k) in window.iter().zip(kernel.iter().rev()) {
            acc += s * k;
        }
        *out_i = acc;
    }

    for i in (0..interior_start).chain(interior_end..n) {
        out[i] = convolve_at(signal, kernel, radius, i, border);
    }
}

#[inline]
fn convolve_at(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    i: usize,
    border: &BorderMode<f32>,
) -> f32 {
    let mut acc = 0.0f32;
    for (k, &kv) in kernel.iter().enumerate() {
        let idx = i as isize + radius as isize - k as isize;
        acc += sample_or(signal, idx, border) * kv;
    }
    acc
}
