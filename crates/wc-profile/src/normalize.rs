/// Masks `raw` and rescales it to `0..=255`.
///
/// Background columns (`mask[i] == 0`) are zero in the output. A profile with
/// no dynamic range left after masking is not rescaled; for the usual all-zero
/// case that yields an all-zero profile and therefore no peaks.
///
/// Rescaled values are truncated, not rounded.
pub fn normalize_profile(raw: &[f32], mask: &[u8]) -> Vec<u8> {
    assert_eq!(raw.len(), mask.len(), "mask must match profile length");

    let masked: Vec<f32> = raw
        .iter()
        .zip(mask)
        .map(|(&v, &m)| if m != 0 { v } else { 0.0 })
        .collect();

    let (lo, hi) = masked
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = hi - lo;
    let scaled: Vec<u8> = if range > 0.0 {
        masked
            .iter()
            .map(|&v| ((v - lo) / range * 255.0).clamp(0.0, 255.0) as u8)
            .collect()
    } else {
        masked.iter().map(|&v| v.clamp(0.0, 255.0) as u8).collect()
    };

    scaled
        .into_iter()
        .zip(mask)
        .map(|(v, &m)| if m != 0 { v } else { 0 })
        .collect()
}
