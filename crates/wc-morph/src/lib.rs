//! Minimal binary morphology on 1-D signals.
//!
//! Samples are treated as binary with threshold `> 0`; outputs are `0` or `1`.
//! The structuring element is a line of `len` samples anchored at `len / 2`.
//! Samples outside the signal do not take part: erosion never eats in from
//! the ends and dilation never grows out of them.

fn window(i: usize, len: usize, n: usize) -> core::ops::Range<usize> {
    let left = len / 2;
    let right = len - 1 - left;
    i.saturating_sub(left)..(i + right + 1).min(n)
}

pub fn erode_line_binary_u8(signal: &[u8], len: usize) -> Vec<u8> {
    if len <= 1 {
        return signal.iter().map(|&v| u8::from(v > 0)).collect();
    }

    let n = signal.len();
    (0..n)
        .map(|i| u8::from(signal[window(i, len, n)].iter().all(|&v| v > 0)))
        .collect()
}

pub fn dilate_line_binary_u8(signal: &[u8], len: usize) -> Vec<u8> {
    if len <= 1 {
        return signal.iter().map(|&v| u8::from(v > 0)).collect();
    }

    let n = signal.len();
    (0..n)
        .map(|i| u8::from(signal[window(i, len, n)].iter().any(|&v| v > 0)))
        .collect()
}

/// Erosion followed by dilation: removes set runs shorter than `len`.
pub fn open_line_binary_u8(signal: &[u8], len: usize) -> Vec<u8> {
    let eroded = erode_line_binary_u8(signal, len);
    dilate_line_binary_u8(&eroded, len)
}

#[cfg(test)]
mod tests {
    use crate::{dilate_line_binary_u8, erode_line_binary_u8, open_line_binary_u8};

    #[test]
    fn open_removes_short_runs() {
        let signal = [0u8, 1, 1, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0];
        let out = open_line_binary_u8(&signal, 5);
        assert_eq!(out, vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn open_keeps_short_gaps() {
        let signal = [1u8, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1];
        assert_eq!(open_line_binary_u8(&signal, 5), signal.to_vec());
    }

    #[test]
    fn ends_do_not_erode() {
        let signal = [1u8, 1, 1, 0, 0];
        assert_eq!(erode_line_binary_u8(&signal, 5), vec![1, 0, 0, 0, 0]);
        assert_eq!(open_line_binary_u8(&signal, 5), vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn nonzero_values_are_binarized() {
        let signal = [0u8, 255, 3, 0];
        assert_eq!(dilate_line_binary_u8(&signal, 1), vec![0, 1, 1, 0]);
        assert_eq!(dilate_line_binary_u8(&signal, 3), vec![1, 1, 1, 1]);
    }
}
