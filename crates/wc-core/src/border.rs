#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderMode<T> {
    Clamp,
    Constant(T),
    Reflect101,
}

impl<T> Default for BorderMode<T> {
    fn default() -> Self {
        Self::Reflect101
    }
}

/// Maps a possibly out-of-range index onto `0..len`.
///
/// Returns `None` for [`BorderMode::Constant`] when `i` is outside the
/// signal, and for any mode when `len == 0`.
pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }

    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => {
            if i < 0 {
                Some(0)
            } else {
                Some(len - 1)
            }
        }
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                Some(r)
            } else {
                Some((2 * len - 2) - r)
            }
        }
    }
}

/// Reads `signal[i]`, resolving out-of-range indices with `mode`.
///
/// Empty signals and constant borders yield the fill value (or
/// `T::default()` when the mode carries none).
#[inline]
pub fn sample_or<T: Copy + Default>(signal: &[T], i: isize, mode: &BorderMode<T>) -> T {
    match map_index(i, signal.len(), mode) {
        Some(idx) => signal[idx],
        None => match mode {
            BorderMode::Constant(c) => *c,
            _ => T::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, map_index, sample_or};

    #[test]
    fn in_range_indices_pass_through_every_mode() {
        for mode in [
            BorderMode::Clamp,
            BorderMode::Constant(7u8),
            BorderMode::Reflect101,
        ] {
            for i in 0..4 {
                assert_eq!(map_index(i, 4, &mode), Some(i as usize));
            }
        }
    }

    #[test]
    fn reflect101_mirrors_without_repeating_edge() {
        let mode = BorderMode::<u8>::Reflect101;
        let expected = [(-3, 3), (-2, 2), (-1, 1), (4, 2), (5, 1), (6, 0), (7, 1)];
        for (i, want) in expected {
            assert_eq!(map_index(i, 4, &mode), Some(want), "i = {i}");
        }
        assert_eq!(map_index(-5, 1, &mode), Some(0));
    }

    #[test]
    fn sample_or_uses_fill_for_constant_border() {
        let row = [10u8, 20, 30];
        assert_eq!(sample_or(&row, -1, &BorderMode::Constant(99)), 99);
        assert_eq!(sample_or(&row, 3, &BorderMode::Clamp), 30);
        assert_eq!(sample_or(&row, -1, &BorderMode::Reflect101), 20);
        assert_eq!(sample_or::<u8>(&[], 0, &BorderMode::Clamp), 0);
    }
}
