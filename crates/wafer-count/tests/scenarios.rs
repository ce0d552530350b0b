use wafer_count::{
    CountError, CounterConfig, Image, PeakConfig, Rgb8, min_distance, process, process_gray,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Uniform background with one-pixel dark vertical lines at `lines`.
fn line_image(width: usize, height: usize, lines: &[usize], bg: u8, fg: u8) -> Image<Rgb8> {
    let mut img = Image::new_fill(width, height, [bg, bg, bg]);
    for y in 0..height {
        let row = img.row_mut(y);
        for &x in lines {
            row[x] = [fg, fg, fg];
        }
    }
    img
}

/// Deterministic pseudo-random texture.
fn noise_image(width: usize, height: usize, seed: u64) -> Image<Rgb8> {
    let mut state = seed;
    let data = (0..width * height)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let v = (state >> 33) as u8;
            [v, v.wrapping_add(31), v / 2]
        })
        .collect();
    Image::from_vec(width, height, data).expect("valid image")
}

#[test]
fn repeated_calls_are_identical() {
    init_logger();
    let img = noise_image(160, 90, 7);
    let cfg = CounterConfig::default();

    let a = process(&img, &cfg).expect("first run");
    let b = process(&img, &cfg).expect("second run");

    assert_eq!(a.count, b.count);
    assert_eq!(a.peaks, b.peaks);
    assert_eq!(a.profile, b.profile);
    assert_eq!(a.annotated, b.annotated);
}

#[test]
fn every_stage_keeps_one_sample_per_column() {
    init_logger();
    for (w, h) in [(1, 1), (7, 3), (64, 48), (333, 17)] {
        let res = process(&noise_image(w, h, w as u64), &CounterConfig::default())
            .expect("non-empty image");
        assert_eq!(res.raw_profile.len(), w);
        assert_eq!(res.mask.len(), w);
        assert_eq!(res.profile.len(), w);
        assert!(res.peaks.iter().all(|&p| p < w));
    }
}

#[test]
fn masked_columns_are_zero_in_the_profile() {
    init_logger();
    let mut img = noise_image(180, 60, 11);
    // Dark holder on both sides.
    for y in 0..60 {
        let (left, right) = img.row_mut(y).split_at_mut(150);
        for px in left[..25].iter_mut().chain(right.iter_mut()) {
            *px = [5, 5, 5];
        }
    }

    let res = process(&img, &CounterConfig::default()).expect("process");
    assert!(res.mask[..25].iter().all(|&m| m == 0));
    for (i, (&m, &v)) in res.mask.iter().zip(&res.profile).enumerate() {
        if m == 0 {
            assert_eq!(v, 0, "column {i} is background but profile is {v}");
        }
    }
}

#[test]
fn peaks_respect_min_distance() {
    init_logger();
    for seed in 1..6 {
        let res = process(&noise_image(240, 80, seed), &CounterConfig::default())
            .expect("process");
        assert!(res.peaks.windows(2).all(|w| w[1] - w[0] >= res.min_distance));
        assert!(res.peaks.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn min_distance_stays_in_range() {
    let cfg = PeakConfig::default();
    let periods = [
        0.0,
        1.0,
        4.9,
        20.0,
        83.3,
        84.0,
        1e6,
        -5.0,
        f32::NAN,
        f32::INFINITY,
    ];
    for period in periods {
        let d = min_distance(period, &cfg);
        assert!((3..=50).contains(&d), "period {period} gave {d}");
    }
    assert_eq!(min_distance(20.0, &cfg), 12);
}

#[test]
fn narrow_images_use_the_fallback_period() {
    init_logger();
    for w in [3, 12, 22] {
        let res = process(&noise_image(w, 40, 3), &CounterConfig::default()).expect("process");
        assert!(res.period.is_fallback());
        assert_eq!(res.period.period, 20.0);
        assert_eq!(res.min_distance, 12);
    }
}

#[test]
fn empty_image_is_rejected() {
    let img = Image::<Rgb8>::from_vec(10, 0, Vec::new()).expect("empty image");
    assert!(matches!(
        process(&img, &CounterConfig::default()),
        Err(CountError::ImageDecode(_))
    ));
}

#[test]
fn evenly_spaced_lines_are_counted() {
    init_logger();
    let img = line_image(200, 100, &[30, 60, 90, 120, 150], 200, 40);
    let res = process(&img, &CounterConfig::default()).expect("process");

    assert_eq!(res.count, 5);
    for pair in res.peaks.windows(2) {
        let gap = pair[1] - pair[0];
        assert!((28..=32).contains(&gap), "gap {gap}");
    }
    for (&peak, line) in res.peaks.iter().zip([30, 60, 90, 120, 150]) {
        assert!(peak.abs_diff(line) <= 1, "peak {peak} for line {line}");
    }
}

#[test]
fn uniform_image_counts_nothing() {
    init_logger();
    let img = Image::new_fill(200, 100, [128, 128, 128]);
    let res = process(&img, &CounterConfig::default()).expect("process");

    assert_eq!(res.count, 0);
    assert!(res.peaks.is_empty());
    assert!(res.profile.iter().all(|&v| v == 0));
}

#[test]
fn tightly_packed_lines_follow_the_distance_rule() {
    init_logger();
    let lines: Vec<usize> = (40..=160).step_by(5).collect();
    let img = line_image(200, 60, &lines, 200, 120);
    let res = process(&img, &CounterConfig::default()).expect("process");

    assert_eq!(res.count, lines.len());
    assert!(res.peaks.windows(2).all(|w| w[1] - w[0] >= res.min_distance));
    for (&peak, &line) in res.peaks.iter().zip(&lines) {
        assert!(peak.abs_diff(line) <= 1, "peak {peak} for line {line}");
    }
}

#[test]
fn gray_entry_point_matches_rgb() {
    init_logger();
    let lines = [30, 60, 90, 120, 150];
    let rgb = line_image(200, 100, &lines, 200, 40);
    let gray = Image::from_vec(
        200,
        100,
        rgb.data().iter().map(|px| px[0]).collect::<Vec<u8>>(),
    )
    .expect("gray image");

    let res = process_gray(&gray, &CounterConfig::default()).expect("process");
    assert_eq!(res.count, 5);
}
