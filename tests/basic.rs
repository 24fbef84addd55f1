use lumaquant::{quantize, QuantizeConfig, QuantizeError};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn solid(r: u8, g: u8, b: u8, n: usize) -> Vec<rgb::RGB<u8>> {
    vec![rgb::RGB { r, g, b }; n]
}

fn gray_gradient(n: usize) -> Vec<rgb::RGB<u8>> {
    (0..n)
        .map(|i| {
            let v = (i * 255 / n.max(1)) as u8;
            rgb::RGB { r: v, g: v, b: v }
        })
        .collect()
}

#[test]
fn smoke_test_palette_shape() {
    init_logs();
    let pixels = gray_gradient(64);
    let config = QuantizeConfig::new()
        .colors(8)
        .levels(3)
        .max_steps(100)
        .attempts(2)
        .seed(1);

    let result = quantize(&pixels, &config).unwrap();
    let palette = result.palette();

    assert_eq!(palette.len(), 8 * 3 + 1);
    assert_eq!(palette.colors(), 8);
    assert_eq!(palette.levels(), 3);
    assert_eq!(
        palette.entries()[palette.black_index()],
        rgb::RGB { r: 0, g: 0, b: 0 }
    );
    assert_eq!(result.distinct_colors(), 64);
}

#[test]
fn two_pure_clusters_converge_exactly() {
    // 100 red + 50 blue pixels, two colors, one level: each cluster is pure,
    // so both centroids land exactly on their input color.
    let mut pixels = solid(255, 0, 0, 100);
    pixels.extend(solid(0, 0, 255, 50));

    let config = QuantizeConfig::new()
        .colors(2)
        .levels(1)
        .max_steps(10)
        .attempts(1)
        .seed(17);

    let result = quantize(&pixels, &config).unwrap();
    let entries = result.palette().entries();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2], rgb::RGB { r: 0, g: 0, b: 0 });

    let red = rgb::RGB { r: 255, g: 0, b: 0 };
    let blue = rgb::RGB { r: 0, g: 0, b: 255 };
    assert!(
        (entries[0] == red && entries[1] == blue) || (entries[0] == blue && entries[1] == red),
        "expected pure red and blue entries, got {:?}",
        &entries[..2]
    );

    assert_eq!(result.best_attempt(), 1);
    assert_eq!(result.attempt_errors().len(), 1);
    assert!(
        result.best_error() < 1e-9,
        "pure clusters should reconstruct exactly, error {}",
        result.best_error()
    );
}

#[test]
fn color_count_clamps_to_distinct_colors() {
    init_logs();
    let mut pixels = solid(255, 0, 0, 10);
    pixels.extend(solid(0, 255, 0, 10));
    pixels.extend(solid(0, 0, 255, 10));

    let config = QuantizeConfig::new().colors(10).levels(2).seed(3);
    let result = quantize(&pixels, &config).unwrap();

    assert_eq!(result.distinct_colors(), 3);
    assert_eq!(result.palette().colors(), 3);
    assert_eq!(result.palette().len(), 3 * 2 + 1);
}

#[test]
fn single_color_input_yields_its_level_ramp() {
    let pixels = solid(10, 20, 30, 64);
    let config = QuantizeConfig::new().colors(4).levels(3).seed(5);

    let result = quantize(&pixels, &config).unwrap();
    let palette = result.palette();

    // Clamped to one base color: levels + 1 entries.
    assert_eq!(palette.len(), 3 + 1);
    // Full brightness reproduces the input color exactly.
    assert_eq!(palette.entries()[2], rgb::RGB { r: 10, g: 20, b: 30 });
    assert_eq!(
        palette.entries()[palette.black_index()],
        rgb::RGB { r: 0, g: 0, b: 0 }
    );
    // Dimmer variants only get darker.
    for pair in palette.entries()[..3].windows(2) {
        assert!(pair[0].r <= pair[1].r);
        assert!(pair[0].g <= pair[1].g);
        assert!(pair[0].b <= pair[1].b);
    }
}

#[test]
fn single_level_degenerates_to_plain_kmeans() {
    let pixels = gray_gradient(32);
    let config = QuantizeConfig::new().colors(4).levels(1).seed(9);

    let result = quantize(&pixels, &config).unwrap();
    let palette = result.palette();

    assert_eq!(palette.len(), 4 + 1);
    // With one level, each base color's only variant is itself.
    for color in 0..4 {
        assert_eq!(palette.variant_index(color, 1).unwrap(), color);
    }
}

#[test]
fn level_contract_lookup() {
    let pixels = gray_gradient(32);
    let config = QuantizeConfig::new().colors(4).levels(3).seed(2);
    let result = quantize(&pixels, &config).unwrap();
    let palette = result.palette();

    assert_eq!(palette.variant_index(2, 0).unwrap(), palette.black_index());
    assert_eq!(palette.variant_index(2, 3).unwrap(), 2 * 3 + 2);
    assert!(matches!(
        palette.variant_index(2, 4),
        Err(QuantizeError::LevelOutOfRange { .. })
    ));
    assert!(matches!(
        palette.variant_index(4, 1),
        Err(QuantizeError::ColorOutOfRange { .. })
    ));
}

#[test]
fn error_empty_input() {
    let config = QuantizeConfig::default();
    assert!(matches!(
        quantize(&[], &config),
        Err(QuantizeError::EmptyHistogram)
    ));
}

#[test]
fn error_zero_configuration_values() {
    let pixels = solid(1, 2, 3, 4);

    assert!(matches!(
        quantize(&pixels, &QuantizeConfig::new().colors(0)),
        Err(QuantizeError::InvalidColorCount)
    ));
    assert!(matches!(
        quantize(&pixels, &QuantizeConfig::new().levels(0)),
        Err(QuantizeError::InvalidLevelCount)
    ));
    assert!(matches!(
        quantize(&pixels, &QuantizeConfig::new().max_steps(0)),
        Err(QuantizeError::InvalidStepLimit)
    ));
    assert!(matches!(
        quantize(&pixels, &QuantizeConfig::new().attempts(0)),
        Err(QuantizeError::InvalidAttemptCount)
    ));
}

#[test]
fn fixed_seed_is_bit_identical() {
    let mut pixels = gray_gradient(48);
    pixels.extend(solid(200, 40, 40, 30));
    pixels.extend(solid(40, 200, 40, 20));

    let config = QuantizeConfig::new()
        .colors(6)
        .levels(3)
        .attempts(3)
        .seed(42);

    let a = quantize(&pixels, &config).unwrap();
    let b = quantize(&pixels, &config).unwrap();

    assert_eq!(a.palette().entries(), b.palette().entries());
    assert_eq!(a.attempt_errors(), b.attempt_errors());
    assert_eq!(a.best_attempt(), b.best_attempt());
}
