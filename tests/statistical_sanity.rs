//! Statistical sanity checks on bulk generator output.

use vqr_turn_rng::analysis::statistics::{chi_square_uniformity, monobit_frequency};
use vqr_turn_rng::{GeneratorConfig, VqrTurnRng};

/// 2^20 bits.
const BULK_BYTES: usize = 1 << 17;

fn generator() -> VqrTurnRng {
    // Small interval so bulk output spans many reseeds
    VqrTurnRng::from_config(GeneratorConfig::with_reseed_interval(16 * 1024)).unwrap()
}

#[test]
fn monobit_proportion_within_band() {
    let rng = generator();
    let output = rng.random_bytes(BULK_BYTES).unwrap();

    let result = monobit_frequency(&output);
    assert!(
        (0.49..=0.51).contains(&result.proportion_ones),
        "proportion of ones {} outside [0.49, 0.51]",
        result.proportion_ones
    );
    assert!(rng.stats().unwrap().reseed_count >= 7);
}

#[test]
fn chi_square_accepts_uniformity_in_most_trials() {
    let rng = generator();
    let trials = 20;

    let accepted = (0..trials)
        .filter(|_| {
            let output = rng.random_bytes(64 * 1024).unwrap();
            chi_square_uniformity(&output).p_value >= 0.01
        })
        .count();

    assert!(
        accepted >= trials - 3,
        "only {}/{} trials accepted uniformity at alpha = 0.01",
        accepted,
        trials
    );
}

#[test]
fn floats_cover_unit_interval() {
    let rng = generator();
    let samples: Vec<f64> = (0..10_000).map(|_| rng.random_float().unwrap()).collect();

    assert!(samples.iter().all(|f| (0.0..1.0).contains(f)));
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    // sigma of the mean is ~0.0029
    assert!((mean - 0.5).abs() < 0.02, "mean {}", mean);
}
