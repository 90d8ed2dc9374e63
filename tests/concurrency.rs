//! Shared-generator behavior under concurrent callers.

use std::collections::HashSet;
use std::sync::Arc;
use vqr_turn_rng::{GeneratorConfig, MockOsSource, VqrTurnRng};

const THREADS: usize = 8;
const CALLS_PER_THREAD: usize = 200;
const REQUEST_BYTES: usize = 37;
const RESEED_INTERVAL: u64 = 256;

fn shared_generator() -> Arc<VqrTurnRng> {
    let mut config = GeneratorConfig::with_reseed_interval(RESEED_INTERVAL);
    config.jitter.min_iterations = 128;
    config.jitter.iterations_per_byte = 4;
    Arc::new(VqrTurnRng::with_source(config, Box::new(MockOsSource::new())).unwrap())
}

#[test]
fn concurrent_callers_see_consistent_accounting() {
    let rng = shared_generator();

    let outputs: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let rng = Arc::clone(&rng);
                scope.spawn(move || {
                    (0..CALLS_PER_THREAD)
                        .map(|_| rng.random_bytes(REQUEST_BYTES).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let total = (THREADS * CALLS_PER_THREAD * REQUEST_BYTES) as u64;
    let stats = rng.stats().unwrap();

    assert_eq!(stats.total_bytes_generated, total);
    assert!(stats.bytes_since_reseed <= RESEED_INTERVAL);
    assert!(stats.reseed_count >= total / RESEED_INTERVAL - 1);

    // No two callers were ever handed the same output
    assert!(outputs.iter().all(|o| o.len() == REQUEST_BYTES));
    let unique: HashSet<&Vec<u8>> = outputs.iter().collect();
    assert_eq!(unique.len(), outputs.len());
}

#[test]
fn independent_instances_do_not_share_state() {
    let a = shared_generator();
    let b = shared_generator();

    a.random_bytes(1000).unwrap();
    let stats_b = b.stats().unwrap();

    assert_eq!(stats_b.total_bytes_generated, 0);
    assert_eq!(stats_b.reseed_count, 0);
}
