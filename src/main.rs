//! VQR-TURN CLI
//!
//! Command-line demonstration of the random generator. Only uses the
//! public generation operations.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use vqr_turn_rng::{metrics::MetricsRegistry, GeneratorConfig, VqrTurnRng};

#[derive(Debug, Parser)]
#[command(name = "vqr-turn-rng", version, about = "Entropy-seeded HMAC-DRBG demo")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of random bytes to print.
    #[arg(short, long, default_value_t = 32)]
    bytes: usize,

    /// Print generator metrics in Prometheus text format.
    #[arg(long)]
    metrics: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("VQR-TURN generator v{}", vqr_turn_rng::VERSION);

    let config = match args.config {
        Some(path) => match GeneratorConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };

    let rng = match VqrTurnRng::from_config(config) {
        Ok(rng) => rng,
        Err(e) => {
            eprintln!("Failed to initialize generator: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&rng, args.bytes, args.metrics) {
        eprintln!("Generation failed: {}", e);
        std::process::exit(1);
    }
}

fn run(rng: &VqrTurnRng, bytes: usize, metrics: bool) -> Result<(), Box<dyn std::error::Error>> {
    let output = rng.random_bytes(bytes)?;
    println!(
        "Random bytes: {}",
        output
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>()
    );
    println!("Random u64: {}", rng.random_u64()?);
    println!("Random float: {}", rng.random_float()?);

    let stats = rng.stats()?;
    info!(
        reseeds = stats.reseed_count,
        health_failures = stats.health_failures,
        "Done"
    );

    if metrics {
        let registry = MetricsRegistry::new()?;
        registry.update(&stats);
        print!("{}", registry.encode()?);
    }

    Ok(())
}
