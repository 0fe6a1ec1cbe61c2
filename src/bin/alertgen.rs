//! georange Alert Generator
//!
//! Writes a CSV of synthetic alerts.

use clap::Parser;
use georange::alert::{rng_from_seed, AlertGenerator};
use georange::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// Alert CSV generator
#[derive(Parser, Debug)]
#[command(name = "georange-alertgen")]
#[command(about = "Generate synthetic alerts as quoted CSV")]
#[command(version)]
struct Args {
    /// Output CSV file
    #[arg(short, long, default_value = "alert.csv")]
    output: String,

    /// Number of alerts to write
    #[arg(short = 'n', long, default_value = "5000")]
    count: usize,

    /// Number of random source addresses
    #[arg(short, long, default_value = "5")]
    sources: usize,

    /// First address of the targeted network
    #[arg(long, default_value = "10.10.10.1")]
    target_start: String,

    /// Last address of the targeted network (inclusive)
    #[arg(long, default_value = "10.10.10.20")]
    target_end: String,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .alert_output(&args.output)
        .alert_count(args.count)
        .source_count(args.sources)
        .target_range(&args.target_start, &args.target_end)
        .seed(args.seed)
        .build();

    let mut rng = rng_from_seed(config.alert.seed);

    let result = AlertGenerator::new(&config.alert, &mut rng)
        .and_then(|generator| generator.write_csv(&config.alert.output_path, &mut rng));

    if let Err(e) = result {
        tracing::error!("Failed to generate alerts: {}", e);
        std::process::exit(1);
    }
}
