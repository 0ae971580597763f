//! Headless verification harness: draws N synthetic trials and checks that the
//! advisor's observed accuracy sits inside the (84%, 86%) band.
//!
//! Exits with status 1 when the check fails.

use clap::Parser;
use tracing::error;

use skyguard::constants::VERIFICATION_TRIALS;
use skyguard::verification::{run_verification, VerificationConfig};

#[derive(Parser, Debug)]
#[command(
    name = "skyguard-verify",
    version,
    about = "Monte Carlo self-test for the SkyGuard random parameters"
)]
struct Args {
    /// Number of synthetic trials
    #[arg(long, default_value_t = VERIFICATION_TRIALS)]
    trials: usize,

    /// RNG seed (default: random)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    skyguard::env_config::init_tracing("info");
    let args = Args::parse();
    let num_threads = skyguard::env_config::init_rayon_threads_lenient();

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = VerificationConfig::with_trials(args.trials);

    let report = match run_verification(&config, seed) {
        Ok(r) => r,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to serialize report: {e}");
                std::process::exit(2);
            }
        }
    } else {
        println!("{}", report.summary());
        println!(
            "  Elapsed:          {:.1} ms ({} threads)",
            report.elapsed.as_secs_f64() * 1000.0,
            num_threads
        );
    }

    if !report.passed {
        std::process::exit(1);
    }
}
