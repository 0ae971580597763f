//! Shared environment initialisation for the SkyGuard binaries.
//!
//! Consolidates the `RUST_LOG` and `RAYON_NUM_THREADS` reads used by both
//! `skyguard` and `skyguard-verify`.

use tracing_subscriber::EnvFilter;

/// Install the stderr `tracing` subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // May fail if a subscriber is already installed (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Number of harness threads from `RAYON_NUM_THREADS` (fallback: available
/// parallelism, else 4).
pub fn rayon_threads() -> usize {
    std::env::var("RAYON_NUM_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
}

/// Build the rayon global pool, tolerating an already-initialised pool.
/// Returns thread count.
pub fn init_rayon_threads_lenient() -> usize {
    let num_threads = rayon_threads();
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();
    tracing::debug!(num_threads, "rayon pool");
    num_threads
}
