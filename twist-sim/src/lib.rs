//! Offline tools for Tic-Tac-Twist: exhaustive state-space exploration and
//! batched self-play between move strategies.

pub mod explore;
pub mod stats;
pub mod strategy;

pub use explore::{ExploreReport, Explorer};
pub use stats::{format_elapsed, GameRecord, GameStats};
pub use strategy::Strategy;

/// Install the `tracing` subscriber shared by the binaries.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}
