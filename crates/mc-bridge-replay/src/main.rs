mod config;
mod error;
mod replay;

use tracing::info;

use crate::config::ReplayConfig;

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "replay.toml".into());
    let config = match ReplayConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "MC-Bridge replay v{} running {} events from {path}",
        env!("CARGO_PKG_VERSION"),
        config.events.len()
    );

    let summary = replay::run(&config);
    info!(
        "Replay finished: {} packets, {} bytes, {} events skipped",
        summary.packets.len(),
        summary.bytes,
        summary.skipped
    );
}
