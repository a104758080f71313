//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;

use crate::domain::DEFAULT_PHASE_INTERVAL;

/// Live auction server demonstrating the observer pattern.
#[derive(Parser, Debug, Clone)]
#[command(name = "live-auction", version, about)]
pub struct Config {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP server to.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Seconds between auction phases (active, going once, going twice, sold).
    #[arg(
        long,
        env = "AUCTION_PHASE_INTERVAL_SECS",
        default_value_t = DEFAULT_PHASE_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub phase_interval_secs: u64,

    /// Seed for item generation, for reproducible demos.
    #[arg(long, env = "AUCTION_SEED")]
    pub seed: Option<u64>,
}

impl Config {
    pub fn phase_interval(&self) -> Duration {
        Duration::from_secs(self.phase_interval_secs)
    }
}
