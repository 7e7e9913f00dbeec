//! Tracing subscriber setup for processes embedding the client.

use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// Fails instead of panicking when a global subscriber is already set.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {}", e)))
}
