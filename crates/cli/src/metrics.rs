//! Prometheus registry for the command line tool.

use anyhow::Result;
use prometheus::{Encoder, Registry, TextEncoder};

/// Registry holding every sync engine metric.
pub(crate) fn registry() -> Result<Registry> {
    let registry = Registry::new();
    for metric in vgmsync_core::metrics::all_metrics() {
        registry.register(metric)?;
    }
    Ok(registry)
}

/// Encode all metrics as Prometheus text format.
pub(crate) fn encode(registry: &Registry) -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
