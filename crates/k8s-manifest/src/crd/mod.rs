//! Built-in custom resource types.
use crate::registry::{Error, Registry};

pub mod datadog;

/// Registers the data sources of all built-in custom resources.
pub fn register_all(registry: &mut Registry) -> Result<(), Error> {
    registry
        .register_manifest::<datadog::agent::DatadogAgent>()?
        .register_manifest::<datadog::metric::DatadogMetric>()?
        .register_manifest::<datadog::monitor::DatadogMonitor>()?;

    Ok(())
}
