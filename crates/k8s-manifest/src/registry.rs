//! The set of data sources offered to the host.
use std::collections::{BTreeMap, btree_map::Entry};

use serde_json::Value;
use snafu::{OptionExt, ResultExt, Snafu};
use tracing::debug;

use crate::{
    crd,
    data_source::{self, CustomResourceManifest, DataSource, ManifestDataSource},
};

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to construct data source"))]
    ConstructDataSource { source: data_source::Error },

    #[snafu(display("data source {type_name:?} is already registered"))]
    DuplicateDataSource { type_name: String },

    #[snafu(display("unknown data source {type_name:?}"))]
    UnknownDataSource { type_name: String },

    #[snafu(display("failed to read data source {type_name:?}"))]
    ReadDataSource {
        source: data_source::Error,
        type_name: String,
    },
}

/// Maps data source type names to data sources.
///
/// The registry is populated once at start-up and only read afterwards, it
/// can be shared between any number of concurrent reads.
#[derive(Default)]
pub struct Registry {
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("data_sources", &self.data_sources.keys())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry containing every built-in custom resource data source.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        crd::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Registers the data source of `R` under its derived type name.
    pub fn register_manifest<R>(&mut self) -> Result<&mut Self>
    where
        R: CustomResourceManifest,
    {
        let data_source = ManifestDataSource::<R>::new().context(ConstructDataSourceSnafu)?;
        self.register(Box::new(data_source))
    }

    pub fn register(&mut self, data_source: Box<dyn DataSource>) -> Result<&mut Self> {
        let type_name = data_source.type_name().to_owned();

        match self.data_sources.entry(type_name) {
            Entry::Occupied(entry) => DuplicateDataSourceSnafu {
                type_name: entry.key(),
            }
            .fail(),
            Entry::Vacant(entry) => {
                debug!(type_name = %entry.key(), "registered data source");
                entry.insert(data_source);
                Ok(self)
            }
        }
    }

    pub fn get(&self, type_name: &str) -> Result<&dyn DataSource> {
        self.data_sources
            .get(type_name)
            .map(AsRef::as_ref)
            .context(UnknownDataSourceSnafu { type_name })
    }

    /// Looks up `type_name` and reads it with `config`.
    pub fn read(&self, type_name: &str, config: &Value) -> Result<Value> {
        self.get(type_name)?
            .read(config)
            .context(ReadDataSourceSnafu { type_name })
    }

    /// Iterates over all data sources, ordered by type name.
    pub fn iter(&self) -> impl Iterator<Item = &dyn DataSource> {
        self.data_sources.values().map(AsRef::as_ref)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.data_sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data_sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::crd::datadog::{
        agent::DatadogAgent, metric::DatadogMetric, monitor::DatadogMonitor,
    };

    const AGENT: &str = "k8s_datadoghq_com_datadog_agent_v2alpha1_manifest";

    #[test]
    fn builtin_data_sources() {
        let registry = Registry::builtin().unwrap();

        assert_eq!(
            registry.type_names().collect::<Vec<_>>(),
            vec![
                AGENT,
                "k8s_datadoghq_com_datadog_metric_v1alpha1_manifest",
                "k8s_datadoghq_com_datadog_monitor_v1alpha1_manifest",
            ]
        );

        for data_source in registry.iter() {
            let schema = data_source.schema().unwrap();
            assert!(schema.attributes.contains_key("metadata"));
            assert!(schema.attributes.contains_key("spec"));
            assert!(schema.attributes["yaml"].computed);
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry.register_manifest::<DatadogMetric>().unwrap();
        registry.register_manifest::<DatadogMonitor>().unwrap();

        let err = registry.register_manifest::<DatadogMetric>().unwrap_err();
        assert!(matches!(err, Error::DuplicateDataSource { .. }));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_data_source() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        let err = registry.get(AGENT).unwrap_err();
        assert_eq!(err.to_string(), format!("unknown data source {AGENT:?}"));
    }

    #[test]
    fn looked_up_data_source_is_debug() {
        let registry = Registry::builtin().unwrap();

        let data_source = registry.get(AGENT).unwrap();
        assert!(format!("{data_source:?}").contains(AGENT));
    }

    #[test]
    fn read_through_registry() {
        let mut registry = Registry::new();
        registry.register_manifest::<DatadogAgent>().unwrap();

        let state = registry
            .read(
                AGENT,
                &json!({ "metadata": { "name": "dd", "namespace": "default" } }),
            )
            .unwrap();

        assert_eq!(
            state["yaml"],
            "apiVersion: datadoghq.com/v2alpha1\nkind: DatadogAgent\nmetadata:\n  name: dd\n  namespace: default\n"
        );
    }
}
