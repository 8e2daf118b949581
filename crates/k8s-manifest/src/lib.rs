//! Typed Kubernetes custom resources rendered as YAML manifests by read-only
//! data sources.
//!
//! Every data source mirrors one version of one custom resource. Its
//! configuration consists of the object `metadata` and a typed `spec`, its
//! only computed attribute is the rendered manifest. The [`Registry`] holds
//! all data sources, keyed by their type name.
//!
//! ```
//! use k8s_manifest::Registry;
//! use serde_json::json;
//!
//! let registry = Registry::builtin().expect("built-in data sources are valid");
//! let state = registry
//!     .read(
//!         "k8s_datadoghq_com_datadog_agent_v2alpha1_manifest",
//!         &json!({
//!             "metadata": { "name": "dd", "namespace": "default" },
//!             "spec": { "features": { "apm": { "enabled": true } } },
//!         }),
//!     )
//!     .expect("configuration is valid");
//!
//! assert!(state["yaml"].as_str().unwrap().contains("apm:\n      enabled: true\n"));
//! ```

pub mod crd;
pub mod data_source;
pub mod gvk;
pub mod kvp;
pub mod manifest;
pub mod metadata;
pub mod registry;
pub mod schema;
pub mod validation;

// External re-exports
pub use k8s_openapi;
pub use schemars;
// Internal re-exports
pub use data_source::{CustomResourceManifest, DataSource, ManifestConfig, ManifestDataSource};
pub use registry::Registry;
