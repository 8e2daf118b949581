//! `DatadogAgent` (`datadoghq.com/v2alpha1`), the deployment of the Datadog
//! node agent, Cluster Agent and cluster checks runners.
use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{crd::datadog::GROUP, data_source::CustomResourceManifest};

mod component;
mod features;
mod global;

pub use component::*;
pub use features::*;
pub use global::*;

pub struct DatadogAgent;

impl CustomResourceManifest for DatadogAgent {
    type Spec = DatadogAgentSpec;

    const DESCRIPTION: &'static str = "Renders a DatadogAgent (datadoghq.com/v2alpha1) manifest. \
        A DatadogAgent deploys the Datadog node agent, the Cluster Agent and the cluster checks \
        runners.";
    const GROUP: &'static str = GROUP;
    const KIND: &'static str = "DatadogAgent";
    const VERSION: &'static str = "v2alpha1";
}

/// The desired state of a `DatadogAgent`.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogAgentSpec {
    /// Features to enable or disable in all components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<DatadogFeatures>,

    /// Configuration shared by all components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<GlobalConfig>,

    /// Per-component overrides of the generated workloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#override: Option<BTreeMap<ComponentName, DatadogAgentComponentOverride>>,
}
