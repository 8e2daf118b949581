//! Per-component overrides in the `spec.override` block of a `DatadogAgent`.
use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{
        Affinity, EnvFromSource, EnvVar, PodDNSConfig, PodSecurityContext, Probe,
        ResourceRequirements, SecurityContext, Toleration, Volume, VolumeMount,
    },
    apimachinery::pkg::util::intstr::IntOrString,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::crd::datadog::{AgentImageConfig, CustomConfig, MultiCustomConfig};

/// The components of a Datadog deployment, used as keys of `spec.override`.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, JsonSchema, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ComponentName {
    NodeAgent,
    ClusterAgent,
    ClusterChecksRunner,
    OtelAgentGateway,
}

/// The containers of the agent pods, used as keys of `containers`.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, JsonSchema, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AgentContainerName {
    Agent,
    ClusterAgent,
    ClusterChecksRunner,
    TraceAgent,
    ProcessAgent,
    SecurityAgent,
    SystemProbe,
    OtelAgent,
    AgentDataPlane,
    InitVolume,
    InitConfig,
    SeccompSetup,
    FipsProxy,

    /// Applies to every container.
    All,
}

/// Overrides the generated workload of one component.
///
/// Every field is applied on top of the configuration the operator derives
/// from `features` and `global`.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogAgentComponentOverride {
    /// Name of the workload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Number of replicas. Not applicable to the node agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,

    /// Creates the RBAC of the component. Defaults to `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_rbac: Option<bool>,

    /// Uses an existing ServiceAccount instead of creating one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_annotations: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<AgentImageConfig>,

    /// Environment variables added to all containers of the component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_from: Option<Vec<EnvFromSource>>,

    /// Configuration files of the component, keyed by file name, for
    /// example `datadog.yaml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_configurations: Option<BTreeMap<String, CustomConfig>>,

    /// Check configurations mounted into `conf.d`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_confd: Option<MultiCustomConfig>,

    /// Custom checks mounted into `checks.d`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_checksd: Option<MultiCustomConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<BTreeMap<AgentContainerName, DatadogAgentGenericContainer>>,

    /// Volumes added to the pod.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<Volume>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<PodSecurityContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,

    /// Replaces the default affinity of the component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<Affinity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,

    /// Annotations added to the pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    /// Labels added to the pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_network: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_pid: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_policy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_config: Option<PodDNSConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_class_name: Option<String>,

    /// Deployment strategy of the component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_strategy: Option<UpdateStrategy>,

    /// Does not deploy the component at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateStrategy {
    /// `RollingUpdate` or `OnDelete` for DaemonSets, `RollingUpdate` or
    /// `Recreate` for Deployments.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub strategy_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_update: Option<RollingUpdate>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RollingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_surge: Option<IntOrString>,
}

/// Overrides one container of a component.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogAgentGenericContainer {
    /// Name of the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Log level of the container, overrides `global.logLevel`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_mounts: Option<Vec<VolumeMount>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Replaces the entrypoint of the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Port of the health endpoint used by the probes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_port: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_probe: Option<Probe>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<SecurityContext>,

    /// Seccomp profile of the system-probe container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seccomp_config: Option<SeccompConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_armor_profile_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SeccompConfig {
    /// Directory holding the seccomp profiles on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_root_path: Option<String>,

    /// Profile replacing the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_profile: Option<CustomConfig>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ComponentName::NodeAgent, "nodeAgent")]
    #[case(ComponentName::ClusterChecksRunner, "clusterChecksRunner")]
    fn component_names(#[case] component: ComponentName, #[case] name: &str) {
        assert_eq!(component.to_string(), name);
        assert_eq!(serde_json::to_value(component).unwrap(), name);
    }

    #[rstest]
    #[case(AgentContainerName::SystemProbe, "system-probe")]
    #[case(AgentContainerName::InitVolume, "init-volume")]
    #[case(AgentContainerName::All, "all")]
    fn container_names(#[case] container: AgentContainerName, #[case] name: &str) {
        assert_eq!(container.to_string(), name);
        assert_eq!(serde_json::to_value(container).unwrap(), name);
    }

    #[test]
    fn update_strategy_type_is_renamed() {
        let strategy = UpdateStrategy {
            strategy_type: Some("RollingUpdate".to_owned()),
            rolling_update: Some(RollingUpdate {
                max_unavailable: Some(IntOrString::String("10%".to_owned())),
                max_surge: None,
            }),
        };

        assert_eq!(
            serde_json::to_value(&strategy).unwrap(),
            serde_json::json!({
                "type": "RollingUpdate",
                "rollingUpdate": { "maxUnavailable": "10%" },
            })
        );
    }
}
