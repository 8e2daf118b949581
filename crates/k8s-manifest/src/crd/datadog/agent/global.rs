//! The `spec.global` block of a `DatadogAgent`, configuration shared by all
//! components.
use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{EnvVar, EnvVarSource, ResourceRequirements},
    apimachinery::pkg::apis::meta::v1::LabelSelector,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::crd::datadog::{
    AgentImageConfig, CustomConfig, DatadogCredentials, Endpoint, SecretConfig, Toggle,
};

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct GlobalConfig {
    /// Datadog API and application keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<DatadogCredentials>,

    /// Token shared by the Cluster Agent and the node agents. Generated when
    /// neither this nor `clusterAgentTokenSecret` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_agent_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_agent_token_secret: Option<SecretConfig>,

    /// Name of the cluster, used to tag all data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,

    /// Datadog site the data is sent to, for example `datadoghq.eu`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,

    /// Overrides the intake derived from `site`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,

    /// Image registry used by all components, for example `gcr.io/datadoghq`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,

    /// One of `trace`, `debug`, `info`, `warn`, `error`, `critical` or `off`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Tags attached to all data, as `<key>:<value>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Tag cardinality of check metrics: `low`, `orchestrator` or `high`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks_tag_cardinality: Option<String>,

    /// Maps node label names to the tag they are reported as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_labels_as_tags: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_labels_as_tags: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_annotations_as_tags: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_labels_as_tags: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_annotations_as_tags: Option<BTreeMap<String, String>>,

    /// Maps `<resource>.<group>` to the labels reported as tags for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_resources_labels_as_tags: Option<BTreeMap<String, BTreeMap<String, String>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_resources_annotations_as_tags:
        Option<BTreeMap<String, BTreeMap<String, String>>>,

    /// How the agents reach the kubelet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubelet: Option<KubeletConfig>,

    /// Path of the Docker runtime socket on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_socket_path: Option<String>,

    /// Path of the container runtime socket on the host, if not Docker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cri_socket_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_policy: Option<NetworkPolicyConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_service: Option<LocalService>,

    /// FIPS proxy sidecar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fips: Option<FipsConfig>,

    /// Runs the FIPS-compliant agent image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_fips_agent: Option<bool>,

    /// How the node agent's processes are split into containers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_strategy: Option<ContainerStrategy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_backend: Option<SecretBackendConfig>,

    /// Skips the RBAC for non-resource URLs like `/metrics`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_non_resource_rbac: Option<bool>,

    /// Runs process checks in the core agent instead of the process agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_process_checks_in_core_agent: Option<bool>,

    /// Datadog CSI driver for sockets and volumes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csi: Option<Toggle>,

    /// Environment variables added to all agent containers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,

    /// The agent's own `datadog.yaml`, merged with the generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_configuration: Option<CustomConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct KubeletConfig {
    /// Address of the kubelet, resolved like a container environment
    /// variable. The node's host IP by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<EnvVarSource>,

    /// Verifies the kubelet's TLS certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_verify: Option<bool>,

    /// Path of the kubelet CA certificate on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_ca_path: Option<String>,

    /// Path the host CA certificate is mounted at in the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_ca_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_resources_socket_path: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct NetworkPolicyConfig {
    /// Creates NetworkPolicies for all components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<NetworkPolicyFlavor>,

    /// Selects the DNS endpoints, only used by the `cilium` flavor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_selector_endpoints: Option<Vec<LabelSelector>>,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NetworkPolicyFlavor {
    Kubernetes,
    Cilium,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LocalService {
    /// Name of the node-local agent Service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_override: Option<String>,

    /// Creates the node-local Service even on Kubernetes versions before 1.22.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_enable_local_service: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FipsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<AgentImageConfig>,

    /// Address the proxy listens on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_address: Option<String>,

    /// First port of the proxy's port range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_range: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Proxy configuration replacing the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fips_config: Option<CustomConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_https: Option<bool>,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContainerStrategy {
    /// One container per agent process.
    Optimized,

    /// All agent processes in a single container.
    Single,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SecretBackendConfig {
    /// Command resolving `ENC[...]` secret handles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,

    /// Timeout of the command in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    /// Grants the agents read access to all Secrets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_global_permissions: Option<bool>,

    /// Secrets the agents get read access to, per namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<SecretBackendRole>>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SecretBackendRole {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<String>>,
}
