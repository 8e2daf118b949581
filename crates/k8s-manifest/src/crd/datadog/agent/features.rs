//! The `spec.features` block of a `DatadogAgent`.
//!
//! Each feature is an optional nested block. A block that is present is
//! rendered as given, even when none of its fields is set.
use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ContainerPort;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::crd::datadog::{
    CustomConfig, Endpoint, HostPortConfig, Toggle, UnixDomainSocketConfig,
};

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogFeatures {
    // Application-level features
    /// OpenTelemetry Collector running in the agent pod.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otel_collector: Option<OtelCollectorFeatureConfig>,

    /// OTLP ingest configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otlp: Option<OtlpFeatureConfig>,

    /// Application Performance Monitoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apm: Option<ApmFeatureConfig>,

    /// Application Security Management.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asm: Option<AsmFeatureConfig>,

    /// Cloud Security Posture Management.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cspm: Option<CspmFeatureConfig>,

    /// Cloud Workload Security.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cws: Option<CwsFeatureConfig>,

    /// Network Performance Monitoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm: Option<NpmFeatureConfig>,

    /// Universal Service Monitoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usm: Option<Toggle>,

    /// DogStatsD metric collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dogstatsd: Option<DogstatsdFeatureConfig>,

    /// Agent configuration through Datadog's Remote Configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_configuration: Option<Toggle>,

    /// Software Bill of Materials collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sbom: Option<SbomFeatureConfig>,

    /// Discovery of services running on the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_discovery: Option<ServiceDiscoveryFeatureConfig>,

    /// GPU monitoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<GpuFeatureConfig>,

    // Node-level features
    /// eBPF-based OOM kill monitoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oom_kill: Option<Toggle>,

    /// eBPF-based TCP queue length monitoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_queue_length: Option<Toggle>,

    /// eBPF check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebpf_check: Option<Toggle>,

    /// Log collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_collection: Option<LogCollectionFeatureConfig>,

    /// Live process collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_process_collection: Option<LiveProcessCollectionFeatureConfig>,

    /// Live container collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_container_collection: Option<Toggle>,

    /// Lightweight collection of processes, without resource usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_discovery: Option<Toggle>,

    // Cluster-level features
    /// Collection of Kubernetes events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_collection: Option<EventCollectionFeatureConfig>,

    /// Orchestrator Explorer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orchestrator_explorer: Option<OrchestratorExplorerFeatureConfig>,

    /// The kube-state-metrics core check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kube_state_metrics_core: Option<KubeStateMetricsCoreFeatureConfig>,

    /// The Cluster Agent's admission controller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_controller: Option<AdmissionControllerFeatureConfig>,

    /// The Cluster Agent's external metrics server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_metrics_server: Option<ExternalMetricsServerFeatureConfig>,

    /// Cluster checks scheduled by the Cluster Agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_checks: Option<ClusterChecksFeatureConfig>,

    /// Autodiscovery of Prometheus and OpenMetrics endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prometheus_scrape: Option<PrometheusScrapeFeatureConfig>,

    /// The Helm check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helm_check: Option<HelmCheckFeatureConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OtelCollectorFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Collector configuration, replacing the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conf: Option<CustomConfig>,

    /// Ports exposed by the collector container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<ContainerPort>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_config: Option<OtelCoreConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OtelCoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_timeout: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OtlpFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<OtlpReceiverConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OtlpReceiverConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocols: Option<OtlpProtocolsConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OtlpProtocolsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpc: Option<OtlpEndpointConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<OtlpEndpointConfig>,
}

/// One OTLP receiver protocol.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OtlpEndpointConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Exposes the receiver on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port_config: Option<HostPortConfig>,

    /// Address the receiver listens on, `0.0.0.0:<port>` by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ApmFeatureConfig {
    /// Enables Application Performance Monitoring. Defaults to `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Exposes the trace receiver on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port_config: Option<HostPortConfig>,

    /// Exposes the trace receiver on a Unix domain socket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unix_domain_socket_config: Option<UnixDomainSocketConfig>,

    /// Single Step Instrumentation of applications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrumentation: Option<SingleStepInstrumentation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_tracking_standalone: Option<Toggle>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SingleStepInstrumentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Namespaces to instrument. Mutually exclusive with `disabledNamespaces`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_namespaces: Option<Vec<String>>,

    /// Namespaces to leave alone. Mutually exclusive with `enabledNamespaces`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_namespaces: Option<Vec<String>>,

    /// Maps languages to the tracing library version injected for them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib_versions: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_detection: Option<Toggle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injector: Option<InjectorConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct InjectorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AsmFeatureConfig {
    /// Threat detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threats: Option<Toggle>,

    /// Software Composition Analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sca: Option<Toggle>,

    /// Interactive Application Security Testing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iast: Option<Toggle>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CspmFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Compliance benchmarks replacing the default ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_benchmarks: Option<CustomConfig>,

    /// Interval between two compliance checks, for example `20m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_benchmarks: Option<Toggle>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CwsFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Synchronizes policies from ConfigMaps into the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_configmaps: Option<bool>,

    /// Security policies replacing the default ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_policies: Option<CustomConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Toggle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_profiles: Option<Toggle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_configuration: Option<Toggle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_send_from_system_probe: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct NpmFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_conntrack: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_dns_stats: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DogstatsdFeatureConfig {
    /// Tags metrics with the origin container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_detection_enabled: Option<bool>,

    /// One of `low`, `orchestrator` or `high`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_cardinality: Option<String>,

    /// Exposes the DogStatsD receiver on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port_config: Option<HostPortConfig>,

    /// Exposes the DogStatsD receiver on a Unix domain socket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unix_domain_socket_config: Option<UnixDomainSocketConfig>,

    /// Mapper profiles turning StatsD metric names into tagged metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_mapper_profiles: Option<CustomConfig>,

    /// Accepts packets from other containers and hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_local_traffic: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SbomFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_image: Option<SbomContainerImageConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<SbomHostConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SbomContainerImageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Package analyzers, for example `os` or `languages`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzers: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncompressed_layers_support: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_fs_direct_scan: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SbomHostConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzers: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ServiceDiscoveryFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_stats: Option<Toggle>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct GpuFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Runs the GPU probe in privileged mode to collect advanced metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged_mode: Option<bool>,

    /// Runtime class of pods with access to the GPUs, `nvidia` by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_runtime_class_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LogCollectionFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Collects logs of all containers, not only annotated ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_collect_all: Option<bool>,

    /// Tails log files instead of using the container runtime API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_collect_using_files: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_logs_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_logs_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_symlinks_path: Option<String>,

    /// Host directory storing log file positions across restarts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_storage_path: Option<String>,

    /// Maximum number of files tailed at the same time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_files_limit: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LiveProcessCollectionFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Hides sensitive words in process arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrub_process_arguments: Option<bool>,

    /// Drops all process arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_process_arguments: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct EventCollectionFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_kubernetes_events: Option<bool>,

    /// Submits events one by one instead of bundling them per object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unbundle_events: Option<bool>,

    /// Events collected when `unbundleEvents` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_event_types: Option<Vec<EventTypes>>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct EventTypes {
    /// Kind of the involved object, for example `Pod`.
    pub kind: String,

    /// Event reasons to collect, all reasons when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OrchestratorExplorerFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Check configuration replacing the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conf: Option<CustomConfig>,

    /// Hides sensitive data in container specs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrubbing: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_tags: Option<Vec<String>>,

    /// Alternative intake for orchestrator data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dd_url: Option<String>,

    /// Custom resources to collect, as `<group>/<version>/<resource>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_resources: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct KubeStateMetricsCoreFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Check configuration replacing the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conf: Option<CustomConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AdmissionControllerFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Toggle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation: Option<Toggle>,

    /// Injects configuration into pods without the
    /// `admission.datadoghq.com/enabled` label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutate_unlabelled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_service_name: Option<String>,

    /// How injected pods reach the agent: `hostip`, `service` or `socket`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_communication_mode: Option<String>,

    /// `Ignore` or `Fail`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_policy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_name: Option<String>,

    /// Registry the injected libraries are pulled from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cws_instrumentation: Option<CwsInstrumentationConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_admission_events: Option<Toggle>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CwsInstrumentationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// `init_container` or `remote_copy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ExternalMetricsServerFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Registers the `v1beta1.external.metrics.k8s.io` APIService.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register_api_service: Option<bool>,

    /// Serves metrics to the Watermark Pod Autoscaler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wpa_controller: Option<bool>,

    /// Serves `DatadogMetric` resources instead of raw queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_datadog_metrics: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,

    /// Endpoint metrics are queried from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ClusterChecksFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Runs cluster checks in dedicated runners instead of node agents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cluster_check_runners: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PrometheusScrapeFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_service_endpoints: Option<bool>,

    /// Additional autodiscovery configuration, as YAML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_configs: Option<String>,

    /// Version of the OpenMetrics check, `1` or `2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct HelmCheckFeatureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_events: Option<bool>,

    /// Maps Helm values to the tag names they are reported as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_as_tags: Option<BTreeMap<String, String>>,
}
