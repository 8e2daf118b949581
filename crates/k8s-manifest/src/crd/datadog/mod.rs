//! Custom resources of the Datadog Operator (`datadoghq.com`).
//!
//! The sub-schemas in this module are shared by several resources and by
//! several places inside the `DatadogAgent` spec.
use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{KeyToPath, LocalObjectReference};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod agent;
pub mod metric;
pub mod monitor;

pub const GROUP: &str = "datadoghq.com";

/// A reference to a key in a Secret.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SecretConfig {
    /// Name of the Secret.
    pub secret_name: String,

    /// Key in the Secret. Each credential has its own default key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
}

/// Credentials used to talk to the Datadog API.
///
/// Every key can either be given literally or read from a Secret. When both
/// are set, the Secret wins.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogCredentials {
    /// API key of your Datadog organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Secret containing the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<SecretConfig>,

    /// Application key of your Datadog organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_key: Option<String>,

    /// Secret containing the application key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_secret: Option<SecretConfig>,
}

/// An alternative intake endpoint.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Endpoint {
    /// URL of the endpoint, for example `https://app.datadoghq.eu`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Credentials used instead of the global ones for this endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<DatadogCredentials>,
}

/// Reference to a ConfigMap, optionally projecting only some of its keys.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ConfigMapConfig {
    /// Name of the ConfigMap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Maps keys of the ConfigMap to file paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<KeyToPath>>,
}

/// A single configuration file, given inline or as a ConfigMap.
///
/// `configData` and `configMap` are mutually exclusive, the operator rejects
/// resources setting both.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CustomConfig {
    /// Content of the configuration file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_data: Option<String>,

    /// ConfigMap containing the configuration file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<ConfigMapConfig>,
}

/// Several configuration files, given inline or as a ConfigMap.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct MultiCustomConfig {
    /// Maps file names to their content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_data_map: Option<BTreeMap<String, String>>,

    /// ConfigMap containing the configuration files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<ConfigMapConfig>,
}

/// Container image of an agent component.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AgentImageConfig {
    /// Image name, either a short name like `agent` or a full image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Image tag, ignored when `name` is a full image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Use the image variant bundling JMX support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jmx_enabled: Option<bool>,

    /// Use the full image variant, including optional integrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<bool>,

    /// One of `Always`, `Never` or `IfNotPresent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_policy: Option<String>,

    /// Secrets used to pull the image from a private registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_secrets: Option<Vec<LocalObjectReference>>,
}

/// Exposes a receiver on a port of the host.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct HostPortConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Port on the host. Defaults to the container port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<i64>,
}

/// Exposes a receiver on a Unix domain socket shared with the host.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UnixDomainSocketConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Path of the socket on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A block that can only be switched on or off.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Toggle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn secret_name_is_required() {
        let err = serde_json::from_value::<SecretConfig>(json!({ "keyName": "api_key" }))
            .unwrap_err();
        assert!(err.to_string().contains("secretName"), "{err}");
    }

    #[test]
    fn config_data_and_config_map_may_both_be_set() {
        let config = serde_json::from_value::<CustomConfig>(json!({
            "configData": "foo: bar",
            "configMap": { "name": "custom", "items": [{ "key": "a", "path": "a.yaml" }] },
        }))
        .unwrap();

        assert_eq!(config.config_data.as_deref(), Some("foo: bar"));
        assert_eq!(
            config.config_map.and_then(|config_map| config_map.items).map(|items| items.len()),
            Some(1)
        );
    }
}
