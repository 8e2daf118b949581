//! `DatadogMetric` (`datadoghq.com/v1alpha1`), a Datadog query exposed to
//! autoscalers through the Cluster Agent's external metrics server.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{crd::datadog::GROUP, data_source::CustomResourceManifest};

pub struct DatadogMetric;

impl CustomResourceManifest for DatadogMetric {
    type Spec = DatadogMetricSpec;

    const DESCRIPTION: &'static str = "Renders a DatadogMetric (datadoghq.com/v1alpha1) manifest.";
    const GROUP: &'static str = GROUP;
    const KIND: &'static str = "DatadogMetric";
    const VERSION: &'static str = "v1alpha1";
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogMetricSpec {
    /// The Datadog query, for example `avg:nginx.net.request_per_s{kube_service:nginx}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Name of the metric as seen by the external metrics API. Generated
    /// from the resource when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_metric_name: Option<String>,

    /// Maximum age of a value before it is considered stale, for example `5m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<String>,

    /// Time window the query is evaluated over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<String>,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::{
        data_source::{ManifestConfig, ManifestDataSource},
        metadata::ObjectMetadata,
    };

    #[test]
    fn render_metric() {
        let data_source = ManifestDataSource::<DatadogMetric>::new().unwrap();
        let config = ManifestConfig {
            metadata: ObjectMetadata::new("nginx-requests", "web"),
            spec: Some(DatadogMetricSpec {
                query: Some("avg:nginx.net.request_per_s".to_owned()),
                max_age: Some("5m".to_owned()),
                ..DatadogMetricSpec::default()
            }),
        };

        assert_eq!(
            data_source.render(&config).unwrap(),
            indoc! {"
                apiVersion: datadoghq.com/v1alpha1
                kind: DatadogMetric
                metadata:
                  name: nginx-requests
                  namespace: web
                spec:
                  query: avg:nginx.net.request_per_s
                  maxAge: 5m
            "}
        );
    }
}
