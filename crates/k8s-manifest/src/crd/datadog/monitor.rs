//! `DatadogMonitor` (`datadoghq.com/v1alpha1`), a Datadog monitor managed
//! by the Datadog Operator.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{crd::datadog::GROUP, data_source::CustomResourceManifest};

pub struct DatadogMonitor;

impl CustomResourceManifest for DatadogMonitor {
    type Spec = DatadogMonitorSpec;

    const DESCRIPTION: &'static str = "Renders a DatadogMonitor (datadoghq.com/v1alpha1) manifest.";
    const GROUP: &'static str = GROUP;
    const KIND: &'static str = "DatadogMonitor";
    const VERSION: &'static str = "v1alpha1";
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogMonitorSpec {
    /// Name of the monitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Notification message, supports `@` handles and template variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The query the monitor evaluates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub monitor_type: Option<MonitorType>,

    /// Severity from 1 (high) to 5 (low).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Roles allowed to edit the monitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricted_roles: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<DatadogMonitorOptions>,

    /// Behaviour of the operator for this monitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_options: Option<DatadogMonitorControllerOptions>,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, JsonSchema, PartialEq, Serialize)]
pub enum MonitorType {
    #[serde(rename = "metric alert")]
    #[strum(serialize = "metric alert")]
    Metric,

    #[serde(rename = "query alert")]
    #[strum(serialize = "query alert")]
    Query,

    #[serde(rename = "service check")]
    #[strum(serialize = "service check")]
    ServiceCheck,

    #[serde(rename = "event alert")]
    #[strum(serialize = "event alert")]
    Event,

    #[serde(rename = "event-v2 alert")]
    #[strum(serialize = "event-v2 alert")]
    EventV2,

    #[serde(rename = "log alert")]
    #[strum(serialize = "log alert")]
    Log,

    #[serde(rename = "process alert")]
    #[strum(serialize = "process alert")]
    Process,

    #[serde(rename = "rum alert")]
    #[strum(serialize = "rum alert")]
    Rum,

    #[serde(rename = "trace-analytics alert")]
    #[strum(serialize = "trace-analytics alert")]
    TraceAnalytics,

    #[serde(rename = "slo alert")]
    #[strum(serialize = "slo alert")]
    Slo,

    #[serde(rename = "audit alert")]
    #[strum(serialize = "audit alert")]
    Audit,

    #[serde(rename = "error-tracking alert")]
    #[strum(serialize = "error-tracking alert")]
    ErrorTracking,

    #[serde(rename = "composite")]
    #[strum(serialize = "composite")]
    Composite,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogMonitorOptions {
    /// Includes a sample of log events in notifications of log monitors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_logs_sample: Option<bool>,

    /// Includes a sample of failing CI tests or pipelines in notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_samples: Option<bool>,

    /// Message included with re-notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_message: Option<String>,

    /// Seconds to delay evaluation, for metrics that arrive late.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_delay: Option<i64>,

    /// How long a group without data is kept, for example `24h`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_retention_duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groupby_simple_monitor: Option<bool>,

    /// Adds the triggering tags to the notification title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,

    /// Seconds before new groups are evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_group_delay: Option<i64>,

    /// Minutes without data before a no-data notification is sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_data_timeframe: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_preset_name: Option<String>,

    /// Notifies tagged users about changes of the monitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_audit: Option<bool>,

    /// Tags that group notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_by: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_no_data: Option<bool>,

    /// `default`, `show_no_data`, `show_and_notify_no_data` or `resolve`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_missing_data: Option<String>,

    /// Minutes between re-notifications while the monitor stays triggered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renotify_interval: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renotify_occurrences: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renotify_statuses: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_full_window: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<DatadogMonitorOptionsThresholds>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_windows: Option<DatadogMonitorOptionsThresholdWindows>,

    /// Hours after which a triggered monitor resolves on its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_h: Option<i64>,
}

/// Alerting thresholds. Values are numbers written as strings, for example
/// `"0.9"`.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogMonitorOptionsThresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_recovery: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_recovery: Option<String>,
}

/// Windows of anomaly monitors, for example `last_15m`.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogMonitorOptionsThresholdWindows {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_window: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_window: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DatadogMonitorControllerOptions {
    /// Skips the `generated:kubernetes` tag the operator adds by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_required_tags: Option<bool>,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use serde_json::json;

    use super::*;
    use crate::data_source::{DataSource, ManifestDataSource, YAML_ATTRIBUTE};

    #[test]
    fn render_monitor() {
        let data_source = ManifestDataSource::<DatadogMonitor>::new().unwrap();
        let state = data_source
            .read(&json!({
                "metadata": { "name": "high-cpu", "namespace": "monitoring" },
                "spec": {
                    "name": "High CPU usage",
                    "query": "avg(last_5m):avg:system.cpu.user > 90",
                    "type": "metric alert",
                    "options": {
                        "thresholds": { "critical": "90", "warning": "80" },
                        "notifyNoData": true,
                    },
                },
            }))
            .unwrap();

        assert_eq!(
            state[YAML_ATTRIBUTE],
            indoc! {"
                apiVersion: datadoghq.com/v1alpha1
                kind: DatadogMonitor
                metadata:
                  name: high-cpu
                  namespace: monitoring
                spec:
                  name: High CPU usage
                  query: avg(last_5m):avg:system.cpu.user > 90
                  type: metric alert
                  options:
                    notifyNoData: true
                    thresholds:
                      critical: '90'
                      warning: '80'
            "}
        );
    }

    #[test]
    fn monitor_type_names() {
        assert_eq!(MonitorType::TraceAnalytics.to_string(), "trace-analytics alert");
        assert_eq!(
            serde_json::to_value(MonitorType::EventV2).unwrap(),
            "event-v2 alert"
        );
        assert!(serde_json::from_value::<MonitorType>(json!("metric")).is_err());
    }
}
