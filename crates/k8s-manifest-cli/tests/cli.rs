use std::{
    fs,
    process::{Command, Output},
};

use indoc::indoc;
use tempfile::tempdir;

const AGENT: &str = "k8s_datadoghq_com_datadog_agent_v2alpha1_manifest";

fn k8s_manifest(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_k8s-manifest"))
        .args(args)
        .env_remove("K8S_MANIFEST_CONFIG")
        .env_remove("K8S_MANIFEST_OUTPUT")
        .env("K8S_MANIFEST_LOG", "error")
        .output()
        .expect("run k8s-manifest")
}

#[test]
fn list_data_sources() {
    let output = k8s_manifest(&["list"]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        indoc! {"
            k8s_datadoghq_com_datadog_agent_v2alpha1_manifest
            k8s_datadoghq_com_datadog_metric_v1alpha1_manifest
            k8s_datadoghq_com_datadog_monitor_v1alpha1_manifest
        "}
    );
}

#[test]
fn render_yaml_config_to_file() {
    let temp_dir = tempdir().expect("create temporary directory");
    let config_path = temp_dir.path().join("agent.yaml");
    let output_path = temp_dir.path().join("manifest.yaml");

    fs::write(
        &config_path,
        indoc! {"
            apiVersion: ignored.example.com/v1
            metadata:
              name: dd
              namespace: default
            spec:
              features:
                apm:
                  enabled: true
        "},
    )
    .expect("write configuration");

    let output = k8s_manifest(&[
        "render",
        AGENT,
        "--config",
        config_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        indoc! {"
            apiVersion: datadoghq.com/v2alpha1
            kind: DatadogAgent
            metadata:
              name: dd
              namespace: default
            spec:
              features:
                apm:
                  enabled: true
        "}
    );

    temp_dir.close().expect("clean up temporary directory");
}

#[test]
fn render_json_config_as_state() {
    let temp_dir = tempdir().expect("create temporary directory");
    let config_path = temp_dir.path().join("metric.json");

    fs::write(
        &config_path,
        r#"{"metadata": {"name": "requests", "namespace": "web"}, "spec": {"maxAge": "5m"}}"#,
    )
    .expect("write configuration");

    let output = k8s_manifest(&[
        "render",
        "k8s_datadoghq_com_datadog_metric_v1alpha1_manifest",
        "--config",
        config_path.to_str().unwrap(),
        "--state",
    ]);

    assert!(output.status.success(), "{output:?}");

    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["spec"]["maxAge"], "5m");
    assert_eq!(
        state["yaml"],
        "apiVersion: datadoghq.com/v1alpha1\nkind: DatadogMetric\nmetadata:\n  name: requests\n  namespace: web\nspec:\n  maxAge: 5m\n"
    );
}

#[test]
fn invalid_metadata_fails() {
    let temp_dir = tempdir().expect("create temporary directory");
    let config_path = temp_dir.path().join("agent.yaml");

    fs::write(&config_path, "metadata: {name: Invalid_Name, namespace: default}\n")
        .expect("write configuration");

    let output = k8s_manifest(&["render", AGENT, "--config", config_path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("invalid name"),
        "{output:?}"
    );
}

#[test]
fn unknown_data_source_fails() {
    let output = k8s_manifest(&["schema", "k8s_example_com_widget_v1_manifest"]);

    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("unknown data source"),
        "{output:?}"
    );
}

#[test]
fn print_schema() {
    let output = k8s_manifest(&["schema", AGENT]);
    assert!(output.status.success(), "{output:?}");

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["attributes"]["yaml"]["computed"], true);
    assert_eq!(schema["attributes"]["metadata"]["required"], true);
}
