//! Projection of a typed configuration tree into a Kubernetes manifest.
//!
//! The projector is a pure function: it injects the constant `apiVersion`
//! and `kind`, then serializes the metadata and spec as YAML. Unset fields
//! are never emitted, field order follows the declaration order of the
//! typed tree and maps are sorted by key, which keeps the output byte for
//! byte stable across runs.
use serde::Serialize;
use snafu::{ResultExt, Snafu};

use crate::{gvk::GroupVersionKind, metadata::ObjectMetadata};

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to serialize {kind} manifest as YAML"))]
    SerializeManifest {
        source: serde_yaml::Error,
        kind: String,
    },
}

/// The serialized shape of a manifest.
///
/// A `spec` of [`None`] is skipped entirely, callers pass [`None`] for a spec
/// without any field set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest<'a, S> {
    pub api_version: String,
    pub kind: &'a str,
    pub metadata: &'a ObjectMetadata,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<&'a S>,
}

impl<'a, S> Manifest<'a, S>
where
    S: Serialize,
{
    pub fn new(gvk: &'a GroupVersionKind, metadata: &'a ObjectMetadata, spec: Option<&'a S>) -> Self {
        Self {
            api_version: gvk.api_version(),
            kind: &gvk.kind,
            metadata,
            spec,
        }
    }

    /// Renders the manifest as a YAML document without a leading `---`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context(SerializeManifestSnafu { kind: self.kind })
    }
}

/// Projects `metadata` and `spec` into the YAML manifest of `gvk`.
///
/// Either the complete document is returned, or an error and no output.
///
/// ```
/// use k8s_manifest::{gvk::GroupVersionKind, manifest, metadata::ObjectMetadata};
///
/// let gvk = GroupVersionKind::try_new("datadoghq.com", "v2alpha1", "DatadogAgent").unwrap();
/// let metadata = ObjectMetadata::new("dd", "default");
///
/// let yaml = manifest::project::<()>(&gvk, &metadata, None).unwrap();
/// assert_eq!(
///     yaml,
///     "apiVersion: datadoghq.com/v2alpha1\nkind: DatadogAgent\nmetadata:\n  name: dd\n  namespace: default\n"
/// );
/// ```
pub fn project<S>(
    gvk: &GroupVersionKind,
    metadata: &ObjectMetadata,
    spec: Option<&S>,
) -> Result<String>
where
    S: Serialize,
{
    Manifest::new(gvk, metadata, spec).to_yaml()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use indoc::indoc;
    use serde::ser::{self, Serializer};

    use super::*;

    fn gvk() -> GroupVersionKind {
        GroupVersionKind::try_new("datadoghq.com", "v2alpha1", "DatadogAgent").unwrap()
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct ExampleSpec {
        #[serde(skip_serializing_if = "Option::is_none")]
        cluster_name: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        replicas: Option<i64>,

        #[serde(skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,
    }

    struct Unrepresentable;

    impl Serialize for Unrepresentable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(ser::Error::custom("value has no YAML representation"))
        }
    }

    #[test]
    fn minimal_manifest() {
        let metadata = ObjectMetadata::new("dd", "default");
        let yaml = project::<ExampleSpec>(&gvk(), &metadata, None).unwrap();

        assert_eq!(
            yaml,
            indoc! {"
                apiVersion: datadoghq.com/v2alpha1
                kind: DatadogAgent
                metadata:
                  name: dd
                  namespace: default
            "}
        );
    }

    #[test]
    fn unset_fields_are_omitted() {
        let metadata = ObjectMetadata::new("dd", "default");
        let spec = ExampleSpec {
            cluster_name: Some("production".to_owned()),
            replicas: None,
            tags: None,
        };

        let yaml = project(&gvk(), &metadata, Some(&spec)).unwrap();

        assert_eq!(
            yaml,
            indoc! {"
                apiVersion: datadoghq.com/v2alpha1
                kind: DatadogAgent
                metadata:
                  name: dd
                  namespace: default
                spec:
                  clusterName: production
            "}
        );
    }

    #[test]
    fn labels_and_annotations_follow_namespace() {
        let metadata = ObjectMetadata::new("dd", "default")
            .with_labels(BTreeMap::from([
                ("b".to_owned(), "2".to_owned()),
                ("a".to_owned(), "1".to_owned()),
            ]))
            .with_annotations(BTreeMap::from([("note".to_owned(), "hello".to_owned())]));

        let yaml = project::<ExampleSpec>(&gvk(), &metadata, None).unwrap();

        assert_eq!(
            yaml,
            indoc! {"
                apiVersion: datadoghq.com/v2alpha1
                kind: DatadogAgent
                metadata:
                  name: dd
                  namespace: default
                  labels:
                    a: '1'
                    b: '2'
                  annotations:
                    note: hello
            "}
        );
    }

    #[test]
    fn projection_is_deterministic() {
        let metadata = ObjectMetadata::new("dd", "default").with_labels(BTreeMap::from([
            ("z".to_owned(), "last".to_owned()),
            ("a".to_owned(), "first".to_owned()),
        ]));
        let spec = ExampleSpec {
            cluster_name: Some("production".to_owned()),
            replicas: Some(3),
            tags: Some(vec!["env:prod".to_owned(), "team:sre".to_owned()]),
        };

        let first = project(&gvk(), &metadata, Some(&spec)).unwrap();
        let second = project(&gvk(), &metadata, Some(&spec)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn serialization_failure_produces_no_output() {
        let metadata = ObjectMetadata::new("dd", "default");

        let err = project(&gvk(), &metadata, Some(&Unrepresentable)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to serialize DatadogAgent manifest as YAML"
        );
    }
}
