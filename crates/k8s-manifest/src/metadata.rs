//! The `metadata` block shared by every manifest data source.
use std::{collections::BTreeMap, fmt::Display};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use snafu::Snafu;

use crate::{
    kvp::{self, AnnotationError, LabelError, annotation::TOTAL_ANNOTATION_SIZE_LIMIT_BYTES},
    validation,
};

/// Metadata of a namespaced custom resource.
///
/// Only the fields a user may set on a new object are supported. Fields are
/// serialized in declaration order, unset maps are skipped.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ObjectMetadata {
    /// Unique identifier for this object within its namespace. Must be a
    /// lowercase RFC 1123 subdomain.
    pub name: String,

    /// Namespace the object is placed in. Must be a lowercase RFC 1123 label.
    pub namespace: String,

    /// Map of string keys and values that can be used to organize and
    /// categorize (scope and select) objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    /// Unstructured key value map stored with a resource that may be set by
    /// external tools to store and retrieve arbitrary metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

#[derive(Debug, PartialEq, Snafu)]
pub enum MetadataError {
    #[snafu(display("invalid name {name:?}: {errors}"))]
    InvalidName {
        name: String,
        errors: validation::Errors,
    },

    #[snafu(display("invalid namespace {namespace:?}: {errors}"))]
    InvalidNamespace {
        namespace: String,
        errors: validation::Errors,
    },

    #[snafu(display("invalid label"))]
    InvalidLabel { source: LabelError },

    #[snafu(display("invalid annotation"))]
    InvalidAnnotation { source: AnnotationError },

    #[snafu(display(
        "annotations are {size} bytes in total but must be no more than {TOTAL_ANNOTATION_SIZE_LIMIT_BYTES}"
    ))]
    AnnotationsTooLarge { size: usize },
}

/// Every problem found in a single [`ObjectMetadata`].
#[derive(Debug, PartialEq)]
pub struct MetadataErrors(Vec<MetadataError>);

impl MetadataErrors {
    pub fn iter(&self) -> impl Iterator<Item = &MetadataError> {
        self.0.iter()
    }
}

impl Display for MetadataErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{}", snafu::Report::from_error(error))?;
        }
        Ok(())
    }
}

impl std::error::Error for MetadataErrors {}

impl ObjectMetadata {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_annotations(mut self, annotations: BTreeMap<String, String>) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Checks name, namespace, labels and annotations against the rules the
    /// API server applies, collecting every violation.
    pub fn validate(&self) -> Result<(), MetadataErrors> {
        let mut errors = Vec::new();

        if let Err(name_errors) = validation::validate_object_name(&self.name) {
            errors.push(MetadataError::InvalidName {
                name: self.name.clone(),
                errors: name_errors,
            });
        }

        if let Err(namespace_errors) = validation::validate_namespace_name(&self.namespace) {
            errors.push(MetadataError::InvalidNamespace {
                namespace: self.namespace.clone(),
                errors: namespace_errors,
            });
        }

        if let Some(labels) = &self.labels {
            if let Err(label_errors) = kvp::parse_all::<kvp::LabelValue>(labels) {
                errors.extend(
                    label_errors
                        .into_iter()
                        .map(|source| MetadataError::InvalidLabel { source }),
                );
            }
        }

        if let Some(annotations) = &self.annotations {
            if let Err(annotation_errors) = kvp::parse_all::<kvp::AnnotationValue>(annotations) {
                errors.extend(
                    annotation_errors
                        .into_iter()
                        .map(|source| MetadataError::InvalidAnnotation { source }),
                );
            }

            let size = kvp::annotation::total_size(annotations);
            if size > TOTAL_ANNOTATION_SIZE_LIMIT_BYTES {
                errors.push(MetadataError::AnnotationsTooLarge { size });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MetadataErrors(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn valid_metadata() {
        let metadata = ObjectMetadata::new("datadog-agent", "datadog")
            .with_labels(BTreeMap::from([(
                "app.kubernetes.io/name".to_owned(),
                "datadog-agent".to_owned(),
            )]))
            .with_annotations(BTreeMap::from([(
                "ad.datadoghq.com/tags".to_owned(),
                r#"{"team": "observability"}"#.to_owned(),
            )]));

        metadata.validate().expect("metadata must be valid");
    }

    #[rstest]
    #[case("", "default")]
    #[case("Datadog", "default")]
    #[case("dd", "")]
    #[case("dd", "my.namespace")]
    fn invalid_name_or_namespace(#[case] name: &str, #[case] namespace: &str) {
        let errors = ObjectMetadata::new(name, namespace).validate().unwrap_err();
        assert_eq!(errors.iter().count(), 1);
    }

    #[test]
    fn all_problems_are_reported() {
        let metadata = ObjectMetadata::new("Bad_Name", "Bad_Namespace")
            .with_labels(BTreeMap::from([("a/b/c".to_owned(), "x".to_owned())]))
            .with_annotations(BTreeMap::from([("-invalid".to_owned(), String::new())]));

        let errors = metadata.validate().unwrap_err();
        let errors = errors.iter().collect::<Vec<_>>();

        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], MetadataError::InvalidName { .. }));
        assert!(matches!(errors[1], MetadataError::InvalidNamespace { .. }));
        assert!(matches!(errors[2], MetadataError::InvalidLabel { .. }));
        assert!(matches!(errors[3], MetadataError::InvalidAnnotation { .. }));
    }

    #[test]
    fn oversized_annotations() {
        let metadata = ObjectMetadata::new("dd", "default").with_annotations(BTreeMap::from([(
            "config".to_owned(),
            "x".repeat(TOTAL_ANNOTATION_SIZE_LIMIT_BYTES),
        )]));

        let errors = metadata.validate().unwrap_err();
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            vec![&MetadataError::AnnotationsTooLarge {
                size: TOTAL_ANNOTATION_SIZE_LIMIT_BYTES + 6
            }]
        );
    }

    #[test]
    fn error_display_includes_cause() {
        let metadata = ObjectMetadata::new("dd", "default")
            .with_labels(BTreeMap::from([("team".to_owned(), "a b".to_owned())]));

        let message = metadata.validate().unwrap_err().to_string();
        assert!(message.contains("invalid label"), "{message}");
        assert!(message.contains("violates kubernetes format"), "{message}");
    }
}
