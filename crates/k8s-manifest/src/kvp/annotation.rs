//! Kubernetes annotations. Keys follow the same rules as label keys, values
//! can contain **any** valid UTF-8 data. The only limit on values is the
//! combined size of all annotations of one object.
//!
//! See <https://kubernetes.io/docs/concepts/overview/working-with-objects/annotations/>
//! for more information on Kubernetes annotations.
use std::{collections::BTreeMap, convert::Infallible, fmt::Display, ops::Deref, str::FromStr};

use crate::kvp::{KeyValuePair, KeyValuePairError, KeyValuePairs, Value};

/// Upper bound for the sum of all annotation key and value lengths of a
/// single object, as enforced by the API server.
pub const TOTAL_ANNOTATION_SIZE_LIMIT_BYTES: usize = 256 * 1024;

/// A type alias for errors returned when an annotation fails to parse. Only
/// the key can be invalid.
pub type AnnotationError = KeyValuePairError<Infallible>;

/// A validated Kubernetes annotation.
pub type Annotation = KeyValuePair<AnnotationValue>;

/// A validated set of Kubernetes annotations.
pub type Annotations = KeyValuePairs<AnnotationValue>;

/// A Kubernetes annotation value. Parsing never fails.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct AnnotationValue(String);

impl Value for AnnotationValue {
    type Error = Infallible;
}

impl FromStr for AnnotationValue {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self(input.to_owned()))
    }
}

impl Deref for AnnotationValue {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for AnnotationValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the number of bytes the API server counts against
/// [`TOTAL_ANNOTATION_SIZE_LIMIT_BYTES`].
pub fn total_size(annotations: &BTreeMap<String, String>) -> usize {
    annotations
        .iter()
        .map(|(key, value)| key.len() + value.len())
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn total_size_counts_keys_and_values() {
        let annotations = BTreeMap::from([
            ("a".to_owned(), "bc".to_owned()),
            ("de".to_owned(), String::new()),
        ]);

        assert_eq!(total_size(&annotations), 5);
    }
}
