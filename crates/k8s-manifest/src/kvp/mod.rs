//! Validated Kubernetes key/value pairs, like labels and annotations.
//!
//! The manifest itself carries labels and annotations as plain string maps.
//! The types in this module only exist to check those maps before a manifest
//! is rendered.
use std::{collections::BTreeMap, fmt, str::FromStr};

use snafu::{ResultExt, Snafu};

pub mod annotation;
pub mod label;

mod key;

pub use annotation::{Annotation, AnnotationError, AnnotationValue, Annotations};
pub use key::{Key, KeyError, KeyPrefix, KeyPrefixError, SegmentError};
pub use label::{Label, LabelError, LabelValue, LabelValueError, Labels};

/// The value half of a key/value pair.
///
/// Implementors decide how strict the value validation is, see
/// [`LabelValue`] and [`AnnotationValue`].
pub trait Value: FromStr<Err = Self::Error> + Clone + fmt::Display + Eq + Ord {
    type Error: std::error::Error + 'static;
}

#[derive(Debug, PartialEq, Snafu)]
pub enum KeyValuePairError<E>
where
    E: std::error::Error + 'static,
{
    #[snafu(display("failed to parse key {key:?}"))]
    InvalidKey { source: KeyError, key: String },

    #[snafu(display("failed to parse value {value:?} for key {key:?}"))]
    InvalidValue {
        source: E,
        key: String,
        value: String,
    },
}

/// A validated Kubernetes key/value pair.
///
/// ```
/// # use k8s_manifest::kvp::Label;
/// let label = Label::try_from(("app.kubernetes.io/name", "datadog-agent")).unwrap();
/// assert_eq!(label.to_string(), "app.kubernetes.io/name=datadog-agent");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyValuePair<V: Value> {
    pub key: Key,
    pub value: V,
}

impl<V: Value> TryFrom<(&str, &str)> for KeyValuePair<V> {
    type Error = KeyValuePairError<V::Error>;

    fn try_from((raw_key, raw_value): (&str, &str)) -> Result<Self, Self::Error> {
        Ok(Self {
            key: raw_key.parse().context(InvalidKeySnafu { key: raw_key })?,
            value: raw_value.parse().context(InvalidValueSnafu {
                key: raw_key,
                value: raw_value,
            })?,
        })
    }
}

impl<V: Value> fmt::Display for KeyValuePair<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{key}={value}", key = self.key, value = self.value)
    }
}

/// See [`Annotations`] and [`Labels`].
pub type KeyValuePairs<V> = BTreeMap<Key, V>;

/// Parses every entry of `map`. Fails with the errors of *all* entries that
/// did not parse, not just the first one.
///
/// ```
/// # use std::collections::BTreeMap;
/// # use k8s_manifest::kvp::{self, LabelValue};
/// let map = BTreeMap::from([
///     ("app.kubernetes.io/name".to_owned(), "datadog-agent".to_owned()),
///     ("team".to_owned(), "observability".to_owned()),
/// ]);
///
/// let labels = kvp::parse_all::<LabelValue>(&map).unwrap();
/// assert_eq!(labels.len(), 2);
/// ```
pub fn parse_all<V: Value>(
    map: &BTreeMap<String, String>,
) -> Result<KeyValuePairs<V>, Vec<KeyValuePairError<V::Error>>> {
    let (pairs, errors): (Vec<_>, Vec<_>) = map
        .iter()
        .map(|(key, value)| KeyValuePair::<V>::try_from((key.as_str(), value.as_str())))
        .partition(Result::is_ok);

    if errors.is_empty() {
        Ok(pairs
            .into_iter()
            .flatten()
            .map(|pair| (pair.key, pair.value))
            .collect())
    } else {
        Err(errors.into_iter().filter_map(Result::err).collect())
    }
}

#[cfg(test)]
mod test {
    use snafu::Report;

    use super::*;

    #[test]
    fn try_from_tuple() {
        let label = Label::try_from(("app.kubernetes.io/name", "datadog-agent")).unwrap();

        assert_eq!(label.key, Key::from_str("app.kubernetes.io/name").unwrap());
        assert_eq!(&*label.value, "datadog-agent");
        assert_eq!(label.to_string(), "app.kubernetes.io/name=datadog-agent");
    }

    #[test]
    fn parse_all_collects_every_error() {
        let map = BTreeMap::from([
            ("good".to_owned(), "value".to_owned()),
            ("bad/key/nested".to_owned(), "value".to_owned()),
            ("other".to_owned(), "bad value".to_owned()),
        ]);

        let errors = parse_all::<LabelValue>(&map).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            errors[0],
            KeyValuePairError::InvalidKey {
                source: KeyError::NestedPrefix,
                ..
            }
        ));
        assert!(matches!(
            errors[1],
            KeyValuePairError::InvalidValue {
                source: SegmentError::InvalidFormat,
                ..
            }
        ));
    }

    #[test]
    fn annotations_accept_any_value() {
        let map = BTreeMap::from([(
            "ad.datadoghq.com/agent.checks".to_owned(),
            r#"{"foo": "bär baz"}"#.to_owned(),
        )]);

        let annotations = parse_all::<AnnotationValue>(&map).unwrap();
        assert_eq!(annotations.len(), 1);
    }

    #[test]
    fn key_error_report() {
        let err = Label::try_from(("dätadoghq.com/env", "prod")).unwrap_err();
        let report = Report::from_error(err).to_string();
        assert!(report.contains("failed to parse key \"dätadoghq.com/env\""));
    }
}
