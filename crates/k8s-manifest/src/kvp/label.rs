//! Kubernetes labels. Keys follow the qualified name rules in [`Key`], values
//! use the syntax of a key name or are empty.
//!
//! See <https://kubernetes.io/docs/concepts/overview/working-with-objects/labels/>
//! for more information on Kubernetes labels.
use std::{fmt, ops::Deref, str::FromStr};

#[cfg(doc)]
use crate::kvp::Key;
use crate::kvp::{KeyValuePair, KeyValuePairError, KeyValuePairs, SegmentError, Value, key};

/// Label values share their rules with the name segment of a key.
pub type LabelValueError = SegmentError;

pub type LabelError = KeyValuePairError<LabelValueError>;

/// A validated Kubernetes label.
pub type Label = KeyValuePair<LabelValue>;

/// A validated set of Kubernetes labels.
pub type Labels = KeyValuePairs<LabelValue>;

/// A validated Kubernetes label value.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct LabelValue(String);

impl Value for LabelValue {
    type Error = LabelValueError;
}

impl FromStr for LabelValue {
    type Err = LabelValueError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        // Unlike key names, values may be empty
        if !input.is_empty() {
            key::check_segment(input)?;
        }

        Ok(Self(input.to_owned()))
    }
}

impl Deref for LabelValue {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("a".repeat(64), SegmentError::TooLong { length: 64 })]
    #[case("foo-".to_owned(), SegmentError::InvalidFormat)]
    #[case("a b".to_owned(), SegmentError::InvalidFormat)]
    #[case("ä".to_owned(), SegmentError::NotAscii)]
    fn invalid_value(#[case] input: String, #[case] error: LabelValueError) {
        assert_eq!(LabelValue::from_str(&input).unwrap_err(), error);
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("datadog-agent")]
    #[case("v7.50.0")]
    #[case("under_score")]
    fn valid_value(#[case] input: &str) {
        let value = LabelValue::from_str(input).unwrap();
        assert_eq!(&*value, input);
    }
}
