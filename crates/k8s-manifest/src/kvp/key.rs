//! Qualified names, the keys of labels and annotations.
use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use snafu::{ResultExt, Snafu, ensure};

use crate::validation;

pub(crate) const SEGMENT_MAX_LENGTH: usize = 63;

static SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9_.-]*[a-zA-Z0-9])?$")
        .expect("failed to compile name segment regex")
});

/// Violations of the syntax shared by key names and label values.
#[derive(Debug, PartialEq, Snafu)]
pub enum SegmentError {
    #[snafu(display("{length} characters exceed the limit of {SEGMENT_MAX_LENGTH}"))]
    TooLong { length: usize },

    #[snafu(display("contains non-ascii characters"))]
    NotAscii,

    #[snafu(display(
        "violates kubernetes format, must start and end with an alphanumeric character with only '-', '_' or '.' in between"
    ))]
    InvalidFormat,
}

/// Checks a non-empty key name or label value.
pub(crate) fn check_segment(input: &str) -> Result<(), SegmentError> {
    ensure!(
        input.len() <= SEGMENT_MAX_LENGTH,
        TooLongSnafu {
            length: input.len()
        }
    );
    ensure!(input.is_ascii(), NotAsciiSnafu);
    ensure!(SEGMENT_REGEX.is_match(input), InvalidFormatSnafu);

    Ok(())
}

#[derive(Debug, PartialEq, Snafu)]
pub enum KeyError {
    #[snafu(display("key must not be empty"))]
    Empty,

    /// Only one prefix is allowed, `app.kubernetes.io/nested/name` is invalid.
    #[snafu(display("key prefixes cannot be nested, only use a single slash"))]
    NestedPrefix,

    #[snafu(display("invalid key prefix"))]
    InvalidPrefix { source: KeyPrefixError },

    #[snafu(display("name segment of key must not be empty"))]
    EmptyName,

    #[snafu(display("invalid name segment of key"))]
    InvalidName { source: SegmentError },
}

/// The key of a label or annotation, `(<PREFIX>/)<NAME>`.
///
/// Kubernetes calls this a qualified name, see the
/// [label documentation][k8s-labels] for the allowed characters. Input is
/// taken verbatim, surrounding whitespace is an error.
///
/// [k8s-labels]: https://kubernetes.io/docs/concepts/overview/working-with-objects/labels/
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key {
    prefix: Option<KeyPrefix>,
    name: String,
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        ensure!(!input.is_empty(), EmptySnafu);

        let (prefix, name) = match input.split_once('/') {
            Some((prefix, name)) => {
                ensure!(!name.contains('/'), NestedPrefixSnafu);
                let prefix = prefix.parse::<KeyPrefix>().context(InvalidPrefixSnafu)?;
                (Some(prefix), name)
            }
            None => (None, input),
        };

        ensure!(!name.is_empty(), EmptyNameSnafu);
        check_segment(name).context(InvalidNameSnafu)?;

        Ok(Self {
            prefix,
            name: name.to_owned(),
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{prefix}/")?;
        }
        f.write_str(&self.name)
    }
}

impl Key {
    pub fn prefix(&self) -> Option<&KeyPrefix> {
        self.prefix.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, PartialEq, Snafu)]
pub enum KeyPrefixError {
    /// Rejects keys like `/name`.
    #[snafu(display("prefix segment of key must not be empty"))]
    EmptyPrefix,

    #[snafu(display("prefix segment of key violates kubernetes format: {errors}"))]
    PrefixNotSubdomain { errors: validation::Errors },
}

/// The DNS subdomain in front of the slash of a [`Key`], for example
/// `app.kubernetes.io` or `ad.datadoghq.com`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyPrefix(String);

impl FromStr for KeyPrefix {
    type Err = KeyPrefixError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        ensure!(!input.is_empty(), EmptyPrefixSnafu);
        validation::is_rfc_1123_subdomain(input)
            .map_err(|errors| KeyPrefixError::PrefixNotSubdomain { errors })?;

        Ok(Self(input.to_owned()))
    }
}

impl AsRef<str> for KeyPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
