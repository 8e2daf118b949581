//! Kubernetes naming rules for object names and namespaces.
//!
//! These checks run before a manifest is rendered, so that a data source
//! rejects input the API server would refuse anyway. The patterns follow
//! `apimachinery/pkg/util/validation` of Kubernetes.
use std::{fmt, sync::LazyLock};

use const_format::concatcp;
use regex::Regex;
use snafu::Snafu;

const LABEL_PATTERN: &str = "[a-z0-9]([-a-z0-9]*[a-z0-9])?";
const SUBDOMAIN_PATTERN: &str = concatcp!(LABEL_PATTERN, r"(\.", LABEL_PATTERN, ")*");

static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concatcp!("^", LABEL_PATTERN, "$")).expect("failed to compile RFC 1123 label regex")
});

static SUBDOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concatcp!("^", SUBDOMAIN_PATTERN, "$"))
        .expect("failed to compile RFC 1123 subdomain regex")
});

/// A lowercase DNS label: at most 63 characters, used for namespaces.
static RFC_1123_LABEL: NamingRule = NamingRule {
    name: "lowercase RFC 1123 label",
    max_length: 63,
    pattern: LABEL_PATTERN,
    regex: &LABEL_REGEX,
    allowed: "lower case alphanumeric characters or '-'",
    example: "kube-system",
};

/// A lowercase DNS subdomain: dot separated labels, at most 253 characters,
/// used for the names of most resources.
static RFC_1123_SUBDOMAIN: NamingRule = NamingRule {
    name: "lowercase RFC 1123 subdomain",
    max_length: 253,
    pattern: SUBDOMAIN_PATTERN,
    regex: &SUBDOMAIN_REGEX,
    allowed: "lower case alphanumeric characters, '-' or '.'",
    example: "agent.datadoghq.com",
};

type Result<T = (), E = Errors> = std::result::Result<T, E>;

/// Every rule a value violated.
#[derive(Debug, PartialEq)]
pub struct Errors(Vec<Error>);

impl Errors {
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.0.iter()
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.0.iter().map(ToString::to_string).collect::<Vec<_>>();
        f.write_str(&messages.join(", "))
    }
}

impl std::error::Error for Errors {}

#[derive(Debug, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("input must not be empty"))]
    Empty,

    #[snafu(display("input is {length} bytes long but a {rule} must be no more than {max_length}"))]
    TooLong {
        rule: &'static str,
        length: usize,
        max_length: usize,
    },

    #[snafu(display(
        "a {rule} must consist of {allowed}, and must start and end with an alphanumeric character (e.g. {example:?}, regex used for validation is {pattern:?})"
    ))]
    InvalidFormat {
        rule: &'static str,
        allowed: &'static str,
        example: &'static str,
        pattern: &'static str,
    },
}

struct NamingRule {
    name: &'static str,
    max_length: usize,
    pattern: &'static str,
    regex: &'static LazyLock<Regex>,
    allowed: &'static str,
    example: &'static str,
}

impl NamingRule {
    /// An empty value only reports [`Error::Empty`]. Otherwise the length
    /// and the format are both checked and all violations are returned.
    fn check(&self, value: &str) -> Result {
        if value.is_empty() {
            return Err(Errors(vec![Error::Empty]));
        }

        let mut errors = Vec::new();

        if value.len() > self.max_length {
            errors.push(Error::TooLong {
                rule: self.name,
                length: value.len(),
                max_length: self.max_length,
            });
        }

        if !self.regex.is_match(value) {
            errors.push(Error::InvalidFormat {
                rule: self.name,
                allowed: self.allowed,
                example: self.example,
                pattern: self.pattern,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Errors(errors))
        }
    }
}

/// Tests for a string that conforms to the definition of a subdomain in DNS (RFC 1123).
pub fn is_rfc_1123_subdomain(value: &str) -> Result {
    RFC_1123_SUBDOMAIN.check(value)
}

/// Tests for a string that conforms to the definition of a label in DNS (RFC 1123).
pub fn is_rfc_1123_label(value: &str) -> Result {
    RFC_1123_LABEL.check(value)
}

/// Validates `metadata.name`. Custom resources accept any RFC 1123 subdomain.
pub fn validate_object_name(name: &str) -> Result {
    is_rfc_1123_subdomain(name)
}

/// Validates `metadata.namespace`, which must be an RFC 1123 label.
pub fn validate_namespace_name(name: &str) -> Result {
    is_rfc_1123_label(name)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("a-")]
    #[case("-a")]
    #[case("a_b")]
    #[case("a.")]
    #[case(".a")]
    #[case("a..b")]
    #[case("a b")]
    #[case("aBc")]
    #[case("a:b")]
    #[case(&"a".repeat(254))]
    fn invalid_subdomain(#[case] value: &str) {
        assert!(is_rfc_1123_subdomain(value).is_err());
    }

    #[rstest]
    #[case("a")]
    #[case("dd")]
    #[case("datadog-agent")]
    #[case("0")]
    #[case("a.b.c.d.e")]
    #[case("agent.datadoghq.com")]
    #[case(&"a".repeat(253))]
    fn valid_subdomain(#[case] value: &str) {
        assert!(is_rfc_1123_subdomain(value).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("a.b")]
    #[case("Default")]
    #[case("a-")]
    #[case(&"a".repeat(64))]
    fn invalid_label(#[case] value: &str) {
        assert!(is_rfc_1123_label(value).is_err());
    }

    #[rstest]
    #[case("default")]
    #[case("kube-system")]
    #[case("123-abc")]
    #[case(&"a".repeat(63))]
    fn valid_label(#[case] value: &str) {
        assert!(is_rfc_1123_label(value).is_ok());
    }

    #[test]
    fn empty_input_reports_single_error() {
        let errors = validate_object_name("").unwrap_err();
        assert_eq!(errors, Errors(vec![Error::Empty]));
    }

    #[test]
    fn length_and_format_are_both_reported() {
        let value = format!("{}-", "a".repeat(253));
        let errors = validate_object_name(&value).unwrap_err();

        assert_eq!(errors.iter().count(), 2);
        assert!(
            errors
                .to_string()
                .starts_with("input is 254 bytes long but a lowercase RFC 1123 subdomain")
        );
    }
}
