//! Strongly-typed and validated group/version/kind triples.
//!
//! Every data source renders exactly one resource type. Its identity is a
//! [`GroupVersionKind`], from which both the manifest's `apiVersion` and the
//! data source type name are derived.
//!
//! ```
//! use k8s_manifest::gvk::GroupVersionKind;
//!
//! let gvk = GroupVersionKind::try_new("datadoghq.com", "v2alpha1", "DatadogAgent")
//!     .expect("valid group/version/kind");
//!
//! assert_eq!(gvk.api_version(), "datadoghq.com/v2alpha1");
//! assert_eq!(gvk.type_name(), "k8s_datadoghq_com_datadog_agent_v2alpha1_manifest");
//! ```
use std::{fmt, num::ParseIntError, ops::Deref, str::FromStr, sync::LazyLock};

use convert_case::{Case, Casing};
use regex::Regex;
use snafu::{OptionExt, ResultExt, Snafu, ensure};

const MAX_GROUP_LENGTH: usize = 253;
const MAX_KIND_LENGTH: usize = 63;

static API_GROUP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:[a-z0-9][a-z0-9-]{0,61}[a-z0-9])\.?)+$")
        .expect("failed to compile API group regex")
});

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v(?P<major>\d+)(?:(?P<level>alpha|beta)(?P<minor>\d+))?$")
        .expect("failed to compile version regex")
});

static KIND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("failed to compile kind regex"));

#[derive(Debug, PartialEq, Snafu)]
pub enum ParseGroupError {
    #[snafu(display("group must not be empty"))]
    EmptyGroup,

    #[snafu(display("group must not be longer than 253 characters"))]
    GroupTooLong,

    #[snafu(display("group must be a valid DNS subdomain"))]
    InvalidGroup,
}

/// A validated, lower case Kubernetes API group, for example `datadoghq.com`.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Group(String);

impl FromStr for Group {
    type Err = ParseGroupError;

    fn from_str(group: &str) -> Result<Self, Self::Err> {
        ensure!(!group.is_empty(), EmptyGroupSnafu);
        ensure!(group.len() <= MAX_GROUP_LENGTH, GroupTooLongSnafu);
        ensure!(API_GROUP_REGEX.is_match(group), InvalidGroupSnafu);

        Ok(Self(group.to_owned()))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl Deref for Group {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, PartialEq, Snafu)]
pub enum ParseVersionError {
    #[snafu(display("invalid version format, expected v<MAJOR>(alpha|beta<MINOR>)"))]
    InvalidVersionFormat,

    #[snafu(display("failed to parse version number"))]
    ParseVersionNumber { source: ParseIntError },
}

/// The stability level of a pre-release version.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Alpha-level minor version, `alpha<VERSION>`.
    Alpha(u64),

    /// Beta-level minor version, `beta<VERSION>`.
    Beta(u64),
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha(alpha) => write!(f, "alpha{alpha}"),
            Self::Beta(beta) => write!(f, "beta{beta}"),
        }
    }
}

/// A Kubernetes resource version with the `v<MAJOR>(beta/alpha<LEVEL>)`
/// format, for example `v1`, `v2beta1` or `v2alpha1`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub level: Option<Level>,
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let captures = VERSION_REGEX
            .captures(input)
            .context(InvalidVersionFormatSnafu)?;

        let major = captures["major"]
            .parse::<u64>()
            .context(ParseVersionNumberSnafu)?;

        let level = match (captures.name("level"), captures.name("minor")) {
            (Some(level), Some(minor)) => {
                let minor = minor
                    .as_str()
                    .parse::<u64>()
                    .context(ParseVersionNumberSnafu)?;

                match level.as_str() {
                    "alpha" => Some(Level::Alpha(minor)),
                    _ => Some(Level::Beta(minor)),
                }
            }
            _ => None,
        };

        Ok(Self { major, level })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.level {
            Some(level) => write!(f, "v{}{}", self.major, level),
            None => write!(f, "v{}", self.major),
        }
    }
}

#[derive(Debug, PartialEq, Snafu)]
pub enum ParseKindError {
    #[snafu(display("kind must not be longer than 63 characters"))]
    KindTooLong,

    #[snafu(display("kind must be an UpperCamelCase alphanumeric identifier"))]
    InvalidKind,
}

/// A validated resource kind, for example `DatadogAgent`.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Kind(String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        ensure!(kind.len() <= MAX_KIND_LENGTH, KindTooLongSnafu);
        ensure!(KIND_REGEX.is_match(kind), InvalidKindSnafu);

        Ok(Self(kind.to_owned()))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl Deref for Kind {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, PartialEq, Snafu)]
pub enum GroupVersionKindError {
    #[snafu(display("failed to parse group {input:?}"))]
    ParseGroup {
        source: ParseGroupError,
        input: String,
    },

    #[snafu(display("failed to parse version {input:?}"))]
    ParseVersion {
        source: ParseVersionError,
        input: String,
    },

    #[snafu(display("failed to parse kind {input:?}"))]
    ParseKind {
        source: ParseKindError,
        input: String,
    },
}

/// The identity of a namespaced custom resource type.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct GroupVersionKind {
    pub group: Group,
    pub version: Version,
    pub kind: Kind,
}

impl GroupVersionKind {
    pub fn try_new(group: &str, version: &str, kind: &str) -> Result<Self, GroupVersionKindError> {
        Ok(Self {
            group: group
                .parse::<Group>()
                .context(ParseGroupSnafu { input: group })?,
            version: version
                .parse::<Version>()
                .context(ParseVersionSnafu { input: version })?,
            kind: kind
                .parse::<Kind>()
                .context(ParseKindSnafu { input: kind })?,
        })
    }

    /// The `<group>/<version>` string written to a manifest's `apiVersion`.
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }

    /// The data source type name, following the
    /// `k8s_<group>_<kind>_<version>_manifest` convention. Dots and dashes in
    /// the group become underscores, the kind is converted to snake case.
    pub fn type_name(&self) -> String {
        let group = self.group.replace(['.', '-'], "_");
        let kind = self.kind.to_string().to_case(Case::Snake);

        format!("k8s_{group}_{kind}_{version}_manifest", version = self.version)
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("v1", Version { major: 1, level: None })]
    #[case("v1beta1", Version { major: 1, level: Some(Level::Beta(1)) })]
    #[case("v2alpha1", Version { major: 2, level: Some(Level::Alpha(1)) })]
    #[case("v1alpha12", Version { major: 1, level: Some(Level::Alpha(12)) })]
    fn valid_version(#[case] input: &str, #[case] expected: Version) {
        let version = Version::from_str(input).expect("valid Kubernetes version");
        assert_eq!(version, expected);
        assert_eq!(version.to_string(), input);
    }

    #[rstest]
    #[case("")]
    #[case("1beta1")]
    #[case("v1gamma1")]
    #[case("v1beta")]
    #[case("V1")]
    fn invalid_version(#[case] input: &str) {
        let err = Version::from_str(input).expect_err("invalid Kubernetes version");
        assert_eq!(err, ParseVersionError::InvalidVersionFormat);
    }

    #[rstest]
    #[case("", ParseGroupError::EmptyGroup)]
    #[case("Datadoghq.com", ParseGroupError::InvalidGroup)]
    #[case("datadoghq_com", ParseGroupError::InvalidGroup)]
    fn invalid_group(#[case] input: &str, #[case] error: ParseGroupError) {
        assert_eq!(Group::from_str(input).unwrap_err(), error);
    }

    #[rstest]
    #[case("datadogAgent")]
    #[case("Datadog-Agent")]
    #[case("")]
    fn invalid_kind(#[case] input: &str) {
        assert_eq!(Kind::from_str(input).unwrap_err(), ParseKindError::InvalidKind);
    }

    #[rstest]
    #[case(
        "datadoghq.com",
        "v2alpha1",
        "DatadogAgent",
        "datadoghq.com/v2alpha1",
        "k8s_datadoghq_com_datadog_agent_v2alpha1_manifest"
    )]
    #[case(
        "datadoghq.com",
        "v1alpha1",
        "DatadogMetric",
        "datadoghq.com/v1alpha1",
        "k8s_datadoghq_com_datadog_metric_v1alpha1_manifest"
    )]
    #[case(
        "cert-manager.io",
        "v1",
        "ClusterIssuer",
        "cert-manager.io/v1",
        "k8s_cert_manager_io_cluster_issuer_v1_manifest"
    )]
    fn derived_names(
        #[case] group: &str,
        #[case] version: &str,
        #[case] kind: &str,
        #[case] api_version: &str,
        #[case] type_name: &str,
    ) {
        let gvk = GroupVersionKind::try_new(group, version, kind).unwrap();

        assert_eq!(gvk.api_version(), api_version);
        assert_eq!(gvk.type_name(), type_name);
    }

    #[test]
    fn try_new_reports_offending_input() {
        let err = GroupVersionKind::try_new("datadoghq.com", "2alpha1", "DatadogAgent")
            .unwrap_err();

        assert_eq!(
            err,
            GroupVersionKindError::ParseVersion {
                source: ParseVersionError::InvalidVersionFormat,
                input: "2alpha1".to_owned()
            }
        );
    }
}
