//! Read-only data sources rendering custom resource manifests.
//!
//! A custom resource type only has to implement [`CustomResourceManifest`],
//! which names its group/version/kind and spec type. [`ManifestDataSource`]
//! turns that into a [`DataSource`], the object-safe interface the
//! [`Registry`](crate::registry::Registry) hands out.
use std::{collections::BTreeMap, fmt::Debug, marker::PhantomData};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use snafu::{OptionExt, ResultExt, Snafu};
use tracing::{debug, instrument};

use crate::{
    gvk::{GroupVersionKind, GroupVersionKindError},
    manifest,
    metadata::{MetadataErrors, ObjectMetadata},
    schema::{self, Attribute, AttributeType, DataSourceSchema},
};

/// Name of the computed attribute holding the rendered manifest.
pub const YAML_ATTRIBUTE: &str = "yaml";

/// Top-level keys accepted in a configuration but never decoded. The manifest
/// takes `apiVersion` and `kind` from the data source, and `yaml` is computed.
pub const IGNORED_ATTRIBUTES: [&str; 3] = ["apiVersion", "kind", YAML_ATTRIBUTE];

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("invalid group/version/kind for {kind} data source"))]
    InvalidGroupVersionKind {
        source: GroupVersionKindError,
        kind: &'static str,
    },

    #[snafu(display("configuration of {type_name} must be an object"))]
    ConfigNotAnObject { type_name: String },

    #[snafu(display("failed to decode configuration of {type_name}"))]
    DecodeConfig {
        source: serde_json::Error,
        type_name: String,
    },

    #[snafu(display("invalid metadata in configuration of {type_name}"))]
    InvalidMetadata {
        source: MetadataErrors,
        type_name: String,
    },

    #[snafu(display("failed to render manifest of {type_name}"))]
    RenderManifest {
        source: manifest::Error,
        type_name: String,
    },

    #[snafu(display("failed to build schema of {type_name}"))]
    BuildSchema {
        source: schema::Error,
        type_name: String,
    },
}

/// Describes one version of one custom resource type.
///
/// The constants are fixed at compile time and are the only source of the
/// manifest's `apiVersion` and `kind`.
pub trait CustomResourceManifest: 'static {
    const GROUP: &'static str;
    const VERSION: &'static str;
    const KIND: &'static str;

    /// Human readable description used in the data source schema.
    const DESCRIPTION: &'static str;

    /// The typed `spec` tree of the resource. Its [`Default`] value is the
    /// spec without any field set.
    type Spec: Serialize + DeserializeOwned + JsonSchema + Default + PartialEq + Debug + Send + Sync;
}

/// The user supplied configuration of a manifest data source.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ManifestConfig<S> {
    /// Data that helps uniquely identify the object.
    pub metadata: ObjectMetadata,

    /// Desired state of the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

/// The interface every registered data source implements.
pub trait DataSource: Debug + Send + Sync {
    /// The unique type name, for example
    /// `k8s_datadoghq_com_datadog_agent_v2alpha1_manifest`.
    fn type_name(&self) -> &str;

    fn gvk(&self) -> &GroupVersionKind;

    fn schema(&self) -> Result<DataSourceSchema>;

    /// Checks `config` without rendering anything.
    fn validate(&self, config: &Value) -> Result<()>;

    /// Renders the manifest and returns the new state: `config` with the
    /// computed `yaml` attribute set.
    fn read(&self, config: &Value) -> Result<Value>;
}

/// The [`DataSource`] of a [`CustomResourceManifest`].
pub struct ManifestDataSource<R> {
    gvk: GroupVersionKind,
    type_name: String,
    resource: PhantomData<fn() -> R>,
}

impl<R> Debug for ManifestDataSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestDataSource")
            .field("gvk", &self.gvk)
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl<R> ManifestDataSource<R>
where
    R: CustomResourceManifest,
{
    pub fn new() -> Result<Self> {
        let gvk = GroupVersionKind::try_new(R::GROUP, R::VERSION, R::KIND)
            .context(InvalidGroupVersionKindSnafu { kind: R::KIND })?;

        Ok(Self {
            type_name: gvk.type_name(),
            gvk,
            resource: PhantomData,
        })
    }

    /// Decodes the untyped configuration into the typed tree.
    ///
    /// Keys in [`IGNORED_ATTRIBUTES`] are skipped at the top level, any other
    /// key the typed tree doesn't know is an error.
    pub fn decode(&self, config: &Value) -> Result<ManifestConfig<R::Spec>> {
        let decoded = match config {
            Value::Object(attributes) => {
                let attributes = attributes
                    .iter()
                    .filter(|(key, _)| !IGNORED_ATTRIBUTES.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect::<Map<_, _>>();

                ManifestConfig::deserialize(Value::Object(attributes))
            }
            other => ManifestConfig::deserialize(other),
        };

        decoded.context(DecodeConfigSnafu {
            type_name: &self.type_name,
        })
    }

    /// Validates and projects a typed configuration into its YAML manifest.
    pub fn render(&self, config: &ManifestConfig<R::Spec>) -> Result<String> {
        config
            .metadata
            .validate()
            .context(InvalidMetadataSnafu {
                type_name: &self.type_name,
            })?;

        let empty = R::Spec::default();
        let spec = config.spec.as_ref().filter(|spec| **spec != empty);

        manifest::project(&self.gvk, &config.metadata, spec).context(RenderManifestSnafu {
            type_name: &self.type_name,
        })
    }
}

impl<R> DataSource for ManifestDataSource<R>
where
    R: CustomResourceManifest,
{
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    fn schema(&self) -> Result<DataSourceSchema> {
        let mut attributes: BTreeMap<String, Attribute> =
            schema::attributes_for::<ManifestConfig<R::Spec>>().context(BuildSchemaSnafu {
                type_name: &self.type_name,
            })?;

        attributes.insert(
            YAML_ATTRIBUTE.to_owned(),
            Attribute::computed(AttributeType::String, "The generated manifest in YAML format."),
        );

        Ok(DataSourceSchema {
            description: R::DESCRIPTION.to_owned(),
            attributes,
        })
    }

    fn validate(&self, config: &Value) -> Result<()> {
        let config = self.decode(config)?;
        config.metadata.validate().context(InvalidMetadataSnafu {
            type_name: &self.type_name,
        })
    }

    #[instrument(skip_all, fields(data_source = %self.type_name))]
    fn read(&self, config: &Value) -> Result<Value> {
        let mut state = config
            .as_object()
            .cloned()
            .context(ConfigNotAnObjectSnafu {
                type_name: &self.type_name,
            })?;

        let typed = self.decode(config)?;
        let yaml = self.render(&typed)?;
        debug!(
            name = %typed.metadata.name,
            namespace = %typed.metadata.namespace,
            bytes = yaml.len(),
            "rendered manifest"
        );

        state.insert(YAML_ATTRIBUTE.to_owned(), Value::String(yaml));
        Ok(Value::Object(state))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use serde_json::json;

    use super::*;

    #[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
    #[serde(deny_unknown_fields, rename_all = "camelCase")]
    struct WidgetSpec {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<i64>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    }

    struct Widget;

    impl CustomResourceManifest for Widget {
        type Spec = WidgetSpec;

        const DESCRIPTION: &'static str = "Widgets.";
        const GROUP: &'static str = "example.com";
        const KIND: &'static str = "Widget";
        const VERSION: &'static str = "v1beta1";
    }

    fn data_source() -> ManifestDataSource<Widget> {
        ManifestDataSource::new().unwrap()
    }

    #[test]
    fn type_name_is_derived_from_gvk() {
        assert_eq!(
            data_source().type_name(),
            "k8s_example_com_widget_v1beta1_manifest"
        );
    }

    #[test]
    fn read_sets_yaml_and_keeps_config() {
        let config = json!({
            "metadata": { "name": "small", "namespace": "default" },
            "spec": { "size": 3, "color": null },
        });

        let state = data_source().read(&config).unwrap();

        assert_eq!(state["metadata"], config["metadata"]);
        assert_eq!(state["spec"], config["spec"]);
        assert_eq!(
            state[YAML_ATTRIBUTE],
            indoc! {"
                apiVersion: example.com/v1beta1
                kind: Widget
                metadata:
                  name: small
                  namespace: default
                spec:
                  size: 3
            "}
        );
    }

    #[test]
    fn empty_and_null_spec_are_omitted() {
        for spec in [json!({}), Value::Null, json!({ "size": null })] {
            let config = json!({
                "metadata": { "name": "small", "namespace": "default" },
                "spec": spec,
            });

            let state = data_source().read(&config).unwrap();
            let yaml = state[YAML_ATTRIBUTE].as_str().unwrap();
            assert!(!yaml.contains("spec"), "{yaml}");
        }
    }

    #[test]
    fn constants_cannot_be_overridden() {
        let config = json!({
            "apiVersion": "evil.example.com/v1",
            "kind": "Gadget",
            "metadata": { "name": "small", "namespace": "default" },
        });

        let state = data_source().read(&config).unwrap();
        let yaml = state[YAML_ATTRIBUTE].as_str().unwrap();

        assert!(yaml.starts_with("apiVersion: example.com/v1beta1\nkind: Widget\n"));
    }

    #[test]
    fn invalid_metadata_is_rejected() {
        let config = json!({
            "metadata": { "name": "Small", "namespace": "default" },
        });

        let err = data_source().read(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidMetadata { .. }));
        assert!(matches!(data_source().validate(&config), Err(Error::InvalidMetadata { .. })));
    }

    #[test]
    fn wrong_types_fail_to_decode() {
        let config = json!({
            "metadata": { "name": "small", "namespace": "default" },
            "spec": { "size": "three" },
        });

        let err = data_source().read(&config).unwrap_err();
        assert!(matches!(err, Error::DecodeConfig { .. }));
    }

    #[test]
    fn missing_namespace_fails_to_decode() {
        let config = json!({ "metadata": { "name": "small" } });

        let err = data_source().validate(&config).unwrap_err();
        assert!(matches!(err, Error::DecodeConfig { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        for config in [
            json!({
                "metadata": { "name": "small", "namespace": "default" },
                "spec": { "colour": "red" },
            }),
            json!({
                "metadata": { "name": "small", "namespace": "default", "lables": {} },
            }),
            json!({
                "metadata": { "name": "small", "namespace": "default" },
                "status": {},
            }),
        ] {
            assert!(matches!(data_source().validate(&config), Err(Error::DecodeConfig { .. })));
            assert!(matches!(data_source().read(&config), Err(Error::DecodeConfig { .. })));
        }
    }

    #[test]
    fn previous_state_can_be_read_again() {
        let config = json!({
            "metadata": { "name": "small", "namespace": "default" },
            "spec": { "size": 3 },
        });

        let state = data_source().read(&config).unwrap();
        let again = data_source().read(&state).unwrap();

        assert_eq!(again, state);
    }

    #[test]
    fn config_must_be_an_object() {
        let err = data_source().read(&json!("small")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotAnObject { .. }));
    }

    #[test]
    fn schema_has_computed_yaml() {
        let schema = data_source().schema().unwrap();

        assert_eq!(schema.description, "Widgets.");
        assert!(schema.attributes["metadata"].required);
        assert!(schema.attributes["spec"].optional);
        assert!(schema.attributes[YAML_ATTRIBUTE].computed);

        let metadata = schema.attributes["metadata"].nested().unwrap();
        assert!(metadata["name"].required);
        assert!(metadata["namespace"].required);
        assert!(metadata["labels"].optional);
    }
}
