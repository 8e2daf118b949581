//! Renders custom resource manifests from local configuration files, using
//! the same data sources a host would use.
use std::{
    fs,
    io::{self, Read as _, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use k8s_manifest::{Registry, data_source, data_source::YAML_ATTRIBUTE, registry};
use serde_json::Value;
use snafu::{OptionExt, ResultExt, Snafu};

mod logging;

const APP_NAME: &str = "k8s-manifest";
const LOG_ENV: &str = "K8S_MANIFEST_LOG";

/// Reads the configuration from stdin instead of a file.
const STDIN: &str = "-";

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to initialize logging"))]
    InitializeLogging { source: logging::Error },

    #[snafu(display("failed to build data source registry"))]
    BuildRegistry { source: registry::Error },

    #[snafu(display("failed to look up data source"))]
    LookUpDataSource { source: registry::Error },

    #[snafu(display("failed to build schema of {type_name:?}"))]
    BuildSchema {
        source: data_source::Error,
        type_name: String,
    },

    #[snafu(display("failed to read configuration from {path}", path = path.display()))]
    ReadConfig { source: io::Error, path: PathBuf },

    #[snafu(display("failed to parse configuration from {path}", path = path.display()))]
    ParseConfig {
        source: serde_yaml::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to render manifest"))]
    RenderManifest { source: registry::Error },

    #[snafu(display("rendered state of {type_name:?} has no {YAML_ATTRIBUTE} attribute"))]
    MissingManifest { type_name: String },

    #[snafu(display("failed to serialize output as JSON"))]
    SerializeOutput { source: serde_json::Error },

    #[snafu(display("failed to write output"))]
    WriteOutput { source: io::Error },
}

#[derive(Debug, Parser)]
#[command(name = APP_NAME, version, about)]
struct Cli {
    /// File the output is written to. Defaults to stdout.
    #[arg(long, short = 'o', value_name = "FILE", global = true, env = "K8S_MANIFEST_OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lists the type names of all data sources.
    List,

    /// Prints the attribute schema of a data source as JSON.
    Schema {
        /// Type name of the data source.
        type_name: String,
    },

    /// Renders the manifest of a data source from a configuration file.
    Render {
        /// Type name of the data source.
        type_name: String,

        /// YAML or JSON file containing `metadata` and `spec`, `-` for stdin.
        #[arg(long, short = 'c', value_name = "FILE", env = "K8S_MANIFEST_CONFIG")]
        config: PathBuf,

        /// Prints the complete data source state as JSON instead of only the
        /// manifest.
        #[arg(long)]
        state: bool,
    },
}

#[snafu::report]
fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    logging::initialize_logging(LOG_ENV, APP_NAME).context(InitializeLoggingSnafu)?;

    let registry = Registry::builtin().context(BuildRegistrySnafu)?;
    tracing::debug!(data_sources = registry.len(), "built data source registry");

    let output = match cli.command {
        Command::List => registry
            .type_names()
            .map(|type_name| format!("{type_name}\n"))
            .collect::<String>(),
        Command::Schema { type_name } => {
            let schema = registry
                .get(&type_name)
                .context(LookUpDataSourceSnafu)?
                .schema()
                .context(BuildSchemaSnafu { type_name })?;

            let mut json = serde_json::to_string_pretty(&schema).context(SerializeOutputSnafu)?;
            json.push('\n');
            json
        }
        Command::Render {
            type_name,
            config,
            state,
        } => {
            let config = read_config(&config)?;
            let state_value = registry
                .read(&type_name, &config)
                .context(RenderManifestSnafu)?;

            if state {
                let mut json =
                    serde_json::to_string_pretty(&state_value).context(SerializeOutputSnafu)?;
                json.push('\n');
                json
            } else {
                state_value
                    .get(YAML_ATTRIBUTE)
                    .and_then(Value::as_str)
                    .context(MissingManifestSnafu { type_name })?
                    .to_owned()
            }
        }
    };

    write_output(cli.output.as_deref(), &output)
}

/// Reads a configuration file. YAML is a superset of JSON, so both formats
/// go through the YAML parser.
fn read_config(path: &Path) -> Result<Value, Error> {
    let contents = if path == Path::new(STDIN) {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .context(ReadConfigSnafu { path })?;
        contents
    } else {
        fs::read_to_string(path).context(ReadConfigSnafu { path })?
    };

    tracing::debug!(path = %path.display(), bytes = contents.len(), "read configuration");
    serde_yaml::from_str(&contents).context(ParseConfigSnafu { path })
}

fn write_output(path: Option<&Path>, output: &str) -> Result<(), Error> {
    match path {
        Some(path) => {
            fs::write(path, output).context(WriteOutputSnafu)?;
            tracing::info!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => io::stdout()
            .lock()
            .write_all(output.as_bytes())
            .context(WriteOutputSnafu),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_arguments() {
        let cli = Cli::try_parse_from([
            APP_NAME,
            "render",
            "k8s_datadoghq_com_datadog_agent_v2alpha1_manifest",
            "--config",
            "agent.yaml",
            "--output",
            "agent.manifest.yaml",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(PathBuf::from("agent.manifest.yaml")));
        match cli.command {
            Command::Render {
                type_name,
                config,
                state,
            } => {
                assert_eq!(type_name, "k8s_datadoghq_com_datadog_agent_v2alpha1_manifest");
                assert_eq!(config, PathBuf::from("agent.yaml"));
                assert!(!state);
            }
            command => panic!("unexpected command {command:?}"),
        }
    }
}
