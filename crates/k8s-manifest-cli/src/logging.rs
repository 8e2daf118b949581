use std::path::PathBuf;

use snafu::{ResultExt, Snafu};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, Registry,
    layer::SubscriberExt as _,
    util::{SubscriberInitExt as _, TryInitError},
};

const MAX_LOG_FILES: usize = 6;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to initialize rolling file appender in {directory}", directory = directory.display()))]
    InitFileAppender {
        source: InitError,
        directory: PathBuf,
    },

    #[snafu(display("failed to install global tracing subscriber"))]
    InitSubscriber { source: TryInitError },
}

/// Initializes `tracing` logging with the filter read from the environment
/// variable `env`, falling back to INFO.
///
/// Logs are written to stderr, stdout is reserved for command output. Setting
/// `{env}_DIRECTORY` to a directory additionally copies them to a daily
/// rotated file in that directory.
pub fn initialize_logging(env: &str, app_name: &str) -> Result<(), Error> {
    let directory = std::env::var_os(format!("{env}_DIRECTORY")).map(PathBuf::from);

    let file_layer = match &directory {
        Some(directory) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(app_name)
                .filename_suffix("log")
                .max_log_files(MAX_LOG_FILES)
                .build(directory)
                .context(InitFileAppenderSnafu { directory })?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(appender)
                    .boxed(),
            )
        }
        None => None,
    };

    let filter = EnvFilter::try_from_env(env)
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context(InitSubscriberSnafu)?;

    match directory {
        Some(directory) => tracing::info!(directory = %directory.display(), "file logging enabled"),
        None => tracing::debug!("file logging disabled, no log directory set"),
    }

    Ok(())
}
