//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays free for command output and the console
//! gateway. JSON is the default: one object per event carrying level,
//! timestamp, target, source location and thread id, plus the fields of the
//! root span (`application = "objeggtives"`).

use egg_config::{LogFormat, LoggingConfig};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::GlobalFlags;

/// Environment variable holding an `EnvFilter` directive that overrides
/// every other level setting.
pub const LOG_ENV: &str = "EGG_LOG";

/// Value of the `application` field on the root span.
pub const APPLICATION: &str = "objeggtives";

/// Install the global subscriber.
pub fn init_tracing(config: &LoggingConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let level = flags.forced_log_level().unwrap_or(config.level.as_str());
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing::subscriber::set_global_default(build_subscriber(
        filter,
        config.format,
        std::io::stderr,
    ))
    .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

/// Root span every command runs inside.
pub fn root_span() -> tracing::Span {
    tracing::info_span!("objeggtives", application = APPLICATION)
}

pub fn build_subscriber<W>(
    filter: EnvFilter,
    format: LogFormat,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => Box::new(
            registry.with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_thread_ids(true)
                    .with_writer(writer),
            ),
        ),
        LogFormat::Pretty => Box::new(
            registry.with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(writer),
            ),
        ),
    }
}
