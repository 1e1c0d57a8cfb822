//! Tracing bootstrap shared by the server binary and the CLI.

use stayhub_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` wins, otherwise the configured directive.
fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&settings.log_filter)?),
    }
}

/// Install the global tracing subscriber.
///
/// Calling this twice is harmless; the second call leaves the first subscriber
/// in place and returns `Ok(())`.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!(
            target: "stayhub-telemetry",
            format = ?settings.log_format,
            "telemetry initialized"
        );
    }

    Ok(())
}
