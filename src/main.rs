use anyhow::Context;
use stayhub_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load STAYHUB settings")?;
    stayhub_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        storage = ?settings.storage.backend,
        "stayhub-app bootstrap starting"
    );

    stayhub_app::bootstrap::run(settings).await
}
