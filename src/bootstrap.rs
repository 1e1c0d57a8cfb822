//! Application wiring: build the registry, run the module lifecycle around the
//! HTTP server.

use std::sync::Arc;

use anyhow::{ensure, Context};
use stayhub_authz::TokenService;
use stayhub_kernel::settings::{Environment, Settings};
use stayhub_kernel::{InitCtx, ModuleRegistry};
use stayhub_storage::StorageModule;

use crate::modules;

/// Build the registry with the core storage module and every project module
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let storage = stayhub_storage::from_settings(&settings.storage)
        .with_context(|| "failed to configure object storage")?;
    let tokens = Arc::new(TokenService::from_settings(&settings.auth));

    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(StorageModule::new(storage.clone())));
    modules::register_all(&mut registry, settings, storage, tokens);

    Ok(registry)
}

fn check_production_settings(settings: &Settings) -> anyhow::Result<()> {
    if settings.environment == Environment::Production {
        ensure!(
            !settings.auth.uses_default_secret(),
            "auth.jwt_secret must be set in production"
        );
    } else if settings.auth.uses_default_secret() {
        tracing::warn!("using the built-in JWT secret; set STAYHUB_AUTH__JWT_SECRET");
    }
    Ok(())
}

/// Resolves on Ctrl-C (and SIGTERM on unix)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

/// Initialize and start all modules, serve HTTP until shutdown, then stop modules
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    check_production_settings(&settings)?;

    let registry = build_registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;
    tracing::info!(
        core = registry.core_module_count(),
        custom = registry.custom_module_count(),
        "stayhub-app bootstrap complete"
    );

    let served = stayhub_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry.stop_all().await?;
    served
}
