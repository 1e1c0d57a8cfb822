//! HTTP server facade for STAYHUB with Axum, error handling, and OpenAPI support.

use std::future::Future;

use anyhow::Context;
use axum::{routing::get, Router};

use stayhub_kernel::{
    settings::{Settings, StorageBackend},
    ModuleRegistry,
};

pub mod envelope;
pub mod error;
pub mod router;

pub use envelope::Envelope;
pub use error::AppError;
use router::RouterBuilder;

/// Serve the application until `shutdown` resolves
pub async fn start_server<F>(
    registry: &ModuleRegistry,
    settings: &Settings,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(registry, settings);

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    for module in registry.modules() {
        tracing::info!(
            module = module.name(),
            "mounting module routes under /api/{}",
            module.name()
        );
        router_builder = router_builder.mount_module(module.name(), module.routes());
    }

    if settings.storage.backend == StorageBackend::Local {
        router_builder = router_builder.serve_dir("/uploads", &settings.storage.root_dir);
    }

    router_builder
        .with_openapi(registry)
        .with_fallback()
        .with_body_limit(settings.server.body_limit_bytes)
        .with_timeout(settings.server.request_timeout_ms)
        .with_cors()
        .with_request_id()
        .with_tracing()
        .build()
}

async fn health_check() -> &'static str {
    "ok"
}
