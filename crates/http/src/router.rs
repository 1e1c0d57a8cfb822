//! Router builder for the STAYHUB HTTP server

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::HeaderValue,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{Timestamp, Uuid};

use stayhub_kernel::ModuleRegistry;

use crate::error::AppError;

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/api/{module_name}`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        let api_path = format!("/api/{}", module_name);
        self.router = self.router.nest(&api_path, module_router);
        self
    }

    /// Serve files under `dir` at `path` (locally stored uploads)
    pub fn serve_dir(mut self, path: &str, dir: &std::path::Path) -> Self {
        self.router = self.router.nest_service(path, ServeDir::new(dir));
        self
    }

    /// Answer unknown paths with the JSON error body instead of an empty 404
    pub fn with_fallback(mut self) -> Self {
        self.router = self
            .router
            .fallback(|| async { AppError::not_found("no route matches this path") });
        self
    }

    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Stamp each request with an `x-request-id` (UUID v7) and echo it back
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Cap request bodies; multipart uploads are read against this limit
    pub fn with_body_limit(mut self, limit_bytes: usize) -> Self {
        self.router = self.router.layer(DefaultBodyLimit::max(limit_bytes));
        self
    }

    /// Serve the merged OpenAPI document and Swagger UI
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let openapi_spec = openapi_document(registry);

        // SwaggerUI needs the typed document; fall back to an empty one if a
        // module fragment does not deserialize.
        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(openapi_spec.clone())
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "merged OpenAPI document is not valid; serving empty spec to Swagger UI");
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("STAYHUB API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        // Raw JSON for external consumers
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Request ID generator using time-ordered UUIDs
#[derive(Clone, Copy)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

/// Merge the base document with every module's fragment.
///
/// Module paths are prefixed with `/api/{module_name}`; component schemas and
/// security schemes are merged by name.
pub fn openapi_document(registry: &ModuleRegistry) -> Value {
    let mut openapi_spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "STAYHUB API",
            "version": "1.0.0",
            "description": "Property management API"
        },
        "paths": {},
        "components": {
            "schemas": {},
            "securitySchemes": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": {} },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    openapi_spec["paths"]["/healthz"] = json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": { "schema": { "type": "string" } }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths) = module_spec.get("paths").and_then(Value::as_object) {
            for (path, path_item) in paths {
                let prefixed_path = format!("/api/{}{}", module.name(), path);
                openapi_spec["paths"][prefixed_path] = path_item.clone();
            }
        }

        if let Some(components) = module_spec.get("components") {
            for section in ["schemas", "securitySchemes"] {
                if let Some(entries) = components.get(section).and_then(Value::as_object) {
                    for (name, definition) in entries {
                        openapi_spec["components"][section][name] = definition.clone();
                    }
                }
            }
        }
    }

    openapi_spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use stayhub_kernel::Module;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct DocModule;

    #[async_trait]
    impl Module for DocModule {
        fn name(&self) -> &'static str {
            "property"
        }

        fn openapi(&self) -> Option<Value> {
            Some(json!({
                "paths": { "/rooms": { "get": { "responses": {} } } },
                "components": {
                    "schemas": { "Room": { "type": "object" } },
                    "securitySchemes": { "JWT": { "type": "http", "scheme": "bearer" } }
                }
            }))
        }
    }

    #[test]
    fn openapi_merges_module_fragments() {
        let mut registry = ModuleRegistry::new();
        registry.register_custom(Arc::new(DocModule));

        let doc = openapi_document(&registry);
        assert!(doc["paths"]["/api/property/rooms"]["get"].is_object());
        assert!(doc["paths"]["/healthz"].is_object());
        assert_eq!(doc["components"]["schemas"]["Room"]["type"], "object");
        assert!(doc["components"]["schemas"]["ErrorResponse"].is_object());
        assert_eq!(
            doc["components"]["securitySchemes"]["JWT"]["scheme"],
            "bearer"
        );
    }

    #[tokio::test]
    async fn mounted_module_is_reachable_under_api_prefix() {
        let module_router = Router::new().route("/rooms", get(|| async { "rooms" }));
        let router = RouterBuilder::new()
            .mount_module("property", module_router)
            .with_fallback()
            .build();

        let response = router
            .clone()
            .oneshot(Request::get("/api/property/rooms").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/api/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "ok" }))
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .build();

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers()["x-request-id"].to_str().unwrap();
        assert!(Uuid::parse_str(request_id).is_ok());
    }
}
