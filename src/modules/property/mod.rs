pub mod rooms;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use serde_json::json;
use stayhub_authz::TokenService;
use stayhub_kernel::{InitCtx, Module};
use stayhub_storage::ObjectStorage;
use utoipa::PartialSchema;

use rooms::models::{CreatePropertyRoom, PropertyRoom};
use rooms::normalize::{BOOLEAN_FIELDS, NUMERIC_FIELDS};
use rooms::repository::{InMemoryRoomRepository, RoomRepository};
use rooms::service::PropertyRoomsService;
use rooms::{RoomsState, IMAGE_FIELD};

/// Property module: room types and their images, mounted at `/api/property`
pub struct PropertyModule {
    rooms: RoomsState,
}

impl PropertyModule {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        storage: Arc<dyn ObjectStorage>,
        tokens: Arc<TokenService>,
        max_images: usize,
    ) -> Self {
        Self {
            rooms: RoomsState {
                service: Arc::new(PropertyRoomsService::new(repository)),
                storage,
                tokens,
                max_images,
            },
        }
    }

    /// Multipart body schema of the create endpoint
    fn create_room_form_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        for field in [
            "roomTypeName",
            "roomType",
            "bedType",
            "roomView",
            "availabilityStart",
            "availabilityEnd",
        ] {
            properties.insert(field.to_string(), json!({ "type": "string" }));
        }
        for &field in NUMERIC_FIELDS {
            properties.insert(field.to_string(), json!({ "type": "number" }));
        }
        for &field in BOOLEAN_FIELDS {
            properties.insert(field.to_string(), json!({ "type": "boolean" }));
        }
        properties.insert(
            "amenities".to_string(),
            json!({ "type": "array", "items": { "type": "string" } }),
        );
        properties.insert(
            IMAGE_FIELD.to_string(),
            json!({
                "type": "array",
                "maxItems": self.rooms.max_images,
                "items": { "type": "string", "format": "binary" }
            }),
        );

        json!({
            "type": "object",
            "properties": properties,
            "required": ["roomTypeName"]
        })
    }
}

#[async_trait]
impl Module for PropertyModule {
    fn name(&self) -> &'static str {
        "property"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            max_room_images = self.rooms.max_images,
            storage = self.rooms.storage.backend(),
            "property module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .merge(rooms::routes(self.rooms.clone()))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };

        Some(json!({
            "paths": {
                "/rooms": {
                    "post": {
                        "summary": "Create a room type for the property",
                        "tags": ["Property Rooms"],
                        "security": [{ "JWT": [] }],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "multipart/form-data": {
                                    "schema": self.create_room_form_schema()
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Room created.",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "data": { "$ref": "#/components/schemas/PropertyRoom" }
                                            },
                                            "required": ["data"]
                                        }
                                    }
                                }
                            },
                            "400": error_response("Malformed multipart body or too many files"),
                            "401": error_response("Missing or invalid bearer token"),
                            "422": error_response("Room fields failed validation"),
                            "500": error_response("Internal server error")
                        }
                    }
                },
                "/rooms/{userId}": {
                    "get": {
                        "summary": "Get all room types for a user",
                        "tags": ["Property Rooms"],
                        "parameters": [{
                            "name": "userId",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Rooms fetched.",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "data": {
                                                    "type": "array",
                                                    "items": { "$ref": "#/components/schemas/PropertyRoom" }
                                                }
                                            },
                                            "required": ["data"]
                                        }
                                    }
                                }
                            },
                            "500": error_response("Internal server error")
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Property module health check",
                        "tags": ["Property Rooms"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "PropertyRoom": PropertyRoom::schema(),
                    "CreatePropertyRoom": CreatePropertyRoom::schema()
                },
                "securitySchemes": {
                    "JWT": {
                        "type": "http",
                        "scheme": "bearer",
                        "bearerFormat": "JWT"
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "property module stopped");
        Ok(())
    }
}

async fn health_check() -> &'static str {
    "property module is healthy"
}

/// Create the property module backed by the in-process room repository
pub fn create_module(
    storage: Arc<dyn ObjectStorage>,
    tokens: Arc<TokenService>,
    max_images: usize,
) -> Arc<dyn Module> {
    Arc::new(PropertyModule::new(
        Arc::new(InMemoryRoomRepository::new()),
        storage,
        tokens,
        max_images,
    ))
}
