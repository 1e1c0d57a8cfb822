//! Room types of a property: create with image upload, list per owner.

pub mod controller;
pub mod models;
pub mod normalize;
pub mod repository;
pub mod service;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use stayhub_authz::TokenService;
use stayhub_storage::ObjectStorage;

use service::PropertyRoomsService;

/// Multipart field carrying the room images
pub const IMAGE_FIELD: &str = "uploadRoomImages";

/// Storage category (key prefix) for room images
pub const IMAGE_CATEGORY: &str = "room-images";

/// Shared state of the rooms routes
#[derive(Clone)]
pub struct RoomsState {
    pub service: Arc<PropertyRoomsService>,
    pub storage: Arc<dyn ObjectStorage>,
    pub tokens: Arc<TokenService>,
    pub max_images: usize,
}

impl FromRef<RoomsState> for Arc<TokenService> {
    fn from_ref(state: &RoomsState) -> Self {
        state.tokens.clone()
    }
}

/// Routes relative to the module mount point
pub fn routes(state: RoomsState) -> Router {
    Router::new()
        .route("/rooms", post(controller::create_room))
        .route("/rooms/{user_id}", get(controller::find_all_rooms))
        .with_state(state)
}
