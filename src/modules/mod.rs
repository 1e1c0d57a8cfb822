pub mod property;

use std::sync::Arc;

use stayhub_authz::TokenService;
use stayhub_kernel::{settings::Settings, ModuleRegistry};
use stayhub_storage::ObjectStorage;

/// Register all project-specific modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    settings: &Settings,
    storage: Arc<dyn ObjectStorage>,
    tokens: Arc<TokenService>,
) {
    registry.register_custom(property::create_module(
        storage,
        tokens,
        settings.uploads.max_room_images,
    ));
}
