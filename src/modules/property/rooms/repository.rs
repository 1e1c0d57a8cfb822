use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::PropertyRoom;

/// Persistence seam for room types
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn insert(&self, room: PropertyRoom) -> anyhow::Result<()>;

    /// Rooms owned by `user_id`, oldest first
    async fn list_by_user(&self, user_id: &str) -> anyhow::Result<Vec<PropertyRoom>>;
}

/// Process-local repository keyed by owner.
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: RwLock<HashMap<String, Vec<PropertyRoom>>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert(&self, room: PropertyRoom) -> anyhow::Result<()> {
        self.rooms
            .write()
            .await
            .entry(room.user_id.clone())
            .or_default()
            .push(room);
        Ok(())
    }

    async fn list_by_user(&self, user_id: &str) -> anyhow::Result<Vec<PropertyRoom>> {
        Ok(self
            .rooms
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}
