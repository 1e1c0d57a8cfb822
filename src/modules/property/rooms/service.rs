use std::sync::Arc;

use anyhow::Context;

use super::models::{CreatePropertyRoom, PropertyRoom};
use super::repository::RoomRepository;

/// Creates and lists room types on top of a [`RoomRepository`].
pub struct PropertyRoomsService {
    repository: Arc<dyn RoomRepository>,
}

impl PropertyRoomsService {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        user_id: &str,
        details: CreatePropertyRoom,
        image_urls: Vec<String>,
    ) -> anyhow::Result<PropertyRoom> {
        let room = PropertyRoom::new(user_id, details, image_urls);

        self.repository
            .insert(room.clone())
            .await
            .with_context(|| format!("failed to store room type for user '{}'", user_id))?;

        tracing::info!(
            user_id = %user_id,
            room_id = %room.id,
            images = room.image_urls.len(),
            "property room created"
        );
        Ok(room)
    }

    pub async fn find_all_by_user(&self, user_id: &str) -> anyhow::Result<Vec<PropertyRoom>> {
        self.repository
            .list_by_user(user_id)
            .await
            .with_context(|| format!("failed to load room types for user '{}'", user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::property::rooms::repository::InMemoryRoomRepository;

    fn details(name: &str) -> CreatePropertyRoom {
        serde_json::from_value(serde_json::json!({ "roomTypeName": name })).unwrap()
    }

    fn service() -> PropertyRoomsService {
        PropertyRoomsService::new(Arc::new(InMemoryRoomRepository::new()))
    }

    #[tokio::test]
    async fn created_rooms_are_listed_per_owner_in_order() {
        let service = service();
        let first = service
            .create("owner-a", details("Standard"), vec![])
            .await
            .unwrap();
        let second = service
            .create("owner-a", details("Suite"), vec!["http://cdn/s.jpg".into()])
            .await
            .unwrap();
        service
            .create("owner-b", details("Loft"), vec![])
            .await
            .unwrap();

        let rooms = service.find_all_by_user("owner-a").await.unwrap();
        assert_eq!(rooms, vec![first, second]);
        assert_eq!(rooms[1].image_urls, vec!["http://cdn/s.jpg".to_string()]);
    }

    #[tokio::test]
    async fn unknown_owner_has_no_rooms() {
        let rooms = service().find_all_by_user("nobody").await.unwrap();
        assert!(rooms.is_empty());
    }
}
