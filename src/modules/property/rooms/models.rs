use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Normalized room-type submission.
///
/// Built from the multipart form after [`super::normalize`] has coerced the
/// text fields, so numbers and flags arrive here already typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRoom {
    /// Display name of the room type, e.g. "Deluxe King"
    #[validate(length(min = 1, max = 120))]
    pub room_type_name: String,
    /// Floor the rooms are on; basements are negative
    #[serde(default)]
    pub floor_number: Option<i32>,
    /// Number of rooms of this type
    #[serde(default)]
    pub total_rooms: Option<u32>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub bed_type: Option<String>,
    #[serde(default)]
    pub room_view: Option<String>,
    #[serde(default)]
    pub smoking_allowed: bool,
    #[serde(default)]
    pub extra_bed_allowed: bool,
    /// Free-text amenity labels in submission order
    #[serde(default)]
    #[validate(length(max = 100))]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub availability_start: Option<String>,
    #[serde(default)]
    pub availability_end: Option<String>,
    #[serde(default)]
    pub base_adult: Option<u32>,
    #[serde(default)]
    pub max_adult: Option<u32>,
    #[serde(default)]
    pub max_children: Option<u32>,
    #[serde(default)]
    pub max_occupancy: Option<u32>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub base_rate: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub extra_adult_charge: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub child_charge: Option<f64>,
    #[serde(default)]
    pub total_rooms_in_property: Option<u32>,
}

/// A stored room type.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRoom {
    #[schema(value_type = String)]
    pub id: Uuid,
    /// Owner of the room type
    pub user_id: String,
    #[serde(flatten)]
    pub details: CreatePropertyRoom,
    /// Upload locations, in the order the images were submitted
    pub image_urls: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
}

impl PropertyRoom {
    pub fn new(user_id: &str, details: CreatePropertyRoom, image_urls: Vec<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: user_id.to_string(),
            details,
            image_urls,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
