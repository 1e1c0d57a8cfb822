use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use futures::future::try_join_all;
use stayhub_authz::AuthUser;
use stayhub_http::{AppError, Envelope};
use stayhub_storage::ObjectStorage;

use super::models::PropertyRoom;
use super::normalize::{self, FormFields};
use super::{RoomsState, IMAGE_CATEGORY, IMAGE_FIELD};

/// One image file taken from the multipart body
#[derive(Debug)]
pub struct ImageUpload {
    pub original_name: String,
    pub bytes: Bytes,
}

/// A fully read multipart submission
#[derive(Debug, Default)]
pub struct RoomSubmission {
    pub fields: FormFields,
    pub images: Vec<ImageUpload>,
}

impl RoomSubmission {
    /// Drain the multipart stream, keeping at most `max_images` files.
    ///
    /// File parts are only accepted under [`IMAGE_FIELD`]. File inputs left
    /// empty by the browser (no file name, no content) are skipped.
    pub async fn read(mut multipart: Multipart, max_images: usize) -> Result<Self, AppError> {
        let mut submission = RoomSubmission::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            let Some(file_name) = field.file_name().map(str::to_string) else {
                let text = field.text().await?;
                submission.fields.insert(&name, text);
                continue;
            };

            if name != IMAGE_FIELD {
                return Err(AppError::bad_request(format!(
                    "unexpected file field '{}'",
                    name
                )));
            }

            let bytes = field.bytes().await?;
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            if submission.images.len() == max_images {
                return Err(AppError::bad_request(format!(
                    "too many files in '{}' (at most {})",
                    IMAGE_FIELD, max_images
                )));
            }
            submission.images.push(ImageUpload {
                original_name: file_name,
                bytes,
            });
        }

        Ok(submission)
    }
}

/// Upload every image concurrently; locations keep the input order.
pub async fn upload_images(
    storage: &dyn ObjectStorage,
    images: Vec<ImageUpload>,
) -> Result<Vec<String>, AppError> {
    if images.is_empty() {
        return Ok(Vec::new());
    }

    let count = images.len();
    let uploads = images.into_iter().map(|image| async move {
        storage
            .upload(image.bytes, &image.original_name, IMAGE_CATEGORY)
            .await
    });

    let locations = try_join_all(uploads).await.map_err(|err| {
        AppError::Internal(anyhow::Error::new(err).context("failed to upload room image"))
    })?;

    tracing::debug!(count, backend = storage.backend(), "room images uploaded");
    Ok(locations)
}

/// Create a room type for the authenticated owner
pub async fn create_room(
    State(state): State<RoomsState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Envelope<PropertyRoom>), AppError> {
    let submission = RoomSubmission::read(multipart, state.max_images).await?;
    let details = normalize::into_create_dto(submission.fields)?;
    let image_urls = upload_images(state.storage.as_ref(), submission.images).await?;

    let room = state
        .service
        .create(&user.user_id, details, image_urls)
        .await?;

    Ok((StatusCode::CREATED, Envelope::new(room)))
}

/// Every room type owned by `user_id`
pub async fn find_all_rooms(
    State(state): State<RoomsState>,
    Path(user_id): Path<String>,
) -> Result<Envelope<Vec<PropertyRoom>>, AppError> {
    let rooms = state.service.find_all_by_user(&user_id).await?;
    Ok(Envelope::new(rooms))
}
