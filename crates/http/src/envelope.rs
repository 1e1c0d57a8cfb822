use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success wrapper: every payload is returned as `{ "data": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
