use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Failed to decode image payload: {0}")]
    Decode(String),

    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for SegmentError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            SegmentError::Decode(_) => (StatusCode::BAD_REQUEST, "DECODE_ERROR"),
            SegmentError::ImageLoad(_) => (StatusCode::BAD_REQUEST, "IMAGE_LOAD_ERROR"),
            SegmentError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
