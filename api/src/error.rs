use crate::responses::Failure;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Request-shape problems. These are the only non-200 answers of the API.
#[derive(Debug)]
pub enum ApiError {
    BadPayload(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadPayload(message) => {
                log::warn!("Rejected request payload: {}", message);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(Failure::new(message))).into_response()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadPayload(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadPayload(rejection.body_text())
    }
}
