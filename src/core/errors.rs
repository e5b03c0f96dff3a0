use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Errors raised by `SocialStore`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A command referenced an entity that must exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The seed fixture is inconsistent.
    #[error("invalid fixture: {0}")]
    InvalidFixture(String),
}

impl StoreError {
    pub fn post_not_found(id: &str) -> Self {
        StoreError::NotFound { entity: "post", id: id.to_string() }
    }

    pub fn user_not_found(id: &str) -> Self {
        StoreError::NotFound { entity: "user", id: id.to_string() }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced to HTTP clients as `{"error": msg}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalError(msg) => msg,
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": msg }))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::InvalidFixture(msg) => ApiError::InternalError(msg),
        }
    }
}
