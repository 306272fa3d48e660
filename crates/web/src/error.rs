use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use storage::{
    dto::common::{ApiResponse, ErrorCode},
    error::StorageError,
};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
    NotFound,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound => write!(f, "Resource not found"),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn to_failure(&self) -> (ErrorCode, String) {
        match self {
            Self::Storage(StorageError::NotFound) | Self::NotFound => {
                (ErrorCode::NotFound, "Resource not found".to_string())
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                (ErrorCode::Conflict, msg.clone())
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    ErrorCode::InternalError,
                    "An internal error occurred".to_string(),
                )
            }
            Self::Validation(errors) => (
                ErrorCode::ValidationFailed,
                format!("Validation failed: {}", describe_field_errors(errors)),
            ),
            Self::BadRequest(msg) => (ErrorCode::BadRequest, msg.clone()),
            Self::Unauthorized => (ErrorCode::Unauthorized, "Unauthorized".to_string()),
        }
    }
}

fn describe_field_errors(errors: &ValidationErrors) -> String {
    let mut field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect();
    field_errors.sort();

    field_errors.join("; ")
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (code, message) = self.to_failure();
        let body: ApiResponse<()> = ApiResponse::failure(code, message);

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for WebError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
