use std::time::Duration;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::Envelope;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A request field broke a rule; the message names the field.
    #[error("{0}")]
    Validation(String),

    #[error("invalid {param} parameter: {value:?} is not a valid identifier")]
    BadIdentifier { param: &'static str, value: String },

    /// Target absent or soft-deleted. Carries the entity label.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("storage: {0}")]
    Storage(#[from] sea_orm::DbErr),

    #[error("storage: statement exceeded the {0:?} deadline")]
    StorageTimeout(Duration),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadIdentifier { .. } | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::StorageTimeout(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<jiff::Error> for AppError {
    fn from(err: jiff::Error) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Path segments that fail to decode never reach identifier parsing.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(Envelope::<()>::failure(message))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
