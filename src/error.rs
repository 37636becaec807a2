//! Error types for the bookshelf server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Payload rule a create or update request violated
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("missing name")]
    MissingName,

    #[error("readPage exceeds pageCount")]
    ReadPageExceedsPageCount,
}

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("Not found: book {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Book operation a failure happened in; selects the user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Add,
    Get,
    Update,
    Delete,
}

impl BookAction {
    fn message_for(self, error: &AppError) -> String {
        let message = match (self, error) {
            (BookAction::Add, AppError::Validation(ValidationFailure::MissingName)) => {
                "Gagal menambahkan buku. Mohon isi nama buku"
            }
            (BookAction::Add, AppError::Validation(ValidationFailure::ReadPageExceedsPageCount)) => {
                "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
            }
            (BookAction::Update, AppError::Validation(ValidationFailure::MissingName)) => {
                "Gagal memperbarui buku. Mohon isi nama buku"
            }
            (BookAction::Update, AppError::Validation(ValidationFailure::ReadPageExceedsPageCount)) => {
                "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
            }
            (BookAction::Update, AppError::NotFound(_)) => "Gagal memperbarui buku. Id tidak ditemukan",
            (BookAction::Delete, AppError::NotFound(_)) => "Buku gagal dihapus. Id tidak ditemukan",
            (_, AppError::NotFound(_)) => "Buku tidak ditemukan",
            _ => return error.default_message(),
        };
        message.to_string()
    }
}

/// Response status discriminator shared by every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
}

/// Failure response body
#[derive(Debug, Serialize, ToSchema)]
pub struct FailResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl AppError {
    /// Attach the operation the error surfaced from
    pub fn during(self, action: BookAction) -> ApiError {
        ApiError { action, error: self }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn default_message(&self) -> String {
        match self {
            AppError::Validation(failure) => failure.to_string(),
            AppError::NotFound(_) => "Buku tidak ditemukan".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }

    fn render(&self, message: String) -> Response {
        let body = Json(FailResponse {
            status: ResponseStatus::Fail,
            message,
        });
        (self.status_code(), body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.default_message();
        self.render(message)
    }
}

/// An [`AppError`] tagged with the book operation it came from
#[derive(Error, Debug)]
#[error("{error}")]
pub struct ApiError {
    pub action: BookAction,
    pub error: AppError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.action.message_for(&self.error);
        self.error.render(message)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_depend_on_action() {
        let missing = AppError::Validation(ValidationFailure::MissingName);
        assert_eq!(
            BookAction::Add.message_for(&missing),
            "Gagal menambahkan buku. Mohon isi nama buku"
        );
        assert_eq!(
            BookAction::Update.message_for(&missing),
            "Gagal memperbarui buku. Mohon isi nama buku"
        );

        let not_found = AppError::NotFound("abc".into());
        assert_eq!(BookAction::Get.message_for(&not_found), "Buku tidak ditemukan");
        assert_eq!(
            BookAction::Update.message_for(&not_found),
            "Gagal memperbarui buku. Id tidak ditemukan"
        );
        assert_eq!(
            BookAction::Delete.message_for(&not_found),
            "Buku gagal dihapus. Id tidak ditemukan"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation(ValidationFailure::ReadPageExceedsPageCount).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("bad json".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
