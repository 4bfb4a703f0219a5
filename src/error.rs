use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{
    MSG_BAD_CREDENTIALS, MSG_INITIAL_NOT_FOUND, MSG_LOGIN_REQUIRED, MSG_USERNAME_TAKEN,
};
use crate::session::Flash;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Record codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Multipart decode error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Password hash error: {0}")]
    PasswordHash(pbkdf2::password_hash::Error),

    /// A form submission failed validation; `redirect` is the page to re-prompt on
    #[error("Form rejected: {message}")]
    FormRejected {
        message: &'static str,
        redirect: String,
    },

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Bad credentials")]
    BadCredentials,

    #[error("Login required")]
    LoginRequired,

    #[error("Initial image not found")]
    InitialImageNotFound,
}

impl From<pbkdf2::password_hash::Error> for AppError {
    fn from(err: pbkdf2::password_hash::Error) -> Self {
        AppError::PasswordHash(err)
    }
}

/// Convert AppError into HTTP responses.
///
/// User-facing failures become a flash cookie plus a redirect back to a safe
/// page; infrastructure failures are logged and answered with 500.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (target, flash) = match self {
            AppError::FormRejected { message, redirect } => (redirect, Flash::error(message)),
            AppError::UsernameTaken => {
                ("/register".to_string(), Flash::error(MSG_USERNAME_TAKEN))
            }
            AppError::BadCredentials => ("/login".to_string(), Flash::error(MSG_BAD_CREDENTIALS)),
            AppError::LoginRequired => ("/login".to_string(), Flash::error(MSG_LOGIN_REQUIRED)),
            AppError::InitialImageNotFound => {
                ("/".to_string(), Flash::error(MSG_INITIAL_NOT_FOUND))
            }
            AppError::Multipart(ref e) => {
                tracing::warn!("Malformed multipart body: {:?}", e);
                let body = Json(json!({ "error": "Malformed multipart body" }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ref internal => {
                tracing::error!("Internal error: {:?}", internal);
                let body = Json(json!({ "error": "Internal server error" }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        flash.into_redirect(&target)
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
