use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

/// Every failure a handler can return. The store error is passed to the
/// client verbatim; only the status code differs between operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Listing failed. Reported as 500.
    #[error("{0}")]
    Fetch(DbError),
    /// A create, update or delete failed in the store. Reported as 400.
    #[error("{0}")]
    Store(DbError),
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("Cast to id failed for value \"{0}\"")]
    InvalidId(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Store(_) | AppError::Body(_) | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Fetch(db_err) => tracing::error!(error = ?db_err, "Failed to list students."),
            AppError::Store(db_err) => tracing::error!(error = ?db_err, "Student store rejected the request."),
            AppError::Body(rejection) => tracing::warn!(error = %rejection, "Malformed request body."),
            AppError::InvalidId(id) => tracing::warn!(id = %id, "Malformed student id."),
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
