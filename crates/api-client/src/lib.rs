use crate::error::ApiError;
use async_trait::async_trait;
use configuration::ClientConfig;
use core_types::{DeleteConfirmation, NewStudent, StudentPatch, StudentRecord};
use serde::de::DeserializeOwned;
use uuid::Uuid;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::ApiErrorResponse;

/// The four calls the console makes against the student portal API.
/// Views are written against this trait so a test double can stand in for HTTP.
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// `GET /students`
    async fn list_students(&self) -> Result<Vec<StudentRecord>, ApiError>;

    /// `POST /students`
    async fn create_student(&self, student: &NewStudent) -> Result<StudentRecord, ApiError>;

    /// `PUT /students/{id}`. `None` means no record had that id.
    async fn update_student(&self, id: Uuid, patch: &StudentPatch) -> Result<Option<StudentRecord>, ApiError>;

    /// `DELETE /students/{id}`
    async fn delete_student(&self, id: Uuid) -> Result<DeleteConfirmation, ApiError>;
}

/// A concrete implementation of `StudentApi` over HTTP.
///
/// Requests use reqwest's defaults: no retries, no custom timeout.
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn students_url(&self) -> String {
        format!("{}/students", self.base_url)
    }

    fn student_url(&self, id: Uuid) -> String {
        format!("{}/students/{}", self.base_url, id)
    }

    /// Reads the body and decodes it as `T` on success, or as the server's error
    /// payload otherwise.
    async fn read<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<T>(&text).map_err(|e| {
                tracing::warn!(error = %e, body = %text, "Unexpected response body.");
                ApiError::Deserialization(e.to_string())
            })
        } else {
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|body| body.message())
                .unwrap_or(text);
            tracing::warn!(status = status.as_u16(), %message, "Request rejected by the student portal API.");
            Err(ApiError::ApiError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl StudentApi for PortalClient {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, ApiError> {
        let response = self.client.get(self.students_url()).send().await?;
        self.read(response).await
    }

    async fn create_student(&self, student: &NewStudent) -> Result<StudentRecord, ApiError> {
        let response = self.client.post(self.students_url()).json(student).send().await?;
        self.read(response).await
    }

    async fn update_student(&self, id: Uuid, patch: &StudentPatch) -> Result<Option<StudentRecord>, ApiError> {
        let response = self.client.put(self.student_url(id)).json(patch).send().await?;
        self.read(response).await
    }

    async fn delete_student(&self, id: Uuid) -> Result<DeleteConfirmation, ApiError> {
        let response = self.client.delete(self.student_url(id)).send().await?;
        self.read(response).await
    }
}
