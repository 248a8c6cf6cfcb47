//! REST client for the notes backend.

use crate::config::TuiConfig;
use fieldnote_api::types::{
    BackendNote, CreateNoteRequest, UpdateNotePriorityRequest, UpdateNoteRequest,
};
use fieldnote_core::NoteId;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn list_notes(&self) -> Result<Vec<BackendNote>, ApiClientError> {
        self.get_json("/notes").await
    }

    pub async fn create_note(
        &self,
        request: &CreateNoteRequest,
    ) -> Result<BackendNote, ApiClientError> {
        self.post_json("/notes", request).await
    }

    pub async fn update_note(
        &self,
        id: &NoteId,
        request: &UpdateNoteRequest,
    ) -> Result<BackendNote, ApiClientError> {
        let path = format!("/notes/{}", id.as_str());
        self.put_json(&path, request).await
    }

    pub async fn update_note_priority(
        &self,
        id: &NoteId,
        request: &UpdateNotePriorityRequest,
    ) -> Result<BackendNote, ApiClientError> {
        let path = format!("/notes/{}/priority", id.as_str());
        self.patch_json(&path, request).await
    }

    /// `DELETE /notes/{id}` answers 204 with no body on success.
    pub async fn delete_note(&self, id: &NoteId) -> Result<(), ApiClientError> {
        let url = format!("{}/notes/{}", self.base_url, id.as_str());
        let response = self.client.delete(url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await?;
            Err(ApiClientError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(url).send().await?;
        self.parse_response(response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(url).json(body).send().await?;
        self.parse_response(response).await
    }

    async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.put(url).json(body).send().await?;
        self.parse_response(response).await
    }

    async fn patch_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.patch(url).json(body).send().await?;
        self.parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.text().await?;
            Err(ApiClientError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base_url: &str) -> RestClient {
        let config = TuiConfig {
            api_base_url: base_url.to_string(),
            request_timeout_ms: 300,
            ..TuiConfig::default()
        };
        RestClient::new(&config).expect("client builds")
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let client = client_for("http://localhost:8080/api/");
        assert_eq!(client.base_url, "http://localhost:8080/api");
    }

    // Port 9 (discard) refuses connections, so these fail fast without any
    // network dependency.
    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let client = client_for("http://127.0.0.1:9/api");
        let err = client.list_notes().await.unwrap_err();
        assert!(matches!(err, ApiClientError::Http(_)));
    }

    #[tokio::test]
    async fn delete_against_unreachable_backend_fails() {
        let client = client_for("http://127.0.0.1:9/api");
        let err = client.delete_note(&NoteId::from(1)).await.unwrap_err();
        assert!(matches!(err, ApiClientError::Http(_)));
    }
}
