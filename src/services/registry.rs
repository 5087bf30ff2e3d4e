use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::{Grant, SubmitResponse};
use crate::services::cache::GrantCache;

/// Errors that can occur when talking to the grants registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API Error: {0}")]
    ApiError(reqwest::StatusCode),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDraftBody<'a> {
    grant_id: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateDraftBody<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody<'a> {
    grant_id: &'a str,
    draft_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedDraft {
    id: String,
}

/// Grants registry API client
///
/// Handles all communication with the remote backend:
/// - Fetching grant details by id
/// - Creating and updating application drafts
/// - Submitting an application for a saved draft
pub struct RegistryClient {
    base_url: String,
    client: Client,
    cache: GrantCache,
}

impl RegistryClient {
    /// Create a new registry client
    pub fn new(base_url: String, timeout_secs: u64, cache: GrantCache) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            client,
            cache,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn check(response: Response) -> Result<Response, RegistryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(RegistryError::ApiError(status))
    }

    /// Fetch a grant by id, consulting the cache first
    pub async fn get_grant(&self, grant_id: &str) -> Result<Grant, RegistryError> {
        if let Some(grant) = self.cache.get(grant_id).await {
            return Ok(grant);
        }

        let url = self.url(&format!("/grants/{}", urlencoding::encode(grant_id)));
        tracing::debug!("Fetching grant from registry: {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(grant_id.to_string()));
        }

        let grant: Grant = Self::check(response)?.json().await?;
        self.cache.insert(grant.clone()).await;
        Ok(grant)
    }

    /// Create a remote draft and return its id
    pub async fn save_draft(&self, grant_id: &str, content: &str) -> Result<String, RegistryError> {
        let response = self
            .client
            .post(self.url("/drafts"))
            .json(&CreateDraftBody { grant_id, content })
            .send()
            .await?;

        let created: CreatedDraft = Self::check(response)?.json().await?;
        tracing::debug!("Created remote draft {} for grant {}", created.id, grant_id);
        Ok(created.id)
    }

    pub async fn update_draft(&self, draft_id: &str, content: &str) -> Result<(), RegistryError> {
        let url = self.url(&format!("/drafts/{}", urlencoding::encode(draft_id)));
        let response = self
            .client
            .patch(&url)
            .json(&UpdateDraftBody { content })
            .send()
            .await?;

        Self::check(response)?;
        Ok(())
    }

    /// Submit the application attached to a remote draft
    pub async fn submit(&self, grant_id: &str, draft_id: &str) -> Result<SubmitResponse, RegistryError> {
        let response = self
            .client
            .post(self.url("/submit"))
            .json(&SubmitBody { grant_id, draft_id })
            .send()
            .await?;

        Ok(Self::check(response)?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: String) -> RegistryClient {
        RegistryClient::new(base_url, 5, GrantCache::new(10, 60)).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let client = client("https://grants.test/api/".to_string());
        assert_eq!(client.url("/drafts"), "https://grants.test/api/drafts");
        assert_eq!(client.base_url(), "https://grants.test/api/");
    }

    #[tokio::test]
    async fn test_get_grant_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let grant = crate::services::catalog::StaticCatalog::mock_grants().remove(2);
        let mock = server
            .mock("GET", "/grants/cradle-cip")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&grant).unwrap())
            .expect(1)
            .create_async()
            .await;

        let client = client(server.url());
        assert_eq!(client.get_grant("cradle-cip").await.unwrap(), grant);
        assert_eq!(client.get_grant("cradle-cip").await.unwrap(), grant);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_grant_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/grants/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = client(server.url());
        assert!(matches!(
            client.get_grant("missing").await,
            Err(RegistryError::NotFound(id)) if id == "missing"
        ));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/drafts")
            .with_status(500)
            .create_async()
            .await;

        let client = client(server.url());
        let err = client.save_draft("cradle-cip", "hello").await.unwrap_err();
        assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_draft_and_submit_bodies() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/drafts")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "grantId": "cradle-cip",
                "content": "Dear CRADLE Fund,\n\nverbatim • text"
            })))
            .with_status(201)
            .with_body(r#"{"id":"remote-7"}"#)
            .create_async()
            .await;
        let update = server
            .mock("PATCH", "/drafts/remote-7")
            .match_body(mockito::Matcher::Json(serde_json::json!({"content": "v2"})))
            .with_status(204)
            .create_async()
            .await;
        let submit = server
            .mock("POST", "/submit")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "grantId": "cradle-cip",
                "draftId": "remote-7"
            })))
            .with_status(200)
            .with_body(r#"{"success":true,"applicationId":"app-1","message":"ok"}"#)
            .create_async()
            .await;

        let client = client(server.url());
        let draft_id = client
            .save_draft("cradle-cip", "Dear CRADLE Fund,\n\nverbatim • text")
            .await
            .unwrap();
        client.update_draft(&draft_id, "v2").await.unwrap();
        let response = client.submit("cradle-cip", &draft_id).await.unwrap();

        assert_eq!(draft_id, "remote-7");
        assert!(response.success);
        assert_eq!(response.application_id.as_deref(), Some("app-1"));
        create.assert_async().await;
        update.assert_async().await;
        submit.assert_async().await;
    }
}
