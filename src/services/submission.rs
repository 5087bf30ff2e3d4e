use std::sync::Arc;
use thiserror::Error;

use crate::models::SubmitResponse;
use crate::services::registry::{RegistryClient, RegistryError};

/// Errors that can occur when submitting an application
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Application content is empty")]
    EmptyContent,

    /// Any registry failure or explicit rejection; callers treat these alike
    #[error("Submission failed: {0}")]
    Failed(String),
}

impl From<RegistryError> for SubmissionError {
    fn from(value: RegistryError) -> Self {
        SubmissionError::Failed(value.to_string())
    }
}

/// Where applications go when the user hits submit
#[derive(Clone)]
pub enum SubmissionGateway {
    /// Accepts everything and issues a local application id
    Mock,
    /// Pushes the draft to the registry and submits it there
    Registry(Arc<RegistryClient>),
}

impl SubmissionGateway {
    pub async fn submit(&self, grant_id: &str, content: &str) -> Result<SubmitResponse, SubmissionError> {
        if content.trim().is_empty() {
            return Err(SubmissionError::EmptyContent);
        }

        let response = match self {
            SubmissionGateway::Mock => SubmitResponse {
                success: true,
                application_id: Some(format!("app-{}", uuid::Uuid::new_v4().simple())),
                message: "Application submitted successfully".to_string(),
            },
            SubmissionGateway::Registry(registry) => {
                let draft_id = registry.save_draft(grant_id, content).await?;
                registry.submit(grant_id, &draft_id).await?
            }
        };

        if !response.success {
            return Err(SubmissionError::Failed(response.message));
        }

        tracing::info!(
            "Submitted application for {} (application id: {:?})",
            grant_id,
            response.application_id
        );
        Ok(response)
    }
}
