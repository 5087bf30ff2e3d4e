use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::ValidationErrors;

use crate::core::deck::DeckStatus;
use crate::models::domain::Grant;

/// Matched grants, best first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub grants: Vec<Grant>,
    pub total_count: usize,
}

/// Snapshot of the deck for the swipe screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckView {
    pub status: DeckStatus,
    pub current_index: usize,
    pub total: usize,
    pub current: Option<Grant>,
    pub shortlist_count: usize,
}

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
            fields: BTreeMap::new(),
        }
    }

    /// Inline per-field messages for a rejected form
    pub fn validation(errors: &ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let message = errs.first()?.message.as_ref()?.to_string();
                Some((to_camel_case(&field), message))
            })
            .collect();

        Self {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
            fields,
        }
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::CreateAccountRequest;
    use validator::Validate;

    #[test]
    fn test_validation_response_uses_wire_field_names() {
        let request = CreateAccountRequest {
            business_name: String::new(),
            email: Some("nope".to_string()),
        };
        let errors = request.validate().unwrap_err();
        let response = ErrorResponse::validation(&errors);

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.fields.get("businessName").map(String::as_str),
            Some("Business name is required")
        );
        assert_eq!(
            response.fields.get("email").map(String::as_str),
            Some("Please enter a valid email address")
        );
    }
}
