use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

/// Business account created before onboarding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: String,
    pub id: String,
}

impl Account {
    /// Required fields are present and non-empty
    pub fn is_valid(&self) -> bool {
        !self.business_name.is_empty() && !self.created_at.is_empty() && !self.id.is_empty()
    }

    pub fn new(business_name: &str, email: Option<&str>, now: DateTime<Utc>) -> Self {
        let email = email
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Self {
            business_name: business_name.trim().to_string(),
            email,
            created_at: now.to_rfc3339(),
            id: format!("account_{}", now.timestamp_millis()),
        }
    }
}

/// Funding preferences linked to an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub business_type: String,
    pub industry: String,
    #[serde(default)]
    pub funding_amount: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub timeline: String,
    pub created_at: String,
}

impl Preferences {
    pub fn is_valid(&self) -> bool {
        !self.business_type.is_empty() && !self.industry.is_empty() && !self.created_at.is_empty()
    }
}

/// Account joined with its preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithPreferences {
    #[serde(flatten)]
    pub account: Account,
    pub preferences: Option<Preferences>,
}

/// Account creation form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[validate(custom(function = "validate_not_blank", message = "Business name is required"))]
    #[serde(default)]
    pub business_name: String,
    #[validate(custom(function = "validate_email_shape", message = "Please enter a valid email address"))]
    #[serde(default)]
    pub email: Option<String>,
}

/// Preferences form; `createdAt` is stamped by the store when absent
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SavePreferencesRequest {
    #[validate(custom(function = "validate_not_blank", message = "Business type is required"))]
    #[serde(default)]
    pub business_type: String,
    #[validate(custom(function = "validate_not_blank", message = "Industry is required"))]
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub funding_amount: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub timeline: String,
}

impl SavePreferencesRequest {
    pub fn into_preferences(self, now: DateTime<Utc>) -> Preferences {
        Preferences {
            business_type: self.business_type,
            industry: self.industry,
            funding_amount: self.funding_amount,
            location: self.location,
            experience: self.experience,
            goals: self.goals,
            timeline: self.timeline,
            created_at: now.to_rfc3339(),
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// `local@domain.tld`: no whitespace and a single `@`, with a dot in the domain
pub static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Checked as typed, untrimmed. An empty value passes since the email
/// field is optional.
fn validate_email_shape(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || EMAIL_RE.is_match(value) {
        return Ok(());
    }

    let mut error = ValidationError::new("email");
    error.add_param(Cow::from("value"), &value);
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL_RE.is_match("owner@kedai.com.my"));
        assert!(EMAIL_RE.is_match("a@b.c"));
        assert!(!EMAIL_RE.is_match("owner@kedai"));
        assert!(!EMAIL_RE.is_match("owner kedai@x.com"));
        assert!(!EMAIL_RE.is_match("@x.com"));
        assert!(!EMAIL_RE.is_match("a@@x.com"));
        assert!(!EMAIL_RE.is_match("a@x."));
    }

    #[test]
    fn test_email_is_checked_untrimmed() {
        let padded = CreateAccountRequest {
            business_name: "Kedai Runcit".to_string(),
            email: Some(" owner@kedai.my".to_string()),
        };
        let errors = padded.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_create_account_validation() {
        let blank = CreateAccountRequest {
            business_name: "   ".to_string(),
            email: None,
        };
        let errors = blank.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("business_name"));

        let bad_email = CreateAccountRequest {
            business_name: "Kedai Runcit".to_string(),
            email: Some("not-an-email".to_string()),
        };
        let errors = bad_email.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let ok = CreateAccountRequest {
            business_name: "Kedai Runcit".to_string(),
            email: Some(String::new()),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_new_account_trims_and_stamps() {
        let now = Utc::now();
        let account = Account::new("  Kedai Runcit ", Some("  "), now);

        assert_eq!(account.business_name, "Kedai Runcit");
        assert_eq!(account.email, None);
        assert_eq!(account.id, format!("account_{}", now.timestamp_millis()));
        assert!(account.is_valid());
    }
}
