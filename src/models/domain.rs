use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Team size brackets offered during onboarding, smallest first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamSize {
    #[default]
    #[serde(rename = "1-10")]
    Micro,
    #[serde(rename = "11-50")]
    Small,
    #[serde(rename = "51-100")]
    Medium,
    #[serde(rename = "101-500")]
    Large,
    #[serde(rename = "501+")]
    Enterprise,
}

impl TeamSize {
    pub const ALL: [TeamSize; 5] = [
        TeamSize::Micro,
        TeamSize::Small,
        TeamSize::Medium,
        TeamSize::Large,
        TeamSize::Enterprise,
    ];
}

/// Funding need tags a business can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingNeed {
    Growth,
    Digitalisation,
    #[serde(rename = "Working Capital")]
    WorkingCapital,
    Export,
    Hiring,
    #[serde(rename = "R&D")]
    ResearchAndDevelopment,
}

impl FundingNeed {
    pub const ALL: [FundingNeed; 6] = [
        FundingNeed::Growth,
        FundingNeed::Digitalisation,
        FundingNeed::WorkingCapital,
        FundingNeed::Export,
        FundingNeed::Hiring,
        FundingNeed::ResearchAndDevelopment,
    ];

    /// Tag text used when matching against grant tags
    pub fn as_str(&self) -> &'static str {
        match self {
            FundingNeed::Growth => "Growth",
            FundingNeed::Digitalisation => "Digitalisation",
            FundingNeed::WorkingCapital => "Working Capital",
            FundingNeed::Export => "Export",
            FundingNeed::Hiring => "Hiring",
            FundingNeed::ResearchAndDevelopment => "R&D",
        }
    }
}

impl fmt::Display for FundingNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SME profile collected by the onboarding questionnaire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub team_size_bracket: TeamSize,
    #[serde(default)]
    pub needs: Vec<FundingNeed>,
    #[serde(default)]
    pub years: u32,
    #[serde(default)]
    pub is_complete: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            industry: String::new(),
            location: String::new(),
            team_size_bracket: TeamSize::Micro,
            needs: Vec::new(),
            years: 0,
            is_complete: false,
        }
    }
}

impl Profile {
    /// Merge a partial update into this profile
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(industry) = update.industry {
            self.industry = industry;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(team_size) = update.team_size_bracket {
            self.team_size_bracket = team_size;
        }
        if let Some(needs) = update.needs {
            self.needs = needs;
        }
        if let Some(years) = update.years {
            self.years = years;
        }
        if let Some(is_complete) = update.is_complete {
            self.is_complete = is_complete;
        }
    }

    /// Whether every questionnaire step has an answer
    pub fn has_required_fields(&self) -> bool {
        OnboardingStep::ALL.iter().all(|step| step.is_satisfied(self))
    }
}

/// Partial profile update; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub industry: Option<String>,
    pub location: Option<String>,
    pub team_size_bracket: Option<TeamSize>,
    pub needs: Option<Vec<FundingNeed>>,
    pub years: Option<u32>,
    pub is_complete: Option<bool>,
}

/// Onboarding questionnaire steps, in the order they are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStep {
    Industry,
    Location,
    Size,
    Needs,
    Confirm,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        OnboardingStep::Industry,
        OnboardingStep::Location,
        OnboardingStep::Size,
        OnboardingStep::Needs,
        OnboardingStep::Confirm,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Industry => "Industry",
            OnboardingStep::Location => "Location",
            OnboardingStep::Size => "Size",
            OnboardingStep::Needs => "Needs",
            OnboardingStep::Confirm => "Confirm",
        }
    }

    /// Whether the profile answers this step well enough to move on
    pub fn is_satisfied(&self, profile: &Profile) -> bool {
        match self {
            OnboardingStep::Industry => !profile.industry.trim().is_empty(),
            OnboardingStep::Location => !profile.location.trim().is_empty(),
            // Team size always carries a default bracket
            OnboardingStep::Size => true,
            OnboardingStep::Needs => !profile.needs.is_empty(),
            OnboardingStep::Confirm => true,
        }
    }
}

/// Grant record as served by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub id: String,
    pub title: String,
    pub agency: String,
    pub amount: String,
    pub deadline: NaiveDate,
    pub summary: String,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Grant {
    /// Tags as a slice, empty when the grant carries none
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// Outcome of a single swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Accept,
    Reject,
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// One entry of the decision log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeDecision {
    pub grant_id: String,
    pub decision: Verdict,
    pub timestamp: DateTime<Utc>,
}

/// Application draft saved per grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub grant_id: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    pub fn id_for(grant_id: &str) -> String {
        format!("draft-{}", grant_id)
    }
}

/// Grant with the score the matcher assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredGrant {
    pub grant: Grant,
    pub score: f64,
    pub matched_needs: Vec<FundingNeed>,
    pub industry_match: bool,
}

/// Scoring constants for the tag-overlap heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub base: f64,
    pub industry_bonus: f64,
    pub need_bonus: f64,
    /// Scores at or below this are dropped
    pub min_score: f64,
    pub max_score: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 0.5,
            industry_bonus: 0.3,
            need_bonus: 0.1,
            min_score: 0.3,
            max_score: 1.0,
        }
    }
}

/// Confirmation kept after a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub grant_id: String,
    pub application_id: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_size_wire_names() {
        let json = serde_json::to_string(&TeamSize::ALL).unwrap();
        assert_eq!(json, r#"["1-10","11-50","51-100","101-500","501+"]"#);
        assert!(TeamSize::Micro < TeamSize::Enterprise);
    }

    #[test]
    fn test_funding_need_wire_names() {
        let needs: Vec<FundingNeed> =
            serde_json::from_str(r#"["Working Capital", "R&D", "Export"]"#).unwrap();
        assert_eq!(
            needs,
            vec![
                FundingNeed::WorkingCapital,
                FundingNeed::ResearchAndDevelopment,
                FundingNeed::Export
            ]
        );
        assert_eq!(FundingNeed::WorkingCapital.to_string(), "Working Capital");
    }

    #[test]
    fn test_profile_partial_update() {
        let mut profile = Profile::default();
        profile.apply(ProfileUpdate {
            industry: Some("technology".to_string()),
            years: Some(4),
            ..Default::default()
        });

        assert_eq!(profile.industry, "technology");
        assert_eq!(profile.years, 4);
        assert_eq!(profile.location, "");
        assert!(!profile.is_complete);
    }

    #[test]
    fn test_onboarding_steps() {
        let mut profile = Profile::default();
        assert!(!OnboardingStep::Industry.is_satisfied(&profile));
        assert!(OnboardingStep::Size.is_satisfied(&profile));
        assert!(!profile.has_required_fields());

        profile.industry = "retail".to_string();
        profile.location = "Penang".to_string();
        profile.needs = vec![FundingNeed::Growth];
        assert!(profile.has_required_fields());
    }

    #[test]
    fn test_profile_deserializes_sparse_record() {
        let profile: Profile = serde_json::from_str(r#"{"industry":"food"}"#).unwrap();
        assert_eq!(profile.industry, "food");
        assert_eq!(profile.team_size_bracket, TeamSize::Micro);
        assert!(profile.needs.is_empty());
    }
}
