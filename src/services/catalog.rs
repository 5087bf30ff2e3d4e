use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Grant;

/// Errors that can occur when looking up grants
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Grant not found: {0}")]
    NotFound(String),
}

/// Read-only source of grant candidates
///
/// The matcher only ever sees the list returned by `all_candidates`, so a
/// registry-backed source can replace the static catalog without touching
/// the scoring code.
pub trait CandidateSource: Send + Sync {
    /// All grants, in catalog order
    fn all_candidates(&self) -> Vec<Grant>;

    fn get_by_id(&self, id: &str) -> Result<Grant, CatalogError> {
        self.all_candidates()
            .into_iter()
            .find(|grant| grant.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Catalog grants whose id is in `ids`, in catalog order
    fn get_many(&self, ids: &[String]) -> Vec<Grant> {
        self.all_candidates()
            .into_iter()
            .filter(|grant| ids.contains(&grant.id))
            .collect()
    }
}

/// In-memory catalog seeded with the three demo grants
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    grants: Vec<Grant>,
}

impl StaticCatalog {
    pub fn new(grants: Vec<Grant>) -> Self {
        Self { grants }
    }

    /// The demo catalog shipped with the front end
    pub fn mock_grants() -> Vec<Grant> {
        vec![
            Grant {
                id: "mdec-digital-boost".to_string(),
                title: "MDEC Digital Boost Initiative".to_string(),
                agency: "Malaysia Digital Economy Corporation".to_string(),
                amount: "RM 50,000 - RM 200,000".to_string(),
                deadline: date(2024, 12, 31),
                summary: "Funding for SMEs to accelerate digital transformation and adopt Industry 4.0 technologies.".to_string(),
                eligibility: strings(&[
                    "Malaysian-owned SME",
                    "Annual revenue below RM50 million",
                    "Established for at least 2 years",
                    "Technology or manufacturing sector",
                ]),
                timeline: Some("4-6 weeks processing".to_string()),
                link: None,
                tags: Some(strings(&["Technology", "Digitalisation", "Manufacturing"])),
                score: Some(0.85),
                logo: Some("MDEC".to_string()),
            },
            Grant {
                id: "sme-corp-export".to_string(),
                title: "SME Corp Export Enhancement Grant".to_string(),
                agency: "SME Corporation Malaysia".to_string(),
                amount: "RM 100,000 - RM 500,000".to_string(),
                deadline: date(2024, 11, 15),
                summary: "Support for SMEs looking to expand into international markets and boost export capabilities.".to_string(),
                eligibility: strings(&[
                    "Valid SSM registration",
                    "Minimum 60% Malaysian ownership",
                    "Export-ready products/services",
                    "Financial capacity for co-funding",
                ]),
                timeline: Some("6-8 weeks processing".to_string()),
                link: None,
                tags: Some(strings(&["Export", "Growth", "International"])),
                score: Some(0.75),
                logo: Some("SME".to_string()),
            },
            Grant {
                id: "cradle-cip".to_string(),
                title: "CRADLE Commercialisation of Innovation Programme".to_string(),
                agency: "CRADLE Fund".to_string(),
                amount: "RM 250,000 - RM 1,000,000".to_string(),
                deadline: date(2024, 10, 30),
                summary: "Funding for innovative startups and SMEs to commercialize R&D results and innovative solutions.".to_string(),
                eligibility: strings(&[
                    "Malaysian company",
                    "Technology-based innovation",
                    "Proof of concept completed",
                    "Clear commercialization plan",
                ]),
                timeline: Some("8-12 weeks processing".to_string()),
                link: None,
                tags: Some(strings(&["R&D", "Innovation", "Technology"])),
                score: Some(0.70),
                logo: Some("CRADLE".to_string()),
            },
        ]
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(Self::mock_grants())
    }
}

impl CandidateSource for StaticCatalog {
    fn all_candidates(&self) -> Vec<Grant> {
        self.grants.clone()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Literal calendar dates above are all valid
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
