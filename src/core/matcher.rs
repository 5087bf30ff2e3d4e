use crate::core::scoring::calculate_match_score;
use crate::models::{Grant, Profile, ScoredGrant, ScoringWeights};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredGrant>,
    pub total_candidates: usize,
}

impl MatchResult {
    /// Matched grants with their `score` field set, best first
    pub fn into_grants(self) -> Vec<Grant> {
        self.matches
            .into_iter()
            .map(|scored| {
                let mut grant = scored.grant;
                grant.score = Some(scored.score);
                grant
            })
            .collect()
    }
}

/// Grant matcher - scores every catalog entry against a profile
///
/// # Pipeline Stages
/// 1. Tag-overlap scoring
/// 2. Threshold filter (scores at or below `min_score` are dropped)
/// 3. Stable descending sort, so ties keep catalog order
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank catalog grants for a profile
    ///
    /// Never fails: an incomplete profile just yields base-only scores.
    ///
    /// # Arguments
    /// * `profile` - The SME profile built during onboarding
    /// * `candidates` - The catalog, in catalog order
    pub fn find_matches(&self, profile: &Profile, candidates: Vec<Grant>) -> MatchResult {
        let total_candidates = candidates.len();

        let mut scored: Vec<ScoredGrant> = candidates
            .into_iter()
            .filter_map(|grant| {
                let breakdown = calculate_match_score(&grant, profile, &self.weights);

                if breakdown.score > self.weights.min_score {
                    Some(ScoredGrant {
                        grant,
                        score: breakdown.score,
                        matched_needs: breakdown.matched_needs,
                        industry_match: breakdown.industry_match,
                    })
                } else {
                    None
                }
            })
            .collect();

        // sort_by is stable, ties stay in catalog order
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        MatchResult {
            matches: scored,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
