use crate::core::filters::{matched_needs, matches_industry};
use crate::models::{FundingNeed, Grant, Profile, ScoringWeights};

/// Breakdown of a single grant's score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub industry_match: bool,
    pub matched_needs: Vec<FundingNeed>,
}

/// Calculate a relevance score (0-1) for a grant based on the profile
///
/// Scoring formula:
/// score = min(
///     base                          # 0.5, so no grant silently scores zero
///     + industry_bonus              # 0.3 if any tag contains the industry
///     + need_bonus * matched_needs  # 0.1 per need found in the tags
///     , max_score)                  # 1.0
pub fn calculate_match_score(
    grant: &Grant,
    profile: &Profile,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let industry_match = matches_industry(grant, &profile.industry);
    let matched_needs = matched_needs(grant, &profile.needs);

    let mut score = weights.base;
    if industry_match {
        score += weights.industry_bonus;
    }
    score += weights.need_bonus * matched_needs.len() as f64;

    ScoreBreakdown {
        score: score.min(weights.max_score),
        industry_match,
        matched_needs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::StaticCatalog;

    fn profile(industry: &str, needs: Vec<FundingNeed>) -> Profile {
        Profile {
            industry: industry.to_string(),
            needs,
            ..Profile::default()
        }
    }

    fn catalog_grant(id: &str) -> Grant {
        StaticCatalog::mock_grants()
            .into_iter()
            .find(|g| g.id == id)
            .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_base_only_for_empty_profile() {
        let weights = ScoringWeights::default();
        for grant in StaticCatalog::mock_grants() {
            let result = calculate_match_score(&grant, &Profile::default(), &weights);
            assert!(approx(result.score, 0.5));
            assert!(!result.industry_match);
        }
    }

    #[test]
    fn test_industry_and_need_bonus() {
        let grant = catalog_grant("mdec-digital-boost");
        let result = calculate_match_score(
            &grant,
            &profile("technology", vec![FundingNeed::Digitalisation]),
            &ScoringWeights::default(),
        );

        assert!(approx(result.score, 0.9));
        assert!(result.industry_match);
        assert_eq!(result.matched_needs, vec![FundingNeed::Digitalisation]);
    }

    #[test]
    fn test_score_clamped_to_max() {
        let mut grant = catalog_grant("mdec-digital-boost");
        grant.tags = Some(
            FundingNeed::ALL
                .iter()
                .map(|need| format!("Technology {}", need))
                .collect(),
        );

        let result = calculate_match_score(
            &grant,
            &profile("technology", FundingNeed::ALL.to_vec()),
            &ScoringWeights::default(),
        );

        // 0.5 + 0.3 + 6 * 0.1 = 1.4 before the clamp
        assert_eq!(result.matched_needs.len(), 6);
        assert!(approx(result.score, 1.0));
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoringWeights {
            base: 0.2,
            industry_bonus: 0.5,
            ..ScoringWeights::default()
        };
        let grant = catalog_grant("cradle-cip");
        let result = calculate_match_score(&grant, &profile("technology", vec![]), &weights);

        assert!(approx(result.score, 0.7));
    }
}
