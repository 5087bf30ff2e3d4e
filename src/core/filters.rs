use crate::models::{FundingNeed, Grant};

/// Case-insensitive substring test of `needle` against every grant tag
///
/// A blank needle never matches, so an unanswered questionnaire field
/// cannot earn a bonus on its own.
#[inline]
pub fn any_tag_contains(grant: &Grant, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }

    let needle = needle.to_lowercase();
    grant
        .tags()
        .iter()
        .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Check if a grant is tagged with the profile's industry
#[inline]
pub fn matches_industry(grant: &Grant, industry: &str) -> bool {
    any_tag_contains(grant, industry)
}

/// Profile needs that appear in the grant's tags, in profile order
#[inline]
pub fn matched_needs(grant: &Grant, needs: &[FundingNeed]) -> Vec<FundingNeed> {
    needs
        .iter()
        .filter(|need| any_tag_contains(grant, need.as_str()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::StaticCatalog;

    fn grant(id: &str) -> Grant {
        StaticCatalog::mock_grants()
            .into_iter()
            .find(|g| g.id == id)
            .unwrap()
    }

    #[test]
    fn test_industry_match_is_case_insensitive() {
        let mdec = grant("mdec-digital-boost");
        assert!(matches_industry(&mdec, "technology"));
        assert!(matches_industry(&mdec, "TECH"));
        assert!(matches_industry(&mdec, "manufacturing"));
        assert!(!matches_industry(&mdec, "retail"));
    }

    #[test]
    fn test_blank_needle_never_matches() {
        let mdec = grant("mdec-digital-boost");
        assert!(!matches_industry(&mdec, ""));
        assert!(!matches_industry(&mdec, "   "));
    }

    #[test]
    fn test_untagged_grant_matches_nothing() {
        let mut mdec = grant("mdec-digital-boost");
        mdec.tags = None;
        assert!(!matches_industry(&mdec, "technology"));
        assert!(matched_needs(&mdec, &[FundingNeed::Digitalisation]).is_empty());
    }

    #[test]
    fn test_matched_needs_keeps_profile_order() {
        let cradle = grant("cradle-cip");
        let needs = [
            FundingNeed::Export,
            FundingNeed::ResearchAndDevelopment,
            FundingNeed::Growth,
        ];

        assert_eq!(
            matched_needs(&cradle, &needs),
            vec![FundingNeed::ResearchAndDevelopment]
        );
    }
}
