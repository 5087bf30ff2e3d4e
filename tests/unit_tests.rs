// Unit tests for Capital Cupid

use capital_cupid::core::{
    apply_suggestion, calculate_match_score, generate_draft,
    filters::{any_tag_contains, matched_needs, matches_industry},
    DeckStatus, DeckTracker, DecisionLogPolicy, Matcher,
};
use capital_cupid::models::{FundingNeed, Grant, Profile, ScoringWeights, SuggestionKind, Verdict};
use capital_cupid::services::StaticCatalog;
use chrono::{NaiveDate, Utc};

fn create_grant(id: &str, tags: &[&str]) -> Grant {
    Grant {
        id: id.to_string(),
        title: format!("Grant {}", id),
        agency: "Test Agency".to_string(),
        amount: "RM 10,000".to_string(),
        deadline: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        summary: "Test grant".to_string(),
        eligibility: vec![],
        timeline: None,
        link: None,
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        score: None,
        logo: None,
    }
}

fn create_profile(industry: &str, needs: Vec<FundingNeed>) -> Profile {
    Profile {
        industry: industry.to_string(),
        location: "Johor".to_string(),
        needs,
        is_complete: true,
        ..Profile::default()
    }
}

#[test]
fn test_tag_match_is_substring_and_case_insensitive() {
    let grant = create_grant("g", &["Digitalisation", "Manufacturing"]);

    assert!(any_tag_contains(&grant, "digital"));
    assert!(any_tag_contains(&grant, "MANUFACTURING"));
    assert!(!any_tag_contains(&grant, "export"));
}

#[test]
fn test_blank_industry_never_matches() {
    let grant = create_grant("g", &["Technology"]);

    assert!(!matches_industry(&grant, ""));
    assert!(!matches_industry(&grant, "   "));
    assert!(matches_industry(&grant, "tech"));
}

#[test]
fn test_matched_needs_in_profile_order() {
    let grant = create_grant("g", &["R&D", "Growth", "Export"]);
    let needs = [FundingNeed::Export, FundingNeed::Hiring, FundingNeed::ResearchAndDevelopment];

    assert_eq!(
        matched_needs(&grant, &needs),
        vec![FundingNeed::Export, FundingNeed::ResearchAndDevelopment]
    );
}

#[test]
fn test_score_is_clamped() {
    let grant = create_grant(
        "g",
        &["Technology", "Growth", "Digitalisation", "Working Capital", "Export", "Hiring", "R&D"],
    );
    let profile = create_profile(
        "technology",
        vec![
            FundingNeed::Growth,
            FundingNeed::Digitalisation,
            FundingNeed::WorkingCapital,
            FundingNeed::Export,
        ],
    );

    let breakdown = calculate_match_score(&grant, &profile, &ScoringWeights::default());

    assert_eq!(breakdown.score, 1.0);
    assert!(breakdown.industry_match);
    assert_eq!(breakdown.matched_needs.len(), 4);
}

#[test]
fn test_industry_match_scores_at_least_point_eight() {
    let matcher = Matcher::with_default_weights();
    let profile = create_profile("innovation", vec![]);

    let result = matcher.find_matches(&profile, StaticCatalog::mock_grants());

    for m in &result.matches {
        assert!(m.score > 0.3 && m.score <= 1.0);
        if m.industry_match {
            assert!(m.score >= 0.8 - 1e-9);
        }
    }
    assert_eq!(result.matches[0].grant.id, "cradle-cip");
}

#[test]
fn test_matches_sorted_descending() {
    let matcher = Matcher::with_default_weights();
    let profile = create_profile("technology", vec![FundingNeed::Growth, FundingNeed::Export]);

    let result = matcher.find_matches(&profile, StaticCatalog::mock_grants());

    for pair in result.matches.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_cursor_is_monotone_and_saturates() {
    let mut deck = DeckTracker::new();
    deck.set_candidates(StaticCatalog::mock_grants());

    let mut last = deck.current_index();
    for _ in 0..5 {
        deck.advance();
        assert!(deck.current_index() >= last);
        last = deck.current_index();
    }

    assert_eq!(deck.current_index(), 3);
    assert_eq!(deck.status(), DeckStatus::Exhausted);
}

#[test]
fn test_replacing_candidates_keeps_shortlist() {
    let mut deck = DeckTracker::new();
    deck.set_candidates(StaticCatalog::mock_grants());
    deck.record_swipe("mdec-digital-boost", Verdict::Accept, Utc::now(), DecisionLogPolicy::Append)
        .unwrap();

    deck.set_candidates(vec![create_grant("new", &["Export"])]);

    assert_eq!(deck.status(), DeckStatus::Active(0));
    assert_eq!(deck.shortlist(), ["mdec-digital-boost".to_string()]);
    assert_eq!(deck.decisions().len(), 1);
}

#[test]
fn test_deck_serializes_with_wire_names() {
    let mut deck = DeckTracker::new();
    deck.set_candidates(StaticCatalog::mock_grants());
    deck.shortlist_add("cradle-cip");

    let json = serde_json::to_value(&deck).unwrap();

    assert!(json.get("grants").is_some());
    assert_eq!(json["currentIndex"], 0);
    assert_eq!(json["shortlistIds"], serde_json::json!(["cradle-cip"]));
    assert!(json["decisions"].as_array().unwrap().is_empty());
}

#[test]
fn test_generated_draft_addresses_agency() {
    let grant = StaticCatalog::mock_grants().remove(1);
    let draft = generate_draft(&grant);

    assert!(draft.contains("Dear SME Corporation Malaysia,"));
    assert!(draft.contains("apply for the SME Corp Export Enhancement Grant on behalf of my company."));
}

#[test]
fn test_suggestions() {
    assert_eq!(
        apply_suggestion("We grow.  We hire.", SuggestionKind::Clarity),
        "We grow. Our approach ensures We hire."
    );
    assert_eq!(apply_suggestion("abcdefghij", SuggestionKind::Shorten), "abcdefg...");
    assert_eq!(
        apply_suggestion("WE ARE here", SuggestionKind::Formal),
        "we remain here"
    );
}
