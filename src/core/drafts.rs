use regex::{NoExpand, Regex};
use std::sync::LazyLock;

use crate::models::{Grant, SuggestionKind};

/// Fraction of the draft kept by the `shorten` suggestion
const SHORTEN_RATIO: f64 = 0.7;

/// Build the templated application letter for a grant
pub fn generate_draft(grant: &Grant) -> String {
    format!(
        "[AI-Generated Draft Application]

Dear {agency},

I am writing to formally apply for the {title} on behalf of my company.

Our business operates in the technology sector and has been providing innovative solutions to our clients for the past few years. We believe this grant opportunity aligns perfectly with our growth objectives and strategic vision.

**Project Overview:**
We are seeking funding to expand our operations and enhance our service offerings. The requested funding will be utilized for:

• Research and development of new technologies
• Expansion of our team and operational capacity
• Implementation of sustainable business practices
• Market development and customer acquisition

**Expected Outcomes:**
With this grant funding, we anticipate achieving significant milestones including increased revenue, job creation, and contribution to the local economy. Our projected timeline for implementation is 12-18 months.

**Company Qualifications:**
Our team possesses the necessary expertise and experience to successfully execute this project. We have a proven track record of delivering results and maintaining high standards of operational excellence.

We are committed to meeting all grant requirements and providing regular progress reports as needed. Thank you for considering our application.

Sincerely,
[Your Name]
[Company Name]",
        agency = grant.agency,
        title = grant.title,
    )
}

/// `.` followed by a whitespace run
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.]\s+").expect("sentence break pattern compiles"));
static WE_ARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)we are").expect("'we are' pattern compiles"));
static OUR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)our").expect("'our' pattern compiles"));

/// Apply one of the canned rewrite suggestions to draft content
pub fn apply_suggestion(content: &str, kind: SuggestionKind) -> String {
    match kind {
        SuggestionKind::Clarity => SENTENCE_BREAK
            .replace_all(content, NoExpand(". Our approach ensures "))
            .into_owned(),
        SuggestionKind::Shorten => shorten(content),
        SuggestionKind::Formal => {
            let content = WE_ARE.replace_all(content, NoExpand("we remain"));
            OUR.replace_all(&content, NoExpand("our organization's")).into_owned()
        }
    }
}

fn shorten(content: &str) -> String {
    let total = content.chars().count();
    let keep = (total as f64 * SHORTEN_RATIO).floor() as usize;

    let mut out: String = content.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::StaticCatalog;

    #[test]
    fn test_generated_draft_names_grant() {
        let grant = &StaticCatalog::mock_grants()[0];
        let draft = generate_draft(grant);

        assert!(draft.starts_with("[AI-Generated Draft Application]"));
        assert!(draft.contains("Dear Malaysia Digital Economy Corporation,"));
        assert!(draft.contains("apply for the MDEC Digital Boost Initiative on behalf"));
    }

    #[test]
    fn test_clarity_suggestion() {
        let out = apply_suggestion("We grow.  We hire.\nWe export.", SuggestionKind::Clarity);
        assert_eq!(
            out,
            "We grow. Our approach ensures We hire. Our approach ensures We export."
        );
    }

    #[test]
    fn test_shorten_suggestion() {
        let out = apply_suggestion("0123456789", SuggestionKind::Shorten);
        assert_eq!(out, "0123456...");

        let out = apply_suggestion("", SuggestionKind::Shorten);
        assert_eq!(out, "...");
    }

    #[test]
    fn test_shorten_counts_characters() {
        let out = apply_suggestion("• a • b • c", SuggestionKind::Shorten);
        assert_eq!(out, "• a • b...");
    }

    #[test]
    fn test_formal_suggestion() {
        let out = apply_suggestion("We are ready. Our team grows.", SuggestionKind::Formal);
        assert_eq!(out, "we remain ready. our organization's team grows.");
    }

    #[test]
    fn test_formal_matches_inside_words() {
        let out = apply_suggestion("WE ARE proud of your four hours", SuggestionKind::Formal);
        assert_eq!(
            out,
            "we remain proud of your organization's four organization's hour organization'ss"
        );
    }

    #[test]
    fn test_clarity_leaves_trailing_period() {
        let out = apply_suggestion("Done.\t\n Next. End.", SuggestionKind::Clarity);
        assert_eq!(out, "Done. Our approach ensures Next. Our approach ensures End.");
    }
}
