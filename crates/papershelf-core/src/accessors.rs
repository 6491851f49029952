//! Null-safe getters over a [`Paper`].
//!
//! These are the only functions the filter, stats and view-model code use to
//! read record fields, so the fallbacks below are applied consistently.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::record::Paper;

pub const UNTITLED: &str = "Untitled Paper";
pub const NO_AUTHORS: &str = "Authors not listed";

pub fn title(paper: &Paper) -> &str {
    paper.metadata.title.as_deref().unwrap_or(UNTITLED)
}

pub fn year(paper: &Paper) -> Option<i32> {
    paper.metadata.year
}

pub fn domain(paper: &Paper) -> Option<&str> {
    paper.problem.domain.as_deref()
}

pub fn venue(paper: &Paper) -> Option<&str> {
    paper.metadata.venue.as_deref()
}

pub fn score(paper: &Paper) -> Option<f64> {
    paper.analysis.relevance_score
}

pub fn keywords(paper: &Paper) -> &[String] {
    paper.metadata.keywords.as_deref().unwrap_or(&[])
}

pub fn author_names(paper: &Paper) -> Vec<&str> {
    paper
        .metadata
        .authors
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|a| a.name())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Comma-joined author names, truncated to `max_shown` with a `+N more` suffix.
pub fn authors(paper: &Paper, max_shown: usize) -> String {
    let names = author_names(paper);
    if names.is_empty() {
        return NO_AUTHORS.to_string();
    }
    if names.len() <= max_shown {
        return names.join(", ");
    }
    format!(
        "{} +{} more",
        names[..max_shown].join(", "),
        names.len() - max_shown
    )
}

/// Format a score the way it was written: `7` for whole numbers, `7.5` otherwise.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{}", score)
    }
}

/// Sort key approximating a locale-aware comparison: accents and case are
/// ignored at the first level.
pub fn collation_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paper(v: serde_json::Value) -> Paper {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_fallbacks_on_empty_record() {
        let p = paper(json!({}));
        assert_eq!(title(&p), UNTITLED);
        assert_eq!(year(&p), None);
        assert_eq!(domain(&p), None);
        assert_eq!(venue(&p), None);
        assert_eq!(score(&p), None);
        assert_eq!(authors(&p, 3), NO_AUTHORS);
        assert!(keywords(&p).is_empty());
    }

    #[test]
    fn test_empty_title_uses_fallback() {
        let p = paper(json!({"metadata": {"title": ""}}));
        assert_eq!(title(&p), UNTITLED);
    }

    #[test]
    fn test_score_zero_is_present() {
        let p = paper(json!({"your_analysis": {"relevance_score": 0}}));
        assert_eq!(score(&p), Some(0.0));
    }

    #[test]
    fn test_authors_truncation() {
        let p = paper(json!({"metadata": {"authors": [
            {"name": "A"}, "B", {"name": "C"}, "D", "E"
        ]}}));
        assert_eq!(authors(&p, 3), "A, B, C +2 more");
        assert_eq!(authors(&p, 5), "A, B, C, D, E");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(7.0), "7");
        assert_eq!(format_score(7.5), "7.5");
        assert_eq!(format_score(0.0), "0");
    }

    #[test]
    fn test_collation_key_folds_accents_and_case() {
        assert_eq!(collation_key("Émile"), collation_key("emile"));
        assert!(collation_key("apple") < collation_key("Banana"));
    }
}
