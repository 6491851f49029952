use std::collections::HashSet;
use std::fmt;

use crate::PLACEHOLDER;
use crate::accessors;
use crate::record::Paper;

/// Span of publication years in a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearRange {
    None,
    Single(i32),
    Span(i32, i32),
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str(PLACEHOLDER),
            Self::Single(y) => write!(f, "{y}"),
            Self::Span(lo, hi) => write!(f, "{lo}\u{2013}{hi}"),
        }
    }
}

/// Summary counts shown above the list.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total: usize,
    pub years: YearRange,
    pub domains: usize,
    /// Mean relevance score, `None` when no record is scored.
    pub mean_score: Option<f64>,
}

impl Stats {
    pub fn compute<'a, I>(papers: I) -> Self
    where
        I: IntoIterator<Item = &'a Paper>,
    {
        let mut total = 0;
        let mut min_year: Option<i32> = None;
        let mut max_year: Option<i32> = None;
        let mut domains: HashSet<&str> = HashSet::new();
        let mut score_sum = 0.0;
        let mut score_count = 0usize;

        for paper in papers {
            total += 1;
            if let Some(y) = accessors::year(paper) {
                min_year = Some(min_year.map_or(y, |m| m.min(y)));
                max_year = Some(max_year.map_or(y, |m| m.max(y)));
            }
            if let Some(d) = accessors::domain(paper) {
                domains.insert(d);
            }
            if let Some(s) = accessors::score(paper) {
                score_sum += s;
                score_count += 1;
            }
        }

        let years = match (min_year, max_year) {
            (Some(lo), Some(hi)) if lo == hi => YearRange::Single(lo),
            (Some(lo), Some(hi)) => YearRange::Span(lo, hi),
            _ => YearRange::None,
        };
        let mean_score = if score_count > 0 {
            Some(score_sum / score_count as f64)
        } else {
            None
        };

        Self {
            total,
            years,
            domains: domains.len(),
            mean_score,
        }
    }

    pub fn domains_label(&self) -> String {
        if self.domains == 0 {
            PLACEHOLDER.to_string()
        } else {
            self.domains.to_string()
        }
    }

    /// Mean score to one decimal, or the placeholder.
    pub fn mean_score_label(&self) -> String {
        match self.mean_score {
            Some(mean) => format!("{:.1}", mean),
            None => PLACEHOLDER.to_string(),
        }
    }
}
