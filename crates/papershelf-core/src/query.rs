use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::accessors::{self, format_score};
use crate::record::Paper;

/// Minimum-score choices offered by the score selector.
pub const SCORE_THRESHOLDS: &[f64] = &[4.0, 5.0, 6.0, 7.0, 8.0, 9.0];

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    YearDesc,
    YearAsc,
    ScoreDesc,
    TitleAsc,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            Self::YearDesc => Self::YearAsc,
            Self::YearAsc => Self::ScoreDesc,
            Self::ScoreDesc => Self::TitleAsc,
            Self::TitleAsc => Self::YearDesc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::YearDesc => "newest first",
            Self::YearAsc => "oldest first",
            Self::ScoreDesc => "highest score",
            Self::TitleAsc => "title A\u{2013}Z",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::YearDesc => "year-desc",
            Self::YearAsc => "year-asc",
            Self::ScoreDesc => "score-desc",
            Self::TitleAsc => "title-asc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "year-desc" => Some(Self::YearDesc),
            "year-asc" => Some(Self::YearAsc),
            "score-desc" => Some(Self::ScoreDesc),
            "title-asc" => Some(Self::TitleAsc),
            _ => None,
        }
    }

    fn compare(self, a: &Paper, b: &Paper) -> Ordering {
        match self {
            Self::YearAsc => year_key(a).cmp(&year_key(b)),
            Self::YearDesc => year_key(b).cmp(&year_key(a)),
            Self::ScoreDesc => score_key(b)
                .partial_cmp(&score_key(a))
                .unwrap_or(Ordering::Equal),
            Self::TitleAsc => {
                let (ta, tb) = (accessors::title(a), accessors::title(b));
                accessors::collation_key(ta)
                    .cmp(&accessors::collation_key(tb))
                    .then_with(|| ta.cmp(tb))
            }
        }
    }
}

fn year_key(p: &Paper) -> i32 {
    accessors::year(p).unwrap_or(0)
}

fn score_key(p: &Paper) -> f64 {
    accessors::score(p).unwrap_or(-1.0)
}

/// Identifies one filter criterion, e.g. for removing an active-filter chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Search,
    Year,
    Domain,
    Venue,
    Score,
}

/// Current search, filter and sort parameters. Empty criteria are inactive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub search: String,
    pub year: Option<i32>,
    pub domain: Option<String>,
    pub venue: Option<String>,
    pub min_score: Option<f64>,
    pub sort: SortKey,
}

impl QueryState {
    pub fn clear(&mut self, key: FilterKey) {
        match key {
            FilterKey::Search => self.search.clear(),
            FilterKey::Year => self.year = None,
            FilterKey::Domain => self.domain = None,
            FilterKey::Venue => self.venue = None,
            FilterKey::Score => self.min_score = None,
        }
    }

    /// Clear every filter. The sort key is kept.
    pub fn reset(&mut self) {
        *self = Self {
            sort: self.sort,
            ..Self::default()
        };
    }

    pub fn is_filtered(&self) -> bool {
        !active_filters(self).is_empty()
    }
}

/// Lower-cased text blob the search query is matched against.
pub fn haystack(paper: &Paper) -> String {
    let mut parts: Vec<String> = vec![accessors::title(paper).to_string()];
    parts.extend(accessors::domain(paper).map(str::to_string));
    parts.extend(accessors::venue(paper).map(str::to_string));
    parts.extend(accessors::year(paper).map(|y| y.to_string()));
    parts.extend(accessors::author_names(paper).into_iter().map(str::to_string));
    parts.extend(accessors::keywords(paper).iter().cloned());
    parts.extend(paper.problem.problem_statement.clone());
    parts.join(" ").to_lowercase()
}

/// Conjunctive filter predicate.
pub fn matches(paper: &Paper, query: &QueryState) -> bool {
    let needle = query.search.trim().to_lowercase();
    if !needle.is_empty() && !haystack(paper).contains(&needle) {
        return false;
    }
    if let Some(year) = query.year
        && accessors::year(paper) != Some(year)
    {
        return false;
    }
    if let Some(domain) = &query.domain
        && accessors::domain(paper) != Some(domain.as_str())
    {
        return false;
    }
    if let Some(venue) = &query.venue
        && accessors::venue(paper) != Some(venue.as_str())
    {
        return false;
    }
    if let Some(min) = query.min_score {
        match accessors::score(paper) {
            Some(s) if s >= min => {}
            _ => return false,
        }
    }
    true
}

/// Indices into `papers` of the records matching `query`, in sort order.
/// The sort is stable, so ties keep input order.
pub fn filtered_indices(papers: &[Paper], query: &QueryState) -> Vec<usize> {
    let mut indices: Vec<usize> = papers
        .iter()
        .enumerate()
        .filter(|(_, p)| matches(p, query))
        .map(|(i, _)| i)
        .collect();
    indices.sort_by(|&a, &b| query.sort.compare(&papers[a], &papers[b]));
    indices
}

pub fn filter_and_sort<'a>(papers: &'a [Paper], query: &QueryState) -> Vec<&'a Paper> {
    filtered_indices(papers, query)
        .into_iter()
        .map(|i| &papers[i])
        .collect()
}

/// A removable chip describing one active criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveFilter {
    pub key: FilterKey,
    pub label: String,
}

pub fn active_filters(query: &QueryState) -> Vec<ActiveFilter> {
    let mut chips = Vec::new();
    if !query.search.is_empty() {
        chips.push(ActiveFilter {
            key: FilterKey::Search,
            label: format!("\"{}\"", query.search),
        });
    }
    if let Some(year) = query.year {
        chips.push(ActiveFilter {
            key: FilterKey::Year,
            label: format!("Year: {year}"),
        });
    }
    if let Some(domain) = &query.domain {
        chips.push(ActiveFilter {
            key: FilterKey::Domain,
            label: format!("Domain: {domain}"),
        });
    }
    if let Some(venue) = &query.venue {
        chips.push(ActiveFilter {
            key: FilterKey::Venue,
            label: format!("Venue: {venue}"),
        });
    }
    if let Some(min) = query.min_score {
        chips.push(ActiveFilter {
            key: FilterKey::Score,
            label: format!("Score \u{2265} {}", format_score(min)),
        });
    }
    chips
}

/// Distinct values offered by the year, domain and venue selectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    /// Newest first.
    pub years: Vec<i32>,
    pub domains: Vec<String>,
    pub venues: Vec<String>,
}

impl Facets {
    pub fn from_papers(papers: &[Paper]) -> Self {
        let years: BTreeSet<i32> = papers.iter().filter_map(accessors::year).collect();
        let domains: BTreeSet<&str> = papers.iter().filter_map(accessors::domain).collect();
        let venues: BTreeSet<&str> = papers.iter().filter_map(accessors::venue).collect();
        Self {
            years: years.into_iter().rev().collect(),
            domains: domains.into_iter().map(str::to_string).collect(),
            venues: venues.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Step a selector through `None → options[0] → … → options[n-1] → None`.
pub fn cycle_option<T: Clone + PartialEq>(current: Option<&T>, options: &[T]) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(value) => match options.iter().position(|o| o == value) {
            Some(i) => options.get(i + 1).cloned(),
            None => options.first().cloned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paper(v: serde_json::Value) -> Paper {
        serde_json::from_value(v).unwrap()
    }

    fn scored(id: &str, score: Option<f64>) -> Paper {
        let mut p = paper(json!({ "paper_id": id }));
        p.analysis.relevance_score = score;
        p
    }

    fn ids(papers: &[&Paper]) -> Vec<String> {
        papers.iter().map(|p| p.paper_id.clone()).collect()
    }

    #[test]
    fn test_min_score_excludes_absent_and_low() {
        let papers = vec![
            scored("n", None),
            scored("3", Some(3.0)),
            scored("5", Some(5.0)),
            scored("9", Some(9.0)),
        ];
        let query = QueryState {
            min_score: Some(5.0),
            sort: SortKey::YearDesc,
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&papers, &query)), vec!["5", "9"]);
    }

    #[test]
    fn test_search_hits_authors_keywords_and_statement() {
        let p = paper(json!({
            "metadata": {"title": "Graph Nets", "authors": [{"name": "Jane Roe"}], "keywords": ["GNN"], "year": 2022},
            "problem": {"problem_statement": "Message passing is slow"}
        }));
        let hit = |q: &str| {
            matches(
                &p,
                &QueryState {
                    search: q.into(),
                    ..Default::default()
                },
            )
        };
        assert!(hit("roe"));
        assert!(hit("gnn"));
        assert!(hit("MESSAGE passing"));
        assert!(hit("  2022 "));
        assert!(!hit("transformer"));
    }

    #[test]
    fn test_exact_match_filters() {
        let p = paper(json!({"metadata": {"year": 2021, "venue": "ACL"}, "problem": {"domain": "nlp"}}));
        let mut q = QueryState {
            year: Some(2021),
            domain: Some("nlp".into()),
            venue: Some("ACL".into()),
            ..Default::default()
        };
        assert!(matches(&p, &q));
        q.venue = Some("acl".into());
        assert!(!matches(&p, &q));
    }

    #[test]
    fn test_score_sort_puts_absent_last_and_is_stable() {
        let papers = vec![
            scored("a", None),
            scored("b", Some(0.0)),
            scored("c", Some(8.0)),
            scored("d", Some(8.0)),
        ];
        let q = QueryState {
            sort: SortKey::ScoreDesc,
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&papers, &q)), vec!["c", "d", "b", "a"]);
    }

    #[test]
    fn test_title_sort_ignores_case_and_accents() {
        let papers = vec![
            paper(json!({"paper_id": "z", "metadata": {"title": "zeta"}})),
            paper(json!({"paper_id": "e", "metadata": {"title": "Étude"}})),
            paper(json!({"paper_id": "a", "metadata": {"title": "alpha"}})),
        ];
        let q = QueryState {
            sort: SortKey::TitleAsc,
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&papers, &q)), vec!["a", "e", "z"]);
    }

    #[test]
    fn test_active_filters_and_reset_keeps_sort() {
        let mut q = QueryState {
            search: "gnn".into(),
            year: Some(2020),
            min_score: Some(7.0),
            sort: SortKey::TitleAsc,
            ..Default::default()
        };
        let labels: Vec<String> = active_filters(&q).into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["\"gnn\"", "Year: 2020", "Score \u{2265} 7"]);

        q.clear(FilterKey::Year);
        assert_eq!(q.year, None);
        q.reset();
        assert!(!q.is_filtered());
        assert_eq!(q.sort, SortKey::TitleAsc);
    }

    #[test]
    fn test_facets_are_distinct_and_ordered() {
        let papers = vec![
            paper(json!({"metadata": {"year": 2019, "venue": "NeurIPS"}, "problem": {"domain": "vision"}})),
            paper(json!({"metadata": {"year": 2023, "venue": "ACL"}, "problem": {"domain": "nlp"}})),
            paper(json!({"metadata": {"year": 2019}, "problem": {"domain": "nlp"}})),
        ];
        let f = Facets::from_papers(&papers);
        assert_eq!(f.years, vec![2023, 2019]);
        assert_eq!(f.domains, vec!["nlp", "vision"]);
        assert_eq!(f.venues, vec!["ACL", "NeurIPS"]);
    }

    #[test]
    fn test_cycle_option_wraps_to_none() {
        let opts = vec![1, 2];
        assert_eq!(cycle_option(None, &opts), Some(1));
        assert_eq!(cycle_option(Some(&1), &opts), Some(2));
        assert_eq!(cycle_option(Some(&2), &opts), None);
        assert_eq!(cycle_option::<i32>(None, &[]), None);
    }

    #[test]
    fn test_sort_key_round_trips_original_names() {
        for key in [SortKey::YearDesc, SortKey::YearAsc, SortKey::ScoreDesc, SortKey::TitleAsc] {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
    }
}
