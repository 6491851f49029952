use crate::palette::{DomainColors, ThemeMode};
use crate::query::{self, ActiveFilter, Facets, FilterKey, QueryState, SortKey};
use crate::record::Paper;
use crate::stats::Stats;
use crate::view_model::{self, DetailView, ListView, Tab};

/// Everything a front end needs between renders: the loaded records, the
/// current query and the derived visible list.
#[derive(Debug, Clone)]
pub struct Session {
    papers: Vec<Paper>,
    query: QueryState,
    colors: DomainColors,
    facets: Facets,
    visible: Vec<usize>,
    stats: Stats,
}

impl Session {
    pub fn new(papers: Vec<Paper>) -> Self {
        let facets = Facets::from_papers(&papers);
        let mut session = Self {
            papers,
            query: QueryState::default(),
            colors: DomainColors::new(),
            facets,
            visible: Vec::new(),
            stats: Stats::compute(std::iter::empty()),
        };
        session.refresh();
        session
    }

    /// Recompute the visible list and its stats from scratch.
    pub fn refresh(&mut self) {
        self.visible = query::filtered_indices(&self.papers, &self.query);
        self.stats = Stats::compute(self.visible.iter().map(|&i| &self.papers[i]));
        tracing::debug!(
            visible = self.visible.len(),
            total = self.papers.len(),
            sort = self.query.sort.as_str(),
            "refreshed view"
        );
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Indices into [`Session::papers`] in display order.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_papers(&self) -> impl Iterator<Item = &Paper> {
        self.visible.iter().map(|&i| &self.papers[i])
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        query::active_filters(&self.query)
    }

    pub fn set_search(&mut self, text: &str) {
        if self.query.search != text {
            self.query.search = text.to_string();
            self.refresh();
        }
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.query.year = year;
        self.refresh();
    }

    pub fn set_domain(&mut self, domain: Option<String>) {
        self.query.domain = domain;
        self.refresh();
    }

    pub fn set_venue(&mut self, venue: Option<String>) {
        self.query.venue = venue;
        self.refresh();
    }

    pub fn set_min_score(&mut self, min: Option<f64>) {
        self.query.min_score = min;
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
        self.refresh();
    }

    pub fn clear_filter(&mut self, key: FilterKey) {
        self.query.clear(key);
        self.refresh();
    }

    /// Clear every filter, keeping the sort order.
    pub fn reset_filters(&mut self) {
        self.query.reset();
        self.refresh();
    }

    pub fn list_view(&mut self, mode: ThemeMode) -> ListView {
        view_model::build_list(
            &self.papers,
            &self.visible,
            self.query.sort,
            &mut self.colors,
            mode,
        )
    }

    /// Detail view for the record at `index` in [`Session::papers`].
    pub fn detail(&mut self, index: usize, tab: Tab, mode: ThemeMode) -> Option<DetailView> {
        let paper = self.papers.get(index)?;
        Some(view_model::build_detail(paper, tab, &mut self.colors, mode))
    }
}
