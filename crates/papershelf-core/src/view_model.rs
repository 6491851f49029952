//! Declarative render description for the card list and the detail panel.
//!
//! Everything here is a pure function of the records, the active sort, the
//! display mode and the session's domain color assignment. Front ends only
//! turn these values into widgets.

use std::fmt;

use crate::accessors::{self, format_score};
use crate::palette::{DomainColor, DomainColors, ThemeMode};
use crate::query::SortKey;
use crate::record::{Flag, Paper};
use crate::PLACEHOLDER;

/// Author names shown on a card.
pub const CARD_AUTHORS: usize = 3;
/// Author names shown in the panel byline.
pub const PANEL_AUTHORS: usize = 5;
/// Keyword chips shown on a card before the overflow count.
pub const MAX_KEYWORDS: usize = 4;

/// Severity band of a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Mid,
    Low,
    None,
}

impl ScoreBand {
    pub fn of(score: Option<f64>) -> Self {
        match score {
            None => Self::None,
            Some(s) if s >= 7.0 => Self::High,
            Some(s) if s >= 4.0 => Self::Mid,
            Some(_) => Self::Low,
        }
    }
}

/// Circular progress indicator for a score out of 10.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRing {
    pub score: Option<f64>,
    /// Filled share of the ring, `score / 10` clamped to `0..=1`.
    pub fraction: f64,
    pub band: ScoreBand,
}

impl ScoreRing {
    pub fn new(score: Option<f64>) -> Self {
        Self {
            score,
            fraction: score.map_or(0.0, |s| (s / 10.0).clamp(0.0, 1.0)),
            band: ScoreBand::of(score),
        }
    }

    pub fn label(&self) -> String {
        self.score
            .map(format_score)
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Code,
    Model,
    Demo,
}

impl Availability {
    pub fn label(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Model => "Model",
            Self::Demo => "Demo",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainTag {
    pub name: String,
    pub color: DomainColor,
}

/// One card in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Index into the session's record list.
    pub index: usize,
    pub id: String,
    pub title: String,
    pub ring: ScoreRing,
    pub authors: String,
    pub venue: Option<String>,
    pub year: Option<i32>,
    pub domain: Option<DomainTag>,
    pub keywords: Vec<String>,
    pub keyword_overflow: usize,
    pub availability: Vec<Availability>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearLabel {
    Known(i32),
    Unknown,
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(y) => write!(f, "{y}"),
            Self::Unknown => f.write_str("Year Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup {
    pub label: YearLabel,
    pub cards: Vec<Card>,
}

impl YearGroup {
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListView {
    pub groups: Vec<YearGroup>,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.groups.iter().map(YearGroup::count).sum()
    }

    /// Cards in display order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.groups.iter().flat_map(|g| g.cards.iter())
    }
}

pub fn build_card(
    index: usize,
    paper: &Paper,
    colors: &mut DomainColors,
    mode: ThemeMode,
) -> Card {
    let keywords = accessors::keywords(paper);
    let outputs = &paper.outputs;
    let availability = [
        (outputs.code_available, Availability::Code),
        (outputs.model_available, Availability::Model),
        (outputs.demo_available, Availability::Demo),
    ]
    .into_iter()
    .filter_map(|(on, a)| on.then_some(a))
    .collect();

    Card {
        index,
        id: paper.paper_id.clone(),
        title: accessors::title(paper).to_string(),
        ring: ScoreRing::new(accessors::score(paper)),
        authors: accessors::authors(paper, CARD_AUTHORS),
        venue: accessors::venue(paper).map(str::to_string),
        year: accessors::year(paper),
        domain: domain_tag(paper, colors, mode),
        keywords: keywords.iter().take(MAX_KEYWORDS).cloned().collect(),
        keyword_overflow: keywords.len().saturating_sub(MAX_KEYWORDS),
        availability,
    }
}

fn domain_tag(paper: &Paper, colors: &mut DomainColors, mode: ThemeMode) -> Option<DomainTag> {
    accessors::domain(paper).map(|d| DomainTag {
        name: d.to_string(),
        color: colors.color(d, mode),
    })
}

/// Group the visible records by year.
///
/// Known years run newest first unless the sort is oldest first; the unknown
/// group is always last. Inside a group, cards keep the order of `visible`.
pub fn build_list(
    papers: &[Paper],
    visible: &[usize],
    sort: SortKey,
    colors: &mut DomainColors,
    mode: ThemeMode,
) -> ListView {
    let mut groups: Vec<YearGroup> = Vec::new();
    for &index in visible {
        let Some(paper) = papers.get(index) else {
            continue;
        };
        let label = accessors::year(paper).map_or(YearLabel::Unknown, YearLabel::Known);
        let card = build_card(index, paper, colors, mode);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.cards.push(card),
            None => groups.push(YearGroup {
                label,
                cards: vec![card],
            }),
        }
    }

    groups.sort_by(|a, b| match (a.label, b.label) {
        (YearLabel::Unknown, YearLabel::Unknown) => std::cmp::Ordering::Equal,
        (YearLabel::Unknown, _) => std::cmp::Ordering::Greater,
        (_, YearLabel::Unknown) => std::cmp::Ordering::Less,
        (YearLabel::Known(x), YearLabel::Known(y)) => {
            if sort == SortKey::YearAsc {
                x.cmp(&y)
            } else {
                y.cmp(&x)
            }
        }
    });

    ListView { groups }
}

/// Detail panel tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    Experiments,
    Contributions,
    Analysis,
    Metadata,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Overview,
            Tab::Experiments,
            Tab::Contributions,
            Tab::Analysis,
            Tab::Metadata,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Experiments => "Experiments",
            Self::Contributions => "Contributions",
            Self::Analysis => "Analysis",
            Self::Metadata => "Metadata",
        }
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|&t| t == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|&t| t == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }

    fn placeholder(self) -> &'static str {
        match self {
            Self::Overview => "No overview data available.",
            Self::Experiments => "No experiment data available.",
            Self::Contributions => "No contributions listed.",
            Self::Analysis => "No analysis data available.",
            Self::Metadata => "No metadata available.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Badge {
    Year(i32),
    Venue(String),
    Domain(DomainTag),
    Score(ScoreRing),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipStyle {
    Keyword,
    Strength,
    Weakness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    High,
    Medium,
    Low,
}

impl Difficulty {
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("high") {
            Self::High
        } else if lower.contains("low") {
            Self::Low
        } else {
            Self::Medium
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReproFlag {
    ClearMethodology(bool),
    PublicDataset(String),
    Hyperparameters(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Text(String),
    /// Model name with an optional method type.
    Method {
        name: String,
        kind: Option<String>,
    },
    List(Vec<String>),
    Chips(ChipStyle, Vec<String>),
    Table {
        header: Option<Vec<&'static str>>,
        rows: Vec<Vec<String>>,
    },
    Ring(ScoreRing),
    Flags(Vec<ReproFlag>),
    Difficulty(Difficulty, String),
    Authors(Vec<(String, Option<String>)>),
    Links(Vec<Link>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabBody {
    Sections(Vec<Section>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub byline: String,
    pub badges: Vec<Badge>,
    pub tab: Tab,
    pub body: TabBody,
    /// Outbound links (DOI, paper, code, model, demo, PDF) regardless of tab.
    pub links: Vec<Link>,
}

pub fn build_detail(
    paper: &Paper,
    tab: Tab,
    colors: &mut DomainColors,
    mode: ThemeMode,
) -> DetailView {
    let mut badges = Vec::new();
    if let Some(y) = accessors::year(paper) {
        badges.push(Badge::Year(y));
    }
    if let Some(v) = accessors::venue(paper) {
        badges.push(Badge::Venue(v.to_string()));
    }
    if let Some(tag) = domain_tag(paper, colors, mode) {
        badges.push(Badge::Domain(tag));
    }
    if let Some(s) = accessors::score(paper) {
        badges.push(Badge::Score(ScoreRing::new(Some(s))));
    }

    let sections = match tab {
        Tab::Overview => overview(paper),
        Tab::Experiments => experiments(paper),
        Tab::Contributions => contributions(paper),
        Tab::Analysis => analysis(paper),
        Tab::Metadata => metadata(paper),
    };
    let body = if sections.is_empty() {
        TabBody::Placeholder(tab.placeholder())
    } else {
        TabBody::Sections(sections)
    };

    let mut links = external_links(paper);
    links.extend(pdf_link(paper));

    DetailView {
        id: paper.paper_id.clone(),
        title: accessors::title(paper).to_string(),
        byline: accessors::authors(paper, PANEL_AUTHORS),
        badges,
        tab,
        body,
        links,
    }
}

fn push_text(out: &mut Vec<Section>, title: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        out.push(Section {
            title,
            body: SectionBody::Text(v.clone()),
        });
    }
}

fn push_list(out: &mut Vec<Section>, title: &'static str, value: &Option<Vec<String>>) {
    if let Some(items) = value {
        out.push(Section {
            title,
            body: SectionBody::List(items.clone()),
        });
    }
}

fn push_chips(
    out: &mut Vec<Section>,
    title: &'static str,
    style: ChipStyle,
    value: &Option<Vec<String>>,
) {
    if let Some(items) = value {
        out.push(Section {
            title,
            body: SectionBody::Chips(style, items.clone()),
        });
    }
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn overview(p: &Paper) -> Vec<Section> {
    let prob = &p.problem;
    let meth = &p.methodology;
    let mut out = Vec::new();
    push_text(&mut out, "Problem Statement", &prob.problem_statement);
    push_text(&mut out, "Motivation", &prob.motivation);
    push_text(&mut out, "Research Gap", &prob.research_gap);
    match (&meth.model_name, &meth.kind) {
        (Some(name), kind) => out.push(Section {
            title: "Proposed Method",
            body: SectionBody::Method {
                name: name.clone(),
                kind: kind.clone(),
            },
        }),
        (None, kind) => push_text(&mut out, "Proposed Method", kind),
    }
    push_text(&mut out, "Architecture", &meth.architecture);
    push_list(&mut out, "Key Algorithms", &meth.algorithms);
    push_text(&mut out, "Workflow Summary", &meth.workflow_summary);
    push_list(&mut out, "Limitations", &p.limitations);
    push_list(&mut out, "Future Work", &p.future_work);
    out
}

fn experiments(p: &Paper) -> Vec<Section> {
    let exp = &p.experiments;
    let rep = &p.reproducibility;
    let mut out = Vec::new();

    if let Some(datasets) = &p.data.datasets_used {
        out.push(Section {
            title: "Datasets",
            body: SectionBody::Table {
                header: Some(vec!["Name", "Type", "Size"]),
                rows: datasets
                    .iter()
                    .map(|d| vec![or_dash(&d.name), or_dash(&d.kind), or_dash(&d.size)])
                    .collect(),
            },
        });
    }
    push_text(&mut out, "Preprocessing", &p.data.preprocessing);
    push_chips(
        &mut out,
        "Evaluation Metrics",
        ChipStyle::Keyword,
        &exp.evaluation_metrics,
    );
    push_list(&mut out, "Baselines", &exp.baselines_compared);
    if let Some(results) = &exp.best_results {
        out.push(Section {
            title: "Best Results",
            body: SectionBody::Table {
                header: Some(vec!["Metric", "Value", "Note"]),
                rows: results
                    .iter()
                    .map(|r| {
                        vec![
                            or_dash(&r.metric),
                            or_dash(&r.value),
                            or_dash(&r.comparison_note),
                        ]
                    })
                    .collect(),
            },
        });
    }
    push_text(&mut out, "Results Summary", &exp.results_summary);

    let mut flags = Vec::new();
    if let Some(clear) = rep.clear_methodology {
        flags.push(ReproFlag::ClearMethodology(clear));
    }
    if let Some(text) = flag_text(&rep.public_dataset) {
        flags.push(ReproFlag::PublicDataset(text));
    }
    if let Some(text) = flag_text(&rep.hyperparameters_listed) {
        flags.push(ReproFlag::Hyperparameters(text));
    }
    if !flags.is_empty() {
        out.push(Section {
            title: "Reproducibility",
            body: SectionBody::Flags(flags),
        });
    }
    out
}

/// A `false` marker is not worth a flag; anything else is shown as text.
fn flag_text(flag: &Option<Flag>) -> Option<String> {
    match flag {
        Some(Flag::Bool(true)) => Some("true".to_string()),
        Some(Flag::Text(t)) => Some(t.clone()),
        Some(Flag::Bool(false)) | None => None,
    }
}

fn contributions(p: &Paper) -> Vec<Section> {
    let mut out = Vec::new();
    push_list(&mut out, "Contributions", &p.contributions);
    out
}

fn analysis(p: &Paper) -> Vec<Section> {
    let a = &p.analysis;
    let c = &p.complexity;
    let mut out = Vec::new();

    if let Some(score) = accessors::score(p) {
        out.push(Section {
            title: "Relevance Score",
            body: SectionBody::Ring(ScoreRing::new(Some(score))),
        });
    }
    push_chips(&mut out, "Strengths", ChipStyle::Strength, &a.strengths);
    push_chips(&mut out, "Weaknesses", ChipStyle::Weakness, &a.weaknesses);
    if let Some(d) = &a.implementation_difficulty {
        out.push(Section {
            title: "Implementation Difficulty",
            body: SectionBody::Difficulty(Difficulty::classify(d), d.clone()),
        });
    }
    push_text(&mut out, "Can We Extend It?", &a.can_we_extend_it);

    let rows: Vec<Vec<String>> = [
        ("Training Time", &c.training_time),
        ("Inference Time", &c.inference_time),
        ("Computational Cost", &c.computational_cost),
    ]
    .into_iter()
    .filter_map(|(label, v)| v.as_ref().map(|v| vec![label.to_string(), v.clone()]))
    .collect();
    if !rows.is_empty() {
        out.push(Section {
            title: "Complexity",
            body: SectionBody::Table { header: None, rows },
        });
    }
    push_text(&mut out, "Notes", &p.notes);
    out
}

fn external_links(p: &Paper) -> Vec<Link> {
    let m = &p.metadata;
    let o = &p.outputs;
    let mut links = Vec::new();
    if let Some(doi) = &m.doi {
        links.push(Link {
            label: format!("DOI: {doi}"),
            url: format!("https://doi.org/{doi}"),
        });
    }
    if let Some(url) = &m.url {
        links.push(Link {
            label: "Paper URL".to_string(),
            url: url.clone(),
        });
    }
    for (available, url, label) in [
        (o.code_available, &o.code_url, "Code Repository"),
        (o.model_available, &o.model_url, "Model"),
        (o.demo_available, &o.demo_url, "Demo"),
    ] {
        if let (true, Some(url)) = (available, url) {
            links.push(Link {
                label: label.to_string(),
                url: url.clone(),
            });
        }
    }
    links
}

fn pdf_link(p: &Paper) -> Option<Link> {
    p.pdf_path.as_ref().map(|path| Link {
        label: "View PDF".to_string(),
        url: path.clone(),
    })
}

fn metadata(p: &Paper) -> Vec<Section> {
    let m = &p.metadata;
    let mut out = Vec::new();

    if let Some(authors) = &m.authors {
        out.push(Section {
            title: "Authors",
            body: SectionBody::Authors(
                authors
                    .iter()
                    .map(|a| (a.name().to_string(), a.affiliation().map(str::to_string)))
                    .collect(),
            ),
        });
    }
    let links = external_links(p);
    if !links.is_empty() {
        out.push(Section {
            title: "Links",
            body: SectionBody::Links(links),
        });
    }
    if let Some(link) = pdf_link(p) {
        out.push(Section {
            title: "PDF",
            body: SectionBody::Links(vec![link]),
        });
    }
    push_chips(&mut out, "Keywords", ChipStyle::Keyword, &m.keywords);
    push_text(&mut out, "Citations", &m.citations_count);

    let provenance: Vec<Vec<String>> = [
        ("Paper ID", Some(p.paper_id.clone()).filter(|id| !id.is_empty())),
        ("Added by", p.added_by.clone()),
        ("Date added", p.date_added.clone()),
    ]
    .into_iter()
    .filter_map(|(label, v)| v.map(|v| vec![label.to_string(), v]))
    .collect();
    if !provenance.is_empty() {
        out.push(Section {
            title: "Provenance",
            body: SectionBody::Table {
                header: None,
                rows: provenance,
            },
        });
    }
    out
}
