use std::time::Duration;

use super::*;
use crate::action::Action;
use papershelf_core::{FilterKey, SortKey, parse_papers};

const DATASET: &str = r#"[
  {"paper_id": "a", "metadata": {"title": "Alpha", "year": 2021, "venue": "ACL",
    "doi": "10.1/alpha"}, "problem": {"domain": "nlp"}, "your_analysis": {"relevance_score": 8}},
  {"paper_id": "b", "metadata": {"title": "Beta", "year": 2023, "venue": "CVPR"},
    "problem": {"domain": "vision"}, "your_analysis": {"relevance_score": 4}},
  {"paper_id": "c", "metadata": {"title": "Gamma"}, "problem": {"domain": "nlp"}}
]"#;

/// Create an App with zero debounce so a single tick commits search text.
fn test_app() -> App {
    let site = SiteInfo {
        title: "Test".into(),
        subtitle: "Sub".into(),
        source: "memory".into(),
    };
    App::new(site, ThemeMode::Dark, Duration::ZERO)
}

fn loaded_app() -> App {
    let mut app = test_app();
    app.handle_load_event(LoadEvent::Loaded(parse_papers(DATASET).unwrap()));
    app
}

fn card_ids(app: &App) -> Vec<String> {
    app.list.cards().map(|c| c.id.clone()).collect()
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.update(Action::SearchInput(c));
    }
}

// ── Loading ────────────────────────────────────────────────────

#[test]
fn starts_in_loading_state() {
    let app = test_app();
    assert_eq!(app.load_state, LoadState::Loading);
    assert!(app.list.is_empty());
}

#[test]
fn failed_load_shows_error_and_ignores_navigation() {
    let mut app = test_app();
    app.handle_load_event(LoadEvent::Failed("HTTP 404".into()));
    assert_eq!(app.load_state, LoadState::Failed("HTTP 404".into()));
    app.update(Action::MoveDown);
    app.update(Action::OpenPanel);
    assert_eq!(app.cursor, 0);
    assert!(app.panel.is_none());
}

#[test]
fn loaded_set_is_grouped_newest_first() {
    let app = loaded_app();
    assert_eq!(app.load_state, LoadState::Ready);
    assert_eq!(card_ids(&app), vec!["b", "a", "c"]);
}

// ── Navigation and panel ──────────────────────────────────────

#[test]
fn cursor_is_clamped() {
    let mut app = loaded_app();
    app.update(Action::MoveUp);
    assert_eq!(app.cursor, 0);
    app.update(Action::GoBottom);
    assert_eq!(app.cursor, 2);
    app.update(Action::MoveDown);
    assert_eq!(app.cursor, 2);
}

#[test]
fn enter_opens_panel_for_card_under_cursor() {
    let mut app = loaded_app();
    app.update(Action::MoveDown);
    app.update(Action::OpenPanel);
    let panel = app.panel.unwrap();
    let session = app.session.as_ref().unwrap();
    assert_eq!(session.papers()[panel.index].paper_id, "a");
    assert_eq!(panel.tab, Tab::Overview);
}

#[test]
fn escape_closes_help_then_panel() {
    let mut app = loaded_app();
    app.update(Action::OpenPanel);
    app.update(Action::ToggleHelp);
    assert!(app.show_help);

    app.update(Action::NavigateBack);
    assert!(!app.show_help);
    assert!(app.panel.is_some());

    app.update(Action::NavigateBack);
    assert!(app.panel.is_none());
}

#[test]
fn tabs_cycle_while_panel_open() {
    let mut app = loaded_app();
    app.update(Action::NextTab);
    assert!(app.panel.is_none());

    app.update(Action::OpenPanel);
    app.update(Action::NextTab);
    assert_eq!(app.panel.unwrap().tab, Tab::Experiments);
    app.update(Action::PrevTab);
    app.update(Action::PrevTab);
    assert_eq!(app.panel.unwrap().tab, Tab::Metadata);
}

#[test]
fn opening_another_paper_starts_on_overview() {
    let mut app = loaded_app();
    app.update(Action::OpenPanel);
    app.update(Action::NextTab);
    let first = app.panel.unwrap().index;

    // Same paper keeps the tab
    app.update(Action::OpenPanel);
    assert_eq!(app.panel.unwrap().tab, Tab::Experiments);

    // Filter change moves the cursor to a different paper
    app.update(Action::CycleDomain);
    app.update(Action::OpenPanel);
    let panel = app.panel.unwrap();
    assert_ne!(panel.index, first);
    assert_eq!(panel.tab, Tab::Overview);
}

/// Body length of the open panel, as rendered.
fn panel_body_len(app: &mut App) -> usize {
    let panel = app.panel.unwrap();
    let mode = app.mode;
    let detail = app
        .session
        .as_mut()
        .unwrap()
        .detail(panel.index, panel.tab, mode)
        .unwrap();
    crate::view::detail::body_lines(&detail.body, &app.theme).len()
}

#[test]
fn j_scrolls_panel_instead_of_moving_cursor() {
    let mut app = loaded_app();
    app.update(Action::MoveDown);
    app.update(Action::OpenPanel);
    app.update(Action::PrevTab);
    assert_eq!(app.panel.unwrap().tab, Tab::Metadata);
    assert!(panel_body_len(&mut app) > 3);

    app.update(Action::MoveDown);
    app.update(Action::MoveDown);
    assert_eq!(app.cursor, 1);
    assert_eq!(app.panel.unwrap().scroll, 2);
    app.update(Action::PageUp);
    assert_eq!(app.panel.unwrap().scroll, 0);
}

#[test]
fn panel_scroll_stops_at_last_line() {
    let mut app = loaded_app();
    app.update(Action::MoveDown);
    app.update(Action::OpenPanel);
    app.update(Action::PrevTab);
    let last = (panel_body_len(&mut app) - 1) as u16;

    for _ in 0..100 {
        app.update(Action::MoveDown);
    }
    assert_eq!(app.panel.unwrap().scroll, last);
    app.update(Action::MoveUp);
    assert_eq!(app.panel.unwrap().scroll, last - 1);

    // Placeholder body is two lines
    app.update(Action::GoTop);
    app.update(Action::NavigateBack);
    app.update(Action::OpenPanel);
    assert_eq!(app.panel.unwrap().tab, Tab::Overview);
    app.update(Action::PageDown);
    assert_eq!(app.panel.unwrap().scroll, 1);
}

// ── Search ─────────────────────────────────────────────────────

#[test]
fn search_is_debounced_until_tick() {
    let mut app = loaded_app();
    app.debounce = crate::debounce::Debounce::new(Duration::from_secs(3600));
    app.update(Action::StartSearch);
    type_text(&mut app, "gam");
    assert_eq!(card_ids(&app).len(), 3);
    app.update(Action::Tick);
    assert_eq!(card_ids(&app).len(), 3);
}

#[test]
fn tick_commits_search_after_deadline() {
    let mut app = loaded_app();
    app.update(Action::StartSearch);
    type_text(&mut app, "gam");
    app.update(Action::Tick);
    assert_eq!(card_ids(&app), vec!["c"]);
    assert_eq!(app.input_mode, InputMode::Search);
}

#[test]
fn enter_commits_immediately_and_escape_clears() {
    let mut app = loaded_app();
    app.debounce = crate::debounce::Debounce::new(Duration::from_secs(3600));
    app.update(Action::StartSearch);
    type_text(&mut app, "alphx");
    app.update(Action::SearchInput('\x08'));
    app.update(Action::SearchInput('a'));
    app.update(Action::SearchConfirm);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(card_ids(&app), vec!["a"]);

    app.update(Action::StartSearch);
    assert_eq!(app.search_buffer, "alpha");
    app.update(Action::SearchCancel);
    assert_eq!(card_ids(&app).len(), 3);
    assert!(app.search_buffer.is_empty());
}

#[test]
fn escape_in_normal_mode_drops_committed_search() {
    let mut app = loaded_app();
    app.update(Action::StartSearch);
    type_text(&mut app, "beta");
    app.update(Action::SearchConfirm);
    assert_eq!(card_ids(&app), vec!["b"]);
    app.update(Action::NavigateBack);
    assert_eq!(card_ids(&app).len(), 3);
}

// ── Filters and sort ───────────────────────────────────────────

#[test]
fn domain_cycles_through_facets_and_back_to_all() {
    let mut app = loaded_app();
    app.update(Action::CycleDomain);
    assert_eq!(card_ids(&app), vec!["a", "c"]);
    app.update(Action::CycleDomain);
    assert_eq!(card_ids(&app), vec!["b"]);
    app.update(Action::CycleDomain);
    assert_eq!(card_ids(&app).len(), 3);
}

#[test]
fn min_score_and_clear_chip() {
    let mut app = loaded_app();
    app.update(Action::CycleMinScore); // 4
    assert_eq!(card_ids(&app), vec!["b", "a"]);
    app.update(Action::CycleMinScore); // 5
    assert_eq!(card_ids(&app), vec!["a"]);
    app.update(Action::ClearFilter(FilterKey::Score));
    assert_eq!(card_ids(&app).len(), 3);
}

#[test]
fn reset_keeps_sort() {
    let mut app = loaded_app();
    app.update(Action::CycleSort);
    app.update(Action::CycleYear);
    app.update(Action::CycleVenue);
    app.update(Action::ResetFilters);
    let session = app.session.as_ref().unwrap();
    assert_eq!(session.query().sort, SortKey::YearAsc);
    assert!(session.active_filters().is_empty());
}

#[test]
fn filter_change_resets_cursor() {
    let mut app = loaded_app();
    app.update(Action::GoBottom);
    app.update(Action::CycleSort);
    assert_eq!(app.cursor, 0);
}

// ── Theme, links, quit ─────────────────────────────────────────

#[test]
fn theme_toggle_persists_and_keeps_tab() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.toml");
    let mut app = loaded_app();
    app.state_path = Some(path.clone());
    app.update(Action::OpenPanel);
    app.update(Action::NextTab);

    app.update(Action::ToggleTheme);
    assert_eq!(app.mode, ThemeMode::Light);
    assert_eq!(app.theme, crate::theme::Theme::light());
    assert_eq!(app.panel.unwrap().tab, Tab::Experiments);
    assert_eq!(crate::persistence::load_theme(&path), Some(ThemeMode::Light));
}

#[test]
fn copy_link_uses_first_link_of_current_paper() {
    let mut app = loaded_app();
    app.update(Action::CopyLink);
    assert_eq!(app.status.as_deref(), Some("No links for this paper"));

    app.update(Action::MoveDown);
    app.update(Action::CopyLink);
    assert_eq!(
        app.status.as_deref(),
        Some("Copied DOI: 10.1/alpha: https://doi.org/10.1/alpha")
    );
}

#[test]
fn quit_sets_flag() {
    let mut app = loaded_app();
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}
