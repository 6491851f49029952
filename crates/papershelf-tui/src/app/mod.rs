mod update;
mod util;

use std::path::PathBuf;
use std::time::Duration;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Block;

use papershelf_core::view_model::Card;
use papershelf_core::{ListView, Session, Tab, ThemeMode};

use crate::debounce::Debounce;
use crate::theme::Theme;
use crate::tui_event::LoadEvent;

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Dataset lifecycle. There is no way back from `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// The open detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    /// Index into the session's record list.
    pub index: usize,
    pub tab: Tab,
    pub scroll: u16,
}

/// Static labels shown around the catalog.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub title: String,
    pub subtitle: String,
    /// Where the data comes from, for the loading screen.
    pub source: String,
}

pub struct App {
    pub site: SiteInfo,
    pub load_state: LoadState,
    pub session: Option<Session>,
    /// Grouped cards for the current query, rebuilt after every change.
    pub list: ListView,
    /// Position in display order across all groups.
    pub cursor: usize,
    pub panel: Option<Panel>,
    pub mode: ThemeMode,
    pub theme: Theme,
    pub input_mode: InputMode,
    /// Search text being typed, committed to the session when the debounce fires.
    pub search_buffer: String,
    pub debounce: Debounce,
    pub show_help: bool,
    pub should_quit: bool,
    pub tick: usize,
    /// Body height in rows, updated on resize.
    pub visible_rows: usize,
    /// One-line message in the footer, cleared by the next key.
    pub status: Option<String>,
    /// Where the display mode is persisted; `None` disables persistence.
    pub state_path: Option<PathBuf>,
    /// Emit OSC 52 on copy. Off in tests.
    pub clipboard: bool,
}

impl App {
    pub fn new(site: SiteInfo, mode: ThemeMode, debounce: Duration) -> Self {
        Self {
            site,
            load_state: LoadState::Loading,
            session: None,
            list: ListView::default(),
            cursor: 0,
            panel: None,
            mode,
            theme: Theme::for_mode(mode),
            input_mode: InputMode::Normal,
            search_buffer: String::new(),
            debounce: Debounce::new(debounce),
            show_help: false,
            should_quit: false,
            tick: 0,
            visible_rows: 20,
            status: None,
            state_path: None,
            clipboard: false,
        }
    }

    pub fn handle_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Loaded(set) => {
                if set.duplicates > 0 || set.skipped > 0 {
                    self.status = Some(format!(
                        "{} duplicate id(s) resolved, {} invalid entr(ies) skipped",
                        set.duplicates, set.skipped
                    ));
                }
                self.session = Some(Session::new(set.papers));
                self.load_state = LoadState::Ready;
                self.rebuild_list();
            }
            LoadEvent::Failed(reason) => {
                tracing::error!(%reason, "dataset load failed");
                self.session = None;
                self.list = ListView::default();
                self.load_state = LoadState::Failed(reason);
            }
        }
    }

    /// Rebuild the grouped cards and keep the cursor in range.
    pub fn rebuild_list(&mut self) {
        self.list = match self.session.as_mut() {
            Some(session) => session.list_view(self.mode),
            None => ListView::default(),
        };
        let count = self.list.card_count();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.list.cards().nth(self.cursor)
    }

    /// Cards per page for PgUp/PgDn. A card takes about four rows.
    fn page_size(&self) -> usize {
        (self.visible_rows / 4).max(1)
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();
        f.render_widget(Block::default().style(self.theme.base_style()), area);

        let chips = self.session.as_ref().map_or(0, |s| s.active_filters().len());
        let mut constraints = vec![
            Constraint::Length(2), // title + stats
            Constraint::Length(1), // filter bar
        ];
        if chips > 0 {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(1)); // footer
        let chunks = Layout::vertical(constraints).split(area);

        let mut idx = 0;
        crate::view::header::render(f, chunks[idx], self);
        idx += 1;
        crate::view::header::render_filter_bar(f, chunks[idx], self);
        idx += 1;
        if chips > 0 {
            crate::view::header::render_chips(f, chunks[idx], self);
            idx += 1;
        }
        let body = chunks[idx];
        let footer = chunks[idx + 1];

        match self.load_state.clone() {
            LoadState::Loading => crate::view::banner::render_loading(f, body, self),
            LoadState::Failed(reason) => {
                crate::view::banner::render_error(f, body, &self.theme, &reason)
            }
            LoadState::Ready if self.list.is_empty() => {
                crate::view::banner::render_empty(f, body, &self.theme)
            }
            LoadState::Ready => self.render_body(f, body),
        }

        crate::view::render_footer(f, footer, self);

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
    }

    fn render_body(&mut self, f: &mut ratatui::Frame, area: Rect) {
        let detail = match (self.panel, self.session.as_mut()) {
            (Some(panel), Some(session)) => session.detail(panel.index, panel.tab, self.mode),
            _ => None,
        };
        let Some(detail) = detail else {
            crate::view::list::render(f, area, self);
            return;
        };

        let scroll = self.panel.map_or(0, |p| p.scroll);
        if area.width < 100 {
            crate::view::detail::render(f, area, &self.theme, &detail, scroll);
        } else {
            let chunks =
                Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(area);
            crate::view::list::render(f, chunks[0], self);
            crate::view::detail::render(f, chunks[1], &self.theme, &detail, scroll);
        }
    }
}

#[cfg(test)]
mod tests;
