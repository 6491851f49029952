use std::time::Instant;

use papershelf_core::{FilterKey, Tab};
use papershelf_core::query::{SCORE_THRESHOLDS, cycle_option};

use super::util::osc52_copy;
use super::{App, InputMode, LoadState, Panel};
use crate::action::Action;
use crate::persistence;
use crate::view::detail::body_lines;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                if self.debounce.fire(Instant::now()) {
                    self.commit_search();
                }
                return false;
            }
            Action::Resize(_w, h) => {
                self.visible_rows = (h as usize).saturating_sub(6);
                return false;
            }
            Action::None => return false,
            _ => {}
        }

        self.status = None;

        if action == Action::Quit {
            self.should_quit = true;
            return true;
        }

        // Help overlay swallows everything except closing it
        if self.show_help {
            if matches!(action, Action::ToggleHelp | Action::NavigateBack) {
                self.show_help = false;
            }
            return false;
        }

        if self.input_mode == InputMode::Search {
            self.update_search(action);
            return false;
        }

        match action {
            Action::ToggleHelp => self.show_help = true,
            Action::ToggleTheme => self.toggle_theme(),
            Action::NavigateBack => {
                if self.panel.is_some() {
                    self.panel = None;
                } else if self
                    .session
                    .as_ref()
                    .is_some_and(|s| !s.query().search.is_empty())
                {
                    self.clear_filter(FilterKey::Search);
                }
            }
            _ if self.load_state != LoadState::Ready => {}

            Action::MoveDown => self.move_or_scroll(1),
            Action::MoveUp => self.move_or_scroll(-1),
            Action::PageDown => self.move_or_scroll(self.page_size() as isize),
            Action::PageUp => self.move_or_scroll(-(self.page_size() as isize)),
            Action::GoTop => {
                self.cursor = 0;
                if let Some(panel) = self.panel.as_mut() {
                    panel.scroll = 0;
                }
            }
            Action::GoBottom => {
                self.cursor = self.list.card_count().saturating_sub(1);
            }
            Action::OpenPanel => {
                if let Some(index) = self.current_card().map(|c| c.index) {
                    // A different paper always opens on the first tab
                    let tab = match self.panel {
                        Some(open) if open.index == index => open.tab,
                        _ => Tab::default(),
                    };
                    self.panel = Some(Panel {
                        index,
                        tab,
                        scroll: 0,
                    });
                }
            }
            Action::NextTab | Action::PrevTab => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.tab = if action == Action::NextTab {
                        panel.tab.next()
                    } else {
                        panel.tab.prev()
                    };
                    panel.scroll = 0;
                }
            }

            Action::StartSearch => {
                self.search_buffer = self
                    .session
                    .as_ref()
                    .map(|s| s.query().search.clone())
                    .unwrap_or_default();
                self.input_mode = InputMode::Search;
            }
            Action::CycleYear => self.with_query(|s| {
                let next = cycle_option(s.query().year.as_ref(), &s.facets().years);
                s.set_year(next);
            }),
            Action::CycleDomain => self.with_query(|s| {
                let next = cycle_option(s.query().domain.as_ref(), &s.facets().domains);
                s.set_domain(next);
            }),
            Action::CycleVenue => self.with_query(|s| {
                let next = cycle_option(s.query().venue.as_ref(), &s.facets().venues);
                s.set_venue(next);
            }),
            Action::CycleMinScore => self.with_query(|s| {
                let next = cycle_option(s.query().min_score.as_ref(), SCORE_THRESHOLDS);
                s.set_min_score(next);
            }),
            Action::CycleSort => self.with_query(|s| {
                let next = s.query().sort.next();
                s.set_sort(next);
            }),
            Action::ClearFilter(key) => self.clear_filter(key),
            Action::ResetFilters => {
                self.search_buffer.clear();
                self.with_query(|s| s.reset_filters());
            }
            Action::CopyLink => self.copy_first_link(),
            _ => {}
        }
        false
    }

    fn update_search(&mut self, action: Action) {
        match action {
            Action::SearchInput('\x08') => {
                self.search_buffer.pop();
                self.debounce.touch(Instant::now());
            }
            Action::SearchInput(c) => {
                self.search_buffer.push(c);
                self.debounce.touch(Instant::now());
            }
            Action::SearchConfirm => {
                self.debounce.cancel();
                self.commit_search();
                self.input_mode = InputMode::Normal;
            }
            Action::SearchCancel => {
                self.debounce.cancel();
                self.search_buffer.clear();
                self.commit_search();
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn commit_search(&mut self) {
        let text = self.search_buffer.clone();
        self.with_query(|s| s.set_search(&text));
    }

    fn clear_filter(&mut self, key: FilterKey) {
        if key == FilterKey::Search {
            self.search_buffer.clear();
        }
        self.with_query(|s| s.clear_filter(key));
    }

    /// Apply a query change and rebuild the list from the top.
    fn with_query(&mut self, f: impl FnOnce(&mut papershelf_core::Session)) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        f(session);
        self.cursor = 0;
        self.rebuild_list();
    }

    /// j/k move the cursor, or scroll the panel while it is open.
    fn move_or_scroll(&mut self, delta: isize) {
        if let Some(panel) = self.panel {
            let max = u16::try_from(self.panel_lines(panel).saturating_sub(1)).unwrap_or(u16::MAX);
            let scroll = if delta < 0 {
                panel.scroll.saturating_sub(delta.unsigned_abs() as u16)
            } else {
                panel.scroll.saturating_add(delta as u16)
            };
            self.panel = Some(Panel {
                scroll: scroll.min(max),
                ..panel
            });
            return;
        }
        let count = self.list.card_count();
        if count == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(count - 1);
    }

    /// Lines in the open tab's body; scrolling stops at the last one.
    fn panel_lines(&mut self, panel: Panel) -> usize {
        let mode = self.mode;
        let detail = match self.session.as_mut() {
            Some(session) => session.detail(panel.index, panel.tab, mode),
            None => None,
        };
        detail.map_or(0, |d| body_lines(&d.body, &self.theme).len())
    }

    fn toggle_theme(&mut self) {
        self.mode = self.mode.toggle();
        self.theme = crate::theme::Theme::for_mode(self.mode);
        self.rebuild_list();
        if let Some(path) = &self.state_path
            && let Err(e) = persistence::save_theme(path, self.mode)
        {
            tracing::warn!(error = %e, "failed to save theme preference");
        }
    }

    fn copy_first_link(&mut self) {
        let index = match self.panel {
            Some(panel) => Some(panel.index),
            None => self.current_card().map(|c| c.index),
        };
        let mode = self.mode;
        let detail = match (index, self.session.as_mut()) {
            (Some(i), Some(session)) => session.detail(i, Tab::Overview, mode),
            _ => None,
        };
        let Some(link) = detail.and_then(|d| d.links.into_iter().next()) else {
            self.status = Some("No links for this paper".to_string());
            return;
        };
        if self.clipboard {
            osc52_copy(&link.url);
        }
        self.status = Some(format!("Copied {}: {}", link.label, link.url));
    }
}
