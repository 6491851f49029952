use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use papershelf_core::FilterKey;

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::Search => map_key_search(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoBottom,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageUp,
        KeyCode::Enter | KeyCode::Char(' ') => Action::OpenPanel,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('y') => Action::CycleYear,
        KeyCode::Char('d') => Action::CycleDomain,
        KeyCode::Char('v') => Action::CycleVenue,
        KeyCode::Char('m') => Action::CycleMinScore,
        KeyCode::Char('Y') => Action::ClearFilter(FilterKey::Year),
        KeyCode::Char('D') => Action::ClearFilter(FilterKey::Domain),
        KeyCode::Char('V') => Action::ClearFilter(FilterKey::Venue),
        KeyCode::Char('M') => Action::ClearFilter(FilterKey::Score),
        KeyCode::Backspace => Action::ClearFilter(FilterKey::Search),
        KeyCode::Char('x') => Action::ResetFilters,
        KeyCode::Char('s') => Action::CycleSort,
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => Action::NextTab,
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => Action::PrevTab,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('o') => Action::CopyLink,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

fn map_key_search(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::SearchCancel,
        KeyCode::Enter => Action::SearchConfirm,
        KeyCode::Char(c) => Action::SearchInput(c),
        KeyCode::Backspace => Action::SearchInput('\x08'), // sentinel for backspace
        _ => Action::None,
    }
}
