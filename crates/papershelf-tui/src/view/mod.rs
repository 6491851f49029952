pub mod banner;
pub mod detail;
pub mod header;
pub mod help;
pub mod list;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, InputMode};

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// Key hints for the current mode, or the pending status message.
pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let line = if let Some(status) = &app.status {
        Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(theme.active),
        ))
    } else {
        let hints = match (&app.input_mode, app.panel.is_some()) {
            (InputMode::Search, _) => " type to search  Enter:apply  Esc:clear",
            (InputMode::Normal, true) => {
                " j/k:scroll  Tab/h/l:tabs  o:copy link  t:theme  Esc:close  ?:help  q:quit"
            }
            (InputMode::Normal, false) => {
                " j/k:move  Enter:open  /:search  y/d/v/m:filter  s:sort  x:reset  t:theme  ?:help  q:quit"
            }
        };
        Line::from(Span::styled(hints, theme.footer_style()))
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Échantillon", 5), "Écha\u{2026}");
        assert_eq!(truncate("abc", 0), "");
    }
}
