use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup = centered_rect(64, 37, area);

    let lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            Style::default()
                .fg(theme.header_fg)
                .bg(theme.header_bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section_header("Navigation", theme),
        key_line("j / \u{2193}", "Move down (scroll panel when open)", theme),
        key_line("k / \u{2191}", "Move up", theme),
        key_line("PgDn / Ctrl+d", "Page down", theme),
        key_line("PgUp / Ctrl+u", "Page up", theme),
        key_line("g / G", "Top / bottom", theme),
        key_line("Enter / Space", "Open detail panel", theme),
        key_line("Tab / l", "Next panel tab", theme),
        key_line("Shift+Tab / h", "Previous panel tab", theme),
        key_line("Esc", "Close help, then panel, then search", theme),
        Line::from(""),
        section_header("Search & Filters", theme),
        key_line("/", "Search (Enter applies, Esc clears)", theme),
        key_line("y / Y", "Cycle / clear year", theme),
        key_line("d / D", "Cycle / clear domain", theme),
        key_line("v / V", "Cycle / clear venue", theme),
        key_line("m / M", "Cycle / clear minimum score", theme),
        key_line("Backspace", "Clear search", theme),
        key_line("s", "Cycle sort order", theme),
        key_line("x", "Reset all filters", theme),
        Line::from(""),
        section_header("Actions", theme),
        key_line("o", "Copy first link (OSC 52)", theme),
        key_line("t", "Toggle light / dark", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
        Line::from(""),
        section_header("Mouse", theme),
        key_line("Wheel", "Move cursor / scroll panel", theme),
        key_line("Shift+click", "Select text / click links (terminal)", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .style(theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<16}"), Style::default().fg(theme.text)),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}

/// Create a centered rectangle of the given width (columns) and height (rows).
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
