use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::theme::Theme;
use crate::view::spinner_char;

/// Shown until the load task reports.
pub fn render_loading(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let lines = vec![
        Line::from(Span::styled(
            format!("{} Loading papers", spinner_char(app.tick)),
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.site.source.clone(),
            Style::default().fg(theme.dim),
        )),
    ];
    let popup = centered_rect(area.width.min(70), 4, area);
    f.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        popup,
    );
}

/// Persistent load failure. Nothing else is drawn in the body.
pub fn render_error(f: &mut Frame, area: Rect, theme: &Theme, reason: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Failed to load papers",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(reason.to_string(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled(
            "Check the data source and restart. q to quit.",
            Style::default().fg(theme.dim),
        )),
    ];
    let popup = centered_rect(area.width.min(72), 9, area);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error))
                .title(" Error "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup);
}

/// Empty filter result.
pub fn render_empty(f: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            "No papers match your filters",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Press x to reset all filters",
            Style::default().fg(theme.dim),
        )),
    ];
    let popup = centered_rect(area.width.min(50), 2, area);
    f.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        popup,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
