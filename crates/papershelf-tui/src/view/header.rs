use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use papershelf_core::accessors::format_score;
use papershelf_core::{FilterKey, Stats};

use crate::app::{App, InputMode};
use crate::theme::Theme;

/// Site title with the stats of the visible set, subtitle below.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut title = vec![
        Span::styled(format!(" {} ", app.site.title), theme.header_style()),
        Span::raw(" "),
    ];
    if let Some(session) = &app.session {
        title.extend(stats_spans(session.stats(), theme));
    }
    let lines = vec![
        Line::from(title),
        Line::from(Span::styled(
            format!(" {}", app.site.subtitle),
            Style::default().fg(theme.dim),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn stats_spans(stats: &Stats, theme: &Theme) -> Vec<Span<'static>> {
    let value = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
    let label = Style::default().fg(theme.dim);
    vec![
        Span::styled(stats.total.to_string(), value),
        Span::styled(" papers  ", label),
        Span::styled(stats.years.to_string(), value),
        Span::styled(" years  ", label),
        Span::styled(stats.domains_label(), value),
        Span::styled(" domains  ", label),
        Span::styled(stats.mean_score_label(), value),
        Span::styled(" avg score", label),
    ]
}

/// Current value of every selector, with its key.
pub fn render_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(session) = &app.session else {
        f.render_widget(Paragraph::new(""), area);
        return;
    };
    let q = session.query();

    let search = if app.input_mode == InputMode::Search {
        let pending = if app.debounce.is_pending() { " \u{2026}" } else { "" };
        format!("{}\u{2588}{pending}", app.search_buffer)
    } else if q.search.is_empty() {
        "\u{2026}".to_string()
    } else {
        q.search.clone()
    };

    let mut spans = vec![Span::styled(
        " /",
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::styled(search, Style::default().fg(theme.text)));
    selector(&mut spans, "y", "year", q.year.map(|y| y.to_string()), theme);
    selector(&mut spans, "d", "domain", q.domain.clone(), theme);
    selector(&mut spans, "v", "venue", q.venue.clone(), theme);
    selector(
        &mut spans,
        "m",
        "score",
        q.min_score.map(|m| format!("\u{2265}{}", format_score(m))),
        theme,
    );
    selector(
        &mut spans,
        "s",
        "sort",
        Some(q.sort.label().to_string()),
        theme,
    );
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn selector(
    spans: &mut Vec<Span<'static>>,
    key: &'static str,
    name: &'static str,
    value: Option<String>,
    theme: &Theme,
) {
    spans.push(Span::styled(format!("  {key}:"), Style::default().fg(theme.dim)));
    spans.push(Span::styled(format!("{name} "), Style::default().fg(theme.dim)));
    match value {
        Some(v) => spans.push(Span::styled(v, Style::default().fg(theme.active))),
        None => spans.push(Span::styled("All", Style::default().fg(theme.text))),
    }
}

/// Removable chips for the active filters.
pub fn render_chips(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(session) = &app.session else {
        return;
    };
    let mut spans = vec![Span::raw(" ")];
    for chip in session.active_filters() {
        let key = match chip.key {
            FilterKey::Search => "\u{232b}",
            FilterKey::Year => "Y",
            FilterKey::Domain => "D",
            FilterKey::Venue => "V",
            FilterKey::Score => "M",
        };
        spans.push(Span::styled(
            format!(" {} \u{00d7}{} ", chip.label, key),
            Style::default().fg(theme.header_fg).bg(theme.active),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        "x:clear all",
        Style::default().fg(theme.dim),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
