use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

use papershelf_core::view_model::{
    Badge, DetailView, ReproFlag, ScoreRing, Section, SectionBody, Tab, TabBody,
};

use crate::theme::Theme;
use crate::view::list::ring_glyph;

/// Render the detail panel: title block, tab strip, then the active tab.
pub fn render(f: &mut Frame, area: Rect, theme: &Theme, detail: &DetailView, scroll: u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.active))
        .title(format!(" {} ", detail.id));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(4), // title, byline, badges
        Constraint::Length(1), // tabs
        Constraint::Min(1),    // scrollable content
    ])
    .split(inner);

    let heading = vec![
        Line::from(Span::styled(
            detail.title.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            detail.byline.clone(),
            Style::default().fg(theme.dim),
        )),
        Line::from(badge_spans(&detail.badges, theme)),
    ];
    f.render_widget(
        Paragraph::new(heading).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let titles: Vec<&str> = Tab::all().iter().map(|t| t.label()).collect();
    let selected = Tab::all()
        .iter()
        .position(|&t| t == detail.tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme.dim))
        .highlight_style(
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("\u{2502}");
    f.render_widget(tabs, chunks[1]);

    let lines = body_lines(&detail.body, theme);
    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(content, chunks[2]);
}

fn badge_spans(badges: &[Badge], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for badge in badges {
        let span = match badge {
            Badge::Year(y) => Span::styled(format!(" {y} "), theme.highlight_style()),
            Badge::Venue(v) => Span::styled(format!(" {v} "), theme.highlight_style()),
            Badge::Domain(tag) => {
                Span::styled(format!(" {} ", tag.name), theme.domain_style(tag.color))
            }
            Badge::Score(ring) => Span::styled(
                format!(" \u{2605} {} ", ring.label()),
                theme.score_style(ring.band),
            ),
        };
        spans.push(span);
        spans.push(Span::raw(" "));
    }
    spans
}

/// Flatten a tab body into styled lines.
pub fn body_lines(body: &TabBody, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match body {
        TabBody::Placeholder(message) => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
            )));
        }
        TabBody::Sections(sections) => {
            for section in sections {
                lines.push(Line::from(""));
                section_lines(&mut lines, section, theme);
            }
        }
    }
    lines
}

fn section_lines(lines: &mut Vec<Line<'static>>, section: &Section, theme: &Theme) {
    section_header(lines, section.title, theme);
    let text = Style::default().fg(theme.text);
    let dim = Style::default().fg(theme.dim);
    match &section.body {
        SectionBody::Text(t) => lines.push(Line::from(Span::styled(format!("  {t}"), text))),
        SectionBody::Method { name, kind } => {
            let mut spans = vec![Span::styled(
                format!("  {name}"),
                text.add_modifier(Modifier::BOLD),
            )];
            if let Some(kind) = kind {
                spans.push(Span::styled(format!(" \u{2014} {kind}"), dim));
            }
            lines.push(Line::from(spans));
        }
        SectionBody::List(items) => {
            for item in items {
                lines.push(Line::from(vec![
                    Span::styled("  \u{2022} ", Style::default().fg(theme.active)),
                    Span::styled(item.clone(), text),
                ]));
            }
        }
        SectionBody::Chips(style, items) => {
            let mut spans = vec![Span::raw("  ")];
            for item in items {
                spans.push(Span::styled(format!("[{item}]"), theme.chip_style(*style)));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
        SectionBody::Table { header, rows } => table_lines(lines, header.as_deref(), rows, theme),
        SectionBody::Ring(ring) => lines.push(ring_line(ring, theme)),
        SectionBody::Flags(flags) => {
            for flag in flags {
                let (icon, label) = match flag {
                    ReproFlag::ClearMethodology(true) => {
                        ("\u{2713}", "Clear methodology".to_string())
                    }
                    ReproFlag::ClearMethodology(false) => {
                        ("\u{2717}", "Methodology unclear".to_string())
                    }
                    ReproFlag::PublicDataset(t) => ("\u{25a3}", flag_label("Public dataset", t)),
                    ReproFlag::Hyperparameters(t) => {
                        ("\u{2699}", flag_label("Hyperparameters", t))
                    }
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("  {icon} "), Style::default().fg(theme.active)),
                    Span::styled(label, text),
                ]));
            }
        }
        SectionBody::Difficulty(level, raw) => {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  \u{25cf} {level:?}"),
                    theme.difficulty_style(*level),
                ),
                Span::styled(format!("  {raw}"), dim),
            ]));
        }
        SectionBody::Authors(authors) => {
            for (name, affiliation) in authors {
                let mut spans = vec![Span::styled(format!("  {name}"), text)];
                if let Some(aff) = affiliation {
                    spans.push(Span::styled(format!(" \u{2014} {aff}"), dim));
                }
                lines.push(Line::from(spans));
            }
        }
        SectionBody::Links(links) => {
            for link in links {
                url_line(lines, &link.label, &link.url, theme);
            }
        }
    }
}

fn flag_label(name: &str, value: &str) -> String {
    if value == "true" {
        name.to_string()
    } else {
        format!("{name}: {value}")
    }
}

fn ring_line(ring: &ScoreRing, theme: &Theme) -> Line<'static> {
    const WIDTH: usize = 20;
    let filled = (ring.fraction * WIDTH as f64).round() as usize;
    let style = Style::default().fg(theme.score_colors(ring.band).fg);
    Line::from(vec![
        Span::styled(format!("  {} ", ring_glyph(ring)), style),
        Span::styled("\u{2588}".repeat(filled), style),
        Span::styled(
            "\u{2591}".repeat(WIDTH - filled.min(WIDTH)),
            Style::default().fg(theme.border),
        ),
        Span::styled(format!(" {} / 10", ring.label()), theme.score_style(ring.band)),
    ])
}

fn table_lines(
    lines: &mut Vec<Line<'static>>,
    header: Option<&[&'static str]>,
    rows: &[Vec<String>],
    theme: &Theme,
) {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(header.map(<[_]>::len))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    if let Some(header) = header {
        for (i, cell) in header.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
        let spans: Vec<Span> = header
            .iter()
            .enumerate()
            .map(|(i, h)| {
                Span::styled(
                    format!("  {:<w$}", h, w = widths[i]),
                    Style::default().fg(theme.dim).add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        lines.push(Line::from(spans));
    }
    for row in rows {
        let spans: Vec<Span> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                // Label-value tables dim their first column.
                let style = if header.is_none() && i == 0 {
                    Style::default().fg(theme.dim)
                } else {
                    Style::default().fg(theme.text)
                };
                Span::styled(format!("  {:<w$}", cell, w = widths[i]), style)
            })
            .collect();
        lines.push(Line::from(spans));
    }
}

fn section_header(lines: &mut Vec<Line<'static>>, title: &'static str, theme: &Theme) {
    lines.push(Line::from(Span::styled(
        format!("  {}", title.to_uppercase()),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    )));
}

/// Render a link: label on one line, URL on the next (for terminal click detection).
fn url_line(lines: &mut Vec<Line<'static>>, label: &str, url: &str, theme: &Theme) {
    lines.push(Line::from(vec![Span::styled(
        format!("  {label}"),
        Style::default().fg(theme.dim),
    )]));
    lines.push(Line::from(Span::styled(
        format!("    {url}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::UNDERLINED),
    )));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_placeholder_body() {
        let lines = body_lines(
            &TabBody::Placeholder("No contributions listed."),
            &Theme::dark(),
        );
        assert!(plain(&lines).iter().any(|l| l.contains("No contributions listed.")));
    }

    #[test]
    fn test_table_columns_are_aligned() {
        let body = TabBody::Sections(vec![Section {
            title: "Datasets",
            body: SectionBody::Table {
                header: Some(vec!["Name", "Size"]),
                rows: vec![
                    vec!["SQuAD".into(), "100k".into()],
                    vec!["X".into(), "1".into()],
                ],
            },
        }]);
        let text = plain(&body_lines(&body, &Theme::light()));
        assert_eq!(text[1], "  DATASETS");
        assert_eq!(text[2], "  Name   Size");
        assert_eq!(text[3], "  SQuAD  100k");
        assert_eq!(text[4], "  X      1   ");
    }

    #[test]
    fn test_flag_label() {
        assert_eq!(flag_label("Public dataset", "true"), "Public dataset");
        assert_eq!(flag_label("Hyperparameters", "partial"), "Hyperparameters: partial");
    }
}
