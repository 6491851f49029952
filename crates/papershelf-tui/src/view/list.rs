use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use papershelf_core::view_model::{Availability, Card, ScoreRing};

use crate::app::App;
use crate::theme::Theme;
use crate::view::truncate;

const RING_GLYPHS: [char; 5] = ['\u{25cb}', '\u{25d4}', '\u{25d1}', '\u{25d5}', '\u{25cf}'];

/// Quarter-step circle for the ring fraction.
pub fn ring_glyph(ring: &ScoreRing) -> char {
    let step = (ring.fraction * 4.0).round() as usize;
    RING_GLYPHS[step.min(RING_GLYPHS.len() - 1)]
}

/// Render the year-grouped card list with the cursor card highlighted.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let width = area.width.saturating_sub(4) as usize;

    let mut items: Vec<ListItem> = Vec::new();
    let mut selected = None;
    let mut card_pos = 0;
    for group in &app.list.groups {
        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                format!(" {} ", group.label),
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("({})", group.count()),
                Style::default().fg(theme.dim),
            ),
        ])));
        for card in &group.cards {
            if card_pos == app.cursor {
                selected = Some(items.len());
            }
            items.push(ListItem::new(card_text(card, theme, width)));
            card_pos += 1;
        }
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(format!(" Papers ({}) ", app.list.card_count())),
        )
        .highlight_style(theme.highlight_style())
        .highlight_symbol("\u{258c}");

    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn card_text(card: &Card, theme: &Theme, width: usize) -> Text<'static> {
    let mut lines = Vec::with_capacity(4);

    lines.push(Line::from(vec![
        Span::styled(
            format!(" {} {:>3} ", ring_glyph(&card.ring), card.ring.label()),
            theme.score_style(card.ring.band),
        ),
        Span::raw(" "),
        Span::styled(
            truncate(&card.title, width.saturating_sub(8)),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]));

    lines.push(Line::from(Span::styled(
        format!("   {}", truncate(&card.authors, width.saturating_sub(3))),
        Style::default().fg(theme.dim),
    )));

    let mut meta = vec![Span::raw("   ")];
    if let Some(venue) = &card.venue {
        meta.push(Span::styled(
            format!("{venue} "),
            Style::default().fg(theme.text),
        ));
    }
    if let Some(year) = card.year {
        meta.push(Span::styled(format!("{year} "), Style::default().fg(theme.dim)));
    }
    if let Some(domain) = &card.domain {
        meta.push(Span::styled(
            format!(" {} ", domain.name),
            theme.domain_style(domain.color),
        ));
    }
    for a in &card.availability {
        let icon = match a {
            Availability::Code => "\u{2328}",
            Availability::Model => "\u{25c6}",
            Availability::Demo => "\u{25b6}",
        };
        meta.push(Span::styled(
            format!("  {icon} {}", a.label()),
            Style::default().fg(theme.active),
        ));
    }
    lines.push(Line::from(meta));

    if !card.keywords.is_empty() {
        let mut kw = vec![Span::raw("   ")];
        for k in &card.keywords {
            kw.push(Span::styled(format!("#{k} "), Style::default().fg(theme.chip_keyword)));
        }
        if card.keyword_overflow > 0 {
            kw.push(Span::styled(
                format!("+{}", card.keyword_overflow),
                Style::default().fg(theme.dim),
            ));
        }
        lines.push(Line::from(kw));
    }

    Text::from(lines)
}
