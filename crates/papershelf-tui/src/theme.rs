use ratatui::style::{Color, Modifier, Style};

use papershelf_core::view_model::{ChipStyle, Difficulty, ScoreBand};
use papershelf_core::{DomainColor, Rgb, ThemeMode};

/// Background/foreground pair for a badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeColors {
    pub bg: Color,
    pub fg: Color,
}

/// Color theme for the TUI.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub error: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,

    pub score_high: BadgeColors,
    pub score_mid: BadgeColors,
    pub score_low: BadgeColors,

    pub chip_keyword: Color,
    pub chip_strength: Color,
    pub chip_weakness: Color,
}

const fn hex(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(r, g, b)
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: hex(0x12, 0x13, 0x18),
            header_fg: hex(0xf1, 0xf3, 0xf5),
            header_bg: hex(0x36, 0x4f, 0xc7),
            border: hex(0x37, 0x3a, 0x40),
            text: hex(0xe9, 0xec, 0xef),
            dim: hex(0x86, 0x8e, 0x96),
            highlight_bg: hex(0x1a, 0x21, 0x50),
            active: hex(0x74, 0x8f, 0xfc),
            error: hex(0xff, 0x6b, 0x6b),
            footer_fg: hex(0x86, 0x8e, 0x96),
            footer_bg: Color::Reset,

            score_high: BadgeColors {
                bg: hex(0x0c, 0x2b, 0x18),
                fg: hex(0x51, 0xcf, 0x66),
            },
            score_mid: BadgeColors {
                bg: hex(0x2b, 0x1f, 0x00),
                fg: hex(0xff, 0xd4, 0x3b),
            },
            score_low: BadgeColors {
                bg: hex(0x2a, 0x0a, 0x0a),
                fg: hex(0xff, 0x6b, 0x6b),
            },

            chip_keyword: hex(0x74, 0x8f, 0xfc),
            chip_strength: hex(0x51, 0xcf, 0x66),
            chip_weakness: hex(0xff, 0x6b, 0x6b),
        }
    }

    pub fn light() -> Self {
        Self {
            background: hex(0xf8, 0xf9, 0xfa),
            header_fg: hex(0xff, 0xff, 0xff),
            header_bg: hex(0x3b, 0x5b, 0xdb),
            border: hex(0xce, 0xd4, 0xda),
            text: hex(0x21, 0x25, 0x29),
            dim: hex(0x86, 0x8e, 0x96),
            highlight_bg: hex(0xdd, 0xe4, 0xff),
            active: hex(0x3b, 0x5b, 0xdb),
            error: hex(0xc9, 0x2a, 0x2a),
            footer_fg: hex(0x49, 0x50, 0x57),
            footer_bg: Color::Reset,

            score_high: BadgeColors {
                bg: hex(0xd3, 0xf9, 0xd8),
                fg: hex(0x2f, 0x9e, 0x44),
            },
            score_mid: BadgeColors {
                bg: hex(0xff, 0xf3, 0xbf),
                fg: hex(0xe6, 0x77, 0x00),
            },
            score_low: BadgeColors {
                bg: hex(0xff, 0xe3, 0xe3),
                fg: hex(0xc9, 0x2a, 0x2a),
            },

            chip_keyword: hex(0x3b, 0x5b, 0xdb),
            chip_strength: hex(0x2f, 0x9e, 0x44),
            chip_weakness: hex(0xc9, 0x2a, 0x2a),
        }
    }

    pub fn score_colors(&self, band: ScoreBand) -> BadgeColors {
        match band {
            ScoreBand::High => self.score_high,
            ScoreBand::Mid => self.score_mid,
            ScoreBand::Low => self.score_low,
            ScoreBand::None => BadgeColors {
                bg: Color::Reset,
                fg: self.dim,
            },
        }
    }

    pub fn score_style(&self, band: ScoreBand) -> Style {
        let c = self.score_colors(band);
        Style::default().fg(c.fg).bg(c.bg).add_modifier(Modifier::BOLD)
    }

    pub fn chip_style(&self, chip: ChipStyle) -> Style {
        let fg = match chip {
            ChipStyle::Keyword => self.chip_keyword,
            ChipStyle::Strength => self.chip_strength,
            ChipStyle::Weakness => self.chip_weakness,
        };
        Style::default().fg(fg)
    }

    pub fn difficulty_style(&self, level: Difficulty) -> Style {
        let fg = match level {
            Difficulty::High => self.score_low.fg,
            Difficulty::Medium => self.score_mid.fg,
            Difficulty::Low => self.score_high.fg,
        };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub fn domain_style(&self, color: DomainColor) -> Style {
        Style::default().fg(rgb(color.fg)).bg(rgb(color.bg))
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}

pub fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}
