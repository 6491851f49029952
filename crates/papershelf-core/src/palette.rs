use std::collections::HashMap;

/// A 24-bit color, kept free of any terminal library types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Background/foreground pair for a domain tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainColor {
    pub bg: Rgb,
    pub fg: Rgb,
}

const fn pair(bg: Rgb, fg: Rgb) -> DomainColor {
    DomainColor { bg, fg }
}

pub const LIGHT_PALETTE: [DomainColor; 10] = [
    pair(Rgb(0xdd, 0xe4, 0xff), Rgb(0x3b, 0x5b, 0xdb)),
    pair(Rgb(0xd3, 0xf9, 0xd8), Rgb(0x2f, 0x9e, 0x44)),
    pair(Rgb(0xff, 0xf3, 0xbf), Rgb(0xe6, 0x77, 0x00)),
    pair(Rgb(0xff, 0xe8, 0xcc), Rgb(0xd9, 0x48, 0x0f)),
    pair(Rgb(0xf3, 0xd9, 0xfa), Rgb(0x9c, 0x36, 0xb5)),
    pair(Rgb(0xd0, 0xeb, 0xff), Rgb(0x19, 0x71, 0xc2)),
    pair(Rgb(0xfc, 0xc2, 0xd7), Rgb(0xa6, 0x1e, 0x4d)),
    pair(Rgb(0xc5, 0xf6, 0xfa), Rgb(0x0c, 0x85, 0x99)),
    pair(Rgb(0xe9, 0xfa, 0xc8), Rgb(0x5c, 0x94, 0x0d)),
    pair(Rgb(0xff, 0xe3, 0xe3), Rgb(0xc9, 0x2a, 0x2a)),
];

pub const DARK_PALETTE: [DomainColor; 10] = [
    pair(Rgb(0x1a, 0x21, 0x50), Rgb(0x74, 0x8f, 0xfc)),
    pair(Rgb(0x0c, 0x2b, 0x18), Rgb(0x51, 0xcf, 0x66)),
    pair(Rgb(0x2b, 0x1f, 0x00), Rgb(0xff, 0xd4, 0x3b)),
    pair(Rgb(0x2b, 0x14, 0x00), Rgb(0xff, 0x92, 0x2b)),
    pair(Rgb(0x20, 0x10, 0x3a), Rgb(0xda, 0x77, 0xf2)),
    pair(Rgb(0x0a, 0x1f, 0x3d), Rgb(0x4d, 0xab, 0xf7)),
    pair(Rgb(0x2a, 0x0d, 0x1e), Rgb(0xf7, 0x83, 0xac)),
    pair(Rgb(0x00, 0x1e, 0x26), Rgb(0x22, 0xd3, 0xee)),
    pair(Rgb(0x16, 0x25, 0x00), Rgb(0xa9, 0xe3, 0x4b)),
    pair(Rgb(0x2a, 0x0a, 0x0a), Rgb(0xff, 0x6b, 0x6b)),
];

/// Light or dark display mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn palette(self) -> &'static [DomainColor; 10] {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }
}

/// Session-wide domain → palette index assignment, in first-encounter order.
///
/// Indices never change once assigned, so a domain keeps its color across
/// re-renders and theme switches.
#[derive(Debug, Clone, Default)]
pub struct DomainColors {
    assigned: HashMap<String, usize>,
    counter: usize,
}

impl DomainColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Palette index for `domain`, assigning the next one on first encounter.
    pub fn index(&mut self, domain: &str) -> usize {
        if let Some(&idx) = self.assigned.get(domain) {
            return idx;
        }
        let idx = self.counter % LIGHT_PALETTE.len();
        self.counter += 1;
        self.assigned.insert(domain.to_string(), idx);
        idx
    }

    pub fn color(&mut self, domain: &str, mode: ThemeMode) -> DomainColor {
        let idx = self.index(domain);
        mode.palette()[idx]
    }

    pub fn reset(&mut self) {
        self.assigned.clear();
        self.counter = 0;
    }
}
