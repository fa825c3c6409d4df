use anyhow::Result;
use ratatui::style::Color;

use crate::store::KeyValueStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(THEME_KEY).as_deref().map(str::trim) {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn save(self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(THEME_KEY, self.as_str())
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                fg: Color::Gray,
                bg: Color::Reset,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                selected_bg: Color::DarkGray,
                top3: Color::Yellow,
                high_win: Color::Green,
                pinned: Color::Magenta,
                wins: Color::Green,
                draws: Color::Yellow,
                losses: Color::Red,
                error: Color::LightRed,
            },
            Theme::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::Gray,
                accent: Color::Blue,
                selected_bg: Color::LightBlue,
                top3: Color::Rgb(176, 122, 0),
                high_win: Color::Rgb(0, 128, 64),
                pinned: Color::Rgb(160, 32, 160),
                wins: Color::Rgb(0, 128, 64),
                draws: Color::Rgb(176, 122, 0),
                losses: Color::Rgb(180, 30, 30),
                error: Color::Red,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub selected_bg: Color,
    pub top3: Color,
    pub high_win: Color,
    pub pinned: Color,
    pub wins: Color,
    pub draws: Color,
    pub losses: Color,
    pub error: Color,
}
