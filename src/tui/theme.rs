//! Light/dark color palettes.

use ratatui::style::Color;

/// Session color theme, toggled with F3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Returns the other theme.
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Clair",
            Self::Dark => "Sombre",
        }
    }

    /// Returns the colors used to draw this theme.
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                text: Color::Black,
                background: Color::White,
                accent: Color::Blue,
                focus: Color::Magenta,
                muted: Color::Gray,
                success: Color::Green,
                warn: Color::Rgb(180, 120, 0),
                error: Color::Red,
            },
            Self::Dark => Palette {
                text: Color::White,
                background: Color::Reset,
                accent: Color::Cyan,
                focus: Color::Yellow,
                muted: Color::DarkGray,
                success: Color::Green,
                warn: Color::Yellow,
                error: Color::Red,
            },
        }
    }
}

/// Colors passed to every draw function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub background: Color,
    /// Borders and titles.
    pub accent: Color,
    /// Border of the focused input.
    pub focus: Color,
    pub muted: Color,
    pub success: Color,
    pub warn: Color,
    pub error: Color,
}
