//! Color palettes for the three reader themes.

use coderistic_core::Theme;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub heading: Color,
    pub quote: Color,
    pub border: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
}

const DARK: Palette = Palette {
    background: Color::Rgb(10, 10, 10),
    text: Color::Rgb(212, 212, 212),
    muted: Color::Rgb(115, 115, 115),
    accent: Color::Rgb(245, 245, 245),
    heading: Color::White,
    quote: Color::Rgb(163, 163, 163),
    border: Color::Rgb(64, 64, 64),
    selection_fg: Color::Black,
    selection_bg: Color::Rgb(229, 229, 229),
};

const HEAVENLY: Palette = Palette {
    background: Color::Rgb(240, 246, 255),
    text: Color::Rgb(30, 58, 95),
    muted: Color::Rgb(100, 130, 170),
    accent: Color::Rgb(202, 138, 4),
    heading: Color::Rgb(23, 37, 84),
    quote: Color::Rgb(59, 110, 180),
    border: Color::Rgb(191, 219, 254),
    selection_fg: Color::White,
    selection_bg: Color::Rgb(59, 110, 180),
};

const LIGHT: Palette = Palette {
    background: Color::Rgb(250, 250, 249),
    text: Color::Rgb(41, 37, 36),
    muted: Color::Rgb(120, 113, 108),
    accent: Color::Rgb(12, 10, 9),
    heading: Color::Black,
    quote: Color::Rgb(87, 83, 78),
    border: Color::Rgb(214, 211, 209),
    selection_fg: Color::White,
    selection_bg: Color::Rgb(41, 37, 36),
};

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => DARK,
            Theme::Heavenly => HEAVENLY,
            Theme::Light => LIGHT,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }
}
