//! Display language and color theme selectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language the reader displays posts and interface strings in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (primary)
    #[default]
    En,
    /// Khmer (secondary)
    Kh,
}

impl Language {
    /// Returns the other language.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Kh,
            Language::Kh => Language::En,
        }
    }

    /// Returns true for the secondary language.
    pub fn is_secondary(self) -> bool {
        matches!(self, Language::Kh)
    }

    /// Short code used in config files and CLI flags.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Kh => "kh",
        }
    }

    /// English name of the language, used in the wisdom instruction.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Kh => "Khmer",
        }
    }

    /// Returns all languages for iteration.
    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Kh]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "kh" | "km" | "khmer" => Ok(Self::Kh),
            other => Err(format!("Unknown language: {other} (expected en or kh)")),
        }
    }
}

/// Color theme of the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Heavenly,
    Light,
}

impl Theme {
    /// Cycles dark -> heavenly -> light -> dark.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Theme::Dark => Theme::Heavenly,
            Theme::Heavenly => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Heavenly => "heavenly",
            Theme::Light => "light",
        }
    }

    /// Glyph shown next to the theme name in the header.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "❍",
            Theme::Heavenly => "✧",
            Theme::Light => "◌",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Dark, Theme::Heavenly, Theme::Light]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "heavenly" => Ok(Self::Heavenly),
            "light" => Ok(Self::Light),
            other => Err(format!(
                "Unknown theme: {other} (expected dark, heavenly or light)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_toggle_flips_between_both_values() {
        assert_eq!(Language::En.toggle(), Language::Kh);
        assert_eq!(Language::Kh.toggle(), Language::En);
        assert_eq!(Language::En.toggle().toggle(), Language::En);
    }

    #[test]
    fn test_language_parsing_accepts_aliases() {
        assert_eq!(Language::from_str("EN").unwrap(), Language::En);
        assert_eq!(Language::from_str("khmer").unwrap(), Language::Kh);
        assert_eq!(Language::from_str(" km ").unwrap(), Language::Kh);
        assert!(Language::from_str("fr").is_err());
    }

    #[test]
    fn test_theme_cycle_visits_every_theme() {
        let mut theme = Theme::default();
        let mut seen = Vec::new();
        for _ in 0..Theme::all().len() {
            seen.push(theme);
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Dark);
        assert_eq!(seen, Theme::all());
    }

    #[test]
    fn test_language_serde_uses_short_code() {
        #[derive(Deserialize)]
        struct Wrapper {
            language: Language,
        }
        let parsed: Wrapper = toml::from_str("language = \"kh\"").unwrap();
        assert_eq!(parsed.language, Language::Kh);
    }
}
