//! Report presets and colour themes.
//!
//! A report variant is a [`Preset`] (which sections, in which order)
//! combined with a [`Theme`] (which colours).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sections::SectionKind;

/// Which sections a report contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Header, outcome breakdown, distribution chart, footer.
    #[default]
    Results,
    /// Decorative move card: ranked moves and tips around the results.
    Card,
    /// Results plus the raw count listing.
    DataDump,
}

impl Preset {
    /// Sections in document order.
    pub fn sections(self) -> &'static [SectionKind] {
        use SectionKind::*;
        match self {
            Preset::Results => &[Header, OutcomeBreakdown, DistributionChart, Footer],
            Preset::Card => &[
                Header,
                RankedSummary,
                OutcomeBreakdown,
                Tips,
                DistributionChart,
                Footer,
            ],
            Preset::DataDump => &[
                Header,
                OutcomeBreakdown,
                DistributionChart,
                RawData,
                Footer,
            ],
        }
    }

    /// Whether the preset shows decoded moves.
    pub fn wants_moves(self) -> bool {
        matches!(self, Preset::Card)
    }

    /// Name used in filenames and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Results => "results",
            Preset::Card => "card",
            Preset::DataDump => "data-dump",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "results" | "plain" => Ok(Preset::Results),
            "card" => Ok(Preset::Card),
            "data-dump" | "datadump" | "dump" => Ok(Preset::DataDump),
            other => Err(format!(
                "Unknown preset: '{other}'. Available: results, card, data-dump"
            )),
        }
    }
}

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    /// High-contrast black and fire palette for move cards.
    Krump,
}

impl Theme {
    /// Colours for this theme.
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
            Theme::Krump => &KRUMP,
        }
    }

    /// Name used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Krump => "krump",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "krump" => Ok(Theme::Krump),
            other => Err(format!(
                "Unknown theme: '{other}'. Available: light, dark, krump"
            )),
        }
    }
}

/// Colours used by the sections.
#[derive(Debug)]
pub struct Palette {
    /// Two background gradient stops, top-left to bottom-right.
    pub background: (&'static str, &'static str),
    pub panel: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub bar: &'static str,
    pub bar_alt: &'static str,
    pub track: &'static str,
}

static LIGHT: Palette = Palette {
    background: ("#f7f8fc", "#eceff6"),
    panel: "#ffffff",
    border: "#d9deea",
    text: "#1b1f2a",
    muted: "#5d6477",
    accent: "#4055d6",
    bar: "#4f6bff",
    bar_alt: "#9aa9ff",
    track: "#e6e9f3",
};

static DARK: Palette = Palette {
    background: ("#151923", "#0f1116"),
    panel: "#1d2230",
    border: "#2c3346",
    text: "#f5f7fb",
    muted: "#a3abc2",
    accent: "#7f95ff",
    bar: "#6d84ff",
    bar_alt: "#3c4a8f",
    track: "#262c3d",
};

static KRUMP: Palette = Palette {
    background: ("#120707", "#050505"),
    panel: "#1c0d0b",
    border: "#5a1f12",
    text: "#fff4e6",
    muted: "#d9a98c",
    accent: "#ff5a1f",
    bar: "#ff7a1a",
    bar_alt: "#c2281b",
    track: "#2b1410",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parse() {
        assert_eq!("card".parse::<Preset>().unwrap(), Preset::Card);
        assert_eq!("Data-Dump".parse::<Preset>().unwrap(), Preset::DataDump);
        assert!("poster".parse::<Preset>().is_err());
    }

    #[test]
    fn test_theme_parse_and_display() {
        for theme in [Theme::Light, Theme::Dark, Theme::Krump] {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
    }

    #[test]
    fn test_every_preset_has_header_and_footer() {
        for preset in [Preset::Results, Preset::Card, Preset::DataDump] {
            let sections = preset.sections();
            assert_eq!(sections.first(), Some(&SectionKind::Header));
            assert_eq!(sections.last(), Some(&SectionKind::Footer));
        }
    }
}
