//! Energy levels attached to moves.

use serde::Serialize;

/// Ordinal intensity of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Energy {
    Chill = 0,
    Groove = 1,
    Hype = 2,
    FullBuck = 3,
}

impl Energy {
    /// Highest defined level.
    pub const MAX: u8 = 3;

    /// Level from its ordinal, if in range.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Energy::Chill),
            1 => Some(Energy::Groove),
            2 => Some(Energy::Hype),
            3 => Some(Energy::FullBuck),
            _ => None,
        }
    }

    /// Ordinal value in `0..=3`.
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Energy::Chill => "Chill",
            Energy::Groove => "Groove",
            Energy::Hype => "Hype",
            Energy::FullBuck => "Full Buck",
        }
    }

    /// Three-cell meter, one filled cell per level.
    pub fn meter(self) -> &'static str {
        match self {
            Energy::Chill => "▯▯▯",
            Energy::Groove => "▮▯▯",
            Energy::Hype => "▮▮▯",
            Energy::FullBuck => "▮▮▮",
        }
    }
}

impl From<Energy> for u8 {
    fn from(energy: Energy) -> Self {
        energy.level()
    }
}

impl std::fmt::Display for Energy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for a raw energy value. Out-of-range values get the level-0 label.
pub fn energy_label(energy: u8) -> &'static str {
    Energy::from_level(energy).unwrap_or(Energy::Chill).label()
}

/// Meter for a raw energy value. Out-of-range values get the level-0 meter.
pub fn energy_meter(energy: u8) -> &'static str {
    Energy::from_level(energy).unwrap_or(Energy::Chill).meter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_cover_all_levels() {
        assert_eq!(energy_label(0), "Chill");
        assert_eq!(energy_label(1), "Groove");
        assert_eq!(energy_label(2), "Hype");
        assert_eq!(energy_label(3), "Full Buck");
    }

    #[test]
    fn test_out_of_range_falls_back_to_zero() {
        assert_eq!(energy_label(4), energy_label(0));
        assert_eq!(energy_label(u8::MAX), "Chill");
        assert_eq!(energy_meter(9), "▯▯▯");
    }

    #[test]
    fn test_level_roundtrip() {
        for level in 0..=Energy::MAX {
            assert_eq!(Energy::from_level(level).unwrap().level(), level);
        }
    }
}
