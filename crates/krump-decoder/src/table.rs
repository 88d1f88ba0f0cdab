//! Static move tables.
//!
//! Each table is an arena of `2^n` records indexed by the integer value of an
//! n-bit outcome. The first character of a bitstring is the most significant
//! bit, so `"011"` selects record 3. Array lengths are part of the record
//! types, which makes a missing entry a compile error.
//!
//! | Width | Table | Bit labels |
//! |-------|-------|------------|
//! | 2 | [`PAIR`] | stomp, chest pop |
//! | 3 | [`TRIPLE`] | stomp, chest pop, arm swing |

use serde::Serialize;

use crate::energy::Energy;
use crate::error::{DecodeError, DecodeResult};

/// Fixed semantic payload of one bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// Move name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Intensity.
    pub energy: Energy,
    /// Emoji shown next to the name.
    pub icon: &'static str,
}

/// One labelled bit of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Component {
    /// What the bit means.
    pub label: &'static str,
    /// Whether the bit is set.
    pub active: bool,
}

/// Lookup table for outcomes of one width.
#[derive(Debug)]
pub struct MoveTable {
    /// Short table name.
    pub name: &'static str,
    /// Number of bits per outcome.
    pub width: usize,
    /// Meaning of each bit position, most significant first.
    pub bit_labels: &'static [&'static str],
    records: &'static [MoveRecord],
}

const PAIR_RECORDS: [MoveRecord; 1 << 2] = [
    MoveRecord {
        name: "Stance",
        description: "Grounded stance, weight low, waiting for the beat.",
        energy: Energy::Chill,
        icon: "🧍",
    },
    MoveRecord {
        name: "Chest Pop",
        description: "Sharp chest pop on the snare.",
        energy: Energy::Groove,
        icon: "💥",
    },
    MoveRecord {
        name: "Stomp",
        description: "Heavy stomp that drops your weight into the floor.",
        energy: Energy::Groove,
        icon: "🦶",
    },
    MoveRecord {
        name: "Buck Hop",
        description: "Stomp and chest pop on the same count, then hop out of it.",
        energy: Energy::FullBuck,
        icon: "🔥",
    },
];

const TRIPLE_RECORDS: [MoveRecord; 1 << 3] = [
    MoveRecord {
        name: "Stance",
        description: "Grounded stance, weight low, waiting for the beat.",
        energy: Energy::Chill,
        icon: "🧍",
    },
    MoveRecord {
        name: "Arm Swing",
        description: "Wide arm swings that cut the space in front of you.",
        energy: Energy::Groove,
        icon: "💪",
    },
    MoveRecord {
        name: "Chest Pop",
        description: "Sharp chest pop on the snare.",
        energy: Energy::Groove,
        icon: "💥",
    },
    MoveRecord {
        name: "Pop Swing",
        description: "Chest pop flowing straight into an arm swing.",
        energy: Energy::Hype,
        icon: "🌀",
    },
    MoveRecord {
        name: "Stomp",
        description: "Heavy stomp that drops your weight into the floor.",
        energy: Energy::Groove,
        icon: "🦶",
    },
    MoveRecord {
        name: "Stomp Swing",
        description: "Stomp with an arm swing landing on the same count.",
        energy: Energy::Hype,
        icon: "🌪",
    },
    MoveRecord {
        name: "Jab Pop",
        description: "Stomp and chest pop together, compact and loud.",
        energy: Energy::Hype,
        icon: "👊",
    },
    MoveRecord {
        name: "Buck",
        description: "Stomp, pop and swing at once. Everything you have.",
        energy: Energy::FullBuck,
        icon: "🔥",
    },
];

/// Two-qubit table (Bell-state circuits).
pub static PAIR: MoveTable = MoveTable {
    name: "pair",
    width: 2,
    bit_labels: &["stomp", "chest pop"],
    records: &PAIR_RECORDS,
};

/// Three-qubit reference table.
pub static TRIPLE: MoveTable = MoveTable {
    name: "triple",
    width: 3,
    bit_labels: &["stomp", "chest pop", "arm swing"],
    records: &TRIPLE_RECORDS,
};

static TABLES: [&MoveTable; 2] = [&PAIR, &TRIPLE];

impl MoveTable {
    /// Table for outcomes of `width` bits, if one is defined.
    pub fn for_width(width: usize) -> Option<&'static MoveTable> {
        TABLES.iter().copied().find(|t| t.width == width)
    }

    /// All defined tables, narrowest first.
    pub fn all() -> impl Iterator<Item = &'static MoveTable> {
        TABLES.iter().copied()
    }

    /// Records in index order, paired with their bitstrings.
    pub fn records(&self) -> impl Iterator<Item = (String, &MoveRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (format!("{index:0width$b}", width = self.width), record))
    }

    /// Number of records, always `2^width`.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Tables are never empty; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for a bitstring of this table's width.
    pub fn get(&self, bitstring: &str) -> Option<&'static MoveRecord> {
        if bitstring.len() != self.width {
            return None;
        }
        bit_index(bitstring).and_then(|index| self.records.get(index))
    }

    /// One labelled flag per bit position.
    pub fn components(&self, bitstring: &str) -> Vec<Component> {
        self.bit_labels
            .iter()
            .zip(bitstring.chars())
            .map(|(&label, bit)| Component {
                label,
                active: bit == '1',
            })
            .collect()
    }
}

/// Integer value of a `0`/`1` string, most significant bit first.
fn bit_index(bitstring: &str) -> Option<usize> {
    if bitstring.is_empty() || bitstring.len() >= usize::BITS as usize {
        return None;
    }
    bitstring.chars().try_fold(0usize, |acc, bit| match bit {
        '0' => Some(acc << 1),
        '1' => Some((acc << 1) | 1),
        _ => None,
    })
}

/// Look up the record for a bitstring in the table of matching width.
pub fn lookup(bitstring: &str) -> DecodeResult<&'static MoveRecord> {
    MoveTable::for_width(bitstring.len())
        .and_then(|table| table.get(bitstring))
        .ok_or_else(|| DecodeError::UnknownOutcome {
            bitstring: bitstring.to_string(),
        })
}
