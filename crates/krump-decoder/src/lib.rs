//! Krump measurement decoder
//!
//! Turns raw measurement statistics into ranked dance moves. Every bit
//! pattern of a supported width maps to a fixed [`MoveRecord`] through a
//! static [`MoveTable`]; outcomes outside the tables are rejected with
//! [`DecodeError::UnknownOutcome`] instead of producing blank records.
//!
//! ```text
//! {bitstring -> count}      ┐
//!                           ├─→ decode() ─→ [DecodedMove] (probability desc)
//! {bitstring -> probability}┘                    │
//!                                                ├─→ top_n()
//!                                                ├─→ average_energy()
//!                                                └─→ suggested_sequence()
//! ```
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use krump_decoder::{average_energy, decode, top_n};
//!
//! let counts = BTreeMap::from([("111".to_string(), 1000), ("000".to_string(), 24)]);
//! let probs = BTreeMap::from([("111".to_string(), 0.976), ("000".to_string(), 0.024)]);
//!
//! let moves = decode(&counts, &probs).unwrap();
//! assert_eq!(top_n(&moves, 1)[0].name, "Buck");
//! assert!(average_energy(&moves) <= 3.0);
//! ```

pub mod decode;
pub mod energy;
pub mod error;
pub mod table;

pub use decode::{DecodedMove, average_energy, decode, decode_result, suggested_sequence, top_n};
pub use energy::{Energy, energy_label, energy_meter};
pub use error::{DecodeError, DecodeResult};
pub use table::{Component, MoveRecord, MoveTable, PAIR, TRIPLE, lookup};
