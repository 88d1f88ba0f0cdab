//! Decoding measurement maps into ranked moves.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use krump_hal::{JobResult, clamp_probability};

use crate::energy::Energy;
use crate::error::{DecodeError, DecodeResult};
use crate::table::{Component, MoveTable};

/// A measurement outcome decorated with its move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedMove {
    /// Observed bitstring.
    pub bitstring: String,
    /// Occurrences across all shots.
    pub count: u64,
    /// Fraction of shots, clamped into `[0, 1]`.
    pub probability: f64,
    /// Move name.
    pub name: &'static str,
    /// Move description.
    pub description: &'static str,
    /// Move intensity.
    pub energy: Energy,
    /// Move emoji.
    pub icon: &'static str,
    /// One labelled flag per bit.
    pub components: Vec<Component>,
}

/// Decode every outcome in `measurements`, most probable first.
///
/// A bitstring missing from `probabilities` gets probability `0`. The sort
/// is stable, so equal probabilities keep the map's (bitstring) order.
pub fn decode(
    measurements: &BTreeMap<String, u64>,
    probabilities: &BTreeMap<String, f64>,
) -> DecodeResult<Vec<DecodedMove>> {
    let Some(width) = measurements.keys().next().map(String::len) else {
        return Ok(Vec::new());
    };

    let table = MoveTable::for_width(width);
    let mut decoded = Vec::with_capacity(measurements.len());

    for (bitstring, &count) in measurements {
        if bitstring.len() != width {
            return Err(DecodeError::InconsistentWidth {
                expected: width,
                found: bitstring.len(),
                bitstring: bitstring.clone(),
            });
        }

        let (table, record) = table
            .and_then(|t| t.get(bitstring).map(|r| (t, r)))
            .ok_or_else(|| DecodeError::UnknownOutcome {
                bitstring: bitstring.clone(),
            })?;

        let probability = clamp_probability(probabilities.get(bitstring).copied().unwrap_or(0.0));

        decoded.push(DecodedMove {
            bitstring: bitstring.clone(),
            count,
            probability,
            name: record.name,
            description: record.description,
            energy: record.energy,
            icon: record.icon,
            components: table.components(bitstring),
        });
    }

    decoded.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    debug!("Decoded {} outcomes of width {}", decoded.len(), width);

    Ok(decoded)
}

/// Decode the two maps of a job result.
pub fn decode_result(result: &JobResult) -> DecodeResult<Vec<DecodedMove>> {
    decode(&result.measurements, &result.probabilities)
}

/// The first `n` moves of an already ranked sequence.
pub fn top_n(decoded: &[DecodedMove], n: usize) -> &[DecodedMove] {
    &decoded[..n.min(decoded.len())]
}

/// Probability-weighted mean energy, `0` when no probability mass is present.
///
/// For probabilities that sum to one this is `Σ(energy × probability)`.
pub fn average_energy(decoded: &[DecodedMove]) -> f64 {
    let (weighted, mass) = decoded.iter().fold((0.0, 0.0), |(weighted, mass), m| {
        let p = clamp_probability(m.probability);
        (weighted + f64::from(m.energy.level()) * p, mass + p)
    });

    if mass > 0.0 { weighted / mass } else { 0.0 }
}

/// Move names of the top `n` outcomes, in rank order.
pub fn suggested_sequence(decoded: &[DecodedMove], n: usize) -> Vec<&'static str> {
    top_n(decoded, n).iter().map(|m| m.name).collect()
}
