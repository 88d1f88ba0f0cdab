//! Job result payloads.
//!
//! [`JobResult`] mirrors the JSON object the relay writes back once a job
//! finishes: per-bitstring counts, per-bitstring probabilities and a few
//! optional descriptive fields. Maps are ordered by bitstring so every
//! consumer iterates outcomes in the same order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Tolerance used when checking that probabilities sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-3;

/// Clamp a probability into `[0, 1]`, mapping NaN to `0`.
///
/// Every numeric formula fed by a probability goes through this first.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Result of a completed job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    /// Bitstring -> number of occurrences.
    #[serde(default)]
    pub measurements: BTreeMap<String, u64>,
    /// Bitstring -> fraction of shots in `[0, 1]`.
    #[serde(default)]
    pub probabilities: BTreeMap<String, f64>,
    /// Total number of shots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u64>,
    /// Circuit description the job ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<String>,
    /// Number of measured qubits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_qubits: Option<u32>,
    /// Backend identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Final statevector, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statevector: Option<serde_json::Value>,
}

impl JobResult {
    /// Build a result from counts, deriving probabilities as `count / shots`.
    pub fn from_counts(measurements: BTreeMap<String, u64>) -> Self {
        let shots: u64 = measurements.values().sum();
        let probabilities = measurements
            .iter()
            .map(|(bits, &count)| {
                let p = if shots == 0 {
                    0.0
                } else {
                    count as f64 / shots as f64
                };
                (bits.clone(), p)
            })
            .collect();
        let n_qubits = measurements.keys().next().map(|b| b.len() as u32);

        Self {
            measurements,
            probabilities,
            shots: Some(shots),
            n_qubits,
            ..Self::default()
        }
    }

    /// Set the circuit description.
    pub fn with_circuit(mut self, circuit: impl Into<String>) -> Self {
        self.circuit = Some(circuit.into());
        self
    }

    /// Set the backend identifier.
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Sum of all counts.
    pub fn total_counts(&self) -> u64 {
        self.measurements.values().sum()
    }

    /// Shots as reported, falling back to the sum of counts.
    pub fn shots_or_total(&self) -> u64 {
        self.shots.unwrap_or_else(|| self.total_counts())
    }

    /// Probability for a bitstring, `0` when absent.
    pub fn probability_of(&self, bitstring: &str) -> f64 {
        self.probabilities.get(bitstring).copied().unwrap_or(0.0)
    }

    /// All observed outcomes, most probable first.
    ///
    /// Ties keep bitstring order.
    pub fn outcomes(&self) -> Vec<MeasurementOutcome> {
        let mut outcomes: Vec<MeasurementOutcome> = self
            .measurements
            .iter()
            .map(|(bits, &count)| MeasurementOutcome {
                bitstring: bits.clone(),
                count,
                probability: self.probability_of(bits),
            })
            .collect();
        outcomes.sort_by(|a, b| {
            clamp_probability(b.probability).total_cmp(&clamp_probability(a.probability))
        });
        outcomes
    }

    /// The outcome with the highest count, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.measurements
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(bits, &count)| (bits.as_str(), count))
    }

    /// Check the completeness invariants of a full result set.
    ///
    /// `Σcount == shots` when shots are reported, and `Σprobability ≈ 1`
    /// within [`PROBABILITY_TOLERANCE`] when probabilities are present.
    pub fn check_complete(&self) -> HalResult<()> {
        let total = self.total_counts();
        if let Some(shots) = self.shots {
            if total != shots {
                return Err(HalError::IncompleteResult(format!(
                    "counts sum to {total} but shots is {shots}"
                )));
            }
        }

        if !self.probabilities.is_empty() {
            let sum: f64 = self.probabilities.values().copied().sum();
            if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(HalError::IncompleteResult(format!(
                    "probabilities sum to {sum:.6}"
                )));
            }
        }

        Ok(())
    }
}

/// A single observed bit pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementOutcome {
    /// Fixed-width bitstring, one character per qubit.
    pub bitstring: String,
    /// Occurrences across all shots.
    pub count: u64,
    /// Fraction of shots.
    pub probability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bell() -> JobResult {
        JobResult::from_counts(BTreeMap::from([("00".into(), 512), ("11".into(), 512)]))
    }

    #[test]
    fn test_from_counts_derives_probabilities() {
        let result = bell();
        assert_eq!(result.shots, Some(1024));
        assert_eq!(result.n_qubits, Some(2));
        assert!((result.probability_of("00") - 0.5).abs() < 1e-12);
        assert_eq!(result.probability_of("01"), 0.0);
    }

    #[test]
    fn test_outcomes_sorted_descending() {
        let mut result = JobResult::from_counts(BTreeMap::from([
            ("000".into(), 24),
            ("111".into(), 1000),
        ]));
        result.probabilities.insert("000".into(), 0.024);
        result.probabilities.insert("111".into(), 0.976);

        let outcomes = result.outcomes();
        assert_eq!(outcomes[0].bitstring, "111");
        assert_eq!(outcomes[1].bitstring, "000");
    }

    #[test]
    fn test_outcomes_tie_keeps_bitstring_order() {
        let outcomes = bell().outcomes();
        assert_eq!(outcomes[0].bitstring, "00");
        assert_eq!(outcomes[1].bitstring, "11");
    }

    #[test]
    fn test_check_complete() {
        assert!(bell().check_complete().is_ok());

        let mut short = bell();
        short.shots = Some(2000);
        assert!(matches!(
            short.check_complete(),
            Err(HalError::IncompleteResult(_))
        ));

        let mut skewed = bell();
        skewed.probabilities.insert("00".into(), 0.9);
        assert!(skewed.check_complete().is_err());
    }

    #[test]
    fn test_clamp_probability() {
        assert_eq!(clamp_probability(f64::NAN), 0.0);
        assert_eq!(clamp_probability(-0.2), 0.0);
        assert_eq!(clamp_probability(1.7), 1.0);
        assert_eq!(clamp_probability(0.25), 0.25);
    }

    #[test]
    fn test_deserialize_partial_payload() {
        let json = r#"{"measurements": {"01": 3}, "statevector": null, "extra": true}"#;
        let result: JobResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.total_counts(), 3);
        assert!(result.probabilities.is_empty());
        assert_eq!(result.shots_or_total(), 3);
        assert!(result.statevector.is_none());
    }

    #[test]
    fn test_most_frequent() {
        let result = JobResult::from_counts(BTreeMap::from([
            ("0".into(), 3),
            ("1".into(), 7),
        ]));
        assert_eq!(result.most_frequent(), Some(("1", 7)));
    }
}
