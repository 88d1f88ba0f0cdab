//! Decoder error types.

use thiserror::Error;

/// Result type for decoder operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding measurement outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bitstring has no entry in any move table.
    #[error("Unknown outcome '{bitstring}': no move is defined for this bit pattern")]
    UnknownOutcome {
        /// The offending bitstring.
        bitstring: String,
    },

    /// The measurement map mixes bitstrings of different widths.
    #[error("Inconsistent outcome width: '{bitstring}' has {found} bits, expected {expected}")]
    InconsistentWidth {
        /// Width of the first bitstring seen.
        expected: usize,
        /// Width of the offending bitstring.
        found: usize,
        /// The offending bitstring.
        bitstring: String,
    },
}
