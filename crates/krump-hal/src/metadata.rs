//! Descriptive job metadata and its resolution against a result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::JobResult;

/// Circuit name shown when neither the metadata nor the result carries one.
pub const UNKNOWN_CIRCUIT: &str = "Unknown Circuit";

/// Backend shown when neither the metadata nor the result carries one.
pub const DEFAULT_BACKEND: &str = "simulator";

/// Optional context attached to a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Circuit name or description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<String>,
    /// Shots requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u64>,
    /// ISO-8601 creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Backend identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_type: Option<String>,
}

impl JobMetadata {
    /// Fill every field, falling back to the result and then to fixed defaults.
    pub fn resolve(&self, result: &JobResult) -> ResolvedMetadata {
        let circuit = non_empty(self.circuit.as_deref())
            .or_else(|| non_empty(result.circuit.as_deref()))
            .unwrap_or(UNKNOWN_CIRCUIT)
            .to_string();

        let backend = non_empty(self.backend_type.as_deref())
            .or_else(|| non_empty(result.backend.as_deref()))
            .unwrap_or(DEFAULT_BACKEND)
            .to_string();

        let shots = self.shots.unwrap_or_else(|| result.shots_or_total());

        let created_at = self.created_at.as_deref().map(CreatedAt::parse);

        ResolvedMetadata {
            circuit,
            shots,
            backend,
            created_at,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A creation timestamp that may not have parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatedAt {
    /// Valid RFC 3339 timestamp.
    Parsed(DateTime<Utc>),
    /// Unparseable input, kept verbatim for display.
    Raw(String),
}

impl CreatedAt {
    /// Parse an ISO-8601 string, keeping the raw text on failure.
    pub fn parse(raw: &str) -> Self {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| CreatedAt::Parsed(dt.with_timezone(&Utc)))
            .unwrap_or_else(|_| CreatedAt::Raw(raw.to_string()))
    }

    /// Human-readable form, `YYYY-MM-DD HH:MM UTC` when parsed.
    pub fn display(&self) -> String {
        match self {
            CreatedAt::Parsed(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
            CreatedAt::Raw(raw) => raw.clone(),
        }
    }
}

/// Metadata with every fallback applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMetadata {
    /// Circuit name.
    pub circuit: String,
    /// Shot count.
    pub shots: u64,
    /// Backend identifier.
    pub backend: String,
    /// Creation time, if any was supplied.
    pub created_at: Option<CreatedAt>,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let resolved = JobMetadata::default().resolve(&JobResult::default());

        assert_eq!(resolved.circuit, UNKNOWN_CIRCUIT);
        assert_eq!(resolved.backend, DEFAULT_BACKEND);
        assert_eq!(resolved.shots, 0);
        assert!(resolved.created_at.is_none());
    }

    #[test]
    fn test_resolve_prefers_metadata_then_result() {
        let result = JobResult::from_counts(BTreeMap::from([("0".into(), 4)]))
            .with_circuit("from-result")
            .with_backend("qpu");

        let meta = JobMetadata {
            circuit: Some("  ".into()),
            backend_type: Some("fake-backend".into()),
            ..Default::default()
        };
        let resolved = meta.resolve(&result);

        assert_eq!(resolved.circuit, "from-result");
        assert_eq!(resolved.backend, "fake-backend");
        assert_eq!(resolved.shots, 4);
    }

    #[test]
    fn test_created_at_parsing() {
        let parsed = CreatedAt::parse("2024-03-01T12:30:00Z");
        assert_eq!(parsed.display(), "2024-03-01 12:30 UTC");

        let raw = CreatedAt::parse("yesterday");
        assert_eq!(raw, CreatedAt::Raw("yesterday".into()));
        assert_eq!(raw.display(), "yesterday");
    }
}
