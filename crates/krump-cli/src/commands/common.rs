//! Shared helpers for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use krump_decoder::{DecodedMove, average_energy, energy_label, suggested_sequence};
use krump_hal::{JobMetadata, JobResult};

/// A result with its metadata, as written by `krump mock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub result: JobResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JobMetadata>,
}

/// Load a bare `JobResult` or a `{result, metadata}` envelope from JSON.
///
/// A top-level `result` key selects the envelope form, and any error inside
/// it is reported instead of falling back to the bare form.
pub fn load_input(path: &str) -> Result<ResultEnvelope> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    parse_input(&source).with_context(|| format!("Invalid result JSON in {path}"))
}

/// Parse the contents of an input file.
pub fn parse_input(source: &str) -> Result<ResultEnvelope> {
    let value: Value = serde_json::from_str(source)?;

    let Value::Object(fields) = &value else {
        anyhow::bail!("expected a JSON object");
    };

    if fields.contains_key("result") {
        let envelope: ResultEnvelope =
            serde_json::from_value(value).context("malformed {result, metadata} envelope")?;
        Ok(envelope)
    } else {
        let result: JobResult = serde_json::from_value(value).context("malformed job result")?;
        Ok(ResultEnvelope {
            result,
            metadata: None,
        })
    }
}

/// `~/.krump/config.yaml`, if it exists.
pub fn default_config_path() -> Option<PathBuf> {
    let path = dirs::home_dir()?.join(".krump").join("config.yaml");
    path.is_file().then_some(path)
}

/// Print decoded moves as a ranked table.
pub fn print_moves(decoded: &[DecodedMove], top: usize) {
    println!(
        "\n{} {} outcomes decoded:",
        style("✓").green().bold(),
        decoded.len()
    );

    for (rank, m) in decoded.iter().take(16).enumerate() {
        let bar_len = (m.probability * 50.0).round() as usize;
        let bar: String = "█".repeat(bar_len);
        let level = m.energy.level();

        println!(
            "  {:>2}. {}: {:>6} ({:>6.2}%) {} {:<12} {} {}",
            rank + 1,
            style(&m.bitstring).cyan(),
            m.count,
            m.probability * 100.0,
            m.icon,
            m.name,
            style(format!("{} {}", m.energy.meter(), energy_label(level))).yellow(),
            style(bar).green()
        );
    }

    if decoded.len() > 16 {
        println!("  ... and {} more outcomes", decoded.len() - 16);
    }

    let average = average_energy(decoded);
    println!(
        "\n  Average energy: {} ({})",
        style(format!("{average:.2} / 3")).yellow(),
        energy_label(average.round() as u8)
    );

    let sequence = suggested_sequence(decoded, top);
    if !sequence.is_empty() {
        println!("  Sequence:       {}", style(sequence.join(" → ")).cyan());
    }
}
