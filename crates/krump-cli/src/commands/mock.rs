//! Mock command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use krump_adapter_mock::MockBackend;
use krump_hal::Backend;

use super::common::ResultEnvelope;

/// Execute the mock command.
pub async fn execute(shots: u64, circuit: &str, output: Option<&str>) -> Result<()> {
    let backend = MockBackend::new();

    let job_id = backend.submit(circuit, shots).await?;
    tracing::info!("Submitted job {} to {}", job_id, backend.name());

    let result = backend.wait(&job_id).await?;
    let metadata = backend.metadata(&job_id).await?;

    let envelope = ResultEnvelope {
        result,
        metadata: Some(metadata),
    };
    let json = serde_json::to_string_pretty(&envelope)?;

    match output {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {path}"))?;
            eprintln!(
                "{} {} shots of '{}' written to {}",
                style("✓").green().bold(),
                shots,
                circuit,
                style(path).green()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
