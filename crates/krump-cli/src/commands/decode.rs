//! Decode command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use krump_decoder::{
    MoveTable, average_energy, decode_result, energy_label, suggested_sequence, top_n,
};

use super::common::{load_input, print_moves};

/// Execute the decode command.
pub async fn execute(input: Option<&str>, top: usize, format: &str) -> Result<()> {
    let input = input.ok_or_else(|| anyhow::anyhow!("An input file is required"))?;
    let envelope = load_input(input)?;

    let decoded = decode_result(&envelope.result)?;
    tracing::info!("Decoded {} outcomes from {}", decoded.len(), input);

    match format {
        "json" => {
            let average = average_energy(&decoded);
            let report = json!({
                "moves": &decoded,
                "top": top_n(&decoded, top),
                "average_energy": average,
                "energy_label": energy_label(average.round() as u8),
                "sequence": suggested_sequence(&decoded, top),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "table" => {
            println!(
                "{} Decoding {}",
                style("→").cyan().bold(),
                style(input).green()
            );
            print_moves(&decoded, top);
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    Ok(())
}

/// List every move of the table for `width` bits.
pub async fn execute_table(width: usize, format: &str) -> Result<()> {
    let table = MoveTable::for_width(width).ok_or_else(|| {
        let available: Vec<String> = MoveTable::all().map(|t| t.width.to_string()).collect();
        anyhow::anyhow!(
            "No move table for {width} bits. Available: {}",
            available.join(", ")
        )
    })?;

    match format {
        "json" => {
            let rows: Vec<_> = table
                .records()
                .map(|(bits, record)| {
                    json!({
                        "bitstring": bits,
                        "name": record.name,
                        "description": record.description,
                        "energy": record.energy,
                        "icon": record.icon,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        "table" => {
            println!(
                "{} {} table ({} bits: {})",
                style("→").cyan().bold(),
                style(table.name).green(),
                table.width,
                table.bit_labels.join(", ")
            );
            for (bits, record) in table.records() {
                println!(
                    "  {} {} {:<12} {} {}",
                    style(bits).cyan(),
                    record.icon,
                    record.name,
                    style(record.energy.meter()).yellow(),
                    style(record.description).dim()
                );
            }
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    Ok(())
}
