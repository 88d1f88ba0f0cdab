//! Krump Command-Line Interface
//!
//! Decodes quantum measurement results into krump moves and renders them as
//! SVG report cards.
//!
//! ```text
//!   result.json ──→ krump decode ──→ ranked moves (table / json)
//!        │
//!        └────────→ krump render ──→ krump-card-bell-20250101_120000.svg
//!
//!   krump mock ──→ { "result": ..., "metadata": ... }
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{common, decode, mock, render, version};
use krump_render::RenderConfig;

/// Krump - quantum measurement results as dance moves
#[derive(Parser)]
#[command(name = "krump")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML); defaults to ~/.krump/config.yaml when present
    #[arg(long, global = true, env = "KRUMP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a job result into ranked moves
    Decode {
        /// Input file (JobResult or {result, metadata} JSON)
        #[arg(short, long, required_unless_present = "table")]
        input: Option<String>,

        /// Number of moves in the suggested sequence
        #[arg(long, default_value = "3")]
        top: usize,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// List the move table instead of decoding a file
        #[arg(long)]
        table: bool,

        /// Bit width of the table to list
        #[arg(long, default_value = "3", requires = "table")]
        width: usize,
    },

    /// Render a job result as an SVG report
    Render {
        /// Input file (JobResult or {result, metadata} JSON)
        #[arg(short, long)]
        input: String,

        /// Output file (defaults to the suggested name in the output directory)
        #[arg(short, long, conflicts_with = "output_dir")]
        output: Option<String>,

        /// Output directory for the suggested filename
        #[arg(long)]
        output_dir: Option<String>,

        /// Section preset (results, card, data-dump)
        #[arg(short, long)]
        preset: Option<String>,

        /// Colour theme (light, dark, krump)
        #[arg(short, long)]
        theme: Option<String>,

        /// Document width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Unique part of the filename (defaults to a timestamp)
        #[arg(long)]
        id: Option<String>,

        /// Logo URL or path
        #[arg(long)]
        logo: Option<String>,

        /// Mascot URL or path
        #[arg(long)]
        mascot: Option<String>,
    },

    /// Run the built-in Bell-state mock backend
    Mock {
        /// Number of shots
        #[arg(short, long, default_value = "1024")]
        shots: u64,

        /// Circuit name recorded in the result
        #[arg(short, long, default_value = "Bell State")]
        circuit: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version information
    Version,
}

/// Install the global subscriber. Logs go to stderr so JSON on stdout stays clean.
fn init_logging(verbose: u8, config: &RenderConfig) {
    let filter = match verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.or_else(common::default_config_path);
    let config = match RenderConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose, &config);

    // Execute command
    let result = match cli.command {
        Commands::Decode {
            input,
            top,
            format,
            table,
            width,
        } => {
            if table {
                decode::execute_table(width, &format).await
            } else {
                decode::execute(input.as_deref(), top, &format).await
            }
        }

        Commands::Render {
            input,
            output,
            output_dir,
            preset,
            theme,
            width,
            id,
            logo,
            mascot,
        } => {
            let args = render::RenderArgs {
                input,
                output,
                output_dir,
                preset,
                theme,
                width,
                id,
                logo,
                mascot,
            };
            render::execute(args, &config).await
        }

        Commands::Mock {
            shots,
            circuit,
            output,
        } => mock::execute(shots, &circuit, output.as_deref()).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
