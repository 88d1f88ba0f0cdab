//! Render command implementation.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use krump_render::{
    HttpAssetFetcher, Preset, RenderConfig, ReportInput, ReportRenderer, Theme,
};

use super::common::load_input;

/// Arguments of `krump render`.
pub struct RenderArgs {
    pub input: String,
    pub output: Option<String>,
    pub output_dir: Option<String>,
    pub preset: Option<String>,
    pub theme: Option<String>,
    pub width: Option<u32>,
    pub id: Option<String>,
    pub logo: Option<String>,
    pub mascot: Option<String>,
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &RenderConfig, args: &RenderArgs) -> Result<RenderConfig> {
    let mut config = config.clone();

    if let Some(preset) = &args.preset {
        config.report.preset = preset.parse::<Preset>().map_err(anyhow::Error::msg)?;
    }
    if let Some(theme) = &args.theme {
        config.report.theme = theme.parse::<Theme>().map_err(anyhow::Error::msg)?;
    }
    if let Some(width) = args.width {
        config.report.width = width;
    }
    if let Some(logo) = &args.logo {
        config.assets.logo_url = Some(logo.clone());
    }
    if let Some(mascot) = &args.mascot {
        config.assets.mascot_url = Some(mascot.clone());
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = Some(PathBuf::from(dir));
    }

    config.validate()?;
    Ok(config)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Execute the render command.
pub async fn execute(args: RenderArgs, config: &RenderConfig) -> Result<()> {
    let config = apply_overrides(config, &args)?;

    println!(
        "{} Rendering {}",
        style("→").cyan().bold(),
        style(&args.input).green()
    );

    let envelope = load_input(&args.input)?;

    let mut options = config.render_options();
    if let Some(id) = &args.id {
        options = options.with_id(id.clone());
    }
    let renderer = ReportRenderer::new(options);

    let mut input = ReportInput::new(&envelope.result);
    if let Some(metadata) = &envelope.metadata {
        input = input.with_metadata(metadata);
    }

    let specs = config.asset_specs();
    let fetcher = HttpAssetFetcher::new(config.asset_timeout(), config.assets.retries)
        .context("Failed to create asset fetcher")?;

    let pb = (!specs.is_empty()).then(|| spinner("Fetching assets..."));
    let rendered = renderer.render_with_assets(&input, &fetcher, &specs).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let document = rendered?;

    let path = match &args.output {
        Some(output) => PathBuf::from(output),
        None => config
            .output
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(document.filename()),
    };

    document.write_to(&path).await?;

    println!(
        "  Preset: {}, theme: {}, {}x{} px",
        style(config.report.preset).cyan(),
        style(config.report.theme).cyan(),
        document.width(),
        document.height().round()
    );
    println!(
        "{} Saved {}",
        style("✓").green().bold(),
        style(path.display()).green()
    );

    Ok(())
}
