//! Report composition.

use serde_json::json;
use tracing::{debug, info, instrument};

use krump_decoder::{DecodedMove, decode_result};
use krump_hal::{JobMetadata, JobResult};

use crate::assets::{AssetFetcher, AssetSpec, ResolvedAssets, resolve_assets};
use crate::clock::{Clock, SystemClock};
use crate::document::ReportDocument;
use crate::error::RenderResult;
use crate::format::{slugify, timestamp_slug};
use crate::layout::Layout;
use crate::sections::{Frame, RenderContext, Section};
use crate::svg::SvgWriter;
use crate::theme::{Preset, Theme};

/// Default document width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Narrowest width the sections are laid out for.
pub const MIN_WIDTH: u32 = 320;
/// Default number of moves in the ranked summary.
pub const DEFAULT_TOP_N: usize = 3;
/// Default number of raw-data lines.
pub const DEFAULT_RAW_DATA_LIMIT: usize = 16;

const MARGIN: f64 = 24.0;
const GAP: f64 = 16.0;

/// What to render and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub preset: Preset,
    pub theme: Theme,
    /// Document width, raised to [`MIN_WIDTH`] if smaller.
    pub width: u32,
    pub top_n: usize,
    pub raw_data_limit: usize,
    /// Unique part of the filename; the clock's timestamp when `None`.
    pub id: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            theme: Theme::default(),
            width: DEFAULT_WIDTH,
            top_n: DEFAULT_TOP_N,
            raw_data_limit: DEFAULT_RAW_DATA_LIMIT,
            id: None,
        }
    }
}

impl RenderOptions {
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_raw_data_limit(mut self, limit: usize) -> Self {
        self.raw_data_limit = limit;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Borrowed inputs of one render.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub result: &'a JobResult,
    pub metadata: Option<&'a JobMetadata>,
    pub moves: Option<&'a [DecodedMove]>,
}

impl<'a> ReportInput<'a> {
    pub fn new(result: &'a JobResult) -> Self {
        Self {
            result,
            metadata: None,
            moves: None,
        }
    }

    pub fn with_metadata(mut self, metadata: &'a JobMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_moves(mut self, moves: &'a [DecodedMove]) -> Self {
        self.moves = Some(moves);
        self
    }
}

/// Produces SVG reports. Holds no mutable state, so one renderer can serve
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct ReportRenderer<C = SystemClock> {
    options: RenderOptions,
    clock: C,
}

impl ReportRenderer<SystemClock> {
    /// Renderer using the system clock.
    pub fn new(options: RenderOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl<C: Clock> ReportRenderer<C> {
    /// Renderer with an explicit clock.
    pub fn with_clock(options: RenderOptions, clock: C) -> Self {
        Self { options, clock }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the preset's sections without branding assets.
    pub fn render(&self, input: &ReportInput<'_>) -> ReportDocument {
        self.render_with(input, &ResolvedAssets::default())
    }

    /// Render the preset's sections with already resolved assets.
    pub fn render_with(&self, input: &ReportInput<'_>, assets: &ResolvedAssets) -> ReportDocument {
        let sections: Vec<&dyn Section> = self
            .options
            .preset
            .sections()
            .iter()
            .map(|kind| kind.producer())
            .collect();
        self.render_sections(input, &sections, assets)
    }

    /// Decode the result when no moves were given, then render.
    ///
    /// Presets that show moves fail on undecodable outcomes; the others
    /// render without moves instead.
    pub fn render_decoded(&self, input: &ReportInput<'_>) -> RenderResult<ReportDocument> {
        self.render_decoded_with(input, &ResolvedAssets::default())
    }

    fn render_decoded_with(
        &self,
        input: &ReportInput<'_>,
        assets: &ResolvedAssets,
    ) -> RenderResult<ReportDocument> {
        if input.moves.is_some() {
            return Ok(self.render_with(input, assets));
        }

        match decode_result(input.result) {
            Ok(moves) => {
                let decoded = ReportInput {
                    moves: Some(moves.as_slice()),
                    ..*input
                };
                Ok(self.render_with(&decoded, assets))
            }
            Err(e) if self.options.preset.wants_moves() => Err(e.into()),
            Err(e) => {
                debug!("Rendering without moves: {}", e);
                Ok(self.render_with(input, assets))
            }
        }
    }

    /// Resolve `specs` through `fetcher`, then decode and render.
    ///
    /// Nothing is rendered when any asset fails.
    #[instrument(skip_all, fields(preset = %self.options.preset, assets = specs.len()))]
    pub async fn render_with_assets(
        &self,
        input: &ReportInput<'_>,
        fetcher: &dyn AssetFetcher,
        specs: &[AssetSpec],
    ) -> RenderResult<ReportDocument> {
        let assets = resolve_assets(fetcher, specs).await?;
        self.render_decoded_with(input, &assets)
    }

    /// Render an explicit list of sections.
    ///
    /// Heights are collected first, then every non-empty section is drawn at
    /// its offset.
    pub fn render_sections(
        &self,
        input: &ReportInput<'_>,
        sections: &[&dyn Section],
        assets: &ResolvedAssets,
    ) -> ReportDocument {
        let width = f64::from(self.options.width.max(MIN_WIDTH));
        let palette = self.options.theme.palette();
        let generated_at = self.clock.now();
        let meta = match input.metadata {
            Some(metadata) => metadata.resolve(input.result),
            None => JobMetadata::default().resolve(input.result),
        };

        let ctx = RenderContext {
            result: input.result,
            meta,
            outcomes: input.result.outcomes(),
            moves: input.moves,
            options: &self.options,
            palette,
            assets,
            generated_at,
        };

        let heights: Vec<f64> = sections.iter().map(|s| s.height(&ctx)).collect();
        let layout = Layout::stack(&heights, MARGIN, GAP);

        let mut svg = SvgWriter::new(width, layout.total_height);
        svg.title(&format!("{} · Krump report", ctx.meta.circuit));
        svg.desc(&format!(
            "Measurement results for {} on {}, {} shots",
            ctx.meta.circuit, ctx.meta.backend, ctx.meta.shots
        ));
        svg.metadata(&json!({
            "circuit": ctx.meta.circuit,
            "backend": ctx.meta.backend,
            "shots": ctx.meta.shots,
            "outcomes": ctx.outcomes.len(),
            "preset": self.options.preset.as_str(),
            "theme": self.options.theme.as_str(),
            "generated_at": generated_at.to_rfc3339(),
        }));
        svg.linear_gradient("krump-bg", palette.background.0, palette.background.1);
        svg.rect(0.0, 0.0, width, layout.total_height, 0.0, "url(#krump-bg)");

        for ((section, offset), height) in sections.iter().zip(&layout.offsets).zip(&heights) {
            if let Some(y) = offset {
                let frame = Frame {
                    x: MARGIN,
                    y: *y,
                    width: width - 2.0 * MARGIN,
                    height: *height,
                };
                section.emit(&ctx, frame, &mut svg);
            }
        }

        let id = self
            .options
            .id
            .as_deref()
            .map(sanitize_id)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| timestamp_slug(generated_at));
        let filename = format!(
            "krump-{}-{}-{}.svg",
            self.options.preset.as_str(),
            slugify(&ctx.meta.circuit),
            id
        );

        info!(
            "Rendered {} ({}x{}, {} sections)",
            filename,
            width,
            layout.total_height,
            layout.offsets.iter().flatten().count()
        );
        ReportDocument::new(svg.finish(), filename, width, layout.total_height)
    }
}

/// Keep the characters that are safe in a filename.
fn sanitize_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .take(64)
        .collect()
}
