//! Section producers.
//!
//! A section reports its height first and draws itself second. The renderer
//! sums the heights through [`crate::layout::Layout`] before any element is
//! written, so the document size is known when the `<svg>` tag opens.

mod breakdown;
mod chart;
mod footer;
mod header;
mod raw;
mod summary;
mod tips;

use chrono::{DateTime, Utc};

use krump_decoder::DecodedMove;
use krump_hal::{JobResult, MeasurementOutcome, ResolvedMetadata};

use crate::assets::ResolvedAssets;
use crate::renderer::RenderOptions;
use crate::svg::SvgWriter;
use crate::theme::Palette;

pub use breakdown::OutcomeBreakdown;
pub use chart::DistributionChart;
pub use footer::Footer;
pub use header::Header;
pub use raw::RawData;
pub use summary::RankedSummary;
pub use tips::Tips;

/// Height of a section title band.
pub(crate) const TITLE_HEIGHT: f64 = 40.0;
/// Bottom padding inside a panel.
pub(crate) const PADDING: f64 = 16.0;
/// Horizontal inset of panel content.
pub(crate) const INSET: f64 = 24.0;

/// Identifies a built-in section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    OutcomeBreakdown,
    RankedSummary,
    Tips,
    DistributionChart,
    RawData,
    Footer,
}

impl SectionKind {
    /// The producer for this kind.
    pub fn producer(self) -> &'static dyn Section {
        match self {
            SectionKind::Header => &Header,
            SectionKind::OutcomeBreakdown => &OutcomeBreakdown,
            SectionKind::RankedSummary => &RankedSummary,
            SectionKind::Tips => &Tips,
            SectionKind::DistributionChart => &DistributionChart,
            SectionKind::RawData => &RawData,
            SectionKind::Footer => &Footer,
        }
    }
}

/// Everything a section may read while rendering.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub result: &'a JobResult,
    /// Metadata with fallbacks applied.
    pub meta: ResolvedMetadata,
    /// Observed outcomes, most probable first.
    pub outcomes: Vec<MeasurementOutcome>,
    /// Decoded moves in rank order, when decoding was done.
    pub moves: Option<&'a [DecodedMove]>,
    pub options: &'a RenderOptions,
    pub palette: &'static Palette,
    pub assets: &'a ResolvedAssets,
    pub generated_at: DateTime<Utc>,
}

impl RenderContext<'_> {
    /// Decoded moves, treating an empty list like no decoding.
    pub fn ranked_moves(&self) -> Option<&[DecodedMove]> {
        self.moves.filter(|m| !m.is_empty())
    }

    /// Move decoded for `bitstring`, if any.
    pub fn move_for(&self, bitstring: &str) -> Option<&DecodedMove> {
        self.moves?.iter().find(|m| m.bitstring == bitstring)
    }
}

/// Placement of a section on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// A block of the report.
pub trait Section: Send + Sync {
    /// Which built-in section this is.
    fn kind(&self) -> SectionKind;

    /// Height this section needs; `0` removes it from the document.
    fn height(&self, ctx: &RenderContext<'_>) -> f64;

    /// Draw into `frame`, whose height equals [`Section::height`].
    fn emit(&self, ctx: &RenderContext<'_>, frame: Frame, svg: &mut SvgWriter);
}

/// Panel background and bold title shared by most sections.
pub(crate) fn panel_with_title(
    ctx: &RenderContext<'_>,
    frame: Frame,
    title: &str,
    svg: &mut SvgWriter,
) {
    let palette = ctx.palette;
    svg.panel(
        frame.x,
        frame.y,
        frame.width,
        frame.height,
        palette.panel,
        palette.border,
    );
    svg.text(
        frame.x + INSET,
        frame.y + 26.0,
        title,
        &crate::svg::TextStyle::new(16.0, palette.text).bold(),
    );
}
