//! Krump report renderer
//!
//! Produces self-contained SVG reports from job results. Output is a pure
//! function of the inputs, the options and the clock, so a [`FixedClock`]
//! gives byte-identical documents.
//!
//! ```text
//! JobResult + JobMetadata + [DecodedMove]
//!        │
//!        ▼
//! Preset ─→ [Section] ─→ heights ─→ Layout ─→ emit ─→ ReportDocument
//!                                     ▲
//!             resolve_assets() ───────┘ (logo, mascot as data: URIs)
//! ```
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use krump_hal::JobResult;
//! use krump_render::{Preset, RenderOptions, ReportInput, ReportRenderer};
//!
//! let result = JobResult::from_counts(BTreeMap::from([
//!     ("00".to_string(), 512),
//!     ("11".to_string(), 512),
//! ]));
//!
//! let renderer = ReportRenderer::new(RenderOptions::default().with_preset(Preset::Card));
//! let doc = renderer.render_decoded(&ReportInput::new(&result)).unwrap();
//! assert!(doc.content().contains("Buck Hop"));
//! ```

pub mod assets;
pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod escape;
pub mod format;
pub mod layout;
pub mod renderer;
pub mod sections;
pub mod svg;
pub mod theme;

pub use assets::{
    AssetFetcher, AssetSlot, AssetSpec, FetchedAsset, HttpAssetFetcher, MAX_RETRIES,
    MapAssetFetcher, RESOLVE_TIMEOUT, ResolvedAsset, ResolvedAssets, resolve_assets,
    resolve_assets_within,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, RenderConfig};
pub use document::{ReportDocument, SVG_MIME};
pub use error::{RenderError, RenderResult};
pub use escape::escape_xml;
pub use format::{format_percent, slugify, timestamp_slug};
pub use layout::{Layout, VerticalFlow};
pub use renderer::{RenderOptions, ReportInput, ReportRenderer};
pub use sections::{Frame, RenderContext, Section, SectionKind};
pub use theme::{Palette, Preset, Theme};
