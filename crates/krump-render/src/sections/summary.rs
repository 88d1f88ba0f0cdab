use krump_decoder::{average_energy, energy_label, energy_meter, suggested_sequence, top_n};

use crate::format::{format_percent, truncate_chars};
use crate::svg::{Anchor, SvgWriter, TextStyle};

use super::{Frame, INSET, PADDING, RenderContext, Section, SectionKind, TITLE_HEIGHT};

const ROW_HEIGHT: f64 = 34.0;
const GAUGE_HEIGHT: f64 = 132.0;
const GAUGE_RADIUS: f64 = 64.0;

/// Top moves with their energy, plus the average-energy gauge.
///
/// Collapses to nothing when the result was not decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankedSummary;

impl Section for RankedSummary {
    fn kind(&self) -> SectionKind {
        SectionKind::RankedSummary
    }

    fn height(&self, ctx: &RenderContext<'_>) -> f64 {
        match ctx.ranked_moves() {
            Some(moves) => {
                let rows = top_n(moves, ctx.options.top_n).len();
                TITLE_HEIGHT + rows as f64 * ROW_HEIGHT + GAUGE_HEIGHT + PADDING
            }
            None => 0.0,
        }
    }

    fn emit(&self, ctx: &RenderContext<'_>, frame: Frame, svg: &mut SvgWriter) {
        let Some(moves) = ctx.ranked_moves() else {
            return;
        };
        let palette = ctx.palette;
        super::panel_with_title(ctx, frame, "Top moves", svg);

        let left = frame.x + INSET;
        let right = frame.right() - INSET;
        let mut baseline = frame.y + TITLE_HEIGHT + 22.0;
        let top = top_n(moves, ctx.options.top_n);

        for (rank, decoded) in top.iter().enumerate() {
            svg.text(
                left,
                baseline,
                &format!("#{}", rank + 1),
                &TextStyle::new(15.0, palette.accent).bold(),
            );
            svg.text(
                left + 40.0,
                baseline,
                &truncate_chars(&format!("{} {}", decoded.icon, decoded.name), 30),
                &TextStyle::new(16.0, palette.text).bold(),
            );
            let level = decoded.energy.level();
            svg.text(
                frame.x + frame.width * 0.55,
                baseline,
                &format!("{} {}", energy_meter(level), energy_label(level)),
                &TextStyle::new(13.0, palette.muted),
            );
            svg.text(
                right,
                baseline,
                &format_percent(decoded.probability, 2),
                &TextStyle::new(15.0, palette.text)
                    .bold()
                    .anchor(Anchor::End),
            );
            baseline += ROW_HEIGHT;
        }

        let average = average_energy(moves);
        let gauge_top = frame.y + TITLE_HEIGHT + top.len() as f64 * ROW_HEIGHT;
        let cx = frame.x + frame.width / 2.0;
        let cy = gauge_top + 80.0;
        svg.gauge(
            cx,
            cy,
            GAUGE_RADIUS,
            average / 3.0,
            palette.track,
            palette.bar,
        );
        svg.text(
            cx,
            cy - 8.0,
            &format!("{average:.2} / 3"),
            &TextStyle::new(20.0, palette.text)
                .bold()
                .anchor(Anchor::Middle),
        );
        // average_energy stays within 0..=3, so rounding fits a level.
        let label = energy_label(average.round() as u8);
        svg.text(
            cx,
            cy + 20.0,
            &format!("Average energy: {label}"),
            &TextStyle::new(13.0, palette.muted).anchor(Anchor::Middle),
        );

        let sequence = suggested_sequence(moves, ctx.options.top_n).join(" → ");
        svg.text(
            cx,
            cy + 44.0,
            &truncate_chars(&format!("Sequence: {sequence}"), 90),
            &TextStyle::new(12.0, palette.accent).anchor(Anchor::Middle),
        );
    }
}
