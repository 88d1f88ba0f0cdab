use crate::format::{format_percent, truncate_chars};
use crate::svg::{Anchor, SvgWriter, TextStyle};

use super::{Frame, INSET, PADDING, RenderContext, Section, SectionKind, TITLE_HEIGHT};

const ROW_HEIGHT: f64 = 28.0;
/// Rows drawn before the remainder is summarised in one trailer line.
pub(crate) const MAX_ROWS: usize = 32;

/// One row per outcome: bitstring, move, count and percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeBreakdown;

impl OutcomeBreakdown {
    fn rows(ctx: &RenderContext<'_>) -> (usize, usize) {
        let shown = ctx.outcomes.len().min(MAX_ROWS);
        (shown, ctx.outcomes.len() - shown)
    }
}

impl Section for OutcomeBreakdown {
    fn kind(&self) -> SectionKind {
        SectionKind::OutcomeBreakdown
    }

    fn height(&self, ctx: &RenderContext<'_>) -> f64 {
        let (shown, hidden) = Self::rows(ctx);
        // An empty result still gets one line saying so.
        let lines = shown.max(1) + usize::from(hidden > 0);
        TITLE_HEIGHT + lines as f64 * ROW_HEIGHT + PADDING
    }

    fn emit(&self, ctx: &RenderContext<'_>, frame: Frame, svg: &mut SvgWriter) {
        let palette = ctx.palette;
        super::panel_with_title(ctx, frame, "Outcome breakdown", svg);

        let (shown, hidden) = Self::rows(ctx);
        let left = frame.x + INSET;
        let right = frame.right() - INSET;
        let move_x = frame.x + frame.width * 0.28;
        let count_x = frame.x + frame.width * 0.74;
        let mut baseline = frame.y + TITLE_HEIGHT + 18.0;

        if shown == 0 {
            svg.text(
                left,
                baseline,
                "No measurements recorded",
                &TextStyle::new(13.0, palette.muted),
            );
            return;
        }

        for (index, outcome) in ctx.outcomes.iter().take(shown).enumerate() {
            if index > 0 {
                svg.line(
                    left,
                    baseline - 19.0,
                    right,
                    baseline - 19.0,
                    palette.track,
                );
            }
            svg.text(
                left,
                baseline,
                &outcome.bitstring,
                &TextStyle::new(14.0, palette.text).mono().bold(),
            );
            if let Some(decoded) = ctx.move_for(&outcome.bitstring) {
                let label = format!("{} {}", decoded.icon, decoded.name);
                svg.text(
                    move_x,
                    baseline,
                    &truncate_chars(&label, 28),
                    &TextStyle::new(13.0, palette.text),
                );
            }
            svg.text(
                count_x,
                baseline,
                &outcome.count.to_string(),
                &TextStyle::new(13.0, palette.muted).anchor(Anchor::End),
            );
            svg.text(
                right,
                baseline,
                &format_percent(outcome.probability, 1),
                &TextStyle::new(13.0, palette.accent)
                    .bold()
                    .anchor(Anchor::End),
            );
            baseline += ROW_HEIGHT;
        }

        if hidden > 0 {
            svg.text(
                left,
                baseline,
                &format!("+{hidden} more outcomes"),
                &TextStyle::new(12.0, palette.muted),
            );
        }
    }
}
