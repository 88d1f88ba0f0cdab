use krump_hal::clamp_probability;

use crate::svg::{SvgWriter, TextStyle};

use super::{Frame, INSET, PADDING, RenderContext, Section, SectionKind, TITLE_HEIGHT};

const LINE_HEIGHT: f64 = 20.0;

/// Raw counts in bitstring order, capped at `raw_data_limit` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawData;

impl RawData {
    fn lines(ctx: &RenderContext<'_>) -> (usize, usize) {
        let total = ctx.result.measurements.len();
        let shown = total.min(ctx.options.raw_data_limit.max(1));
        (shown, total - shown)
    }
}

impl Section for RawData {
    fn kind(&self) -> SectionKind {
        SectionKind::RawData
    }

    fn height(&self, ctx: &RenderContext<'_>) -> f64 {
        let (shown, hidden) = Self::lines(ctx);
        // One extra line for the totals.
        let lines = shown + 1 + usize::from(hidden > 0);
        TITLE_HEIGHT + lines as f64 * LINE_HEIGHT + PADDING
    }

    fn emit(&self, ctx: &RenderContext<'_>, frame: Frame, svg: &mut SvgWriter) {
        let palette = ctx.palette;
        super::panel_with_title(ctx, frame, "Raw data", svg);

        let (shown, hidden) = Self::lines(ctx);
        let left = frame.x + INSET;
        let style = TextStyle::new(12.0, palette.text).mono();
        let mut baseline = frame.y + TITLE_HEIGHT + 14.0;

        for (bitstring, count) in ctx.result.measurements.iter().take(shown) {
            let p = clamp_probability(ctx.result.probability_of(bitstring));
            svg.text(
                left,
                baseline,
                &format!("{bitstring}  count={count}  p={p:.6}"),
                &style,
            );
            baseline += LINE_HEIGHT;
        }

        if hidden > 0 {
            svg.text(
                left,
                baseline,
                &format!("+{hidden} more"),
                &TextStyle::new(12.0, palette.muted).mono(),
            );
            baseline += LINE_HEIGHT;
        }

        svg.text(
            left,
            baseline,
            &format!(
                "total={}  shots={}",
                ctx.result.total_counts(),
                ctx.meta.shots
            ),
            &TextStyle::new(12.0, palette.muted).mono(),
        );
    }
}
