use crate::format::format_percent;
use crate::svg::{Anchor, SvgWriter, TextStyle};

use super::{Frame, INSET, PADDING, RenderContext, Section, SectionKind, TITLE_HEIGHT};

const ROW_HEIGHT: f64 = 26.0;
const BAR_HEIGHT: f64 = 14.0;
const LABEL_WIDTH: f64 = 96.0;
const VALUE_WIDTH: f64 = 72.0;
/// Bars drawn before the remainder is summarised in one trailer line.
pub(crate) const MAX_BARS: usize = 16;

/// Horizontal bar per outcome, scaled to the largest count shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionChart;

impl DistributionChart {
    fn rows(ctx: &RenderContext<'_>) -> (usize, usize) {
        let shown = ctx.outcomes.len().min(MAX_BARS);
        (shown, ctx.outcomes.len() - shown)
    }
}

/// Bar length for `value` on a track of `track` units, relative to `max`.
pub(crate) fn bar_length(value: u64, max: u64, track: f64) -> f64 {
    if max == 0 {
        0.0
    } else {
        track * (value as f64 / max as f64)
    }
}

impl Section for DistributionChart {
    fn kind(&self) -> SectionKind {
        SectionKind::DistributionChart
    }

    fn height(&self, ctx: &RenderContext<'_>) -> f64 {
        let (shown, hidden) = Self::rows(ctx);
        let lines = shown.max(1) + usize::from(hidden > 0);
        TITLE_HEIGHT + lines as f64 * ROW_HEIGHT + PADDING
    }

    fn emit(&self, ctx: &RenderContext<'_>, frame: Frame, svg: &mut SvgWriter) {
        let palette = ctx.palette;
        super::panel_with_title(ctx, frame, "Distribution", svg);

        let (shown, hidden) = Self::rows(ctx);
        let left = frame.x + INSET;
        let track_x = left + LABEL_WIDTH;
        let track_width = (frame.width - 2.0 * INSET - LABEL_WIDTH - VALUE_WIDTH).max(0.0);
        let mut row_top = frame.y + TITLE_HEIGHT;

        if shown == 0 {
            svg.text(
                left,
                row_top + 18.0,
                "Nothing to chart",
                &TextStyle::new(13.0, palette.muted),
            );
            return;
        }

        let bars = &ctx.outcomes[..shown];
        let max = bars.iter().map(|o| o.count).max().unwrap_or(0);

        for (index, outcome) in bars.iter().enumerate() {
            let bar_y = row_top + (ROW_HEIGHT - BAR_HEIGHT) / 2.0;
            svg.text(
                left,
                bar_y + 11.0,
                &outcome.bitstring,
                &TextStyle::new(12.0, palette.text).mono(),
            );
            svg.rect(track_x, bar_y, track_width, BAR_HEIGHT, 4.0, palette.track);

            let fill = if index % 2 == 0 {
                palette.bar
            } else {
                palette.bar_alt
            };
            let length = bar_length(outcome.count, max, track_width);
            if length > 0.0 {
                svg.rect(track_x, bar_y, length, BAR_HEIGHT, 4.0, fill);
            }

            svg.text(
                frame.right() - INSET,
                bar_y + 11.0,
                &format_percent(outcome.probability, 1),
                &TextStyle::new(12.0, palette.muted).anchor(Anchor::End),
            );
            row_top += ROW_HEIGHT;
        }

        if hidden > 0 {
            svg.text(
                left,
                row_top + 18.0,
                &format!("+{hidden} more outcomes"),
                &TextStyle::new(12.0, palette.muted),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length_scales_to_max() {
        assert_eq!(bar_length(50, 100, 200.0), 100.0);
        assert_eq!(bar_length(100, 100, 200.0), 200.0);
        assert_eq!(bar_length(0, 0, 200.0), 0.0);
    }
}
