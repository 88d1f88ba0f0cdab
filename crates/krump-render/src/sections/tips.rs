use krump_decoder::top_n;

use crate::format::truncate_chars;
use crate::svg::{SvgWriter, TextStyle};

use super::{Frame, INSET, PADDING, RenderContext, Section, SectionKind, TITLE_HEIGHT};

const ROW_HEIGHT: f64 = 46.0;

/// How to perform each of the top moves, one part per bit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tips;

impl Section for Tips {
    fn kind(&self) -> SectionKind {
        SectionKind::Tips
    }

    fn height(&self, ctx: &RenderContext<'_>) -> f64 {
        match ctx.ranked_moves() {
            Some(moves) => {
                let rows = top_n(moves, ctx.options.top_n).len();
                TITLE_HEIGHT + rows as f64 * ROW_HEIGHT + PADDING
            }
            None => 0.0,
        }
    }

    fn emit(&self, ctx: &RenderContext<'_>, frame: Frame, svg: &mut SvgWriter) {
        let Some(moves) = ctx.ranked_moves() else {
            return;
        };
        let palette = ctx.palette;
        super::panel_with_title(ctx, frame, "How to hit it", svg);

        let left = frame.x + INSET;
        let mut baseline = frame.y + TITLE_HEIGHT + 18.0;

        for decoded in top_n(moves, ctx.options.top_n) {
            let headline = format!("{} {}: {}", decoded.icon, decoded.name, decoded.description);
            svg.text(
                left,
                baseline,
                &truncate_chars(&headline, 96),
                &TextStyle::new(13.0, palette.text),
            );

            let parts = decoded
                .components
                .iter()
                .map(|c| format!("{} {}", if c.active { "✓" } else { "✗" }, c.label))
                .collect::<Vec<_>>()
                .join("   ");
            svg.text(
                left + 22.0,
                baseline + 18.0,
                &parts,
                &TextStyle::new(11.0, palette.muted).mono(),
            );
            baseline += ROW_HEIGHT;
        }
    }
}
