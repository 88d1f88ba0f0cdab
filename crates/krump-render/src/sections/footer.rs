use crate::svg::{SvgWriter, TextStyle};

use super::{Frame, INSET, RenderContext, Section, SectionKind};

const HEIGHT: f64 = 64.0;
const MASCOT_SIZE: f64 = 48.0;

/// Generation time, producer version and the optional mascot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Footer;

impl Section for Footer {
    fn kind(&self) -> SectionKind {
        SectionKind::Footer
    }

    fn height(&self, _ctx: &RenderContext<'_>) -> f64 {
        HEIGHT
    }

    fn emit(&self, ctx: &RenderContext<'_>, frame: Frame, svg: &mut SvgWriter) {
        let palette = ctx.palette;
        svg.line(frame.x, frame.y, frame.right(), frame.y, palette.border);

        let generated = ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC");
        svg.text(
            frame.x + INSET,
            frame.y + 28.0,
            &format!("Generated {generated}"),
            &TextStyle::new(12.0, palette.muted),
        );
        svg.text(
            frame.x + INSET,
            frame.y + 46.0,
            concat!("krump-render ", env!("CARGO_PKG_VERSION")),
            &TextStyle::new(11.0, palette.muted).mono(),
        );

        if let Some(mascot) = &ctx.assets.mascot {
            svg.image(
                frame.right() - MASCOT_SIZE,
                frame.y + (frame.height - MASCOT_SIZE) / 2.0,
                MASCOT_SIZE,
                MASCOT_SIZE,
                &mascot.data_uri(),
            );
        }
    }
}
