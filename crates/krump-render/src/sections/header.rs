use crate::format::truncate_chars;
use crate::svg::{SvgWriter, TextStyle};

use super::{Frame, INSET, RenderContext, Section, SectionKind};

const HEIGHT: f64 = 104.0;
const LOGO_SIZE: f64 = 64.0;

/// Title band: circuit name, backend, shots and submission time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Header;

impl Header {
    fn details(ctx: &RenderContext<'_>) -> String {
        let meta = &ctx.meta;
        let mut parts = vec![meta.backend.clone(), format!("{} shots", meta.shots)];

        let qubits = ctx
            .result
            .n_qubits
            .or_else(|| ctx.outcomes.first().map(|o| o.bitstring.len() as u32));
        if let Some(n) = qubits {
            parts.push(format!("{n} qubits"));
        }
        if let Some(created) = &meta.created_at {
            parts.push(format!("submitted {}", created.display()));
        }

        parts.join(" · ")
    }
}

impl Section for Header {
    fn kind(&self) -> SectionKind {
        SectionKind::Header
    }

    fn height(&self, _ctx: &RenderContext<'_>) -> f64 {
        HEIGHT
    }

    fn emit(&self, ctx: &RenderContext<'_>, frame: Frame, svg: &mut SvgWriter) {
        let palette = ctx.palette;
        svg.panel(
            frame.x,
            frame.y,
            frame.width,
            frame.height,
            palette.panel,
            palette.border,
        );
        svg.rect(frame.x, frame.y, 6.0, frame.height, 3.0, palette.accent);

        let mut text_x = frame.x + INSET;
        if let Some(logo) = &ctx.assets.logo {
            let top = frame.y + (frame.height - LOGO_SIZE) / 2.0;
            svg.image(text_x, top, LOGO_SIZE, LOGO_SIZE, &logo.data_uri());
            text_x += LOGO_SIZE + 16.0;
        }

        svg.text(
            text_x,
            frame.y + 30.0,
            "QUANTUM KRUMP REPORT",
            &TextStyle::new(11.0, palette.accent).bold(),
        );
        svg.text(
            text_x,
            frame.y + 60.0,
            &truncate_chars(&ctx.meta.circuit, 48),
            &TextStyle::new(24.0, palette.text).bold(),
        );
        svg.text(
            text_x,
            frame.y + 86.0,
            &truncate_chars(&Self::details(ctx), 90),
            &TextStyle::new(13.0, palette.muted),
        );
    }
}
