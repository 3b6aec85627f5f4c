//! Label text for raster exports.
//!
//! The live view lays labels out with gpui's text system; exports have no
//! window, so glyphs are rasterized with fontdue from a bundled face and
//! blended into the tiny-skia pixmap.

use crate::rendering::{Label, LABEL_FONT_SIZE};
use fontdue::{Font, FontSettings};
use std::sync::OnceLock;
use tiny_skia::{ColorU8, Pixmap, PixmapPaint, Transform};
use tracing::warn;

static FONT_BYTES: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

fn label_font() -> Option<&'static Font> {
    static FONT: OnceLock<Option<Font>> = OnceLock::new();
    FONT.get_or_init(|| match Font::from_bytes(FONT_BYTES, FontSettings::default()) {
        Ok(font) => Some(font),
        Err(err) => {
            warn!(%err, "label font failed to load; exports will have no text");
            None
        }
    })
    .as_ref()
}

/// Draws `label` centred on its anchor, in scene coordinates moved by `shift`.
pub fn draw_label(pixmap: &mut Pixmap, label: &Label, shift: Transform) {
    let Some(font) = label_font() else {
        return;
    };
    let px = LABEL_FONT_SIZE;
    let glyphs: Vec<_> = label.text.chars().map(|ch| font.rasterize(ch, px)).collect();
    let advance: f32 = glyphs.iter().map(|(m, _)| m.advance_width).sum();
    let (ascent, descent) = font
        .horizontal_line_metrics(px)
        .map(|lm| (lm.ascent, lm.descent))
        .unwrap_or((px * 0.8, -px * 0.2));

    // Centre the line box on the anchor; descent is negative.
    let baseline = (label.anchor.y + (ascent + descent) / 2.0).round();
    let mut pen_x = (label.anchor.x - advance / 2.0).round();

    for (metrics, coverage) in &glyphs {
        if metrics.width > 0 && metrics.height > 0 {
            if let Some(glyph) = glyph_pixmap(metrics.width, metrics.height, coverage, label) {
                let x = pen_x as i32 + metrics.xmin;
                let y = baseline as i32 - metrics.ymin - metrics.height as i32;
                pixmap.draw_pixmap(x, y, glyph.as_ref(), &PixmapPaint::default(), shift, None);
            }
        }
        pen_x += metrics.advance_width;
    }
}

// Coverage mask tinted with the label colour, premultiplied.
fn glyph_pixmap(width: usize, height: usize, coverage: &[u8], label: &Label) -> Option<Pixmap> {
    let mut glyph = Pixmap::new(width as u32, height as u32)?;
    let c = label.color;
    for (dst, &cov) in glyph.pixels_mut().iter_mut().zip(coverage) {
        let alpha = ((cov as u16 * c.a as u16) / 255) as u8;
        *dst = ColorU8::from_rgba(c.r, c.g, c.b, alpha).premultiply();
    }
    Some(glyph)
}
