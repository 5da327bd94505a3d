use crate::foundation::fixed;
use crate::render::graphics::Graphics;

impl Graphics<'_> {
    /// Draw `text` with the current font, top-left of the first glyph at `(x, y)`.
    pub fn draw_string(&mut self, text: &str, x: f64, y: f64) {
        self.draw_string_fixed(text, fixed::to_fixed_f64(x), fixed::to_fixed_f64(y));
    }

    pub fn draw_string_fixed(&mut self, text: &str, fx: i32, fy: i32) {
        let Some(font) = self.font.clone() else {
            tracing::debug!("draw_string called without a font");
            return;
        };
        let (glyphs, _) = font.layout(text);
        for g in glyphs {
            self.draw_image_region_fixed(
                font.image(),
                font.glyph_bounds(g.index),
                fx + fixed::to_fixed(g.x),
                fy,
            );
        }
    }

    /// Advance width of `text` in the current font; 0 without a font.
    pub fn string_width(&self, text: &str) -> i32 {
        self.font.as_ref().map_or(0, |f| f.string_width(text))
    }
}
