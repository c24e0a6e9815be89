use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent};

use super::drawing::blend;

pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    /// Loads the system font database; slow, build once per window
    pub fn new() -> Self {
        let font_system = FontSystem::new();
        log::debug!("Font database loaded: {} faces", font_system.db().len());

        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    /// Draw one line of monospace text with its baseline starting at (x, baseline_y)
    ///
    /// Returns the laid-out width in pixels (0 when nothing shaped).
    pub fn draw_text_baseline_u32(
        &mut self,
        pixels: &mut [u32], // [ARGB]
        width: usize,
        text: &str,
        x: f32,
        baseline_y: f32,
        size: f32,
        colour: u32, // [ARGB]
    ) -> f32 {
        let attrs = Attrs::new().family(Family::Monospace);

        let metrics = Metrics::relative(size, 1.25);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let Some((line_y, line_w)) = buffer
            .layout_runs()
            .next()
            .map(|run| (run.line_y, run.line_w))
        else {
            return 0.;
        };

        // Shift the buffer so the first run's baseline lands on baseline_y
        self.render_buffer_u32(&buffer, pixels, width, x, baseline_y - line_y, colour);
        line_w
    }

    fn render_buffer_u32(
        &mut self,
        buffer: &Buffer,
        pixels: &mut [u32], // [ARGB]
        width: usize,
        offset_x: f32,
        offset_y: f32,
        colour: u32, // [ARGB]
    ) {
        for run in buffer.layout_runs() {
            let baseline_offset = run.line_y;

            for glyph in run.glyphs {
                let physical_glyph = glyph.physical((offset_x, offset_y), 1.);

                let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical_glyph.cache_key)
                else {
                    continue;
                };
                // Colour bitmaps (emoji) are not expected in a code listing
                if !matches!(image.content, SwashContent::Mask) {
                    continue;
                }

                let glyph_x = physical_glyph.x + image.placement.left;
                let glyph_y = physical_glyph.y + baseline_offset as i32 - image.placement.top;

                let glyph_width = image.placement.width as usize;
                let glyph_height = image.placement.height as usize;

                for cy in 0..glyph_height {
                    for cx in 0..glyph_width {
                        let alpha = image.data[cy * glyph_width + cx];
                        if alpha == 0 {
                            continue;
                        }
                        let final_x = glyph_x as isize + cx as isize;
                        let final_y = glyph_y as isize + cy as isize;

                        // Bounds check to prevent underflow/overflow
                        if final_x < 0 || final_y < 0 || final_x >= width as isize {
                            continue;
                        }
                        let idx = final_y as usize * width + final_x as usize;
                        if idx >= pixels.len() {
                            continue;
                        }
                        pixels[idx] = blend(pixels[idx], colour, alpha as u32);
                    }
                }
            }
        }
    }
}
