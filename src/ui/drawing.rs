//! Shared drawing primitives
//!
//! `Surface` is the set of primitives the animation draws with. `Canvas`
//! implements it over any &mut [u32] pixel buffer (0xAARRGGBB), so the same
//! code paints into softbuffer on screen and into a Vec in tests and benches.

use super::text_rasterizing::TextRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Drawing primitives consumed by the renderer
pub trait Surface {
    /// (width, height) in pixels
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, colour: u32);

    /// Both end points are included
    fn draw_line(&mut self, from: Point, to: Point, colour: u32, stroke_width: f32);

    fn fill_circle(&mut self, centre: Point, radius: i32, colour: u32);

    fn stroke_circle(&mut self, centre: Point, radius: i32, colour: u32, stroke_width: f32);

    /// `baseline_left` is the left end of the text baseline
    fn draw_text(&mut self, text: &str, baseline_left: Point, size: f32, colour: u32);
}

/// Blend `colour` over `bg` with 8-bit coverage, result is opaque
///
/// Channels are widened into 16-bit lanes of a u64 so all four blend in one
/// multiply. Full coverage returns the colour untouched.
#[inline]
pub(crate) fn blend(bg: u32, colour: u32, alpha: u32) -> u32 {
    if alpha >= 255 {
        return colour | 0xFF000000;
    }
    if alpha == 0 {
        return bg;
    }

    let mut fg = colour as u64;
    fg = (fg | (fg << 16)) & 0x0000FFFF0000FFFF;
    fg = (fg | (fg << 8)) & 0x00FF00FF00FF00FF;

    let mut bg = bg as u64;
    bg = (bg | (bg << 16)) & 0x0000FFFF0000FFFF;
    bg = (bg | (bg << 8)) & 0x00FF00FF00FF00FF;

    let alpha = alpha as u64;
    let mut blended = bg * (255 - alpha) + fg * alpha;

    blended = (blended >> 8) & 0x00FF00FF00FF00FF;
    blended = (blended | (blended >> 8)) & 0x0000FFFF0000FFFF;
    blended = blended | (blended >> 16);
    blended as u32 | 0xFF000000
}

/// Coverage (0..=255) of a pixel at distance `dist` from a shape edge that
/// extends `half_width` either side
#[inline]
fn coverage(dist: f32, half_width: f32) -> u32 {
    ((half_width + 0.5 - dist).clamp(0., 1.) * 255.) as u32
}

/// Software surface over a packed ARGB pixel buffer
pub struct Canvas<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
    text: Option<&'a mut TextRenderer>,
}

impl<'a> Canvas<'a> {
    /// Height is clamped to what the buffer actually holds
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width == 0 {
            0
        } else {
            height.min(pixels.len() / width)
        };
        Self {
            pixels,
            width,
            height,
            text: None,
        }
    }

    /// Attach a text rasterizer; without one `draw_text` is a no-op
    pub fn with_text(mut self, text: &'a mut TextRenderer) -> Self {
        self.text = Some(text);
        self
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    #[inline]
    fn blend_pixel(&mut self, x: i32, y: i32, colour: u32, alpha: u32) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = blend(self.pixels[idx], colour, alpha);
        }
    }

    fn vertical_span(&mut self, x: i32, y0: i32, y1: i32, colour: u32) {
        if x < 0 || x as usize >= self.width || self.height == 0 {
            return;
        }
        let top = y0.min(y1).max(0);
        let bottom = y0.max(y1).min(self.height as i32 - 1);
        for y in top..=bottom {
            self.pixels[y as usize * self.width + x as usize] = colour | 0xFF000000;
        }
    }

    fn horizontal_span(&mut self, y: i32, x0: i32, x1: i32, colour: u32) {
        if y < 0 || y as usize >= self.height || self.width == 0 {
            return;
        }
        let left = x0.min(x1).max(0);
        let right = x0.max(x1).min(self.width as i32 - 1);
        if left > right {
            return;
        }
        let row = y as usize * self.width;
        self.pixels[row + left as usize..=row + right as usize].fill(colour | 0xFF000000);
    }

    /// Anti-aliased thick segment: coverage from distance to the segment
    fn stroke_segment(&mut self, from: Point, to: Point, colour: u32, stroke_width: f32) {
        let half = (stroke_width / 2.).max(0.5);
        let reach = half.ceil() as i32 + 1;

        let min_x = (from.x.min(to.x) - reach).max(0);
        let max_x = (from.x.max(to.x) + reach).min(self.width as i32 - 1);
        let min_y = (from.y.min(to.y) - reach).max(0);
        let max_y = (from.y.max(to.y) + reach).min(self.height as i32 - 1);

        let (ax, ay) = (from.x as f32, from.y as f32);
        let (dx, dy) = ((to.x - from.x) as f32, (to.y - from.y) as f32);
        let len2 = dx * dx + dy * dy;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (px, py) = (x as f32 - ax, y as f32 - ay);
                let t = if len2 > 0. {
                    ((px * dx + py * dy) / len2).clamp(0., 1.)
                } else {
                    0.
                };
                let (ex, ey) = (px - t * dx, py - t * dy);
                let alpha = coverage((ex * ex + ey * ey).sqrt(), half);
                if alpha > 0 {
                    self.blend_pixel(x, y, colour, alpha);
                }
            }
        }
    }
}

impl Surface for Canvas<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn clear(&mut self, colour: u32) {
        let len = self.width * self.height;
        self.pixels[..len].fill(colour | 0xFF000000);
    }

    fn draw_line(&mut self, from: Point, to: Point, colour: u32, stroke_width: f32) {
        if stroke_width <= 1. {
            if from.x == to.x {
                return self.vertical_span(from.x, from.y, to.y, colour);
            }
            if from.y == to.y {
                return self.horizontal_span(from.y, from.x, to.x, colour);
            }
        }
        self.stroke_segment(from, to, colour, stroke_width);
    }

    fn fill_circle(&mut self, centre: Point, radius: i32, colour: u32) {
        if radius <= 0 {
            return self.blend_pixel(centre.x, centre.y, colour, 255);
        }
        let r_outer2 = radius * radius;
        let r_inner = radius - 1;
        let r_inner2 = r_inner * r_inner;
        let edge_range = r_outer2 - r_inner2; // Width of the AA edge band

        for dy in -radius..=radius {
            let dy2 = dy * dy;
            for dx in -radius..=radius {
                let dist2 = dx * dx + dy2;
                if dist2 > r_outer2 {
                    continue;
                }
                // 255 inside, fading to 0 across the edge band
                let alpha = if dist2 <= r_inner2 {
                    255
                } else {
                    (((r_outer2 - dist2) << 8) / edge_range).min(255) as u32
                };
                self.blend_pixel(centre.x + dx, centre.y + dy, colour, alpha);
            }
        }
    }

    fn stroke_circle(&mut self, centre: Point, radius: i32, colour: u32, stroke_width: f32) {
        let half = (stroke_width / 2.).max(0.5);
        let reach = radius.max(0) + half.ceil() as i32 + 1;

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                let alpha = coverage((dist - radius as f32).abs(), half);
                if alpha > 0 {
                    self.blend_pixel(centre.x + dx, centre.y + dy, colour, alpha);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, baseline_left: Point, size: f32, colour: u32) {
        if let Some(renderer) = self.text.as_mut() {
            let len = self.width * self.height;
            renderer.draw_text_baseline_u32(
                &mut self.pixels[..len],
                self.width,
                text,
                baseline_left.x as f32,
                baseline_left.y as f32,
                size,
                colour,
            );
        }
    }
}
