//! Per-frame drawing for each animation phase
//!
//! Every frame is a full redraw from the controller's counters; nothing is
//! cached between frames.

use super::animation::{AnimationController, Phase};
use super::drawing::{Point, Surface};
use super::theme;

impl AnimationController {
    /// Draw the current state onto `surface`
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(theme::BACKGROUND);

        match self.phase() {
            Phase::DisplayingText => self.draw_source_listing(surface),
            Phase::DrawingFlag | Phase::WavingFlag => {
                let origin = self.flag_origin(surface);
                if self.phase() == Phase::DrawingFlag {
                    self.draw_stripes_progressively(surface, origin);
                } else {
                    self.draw_waving_flag(surface, origin);
                }
            }
        }
    }

    /// Top-left corner of the flag centred on the surface (negative when the
    /// surface is smaller than the flag)
    pub fn flag_origin<S: Surface + ?Sized>(&self, surface: &S) -> Point {
        let (width, height) = surface.size();
        Point::new(
            (width as i32 - self.config.flag_width as i32) / 2,
            (height as i32 - self.config.flag_height as i32) / 2,
        )
    }

    fn flag_centre(&self, origin: Point) -> Point {
        Point::new(
            origin.x + self.config.flag_width as i32 / 2,
            origin.y + self.config.flag_height as i32 / 2,
        )
    }

    fn draw_source_listing<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (_, height) = surface.size();
        let visible = self.visible_lines(height as i32);
        let start = visible.start;

        for index in visible {
            let Some(line) = self.listing.line(index) else {
                continue;
            };
            let row = (index - start) as i32;
            let y = self.config.top_margin as i32 + row * self.config.line_height as i32;
            surface.draw_text(
                line,
                Point::new(self.config.text_margin as i32, y),
                self.config.text_size,
                theme::LISTING_TEXT,
            );
        }
    }

    /// One column of all three bands, `top` is the upper edge of the saffron band
    fn draw_stripe_column<S: Surface + ?Sized>(&self, surface: &mut S, x: i32, top: i32) {
        let stripe_height = self.config.stripe_height();
        for (band, colour) in theme::STRIPES.into_iter().enumerate() {
            let band_top = top + band as i32 * stripe_height;
            surface.draw_line(
                Point::new(x, band_top),
                Point::new(x, band_top + stripe_height),
                colour,
                1.,
            );
        }
    }

    fn draw_stripes_progressively<S: Surface + ?Sized>(&self, surface: &mut S, origin: Point) {
        let progress = self.progress_columns().min(self.config.flag_width);
        for column in 0..progress as i32 {
            self.draw_stripe_column(surface, origin.x + column, origin.y);
        }
        if self.progress_columns() >= self.config.flag_width {
            self.draw_emblem(surface, self.flag_centre(origin));
        }
    }

    fn draw_waving_flag<S: Surface + ?Sized>(&self, surface: &mut S, origin: Point) {
        for column in 0..self.config.flag_width as i32 {
            // Truncated toward zero, whole-pixel ripple
            let y_offset = self.wave_offset(column as f64) as i32;
            self.draw_stripe_column(surface, origin.x + column, origin.y + y_offset);
        }

        // Keep the wheel riding the cloth at the centre column
        let centre_offset = self.wave_offset((self.config.flag_width / 2) as f64) as i32;
        let centre = self.flag_centre(origin);
        self.draw_emblem(surface, Point::new(centre.x, centre.y + centre_offset));
    }

    /// Navy wheel: rim, evenly spaced spokes, solid hub
    fn draw_emblem<S: Surface + ?Sized>(&self, surface: &mut S, centre: Point) {
        let radius = self.config.emblem_radius();
        let stroke = self.config.emblem_stroke;

        surface.stroke_circle(centre, radius, theme::NAVY_BLUE, stroke);

        let spokes = self.config.spoke_count;
        for spoke in 0..spokes {
            let angle = (spoke as f64 * 360. / spokes as f64).to_radians();
            let tip = Point::new(
                centre.x + (angle.cos() * radius as f64) as i32,
                centre.y + (angle.sin() * radius as f64) as i32,
            );
            surface.draw_line(centre, tip, theme::NAVY_BLUE, stroke);
        }

        surface.fill_circle(centre, self.config.hub_radius, theme::NAVY_BLUE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::animation::{AnimationConfig, SourceListing};
    use crate::ui::drawing::Canvas;

    const WIDTH: usize = 800;
    const HEIGHT: usize = 600;

    /// Records every primitive call for inspecting what a frame draws
    #[derive(Debug, Default, PartialEq)]
    struct Recorder {
        width: u32,
        height: u32,
        ops: Vec<String>,
    }

    impl Recorder {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                ops: Vec::new(),
            }
        }

        fn count(&self, prefix: &str) -> usize {
            self.ops.iter().filter(|op| op.starts_with(prefix)).count()
        }
    }

    impl Surface for Recorder {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }
        fn clear(&mut self, colour: u32) {
            self.ops.push(format!("clear {:08x}", colour));
        }
        fn draw_line(&mut self, from: Point, to: Point, colour: u32, stroke_width: f32) {
            self.ops.push(format!(
                "line {},{} {},{} {:08x} {}",
                from.x, from.y, to.x, to.y, colour, stroke_width
            ));
        }
        fn fill_circle(&mut self, centre: Point, radius: i32, colour: u32) {
            self.ops
                .push(format!("fill {},{} r{} {:08x}", centre.x, centre.y, radius, colour));
        }
        fn stroke_circle(&mut self, centre: Point, radius: i32, colour: u32, stroke_width: f32) {
            self.ops.push(format!(
                "ring {},{} r{} {:08x} {}",
                centre.x, centre.y, radius, colour, stroke_width
            ));
        }
        fn draw_text(&mut self, text: &str, baseline_left: Point, size: f32, colour: u32) {
            self.ops.push(format!(
                "text {},{} {} {:08x} {}",
                baseline_left.x, baseline_left.y, size, colour, text
            ));
        }
    }

    fn controller(lines: usize) -> AnimationController {
        let listing = SourceListing::from_lines((0..lines).map(|i| format!("line {}", i)));
        AnimationController::new(listing, AnimationConfig::default())
    }

    fn advance_to(controller: &mut AnimationController, phase: Phase) {
        while controller.phase() != phase {
            controller.on_tick();
        }
    }

    fn render_pixels(controller: &AnimationController) -> Vec<u32> {
        let mut pixels = vec![0; WIDTH * HEIGHT];
        let mut canvas = Canvas::new(&mut pixels, WIDTH, HEIGHT);
        controller.render(&mut canvas);
        pixels
    }

    #[test]
    fn test_listing_scrolls_with_margins() {
        let mut c = controller(10);
        for _ in 0..8 {
            c.on_tick();
        }
        // Room for 5 lines: 2 * 20 + 5 * 15
        let mut surface = Recorder::new(400, 115);
        c.render(&mut surface);

        let texts: Vec<&String> = surface.ops.iter().filter(|op| op.starts_with("text")).collect();
        assert_eq!(texts.len(), 5);
        assert_eq!(texts[0], "text 20,20 12 ff00ff00 line 3");
        assert_eq!(texts[4], "text 20,80 12 ff00ff00 line 7");
        assert_eq!(surface.ops[0], "clear ff000000");
    }

    #[test]
    fn test_drawing_phase_reveals_columns() {
        let mut c = controller(1);
        advance_to(&mut c, Phase::DrawingFlag);
        for _ in 0..3 {
            c.on_tick();
        }
        let mut surface = Recorder::new(WIDTH as u32, HEIGHT as u32);
        c.render(&mut surface);

        // 30 columns, three bands each, no wheel yet
        assert_eq!(surface.count("line"), 90);
        assert_eq!(surface.count("ring"), 0);
        assert_eq!(surface.ops[1], "line 100,100 100,233 ffff9933 1");
        assert_eq!(surface.ops[2], "line 100,233 100,366 ffffffff 1");
        assert_eq!(surface.ops[3], "line 100,366 100,499 ff138808 1");
    }

    #[test]
    fn test_partial_flag_pixels() {
        let mut c = controller(1);
        advance_to(&mut c, Phase::DrawingFlag);
        for _ in 0..59 {
            c.on_tick();
        }
        assert_eq!(c.progress_columns(), 590);
        assert_eq!(c.phase(), Phase::DrawingFlag);

        let pixels = render_pixels(&c);
        assert_eq!(pixels[150 * WIDTH + 100], theme::SAFFRON);
        assert_eq!(pixels[300 * WIDTH + 689], theme::WHITE);
        assert_eq!(pixels[450 * WIDTH + 689], theme::INDIA_GREEN);
        // Columns past the progress stay black
        assert_eq!(pixels[300 * WIDTH + 695], theme::BACKGROUND);
        // No wheel until every column is painted
        assert_eq!(pixels[300 * WIDTH + 400], theme::WHITE);
    }

    #[test]
    fn test_complete_drawing_shows_static_wheel() {
        // A zero-width flag is complete the moment drawing starts
        let config = AnimationConfig {
            flag_width: 0,
            ..AnimationConfig::default()
        };
        let mut c = AnimationController::new(SourceListing::default(), config);
        advance_to(&mut c, Phase::DrawingFlag);

        let mut surface = Recorder::new(WIDTH as u32, HEIGHT as u32);
        c.render(&mut surface);
        assert_eq!(surface.count("ring"), 1);
        assert!(surface.ops.contains(&"ring 400,300 r61 ff000080 2".to_string()));
        assert!(surface.ops.contains(&"fill 400,300 r5 ff000080".to_string()));
    }

    #[test]
    fn test_wheel_geometry() {
        let mut c = controller(0);
        advance_to(&mut c, Phase::WavingFlag);
        let mut surface = Recorder::new(WIDTH as u32, HEIGHT as u32);
        c.render(&mut surface);

        // 600 columns * 3 bands + 24 spokes
        assert_eq!(surface.count("line"), 1800 + 24);
        assert_eq!(surface.count("ring"), 1);
        assert_eq!(surface.count("fill"), 1);

        // Wave phase 0 at column 300: 15 * sin(6) = -4.19 -> -4
        assert!(surface.ops.contains(&"ring 400,296 r61 ff000080 2".to_string()));
        assert!(surface.ops.contains(&"fill 400,296 r5 ff000080".to_string()));
        // 0 degree and 90 degree spokes
        assert!(surface.ops.contains(&"line 400,296 461,296 ff000080 2".to_string()));
        assert!(surface.ops.contains(&"line 400,296 400,357 ff000080 2".to_string()));
    }

    #[test]
    fn test_waving_columns_follow_sine() {
        let mut c = controller(0);
        advance_to(&mut c, Phase::WavingFlag);
        let mut surface = Recorder::new(WIDTH as u32, HEIGHT as u32);
        c.render(&mut surface);

        // Column 0 has no offset
        assert_eq!(surface.ops[1], "line 100,100 100,233 ffff9933 1");
        // Column 79: 15 * sin(1.58) = 14.99 -> 14
        let column_79 = 1 + 79 * 3;
        assert_eq!(surface.ops[column_79], "line 179,114 179,247 ffff9933 1");
    }

    #[test]
    fn test_hub_is_navy_in_pixels() {
        let mut c = controller(0);
        advance_to(&mut c, Phase::WavingFlag);
        let pixels = render_pixels(&c);
        assert_eq!(pixels[296 * WIDTH + 400], theme::NAVY_BLUE);
    }

    #[test]
    fn test_render_is_a_pure_read() {
        let mut c = controller(30);
        for phase in [Phase::DisplayingText, Phase::DrawingFlag, Phase::WavingFlag] {
            advance_to(&mut c, phase);
            for _ in 0..7 {
                c.on_tick();
            }
            let snapshot = c.clone();
            let first = render_pixels(&c);
            let second = render_pixels(&c);
            assert_eq!(first, second);
            assert_eq!(c.progress_columns(), snapshot.progress_columns());
            assert_eq!(c.wave_phase(), snapshot.wave_phase());
            assert_eq!(c.revealed_lines(), snapshot.revealed_lines());
        }
    }

    #[test]
    fn test_small_surface_does_not_panic() {
        let mut c = controller(5);
        let mut pixels = vec![0; 30 * 20];
        for _ in 0..300 {
            c.on_tick();
            let mut canvas = Canvas::new(&mut pixels, 30, 20);
            c.render(&mut canvas);
        }
        assert_eq!(c.phase(), Phase::WavingFlag);
    }
}
