use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::animation::AnimationController;
use super::drawing::Canvas;
use super::renderer::Renderer;
use super::text_rasterizing::TextRenderer;
use crate::error::Result;
use crate::TICK_INTERVAL;

/// Fixed-period deadline for animation ticks
///
/// A late poll ticks once and reschedules from `now`; missed ticks are
/// dropped rather than replayed in a burst.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    next_tick: Instant,
}

impl TickScheduler {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_tick: now + interval,
        }
    }

    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    /// True when the deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }
        self.next_tick = now + self.interval;
        true
    }
}

/// Window-bound application: owns the pixel surface and the animation
pub struct FlagApp {
    window: Rc<Window>,
    renderer: Renderer,
    text_renderer: TextRenderer,
    controller: AnimationController,
    scheduler: TickScheduler,
    frame_counter: u64,
}

impl FlagApp {
    pub fn new(window: Rc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let renderer = Renderer::new(window.clone(), size.width, size.height)?;
        let controller = AnimationController::default();
        log::info!(
            "Animation ready: {} listing lines, surface {}x{}",
            controller.total_lines(),
            size.width,
            size.height
        );

        Ok(Self {
            window,
            renderer,
            text_renderer: TextRenderer::new(),
            controller,
            scheduler: TickScheduler::new(TICK_INTERVAL, Instant::now()),
            frame_counter: 0,
        })
    }

    pub fn next_tick(&self) -> Instant {
        self.scheduler.next_tick()
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        self.renderer.resize(size.width, size.height)
    }

    /// Advance the animation if a tick is due; every tick asks for a redraw
    pub fn tick_if_due(&mut self, now: Instant) -> bool {
        if !self.scheduler.poll(now) {
            return false;
        }
        self.controller.on_tick();
        self.request_redraw();
        true
    }

    /// Full redraw of the current animation state, then present
    pub fn render(&mut self) -> Result<()> {
        let started = Instant::now();
        let (width, height) = self.renderer.size();

        let mut buffer = self.renderer.lock_buffer()?;
        {
            let mut canvas = Canvas::new(&mut buffer, width as usize, height as usize)
                .with_text(&mut self.text_renderer);
            self.controller.render(&mut canvas);
        }
        buffer.present()?;

        self.frame_counter += 1;
        crate::debug_println!(
            "frame {} ({:?}) rendered in {:?}",
            self.frame_counter,
            self.controller.phase(),
            started.elapsed()
        );
        Ok(())
    }
}
