use std::num::NonZeroU32;
use std::rc::Rc;

use softbuffer::{Buffer, Context};
use winit::window::Window;

use crate::error::{Result, ShellError};

pub struct Renderer {
    // Held for the surface's lifetime
    _context: Context<Rc<Window>>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    width: u32,
    height: u32,
}

fn non_zero(width: u32, height: u32) -> Result<(NonZeroU32, NonZeroU32)> {
    match (NonZeroU32::new(width), NonZeroU32::new(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(ShellError::ZeroSize { width, height }),
    }
}

impl Renderer {
    pub fn new(window: Rc<Window>, width: u32, height: u32) -> Result<Self> {
        let context = Context::new(window.clone())?;
        let mut surface = softbuffer::Surface::new(&context, window)?;

        let (w, h) = non_zero(width, height)?;
        surface.resize(w, h)?;
        log::debug!("Pixel surface ready: {}x{}", width, height);

        Ok(Self {
            _context: context,
            surface,
            width,
            height,
        })
    }

    /// Zero sizes (minimized windows) are ignored
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let Ok((w, h)) = non_zero(width, height) else {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return Ok(());
        };
        self.surface.resize(w, h)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get mutable access to softbuffer's internal buffer for direct drawing
    /// Important: Call .present() on the returned buffer when done, don't drop it early!
    pub fn lock_buffer(&mut self) -> Result<Buffer<'_, Rc<Window>, Rc<Window>>> {
        Ok(self.surface.buffer_mut()?)
    }
}
