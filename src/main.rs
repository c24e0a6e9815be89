// Hide console window on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::rc::Rc;
use std::time::Instant;

use anyhow::Context as _;
use waving_flag::ui::FlagApp;
use waving_flag::{ShellError, TICK_INTERVAL, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

#[derive(Default)]
struct App {
    flag_app: Option<FlagApp>,
    failure: Option<ShellError>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ShellError) {
        log::error!("{}", err);
        self.failure = Some(err);
        event_loop.exit();
    }
}

/// Top-left position that centres the window on the primary monitor
fn centred_position(event_loop: &ActiveEventLoop) -> Option<PhysicalPosition<i32>> {
    let monitor = event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next())?;

    let screen = monitor.size();
    let origin = monitor.position();
    Some(PhysicalPosition::new(
        origin.x + (screen.width as i32 - WINDOW_WIDTH as i32) / 2,
        origin.y + (screen.height as i32 - WINDOW_HEIGHT as i32) / 2,
    ))
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.flag_app.is_some() {
            return;
        }

        let mut window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);
        if let Some(position) = centred_position(event_loop) {
            window_attributes = window_attributes.with_position(position);
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match FlagApp::new(window) {
            Ok(app) => {
                app.request_redraw();
                self.flag_app = Some(app);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(app) = &mut self.flag_app {
                    if let Err(e) = app.resize(size) {
                        log::error!("Resize failed: {}", e);
                    }
                    app.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(app) = &mut self.flag_app {
                    // Platform default: drop the frame and keep animating
                    if let Err(e) = app.render() {
                        log::error!("Frame skipped: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.flag_app {
            app.tick_if_due(Instant::now());
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_tick()));
        }
    }
}

fn main() -> anyhow::Result<()> {
    waving_flag::init_logging();

    // Route panics through the logger so they land next to the frame logs
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("PANIC: {}", panic_info);
        let backtrace = std::backtrace::Backtrace::capture();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            log::error!("Backtrace:\n{}", backtrace);
        }
    }));

    log::info!(
        "{} - {}x{} window, tick every {:?}",
        WINDOW_TITLE,
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
        TICK_INTERVAL
    );

    let event_loop = EventLoop::new()
        .map_err(ShellError::from)
        .context("Failed to create event loop")?;
    let mut app = App::default();
    event_loop
        .run_app(&mut app)
        .map_err(ShellError::from)
        .context("Event loop exited with an error")?;

    if let Some(failure) = app.failure {
        return Err(failure).context("Window setup failed");
    }
    Ok(())
}
