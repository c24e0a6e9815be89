//! Host shell failures: event loop, window, and pixel surface.
//!
//! The animation core has no error conditions of its own; everything here
//! comes from the platform side. Platform errors are carried as text since
//! some hold raw handles and are not Send.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Event loop failed: {0}")]
    EventLoop(String),

    #[error("Window creation failed: {0}")]
    Window(String),

    #[error("Pixel surface failed: {0}")]
    Surface(String),

    #[error("Surface size must be non-zero (got {width}x{height})")]
    ZeroSize { width: u32, height: u32 },
}

impl From<winit::error::EventLoopError> for ShellError {
    fn from(err: winit::error::EventLoopError) -> Self {
        Self::EventLoop(err.to_string())
    }
}

impl From<winit::error::OsError> for ShellError {
    fn from(err: winit::error::OsError) -> Self {
        Self::Window(err.to_string())
    }
}

impl From<softbuffer::SoftBufferError> for ShellError {
    fn from(err: softbuffer::SoftBufferError) -> Self {
        Self::Surface(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ShellError::ZeroSize {
            width: 0,
            height: 600,
        };
        assert_eq!(err.to_string(), "Surface size must be non-zero (got 0x600)");

        let err = ShellError::Surface("lost".into());
        assert_eq!(err.to_string(), "Pixel surface failed: lost");
    }

    #[test]
    fn test_shell_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<ShellError>();
    }
}
