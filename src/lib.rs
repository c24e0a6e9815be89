use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// Window title shown by the host shell
pub const WINDOW_TITLE: &str = "Waving Indian Flag";

/// Fixed window size in physical pixels
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

/// Animation tick period (~40 Hz)
pub const TICK_INTERVAL: Duration = Duration::from_millis(25);

// Global debug flag - frame diagnostics print only while this is set
// Starts on with --features logging
pub static DEBUG_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "logging"));

// Debug print macro - only prints if DEBUG_ENABLED is true
// Compiled out entirely in release builds
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if $crate::DEBUG_ENABLED.load(std::sync::atomic::Ordering::Relaxed) {
            println!($($arg)*);
        }
    };
}

// Arguments are still type-checked, but never formatted
#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

// Logging
// - env_logger behind the log facade, RUST_LOG overrides the default "info"
// - cosmic_text is chatty at debug, keep it at warn
// - trace_log! formats nothing without --features logging

/// Initialize logging - must be called early in main()
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("cosmic_text", log::LevelFilter::Warn)
        .format_timestamp_millis()
        .init();
}

#[doc(hidden)]
pub use log as __log;

// Enabled: forwarded to the log facade at debug level
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__log::debug!($($arg)*)
    };
}

// Disabled: arguments type-check but no String is ever built
#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

pub mod error;
pub mod ui;

pub use error::ShellError;
pub use ui::animation::{AnimationConfig, AnimationController, Phase, SourceListing};
pub use ui::drawing::{Canvas, Point, Surface};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_debug_flag_follows_logging_feature() {
        assert_eq!(DEBUG_ENABLED.load(Ordering::Relaxed), cfg!(feature = "logging"));
    }

    #[test]
    fn test_diagnostic_macros_evaluate_lazily() {
        use std::cell::Cell;

        // Arguments are only evaluated when the output is actually formatted
        let evaluated = Cell::new(0);
        let count = || {
            evaluated.set(evaluated.get() + 1);
            evaluated.get()
        };
        trace_log!("tick {}", count());
        let expected = if cfg!(feature = "logging") && log::log_enabled!(log::Level::Debug) {
            1
        } else {
            0
        };
        assert_eq!(evaluated.get(), expected);

        let before = evaluated.get();
        debug_println!("frame {}", count());
        let printed = cfg!(debug_assertions) && DEBUG_ENABLED.load(Ordering::Relaxed);
        assert_eq!(evaluated.get(), before + printed as i32);
    }
}
