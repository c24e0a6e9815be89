pub mod animation;
pub mod app;
mod compositing;
pub mod drawing;
mod renderer;
mod text_rasterizing;
pub mod theme;

pub use animation::{AnimationConfig, AnimationController, Phase, SourceListing};
pub use app::{FlagApp, TickScheduler};
pub use text_rasterizing::TextRenderer;
