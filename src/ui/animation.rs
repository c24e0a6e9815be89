//! Animation state machine
//!
//! Three phases run in order and never go back:
//! 1. DisplayingText - the listing scrolls up one line per tick, then holds
//! 2. DrawingFlag    - stripes are painted left to right, 10 columns per tick
//! 3. WavingFlag     - the finished flag ripples along a travelling sine wave
//!
//! `on_tick` is the only mutator. Rendering lives in `compositing.rs` and
//! takes `&self`, so a frame is always a pure read of the current state.

use std::ops::Range;

/// Text shown during the first phase: this module's own source
pub const SOURCE_LISTING: &str = include_str!("animation.rs");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    DisplayingText,
    DrawingFlag,
    WavingFlag,
}

/// Geometry and timing constants, fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub flag_width: u32,
    pub flag_height: u32,
    /// Columns revealed per tick while drawing
    pub column_step: u32,
    /// Ticks to hold the full listing before drawing starts (exclusive)
    pub pause_threshold: u32,
    /// Added to the wave phase every tick while waving
    pub wave_phase_step: f64,
    pub wave_amplitude: f64,
    /// Radians per column
    pub wave_frequency: f64,
    pub line_height: u32,
    pub top_margin: u32,
    pub text_margin: u32,
    pub text_size: f32,
    pub spoke_count: u32,
    pub hub_radius: i32,
    pub emblem_stroke: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            flag_width: 600,
            flag_height: 400,
            column_step: 10,
            pause_threshold: 60,
            wave_phase_step: 5.,
            wave_amplitude: 15.,
            wave_frequency: 0.02,
            line_height: 15,
            top_margin: 20,
            text_margin: 20,
            text_size: 12.,
            spoke_count: 24,
            hub_radius: 5,
            emblem_stroke: 2.,
        }
    }
}

impl AnimationConfig {
    /// Height of one of the three bands (integer division, 400 -> 133)
    pub fn stripe_height(&self) -> i32 {
        (self.flag_height / 3) as i32
    }

    /// Wheel radius: half a stripe less 5px
    pub fn emblem_radius(&self) -> i32 {
        (self.stripe_height() / 2 - 5).max(0)
    }
}

/// Ordered, immutable lines of text for the listing phase
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceListing {
    lines: Vec<String>,
}

impl SourceListing {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextDisplayState {
    pub revealed_lines: usize,
    pub pause_ticks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagDrawState {
    pub progress_columns: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveState {
    pub phase: f64,
}

#[derive(Debug, Clone)]
pub struct AnimationController {
    pub(super) config: AnimationConfig,
    pub(super) listing: SourceListing,
    phase: Phase,
    text: TextDisplayState,
    flag: FlagDrawState,
    wave: WaveState,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(SourceListing::new(SOURCE_LISTING), AnimationConfig::default())
    }
}

impl AnimationController {
    pub fn new(listing: SourceListing, config: AnimationConfig) -> Self {
        Self {
            config,
            listing,
            phase: Phase::DisplayingText,
            text: TextDisplayState::default(),
            flag: FlagDrawState::default(),
            wave: WaveState::default(),
        }
    }

    /// Advance exactly one step for the current phase
    ///
    /// A phase hands over on the same tick its exit condition is first met.
    pub fn on_tick(&mut self) {
        match self.phase {
            Phase::DisplayingText => {
                if self.text.revealed_lines < self.listing.len() {
                    self.text.revealed_lines += 1;
                } else {
                    self.text.pause_ticks += 1;
                    if self.text.pause_ticks > self.config.pause_threshold {
                        self.enter(Phase::DrawingFlag);
                    }
                }
            }
            Phase::DrawingFlag => {
                let width = self.config.flag_width;
                if self.flag.progress_columns < width {
                    // Step of 0 would never finish
                    let step = self.config.column_step.max(1);
                    self.flag.progress_columns =
                        self.flag.progress_columns.saturating_add(step).min(width);
                }
                if self.flag.progress_columns >= width {
                    self.enter(Phase::WavingFlag);
                }
            }
            Phase::WavingFlag => {
                self.wave.phase += self.config.wave_phase_step;
            }
        }

        crate::trace_log!(
            "tick: {:?} lines={} pause={} columns={} wave={:.1}",
            self.phase,
            self.text.revealed_lines,
            self.text.pause_ticks,
            self.flag.progress_columns,
            self.wave.phase
        );
    }

    fn enter(&mut self, next: Phase) {
        log::info!("Animation phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn listing(&self) -> &SourceListing {
        &self.listing
    }

    pub fn total_lines(&self) -> usize {
        self.listing.len()
    }

    pub fn revealed_lines(&self) -> usize {
        self.text.revealed_lines
    }

    pub fn pause_ticks(&self) -> u32 {
        self.text.pause_ticks
    }

    pub fn progress_columns(&self) -> u32 {
        self.flag.progress_columns
    }

    pub fn wave_phase(&self) -> f64 {
        self.wave.phase
    }

    /// How many listing lines fit between the top and bottom margins
    ///
    /// Zero for degenerate surfaces or a zero line height.
    pub fn max_visible_lines(&self, surface_height: i32) -> usize {
        let usable = surface_height - 2 * self.config.top_margin as i32;
        if self.config.line_height == 0 || usable <= 0 {
            return 0;
        }
        (usable / self.config.line_height as i32) as usize
    }

    /// Revealed lines that are on screen; scrolls once the listing overflows
    pub fn visible_lines(&self, surface_height: i32) -> Range<usize> {
        let revealed = self.text.revealed_lines;
        let start = revealed.saturating_sub(self.max_visible_lines(surface_height));
        start..revealed
    }

    /// Vertical displacement of a flag column at the current wave phase
    pub fn wave_offset(&self, column: f64) -> f64 {
        self.config.wave_amplitude * (self.config.wave_frequency * (column + self.wave.phase)).sin()
    }
}
