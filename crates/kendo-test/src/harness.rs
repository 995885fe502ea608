//! End-to-end harness: classifier + engine wired like the embedding
//!
//! One `step` per synthetic frame, in the production order: ingest/classify,
//! read the debounced display gesture, then update the engine with that
//! gesture and the raw wrist positions.

use kendo_core::{GameConfig, GestureConfig, GestureSymbol, PoseFrame, Tick};
use kendo_game::GameEngine;
use kendo_gesture::GestureClassifier;

/// Default synthetic frame interval (~30 fps inference)
pub const DEFAULT_FRAME_MS: u32 = 33;

/// Classifier and engine under one tick driver.
pub struct ArcadeHarness {
    pub classifier: GestureClassifier,
    pub engine: GameEngine,
    now: Tick,
    frame_interval_ms: u32,
}

impl ArcadeHarness {
    /// Default configs and a fixed engine seed.
    pub fn new() -> Self {
        Self::with_parts(
            GestureClassifier::new(GestureConfig::default()),
            GameEngine::with_seed(GameConfig::default(), 42),
        )
    }

    pub fn with_parts(classifier: GestureClassifier, engine: GameEngine) -> Self {
        ArcadeHarness {
            classifier,
            engine,
            now: Tick::ZERO,
            frame_interval_ms: DEFAULT_FRAME_MS,
        }
    }

    /// Override the synthetic frame interval.
    pub fn with_frame_interval(mut self, millis: u32) -> Self {
        self.frame_interval_ms = millis;
        self
    }

    /// Current harness time.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Drive one frame through the whole pipeline. Returns the classify
    /// result for this frame (not the latched display symbol).
    pub fn step(&mut self, frame: &PoseFrame) -> GestureSymbol {
        self.now = self.now.advance(self.frame_interval_ms);

        let symbol = self.classifier.ingest_and_classify(frame, self.now);
        let display = self.classifier.current_display_symbol(self.now);
        let wrists = self.classifier.wrists();
        self.engine.update(display, wrists, self.now);

        symbol
    }

    /// Drive a whole script, collecting per-frame classify results.
    pub fn run(&mut self, frames: &[PoseFrame]) -> Vec<GestureSymbol> {
        frames.iter().map(|frame| self.step(frame)).collect()
    }
}

impl Default for ArcadeHarness {
    fn default() -> Self {
        Self::new()
    }
}
