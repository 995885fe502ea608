//! KENDO Gesture - Temporal gesture classification
//!
//! Turns a sliding window of per-joint (position, confidence, timestamp)
//! samples into a discrete gesture symbol using distance/speed/extension
//! heuristics with debounce logic. Fixed-capacity storage, no allocation in
//! the per-frame path.

pub mod classifier;
pub mod history;

pub use classifier::*;
pub use history::*;
