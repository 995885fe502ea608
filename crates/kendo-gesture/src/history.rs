//! Joint sample history - fixed ring buffers sharing one write cursor
//!
//! Every tracked joint keeps the last `HISTORY_DEPTH` samples. A single
//! cursor is shared across all joints and advances exactly once per ingested
//! frame, so one slot index across joints always denotes one timestamp.

use kendo_core::{Joint, Point, PoseFrame, Tick};

/// Frames of history kept per joint
pub const HISTORY_DEPTH: usize = 10;

/// One buffered joint observation. Immutable once written.
#[derive(Debug, Clone, Copy, Default)]
pub struct JointSample {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
    pub timestamp: Tick,
}

impl JointSample {
    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Ring-buffered sample history for all tracked joints.
pub struct JointHistory {
    /// Sample slots: [joint][slot]
    samples: [[JointSample; HISTORY_DEPTH]; Joint::COUNT],
    /// Shared write cursor (slot most recently written)
    cursor: usize,
    /// Total frames ingested since creation
    frames_seen: u64,
}

impl JointHistory {
    pub fn new() -> Self {
        JointHistory {
            samples: [[JointSample::default(); HISTORY_DEPTH]; Joint::COUNT],
            cursor: 0,
            frames_seen: 0,
        }
    }

    /// Ingest one frame: advance the shared cursor, then write every joint's
    /// sample for this frame. Confidence is always stored; consumers gate on
    /// it when they read.
    pub fn ingest(&mut self, frame: &PoseFrame, now: Tick) {
        self.cursor = (self.cursor + 1) % HISTORY_DEPTH;

        for &joint in Joint::all() {
            let estimate = frame.get(joint);
            self.samples[joint as usize][self.cursor] = JointSample {
                x: estimate.x,
                y: estimate.y,
                confidence: estimate.score,
                timestamp: now,
            };
        }

        self.frames_seen += 1;
    }

    /// Total frames ingested
    #[inline]
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Whether a sample `frames_back` frames ago actually exists.
    #[inline]
    pub fn has_depth(&self, frames_back: usize) -> bool {
        frames_back < HISTORY_DEPTH && (frames_back as u64) < self.frames_seen
    }

    /// Sample `frames_back` frames before the current frame (0 = current).
    ///
    /// `None` for offsets the ring cannot serve - beyond its depth, or
    /// earlier than the first ingested frame. Indexing wraps with modular
    /// arithmetic; it never goes negative and never reads unwritten slots.
    pub fn sample(&self, joint: Joint, frames_back: usize) -> Option<JointSample> {
        if !self.has_depth(frames_back) {
            return None;
        }
        let slot = (self.cursor + HISTORY_DEPTH - frames_back) % HISTORY_DEPTH;
        Some(self.samples[joint as usize][slot])
    }

    /// Joint speed over the last `frames_back` frames, in normalized
    /// units/sec.
    ///
    /// 0.0 when the window is out of range, the history is too shallow, or
    /// the elapsed time is zero (duplicate timestamps).
    pub fn speed(&self, joint: Joint, frames_back: usize) -> f32 {
        self.speed_at(joint, 0, frames_back)
    }

    /// Joint speed over `frames_back` frames, anchored `offset_back` frames
    /// in the past. Same degraded-to-zero contract as [`speed`](Self::speed).
    pub fn speed_at(&self, joint: Joint, offset_back: usize, frames_back: usize) -> f32 {
        let Some(total) = offset_back.checked_add(frames_back) else {
            return 0.0;
        };
        let (Some(newer), Some(older)) = (self.sample(joint, offset_back), self.sample(joint, total))
        else {
            return 0.0;
        };

        let elapsed_ms = newer.timestamp.millis_since(older.timestamp);
        if elapsed_ms == 0 {
            return 0.0;
        }

        newer.point().distance(&older.point()) / (elapsed_ms as f32 / 1000.0)
    }
}

impl Default for JointHistory {
    fn default() -> Self {
        Self::new()
    }
}
