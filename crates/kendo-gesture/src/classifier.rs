//! Gesture classifier - detectors, debounce, and the display latch
//!
//! Two effective states: *cooling down* (a gesture was accepted less than the
//! cooldown ago) and *armed*. Ingest happens in both states so the history
//! stays current; detection only happens while armed. Detectors run in fixed
//! priority order - sword gestures first, then arm swipes - and the first hit
//! wins the frame.
//!
//! Everything here degrades silently: low confidence, shallow history, or
//! duplicate timestamps make a detector decline, never error.

use kendo_core::{
    Arm, GestureConfig, GestureSymbol, Joint, Point, PoseFrame, StrikeReference, Tick, Wrists,
};

use crate::history::{JointHistory, JointSample, HISTORY_DEPTH};

/// Read-only view of one joint's current (or past) state, for debug overlays.
///
/// Zero-valued when the requested offset is out of range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointDebug {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
    pub speed: f32,
}

impl JointDebug {
    pub const ZERO: JointDebug = JointDebug {
        x: 0.0,
        y: 0.0,
        confidence: 0.0,
        speed: 0.0,
    };
}

/// Temporal gesture classifier over buffered joint history.
pub struct GestureClassifier {
    history: JointHistory,
    config: GestureConfig,
    last_symbol: GestureSymbol,
    last_symbol_time: Option<Tick>,
    display_symbol: GestureSymbol,
    display_deadline: Tick,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        GestureClassifier {
            history: JointHistory::new(),
            config,
            last_symbol: GestureSymbol::None,
            last_symbol_time: None,
            display_symbol: GestureSymbol::None,
            display_deadline: Tick::ZERO,
        }
    }

    /// Ingest one pose frame and classify it.
    ///
    /// Always updates the history. Returns `None` while cooling down; while
    /// armed, the first detector to fire wins, stamps the debounce state, and
    /// latches the display symbol.
    pub fn ingest_and_classify(&mut self, frame: &PoseFrame, now: Tick) -> GestureSymbol {
        self.history.ingest(frame, now);

        if let Some(last) = self.last_symbol_time {
            if now.millis_since(last) < self.config.cooldown_ms {
                return GestureSymbol::None;
            }
        }

        let detected = self
            .detect_overhead_strike()
            .or_else(|| self.detect_side_slash())
            .or_else(|| self.detect_arm_swipe(Arm::Right))
            .or_else(|| self.detect_arm_swipe(Arm::Left))
            .or_else(|| self.detect_arms_raised());

        if let Some(symbol) = detected {
            self.last_symbol = symbol;
            self.last_symbol_time = Some(now);
            self.display_symbol = symbol;
            self.display_deadline = now.advance(self.config.display_hold_ms);
            tracing::debug!(gesture = symbol.name(), at = now.as_millis(), "gesture accepted");
            return symbol;
        }

        GestureSymbol::None
    }

    /// The symbol latched for display, auto-expiring at its deadline.
    ///
    /// Reading past the deadline clears the latch to `None`.
    pub fn current_display_symbol(&mut self, now: Tick) -> GestureSymbol {
        if !self.display_symbol.is_none() && !now.at_or_before(self.display_deadline) {
            self.display_symbol = GestureSymbol::None;
        }
        self.display_symbol
    }

    /// Last accepted gesture (sticky, unlike the display latch)
    pub fn last_symbol(&self) -> GestureSymbol {
        self.last_symbol
    }

    /// Current raw wrist positions for the engine boundary.
    ///
    /// Zero points before the first frame is ingested.
    pub fn wrists(&self) -> Wrists {
        let at = |joint: Joint| {
            self.history
                .sample(joint, 0)
                .map(|s| s.point())
                .unwrap_or_else(Point::zero)
        };
        Wrists::new(at(Joint::LeftWrist), at(Joint::RightWrist))
    }

    /// Current state of one joint plus its short-window speed.
    pub fn joint_debug(&self, joint: Joint) -> JointDebug {
        self.joint_debug_at(joint, 0)
    }

    /// State of one joint `frames_back` frames ago plus the short-window
    /// speed anchored there. Zero-valued when the offset is out of range.
    pub fn joint_debug_at(&self, joint: Joint, frames_back: usize) -> JointDebug {
        match self.history.sample(joint, frames_back) {
            Some(sample) => JointDebug {
                x: sample.x,
                y: sample.y,
                confidence: sample.confidence,
                speed: self
                    .history
                    .speed_at(joint, frames_back, self.config.swipe_speed_frames),
            },
            None => JointDebug::ZERO,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn history(&self) -> &JointHistory {
        &self.history
    }

    fn confident(&self, sample: &JointSample) -> bool {
        sample.confidence > self.config.min_confidence
    }

    /// The ring cannot serve offsets past its depth; configured lookbacks
    /// larger than that clamp to the deepest offset available.
    fn clamped_lookback(&self, configured: usize) -> usize {
        configured.min(HISTORY_DEPTH - 1)
    }

    /// Right wrist dropped fast from above the reference height.
    fn detect_overhead_strike(&self) -> Option<GestureSymbol> {
        let cfg = &self.config;

        let wrist = self.history.sample(Joint::RightWrist, 0)?;
        let shoulder = self.history.sample(Joint::RightShoulder, 0)?;
        let elbow = self.history.sample(Joint::RightElbow, 0)?;
        if !self.confident(&wrist) || !self.confident(&shoulder) || !self.confident(&elbow) {
            return None;
        }

        let lookback = self.clamped_lookback(cfg.strike_lookback);
        let start = self.history.sample(Joint::RightWrist, lookback)?;

        let started_high = match cfg.strike_reference {
            StrikeReference::NoseRelative => {
                let nose = self.history.sample(Joint::Nose, lookback)?;
                start.y < nose.y
            }
            StrikeReference::FixedHeight(height) => start.y < height,
        };

        let drop = wrist.y - start.y;
        if started_high && drop > cfg.strike_drop {
            let speed = self.history.speed(Joint::RightWrist, cfg.strike_speed_frames);
            if speed > cfg.min_swipe_speed * cfg.strike_speed_factor {
                return Some(GestureSymbol::SwordOverheadStrike);
            }
        }

        None
    }

    /// Right wrist swept horizontally with the arm extended.
    fn detect_side_slash(&self) -> Option<GestureSymbol> {
        let cfg = &self.config;

        let wrist = self.history.sample(Joint::RightWrist, 0)?;
        let shoulder = self.history.sample(Joint::RightShoulder, 0)?;
        let elbow = self.history.sample(Joint::RightElbow, 0)?;
        if !self.confident(&wrist) || !self.confident(&shoulder) || !self.confident(&elbow) {
            return None;
        }

        let lookback = self.clamped_lookback(cfg.slash_lookback);
        let start = self.history.sample(Joint::RightWrist, lookback)?;

        let travel = (wrist.x - start.x).abs();
        let extension = wrist.point().distance(&shoulder.point());
        if travel > cfg.slash_min_travel && extension > cfg.slash_min_extension {
            let speed = self.history.speed(Joint::RightWrist, cfg.slash_speed_frames);
            if speed > cfg.min_swipe_speed {
                return Some(GestureSymbol::SwordSideSlash);
            }
        }

        None
    }

    /// One wrist moved horizontally past the delta threshold at speed.
    fn detect_arm_swipe(&self, arm: Arm) -> Option<GestureSymbol> {
        let cfg = &self.config;

        let wrist = self.history.sample(arm.wrist(), 0)?;
        if !self.confident(&wrist) {
            return None;
        }

        let delta_frames = self.clamped_lookback(cfg.swipe_delta_frames);
        let prev = self.history.sample(arm.wrist(), delta_frames)?;

        let dx = wrist.x - prev.x;
        let speed = self.history.speed(arm.wrist(), cfg.swipe_speed_frames);
        if dx.abs() <= cfg.swipe_delta_threshold || speed <= cfg.min_swipe_speed {
            return None;
        }

        if let Some(gate) = cfg.swipe_extension_gate {
            let shoulder = self.history.sample(arm.shoulder(), 0)?;
            if !self.confident(&shoulder) {
                return None;
            }
            if wrist.point().distance(&shoulder.point()) <= gate {
                return None;
            }
        }

        Some(match (arm, dx > 0.0) {
            (Arm::Right, true) => GestureSymbol::RightArmSwipeRight,
            (Arm::Right, false) => GestureSymbol::RightArmSwipeLeft,
            (Arm::Left, true) => GestureSymbol::LeftArmSwipeRight,
            (Arm::Left, false) => GestureSymbol::LeftArmSwipeLeft,
        })
    }

    /// Both wrists held above nose height.
    fn detect_arms_raised(&self) -> Option<GestureSymbol> {
        let left = self.history.sample(Joint::LeftWrist, 0)?;
        let right = self.history.sample(Joint::RightWrist, 0)?;
        let nose = self.history.sample(Joint::Nose, 0)?;
        if !self.confident(&left) || !self.confident(&right) || !self.confident(&nose) {
            return None;
        }

        if left.y < nose.y && right.y < nose.y {
            return Some(GestureSymbol::BothArmsRaised);
        }

        None
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
