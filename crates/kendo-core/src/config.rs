//! Tunable configuration for the classifier and the game engine
//!
//! Every named constant the engine depends on lives here as an overridable
//! field with the production default. `validate()` catches mistakes up front;
//! the runtime itself never checks configuration again.

use crate::error::{ConfigError, ConfigResult};

/// Reference the overhead strike compares the wrist's starting height against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrikeReference {
    /// Wrist must have started above the nose (canonical)
    NoseRelative,
    /// Wrist must have started above a fixed normalized height
    FixedHeight(f32),
}

/// Gesture classifier configuration
#[derive(Clone, Debug)]
pub struct GestureConfig {
    /// Minimum joint confidence for a sample to count (0.0 - 1.0)
    pub min_confidence: f32,
    /// Minimum travel for a swipe (normalized)
    pub min_swipe_distance: f32,
    /// Minimum wrist speed for a swipe (normalized units/sec)
    pub min_swipe_speed: f32,
    /// Maximum frames a swipe may span
    pub max_swipe_frames: u8,
    /// Horizontal wrist delta that triggers a swipe (normalized)
    pub swipe_delta_threshold: f32,
    /// Frames back over which the swipe delta is measured
    pub swipe_delta_frames: usize,
    /// Frames back over which swipe speed is measured
    pub swipe_speed_frames: usize,
    /// Require at least this wrist-to-shoulder extension for swipes
    pub swipe_extension_gate: Option<f32>,
    /// Frames back the overhead strike inspects for its starting position
    pub strike_lookback: usize,
    /// Vertical drop the wrist must cover for an overhead strike (normalized)
    pub strike_drop: f32,
    /// Frames back over which strike speed is measured
    pub strike_speed_frames: usize,
    /// Strike speed requirement as a multiple of `min_swipe_speed`
    pub strike_speed_factor: f32,
    /// Starting-height reference for the overhead strike
    pub strike_reference: StrikeReference,
    /// Frames back the side slash inspects for horizontal travel
    pub slash_lookback: usize,
    /// Horizontal travel the slash must cover (normalized)
    pub slash_min_travel: f32,
    /// Wrist-to-shoulder extension the slash requires (normalized)
    pub slash_min_extension: f32,
    /// Frames back over which slash speed is measured
    pub slash_speed_frames: usize,
    /// Minimum time between two accepted gestures
    pub cooldown_ms: u32,
    /// How long a detected gesture stays latched for display
    pub display_hold_ms: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            min_confidence: 0.5,
            min_swipe_distance: 0.3,
            min_swipe_speed: 0.05,
            max_swipe_frames: 8,
            swipe_delta_threshold: 0.05,
            swipe_delta_frames: 1,
            swipe_speed_frames: 3,
            swipe_extension_gate: None,
            strike_lookback: 12,
            strike_drop: 0.25,
            strike_speed_frames: 5,
            strike_speed_factor: 1.5,
            strike_reference: StrikeReference::NoseRelative,
            slash_lookback: 12,
            slash_min_travel: 0.2,
            slash_min_extension: 0.25,
            slash_speed_frames: 3,
            cooldown_ms: 1000,
            display_hold_ms: 2000,
        }
    }
}

impl GestureConfig {
    /// Strict variant: swipes additionally require an extended arm.
    pub fn strict() -> Self {
        GestureConfig {
            swipe_extension_gate: Some(0.2),
            ..GestureConfig::default()
        }
    }

    /// Check every field against its legal range.
    pub fn validate(&self) -> ConfigResult<()> {
        check_unit("min_confidence", self.min_confidence)?;
        check_unit("min_swipe_distance", self.min_swipe_distance)?;
        check_positive("min_swipe_speed", self.min_swipe_speed)?;
        check_positive("swipe_delta_threshold", self.swipe_delta_threshold)?;
        check_positive("strike_drop", self.strike_drop)?;
        check_positive("strike_speed_factor", self.strike_speed_factor)?;
        check_positive("slash_min_travel", self.slash_min_travel)?;
        check_positive("slash_min_extension", self.slash_min_extension)?;
        if let Some(gate) = self.swipe_extension_gate {
            check_positive("swipe_extension_gate", gate)?;
        }
        if let StrikeReference::FixedHeight(h) = self.strike_reference {
            check_unit("strike_reference height", h)?;
        }
        for (name, window) in [
            ("swipe_delta_frames", self.swipe_delta_frames),
            ("swipe_speed_frames", self.swipe_speed_frames),
            ("strike_lookback", self.strike_lookback),
            ("strike_speed_frames", self.strike_speed_frames),
            ("slash_lookback", self.slash_lookback),
            ("slash_speed_frames", self.slash_speed_frames),
        ] {
            if window == 0 {
                return Err(ConfigError::ZeroWindow(name));
            }
        }
        if self.cooldown_ms == 0 {
            return Err(ConfigError::ZeroWindow("cooldown_ms"));
        }
        if self.display_hold_ms == 0 {
            return Err(ConfigError::ZeroWindow("display_hold_ms"));
        }
        Ok(())
    }
}

/// Game engine configuration
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Base interval between fruit spawns
    pub spawn_interval_ms: u32,
    /// Base fall speed (normalized units/sec)
    pub fall_speed: f32,
    /// Fruit radius (normalized; 15 px on the 800 px reference display)
    pub fruit_radius: f32,
    /// Missed fruits that end the game
    pub max_missed: u32,
    /// How long a sliced fruit animates before its slot is freed
    pub slice_animation_ms: u32,
    /// Playtime per difficulty level
    pub level_up_ms: u32,
    /// Spawn-rate multiplier gained per level
    pub spawn_rate_step: f32,
    /// Spawn x range (normalized)
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    /// Spawn height (normalized)
    pub spawn_y: f32,
    /// Maximum horizontal drift magnitude (normalized units/sec)
    pub drift_max: f32,
    /// Maximum random addition to the fall speed (normalized units/sec)
    pub fall_jitter_max: f32,
    /// A fruit falling past this height is missed (normalized)
    pub miss_line: f32,
    /// Upper clamp on the measured per-frame dt
    pub max_frame_dt_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            spawn_interval_ms: 2000,
            fall_speed: 0.15,
            fruit_radius: 0.01875,
            max_missed: 5,
            slice_animation_ms: 500,
            level_up_ms: 30_000,
            spawn_rate_step: 0.3,
            spawn_x_min: 0.25,
            spawn_x_max: 0.75,
            spawn_y: 0.06,
            drift_max: 0.005,
            fall_jitter_max: 0.05,
            miss_line: 0.95,
            max_frame_dt_ms: 100,
        }
    }
}

impl GameConfig {
    /// Check every field against its legal range.
    pub fn validate(&self) -> ConfigResult<()> {
        check_positive("fall_speed", self.fall_speed)?;
        check_positive("fruit_radius", self.fruit_radius)?;
        check_positive("spawn_rate_step", self.spawn_rate_step)?;
        check_unit("spawn_y", self.spawn_y)?;
        check_unit("miss_line", self.miss_line)?;
        if self.spawn_x_min > self.spawn_x_max {
            return Err(ConfigError::InvertedRange {
                field: "spawn_x",
                low: self.spawn_x_min,
                high: self.spawn_x_max,
            });
        }
        check_unit("spawn_x_min", self.spawn_x_min)?;
        check_unit("spawn_x_max", self.spawn_x_max)?;
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroWindow("spawn_interval_ms"));
        }
        if self.max_missed == 0 {
            return Err(ConfigError::ZeroWindow("max_missed"));
        }
        if self.max_frame_dt_ms == 0 {
            return Err(ConfigError::ZeroWindow("max_frame_dt_ms"));
        }
        Ok(())
    }
}

fn check_unit(field: &'static str, value: f32) -> ConfigResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value <= 0.0 || !value.is_finite() {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min: f32::EPSILON,
            max: f32::INFINITY,
        });
    }
    Ok(())
}
