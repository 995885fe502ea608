//! Fruit entities - fixed slots reused via state transitions
//!
//! A fruit slot is never allocated or freed; its lifecycle is
//! Inactive -> Falling -> {Sliced | Missed} -> Inactive.

use kendo_core::{FruitKind, Point, Tick};

/// Fixed capacity of the fruit slot array
pub const MAX_FRUITS: usize = 8;

/// Visual/lifecycle state of one fruit slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FruitState {
    Falling,
    Sliced,
    Missed,
    #[default]
    Inactive,
}

/// Which way a slicing trajectory travelled when it hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SliceDirection {
    #[default]
    Leftward,
    Rightward,
}

/// One fruit slot. Owned exclusively by the engine.
#[derive(Debug, Clone, Copy)]
pub struct Fruit {
    /// Center position (normalized)
    pub pos: Point,
    /// Velocity (normalized units/sec); x is drift, y is fall
    pub vel: Point,
    pub kind: FruitKind,
    pub state: FruitState,
    pub spawn_time: Tick,
    pub slice_time: Tick,
    pub slice_direction: SliceDirection,
}

impl Fruit {
    /// An unclaimed slot
    pub fn inactive() -> Self {
        Fruit {
            pos: Point::zero(),
            vel: Point::zero(),
            kind: FruitKind::Apple,
            state: FruitState::Inactive,
            spawn_time: Tick::ZERO,
            slice_time: Tick::ZERO,
            slice_direction: SliceDirection::default(),
        }
    }

    /// Whether the slot holds a live fruit (anything but Inactive)
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state != FruitState::Inactive
    }

    /// Slice animation progress in [0, 1]. Zero unless Sliced.
    pub fn slice_progress(&self, now: Tick, animation_ms: u32) -> f32 {
        if self.state != FruitState::Sliced || animation_ms == 0 {
            return 0.0;
        }
        let elapsed = now.millis_since(self.slice_time);
        (elapsed as f32 / animation_ms as f32).clamp(0.0, 1.0)
    }
}

impl Default for Fruit {
    fn default() -> Self {
        Self::inactive()
    }
}
