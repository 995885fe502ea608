//! Gesture symbols and fruit kinds
//!
//! Closed enums with exhaustive match tables for display names and scoring,
//! so adding a variant is a compile error until every table is updated.

use crate::joint::Arm;

/// Discrete classification result derived from recent joint motion.
///
/// `None` is an ordinary symbol: it is what the classifier produces on the
/// overwhelming majority of frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureSymbol {
    #[default]
    None,
    RightArmSwipeLeft,
    RightArmSwipeRight,
    LeftArmSwipeLeft,
    LeftArmSwipeRight,
    BothArmsRaised,
    SwordOverheadStrike,
    SwordSideSlash,
}

impl GestureSymbol {
    /// Display name for on-screen gesture feedback
    pub fn name(self) -> &'static str {
        match self {
            GestureSymbol::None => "No Gesture",
            GestureSymbol::RightArmSwipeLeft => "Right Arm Swipe Left",
            GestureSymbol::RightArmSwipeRight => "Right Arm Swipe Right",
            GestureSymbol::LeftArmSwipeLeft => "Left Arm Swipe Left",
            GestureSymbol::LeftArmSwipeRight => "Left Arm Swipe Right",
            GestureSymbol::BothArmsRaised => "Both Arms Raised",
            GestureSymbol::SwordOverheadStrike => "Sword Overhead Strike",
            GestureSymbol::SwordSideSlash => "Sword Side Slash",
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == GestureSymbol::None
    }

    /// Whether this symbol drives a slice in the game.
    ///
    /// The six swipe/strike symbols are actionable; `BothArmsRaised` is a
    /// control gesture and `None` is the absence of one.
    pub fn is_actionable(self) -> bool {
        matches!(
            self,
            GestureSymbol::RightArmSwipeLeft
                | GestureSymbol::RightArmSwipeRight
                | GestureSymbol::LeftArmSwipeLeft
                | GestureSymbol::LeftArmSwipeRight
                | GestureSymbol::SwordOverheadStrike
                | GestureSymbol::SwordSideSlash
        )
    }

    /// Which arm's wrist anchors the slice trajectory for this symbol.
    ///
    /// `None` for symbols that do not slice.
    pub fn slicing_arm(self) -> Option<Arm> {
        match self {
            GestureSymbol::LeftArmSwipeLeft | GestureSymbol::LeftArmSwipeRight => Some(Arm::Left),
            GestureSymbol::RightArmSwipeLeft
            | GestureSymbol::RightArmSwipeRight
            | GestureSymbol::SwordOverheadStrike
            | GestureSymbol::SwordSideSlash => Some(Arm::Right),
            GestureSymbol::None | GestureSymbol::BothArmsRaised => None,
        }
    }
}

/// Kind of fruit spawned by the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FruitKind {
    Apple,
    Orange,
    Banana,
    Strawberry,
}

impl FruitKind {
    /// Number of fruit kinds
    pub const COUNT: usize = 4;

    /// All kinds, in spawn-table order
    pub fn all() -> &'static [FruitKind] {
        &[
            FruitKind::Apple,
            FruitKind::Orange,
            FruitKind::Banana,
            FruitKind::Strawberry,
        ]
    }

    /// Kind for a spawn-table index
    pub fn from_index(index: usize) -> Option<FruitKind> {
        FruitKind::all().get(index).copied()
    }

    /// Score awarded at level 1 for slicing this fruit
    pub fn base_score(self) -> u32 {
        match self {
            FruitKind::Apple => 10,
            FruitKind::Orange => 15,
            FruitKind::Banana => 20,
            FruitKind::Strawberry => 25,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            FruitKind::Apple => "Apple",
            FruitKind::Orange => "Orange",
            FruitKind::Banana => "Banana",
            FruitKind::Strawberry => "Berry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actionable_symbols() {
        assert!(!GestureSymbol::None.is_actionable());
        assert!(!GestureSymbol::BothArmsRaised.is_actionable());
        assert!(GestureSymbol::SwordOverheadStrike.is_actionable());
        assert!(GestureSymbol::LeftArmSwipeRight.is_actionable());
    }

    #[test]
    fn test_slicing_arm() {
        assert_eq!(GestureSymbol::LeftArmSwipeLeft.slicing_arm(), Some(Arm::Left));
        assert_eq!(
            GestureSymbol::SwordSideSlash.slicing_arm(),
            Some(Arm::Right)
        );
        assert_eq!(GestureSymbol::None.slicing_arm(), None);
    }

    #[test]
    fn test_gesture_names() {
        assert_eq!(GestureSymbol::None.name(), "No Gesture");
        assert_eq!(
            GestureSymbol::SwordOverheadStrike.name(),
            "Sword Overhead Strike"
        );
    }

    #[test]
    fn test_base_scores() {
        assert_eq!(FruitKind::Apple.base_score(), 10);
        assert_eq!(FruitKind::Orange.base_score(), 15);
        assert_eq!(FruitKind::Banana.base_score(), 20);
        assert_eq!(FruitKind::Strawberry.base_score(), 25);
    }

    #[test]
    fn test_fruit_index_roundtrip() {
        for (i, &kind) in FruitKind::all().iter().enumerate() {
            assert_eq!(FruitKind::from_index(i), Some(kind));
        }
        assert_eq!(FruitKind::from_index(FruitKind::COUNT), None);
    }
}
