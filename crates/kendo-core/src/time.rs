//! Time primitives for the KENDO engine
//!
//! The platform supplies a monotonic millisecond tick (a free-running u32
//! counter). All difference math uses wrapping arithmetic, so differences
//! smaller than half the wrap period survive counter rollover.

use std::fmt;

/// Monotonic millisecond tick supplied by the platform timer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tick(pub u32);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn from_millis(millis: u32) -> Self {
        Tick(millis)
    }

    #[inline]
    pub fn as_millis(self) -> u32 {
        self.0
    }

    /// Advance by a number of milliseconds (wrapping).
    #[inline]
    pub fn advance(self, millis: u32) -> Self {
        Tick(self.0.wrapping_add(millis))
    }

    /// Milliseconds elapsed since an earlier tick (wrapping).
    #[inline]
    pub fn millis_since(self, earlier: Tick) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Seconds elapsed since an earlier tick (wrapping).
    #[inline]
    pub fn secs_since(self, earlier: Tick) -> f32 {
        self.millis_since(earlier) as f32 / 1000.0
    }

    /// Whether this tick is at or before a deadline, under wrapping order.
    ///
    /// Valid while the two ticks are less than half the wrap period apart.
    #[inline]
    pub fn at_or_before(self, deadline: Tick) -> bool {
        deadline.0.wrapping_sub(self.0) as i32 >= 0
    }
}

impl fmt::Debug for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_since() {
        let t1 = Tick::from_millis(1000);
        let t2 = t1.advance(250);

        assert_eq!(t2.millis_since(t1), 250);
        assert!((t2.secs_since(t1) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_millis_since_across_wrap() {
        let t1 = Tick(u32::MAX - 10);
        let t2 = t1.advance(30);

        assert_eq!(t2.millis_since(t1), 30);
    }

    #[test]
    fn test_at_or_before() {
        let now = Tick::from_millis(5000);
        let deadline = now.advance(2000);

        assert!(now.at_or_before(deadline));
        assert!(deadline.at_or_before(deadline));
        assert!(!deadline.advance(1).at_or_before(deadline));
    }

    #[test]
    fn test_at_or_before_across_wrap() {
        let now = Tick(u32::MAX - 500);
        let deadline = now.advance(2000); // Wraps past zero

        assert!(now.at_or_before(deadline));
        assert!(!deadline.advance(1).at_or_before(deadline));
    }
}
