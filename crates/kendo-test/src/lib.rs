//! KENDO Test - Scripted motion and end-to-end harnessing
//!
//! Tools for driving the classifier and the game engine with synthetic pose
//! feeds:
//! - PoseRig: frames with a plausible standing skeleton
//! - MotionScript: linear joint trajectories over a frame sequence
//! - ArcadeHarness: classifier + engine wired the way the embedding runs them

pub mod harness;
pub mod rig;

pub use harness::*;
pub use rig::*;
