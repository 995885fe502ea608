//! Synthetic pose frames for tests and demos

use kendo_core::{Joint, JointEstimate, Point, PoseFrame};

/// Default confidence for rig joints
pub const RIG_CONFIDENCE: f32 = 0.9;

/// Builds pose frames around a plausible standing skeleton.
///
/// Every joint is placed with a confident estimate, so detector confidence
/// gates pass unless a test lowers one deliberately.
#[derive(Clone)]
pub struct PoseRig {
    frame: PoseFrame,
}

impl PoseRig {
    /// A neutral standing pose facing the camera.
    pub fn standing() -> Self {
        let mut frame = PoseFrame::empty();
        let place = |frame: &mut PoseFrame, joint: Joint, x: f32, y: f32| {
            frame.set(joint, JointEstimate::new(x, y, RIG_CONFIDENCE));
        };

        place(&mut frame, Joint::Nose, 0.50, 0.20);
        place(&mut frame, Joint::LeftShoulder, 0.40, 0.35);
        place(&mut frame, Joint::RightShoulder, 0.60, 0.35);
        place(&mut frame, Joint::LeftElbow, 0.35, 0.48);
        place(&mut frame, Joint::RightElbow, 0.65, 0.48);
        place(&mut frame, Joint::LeftWrist, 0.32, 0.60);
        place(&mut frame, Joint::RightWrist, 0.68, 0.60);
        place(&mut frame, Joint::LeftHip, 0.44, 0.62);
        place(&mut frame, Joint::RightHip, 0.56, 0.62);
        place(&mut frame, Joint::LeftKnee, 0.44, 0.78);
        place(&mut frame, Joint::RightKnee, 0.56, 0.78);
        place(&mut frame, Joint::LeftAnkle, 0.44, 0.94);
        place(&mut frame, Joint::RightAnkle, 0.56, 0.94);

        PoseRig { frame }
    }

    /// Move one joint, keeping its confidence.
    pub fn with_joint(mut self, joint: Joint, x: f32, y: f32) -> Self {
        let mut estimate = self.frame.get(joint);
        estimate.x = x;
        estimate.y = y;
        self.frame.set(joint, estimate);
        self
    }

    /// Override one joint's confidence.
    pub fn with_confidence(mut self, joint: Joint, score: f32) -> Self {
        let mut estimate = self.frame.get(joint);
        estimate.score = score;
        self.frame.set(joint, estimate);
        self
    }

    /// The current frame.
    pub fn frame(&self) -> PoseFrame {
        self.frame
    }

    /// Position of one joint.
    pub fn joint(&self, joint: Joint) -> Point {
        self.frame.get(joint).point()
    }
}

impl Default for PoseRig {
    fn default() -> Self {
        Self::standing()
    }
}

/// Scripted linear sweep of one joint: hold at the start position, then
/// travel to the end position over a fixed number of frames.
pub struct MotionScript {
    rig: PoseRig,
    joint: Joint,
    start: Point,
    end: Point,
    hold_frames: usize,
    travel_frames: usize,
}

impl MotionScript {
    pub fn new(rig: PoseRig, joint: Joint) -> Self {
        let start = rig.joint(joint);
        MotionScript {
            rig,
            joint,
            start,
            end: start,
            hold_frames: 0,
            travel_frames: 1,
        }
    }

    /// Starting position for the swept joint
    pub fn with_start(mut self, x: f32, y: f32) -> Self {
        self.start = Point::new(x, y);
        self
    }

    /// Final position for the swept joint
    pub fn with_end(mut self, x: f32, y: f32) -> Self {
        self.end = Point::new(x, y);
        self
    }

    /// Frames to hold at the start before moving
    pub fn with_hold(mut self, frames: usize) -> Self {
        self.hold_frames = frames;
        self
    }

    /// Frames the travel takes
    pub fn with_travel(mut self, frames: usize) -> Self {
        self.travel_frames = frames.max(1);
        self
    }

    /// Build the frame sequence.
    pub fn build(&self) -> Vec<PoseFrame> {
        let total = self.hold_frames + self.travel_frames;
        let mut frames = Vec::with_capacity(total);

        for i in 0..total {
            let pos = if i < self.hold_frames {
                self.start
            } else {
                let t = (i - self.hold_frames + 1) as f32 / self.travel_frames as f32;
                self.start.lerp(&self.end, t)
            };
            frames.push(
                self.rig
                    .clone()
                    .with_joint(self.joint, pos.x, pos.y)
                    .frame(),
            );
        }

        frames
    }
}

/// Overhead-strike script for the right wrist: hold above the nose, then
/// drop fast below the shoulders.
pub fn overhead_strike_script() -> Vec<PoseFrame> {
    MotionScript::new(PoseRig::standing(), Joint::RightWrist)
        .with_start(0.60, 0.10)
        .with_end(0.60, 0.58)
        .with_hold(4)
        .with_travel(8)
        .build()
}

/// Side-slash script for the right wrist: a steady sweep across the body at
/// shoulder height. Per-frame motion stays under the swipe delta threshold,
/// so the accumulated travel is what fires.
pub fn side_slash_script() -> Vec<PoseFrame> {
    MotionScript::new(PoseRig::standing(), Joint::RightWrist)
        .with_start(0.35, 0.35)
        .with_end(0.91, 0.35)
        .with_travel(14)
        .build()
}

/// Swipe script for the left wrist: quick horizontal sweep.
pub fn left_swipe_script() -> Vec<PoseFrame> {
    MotionScript::new(PoseRig::standing(), Joint::LeftWrist)
        .with_start(0.20, 0.55)
        .with_end(0.68, 0.55)
        .with_travel(8)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_rig_is_confident() {
        let frame = PoseRig::standing().frame();
        for &joint in Joint::all() {
            assert!(frame.get(joint).score >= RIG_CONFIDENCE);
        }
    }

    #[test]
    fn test_script_holds_then_travels() {
        let frames = MotionScript::new(PoseRig::standing(), Joint::RightWrist)
            .with_start(0.6, 0.1)
            .with_end(0.6, 0.5)
            .with_hold(3)
            .with_travel(4)
            .build();

        assert_eq!(frames.len(), 7);
        for frame in &frames[..3] {
            assert!((frame.get(Joint::RightWrist).y - 0.1).abs() < 1e-6);
        }
        // Travel ends exactly at the end position
        let last = frames.last().unwrap().get(Joint::RightWrist);
        assert!((last.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_script_leaves_other_joints_alone() {
        let rig = PoseRig::standing();
        let nose = rig.joint(Joint::Nose);
        let frames = overhead_strike_script();

        for frame in &frames {
            assert_eq!(frame.get(Joint::Nose).point(), nose);
        }
    }
}
