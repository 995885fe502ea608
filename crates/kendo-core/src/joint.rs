//! Body joints and per-frame pose input
//!
//! The external pose model reports one estimate per tracked joint per
//! inference frame, in normalized [0,1] screen coordinates. The classifier
//! only reads the nose, shoulders, elbows, and wrists; the remaining joints
//! are carried so the input boundary matches the model's full output.

/// Joint identifier for the tracked body skeleton, in pose-model order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    /// Number of tracked joints
    pub const COUNT: usize = 13;

    /// All joints in model order
    pub fn all() -> &'static [Joint] {
        &[
            Joint::Nose,
            Joint::LeftShoulder,
            Joint::RightShoulder,
            Joint::LeftElbow,
            Joint::RightElbow,
            Joint::LeftWrist,
            Joint::RightWrist,
            Joint::LeftHip,
            Joint::RightHip,
            Joint::LeftKnee,
            Joint::RightKnee,
            Joint::LeftAnkle,
            Joint::RightAnkle,
        ]
    }

    /// Joint for a raw model output index
    pub fn from_index(index: usize) -> Option<Joint> {
        Joint::all().get(index).copied()
    }
}

/// Arm selector for the paired arm joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arm {
    Left,
    Right,
}

impl Arm {
    #[inline]
    pub fn wrist(self) -> Joint {
        match self {
            Arm::Left => Joint::LeftWrist,
            Arm::Right => Joint::RightWrist,
        }
    }

    #[inline]
    pub fn elbow(self) -> Joint {
        match self {
            Arm::Left => Joint::LeftElbow,
            Arm::Right => Joint::RightElbow,
        }
    }

    #[inline]
    pub fn shoulder(self) -> Joint {
        match self {
            Arm::Left => Joint::LeftShoulder,
            Arm::Right => Joint::RightShoulder,
        }
    }
}

/// 2D position (normalized coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Offset by a delta vector
    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Linear interpolation
    pub fn lerp(&self, other: &Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Squared distance to another point
    pub fn distance_sq(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// One per-joint estimate produced by the pose model for a single frame.
///
/// `x`, `y` are normalized centers; `score` is the model's confidence in [0,1].
#[derive(Debug, Clone, Copy, Default)]
pub struct JointEstimate {
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

impl JointEstimate {
    pub fn new(x: f32, y: f32, score: f32) -> Self {
        Self { x, y, score }
    }

    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Current wrist positions for both arms - the raw position half of the
/// classifier-to-engine boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wrists {
    pub left: Point,
    pub right: Point,
}

impl Wrists {
    pub fn new(left: Point, right: Point) -> Self {
        Self { left, right }
    }

    #[inline]
    pub fn get(&self, arm: Arm) -> Point {
        match arm {
            Arm::Left => self.left,
            Arm::Right => self.right,
        }
    }
}

/// A full frame of joint estimates - the input boundary from the pose source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseFrame {
    joints: [JointEstimate; Joint::COUNT],
}

impl PoseFrame {
    /// Frame with all joints at the origin with zero confidence
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from the model's raw output array
    pub fn from_estimates(joints: [JointEstimate; Joint::COUNT]) -> Self {
        Self { joints }
    }

    #[inline]
    pub fn get(&self, joint: Joint) -> JointEstimate {
        self.joints[joint as usize]
    }

    #[inline]
    pub fn set(&mut self, joint: Joint, estimate: JointEstimate) {
        self.joints[joint as usize] = estimate;
    }

    /// Current wrist position for an arm
    #[inline]
    pub fn wrist(&self, arm: Arm) -> Point {
        self.get(arm.wrist()).point()
    }

    /// Both wrist positions
    pub fn wrists(&self) -> Wrists {
        Wrists::new(self.wrist(Arm::Left), self.wrist(Arm::Right))
    }
}
