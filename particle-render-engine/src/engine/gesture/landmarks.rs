use bevy::math::{Vec2, Vec3};
use constants::hand::{HAND_LANDMARK_COUNT, PALM_CENTER_LANDMARK};

use crate::engine::error::EngineError;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// (tip, pip) pairs for index, middle, ring and pinky, in that order.
pub const FINGER_JOINTS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// One detected hand: 21 normalised points (x, y in image space, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    points: [Vec3; HAND_LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Validate a raw detector frame. Short frames are rejected; points past
    /// the 21st are ignored.
    pub fn from_points(points: &[Vec3]) -> Result<Self, EngineError> {
        if points.len() < HAND_LANDMARK_COUNT {
            return Err(EngineError::MalformedLandmarks {
                expected: HAND_LANDMARK_COUNT,
                found: points.len(),
            });
        }

        let mut landmarks = [Vec3::ZERO; HAND_LANDMARK_COUNT];
        landmarks.copy_from_slice(&points[..HAND_LANDMARK_COUNT]);
        Ok(Self { points: landmarks })
    }

    /// Landmark by anatomical index (see the constants above).
    pub fn get(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn palm_center(&self) -> Vec3 {
        self.points[PALM_CENTER_LANDMARK]
    }

    /// World-space translation that keeps the target shape under the palm.
    /// The image is mirrored horizontally and its y axis flipped to point up.
    pub fn palm_offset(&self, scale: Vec2) -> Vec2 {
        let palm = self.palm_center();
        Vec2::new((0.5 - palm.x) * scale.x, (0.5 - palm.y) * scale.y)
    }
}

/// One message from the landmark stream.
#[derive(Debug, Clone, PartialEq)]
pub enum HandObservation {
    /// Raw landmark frame, not yet validated. Handedness is carried but unused.
    Hand {
        landmarks: Vec<Vec3>,
        handedness: Option<String>,
    },
    NoHand,
}

impl HandObservation {
    pub fn hand(landmarks: Vec<Vec3>) -> Self {
        Self::Hand {
            landmarks,
            handedness: None,
        }
    }
}

// ============================================================================
// SYNTHETIC POSES
// ============================================================================

/// Which fingers a synthetic pose holds extended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoseSpec {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
    pub thumb_raised: bool,
}

impl PoseSpec {
    pub const FIST: Self = Self {
        index: false,
        middle: false,
        ring: false,
        pinky: false,
        thumb_raised: false,
    };
    pub const ROCK_ON: Self = Self {
        index: true,
        pinky: true,
        ..Self::FIST
    };
    pub const PEACE: Self = Self {
        index: true,
        middle: true,
        ..Self::FIST
    };
    pub const THUMBS_UP: Self = Self {
        thumb_raised: true,
        ..Self::FIST
    };
    pub const OPEN_PALM: Self = Self {
        index: true,
        middle: true,
        ring: true,
        pinky: true,
        thumb_raised: false,
    };
}

/// Build a plausible 21-point hand with its palm centre at `palm` (normalised
/// image coordinates). Used by the native keyboard source in place of a
/// camera detector.
pub fn synthetic_pose(spec: PoseSpec, palm: Vec2) -> Vec<Vec3> {
    let mut points = vec![Vec3::ZERO; HAND_LANDMARK_COUNT];
    let at = |dx: f32, dy: f32| Vec3::new(palm.x + dx, palm.y + dy, 0.0);

    points[WRIST] = at(0.0, 0.2);

    points[THUMB_CMC] = at(-0.08, 0.14);
    points[THUMB_MCP] = at(-0.11, 0.08);
    points[THUMB_IP] = at(-0.13, 0.03);
    points[THUMB_TIP] = if spec.thumb_raised {
        at(-0.13, -0.14)
    } else {
        at(-0.09, 0.04)
    };

    let fingers = [
        (INDEX_MCP, spec.index, -0.04),
        (MIDDLE_MCP, spec.middle, 0.0),
        (RING_MCP, spec.ring, 0.04),
        (PINKY_MCP, spec.pinky, 0.075),
    ];
    for (mcp, open, dx) in fingers {
        let mcp_dy = if mcp == MIDDLE_MCP { 0.0 } else { 0.01 };
        points[mcp] = at(dx, mcp_dy);
        points[mcp + 1] = at(dx, mcp_dy - 0.05);
        if open {
            points[mcp + 2] = at(dx, mcp_dy - 0.09);
            points[mcp + 3] = at(dx, mcp_dy - 0.12);
        } else {
            // Curled: tip folds back below the PIP joint.
            points[mcp + 2] = at(dx, mcp_dy - 0.02);
            points[mcp + 3] = at(dx, mcp_dy + 0.01);
        }
    }

    points
}
