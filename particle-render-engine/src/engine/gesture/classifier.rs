use constants::hand::THUMB_RAISE_MARGIN;

use super::Gesture;
use super::landmarks::{FINGER_JOINTS, LandmarkSet, THUMB_IP, THUMB_TIP};

/// Extension state of the four non-thumb fingers.
///
/// A finger counts as open when its tip sits higher on screen (smaller y) than
/// its PIP joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerStates {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Self {
        let [index, middle, ring, pinky] =
            FINGER_JOINTS.map(|(tip, pip)| landmarks.get(tip).y < landmarks.get(pip).y);
        Self {
            index,
            middle,
            ring,
            pinky,
        }
    }

    pub fn open_count(&self) -> usize {
        [self.index, self.middle, self.ring, self.pinky]
            .into_iter()
            .filter(|open| *open)
            .count()
    }
}

/// Thumb tip above the IP joint by more than `margin`.
pub fn thumb_raised(landmarks: &LandmarkSet, margin: f32) -> bool {
    landmarks.get(THUMB_TIP).y < landmarks.get(THUMB_IP).y - margin
}

/// Reduce one detector frame to a gesture. `None` means no hand was seen.
///
/// Rules are checked in a fixed order and the first match wins: rock-on,
/// peace, thumbs-up, fist, otherwise idle.
pub fn classify(landmarks: Option<&LandmarkSet>) -> Gesture {
    let Some(landmarks) = landmarks else {
        return Gesture::Idle;
    };

    let fingers = FingerStates::from_landmarks(landmarks);
    let all_closed = fingers.open_count() == 0;

    if fingers.index && fingers.pinky && !fingers.middle && !fingers.ring {
        return Gesture::RockOn;
    }
    if fingers.index && fingers.middle && !fingers.ring && !fingers.pinky {
        return Gesture::Peace;
    }
    if all_closed && thumb_raised(landmarks, THUMB_RAISE_MARGIN) {
        return Gesture::ThumbsUp;
    }
    if all_closed {
        return Gesture::Fist;
    }

    Gesture::Idle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::gesture::landmarks::{PoseSpec, THUMB_IP, THUMB_TIP, synthetic_pose};
    use bevy::math::{Vec2, Vec3};

    fn landmark_set(spec: PoseSpec) -> LandmarkSet {
        LandmarkSet::from_points(&synthetic_pose(spec, Vec2::splat(0.5))).unwrap()
    }

    #[test]
    fn test_no_hand_is_idle() {
        assert_eq!(classify(None), Gesture::Idle);
    }

    #[test]
    fn test_canned_poses() {
        assert_eq!(classify(Some(&landmark_set(PoseSpec::ROCK_ON))), Gesture::RockOn);
        assert_eq!(classify(Some(&landmark_set(PoseSpec::PEACE))), Gesture::Peace);
        assert_eq!(
            classify(Some(&landmark_set(PoseSpec::THUMBS_UP))),
            Gesture::ThumbsUp
        );
        assert_eq!(classify(Some(&landmark_set(PoseSpec::FIST))), Gesture::Fist);
        assert_eq!(
            classify(Some(&landmark_set(PoseSpec::OPEN_PALM))),
            Gesture::Idle
        );
    }

    #[test]
    fn test_rock_on_ignores_thumb() {
        for thumb_raised in [false, true] {
            let spec = PoseSpec {
                thumb_raised,
                ..PoseSpec::ROCK_ON
            };
            assert_eq!(classify(Some(&landmark_set(spec))), Gesture::RockOn);
        }
    }

    #[test]
    fn test_all_closed_without_raised_thumb_is_fist() {
        // Thumb tip just inside the margin: still a fist.
        let mut points = synthetic_pose(PoseSpec::FIST, Vec2::splat(0.5));
        let ip = points[THUMB_IP];
        points[THUMB_TIP] = Vec3::new(ip.x, ip.y - 0.09, ip.z);
        let set = LandmarkSet::from_points(&points).unwrap();
        assert!(!thumb_raised(&set, THUMB_RAISE_MARGIN));
        assert_eq!(classify(Some(&set)), Gesture::Fist);
    }

    #[test]
    fn test_raised_thumb_with_open_finger_is_not_thumbs_up() {
        let spec = PoseSpec {
            ring: true,
            thumb_raised: true,
            ..PoseSpec::FIST
        };
        assert_eq!(classify(Some(&landmark_set(spec))), Gesture::Idle);
    }

    #[test]
    fn test_exhaustive_finger_combinations() {
        for bits in 0u8..16 {
            let spec = PoseSpec {
                index: bits & 1 != 0,
                middle: bits & 2 != 0,
                ring: bits & 4 != 0,
                pinky: bits & 8 != 0,
                thumb_raised: false,
            };
            let set = landmark_set(spec);
            let fingers = FingerStates::from_landmarks(&set);
            assert_eq!(fingers.index, spec.index);
            assert_eq!(fingers.pinky, spec.pinky);

            let expected = match (spec.index, spec.middle, spec.ring, spec.pinky) {
                (true, false, false, true) => Gesture::RockOn,
                (true, true, false, false) => Gesture::Peace,
                (false, false, false, false) => Gesture::Fist,
                _ => Gesture::Idle,
            };
            assert_eq!(classify(Some(&set)), expected, "fingers {bits:04b}");
        }
    }
}
