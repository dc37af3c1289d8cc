//! Hand gesture model and classification.
//!
//! A detected hand arrives as 21 normalised landmarks; the classifier reduces
//! one frame to a [`Gesture`] that selects the particle target shape.

/// Heuristic finger-extension classifier.
pub mod classifier;

/// Landmark indices, landmark sets and hand observations.
pub mod landmarks;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use classifier::classify;
pub use landmarks::{HandObservation, LandmarkSet};

/// Discrete hand pose driving the active target shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gesture {
    #[default]
    Idle,
    RockOn,
    Peace,
    ThumbsUp,
    Fist,
}

impl Gesture {
    pub const ALL: [Gesture; 5] = [
        Self::Idle,
        Self::RockOn,
        Self::Peace,
        Self::ThumbsUp,
        Self::Fist,
    ];

    /// Wire identifier shared with the frontend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::RockOn => "ROCK_ON",
            Self::Peace => "PEACE",
            Self::ThumbsUp => "THUMBS_UP",
            Self::Fist => "FIST",
        }
    }

    /// Human readable label for overlays.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::RockOn => "Rock On",
            Self::Peace => "Peace",
            Self::ThumbsUp => "Thumbs Up",
            Self::Fist => "Fist",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
