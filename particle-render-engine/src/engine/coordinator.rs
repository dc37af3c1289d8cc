//! Engine coordinator: the gesture state machine.
//!
//! [`EngineState`] is the single writer of the current gesture, the target
//! buffer and the palm offset. Landmark-stream events go through
//! [`EngineState::observe`]; the render tick only reads the published state.

use bevy::prelude::*;
use std::sync::Arc;

use crate::engine::config::{PalmLossPolicy, PalmParams};
use crate::engine::error::EngineError;
use crate::engine::gesture::{Gesture, HandObservation, LandmarkSet, classify};
use crate::engine::shapes::ShapeGenerator;

#[derive(Resource, Debug, Clone)]
pub struct EngineState {
    current_gesture: Gesture,
    /// Replaced wholesale on transitions, never patched in place.
    targets: Arc<[Vec3]>,
    palm_offset: Vec2,
    palm_scale: Vec2,
    palm_loss_policy: PalmLossPolicy,
    particle_count: usize,
    regenerations: u64,
}

impl EngineState {
    /// Start a session in the idle state with a freshly scattered target.
    pub fn new(particle_count: usize, palm: &PalmParams, generator: &mut ShapeGenerator) -> Self {
        Self {
            current_gesture: Gesture::Idle,
            targets: idle_targets(generator, particle_count).into(),
            palm_offset: Vec2::ZERO,
            palm_scale: palm.scale(),
            palm_loss_policy: palm.loss_policy,
            particle_count,
            regenerations: 0,
        }
    }

    /// Apply one landmark-stream event.
    ///
    /// Returns the new gesture when the classification changed, `None` when it
    /// did not. A malformed frame is rejected before any state is touched.
    pub fn observe(
        &mut self,
        observation: &HandObservation,
        generator: &mut ShapeGenerator,
    ) -> Result<Option<Gesture>, EngineError> {
        let gesture = match observation {
            HandObservation::Hand { landmarks, .. } => {
                let landmarks = LandmarkSet::from_points(landmarks)?;
                self.palm_offset = landmarks.palm_offset(self.palm_scale);
                classify(Some(&landmarks))
            }
            HandObservation::NoHand => {
                if self.palm_loss_policy == PalmLossPolicy::Reset {
                    self.palm_offset = Vec2::ZERO;
                }
                classify(None)
            }
        };

        Ok(self.transition_to(gesture, generator))
    }

    fn transition_to(&mut self, gesture: Gesture, generator: &mut ShapeGenerator) -> Option<Gesture> {
        if gesture == self.current_gesture {
            return None;
        }

        let targets = match generator.generate(gesture, self.particle_count) {
            Ok(points) => points,
            Err(err) => {
                warn!("Shape for {gesture} unavailable ({err}), falling back to idle scatter");
                idle_targets(generator, self.particle_count)
            }
        };

        info!("Gesture {} -> {}", self.current_gesture, gesture);
        self.current_gesture = gesture;
        self.targets = targets.into();
        self.regenerations += 1;
        Some(gesture)
    }

    pub fn current_gesture(&self) -> Gesture {
        self.current_gesture
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    /// Shared handle to the published target buffer.
    pub fn target_buffer(&self) -> Arc<[Vec3]> {
        Arc::clone(&self.targets)
    }

    pub fn palm_offset(&self) -> Vec2 {
        self.palm_offset
    }

    pub fn palm_loss_policy(&self) -> PalmLossPolicy {
        self.palm_loss_policy
    }

    pub fn set_palm_loss_policy(&mut self, policy: PalmLossPolicy) {
        if policy != self.palm_loss_policy {
            info!("Palm loss policy: {}", policy.as_str());
        }
        self.palm_loss_policy = policy;
    }

    /// Number of target buffers generated by gesture transitions.
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }
}

fn idle_targets(generator: &mut ShapeGenerator, n: usize) -> Vec<Vec3> {
    // The idle scatter draws from the RNG only and cannot fail.
    generator
        .generate(Gesture::Idle, n)
        .unwrap_or_else(|_| vec![Vec3::ZERO; n])
}
