use bevy::prelude::*;

use crate::engine::gesture::HandObservation;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::{config::PalmLossPolicy, coordinator::EngineState, gesture::landmarks::{PoseSpec, synthetic_pose}};
#[cfg(not(target_arch = "wasm32"))]
use bevy::window::PrimaryWindow;
#[cfg(not(target_arch = "wasm32"))]
use constants::hand::SYNTHETIC_FRAME_INTERVAL;

/// One frame of the landmark stream, from the RPC bridge or the keyboard source.
#[derive(Event, Debug, Clone)]
pub struct HandObservationEvent(pub HandObservation);

/// Pose currently held by the native keyboard source. `None` means no hand.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Resource, Default)]
pub struct KeyboardHandSource {
    pose: Option<PoseSpec>,
    since_last_frame: f32,
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyboardHandSource {
    pub fn select_pose(&mut self, keyboard: &ButtonInput<KeyCode>) {
        let pressed = [
            (KeyCode::Digit1, Some(PoseSpec::ROCK_ON)),
            (KeyCode::Digit2, Some(PoseSpec::PEACE)),
            (KeyCode::Digit3, Some(PoseSpec::THUMBS_UP)),
            (KeyCode::Digit4, Some(PoseSpec::FIST)),
            (KeyCode::Digit5, Some(PoseSpec::OPEN_PALM)),
            (KeyCode::Digit0, None),
        ];

        for (key, pose) in pressed {
            if keyboard.just_pressed(key) {
                self.pose = pose;
            }
        }
    }

    /// Synthesise a frame when the detector interval has elapsed.
    pub fn tick(&mut self, delta: f32, palm: Vec2) -> Option<HandObservation> {
        self.since_last_frame += delta;
        if self.since_last_frame < SYNTHETIC_FRAME_INTERVAL {
            return None;
        }
        self.since_last_frame = 0.0;

        Some(match self.pose {
            Some(pose) => HandObservation::hand(synthetic_pose(pose, palm)),
            None => HandObservation::NoHand,
        })
    }
}

/// Native stand-in for the camera detector: number keys pick a pose, the
/// cursor places the palm.
#[cfg(not(target_arch = "wasm32"))]
pub fn keyboard_hand_source(
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    mut source: ResMut<KeyboardHandSource>,
    mut observations: EventWriter<HandObservationEvent>,
) {
    source.select_pose(&keyboard);

    let palm = windows
        .single()
        .ok()
        .and_then(|window| cursor_to_palm(window.cursor_position(), window.size()))
        .unwrap_or(Vec2::splat(0.5));

    if let Some(observation) = source.tick(time.delta_secs(), palm) {
        observations.write(HandObservationEvent(observation));
    }
}

/// Map a cursor position to normalised image coordinates. The x axis is
/// flipped because detector frames are mirrored relative to the screen.
#[cfg(not(target_arch = "wasm32"))]
pub fn cursor_to_palm(cursor: Option<Vec2>, window_size: Vec2) -> Option<Vec2> {
    let cursor = cursor?;
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        1.0 - cursor.x / window_size.x,
        cursor.y / window_size.y,
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn palm_policy_shortcuts(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<EngineState>) {
    if keyboard.just_pressed(KeyCode::KeyH) {
        state.set_palm_loss_policy(PalmLossPolicy::Hold);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        state.set_palm_loss_policy(PalmLossPolicy::Reset);
    }
}
