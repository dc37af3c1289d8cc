//! Runtime systems driving the particle session.
//!
//! Hand input flows through the gesture system into the coordinator; the
//! motion and mesh systems consume its published state every frame.

/// Landmark-stream events and the native keyboard landmark source.
///
/// Number keys pick a canned hand pose and the cursor places the palm.
pub mod hand_input;

/// Gesture state updates and `gesture_changed` notifications.
pub mod gesture;

/// Per-frame particle integration.
pub mod particle_motion;

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to frontend via RPC and updates native UI overlays.
pub mod fps_tracking;

/// Swaying perspective camera.
pub mod camera_orbit;

pub mod session;
