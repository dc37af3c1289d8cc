use bevy::math::{Vec2, Vec3};

use crate::engine::config::MotionParams;
use crate::engine::gesture::Gesture;

/// Move every particle a fixed fraction of the way towards its target.
///
/// The palm offset shifts targets in x and y only. While `gesture` is idle,
/// each particle also wanders on `(sin, cos)(time + i * phase_step)`. Only the
/// overlapping prefix of `positions` and `targets` is touched.
pub fn advance(
    positions: &mut [Vec3],
    targets: &[Vec3],
    palm_offset: Vec2,
    gesture: Gesture,
    time: f32,
    params: &MotionParams,
) {
    let k = params.smoothing;
    let offset = palm_offset.extend(0.0);
    let wander = gesture == Gesture::Idle;

    for (i, (position, target)) in positions.iter_mut().zip(targets).enumerate() {
        let mut desired = *target + offset;

        if wander {
            let phase = time + i as f32 * params.wander_phase_step;
            desired.x += phase.sin() * params.wander_amplitude;
            desired.y += phase.cos() * params.wander_amplitude;
        }

        *position += (desired - *position) * k;
    }
}
