use bevy::prelude::*;
use std::f64::consts::TAU;

use crate::engine::config::EngineConfig;
use crate::engine::coordinator::EngineState;
use crate::engine::motion::ParticleBuffer;

/// One integrator step per rendered frame against the latest published targets.
pub fn particle_motion_system(
    time: Res<Time>,
    config: Res<EngineConfig>,
    state: Res<EngineState>,
    mut particles: ResMut<ParticleBuffer>,
) {
    particles.advance(
        state.targets(),
        state.palm_offset(),
        state.current_gesture(),
        wander_phase(time.elapsed_secs_f64()),
        &config.motion,
    );
}

/// Session time reduced modulo one turn in f64. The wander only feeds it to
/// `sin`/`cos`, so the reduction is seamless and keeps f32 precision in long
/// sessions.
pub fn wander_phase(elapsed_secs: f64) -> f32 {
    elapsed_secs.rem_euclid(TAU) as f32
}
