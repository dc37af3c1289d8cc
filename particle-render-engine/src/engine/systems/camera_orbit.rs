use bevy::prelude::*;

use crate::engine::config::{CameraParams, EngineConfig};
use constants::render_settings::{CAMERA_FAR, CAMERA_NEAR};

#[derive(Component)]
pub struct OrbitCamera;

pub fn perspective_projection(params: &CameraParams) -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: params.fov_degrees.to_radians(),
        near: CAMERA_NEAR,
        far: CAMERA_FAR,
        ..default()
    })
}

/// Slow Lissajous sway in front of the cloud, always looking at the origin.
pub fn orbit_position(params: &CameraParams, time: f64) -> Vec3 {
    Vec3::new(
        (time * params.sway_x_speed as f64).sin() as f32 * params.sway_x,
        (time * params.sway_y_speed as f64).cos() as f32 * params.sway_y,
        params.distance,
    )
}

pub fn spawn_orbit_camera(commands: &mut Commands, params: &CameraParams) {
    commands.spawn((
        Camera3d::default(),
        perspective_projection(params),
        Transform::from_translation(orbit_position(params, 0.0)).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera,
    ));
}

pub fn camera_orbit_system(
    time: Res<Time>,
    config: Res<EngineConfig>,
    mut query: Query<&mut Transform, With<OrbitCamera>>,
) {
    let position = orbit_position(&config.camera, time.elapsed_secs_f64());
    for mut transform in &mut query {
        *transform = Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_starts_above_centre() {
        let params = CameraParams::default();
        let start = orbit_position(&params, 0.0);
        assert_eq!(start, Vec3::new(0.0, params.sway_y, params.distance));
    }

    #[test]
    fn test_orbit_stays_within_sway() {
        let params = CameraParams::default();
        for step in 0..500 {
            let p = orbit_position(&params, step as f64 * 0.37);
            assert!(p.x.abs() <= params.sway_x + 1e-3);
            assert!(p.y.abs() <= params.sway_y + 1e-3);
            assert_eq!(p.z, params.distance);
        }
    }
}
