use bevy::color::Color;

/// Clear colour behind the particle cloud.
pub const BACKGROUND_COLOR: Color = Color::srgb(0.0196, 0.0196, 0.0196);

/// Camera distance from the origin along +Z.
pub const CAMERA_DISTANCE: f32 = 600.0;

/// Vertical field of view, degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 3000.0;

/// Orbit sway of the camera: amplitude and angular speed per axis.
pub const CAMERA_SWAY_X: f32 = 100.0;
pub const CAMERA_SWAY_X_SPEED: f32 = 0.15;
pub const CAMERA_SWAY_Y: f32 = 50.0;
pub const CAMERA_SWAY_Y_SPEED: f32 = 0.1;
