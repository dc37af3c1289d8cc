//! Engine configuration loaded from `assets/engine_config.json`.
//!
//! Every section falls back to the values in the `constants` crate, so a
//! partial file only needs the keys it overrides.

use bevy::prelude::*;
use constants::{hand, motion, particles, render_settings, shapes};
use serde::{Deserialize, Serialize};

/// Path of the config asset, relative to the asset root.
pub const ENGINE_CONFIG_PATH: &str = "engine_config.json";

#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub particle_count: usize,
    /// Fixed seed for reproducible shapes; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    pub palm: PalmParams,
    pub shapes: ShapeParams,
    pub motion: MotionParams,
    pub camera: CameraParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: particles::PARTICLE_COUNT,
            rng_seed: None,
            palm: PalmParams::default(),
            shapes: ShapeParams::default(),
            motion: MotionParams::default(),
            camera: CameraParams::default(),
        }
    }
}

impl EngineConfig {
    /// Replace non-finite numbers with their defaults and clamp values that
    /// would make the integrator or the text scan misbehave.
    pub fn sanitized(mut self) -> Self {
        let shape_defaults = ShapeParams::default();
        let motion_defaults = MotionParams::default();
        let palm_defaults = PalmParams::default();
        let camera_defaults = CameraParams::default();

        for (axis, (value, default)) in self
            .shapes
            .idle_half_extents
            .iter_mut()
            .zip(shape_defaults.idle_half_extents)
            .enumerate()
        {
            replace_non_finite(value, default, &format!("shapes.idle_half_extents[{axis}]"));
        }

        let checks = [
            (&mut self.shapes.fist_half_extent, shape_defaults.fist_half_extent, "shapes.fist_half_extent"),
            (&mut self.shapes.sphere_radius, shape_defaults.sphere_radius, "shapes.sphere_radius"),
            (&mut self.shapes.heart_scale, shape_defaults.heart_scale, "shapes.heart_scale"),
            (&mut self.shapes.heart_jitter, shape_defaults.heart_jitter, "shapes.heart_jitter"),
            (&mut self.shapes.heart_depth, shape_defaults.heart_depth, "shapes.heart_depth"),
            (&mut self.shapes.text_font_size, shape_defaults.text_font_size, "shapes.text_font_size"),
            (&mut self.shapes.text_scale, shape_defaults.text_scale, "shapes.text_scale"),
            (&mut self.shapes.text_jitter, shape_defaults.text_jitter, "shapes.text_jitter"),
            (&mut self.shapes.text_depth, shape_defaults.text_depth, "shapes.text_depth"),
            (&mut self.motion.smoothing, motion_defaults.smoothing, "motion.smoothing"),
            (&mut self.motion.wander_amplitude, motion_defaults.wander_amplitude, "motion.wander_amplitude"),
            (&mut self.motion.wander_phase_step, motion_defaults.wander_phase_step, "motion.wander_phase_step"),
            (&mut self.palm.scale_x, palm_defaults.scale_x, "palm.scale_x"),
            (&mut self.palm.scale_y, palm_defaults.scale_y, "palm.scale_y"),
            (&mut self.camera.distance, camera_defaults.distance, "camera.distance"),
            (&mut self.camera.fov_degrees, camera_defaults.fov_degrees, "camera.fov_degrees"),
            (&mut self.camera.sway_x, camera_defaults.sway_x, "camera.sway_x"),
            (&mut self.camera.sway_x_speed, camera_defaults.sway_x_speed, "camera.sway_x_speed"),
            (&mut self.camera.sway_y, camera_defaults.sway_y, "camera.sway_y"),
            (&mut self.camera.sway_y_speed, camera_defaults.sway_y_speed, "camera.sway_y_speed"),
        ];
        for (value, default, name) in checks {
            replace_non_finite(value, default, name);
        }

        if !(0.0..=1.0).contains(&self.motion.smoothing) {
            warn!(
                "Smoothing factor {} outside [0, 1], clamping",
                self.motion.smoothing
            );
            self.motion.smoothing = self.motion.smoothing.clamp(0.0, 1.0);
        }
        self.shapes.text_sample_step = self.shapes.text_sample_step.max(1);
        self
    }
}

fn replace_non_finite(value: &mut f32, default: f32, name: &str) {
    if !value.is_finite() {
        warn!("Config value {name} = {value} is not finite, using {default}");
        *value = default;
    }
}

/// What happens to the palm offset when the hand leaves the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PalmLossPolicy {
    /// Keep biasing the idle cloud towards the last seen palm position.
    #[default]
    Hold,
    /// Snap the offset back to the origin.
    Reset,
}

impl PalmLossPolicy {
    /// Parse an RPC policy name.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hold" => Some(Self::Hold),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalmParams {
    pub scale_x: f32,
    pub scale_y: f32,
    pub loss_policy: PalmLossPolicy,
}

impl Default for PalmParams {
    fn default() -> Self {
        Self {
            scale_x: hand::PALM_SCALE_X,
            scale_y: hand::PALM_SCALE_Y,
            loss_policy: PalmLossPolicy::Hold,
        }
    }
}

impl PalmParams {
    pub fn scale(&self) -> Vec2 {
        Vec2::new(self.scale_x, self.scale_y)
    }
}

/// Sizes and jitter of the target shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    pub idle_half_extents: [f32; 3],
    pub fist_half_extent: f32,
    pub sphere_radius: f32,
    pub heart_scale: f32,
    pub heart_jitter: f32,
    pub heart_depth: f32,
    pub text: String,
    pub text_font_size: f32,
    pub text_canvas_width: u32,
    pub text_canvas_height: u32,
    pub text_sample_step: u32,
    pub text_alpha_threshold: u8,
    pub text_scale: f32,
    pub text_jitter: f32,
    pub text_depth: f32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            idle_half_extents: shapes::IDLE_HALF_EXTENTS,
            fist_half_extent: shapes::FIST_HALF_EXTENT,
            sphere_radius: shapes::SPHERE_RADIUS,
            heart_scale: shapes::HEART_SCALE,
            heart_jitter: shapes::HEART_JITTER,
            heart_depth: shapes::HEART_DEPTH,
            text: shapes::TEXT_MESSAGE.to_string(),
            text_font_size: shapes::TEXT_FONT_SIZE,
            text_canvas_width: shapes::TEXT_CANVAS_WIDTH,
            text_canvas_height: shapes::TEXT_CANVAS_HEIGHT,
            text_sample_step: shapes::TEXT_SAMPLE_STEP,
            text_alpha_threshold: shapes::TEXT_ALPHA_THRESHOLD,
            text_scale: shapes::TEXT_SCALE,
            text_jitter: shapes::TEXT_JITTER,
            text_depth: shapes::TEXT_DEPTH,
        }
    }
}

impl ShapeParams {
    /// Same shapes with every random component switched off.
    pub fn without_jitter(self) -> Self {
        Self {
            heart_jitter: 0.0,
            heart_depth: 0.0,
            text_jitter: 0.0,
            text_depth: 0.0,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// Fraction of the remaining distance covered per frame, in [0, 1].
    pub smoothing: f32,
    pub wander_amplitude: f32,
    pub wander_phase_step: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            smoothing: motion::SMOOTHING_FACTOR,
            wander_amplitude: motion::IDLE_WANDER_AMPLITUDE,
            wander_phase_step: motion::IDLE_WANDER_PHASE_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub distance: f32,
    pub fov_degrees: f32,
    pub sway_x: f32,
    pub sway_x_speed: f32,
    pub sway_y: f32,
    pub sway_y_speed: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            distance: render_settings::CAMERA_DISTANCE,
            fov_degrees: render_settings::CAMERA_FOV_DEGREES,
            sway_x: render_settings::CAMERA_SWAY_X,
            sway_x_speed: render_settings::CAMERA_SWAY_X_SPEED,
            sway_y: render_settings::CAMERA_SWAY_Y,
            sway_y_speed: render_settings::CAMERA_SWAY_Y_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::gesture::Gesture;
    use crate::engine::shapes::ShapeGenerator;

    #[test]
    fn test_empty_json_is_default() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.particle_count, 35_000);
        assert_eq!(config.palm.loss_policy, PalmLossPolicy::Hold);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config: EngineConfig = serde_json::from_str(
            r#"{ "particle_count": 1000, "palm": { "loss_policy": "reset" }, "shapes": { "text": "HI" } }"#,
        )
        .unwrap();
        assert_eq!(config.particle_count, 1000);
        assert_eq!(config.palm.loss_policy, PalmLossPolicy::Reset);
        assert_eq!(config.palm.scale_x, 1000.0);
        assert_eq!(config.shapes.text, "HI");
        assert_eq!(config.shapes.sphere_radius, 220.0);
        assert_eq!(config.motion.smoothing, 0.08);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped: EngineConfig =
            serde_json::from_str(include_str!("../../assets/engine_config.json")).unwrap();
        assert_eq!(shipped, EngineConfig::default());
    }

    #[test]
    fn test_sanitized_clamps_smoothing() {
        let mut config = EngineConfig::default();
        config.motion.smoothing = 1.7;
        config.shapes.text_sample_step = 0;
        let config = config.sanitized();
        assert_eq!(config.motion.smoothing, 1.0);
        assert_eq!(config.shapes.text_sample_step, 1);
    }

    #[test]
    fn test_sanitized_replaces_non_finite_values() {
        let config: EngineConfig = serde_json::from_str(
            r#"{
                "shapes": { "fist_half_extent": 1e39, "idle_half_extents": [1e39, 500.0, 500.0] },
                "motion": { "wander_amplitude": -1e39 },
                "palm": { "scale_x": 1e39 }
            }"#,
        )
        .unwrap();
        assert!(config.shapes.fist_half_extent.is_infinite());

        let config = config.sanitized();
        assert_eq!(config.shapes.fist_half_extent, 5.0);
        assert_eq!(config.shapes.idle_half_extents, [600.0, 500.0, 500.0]);
        assert_eq!(config.motion.wander_amplitude, 20.0);
        assert_eq!(config.palm.scale_x, 1000.0);

        let mut generator = ShapeGenerator::new(config.shapes.clone(), Some(8), None);
        let fist = generator.generate(Gesture::Fist, 100).unwrap();
        assert!(fist.iter().all(|p| p.abs().max_element() <= 5.0));
    }

    #[test]
    fn test_sanitized_nan_smoothing_uses_default() {
        let mut config = EngineConfig::default();
        config.motion.smoothing = f32::NAN;
        assert_eq!(config.sanitized().motion.smoothing, 0.08);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(PalmLossPolicy::from_string("RESET"), Some(PalmLossPolicy::Reset));
        assert_eq!(PalmLossPolicy::from_string("hold"), Some(PalmLossPolicy::Hold));
        assert_eq!(PalmLossPolicy::from_string("drop"), None);
    }
}
