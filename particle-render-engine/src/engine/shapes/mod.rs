//! Procedural target shapes, one per gesture.
//!
//! [`ShapeGenerator`] owns the RNG, the text rasterizer and the cached text
//! samples, and produces a fresh target buffer of exactly `n` points.

/// Pure point-set generators (box scatter, sphere lattice, heart, text cloud).
pub mod generators;

/// Text rasterization capability and alpha-mask sampling.
pub mod text_raster;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

use crate::engine::config::ShapeParams;
use crate::engine::error::EngineError;
use crate::engine::gesture::Gesture;
use generators::{fibonacci_sphere, heart_curve, scatter_box, text_cloud};
use text_raster::{BlankTextRasterizer, FontTextRasterizer, TextRasterizer, sample_text_points};

#[derive(Resource)]
pub struct ShapeGenerator {
    params: ShapeParams,
    rng: StdRng,
    rasterizer: Box<dyn TextRasterizer>,
    /// Text samples, rasterised on the first rock-on request.
    text_samples: Option<Vec<Vec2>>,
}

impl ShapeGenerator {
    /// Generator drawing the rock-on text with `font_data`. Without a font
    /// the text renders empty and rock-on falls back to the idle scatter.
    pub fn new(params: ShapeParams, seed: Option<u64>, font_data: Option<Arc<Vec<u8>>>) -> Self {
        let rasterizer: Box<dyn TextRasterizer> = match font_data {
            Some(data) => Box::new(FontTextRasterizer::new(data, params.text_font_size)),
            None => Box::new(BlankTextRasterizer),
        };
        Self::with_rasterizer(params, seed, rasterizer)
    }

    pub fn with_rasterizer(
        params: ShapeParams,
        seed: Option<u64>,
        rasterizer: Box<dyn TextRasterizer>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            params,
            rng,
            rasterizer,
            text_samples: None,
        }
    }

    /// Target points for `gesture`. Random shapes are re-drawn on every call.
    pub fn generate(&mut self, gesture: Gesture, n: usize) -> Result<Vec<Vec3>, EngineError> {
        let params = &self.params;
        let points = match gesture {
            Gesture::Idle => {
                scatter_box(&mut self.rng, Vec3::from_array(params.idle_half_extents), n)
            }
            Gesture::Fist => scatter_box(&mut self.rng, Vec3::splat(params.fist_half_extent), n),
            Gesture::ThumbsUp => fibonacci_sphere(params.sphere_radius, n),
            Gesture::Peace => heart_curve(
                &mut self.rng,
                params.heart_scale,
                params.heart_jitter,
                params.heart_depth,
                n,
            ),
            Gesture::RockOn => return self.generate_text(n),
        };
        Ok(points)
    }

    fn generate_text(&mut self, n: usize) -> Result<Vec<Vec3>, EngineError> {
        if self.text_samples.is_none() {
            let raster = self.rasterizer.rasterize(
                &self.params.text,
                self.params.text_canvas_width,
                self.params.text_canvas_height,
            );
            let samples = sample_text_points(
                &raster,
                self.params.text_sample_step,
                self.params.text_alpha_threshold,
            );
            info!(
                "Rasterised {:?}: {} sample points",
                self.params.text,
                samples.len()
            );
            self.text_samples = Some(samples);
        }

        let samples = self.text_samples.as_deref().unwrap_or_default();
        if samples.is_empty() {
            return Err(EngineError::EmptyTextRaster {
                text: self.params.text.clone(),
            });
        }
        if n == 0 {
            return Ok(Vec::new());
        }

        Ok(text_cloud(
            &mut self.rng,
            samples,
            self.params.text_scale,
            self.params.text_jitter,
            self.params.text_depth,
            n,
        ))
    }
}
