use bevy::prelude::*;
use bevy::color::ColorToComponents;
use rand::Rng;

use super::integrator::advance;
use crate::engine::config::MotionParams;
use crate::engine::gesture::Gesture;
use crate::engine::shapes::generators::scatter_box;

/// Live particle state shared with the renderer.
///
/// `positions` is rewritten every frame by the motion system; `colors` is
/// fixed at spawn. `dirty` tells the mesh sync system to upload positions.
#[derive(Resource, Debug, Clone)]
pub struct ParticleBuffer {
    positions: Vec<Vec3>,
    colors: Vec<[f32; 4]>,
    dirty: bool,
}

impl ParticleBuffer {
    /// Scatter `count` particles in a cube of half-extent `spread` and give
    /// each a colour drawn from `palette`.
    pub fn scattered<R: Rng>(rng: &mut R, count: usize, spread: f32, palette: &[Color]) -> Self {
        let positions = scatter_box(rng, Vec3::splat(spread), count);
        let colors = (0..count)
            .map(|_| {
                if palette.is_empty() {
                    [1.0; 4]
                } else {
                    palette[rng.random_range(0..palette.len())]
                        .to_linear()
                        .to_f32_array()
                }
            })
            .collect();

        Self {
            positions,
            colors,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run one integrator pass and mark the buffer for upload.
    pub fn advance(
        &mut self,
        targets: &[Vec3],
        palm_offset: Vec2,
        gesture: Gesture,
        time: f32,
        params: &MotionParams,
    ) {
        advance(&mut self.positions, targets, palm_offset, gesture, time, params);
        self.dirty = true;
    }

    /// Hand the current positions to the renderer and clear the dirty flag.
    pub fn take_upload(&mut self) -> Option<Vec<[f32; 3]>> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.positions.iter().map(|p| p.to_array()).collect())
    }
}
