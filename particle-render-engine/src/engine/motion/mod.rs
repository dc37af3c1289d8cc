//! Per-frame particle motion.
//!
//! The live position buffer chases the target buffer through a one-pole
//! exponential filter; idle clouds additionally wander on a slow sine path.

/// Exponential smoothing integrator.
pub mod integrator;

/// Live position and colour buffers handed to the renderer.
pub mod particles;

pub use integrator::advance;
pub use particles::ParticleBuffer;
