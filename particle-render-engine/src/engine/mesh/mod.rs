//! Mesh generation for the particle cloud.

/// Point-list particle mesh and per-frame position upload.
pub mod particle_mesh;
