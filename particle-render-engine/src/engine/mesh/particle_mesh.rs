use bevy::prelude::*;
use bevy::{render::mesh::PrimitiveTopology, render::render_asset::RenderAssetUsages};

use crate::engine::motion::ParticleBuffer;

#[derive(Component)]
pub struct ParticleCloud;

/// Point-list mesh with one vertex per particle. Kept in the main world as
/// well so positions can be rewritten every frame.
pub fn create_particle_mesh(particles: &ParticleBuffer) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );

    let positions: Vec<[f32; 3]> = particles.positions().iter().map(|p| p.to_array()).collect();
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, particles.colors().to_vec());
    mesh
}

/// Unlit, additive material tinted by the per-vertex palette colours.
pub fn particle_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    }
}

/// Upload positions to the particle mesh when the integrator marked them dirty.
pub fn sync_particle_mesh(
    mut particles: ResMut<ParticleBuffer>,
    query: Query<&Mesh3d, With<ParticleCloud>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Ok(mesh_handle) = query.single() else {
        return;
    };
    let Some(mesh) = meshes.get_mut(&mesh_handle.0) else {
        return;
    };
    if let Some(positions) = particles.take_upload() {
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    }
}
