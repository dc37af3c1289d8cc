use bevy::prelude::*;
use constants::particles::{INITIAL_SPREAD, PARTICLE_PALETTE};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::config::EngineConfig;
use crate::engine::coordinator::EngineState;
use crate::engine::loading::font_loader::TextFontData;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::mesh::particle_mesh::{ParticleCloud, create_particle_mesh, particle_material};
use crate::engine::motion::ParticleBuffer;
use crate::engine::shapes::ShapeGenerator;
use crate::engine::systems::camera_orbit::{OrbitCamera, perspective_projection};

/// Build the session state and the particle mesh once the config is known.
pub fn spawn_particles_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    config: Option<Res<EngineConfig>>,
    font: Option<Res<TextFontData>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut cameras: Query<&mut Projection, With<OrbitCamera>>,
) {
    if loading_progress.particles_spawned
        || !loading_progress.config_loaded
        || !loading_progress.font_loaded
    {
        return;
    }

    let (Some(config), Some(font)) = (config, font) else {
        return;
    };

    let mut generator = ShapeGenerator::new(config.shapes.clone(), config.rng_seed, font.0.clone());
    let state = EngineState::new(config.particle_count, &config.palm, &mut generator);

    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };
    let particles = ParticleBuffer::scattered(
        &mut rng,
        config.particle_count,
        INITIAL_SPREAD,
        &PARTICLE_PALETTE,
    );

    spawn_particle_entity(&mut commands, &mut meshes, &mut materials, &particles);

    for mut projection in &mut cameras {
        *projection = perspective_projection(&config.camera);
    }

    commands.insert_resource(generator);
    commands.insert_resource(state);
    commands.insert_resource(particles);
    loading_progress.particles_spawned = true;
}

fn spawn_particle_entity(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    particles: &ParticleBuffer,
) {
    let mesh = create_particle_mesh(particles);

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(particle_material())),
        Transform::from_translation(Vec3::ZERO),
        Visibility::Visible,
        ParticleCloud,
        // Particles leave the spawn-time bounds as soon as they start moving.
        bevy::render::view::NoFrustumCulling,
    ));

    println!(
        "Particle cloud entity spawned with {} points",
        particles.len()
    );
}
