use bevy::color::Color;

/// Number of particles in the cloud.
pub const PARTICLE_COUNT: usize = 35_000;

/// Half-extent of the cube particles are scattered in before the first target arrives.
pub const INITIAL_SPREAD: f32 = 500.0;

/// Particle colours, one picked per particle at spawn.
pub const PARTICLE_PALETTE: [Color; 4] = [
    Color::srgb(0.545, 0.0, 1.0), // violet #8B00FF
    Color::srgb(0.0, 1.0, 0.533), // neon green #00FF88
    Color::srgb(0.0, 1.0, 1.0),   // cyan #00FFFF
    Color::srgb(1.0, 0.0, 1.0),   // magenta #FF00FF
];
