//! Startup pipeline: config and font asset loading, then session and mesh creation.

/// Engine config asset loading with fallback to built-in defaults.
pub mod config_loader;

/// Rock-on text font loading; a missing font disables the text shape.
pub mod font_loader;

/// Session state, particle buffer and particle mesh creation.
pub mod particle_spawner;

/// Loading progress tracking resource for state transitions.
pub mod progress;
