use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub config_loaded: bool,
    pub font_loaded: bool,
    pub particles_spawned: bool,
}
