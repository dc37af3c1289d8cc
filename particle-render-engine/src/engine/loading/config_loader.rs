use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::config::{ENGINE_CONFIG_PATH, EngineConfig};
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<EngineConfig>>,
}

// Start the loading process
pub fn start_loading(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    println!("Loading engine config from: {}", ENGINE_CONFIG_PATH);
    config_loader.handle = Some(asset_server.load(ENGINE_CONFIG_PATH));
}

/// Publish the loaded config as a resource. A missing or unparsable file is
/// not fatal: the engine runs on the built-in defaults.
pub fn load_config_system(
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<EngineConfig>>,
) {
    if loading_progress.config_loaded {
        return;
    }

    let Some(handle) = &config_loader.handle else {
        return;
    };

    if let Some(config) = configs.get(handle) {
        println!("✓ Engine config loaded");
        commands.insert_resource(config.clone().sanitized());
        loading_progress.config_loaded = true;
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!("Engine config unavailable ({err}), using defaults");
        commands.insert_resource(EngineConfig::default());
        loading_progress.config_loaded = true;
    }
}
