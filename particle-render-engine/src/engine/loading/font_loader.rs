use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::text::Font;
use constants::shapes::TEXT_FONT_PATH;
use std::sync::Arc;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct TextFontLoader {
    handle: Option<Handle<Font>>,
}

/// Raw bytes of the rock-on font. `None` when the font failed to load.
#[derive(Resource, Clone, Default)]
pub struct TextFontData(pub Option<Arc<Vec<u8>>>);

pub fn start_font_loading(mut font_loader: ResMut<TextFontLoader>, asset_server: Res<AssetServer>) {
    println!("Loading text font from: {}", TEXT_FONT_PATH);
    font_loader.handle = Some(asset_server.load(TEXT_FONT_PATH));
}

/// Publish the font bytes once loaded. A missing font only disables the
/// rock-on text, which then falls back to the idle scatter.
pub fn load_text_font_system(
    mut loading_progress: ResMut<LoadingProgress>,
    font_loader: Res<TextFontLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    fonts: Res<Assets<Font>>,
) {
    if loading_progress.font_loaded {
        return;
    }

    let Some(handle) = &font_loader.handle else {
        return;
    };

    if let Some(font) = fonts.get(handle) {
        println!("✓ Text font loaded ({} bytes)", font.data.len());
        commands.insert_resource(TextFontData(Some(font.data.clone())));
        loading_progress.font_loaded = true;
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!("Text font unavailable ({err}), rock-on text disabled");
        commands.insert_resource(TextFontData(None));
        loading_progress.font_loaded = true;
    }
}
