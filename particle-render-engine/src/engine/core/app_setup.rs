use bevy::asset::AssetMetaCheck;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::BACKGROUND_COLOR;

// Crate engine modules
use crate::engine::config::{CameraParams, EngineConfig};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{ConfigLoader, load_config_system, start_loading};
use crate::engine::loading::font_loader::{TextFontLoader, load_text_font_system, start_font_loading};
use crate::engine::loading::particle_spawner::spawn_particles_when_ready;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::mesh::particle_mesh::sync_particle_mesh;
use crate::engine::systems::{
    camera_orbit::{camera_orbit_system, spawn_orbit_camera},
    fps_tracking::{FpsCounter, fps_notification_system},
    gesture::{GestureChangedEvent, gesture_notification_system, gesture_system},
    hand_input::HandObservationEvent,
    particle_motion::particle_motion_system,
    session::teardown_on_exit,
};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::{FpsText, GestureText};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::{
    fps_tracking::fps_text_update_system,
    gesture::gesture_text_update_system,
    hand_input::{KeyboardHandSource, keyboard_hand_source, palm_policy_shortcuts},
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers EngineConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<EngineConfig>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(BACKGROUND_COLOR));

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<TextFontLoader>()
        .init_resource::<FpsCounter>()
        .add_event::<HandObservationEvent>()
        .add_event::<GestureChangedEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading, start_font_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_config_system,
                load_text_font_system,
                spawn_particles_when_ready,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    // Landmark events → coordinator → integrator → mesh upload, in that order.
    let runtime_systems = (
        gesture_system,
        gesture_notification_system,
        particle_motion_system,
        sync_particle_mesh,
        camera_orbit_system,
    )
        .chain();

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)))
        .add_systems(Update, fps_notification_system)
        .add_systems(Last, teardown_on_exit);

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.init_resource::<KeyboardHandSource>().add_systems(
            Update,
            (
                keyboard_hand_source.before(gesture_system),
                palm_policy_shortcuts,
                gesture_text_update_system.after(gesture_system),
                fps_text_update_system.after(fps_notification_system),
            )
                .run_if(in_state(AppState::Running)),
        );
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    println!("=== GESTURE PARTICLE ENGINE ===");

    spawn_orbit_camera(&mut commands, &CameraParams::default());

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
        println!("Keys: 1 Rock On, 2 Peace, 3 Thumbs Up, 4 Fist, 5 open palm, 0 no hand");
        println!("      H hold palm on hand loss, R reset palm on hand loss");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("Gesture: Idle"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.0, 1.0, 0.53)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                GestureText,
            ));
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "info,wgpu=error,naga=warn,particle_render_engine=debug".into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
