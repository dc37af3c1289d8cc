use bevy::prelude::*;

use crate::rpc::web_rpc::WebRpcInterface;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;

/// Frame counter over a rolling one-second window.
#[derive(Resource, Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    window_start: f64,
    last_fps: Option<u32>,
}

impl FpsCounter {
    pub fn new(now: f64) -> Self {
        Self {
            frames: 0,
            window_start: now,
            last_fps: None,
        }
    }

    /// Count one frame. Returns the rate once a full second has elapsed,
    /// then starts a new window.
    pub fn tick(&mut self, now: f64) -> Option<u32> {
        self.frames += 1;
        let elapsed = now - self.window_start;
        if elapsed < 1.0 {
            return None;
        }

        let fps = (self.frames as f64 / elapsed).round() as u32;
        self.frames = 0;
        self.window_start = now;
        self.last_fps = Some(fps);
        Some(fps)
    }

    pub fn last_fps(&self) -> Option<u32> {
        self.last_fps
    }
}

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut counter: ResMut<FpsCounter>,
    time: Res<Time<Real>>,
) {
    if let Some(fps) = counter.tick(time.elapsed_secs_f64()) {
        debug!("FPS: {fps}");
        rpc_interface.send_notification("fps_update", serde_json::json!({ "fps": fps }));
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn fps_text_update_system(counter: Res<FpsCounter>, mut query: Query<&mut Text, With<FpsText>>) {
    let Some(fps) = counter.last_fps() else {
        return;
    };
    for mut text in &mut query {
        text.0 = format!("FPS: {fps}");
    }
}
