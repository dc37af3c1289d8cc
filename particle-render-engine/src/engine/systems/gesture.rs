use bevy::prelude::*;

use crate::engine::coordinator::EngineState;
use crate::engine::gesture::Gesture;
use crate::engine::shapes::ShapeGenerator;
use crate::engine::systems::hand_input::HandObservationEvent;
use crate::rpc::web_rpc::WebRpcInterface;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::GestureText;

#[derive(Event, Debug, Clone, Copy)]
pub struct GestureChangedEvent {
    pub gesture: Gesture,
}

/// Feed landmark-stream events into the coordinator, in arrival order.
pub fn gesture_system(
    mut observations: EventReader<HandObservationEvent>,
    mut state: ResMut<EngineState>,
    mut generator: ResMut<ShapeGenerator>,
    mut changes: EventWriter<GestureChangedEvent>,
) {
    for HandObservationEvent(observation) in observations.read() {
        match state.observe(observation, &mut generator) {
            Ok(Some(gesture)) => {
                changes.write(GestureChangedEvent { gesture });
            }
            Ok(None) => {}
            Err(err) => warn!("Rejected hand frame: {err}"),
        }
    }
}

pub fn gesture_notification_system(
    mut changes: EventReader<GestureChangedEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for change in changes.read() {
        rpc_interface.send_notification(
            "gesture_changed",
            serde_json::json!({
                "gesture": change.gesture,
                "label": change.gesture.label(),
            }),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn gesture_text_update_system(
    mut changes: EventReader<GestureChangedEvent>,
    mut query: Query<&mut Text, With<GestureText>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };
    for mut text in &mut query {
        text.0 = format!("Gesture: {}", change.gesture.label());
    }
}
