use bevy::prelude::*;

use crate::engine::coordinator::EngineState;
use crate::engine::motion::ParticleBuffer;
use crate::engine::shapes::ShapeGenerator;
use crate::rpc::web_rpc::MessageQueue;

/// Stop the landmark producer first, then drop the engine state.
pub fn teardown_on_exit(
    mut exits: EventReader<AppExit>,
    message_queue: Option<Res<MessageQueue>>,
    mut commands: Commands,
) {
    if exits.read().next().is_none() {
        return;
    }

    if let Some(queue) = message_queue {
        queue.close();
        commands.remove_resource::<MessageQueue>();
    }

    commands.remove_resource::<EngineState>();
    commands.remove_resource::<ShapeGenerator>();
    commands.remove_resource::<ParticleBuffer>();
    info!("Particle session torn down");
}
