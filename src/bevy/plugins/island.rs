//! Island rotation plugin
//!
//! Wires the page's input queue and status mirror into the ECS and schedules
//! the island systems. Needs no renderer, so it also runs under a bare
//! `App` in tests.

use bevy::prelude::*;

use crate::bevy::resources::{InputQueueRes, IslandStatusRes, SceneViewport};
use crate::bevy::systems::island::{
    advance_island_rotation, apply_island_input, apply_island_orientation,
    sync_input_subscription,
};
use crate::tauri_bridge::shared_state::{SharedInputQueue, SharedIslandStatus};

/// Island systems, in the order they run each frame
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct IslandSystems;

pub struct IslandPlugin {
    input: SharedInputQueue,
    status: SharedIslandStatus,
}

impl IslandPlugin {
    pub fn new(input: SharedInputQueue, status: SharedIslandStatus) -> Self {
        Self { input, status }
    }
}

impl Plugin for IslandPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(InputQueueRes(self.input.clone()))
            .insert_resource(IslandStatusRes(self.status.clone()))
            .init_resource::<SceneViewport>()
            .add_systems(
                Update,
                (
                    sync_input_subscription,
                    apply_island_input,
                    advance_island_rotation,
                    apply_island_orientation,
                )
                    .chain()
                    .in_set(IslandSystems),
            );
    }
}
