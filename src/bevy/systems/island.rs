//! Island rotation systems
//!
//! Feeds page input into each island's [`RotationController`](crate::rotation::RotationController),
//! runs the per-frame update, and writes the resulting yaw to the island's
//! `Transform`. The systems run chained in this order every frame so all
//! input queued before a frame is applied before that frame's update.

use bevy::prelude::*;

use crate::bevy::components::{IslandOrientation, IslandRotation};
use crate::bevy::resources::{InputQueueRes, IslandStatusRes, SceneViewport};
use crate::rotation::RotationObserver;

/// Subscribe the input surface while at least one island has a controller
///
/// Either transition leaves no controller mid-rotation, so the page is told
/// rotation stopped.
pub fn sync_input_subscription(
    queue_res: Res<InputQueueRes>,
    status_res: Res<IslandStatusRes>,
    controllers: Query<(), With<IslandRotation>>,
) {
    let active = !controllers.is_empty();
    {
        let Ok(mut queue) = queue_res.0 .0.lock() else {
            return;
        };
        if active == queue.is_attached() {
            return;
        }

        if active {
            queue.attach();
            info!("[Bevy] Island input attached");
        } else {
            queue.detach();
            info!("[Bevy] Island input detached");
        }
    }

    match status_res.0 .0.lock() {
        Ok(mut status) => status.set_is_rotating(false),
        Err(_) => warn!("[Bevy] Island status unavailable, rotating flag not reset"),
    }
}

/// Apply every queued input event to every island controller
pub fn apply_island_input(
    queue_res: Res<InputQueueRes>,
    status_res: Res<IslandStatusRes>,
    viewport: Res<SceneViewport>,
    mut islands: Query<(&mut IslandRotation, &mut IslandOrientation)>,
) {
    // Status first: events stay queued if it cannot be locked
    let Ok(mut status) = status_res.0 .0.lock() else {
        return;
    };

    let events = match queue_res.0 .0.lock() {
        Ok(mut queue) => queue.drain(),
        Err(_) => return,
    };
    if events.is_empty() {
        return;
    }

    for (mut rotation, mut orientation) in islands.iter_mut() {
        for event in &events {
            rotation
                .0
                .handle(event, &mut orientation.yaw, viewport.width, &mut *status);
        }
        debug!(
            "[Bevy] Applied {} input events, yaw {:.4}",
            events.len(),
            orientation.yaw
        );
    }
}

/// Per-frame controller update: damping while idle, stage while rotating
pub fn advance_island_rotation(
    status_res: Res<IslandStatusRes>,
    mut islands: Query<(&mut IslandRotation, &mut IslandOrientation)>,
) {
    let Ok(mut status) = status_res.0 .0.lock() else {
        return;
    };

    for (mut rotation, mut orientation) in islands.iter_mut() {
        rotation.0.tick(&mut orientation.yaw, &mut *status);
        status.orientation = orientation.yaw;
    }
}

/// Write the island yaw to its transform
pub fn apply_island_orientation(
    mut islands: Query<(&IslandOrientation, &mut Transform), Changed<IslandOrientation>>,
) {
    for (orientation, mut transform) in islands.iter_mut() {
        transform.rotation = Quat::from_rotation_y(orientation.yaw as f32);
    }
}
