//! Bevy component definitions
//!
//! This module contains all component markers and data structures used
//! to tag and identify entities in the Bevy ECS (Entity Component System).

use bevy::prelude::*;

use crate::rotation::RotationController;

/// Marker component for the offscreen rendering camera
///
/// Entities with this component are cameras that render to an offscreen
/// texture instead of a window.
#[derive(Component)]
pub struct OffscreenCamera;

/// Marker component for the island root entity
///
/// Island meshes are spawned as children so they turn with the root.
#[derive(Component)]
pub struct Island;

/// Island yaw in radians
///
/// Stored unbounded in `f64`; the `Transform` only ever sees it as a
/// rotation about Y.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct IslandOrientation {
    pub yaw: f64,
}

impl IslandOrientation {
    pub fn new(yaw: f64) -> Self {
        Self { yaw }
    }
}

/// Attaches a rotation controller to an island
///
/// Inserting the component subscribes the input surface; removing it (or
/// despawning the island) unsubscribes it. A fresh insert starts idle with
/// zero speed and keeps whatever [`IslandOrientation`] the island has.
#[derive(Component, Debug, Default)]
pub struct IslandRotation(pub RotationController);
