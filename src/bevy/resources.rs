//! Bevy resource definitions
//!
//! This module contains all global resources used by Bevy systems.
//! Resources are singleton data that can be accessed by any system.

use bevy::prelude::*;
use std::time::Duration;

use crate::config::{camera, RENDER_HEIGHT, RENDER_WIDTH};
use crate::tauri_bridge::shared_state::{
    SharedFrameBuffer, SharedInputQueue, SharedIslandStatus, SharedPerfStats,
};

// =============================================================================
// Island Control
// =============================================================================

/// Input events forwarded by the page
#[derive(Resource, Clone)]
pub struct InputQueueRes(pub SharedInputQueue);

/// Status mirror read back by the page
#[derive(Resource, Clone)]
pub struct IslandStatusRes(pub SharedIslandStatus);

/// Visible width of the scene, in world units, at the island's depth
///
/// Drag distance is divided by this before it becomes rotation.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneViewport {
    pub width: f64,
}

impl SceneViewport {
    /// Width of the view frustum slice at `distance` from the camera
    pub fn from_camera(fov_y: f32, distance: f32, aspect_ratio: f32) -> Self {
        let height = 2.0 * distance * (fov_y / 2.0).tan();
        Self {
            width: f64::from(height * aspect_ratio),
        }
    }
}

impl Default for SceneViewport {
    fn default() -> Self {
        let distance =
            Vec3::from_array(camera::POSITION).distance(Vec3::from_array(camera::TARGET));
        Self::from_camera(
            camera::FOV_DEGREES.to_radians(),
            distance,
            RENDER_WIDTH as f32 / RENDER_HEIGHT as f32,
        )
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Handle to the offscreen render target texture
#[derive(Resource)]
pub struct RenderTargetHandle(pub Handle<Image>);

/// Shared frame buffer resource for Bevy
#[derive(Resource, Clone)]
pub struct FrameBufferRes(pub SharedFrameBuffer);

// =============================================================================
// Frame Management
// =============================================================================

/// Counter for total frames rendered
#[derive(Resource, Default)]
pub struct FrameCount(pub u32);

/// Number of pre-roll frames to skip before starting output
#[derive(Resource, Default)]
pub struct PreRollFrames(pub u32);

/// Frame rate limiter to control output FPS
#[derive(Resource)]
pub struct FrameRateLimiter {
    pub last_frame_time: std::time::Instant,
    pub min_frame_interval: Duration,
}

impl FrameRateLimiter {
    pub fn new(target_fps: f64) -> Self {
        Self {
            last_frame_time: std::time::Instant::now(),
            min_frame_interval: Duration::from_secs_f64(1.0 / target_fps),
        }
    }
}

// =============================================================================
// Performance Monitoring
// =============================================================================

/// Performance timing tracker for frame processing
#[derive(Resource, Default)]
pub struct FrameTimings {
    pub last_print_time: f64,
    pub frame_times: Vec<f64>,
}

/// Shared performance statistics resource
#[derive(Resource)]
pub struct PerfStatsRes(pub SharedPerfStats);

// =============================================================================
// Channel Communication (Main World <-> Render World)
// =============================================================================

use crossbeam_channel::{Receiver, Sender};

/// Receives data from render world
#[derive(Resource, Deref)]
pub struct MainWorldReceiver(pub Receiver<Vec<u8>>);

/// Sends data to main world
#[derive(Resource, Deref)]
pub struct RenderWorldSender(pub Sender<Vec<u8>>);
