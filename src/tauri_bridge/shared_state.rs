//! Shared state structures for communication between Tauri and Bevy
//!
//! This module defines thread-safe data structures that allow bidirectional
//! communication between the page and the Bevy scene host.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::rotation::{InputEvent, RotationObserver, Stage};

// =============================================================================
// Frame Buffer
// =============================================================================

/// Thread-safe RGBA frame buffer shared between Bevy and Tauri
/// Stores raw RGBA8 pixel data (4 bytes per pixel)
#[derive(Clone, Default)]
pub struct SharedFrameBuffer(pub Arc<Mutex<Option<Vec<u8>>>>);

/// Frame response containing Base64-encoded RGBA pixel data
#[derive(Serialize, Deserialize)]
pub struct FrameResponse {
    /// Base64-encoded RGBA pixel data (avoids slow JSON array serialization)
    pub data: String,
    pub width: u32,
    pub height: u32,
}

// =============================================================================
// Island Input
// =============================================================================

/// Input events waiting for the next Bevy frame
///
/// Events are only accepted while an island controller is attached.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
    attached: bool,
}

impl InputQueue {
    /// Subscribe the input surface
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Unsubscribe the input surface, dropping anything still queued
    pub fn detach(&mut self) {
        self.attached = false;
        self.events.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Queue an event; returns false when nothing is listening
    pub fn push(&mut self, event: InputEvent) -> bool {
        if self.attached {
            self.events.push(event);
        }
        self.attached
    }

    /// Take every queued event in arrival order
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Thread-safe input queue shared between Tauri and Bevy
#[derive(Clone, Default)]
pub struct SharedInputQueue(pub Arc<Mutex<InputQueue>>);

// =============================================================================
// Island Status
// =============================================================================

/// Controller state mirrored to the page
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IslandStatus {
    pub is_rotating: bool,
    pub current_stage: Stage,
    /// Island yaw in radians, unnormalized
    pub orientation: f64,
}

impl RotationObserver for IslandStatus {
    fn set_is_rotating(&mut self, rotating: bool) {
        self.is_rotating = rotating;
    }

    fn set_current_stage(&mut self, stage: Stage) {
        self.current_stage = stage;
    }
}

/// Thread-safe island status
#[derive(Clone, Default)]
pub struct SharedIslandStatus(pub Arc<Mutex<IslandStatus>>);

// =============================================================================
// Performance Statistics
// =============================================================================

/// Performance statistics for debugging and monitoring
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct PerformanceStats {
    // Backend (Bevy/Rust) timings
    pub gpu_transfer_ms: f64,
    pub data_processing_ms: f64,
    pub frame_encoding_ms: f64,
    pub bevy_fps: f64,
    pub frame_count: u32,
    pub data_size_kb: f64,
    // Tauri command timings
    pub tauri_get_frame_ms: f64,
    pub tauri_serialize_ms: f64,
}

/// Thread-safe performance statistics
#[derive(Clone, Default)]
pub struct SharedPerfStats(pub Arc<Mutex<PerformanceStats>>);
