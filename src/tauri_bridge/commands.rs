//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the page's JavaScript.

use base64::{engine::general_purpose::STANDARD, Engine};
use tauri::State;

use crate::config::{RENDER_WIDTH, RENDER_HEIGHT};
use crate::rotation::{EventResponse, InputEvent};
use super::shared_state::{
    SharedFrameBuffer, SharedInputQueue, SharedIslandStatus, SharedPerfStats,
    FrameResponse, IslandStatus, PerformanceStats,
};

/// Get the current rendered frame as Base64-encoded RGBA data
#[tauri::command]
pub fn get_frame(
    state: State<SharedFrameBuffer>,
    perf_state: State<SharedPerfStats>,
) -> Result<FrameResponse, String> {
    let cmd_start = std::time::Instant::now();

    let guard = state.0.lock().map_err(|e| e.to_string())?;
    let Some(rgba_data) = &*guard else {
        return Err("No frame yet (scene still loading)".into());
    };
    let data_fetch_time = cmd_start.elapsed().as_secs_f64() * 1000.0;

    let encode_start = std::time::Instant::now();
    let base64_data = STANDARD.encode(rgba_data);
    let encode_time = encode_start.elapsed().as_secs_f64() * 1000.0;

    if let Ok(mut stats) = perf_state.0.lock() {
        stats.tauri_get_frame_ms = data_fetch_time;
        stats.tauri_serialize_ms = encode_time;
    }

    Ok(FrameResponse {
        data: base64_data,
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
    })
}

/// Get the render resolution
#[tauri::command]
pub fn get_render_size() -> (u32, u32) {
    (RENDER_WIDTH, RENDER_HEIGHT)
}

/// Get performance statistics
#[tauri::command]
pub fn get_performance_stats(state: State<SharedPerfStats>) -> Result<PerformanceStats, String> {
    let guard = state.0.lock().map_err(|e| e.to_string())?;
    Ok(guard.clone())
}

/// Forward one pointer, touch or key event from the page to the island
///
/// Events are queued until the next Bevy frame. The response tells the page
/// whether the event belongs to the island; events arriving while no island
/// is attached pass through.
#[tauri::command]
pub fn send_island_input(
    state: State<SharedInputQueue>,
    input: InputEvent,
) -> Result<EventResponse, String> {
    let response = input.response();
    let mut guard = state.0.lock().map_err(|e| e.to_string())?;
    if guard.push(input) {
        Ok(response)
    } else {
        Ok(EventResponse::PassThrough)
    }
}

/// Get the mirrored rotation state (`isRotating`, `currentStage`)
#[tauri::command]
pub fn get_island_status(state: State<SharedIslandStatus>) -> Result<IslandStatus, String> {
    let guard = state.0.lock().map_err(|e| e.to_string())?;
    Ok(guard.clone())
}
