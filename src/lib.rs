//! Island Portfolio: rotatable 3D island for the portfolio home page
//!
//! The island is rendered headless by Bevy and shown in a Tauri window.
//! The page forwards pointer, touch and arrow-key input; the island turns,
//! coasts to a stop, and reports which stage faces the camera.
//!
//! Architecture:
//! - Bevy runs in a background thread with NO window (true headless mode)
//! - Page input -> shared queue -> rotation controller -> island `Transform`
//! - Controller state -> shared status -> page (`get_island_status`)
//! - GPU texture -> Buffer -> CPU channel -> `frame://` protocol -> page
//!
//! # Module Structure
//!
//! - `config`: Configuration constants and settings
//! - `rotation`: Engine-independent rotation controller
//!   - `controller`: Input handling, damping, stage reporting
//!   - `input`: Input events from the page
//!   - `stage`: Angle normalization and stage windows
//! - `tauri_bridge`: Bridge layer between Tauri and Bevy
//!   - `shared_state`: Thread-safe data structures
//!   - `commands`: Tauri command handlers
//!   - `protocol`: Custom protocol handlers
//! - `bevy`: Bevy engine integration
//!   - `components`: ECS components
//!   - `resources`: Global resources
//!   - `plugins`: Island and frame copy plugins
//!   - `systems`: Scene, island and frame systems
//!   - `app`: Application setup

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Module declarations
pub mod bevy;
pub mod config;
pub mod rotation;
pub mod tauri_bridge;

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use std::{thread, time::Duration};

    use crate::bevy::{start_bevy, SceneChannels};
    use crate::tauri_bridge::{self, commands};

    /// Main entry point for the Tauri application
    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        let channels = SceneChannels::default();

        // Start Bevy in background thread
        start_bevy(channels.clone());

        // Wait for Bevy to initialize
        thread::sleep(Duration::from_millis(1000));
        ::bevy::log::info!("[Tauri] Starting...");

        // Clone for the custom protocol handler
        let protocol_channels = channels.clone();

        let result = tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .manage(channels.frame_buffer)
            .manage(channels.perf_stats)
            .manage(channels.input)
            .manage(channels.status)
            // Register custom protocol "frame://" for direct binary transfer
            .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
                let channels = protocol_channels.clone();

                // Encoding can take a few ms; keep it off the webview thread
                thread::spawn(move || {
                    let path = request.uri().path().to_owned();
                    let response = tauri_bridge::protocol::handle_frame_protocol(
                        &path,
                        &channels.frame_buffer,
                        &channels.perf_stats,
                        &channels.status,
                    );
                    responder.respond(response);
                });
            })
            .invoke_handler(tauri::generate_handler![
                commands::get_frame,
                commands::get_render_size,
                commands::get_performance_stats,
                commands::send_island_input,
                commands::get_island_status
            ])
            .run(tauri::generate_context!());

        if let Err(err) = result {
            ::bevy::log::error!("[Tauri] Application error: {err}");
        }
    }
}
