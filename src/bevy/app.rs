//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    prelude::*,
    window::ExitCondition,
};
use std::time::Duration;
use std::thread;

use crate::config::{TARGET_FPS, PRE_ROLL_FRAMES};
use crate::tauri_bridge::shared_state::{
    SharedFrameBuffer, SharedInputQueue, SharedIslandStatus, SharedPerfStats,
};
use crate::bevy::plugins::{ImageCopyPlugin, IslandPlugin};
use crate::bevy::resources::*;
use crate::bevy::systems::*;

/// Handles shared between the scene host and the page bridge
#[derive(Clone, Default)]
pub struct SceneChannels {
    pub frame_buffer: SharedFrameBuffer,
    pub perf_stats: SharedPerfStats,
    pub input: SharedInputQueue,
    pub status: SharedIslandStatus,
}

/// Create and configure the Bevy application
pub fn create_app(channels: SceneChannels) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    );

    // Add schedule runner for controlled frame rate
    app.add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / TARGET_FPS,
    )));

    // Add custom plugins
    app.add_plugins(ImageCopyPlugin);
    app.add_plugins(IslandPlugin::new(channels.input, channels.status));

    // Register systems
    app.add_systems(Startup, setup_scene);
    app.add_systems(Last, extract_and_process_frame);

    // Insert resources
    app.insert_resource(FrameBufferRes(channels.frame_buffer));
    app.insert_resource(PerfStatsRes(channels.perf_stats));
    app.insert_resource(FrameCount::default());
    app.insert_resource(PreRollFrames(PRE_ROLL_FRAMES));
    app.insert_resource(FrameTimings::default());
    app.insert_resource(FrameRateLimiter::new(TARGET_FPS));

    info!("[Bevy] App configured (headless island scene)");
    app
}

/// Start Bevy in a background thread
pub fn start_bevy(channels: SceneChannels) {
    thread::spawn(move || {
        let mut app = create_app(channels);
        info!("[Bevy] Running render loop...");
        app.run();
    });
}
