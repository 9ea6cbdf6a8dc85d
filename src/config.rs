//! Configuration constants and settings for the island scene
//!
//! This module contains all configurable parameters such as render resolution,
//! frame rates, rotation tuning and camera placement.

/// Width of the offscreen render target in pixels
pub const RENDER_WIDTH: u32 = 800;

/// Height of the offscreen render target in pixels
pub const RENDER_HEIGHT: u32 = 600;

/// Target frames per second for the Bevy render loop
pub const TARGET_FPS: f64 = 60.0;

/// Number of pre-roll frames to skip before starting output
/// This allows the scene to fully load and stabilize
pub const PRE_ROLL_FRAMES: u32 = 30;

/// Island rotation tuning
///
/// Angular factors are multiplied by π where they are applied.
pub mod island {
    /// Per-frame multiplier applied to the rotation speed while decelerating
    pub const DAMPING_FACTOR: f64 = 0.95;

    /// Speeds below this magnitude snap to zero
    pub const SPEED_FLOOR: f64 = 0.001;

    /// Radians (in units of π) per viewport width of horizontal drag
    pub const DRAG_SCALE: f64 = 0.01;

    /// Radians (in units of π) added per arrow key press
    pub const KEY_STEP: f64 = 0.005;

    /// Rotation speed (radians per frame) left behind by an arrow key press
    pub const KEY_SPEED: f64 = 0.007;

    /// Yaw the island is spawned with
    pub const INITIAL_YAW: f64 = 4.7077;
}

/// Camera placement
///
/// The camera is fixed; dragging rotates the island instead.
pub mod camera {
    /// Vertical field of view in degrees
    pub const FOV_DEGREES: f32 = 75.0;

    /// Camera position
    pub const POSITION: [f32; 3] = [0.0, 3.5, 10.0];

    /// Point the camera looks at, also where the island sits
    pub const TARGET: [f32; 3] = [0.0, -1.5, 0.0];
}

/// Performance monitoring settings
pub mod performance {
    /// Interval for printing performance stats (seconds)
    pub const STATS_PRINT_INTERVAL: f64 = 2.0;

    /// Number of frame timing samples to keep for averaging
    pub const FRAME_TIMING_SAMPLES: usize = 60;
}

/// Image compression settings
pub mod compression {
    /// JPEG quality level (0-100, higher = better quality but larger size)
    pub const JPEG_QUALITY: u8 = 85;
}
