//! Bridge layer between Tauri and Bevy
//!
//! This module handles all communication between the page and the Bevy
//! scene host, including command handlers, custom protocols, and shared
//! state management.

pub mod shared_state;
#[cfg(feature = "desktop")]
pub mod commands;
#[cfg(feature = "desktop")]
pub mod protocol;

// Re-export commonly used types
pub use shared_state::{
    SharedFrameBuffer, SharedInputQueue, SharedIslandStatus, SharedPerfStats,
};
