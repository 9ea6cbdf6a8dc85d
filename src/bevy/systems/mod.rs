//! Bevy systems
//!
//! This module contains all the systems that operate on entities
//! and resources in the Bevy ECS.

pub mod scene;
pub mod island;
pub mod frame_extraction;

pub use scene::setup_scene;
pub use frame_extraction::extract_and_process_frame;
