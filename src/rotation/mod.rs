//! Island rotation core
//!
//! Engine-independent: the controller sees an orientation, input events, a
//! viewport width and an observer. The Bevy side lives in `crate::bevy`.

pub mod controller;
pub mod input;
pub mod stage;

pub use controller::{DragSession, RotationController, RotationObserver};
pub use input::{EventResponse, InputEvent, Key, TouchPoint};
pub use stage::{classify, normalize_angle, Stage, StageRule, STAGE_RULES};
