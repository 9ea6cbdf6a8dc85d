//! Island rotation controller
//!
//! Turns drag, touch and arrow-key input into changes of a single yaw angle,
//! decelerates the island once input stops, and classifies the resting face
//! into a [`Stage`] while the user is actively turning it.
//!
//! The controller never owns the orientation. The host passes it in on every
//! call so the same logic drives an ECS component or a plain `f64` in tests.

use std::f64::consts::PI;

use super::input::{first_touch_x, EventResponse, InputEvent, Key};
use super::stage::{classify, normalize_angle, Stage};
use crate::config::island::{DAMPING_FACTOR, DRAG_SCALE, KEY_SPEED, KEY_STEP, SPEED_FLOOR};

/// Receives controller state changes; fire-and-forget
pub trait RotationObserver {
    fn set_is_rotating(&mut self, rotating: bool);
    fn set_current_stage(&mut self, stage: Stage);
}

/// Transient state of the current (or last) drag
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSession {
    /// Last observed horizontal input coordinate
    pub last_x: f64,
}

/// Rotation state machine for one island
#[derive(Debug, Clone, Default)]
pub struct RotationController {
    drag: DragSession,
    rotation_speed: f64,
    is_rotating: bool,
    stage: Stage,
}

impl RotationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_rotating(&self) -> bool {
        self.is_rotating
    }

    /// Radians added per frame while decelerating
    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    /// Stage as last computed; frozen while not rotating
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn drag(&self) -> DragSession {
        self.drag
    }

    /// Apply one input event
    ///
    /// `viewport_width` normalizes horizontal drag distance. Pointer and
    /// touch events are always consumed so the host does not also treat
    /// them as a camera drag.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        orientation: &mut f64,
        viewport_width: f64,
        observer: &mut impl RotationObserver,
    ) -> EventResponse {
        match event {
            InputEvent::PointerDown { client_x } => {
                self.begin_drag(*client_x, observer);
                EventResponse::Consumed
            }
            InputEvent::TouchStart { touches } => {
                if let Some(x) = first_touch_x(touches) {
                    self.begin_drag(x, observer);
                }
                EventResponse::Consumed
            }
            InputEvent::PointerMove { client_x } => {
                self.drag_to(*client_x, orientation, viewport_width);
                EventResponse::Consumed
            }
            InputEvent::TouchMove { touches } => {
                if let Some(x) = first_touch_x(touches) {
                    self.drag_to(x, orientation, viewport_width);
                }
                EventResponse::Consumed
            }
            InputEvent::PointerUp | InputEvent::TouchEnd => {
                self.set_rotating(false, observer);
                EventResponse::Consumed
            }
            InputEvent::KeyDown { key } => {
                let direction = match key {
                    Key::ArrowLeft => 1.0,
                    Key::ArrowRight => -1.0,
                    Key::Other(_) => return EventResponse::PassThrough,
                };
                if !self.is_rotating {
                    self.set_rotating(true, observer);
                }
                *orientation += direction * KEY_STEP * PI;
                self.rotation_speed = direction * KEY_SPEED;
                EventResponse::PassThrough
            }
            InputEvent::KeyUp { key } => {
                if matches!(key, Key::ArrowLeft | Key::ArrowRight) {
                    self.set_rotating(false, observer);
                }
                EventResponse::PassThrough
            }
        }
    }

    /// Per-frame update
    ///
    /// Decelerates while idle. While rotating, reports the stage every
    /// frame, changed or not.
    pub fn tick(&mut self, orientation: &mut f64, observer: &mut impl RotationObserver) {
        if !self.is_rotating {
            self.rotation_speed *= DAMPING_FACTOR;
            if self.rotation_speed.abs() < SPEED_FLOOR {
                self.rotation_speed = 0.0;
            }
            *orientation += self.rotation_speed;
        } else {
            self.stage = classify(normalize_angle(*orientation));
            observer.set_current_stage(self.stage);
        }
    }

    fn begin_drag(&mut self, x: f64, observer: &mut impl RotationObserver) {
        self.set_rotating(true, observer);
        self.drag.last_x = x;
    }

    fn drag_to(&mut self, x: f64, orientation: &mut f64, viewport_width: f64) {
        if !self.is_rotating {
            return;
        }
        let delta = (x - self.drag.last_x) / viewport_width;
        let step = delta * DRAG_SCALE * PI;
        *orientation += step;
        self.drag.last_x = x;
        self.rotation_speed = step;
    }

    fn set_rotating(&mut self, rotating: bool, observer: &mut impl RotationObserver) {
        self.is_rotating = rotating;
        observer.set_is_rotating(rotating);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::input::TouchPoint;

    /// Records every notification in order
    #[derive(Default)]
    struct Recorder {
        rotating: Vec<bool>,
        stages: Vec<Stage>,
    }

    impl RotationObserver for Recorder {
        fn set_is_rotating(&mut self, rotating: bool) {
            self.rotating.push(rotating);
        }

        fn set_current_stage(&mut self, stage: Stage) {
            self.stages.push(stage);
        }
    }

    const WIDTH: f64 = 800.0;

    fn key_down(key: Key) -> InputEvent {
        InputEvent::KeyDown { key }
    }

    fn key_up(key: Key) -> InputEvent {
        InputEvent::KeyUp { key }
    }

    #[test]
    fn drag_total_is_independent_of_split() {
        let moves_a = [100.0, 400.0];
        let moves_b = [130.0, 170.0, 260.0, 333.0, 400.0];

        let mut totals = Vec::new();
        for moves in [&moves_a[..], &moves_b[..]] {
            let mut controller = RotationController::new();
            let mut recorder = Recorder::default();
            let mut orientation = 0.0;
            controller.handle(
                &InputEvent::PointerDown { client_x: 100.0 },
                &mut orientation,
                WIDTH,
                &mut recorder,
            );
            for &x in moves {
                controller.handle(
                    &InputEvent::PointerMove { client_x: x },
                    &mut orientation,
                    WIDTH,
                    &mut recorder,
                );
            }
            totals.push(orientation);
        }

        let expected = (300.0 / WIDTH) * 0.01 * PI;
        for total in totals {
            assert!((total - expected).abs() < 1e-12, "{total} != {expected}");
        }
    }

    #[test]
    fn move_without_press_is_ignored_but_consumed() {
        let mut controller = RotationController::new();
        let mut recorder = Recorder::default();
        let mut orientation = 1.0;

        let response = controller.handle(
            &InputEvent::PointerMove { client_x: 500.0 },
            &mut orientation,
            WIDTH,
            &mut recorder,
        );

        assert_eq!(response, EventResponse::Consumed);
        assert_eq!(orientation, 1.0);
        assert_eq!(controller.rotation_speed(), 0.0);
        assert!(recorder.rotating.is_empty());
    }

    #[test]
    fn pointer_down_and_up_notify_observer() {
        let mut controller = RotationController::new();
        let mut recorder = Recorder::default();
        let mut orientation = 0.0;

        controller.handle(
            &InputEvent::PointerDown { client_x: 10.0 },
            &mut orientation,
            WIDTH,
            &mut recorder,
        );
        assert!(controller.is_rotating());
        controller.handle(&InputEvent::PointerUp, &mut orientation, WIDTH, &mut recorder);
        assert!(!controller.is_rotating());

        assert_eq!(recorder.rotating, vec![true, false]);
        // Drag session is left in place after release
        assert_eq!(controller.drag().last_x, 10.0);
    }

    #[test]
    fn touch_reads_first_point_only() {
        let mut controller = RotationController::new();
        let mut recorder = Recorder::default();
        let mut orientation = 0.0;

        controller.handle(
            &InputEvent::TouchStart {
                touches: vec![TouchPoint { client_x: 0.0 }, TouchPoint { client_x: 700.0 }],
            },
            &mut orientation,
            WIDTH,
            &mut recorder,
        );
        controller.handle(
            &InputEvent::TouchMove {
                touches: vec![TouchPoint { client_x: 80.0 }, TouchPoint { client_x: 10.0 }],
            },
            &mut orientation,
            WIDTH,
            &mut recorder,
        );

        let expected = (80.0 / WIDTH) * 0.01 * PI;
        assert!((orientation - expected).abs() < 1e-12);
        assert!((controller.rotation_speed() - expected).abs() < 1e-12);

        let response =
            controller.handle(&InputEvent::TouchEnd, &mut orientation, WIDTH, &mut recorder);
        assert_eq!(response, EventResponse::Consumed);
        assert!(!controller.is_rotating());
    }

    #[test]
    fn empty_touch_list_is_consumed_and_ignored() {
        let mut controller = RotationController::new();
        let mut recorder = Recorder::default();
        let mut orientation = 0.0;

        let response = controller.handle(
            &InputEvent::TouchStart { touches: Vec::new() },
            &mut orientation,
            WIDTH,
            &mut recorder,
        );

        assert_eq!(response, EventResponse::Consumed);
        assert!(!controller.is_rotating());
    }

    #[test]
    fn damping_decays_geometrically_then_snaps_to_zero() {
        let mut controller = RotationController {
            rotation_speed: 0.1,
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        let mut orientation = 0.0;
        let mut expected: f64 = 0.1;

        loop {
            controller.tick(&mut orientation, &mut recorder);
            expected *= 0.95;
            if expected.abs() < 0.001 {
                assert_eq!(controller.rotation_speed(), 0.0);
                break;
            }
            assert_eq!(controller.rotation_speed(), expected);
        }

        let rest = orientation;
        for _ in 0..5 {
            controller.tick(&mut orientation, &mut recorder);
        }
        assert_eq!(orientation, rest);
        assert!(recorder.stages.is_empty());
    }

    #[test]
    fn release_after_drag_decays_without_reversing() {
        let mut controller = RotationController::new();
        let mut recorder = Recorder::default();
        let mut orientation = 0.0;

        // 0.02 rad/frame: delta = 0.02 / (0.01 * PI)
        let width = 1.0;
        let dx = 0.02 / (0.01 * PI);
        controller.handle(
            &InputEvent::PointerDown { client_x: 0.0 },
            &mut orientation,
            width,
            &mut recorder,
        );
        controller.handle(
            &InputEvent::PointerMove { client_x: dx },
            &mut orientation,
            width,
            &mut recorder,
        );
        assert!((controller.rotation_speed() - 0.02).abs() < 1e-12);
        controller.handle(&InputEvent::PointerUp, &mut orientation, width, &mut recorder);

        let mut previous = controller.rotation_speed();
        let mut previous_orientation = orientation;
        for _ in 0..200 {
            controller.tick(&mut orientation, &mut recorder);
            let speed = controller.rotation_speed();
            assert!(speed >= 0.0);
            assert!(speed <= previous);
            assert!(orientation >= previous_orientation);
            previous = speed;
            previous_orientation = orientation;
        }
        assert_eq!(controller.rotation_speed(), 0.0);
    }

    #[test]
    fn key_hold_steps_each_press_and_freezes_stage_on_release() {
        let mut controller = RotationController::new();
        let mut recorder = Recorder::default();
        let mut orientation = 0.0;

        for _ in 0..3 {
            let response =
                controller.handle(
                    &key_down(Key::ArrowLeft),
                    &mut orientation,
                    WIDTH,
                    &mut recorder,
                );
            assert_eq!(response, EventResponse::PassThrough);
            assert!(controller.is_rotating());
            controller.tick(&mut orientation, &mut recorder);
        }

        assert!((orientation - 3.0 * 0.005 * PI).abs() < 1e-12);
        assert_eq!(controller.rotation_speed(), 0.007);
        // Auto-repeat does not re-announce rotation
        assert_eq!(recorder.rotating, vec![true]);
        assert_eq!(recorder.stages.len(), 3);

        controller.handle(&key_up(Key::ArrowLeft), &mut orientation, WIDTH, &mut recorder);
        assert!(!controller.is_rotating());
        assert_eq!(recorder.rotating, vec![true, false]);

        let frozen = controller.stage();
        for _ in 0..10 {
            controller.tick(&mut orientation, &mut recorder);
        }
        assert_eq!(controller.stage(), frozen);
        assert_eq!(recorder.stages.len(), 3);
    }

    #[test]
    fn arrow_right_turns_the_other_way() {
        let mut controller = RotationController::new();
        let mut recorder = Recorder::default();
        let mut orientation = 0.0;

        controller.handle(&key_down(Key::ArrowRight), &mut orientation, WIDTH, &mut recorder);

        assert!((orientation + 0.005 * PI).abs() < 1e-12);
        assert_eq!(controller.rotation_speed(), -0.007);
    }

    #[test]
    fn other_keys_pass_through_untouched() {
        let mut controller = RotationController::new();
        let mut recorder = Recorder::default();
        let mut orientation = 2.0;

        let down = key_down(Key::Other("Enter".into()));
        let up = key_up(Key::Other("Enter".into()));
        assert_eq!(
            controller.handle(&down, &mut orientation, WIDTH, &mut recorder),
            EventResponse::PassThrough
        );
        controller.handle(&up, &mut orientation, WIDTH, &mut recorder);

        assert_eq!(orientation, 2.0);
        assert!(recorder.rotating.is_empty());
        assert_eq!(down.response(), EventResponse::PassThrough);
    }

    #[test]
    fn stage_reported_every_frame_while_rotating() {
        let mut controller = RotationController::new();
        let mut recorder = Recorder::default();
        let mut orientation = 5.6 + 4.0 * PI;

        controller.handle(
            &InputEvent::PointerDown { client_x: 0.0 },
            &mut orientation,
            WIDTH,
            &mut recorder,
        );
        for _ in 0..4 {
            controller.tick(&mut orientation, &mut recorder);
        }
        assert_eq!(recorder.stages, vec![Stage::Four; 4]);

        orientation = 3.0;
        controller.tick(&mut orientation, &mut recorder);
        assert_eq!(controller.stage(), Stage::Unset);

        // Normalizes to 1.0
        orientation = 1.0 - 2.0 * PI;
        controller.tick(&mut orientation, &mut recorder);
        assert_eq!(controller.stage(), Stage::Three);
    }

    #[test]
    fn key_after_drag_overrides_speed() {
        let mut controller = RotationController::new();
        let mut recorder = Recorder::default();
        let mut orientation = 0.0;

        controller.handle(
            &InputEvent::PointerDown { client_x: 0.0 },
            &mut orientation,
            WIDTH,
            &mut recorder,
        );
        controller.handle(
            &InputEvent::PointerMove { client_x: 400.0 },
            &mut orientation,
            WIDTH,
            &mut recorder,
        );
        controller.handle(&key_down(Key::ArrowRight), &mut orientation, WIDTH, &mut recorder);
        assert_eq!(controller.rotation_speed(), -0.007);

        // Key release ends rotation even though the pointer is still down
        controller.handle(&key_up(Key::ArrowRight), &mut orientation, WIDTH, &mut recorder);
        assert!(!controller.is_rotating());
    }
}
