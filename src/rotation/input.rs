//! Input events forwarded from the page's input surface

use serde::{Deserialize, Serialize};

/// A single touch point; only the horizontal coordinate is read
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub client_x: f64,
}

/// Keyboard key, parsed from the DOM `KeyboardEvent.key` name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        match name.as_str() {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other(name),
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::ArrowLeft => "ArrowLeft".to_owned(),
            Key::ArrowRight => "ArrowRight".to_owned(),
            Key::Other(name) => name,
        }
    }
}

/// Raw input event as delivered by the input surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    #[serde(rename_all = "camelCase")]
    PointerDown { client_x: f64 },
    #[serde(rename_all = "camelCase")]
    PointerMove { client_x: f64 },
    PointerUp,
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd,
    KeyDown { key: Key },
    KeyUp { key: Key },
}

/// What the host should do with an event after the controller saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventResponse {
    /// Suppress the default action and stop propagation
    Consumed,
    /// Let the event continue to other listeners
    PassThrough,
}

impl InputEvent {
    /// Pointer and touch events belong to the island surface; keys are
    /// shared with the rest of the page
    pub fn response(&self) -> EventResponse {
        match self {
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } => EventResponse::PassThrough,
            _ => EventResponse::Consumed,
        }
    }
}

/// First touch point's coordinate; further touches are not disambiguated
pub(crate) fn first_touch_x(touches: &[TouchPoint]) -> Option<f64> {
    touches.first().map(|touch| touch.client_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_json() {
        let event: InputEvent =
            serde_json::from_str(r#"{"type":"pointerDown","clientX":120.5}"#).unwrap();
        assert_eq!(event, InputEvent::PointerDown { client_x: 120.5 });

        let event: InputEvent = serde_json::from_str(
            r#"{"type":"touchMove","touches":[{"clientX":4.0},{"clientX":90.0}]}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            InputEvent::TouchMove {
                touches: vec![TouchPoint { client_x: 4.0 }, TouchPoint { client_x: 90.0 }]
            }
        );

        let event: InputEvent = serde_json::from_str(r#"{"type":"pointerUp"}"#).unwrap();
        assert_eq!(event, InputEvent::PointerUp);
    }

    #[test]
    fn unknown_keys_are_kept() {
        let event: InputEvent =
            serde_json::from_str(r#"{"type":"keyDown","key":"ArrowLeft"}"#).unwrap();
        assert_eq!(event, InputEvent::KeyDown { key: Key::ArrowLeft });

        let event: InputEvent = serde_json::from_str(r#"{"type":"keyUp","key":"a"}"#).unwrap();
        assert_eq!(event, InputEvent::KeyUp { key: Key::Other("a".into()) });
    }

    #[test]
    fn only_first_touch_is_read() {
        let touches = [TouchPoint { client_x: 3.0 }, TouchPoint { client_x: 7.0 }];
        assert_eq!(first_touch_x(&touches), Some(3.0));
        assert_eq!(first_touch_x(&[]), None);
    }
}
