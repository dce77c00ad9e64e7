//! Raw touch input as delivered by the platform input queue

use arplace_core::Point2f;
use serde::{Deserialize, Serialize};

/// Platform-assigned identifier, stable for the lifetime of one contact
pub type TouchId = u64;

/// A single active contact in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: TouchId,
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(id: TouchId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point2f {
        Point2f::new(self.x, self.y)
    }
}

/// What happened to the contact set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One touch event
///
/// `touches` lists every contact still on the surface after the event,
/// so an `End` that lifts the last finger carries an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>) -> Self {
        Self { phase, touches }
    }

    pub fn start(touches: Vec<TouchPoint>) -> Self {
        Self::new(TouchPhase::Start, touches)
    }

    pub fn moved(touches: Vec<TouchPoint>) -> Self {
        Self::new(TouchPhase::Move, touches)
    }

    pub fn end(touches: Vec<TouchPoint>) -> Self {
        Self::new(TouchPhase::End, touches)
    }

    pub fn cancel() -> Self {
        Self::new(TouchPhase::Cancel, Vec::new())
    }

    /// Find a contact by identifier
    pub fn touch(&self, id: TouchId) -> Option<&TouchPoint> {
        self.touches.iter().find(|t| t.id == id)
    }
}

/// How the platform should treat an event after the listeners ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventResponse {
    /// Let default scrolling and page gestures happen
    #[default]
    Pass,
    /// The gesture owns the input; suppress the default behavior
    PreventDefault,
}

impl EventResponse {
    /// Combine responses of several listeners; any veto wins
    pub fn merge(self, other: Self) -> Self {
        if self == Self::PreventDefault || other == Self::PreventDefault {
            Self::PreventDefault
        } else {
            Self::Pass
        }
    }
}
