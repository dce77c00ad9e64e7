//! The touch-tracking state machine behind the recognizer
//!
//! Idle -> OneTouch | TwoTouch -> Idle. One- and two-finger tracking are
//! mutually exclusive within a touch sequence: adding a second finger
//! re-arms the pinch/rotate baseline, and lifting down to fewer than two
//! fingers ends the two-finger gesture without a synthetic final sample.
//! Lifting one of the armed fingers while two others remain re-arms on the
//! remaining pair.

use std::f32::consts::{PI, TAU};

use arplace_core::{Point2f, Vector2f};
use tracing::trace;

use crate::{
    sample::{GestureSample, Pan, Pinch, Rotate},
    touch::{EventResponse, TouchEvent, TouchId, TouchPhase, TouchPoint},
};

/// Which kind of sequence is being tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingPhase {
    #[default]
    Idle,
    OneTouch,
    TwoTouch,
}

/// Geometry of the two contacts when the two-finger gesture started
#[derive(Debug, Clone, Copy, PartialEq)]
struct TwoTouchBaseline {
    ids: [TouchId; 2],
    distance: f32,
    angle: f32,
    center: Point2f,
}

/// Samples produced by one event and how the platform should treat it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerOutput {
    pub samples: Vec<GestureSample>,
    pub response: EventResponse,
}

/// Pure gesture state machine, fed one event at a time
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    phase: TrackingPhase,
    // Kept across releases; only the next gesture start re-arms it.
    baseline: Option<TwoTouchBaseline>,
    pan_touch: Option<TouchId>,
    last_pan: Option<Point2f>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TrackingPhase {
        self.phase
    }

    /// Whether the current sequence owns the input
    pub fn is_tracking(&self) -> bool {
        self.phase != TrackingPhase::Idle
    }

    /// Midpoint of the two contacts when the last two-finger gesture started
    pub fn initial_center(&self) -> Option<Point2f> {
        self.baseline.map(|b| b.center)
    }

    /// Distance between the two contacts when the last two-finger gesture started
    pub fn initial_distance(&self) -> Option<f32> {
        self.baseline.map(|b| b.distance)
    }

    /// Drop all tracking state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the state machine by one event
    pub fn process(&mut self, event: &TouchEvent) -> TrackerOutput {
        match event.phase {
            TouchPhase::Start => {
                self.touch_start(&event.touches);
                TrackerOutput::default()
            }
            TouchPhase::Move => self.touch_move(event),
            TouchPhase::End | TouchPhase::Cancel => {
                self.touch_end(&event.touches);
                TrackerOutput::default()
            }
        }
    }

    fn touch_start(&mut self, touches: &[TouchPoint]) {
        match touches {
            [first, second, ..] => {
                // A third finger does not disturb a gesture already in progress.
                if self.phase != TrackingPhase::TwoTouch {
                    self.arm_two_touch(first, second);
                }
            }
            [only] => {
                if self.phase == TrackingPhase::Idle {
                    self.pan_touch = Some(only.id);
                    self.last_pan = Some(only.position());
                    self.set_phase(TrackingPhase::OneTouch);
                }
            }
            [] => {}
        }
    }

    fn arm_two_touch(&mut self, a: &TouchPoint, b: &TouchPoint) {
        let (pa, pb) = (a.position(), b.position());
        let span = pb - pa;
        self.baseline = Some(TwoTouchBaseline {
            ids: [a.id, b.id],
            distance: span.norm(),
            angle: span.y.atan2(span.x),
            center: Point2f::from((pa.coords + pb.coords) / 2.0),
        });
        self.pan_touch = None;
        self.last_pan = None;
        self.set_phase(TrackingPhase::TwoTouch);
    }

    fn touch_move(&mut self, event: &TouchEvent) -> TrackerOutput {
        let samples = match self.phase {
            TrackingPhase::Idle => return TrackerOutput::default(),
            TrackingPhase::TwoTouch => self.two_touch_move(event),
            TrackingPhase::OneTouch => self.one_touch_move(event),
        };
        TrackerOutput {
            samples,
            response: EventResponse::PreventDefault,
        }
    }

    fn two_touch_move(&self, event: &TouchEvent) -> Vec<GestureSample> {
        let Some(baseline) = self.baseline else {
            return Vec::new();
        };
        let Some((a, b)) = tracked_pair(event, baseline.ids) else {
            return Vec::new();
        };

        let span: Vector2f = b.position() - a.position();
        let initial = if baseline.distance == 0.0 {
            trace!("zero initial pinch distance, using 1");
            1.0
        } else {
            baseline.distance
        };
        let scale = span.norm() / initial;
        let rotation = wrap_angle(span.y.atan2(span.x) - baseline.angle);

        vec![Pinch { scale }.into(), Rotate { rotation }.into()]
    }

    fn one_touch_move(&mut self, event: &TouchEvent) -> Vec<GestureSample> {
        let touch = self
            .pan_touch
            .and_then(|id| event.touch(id))
            .or_else(|| event.touches.first());
        let (Some(touch), Some(last)) = (touch, self.last_pan) else {
            return Vec::new();
        };

        let current = touch.position();
        let delta = current - last;
        self.last_pan = Some(current);

        vec![Pan {
            delta_x: delta.x,
            delta_y: delta.y,
        }
        .into()]
    }

    fn touch_end(&mut self, remaining: &[TouchPoint]) {
        match self.phase {
            TrackingPhase::Idle => {}
            TrackingPhase::OneTouch => {
                if remaining.is_empty() {
                    self.set_phase(TrackingPhase::Idle);
                }
            }
            TrackingPhase::TwoTouch => match remaining {
                [first, second, ..] => {
                    let armed_lifted = self.baseline.is_some_and(|b| {
                        b.ids.iter().any(|id| !remaining.iter().any(|t| t.id == *id))
                    });
                    // Measure the surviving pair from where it is now.
                    if armed_lifted {
                        trace!(a = first.id, b = second.id, "armed contact lifted, re-arming");
                        self.arm_two_touch(first, second);
                    }
                }
                _ => self.set_phase(TrackingPhase::Idle),
            },
        }
    }

    fn set_phase(&mut self, phase: TrackingPhase) {
        if self.phase != phase {
            trace!(from = ?self.phase, to = ?phase, "gesture phase change");
            self.phase = phase;
        }
    }
}

/// The two contacts the baseline was armed with, or the first two listed
/// when either has gone away
fn tracked_pair(event: &TouchEvent, ids: [TouchId; 2]) -> Option<(&TouchPoint, &TouchPoint)> {
    match (event.touch(ids[0]), event.touch(ids[1])) {
        (Some(a), Some(b)) => Some((a, b)),
        _ => match event.touches.as_slice() {
            [a, b, ..] => Some((a, b)),
            _ => None,
        },
    }
}

/// Wrap an angle into (-π, π]
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
