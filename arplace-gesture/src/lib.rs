//! Multi-touch gesture recognition for arplace
//!
//! This crate fuses raw touch events into semantic gesture deltas:
//! - Pinch: cumulative scale factor relative to the two-finger gesture start
//! - Rotate: angle delta relative to the two-finger gesture start
//! - Pan: incremental one-finger translation since the previous move
//!
//! [`GestureTracker`] holds the pure state machine; [`GestureRecognizer`]
//! binds it to a [`TouchSurface`] and pushes samples to callbacks.

pub mod touch;
pub mod sample;
pub mod tracker;
pub mod surface;
pub mod recognizer;

pub use touch::*;
pub use sample::*;
pub use tracker::*;
pub use surface::*;
pub use recognizer::*;
