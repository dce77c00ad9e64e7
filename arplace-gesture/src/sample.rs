//! Gesture samples pushed to the registered callbacks

use serde::{Deserialize, Serialize};

/// Two-finger scale, relative to the distance at gesture start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pinch {
    pub scale: f32,
}

/// Two-finger rotation in radians, relative to the angle at gesture start.
///
/// The angle difference is wrapped into (-π, π], so a finger pair crossing
/// the `atan2` seam reports a small turn instead of a near full-turn jump.
/// It equals the raw `current - initial` difference modulo 2π.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotate {
    pub rotation: f32,
}

/// One-finger movement since the previous move, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pan {
    pub delta_x: f32,
    pub delta_y: f32,
}

/// Which gesture a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    Pinch,
    Rotate,
    Pan,
}

/// Any gesture sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureSample {
    Pinch(Pinch),
    Rotate(Rotate),
    Pan(Pan),
}

impl GestureSample {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureSample::Pinch(_) => GestureKind::Pinch,
            GestureSample::Rotate(_) => GestureKind::Rotate,
            GestureSample::Pan(_) => GestureKind::Pan,
        }
    }
}

impl From<Pinch> for GestureSample {
    fn from(p: Pinch) -> Self {
        GestureSample::Pinch(p)
    }
}

impl From<Rotate> for GestureSample {
    fn from(r: Rotate) -> Self {
        GestureSample::Rotate(r)
    }
}

impl From<Pan> for GestureSample {
    fn from(p: Pan) -> Self {
        GestureSample::Pan(p)
    }
}
