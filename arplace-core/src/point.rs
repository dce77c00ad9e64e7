//! Point and vector types used throughout arplace
//!
//! Scene space is right-handed, +Y up, measured in meters. Screen space is
//! measured in platform pixels.

use nalgebra::{Point2, Point3, UnitQuaternion, Vector2, Vector3};

/// A 3D point in scene space
pub type Point3f = Point3<f32>;

/// A 3D vector in scene space
pub type Vector3f = Vector3<f32>;

/// A 2D point in screen space
pub type Point2f = Point2<f32>;

/// A 2D vector in screen space
pub type Vector2f = Vector2<f32>;

/// A unit rotation in scene space
pub type Rotation3f = UnitQuaternion<f32>;

/// The scene's "up" axis, which a flat reticle or object aligns to a surface normal
pub fn surface_up() -> Vector3f {
    Vector3f::y()
}

/// Rotation taking the local up axis onto `normal`
///
/// Returns `None` for a zero-length or non-finite normal, so callers keep
/// whatever orientation they had. An antiparallel normal flips around X.
pub fn rotation_from_normal(normal: &Vector3f) -> Option<Rotation3f> {
    let length = normal.norm();
    if !length.is_finite() || length <= f32::EPSILON {
        return None;
    }
    let unit = normal / length;
    UnitQuaternion::rotation_between(&surface_up(), &unit).or_else(|| {
        Some(UnitQuaternion::from_axis_angle(
            &Vector3f::x_axis(),
            std::f32::consts::PI,
        ))
    })
}
