//! Object transforms written by the controllers and read by the renderer

use nalgebra::{Isometry3, Matrix4, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::point::*;

/// Position, orientation and per-axis scale of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    pub position: Point3f,
    pub rotation: Rotation3f,
    pub scale: Vector3f,
}

impl ObjectTransform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Point3f::origin(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3f::new(1.0, 1.0, 1.0),
        }
    }

    /// Create a transform from a position and rotation with unit scale
    pub fn from_position_rotation(position: Point3f, rotation: Rotation3f) -> Self {
        Self {
            position,
            rotation,
            ..Self::identity()
        }
    }

    /// The uniform scale factor
    ///
    /// Controllers only ever write uniform scale, so the X component is
    /// authoritative.
    pub fn uniform_scale(&self) -> f32 {
        self.scale.x
    }

    /// Apply the same scale factor to all three axes
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vector3f::new(scale, scale, scale);
    }

    /// Copy position and orientation from another transform, keeping scale
    pub fn copy_pose_from(&mut self, other: &ObjectTransform) {
        self.position = other.position;
        self.rotation = other.rotation;
    }

    /// Rigid part of the transform
    pub fn isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.rotation)
    }

    /// Homogeneous matrix `T * R * S` for the renderer
    pub fn to_matrix(&self) -> Matrix4<f32> {
        self.isometry().to_homogeneous() * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Map a point from object space to scene space
    pub fn transform_point(&self, point: &Point3f) -> Point3f {
        let scaled = Point3f::from(point.coords.component_mul(&self.scale));
        self.isometry().transform_point(&scaled)
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Isometry3<f32>> for ObjectTransform {
    fn from(isometry: Isometry3<f32>) -> Self {
        Self::from_position_rotation(
            Point3f::from(isometry.translation.vector),
            isometry.rotation,
        )
    }
}
