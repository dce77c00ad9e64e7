//! Bounding boxes and the trait for things that have them

use serde::{Deserialize, Serialize};

use crate::{mesh::TriangleMesh, point::*, transform::ObjectTransform};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, `None` when there are none
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3f>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut min = first;
        let mut max = first;

        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector3f {
        self.max - self.min
    }

    /// Largest extent along any axis
    pub fn max_dimension(&self) -> f32 {
        self.size().max()
    }

    pub fn center(&self) -> Point3f {
        nalgebra::center(&self.min, &self.max)
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Point3f; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3f::new(a.x, a.y, a.z),
            Point3f::new(b.x, a.y, a.z),
            Point3f::new(a.x, b.y, a.z),
            Point3f::new(b.x, b.y, a.z),
            Point3f::new(a.x, a.y, b.z),
            Point3f::new(b.x, a.y, b.z),
            Point3f::new(a.x, b.y, b.z),
            Point3f::new(b.x, b.y, b.z),
        ]
    }

    /// Scene-space box enclosing this object-space box under `transform`
    pub fn transformed(&self, transform: &ObjectTransform) -> Self {
        let corners = self.corners().map(|c| transform.transform_point(&c));
        // Eight corners, never empty.
        Self::from_points(corners.iter()).unwrap_or(*self)
    }
}

/// Trait for objects with object-space geometry
pub trait Bounded {
    /// Bounding box of the untransformed geometry, `None` when there is none
    fn local_bounds(&self) -> Option<Aabb>;
}

impl Bounded for TriangleMesh {
    fn local_bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        assert!(TriangleMesh::new().local_bounds().is_none());
    }

    #[test]
    fn test_cuboid_bounds() {
        let bounds = TriangleMesh::cuboid(1.0, 2.0, 4.0).local_bounds().unwrap();
        assert_relative_eq!(bounds.size(), Vector3f::new(1.0, 2.0, 4.0));
        assert_relative_eq!(bounds.max_dimension(), 4.0);
        assert_relative_eq!(bounds.center(), Point3f::origin());
    }

    #[test]
    fn test_transformed_bounds_follow_scale_and_rotation() {
        let bounds = TriangleMesh::cuboid(1.0, 2.0, 4.0).local_bounds().unwrap();
        let mut transform = ObjectTransform::from_position_rotation(
            Point3f::new(5.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3f::y_axis(), std::f32::consts::FRAC_PI_2),
        );
        transform.set_uniform_scale(0.5);

        let world = bounds.transformed(&transform);
        assert_relative_eq!(world.size(), Vector3f::new(2.0, 1.0, 0.5), epsilon = 1e-5);
        assert_relative_eq!(world.center(), Point3f::new(5.0, 0.0, 0.0), epsilon = 1e-5);
    }
}
