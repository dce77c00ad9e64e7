//! The placement reticle: a flat ring that marks where an object would land

use std::f32::consts::TAU;

use arplace_core::{HitSample, ObjectTransform, Point3f, ReticleConfig, TriangleMesh, Vector3f};
use tracing::trace;

/// Visual marker tracking the current hit sample
///
/// Built once per controller and reused across placement sessions. The
/// ring geometry lies in the XZ plane facing +Y, so aligning the
/// transform's up axis with a surface normal lays it flat on the surface.
#[derive(Debug, Clone)]
pub struct Reticle {
    config: ReticleConfig,
    mesh: TriangleMesh,
    transform: ObjectTransform,
    visible: bool,
}

impl Reticle {
    pub fn new(config: ReticleConfig) -> Self {
        let mesh = ring_geometry(config.inner_radius, config.outer_radius, config.segments);
        trace!(vertices = mesh.vertex_count(), "reticle geometry built");
        Self {
            config,
            mesh,
            transform: ObjectTransform::identity(),
            visible: false,
        }
    }

    pub fn config(&self) -> &ReticleConfig {
        &self.config
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn transform(&self) -> &ObjectTransform {
        &self.transform
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Follow a hit sample and become visible
    ///
    /// Returns whether the orientation was updated from a normal.
    pub fn track(&mut self, hit: &HitSample) -> bool {
        self.visible = true;
        hit.apply_to(&mut self.transform)
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Prepare for a new session without reallocating geometry
    pub fn reset(&mut self) {
        self.visible = false;
        self.transform = ObjectTransform::identity();
    }

    /// Free the ring geometry
    pub fn release(&mut self) {
        self.visible = false;
        self.mesh.clear();
    }
}

/// Flat annulus in the XZ plane with +Y facing triangles
fn ring_geometry(inner: f32, outer: f32, segments: usize) -> TriangleMesh {
    let segments = segments.max(3);
    let mut mesh = TriangleMesh::new();

    for i in 0..segments {
        let theta = TAU * i as f32 / segments as f32;
        let (sin, cos) = theta.sin_cos();
        mesh.add_vertex(Point3f::new(inner * cos, 0.0, -inner * sin));
        mesh.add_vertex(Point3f::new(outer * cos, 0.0, -outer * sin));
    }

    for i in 0..segments {
        let j = (i + 1) % segments;
        let (inner_i, outer_i) = (2 * i, 2 * i + 1);
        let (inner_j, outer_j) = (2 * j, 2 * j + 1);
        mesh.add_face([inner_i, outer_i, outer_j]);
        mesh.add_face([inner_i, outer_j, inner_j]);
    }

    let vertex_count = mesh.vertex_count();
    mesh.set_normals(vec![Vector3f::y(); vertex_count]);
    mesh
}
