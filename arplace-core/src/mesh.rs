//! Mesh data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces in object space
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
        }
    }

    /// Axis-aligned box mesh centered on the origin
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
        let vertices = vec![
            Point3f::new(-hx, -hy, -hz),
            Point3f::new(hx, -hy, -hz),
            Point3f::new(hx, hy, -hz),
            Point3f::new(-hx, hy, -hz),
            Point3f::new(-hx, -hy, hz),
            Point3f::new(hx, -hy, hz),
            Point3f::new(hx, hy, hz),
            Point3f::new(-hx, hy, hz),
        ];
        let faces = vec![
            [0, 2, 1], [0, 3, 2],
            [4, 5, 6], [4, 6, 7],
            [0, 1, 5], [0, 5, 4],
            [3, 7, 6], [3, 6, 2],
            [0, 4, 7], [0, 7, 3],
            [1, 2, 6], [1, 6, 5],
        ];
        Self::from_vertices_and_faces(vertices, faces)
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Drop all geometry, releasing its memory
    pub fn clear(&mut self) {
        self.vertices = Vec::new();
        self.faces = Vec::new();
        self.normals = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_topology() {
        let mesh = TriangleMesh::cuboid(1.0, 2.0, 3.0);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 12);
        assert!(mesh.faces.iter().flatten().all(|&i| i < mesh.vertex_count()));
    }

    #[test]
    fn test_normals_must_match_vertex_count() {
        let mut mesh = TriangleMesh::cuboid(1.0, 1.0, 1.0);
        mesh.set_normals(vec![Vector3f::y(); 3]);
        assert!(mesh.normals.is_none());
        mesh.set_normals(vec![Vector3f::y(); 8]);
        assert!(mesh.normals.is_some());
    }

    #[test]
    fn test_clear_empties_mesh() {
        let mut mesh = TriangleMesh::cuboid(1.0, 1.0, 1.0);
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertices.capacity(), 0);
    }
}
