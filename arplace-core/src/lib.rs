//! Core data structures and traits for arplace
//!
//! This crate provides the fundamental types shared by the gesture and
//! placement crates: scene-space math aliases, object transforms, meshes and
//! their bounding boxes, the scene container seam, configuration, and the
//! hit-test adapter that turns platform poses into scene-space samples.

pub mod point;
pub mod transform;
pub mod mesh;
pub mod traits;
pub mod object;
pub mod scene;
pub mod config;
pub mod error;

pub use point::*;
pub use transform::*;
pub use mesh::*;
pub use traits::*;
pub use object::*;
pub use scene::*;
pub use hit_test::*;
pub use config::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};
