//! Scene objects and the shared handles the controllers write through
//!
//! Objects belong to the external scene graph. The renderer reads their
//! transforms every frame while the placement and scale controllers write
//! them, all on the same UI thread, so a handle is a single-threaded
//! `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::{
    mesh::TriangleMesh,
    traits::{Aabb, Bounded},
    transform::ObjectTransform,
};

/// Stable identity of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Allocate a process-unique identifier
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Anything the scene graph can hold and the controllers can move
pub trait SceneObject: Bounded {
    fn id(&self) -> ObjectId;

    fn transform(&self) -> &ObjectTransform;

    fn transform_mut(&mut self) -> &mut ObjectTransform;
}

/// Shared handle to a scene object
pub type ObjectHandle = Rc<RefCell<dyn SceneObject>>;

/// Wrap an object into a shared handle
pub fn share<O: SceneObject + 'static>(object: O) -> ObjectHandle {
    Rc::new(RefCell::new(object))
}

/// A named mesh placed in the scene
#[derive(Debug, Clone)]
pub struct ModelObject {
    id: ObjectId,
    pub name: String,
    pub mesh: TriangleMesh,
    pub transform: ObjectTransform,
}

impl ModelObject {
    pub fn new(name: impl Into<String>, mesh: TriangleMesh) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            mesh,
            transform: ObjectTransform::identity(),
        }
    }
}

impl Bounded for ModelObject {
    fn local_bounds(&self) -> Option<Aabb> {
        self.mesh.local_bounds()
    }
}

impl SceneObject for ModelObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn transform(&self) -> &ObjectTransform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut ObjectTransform {
        &mut self.transform
    }
}
