//! The scene container seam
//!
//! The scene graph itself is external. The controllers only need to hand a
//! confirmed object over to it, so the trait stays narrow.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::object::{ObjectHandle, ObjectId};

/// External owner of all renderable objects
pub trait SceneContainer {
    /// Take shared ownership of an object
    fn add(&mut self, object: ObjectHandle);

    /// Give up an object, returning it if it was present
    fn remove(&mut self, id: ObjectId) -> Option<ObjectHandle>;

    fn contains(&self, id: ObjectId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared handle to a scene container
pub type SceneHandle = Rc<RefCell<dyn SceneContainer>>;

/// Minimal in-memory scene, in insertion order
#[derive(Default)]
pub struct Scene {
    objects: Vec<ObjectHandle>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared scene that controllers can hold on to
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn objects(&self) -> &[ObjectHandle] {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .find(|o| o.borrow().id() == id)
            .map(Rc::clone)
    }
}

impl SceneContainer for Scene {
    fn add(&mut self, object: ObjectHandle) {
        let id = object.borrow().id();
        if self.contains(id) {
            debug!(%id, "object already in scene");
            return;
        }
        debug!(%id, "adding object to scene");
        self.objects.push(object);
    }

    fn remove(&mut self, id: ObjectId) -> Option<ObjectHandle> {
        let index = self.objects.iter().position(|o| o.borrow().id() == id)?;
        Some(self.objects.remove(index))
    }

    fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.borrow().id() == id)
    }

    fn len(&self) -> usize {
        self.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mesh::TriangleMesh, object::{share, ModelObject}};

    #[test]
    fn test_add_remove() {
        let mut scene = Scene::new();
        let handle = share(ModelObject::new("lamp", TriangleMesh::new()));
        let id = handle.borrow().id();

        scene.add(Rc::clone(&handle));
        scene.add(Rc::clone(&handle));
        assert_eq!(scene.len(), 1);
        assert!(scene.contains(id));
        assert!(scene.get(id).is_some());

        assert!(scene.remove(id).is_some());
        assert!(scene.is_empty());
        assert!(scene.remove(id).is_none());
    }
}
