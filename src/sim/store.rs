//! Owned, ordered collection of live objects

use super::object::{GameObject, ObjectHandle, ObjectTypeId, Storable};
use super::registry::TypeRegistry;
use crate::error::Result;
use crate::renderer::Canvas;

/// Exclusive owner of every live object.
///
/// Insertion order is draw order and save order.
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: Vec<ObjectHandle>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Append an already constructed object
    pub fn push(&mut self, object: ObjectHandle) {
        self.objects.push(object);
    }

    /// Append a blank `T` from the registry; returns it for initialisation
    pub fn spawn<T: Storable>(&mut self, registry: &TypeRegistry) -> &mut dyn GameObject {
        self.push_last(registry.create::<T>())
    }

    /// Append a blank instance of a runtime-chosen type
    pub fn spawn_id(
        &mut self,
        id: ObjectTypeId,
        registry: &TypeRegistry,
    ) -> Result<&mut dyn GameObject> {
        let object = registry.create_by_id(id)?;
        Ok(self.push_last(object))
    }

    fn push_last(&mut self, object: ObjectHandle) -> &mut dyn GameObject {
        self.objects.push(object);
        let last = self.objects.len() - 1;
        self.objects[last].as_mut()
    }

    /// Update every object once in order, dropping those that report expiry.
    /// Returns how many were removed.
    pub fn update_all(&mut self) -> usize {
        self.retain_mut(|object| object.update())
    }

    /// Single forward pass; objects for which `keep` returns false are
    /// dropped immediately and the rest keep their relative order.
    pub fn retain_mut<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&mut dyn GameObject) -> bool,
    {
        let before = self.objects.len();
        self.objects.retain_mut(|object| keep(object.as_mut()));
        before - self.objects.len()
    }

    /// Draw every object in order
    pub fn draw_all(&self, canvas: &mut dyn Canvas) {
        for object in &self.objects {
            object.draw(canvas);
        }
    }

    pub fn for_each<F: FnMut(&dyn GameObject)>(&self, mut f: F) {
        for object in &self.objects {
            f(object.as_ref());
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectHandle> {
        self.objects.iter()
    }

    /// Type ids in current order
    pub fn type_ids(&self) -> Vec<ObjectTypeId> {
        self.iter().map(|object| object.identity()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&dyn GameObject> {
        self.objects.get(index).map(|object| object.as_ref())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drop every object
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Reserve room for `additional` more objects
    pub fn reserve(&mut self, additional: usize) {
        self.objects.reserve(additional);
    }
}
