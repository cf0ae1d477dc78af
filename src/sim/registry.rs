//! Type registry: stable type id → factory for a blank instance
//!
//! Built once at start-up and passed by reference to whatever spawns or loads
//! objects. Nothing is registered implicitly.

use std::collections::HashMap;

use super::object::{ObjectHandle, ObjectTypeId, Storable};
use crate::error::{Error, Result};

/// Zero-argument constructor for one concrete type
pub type Factory = Box<dyn Fn() -> ObjectHandle>;

struct Entry {
    name: &'static str,
    factory: Factory,
}

/// Closed mapping from [`ObjectTypeId`] to factory
#[derive(Default)]
pub struct TypeRegistry {
    entries: HashMap<ObjectTypeId, Entry>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `T` under its own [`Storable::TYPE_ID`].
    ///
    /// A second registration of the same id is a programming error; callers
    /// are expected to abort start-up on it.
    pub fn register<T: Storable>(&mut self) -> Result<()> {
        let id = T::TYPE_ID;
        if let Some(existing) = self.entries.get(&id) {
            return Err(Error::DuplicateTypeRegistration {
                id,
                existing: existing.name,
                duplicate: T::NAME,
            });
        }

        log::debug!("Registered {} as type {}", T::NAME, id);
        self.entries.insert(
            id,
            Entry {
                name: T::NAME,
                factory: Box::new(move || -> ObjectHandle { Box::new(T::blank(id)) }),
            },
        );
        Ok(())
    }

    /// Builder form of [`TypeRegistry::register`]
    pub fn with<T: Storable>(mut self) -> Result<Self> {
        self.register::<T>()?;
        Ok(self)
    }

    /// Blank instance of `T`, used for ordinary spawning.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered. Spawning an unregistered type is a
    /// bug in the caller, not a runtime condition.
    pub fn create<T: Storable>(&self) -> ObjectHandle {
        match self.entries.get(&T::TYPE_ID) {
            Some(entry) => (entry.factory)(),
            None => panic!("{} (type {}) spawned before registration", T::NAME, T::TYPE_ID),
        }
    }

    /// Blank instance for an id read from external data
    pub fn create_by_id(&self, id: ObjectTypeId) -> Result<ObjectHandle> {
        self.entries
            .get(&id)
            .map(|entry| (entry.factory)())
            .ok_or(Error::UnknownTypeId { id, index: None })
    }

    /// Registered name for `id`, if any
    pub fn name_of(&self, id: ObjectTypeId) -> Option<&'static str> {
        self.entries.get(&id).map(|entry| entry.name)
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> Vec<ObjectTypeId> {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for id in self.ids() {
            map.entry(&id, &self.name_of(id).unwrap_or_default());
        }
        map.finish()
    }
}
