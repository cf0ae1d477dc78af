//! Scene objects and the loop that drives them
//!
//! Ownership rules:
//! - The store exclusively owns every live object
//! - The registry is built once and only ever borrowed
//! - Iteration order is insertion order (draw order and save order)

pub mod effects;
pub mod object;
pub mod registry;
pub mod store;
pub mod tick;

pub use effects::{EffectBlue, EffectRed, Motion, motion_of};
pub use object::{GameObject, ObjectHandle, ObjectTypeId, Storable};
pub use registry::{Factory, TypeRegistry};
pub use store::ObjectStore;
pub use tick::{FrameInput, FrameReport, Scene, SnapshotOutcome, tick};

/// Registry holding every object kind this crate ships
pub fn default_registry() -> crate::Result<TypeRegistry> {
    TypeRegistry::new()
        .with::<EffectRed>()?
        .with::<EffectBlue>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_both_effects() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.ids(), vec![ObjectTypeId(1), ObjectTypeId(2)]);
    }
}
