//! The contract every storable scene object implements
//!
//! Objects live in the store as `Box<dyn GameObject>`. Persistence never
//! dispatches on the concrete type: it asks each object for its identity and
//! lets the object stream its own fields.

use std::any::Any;
use std::fmt;
use std::io;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::persistence::{StateReader, StateWriter};
use crate::renderer::Canvas;

/// Stable, hand-assigned identifier of a concrete object type.
///
/// Written verbatim into snapshots, so a value must never be reused for a
/// different type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectTypeId(pub u64);

impl fmt::Display for ObjectTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owned handle to a live object of any registered type
pub type ObjectHandle = Box<dyn GameObject>;

/// Behaviour shared by every object the store can hold
pub trait GameObject: fmt::Debug {
    /// Type id assigned at construction. Never changes afterwards.
    fn identity(&self) -> ObjectTypeId;

    /// Advance one frame. Returns `false` once the object should be removed.
    fn update(&mut self) -> bool;

    /// Emit draw calls for the current state
    fn draw(&self, canvas: &mut dyn Canvas);

    /// Stream every field needed to rebuild this object
    fn write_state(&self, sink: &mut StateWriter<'_>) -> io::Result<()>;

    /// Read the fields written by [`GameObject::write_state`], in the same
    /// order, overwriting all current state
    fn read_state(&mut self, source: &mut StateReader<'_>) -> io::Result<()>;

    /// Place a freshly spawned object in the scene
    fn launch(&mut self, _origin: Vec2, _velocity: Vec2) {}

    /// Downcast hook for callers that know the concrete type
    fn as_any(&self) -> &dyn Any;
}

/// A concrete object type that can be registered with a
/// [`TypeRegistry`](super::TypeRegistry)
pub trait Storable: GameObject + Sized + 'static {
    /// Id written to snapshots for this type
    const TYPE_ID: ObjectTypeId;
    /// Human-readable name for logs and diagnostics
    const NAME: &'static str;

    /// Default-initialised instance tagged with `id`
    fn blank(id: ObjectTypeId) -> Self;
}
