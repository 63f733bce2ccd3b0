//! Entity handles and the script-facing [`Entity`] facade.
//!
//! An [`EntityId`] is a lightweight `u64` handle on loan from the engine. It
//! carries no data and implies no ownership: the engine alone decides when
//! the underlying entity lives or dies.

use std::sync::Arc;

use engine_math::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::calls::InternalCalls;
use crate::component::ScriptComponent;
use crate::component::sealed::Token;
use crate::input::{KeyCode, MouseButton};

/// Opaque engine-assigned entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    /// The null / invalid entity sentinel.
    pub const INVALID: EntityId = EntityId(0);

    /// Create a handle from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is not the null sentinel.
    ///
    /// This says nothing about whether the engine still knows the entity.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Script-side view of an engine entity.
///
/// Holds the entity's id and the boundary used to reach the engine. Cloning
/// is cheap and every clone talks to the same engine-side entity.
#[derive(Clone)]
pub struct Entity {
    id: EntityId,
    calls: Arc<dyn InternalCalls>,
}

impl Entity {
    /// Wrap an engine-assigned id.
    #[must_use]
    pub fn new(id: EntityId, calls: Arc<dyn InternalCalls>) -> Self {
        Self { id, calls }
    }

    /// The engine id this facade forwards for.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The boundary this facade forwards through.
    #[must_use]
    pub fn calls(&self) -> &dyn InternalCalls {
        self.calls.as_ref()
    }

    /// Ask the engine to destroy this entity. No acknowledgement is returned
    /// and the id must not be used afterwards.
    pub fn self_destruct(&self) {
        self.destroy_entity(self.id);
    }

    /// Ask the engine to destroy another entity.
    pub fn destroy_entity(&self, id: EntityId) {
        debug!(entity = %id, requested_by = %self.id, "destroy requested");
        self.calls.entity_destroy(id);
    }

    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.calls.is_key_pressed(key)
    }

    #[must_use]
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.calls.is_mouse_button_pressed(button)
    }

    /// Cursor position in window coordinates.
    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        let mut position = Vec2::ZERO;
        self.calls.get_mouse_position(&mut position);
        position
    }

    /// Returns whether the engine-side entity currently has a `C` component.
    ///
    /// Re-evaluated by the engine on every call.
    #[must_use]
    pub fn has_component<C: ScriptComponent>(&self) -> bool {
        self.calls.entity_has_component(self.id, C::KIND)
    }

    /// Returns a fresh `C` wrapper bound to this entity, or `None` if the
    /// entity does not have that component.
    ///
    /// Every call builds a new wrapper; wrappers obtained from separate calls
    /// observe the same engine state.
    #[must_use]
    pub fn get_component<C: ScriptComponent>(&self) -> Option<C> {
        if !self.has_component::<C>() {
            trace!(entity = %self.id, component = %C::KIND, "component not present");
            return None;
        }
        Some(C::bind(self.clone(), Token::new()))
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity").field("id", &self.id).finish_non_exhaustive()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_creation() {
        let e = EntityId::from_raw(42);
        assert_eq!(e.raw(), 42);
        assert!(e.is_valid());
    }

    #[test]
    fn test_entity_id_invalid() {
        assert!(!EntityId::INVALID.is_valid());
        assert_eq!(EntityId::INVALID.raw(), 0);
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId::from_raw(7).to_string(), "Entity(7)");
    }
}
