//! Component kinds and the [`ScriptComponent`] contract.
//!
//! ## Closed kind set
//!
//! The engine and the scripting layer agree on a fixed, numbered list of
//! component kinds. [`ComponentKind`] is `#[repr(u32)]` so the discriminant is
//! exactly what crosses the native boundary; no runtime type information is
//! involved. Hosts that bind components by name can resolve them through
//! [`ComponentKind::from_name`].

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Every component kind a script can query for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum ComponentKind {
    Transform = 0,
    Camera = 1,
    BoxCollider = 2,
    SphereCollider = 3,
    CharacterController = 4,
    Sounds = 5,
}

impl ComponentKind {
    /// All kinds, in discriminant order.
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Transform,
        ComponentKind::Camera,
        ComponentKind::BoxCollider,
        ComponentKind::SphereCollider,
        ComponentKind::CharacterController,
        ComponentKind::Sounds,
    ];

    /// Namespace prefix managed hosts put in front of component type names.
    pub const MANAGED_NAMESPACE: &'static str = "Helios.";

    /// The wire value passed across the native boundary.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Decode a wire value. Returns `None` for values outside the known set.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Transform),
            1 => Some(Self::Camera),
            2 => Some(Self::BoxCollider),
            3 => Some(Self::SphereCollider),
            4 => Some(Self::CharacterController),
            5 => Some(Self::Sounds),
            _ => None,
        }
    }

    /// The component's type name as the engine registers it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transform => "TransformComponent",
            Self::Camera => "CameraComponent",
            Self::BoxCollider => "BoxColliderComponent",
            Self::SphereCollider => "SphereColliderComponent",
            Self::CharacterController => "CharacterControllerComponent",
            Self::Sounds => "SoundsComponent",
        }
    }

    /// Resolve a type name, with or without the managed namespace prefix.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.strip_prefix(Self::MANAGED_NAMESPACE).unwrap_or(name);
        Self::ALL.into_iter().find(|kind| kind.name() == short)
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) mod sealed {
    use crate::entity::Entity;

    /// Proof that the caller is inside this crate.
    pub struct Token(());

    impl Token {
        pub(crate) const fn new() -> Self {
            Self(())
        }
    }

    /// Wrapper construction. Needs a [`Token`], so the capability check in
    /// [`Entity::get_component`] cannot be skipped from outside the crate.
    pub trait Bind: Sized {
        fn bind(entity: Entity, token: Token) -> Self;
    }
}

/// A typed facade over one component kind of an entity.
///
/// Implementors store nothing but the owning [`Entity`]; all state lives in
/// the engine. [`Entity::get_component`] is the only constructor: it builds
/// a wrapper once the engine has confirmed the capability. The trait is
/// sealed, so wrappers cannot be bound directly:
///
/// ```compile_fail
/// use engine_script::{Entity, TransformComponent};
///
/// fn unchecked(entity: Entity) -> TransformComponent {
///     TransformComponent::bind(entity)
/// }
/// ```
///
/// ```compile_fail
/// use engine_script::{Entity, ScriptComponent};
///
/// fn unchecked<C: ScriptComponent>(entity: Entity) -> C {
///     C::bind(entity)
/// }
/// ```
pub trait ScriptComponent: sealed::Bind {
    /// The kind tag sent to the engine for capability queries.
    const KIND: ComponentKind;

    /// The entity this wrapper forwards for.
    fn entity(&self) -> &Entity;
}
