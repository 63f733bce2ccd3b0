//! # engine_script
//!
//! The scripting-facing half of the engine boundary. Scripts never touch
//! engine state directly: they hold an [`Entity`] facade and ask it for typed
//! component wrappers, each of which forwards every access straight to the
//! native engine through [`InternalCalls`].
//!
//! This crate provides:
//!
//! - [`InternalCalls`]: the fixed catalogue of calls into the engine.
//! - [`EntityId`]: the opaque `u64` handle the engine hands out.
//! - [`Entity`]: capability queries, input polling and destroy requests.
//! - [`ComponentKind`] / [`ScriptComponent`]: the closed set of component
//!   kinds and the contract their wrappers satisfy.
//! - [`components`]: the typed wrappers themselves.

pub mod calls;
pub mod component;
pub mod components;
pub mod entity;
pub mod input;

pub use calls::InternalCalls;
pub use component::{ComponentKind, ScriptComponent};
pub use components::{
    BoxColliderComponent, CameraComponent, CharacterControllerComponent, SoundsComponent,
    SphereColliderComponent, TransformComponent,
};
pub use entity::{Entity, EntityId};
pub use input::{KeyCode, MouseButton};
