//! Typed component wrappers.
//!
//! Every wrapper is a pass-through: getters hand the engine a zeroed output
//! and return whatever it wrote, setters hand the engine the new value and
//! return nothing. None of them cache.

mod camera;
mod character;
mod collider;
mod sounds;
mod transform;

pub use camera::CameraComponent;
pub use character::CharacterControllerComponent;
pub use collider::{BoxColliderComponent, SphereColliderComponent};
pub use sounds::SoundsComponent;
pub use transform::TransformComponent;
