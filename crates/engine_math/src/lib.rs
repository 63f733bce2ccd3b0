//! # engine_math
//!
//! Math types for the scripting surface. Re-exports [`glam`] for linear
//! algebra and defines the Euler/quaternion conversions the character
//! controller exposes to scripts.

pub mod rotation;

// Re-export glam types for convenience.
pub use glam::{EulerRot, Quat, Vec2, Vec3};

pub use rotation::{euler_degrees_to_quat, quat_to_euler_degrees};
