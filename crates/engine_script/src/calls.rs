//! The call boundary between scripts and the native engine.
//!
//! [`InternalCalls`] is the whole contract: every script-visible operation is
//! one method here, grouped by the engine subsystem it targets. Argument
//! order and the in/out conventions are part of that contract: inputs that
//! the engine takes by reference are `&T`, outputs the engine writes are
//! `&mut T`. Implementations are expected to either perform the call or leave
//! the output untouched; there is no error channel.

use engine_math::{Vec2, Vec3};

use crate::component::ComponentKind;
use crate::entity::EntityId;
use crate::input::{KeyCode, MouseButton};

/// Native engine calls reachable from scripts.
///
/// Implemented by the host: either directly in Rust, or through a table of C
/// function pointers.
pub trait InternalCalls: Send + Sync {
    // Entity lifecycle

    /// Request destruction of an entity. Fire-and-forget.
    fn entity_destroy(&self, entity_id: EntityId);

    /// Returns whether the entity currently carries the given component.
    fn entity_has_component(&self, entity_id: EntityId, kind: ComponentKind) -> bool;

    // Transform

    /// Write the entity's position into `out_translation`.
    fn transform_get_translation(&self, entity_id: EntityId, out_translation: &mut Vec3);
    /// Move the entity to `translation`.
    fn transform_set_translation(&self, entity_id: EntityId, translation: &Vec3);
    /// Write the entity's Euler rotation in degrees into `out_rotation`.
    fn transform_get_rotation(&self, entity_id: EntityId, out_rotation: &mut Vec3);
    /// Set the entity's Euler rotation in degrees.
    fn transform_set_rotation(&self, entity_id: EntityId, rotation: &Vec3);
    /// Write the entity's per-axis scale into `out_scale`.
    fn transform_get_scale(&self, entity_id: EntityId, out_scale: &mut Vec3);
    /// Set the entity's per-axis scale.
    fn transform_set_scale(&self, entity_id: EntityId, scale: &Vec3);

    // Camera

    /// Orbit the camera around its entity (third person).
    fn camera_rotate_around_entity(
        &self,
        entity_id: EntityId,
        rotation: &Vec2,
        speed: f32,
        inverse_controls: bool,
    );
    /// Rotate the camera in place (first person).
    fn camera_rotate(&self, entity_id: EntityId, rotation: &Vec2, speed: f32, inverse_controls: bool);
    /// Write the camera's unit forward vector into `out_direction`.
    fn camera_get_forward_direction(&self, entity_id: EntityId, out_direction: &mut Vec3);
    /// Write the camera's unit right vector into `out_direction`.
    fn camera_get_right_direction(&self, entity_id: EntityId, out_direction: &mut Vec3);

    // Box collider

    /// Write the body's linear velocity into `out_velocity`.
    fn box_collider_get_linear_velocity(&self, entity_id: EntityId, out_velocity: &mut Vec3);
    /// Replace the body's linear velocity.
    fn box_collider_set_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3);
    /// Add `velocity` to the body's linear velocity.
    fn box_collider_add_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3);
    /// Add `velocity` to the body's angular velocity.
    fn box_collider_add_angular_velocity(&self, entity_id: EntityId, velocity: &Vec3);
    /// Apply a linear impulse at the centre of mass.
    fn box_collider_add_impulse(&self, entity_id: EntityId, impulse: &Vec3);
    /// Apply an angular impulse.
    fn box_collider_add_angular_impulse(&self, entity_id: EntityId, impulse: &Vec3);
    /// Apply a linear and an angular impulse in one call.
    fn box_collider_add_linear_angular_impulse(
        &self,
        entity_id: EntityId,
        linear_impulse: &Vec3,
        angular_impulse: &Vec3,
    );

    // Sphere collider

    /// Write the body's linear velocity into `out_velocity`.
    fn sphere_collider_get_linear_velocity(&self, entity_id: EntityId, out_velocity: &mut Vec3);
    /// Replace the body's linear velocity.
    fn sphere_collider_set_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3);
    /// Add `velocity` to the body's linear velocity.
    fn sphere_collider_add_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3);
    /// Add `velocity` to the body's angular velocity.
    fn sphere_collider_add_angular_velocity(&self, entity_id: EntityId, velocity: &Vec3);
    /// Apply a linear impulse at the centre of mass.
    fn sphere_collider_add_impulse(&self, entity_id: EntityId, impulse: &Vec3);
    /// Apply an angular impulse.
    fn sphere_collider_add_angular_impulse(&self, entity_id: EntityId, impulse: &Vec3);
    /// Apply a linear and an angular impulse in one call.
    fn sphere_collider_add_linear_angular_impulse(
        &self,
        entity_id: EntityId,
        linear_impulse: &Vec3,
        angular_impulse: &Vec3,
    );

    // Character controller

    /// Write the character's linear velocity into `out_velocity`.
    fn character_controller_get_linear_velocity(
        &self,
        entity_id: EntityId,
        out_velocity: &mut Vec3,
    );
    /// Replace the character's linear velocity.
    fn character_controller_set_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3);
    /// Add `velocity` to the character's linear velocity.
    fn character_controller_add_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3);
    /// Apply a linear impulse to the character.
    fn character_controller_add_impulse(&self, entity_id: EntityId, impulse: &Vec3);
    /// Euler angles in degrees (`x` pitch, `y` yaw, `z` roll).
    fn character_controller_get_rotation(&self, entity_id: EntityId, out_rotation: &mut Vec3);
    /// Euler angles in degrees (`x` pitch, `y` yaw, `z` roll).
    fn character_controller_set_rotation(&self, entity_id: EntityId, rotation: &Vec3);
    /// Returns whether the character is standing on something.
    fn character_controller_is_grounded(&self, entity_id: EntityId) -> bool;

    // Sounds

    /// Play sound `index` of the entity's sound list without spatialisation.
    fn sounds_play_sound_at_index_global(&self, entity_id: EntityId, index: i32);
    /// Play sound `index` of the entity's sound list positioned at the entity.
    fn sounds_play_sound_at_index_local(&self, entity_id: EntityId, index: i32);

    // Input

    /// Returns whether `key_code` is currently held down.
    fn is_key_pressed(&self, key_code: KeyCode) -> bool;
    /// Returns whether `button` is currently held down.
    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;
    /// Write the cursor position in window coordinates into `out_position`.
    fn get_mouse_position(&self, out_position: &mut Vec2);
}
