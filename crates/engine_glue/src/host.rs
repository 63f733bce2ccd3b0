//! In-memory reference engine.
//!
//! [`SceneHost`] answers every [`InternalCalls`] operation from its own
//! tables. It keeps just enough state to make scripts observable: component
//! presence, transforms, body and character velocities, a first/third person
//! camera, a sound playback log and input state. [`SceneHost::advance`]
//! integrates velocities for one step. It is not a physics engine.
//!
//! Calls against unknown entities, or against a component the entity does
//! not have, log a warning and leave outputs untouched.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use dashmap::{DashMap, DashSet};
use engine_math::{EulerRot, Quat, Vec2, Vec3};
use engine_script::{ComponentKind, EntityId, InternalCalls, KeyCode, MouseButton};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Downward acceleration applied to airborne characters, in units/s².
pub const GRAVITY: f32 = 9.81;

/// Camera pitch limit in degrees.
const MAX_CAMERA_PITCH: f32 = 89.0;

/// Default distance between an orbiting camera and its entity.
const DEFAULT_ORBIT_DISTANCE: f32 = 5.0;

/// How a sound was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundMode {
    Global,
    Local,
}

/// One recorded sound trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundEvent {
    pub entity: EntityId,
    pub index: i32,
    pub mode: SoundMode,
}

#[derive(Debug, Clone, Copy)]
struct TransformState {
    translation: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CameraState {
    /// Degrees about Y.
    yaw: f32,
    /// Degrees about X, clamped to ±[`MAX_CAMERA_PITCH`].
    pitch: f32,
    orbit_distance: f32,
    eye: Vec3,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            orbit_distance: DEFAULT_ORBIT_DISTANCE,
            eye: Vec3::ZERO,
        }
    }
}

impl CameraState {
    fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        )
    }

    fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    fn right(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }

    fn apply_rotation(&mut self, rotation: Vec2, speed: f32, inverse_controls: bool) {
        self.yaw -= rotation.x * speed;
        let vertical = rotation.y * speed;
        self.pitch += if inverse_controls { vertical } else { -vertical };
        self.pitch = self.pitch.clamp(-MAX_CAMERA_PITCH, MAX_CAMERA_PITCH);
    }
}

#[derive(Debug, Clone, Copy)]
struct BodyState {
    linear_velocity: Vec3,
    angular_velocity: Vec3,
    mass: f32,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 1.0,
        }
    }
}

impl BodyState {
    fn apply_impulse(&mut self, impulse: Vec3) {
        self.linear_velocity += impulse / self.mass;
    }

    /// Unit inertia: angular impulse maps straight onto angular velocity.
    fn apply_angular_impulse(&mut self, impulse: Vec3) {
        self.angular_velocity += impulse;
    }
}

#[derive(Debug, Clone, Copy)]
struct CharacterState {
    linear_velocity: Vec3,
    rotation: Vec3,
    grounded: bool,
    mass: f32,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            linear_velocity: Vec3::ZERO,
            rotation: Vec3::ZERO,
            grounded: true,
            mass: 1.0,
        }
    }
}

#[derive(Debug, Default)]
struct EntityRecord {
    components: BTreeSet<ComponentKind>,
    transform: TransformState,
    camera: CameraState,
    box_body: BodyState,
    sphere_body: BodyState,
    character: CharacterState,
}

/// Reference engine backing the script boundary with in-memory state.
#[derive(Debug, Default)]
pub struct SceneHost {
    entities: DashMap<EntityId, EntityRecord>,
    keys: DashSet<KeyCode>,
    mouse_buttons: DashSet<MouseButton>,
    mouse_position: Mutex<Vec2>,
    sounds: Mutex<Vec<SoundEvent>>,
}

impl SceneHost {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity with a random 64-bit id. Every entity gets a
    /// transform; `components` adds the rest.
    pub fn spawn(&self, components: &[ComponentKind]) -> EntityId {
        let id = loop {
            let (candidate, _) = Uuid::new_v4().as_u64_pair();
            let candidate = EntityId::from_raw(candidate);
            if candidate.is_valid() && !self.entities.contains_key(&candidate) {
                break candidate;
            }
        };
        self.insert(id, components);
        id
    }

    /// Create (or replace) an entity under a caller-chosen id.
    pub fn insert(&self, id: EntityId, components: &[ComponentKind]) {
        let mut record = EntityRecord::default();
        record.components.insert(ComponentKind::Transform);
        record.components.extend(components.iter().copied());
        debug!(entity = %id, components = record.components.len(), "entity created");
        self.entities.insert(id, record);
    }

    /// Attach a component. Returns `false` if the entity does not exist.
    pub fn add_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        match self.entities.get_mut(&id) {
            Some(mut record) => {
                record.components.insert(kind);
                true
            }
            None => false,
        }
    }

    /// Detach a component. Returns `true` if it was present.
    pub fn remove_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.entities
            .get_mut(&id)
            .is_some_and(|mut record| record.components.remove(&kind))
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All live entity ids, sorted.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Set the mass used when converting impulses for every body on `id`.
    /// Masses that are not finite and positive are ignored.
    pub fn set_mass(&self, id: EntityId, mass: f32) {
        if !(mass.is_finite() && mass > 0.0) {
            warn!(entity = %id, mass, "ignoring non-positive mass");
            return;
        }
        if let Some(mut record) = self.entities.get_mut(&id) {
            record.box_body.mass = mass;
            record.sphere_body.mass = mass;
            record.character.mass = mass;
        }
    }

    pub fn set_key_pressed(&self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    pub fn set_mouse_button_pressed(&self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }
    }

    pub fn set_mouse_position(&self, position: Vec2) {
        *self
            .mouse_position
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = position;
    }

    /// Sounds triggered so far, oldest first.
    #[must_use]
    pub fn played_sounds(&self) -> Vec<SoundEvent> {
        self.sounds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the sound log.
    pub fn take_played_sounds(&self) -> Vec<SoundEvent> {
        std::mem::take(&mut *self.sounds.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Where the entity's camera currently sits.
    #[must_use]
    pub fn camera_eye(&self, id: EntityId) -> Option<Vec3> {
        self.entities.get(&id).map(|record| record.camera.eye)
    }

    /// Advance the scene by `dt` seconds.
    ///
    /// Bodies move by their linear velocity. Characters also fall under
    /// [`GRAVITY`] while airborne and land on the `y = 0` plane.
    pub fn advance(&self, dt: f32) {
        for mut entry in self.entities.iter_mut() {
            let record = entry.value_mut();
            if record.components.contains(&ComponentKind::BoxCollider) {
                record.transform.translation += record.box_body.linear_velocity * dt;
            }
            if record.components.contains(&ComponentKind::SphereCollider) {
                record.transform.translation += record.sphere_body.linear_velocity * dt;
            }
            if record.components.contains(&ComponentKind::CharacterController) {
                let character = &mut record.character;
                if !character.grounded {
                    character.linear_velocity.y -= GRAVITY * dt;
                }
                record.transform.translation += character.linear_velocity * dt;
                if record.transform.translation.y <= 0.0 {
                    record.transform.translation.y = 0.0;
                    character.linear_velocity.y = character.linear_velocity.y.max(0.0);
                    character.grounded = character.linear_velocity.y <= 0.0;
                } else {
                    character.grounded = false;
                }
            }
        }
    }

    fn read<R>(
        &self,
        id: EntityId,
        kind: ComponentKind,
        call: &'static str,
        f: impl FnOnce(&EntityRecord) -> R,
    ) -> Option<R> {
        let Some(record) = self.entities.get(&id) else {
            warn!(entity = %id, call, "call on unknown entity");
            return None;
        };
        if !record.components.contains(&kind) {
            warn!(entity = %id, call, component = %kind, "call on missing component");
            return None;
        }
        Some(f(record.value()))
    }

    fn write(
        &self,
        id: EntityId,
        kind: ComponentKind,
        call: &'static str,
        f: impl FnOnce(&mut EntityRecord),
    ) {
        let Some(mut record) = self.entities.get_mut(&id) else {
            warn!(entity = %id, call, "call on unknown entity");
            return;
        };
        if !record.components.contains(&kind) {
            warn!(entity = %id, call, component = %kind, "call on missing component");
            return;
        }
        f(record.value_mut());
    }

    fn read_into<T>(
        &self,
        id: EntityId,
        kind: ComponentKind,
        call: &'static str,
        out: &mut T,
        f: impl FnOnce(&EntityRecord) -> T,
    ) {
        if let Some(value) = self.read(id, kind, call, f) {
            *out = value;
        }
    }

    fn record_sound(&self, entity: EntityId, index: i32, mode: SoundMode) {
        if self
            .read(entity, ComponentKind::Sounds, "sounds_play_sound_at_index", |_| ())
            .is_none()
        {
            return;
        }
        debug!(entity = %entity, index, ?mode, "sound triggered");
        self.sounds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SoundEvent {
                entity,
                index,
                mode,
            });
    }
}

impl InternalCalls for SceneHost {
    fn entity_destroy(&self, entity_id: EntityId) {
        if self.entities.remove(&entity_id).is_some() {
            debug!(entity = %entity_id, "entity destroyed");
        } else {
            warn!(entity = %entity_id, "destroy of unknown entity");
        }
    }

    fn entity_has_component(&self, entity_id: EntityId, kind: ComponentKind) -> bool {
        self.entities
            .get(&entity_id)
            .is_some_and(|record| record.components.contains(&kind))
    }

    fn transform_get_translation(&self, entity_id: EntityId, out_translation: &mut Vec3) {
        self.read_into(
            entity_id,
            ComponentKind::Transform,
            "transform_get_translation",
            out_translation,
            |r| r.transform.translation,
        );
    }

    fn transform_set_translation(&self, entity_id: EntityId, translation: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::Transform,
            "transform_set_translation",
            |r| r.transform.translation = *translation,
        );
    }

    fn transform_get_rotation(&self, entity_id: EntityId, out_rotation: &mut Vec3) {
        self.read_into(
            entity_id,
            ComponentKind::Transform,
            "transform_get_rotation",
            out_rotation,
            |r| r.transform.rotation,
        );
    }

    fn transform_set_rotation(&self, entity_id: EntityId, rotation: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::Transform,
            "transform_set_rotation",
            |r| r.transform.rotation = *rotation,
        );
    }

    fn transform_get_scale(&self, entity_id: EntityId, out_scale: &mut Vec3) {
        self.read_into(
            entity_id,
            ComponentKind::Transform,
            "transform_get_scale",
            out_scale,
            |r| r.transform.scale,
        );
    }

    fn transform_set_scale(&self, entity_id: EntityId, scale: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::Transform,
            "transform_set_scale",
            |r| r.transform.scale = *scale,
        );
    }

    fn camera_rotate_around_entity(
        &self,
        entity_id: EntityId,
        rotation: &Vec2,
        speed: f32,
        inverse_controls: bool,
    ) {
        self.write(
            entity_id,
            ComponentKind::Camera,
            "camera_rotate_around_entity",
            |r| {
                r.camera.apply_rotation(*rotation, speed, inverse_controls);
                r.camera.eye =
                    r.transform.translation - r.camera.forward() * r.camera.orbit_distance;
            },
        );
    }

    fn camera_rotate(&self, entity_id: EntityId, rotation: &Vec2, speed: f32, inverse_controls: bool) {
        self.write(entity_id, ComponentKind::Camera, "camera_rotate", |r| {
            r.camera.apply_rotation(*rotation, speed, inverse_controls);
            r.camera.eye = r.transform.translation;
        });
    }

    fn camera_get_forward_direction(&self, entity_id: EntityId, out_direction: &mut Vec3) {
        self.read_into(
            entity_id,
            ComponentKind::Camera,
            "camera_get_forward_direction",
            out_direction,
            |r| r.camera.forward(),
        );
    }

    fn camera_get_right_direction(&self, entity_id: EntityId, out_direction: &mut Vec3) {
        self.read_into(
            entity_id,
            ComponentKind::Camera,
            "camera_get_right_direction",
            out_direction,
            |r| r.camera.right(),
        );
    }

    fn box_collider_get_linear_velocity(&self, entity_id: EntityId, out_velocity: &mut Vec3) {
        self.read_into(
            entity_id,
            ComponentKind::BoxCollider,
            "box_collider_get_linear_velocity",
            out_velocity,
            |r| r.box_body.linear_velocity,
        );
    }

    fn box_collider_set_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::BoxCollider,
            "box_collider_set_linear_velocity",
            |r| r.box_body.linear_velocity = *velocity,
        );
    }

    fn box_collider_add_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::BoxCollider,
            "box_collider_add_linear_velocity",
            |r| r.box_body.linear_velocity += *velocity,
        );
    }

    fn box_collider_add_angular_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::BoxCollider,
            "box_collider_add_angular_velocity",
            |r| r.box_body.angular_velocity += *velocity,
        );
    }

    fn box_collider_add_impulse(&self, entity_id: EntityId, impulse: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::BoxCollider,
            "box_collider_add_impulse",
            |r| r.box_body.apply_impulse(*impulse),
        );
    }

    fn box_collider_add_angular_impulse(&self, entity_id: EntityId, impulse: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::BoxCollider,
            "box_collider_add_angular_impulse",
            |r| r.box_body.apply_angular_impulse(*impulse),
        );
    }

    fn box_collider_add_linear_angular_impulse(
        &self,
        entity_id: EntityId,
        linear_impulse: &Vec3,
        angular_impulse: &Vec3,
    ) {
        self.write(
            entity_id,
            ComponentKind::BoxCollider,
            "box_collider_add_linear_angular_impulse",
            |r| {
                r.box_body.apply_impulse(*linear_impulse);
                r.box_body.apply_angular_impulse(*angular_impulse);
            },
        );
    }

    fn sphere_collider_get_linear_velocity(&self, entity_id: EntityId, out_velocity: &mut Vec3) {
        self.read_into(
            entity_id,
            ComponentKind::SphereCollider,
            "sphere_collider_get_linear_velocity",
            out_velocity,
            |r| r.sphere_body.linear_velocity,
        );
    }

    fn sphere_collider_set_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::SphereCollider,
            "sphere_collider_set_linear_velocity",
            |r| r.sphere_body.linear_velocity = *velocity,
        );
    }

    fn sphere_collider_add_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::SphereCollider,
            "sphere_collider_add_linear_velocity",
            |r| r.sphere_body.linear_velocity += *velocity,
        );
    }

    fn sphere_collider_add_angular_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::SphereCollider,
            "sphere_collider_add_angular_velocity",
            |r| r.sphere_body.angular_velocity += *velocity,
        );
    }

    fn sphere_collider_add_impulse(&self, entity_id: EntityId, impulse: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::SphereCollider,
            "sphere_collider_add_impulse",
            |r| r.sphere_body.apply_impulse(*impulse),
        );
    }

    fn sphere_collider_add_angular_impulse(&self, entity_id: EntityId, impulse: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::SphereCollider,
            "sphere_collider_add_angular_impulse",
            |r| r.sphere_body.apply_angular_impulse(*impulse),
        );
    }

    fn sphere_collider_add_linear_angular_impulse(
        &self,
        entity_id: EntityId,
        linear_impulse: &Vec3,
        angular_impulse: &Vec3,
    ) {
        self.write(
            entity_id,
            ComponentKind::SphereCollider,
            "sphere_collider_add_linear_angular_impulse",
            |r| {
                r.sphere_body.apply_impulse(*linear_impulse);
                r.sphere_body.apply_angular_impulse(*angular_impulse);
            },
        );
    }

    fn character_controller_get_linear_velocity(
        &self,
        entity_id: EntityId,
        out_velocity: &mut Vec3,
    ) {
        self.read_into(
            entity_id,
            ComponentKind::CharacterController,
            "character_controller_get_linear_velocity",
            out_velocity,
            |r| r.character.linear_velocity,
        );
    }

    fn character_controller_set_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::CharacterController,
            "character_controller_set_linear_velocity",
            |r| r.character.linear_velocity = *velocity,
        );
    }

    fn character_controller_add_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::CharacterController,
            "character_controller_add_linear_velocity",
            |r| r.character.linear_velocity += *velocity,
        );
    }

    fn character_controller_add_impulse(&self, entity_id: EntityId, impulse: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::CharacterController,
            "character_controller_add_impulse",
            |r| {
                let character = &mut r.character;
                character.linear_velocity += *impulse / character.mass;
                if character.linear_velocity.y > 0.0 {
                    character.grounded = false;
                }
            },
        );
    }

    fn character_controller_get_rotation(&self, entity_id: EntityId, out_rotation: &mut Vec3) {
        self.read_into(
            entity_id,
            ComponentKind::CharacterController,
            "character_controller_get_rotation",
            out_rotation,
            |r| r.character.rotation,
        );
    }

    fn character_controller_set_rotation(&self, entity_id: EntityId, rotation: &Vec3) {
        self.write(
            entity_id,
            ComponentKind::CharacterController,
            "character_controller_set_rotation",
            |r| r.character.rotation = *rotation,
        );
    }

    fn character_controller_is_grounded(&self, entity_id: EntityId) -> bool {
        self.read(
            entity_id,
            ComponentKind::CharacterController,
            "character_controller_is_grounded",
            |r| r.character.grounded,
        )
        .unwrap_or(false)
    }

    fn sounds_play_sound_at_index_global(&self, entity_id: EntityId, index: i32) {
        self.record_sound(entity_id, index, SoundMode::Global);
    }

    fn sounds_play_sound_at_index_local(&self, entity_id: EntityId, index: i32) {
        self.record_sound(entity_id, index, SoundMode::Local);
    }

    fn is_key_pressed(&self, key_code: KeyCode) -> bool {
        self.keys.contains(&key_code)
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    fn get_mouse_position(&self, out_position: &mut Vec2) {
        *out_position = *self
            .mouse_position
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_spawn_always_has_transform() {
        let host = SceneHost::new();
        let id = host.spawn(&[ComponentKind::Camera]);
        assert!(id.is_valid());
        assert!(host.entity_has_component(id, ComponentKind::Transform));
        assert!(host.entity_has_component(id, ComponentKind::Camera));
        assert!(!host.entity_has_component(id, ComponentKind::Sounds));
    }

    #[test]
    fn test_spawned_ids_are_unique() {
        let host = SceneHost::new();
        let a = host.spawn(&[]);
        let b = host.spawn(&[]);
        assert_ne!(a, b);
        assert_eq!(host.entity_count(), 2);
    }

    #[test]
    fn test_default_scale_is_one() {
        let host = SceneHost::new();
        let id = host.spawn(&[]);
        let mut scale = Vec3::ZERO;
        host.transform_get_scale(id, &mut scale);
        assert_eq!(scale, Vec3::ONE);
    }

    #[test]
    fn test_unknown_entity_leaves_output_untouched() {
        let host = SceneHost::new();
        let mut out = Vec3::splat(7.0);
        host.transform_get_translation(EntityId::from_raw(1), &mut out);
        assert_eq!(out, Vec3::splat(7.0));
        assert!(!host.entity_has_component(EntityId::from_raw(1), ComponentKind::Transform));
    }

    #[test]
    fn test_missing_component_call_is_ignored() {
        let host = SceneHost::new();
        let id = host.spawn(&[]);
        host.box_collider_set_linear_velocity(id, &Vec3::X);
        host.add_component(id, ComponentKind::BoxCollider);
        let mut velocity = Vec3::splat(9.0);
        host.box_collider_get_linear_velocity(id, &mut velocity);
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn test_destroy_removes_entity() {
        let host = SceneHost::new();
        let id = host.spawn(&[]);
        host.entity_destroy(id);
        assert!(!host.contains(id));
        // Destroying twice is harmless.
        host.entity_destroy(id);
    }

    #[test]
    fn test_impulse_divides_by_mass() {
        let host = SceneHost::new();
        let id = host.spawn(&[ComponentKind::SphereCollider]);
        host.set_mass(id, 2.0);
        host.sphere_collider_add_impulse(id, &Vec3::new(4.0, 0.0, 0.0));
        let mut velocity = Vec3::ZERO;
        host.sphere_collider_get_linear_velocity(id, &mut velocity);
        assert_eq!(velocity, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_non_positive_mass_is_ignored() {
        let host = SceneHost::new();
        let id = host.spawn(&[ComponentKind::BoxCollider, ComponentKind::CharacterController]);
        host.set_mass(id, 2.0);
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            host.set_mass(id, bad);
        }

        host.box_collider_add_impulse(id, &Vec3::new(4.0, 0.0, 0.0));
        host.character_controller_add_impulse(id, &Vec3::new(0.0, 0.0, 4.0));
        let (mut body, mut character) = (Vec3::ZERO, Vec3::ZERO);
        host.box_collider_get_linear_velocity(id, &mut body);
        host.character_controller_get_linear_velocity(id, &mut character);
        assert_eq!(body, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(character, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_advance_moves_bodies() {
        let host = SceneHost::new();
        let id = host.spawn(&[ComponentKind::BoxCollider]);
        host.box_collider_set_linear_velocity(id, &Vec3::new(1.0, 0.0, -2.0));
        host.advance(0.5);
        let mut translation = Vec3::ZERO;
        host.transform_get_translation(id, &mut translation);
        assert_eq!(translation, Vec3::new(0.5, 0.0, -1.0));
    }

    #[test]
    fn test_character_jump_and_land() {
        let host = SceneHost::new();
        let id = host.spawn(&[ComponentKind::CharacterController]);
        assert!(host.character_controller_is_grounded(id));

        host.character_controller_add_impulse(id, &Vec3::new(0.0, 5.0, 0.0));
        assert!(!host.character_controller_is_grounded(id));

        host.advance(0.1);
        assert!(!host.character_controller_is_grounded(id));

        for _ in 0..50 {
            host.advance(0.1);
        }
        assert!(host.character_controller_is_grounded(id));
        let mut translation = Vec3::ONE;
        host.transform_get_translation(id, &mut translation);
        assert_eq!(translation.y, 0.0);
    }

    #[test]
    fn test_camera_default_directions() {
        let host = SceneHost::new();
        let id = host.spawn(&[ComponentKind::Camera]);
        let mut forward = Vec3::ZERO;
        let mut right = Vec3::ZERO;
        host.camera_get_forward_direction(id, &mut forward);
        host.camera_get_right_direction(id, &mut right);
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(right.abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn test_camera_rotate_turns_right_and_clamps_pitch() {
        let host = SceneHost::new();
        let id = host.spawn(&[ComponentKind::Camera]);
        host.camera_rotate(id, &Vec2::new(90.0, 0.0), 1.0, false);
        let mut forward = Vec3::ZERO;
        host.camera_get_forward_direction(id, &mut forward);
        assert!(forward.abs_diff_eq(Vec3::X, EPS), "{forward:?}");

        host.camera_rotate(id, &Vec2::new(0.0, -1000.0), 1.0, false);
        host.camera_get_forward_direction(id, &mut forward);
        assert!(forward.y > 0.99);
    }

    #[test]
    fn test_camera_inverse_controls_flip_vertical() {
        let host = SceneHost::new();
        let normal = host.spawn(&[ComponentKind::Camera]);
        let inverted = host.spawn(&[ComponentKind::Camera]);
        host.camera_rotate(normal, &Vec2::new(0.0, 10.0), 1.0, false);
        host.camera_rotate(inverted, &Vec2::new(0.0, 10.0), 1.0, true);
        let (mut a, mut b) = (Vec3::ZERO, Vec3::ZERO);
        host.camera_get_forward_direction(normal, &mut a);
        host.camera_get_forward_direction(inverted, &mut b);
        assert!((a.y + b.y).abs() < EPS);
        assert!(a.y < 0.0);
    }

    #[test]
    fn test_camera_orbit_places_eye_behind_entity() {
        let host = SceneHost::new();
        let id = host.spawn(&[ComponentKind::Camera]);
        host.transform_set_translation(id, &Vec3::new(0.0, 1.0, 0.0));
        host.camera_rotate_around_entity(id, &Vec2::ZERO, 1.0, false);
        let eye = host.camera_eye(id).unwrap();
        assert!(eye.abs_diff_eq(Vec3::new(0.0, 1.0, DEFAULT_ORBIT_DISTANCE), EPS));
    }

    #[test]
    fn test_sounds_are_recorded_in_order() {
        let host = SceneHost::new();
        let id = host.spawn(&[ComponentKind::Sounds]);
        let silent = host.spawn(&[]);
        host.sounds_play_sound_at_index_global(id, 2);
        host.sounds_play_sound_at_index_local(id, 0);
        host.sounds_play_sound_at_index_local(silent, 1);
        assert_eq!(
            host.take_played_sounds(),
            vec![
                SoundEvent {
                    entity: id,
                    index: 2,
                    mode: SoundMode::Global
                },
                SoundEvent {
                    entity: id,
                    index: 0,
                    mode: SoundMode::Local
                },
            ]
        );
        assert!(host.played_sounds().is_empty());
    }

    #[test]
    fn test_input_state() {
        let host = SceneHost::new();
        host.set_key_pressed(KeyCode::SPACE, true);
        host.set_mouse_button_pressed(MouseButton::LEFT, true);
        host.set_mouse_position(Vec2::new(100.0, 200.0));
        assert!(host.is_key_pressed(KeyCode::SPACE));
        assert!(host.is_mouse_button_pressed(MouseButton::LEFT));
        let mut position = Vec2::ZERO;
        host.get_mouse_position(&mut position);
        assert_eq!(position, Vec2::new(100.0, 200.0));

        host.set_key_pressed(KeyCode::SPACE, false);
        assert!(!host.is_key_pressed(KeyCode::SPACE));
    }
}
