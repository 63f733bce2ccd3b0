//! C-ABI call table.
//!
//! A native engine exposes the boundary by filling a [`NativeCallTable`] with
//! function pointers and handing it to [`NativeCalls::bind`] (or
//! [`NativeCalls::from_raw`] across an FFI edge). Every slot mirrors one
//! [`InternalCalls`] method with the same argument order: ids are `u64`,
//! component kinds are their `u32` discriminant, key / mouse / sound codes
//! are `i32`, by-reference inputs are `*const`, outputs are `*mut`, vectors
//! are glam's `#[repr(C)]` [`Vec2`] / [`Vec3`].
//!
//! # Safety contract
//!
//! By building a table the host promises that every non-null pointer stays
//! callable for as long as the table is in use, may be called from any
//! thread, and only dereferences the pointer arguments for the duration of
//! the call.

use engine_math::{Vec2, Vec3};
use engine_script::{ComponentKind, EntityId, InternalCalls, KeyCode, MouseButton};
use tracing::debug;

use crate::error::GlueError;

pub type EntityFn = unsafe extern "C" fn(entity_id: u64);
pub type HasComponentFn = unsafe extern "C" fn(entity_id: u64, kind: u32) -> bool;
pub type EntityQueryFn = unsafe extern "C" fn(entity_id: u64) -> bool;
pub type GetVec3Fn = unsafe extern "C" fn(entity_id: u64, out: *mut Vec3);
pub type SetVec3Fn = unsafe extern "C" fn(entity_id: u64, value: *const Vec3);
pub type SetVec3PairFn =
    unsafe extern "C" fn(entity_id: u64, linear: *const Vec3, angular: *const Vec3);
pub type CameraRotateFn =
    unsafe extern "C" fn(entity_id: u64, rotation: *const Vec2, speed: f32, inverse_controls: bool);
pub type PlaySoundFn = unsafe extern "C" fn(entity_id: u64, index: i32);
pub type InputQueryFn = unsafe extern "C" fn(code: i32) -> bool;
pub type MousePositionFn = unsafe extern "C" fn(out: *mut Vec2);

/// Function-pointer table filled in by a native engine.
///
/// Slots are nullable so a partially filled table can be detected instead of
/// crashing; [`NativeCalls::bind`] rejects tables with empty slots.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCallTable {
    pub entity_destroy: Option<EntityFn>,
    pub entity_has_component: Option<HasComponentFn>,

    pub transform_get_translation: Option<GetVec3Fn>,
    pub transform_set_translation: Option<SetVec3Fn>,
    pub transform_get_rotation: Option<GetVec3Fn>,
    pub transform_set_rotation: Option<SetVec3Fn>,
    pub transform_get_scale: Option<GetVec3Fn>,
    pub transform_set_scale: Option<SetVec3Fn>,

    pub camera_rotate_around_entity: Option<CameraRotateFn>,
    pub camera_rotate: Option<CameraRotateFn>,
    pub camera_get_forward_direction: Option<GetVec3Fn>,
    pub camera_get_right_direction: Option<GetVec3Fn>,

    pub box_collider_get_linear_velocity: Option<GetVec3Fn>,
    pub box_collider_set_linear_velocity: Option<SetVec3Fn>,
    pub box_collider_add_linear_velocity: Option<SetVec3Fn>,
    pub box_collider_add_angular_velocity: Option<SetVec3Fn>,
    pub box_collider_add_impulse: Option<SetVec3Fn>,
    pub box_collider_add_angular_impulse: Option<SetVec3Fn>,
    pub box_collider_add_linear_angular_impulse: Option<SetVec3PairFn>,

    pub sphere_collider_get_linear_velocity: Option<GetVec3Fn>,
    pub sphere_collider_set_linear_velocity: Option<SetVec3Fn>,
    pub sphere_collider_add_linear_velocity: Option<SetVec3Fn>,
    pub sphere_collider_add_angular_velocity: Option<SetVec3Fn>,
    pub sphere_collider_add_impulse: Option<SetVec3Fn>,
    pub sphere_collider_add_angular_impulse: Option<SetVec3Fn>,
    pub sphere_collider_add_linear_angular_impulse: Option<SetVec3PairFn>,

    pub character_controller_get_linear_velocity: Option<GetVec3Fn>,
    pub character_controller_set_linear_velocity: Option<SetVec3Fn>,
    pub character_controller_add_linear_velocity: Option<SetVec3Fn>,
    pub character_controller_add_impulse: Option<SetVec3Fn>,
    pub character_controller_get_rotation: Option<GetVec3Fn>,
    pub character_controller_set_rotation: Option<SetVec3Fn>,
    pub character_controller_is_grounded: Option<EntityQueryFn>,

    pub sounds_play_sound_at_index_global: Option<PlaySoundFn>,
    pub sounds_play_sound_at_index_local: Option<PlaySoundFn>,

    pub is_key_pressed: Option<InputQueryFn>,
    pub is_mouse_button_pressed: Option<InputQueryFn>,
    pub get_mouse_position: Option<MousePositionFn>,
}

macro_rules! require_slots {
    ($table:expr; $($slot:ident),+ $(,)?) => {
        $(
            if $table.$slot.is_none() {
                return Err(GlueError::MissingCall(stringify!($slot)));
            }
        )+
    };
}

/// Call a slot, or return the type's default if the slot is empty.
macro_rules! forward {
    ($slot:expr $(, $arg:expr)*) => {
        match $slot {
            // SAFETY: see the module-level safety contract. Pointer arguments
            // come from live Rust references that outlive the call.
            Some(f) => unsafe { f($($arg),*) },
            None => Default::default(),
        }
    };
}

/// A validated [`NativeCallTable`] usable as the script boundary.
#[derive(Debug, Clone, Copy)]
pub struct NativeCalls {
    table: NativeCallTable,
}

impl NativeCalls {
    /// Validate that every slot of `table` is populated.
    ///
    /// # Errors
    ///
    /// Returns [`GlueError::MissingCall`] naming the first empty slot.
    pub fn bind(table: NativeCallTable) -> Result<Self, GlueError> {
        require_slots!(table;
            entity_destroy,
            entity_has_component,
            transform_get_translation,
            transform_set_translation,
            transform_get_rotation,
            transform_set_rotation,
            transform_get_scale,
            transform_set_scale,
            camera_rotate_around_entity,
            camera_rotate,
            camera_get_forward_direction,
            camera_get_right_direction,
            box_collider_get_linear_velocity,
            box_collider_set_linear_velocity,
            box_collider_add_linear_velocity,
            box_collider_add_angular_velocity,
            box_collider_add_impulse,
            box_collider_add_angular_impulse,
            box_collider_add_linear_angular_impulse,
            sphere_collider_get_linear_velocity,
            sphere_collider_set_linear_velocity,
            sphere_collider_add_linear_velocity,
            sphere_collider_add_angular_velocity,
            sphere_collider_add_impulse,
            sphere_collider_add_angular_impulse,
            sphere_collider_add_linear_angular_impulse,
            character_controller_get_linear_velocity,
            character_controller_set_linear_velocity,
            character_controller_add_linear_velocity,
            character_controller_add_impulse,
            character_controller_get_rotation,
            character_controller_set_rotation,
            character_controller_is_grounded,
            sounds_play_sound_at_index_global,
            sounds_play_sound_at_index_local,
            is_key_pressed,
            is_mouse_button_pressed,
            get_mouse_position,
        );
        debug!("native call table bound");
        Ok(Self { table })
    }

    /// Copy and validate a table handed over by pointer.
    ///
    /// # Errors
    ///
    /// Returns [`GlueError::NullTable`] for a null pointer, otherwise the
    /// same errors as [`NativeCalls::bind`].
    ///
    /// # Safety
    ///
    /// `table` must be null or point to a properly initialised
    /// [`NativeCallTable`].
    pub unsafe fn from_raw(table: *const NativeCallTable) -> Result<Self, GlueError> {
        if table.is_null() {
            return Err(GlueError::NullTable);
        }
        // SAFETY: non-null and initialised per the caller's contract.
        let table = unsafe { *table };
        Self::bind(table)
    }
}

impl InternalCalls for NativeCalls {
    fn entity_destroy(&self, entity_id: EntityId) {
        forward!(self.table.entity_destroy, entity_id.raw())
    }

    fn entity_has_component(&self, entity_id: EntityId, kind: ComponentKind) -> bool {
        forward!(self.table.entity_has_component, entity_id.raw(), kind.as_raw())
    }

    fn transform_get_translation(&self, entity_id: EntityId, out_translation: &mut Vec3) {
        forward!(self.table.transform_get_translation, entity_id.raw(), out_translation)
    }

    fn transform_set_translation(&self, entity_id: EntityId, translation: &Vec3) {
        forward!(self.table.transform_set_translation, entity_id.raw(), translation)
    }

    fn transform_get_rotation(&self, entity_id: EntityId, out_rotation: &mut Vec3) {
        forward!(self.table.transform_get_rotation, entity_id.raw(), out_rotation)
    }

    fn transform_set_rotation(&self, entity_id: EntityId, rotation: &Vec3) {
        forward!(self.table.transform_set_rotation, entity_id.raw(), rotation)
    }

    fn transform_get_scale(&self, entity_id: EntityId, out_scale: &mut Vec3) {
        forward!(self.table.transform_get_scale, entity_id.raw(), out_scale)
    }

    fn transform_set_scale(&self, entity_id: EntityId, scale: &Vec3) {
        forward!(self.table.transform_set_scale, entity_id.raw(), scale)
    }

    fn camera_rotate_around_entity(
        &self,
        entity_id: EntityId,
        rotation: &Vec2,
        speed: f32,
        inverse_controls: bool,
    ) {
        forward!(
            self.table.camera_rotate_around_entity,
            entity_id.raw(),
            rotation,
            speed,
            inverse_controls
        )
    }

    fn camera_rotate(&self, entity_id: EntityId, rotation: &Vec2, speed: f32, inverse_controls: bool) {
        forward!(
            self.table.camera_rotate,
            entity_id.raw(),
            rotation,
            speed,
            inverse_controls
        )
    }

    fn camera_get_forward_direction(&self, entity_id: EntityId, out_direction: &mut Vec3) {
        forward!(self.table.camera_get_forward_direction, entity_id.raw(), out_direction)
    }

    fn camera_get_right_direction(&self, entity_id: EntityId, out_direction: &mut Vec3) {
        forward!(self.table.camera_get_right_direction, entity_id.raw(), out_direction)
    }

    fn box_collider_get_linear_velocity(&self, entity_id: EntityId, out_velocity: &mut Vec3) {
        forward!(self.table.box_collider_get_linear_velocity, entity_id.raw(), out_velocity)
    }

    fn box_collider_set_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        forward!(self.table.box_collider_set_linear_velocity, entity_id.raw(), velocity)
    }

    fn box_collider_add_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        forward!(self.table.box_collider_add_linear_velocity, entity_id.raw(), velocity)
    }

    fn box_collider_add_angular_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        forward!(self.table.box_collider_add_angular_velocity, entity_id.raw(), velocity)
    }

    fn box_collider_add_impulse(&self, entity_id: EntityId, impulse: &Vec3) {
        forward!(self.table.box_collider_add_impulse, entity_id.raw(), impulse)
    }

    fn box_collider_add_angular_impulse(&self, entity_id: EntityId, impulse: &Vec3) {
        forward!(self.table.box_collider_add_angular_impulse, entity_id.raw(), impulse)
    }

    fn box_collider_add_linear_angular_impulse(
        &self,
        entity_id: EntityId,
        linear_impulse: &Vec3,
        angular_impulse: &Vec3,
    ) {
        forward!(
            self.table.box_collider_add_linear_angular_impulse,
            entity_id.raw(),
            linear_impulse,
            angular_impulse
        )
    }

    fn sphere_collider_get_linear_velocity(&self, entity_id: EntityId, out_velocity: &mut Vec3) {
        forward!(self.table.sphere_collider_get_linear_velocity, entity_id.raw(), out_velocity)
    }

    fn sphere_collider_set_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        forward!(self.table.sphere_collider_set_linear_velocity, entity_id.raw(), velocity)
    }

    fn sphere_collider_add_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        forward!(self.table.sphere_collider_add_linear_velocity, entity_id.raw(), velocity)
    }

    fn sphere_collider_add_angular_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        forward!(self.table.sphere_collider_add_angular_velocity, entity_id.raw(), velocity)
    }

    fn sphere_collider_add_impulse(&self, entity_id: EntityId, impulse: &Vec3) {
        forward!(self.table.sphere_collider_add_impulse, entity_id.raw(), impulse)
    }

    fn sphere_collider_add_angular_impulse(&self, entity_id: EntityId, impulse: &Vec3) {
        forward!(self.table.sphere_collider_add_angular_impulse, entity_id.raw(), impulse)
    }

    fn sphere_collider_add_linear_angular_impulse(
        &self,
        entity_id: EntityId,
        linear_impulse: &Vec3,
        angular_impulse: &Vec3,
    ) {
        forward!(
            self.table.sphere_collider_add_linear_angular_impulse,
            entity_id.raw(),
            linear_impulse,
            angular_impulse
        )
    }

    fn character_controller_get_linear_velocity(
        &self,
        entity_id: EntityId,
        out_velocity: &mut Vec3,
    ) {
        forward!(
            self.table.character_controller_get_linear_velocity,
            entity_id.raw(),
            out_velocity
        )
    }

    fn character_controller_set_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        forward!(
            self.table.character_controller_set_linear_velocity,
            entity_id.raw(),
            velocity
        )
    }

    fn character_controller_add_linear_velocity(&self, entity_id: EntityId, velocity: &Vec3) {
        forward!(
            self.table.character_controller_add_linear_velocity,
            entity_id.raw(),
            velocity
        )
    }

    fn character_controller_add_impulse(&self, entity_id: EntityId, impulse: &Vec3) {
        forward!(self.table.character_controller_add_impulse, entity_id.raw(), impulse)
    }

    fn character_controller_get_rotation(&self, entity_id: EntityId, out_rotation: &mut Vec3) {
        forward!(self.table.character_controller_get_rotation, entity_id.raw(), out_rotation)
    }

    fn character_controller_set_rotation(&self, entity_id: EntityId, rotation: &Vec3) {
        forward!(self.table.character_controller_set_rotation, entity_id.raw(), rotation)
    }

    fn character_controller_is_grounded(&self, entity_id: EntityId) -> bool {
        forward!(self.table.character_controller_is_grounded, entity_id.raw())
    }

    fn sounds_play_sound_at_index_global(&self, entity_id: EntityId, index: i32) {
        forward!(self.table.sounds_play_sound_at_index_global, entity_id.raw(), index)
    }

    fn sounds_play_sound_at_index_local(&self, entity_id: EntityId, index: i32) {
        forward!(self.table.sounds_play_sound_at_index_local, entity_id.raw(), index)
    }

    fn is_key_pressed(&self, key_code: KeyCode) -> bool {
        forward!(self.table.is_key_pressed, key_code.0)
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        forward!(self.table.is_mouse_button_pressed, button.0)
    }

    fn get_mouse_position(&self, out_position: &mut Vec2) {
        forward!(self.table.get_mouse_position, out_position)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::Arc;

    use engine_script::{Entity, TransformComponent};

    use super::*;

    thread_local! {
        static CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn record(line: String) {
        CALLS.with(|calls| calls.borrow_mut().push(line));
    }

    fn recorded() -> Vec<String> {
        CALLS.with(|calls| calls.borrow_mut().drain(..).collect())
    }

    unsafe extern "C" fn stub_entity(_: u64) {}
    unsafe extern "C" fn stub_query(_: u64) -> bool {
        false
    }
    unsafe extern "C" fn stub_get(_: u64, _: *mut Vec3) {}
    unsafe extern "C" fn stub_set(_: u64, _: *const Vec3) {}
    unsafe extern "C" fn stub_pair(_: u64, _: *const Vec3, _: *const Vec3) {}
    unsafe extern "C" fn stub_camera(_: u64, _: *const Vec2, _: f32, _: bool) {}
    unsafe extern "C" fn stub_sound(_: u64, _: i32) {}
    unsafe extern "C" fn stub_input(_: i32) -> bool {
        false
    }
    unsafe extern "C" fn stub_mouse(_: *mut Vec2) {}

    unsafe extern "C" fn has_component(entity_id: u64, kind: u32) -> bool {
        record(format!("has_component({entity_id}, {kind})"));
        kind == ComponentKind::Transform.as_raw()
    }

    unsafe extern "C" fn get_translation(entity_id: u64, out: *mut Vec3) {
        record(format!("get_translation({entity_id})"));
        // SAFETY: the boundary passes a live exclusive reference.
        unsafe { *out = Vec3::new(1.0, 2.0, 3.0) };
    }

    unsafe extern "C" fn set_translation(entity_id: u64, value: *const Vec3) {
        // SAFETY: the boundary passes a live shared reference.
        let value = unsafe { *value };
        record(format!("set_translation({entity_id}, {value})"));
    }

    unsafe extern "C" fn add_pair(entity_id: u64, linear: *const Vec3, angular: *const Vec3) {
        // SAFETY: the boundary passes live shared references.
        let (linear, angular) = unsafe { (*linear, *angular) };
        record(format!("add_pair({entity_id}, {linear}, {angular})"));
    }

    unsafe extern "C" fn key_pressed(code: i32) -> bool {
        code == KeyCode::W.0
    }

    fn full_table() -> NativeCallTable {
        NativeCallTable {
            entity_destroy: Some(stub_entity),
            entity_has_component: Some(has_component),
            transform_get_translation: Some(get_translation),
            transform_set_translation: Some(set_translation),
            transform_get_rotation: Some(stub_get),
            transform_set_rotation: Some(stub_set),
            transform_get_scale: Some(stub_get),
            transform_set_scale: Some(stub_set),
            camera_rotate_around_entity: Some(stub_camera),
            camera_rotate: Some(stub_camera),
            camera_get_forward_direction: Some(stub_get),
            camera_get_right_direction: Some(stub_get),
            box_collider_get_linear_velocity: Some(stub_get),
            box_collider_set_linear_velocity: Some(stub_set),
            box_collider_add_linear_velocity: Some(stub_set),
            box_collider_add_angular_velocity: Some(stub_set),
            box_collider_add_impulse: Some(stub_set),
            box_collider_add_angular_impulse: Some(stub_set),
            box_collider_add_linear_angular_impulse: Some(add_pair),
            sphere_collider_get_linear_velocity: Some(stub_get),
            sphere_collider_set_linear_velocity: Some(stub_set),
            sphere_collider_add_linear_velocity: Some(stub_set),
            sphere_collider_add_angular_velocity: Some(stub_set),
            sphere_collider_add_impulse: Some(stub_set),
            sphere_collider_add_angular_impulse: Some(stub_set),
            sphere_collider_add_linear_angular_impulse: Some(stub_pair),
            character_controller_get_linear_velocity: Some(stub_get),
            character_controller_set_linear_velocity: Some(stub_set),
            character_controller_add_linear_velocity: Some(stub_set),
            character_controller_add_impulse: Some(stub_set),
            character_controller_get_rotation: Some(stub_get),
            character_controller_set_rotation: Some(stub_set),
            character_controller_is_grounded: Some(stub_query),
            sounds_play_sound_at_index_global: Some(stub_sound),
            sounds_play_sound_at_index_local: Some(stub_sound),
            is_key_pressed: Some(key_pressed),
            is_mouse_button_pressed: Some(stub_input),
            get_mouse_position: Some(stub_mouse),
        }
    }

    #[test]
    fn test_bind_full_table() {
        assert!(NativeCalls::bind(full_table()).is_ok());
    }

    #[test]
    fn test_bind_reports_first_missing_slot() {
        let mut table = full_table();
        table.camera_rotate = None;
        table.get_mouse_position = None;
        assert_eq!(
            NativeCalls::bind(table).unwrap_err(),
            GlueError::MissingCall("camera_rotate")
        );
    }

    #[test]
    fn test_bind_empty_table() {
        assert_eq!(
            NativeCalls::bind(NativeCallTable::default()).unwrap_err(),
            GlueError::MissingCall("entity_destroy")
        );
    }

    #[test]
    fn test_from_raw_null() {
        let result = unsafe { NativeCalls::from_raw(std::ptr::null()) };
        assert_eq!(result.unwrap_err(), GlueError::NullTable);
    }

    #[test]
    fn test_from_raw_copies_table() {
        let table = full_table();
        let calls = unsafe { NativeCalls::from_raw(&table) }.unwrap();
        assert!(calls.is_key_pressed(KeyCode::W));
        assert!(!calls.is_key_pressed(KeyCode::S));
    }

    #[test]
    fn test_forwards_arguments_in_order() {
        let calls = NativeCalls::bind(full_table()).unwrap();
        let id = EntityId::from_raw(9);

        let mut out = Vec3::ZERO;
        calls.transform_get_translation(id, &mut out);
        assert_eq!(out, Vec3::new(1.0, 2.0, 3.0));

        calls.transform_set_translation(id, &Vec3::new(4.0, 5.0, 6.0));
        calls.box_collider_add_linear_angular_impulse(id, &Vec3::X, &Vec3::Y);

        assert_eq!(
            recorded(),
            vec![
                "get_translation(9)".to_string(),
                "set_translation(9, [4, 5, 6])".to_string(),
                "add_pair(9, [1, 0, 0], [0, 1, 0])".to_string(),
            ]
        );
    }

    #[test]
    fn test_facade_over_native_table() {
        let calls: Arc<dyn InternalCalls> = Arc::new(NativeCalls::bind(full_table()).unwrap());
        let entity = Entity::new(EntityId::from_raw(3), calls);

        let transform = entity.get_component::<TransformComponent>().unwrap();
        assert_eq!(transform.translation(), Vec3::new(1.0, 2.0, 3.0));
        assert!(
            entity
                .get_component::<engine_script::CameraComponent>()
                .is_none()
        );

        assert_eq!(
            recorded(),
            vec![
                "has_component(3, 0)".to_string(),
                "get_translation(3)".to_string(),
                "has_component(3, 1)".to_string(),
            ]
        );
    }
}
