//! Demo entity scripts.

use engine_math::{Quat, Vec2, Vec3};
use engine_runtime::{EntityScript, RuntimeError, ScriptRuntime};
use engine_script::{
    CameraComponent, CharacterControllerComponent, Entity, KeyCode, MouseButton,
    SoundsComponent, SphereColliderComponent, TransformComponent,
};
use tracing::{debug, warn};

pub const PLAYER: &str = "PlayerController";
pub const PROJECTILE: &str = "Projectile";
pub const SPINNER: &str = "Spinner";

/// Horizontal walking speed, units/s.
pub const MOVE_SPEED: f32 = 4.0;
/// Upward impulse applied on jump.
pub const JUMP_IMPULSE: f32 = 5.0;
/// Degrees of camera rotation per pixel of mouse movement.
const LOOK_SPEED: f32 = 0.2;

/// Seconds a projectile lives before removing itself.
pub const PROJECTILE_LIFETIME: f32 = 2.0;
const PROJECTILE_SPEED: f32 = 12.0;

/// Degrees per second.
pub const SPIN_RATE: f32 = 90.0;

/// Sound slots on the player and projectile sound components.
pub const JUMP_SOUND: i32 = 0;
pub const EXPIRE_SOUND: i32 = 1;

/// Register every demo class with the runtime.
pub fn register_all(runtime: &mut ScriptRuntime) -> Result<(), RuntimeError> {
    runtime.register_class(PLAYER, || Box::new(PlayerController::default()))?;
    runtime.register_class(PROJECTILE, || Box::new(Projectile::default()))?;
    runtime.register_class(SPINNER, || Box::new(Spinner))?;
    Ok(())
}

/// WASD movement relative to the camera, space to jump, right mouse drag to
/// orbit the camera.
#[derive(Debug, Default)]
pub struct PlayerController {
    last_mouse: Option<Vec2>,
    jump_held: bool,
}

impl PlayerController {
    fn look(&mut self, entity: &Entity, camera: Option<&CameraComponent>) {
        let mouse = entity.mouse_position();
        if let (Some(camera), Some(last)) = (camera, self.last_mouse) {
            let delta = mouse - last;
            if delta != Vec2::ZERO && entity.is_mouse_button_pressed(MouseButton::RIGHT) {
                camera.rotate_around_entity(delta, LOOK_SPEED, false);
            }
        }
        self.last_mouse = Some(mouse);
    }

    fn wish_direction(entity: &Entity, camera: Option<&CameraComponent>) -> Vec3 {
        let (forward, right) = camera
            .map(|camera| {
                (
                    flatten(camera.forward_direction()),
                    flatten(camera.right_direction()),
                )
            })
            .unwrap_or((Vec3::NEG_Z, Vec3::X));

        let mut wish = Vec3::ZERO;
        if entity.is_key_pressed(KeyCode::W) {
            wish += forward;
        }
        if entity.is_key_pressed(KeyCode::S) {
            wish -= forward;
        }
        if entity.is_key_pressed(KeyCode::D) {
            wish += right;
        }
        if entity.is_key_pressed(KeyCode::A) {
            wish -= right;
        }
        wish.normalize_or_zero()
    }
}

impl EntityScript for PlayerController {
    fn on_create(&mut self, entity: &Entity) {
        if !entity.has_component::<CharacterControllerComponent>() {
            warn!(entity = %entity.id(), "player has no character controller");
        }
    }

    fn on_update(&mut self, entity: &Entity, _dt: f32) {
        let Some(character) = entity.get_component::<CharacterControllerComponent>() else {
            return;
        };
        let camera = entity.get_component::<CameraComponent>();
        self.look(entity, camera.as_ref());

        let wish = Self::wish_direction(entity, camera.as_ref()) * MOVE_SPEED;
        let velocity = character.linear_velocity();
        character.set_linear_velocity(Vec3::new(wish.x, velocity.y, wish.z));
        if wish != Vec3::ZERO {
            // Face the direction of travel; yaw 0 looks down -Z.
            let yaw = (-wish.x).atan2(-wish.z);
            character.set_rotation_quaternion(Quat::from_rotation_y(yaw));
        }

        let jump = entity.is_key_pressed(KeyCode::SPACE);
        if jump && !self.jump_held && character.is_grounded() {
            character.add_impulse(Vec3::Y * JUMP_IMPULSE);
            if let Some(sounds) = entity.get_component::<SoundsComponent>() {
                sounds.play_sound_at_index_local(JUMP_SOUND);
            }
            debug!(entity = %entity.id(), "jump");
        }
        self.jump_held = jump;
    }
}

/// Flies forward and spins, then destroys itself.
#[derive(Debug, Default)]
pub struct Projectile {
    age: f32,
}

impl EntityScript for Projectile {
    fn on_create(&mut self, entity: &Entity) {
        if let Some(body) = entity.get_component::<SphereColliderComponent>() {
            body.add_linear_and_angular_impulse(Vec3::NEG_Z * PROJECTILE_SPEED, Vec3::X);
        }
    }

    fn on_update(&mut self, entity: &Entity, dt: f32) {
        self.age += dt;
        if self.age < PROJECTILE_LIFETIME {
            return;
        }
        if let Some(sounds) = entity.get_component::<SoundsComponent>() {
            sounds.play_sound_at_index_global(EXPIRE_SOUND);
        }
        entity.self_destruct();
    }
}

/// Turns its transform about the Y axis.
#[derive(Debug)]
pub struct Spinner;

impl EntityScript for Spinner {
    fn on_update(&mut self, entity: &Entity, dt: f32) {
        if let Some(transform) = entity.get_component::<TransformComponent>() {
            let mut rotation = transform.rotation();
            rotation.y = (rotation.y + SPIN_RATE * dt).rem_euclid(360.0);
            transform.set_rotation(rotation);
        }
    }
}

fn flatten(direction: Vec3) -> Vec3 {
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}
