//! Physics-driven character movement.
//!
//! The engine stores the controller's orientation as Euler angles in
//! degrees. The quaternion accessors convert on the script side so the
//! boundary stays Euler-only.

use engine_math::{Quat, Vec3, euler_degrees_to_quat, quat_to_euler_degrees};

use crate::component::sealed::{Bind, Token};
use crate::component::{ComponentKind, ScriptComponent};
use crate::entity::Entity;

/// Velocity, impulse and orientation control for a character controller.
#[derive(Debug, Clone)]
pub struct CharacterControllerComponent {
    entity: Entity,
}

impl CharacterControllerComponent {
    #[must_use]
    pub fn linear_velocity(&self) -> Vec3 {
        let mut velocity = Vec3::ZERO;
        self.entity
            .calls()
            .character_controller_get_linear_velocity(self.entity.id(), &mut velocity);
        velocity
    }

    pub fn set_linear_velocity(&self, velocity: Vec3) {
        self.entity
            .calls()
            .character_controller_set_linear_velocity(self.entity.id(), &velocity);
    }

    pub fn add_linear_velocity(&self, velocity: Vec3) {
        self.entity
            .calls()
            .character_controller_add_linear_velocity(self.entity.id(), &velocity);
    }

    pub fn add_impulse(&self, impulse: Vec3) {
        self.entity
            .calls()
            .character_controller_add_impulse(self.entity.id(), &impulse);
    }

    /// Euler angles in degrees: `x` pitch, `y` yaw, `z` roll.
    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        let mut rotation = Vec3::ZERO;
        self.entity
            .calls()
            .character_controller_get_rotation(self.entity.id(), &mut rotation);
        rotation
    }

    /// Euler angles in degrees: `x` pitch, `y` yaw, `z` roll.
    pub fn set_rotation(&self, rotation: Vec3) {
        self.entity
            .calls()
            .character_controller_set_rotation(self.entity.id(), &rotation);
    }

    /// The engine's Euler rotation as a unit quaternion.
    #[must_use]
    pub fn rotation_quaternion(&self) -> Quat {
        euler_degrees_to_quat(self.rotation())
    }

    /// Set the rotation from a quaternion. The engine receives Euler degrees.
    pub fn set_rotation_quaternion(&self, rotation: Quat) {
        self.set_rotation(quat_to_euler_degrees(rotation));
    }

    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.entity
            .calls()
            .character_controller_is_grounded(self.entity.id())
    }
}

impl Bind for CharacterControllerComponent {
    fn bind(entity: Entity, _: Token) -> Self {
        Self { entity }
    }
}

impl ScriptComponent for CharacterControllerComponent {
    const KIND: ComponentKind = ComponentKind::CharacterController;

    fn entity(&self) -> &Entity {
        &self.entity
    }
}
