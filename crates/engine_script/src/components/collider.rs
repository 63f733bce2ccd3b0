//! Rigid-body colliders. Box and sphere expose the same surface but hit
//! separate engine calls.

use engine_math::Vec3;

use crate::component::sealed::{Bind, Token};
use crate::component::{ComponentKind, ScriptComponent};
use crate::entity::Entity;

/// Velocity and impulse control for a box-shaped rigid body.
#[derive(Debug, Clone)]
pub struct BoxColliderComponent {
    entity: Entity,
}

impl BoxColliderComponent {
    #[must_use]
    pub fn linear_velocity(&self) -> Vec3 {
        let mut velocity = Vec3::ZERO;
        self.entity
            .calls()
            .box_collider_get_linear_velocity(self.entity.id(), &mut velocity);
        velocity
    }

    pub fn set_linear_velocity(&self, velocity: Vec3) {
        self.entity
            .calls()
            .box_collider_set_linear_velocity(self.entity.id(), &velocity);
    }

    pub fn add_linear_velocity(&self, velocity: Vec3) {
        self.entity
            .calls()
            .box_collider_add_linear_velocity(self.entity.id(), &velocity);
    }

    pub fn add_angular_velocity(&self, velocity: Vec3) {
        self.entity
            .calls()
            .box_collider_add_angular_velocity(self.entity.id(), &velocity);
    }

    pub fn add_impulse(&self, impulse: Vec3) {
        self.entity
            .calls()
            .box_collider_add_impulse(self.entity.id(), &impulse);
    }

    pub fn add_angular_impulse(&self, impulse: Vec3) {
        self.entity
            .calls()
            .box_collider_add_angular_impulse(self.entity.id(), &impulse);
    }

    pub fn add_linear_and_angular_impulse(&self, linear_impulse: Vec3, angular_impulse: Vec3) {
        self.entity.calls().box_collider_add_linear_angular_impulse(
            self.entity.id(),
            &linear_impulse,
            &angular_impulse,
        );
    }
}

impl Bind for BoxColliderComponent {
    fn bind(entity: Entity, _: Token) -> Self {
        Self { entity }
    }
}

impl ScriptComponent for BoxColliderComponent {
    const KIND: ComponentKind = ComponentKind::BoxCollider;

    fn entity(&self) -> &Entity {
        &self.entity
    }
}

/// Velocity and impulse control for a sphere-shaped rigid body.
#[derive(Debug, Clone)]
pub struct SphereColliderComponent {
    entity: Entity,
}

impl SphereColliderComponent {
    #[must_use]
    pub fn linear_velocity(&self) -> Vec3 {
        let mut velocity = Vec3::ZERO;
        self.entity
            .calls()
            .sphere_collider_get_linear_velocity(self.entity.id(), &mut velocity);
        velocity
    }

    pub fn set_linear_velocity(&self, velocity: Vec3) {
        self.entity
            .calls()
            .sphere_collider_set_linear_velocity(self.entity.id(), &velocity);
    }

    pub fn add_linear_velocity(&self, velocity: Vec3) {
        self.entity
            .calls()
            .sphere_collider_add_linear_velocity(self.entity.id(), &velocity);
    }

    pub fn add_angular_velocity(&self, velocity: Vec3) {
        self.entity
            .calls()
            .sphere_collider_add_angular_velocity(self.entity.id(), &velocity);
    }

    pub fn add_impulse(&self, impulse: Vec3) {
        self.entity
            .calls()
            .sphere_collider_add_impulse(self.entity.id(), &impulse);
    }

    pub fn add_angular_impulse(&self, impulse: Vec3) {
        self.entity
            .calls()
            .sphere_collider_add_angular_impulse(self.entity.id(), &impulse);
    }

    pub fn add_linear_and_angular_impulse(&self, linear_impulse: Vec3, angular_impulse: Vec3) {
        self.entity.calls().sphere_collider_add_linear_angular_impulse(
            self.entity.id(),
            &linear_impulse,
            &angular_impulse,
        );
    }
}

impl Bind for SphereColliderComponent {
    fn bind(entity: Entity, _: Token) -> Self {
        Self { entity }
    }
}

impl ScriptComponent for SphereColliderComponent {
    const KIND: ComponentKind = ComponentKind::SphereCollider;

    fn entity(&self) -> &Entity {
        &self.entity
    }
}
