use engine_math::{Vec2, Vec3};

use crate::component::sealed::{Bind, Token};
use crate::component::{ComponentKind, ScriptComponent};
use crate::entity::Entity;

/// Camera control for an entity's camera.
#[derive(Debug, Clone)]
pub struct CameraComponent {
    entity: Entity,
}

impl CameraComponent {
    /// Orbit around the owning entity. Use this for third person.
    pub fn rotate_around_entity(&self, rotation: Vec2, speed: f32, inverse_controls: bool) {
        self.entity.calls().camera_rotate_around_entity(
            self.entity.id(),
            &rotation,
            speed,
            inverse_controls,
        );
    }

    /// Rotate in place. Use this for first person.
    pub fn rotate(&self, rotation: Vec2, speed: f32, inverse_controls: bool) {
        self.entity
            .calls()
            .camera_rotate(self.entity.id(), &rotation, speed, inverse_controls);
    }

    #[must_use]
    pub fn forward_direction(&self) -> Vec3 {
        let mut direction = Vec3::ZERO;
        self.entity
            .calls()
            .camera_get_forward_direction(self.entity.id(), &mut direction);
        direction
    }

    #[must_use]
    pub fn right_direction(&self) -> Vec3 {
        let mut direction = Vec3::ZERO;
        self.entity
            .calls()
            .camera_get_right_direction(self.entity.id(), &mut direction);
        direction
    }
}

impl Bind for CameraComponent {
    fn bind(entity: Entity, _: Token) -> Self {
        Self { entity }
    }
}

impl ScriptComponent for CameraComponent {
    const KIND: ComponentKind = ComponentKind::Camera;

    fn entity(&self) -> &Entity {
        &self.entity
    }
}
