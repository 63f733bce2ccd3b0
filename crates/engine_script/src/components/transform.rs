use engine_math::Vec3;

use crate::component::sealed::{Bind, Token};
use crate::component::{ComponentKind, ScriptComponent};
use crate::entity::Entity;

/// Local translation, rotation (Euler degrees) and scale of an entity.
#[derive(Debug, Clone)]
pub struct TransformComponent {
    entity: Entity,
}

impl TransformComponent {
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        let mut translation = Vec3::ZERO;
        self.entity
            .calls()
            .transform_get_translation(self.entity.id(), &mut translation);
        translation
    }

    pub fn set_translation(&self, translation: Vec3) {
        self.entity
            .calls()
            .transform_set_translation(self.entity.id(), &translation);
    }

    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        let mut rotation = Vec3::ZERO;
        self.entity
            .calls()
            .transform_get_rotation(self.entity.id(), &mut rotation);
        rotation
    }

    pub fn set_rotation(&self, rotation: Vec3) {
        self.entity
            .calls()
            .transform_set_rotation(self.entity.id(), &rotation);
    }

    #[must_use]
    pub fn scale(&self) -> Vec3 {
        let mut scale = Vec3::ZERO;
        self.entity
            .calls()
            .transform_get_scale(self.entity.id(), &mut scale);
        scale
    }

    pub fn set_scale(&self, scale: Vec3) {
        self.entity.calls().transform_set_scale(self.entity.id(), &scale);
    }
}

impl Bind for TransformComponent {
    fn bind(entity: Entity, _: Token) -> Self {
        Self { entity }
    }
}

impl ScriptComponent for TransformComponent {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn entity(&self) -> &Entity {
        &self.entity
    }
}
