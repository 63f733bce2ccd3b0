use crate::component::sealed::{Bind, Token};
use crate::component::{ComponentKind, ScriptComponent};
use crate::entity::Entity;

/// Index-based sound playback from the entity's sound list.
#[derive(Debug, Clone)]
pub struct SoundsComponent {
    entity: Entity,
}

impl SoundsComponent {
    /// Play without spatialisation.
    pub fn play_sound_at_index_global(&self, index: i32) {
        self.entity
            .calls()
            .sounds_play_sound_at_index_global(self.entity.id(), index);
    }

    /// Play positioned at the entity.
    pub fn play_sound_at_index_local(&self, index: i32) {
        self.entity
            .calls()
            .sounds_play_sound_at_index_local(self.entity.id(), index);
    }
}

impl Bind for SoundsComponent {
    fn bind(entity: Entity, _: Token) -> Self {
        Self { entity }
    }
}

impl ScriptComponent for SoundsComponent {
    const KIND: ComponentKind = ComponentKind::Sounds;

    fn entity(&self) -> &Entity {
        &self.entity
    }
}
