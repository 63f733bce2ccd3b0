//! Script classes and their per-entity instances.

use std::sync::Arc;

use engine_script::Entity;

/// Behaviour attached to an entity.
///
/// Both hooks default to doing nothing so scripts only implement what they
/// use.
pub trait EntityScript: Send {
    /// Called once after the instance is bound to its entity.
    fn on_create(&mut self, _entity: &Entity) {}

    /// Called once per tick with the timestep in seconds.
    fn on_update(&mut self, _entity: &Entity, _dt: f32) {}
}

type ScriptFactory = Box<dyn Fn() -> Box<dyn EntityScript> + Send + Sync>;

/// A named script type that can be instantiated for any number of entities.
pub struct ScriptClass {
    name: String,
    factory: ScriptFactory,
}

impl ScriptClass {
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn EntityScript> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(factory),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a fresh, not yet created, script object.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn EntityScript> {
        (self.factory)()
    }
}

impl std::fmt::Debug for ScriptClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptClass")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A script object bound to one entity.
pub struct ScriptInstance {
    class: Arc<ScriptClass>,
    entity: Entity,
    script: Box<dyn EntityScript>,
}

impl ScriptInstance {
    #[must_use]
    pub fn new(class: Arc<ScriptClass>, entity: Entity) -> Self {
        let script = class.instantiate();
        Self {
            class,
            entity,
            script,
        }
    }

    #[must_use]
    pub fn class(&self) -> &Arc<ScriptClass> {
        &self.class
    }

    #[must_use]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn invoke_on_create(&mut self) {
        self.script.on_create(&self.entity);
    }

    pub fn invoke_on_update(&mut self, dt: f32) {
        self.script.on_update(&self.entity, dt);
    }

    /// Replace the script object with a fresh one from the class.
    pub(crate) fn reinstantiate(&mut self) {
        self.script = self.class.instantiate();
    }
}

impl std::fmt::Debug for ScriptInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptInstance")
            .field("class", &self.class.name)
            .field("entity", &self.entity.id())
            .finish_non_exhaustive()
    }
}
