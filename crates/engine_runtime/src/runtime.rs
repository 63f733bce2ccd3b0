//! Script runtime: class registry plus the live instance table.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use engine_script::{Entity, EntityId, InternalCalls};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::script::{EntityScript, ScriptClass, ScriptInstance};

/// Owns script classes and one script instance per scripted entity.
///
/// Instances are kept ordered by entity id so every tick visits them in the
/// same order.
pub struct ScriptRuntime {
    config: RuntimeConfig,
    classes: HashMap<String, Arc<ScriptClass>>,
    instances: BTreeMap<EntityId, ScriptInstance>,
    calls: Option<Arc<dyn InternalCalls>>,
    reload_pending: bool,
    frame: u64,
}

impl ScriptRuntime {
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            classes: HashMap::new(),
            instances: BTreeMap::new(),
            calls: None,
            reload_pending: false,
            frame: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Number of completed `on_update` passes since start.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    /// Register a script class under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::DuplicateClass`] if the name is taken.
    pub fn register_class<F>(
        &mut self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<(), RuntimeError>
    where
        F: Fn() -> Box<dyn EntityScript> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.classes.contains_key(&name) {
            return Err(RuntimeError::DuplicateClass(name));
        }
        debug!(domain = %self.config.domain_name, class = %name, "registered script class");
        let class = Arc::new(ScriptClass::new(name.clone(), factory));
        self.classes.insert(name, class);
        Ok(())
    }

    #[must_use]
    pub fn entity_class_exists(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, sorted.
    #[must_use]
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Attach the engine boundary. Instances created afterwards use it.
    pub fn on_runtime_start(&mut self, calls: Arc<dyn InternalCalls>) {
        info!(
            domain = %self.config.domain_name,
            classes = self.classes.len(),
            "script runtime started"
        );
        self.calls = Some(calls);
        self.frame = 0;
    }

    /// Drop every instance and detach the engine boundary.
    pub fn on_runtime_stop(&mut self) {
        info!(
            domain = %self.config.domain_name,
            instances = self.instances.len(),
            frames = self.frame,
            "script runtime stopped"
        );
        self.instances.clear();
        self.calls = None;
        self.reload_pending = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.calls.is_some()
    }

    // ------------------------------------------------------------------
    // Instances
    // ------------------------------------------------------------------

    /// Bind a new instance of `class` to entity `id` and run its
    /// `on_create`. An existing instance for the same entity is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::NotStarted`] before [`Self::on_runtime_start`]
    /// and [`RuntimeError::UnknownClass`] for unregistered names.
    pub fn on_create_entity(&mut self, id: EntityId, class: &str) -> Result<(), RuntimeError> {
        let calls = self.calls.clone().ok_or(RuntimeError::NotStarted)?;
        let class = self
            .classes
            .get(class)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownClass(class.to_string()))?;

        if let Some(previous) = self.instances.get(&id) {
            warn!(
                entity = %id,
                previous = previous.class().name(),
                class = class.name(),
                "replacing existing script instance"
            );
        }

        let mut instance = ScriptInstance::new(class, Entity::new(id, calls));
        instance.invoke_on_create();
        debug!(entity = %id, class = instance.class().name(), "created script instance");
        self.instances.insert(id, instance);
        Ok(())
    }

    /// Run `on_update` on every instance, in entity id order.
    pub fn on_update(&mut self, dt: f32) {
        for instance in self.instances.values_mut() {
            instance.invoke_on_update(dt);
        }
        self.frame += 1;
    }

    /// Run `on_update` on a single instance. Returns `false` if the entity
    /// has no instance.
    pub fn update_entity(&mut self, id: EntityId, dt: f32) -> bool {
        match self.instances.get_mut(&id) {
            Some(instance) => {
                instance.invoke_on_update(dt);
                true
            }
            None => {
                warn!(entity = %id, "on_update requested for entity without a script instance");
                false
            }
        }
    }

    #[must_use]
    pub fn entity_instance_exists(&self, id: EntityId) -> bool {
        self.instances.contains_key(&id)
    }

    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Class name of the instance bound to `id`.
    #[must_use]
    pub fn instance_class(&self, id: EntityId) -> Option<&str> {
        self.instances.get(&id).map(|instance| instance.class().name())
    }

    /// Drop the instance bound to `id`. Returns whether one existed.
    pub fn remove_instance(&mut self, id: EntityId) -> bool {
        let removed = self.instances.remove(&id).is_some();
        if removed {
            debug!(entity = %id, "removed script instance");
        }
        removed
    }

    /// Keep only instances whose entity satisfies `keep`. Returns how many
    /// were dropped.
    pub fn retain_instances(&mut self, mut keep: impl FnMut(EntityId) -> bool) -> usize {
        let before = self.instances.len();
        self.instances.retain(|id, _| keep(*id));
        let dropped = before - self.instances.len();
        if dropped > 0 {
            debug!(dropped, "dropped script instances for missing entities");
        }
        dropped
    }

    // ------------------------------------------------------------------
    // Reload
    // ------------------------------------------------------------------

    /// Request a reload at the next convenient point.
    pub fn mark_for_reload(&mut self) {
        self.reload_pending = true;
    }

    #[must_use]
    pub fn should_reload(&self) -> bool {
        self.reload_pending
    }

    /// Rebuild every instance from its class and run `on_create` again.
    /// Entity bindings are kept. Returns the number of rebuilt instances.
    pub fn reload(&mut self) -> usize {
        for instance in self.instances.values_mut() {
            instance.reinstantiate();
            instance.invoke_on_create();
        }
        self.reload_pending = false;
        info!(
            domain = %self.config.domain_name,
            instances = self.instances.len(),
            "reloaded script instances"
        );
        self.instances.len()
    }
}

impl std::fmt::Debug for ScriptRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRuntime")
            .field("domain", &self.config.domain_name)
            .field("classes", &self.class_names())
            .field("instances", &self.instances.len())
            .field("running", &self.is_running())
            .field("frame", &self.frame)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_glue::SceneHost;
    use engine_math::Vec3;
    use engine_script::{ComponentKind, TransformComponent};
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        log: Log,
        updates: u32,
    }

    impl EntityScript for Recorder {
        fn on_create(&mut self, entity: &Entity) {
            self.log
                .lock()
                .unwrap()
                .push(format!("create {}", entity.id().raw()));
        }

        fn on_update(&mut self, entity: &Entity, _dt: f32) {
            self.updates += 1;
            self.log
                .lock()
                .unwrap()
                .push(format!("update {} #{}", entity.id().raw(), self.updates));
        }
    }

    struct Mover;

    impl EntityScript for Mover {
        fn on_update(&mut self, entity: &Entity, dt: f32) {
            if let Some(transform) = entity.get_component::<TransformComponent>() {
                transform.set_translation(transform.translation() + Vec3::X * dt);
            }
        }
    }

    struct Idle;

    impl EntityScript for Idle {}

    fn runtime_with_recorder(log: &Log) -> ScriptRuntime {
        let mut runtime = ScriptRuntime::new(RuntimeConfig::new("test"));
        let log = log.clone();
        runtime
            .register_class("Recorder", move || {
                Box::new(Recorder {
                    log: log.clone(),
                    updates: 0,
                })
            })
            .unwrap();
        runtime
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_register_and_query_classes() {
        let mut runtime = ScriptRuntime::new(RuntimeConfig::default());
        runtime.register_class("Mover", || Box::new(Mover)).unwrap();
        runtime.register_class("Idle", || Box::new(Idle)).unwrap();

        assert!(runtime.entity_class_exists("Mover"));
        assert!(!runtime.entity_class_exists("Missing"));
        assert_eq!(runtime.class_names(), vec!["Idle", "Mover"]);
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let mut runtime = ScriptRuntime::new(RuntimeConfig::default());
        runtime.register_class("Idle", || Box::new(Idle)).unwrap();
        let err = runtime.register_class("Idle", || Box::new(Idle)).unwrap_err();
        assert!(matches!(err, RuntimeError::DuplicateClass(name) if name == "Idle"));
    }

    #[test]
    fn test_create_before_start_fails() {
        let log = Log::default();
        let mut runtime = runtime_with_recorder(&log);
        let err = runtime
            .on_create_entity(EntityId::from_raw(1), "Recorder")
            .unwrap_err();
        assert!(matches!(err, RuntimeError::NotStarted));
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_unknown_class_fails() {
        let mut runtime = ScriptRuntime::new(RuntimeConfig::default());
        runtime.on_runtime_start(Arc::new(SceneHost::new()));
        let err = runtime
            .on_create_entity(EntityId::from_raw(1), "Nope")
            .unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownClass(name) if name == "Nope"));
        assert_eq!(runtime.instance_count(), 0);
    }

    #[test]
    fn test_lifecycle_order() {
        let log = Log::default();
        let mut runtime = runtime_with_recorder(&log);
        runtime.on_runtime_start(Arc::new(SceneHost::new()));

        runtime
            .on_create_entity(EntityId::from_raw(2), "Recorder")
            .unwrap();
        runtime
            .on_create_entity(EntityId::from_raw(1), "Recorder")
            .unwrap();
        runtime.on_update(0.016);

        assert_eq!(
            entries(&log),
            vec!["create 2", "create 1", "update 1 #1", "update 2 #1"]
        );
        assert_eq!(runtime.frame(), 1);
        assert_eq!(runtime.instance_class(EntityId::from_raw(1)), Some("Recorder"));
    }

    #[test]
    fn test_update_single_entity() {
        let log = Log::default();
        let mut runtime = runtime_with_recorder(&log);
        runtime.on_runtime_start(Arc::new(SceneHost::new()));
        runtime
            .on_create_entity(EntityId::from_raw(5), "Recorder")
            .unwrap();

        assert!(runtime.update_entity(EntityId::from_raw(5), 0.1));
        assert!(!runtime.update_entity(EntityId::from_raw(6), 0.1));
        assert_eq!(entries(&log), vec!["create 5", "update 5 #1"]);
    }

    #[test]
    fn test_scripts_drive_engine_state() {
        let host = Arc::new(SceneHost::new());
        let id = host.spawn(&[ComponentKind::Transform]);

        let mut runtime = ScriptRuntime::new(RuntimeConfig::default());
        runtime.register_class("Mover", || Box::new(Mover)).unwrap();
        runtime.on_runtime_start(host.clone());
        runtime.on_create_entity(id, "Mover").unwrap();

        for _ in 0..4 {
            runtime.on_update(0.5);
        }

        let entity = Entity::new(id, host);
        let transform = entity.get_component::<TransformComponent>().unwrap();
        assert_eq!(transform.translation(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_recreate_replaces_instance() {
        let log = Log::default();
        let mut runtime = runtime_with_recorder(&log);
        runtime.register_class("Idle", || Box::new(Idle)).unwrap();
        runtime.on_runtime_start(Arc::new(SceneHost::new()));

        let id = EntityId::from_raw(9);
        runtime.on_create_entity(id, "Recorder").unwrap();
        runtime.on_create_entity(id, "Idle").unwrap();

        assert_eq!(runtime.instance_count(), 1);
        assert_eq!(runtime.instance_class(id), Some("Idle"));
    }

    #[test]
    fn test_remove_and_retain() {
        let mut runtime = ScriptRuntime::new(RuntimeConfig::default());
        runtime.register_class("Idle", || Box::new(Idle)).unwrap();
        runtime.on_runtime_start(Arc::new(SceneHost::new()));
        for raw in 1..=4 {
            runtime
                .on_create_entity(EntityId::from_raw(raw), "Idle")
                .unwrap();
        }

        assert!(runtime.remove_instance(EntityId::from_raw(1)));
        assert!(!runtime.remove_instance(EntityId::from_raw(1)));

        let dropped = runtime.retain_instances(|id| id.raw() % 2 == 0);
        assert_eq!(dropped, 1);
        assert!(runtime.entity_instance_exists(EntityId::from_raw(2)));
        assert!(!runtime.entity_instance_exists(EntityId::from_raw(3)));
        assert!(runtime.entity_instance_exists(EntityId::from_raw(4)));
    }

    #[test]
    fn test_reload_rebuilds_instances() {
        let log = Log::default();
        let mut runtime = runtime_with_recorder(&log);
        runtime.on_runtime_start(Arc::new(SceneHost::new()));
        let id = EntityId::from_raw(3);
        runtime.on_create_entity(id, "Recorder").unwrap();
        runtime.on_update(0.1);
        runtime.on_update(0.1);

        runtime.mark_for_reload();
        assert!(runtime.should_reload());
        assert_eq!(runtime.reload(), 1);
        assert!(!runtime.should_reload());

        runtime.on_update(0.1);
        assert_eq!(
            entries(&log),
            vec![
                "create 3",
                "update 3 #1",
                "update 3 #2",
                "create 3",
                "update 3 #1",
            ]
        );
    }

    #[test]
    fn test_stop_clears_instances() {
        let mut runtime = ScriptRuntime::new(RuntimeConfig::default());
        runtime.register_class("Idle", || Box::new(Idle)).unwrap();
        runtime.on_runtime_start(Arc::new(SceneHost::new()));
        runtime
            .on_create_entity(EntityId::from_raw(1), "Idle")
            .unwrap();
        assert!(runtime.is_running());

        runtime.on_runtime_stop();
        assert!(!runtime.is_running());
        assert_eq!(runtime.instance_count(), 0);
        assert!(runtime.entity_class_exists("Idle"));
    }
}
