//! A running demo: scene, script runtime and scripted input.

use std::sync::Arc;

use engine_glue::{SceneHost, SoundEvent};
use engine_math::{Vec2, Vec3};
use engine_runtime::{RuntimeConfig, RuntimeError, ScriptRuntime};
use engine_script::{ComponentKind, Entity, EntityId, KeyCode, MouseButton, TransformComponent};
use tracing::{debug, info};

use crate::scripts;

/// One scripted entity in the demo scene.
struct SceneEntity {
    class: &'static str,
    components: &'static [ComponentKind],
    translation: Vec3,
}

const SCENE: &[SceneEntity] = &[
    SceneEntity {
        class: scripts::PLAYER,
        components: &[
            ComponentKind::CharacterController,
            ComponentKind::Camera,
            ComponentKind::Sounds,
        ],
        translation: Vec3::ZERO,
    },
    SceneEntity {
        class: scripts::PROJECTILE,
        components: &[ComponentKind::SphereCollider, ComponentKind::Sounds],
        translation: Vec3::new(0.0, 1.0, -2.0),
    },
    SceneEntity {
        class: scripts::SPINNER,
        components: &[],
        translation: Vec3::new(3.0, 0.0, -3.0),
    },
];

/// Tick at which the demo input presses jump.
const JUMP_TICK: u64 = 30;
/// Ticks during which forward is held.
const WALK_TICKS: u64 = 90;
/// From this tick on, the right mouse button is held and the mouse drifts.
const LOOK_TICK: u64 = 120;

/// Feed a fixed input timeline into the host.
fn apply_demo_input(host: &SceneHost, tick: u64) {
    host.set_key_pressed(KeyCode::W, tick < WALK_TICKS);
    host.set_key_pressed(KeyCode::SPACE, tick == JUMP_TICK);
    let looking = tick >= LOOK_TICK;
    host.set_mouse_button_pressed(MouseButton::RIGHT, looking);
    if looking {
        let drift = (tick - LOOK_TICK) as f32 * 4.0;
        host.set_mouse_position(Vec2::new(640.0 + drift, 360.0));
    }
}

/// Owns the scene and its runtime for the lifetime of the demo.
pub struct Session {
    host: Arc<SceneHost>,
    runtime: ScriptRuntime,
    player: EntityId,
    tick: u64,
}

impl Session {
    /// Build the scene, start the runtime and create every script instance.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let host = Arc::new(SceneHost::new());
        let mut runtime = ScriptRuntime::new(config);
        scripts::register_all(&mut runtime)?;
        runtime.on_runtime_start(host.clone());

        let mut player = EntityId::INVALID;
        for entry in SCENE {
            let id = host.spawn(entry.components);
            let entity = Entity::new(id, host.clone());
            if let Some(transform) = entity.get_component::<TransformComponent>() {
                transform.set_translation(entry.translation);
            }
            runtime.on_create_entity(id, entry.class)?;
            if entry.class == scripts::PLAYER {
                player = id;
            }
        }
        info!(entities = host.entity_count(), "scene ready");

        Ok(Self {
            host,
            runtime,
            player,
            tick: 0,
        })
    }

    #[must_use]
    pub fn host(&self) -> &Arc<SceneHost> {
        &self.host
    }

    #[must_use]
    pub fn runtime(&self) -> &ScriptRuntime {
        &self.runtime
    }

    #[must_use]
    pub fn player(&self) -> EntityId {
        self.player
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Run one tick: input, scripts, integration, cleanup. Returns the
    /// sounds triggered during the tick.
    pub fn step(&mut self) -> Vec<SoundEvent> {
        let dt = self.runtime.config().fixed_dt();
        apply_demo_input(&self.host, self.tick);

        if self.runtime.should_reload() {
            self.runtime.reload();
        }
        self.runtime.on_update(dt);
        self.host.advance(dt);

        let host = &self.host;
        self.runtime.retain_instances(|id| host.contains(id));

        let sounds = self.host.take_played_sounds();
        for sound in &sounds {
            debug!(
                tick = self.tick,
                entity = %sound.entity,
                index = sound.index,
                mode = ?sound.mode,
                "sound"
            );
        }
        self.tick += 1;
        sounds
    }

    /// Stop the runtime. Instances are dropped; the scene is kept.
    pub fn shutdown(&mut self) {
        self.runtime.on_runtime_stop();
    }
}
