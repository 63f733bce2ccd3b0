//! # engine_runtime
//!
//! Runs entity scripts against the engine boundary.
//!
//! A host registers script classes by name, starts the runtime with an
//! [`InternalCalls`](engine_script::InternalCalls) implementation, binds
//! classes to entities, then drives every instance once per tick:
//!
//! 1. [`ScriptRuntime::register_class`] for each script type.
//! 2. [`ScriptRuntime::on_runtime_start`] with the engine boundary.
//! 3. [`ScriptRuntime::on_create_entity`] per scripted entity (runs
//!    `on_create`).
//! 4. [`ScriptRuntime::on_update`] every tick (runs `on_update`).
//! 5. [`ScriptRuntime::on_runtime_stop`] to drop all instances.

pub mod config;
pub mod error;
pub mod runtime;
pub mod script;

pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use runtime::ScriptRuntime;
pub use script::{EntityScript, ScriptClass, ScriptInstance};
