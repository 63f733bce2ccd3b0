//! # engine_glue
//!
//! Host side of the script boundary.
//!
//! This crate provides:
//!
//! - [`ffi`]: [`NativeCallTable`], the C-ABI function-pointer table a native
//!   engine fills in, and [`NativeCalls`], its validated
//!   [`InternalCalls`](engine_script::InternalCalls) implementation.
//! - [`host`]: [`SceneHost`], an in-memory engine that answers every call
//!   itself. Used for tests and the demo host.
//! - [`error`]: glue error types.

pub mod error;
pub mod ffi;
pub mod host;

pub use error::GlueError;
pub use ffi::{NativeCallTable, NativeCalls};
pub use host::{SceneHost, SoundEvent, SoundMode};
