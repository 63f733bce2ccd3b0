//! Glue-layer error types.

/// Errors raised while binding a native call table.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GlueError {
    /// The host passed a null table pointer.
    #[error("native call table pointer is null")]
    NullTable,

    /// The host left a required call unset.
    #[error("native call table is missing `{0}`")]
    MissingCall(&'static str),
}
