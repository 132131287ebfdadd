//! Error types for the document model

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(String),

    #[error("Block id must not be empty")]
    EmptyBlockId,
}

/// Why a merge-patch could not be applied.
///
/// Mutations treat every variant as a no-op; the error exists so callers
/// that care (tests, the CLI) can say why nothing changed.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Target does not serialize to a JSON object")]
    NotAnObject,

    #[error("Patched value does not fit the target type: {0}")]
    TypeMismatch(#[from] serde_json::Error),
}
