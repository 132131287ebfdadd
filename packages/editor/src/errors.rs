//! Error types for the editor

use crate::store::StoreError;
use crate::upload::UploadError;
use minisite_document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Snapshot checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    CorruptSnapshot { expected: u32, actual: u32 },
}
