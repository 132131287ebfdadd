//! # Uploads
//!
//! Turning a user-selected file into a URL is asynchronous and the editor
//! keeps going while it runs. Only one upload is "live" at a time:
//!
//! ```text
//! begin(target A) ─► ticket #1 ──upload──┐
//! begin(target B) ─► ticket #2 ──upload──┼─► finish(#2) applied
//!                                        └─► finish(#1) discarded (superseded)
//! ```
//!
//! A finished upload becomes an ordinary [`Mutation`] targeting whatever field
//! the user picked when the upload started.

use crate::collections::Collection;
use crate::Mutation;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use minisite_document::{BlockId, Patch};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// 5 MiB
pub const DEFAULT_MAX_INLINE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File is empty")]
    Empty,

    #[error("File is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),

    #[error("Upload failed: {0}")]
    Transport(String),
}

/// Field that receives the uploaded URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UploadTarget {
    /// e.g. `imageSrc` of a header or product
    BlockContent { id: BlockId, field: String },
    /// e.g. `backgroundImage` of a block
    BlockStyle { id: BlockId, field: String },
    /// e.g. `imageSrc` of a carousel slide
    Item {
        id: BlockId,
        collection: Collection,
        index: usize,
        field: String,
    },
    /// e.g. `backgroundImage` of the theme
    Theme { field: String },
    /// Share image of the site
    SeoImage,
}

impl UploadTarget {
    pub fn into_mutation(self, url: String) -> Mutation {
        match self {
            UploadTarget::BlockContent { id, field } => Mutation::UpdateContent {
                id,
                patch: Patch::new().set(field, url),
            },
            UploadTarget::BlockStyle { id, field } => Mutation::UpdateStyle {
                id,
                patch: Patch::new().set(field, url),
            },
            UploadTarget::Item {
                id,
                collection,
                index,
                field,
            } => Mutation::UpdateItem {
                id,
                collection,
                index,
                patch: Patch::new().set(field, url),
            },
            UploadTarget::Theme { field } => Mutation::UpdateTheme {
                patch: Patch::new().set(field, url),
            },
            UploadTarget::SeoImage => Mutation::UpdateSeo {
                patch: Patch::new().set("image", url),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    generation: u64,
    target: UploadTarget,
}

impl UploadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn target(&self) -> &UploadTarget {
        &self.target
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedUpload {
    pub ticket: UploadTicket,
    pub url: String,
}

/// Hands out tickets; only the most recent one may complete
#[derive(Debug, Default)]
pub struct UploadSlot {
    generation: u64,
}

impl UploadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an upload, superseding any in flight
    pub fn begin(&mut self, target: UploadTarget) -> UploadTicket {
        self.generation += 1;
        debug!(generation = self.generation, ?target, "upload started");
        UploadTicket {
            generation: self.generation,
            target,
        }
    }

    pub fn is_current(&self, ticket: &UploadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Drop the in-flight upload, if any
    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}

/// A user-selected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Converts a file into a URL the document can reference
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, file: &UploadFile) -> Result<String, UploadError>;
}

/// Embeds the file as a `data:` URL
#[derive(Debug, Clone)]
pub struct InlineUploader {
    max_bytes: usize,
}

impl InlineUploader {
    pub fn new() -> Self {
        Self::with_max_bytes(DEFAULT_MAX_INLINE_BYTES)
    }

    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for InlineUploader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Uploader for InlineUploader {
    async fn upload(&self, file: &UploadFile) -> Result<String, UploadError> {
        if file.bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if file.bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: file.bytes.len(),
                limit: self.max_bytes,
            });
        }

        let mime = file.mime_type.trim().to_ascii_lowercase();
        if !(mime.starts_with("image/") || mime.starts_with("video/")) {
            return Err(UploadError::UnsupportedType(file.mime_type.clone()));
        }

        Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&file.bytes)))
    }
}

/// Run `ticket`'s upload to completion
pub async fn run_upload<U>(
    uploader: &U,
    ticket: UploadTicket,
    file: &UploadFile,
) -> Result<CompletedUpload, UploadError>
where
    U: Uploader + ?Sized,
{
    let url = uploader.upload(file).await?;
    debug!(generation = ticket.generation, file = %file.name, "upload finished");
    Ok(CompletedUpload { ticket, url })
}
