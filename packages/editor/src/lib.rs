//! # MiniSite Editor
//!
//! Write path for link-in-bio sites.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ EditSession                                 │
//! │  - selection, undo/redo, unsaved mutations  │
//! │  - uploads (latest wins)                    │
//! └─────────────────────────────────────────────┘
//!                     ↓ Mutation
//! ┌─────────────────────────────────────────────┐
//! │ gate: may this block be added on this plan? │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations / collections: &Site → Site       │
//! │  - copy-on-write, total, idempotent patches │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ SiteSnapshot: Arc<Site> + version + crc32   │
//! │  → renderer, SiteStore                      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use minisite_editor::{EditSession, Mutation};
//!
//! let mut session = EditSession::new("client-1", site);
//!
//! let id = session.apply(Mutation::AddBlock { block_type: BlockType::Button })?;
//! session.apply(Mutation::UpdateContent {
//!     id: id.unwrap(),
//!     patch: Patch::new().set("label", "Shop"),
//! })?;
//!
//! let snapshot = session.snapshot()?;
//! session.save(&store).await?;
//! ```

mod collections;
mod defaults;
mod errors;
mod gate;
mod mutations;
mod session;
mod snapshot;
mod store;
mod undo_stack;
mod upload;

pub use collections::{add_item, remove_item, update_item, Collection};
pub use defaults::{default_block, default_content, default_style};
pub use errors::EditorError;
pub use gate::{can_add, GateRejection, PlanPolicy, FREE_ALLOWED_TYPES, FREE_BLOCK_LIMIT};
pub use mutations::{
    add_block, add_block_at, delete_block, move_block, record_click, set_plan,
    update_block_content, update_block_style, update_seo, update_theme, update_tracking,
    AddedBlock, Direction, Mutation, MutationResult,
};
pub use session::{EditSession, PendingMutation};
pub use snapshot::SiteSnapshot;
pub use store::{MemoryStore, SiteStore, StoreError};
pub use undo_stack::{HistoryEntry, UndoStack};
pub use upload::{
    run_upload, CompletedUpload, InlineUploader, UploadError, UploadFile, UploadSlot,
    UploadTarget, UploadTicket, Uploader,
};

// Re-export the document model for convenience
pub use minisite_document as document;
