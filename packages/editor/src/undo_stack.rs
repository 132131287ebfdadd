//! # Undo/Redo Stack
//!
//! Snapshot history for an edit session.
//!
//! ## Design
//!
//! - Mutations are copy-on-write, so every step already has a before and an
//!   after `Arc<Site>`; recording them is two pointer copies
//! - Undo hands back the `before` site and moves the entry to the redo stack
//! - Redo hands back the `after` site
//! - New entries clear the redo stack
//! - Batches group several mutations into one undo step
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! stack.record(before, after, Some("Add header"));
//!
//! if let Some(site) = stack.undo() {
//!     // restore `site`
//! }
//! ```

use minisite_document::Site;
use std::sync::Arc;

/// One undoable step (a single mutation or a batch)
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Site before the first mutation of the step
    pub before: Arc<Site>,

    /// Site after the last mutation of the step
    pub after: Arc<Site>,

    /// Optional description of this step
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct UndoStack {
    /// Applied steps (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Undone steps (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// `Some` while a batch is open; inner `None` until its first record
    current_batch: Option<Option<HistoryEntry>>,

    batch_description: Option<String>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
            batch_description: None,
        }
    }

    /// Record a step from `before` to `after`
    pub fn record(&mut self, before: Arc<Site>, after: Arc<Site>, description: Option<String>) {
        let Some(pending) = self.current_batch.as_mut() else {
            self.push_entry(HistoryEntry {
                before,
                after,
                description,
            });
            return;
        };

        match pending {
            Some(batch) => batch.after = after,
            None => {
                *pending = Some(HistoryEntry {
                    before,
                    after,
                    description: None,
                });
            }
        }
    }

    /// Start a batch (undone/redone as one step)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(None);
        self.batch_description = None;
    }

    /// Close the current batch; empty batches leave no entry
    pub fn end_batch(&mut self) {
        if let Some(Some(mut batch)) = self.current_batch.take() {
            batch.description = self.batch_description.take();
            self.push_entry(batch);
        }
        self.batch_description = None;
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if self.current_batch.is_some() {
            self.batch_description = Some(description.into());
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the undone future
        self.redo_stack.clear();
    }

    /// Step back; returns the site to restore
    pub fn undo(&mut self) -> Option<Arc<Site>> {
        let entry = self.undo_stack.pop()?;
        let before = Arc::clone(&entry.before);
        self.redo_stack.push(entry);
        Some(before)
    }

    /// Step forward again; returns the site to restore
    pub fn redo(&mut self) -> Option<Arc<Site>> {
        let entry = self.redo_stack.pop()?;
        let after = Arc::clone(&entry.after);
        self.undo_stack.push(entry);
        Some(after)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
        self.batch_description = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
