//! # Edit Session
//!
//! One user's editing state for one site: the current document, the selected
//! block, undo history, unsaved mutations and the in-flight upload.
//!
//! The document is held as an `Arc<Site>` plus a version number. Mutations
//! build a new site and swap the pointer, so anything previously handed out
//! through [`EditSession::snapshot`] keeps seeing a complete document.

use crate::mutations::MutationResult;
use crate::store::SiteStore;
use crate::upload::{CompletedUpload, UploadSlot, UploadTarget, UploadTicket};
use crate::{EditorError, GateRejection, Mutation, SiteSnapshot, UndoStack};
use chrono::{DateTime, Utc};
use minisite_document::{BlockId, Site, SiteId};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Mutation applied since the last save
#[derive(Debug, Clone)]
pub struct PendingMutation {
    /// Session-local mutation id
    pub id: String,

    pub mutation: Mutation,

    pub timestamp: DateTime<Utc>,
}

pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    site: Arc<Site>,
    version: u64,
    /// Version last written to (or read from) a store
    saved_version: u64,
    selected: Option<BlockId>,
    history: UndoStack,
    pending: Vec<PendingMutation>,
    next_mutation: u64,
    uploads: UploadSlot,
}

impl EditSession {
    pub fn new(id: impl Into<String>, site: Site) -> Self {
        Self::from_snapshot_parts(id.into(), Arc::new(site), 0)
    }

    fn from_snapshot_parts(id: String, site: Arc<Site>, version: u64) -> Self {
        Self {
            id,
            site,
            version,
            saved_version: version,
            selected: None,
            history: UndoStack::new(),
            pending: Vec::new(),
            next_mutation: 0,
            uploads: UploadSlot::new(),
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    /// Select a block; ignored unless the block exists
    pub fn select(&mut self, id: &BlockId) -> bool {
        if self.site.block(id).is_some() {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn apply(&mut self, mutation: Mutation) -> Result<Option<BlockId>, GateRejection> {
        self.apply_at(mutation, Utc::now())
    }

    /// Apply a mutation with a pinned clock
    ///
    /// Returns the id of the appended block for `AddBlock`. Mutations that
    /// leave the site unchanged do not bump the version or the history.
    pub fn apply_at(
        &mut self,
        mutation: Mutation,
        now: DateTime<Utc>,
    ) -> Result<Option<BlockId>, GateRejection> {
        let MutationResult { site, added } = mutation.apply_at(&self.site, now)?;

        if let Mutation::DeleteBlock { .. } = &mutation {
            self.selected = None;
        }
        if let Some(id) = &added {
            self.selected = Some(id.clone());
        }

        if site == *self.site {
            debug!(session = %self.id, op = %mutation.description(), "mutation left site unchanged");
            return Ok(added);
        }

        let before = std::mem::replace(&mut self.site, Arc::new(site));
        self.version += 1;
        self.history.record(
            before,
            Arc::clone(&self.site),
            Some(mutation.description()),
        );

        self.next_mutation += 1;
        self.pending.push(PendingMutation {
            id: format!("{}-{}", self.id, self.next_mutation),
            mutation,
            timestamp: now,
        });

        Ok(added)
    }

    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(site) => {
                self.restore(site);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(site) => {
                self.restore(site);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, site: Arc<Site>) {
        self.site = site;
        self.version += 1;
        if let Some(id) = &self.selected {
            if self.site.block(id).is_none() {
                self.selected = None;
            }
        }
    }

    /// Immutable copy of the current document
    pub fn snapshot(&self) -> Result<SiteSnapshot, EditorError> {
        SiteSnapshot::new(self.version, Arc::clone(&self.site))
    }

    pub fn pending(&self) -> &[PendingMutation] {
        &self.pending
    }

    /// Whether the document differs from the last save, undo and redo included
    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version
    }

    #[instrument(skip(self, store), fields(session = %self.id, version = self.version))]
    pub async fn save<S>(&mut self, store: &S) -> Result<(), EditorError>
    where
        S: SiteStore + ?Sized,
    {
        let snapshot = self.snapshot()?;
        store.save(&snapshot).await?;

        info!(site_id = %self.site.id, pending = self.pending.len(), "site saved");
        self.pending.clear();
        self.saved_version = snapshot.version();
        Ok(())
    }

    /// Open a session on a stored site
    #[instrument(skip(store))]
    pub async fn load<S>(id: String, site_id: &SiteId, store: &S) -> Result<Self, EditorError>
    where
        S: SiteStore + ?Sized,
    {
        let snapshot = store.load(site_id).await?;
        info!(version = snapshot.version(), "site loaded");
        Ok(Self::from_snapshot_parts(id, snapshot.site_arc(), snapshot.version()))
    }

    /// Start an upload for `target`, superseding any upload in flight
    pub fn begin_upload(&mut self, target: UploadTarget) -> UploadTicket {
        self.uploads.begin(target)
    }

    pub fn cancel_upload(&mut self) {
        self.uploads.cancel();
    }

    /// Apply a finished upload
    ///
    /// Returns `Ok(false)` when the upload was superseded and discarded.
    pub fn finish_upload(&mut self, upload: CompletedUpload) -> Result<bool, GateRejection> {
        if !self.uploads.is_current(&upload.ticket) {
            debug!(
                session = %self.id,
                generation = upload.ticket.generation(),
                "superseded upload discarded"
            );
            return Ok(false);
        }

        self.uploads.cancel();
        let mutation = upload.ticket.target().clone().into_mutation(upload.url);
        self.apply(mutation)?;
        Ok(true)
    }
}
