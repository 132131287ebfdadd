//! Persistence collaborator.
//!
//! Where and how documents are stored is up to the host; the editor only
//! needs to save a snapshot and load one back by site id.

use crate::SiteSnapshot;
use async_trait::async_trait;
use minisite_document::SiteId;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No stored site with id {0}")]
    NotFound(String),

    #[error("Stale write for {site}: stored version {stored} is newer than {attempted}")]
    StaleVersion {
        site: String,
        stored: u64,
        attempted: u64,
    },

    #[error("Backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait SiteStore: Send + Sync {
    async fn save(&self, snapshot: &SiteSnapshot) -> Result<(), StoreError>;
    async fn load(&self, id: &SiteId) -> Result<SiteSnapshot, StoreError>;
}

/// In-process store keyed by site id
///
/// Refuses writes older than what it already holds, so two sessions racing
/// on the same site cannot roll each other back.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sites: RwLock<HashMap<SiteId, SiteSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sites.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sites.read().await.is_empty()
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn save(&self, snapshot: &SiteSnapshot) -> Result<(), StoreError> {
        let id = snapshot.site().id.clone();
        let mut sites = self.sites.write().await;

        if let Some(stored) = sites.get(&id) {
            if stored.version() > snapshot.version() {
                return Err(StoreError::StaleVersion {
                    site: id.to_string(),
                    stored: stored.version(),
                    attempted: snapshot.version(),
                });
            }
        }

        debug!(site_id = %id, version = snapshot.version(), "snapshot saved");
        sites.insert(id, snapshot.clone());
        Ok(())
    }

    async fn load(&self, id: &SiteId) -> Result<SiteSnapshot, StoreError> {
        self.sites
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minisite_document::{PlanTier, Site};
    use std::sync::Arc;

    fn snapshot(version: u64) -> SiteSnapshot {
        let site = Site::new(SiteId::new("s1"), "Ana", PlanTier::Free);
        SiteSnapshot::new(version, Arc::new(site)).unwrap()
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        store.save(&snapshot(1)).await.unwrap();

        let loaded = store.load(&SiteId::new("s1")).await.unwrap();
        assert_eq!(loaded.version(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_site() {
        let store = MemoryStore::new();
        assert_eq!(
            store.load(&SiteId::new("nope")).await.unwrap_err(),
            StoreError::NotFound("nope".to_string())
        );
    }

    #[tokio::test]
    async fn test_stale_write_is_refused() {
        let store = MemoryStore::new();
        store.save(&snapshot(5)).await.unwrap();

        let result = store.save(&snapshot(2)).await;
        assert!(matches!(result, Err(StoreError::StaleVersion { stored: 5, attempted: 2, .. })));
    }
}
