//! # Site Snapshots
//!
//! An immutable, versioned copy of a site. The session hands these out to
//! renderers and stores; because the site sits behind an `Arc`, a snapshot
//! stays complete and consistent no matter what the session does next.
//!
//! On disk a snapshot is an envelope:
//!
//! ```text
//! { "version": 7, "checksum": 1234567890, "site": { ... } }
//! ```
//!
//! The checksum is CRC-32 over the canonical (compact) JSON of `site` and is
//! verified on load.

use crate::EditorError;
use minisite_document::Site;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SiteSnapshot {
    version: u64,
    site: Arc<Site>,
    checksum: u32,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u64,
    checksum: u32,
    site: &'a Site,
}

#[derive(Deserialize)]
struct Envelope {
    version: u64,
    checksum: u32,
    site: Site,
}

impl SiteSnapshot {
    pub fn new(version: u64, site: Arc<Site>) -> Result<Self, EditorError> {
        let checksum = checksum_of(&site)?;
        Ok(Self {
            version,
            site,
            checksum,
        })
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn site_arc(&self) -> Arc<Site> {
        Arc::clone(&self.site)
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        let envelope = EnvelopeRef {
            version: self.version,
            checksum: self.checksum,
            site: &self.site,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    /// Parse an envelope and verify its checksum
    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        let envelope: Envelope = serde_json::from_str(source)?;
        envelope.site.validate()?;

        let actual = checksum_of(&envelope.site)?;
        if actual != envelope.checksum {
            return Err(EditorError::CorruptSnapshot {
                expected: envelope.checksum,
                actual,
            });
        }

        Ok(Self {
            version: envelope.version,
            site: Arc::new(envelope.site),
            checksum: actual,
        })
    }
}

impl PartialEq for SiteSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.checksum == other.checksum && self.site == other.site
    }
}

fn checksum_of(site: &Site) -> Result<u32, EditorError> {
    let bytes = serde_json::to_vec(site)?;
    Ok(crc32fast::hash(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minisite_document::{PlanTier, SiteId};

    fn snapshot() -> SiteSnapshot {
        let site = Site::new(SiteId::new("s1"), "Ana", PlanTier::Start);
        SiteSnapshot::new(3, Arc::new(site)).unwrap()
    }

    #[test]
    fn test_snapshot_survives_save_and_load() {
        let original = snapshot();
        let loaded = SiteSnapshot::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(loaded, original);
        assert_eq!(loaded.version(), 3);
    }

    #[test]
    fn test_tampered_snapshot_is_rejected() {
        let json = snapshot().to_json().unwrap().replace("\"Ana\"", "\"Bob\"");

        match SiteSnapshot::from_json(&json) {
            Err(EditorError::CorruptSnapshot { expected, actual }) => assert_ne!(expected, actual),
            other => panic!("Expected corrupt snapshot, got {:?}", other),
        }
    }
}
