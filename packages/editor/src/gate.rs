//! # Plan Gate
//!
//! Policy check consulted before any block is added. The lowest tier may only
//! use a handful of block types and a fixed number of blocks (header
//! included); every paid tier is unrestricted.
//!
//! The gate is a pure lookup over the site's *current* tier, evaluated on
//! every call, so a plan change between two calls is always honored.

use minisite_document::{BlockType, PlanTier, Site};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Block types available on the free tier
pub const FREE_ALLOWED_TYPES: [BlockType; 4] = [
    BlockType::Header,
    BlockType::Text,
    BlockType::Button,
    BlockType::ImageText,
];

/// Header + three content blocks
pub const FREE_BLOCK_LIMIT: usize = 4;

/// Why a block could not be added
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateRejection {
    #[error("type not allowed on this tier")]
    TypeNotAllowed { tier: PlanTier, block_type: BlockType },

    #[error("block-count limit reached")]
    BlockLimitReached { tier: PlanTier, limit: usize },
}

/// Restrictions attached to a plan tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanPolicy {
    /// `None` = every type allowed
    pub allowed_types: Option<&'static [BlockType]>,
    /// `None` = unlimited
    pub max_blocks: Option<usize>,
}

impl PlanPolicy {
    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Free => Self {
                allowed_types: Some(&FREE_ALLOWED_TYPES),
                max_blocks: Some(FREE_BLOCK_LIMIT),
            },
            PlanTier::Start | PlanTier::Pro | PlanTier::Agency | PlanTier::AdminMaster => Self {
                allowed_types: None,
                max_blocks: None,
            },
        }
    }

    pub fn allows_type(&self, block_type: BlockType) -> bool {
        self.allowed_types
            .map_or(true, |allowed| allowed.contains(&block_type))
    }
}

/// Can a block of `block_type` be appended to `site`?
///
/// The type check runs before the count check, so a disallowed type on a
/// full site reports the type.
pub fn can_add(site: &Site, block_type: BlockType) -> Result<(), GateRejection> {
    let tier = site.plan;
    let policy = PlanPolicy::for_tier(tier);

    if !policy.allows_type(block_type) {
        return Err(GateRejection::TypeNotAllowed { tier, block_type });
    }

    if let Some(limit) = policy.max_blocks {
        if site.blocks.len() >= limit {
            return Err(GateRejection::BlockLimitReached { tier, limit });
        }
    }

    Ok(())
}
