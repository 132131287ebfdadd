use crate::{Block, BlockId, DocumentError, Theme, TrackingConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subscription tier of the site owner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    #[default]
    Free,
    Start,
    Pro,
    Agency,
    AdminMaster,
}

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Start => "start",
            PlanTier::Pro => "pro",
            PlanTier::Agency => "agency",
            PlanTier::AdminMaster => "admin_master",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlanTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(PlanTier::Free),
            "start" => Ok(PlanTier::Start),
            "pro" => Ok(PlanTier::Pro),
            "agency" => Ok(PlanTier::Agency),
            "admin_master" | "admin-master" => Ok(PlanTier::AdminMaster),
            other => Err(format!("unknown plan: {}", other)),
        }
    }
}

/// Explicit site-wide SEO values; blank fields fall back to derived ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoConfig {
    pub title: String,
    pub description: String,
    pub image: String,
}

/// A link-in-bio site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Site {
    pub id: SiteId,
    pub slug: String,
    pub name: String,
    pub plan: PlanTier,

    /// Render order
    #[serde(alias = "sections")]
    pub blocks: Vec<Block>,

    pub theme: Theme,
    pub seo: SeoConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingConfig>,

    pub is_published: bool,
    pub views: u64,
}

impl Site {
    pub fn new(id: SiteId, name: impl Into<String>, plan: PlanTier) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            id,
            name,
            plan,
            ..Default::default()
        }
    }

    /// Parse and validate a stored document
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        let site: Site = serde_json::from_str(source)?;
        site.validate()?;
        Ok(site)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check structural invariants (non-empty, unique block ids)
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        for block in &self.blocks {
            if block.id.as_str().is_empty() {
                return Err(DocumentError::EmptyBlockId);
            }
            if !seen.insert(&block.id) {
                return Err(DocumentError::DuplicateBlockId(block.id.to_string()));
            }
        }
        Ok(())
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn block_index(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
