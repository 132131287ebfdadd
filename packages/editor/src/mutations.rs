//! # Site Mutations
//!
//! Every edit to a site goes through the functions in this module.
//!
//! ## Semantics
//!
//! - **Copy-on-write**: operations take `&Site` and return a new `Site`; the
//!   input is never modified, so older snapshots stay valid.
//! - **Total**: an unknown block id, an out-of-range index or a patch that
//!   does not fit the target type returns an unchanged copy instead of an
//!   error. The only failure surfaced to callers is a [`GateRejection`] from
//!   `add_block`.
//! - **Idempotent patches**: applying the same patch twice yields the same
//!   site as applying it once.
//!
//! ### AddBlock
//! - Consults the plan gate first
//! - Appends a block with type-specific defaults and reports its id
//!
//! ### Move
//! - Swaps with the neighbor in the given direction
//! - No-op at the boundaries and for indices past the end

use crate::collections::{self, Collection};
use crate::defaults::default_block;
use crate::gate::{can_add, GateRejection};
use chrono::{DateTime, Utc};
use minisite_document::{merge_patch, BlockId, BlockType, Patch, PlanTier, Site};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Result of a successful [`add_block`]
#[derive(Debug, Clone, PartialEq)]
pub struct AddedBlock {
    pub site: Site,
    /// Id of the appended block (the session selects it)
    pub id: BlockId,
}

pub fn add_block(site: &Site, kind: BlockType) -> Result<AddedBlock, GateRejection> {
    add_block_at(site, kind, Utc::now())
}

/// [`add_block`] with a pinned clock for time-relative defaults
pub fn add_block_at(
    site: &Site,
    kind: BlockType,
    now: DateTime<Utc>,
) -> Result<AddedBlock, GateRejection> {
    if let Err(rejection) = can_add(site, kind) {
        debug!(block_type = %kind, plan = %site.plan, reason = %rejection, "add_block rejected");
        return Err(rejection);
    }

    let mut block = default_block(kind, &site.theme, now);
    while site.block(&block.id).is_some() {
        block.id = BlockId::generate();
    }

    let id = block.id.clone();
    let mut next = site.clone();
    next.blocks.push(block);

    debug!(block_type = %kind, block_id = %id, count = next.blocks.len(), "block added");
    Ok(AddedBlock { site: next, id })
}

pub fn update_block_content(site: &Site, id: &BlockId, patch: &Patch) -> Site {
    let mut next = site.clone();
    let Some(block) = next.blocks.iter_mut().find(|b| &b.id == id) else {
        return next;
    };

    match block.content.merged(patch) {
        Ok(content) => block.content = content,
        Err(error) => warn!(block_id = %id, %error, "content patch ignored"),
    }
    next
}

pub fn update_block_style(site: &Site, id: &BlockId, patch: &Patch) -> Site {
    let mut next = site.clone();
    let Some(block) = next.blocks.iter_mut().find(|b| &b.id == id) else {
        return next;
    };

    match merge_patch(&block.style, patch) {
        Ok(style) => block.style = style,
        Err(error) => warn!(block_id = %id, %error, "style patch ignored"),
    }
    next
}

/// Remove the block with `id`; at most one block is removed
pub fn delete_block(site: &Site, id: &BlockId) -> Site {
    let mut next = site.clone();
    if let Some(index) = next.block_index(id) {
        next.blocks.remove(index);
        debug!(block_id = %id, "block deleted");
    }
    next
}

pub fn move_block(site: &Site, index: usize, direction: Direction) -> Site {
    let mut next = site.clone();
    let len = next.blocks.len();

    match direction {
        Direction::Up if index > 0 && index < len => next.blocks.swap(index, index - 1),
        Direction::Down if index < len.saturating_sub(1) => next.blocks.swap(index, index + 1),
        _ => {}
    }
    next
}

pub fn update_theme(site: &Site, patch: &Patch) -> Site {
    let mut next = site.clone();
    match merge_patch(&site.theme, patch) {
        Ok(theme) => next.theme = theme,
        Err(error) => warn!(%error, "theme patch ignored"),
    }
    next
}

pub fn update_seo(site: &Site, patch: &Patch) -> Site {
    let mut next = site.clone();
    match merge_patch(&site.seo, patch) {
        Ok(seo) => next.seo = seo,
        Err(error) => warn!(%error, "seo patch ignored"),
    }
    next
}

/// Merge into the tracking config, creating it when absent
pub fn update_tracking(site: &Site, patch: &Patch) -> Site {
    let mut next = site.clone();
    let current = site.tracking.clone().unwrap_or_default();
    match merge_patch(&current, patch) {
        Ok(tracking) => next.tracking = Some(tracking),
        Err(error) => warn!(%error, "tracking patch ignored"),
    }
    next
}

pub fn record_click(site: &Site, id: &BlockId) -> Site {
    let mut next = site.clone();
    if let Some(block) = next.blocks.iter_mut().find(|b| &b.id == id) {
        block.clicks = Some(block.clicks.unwrap_or(0).saturating_add(1));
    }
    next
}

/// Change the tier; existing blocks are kept even if the new tier would not
/// allow adding them
pub fn set_plan(site: &Site, plan: PlanTier) -> Site {
    let mut next = site.clone();
    next.plan = plan;
    next
}

/// Serializable description of an edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    AddBlock {
        block_type: BlockType,
    },
    UpdateContent {
        id: BlockId,
        patch: Patch,
    },
    UpdateStyle {
        id: BlockId,
        patch: Patch,
    },
    DeleteBlock {
        id: BlockId,
    },
    MoveBlock {
        index: usize,
        direction: Direction,
    },
    AddItem {
        id: BlockId,
        collection: Collection,
    },
    UpdateItem {
        id: BlockId,
        collection: Collection,
        index: usize,
        patch: Patch,
    },
    RemoveItem {
        id: BlockId,
        collection: Collection,
        index: usize,
    },
    UpdateTheme {
        patch: Patch,
    },
    UpdateSeo {
        patch: Patch,
    },
    UpdateTracking {
        patch: Patch,
    },
    RecordClick {
        id: BlockId,
    },
    SetPlan {
        plan: PlanTier,
    },
}

/// Outcome of [`Mutation::apply_at`]
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    pub site: Site,
    /// Set when the mutation appended a block
    pub added: Option<BlockId>,
}

impl Mutation {
    pub fn apply(&self, site: &Site) -> Result<Site, GateRejection> {
        self.apply_at(site, Utc::now()).map(|result| result.site)
    }

    pub fn apply_at(&self, site: &Site, now: DateTime<Utc>) -> Result<MutationResult, GateRejection> {
        let site = match self {
            Mutation::AddBlock { block_type } => {
                let added = add_block_at(site, *block_type, now)?;
                return Ok(MutationResult {
                    site: added.site,
                    added: Some(added.id),
                });
            }
            Mutation::UpdateContent { id, patch } => update_block_content(site, id, patch),
            Mutation::UpdateStyle { id, patch } => update_block_style(site, id, patch),
            Mutation::DeleteBlock { id } => delete_block(site, id),
            Mutation::MoveBlock { index, direction } => move_block(site, *index, *direction),
            Mutation::AddItem { id, collection } => collections::add_item(site, id, *collection),
            Mutation::UpdateItem {
                id,
                collection,
                index,
                patch,
            } => collections::update_item(site, id, *collection, *index, patch),
            Mutation::RemoveItem {
                id,
                collection,
                index,
            } => collections::remove_item(site, id, *collection, *index),
            Mutation::UpdateTheme { patch } => update_theme(site, patch),
            Mutation::UpdateSeo { patch } => update_seo(site, patch),
            Mutation::UpdateTracking { patch } => update_tracking(site, patch),
            Mutation::RecordClick { id } => record_click(site, id),
            Mutation::SetPlan { plan } => set_plan(site, *plan),
        };

        Ok(MutationResult { site, added: None })
    }

    /// Short label for history entries
    pub fn description(&self) -> String {
        match self {
            Mutation::AddBlock { block_type } => format!("Add {}", block_type),
            Mutation::UpdateContent { id, .. } => format!("Edit content of {}", id),
            Mutation::UpdateStyle { id, .. } => format!("Edit style of {}", id),
            Mutation::DeleteBlock { id } => format!("Delete {}", id),
            Mutation::MoveBlock { index, direction } => {
                format!("Move block {} {}", index, if *direction == Direction::Up { "up" } else { "down" })
            }
            Mutation::AddItem { collection, .. } => format!("Add {}", collection.item_name()),
            Mutation::UpdateItem { collection, index, .. } => {
                format!("Edit {} {}", collection.item_name(), index)
            }
            Mutation::RemoveItem { collection, index, .. } => {
                format!("Remove {} {}", collection.item_name(), index)
            }
            Mutation::UpdateTheme { .. } => "Edit theme".to_string(),
            Mutation::UpdateSeo { .. } => "Edit SEO".to_string(),
            Mutation::UpdateTracking { .. } => "Edit tracking".to_string(),
            Mutation::RecordClick { id } => format!("Click on {}", id),
            Mutation::SetPlan { plan } => format!("Switch plan to {}", plan),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minisite_document::{BlockContent, SiteId};
    use serde_json::json;

    fn pro_site() -> Site {
        Site::new(SiteId::new("s"), "Test", PlanTier::Pro)
    }

    #[test]
    fn test_add_block_does_not_touch_input() {
        let site = pro_site();
        let added = add_block(&site, BlockType::Faq).unwrap();

        assert!(site.blocks.is_empty());
        assert_eq!(added.site.blocks.len(), 1);
        assert_eq!(added.site.blocks[0].id, added.id);
    }

    #[test]
    fn test_move_out_of_range_is_noop() {
        let mut site = pro_site();
        for kind in [BlockType::Text, BlockType::Button] {
            site = add_block(&site, kind).unwrap().site;
        }

        assert_eq!(move_block(&site, 0, Direction::Up), site);
        assert_eq!(move_block(&site, 1, Direction::Down), site);
        assert_eq!(move_block(&site, 9, Direction::Up), site);
        assert_eq!(move_block(&site, 9, Direction::Down), site);
        assert_eq!(move_block(&site, usize::MAX, Direction::Up), site);
        assert_eq!(move_block(&site, usize::MAX, Direction::Down), site);
    }

    #[test]
    fn test_stored_move_with_huge_index_is_noop() {
        let site = add_block(&pro_site(), BlockType::Text).unwrap().site;
        let mutation: Mutation = serde_json::from_value(json!({
            "op": "moveBlock",
            "index": u64::MAX,
            "direction": "down"
        }))
        .unwrap();
        assert_eq!(mutation.apply(&site).unwrap(), site);
    }

    #[test]
    fn test_record_click_counts_from_zero() {
        let added = add_block(&pro_site(), BlockType::Button).unwrap();
        let site = record_click(&added.site, &added.id);
        let site = record_click(&site, &added.id);
        assert_eq!(site.blocks[0].clicks, Some(2));
    }

    #[test]
    fn test_update_tracking_creates_config() {
        let site = update_tracking(&pro_site(), &Patch::new().set("metaPixelId", "123"));
        let tracking = site.tracking.unwrap();
        assert_eq!(tracking.meta_pixel_id.as_deref(), Some("123"));
    }

    #[test]
    fn test_mutation_wire_format() {
        let mutation: Mutation = serde_json::from_value(json!({
            "op": "updateContent",
            "id": "abc",
            "patch": { "title": "Hi" }
        }))
        .unwrap();

        assert_eq!(
            mutation,
            Mutation::UpdateContent {
                id: BlockId::new("abc"),
                patch: Patch::new().set("title", "Hi"),
            }
        );

        let add: Mutation =
            serde_json::from_value(json!({ "op": "addBlock", "blockType": "image-text" })).unwrap();
        assert_eq!(add, Mutation::AddBlock { block_type: BlockType::ImageText });
    }

    #[test]
    fn test_apply_reports_added_block() {
        let result = Mutation::AddBlock { block_type: BlockType::Header }
            .apply_at(&pro_site(), Utc::now())
            .unwrap();

        let id = result.added.unwrap();
        assert!(matches!(result.site.block(&id).unwrap().content, BlockContent::Header(_)));
    }
}
