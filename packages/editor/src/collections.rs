//! # Nested Collections
//!
//! Blocks that hold a list of items (social links, FAQ entries, grid tiles,
//! carousel slides) are edited item by item. Every operation here follows the
//! same no-op rule as block mutations: an unknown block id, a block whose
//! type has no such collection, or an out-of-range index returns an
//! unchanged copy.

use minisite_document::{
    merge_patch, BlockContent, BlockId, CarouselSlide, FaqItem, GridItem, GridItemKind, Patch,
    Site, SocialLink, SocialPlatform,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    SocialLinks,
    Faq,
    Grid,
    Carousel,
}

impl Collection {
    pub fn item_name(&self) -> &'static str {
        match self {
            Collection::SocialLinks => "social link",
            Collection::Faq => "FAQ entry",
            Collection::Grid => "grid item",
            Collection::Carousel => "carousel slide",
        }
    }
}

/// Append a default item to the block's collection
pub fn add_item(site: &Site, id: &BlockId, collection: Collection) -> Site {
    edit_collection(site, id, collection, |items| match items {
        Items::SocialLinks(links) => links.push(SocialLink {
            platform: SocialPlatform::Website,
            url: "https://".to_string(),
        }),
        Items::Faq(entries) => entries.push(FaqItem {
            question: "New question".to_string(),
            answer: "Your answer here.".to_string(),
            ..Default::default()
        }),
        Items::Grid(tiles) => tiles.push(GridItem {
            kind: GridItemKind::Image,
            title: Some("New item".to_string()),
            subtitle: Some("See more".to_string()),
            image_src: Some("https://picsum.photos/400/300".to_string()),
            ..Default::default()
        }),
        Items::Carousel(slides) => slides.push(CarouselSlide {
            image_src: "https://picsum.photos/400/500".to_string(),
            title: Some("New slide".to_string()),
            url: Some("#".to_string()),
        }),
    })
}

/// Merge `patch` into the item at `index`
pub fn update_item(
    site: &Site,
    id: &BlockId,
    collection: Collection,
    index: usize,
    patch: &Patch,
) -> Site {
    edit_collection(site, id, collection, |items| match items {
        Items::SocialLinks(links) => patch_at(links, index, patch),
        Items::Faq(entries) => patch_at(entries, index, patch),
        Items::Grid(tiles) => patch_at(tiles, index, patch),
        Items::Carousel(slides) => patch_at(slides, index, patch),
    })
}

pub fn remove_item(site: &Site, id: &BlockId, collection: Collection, index: usize) -> Site {
    edit_collection(site, id, collection, |items| match items {
        Items::SocialLinks(links) => remove_at(links, index),
        Items::Faq(entries) => remove_at(entries, index),
        Items::Grid(tiles) => remove_at(tiles, index),
        Items::Carousel(slides) => remove_at(slides, index),
    })
}

/// Mutable view of one block's collection
enum Items<'a> {
    SocialLinks(&'a mut Vec<SocialLink>),
    Faq(&'a mut Vec<FaqItem>),
    Grid(&'a mut Vec<GridItem>),
    Carousel(&'a mut Vec<CarouselSlide>),
}

fn items_of(content: &mut BlockContent, collection: Collection) -> Option<Items<'_>> {
    match (collection, content) {
        (Collection::SocialLinks, BlockContent::SocialLinks(c)) => Some(Items::SocialLinks(&mut c.links)),
        (Collection::Faq, BlockContent::Faq(c)) => Some(Items::Faq(&mut c.items)),
        (Collection::Grid, BlockContent::Grid(c)) => Some(Items::Grid(&mut c.items)),
        (Collection::Carousel, BlockContent::Carousel(c)) => Some(Items::Carousel(&mut c.slides)),
        _ => None,
    }
}

fn edit_collection<F>(site: &Site, id: &BlockId, collection: Collection, edit: F) -> Site
where
    F: FnOnce(Items<'_>),
{
    let mut next = site.clone();
    let Some(block) = next.blocks.iter_mut().find(|b| &b.id == id) else {
        return next;
    };

    let block_type = block.block_type();
    match items_of(&mut block.content, collection) {
        Some(items) => edit(items),
        None => debug!(
            block_id = %id,
            block_type = %block_type,
            collection = collection.item_name(),
            "block has no such collection"
        ),
    }
    next
}

fn patch_at<T>(items: &mut [T], index: usize, patch: &Patch)
where
    T: Serialize + DeserializeOwned,
{
    let Some(item) = items.get_mut(index) else {
        return;
    };
    match merge_patch(&*item, patch) {
        Ok(merged) => *item = merged,
        Err(error) => warn!(index, %error, "item patch ignored"),
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) {
    if index < items.len() {
        items.remove(index);
    }
}
