//! # Page Head
//!
//! Derives title/description/share image for a published page and writes
//! them into whatever head the host exposes.
//!
//! ```text
//! title        header title + suffix │ seo.title │ site name
//! description  seo.description │ first text body │ DEFAULT_DESCRIPTION   (≤ 160 chars)
//! image        seo.image │ header image │ /og-image.jpg
//! ```
//!
//! Nothing is written in preview mode, so the editor's own window title and
//! meta tags are never touched.

use crate::renderer::RenderMode;
use minisite_document::{BlockContent, Site};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_TITLE_SUFFIX: &str = " | RS MiniSite";
pub const DEFAULT_DESCRIPTION: &str = "Check out my professional link in bio.";
pub const DEFAULT_IMAGE: &str = "/og-image.jpg";
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// Resolved head values for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoTags {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl SeoTags {
    /// `(attribute, key, content)` for every meta tag, in write order
    pub fn meta_tags(&self) -> Vec<(MetaAttr, &'static str, &str)> {
        vec![
            (MetaAttr::Name, "description", self.description.as_str()),
            (MetaAttr::Property, "og:title", self.title.as_str()),
            (MetaAttr::Property, "og:description", self.description.as_str()),
            (MetaAttr::Property, "og:image", self.image.as_str()),
            (MetaAttr::Property, "twitter:title", self.title.as_str()),
            (MetaAttr::Property, "twitter:description", self.description.as_str()),
            (MetaAttr::Property, "twitter:image", self.image.as_str()),
        ]
    }
}

/// Which attribute a meta tag is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

pub fn derive_seo(site: &Site, title_suffix: &str) -> SeoTags {
    let header = site.blocks.iter().find_map(|block| match &block.content {
        BlockContent::Header(header) => Some(header),
        _ => None,
    });

    let title = match header.map(|h| h.title.trim()).filter(|t| !t.is_empty()) {
        Some(title) => format!("{}{}", title, title_suffix),
        None => first_non_empty([site.seo.title.as_str(), site.name.as_str()])
            .unwrap_or_default()
            .to_string(),
    };

    let first_text_body = site.blocks.iter().find_map(|block| match &block.content {
        BlockContent::Text(text) => Some(text.body.as_str()),
        _ => None,
    });
    let description = first_non_empty([
        site.seo.description.as_str(),
        first_text_body.unwrap_or_default(),
        DEFAULT_DESCRIPTION,
    ])
    .unwrap_or(DEFAULT_DESCRIPTION);
    let description: String = description.chars().take(DESCRIPTION_MAX_CHARS).collect();

    let header_image = header.and_then(|h| h.image_src.as_deref());
    let image = first_non_empty([
        site.seo.image.as_str(),
        header_image.unwrap_or_default(),
        DEFAULT_IMAGE,
    ])
    .unwrap_or(DEFAULT_IMAGE)
    .to_string();

    SeoTags {
        title,
        description,
        image,
    }
}

fn first_non_empty<'a, const N: usize>(candidates: [&'a str; N]) -> Option<&'a str> {
    candidates.into_iter().map(str::trim).find(|s| !s.is_empty())
}

/// The document head of whatever is hosting the page
pub trait SeoHead {
    fn title(&self) -> String;
    fn set_title(&mut self, title: &str);
    /// Create the tag if missing, then set its content
    fn upsert_meta(&mut self, attr: MetaAttr, key: &str, content: &str);
}

/// In-memory head, used for static export and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentHead {
    pub title: String,
    pub meta: BTreeMap<(MetaAttr, String), String>,
}

impl DocumentHead {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            meta: BTreeMap::new(),
        }
    }

    pub fn meta(&self, attr: MetaAttr, key: &str) -> Option<&str> {
        self.meta
            .get(&(attr, key.to_string()))
            .map(String::as_str)
    }
}

impl SeoHead for DocumentHead {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn upsert_meta(&mut self, attr: MetaAttr, key: &str, content: &str) {
        self.meta
            .insert((attr, key.to_string()), content.to_string());
    }
}

/// Restores the head's previous title when dropped (page unmount)
pub struct SeoGuard<'a, H: SeoHead> {
    head: &'a mut H,
    previous_title: String,
}

impl<'a, H: SeoHead> SeoGuard<'a, H> {
    pub fn head(&self) -> &H {
        self.head
    }
}

impl<'a, H: SeoHead> Drop for SeoGuard<'a, H> {
    fn drop(&mut self) {
        self.head.set_title(&self.previous_title);
    }
}

/// Write the derived tags into `head`; `None` (and no writes) in preview
pub fn apply_seo<'a, H: SeoHead>(
    head: &'a mut H,
    site: &Site,
    mode: &RenderMode,
    title_suffix: &str,
) -> Option<SeoGuard<'a, H>> {
    if mode.is_preview() {
        return None;
    }

    let tags = derive_seo(site, title_suffix);
    let previous_title = head.title();
    head.set_title(&tags.title);
    for (attr, key, content) in tags.meta_tags() {
        head.upsert_meta(attr, key, content);
    }
    debug!(title = %tags.title, "applied page head");

    Some(SeoGuard {
        head,
        previous_title,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use minisite_document::{
        Block, BlockId, BlockStyle, HeaderContent, PlanTier, SiteId, TextContent,
    };

    fn site_with(blocks: Vec<BlockContent>) -> Site {
        let mut site = Site::new(SiteId::new("s1"), "Ana Store", PlanTier::Pro);
        for (i, content) in blocks.into_iter().enumerate() {
            site.blocks.push(Block::new(
                BlockId::new(format!("b{}", i)),
                content,
                BlockStyle::default(),
            ));
        }
        site
    }

    fn header(title: &str, image: Option<&str>) -> BlockContent {
        BlockContent::Header(HeaderContent {
            title: title.to_string(),
            subtitle: None,
            image_src: image.map(str::to_string),
        })
    }

    fn text(body: &str) -> BlockContent {
        BlockContent::Text(TextContent {
            title: None,
            body: body.to_string(),
        })
    }

    #[test]
    fn test_header_title_wins() {
        let mut site = site_with(vec![header("Ana", Some("ana.png")), text("Hello")]);
        site.seo.title = "Explicit".to_string();

        let tags = derive_seo(&site, DEFAULT_TITLE_SUFFIX);
        assert_eq!(tags.title, "Ana | RS MiniSite");
        assert_eq!(tags.description, "Hello");
        assert_eq!(tags.image, "ana.png");
    }

    #[test]
    fn test_fallbacks_without_blocks() {
        let site = site_with(vec![]);
        let tags = derive_seo(&site, DEFAULT_TITLE_SUFFIX);
        assert_eq!(tags.title, "Ana Store");
        assert_eq!(tags.description, DEFAULT_DESCRIPTION);
        assert_eq!(tags.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_explicit_seo_beats_derived_description_and_image() {
        let mut site = site_with(vec![header("", Some("ana.png")), text("Hello")]);
        site.seo.title = "My page".to_string();
        site.seo.description = "Custom".to_string();
        site.seo.image = "share.png".to_string();

        let tags = derive_seo(&site, DEFAULT_TITLE_SUFFIX);
        assert_eq!(tags.title, "My page");
        assert_eq!(tags.description, "Custom");
        assert_eq!(tags.image, "share.png");
    }

    #[test]
    fn test_description_is_truncated() {
        let site = site_with(vec![text(&"é".repeat(300))]);
        let tags = derive_seo(&site, "");
        assert_eq!(tags.description.chars().count(), DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn test_apply_restores_title_on_drop() {
        let site = site_with(vec![header("Ana", None)]);
        let mut head = DocumentHead::new("Editor");

        {
            let guard = apply_seo(&mut head, &site, &RenderMode::Publish, DEFAULT_TITLE_SUFFIX)
                .expect("publish writes the head");
            assert_eq!(guard.head().title, "Ana | RS MiniSite");
        }

        assert_eq!(head.title, "Editor");
        assert_eq!(
            head.meta(MetaAttr::Property, "og:title"),
            Some("Ana | RS MiniSite")
        );
        assert_eq!(head.meta(MetaAttr::Name, "description"), Some(DEFAULT_DESCRIPTION));
    }

    #[test]
    fn test_preview_never_touches_head() {
        let site = site_with(vec![header("Ana", None)]);
        let mut head = DocumentHead::new("Editor");

        let guard = apply_seo(&mut head, &site, &RenderMode::preview(), DEFAULT_TITLE_SUFFIX);
        assert!(guard.is_none());
        drop(guard);
        assert_eq!(head, DocumentHead::new("Editor"));
    }
}
