//! # MiniSite Document Model
//!
//! Typed schema for a link-in-bio site. A site is saved as a single JSON
//! document, never as HTML:
//!
//! ```text
//! Site
//!  ├─ blocks: [Block]          (render order)
//!  │    ├─ id
//!  │    ├─ type + content      (one content shape per block type)
//!  │    ├─ style
//!  │    └─ clicks?
//!  ├─ theme
//!  ├─ seo
//!  ├─ tracking?
//!  └─ plan
//! ```
//!
//! Stored documents written by older editors used different tag names
//! (`hero`, `social`, `whatsapp`, `bento`) and field names; both are accepted
//! on load through serde aliases.

mod block;
mod content;
mod error;
mod patch;
mod profile;
mod site;
mod style;
mod theme;
mod tracking;

pub use block::{Block, BlockId, BlockType};
pub use content::{
    BlockContent, ButtonContent, CarouselContent, CarouselSlide, CountdownContent,
    CountdownShape, FaqContent, FaqItem, GalleryContent, GridContent, GridItem, GridItemKind,
    HeaderContent, ImageTextContent, MapContent, MessagingContent, NewsletterContent, NoContent,
    ProductContent, SocialLink, SocialLinksContent, SocialPlatform, TextContent, VideoContent,
};
pub use error::{DocumentError, PatchError};
pub use patch::{merge_patch, Patch};
pub use profile::CheckoutProfile;
pub use site::{PlanTier, SeoConfig, Site, SiteId};
pub use style::{Alignment, BackgroundMode, BlockStyle, DividerPattern};
pub use theme::Theme;
pub use tracking::{PixelProvider, TrackingConfig};
