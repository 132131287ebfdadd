//! # MiniSite Renderer
//!
//! Read side of the site: document in, visual tree out.
//!
//! ```text
//! Site + Theme + RenderMode
//!          │
//!          ▼
//!     Renderer::render ──► VisualTree { nodes, widgets, head, pixels }
//!          │                      │        │
//!          │ resolve_embed        │        └─► TimerRegistry (countdown/carousel ticks)
//!          ▼                      ▼
//!     video iframes          compiler-html / host UI
//! ```
//!
//! Side effects the page has in a browser (page head, tracking pixels, click
//! analytics, install prompt) are modelled as small collaborator traits,
//! every one of them inert in preview mode.

pub mod carousel;
pub mod countdown;
pub mod embed;
pub mod faq;
pub mod install;
pub mod renderer;
pub mod seo;
#[cfg(feature = "async")]
pub mod timers;
pub mod tracking;
pub mod vdom;
pub mod widgets;

pub use carousel::ScrollState;
pub use countdown::Remaining;
pub use embed::{is_script_url, map_embed_url, messaging_url, resolve_embed};
pub use faq::{FaqState, FaqStates};
pub use install::{InstallOutcome, InstallPrompt};
pub use renderer::{render, RenderMode, Renderer};
pub use seo::{apply_seo, derive_seo, DocumentHead, MetaAttr, SeoGuard, SeoHead, SeoTags};
#[cfg(feature = "async")]
pub use timers::{TimerEvent, TimerRegistry};
pub use tracking::{
    inject_pixels, AnalyticsSink, ClickTracker, PixelInjector, RecordingSink, ScriptRegistry,
};
pub use vdom::{Action, PixelSpec, VNode, VisualTree};
pub use widgets::Widget;
