//! # Rendering Dispatcher
//!
//! Turns a [`Site`] into a [`VisualTree`]. Total over the block catalog: every
//! block type has a body, and missing or invalid data renders a placeholder
//! instead of failing.
//!
//! ```text
//! page
//!  ├─ background media + overlay      (theme image/video only)
//!  ├─ main
//!  │    └─ block wrapper × N          (data-block-id, background, text color)
//!  │         ├─ media layer + overlay (block image/video only)
//!  │         ├─ selection overlay     (preview only → SelectBlock)
//!  │         └─ block body            (per-type)
//!  ├─ footer                          (free plan only)
//!  └─ install button                  (publish, prompt captured)
//! ```
//!
//! Preview mode never emits tracking, checkout or head/pixel output; publish
//! mode opens links in a new tab and reports clicks.

use crate::countdown;
use crate::embed::{is_script_url, map_embed_url, messaging_url, resolve_embed};
use crate::faq::FaqStates;
use crate::seo::{derive_seo, DEFAULT_TITLE_SUFFIX};
use crate::tracking::pixel_specs;
use crate::vdom::{Action, VNode, VisualTree};
use crate::widgets::Widget;
use chrono::{DateTime, Utc};
use minisite_document::{
    Alignment, BackgroundMode, Block, BlockContent, BlockId, BlockStyle, ButtonContent,
    CarouselContent, CountdownContent, FaqContent, GalleryContent, GridContent, GridItemKind,
    HeaderContent, ImageTextContent, MapContent, MessagingContent, NewsletterContent, PlanTier,
    ProductContent, Site, SocialLinksContent, TextContent, Theme, VideoContent,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

pub const AVATAR_PLACEHOLDER: &str = "https://picsum.photos/200";
pub const PRODUCT_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/400x300";
pub const THUMBNAIL_PLACEHOLDER: &str = "https://via.placeholder.com/150";
pub const MESSAGING_GREEN: &str = "#25D366";
pub const DEFAULT_FOOTER_TEXT: &str = "MINDSET";
pub const BLOCK_OVERLAY_OPACITY: f32 = 0.4;
pub const THEME_OVERLAY_OPACITY: f32 = 0.0;

pub const EMPTY_GALLERY: &str = "Empty gallery";
pub const EMPTY_SOCIAL_LINKS: &str = "Add social links in the editor";
pub const MISSING_ADDRESS: &str = "Address not configured";
pub const INVALID_VIDEO: &str = "Invalid link. Use a video link (e.g. youtube.com/watch?v=...)";

const VIDEO_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Where the tree will be shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum RenderMode {
    /// Inside the editor: selectable blocks, no side effects
    Preview {
        #[serde(skip_serializing_if = "Option::is_none")]
        selected: Option<BlockId>,
    },
    /// The public page
    Publish,
}

impl RenderMode {
    pub fn preview() -> Self {
        RenderMode::Preview { selected: None }
    }

    pub fn preview_selected(id: &BlockId) -> Self {
        RenderMode::Preview {
            selected: Some(id.clone()),
        }
    }

    pub fn is_preview(&self) -> bool {
        matches!(self, RenderMode::Preview { .. })
    }

    pub fn is_publish(&self) -> bool {
        !self.is_preview()
    }

    pub fn selected(&self) -> Option<&BlockId> {
        match self {
            RenderMode::Preview { selected } => selected.as_ref(),
            RenderMode::Publish => None,
        }
    }
}

/// Render with the current clock
pub fn render(site: &Site, theme: &Theme, mode: RenderMode) -> VisualTree {
    Renderer::new(mode).render(site, theme)
}

/// Rendering dispatcher with its per-page inputs
#[derive(Debug, Clone)]
pub struct Renderer {
    mode: RenderMode,
    now: DateTime<Utc>,
    title_suffix: String,
    faq: FaqStates,
    install_available: bool,
}

impl Renderer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            now: Utc::now(),
            title_suffix: DEFAULT_TITLE_SUFFIX.to_string(),
            faq: FaqStates::new(),
            install_available: false,
        }
    }

    /// Pin the clock used for countdowns
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_title_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.title_suffix = suffix.into();
        self
    }

    pub fn with_faq_states(mut self, faq: FaqStates) -> Self {
        self.faq = faq;
        self
    }

    /// Show the install button (publish only)
    pub fn with_install_available(mut self, available: bool) -> Self {
        self.install_available = available;
        self
    }

    pub fn mode(&self) -> &RenderMode {
        &self.mode
    }

    #[instrument(skip(self, site, theme), fields(site = %site.id, blocks = site.blocks.len(), preview = self.mode.is_preview()))]
    pub fn render(&self, site: &Site, theme: &Theme) -> VisualTree {
        let mut tree = VisualTree::new();

        let main = VNode::element("main")
            .with_attr("class", "blocks")
            .with_children(
                site.blocks
                    .iter()
                    .map(|block| self.render_wrapper(block, theme))
                    .collect(),
            );

        let page = VNode::element("div")
            .with_attr("class", "page")
            .with_attr("data-mode", if self.mode.is_preview() { "preview" } else { "publish" })
            .with_style("background-color", &theme.background_color)
            .with_style("color", &theme.text_color)
            .with_style("font-family", &theme.font_family)
            .with_opt_child(media_layer(
                theme.background,
                theme.background_image.as_deref(),
                theme.background_video.as_deref(),
                theme.overlay_opacity.unwrap_or(THEME_OVERLAY_OPACITY),
            ))
            .with_child(main)
            .with_opt_child((site.plan == PlanTier::Free).then(|| footer(theme)))
            .with_opt_child(
                (self.mode.is_publish() && self.install_available).then(|| install_button(theme)),
            );

        tree.add_node(page);
        tree.widgets = Widget::for_site(site, self.now);

        if self.mode.is_publish() {
            tree.head = Some(derive_seo(site, &self.title_suffix));
            tree.pixels = pixel_specs(site.tracking.as_ref());
        }

        debug!(
            widgets = tree.widgets.len(),
            pixels = tree.pixels.len(),
            "render complete"
        );
        tree
    }

    fn render_wrapper(&self, block: &Block, theme: &Theme) -> VNode {
        trace!(block_id = %block.id, block_type = %block.block_type(), "rendering block");
        let style = &block.style;
        let has_media = style.background.has_media();

        // A divider's background color is its line color
        let background = match &block.content {
            BlockContent::Divider(_) => None,
            _ if has_media => None,
            _ => style.background_color.clone(),
        };

        let mut wrapper = VNode::element("div")
            .with_attr("class", "block")
            .with_attr("data-block-type", block.block_type().as_str())
            .with_block_id(&block.id)
            .with_opt_style("background-color", background)
            .with_style("color", style.text_color.as_deref().unwrap_or(&theme.text_color))
            .with_opt_child(media_layer(
                style.background,
                style.background_image.as_deref(),
                style.background_video.as_deref(),
                style.overlay_opacity.unwrap_or(BLOCK_OVERLAY_OPACITY),
            ));

        if let RenderMode::Preview { selected } = &self.mode {
            let is_selected = selected.as_ref() == Some(&block.id);
            wrapper = wrapper.with_child(
                VNode::element("div")
                    .with_attr("class", "select-overlay")
                    .with_attr("data-selected", is_selected.to_string())
                    .with_action(Action::SelectBlock {
                        block_id: block.id.clone(),
                    }),
            );
        }

        wrapper.with_child(
            VNode::element("div")
                .with_attr("class", "block-body")
                .with_child(self.render_block(block, theme)),
        )
    }

    /// Body of one block, dispatched on its content
    pub fn render_block(&self, block: &Block, theme: &Theme) -> VNode {
        let id = &block.id;
        let style = &block.style;
        match &block.content {
            BlockContent::Header(content) => header(content, style, theme),
            BlockContent::Text(content) => text(content, style, theme),
            BlockContent::Button(content) => self.button(id, content, style, theme),
            BlockContent::Gallery(content) => gallery(id, content),
            BlockContent::Video(content) => video(id, content, style, theme),
            BlockContent::SocialLinks(content) => self.social_links(id, content, style, theme),
            BlockContent::Product(content) => self.product(id, content, style, theme),
            BlockContent::ImageText(content) => image_text(content, style, theme),
            BlockContent::MessagingButton(content) => self.messaging(id, content, style),
            BlockContent::Divider(_) => divider(style, theme),
            BlockContent::Spacer(_) => VNode::element("div")
                .with_attr("class", "spacer")
                .with_style("height", style.height.as_deref().unwrap_or("32px")),
            BlockContent::Map(content) => map(id, content),
            BlockContent::Countdown(content) => self.countdown(content, style, theme),
            BlockContent::Faq(content) => self.faq(id, content, style, theme),
            BlockContent::Newsletter(content) => newsletter(content, style, theme),
            BlockContent::Grid(content) => self.grid(id, content, theme),
            BlockContent::Carousel(content) => self.carousel(id, content),
        }
    }

    /// `a` element; external + tracked in publish, plain link in preview
    fn link(&self, block_id: &BlockId, label: &str, url: Option<&str>) -> VNode {
        let url = url
            .map(str::trim)
            .filter(|u| !u.is_empty() && !is_script_url(u));
        let node = VNode::element("a").with_attr("href", url.unwrap_or("#"));
        if self.mode.is_preview() {
            return node;
        }

        node.with_opt_attr("target", url.map(|_| "_blank"))
            .with_opt_attr("rel", url.map(|_| "noopener noreferrer"))
            .with_action(Action::TrackClick {
                block_id: block_id.clone(),
                label: label.to_string(),
                url: url.map(str::to_string),
            })
    }

    /// `OpenCheckout` in publish when checkout is enabled, otherwise nothing
    fn checkout_action(
        &self,
        block_id: &BlockId,
        enabled: bool,
        product_name: &str,
        price: &str,
        url: &str,
    ) -> Option<Action> {
        if !enabled || self.mode.is_preview() {
            return None;
        }
        Some(Action::OpenCheckout {
            block_id: block_id.clone(),
            product_name: product_name.to_string(),
            price: non_empty(price).unwrap_or("0.00").to_string(),
            url: non_empty(url).unwrap_or("#").to_string(),
        })
    }

    fn button(&self, id: &BlockId, content: &ButtonContent, style: &BlockStyle, theme: &Theme) -> VNode {
        let label = non_empty(&content.label).unwrap_or("Button");
        let has_media = style.background.has_media();

        let background = if has_media {
            "rgba(0,0,0,0.2)".to_string()
        } else {
            style
                .background_color
                .clone()
                .unwrap_or_else(|| theme.secondary_color.clone())
        };
        let color = style.text_color.clone().unwrap_or_else(|| {
            if style.background_color.is_some() {
                "#fff".to_string()
            } else {
                theme.text_color.clone()
            }
        });

        let anchor = if content.checkout_enabled {
            VNode::element("a").with_opt_action(self.checkout_action(
                id,
                true,
                label,
                "0.00",
                &content.url,
            ))
        } else {
            self.link(id, label, Some(&content.url))
        };

        anchor.with_attr("class", "button").with_child(
            VNode::element("div")
                .with_attr("class", "button-face")
                .with_style("background-color", background)
                .with_style("border-color", &theme.primary_color)
                .with_style("color", color)
                .with_style(
                    "border-radius",
                    style.border_radius.as_deref().unwrap_or("12px"),
                )
                .with_child(VNode::element("span").with_child(VNode::text(label)))
                .with_opt_child(content.icon.as_ref().map(|icon| {
                    VNode::element("span")
                        .with_attr("class", "icon")
                        .with_attr("data-icon", icon)
                })),
        )
    }

    fn social_links(
        &self,
        id: &BlockId,
        content: &SocialLinksContent,
        style: &BlockStyle,
        theme: &Theme,
    ) -> VNode {
        if content.links.is_empty() {
            return VNode::placeholder(EMPTY_SOCIAL_LINKS, id);
        }

        let color = style.text_color.as_deref().unwrap_or(&theme.primary_color);
        let background = if style.background.has_media() {
            "rgba(255,255,255,0.1)"
        } else {
            theme.secondary_color.as_str()
        };

        VNode::element("div")
            .with_attr("class", "social-links")
            .with_style("justify-content", justify(style.alignment()))
            .with_children(
                content
                    .links
                    .iter()
                    .map(|link| {
                        let platform = link.platform.as_str();
                        self.link(id, platform, Some(&link.url))
                            .with_attr("class", "social-link")
                            .with_attr("title", platform)
                            .with_attr("data-platform", platform)
                            .with_style("background-color", background)
                            .with_style("color", color)
                            .with_style("border", format!("1px solid {}40", color))
                    })
                    .collect(),
            )
    }

    fn product(&self, id: &BlockId, content: &ProductContent, style: &BlockStyle, theme: &Theme) -> VNode {
        let name = non_empty(&content.title).unwrap_or("Product");
        let cta_label = content
            .label
            .as_deref()
            .and_then(non_empty)
            .unwrap_or("Buy now");

        let anchor = if content.checkout_enabled {
            VNode::element("a").with_opt_action(self.checkout_action(
                id,
                true,
                name,
                &content.price,
                &content.url,
            ))
        } else {
            self.link(id, name, Some(&content.url))
        };
        let cta = anchor
            .with_attr("class", "product-cta")
            .with_style("background-color", &theme.primary_color)
            .with_style("color", on_primary(theme))
            .with_child(VNode::text(cta_label));

        VNode::element("div")
            .with_attr("class", "product")
            .with_style("border-color", &theme.primary_color)
            .with_child(
                VNode::element("img")
                    .with_attr("src", image_or(content.image_src.as_deref(), PRODUCT_IMAGE_PLACEHOLDER))
                    .with_attr("alt", &content.title),
            )
            .with_child(VNode::element("h3").with_child(VNode::text(&content.title)))
            .with_opt_child(content.subtitle.as_ref().map(|subtitle| {
                VNode::element("p").with_child(VNode::text(subtitle))
            }))
            .with_child(
                VNode::element("div")
                    .with_attr("class", "price")
                    .with_child(
                        VNode::element("span")
                            .with_style("color", accent(style, theme))
                            .with_child(VNode::text(&content.price)),
                    )
                    .with_opt_child(content.old_price.as_ref().map(|old| {
                        VNode::element("s")
                            .with_attr("class", "old-price")
                            .with_child(VNode::text(old))
                    })),
            )
            .with_child(cta)
    }

    fn messaging(&self, id: &BlockId, content: &MessagingContent, style: &BlockStyle) -> VNode {
        let label = content
            .label
            .as_deref()
            .and_then(non_empty)
            .unwrap_or("WhatsApp");
        let href = messaging_url(&content.number, content.message.as_deref());
        let background = if style.background.has_media() {
            "rgba(37, 211, 102, 0.9)".to_string()
        } else {
            style
                .background_color
                .clone()
                .unwrap_or_else(|| MESSAGING_GREEN.to_string())
        };

        self.link(id, label, Some(&href))
            .with_attr("class", "messaging-button")
            .with_child(
                VNode::element("div")
                    .with_attr("class", "button-face")
                    .with_style("background-color", background)
                    .with_style("color", style.text_color.as_deref().unwrap_or("#FFFFFF"))
                    .with_child(VNode::element("span").with_child(VNode::text(label))),
            )
    }

    fn countdown(&self, content: &CountdownContent, style: &BlockStyle, theme: &Theme) -> VNode {
        let remaining = countdown::remaining(content.target, self.now);
        let shape = match content.shape {
            minisite_document::CountdownShape::Square => "square",
            minisite_document::CountdownShape::Circle => "circle",
        };

        let boxes = remaining
            .boxes()
            .into_iter()
            .map(|(value, label)| {
                VNode::element("div")
                    .with_attr("class", "time-box")
                    .with_child(
                        VNode::element("div")
                            .with_attr("class", "value")
                            .with_child(VNode::text(value)),
                    )
                    .with_child(
                        VNode::element("span")
                            .with_attr("class", "label")
                            .with_child(VNode::text(label)),
                    )
            })
            .collect();

        VNode::element("div")
            .with_attr("class", "countdown")
            .with_opt_child(heading("h3", content.title.as_deref(), style, theme))
            .with_child(
                VNode::element("div")
                    .with_attr("class", "time-boxes")
                    .with_attr("data-shape", shape)
                    .with_children(boxes),
            )
            .with_opt_child(paragraph(content.subtitle.as_deref()))
    }

    fn faq(&self, id: &BlockId, content: &FaqContent, style: &BlockStyle, theme: &Theme) -> VNode {
        let state = self.faq.get(id);
        let items = content
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let open = state.is_open(index);
                let toggle = VNode::element("button")
                    .with_attr("class", "faq-question")
                    .with_attr("aria-expanded", open.to_string())
                    .with_style("color", &theme.text_color)
                    .with_action(Action::ToggleFaq {
                        block_id: id.clone(),
                        index,
                    })
                    .with_child(VNode::element("span").with_child(VNode::text(&item.question)));

                let answer = open.then(|| {
                    let cta = match (item.button_label.as_deref(), item.button_url.as_deref()) {
                        (Some(label), Some(url)) if !label.is_empty() && !url.is_empty() => Some(
                            self.link(id, label, Some(url))
                                .with_attr("class", "faq-cta")
                                .with_child(VNode::text(label)),
                        ),
                        _ => None,
                    };
                    VNode::element("div")
                        .with_attr("class", "faq-answer")
                        .with_child(VNode::text(&item.answer))
                        .with_opt_child(cta)
                });

                VNode::element("div")
                    .with_attr("class", "faq-item")
                    .with_child(toggle)
                    .with_opt_child(answer)
            })
            .collect();

        VNode::element("div")
            .with_attr("class", "faq")
            .with_opt_child(heading("h3", content.title.as_deref(), style, theme))
            .with_children(items)
    }

    fn grid(&self, id: &BlockId, content: &GridContent, theme: &Theme) -> VNode {
        let count = content.items.len();
        let tiles = content
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let label = item.title.as_deref().and_then(non_empty).unwrap_or("Grid item");
                let span = if count % 2 != 0 && index == count - 1 {
                    "span 2"
                } else {
                    "span 1"
                };

                let mut tile = self
                    .link(id, label, item.url.as_deref())
                    .with_attr("class", "grid-item")
                    .with_attr("data-kind", grid_kind(item.kind))
                    .with_style(
                        "background-color",
                        item.background_color
                            .as_deref()
                            .unwrap_or("rgba(255,255,255,0.05)"),
                    )
                    .with_style("color", item.text_color.as_deref().unwrap_or(&theme.text_color))
                    .with_style("grid-column", span);

                if let (GridItemKind::Image, Some(src)) = (item.kind, item.image_src.as_deref()) {
                    tile = tile
                        .with_child(VNode::element("img").with_attr("src", src).with_attr("alt", ""))
                        .with_child(
                            VNode::element("div")
                                .with_attr("class", "overlay")
                                .with_style("opacity", "0.4"),
                        );
                }

                tile.with_child(
                    VNode::element("h4").with_child(VNode::text(
                        item.title.as_deref().and_then(non_empty).unwrap_or("Title"),
                    )),
                )
                .with_child(
                    VNode::element("p")
                        .with_child(VNode::text(item.subtitle.as_deref().unwrap_or_default())),
                )
            })
            .collect();

        VNode::element("div")
            .with_attr("class", "grid")
            .with_children(tiles)
    }

    fn carousel(&self, id: &BlockId, content: &CarouselContent) -> VNode {
        let slides = content
            .slides
            .iter()
            .map(|slide| {
                let label = slide.title.as_deref().and_then(non_empty).unwrap_or("Slide");
                let has_url = slide.url.as_deref().map(str::trim).is_some_and(|u| !u.is_empty());
                self.link(id, label, slide.url.as_deref())
                    .with_attr("class", "slide")
                    .with_child(
                        VNode::element("img")
                            .with_attr("src", &slide.image_src)
                            .with_opt_attr("alt", slide.title.as_deref()),
                    )
                    .with_opt_child(slide.title.as_ref().map(|title| {
                        VNode::element("h4").with_child(VNode::text(title))
                    }))
                    .with_opt_child(has_url.then(|| {
                        VNode::element("div")
                            .with_attr("class", "see-more")
                            .with_child(VNode::text("See more"))
                    }))
            })
            .collect();

        VNode::element("div")
            .with_attr("class", "carousel")
            .with_attr("data-autoplay", content.autoplay.to_string())
            .with_children(slides)
    }
}

fn header(content: &HeaderContent, style: &BlockStyle, theme: &Theme) -> VNode {
    VNode::element("div")
        .with_attr("class", "header")
        .with_style("align-items", flex_align(style.alignment()))
        .with_child(
            VNode::element("img")
                .with_attr("class", "avatar")
                .with_attr("src", image_or(content.image_src.as_deref(), AVATAR_PLACEHOLDER))
                .with_attr("alt", &content.title)
                .with_attr("loading", "lazy")
                .with_style("border-color", &theme.primary_color),
        )
        .with_child(VNode::element("h1").with_child(VNode::text(&content.title)))
        .with_opt_child(paragraph(content.subtitle.as_deref()))
}

fn text(content: &TextContent, style: &BlockStyle, theme: &Theme) -> VNode {
    VNode::element("div")
        .with_attr("class", "text")
        .with_style(
            "text-align",
            style.align.unwrap_or(Alignment::Left).as_str(),
        )
        .with_opt_child(heading("h3", content.title.as_deref(), style, theme))
        .with_child(VNode::element("p").with_child(VNode::text(&content.body)))
}

fn gallery(id: &BlockId, content: &GalleryContent) -> VNode {
    if content.images.is_empty() {
        return VNode::placeholder(EMPTY_GALLERY, id);
    }

    VNode::element("div").with_attr("class", "gallery").with_children(
        content
            .images
            .iter()
            .map(|src| {
                VNode::element("img")
                    .with_attr("src", src)
                    .with_attr("alt", "Gallery")
            })
            .collect(),
    )
}

fn video(id: &BlockId, content: &VideoContent, style: &BlockStyle, theme: &Theme) -> VNode {
    let embed = resolve_embed(&content.url);
    let frame = if embed.is_empty() {
        VNode::placeholder(INVALID_VIDEO, id)
    } else {
        VNode::element("iframe")
            .with_attr("src", embed)
            .with_attr("frameborder", "0")
            .with_attr("allow", VIDEO_ALLOW)
            .with_attr("allowfullscreen", "true")
    };

    let align = style.alignment();
    VNode::element("div")
        .with_attr("class", "video")
        .with_style("align-items", flex_align(align))
        .with_style("text-align", align.as_str())
        .with_opt_child(heading("h3", content.title.as_deref(), style, theme))
        .with_child(
            VNode::element("div")
                .with_attr("class", "video-frame")
                .with_style(
                    "border-color",
                    style.text_color.as_deref().unwrap_or(&theme.text_color),
                )
                .with_child(frame),
        )
        .with_opt_child(paragraph(content.subtitle.as_deref()))
}

fn image_text(content: &ImageTextContent, style: &BlockStyle, theme: &Theme) -> VNode {
    let reversed = style.align == Some(Alignment::Right);
    VNode::element("div")
        .with_attr("class", "image-text")
        .with_style("flex-direction", if reversed { "row-reverse" } else { "row" })
        .with_child(
            VNode::element("img")
                .with_attr("src", image_or(content.image_src.as_deref(), THUMBNAIL_PLACEHOLDER))
                .with_attr("alt", &content.title),
        )
        .with_child(
            VNode::element("div")
                .with_style("text-align", if reversed { "right" } else { "left" })
                .with_opt_child(heading("h3", Some(content.title.as_str()), style, theme))
                .with_opt_child(paragraph(content.subtitle.as_deref())),
        )
}

fn divider(style: &BlockStyle, theme: &Theme) -> VNode {
    let color = style
        .divider_color
        .as_deref()
        .or(style.background_color.as_deref())
        .or(style.text_color.as_deref())
        .unwrap_or(&theme.text_color);

    VNode::element("div").with_attr("class", "divider").with_child(
        VNode::element("div")
            .with_attr("class", "line")
            .with_style("width", style.divider_width.as_deref().unwrap_or("100%"))
            .with_style(
                "border-top-width",
                style.divider_thickness.as_deref().unwrap_or("1px"),
            )
            .with_style(
                "border-top-style",
                style.divider_pattern.unwrap_or_default().as_str(),
            )
            .with_style("border-top-color", color),
    )
}

fn map(id: &BlockId, content: &MapContent) -> VNode {
    match content.address.as_deref().and_then(non_empty) {
        Some(address) => VNode::element("div").with_attr("class", "map").with_child(
            VNode::element("iframe")
                .with_attr("src", map_embed_url(address))
                .with_attr("loading", "lazy")
                .with_attr("allowfullscreen", "true"),
        ),
        None => VNode::placeholder(MISSING_ADDRESS, id),
    }
}

fn newsletter(content: &NewsletterContent, style: &BlockStyle, theme: &Theme) -> VNode {
    let placeholder = content
        .placeholder
        .as_deref()
        .and_then(non_empty)
        .unwrap_or("Your best e-mail");
    let button_text = content
        .button_text
        .as_deref()
        .and_then(non_empty)
        .unwrap_or("Subscribe");

    VNode::element("div")
        .with_attr("class", "newsletter")
        .with_opt_child(heading("h3", content.title.as_deref(), style, theme))
        .with_opt_child(paragraph(content.subtitle.as_deref()))
        .with_child(
            VNode::element("form")
                .with_child(
                    VNode::element("input")
                        .with_attr("type", "email")
                        .with_attr("required", "true")
                        .with_attr("placeholder", placeholder)
                        .with_style("border-color", &theme.primary_color)
                        .with_style("color", &theme.text_color),
                )
                .with_child(
                    VNode::element("button")
                        .with_attr("type", "submit")
                        .with_style("background-color", &theme.primary_color)
                        .with_style("color", on_primary(theme))
                        .with_child(VNode::text(button_text)),
                ),
        )
}

/// Background image/video plus a darkening overlay
fn media_layer(
    mode: BackgroundMode,
    image: Option<&str>,
    video: Option<&str>,
    overlay_opacity: f32,
) -> Option<VNode> {
    let media = match mode {
        BackgroundMode::None => return None,
        BackgroundMode::Image => image.and_then(non_empty).map(|src| {
            VNode::element("img")
                .with_attr("src", src)
                .with_attr("alt", "Background")
                .with_attr("loading", "lazy")
        }),
        BackgroundMode::Video => video.and_then(non_empty).map(|src| {
            VNode::element("video")
                .with_attr("src", src)
                .with_attr("autoplay", "true")
                .with_attr("loop", "true")
                .with_attr("muted", "true")
                .with_attr("playsinline", "true")
        }),
    };

    Some(
        VNode::element("div")
            .with_attr("class", "background")
            .with_opt_child(media)
            .with_child(
                VNode::element("div")
                    .with_attr("class", "overlay")
                    .with_style("opacity", overlay_opacity.to_string()),
            ),
    )
}

fn footer(theme: &Theme) -> VNode {
    let text = theme
        .custom_footer_text
        .as_deref()
        .and_then(non_empty)
        .unwrap_or(DEFAULT_FOOTER_TEXT);

    VNode::element("footer")
        .with_child(
            VNode::element("div")
                .with_attr("class", "footer-text")
                .with_style("color", &theme.primary_color)
                .with_child(VNode::text(text)),
        )
        .with_child(
            VNode::element("div")
                .with_attr("class", "footer-legal")
                .with_style("border-color", format!("{}20", theme.text_color))
                .with_child(VNode::element("span").with_child(VNode::text("All rights reserved")))
                .with_child(VNode::element("span").with_child(VNode::text("RS Privative"))),
        )
}

fn install_button(theme: &Theme) -> VNode {
    VNode::element("button")
        .with_attr("class", "install")
        .with_attr("title", "Save to phone (install app)")
        .with_style("color", &theme.text_color)
        .with_style("border-color", &theme.primary_color)
        .with_action(Action::InstallApp)
}

fn heading(tag: &str, title: Option<&str>, style: &BlockStyle, theme: &Theme) -> Option<VNode> {
    title.and_then(non_empty).map(|title| {
        VNode::element(tag)
            .with_style("color", accent(style, theme))
            .with_child(VNode::text(title))
    })
}

fn paragraph(value: Option<&str>) -> Option<VNode> {
    value
        .and_then(non_empty)
        .map(|value| VNode::element("p").with_child(VNode::text(value)))
}

fn accent<'a>(style: &'a BlockStyle, theme: &'a Theme) -> &'a str {
    style.text_color.as_deref().unwrap_or(&theme.primary_color)
}

/// Text color on primary-colored buttons
fn on_primary(theme: &Theme) -> &'static str {
    if theme.is_dark() {
        "#000"
    } else {
        "#fff"
    }
}

fn image_or<'a>(src: Option<&'a str>, fallback: &'a str) -> &'a str {
    src.and_then(non_empty).unwrap_or(fallback)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn flex_align(align: Alignment) -> &'static str {
    match align {
        Alignment::Left => "flex-start",
        Alignment::Center => "center",
        Alignment::Right => "flex-end",
    }
}

fn justify(align: Alignment) -> &'static str {
    flex_align(align)
}

fn grid_kind(kind: GridItemKind) -> &'static str {
    match kind {
        GridItemKind::Image => "image",
        GridItemKind::Text => "text",
        GridItemKind::Link => "link",
    }
}
