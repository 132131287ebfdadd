//! # Block Content
//!
//! One content shape per block type. The type tag and the payload travel
//! together as `{"type": "...", "content": {...}}`, so a block can never carry
//! fields that are meaningless for its type.

use crate::{BlockType, Patch, PatchError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "kebab-case")]
pub enum BlockContent {
    #[serde(alias = "hero")]
    Header(HeaderContent),
    Text(TextContent),
    Button(ButtonContent),
    Gallery(GalleryContent),
    Video(VideoContent),
    #[serde(alias = "social")]
    SocialLinks(SocialLinksContent),
    Product(ProductContent),
    ImageText(ImageTextContent),
    #[serde(alias = "whatsapp")]
    MessagingButton(MessagingContent),
    Divider(NoContent),
    Spacer(NoContent),
    Map(MapContent),
    Countdown(CountdownContent),
    Faq(FaqContent),
    Newsletter(NewsletterContent),
    #[serde(alias = "bento")]
    Grid(GridContent),
    Carousel(CarouselContent),
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Header(_) => BlockType::Header,
            BlockContent::Text(_) => BlockType::Text,
            BlockContent::Button(_) => BlockType::Button,
            BlockContent::Gallery(_) => BlockType::Gallery,
            BlockContent::Video(_) => BlockType::Video,
            BlockContent::SocialLinks(_) => BlockType::SocialLinks,
            BlockContent::Product(_) => BlockType::Product,
            BlockContent::ImageText(_) => BlockType::ImageText,
            BlockContent::MessagingButton(_) => BlockType::MessagingButton,
            BlockContent::Divider(_) => BlockType::Divider,
            BlockContent::Spacer(_) => BlockType::Spacer,
            BlockContent::Map(_) => BlockType::Map,
            BlockContent::Countdown(_) => BlockType::Countdown,
            BlockContent::Faq(_) => BlockType::Faq,
            BlockContent::Newsletter(_) => BlockType::Newsletter,
            BlockContent::Grid(_) => BlockType::Grid,
            BlockContent::Carousel(_) => BlockType::Carousel,
        }
    }

    /// Merge `patch` into the payload, keeping the type tag
    pub fn merged(&self, patch: &Patch) -> Result<Self, PatchError> {
        let mut tagged = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => return Err(PatchError::NotAnObject),
        };

        let mut payload = match tagged.remove("content") {
            Some(Value::Object(map)) => map,
            Some(_) => return Err(PatchError::NotAnObject),
            None => Map::new(),
        };
        for (key, value) in patch.iter() {
            payload.insert(key.to_string(), value.clone());
        }
        tagged.insert("content".to_string(), Value::Object(payload));

        Ok(serde_json::from_value(Value::Object(tagged))?)
    }
}

/// Payload of blocks driven purely by style (divider, spacer)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoContent {}

/// Profile header: avatar, name, tagline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderContent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(alias = "subtitle")]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonContent {
    #[serde(alias = "title")]
    pub label: String,
    pub url: String,
    /// Show a trailing arrow icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub checkout_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryContent {
    #[serde(alias = "items")]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(alias = "videoUrl")]
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    Linkedin,
    Twitter,
    Youtube,
    Whatsapp,
    #[default]
    Website,
    #[serde(other)]
    Other,
}

impl SocialPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Whatsapp => "whatsapp",
            SocialPlatform::Website => "website",
            SocialPlatform::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLinksContent {
    #[serde(alias = "socialLinks")]
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductContent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<String>,
    /// Call-to-action label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub url: String,
    pub checkout_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageTextContent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
}

/// Click-to-chat button (WhatsApp)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessagingContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(alias = "whatsappNumber")]
    pub number: String,
    #[serde(alias = "whatsappMessage", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapContent {
    #[serde(alias = "mapAddress", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownShape {
    #[default]
    Square,
    Circle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Fixed target instant; a missing target counts down to "now"
    #[serde(alias = "targetDate", skip_serializing_if = "Option::is_none")]
    pub target: Option<DateTime<Utc>>,
    #[serde(alias = "countdownShape")]
    pub shape: CountdownShape,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
    /// Optional call-to-action inside the answer; shown only with `button_url`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(alias = "faqItems")]
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsletterContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(alias = "placeholderText", skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridItemKind {
    Image,
    #[default]
    Text,
    Link,
}

/// One tile of a grid (bento) block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridItem {
    #[serde(rename = "type")]
    pub kind: GridItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridContent {
    #[serde(alias = "bentoItems")]
    pub items: Vec<GridItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselSlide {
    pub image_src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselContent {
    #[serde(alias = "carouselItems")]
    pub slides: Vec<CarouselSlide>,
    pub autoplay: bool,
    /// Auto-advance interval in milliseconds
    #[serde(alias = "autoplaySpeed", skip_serializing_if = "Option::is_none")]
    pub autoplay_speed_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_is_tagged_by_type() {
        let content = BlockContent::Gallery(GalleryContent {
            images: vec!["a.png".to_string()],
        });

        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value, json!({ "type": "gallery", "content": { "images": ["a.png"] } }));
    }

    #[test]
    fn test_style_only_blocks_ignore_leftover_content() {
        let content: BlockContent =
            serde_json::from_value(json!({ "type": "spacer", "content": { "title": "x" } })).unwrap();
        assert_eq!(content, BlockContent::Spacer(NoContent {}));
    }

    #[test]
    fn test_legacy_documents_load() {
        let content: BlockContent = serde_json::from_value(json!({
            "type": "bento",
            "content": {
                "bentoItems": [{ "type": "image", "imageSrc": "x.png", "url": "#" }]
            }
        }))
        .unwrap();

        match content {
            BlockContent::Grid(grid) => {
                assert_eq!(grid.items.len(), 1);
                assert_eq!(grid.items[0].kind, GridItemKind::Image);
            }
            other => panic!("Expected grid, got {:?}", other),
        }
    }

    #[test]
    fn test_merged_keeps_type_and_untouched_fields() {
        let content = BlockContent::Button(ButtonContent {
            label: "Buy".to_string(),
            url: "https://a".to_string(),
            ..Default::default()
        });

        let patch = Patch::new().set("url", "https://b").set("unknown", 1);
        match content.merged(&patch).unwrap() {
            BlockContent::Button(button) => {
                assert_eq!(button.label, "Buy");
                assert_eq!(button.url, "https://b");
            }
            other => panic!("Expected button, got {:?}", other),
        }
    }

    #[test]
    fn test_merged_rejects_ill_typed_patch() {
        let content = BlockContent::Gallery(GalleryContent::default());
        let patch = Patch::new().set("images", "not-a-list");
        assert!(content.merged(&patch).is_err());
    }

    #[test]
    fn test_unknown_social_platform_falls_back() {
        let link: SocialLink =
            serde_json::from_value(json!({ "platform": "mastodon", "url": "https://x" })).unwrap();
        assert_eq!(link.platform, SocialPlatform::Other);
    }
}
