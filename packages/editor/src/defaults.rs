//! Type-specific defaults for freshly added blocks.
//!
//! The match below is exhaustive over [`BlockType`], so adding a variant to
//! the document model fails to compile until it gets defaults here.

use chrono::{DateTime, Duration, Utc};
use minisite_document::{
    Alignment, BackgroundMode, Block, BlockContent, BlockId, BlockStyle, BlockType,
    ButtonContent, CarouselContent, CarouselSlide, CountdownContent, CountdownShape, FaqContent,
    FaqItem, GalleryContent, GridContent, GridItem, GridItemKind, HeaderContent,
    ImageTextContent, MapContent, MessagingContent, NewsletterContent, NoContent,
    ProductContent, SocialLink, SocialLinksContent, SocialPlatform, TextContent, Theme,
    VideoContent,
};

pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.4;
pub const MESSAGING_GREEN: &str = "#25D366";
pub const COUNTDOWN_LEAD_DAYS: i64 = 3;

/// Build a new block of `kind` with a fresh id
///
/// `now` anchors time-relative defaults (the countdown target).
pub fn default_block(kind: BlockType, theme: &Theme, now: DateTime<Utc>) -> Block {
    Block::new(
        BlockId::generate(),
        default_content(kind, now),
        default_style(kind, theme),
    )
}

pub fn default_content(kind: BlockType, now: DateTime<Utc>) -> BlockContent {
    match kind {
        BlockType::Header => BlockContent::Header(HeaderContent {
            title: "New title".to_string(),
            subtitle: Some("Your subtitle here".to_string()),
            image_src: None,
        }),
        BlockType::Text => BlockContent::Text(TextContent {
            title: Some("Section title".to_string()),
            body: "Write your text here...".to_string(),
        }),
        BlockType::Button => BlockContent::Button(ButtonContent {
            label: "Click here".to_string(),
            url: "https://".to_string(),
            icon: None,
            checkout_enabled: false,
        }),
        BlockType::Gallery => BlockContent::Gallery(GalleryContent {
            images: vec![
                "https://picsum.photos/300/300".to_string(),
                "https://picsum.photos/301/301".to_string(),
            ],
        }),
        BlockType::Video => BlockContent::Video(VideoContent {
            title: Some("Video title".to_string()),
            subtitle: Some("A few words about the video.".to_string()),
            url: String::new(),
        }),
        BlockType::SocialLinks => BlockContent::SocialLinks(SocialLinksContent {
            links: vec![
                SocialLink {
                    platform: SocialPlatform::Instagram,
                    url: "https://instagram.com".to_string(),
                },
                SocialLink {
                    platform: SocialPlatform::Whatsapp,
                    url: "https://wa.me/".to_string(),
                },
            ],
        }),
        BlockType::Product => BlockContent::Product(ProductContent {
            title: "Product name".to_string(),
            subtitle: Some("An amazing description of your product.".to_string()),
            image_src: None,
            price: "R$ 97,00".to_string(),
            old_price: None,
            label: Some("Buy now".to_string()),
            url: "https://".to_string(),
            checkout_enabled: false,
        }),
        BlockType::ImageText => BlockContent::ImageText(ImageTextContent {
            title: "Item title".to_string(),
            subtitle: Some("Short description of the item.".to_string()),
            image_src: Some("https://picsum.photos/200".to_string()),
        }),
        BlockType::MessagingButton => BlockContent::MessagingButton(MessagingContent {
            label: Some("Chat on WhatsApp".to_string()),
            number: "5511999999999".to_string(),
            message: Some("Hi! I'd like more information.".to_string()),
        }),
        BlockType::Divider => BlockContent::Divider(NoContent {}),
        BlockType::Spacer => BlockContent::Spacer(NoContent {}),
        BlockType::Map => BlockContent::Map(MapContent {
            address: Some("Av. Paulista, 1000, São Paulo".to_string()),
        }),
        BlockType::Countdown => BlockContent::Countdown(CountdownContent {
            title: Some("Big launch".to_string()),
            subtitle: Some("Only a few days left!".to_string()),
            target: Some(now + Duration::days(COUNTDOWN_LEAD_DAYS)),
            shape: CountdownShape::Square,
        }),
        BlockType::Faq => BlockContent::Faq(FaqContent {
            title: Some("Frequently asked questions".to_string()),
            items: vec![
                FaqItem {
                    question: "How do I buy?".to_string(),
                    answer: "Just click the buy button and follow the checkout.".to_string(),
                    ..Default::default()
                },
                FaqItem {
                    question: "When do I get access?".to_string(),
                    answer: "Access is immediate after confirmation.".to_string(),
                    ..Default::default()
                },
            ],
        }),
        BlockType::Newsletter => BlockContent::Newsletter(NewsletterContent {
            title: Some("Subscribe to the newsletter".to_string()),
            subtitle: Some("Get exclusive news every week.".to_string()),
            placeholder: Some("Your best e-mail".to_string()),
            button_text: Some("Subscribe".to_string()),
        }),
        BlockType::Grid => BlockContent::Grid(GridContent {
            items: vec![
                GridItem {
                    kind: GridItemKind::Text,
                    title: Some("About me".to_string()),
                    subtitle: Some("Learn more".to_string()),
                    url: Some("#".to_string()),
                    ..Default::default()
                },
                GridItem {
                    kind: GridItemKind::Image,
                    image_src: Some("https://picsum.photos/200".to_string()),
                    url: Some("#".to_string()),
                    ..Default::default()
                },
            ],
        }),
        BlockType::Carousel => BlockContent::Carousel(CarouselContent {
            slides: (1..=3)
                .map(|n| CarouselSlide {
                    image_src: format!("https://picsum.photos/{}/400", 299 + n),
                    title: Some(format!("Project {}", n)),
                    url: Some("#".to_string()),
                })
                .collect(),
            autoplay: false,
            autoplay_speed_ms: None,
        }),
    }
}

pub fn default_style(kind: BlockType, theme: &Theme) -> BlockStyle {
    let mut style = BlockStyle {
        align: Some(Alignment::Center),
        background: BackgroundMode::None,
        overlay_opacity: Some(DEFAULT_OVERLAY_OPACITY),
        ..Default::default()
    };

    match kind {
        BlockType::Text | BlockType::ImageText => {
            style.align = Some(Alignment::Left);
        }
        BlockType::MessagingButton => {
            style.background_color = Some(MESSAGING_GREEN.to_string());
            style.text_color = Some("#FFFFFF".to_string());
        }
        BlockType::Divider => {
            style.background_color = Some(theme.primary_color.clone());
            style.divider_width = Some("100%".to_string());
            style.divider_thickness = Some("1px".to_string());
        }
        BlockType::Spacer => {
            style.height = Some("50px".to_string());
        }
        _ => {}
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_every_type_gets_matching_content() {
        for kind in BlockType::ALL {
            let block = default_block(kind, &Theme::dark(), now());
            assert_eq!(block.block_type(), kind);
            assert!(!block.id.as_str().is_empty());
        }
    }

    #[test]
    fn test_countdown_targets_three_days_ahead() {
        match default_content(BlockType::Countdown, now()) {
            BlockContent::Countdown(countdown) => {
                assert_eq!(countdown.target, Some(now() + Duration::days(3)));
            }
            other => panic!("Expected countdown, got {:?}", other),
        }
    }

    #[test]
    fn test_collection_defaults() {
        let count = |kind| match default_content(kind, now()) {
            BlockContent::Grid(g) => g.items.len(),
            BlockContent::Carousel(c) => c.slides.len(),
            BlockContent::Faq(f) => f.items.len(),
            BlockContent::Gallery(g) => g.images.len(),
            BlockContent::SocialLinks(s) => s.links.len(),
            _ => 0,
        };

        assert_eq!(count(BlockType::Grid), 2);
        assert_eq!(count(BlockType::Carousel), 3);
        assert_eq!(count(BlockType::Faq), 2);
        assert_eq!(count(BlockType::Gallery), 2);
        assert_eq!(count(BlockType::SocialLinks), 2);
    }

    #[test]
    fn test_style_defaults() {
        let theme = Theme::dark();

        assert_eq!(default_style(BlockType::Text, &theme).align, Some(Alignment::Left));
        assert_eq!(default_style(BlockType::ImageText, &theme).align, Some(Alignment::Left));
        assert_eq!(default_style(BlockType::Button, &theme).align, Some(Alignment::Center));

        let messaging = default_style(BlockType::MessagingButton, &theme);
        assert_eq!(messaging.background_color.as_deref(), Some("#25D366"));

        let divider = default_style(BlockType::Divider, &theme);
        assert_eq!(divider.background_color.as_deref(), Some("#d4af37"));
        assert_eq!(divider.divider_thickness.as_deref(), Some("1px"));

        assert_eq!(default_style(BlockType::Spacer, &theme).height.as_deref(), Some("50px"));
        assert_eq!(default_style(BlockType::Map, &theme).overlay_opacity, Some(0.4));
    }
}
