use crate::{BlockContent, BlockStyle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Block identifier, unique within a site
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id (9 lowercase alphanumerics, like ids in stored documents)
    pub fn generate() -> Self {
        let simple = uuid::Uuid::new_v4().simple().to_string();
        Self(simple[..9].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The closed set of block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    #[serde(alias = "hero")]
    Header,
    Text,
    Button,
    Gallery,
    Video,
    #[serde(alias = "social")]
    SocialLinks,
    Product,
    ImageText,
    #[serde(alias = "whatsapp")]
    MessagingButton,
    Divider,
    Spacer,
    Map,
    Countdown,
    Faq,
    Newsletter,
    #[serde(alias = "bento")]
    Grid,
    Carousel,
}

impl BlockType {
    pub const ALL: [BlockType; 17] = [
        BlockType::Header,
        BlockType::Text,
        BlockType::Button,
        BlockType::Gallery,
        BlockType::Video,
        BlockType::SocialLinks,
        BlockType::Product,
        BlockType::ImageText,
        BlockType::MessagingButton,
        BlockType::Divider,
        BlockType::Spacer,
        BlockType::Map,
        BlockType::Countdown,
        BlockType::Faq,
        BlockType::Newsletter,
        BlockType::Grid,
        BlockType::Carousel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Header => "header",
            BlockType::Text => "text",
            BlockType::Button => "button",
            BlockType::Gallery => "gallery",
            BlockType::Video => "video",
            BlockType::SocialLinks => "social-links",
            BlockType::Product => "product",
            BlockType::ImageText => "image-text",
            BlockType::MessagingButton => "messaging-button",
            BlockType::Divider => "divider",
            BlockType::Spacer => "spacer",
            BlockType::Map => "map",
            BlockType::Countdown => "countdown",
            BlockType::Faq => "faq",
            BlockType::Newsletter => "newsletter",
            BlockType::Grid => "grid",
            BlockType::Carousel => "carousel",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let found = match normalized.as_str() {
            "hero" => Some(BlockType::Header),
            "social" => Some(BlockType::SocialLinks),
            "whatsapp" => Some(BlockType::MessagingButton),
            "bento" => Some(BlockType::Grid),
            other => BlockType::ALL.into_iter().find(|t| t.as_str() == other),
        };
        found.ok_or_else(|| format!("unknown block type: {}", s))
    }
}

/// One content unit of a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,

    #[serde(flatten)]
    pub content: BlockContent,

    #[serde(default)]
    pub style: BlockStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clicks: Option<u64>,
}

impl Block {
    pub fn new(id: BlockId, content: BlockContent, style: BlockStyle) -> Self {
        Self {
            id,
            content,
            style,
            clicks: None,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_short_and_distinct() {
        let a = BlockId::generate();
        let b = BlockId::generate();
        assert_eq!(a.as_str().len(), 9);
        assert_ne!(a, b);
    }

    #[test]
    fn test_block_type_parses_legacy_names() {
        assert_eq!("hero".parse::<BlockType>().unwrap(), BlockType::Header);
        assert_eq!("bento".parse::<BlockType>().unwrap(), BlockType::Grid);
        assert_eq!("Social-Links".parse::<BlockType>().unwrap(), BlockType::SocialLinks);
        assert!("slideshow".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_block_type_names_round_trip() {
        for block_type in BlockType::ALL {
            assert_eq!(block_type.as_str().parse::<BlockType>().unwrap(), block_type);
        }
    }
}
