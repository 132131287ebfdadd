use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Background media behind a block or the whole page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// Plain color (or nothing)
    #[default]
    #[serde(alias = "color")]
    None,
    Image,
    Video,
}

impl BackgroundMode {
    pub fn has_media(&self) -> bool {
        matches!(self, BackgroundMode::Image | BackgroundMode::Video)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerPattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl DividerPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            DividerPattern::Solid => "solid",
            DividerPattern::Dashed => "dashed",
            DividerPattern::Dotted => "dotted",
        }
    }
}

/// Per-block presentation overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(alias = "textAlign", skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,

    #[serde(alias = "backgroundType")]
    pub background: BackgroundMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_video: Option<String>,
    /// 0.0 – 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_opacity: Option<f32>,

    // Spacer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,

    // Divider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider_thickness: Option<String>,
    #[serde(alias = "dividerStyle", skip_serializing_if = "Option::is_none")]
    pub divider_pattern: Option<DividerPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider_color: Option<String>,
}

impl BlockStyle {
    pub fn alignment(&self) -> Alignment {
        self.align.unwrap_or_default()
    }
}
