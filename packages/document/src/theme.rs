use crate::BackgroundMode;
use serde::{Deserialize, Serialize};

/// Site-wide look; a block's own background overrides it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub background_color: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub text_color: String,
    pub font_family: String,

    #[serde(alias = "backgroundType")]
    pub background: BackgroundMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_video: Option<String>,
    #[serde(alias = "backgroundOverlayOpacity", skip_serializing_if = "Option::is_none")]
    pub overlay_opacity: Option<f32>,

    /// Text shown in the free-plan footer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_footer_text: Option<String>,
}

impl Theme {
    /// Black and gold
    pub fn dark() -> Self {
        Self {
            id: "rs-dark".to_string(),
            name: "RS Dark".to_string(),
            background_color: "#0a0a0a".to_string(),
            primary_color: "#d4af37".to_string(),
            secondary_color: "#1a1a1a".to_string(),
            text_color: "#ffffff".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            background: BackgroundMode::None,
            background_image: None,
            background_video: None,
            overlay_opacity: None,
            custom_footer_text: None,
        }
    }

    pub fn light() -> Self {
        Self {
            id: "rs-light".to_string(),
            name: "RS Light".to_string(),
            background_color: "#ffffff".to_string(),
            primary_color: "#b8860b".to_string(),
            secondary_color: "#f3f4f6".to_string(),
            text_color: "#111827".to_string(),
            ..Self::dark()
        }
    }

    /// Dark backgrounds get black text on primary-colored buttons
    pub fn is_dark(&self) -> bool {
        self.background_color.eq_ignore_ascii_case("#0a0a0a")
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
