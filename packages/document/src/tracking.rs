use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PixelProvider {
    Meta,
    GoogleAnalytics,
    GoogleAds,
    Tiktok,
    Pinterest,
    Taboola,
}

impl PixelProvider {
    pub const ALL: [PixelProvider; 6] = [
        PixelProvider::Meta,
        PixelProvider::GoogleAnalytics,
        PixelProvider::GoogleAds,
        PixelProvider::Tiktok,
        PixelProvider::Pinterest,
        PixelProvider::Taboola,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PixelProvider::Meta => "meta",
            PixelProvider::GoogleAnalytics => "google-analytics",
            PixelProvider::GoogleAds => "google-ads",
            PixelProvider::Tiktok => "tiktok",
            PixelProvider::Pinterest => "pinterest",
            PixelProvider::Taboola => "taboola",
        }
    }
}

impl fmt::Display for PixelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-provider pixel ids. Each one is optional and gates only its own script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_pixel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_ads_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok_pixel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinterest_pixel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taboola_pixel_id: Option<String>,
}

impl TrackingConfig {
    pub fn id_for(&self, provider: PixelProvider) -> Option<&str> {
        let id = match provider {
            PixelProvider::Meta => &self.meta_pixel_id,
            PixelProvider::GoogleAnalytics => &self.google_analytics_id,
            PixelProvider::GoogleAds => &self.google_ads_id,
            PixelProvider::Tiktok => &self.tiktok_pixel_id,
            PixelProvider::Pinterest => &self.pinterest_pixel_id,
            PixelProvider::Taboola => &self.taboola_pixel_id,
        };
        id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Providers with a non-blank id, in declaration order
    pub fn configured(&self) -> Vec<(PixelProvider, &str)> {
        PixelProvider::ALL
            .into_iter()
            .filter_map(|provider| self.id_for(provider).map(|id| (provider, id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_ids_are_not_configured() {
        let config = TrackingConfig {
            meta_pixel_id: Some("123".to_string()),
            google_analytics_id: Some("   ".to_string()),
            tiktok_pixel_id: Some(" TT-9 ".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.configured(),
            vec![(PixelProvider::Meta, "123"), (PixelProvider::Tiktok, "TT-9")]
        );
    }
}
