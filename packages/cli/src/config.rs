use anyhow::Context;
use minisite_document::Site;
use minisite_renderer::seo::DEFAULT_TITLE_SUFFIX;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "minisite.config.json";

/// MiniSite project configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Site document, relative to the project directory
    #[serde(default = "default_site_file")]
    pub site_file: String,

    /// Where `render` writes index.html
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Appended to the header title in the published page title
    #[serde(default = "default_title_suffix")]
    pub title_suffix: String,

    #[serde(default = "default_pretty_html")]
    pub pretty_html: bool,
}

fn default_site_file() -> String {
    "site.json".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_title_suffix() -> String {
    DEFAULT_TITLE_SUFFIX.to_string()
}

fn default_pretty_html() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn get_site_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.site_file)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    /// Read and validate the configured site document
    pub fn load_site(&self, cwd: &str) -> anyhow::Result<Site> {
        let path = self.get_site_path(cwd);
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read site file {}", path.display()))?;
        Site::from_json(&source).with_context(|| format!("Invalid site file {}", path.display()))
    }

    pub fn save_site(&self, cwd: &str, site: &Site) -> anyhow::Result<PathBuf> {
        let path = self.get_site_path(cwd);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, site.to_json_pretty()?)?;
        Ok(path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_file: default_site_file(),
            out_dir: default_out_dir(),
            title_suffix: default_title_suffix(),
            pretty_html: default_pretty_html(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minisite_document::{PlanTier, SiteId};

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "siteFile": "sites/ana.json",
            "outDir": "public",
            "titleSuffix": " - Ana",
            "prettyHtml": false
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.site_file, "sites/ana.json");
        assert_eq!(config.out_dir, "public");
        assert_eq!(config.title_suffix, " - Ana");
        assert!(!config.pretty_html);
    }

    #[test]
    fn test_missing_fields_are_defaulted() {
        let config: Config = serde_json::from_str(r#"{ "outDir": "www" }"#).unwrap();
        assert_eq!(config.out_dir, "www");
        assert_eq!(config.site_file, "site.json");
        assert_eq!(config.title_suffix, " | RS MiniSite");
        assert!(config.pretty_html);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "siteFile": "bio.json" }"#,
        )
        .unwrap();

        let cwd = dir.path().to_str().unwrap();
        let config = Config::load(cwd).unwrap();
        assert_eq!(config.get_site_path(cwd), dir.path().join("bio.json"));
        assert_eq!(config.get_out_dir(cwd), dir.path().join("dist"));
    }

    #[test]
    fn test_site_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        let config = Config {
            site_file: "nested/site.json".to_string(),
            ..Default::default()
        };

        let site = Site::new(SiteId::new("s1"), "Ana", PlanTier::Start);
        config.save_site(cwd, &site).unwrap();
        assert_eq!(config.load_site(cwd).unwrap(), site);
    }

    #[test]
    fn test_invalid_site_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join("site.json"), "{ not json").unwrap();

        let err = Config::default().load_site(cwd).unwrap_err();
        assert!(err.to_string().contains("Invalid site file"));
    }
}
