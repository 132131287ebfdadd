use crate::config::Config;
use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use minisite_document::BlockType;
use minisite_editor::{add_block_at, GateRejection};
use tracing::debug;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Block type (header, text, button, gallery, video, social-links, ...)
    pub block_type: String,
}

pub fn add(args: AddArgs, cwd: &str) -> Result<()> {
    let block_type: BlockType = args.block_type.parse().map_err(|e: String| anyhow!(e))?;

    let config = Config::load(cwd)?;
    let site = config.load_site(cwd)?;

    match add_block_at(&site, block_type, Utc::now()) {
        Ok(added) => {
            config.save_site(cwd, &added.site)?;
            debug!(block_id = %added.id, %block_type, "block added");
            println!(
                "  {} Added {} block {}",
                "✓".green(),
                block_type,
                added.id.to_string().bright_white()
            );
            Ok(())
        }
        Err(rejection) => Err(anyhow!(upgrade_hint(&rejection))),
    }
}

/// What the owner is told when the gate says no
pub fn upgrade_hint(rejection: &GateRejection) -> String {
    match rejection {
        GateRejection::TypeNotAllowed { tier, block_type } => format!(
            "{} blocks are not available on the {} plan. Upgrade to unlock every block type.",
            block_type, tier
        ),
        GateRejection::BlockLimitReached { tier, limit } => format!(
            "The {} plan allows {} blocks. Upgrade to add more.",
            tier, limit
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{init, InitArgs};

    fn project(plan: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            name: "Ana".to_string(),
            plan: plan.to_string(),
            light: false,
            force: false,
        };
        init(args, dir.path().to_str().unwrap()).unwrap();
        dir
    }

    fn add_type(dir: &tempfile::TempDir, kind: &str) -> Result<()> {
        add(
            AddArgs {
                block_type: kind.to_string(),
            },
            dir.path().to_str().unwrap(),
        )
    }

    #[test]
    fn test_add_appends_block() {
        let dir = project("pro");
        add_type(&dir, "countdown").unwrap();

        let cwd = dir.path().to_str().unwrap();
        let site = Config::load(cwd).unwrap().load_site(cwd).unwrap();
        assert_eq!(site.blocks.len(), 3);
        assert_eq!(site.blocks[2].block_type(), BlockType::Countdown);
    }

    #[test]
    fn test_free_plan_rejects_premium_type() {
        let dir = project("free");
        let err = add_type(&dir, "video").unwrap_err();
        assert!(err.to_string().contains("not available on the free plan"));

        let cwd = dir.path().to_str().unwrap();
        let site = Config::load(cwd).unwrap().load_site(cwd).unwrap();
        assert_eq!(site.blocks.len(), 2);
    }

    #[test]
    fn test_free_plan_ceiling() {
        let dir = project("free");
        add_type(&dir, "button").unwrap();
        add_type(&dir, "hero").unwrap();

        let err = add_type(&dir, "text").unwrap_err();
        assert!(err.to_string().contains("allows 4 blocks"));
    }

    #[test]
    fn test_unknown_type() {
        let dir = project("pro");
        assert!(add_type(&dir, "popup").is_err());
    }
}
