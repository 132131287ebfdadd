use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use minisite_document::{BlockType, PlanTier, Site, SiteId, Theme};
use minisite_editor::default_block;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Site name
    #[arg(short, long, default_value = "My MiniSite")]
    pub name: String,

    /// Plan tier (free, start, pro, agency, admin_master)
    #[arg(short, long, default_value = "free")]
    pub plan: String,

    /// Start from the light theme
    #[arg(long)]
    pub light: bool,

    /// Force overwrite existing config and site
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let plan: PlanTier = args.plan.parse().map_err(|e: String| anyhow!(e))?;

    println!("{}", "📝 Initializing MiniSite project...".bright_blue().bold());

    let config = Config::default();
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let site = starter_site(&args.name, plan, args.light);
    config.save_site(cwd, &site)?;
    println!(
        "  {} Created {} ({} plan, {} blocks)",
        "✓".green(),
        config.site_file,
        plan,
        site.blocks.len()
    );

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: minisite add button");
    println!("  2. Run: minisite render");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

/// Header + text, within the free tier's limits
fn starter_site(name: &str, plan: PlanTier, light: bool) -> Site {
    let mut site = Site::new(SiteId::default(), name, plan);
    site.id = SiteId::new(site.slug.clone());
    site.theme = if light { Theme::light() } else { Theme::dark() };

    let now = Utc::now();
    for kind in [BlockType::Header, BlockType::Text] {
        site.blocks.push(default_block(kind, &site.theme, now));
    }
    site
}
