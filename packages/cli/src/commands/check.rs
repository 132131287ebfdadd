use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use minisite_checkout::{checkout_target, CheckoutProfile};
use minisite_document::{BlockContent, BlockId, Site};
use minisite_editor::PlanPolicy;
use minisite_renderer::{is_script_url, resolve_embed};
use tracing::debug;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub block_id: Option<BlockId>,
    pub message: String,
}

impl Finding {
    fn error(block_id: &BlockId, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            block_id: Some(block_id.clone()),
            message: message.into(),
        }
    }

    fn warning(block_id: &BlockId, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            block_id: Some(block_id.clone()),
            message: message.into(),
        }
    }
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let site = config.load_site(cwd)?;

    println!(
        "{} {} ({} plan, {} blocks)",
        "🔍 Checking".bright_blue().bold(),
        config.site_file,
        site.plan,
        site.blocks.len()
    );

    let findings = inspect(&site);
    for finding in &findings {
        let marker = match finding.severity {
            Severity::Error => "✗".red(),
            Severity::Warning => "⚠".yellow(),
        };
        match &finding.block_id {
            Some(id) => println!("  {} [{}] {}", marker, id, finding.message),
            None => println!("  {} {}", marker, finding.message),
        }
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error || args.strict)
        .count();

    println!();
    if errors > 0 {
        return Err(anyhow!("{} problems found", errors));
    }
    println!("{} {} is ready to publish", "✅".green(), site.name);
    Ok(())
}

/// Everything that would be refused, hidden or blocked when the site is edited or published
pub fn inspect(site: &Site) -> Vec<Finding> {
    let mut findings = Vec::new();
    let policy = PlanPolicy::for_tier(site.plan);

    if let Some(limit) = policy.max_blocks {
        if site.blocks.len() > limit {
            findings.push(Finding {
                severity: Severity::Error,
                block_id: None,
                message: format!(
                    "{} blocks exceed the {} plan limit of {}",
                    site.blocks.len(),
                    site.plan,
                    limit
                ),
            });
        }
    }

    for block in &site.blocks {
        let id = &block.id;
        if !policy.allows_type(block.block_type()) {
            findings.push(Finding::error(
                id,
                format!("{} blocks are not available on the {} plan", block.block_type(), site.plan),
            ));
        }

        for url in block_links(&block.content) {
            if is_script_url(url) {
                findings.push(Finding::error(id, format!("unsafe link `{}` will be dropped", url)));
            }
        }

        match &block.content {
            BlockContent::Button(button) if button.checkout_enabled => {
                check_checkout_target(id, &button.url, &mut findings);
            }
            BlockContent::Product(product) if product.checkout_enabled => {
                check_checkout_target(id, &product.url, &mut findings);
            }
            BlockContent::Video(video) if resolve_embed(&video.url).is_empty() => {
                findings.push(Finding::warning(id, "video link cannot be embedded"));
            }
            BlockContent::MessagingButton(messaging)
                if !messaging.number.chars().any(|c| c.is_ascii_digit()) =>
            {
                findings.push(Finding::warning(id, "messaging button has no phone number"));
            }
            BlockContent::Map(map)
                if map.address.as_deref().map_or(true, |a| a.trim().is_empty()) =>
            {
                findings.push(Finding::warning(id, "map has no address"));
            }
            _ => {}
        }
    }

    debug!(site = %site.id, findings = findings.len(), "site inspected");
    findings
}

fn check_checkout_target(id: &BlockId, target: &str, findings: &mut Vec<Finding>) {
    if let Err(err) = checkout_target(target, &CheckoutProfile::default()) {
        findings.push(Finding::error(id, format!("checkout target is blocked: {}", err)));
    }
}

fn block_links(content: &BlockContent) -> Vec<&str> {
    match content {
        BlockContent::Button(button) => vec![button.url.as_str()],
        BlockContent::Product(product) => vec![product.url.as_str()],
        BlockContent::Video(video) => vec![video.url.as_str()],
        BlockContent::SocialLinks(social) => social.links.iter().map(|l| l.url.as_str()).collect(),
        BlockContent::Faq(faq) => faq.items.iter().filter_map(|i| i.button_url.as_deref()).collect(),
        BlockContent::Grid(grid) => grid.items.iter().filter_map(|i| i.url.as_deref()).collect(),
        BlockContent::Carousel(carousel) => {
            carousel.slides.iter().filter_map(|s| s.url.as_deref()).collect()
        }
        _ => Vec::new(),
    }
}
