use crate::commands::add::upgrade_hint;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use minisite_editor::{EditSession, Mutation};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// JSON file holding one mutation or an array of mutations
    pub file: String,

    /// Report the outcome without writing the site file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MutationBatch {
    Many(Vec<Mutation>),
    One(Mutation),
}

impl MutationBatch {
    fn into_vec(self) -> Vec<Mutation> {
        match self {
            MutationBatch::Many(mutations) => mutations,
            MutationBatch::One(mutation) => vec![mutation],
        }
    }
}

/// Replay stored edits against the site, in order
pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let site = config.load_site(cwd)?;

    let path = PathBuf::from(cwd).join(&args.file);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let mutations = serde_json::from_str::<MutationBatch>(&source)
        .with_context(|| format!("Invalid mutation file {}", path.display()))?
        .into_vec();

    let mut session = EditSession::new("cli", site);
    let mut rejected = 0;

    for mutation in mutations {
        let description = mutation.description();
        match session.apply(mutation) {
            Ok(added) => {
                debug!(%description, version = session.version(), "mutation applied");
                match added {
                    Some(id) => println!("  {} {} ({})", "✓".green(), description, id),
                    None => println!("  {} {}", "✓".green(), description),
                }
            }
            Err(rejection) => {
                rejected += 1;
                warn!(%description, %rejection, "mutation rejected");
                println!(
                    "  {} {} - {}",
                    "✗".red(),
                    description,
                    upgrade_hint(&rejection).red()
                );
            }
        }
    }

    println!();
    if args.dry_run {
        println!("{}", "Dry run, site file left untouched".dimmed());
    } else if session.is_dirty() {
        config.save_site(cwd, session.site())?;
    }

    if rejected == 0 {
        println!(
            "{} Applied {} mutations",
            "✅".green(),
            session.pending().len()
        );
    } else {
        println!(
            "{} Applied {} mutations, {} rejected",
            "⚠️".yellow(),
            session.pending().len(),
            rejected
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{init, InitArgs};
    use minisite_document::{BlockContent, BlockType};

    fn project(plan: &str, mutations: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            name: "Ana".to_string(),
            plan: plan.to_string(),
            light: false,
            force: false,
        };
        init(args, dir.path().to_str().unwrap()).unwrap();
        fs::write(dir.path().join("edits.json"), mutations).unwrap();
        dir
    }

    fn run(dir: &tempfile::TempDir, dry_run: bool) -> minisite_document::Site {
        let cwd = dir.path().to_str().unwrap();
        let args = ApplyArgs {
            file: "edits.json".to_string(),
            dry_run,
        };
        apply(args, cwd).unwrap();
        Config::load(cwd).unwrap().load_site(cwd).unwrap()
    }

    #[test]
    fn test_apply_batch() {
        let dir = project(
            "pro",
            r##"[
                { "op": "addBlock", "blockType": "faq" },
                { "op": "moveBlock", "index": 1, "direction": "up" },
                { "op": "updateTheme", "patch": { "primaryColor": "#ff0066" } }
            ]"##,
        );

        let site = run(&dir, false);
        assert_eq!(site.blocks.len(), 3);
        assert_eq!(site.blocks[0].block_type(), BlockType::Text);
        assert_eq!(site.blocks[2].block_type(), BlockType::Faq);
        assert_eq!(site.theme.primary_color, "#ff0066");
    }

    #[test]
    fn test_single_mutation() {
        let dir = project("pro", r#"{ "op": "setPlan", "plan": "agency" }"#);
        let site = run(&dir, false);
        assert_eq!(site.plan, minisite_document::PlanTier::Agency);
    }

    #[test]
    fn test_rejections_do_not_stop_the_batch() {
        let dir = project(
            "free",
            r#"[
                { "op": "addBlock", "blockType": "carousel" },
                { "op": "addBlock", "blockType": "button" }
            ]"#,
        );

        let site = run(&dir, false);
        assert_eq!(site.blocks.len(), 3);
        assert!(matches!(site.blocks[2].content, BlockContent::Button(_)));
    }

    #[test]
    fn test_dry_run_leaves_site_untouched() {
        let dir = project("pro", r#"[{ "op": "addBlock", "blockType": "map" }]"#);
        let site = run(&dir, true);
        assert_eq!(site.blocks.len(), 2);
    }

    #[test]
    fn test_invalid_mutation_file() {
        let dir = project("pro", r#"[{ "op": "explode" }]"#);
        let args = ApplyArgs {
            file: "edits.json".to_string(),
            dry_run: false,
        };
        assert!(apply(args, dir.path().to_str().unwrap()).is_err());
    }
}
