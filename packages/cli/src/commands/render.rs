use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use minisite_compiler_html::{compile_to_html, CompileOptions};
use minisite_document::{BlockId, PlanTier};
use minisite_renderer::{RenderMode, Renderer, VisualTree};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Render the editor preview instead of the published page
    #[arg(long)]
    pub preview: bool,

    /// Block to mark as selected (preview only)
    #[arg(long, requires = "preview")]
    pub select: Option<String>,

    /// Emit the visual tree as JSON instead of HTML
    #[arg(long)]
    pub tree: bool,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let site = config.load_site(cwd)?;

    let mode = match (args.preview, args.select.as_deref()) {
        (true, Some(id)) => RenderMode::preview_selected(&BlockId::new(id)),
        (true, None) => RenderMode::preview(),
        (false, _) => RenderMode::Publish,
    };

    let tree = Renderer::new(mode)
        .with_title_suffix(config.title_suffix.clone())
        .render(&site, &site.theme);
    info!(
        site = %site.id,
        blocks = site.blocks.len(),
        widgets = tree.widgets.len(),
        "rendered site"
    );

    let (output, extension) = if args.tree {
        (serde_json::to_string_pretty(&tree)?, "json")
    } else {
        (compile(&tree, &config)?, "html")
    };

    if args.stdout {
        println!("{}", output);
        return Ok(());
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };
    fs::create_dir_all(&out_dir)?;

    let output_file = out_dir.join("index").with_extension(extension);
    fs::write(&output_file, output)?;

    println!(
        "  {} {} → {}",
        "✓".green(),
        config.site_file,
        output_file.display()
    );
    if site.plan == PlanTier::Free {
        println!("  {} Free plan pages carry the platform footer", "ℹ".blue());
    }

    Ok(())
}

fn compile(tree: &VisualTree, config: &Config) -> Result<String> {
    let options = CompileOptions {
        pretty: config.pretty_html,
        ..Default::default()
    };
    compile_to_html(tree, options).map_err(|e| anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{init, InitArgs};

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            name: "Ana".to_string(),
            plan: "pro".to_string(),
            light: false,
            force: false,
        };
        init(args, dir.path().to_str().unwrap()).unwrap();
        dir
    }

    fn args() -> RenderArgs {
        RenderArgs {
            preview: false,
            select: None,
            tree: false,
            stdout: false,
            out_dir: None,
        }
    }

    #[test]
    fn test_render_writes_published_page() {
        let dir = project();
        render(args(), dir.path().to_str().unwrap()).unwrap();

        let html = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>New title | RS MiniSite</title>"));
    }

    #[test]
    fn test_render_preview_tree() {
        let dir = project();
        let args = RenderArgs {
            preview: true,
            tree: true,
            out_dir: Some("out".to_string()),
            ..args()
        };
        render(args, dir.path().to_str().unwrap()).unwrap();

        let json = fs::read_to_string(dir.path().join("out/index.json")).unwrap();
        let tree: VisualTree = serde_json::from_str(&json).unwrap();
        assert!(tree.head.is_none());
        assert!(tree.pixels.is_empty());
    }

    #[test]
    fn test_render_without_site_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(render(args(), dir.path().to_str().unwrap()).is_err());
    }
}
