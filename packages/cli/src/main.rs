mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, apply, check, embed, init, render, AddArgs, ApplyArgs, CheckArgs, EmbedArgs, InitArgs,
    RenderArgs,
};

/// MiniSite CLI - link-in-bio pages from a JSON document
#[derive(Parser, Debug)]
#[command(name = "minisite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new MiniSite project
    Init(InitArgs),

    /// Render the site to HTML (or the visual tree as JSON)
    Render(RenderArgs),

    /// Append a block, subject to the plan's limits
    Add(AddArgs),

    /// Replay a file of stored mutations
    Apply(ApplyArgs),

    /// Resolve a video, map or messaging link
    Embed(EmbedArgs),

    /// Report problems that would block editing or publishing
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Render(args) => render(args, &cwd),
                Command::Add(args) => add(args, &cwd),
                Command::Apply(args) => apply(args, &cwd),
                Command::Embed(args) => embed(args, &cwd),
                Command::Check(args) => check(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
