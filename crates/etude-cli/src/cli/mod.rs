//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use etude_core::config::{Config, Mode};
use etude_core::interrupt;
use etude_core::language::Language;
use etude_tui::LaunchOptions;

mod commands;

#[derive(Parser)]
#[command(name = "etude")]
#[command(version)]
#[command(about = "Algorithm practice drills in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Practice mode for this run (learn, practice, cram)
    #[arg(short, long)]
    mode: Option<String>,

    /// Language for this run (python, javascript, go)
    #[arg(short, long)]
    language: Option<String>,

    /// Open the problem list filtered to this pattern
    #[arg(short, long, value_name = "PATTERN")]
    pattern: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List problems
    List {
        /// Only problems tagged with this pattern
        #[arg(long, value_name = "PATTERN")]
        pattern: Option<String>,
    },
    /// Show practice statistics
    Stats,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    interrupt::init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    // default to the interactive TUI
    let Some(command) = cli.command else {
        let launch = parse_launch(&cli)?;
        return commands::practice::run(&config, &launch).await;
    };

    match command {
        Commands::List { pattern } => commands::list::run(pattern.as_deref()),
        Commands::Stats => commands::stats::run(),
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show(&config),
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

fn parse_launch(cli: &Cli) -> Result<LaunchOptions> {
    let mode = cli
        .mode
        .as_deref()
        .map(str::parse::<Mode>)
        .transpose()
        .map_err(anyhow::Error::msg)?;
    let language = cli
        .language
        .as_deref()
        .map(str::parse::<Language>)
        .transpose()
        .map_err(anyhow::Error::msg)?;
    Ok(LaunchOptions {
        mode,
        language,
        pattern: cli.pattern.clone(),
    })
}
