//! knitgraph CLI - inspect knit graphs and their courses

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, courses, inspect};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "knitgraph")]
#[command(author, version, about = "Knit graph topology and course decomposition")]
pub struct Cli {
    /// Output format: table, json (default from config)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the course decomposition of a swatch
    Courses(commands::SwatchArgs),
    /// Print the loops, yarns and edges of a swatch
    Inspect(inspect::InspectArgs),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context shared by graph commands
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::load();
        let format = cli
            .format
            .as_deref()
            .unwrap_or(&config.format)
            .parse()?;

        Ok(Self {
            config,
            format,
            quiet: cli.quiet,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting knitgraph CLI");

    match &cli.command {
        Commands::Courses(args) => courses::run(args, &AppContext::new(&cli)?)?,
        Commands::Inspect(args) => inspect::run(args, &AppContext::new(&cli)?)?,
        Commands::Config(args) => config_cmd::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
