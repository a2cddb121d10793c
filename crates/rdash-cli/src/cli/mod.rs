//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rdash_core::config;
use rdash_core::logging::{self, LogTarget};
use rdash_core::store::TeamSizeBucket;

mod commands;

use commands::list::{ListKind, ListOptions};

#[derive(Parser)]
#[command(name = "rdash")]
#[command(version)]
#[command(about = "Code review access dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Replay a JSON-lines action script without a terminal
    Replay {
        /// Script with one `{"type": ..., "payload": ...}` action per line
        #[arg(value_name = "FILE")]
        script: PathBuf,
    },

    /// Run one mock code review
    Review {
        /// Pull request to review
        #[arg(long = "pr-url", default_value = "")]
        pr_url: String,

        /// Review instructions
        #[arg(short, long, default_value = "")]
        prompt: String,
    },

    /// List seeded tokens, requests or projects
    List {
        #[arg(value_enum)]
        kind: ListKind,

        /// Project id (tokens) or project name substring
        #[arg(short, long)]
        search: Option<String>,

        /// Email substring (tokens only)
        #[arg(long)]
        email: Option<String>,

        /// Status filter, e.g. `valid`, `waiting`, `enabled`
        #[arg(long)]
        status: Option<String>,

        /// Team size range: 1-3, 4-6 or 7+
        #[arg(long = "team-size")]
        team_size: Option<TeamSizeBucket>,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show the usage statistics summary
    Stats,

    /// Convert a legacy project export into the current format
    Migrate {
        /// JSON array of legacy project records
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
    /// Store a new admin password (as a SHA-256 digest)
    SetAdminPassword {
        #[arg(value_name = "PASSWORD")]
        password: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    let target = if cli.command.is_none() {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    let _log_guard = logging::init(target, &config.log.level)?;

    // default to the dashboard
    let Some(command) = cli.command else {
        return rdash_tui::run_dashboard(&config);
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
            ConfigCommands::SetAdminPassword { password } => {
                commands::config::set_admin_password(&password)
            }
        },
        Commands::Replay { script } => commands::replay::run(&script, &config).await,
        Commands::Review { pr_url, prompt } => {
            commands::review::run(pr_url, prompt, &config).await
        }
        Commands::List {
            kind,
            search,
            email,
            status,
            team_size,
            page,
        } => {
            let options = ListOptions {
                search,
                email,
                status,
                team_size,
                page,
            };
            commands::list::run(kind, &options, &config)
        }
        Commands::Stats => {
            commands::stats::run(&config);
            Ok(())
        }
        Commands::Migrate { input } => commands::migrate::run(&input),
    }
}
