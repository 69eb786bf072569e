//! NovaCare CLI
//!
//! Command-line interface for inspecting health profiles and the dashboard
//! metrics derived from them.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use console::style;

use novacare::cli::{
    CliApp, CliConfig, Command, DashboardCommand, ImportCommand, OutputFormat, ParamsCommand,
    ProfileCommand, ValidateCommand,
};
use novacare::storage::ValidationMode;

/// NovaCare CLI - health metrics for stored profiles
#[derive(Parser)]
#[command(name = "novacare")]
#[command(author = "NovaCare Team")]
#[command(version = novacare::VERSION)]
#[command(about = "Derive dashboard health metrics from stored profiles", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a CLI config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the profile store
    #[arg(short, long, global = true, env = "NOVACARE_STORE_DIR")]
    store_dir: Option<PathBuf>,

    /// Scoring parameters file (JSON)
    #[arg(short, long, global = true, env = "NOVACARE_PARAMS")]
    params: Option<PathBuf>,

    /// Output format: text, json, json-pretty
    #[arg(short, long, global = true, env = "NOVACARE_FORMAT")]
    format: Option<OutputFormat>,

    /// Handling of stored profiles that fail validation in dashboard and profile: warn, reject
    #[arg(long, global = true, env = "NOVACARE_VALIDATION")]
    validation: Option<ValidationMode>,

    /// Reference date for ages (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard metrics for a user
    Dashboard {
        /// User id
        #[arg(short, long)]
        user: String,
    },

    /// Show the health profile page for a user
    Profile {
        /// User id
        #[arg(short, long)]
        user: String,
    },

    /// Check a stored profile against the plausibility bounds
    Validate {
        /// User id
        #[arg(short, long)]
        user: String,
    },

    /// Import a JSON array of profiles into the store
    Import {
        /// JSON file to read
        #[arg(long)]
        file: PathBuf,
    },

    /// Show the effective scoring parameters
    Params,
}

impl Commands {
    fn into_command(self) -> Command {
        match self {
            Commands::Dashboard { user } => Command::Dashboard(DashboardCommand { user: user.into() }),
            Commands::Profile { user } => Command::Profile(ProfileCommand { user: user.into() }),
            Commands::Validate { user } => Command::Validate(ValidateCommand { user: user.into() }),
            Commands::Import { file } => Command::Import(ImportCommand { file }),
            Commands::Params => Command::Params(ParamsCommand),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MAIN
// ═══════════════════════════════════════════════════════════════════════════════

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run_command(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(&cli)?;
    tracing::debug!(store = %config.store_dir.display(), format = %config.format, "Resolved configuration");

    let mut app = CliApp::from_config(config)?.with_verbose(cli.verbose);
    if let Some(date) = cli.as_of {
        app = app.with_today(date);
    }

    let output = app.execute(cli.command.into_command())?;
    app.output().print(&output);

    Ok(output.success)
}

/// Config file (explicit or default) with flag and environment overrides on top
fn load_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => {
            let default_path = CliConfig::default_path();
            if default_path.exists() {
                CliConfig::load(&default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    // clap already folds the NOVACARE_* variables into the flags below
    if let Some(dir) = &cli.store_dir {
        config.store_dir = dir.clone();
    }
    if let Some(path) = &cli.params {
        config.params_path = Some(path.clone());
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(mode) = cli.validation {
        config.validation = mode;
    }

    config.validate()?;
    Ok(config)
}
