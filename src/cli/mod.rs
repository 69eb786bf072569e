//! NovaCare Command Line Interface.
//!
//! Operator tools for inspecting stored health profiles and the metrics the
//! dashboard derives from them.

pub mod commands;
pub mod config;
pub mod output;

pub use commands::*;
pub use config::*;
pub use output::*;

use chrono::{Local, NaiveDate};

use crate::core::config::ScoringParams;
use crate::core::engine::MetricsEngine;
use crate::storage::backend::FileStore;
use crate::storage::profiles::{KeyValueProfileStore, ValidatingRepository};

// ═══════════════════════════════════════════════════════════════════════════════
// CLI APPLICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// CLI Application state
#[derive(Debug)]
pub struct CliApp {
    /// Configuration
    config: CliConfig,
    /// Metrics engine built from the configured params
    engine: MetricsEngine,
    /// Output formatter
    output: OutputFormatter,
    /// Reference date for ages
    today: NaiveDate,
    /// Verbose mode
    verbose: bool,
}

impl CliApp {
    /// Create new CLI application with default scoring params
    pub fn new(config: CliConfig) -> Self {
        let output = OutputFormatter::new(config.format);
        Self {
            config,
            engine: MetricsEngine::default(),
            output,
            today: Local::now().date_naive(),
            verbose: false,
        }
    }

    /// Create from configuration, loading the scoring params file if set
    pub fn from_config(config: CliConfig) -> CliResult<Self> {
        config.validate()?;

        let engine = match &config.params_path {
            Some(path) => {
                let params = ScoringParams::load(path)?;
                tracing::debug!(path = %path.display(), "Loaded scoring params");
                MetricsEngine::with_params(params)?
            }
            None => MetricsEngine::default(),
        };

        Ok(Self::new(config).with_engine(engine))
    }

    /// Replace the metrics engine
    pub fn with_engine(mut self, engine: MetricsEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Pin the reference date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self.output = OutputFormatter::new(format);
        self
    }

    /// Get configuration
    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Get metrics engine
    pub fn engine(&self) -> &MetricsEngine {
        &self.engine
    }

    /// Get output formatter
    pub fn output(&self) -> &OutputFormatter {
        &self.output
    }

    /// Reference date
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Check if verbose
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Open the profile store in the configured directory
    pub fn open_store(&self) -> CliResult<KeyValueProfileStore<FileStore>> {
        let backend = FileStore::new(&self.config.store_dir)?;
        Ok(KeyValueProfileStore::new(backend))
    }

    /// Profile store behind the configured validation mode, pinned to the reference date
    pub fn validated_store(&self) -> CliResult<ValidatingRepository<KeyValueProfileStore<FileStore>>> {
        let today = self.today;
        Ok(ValidatingRepository::new(self.open_store()?, self.config.validation)
            .with_clock(move || today))
    }

    /// Execute a command
    pub fn execute(&self, command: Command) -> CliResult<CommandOutput> {
        if self.verbose && !self.output.format().is_json() {
            self.output.info(&format!("Executing: {:?}", command));
        }

        match command {
            Command::Dashboard(cmd) => cmd.execute(self),
            Command::Profile(cmd) => cmd.execute(self),
            Command::Validate(cmd) => cmd.execute(self),
            Command::Import(cmd) => cmd.execute(self),
            Command::Params(cmd) => cmd.execute(self),
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new(CliConfig::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLI RESULT
// ═══════════════════════════════════════════════════════════════════════════════

/// CLI Error types
#[derive(Debug, Clone, PartialEq)]
pub enum CliError {
    /// Configuration error
    Config(String),
    /// Command execution error
    Execution(String),
    /// Invalid argument
    InvalidArgument(String),
    /// IO error
    Io(String),
    /// Not found
    NotFound(String),
    /// Profile or params failed validation
    Validation(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Execution(msg) => write!(f, "Execution error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Io(msg) => write!(f, "IO error: {}", msg),
            CliError::NotFound(msg) => write!(f, "Not found: {}", msg),
            CliError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<crate::Error> for CliError {
    fn from(err: crate::Error) -> Self {
        use crate::Error;

        match err {
            Error::ProfileNotFound(user) => CliError::NotFound(format!("No health profile for {}", user)),
            Error::InvalidScoringParams(msg) => CliError::Config(msg),
            Error::Storage(msg) => CliError::Io(msg),
            e if e.is_validation() => CliError::Validation(e.to_string()),
            e => CliError::Execution(e.to_string()),
        }
    }
}

/// CLI Result type
pub type CliResult<T> = std::result::Result<T, CliError>;

// ═══════════════════════════════════════════════════════════════════════════════
// COMMAND OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Command execution output
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Success status
    pub success: bool,
    /// Output message
    pub message: String,
    /// Structured data (JSON serializable)
    pub data: Option<serde_json::Value>,
    /// Text view lines
    pub details: Vec<Detail>,
    /// Warnings
    pub warnings: Vec<String>,
}

impl CommandOutput {
    /// Create success output
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            details: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create success with data
    pub fn success_with_data(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            data: Some(data),
            ..Self::success(message)
        }
    }

    /// Create error output
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(message)
        }
    }

    /// Add a text view line
    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.details.push(detail);
        self
    }

    /// Add warning
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMAND TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait for executable commands
pub trait Executable {
    /// Execute the command
    fn execute(&self, app: &CliApp) -> CliResult<CommandOutput>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
