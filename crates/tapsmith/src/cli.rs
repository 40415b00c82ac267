use clap::{Parser, Subcommand, ValueEnum};
use miette::{Diagnostic, Report};
use std::io::{self, Write};
use std::path::PathBuf;
use tapsmith_release::{GuardEncoding, ManifestKind};
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// Release validation error exit code
pub const EXIT_INVALID: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// CLI or configuration error (exit code 2)
    #[error("CLI/configuration error: {message}")]
    #[diagnostic(code(tapsmith::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// The release description is readable but cannot be rendered (exit code 3)
    #[error("Invalid release: {message}")]
    #[diagnostic(code(tapsmith::cli::invalid))]
    Invalid {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new validation error with help text
    #[must_use]
    pub fn invalid_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

/// Convert `tapsmith_release::Error` to the matching `CliError` variant.
///
/// Unreadable or unparseable files are configuration problems; artifacts that
/// parse but cannot form an unambiguous manifest are validation problems.
impl From<tapsmith_release::Error> for CliError {
    fn from(err: tapsmith_release::Error) -> Self {
        use tapsmith_release::Error;

        let help = err.help().map(|help| help.to_string());
        match err {
            Error::Config { message, help } => Self::Config {
                message,
                help: Some(help),
            },
            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) => Self::Config {
                message: err.to_string(),
                help,
            },
            Error::InvalidArtifact { .. }
            | Error::AmbiguousGuard { .. }
            | Error::UnsupportedArch { .. }
            | Error::UnsupportedPlatform { .. }
            | Error::UnsupportedCombination { .. } => Self::Invalid {
                message: err.to_string(),
                help,
            },
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Invalid { .. } => EXIT_INVALID,
    }
}

/// Render an error with miette's human-friendly report
pub fn render_error(err: &CliError) {
    let report = Report::new(err.clone());
    eprintln!("{report:?}");
    let _ = io::stderr().flush();
}

/// Logging verbosity
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, ValueEnum, Default)]
pub enum LogLevel {
    /// Everything, including per-block rendering decisions
    Trace,
    /// Rendering decisions
    Debug,
    /// Loaded and rendered manifests
    Info,
    /// Warnings only
    #[default]
    Warn,
    /// Errors only
    Error,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Manifest kind selected on the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum KindArg {
    /// Homebrew formula
    Formula,
    /// Homebrew cask
    Cask,
}

impl From<KindArg> for ManifestKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Formula => Self::Formula,
            KindArg::Cask => Self::Cask,
        }
    }
}

/// Guard encoding selected on the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum EncodingArg {
    /// `if Hardware::CPU.intel?` style guards
    #[value(alias = "inline-boolean")]
    Inline,
    /// `on_intel do` / `on_arm do` style guards
    #[value(alias = "named-block")]
    Named,
}

impl From<EncodingArg> for GuardEncoding {
    fn from(encoding: EncodingArg) -> Self {
        match encoding {
            EncodingArg::Inline => Self::InlineBoolean,
            EncodingArg::Named => Self::NamedBlock,
        }
    }
}

/// Render Homebrew formulae and casks from release descriptions.
#[derive(Parser, Debug)]
#[command(name = "tapsmith")]
#[command(about = "Render Homebrew formulae and casks from release descriptions")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level.
    #[arg(
        short = 'L',
        long,
        global = true,
        env = "TAPSMITH_LOG",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the manifest described by a release file.
    Render {
        /// Release description (`.toml` or `.json`).
        release_file: PathBuf,

        /// Override the manifest kind.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Override the guard encoding.
        #[arg(long, value_enum)]
        encoding: Option<EncodingArg>,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the release version.
        #[arg(long)]
        release_version: Option<String>,
    },
    /// Validate a release file and summarize its package set.
    Check {
        /// Release description (`.toml` or `.json`).
        release_file: PathBuf,
    },
}

/// Parse command line arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
