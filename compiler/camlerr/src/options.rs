//! Command-line options.

use camlerr_diagnostic::{ColorMode, Dialect, FailurePolicy};
use thiserror::Error;

/// How errors are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bordered panels for humans.
    #[default]
    Terminal,
    /// One JSON array for tooling.
    Json,
}

impl OutputFormat {
    /// Parse from command line string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "terminal" => Some(Self::Terminal),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a `--color` value.
fn color_mode(s: &str) -> Option<ColorMode> {
    match s {
        "auto" => Some(ColorMode::Auto),
        "always" => Some(ColorMode::Always),
        "never" => Some(ColorMode::Never),
        _ => None,
    }
}

/// Settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Output format (--format=<terminal|json>)
    pub format: OutputFormat,
    /// Color selection for terminal output (--color=<auto|always|never>)
    pub color: ColorMode,
    /// Abort on the first bad block, or skip it (--keep-going)
    pub policy: FailurePolicy,
    /// Compiler wording (--dialect=<name>)
    pub dialect: Dialect,
    /// Show paths relative to the working directory (--no-relative-paths disables)
    pub relative_paths: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            format: OutputFormat::default(),
            color: ColorMode::default(),
            policy: FailurePolicy::default(),
            dialect: Dialect::default(),
            relative_paths: true,
        }
    }
}

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Help,
    Version,
}

/// A command line that cannot be acted on.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("unknown output format '{0}', options: terminal, json")]
    UnknownFormat(String),

    #[error("unknown color mode '{0}', options: auto, always, never")]
    UnknownColor(String),

    #[error("unknown dialect '{name}', options: {known}")]
    UnknownDialect { name: String, known: String },

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Parse the arguments that follow the program name.
///
/// `--help` and `--version` win over everything else on the line.
pub fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let mut options = Options::default();

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(Command::Help);
        } else if arg == "--version" || arg == "-V" {
            return Ok(Command::Version);
        }
    }

    for arg in args {
        if let Some(format) = arg.strip_prefix("--format=") {
            options.format = OutputFormat::from_str(format)
                .ok_or_else(|| UsageError::UnknownFormat(format.to_string()))?;
        } else if let Some(color) = arg.strip_prefix("--color=") {
            options.color =
                color_mode(color).ok_or_else(|| UsageError::UnknownColor(color.to_string()))?;
        } else if let Some(name) = arg.strip_prefix("--dialect=") {
            options.dialect = *Dialect::by_name(name).ok_or_else(|| UsageError::UnknownDialect {
                name: name.to_string(),
                known: Dialect::names().collect::<Vec<_>>().join(", "),
            })?;
        } else if arg == "--keep-going" || arg == "-k" {
            options.policy = FailurePolicy::Isolate;
        } else if arg == "--no-relative-paths" {
            options.relative_paths = false;
        } else {
            return Err(UsageError::UnexpectedArgument(arg.clone()));
        }
    }

    Ok(Command::Run(options))
}
