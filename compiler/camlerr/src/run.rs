//! One pass from compiler output to rendered errors.

use std::io::{self, Write};

use camlerr_diagnostic::{
    JsonEmitter, KeepPath, Outcome, ParseError, PathNormalizer, Pipeline, RelativeTo,
    TerminalEmitter,
};
use thiserror::Error;
use tracing::debug;

use crate::{Options, OutputFormat};

const NO_ERRORS: &str = "No errors found!";

/// Errors that end a run with a failure exit code.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("cannot determine the working directory: {0}")]
    WorkingDirectory(#[source] io::Error),
}

/// Parse `input` and write the rendered errors to `out`.
///
/// `is_tty` reports whether `out` is a terminal, for `ColorMode::Auto`.
pub fn run(
    input: &str,
    options: &Options,
    out: &mut dyn Write,
    is_tty: bool,
) -> Result<Outcome, RunError> {
    let paths: Box<dyn PathNormalizer> = if options.relative_paths {
        Box::new(RelativeTo::current_dir().map_err(RunError::WorkingDirectory)?)
    } else {
        Box::new(KeepPath)
    };
    let pipeline = Pipeline::new(&options.dialect, paths.as_ref()).with_policy(options.policy);

    let outcome = match options.format {
        OutputFormat::Terminal => {
            let mut emitter = TerminalEmitter::with_color_mode(&mut *out, options.color, is_tty);
            pipeline.run(input, &mut emitter)?
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(&mut *out);
            pipeline.run(input, &mut emitter)?
        }
    };

    if outcome == Outcome::NoErrors {
        let notice = match options.format {
            OutputFormat::Terminal => NO_ERRORS,
            OutputFormat::Json => "[]",
        };
        let _ = writeln!(out, "{notice}");
        let _ = out.flush();
    }
    debug!(?outcome, "run finished");
    Ok(outcome)
}
