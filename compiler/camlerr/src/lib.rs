//! The `camlerr` command.
//!
//! Reads OCaml compiler output from stdin and renders each error as a
//! panel, or as JSON with `--format=json`. The parsing itself lives in
//! `camlerr_diagnostic`; this crate owns option handling and process I/O.

use std::sync::Once;

mod options;
mod run;

pub use options::{parse_args, Command, Options, OutputFormat, UsageError};
pub use run::{run, RunError};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Call this once at program startup to enable tracing output.
/// Output is controlled by the `RUST_LOG` environment variable:
/// - `RUST_LOG=camlerr_diagnostic=debug` - per-block parse results
/// - `RUST_LOG=camlerr_diagnostic=trace` - chunking and pairing detail
///
/// Logs go to stderr so they never mix with rendered output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
