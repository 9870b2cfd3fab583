//! Driving a diagnostic stream through the parsers into an emitter.

use tracing::{debug, info, instrument, warn};

use crate::emitter::ErrorEmitter;
use crate::location::parse_location;
use crate::{
    parse_block, split_blocks, Dialect, ErrorBlock, Location, ParseError, ParsedError,
    PathNormalizer,
};

/// What to do when a block fails to parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FailurePolicy {
    /// Parse every block before rendering anything; the first failure
    /// aborts the whole run with no output.
    #[default]
    Abort,
    /// Report the failed block and keep going with the next one.
    Isolate,
}

/// A block skipped under [`FailurePolicy::Isolate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockFailure {
    /// Zero-based position of the block in the stream.
    pub index: usize,
    /// The block's location, when its first line could be parsed.
    pub location: Option<Location>,
    pub error: ParseError,
}

/// Result of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The input held no diagnostics; the emitter was not called.
    NoErrors,
    /// Every block was handed to the emitter.
    Rendered { total: usize, failed: usize },
}

/// Parser configuration plus the failure policy.
pub struct Pipeline<'a> {
    dialect: &'a Dialect,
    paths: &'a dyn PathNormalizer,
    policy: FailurePolicy,
}

impl<'a> Pipeline<'a> {
    pub fn new(dialect: &'a Dialect, paths: &'a dyn PathNormalizer) -> Self {
        Pipeline {
            dialect,
            paths,
            policy: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Parse every block, stopping at the first failure.
    pub fn parse_all(&self, input: &str) -> Result<Vec<ParsedError>, ParseError> {
        split_blocks(input, self.dialect)?
            .iter()
            .map(|block| self.parse(block))
            .collect()
    }

    /// Parse `input` and hand each result to `emitter`.
    #[instrument(level = "debug", skip_all, fields(policy = ?self.policy, bytes = input.len()))]
    pub fn run(&self, input: &str, emitter: &mut dyn ErrorEmitter) -> Result<Outcome, ParseError> {
        let blocks = split_blocks(input, self.dialect)?;
        if blocks.is_empty() {
            info!("no diagnostics in input");
            return Ok(Outcome::NoErrors);
        }
        let total = blocks.len();
        info!(total, "found diagnostics");

        let failed = match self.policy {
            FailurePolicy::Abort => {
                let parsed = blocks
                    .iter()
                    .map(|block| self.parse(block))
                    .collect::<Result<Vec<_>, _>>()?;
                emitter.begin(total);
                for (index, error) in parsed.iter().enumerate() {
                    emitter.progress(total, index + 1);
                    emitter.emit(index, error);
                }
                0
            }
            FailurePolicy::Isolate => {
                emitter.begin(total);
                let mut failed = 0;
                for block in &blocks {
                    emitter.progress(total, block.index() + 1);
                    match self.parse(block) {
                        Ok(error) => emitter.emit(block.index(), &error),
                        Err(error) => {
                            failed += 1;
                            let failure = self.failure(block, error);
                            warn!(
                                index = failure.index,
                                location = ?failure.location.as_ref().map(ToString::to_string),
                                kind = failure.error.kind(),
                                "skipping block that failed to parse"
                            );
                            emitter.emit_failure(&failure);
                        }
                    }
                }
                failed
            }
        };

        emitter.finish(total, failed);
        emitter.flush();
        debug!(total, failed, "run complete");
        Ok(Outcome::Rendered { total, failed })
    }

    fn parse(&self, block: &ErrorBlock<'_>) -> Result<ParsedError, ParseError> {
        parse_block(block, self.dialect, self.paths)
    }

    fn failure(&self, block: &ErrorBlock<'_>, error: ParseError) -> BlockFailure {
        let location = block
            .first_line()
            .and_then(|line| parse_location(line, self.dialect, self.paths).ok());
        BlockFailure {
            index: block.index(),
            location,
            error,
        }
    }
}
