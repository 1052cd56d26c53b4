//! Object identifier argument
//!
//! Wraps an [`IdentifierArgument`] with an id filter and completion drawn from
//! an injected candidate supplier, so that partial input completes to the ids
//! of objects that actually exist.

use super::identifier::{IdentifierArgument, IdentifierFormat};
use super::{Argument, ArgumentFilter, MAX_SUGGESTIONS};
use crate::context::{CommandContext, CommandInput};
use crate::error::ParseError;
use crate::reader::TokenReader;
use crate::text::Message;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Default minimum prefix length before broad candidate scans kick in.
pub const DEFAULT_MIN_COMPLETION_INPUT: usize = 3;

/// What a candidate supplier gets to see for one completion request.
pub struct CompletionRequest<'a> {
    pub input: &'a CommandInput,
    pub ctx: &'a CommandContext,
    /// Lowercased prefix; may span several tokens joined by the separator.
    pub prefix: &'a str,
    /// Broad scans should only run once `prefix` is at least this long.
    pub min_completion_input: usize,
}

impl CompletionRequest<'_> {
    /// Whether the prefix is long enough for a broad candidate scan.
    pub fn allows_broad_scan(&self) -> bool {
        self.prefix.chars().count() >= self.min_completion_input
    }
}

/// Produces candidate ids for a completion request, most relevant first.
pub type CandidateSupplier<I> = Arc<dyn Fn(&CompletionRequest<'_>) -> Vec<I> + Send + Sync>;

pub struct ObjectIdArgument<F: IdentifierFormat> {
    name: String,
    id_argument: IdentifierArgument<F>,
    filter: ArgumentFilter<F::Id>,
    min_completion_input: usize,
    max_suggestions: usize,
    candidates: CandidateSupplier<F::Id>,
}

impl<F: IdentifierFormat> ObjectIdArgument<F> {
    /// Accepts any well-formed id and suggests nothing until a supplier is set.
    pub fn new(name: impl Into<String>, format: F) -> Self {
        let name = name.into();
        Self {
            id_argument: IdentifierArgument::new(format!("{}:id", name), format),
            name,
            filter: ArgumentFilter::accept_any(),
            min_completion_input: DEFAULT_MIN_COMPLETION_INPUT,
            max_suggestions: MAX_SUGGESTIONS,
            candidates: Arc::new(|_| Vec::new()),
        }
    }

    pub fn with_filter(mut self, filter: ArgumentFilter<F::Id>) -> Self {
        self.filter = filter;
        self
    }

    /// Set to 0 to complete even empty prefixes.
    pub fn with_min_completion_input(mut self, min: usize) -> Self {
        self.min_completion_input = min;
        self
    }

    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max.min(MAX_SUGGESTIONS);
        self
    }

    pub fn with_candidates<S>(mut self, supplier: S) -> Self
    where
        S: Fn(&CompletionRequest<'_>) -> Vec<F::Id> + Send + Sync + 'static,
    {
        self.candidates = Arc::new(supplier);
        self
    }

    pub fn id_format(&self) -> &F {
        self.id_argument.id_format()
    }

    pub fn min_completion_input(&self) -> usize {
        self.min_completion_input
    }

    /// Suggestions for an id prefix made of `token_count` joined tokens.
    ///
    /// Candidates are filtered, mapped to their canonical form and matched
    /// against the prefix. For multi-token prefixes only the part after the
    /// already typed leading tokens is suggested.
    fn suggest(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        prefix: &str,
        token_count: usize,
    ) -> Vec<String> {
        let normalized = prefix.to_lowercase();
        let request = CompletionRequest {
            input,
            ctx,
            prefix: &normalized,
            min_completion_input: self.min_completion_input,
        };
        let candidates = (self.candidates)(&request);
        trace!(
            argument = %self.name,
            prefix = %normalized,
            candidates = candidates.len(),
            "Completing object id"
        );

        let format = self.id_argument.id_format();
        let separator = input.separator();
        let mut suggestions: Vec<String> = Vec::new();
        for id in candidates {
            if suggestions.len() >= self.max_suggestions {
                break;
            }
            if !self.filter.test(&id) {
                continue;
            }
            let id_string = format.canonical_separated(&id, separator);
            if id_string.is_empty() || !id_string.starts_with(&normalized) {
                continue;
            }
            let suggestion = if token_count > 1 {
                let parts: Vec<&str> = id_string.splitn(token_count, separator).collect();
                if parts.len() == token_count {
                    parts[token_count - 1].to_string()
                } else {
                    id_string.clone()
                }
            } else {
                id_string
            };
            if !suggestions.contains(&suggestion) {
                suggestions.push(suggestion);
            }
        }
        suggestions
    }
}

impl<F: IdentifierFormat> fmt::Debug for ObjectIdArgument<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectIdArgument")
            .field("name", &self.name)
            .field("min_completion_input", &self.min_completion_input)
            .field("max_suggestions", &self.max_suggestions)
            .finish_non_exhaustive()
    }
}

impl<F: IdentifierFormat> Argument for ObjectIdArgument<F> {
    type Value = F::Id;

    fn name(&self) -> &str {
        &self.name
    }

    fn parse_value(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Result<F::Id, ParseError> {
        // Our own missing-argument error reads better than the id argument's.
        if !reader.has_next() {
            return Err(self.missing_argument_error());
        }
        let start = reader.snapshot();
        let id = self.id_argument.parse_value(input, ctx, reader)?;
        if !self.filter.test(&id) {
            let raw = reader.consumed_since(start).join(input.separator());
            reader.restore(start);
            return Err(ParseError::ArgumentRejected {
                argument: self.name.clone(),
                message: self.filter.rejection_message(&self.name, &raw, &id),
                input: raw,
            });
        }
        Ok(id)
    }

    fn complete(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Vec<String> {
        if reader.remaining_count() == 0 {
            return Vec::new();
        }
        let start = reader.snapshot();
        if self.id_argument.parse_value(input, ctx, reader).is_ok() && reader.has_next() {
            // A complete id followed by more input: the slot belongs to a later argument.
            return Vec::new();
        }
        reader.restore(start);

        let parts = reader.remaining();
        let token_count = parts.len();
        if token_count > self.id_format().token_count() {
            return Vec::new();
        }
        let prefix = parts.join(input.separator());
        self.suggest(input, ctx, &prefix, token_count)
    }

    fn invalid_argument_message(&self, input: &str) -> Message {
        self.id_argument.invalid_argument_message(input)
    }
}
