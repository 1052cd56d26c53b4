//! Command arguments
//!
//! An argument consumes tokens from a [`TokenReader`] into a typed value, or
//! fails with a [`ParseError`]. Independently it offers completion suggestions
//! for partial input; completion never fails.
//!
//! Arguments compose as a tree: decorating arguments (optional, fallback,
//! object-by-id) own their child by value, so a child can never be attached to
//! a second parent.

use crate::context::{CommandContext, CommandInput};
use crate::error::{FallbackEscalation, ParseError};
use crate::reader::TokenReader;
use crate::text::{self, Message};

pub mod basic;
pub mod by_id;
pub mod fallback;
pub mod filter;
pub mod identifier;
pub mod object_id;
pub mod optional;

pub use basic::{LiteralArgument, StringArgument};
pub use by_id::{ObjectByIdArgument, ObjectSource, TargetedObjectArgument};
pub use fallback::FallbackArgument;
pub use filter::ArgumentFilter;
pub use identifier::{HexId, HexIdFormat, IdentifierArgument, IdentifierFormat, UuidFormat};
pub use object_id::{CandidateSupplier, CompletionRequest, ObjectIdArgument};
pub use optional::OptionalArgument;

/// Upper bound on the suggestions a single completion request returns.
pub const MAX_SUGGESTIONS: usize = 20;

/// Separator the host splits arguments on; multi-token values are joined with it.
pub const ARGUMENT_SEPARATOR: &str = " ";

/// A typed parsing unit.
pub trait Argument {
    type Value: 'static;

    fn name(&self) -> &str;

    fn is_optional(&self) -> bool {
        false
    }

    /// Usage format, e.g. `<shop>` or `[player]`.
    fn format(&self) -> String {
        if self.is_optional() {
            format!("[{}]", self.name())
        } else {
            format!("<{}>", self.name())
        }
    }

    /// Parse a value starting after the reader's cursor.
    ///
    /// On success the cursor sits on the last consumed token.
    fn parse_value(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Result<Self::Value, ParseError>;

    /// Second pass after this argument escalated with
    /// [`ParseError::FallbackEscalation`]. `parsing_failed` tells whether the
    /// arguments after this one failed (the reader has then been rolled back
    /// to this argument's position).
    fn parse_fallback(
        &self,
        _input: &CommandInput,
        _ctx: &CommandContext,
        _reader: &mut TokenReader,
        escalation: &FallbackEscalation,
        _parsing_failed: bool,
    ) -> Result<Self::Value, ParseError> {
        Err(escalation.root_cause().clone())
    }

    /// Store a parsed value in the context.
    fn bind(&self, ctx: &mut CommandContext, value: Self::Value) {
        ctx.put(self.name().to_string(), value);
    }

    /// Parse and bind.
    fn parse(
        &self,
        input: &CommandInput,
        ctx: &mut CommandContext,
        reader: &mut TokenReader,
    ) -> Result<(), ParseError> {
        let value = self.parse_value(input, ctx, reader)?;
        self.bind(ctx, value);
        Ok(())
    }

    /// Suggestions for the token(s) after the cursor, relevance ordered.
    fn complete(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Vec<String>;

    fn missing_argument_message(&self) -> Message {
        Message::new(text::MISSING_ARGUMENT)
            .with_arg(text::PLACEHOLDER_ARGUMENT, self.name())
            .with_arg(text::PLACEHOLDER_FORMAT, self.format())
    }

    fn invalid_argument_message(&self, input: &str) -> Message {
        Message::new(text::INVALID_ARGUMENT)
            .with_arg(text::PLACEHOLDER_ARGUMENT, self.name())
            .with_arg(text::PLACEHOLDER_INPUT, input)
    }

    fn requires_actor_message(&self) -> Message {
        Message::new(text::REQUIRES_ACTOR).with_arg(text::PLACEHOLDER_ARGUMENT, self.name())
    }

    fn missing_argument_error(&self) -> ParseError {
        ParseError::MissingArgument {
            argument: self.name().to_string(),
            message: self.missing_argument_message(),
        }
    }

    fn invalid_argument_error(&self, input: &str) -> ParseError {
        ParseError::InvalidArgument {
            argument: self.name().to_string(),
            input: input.to_string(),
            message: self.invalid_argument_message(input),
        }
    }

    fn requires_actor_error(&self) -> ParseError {
        ParseError::RequiresActor {
            argument: self.name().to_string(),
            message: self.requires_actor_message(),
        }
    }
}

/// Object-safe view of an [`Argument`], used by commands to hold a
/// heterogeneous argument list.
pub trait ArgumentNode {
    fn node_name(&self) -> &str;

    fn node_is_optional(&self) -> bool;

    fn node_format(&self) -> String;

    fn node_parse(
        &self,
        input: &CommandInput,
        ctx: &mut CommandContext,
        reader: &mut TokenReader,
    ) -> Result<(), ParseError>;

    fn node_parse_fallback(
        &self,
        input: &CommandInput,
        ctx: &mut CommandContext,
        reader: &mut TokenReader,
        escalation: &FallbackEscalation,
        parsing_failed: bool,
    ) -> Result<(), ParseError>;

    fn node_complete(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Vec<String>;
}

impl<A: Argument> ArgumentNode for A {
    fn node_name(&self) -> &str {
        Argument::name(self)
    }

    fn node_is_optional(&self) -> bool {
        Argument::is_optional(self)
    }

    fn node_format(&self) -> String {
        Argument::format(self)
    }

    fn node_parse(
        &self,
        input: &CommandInput,
        ctx: &mut CommandContext,
        reader: &mut TokenReader,
    ) -> Result<(), ParseError> {
        Argument::parse(self, input, ctx, reader)
    }

    fn node_parse_fallback(
        &self,
        input: &CommandInput,
        ctx: &mut CommandContext,
        reader: &mut TokenReader,
        escalation: &FallbackEscalation,
        parsing_failed: bool,
    ) -> Result<(), ParseError> {
        let value = Argument::parse_fallback(self, input, ctx, reader, escalation, parsing_failed)?;
        Argument::bind(self, ctx, value);
        Ok(())
    }

    fn node_complete(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Vec<String> {
        Argument::complete(self, input, ctx, reader)
    }
}

/// Keep suggestions starting with `prefix` (ASCII case-insensitive), capped at
/// [`MAX_SUGGESTIONS`].
pub(crate) fn suggestions_with_prefix<'a, I>(candidates: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = prefix.to_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().starts_with(&prefix))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}
