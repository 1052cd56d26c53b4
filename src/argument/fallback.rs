//! Fallback arguments
//!
//! Try a primary argument; if it cannot parse the input, do not fail right
//! away but escalate, so the command parses the later arguments first. If
//! those account for the remaining input, the secondary argument supplies the
//! value (e.g. "the shop you are looking at" when no shop id was typed).
//! If they do not, the primary's original error is reported.
//!
//! When the later arguments succeed they have consumed all remaining input,
//! so the secondary argument runs with no tokens left. It should take its
//! value from the invocation (actor, context) rather than from the reader;
//! a token-reading secondary reports its missing-argument error there.

use super::{Argument, MAX_SUGGESTIONS};
use crate::context::{CommandContext, CommandInput};
use crate::error::{FallbackEscalation, ParseError};
use crate::reader::TokenReader;
use crate::text::Message;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FallbackArgument<A, B> {
    primary: A,
    fallback: B,
}

impl<A, B> FallbackArgument<A, B>
where
    A: Argument,
    B: Argument,
    A::Value: From<B::Value>,
{
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &A {
        &self.primary
    }

    pub fn fallback(&self) -> &B {
        &self.fallback
    }
}

impl<A, B> Argument for FallbackArgument<A, B>
where
    A: Argument,
    B: Argument,
    A::Value: From<B::Value>,
{
    type Value = A::Value;

    fn name(&self) -> &str {
        self.primary.name()
    }

    fn format(&self) -> String {
        self.primary.format()
    }

    fn parse_value(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Result<A::Value, ParseError> {
        let state = reader.snapshot();
        match self.primary.parse_value(input, ctx, reader) {
            Ok(value) => Ok(value),
            Err(ParseError::FallbackEscalation(inner)) => Err(ParseError::FallbackEscalation(
                FallbackEscalation::wrap(self.name(), inner),
            )),
            Err(err) if err.is_recoverable() => {
                reader.restore(state);
                debug!(argument = %self.name(), error = %err, "Deferring to fallback pass");
                Err(ParseError::FallbackEscalation(FallbackEscalation::new(
                    self.name(),
                    err,
                )))
            }
            Err(err) => Err(err),
        }
    }

    fn parse_fallback(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
        escalation: &FallbackEscalation,
        parsing_failed: bool,
    ) -> Result<A::Value, ParseError> {
        // The primary escalated itself: give it its own second pass first.
        if let Some(inner) = escalation.inner() {
            let state = reader.snapshot();
            match self
                .primary
                .parse_fallback(input, ctx, reader, inner, parsing_failed)
            {
                Ok(value) => return Ok(value),
                Err(_) => reader.restore(state),
            }
        }
        if parsing_failed {
            // The later arguments could not use the input either; the primary
            // was most likely what the user meant.
            return Err(escalation.root_cause().clone());
        }
        // The later arguments used up the input, so it was not meant for the
        // primary: the secondary's own error is the relevant one.
        let state = reader.snapshot();
        self.fallback
            .parse_value(input, ctx, reader)
            .map(A::Value::from)
            .map_err(|err| {
                reader.restore(state);
                err
            })
    }

    fn bind(&self, ctx: &mut CommandContext, value: A::Value) {
        self.primary.bind(ctx, value);
    }

    fn complete(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Vec<String> {
        let state = reader.snapshot();
        let mut suggestions = self.primary.complete(input, ctx, reader);
        reader.restore(state);
        for suggestion in self.fallback.complete(input, ctx, reader) {
            if suggestions.len() >= MAX_SUGGESTIONS {
                break;
            }
            if !suggestions.contains(&suggestion) {
                suggestions.push(suggestion);
            }
        }
        reader.restore(state);
        suggestions
    }

    fn missing_argument_message(&self) -> Message {
        self.primary.missing_argument_message()
    }

    fn invalid_argument_message(&self, input: &str) -> Message {
        self.primary.invalid_argument_message(input)
    }

    fn requires_actor_message(&self) -> Message {
        self.fallback.requires_actor_message()
    }
}
