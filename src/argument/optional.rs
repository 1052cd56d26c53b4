//! Optional arguments
//!
//! A failed or absent parse of the wrapped argument becomes "no value" with
//! the reader rolled back, so later arguments see the same input as if this
//! one had never run. Fallback escalations are not failures and are passed
//! on, wrapped, to the coordinating command.

use super::Argument;
use crate::context::{CommandContext, CommandInput};
use crate::error::{FallbackEscalation, ParseError};
use crate::reader::TokenReader;
use crate::text::Message;

#[derive(Debug, Clone)]
pub struct OptionalArgument<A> {
    argument: A,
}

impl<A: Argument> OptionalArgument<A> {
    pub fn new(argument: A) -> Self {
        Self { argument }
    }

    pub fn inner(&self) -> &A {
        &self.argument
    }

    fn parse_or_none<P>(
        &self,
        reader: &mut TokenReader,
        parse: P,
    ) -> Result<Option<A::Value>, ParseError>
    where
        P: FnOnce(&mut TokenReader) -> Result<A::Value, ParseError>,
    {
        let state = reader.snapshot();
        match parse(reader) {
            Ok(value) => Ok(Some(value)),
            Err(ParseError::FallbackEscalation(escalation)) => Err(ParseError::FallbackEscalation(
                FallbackEscalation::wrap(self.name(), escalation),
            )),
            Err(err) if err.is_recoverable() => {
                reader.restore(state);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

impl<A: Argument> Argument for OptionalArgument<A> {
    type Value = Option<A::Value>;

    fn name(&self) -> &str {
        self.argument.name()
    }

    fn is_optional(&self) -> bool {
        true
    }

    fn parse_value(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Result<Option<A::Value>, ParseError> {
        self.parse_or_none(reader, |reader| {
            self.argument.parse_value(input, ctx, reader)
        })
    }

    fn parse_fallback(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
        escalation: &FallbackEscalation,
        parsing_failed: bool,
    ) -> Result<Option<A::Value>, ParseError> {
        let inner = escalation.inner().unwrap_or(escalation);
        self.parse_or_none(reader, |reader| {
            self.argument
                .parse_fallback(input, ctx, reader, inner, parsing_failed)
        })
    }

    fn bind(&self, ctx: &mut CommandContext, value: Option<A::Value>) {
        if let Some(value) = value {
            self.argument.bind(ctx, value);
        }
    }

    fn complete(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Vec<String> {
        self.argument.complete(input, ctx, reader)
    }

    fn missing_argument_message(&self) -> Message {
        self.argument.missing_argument_message()
    }

    fn invalid_argument_message(&self, input: &str) -> Message {
        self.argument.invalid_argument_message(input)
    }

    fn requires_actor_message(&self) -> Message {
        self.argument.requires_actor_message()
    }
}
