//! Plain single-token arguments.

use super::{suggestions_with_prefix, Argument};
use crate::context::{CommandContext, CommandInput};
use crate::error::ParseError;
use crate::reader::TokenReader;

/// Accepts any single token as text.
#[derive(Debug, Clone)]
pub struct StringArgument {
    name: String,
    suggestions: Vec<String>,
}

impl StringArgument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suggestions: Vec::new(),
        }
    }

    /// Static values offered during completion; parsing still accepts anything.
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }
}

impl Argument for StringArgument {
    type Value = String;

    fn name(&self) -> &str {
        &self.name
    }

    fn parse_value(
        &self,
        _input: &CommandInput,
        _ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Result<String, ParseError> {
        if !reader.has_next() {
            return Err(self.missing_argument_error());
        }
        Ok(reader.next()?.to_string())
    }

    fn complete(
        &self,
        _input: &CommandInput,
        _ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Vec<String> {
        if reader.remaining_count() != 1 {
            return Vec::new();
        }
        let partial = reader.peek().unwrap_or_default();
        suggestions_with_prefix(self.suggestions.iter().map(String::as_str), partial)
    }
}

/// Matches a fixed keyword (or one of its aliases), case-insensitively.
#[derive(Debug, Clone)]
pub struct LiteralArgument {
    name: String,
    literal: String,
    aliases: Vec<String>,
}

impl LiteralArgument {
    pub fn new(name: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            literal: literal.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    fn matches(&self, token: &str) -> bool {
        std::iter::once(&self.literal)
            .chain(self.aliases.iter())
            .any(|candidate| candidate.eq_ignore_ascii_case(token))
    }
}

impl Argument for LiteralArgument {
    type Value = String;

    fn name(&self) -> &str {
        &self.name
    }

    fn format(&self) -> String {
        self.literal.clone()
    }

    fn parse_value(
        &self,
        _input: &CommandInput,
        _ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Result<String, ParseError> {
        if !reader.has_next() {
            return Err(self.missing_argument_error());
        }
        let state = reader.snapshot();
        let token = reader.next()?.to_string();
        if !self.matches(&token) {
            reader.restore(state);
            return Err(self.invalid_argument_error(&token));
        }
        Ok(self.literal.clone())
    }

    fn complete(
        &self,
        _input: &CommandInput,
        _ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Vec<String> {
        if reader.remaining_count() != 1 {
            return Vec::new();
        }
        let partial = reader.peek().unwrap_or_default();
        suggestions_with_prefix(
            std::iter::once(self.literal.as_str()).chain(self.aliases.iter().map(String::as_str)),
            partial,
        )
    }
}
