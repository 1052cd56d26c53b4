//! Token Reader
//!
//! A cursor over the already-split input tokens of one parse or completion
//! attempt. The token list is shared and never mutated; snapshots capture the
//! cursor only, which is all backtracking needs.

use crate::error::ParseError;
use std::sync::Arc;

/// Opaque cursor snapshot produced by [`TokenReader::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderState {
    consumed: usize,
}

/// Cursor over an immutable token sequence.
///
/// Not shareable between attempts: exactly one parse or completion call owns a
/// reader for its whole duration.
#[derive(Debug, Clone)]
pub struct TokenReader {
    tokens: Arc<[String]>,
    // Number of consumed tokens; the last consumed token sits at `consumed - 1`.
    consumed: usize,
}

impl TokenReader {
    pub fn new(tokens: Arc<[String]>) -> Self {
        Self {
            tokens,
            consumed: 0,
        }
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(tokens.into_iter().map(Into::into).collect())
    }

    /// All tokens, consumed or not.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Index of the last consumed token, `None` before the first `next`.
    pub fn cursor(&self) -> Option<usize> {
        self.consumed.checked_sub(1)
    }

    pub fn has_next(&self) -> bool {
        self.consumed < self.tokens.len()
    }

    /// Advance the cursor and return the token it now points at.
    pub fn next(&mut self) -> Result<&str, ParseError> {
        if !self.has_next() {
            return Err(ParseError::EndOfInput);
        }
        self.consumed += 1;
        Ok(&self.tokens[self.consumed - 1])
    }

    /// The next token without consuming it.
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.consumed).map(String::as_str)
    }

    pub fn remaining_count(&self) -> usize {
        self.tokens.len() - self.consumed
    }

    /// The not yet consumed tokens.
    pub fn remaining(&self) -> &[String] {
        &self.tokens[self.consumed..]
    }

    pub fn snapshot(&self) -> ReaderState {
        ReaderState {
            consumed: self.consumed,
        }
    }

    pub fn restore(&mut self, state: ReaderState) {
        debug_assert!(state.consumed <= self.tokens.len());
        self.consumed = state.consumed;
    }

    /// Tokens consumed between `state` and the current cursor.
    ///
    /// Empty if the cursor sits at or before `state`.
    pub fn consumed_since(&self, state: ReaderState) -> &[String] {
        if state.consumed >= self.consumed {
            return &[];
        }
        &self.tokens[state.consumed..self.consumed]
    }
}
