//! Identifier arguments
//!
//! Purely syntactic: a token either has the identifier's fixed shape or it
//! does not. Whether anything in the system carries that identifier is the
//! concern of [`super::ObjectByIdArgument`].

use super::{Argument, ARGUMENT_SEPARATOR};
use crate::context::{CommandContext, CommandInput};
use crate::error::ParseError;
use crate::reader::TokenReader;
use crate::text::{self, Message};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Grammar and canonical string form of one identifier type.
pub trait IdentifierFormat {
    type Id: Clone + PartialEq + fmt::Debug + 'static;

    /// Number of separator-delimited tokens one identifier spans.
    fn token_count(&self) -> usize {
        1
    }

    /// Parse the identifier from its tokens joined by `separator`.
    fn parse_separated(&self, text: &str, separator: &str) -> Option<Self::Id>;

    /// Canonical (lowercase, normalised) string form with multi-token
    /// identifiers joined by `separator`; used for completion matching and
    /// re-serialisation.
    fn canonical_separated(&self, id: &Self::Id, separator: &str) -> String;

    /// [`IdentifierFormat::parse_separated`] with [`ARGUMENT_SEPARATOR`].
    fn parse(&self, text: &str) -> Option<Self::Id> {
        self.parse_separated(text, ARGUMENT_SEPARATOR)
    }

    /// [`IdentifierFormat::canonical_separated`] with [`ARGUMENT_SEPARATOR`].
    fn canonical(&self, id: &Self::Id) -> String {
        self.canonical_separated(id, ARGUMENT_SEPARATOR)
    }

    /// Human readable description of the accepted shape.
    fn describe(&self) -> &'static str;
}

const UUID_LENGTH: usize = 36;
const UUID_HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Hyphenated 128-bit UUID, e.g. `8f14e45f-ceea-167a-5a36-dedd4bea2543`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidFormat;

impl IdentifierFormat for UuidFormat {
    type Id = Uuid;

    fn parse_separated(&self, text: &str, _separator: &str) -> Option<Uuid> {
        let bytes = text.as_bytes();
        if bytes.len() != UUID_LENGTH {
            return None;
        }
        let shape_ok = bytes.iter().enumerate().all(|(i, b)| {
            if UUID_HYPHENS.contains(&i) {
                *b == b'-'
            } else {
                b.is_ascii_hexdigit()
            }
        });
        if !shape_ok {
            return None;
        }
        Uuid::parse_str(text).ok()
    }

    fn canonical_separated(&self, id: &Uuid, _separator: &str) -> String {
        id.hyphenated().to_string()
    }

    fn describe(&self) -> &'static str {
        "UUID"
    }
}

const HEX_ID_LENGTH: usize = 32;

/// A 128-bit identifier written as 32 hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexId([u8; 16]);

impl HexId {
    pub fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for HexId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for HexId {
    type Error = hex::FromHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexId> for String {
    fn from(id: HexId) -> Self {
        id.to_hex()
    }
}

/// [`HexId`] grammar, either as one token or split into equally sized groups
/// separated by the argument separator
/// (`8f14e45f ceea167a 5a36dedd 4bea2543` for four groups).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexIdFormat {
    groups: usize,
}

impl HexIdFormat {
    pub fn single() -> Self {
        Self { groups: 1 }
    }

    /// `None` unless `groups` evenly divides the 32 hex characters.
    pub fn grouped(groups: usize) -> Option<Self> {
        if groups == 0 || HEX_ID_LENGTH % groups != 0 {
            return None;
        }
        Some(Self { groups })
    }

    pub fn groups(&self) -> usize {
        self.groups
    }

    fn group_width(&self) -> usize {
        HEX_ID_LENGTH / self.groups
    }
}

impl Default for HexIdFormat {
    fn default() -> Self {
        Self::single()
    }
}

impl IdentifierFormat for HexIdFormat {
    type Id = HexId;

    fn token_count(&self) -> usize {
        self.groups
    }

    fn parse_separated(&self, text: &str, separator: &str) -> Option<HexId> {
        let parts: Vec<&str> = if self.groups == 1 {
            vec![text]
        } else {
            text.split(separator).collect()
        };
        if parts.len() != self.groups {
            return None;
        }
        let width = self.group_width();
        if parts
            .iter()
            .any(|p| p.len() != width || !p.bytes().all(|b| b.is_ascii_hexdigit()))
        {
            return None;
        }
        parts.concat().parse().ok()
    }

    fn canonical_separated(&self, id: &HexId, separator: &str) -> String {
        let hex = id.to_hex();
        if self.groups == 1 {
            return hex;
        }
        hex.as_bytes()
            .chunks(self.group_width())
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn describe(&self) -> &'static str {
        "hex id"
    }
}

/// Parses one identifier of format `F`; offers no completions of its own.
#[derive(Debug, Clone)]
pub struct IdentifierArgument<F> {
    name: String,
    format: F,
}

impl<F: IdentifierFormat> IdentifierArgument<F> {
    pub fn new(name: impl Into<String>, format: F) -> Self {
        Self {
            name: name.into(),
            format,
        }
    }

    pub fn id_format(&self) -> &F {
        &self.format
    }
}

impl<F: IdentifierFormat> Argument for IdentifierArgument<F> {
    type Value = F::Id;

    fn name(&self) -> &str {
        &self.name
    }

    fn parse_value(
        &self,
        input: &CommandInput,
        _ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Result<F::Id, ParseError> {
        if !reader.has_next() {
            return Err(self.missing_argument_error());
        }
        let state = reader.snapshot();
        let count = self.format.token_count().min(reader.remaining_count());
        for _ in 0..count {
            reader.next()?;
        }
        let text = reader.consumed_since(state).join(input.separator());
        if count < self.format.token_count() {
            reader.restore(state);
            return Err(self.invalid_argument_error(&text));
        }
        match self.format.parse_separated(&text, input.separator()) {
            Some(id) => Ok(id),
            None => {
                reader.restore(state);
                Err(self.invalid_argument_error(&text))
            }
        }
    }

    fn complete(
        &self,
        _input: &CommandInput,
        _ctx: &CommandContext,
        _reader: &mut TokenReader,
    ) -> Vec<String> {
        Vec::new()
    }

    fn invalid_argument_message(&self, input: &str) -> Message {
        Message::new(text::INVALID_IDENTIFIER)
            .with_arg(text::PLACEHOLDER_ARGUMENT, self.name())
            .with_arg(text::PLACEHOLDER_INPUT, input)
            .with_arg(text::PLACEHOLDER_EXPECTED, self.format.describe())
    }
}
