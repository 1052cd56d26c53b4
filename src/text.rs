//! Message templates
//!
//! Parse errors carry a template with named placeholders (`{argument}`,
//! `{input}`, ...) plus the values collected so far. Turning a template into
//! final user-facing text is up to the host; [`Message::render`] is a plain
//! substitution used for `Display`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const PLACEHOLDER_ARGUMENT: &str = "argument";
pub const PLACEHOLDER_INPUT: &str = "input";
pub const PLACEHOLDER_FORMAT: &str = "format";
pub const PLACEHOLDER_EXPECTED: &str = "expected";

pub const MISSING_ARGUMENT: &str = "Missing argument: {format}";
pub const INVALID_ARGUMENT: &str = "Invalid argument '{argument}': {input}";
pub const INVALID_IDENTIFIER: &str = "Invalid {expected}: {input}";
pub const REJECTED_ARGUMENT: &str = "Argument '{argument}' does not accept: {input}";
pub const REQUIRES_ACTOR: &str = "Argument '{argument}' can only be used by a player";
pub const OBJECT_NOT_FOUND: &str = "No object found for: {input}";
pub const NO_TARGETED_OBJECT: &str = "You are not targeting anything for '{argument}'";
pub const UNEXPECTED_INPUT: &str = "Too many arguments: {input}";

/// A message template and its placeholder values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    template: String,
    #[serde(default)]
    args: BTreeMap<String, String>,
}

impl Message {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            args: BTreeMap::new(),
        }
    }

    /// Set a placeholder value, replacing any previous one.
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }

    pub fn args(&self) -> &BTreeMap<String, String> {
        &self.args
    }

    /// Substitute every known `{key}`; unknown placeholders are left as is.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let key = &after[..close];
                    match self.args.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push('{');
                            out.push_str(key);
                            out.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
