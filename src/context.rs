//! Invocation input and the typed value context arguments bind into.

use crate::argument::ARGUMENT_SEPARATOR;
use crate::reader::TokenReader;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Whoever issued the command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Actor {
    Console,
    Player { name: String },
}

impl Actor {
    pub fn player(name: impl Into<String>) -> Self {
        Actor::Player { name: name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Actor::Console => "console",
            Actor::Player { name } => name,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Actor::Player { .. })
    }
}

/// One command invocation: actor, the alias it was invoked with and the
/// argument tokens as split by the host.
///
/// The separator is the one the host split on. Multi-token identifiers, echoed
/// input and multi-token suggestions are joined with it.
#[derive(Debug, Clone)]
pub struct CommandInput {
    actor: Actor,
    command_alias: String,
    tokens: Arc<[String]>,
    separator: Arc<str>,
}

impl CommandInput {
    pub fn new<I, S>(actor: Actor, command_alias: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            actor,
            command_alias: command_alias.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
            separator: Arc::from(ARGUMENT_SEPARATOR),
        }
    }

    pub fn with_separator(mut self, separator: impl AsRef<str>) -> Self {
        self.separator = Arc::from(separator.as_ref());
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn command_alias(&self) -> &str {
        &self.command_alias
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Input for a child command: the routing token becomes the alias.
    pub fn for_child(&self, alias: &str, tokens: &[String]) -> Self {
        Self {
            actor: self.actor.clone(),
            command_alias: alias.to_string(),
            tokens: tokens.iter().cloned().collect(),
            separator: Arc::clone(&self.separator),
        }
    }

    /// Fresh reader over the tokens; tokens are shared, not copied.
    pub fn reader(&self) -> TokenReader {
        TokenReader::new(Arc::clone(&self.tokens))
    }
}

/// Snapshot of a [`CommandContext`], restorable with [`CommandContext::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextState {
    journal_len: usize,
}

/// Parsed values keyed by argument name, in binding order.
///
/// Every binding is journaled with the value it replaced, so a snapshot can
/// be restored exactly even after names were rebound.
#[derive(Default)]
pub struct CommandContext {
    values: IndexMap<String, Box<dyn Any>>,
    journal: Vec<(String, Option<Box<dyn Any>>)>,
}

impl CommandContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` under `name`. Rebinding keeps the entry's position.
    pub fn put<T: 'static>(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        let previous = self.values.insert(name.clone(), Box::new(value));
        self.journal.push((name, previous));
    }

    pub fn get<T: 'static>(&self, name: &str) -> Option<&T> {
        self.values.get(name).and_then(|v| v.downcast_ref::<T>())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn snapshot(&self) -> ContextState {
        ContextState {
            journal_len: self.journal.len(),
        }
    }

    /// Undo every binding made after `state` was taken: new names are dropped,
    /// rebound names get their earlier value back.
    pub fn restore(&mut self, state: ContextState) {
        while self.journal.len() > state.journal_len {
            let Some((name, previous)) = self.journal.pop() else {
                break;
            };
            match previous {
                Some(value) => {
                    self.values.insert(name, value);
                }
                None => {
                    self.values.shift_remove(&name);
                }
            }
        }
    }
}

impl fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("names", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}
