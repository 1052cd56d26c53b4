//! Command nodes
//!
//! A [`Command`] holds an ordered list of arguments and a registry of child
//! commands. Parsing routes the first token to a child when it names one and
//! otherwise walks the arguments left to right, scheduling fallback passes for
//! arguments that escalate. Completion walks the same list but only asks the
//! argument owning the last token for suggestions.

use crate::argument::{Argument, ArgumentNode, ARGUMENT_SEPARATOR, MAX_SUGGESTIONS};
use crate::context::{CommandContext, CommandInput};
use crate::error::{FallbackEscalation, ParseError, RegistryError};
use crate::reader::TokenReader;
use crate::text::{self, Message};
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

pub mod registry;

pub use registry::{normalize_alias, CommandRegistry, RegistryId};

static NEXT_COMMAND_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique command identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u64);

impl CommandId {
    fn next() -> Self {
        CommandId(NEXT_COMMAND_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cmd-{}", self.0)
    }
}

type BoxedArgument = Box<dyn ArgumentNode + Send + Sync>;

/// A named command with arguments and child commands.
///
/// Built by value, then shared as `Arc<Command>` once registered.
pub struct Command {
    id: CommandId,
    name: String,
    aliases: Vec<String>,
    description: Option<String>,
    arguments: Vec<BoxedArgument>,
    registry: RwLock<Option<RegistryId>>,
    children: RwLock<CommandRegistry>,
}

/// Result of parsing an invocation: the command that ended up handling it
/// (possibly a child) and the values its arguments bound.
#[derive(Debug)]
pub struct ParsedCommand {
    pub command: Arc<Command>,
    pub input: CommandInput,
    pub context: CommandContext,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        let id = CommandId::next();
        Self {
            id,
            name: name.into(),
            aliases: Vec::new(),
            description: None,
            arguments: Vec::new(),
            registry: RwLock::new(None),
            children: RwLock::new(CommandRegistry::owned_by(id)),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append an argument. The command takes ownership, so an argument can
    /// only ever belong to one command.
    pub fn with_argument<A>(mut self, argument: A) -> Self
    where
        A: Argument + Send + Sync + 'static,
    {
        self.arguments.push(Box::new(argument));
        self
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn argument_names(&self) -> impl Iterator<Item = &str> {
        self.arguments.iter().map(|a| a.node_name())
    }

    /// Registry this command is currently registered in, if any.
    pub fn registry(&self) -> Option<RegistryId> {
        *self.registry.read()
    }

    pub(crate) fn set_registry(&self, registry: Option<RegistryId>) {
        *self.registry.write() = registry;
    }

    /// Read access to the child registry.
    ///
    /// The guard holds a non-reentrant lock: drop it before calling
    /// [`Command::register_child`] or [`Command::unregister_child`] on the same
    /// command. Use [`Command::child_commands`] to iterate while mutating.
    pub fn children(&self) -> RwLockReadGuard<'_, CommandRegistry> {
        self.children.read()
    }

    /// Registered child commands, in registration order.
    pub fn child_commands(&self) -> Vec<Arc<Command>> {
        self.children.read().commands().to_vec()
    }

    /// Register `child` under this command. Fails with [`RegistryError::Cycle`]
    /// if `child` is this command or one of its ancestors.
    pub fn register_child(&self, child: Arc<Command>) -> Result<(), RegistryError> {
        if child.id == self.id || child.has_descendant(self.id) {
            return Err(RegistryError::Cycle(child.name.clone()));
        }
        self.children.write().register(child)
    }

    fn has_descendant(&self, id: CommandId) -> bool {
        self.child_commands()
            .iter()
            .any(|child| child.id == id || child.has_descendant(id))
    }

    pub fn unregister_child(&self, child: &Arc<Command>) -> Result<(), RegistryError> {
        self.children.write().unregister(child)
    }

    /// `name <required> [optional] literal`
    pub fn usage(&self) -> String {
        std::iter::once(self.name.clone())
            .chain(self.arguments.iter().map(|a| a.node_format()))
            .collect::<Vec<_>>()
            .join(ARGUMENT_SEPARATOR)
    }

    /// Parse an invocation of this command, or of the child command named by
    /// the first token.
    pub fn parse(self: &Arc<Self>, input: &CommandInput) -> Result<ParsedCommand, ParseError> {
        if let Some((child, rest)) = self.route(input) {
            trace!(command = %self.name, child = %child.name, "Routing to child command");
            return child.parse(&rest);
        }
        let context = self.parse_arguments(input)?;
        Ok(ParsedCommand {
            command: Arc::clone(self),
            input: input.clone(),
            context,
        })
    }

    /// Parse this command's own arguments, ignoring child commands.
    pub fn parse_arguments(&self, input: &CommandInput) -> Result<CommandContext, ParseError> {
        let mut ctx = CommandContext::new();
        let mut reader = input.reader();
        let mut escalated = BTreeSet::new();
        self.parse_from(0, input, &mut ctx, &mut reader, &mut escalated)?;
        debug!(command = %self.name, values = ctx.len(), "Parsed command arguments");
        Ok(ctx)
    }

    fn route(&self, input: &CommandInput) -> Option<(Arc<Command>, CommandInput)> {
        let (first, rest) = input.tokens().split_first()?;
        let child = self.children.read().resolve(first)?;
        Some((child, input.for_child(first, rest)))
    }

    fn parse_from(
        &self,
        start: usize,
        input: &CommandInput,
        ctx: &mut CommandContext,
        reader: &mut TokenReader,
        escalated: &mut BTreeSet<usize>,
    ) -> Result<(), ParseError> {
        for index in start..self.arguments.len() {
            let argument = &self.arguments[index];
            let reader_state = reader.snapshot();
            let ctx_state = ctx.snapshot();
            match argument.node_parse(input, ctx, reader) {
                Ok(()) => {}
                Err(ParseError::FallbackEscalation(escalation)) => {
                    if !escalated.insert(index) {
                        return Err(ParseError::RepeatedEscalation {
                            argument: argument.node_name().to_string(),
                        });
                    }
                    reader.restore(reader_state);
                    ctx.restore(ctx_state);
                    return self.parse_deferred(index, &escalation, input, ctx, reader, escalated);
                }
                Err(err) => return Err(err),
            }
        }
        if reader.has_next() {
            let remaining = reader.remaining().join(input.separator());
            return Err(ParseError::UnexpectedInput {
                message: Message::new(text::UNEXPECTED_INPUT)
                    .with_arg(text::PLACEHOLDER_INPUT, remaining.as_str()),
                input: remaining,
            });
        }
        Ok(())
    }

    // The argument at `index` escalated: parse everything after it first, then
    // give it its fallback pass. If the rest failed, roll back to the deferred
    // argument's position and re-parse the rest after the fallback value.
    // If the rest succeeded it owns all remaining input, so the fallback pass
    // runs with the reader at the end and must not need tokens.
    fn parse_deferred(
        &self,
        index: usize,
        escalation: &FallbackEscalation,
        input: &CommandInput,
        ctx: &mut CommandContext,
        reader: &mut TokenReader,
        escalated: &mut BTreeSet<usize>,
    ) -> Result<(), ParseError> {
        let argument = &self.arguments[index];
        let reader_state = reader.snapshot();
        let ctx_state = ctx.snapshot();

        let parsing_failed = match self.parse_from(index + 1, input, ctx, reader, escalated) {
            Ok(()) => false,
            Err(err @ ParseError::RepeatedEscalation { .. }) => return Err(err),
            Err(err) => {
                debug!(
                    argument = %argument.node_name(),
                    error = %err,
                    "Arguments after deferred argument failed"
                );
                reader.restore(reader_state);
                ctx.restore(ctx_state);
                escalated.retain(|&i| i <= index);
                true
            }
        };

        match argument.node_parse_fallback(input, ctx, reader, escalation, parsing_failed) {
            Ok(()) => {}
            Err(ParseError::FallbackEscalation(_)) => {
                return Err(ParseError::RepeatedEscalation {
                    argument: argument.node_name().to_string(),
                })
            }
            Err(err) => return Err(err),
        }
        if parsing_failed {
            self.parse_from(index + 1, input, ctx, reader, escalated)
        } else {
            Ok(())
        }
    }

    /// Suggestions for the last token of `input`. Never fails.
    pub fn complete(&self, input: &CommandInput) -> Vec<String> {
        let tokens = input.tokens();
        let mut suggestions = Vec::new();
        if tokens.len() > 1 {
            if let Some((child, rest)) = self.route(input) {
                return child.complete(&rest);
            }
        } else if let Some(first) = tokens.first() {
            let prefix = normalize_alias(first);
            let children = self.children.read();
            suggestions.extend(
                children
                    .aliases()
                    .filter(|alias| alias.starts_with(&prefix))
                    .map(str::to_string)
                    .take(MAX_SUGGESTIONS),
            );
        }

        let mut ctx = CommandContext::new();
        let mut reader = input.reader();
        for argument in &self.arguments {
            if !reader.has_next() {
                break;
            }
            let state = reader.snapshot();
            match argument.node_parse(input, &mut ctx, &mut reader) {
                Ok(()) if reader.has_next() => {
                    // Nothing consumed on the last token: the argument was
                    // skipped but still competes for the completion slot.
                    if reader.snapshot() == state && reader.remaining_count() == 1 {
                        let mut lookahead = reader.clone();
                        merge(
                            &mut suggestions,
                            argument.node_complete(input, &ctx, &mut lookahead),
                        );
                    }
                }
                Ok(()) => {
                    reader.restore(state);
                    merge(&mut suggestions, argument.node_complete(input, &ctx, &mut reader));
                    break;
                }
                Err(err) => {
                    reader.restore(state);
                    let mut lookahead = reader.clone();
                    merge(
                        &mut suggestions,
                        argument.node_complete(input, &ctx, &mut lookahead),
                    );
                    if !(err.is_escalation() || argument.node_is_optional()) {
                        break;
                    }
                }
            }
        }
        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }
}

fn merge(suggestions: &mut Vec<String>, more: Vec<String>) {
    for suggestion in more {
        if suggestions.len() >= MAX_SUGGESTIONS {
            return;
        }
        if !suggestions.contains(&suggestion) {
            suggestions.push(suggestion);
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("arguments", &self.argument_names().collect::<Vec<_>>())
            .field("registry", &self.registry())
            .finish_non_exhaustive()
    }
}
