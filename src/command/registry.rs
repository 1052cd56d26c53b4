//! Command registry
//!
//! Index from normalized names and aliases to commands. Each command node owns
//! one registry for its children; hosts own one for their top-level commands.

use super::{Command, CommandId};
use crate::error::RegistryError;
use indexmap::IndexMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a registry, stored in each registered command as its parent
/// link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryId(u64);

impl RegistryId {
    fn next() -> Self {
        RegistryId(NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// NFC, trimmed, lowercased. Applied on registration and lookup alike.
pub fn normalize_alias(alias: &str) -> String {
    alias.trim().nfc().collect::<String>().to_lowercase()
}

pub struct CommandRegistry {
    id: RegistryId,
    owner: Option<CommandId>,
    commands: Vec<Arc<Command>>,
    by_alias: IndexMap<String, Arc<Command>>,
}

impl CommandRegistry {
    /// A free-standing registry, e.g. for a host's top-level commands.
    pub fn new() -> Self {
        Self {
            id: RegistryId::next(),
            owner: None,
            commands: Vec::new(),
            by_alias: IndexMap::new(),
        }
    }

    pub(crate) fn owned_by(owner: CommandId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::new()
        }
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    /// The command whose children this registry holds.
    pub fn owner(&self) -> Option<CommandId> {
        self.owner
    }

    /// Register under the canonical name and every alias not yet claimed.
    ///
    /// Fails if the command is registered anywhere already or its name is
    /// taken. Colliding aliases are skipped; the first registrant keeps them.
    pub fn register(&mut self, command: Arc<Command>) -> Result<(), RegistryError> {
        if command.registry().is_some() {
            return Err(RegistryError::AlreadyRegistered(command.name().to_string()));
        }
        let name = normalize_alias(command.name());
        if self.by_alias.contains_key(&name) {
            return Err(RegistryError::NameTaken(name));
        }

        self.by_alias.insert(name, Arc::clone(&command));
        for alias in command.aliases() {
            let alias = normalize_alias(alias);
            if alias.is_empty() {
                continue;
            }
            match self.by_alias.get(&alias) {
                Some(existing) if Arc::ptr_eq(existing, &command) => {}
                Some(existing) => {
                    warn!(
                        alias = %alias,
                        command = %command.name(),
                        claimed_by = %existing.name(),
                        "Alias already claimed, skipping"
                    );
                }
                None => {
                    self.by_alias.insert(alias, Arc::clone(&command));
                }
            }
        }

        command.set_registry(Some(self.id));
        debug!(command = %command.name(), id = %command.id(), "Registered command");
        self.commands.push(command);
        Ok(())
    }

    /// Remove the command and every alias pointing at it.
    pub fn unregister(&mut self, command: &Arc<Command>) -> Result<(), RegistryError> {
        if command.registry() != Some(self.id) {
            return Err(RegistryError::ForeignParent(command.name().to_string()));
        }
        let Some(position) = self.commands.iter().position(|c| Arc::ptr_eq(c, command)) else {
            return Err(RegistryError::NotRegistered(command.name().to_string()));
        };
        self.commands.remove(position);
        self.by_alias.retain(|_, c| !Arc::ptr_eq(c, command));
        command.set_registry(None);
        debug!(command = %command.name(), id = %command.id(), "Unregistered command");
        Ok(())
    }

    pub fn resolve(&self, alias: &str) -> Option<Arc<Command>> {
        self.by_alias.get(&normalize_alias(alias)).cloned()
    }

    /// Every alias currently mapped to `command`, canonical name first.
    pub fn aliases_of(&self, command: &Command) -> Vec<String> {
        self.by_alias
            .iter()
            .filter(|(_, c)| c.id() == command.id())
            .map(|(alias, _)| alias.clone())
            .collect()
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> &[Arc<Command>] {
        &self.commands
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.by_alias.keys().map(String::as_str)
    }

    pub fn alias_map(&self) -> &IndexMap<String, Arc<Command>> {
        &self.by_alias
    }

    pub fn is_registered(&self, command: &Command) -> bool {
        command.registry() == Some(self.id)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("aliases", &self.by_alias.keys().collect::<Vec<_>>())
            .finish()
    }
}
