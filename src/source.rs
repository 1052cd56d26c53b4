//! In-memory object source
//!
//! A plain [`ObjectSource`] over a list of records, loadable from TOML. Hosts
//! with a real object registry implement the trait themselves.

use crate::argument::ObjectSource;
use crate::context::Actor;
use crate::error::ArgtreeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

/// One named object and the actors currently targeting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord<I = Uuid> {
    pub id: I,
    pub name: String,
    #[serde(default)]
    pub targeted_by: Vec<String>,
}

impl<I> SourceRecord<I> {
    pub fn new(id: I, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            targeted_by: Vec::new(),
        }
    }

    pub fn targeted_by(mut self, actor: impl Into<String>) -> Self {
        self.targeted_by.push(actor.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct SourceFile<I> {
    #[serde(default = "Vec::new")]
    objects: Vec<SourceRecord<I>>,
}

/// Records in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource<I = Uuid> {
    records: Vec<SourceRecord<I>>,
}

impl<I> InMemorySource<I> {
    pub fn new(records: Vec<SourceRecord<I>>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SourceRecord<I>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<I: for<'de> Deserialize<'de>> InMemorySource<I> {
    /// Parse `[[objects]]` tables with `id`, `name` and optional `targeted_by`.
    pub fn from_toml_str(content: &str) -> Result<Self, ArgtreeError> {
        let file: SourceFile<I> = toml::from_str(content)
            .map_err(|e| ArgtreeError::ConfigError(format!("Invalid objects file: {}", e)))?;
        Ok(Self::new(file.objects))
    }

    pub fn load(path: &Path) -> Result<Self, ArgtreeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl<I> ObjectSource for InMemorySource<I>
where
    I: Clone + PartialEq + fmt::Debug + 'static,
{
    type Id = I;
    type Object = SourceRecord<I>;

    fn resolve(&self, id: &I) -> Option<SourceRecord<I>> {
        self.records.iter().find(|r| &r.id == id).cloned()
    }

    fn all_objects(&self) -> Vec<SourceRecord<I>> {
        self.records.clone()
    }

    fn targeted_objects(&self, actor: &Actor) -> Vec<SourceRecord<I>> {
        match actor {
            Actor::Console => Vec::new(),
            Actor::Player { name } => self
                .records
                .iter()
                .filter(|r| r.targeted_by.iter().any(|t| t == name))
                .cloned()
                .collect(),
        }
    }

    fn id_of(&self, object: &SourceRecord<I>) -> I {
        object.id.clone()
    }
}
