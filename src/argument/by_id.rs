//! Object-by-identifier arguments
//!
//! Bridge a parsed identifier to a live domain object through an
//! [`ObjectSource`]. The source is a black box: resolution, enumeration and
//! "targeted" lookups are assumed to be fast in-memory queries.

use super::identifier::IdentifierFormat;
use super::object_id::{CompletionRequest, ObjectIdArgument};
use super::{Argument, ArgumentFilter};
use crate::context::{Actor, CommandContext, CommandInput};
use crate::error::ParseError;
use crate::reader::TokenReader;
use crate::text::{self, Message};
use std::fmt;
use std::sync::Arc;

/// Lookup interface to the objects an argument resolves to.
pub trait ObjectSource {
    type Id: Clone + PartialEq + fmt::Debug + 'static;
    type Object: Clone + 'static;

    /// Object with the given (syntactically valid) id, if any.
    fn resolve(&self, id: &Self::Id) -> Option<Self::Object>;

    /// Every known object. Potentially large; only used for completion once
    /// the typed prefix passes the minimum length.
    fn all_objects(&self) -> Vec<Self::Object>;

    /// Objects relevant to the actor right now (e.g. in view), most relevant
    /// first.
    fn targeted_objects(&self, actor: &Actor) -> Vec<Self::Object>;

    fn id_of(&self, object: &Self::Object) -> Self::Id;
}

/// Supplies candidate objects for completion.
pub type ObjectSupplier<S> = Arc<
    dyn Fn(&CompletionRequest<'_>, &S) -> Vec<<S as ObjectSource>::Object> + Send + Sync,
>;

/// Targeted objects first, regardless of prefix length, then every other
/// object once the prefix allows a broad scan.
pub fn default_candidates<S: ObjectSource>(
    request: &CompletionRequest<'_>,
    source: &S,
) -> Vec<S::Object> {
    let mut candidates = source.targeted_objects(request.input.actor());
    if request.allows_broad_scan() {
        let targeted: Vec<S::Id> = candidates.iter().map(|o| source.id_of(o)).collect();
        candidates.extend(
            source
                .all_objects()
                .into_iter()
                .filter(|o| !targeted.contains(&source.id_of(o))),
        );
    }
    candidates
}

/// Resolves an identifier to an object and applies an object filter.
///
/// The value is `None` when the id resolves to nothing and the filter accepts
/// that; the default filter ([`ArgumentFilter::existing`]) does not.
pub struct ObjectByIdArgument<F, S>
where
    F: IdentifierFormat,
    S: ObjectSource<Id = F::Id>,
{
    name: String,
    id_argument: ObjectIdArgument<F>,
    source: Arc<S>,
    filter: ArgumentFilter<Option<S::Object>>,
    objects: ObjectSupplier<S>,
}

impl<F, S> ObjectByIdArgument<F, S>
where
    F: IdentifierFormat,
    S: ObjectSource<Id = F::Id> + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, format: F, source: Arc<S>) -> Self {
        let name = name.into();
        Self {
            id_argument: ObjectIdArgument::new(name.clone(), format),
            name,
            source,
            filter: ArgumentFilter::existing(),
            objects: Arc::new(default_candidates::<S>),
        }
        .install_candidates()
    }

    pub fn with_filter(mut self, filter: ArgumentFilter<Option<S::Object>>) -> Self {
        self.filter = filter;
        self.install_candidates()
    }

    pub fn with_min_completion_input(mut self, min: usize) -> Self {
        self.id_argument = self.id_argument.with_min_completion_input(min);
        self
    }

    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.id_argument = self.id_argument.with_max_suggestions(max);
        self
    }

    /// Replace the candidate objects offered during completion.
    pub fn with_candidates<C>(mut self, supplier: C) -> Self
    where
        C: Fn(&CompletionRequest<'_>, &S) -> Vec<S::Object> + Send + Sync + 'static,
    {
        self.objects = Arc::new(supplier);
        self.install_candidates()
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    // Candidate objects are filtered here with the object filter and handed
    // to the id argument as ids.
    fn install_candidates(mut self) -> Self {
        let source = Arc::clone(&self.source);
        let filter = self.filter.clone();
        let objects = Arc::clone(&self.objects);
        self.id_argument = self.id_argument.with_candidates(move |request| {
            objects(request, source.as_ref())
                .into_iter()
                .map(Some)
                .filter(|object| filter.test(object))
                .flatten()
                .map(|object| source.id_of(&object))
                .collect()
        });
        self
    }
}

impl<F, S> fmt::Debug for ObjectByIdArgument<F, S>
where
    F: IdentifierFormat,
    S: ObjectSource<Id = F::Id>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectByIdArgument")
            .field("name", &self.name)
            .field("id_argument", &self.id_argument)
            .finish_non_exhaustive()
    }
}

impl<F, S> Argument for ObjectByIdArgument<F, S>
where
    F: IdentifierFormat,
    S: ObjectSource<Id = F::Id>,
{
    type Value = Option<S::Object>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parse_value(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Result<Option<S::Object>, ParseError> {
        if !reader.has_next() {
            return Err(self.missing_argument_error());
        }
        let start = reader.snapshot();
        // Identifier syntax errors pass through unchanged.
        let id = self.id_argument.parse_value(input, ctx, reader)?;
        let object = self.source.resolve(&id);
        if !self.filter.test(&object) {
            let raw = reader.consumed_since(start).join(input.separator());
            reader.restore(start);
            return Err(ParseError::ArgumentRejected {
                argument: self.name.clone(),
                message: self.filter.rejection_message(&self.name, &raw, &object),
                input: raw,
            });
        }
        Ok(object)
    }

    fn bind(&self, ctx: &mut CommandContext, value: Option<S::Object>) {
        if let Some(object) = value {
            ctx.put(self.name.clone(), object);
        }
    }

    fn complete(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
    ) -> Vec<String> {
        self.id_argument.complete(input, ctx, reader)
    }

    fn invalid_argument_message(&self, input: &str) -> Message {
        self.id_argument.invalid_argument_message(input)
    }
}

/// Consumes no input; yields the actor's first targeted object that passes
/// the filter.
pub struct TargetedObjectArgument<S: ObjectSource> {
    name: String,
    source: Arc<S>,
    filter: ArgumentFilter<S::Object>,
}

impl<S: ObjectSource> TargetedObjectArgument<S> {
    pub fn new(name: impl Into<String>, source: Arc<S>) -> Self {
        Self {
            name: name.into(),
            source,
            filter: ArgumentFilter::accept_any(),
        }
    }

    pub fn with_filter(mut self, filter: ArgumentFilter<S::Object>) -> Self {
        self.filter = filter;
        self
    }
}

impl<S: ObjectSource> fmt::Debug for TargetedObjectArgument<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetedObjectArgument")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<S: ObjectSource> Argument for TargetedObjectArgument<S> {
    type Value = S::Object;

    fn name(&self) -> &str {
        &self.name
    }

    fn parse_value(
        &self,
        input: &CommandInput,
        _ctx: &CommandContext,
        _reader: &mut TokenReader,
    ) -> Result<S::Object, ParseError> {
        let actor = input.actor();
        if !actor.is_player() {
            return Err(self.requires_actor_error());
        }
        let targeted = self.source.targeted_objects(actor);
        let Some(first) = targeted.first() else {
            return Err(self.missing_argument_error());
        };
        if let Some(accepted) = targeted.iter().find(|object| self.filter.test(object)) {
            return Ok(accepted.clone());
        }
        Err(ParseError::ArgumentRejected {
            argument: self.name.clone(),
            input: String::new(),
            message: self.filter.rejection_message(&self.name, "", first),
        })
    }

    fn complete(
        &self,
        _input: &CommandInput,
        _ctx: &CommandContext,
        _reader: &mut TokenReader,
    ) -> Vec<String> {
        Vec::new()
    }

    fn missing_argument_message(&self) -> Message {
        Message::new(text::NO_TARGETED_OBJECT).with_arg(text::PLACEHOLDER_ARGUMENT, self.name())
    }
}
