//! Property-based tests for object id completion

use argtree::argument::{
    Argument, IdentifierFormat, ObjectByIdArgument, UuidFormat, MAX_SUGGESTIONS,
};
use argtree::source::{InMemorySource, SourceRecord};
use argtree::{Actor, CommandContext, CommandInput};
use proptest::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

proptest! {
    #[test]
    fn every_suggestion_extends_prefix(
        ids in prop::collection::vec(any::<u128>(), 1..40),
        pick in any::<prop::sample::Index>(),
        len in 0usize..36,
    ) {
        let records: Vec<SourceRecord> = ids
            .iter()
            .enumerate()
            .map(|(i, raw)| SourceRecord::new(Uuid::from_u128(*raw), format!("o{}", i)))
            .collect();
        let chosen = UuidFormat.canonical(&records[pick.index(records.len())].id);
        let prefix = &chosen[..len];
        let argument = ObjectByIdArgument::new("obj", UuidFormat, Arc::new(InMemorySource::new(records)))
            .with_min_completion_input(0);

        let input = CommandInput::new(Actor::Console, "test", [prefix]);
        let suggestions = argument.complete(&input, &CommandContext::new(), &mut input.reader());

        prop_assert!(suggestions.len() <= MAX_SUGGESTIONS);
        prop_assert!(suggestions.iter().all(|s| s.starts_with(prefix)));
        // The chosen id completes from its own prefix unless the cap cut it off.
        if suggestions.len() < MAX_SUGGESTIONS {
            prop_assert!(suggestions.contains(&chosen));
        }
    }

    #[test]
    fn default_minimum_gates_broad_scan(
        ids in prop::collection::vec(any::<u128>(), 1..40),
        pick in any::<prop::sample::Index>(),
        len in 0usize..36,
    ) {
        let records: Vec<SourceRecord> = ids
            .iter()
            .enumerate()
            .map(|(i, raw)| SourceRecord::new(Uuid::from_u128(*raw), format!("o{}", i)))
            .collect();
        let chosen = UuidFormat.canonical(&records[pick.index(records.len())].id);
        let prefix = &chosen[..len];
        let argument = ObjectByIdArgument::new("obj", UuidFormat, Arc::new(InMemorySource::new(records)));

        // Nothing is targeted for the console, so only the broad scan can answer.
        let input = CommandInput::new(Actor::Console, "test", [prefix]);
        let suggestions = argument.complete(&input, &CommandContext::new(), &mut input.reader());

        prop_assert!(suggestions.len() <= MAX_SUGGESTIONS);
        prop_assert!(suggestions.iter().all(|s| s.starts_with(prefix)));
        if len < 3 {
            prop_assert!(suggestions.is_empty());
        } else if suggestions.len() < MAX_SUGGESTIONS {
            prop_assert!(suggestions.contains(&chosen));
        }
    }
}
