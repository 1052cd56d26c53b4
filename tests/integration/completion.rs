//! Completion through the `shop` command tree

use super::test_utils::{alice, input, shop_tree, ARMORER, WEAPONSMITH};
use argtree::argument::{ArgumentFilter, ObjectByIdArgument, UuidFormat, MAX_SUGGESTIONS};
use argtree::source::{InMemorySource, SourceRecord};
use argtree::{Actor, Command, CommandInput};
use std::sync::Arc;
use uuid::Uuid;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_child_aliases_for_first_token() {
    let root = shop_tree();
    assert_eq!(root.complete(&input(alice(), &["re"])), strings(&["remote", "remove"]));
    assert_eq!(root.complete(&input(alice(), &["I"])), strings(&["info", "i"]));
    assert_eq!(root.complete(&input(alice(), &[""])).len(), 6);
}

#[test]
fn test_split_identifier_suggests_remaining_groups() {
    let root = shop_tree();
    let suggestions = root.complete(&input(Actor::Console, &["info", "8f14e45f", "ceea"]));
    assert_eq!(suggestions, strings(&["ceea467a 9a36dedd 4bea2543"]));
}

#[test]
fn test_first_group_suggests_whole_identifiers() {
    let root = shop_tree();
    let suggestions = root.complete(&input(Actor::Console, &["info", "8f14e45f"]));
    assert_eq!(
        suggestions,
        strings(&[
            "8f14e45f ceea467a 9a36dedd 4bea2543",
            "8f14e45f 0b1e4c6a 8d2e3f0c 9a1b2c3d",
        ])
    );
}

#[test]
fn test_prefix_is_case_insensitive() {
    let root = shop_tree();
    let suggestions = root.complete(&input(Actor::Console, &["delete", "8F14"]));
    assert_eq!(suggestions, strings(&[WEAPONSMITH, ARMORER]));
}

#[test]
fn test_targeted_shop_offered_before_minimum_length() {
    let root = shop_tree();
    // Only the targeted shop below three characters.
    assert_eq!(
        root.complete(&input(alice(), &["delete", "8f"])),
        strings(&[WEAPONSMITH])
    );
    assert!(root
        .complete(&input(Actor::player("bob"), &["delete", "8f"]))
        .is_empty());
    // Targeted first, then the broad scan without duplicates.
    assert_eq!(
        root.complete(&input(alice(), &["delete", "8f1"])),
        strings(&[WEAPONSMITH, ARMORER])
    );
}

#[test]
fn test_remote_offers_shops_and_players_for_same_slot() {
    let root = shop_tree();
    assert_eq!(
        root.complete(&input(alice(), &["remote", ""])),
        strings(&[WEAPONSMITH, "bob", "bella", "carol"])
    );
    assert_eq!(
        root.complete(&input(Actor::player("bob"), &["remote", "b"])),
        strings(&["bob", "bella"])
    );
}

#[test]
fn test_completed_argument_yields_slot_to_next() {
    let root = shop_tree();
    assert_eq!(
        root.complete(&input(alice(), &["open", WEAPONSMITH, "c"])),
        strings(&["carol"])
    );
}

#[test]
fn test_invalid_input_completes_to_nothing() {
    let root = shop_tree();
    assert!(root
        .complete(&input(alice(), &["delete", "zz", "yy"]))
        .is_empty());
    assert!(root.complete(&input(alice(), &["nope", "x"])).is_empty());
}

#[test]
fn test_filter_with_targeted_gate() {
    let target = Uuid::parse_str("abc00000-0000-4000-8000-000000000001").unwrap();
    let records = vec![
        SourceRecord::new(target, "target").targeted_by("alice"),
        SourceRecord::new(
            Uuid::parse_str("abd00000-0000-4000-8000-000000000002").unwrap(),
            "other",
        )
        .targeted_by("alice"),
        SourceRecord::new(
            Uuid::parse_str("abe00000-0000-4000-8000-000000000003").unwrap(),
            "hidden",
        ),
    ];
    let command = Command::new("pick").with_argument(
        ObjectByIdArgument::new("obj", UuidFormat, Arc::new(InMemorySource::new(records)))
            .with_filter(ArgumentFilter::existing_where(|o: &SourceRecord| {
                o.name == "target"
            })),
    );

    let alice = CommandInput::new(alice(), "pick", ["ab"]);
    assert_eq!(command.complete(&alice), vec![target.to_string()]);

    let bob_short = CommandInput::new(Actor::player("bob"), "pick", ["ab"]);
    assert!(command.complete(&bob_short).is_empty());

    let bob_long = CommandInput::new(Actor::player("bob"), "pick", ["abc"]);
    assert_eq!(command.complete(&bob_long), vec![target.to_string()]);
}

#[test]
fn test_suggestions_are_capped() {
    let records: Vec<SourceRecord> = (0..50u128)
        .map(|i| SourceRecord::new(Uuid::from_u128((0xaaaa_u128 << 112) | i), format!("o{}", i)))
        .collect();
    let source = Arc::new(InMemorySource::new(records));
    let command = Command::new("pick")
        .with_argument(ObjectByIdArgument::new("obj", UuidFormat, Arc::clone(&source)));
    let input = CommandInput::new(Actor::Console, "pick", ["aaaa"]);
    assert_eq!(command.complete(&input).len(), MAX_SUGGESTIONS);

    let limited = Command::new("pick").with_argument(
        ObjectByIdArgument::new("obj", UuidFormat, source).with_max_suggestions(5),
    );
    assert_eq!(limited.complete(&input).len(), 5);
}
