//! Deferred parsing of fallback arguments

use super::test_utils::{alice, input, shop_tree, shops, ARMORER};
use argtree::argument::{
    Argument, FallbackArgument, ObjectByIdArgument, StringArgument, TargetedObjectArgument,
    UuidFormat,
};
use argtree::error::FallbackEscalation;
use argtree::source::SourceRecord;
use argtree::{
    text, Actor, Command, CommandContext, CommandInput, ParseError, TokenReader,
};
use std::sync::Arc;

fn shop_name(ctx: &CommandContext) -> Option<&str> {
    ctx.get::<SourceRecord>("shop").map(|s| s.name.as_str())
}

/// `edit <shop> <field>` where the shop defaults to the targeted one.
fn edit_command() -> Command {
    let source = shops();
    Command::new("edit")
        .with_argument(FallbackArgument::new(
            ObjectByIdArgument::new("shop", UuidFormat, Arc::clone(&source)),
            TargetedObjectArgument::new("shop", source),
        ))
        .with_argument(StringArgument::new("field"))
}

fn edit(actor: Actor, tokens: &[&str]) -> Result<CommandContext, ParseError> {
    edit_command().parse_arguments(&CommandInput::new(actor, "edit", tokens.iter().copied()))
}

#[test]
fn test_optional_remote_defaults_to_targeted_shop() {
    let root = shop_tree();
    let parsed = root.parse(&input(alice(), &["remote", "bob"])).unwrap();
    assert_eq!(shop_name(&parsed.context), Some("Weaponsmith"));
    assert_eq!(
        parsed.context.get::<String>("player").map(String::as_str),
        Some("bob")
    );
}

#[test]
fn test_optional_remote_without_target_or_actor() {
    let root = shop_tree();
    for actor in [Actor::player("bob"), Actor::Console] {
        let parsed = root.parse(&input(actor, &["remote", "carol"])).unwrap();
        assert_eq!(shop_name(&parsed.context), None);
        assert_eq!(
            parsed.context.get::<String>("player").map(String::as_str),
            Some("carol")
        );
    }
}

#[test]
fn test_explicit_shop_wins_over_target() {
    let ctx = edit(alice(), &[ARMORER, "name"]).unwrap();
    assert_eq!(shop_name(&ctx), Some("Armorer"));
}

#[test]
fn test_target_fills_in_when_later_arguments_consume_input() {
    let ctx = edit(alice(), &["name"]).unwrap();
    assert_eq!(shop_name(&ctx), Some("Weaponsmith"));
    assert_eq!(ctx.get::<String>("field").map(String::as_str), Some("name"));
}

#[test]
fn test_fallback_errors_are_reported() {
    let err = edit(Actor::player("bob"), &["name"]).unwrap_err();
    assert_eq!(err.message().unwrap().template(), text::NO_TARGETED_OBJECT);

    let err = edit(Actor::Console, &["name"]).unwrap_err();
    assert!(matches!(err, ParseError::RequiresActor { .. }));
}

#[test]
fn test_primary_error_reported_when_rest_fails() {
    // "bogus" becomes the field, leaving "name" unparsed; rolled back, the
    // shop argument reports why "bogus" is not a shop.
    let err = edit(alice(), &["bogus", "name"]).unwrap_err();
    assert!(matches!(err, ParseError::InvalidArgument { ref input, .. } if input == "bogus"));
}

#[test]
fn test_missing_input_entirely() {
    let err = edit(Actor::player("bob"), &[]).unwrap_err();
    assert!(matches!(err, ParseError::MissingArgument { .. }));
}

/// Escalates on every pass.
struct Stubborn;

impl Argument for Stubborn {
    type Value = String;

    fn name(&self) -> &str {
        "stubborn"
    }

    fn parse_value(
        &self,
        _input: &CommandInput,
        _ctx: &CommandContext,
        _reader: &mut TokenReader,
    ) -> Result<String, ParseError> {
        Err(ParseError::FallbackEscalation(FallbackEscalation::new(
            self.name(),
            self.missing_argument_error(),
        )))
    }

    fn parse_fallback(
        &self,
        input: &CommandInput,
        ctx: &CommandContext,
        reader: &mut TokenReader,
        _escalation: &FallbackEscalation,
        _parsing_failed: bool,
    ) -> Result<String, ParseError> {
        self.parse_value(input, ctx, reader)
    }

    fn complete(
        &self,
        _input: &CommandInput,
        _ctx: &CommandContext,
        _reader: &mut TokenReader,
    ) -> Vec<String> {
        Vec::new()
    }
}

#[test]
fn test_second_escalation_is_fatal() {
    let command = Command::new("loop").with_argument(Stubborn);
    let err = command
        .parse_arguments(&CommandInput::new(Actor::Console, "loop", Vec::<String>::new()))
        .unwrap_err();
    assert!(matches!(err, ParseError::RepeatedEscalation { ref argument } if argument == "stubborn"));
}
