//! Property-based tests for reader rollback

use argtree::argument::{
    Argument, HexIdFormat, IdentifierArgument, OptionalArgument, StringArgument, UuidFormat,
};
use argtree::{Actor, Command, CommandContext, CommandInput};
use proptest::prelude::*;

fn tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[0-9a-f-]{0,12}|[a-z]{1,6}", 0..6)
}

proptest! {
    #[test]
    fn failed_optional_restores_reader(tokens in tokens(), skip in 0usize..3) {
        let argument = OptionalArgument::new(IdentifierArgument::new(
            "id",
            HexIdFormat::grouped(4).unwrap(),
        ));
        let input = CommandInput::new(Actor::Console, "test", tokens.clone());
        let mut reader = input.reader();
        for _ in 0..skip.min(tokens.len()) {
            reader.next().unwrap();
        }
        let before = reader.snapshot();
        let value = argument
            .parse_value(&input, &CommandContext::new(), &mut reader)
            .unwrap();
        if value.is_none() {
            prop_assert_eq!(reader.snapshot(), before);
        }
    }

    #[test]
    fn parse_is_repeatable(tokens in tokens()) {
        let command = Command::new("test")
            .with_argument(OptionalArgument::new(IdentifierArgument::new("id", UuidFormat)))
            .with_argument(OptionalArgument::new(StringArgument::new("name")));
        let input = CommandInput::new(Actor::Console, "test", tokens);
        let first = command.parse_arguments(&input).map(|ctx| ctx.names().map(str::to_string).collect::<Vec<_>>());
        let second = command.parse_arguments(&input).map(|ctx| ctx.names().map(str::to_string).collect::<Vec<_>>());
        prop_assert_eq!(first.is_ok(), second.is_ok());
        if let (Ok(first), Ok(second)) = (first, second) {
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn completion_never_panics(tokens in tokens()) {
        let command = Command::new("test")
            .with_argument(IdentifierArgument::new("id", UuidFormat))
            .with_argument(OptionalArgument::new(StringArgument::new("name").with_suggestions(["alpha"])));
        let input = CommandInput::new(Actor::player("alice"), "test", tokens);
        prop_assert!(command.complete(&input).len() <= argtree::argument::MAX_SUGGESTIONS);
    }
}
