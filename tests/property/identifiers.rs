//! Property-based tests for identifier grammars

use argtree::argument::{
    Argument, HexId, HexIdFormat, IdentifierArgument, IdentifierFormat, UuidFormat,
};
use argtree::{Actor, CommandContext, CommandInput};
use proptest::prelude::*;
use uuid::Uuid;

proptest! {
    #[test]
    fn uuid_canonical_form_parses_back(raw in any::<u128>()) {
        let format = UuidFormat;
        let id = Uuid::from_u128(raw);
        let canonical = format.canonical(&id);
        prop_assert_eq!(format.parse(&canonical), Some(id));
        prop_assert_eq!(format.parse(&canonical.to_uppercase()), Some(id));
    }

    #[test]
    fn hex_groups_parse_as_one_argument(bytes in any::<[u8; 16]>(), groups in prop::sample::select(vec![1usize, 2, 4, 8])) {
        let format = HexIdFormat::grouped(groups).unwrap();
        let id = HexId::new(bytes);
        let canonical = format.canonical(&id);
        let tokens: Vec<&str> = canonical.split(' ').collect();
        prop_assert_eq!(tokens.len(), groups);

        let argument = IdentifierArgument::new("id", format);
        let input = CommandInput::new(Actor::Console, "test", tokens.iter().copied());
        let mut reader = input.reader();
        let parsed = argument.parse_value(&input, &CommandContext::new(), &mut reader).unwrap();
        prop_assert_eq!(parsed, id);
        prop_assert!(!reader.has_next());
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,40}") {
        let _ = UuidFormat.parse(&text);
        let _ = HexIdFormat::single().parse(&text);
    }
}
