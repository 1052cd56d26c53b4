//! Registration invariants of command registries

use super::test_utils::shop_tree;
use argtree::{Command, CommandRegistry, RegistryError};
use std::sync::Arc;

fn named(name: &str, aliases: &[&str]) -> Arc<Command> {
    let mut command = Command::new(name);
    for alias in aliases {
        command = command.with_alias(*alias);
    }
    Arc::new(command)
}

#[test]
fn test_canonical_name_collision_keeps_first() {
    let mut registry = CommandRegistry::new();
    let a = named("list", &[]);
    let b = named("list", &["ls"]);
    registry.register(Arc::clone(&a)).unwrap();

    assert!(matches!(
        registry.register(Arc::clone(&b)),
        Err(RegistryError::NameTaken(_))
    ));
    assert_eq!(registry.resolve("list").map(|c| c.id()), Some(a.id()));
    // Nothing of the failed registration leaks into the index.
    assert!(registry.resolve("ls").is_none());
    assert_eq!(registry.commands().len(), 1);
}

#[test]
fn test_alias_collision_resolves_to_first_registrant() {
    let mut registry = CommandRegistry::new();
    let a = named("teleport", &["tp"]);
    let b = named("transport", &["tp", "tr"]);
    registry.register(Arc::clone(&a)).unwrap();
    registry.register(Arc::clone(&b)).unwrap();

    assert_eq!(registry.resolve("TP").map(|c| c.id()), Some(a.id()));
    assert_eq!(registry.resolve("transport").map(|c| c.id()), Some(b.id()));
    assert_eq!(registry.resolve("tr").map(|c| c.id()), Some(b.id()));
    assert_eq!(
        registry.aliases().collect::<Vec<_>>(),
        vec!["teleport", "tp", "transport", "tr"]
    );
}

#[test]
fn test_command_belongs_to_one_parent() {
    let first = Arc::new(Command::new("first"));
    let second = Arc::new(Command::new("second"));
    let child = named("child", &[]);

    first.register_child(Arc::clone(&child)).unwrap();
    assert!(matches!(
        second.register_child(Arc::clone(&child)),
        Err(RegistryError::AlreadyRegistered(_))
    ));
    assert!(matches!(
        second.unregister_child(&child),
        Err(RegistryError::ForeignParent(_))
    ));

    first.unregister_child(&child).unwrap();
    second.register_child(Arc::clone(&child)).unwrap();
    assert!(second.children().is_registered(&child));
    assert!(!first.children().is_registered(&child));
    assert_eq!(second.children().owner(), Some(second.id()));
}

#[test]
fn test_enumeration_of_shop_tree() {
    let root = shop_tree();
    let children = root.children();
    let names: Vec<&str> = children.commands().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["remote", "info", "delete"]);
    assert_eq!(children.alias_map().len(), 6);

    let delete = children.resolve("remove").unwrap();
    assert_eq!(children.aliases_of(&delete), vec!["delete", "remove"]);
    assert_eq!(delete.usage(), "delete <shop>");
}
