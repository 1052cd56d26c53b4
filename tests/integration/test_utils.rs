//! Shared fixtures: a small object universe and the `shop` command tree.

use argtree::argument::{
    FallbackArgument, HexId, HexIdFormat, ObjectByIdArgument, OptionalArgument, StringArgument,
    TargetedObjectArgument, UuidFormat,
};
use argtree::source::{InMemorySource, SourceRecord};
use argtree::{Actor, Command, CommandInput};
use std::sync::Arc;
use uuid::Uuid;

pub const WEAPONSMITH: &str = "8f14e45f-ceea-467a-9a36-dedd4bea2543";
pub const ARMORER: &str = "8f14e45f-0b1e-4c6a-8d2e-3f0c9a1b2c3d";
pub const BAKER: &str = "c9f0f895-fb98-4b91-8f1d-0c2ad1e1a5b2";

/// Weaponsmith is targeted by alice; nobody targets the others.
pub fn shops() -> Arc<InMemorySource> {
    Arc::new(InMemorySource::new(vec![
        SourceRecord::new(Uuid::parse_str(WEAPONSMITH).unwrap(), "Weaponsmith").targeted_by("alice"),
        SourceRecord::new(Uuid::parse_str(ARMORER).unwrap(), "Armorer"),
        SourceRecord::new(Uuid::parse_str(BAKER).unwrap(), "Baker"),
    ]))
}

/// The same shops keyed by [`HexId`].
pub fn hex_shops() -> Arc<InMemorySource<HexId>> {
    Arc::new(InMemorySource::new(
        shops()
            .records()
            .iter()
            .map(|r| SourceRecord {
                id: HexId::new(*r.id.as_bytes()),
                name: r.name.clone(),
                targeted_by: r.targeted_by.clone(),
            })
            .collect(),
    ))
}

pub fn remote_command() -> Command {
    let source = shops();
    Command::new("remote")
        .with_alias("open")
        .with_argument(OptionalArgument::new(FallbackArgument::new(
            ObjectByIdArgument::new("shop", UuidFormat, Arc::clone(&source)),
            TargetedObjectArgument::new("shop", source),
        )))
        .with_argument(OptionalArgument::new(
            StringArgument::new("player").with_suggestions(["bob", "bella", "carol"]),
        ))
}

/// `shop remote|info|delete`
pub fn shop_tree() -> Arc<Command> {
    let root = Arc::new(Command::new("shop").with_alias("shops"));
    root.register_child(Arc::new(remote_command())).unwrap();
    root.register_child(Arc::new(
        Command::new("info").with_alias("i").with_argument(ObjectByIdArgument::new(
            "shop",
            HexIdFormat::grouped(4).unwrap(),
            hex_shops(),
        )),
    ))
    .unwrap();
    root.register_child(Arc::new(
        Command::new("delete")
            .with_alias("remove")
            .with_argument(ObjectByIdArgument::new("shop", UuidFormat, shops())),
    ))
    .unwrap();
    root
}

pub fn input(actor: Actor, tokens: &[&str]) -> CommandInput {
    CommandInput::new(actor, "shop", tokens.iter().copied())
}

pub fn alice() -> Actor {
    Actor::player("alice")
}
