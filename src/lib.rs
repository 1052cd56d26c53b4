//! Argtree: Command Argument Parsing and Completion
//!
//! A tree of typed argument parsers that consume tokens from a split input
//! line, report structured parse errors, and independently produce tab
//! completion suggestions for partial input. Commands hold ordered arguments
//! and a registry of child commands reachable by name or alias.

pub mod argument;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod reader;
pub mod source;
pub mod text;

pub use argument::{Argument, ArgumentFilter, ArgumentNode, ObjectSource};
pub use command::{Command, CommandRegistry, ParsedCommand};
pub use context::{Actor, CommandContext, CommandInput};
pub use error::{ArgtreeError, ParseError, RegistryError};
pub use reader::TokenReader;
