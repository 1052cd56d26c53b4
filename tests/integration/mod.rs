//! Integration tests for command parsing, completion and registration

mod completion;
mod config_integration;
mod fallback;
mod registry;
mod test_utils;
