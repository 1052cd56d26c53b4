//! Property-based tests for identifiers, backtracking and completion

mod backtracking;
mod completion;
mod identifiers;
