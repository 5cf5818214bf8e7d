//! One-shot database utilities run by an operator through the `maintenance` binary.

pub mod columns;
pub mod logos;
pub mod schema;
