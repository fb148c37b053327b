//! Operator implementations.

mod terminal;

pub use terminal::ConsoleOperator;
