#![deny(missing_debug_implementations, missing_docs)]
//! The game side of the multi-agent search.
//!
//! The search crate never looks inside a game. Everything it needs is expressed here as small
//! capability traits in [types] (legal actions, successors, score, positions, ...) which a game
//! implements. [tree_representation] holds [tree_representation::GameTree], an explicit game tree
//! that can be loaded from JSON and implements the search traits, which is handy for fixtures and
//! debugging.

mod error;
pub use error::TypesError;

pub mod tree_representation;
pub mod types;
