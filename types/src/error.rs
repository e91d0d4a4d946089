use thiserror::Error;

use crate::types::Direction;

/// Errors raised while parsing the game-side types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TypesError {
    /// A direction name that isn't one of north, south, east, west or stop
    #[error("unknown direction '{0}'")]
    UnknownDirection(String),

    /// Two children of the same tree node are reached by the same action
    #[error("action {action} appears more than once under the same node")]
    DuplicateAction {
        /// The repeated action
        action: Direction,
    },

    /// A child node in a game tree is missing the action that leads to it
    #[error("a child node at depth {depth} has no action")]
    MissingAction {
        /// How far below the root the child sits
        depth: usize,
    },

    /// The game tree JSON could not be parsed
    #[error("failed to parse game tree: {0}")]
    Json(#[from] serde_json::Error),
}
