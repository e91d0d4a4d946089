use thiserror::Error;

/// Configuration problems that stop a search before it starts
///
/// A search itself never fails: running out of legal moves just turns a node into a leaf.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SearchError {
    /// The search depth has to cover at least one full round
    #[error("search depth must be at least 1, got {depth}")]
    InvalidDepth {
        /// The rejected depth
        depth: usize,
    },

    /// The game has no agents, so there is no maximizer to pick a move for
    #[error("the game has no agents to search for")]
    NoAgents,

    /// `depth * num_agents + 1` does not fit in a `usize`
    #[error("a depth of {depth} rounds with {num_agents} agents overflows the ply counter")]
    DepthOverflow {
        /// The requested depth
        depth: usize,
        /// The number of agents in the game
        num_agents: usize,
    },

    /// A strategy name that doesn't match any search strategy
    #[error("unknown search strategy '{0}', expected minimax, alphabeta or expectimax")]
    UnknownStrategy(String),

    /// An evaluation function name that doesn't match any evaluation function
    #[error("unknown evaluation function '{0}', expected score or heuristic")]
    UnknownEvaluation(String),
}
