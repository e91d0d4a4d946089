//! The fixed turn cycle and the ply budget that goes with it.
//!
//! A round is the maximizer followed by every adversary in descending index order:
//! `[0, n-1, n-2, ..., 1]`. One unit of search depth buys one round, and every single-agent move
//! spends one ply, so a search of depth `d` stops after exactly `d * n` moves along any path.

use types::types::{AgentIndex, MAXIMIZER};

use crate::SearchError;

/// The number of single-agent moves the search may still make, offset by one
///
/// A fresh budget for depth `d` with `n` agents holds `d * n + 1`, and a node is a cutoff once the
/// budget is down to [Plies::CUTOFF].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Plies(usize);

impl Plies {
    /// The budget at which nodes stop being expanded
    pub const CUTOFF: Plies = Plies(1);

    /// The starting budget for a search `depth` rounds deep in a game with `num_agents` agents
    pub fn for_depth(depth: usize, num_agents: usize) -> Result<Self, SearchError> {
        if depth == 0 {
            return Err(SearchError::InvalidDepth { depth });
        }
        if num_agents == 0 {
            return Err(SearchError::NoAgents);
        }

        depth
            .checked_mul(num_agents)
            .and_then(|moves| moves.checked_add(1))
            .map(Plies)
            .ok_or(SearchError::DepthOverflow { depth, num_agents })
    }

    /// The raw counter, including the offset
    pub fn remaining(self) -> usize {
        self.0
    }

    /// Whether a node with this budget must be evaluated instead of expanded
    pub fn is_cutoff(self) -> bool {
        self.0 <= Self::CUTOFF.0
    }

    /// The budget left after one more single-agent move
    pub fn consume(self) -> Plies {
        Plies(self.0.saturating_sub(1))
    }
}

/// The agent that moves next, and whether its move starts a new round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// Who moves next
    pub agent: AgentIndex,
    /// True when every agent has moved once since the last round started
    pub round_complete: bool,
}

/// The turn order of a game with a fixed number of agents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOrder {
    num_agents: usize,
}

impl TurnOrder {
    #[allow(missing_docs)]
    pub fn new(num_agents: usize) -> Result<Self, SearchError> {
        if num_agents == 0 {
            return Err(SearchError::NoAgents);
        }

        Ok(Self { num_agents })
    }

    #[allow(missing_docs)]
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    /// Who moves after `agent`
    ///
    /// The maximizer hands over to the highest adversary, adversaries count down, and adversary
    /// `1` hands back to the maximizer, closing the round. In a single agent game the maximizer
    /// follows itself and every move closes a round.
    pub fn next(&self, agent: AgentIndex) -> Turn {
        if agent == MAXIMIZER {
            let next = self.num_agents - 1;

            Turn {
                agent: next,
                round_complete: next == MAXIMIZER,
            }
        } else {
            Turn {
                agent: agent - 1,
                round_complete: agent == 1,
            }
        }
    }

    /// The agents of one round, in the order they move
    #[cfg(test)]
    pub(crate) fn round(&self) -> impl Iterator<Item = AgentIndex> {
        std::iter::once(MAXIMIZER).chain((1..self.num_agents).rev())
    }
}
