//! The three tree searches: minimax, minimax with alpha-beta pruning, and expectimax.
//!
//! They share a single depth-first walker. What differs between them is only how a node combines
//! the values of its children, and whether siblings can be skipped:
//!
//! | strategy     | maximizer node         | adversary node         | prunes |
//! |--------------|------------------------|------------------------|--------|
//! | `Minimax`    | max, random tie-break  | min, random tie-break  | no     |
//! | `AlphaBeta`  | max, random tie-break  | min, random tie-break  | yes    |
//! | `Expectimax` | max, random tie-break  | mean of all children   | no     |
//!
//! Expectimax treats every adversary as moving uniformly at random instead of adversarially.
//!
//! ```rust
//! use multiagent_minimax::{ScoreEvaluation, SearchAgent, SearchOptions, Strategy};
//! use types::{tree_representation::GameTree, types::Direction};
//!
//! // The maximizer picks west or east, then the adversary answers
//! let tree = GameTree::from_json(r#"{
//!     "num_agents": 2,
//!     "root": { "children": [
//!         { "action": "west", "children": [
//!             { "action": "north", "score": 3 }, { "action": "south", "score": 12 }
//!         ] },
//!         { "action": "east", "children": [
//!             { "action": "north", "score": 4 }, { "action": "south", "score": 5 }
//!         ] }
//!     ] }
//! }"#).unwrap();
//!
//! let options = SearchOptions {
//!     depth: 1,
//!     strategy: Strategy::Minimax,
//!     seed: Some(7),
//! };
//! let mut agent = SearchAgent::new(options, ScoreEvaluation).unwrap();
//!
//! // East guarantees 4, west only guarantees 3
//! assert_eq!(agent.choose_action(&tree).unwrap(), Some(Direction::East));
//!
//! // A random adversary makes west worth 7.5 on average
//! let options = SearchOptions {
//!     strategy: Strategy::Expectimax,
//!     ..options
//! };
//! let mut agent = SearchAgent::new(options, ScoreEvaluation).unwrap();
//! let outcome = agent.search(&tree).unwrap();
//!
//! assert_eq!(outcome.action, Some(Direction::West));
//! assert_eq!(outcome.value, 7.5);
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use types::types::{AgentIndex, MAXIMIZER};

use crate::{EvaluationFunction, HeuristicWeights, SearchError};

mod agent;
pub use agent::{SearchAgent, SearchOptions};

mod search_return;
pub use search_return::{SearchOutcome, SearchReturn, SearchStats};

mod walker;
pub(crate) use walker::run_search;

/// How the search values the adversaries' moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Adversaries minimize the maximizer's value, every node is expanded
    #[default]
    Minimax,
    /// Same values as [Strategy::Minimax], but siblings that cannot change the result are skipped
    #[serde(alias = "alpha-beta")]
    AlphaBeta,
    /// Adversaries move uniformly at random, nodes take the mean of their children
    Expectimax,
}

/// How a single node combines the values of its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeRule {
    MaxWithTieBreak,
    MinWithTieBreak,
    Mean,
}

impl Strategy {
    /// Every strategy
    pub const fn all() -> [Strategy; 3] {
        [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax]
    }

    /// Whether this strategy skips siblings using alpha-beta bounds
    pub fn prunes(self) -> bool {
        matches!(self, Strategy::AlphaBeta)
    }

    /// The evaluation usually paired with this strategy: the plain score for the minimax family,
    /// the heuristic for expectimax
    pub fn default_evaluation(self) -> EvaluationFunction {
        match self {
            Strategy::Minimax | Strategy::AlphaBeta => EvaluationFunction::Score,
            Strategy::Expectimax => EvaluationFunction::Heuristic(HeuristicWeights::default()),
        }
    }

    pub(crate) fn node_rule(self, agent: AgentIndex) -> NodeRule {
        if agent == MAXIMIZER {
            return NodeRule::MaxWithTieBreak;
        }

        match self {
            Strategy::Minimax | Strategy::AlphaBeta => NodeRule::MinWithTieBreak,
            Strategy::Expectimax => NodeRule::Mean,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Expectimax => "expectimax",
        };

        write!(f, "{name}")
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            _ => Err(SearchError::UnknownStrategy(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_rules() {
        assert_eq!(Strategy::Minimax.node_rule(0), NodeRule::MaxWithTieBreak);
        assert_eq!(Strategy::Minimax.node_rule(2), NodeRule::MinWithTieBreak);
        assert_eq!(Strategy::AlphaBeta.node_rule(0), NodeRule::MaxWithTieBreak);
        assert_eq!(Strategy::AlphaBeta.node_rule(1), NodeRule::MinWithTieBreak);
        assert_eq!(Strategy::Expectimax.node_rule(0), NodeRule::MaxWithTieBreak);
        assert_eq!(Strategy::Expectimax.node_rule(1), NodeRule::Mean);
    }

    #[test]
    fn test_only_alpha_beta_prunes() {
        assert!(!Strategy::Minimax.prunes());
        assert!(Strategy::AlphaBeta.prunes());
        assert!(!Strategy::Expectimax.prunes());
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::all() {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }

        assert_eq!(
            "Alpha-Beta".parse::<Strategy>().unwrap(),
            Strategy::AlphaBeta
        );
        assert_eq!(
            "greedy".parse::<Strategy>(),
            Err(SearchError::UnknownStrategy("greedy".to_owned()))
        );
    }

    #[test]
    fn test_default_evaluations() {
        assert_eq!(
            Strategy::Minimax.default_evaluation(),
            EvaluationFunction::Score
        );
        assert_eq!(
            Strategy::AlphaBeta.default_evaluation(),
            EvaluationFunction::Score
        );
        assert!(matches!(
            Strategy::Expectimax.default_evaluation(),
            EvaluationFunction::Heuristic(_)
        ));
    }

    #[test]
    fn test_strategy_from_json() {
        let strategies: Vec<Strategy> =
            serde_json::from_str(r#"["minimax", "alphabeta", "alpha-beta", "expectimax"]"#)
                .unwrap();

        assert_eq!(
            strategies,
            vec![
                Strategy::Minimax,
                Strategy::AlphaBeta,
                Strategy::AlphaBeta,
                Strategy::Expectimax
            ]
        );
    }
}
