#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate picks moves for the maximizing agent of a turn-based multi-agent game, by searching
//! the game tree a fixed number of rounds deep. You provide an evaluation function that turns a
//! game state into an `f64`, and pick how the adversaries are modeled: as minimizers
//! ([Strategy::Minimax], [Strategy::AlphaBeta]) or as uniformly random movers
//! ([Strategy::Expectimax]).
//!
//! We lean on the capability traits from the `types` crate for the game itself, and in particular
//! on [types::types::SuccessorGame] to generate the next states.
//!
//! ```rust
//! use multiagent_minimax::{choose_action_with_rng, ScoreEvaluation, Strategy};
//! use rand::{rngs::StdRng, SeedableRng};
//! use types::{tree_representation::GameTree, types::Direction};
//!
//! let tree = GameTree::from_json(r#"{
//!     "num_agents": 2,
//!     "root": { "children": [
//!         { "action": "west", "children": [
//!             { "action": "north", "score": 3 }, { "action": "south", "score": 12 }
//!         ] },
//!         { "action": "east", "children": [
//!             { "action": "north", "score": 8 }, { "action": "south", "score": 4 }
//!         ] }
//!     ] }
//! }"#).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let action =
//!     choose_action_with_rng(&tree, 1, Strategy::AlphaBeta, &ScoreEvaluation, &mut rng).unwrap();
//!
//! assert_eq!(action, Some(Direction::East));
//! ```

use rand::Rng;
use types::types::SearchableGame;

mod error;
pub use error::SearchError;

pub mod reflex;

pub mod score;
pub use score::{
    EvaluationFunction, Evaluator, HeuristicEvaluation, HeuristicWeights, ScoreEvaluation,
};

pub mod search;
pub use search::{SearchAgent, SearchOptions, SearchOutcome, SearchReturn, SearchStats, Strategy};

pub mod select;
pub mod turn;

/// Pick the maximizer's next action in `state`, looking `depth` full rounds ahead
///
/// Ties are broken with the thread-local random source, so repeated calls on the same state may
/// differ. Use [choose_action_with_rng] or a seeded [SearchAgent] for reproducible choices.
///
/// Returns `Ok(None)` when the maximizer has no legal actions, and an error when `depth` is zero or
/// the game has no agents.
pub fn choose_action<GameType, EvaluatorType>(
    state: &GameType,
    depth: usize,
    strategy: Strategy,
    evaluator: &EvaluatorType,
) -> Result<Option<GameType::ActionType>, SearchError>
where
    GameType: SearchableGame,
    EvaluatorType: Evaluator<GameType>,
{
    choose_action_with_rng(state, depth, strategy, evaluator, &mut rand::thread_rng())
}

/// [choose_action], breaking ties with `rng`
pub fn choose_action_with_rng<GameType, EvaluatorType, R>(
    state: &GameType,
    depth: usize,
    strategy: Strategy,
    evaluator: &EvaluatorType,
    rng: &mut R,
) -> Result<Option<GameType::ActionType>, SearchError>
where
    GameType: SearchableGame,
    EvaluatorType: Evaluator<GameType>,
    R: Rng + ?Sized,
{
    let outcome = search::run_search(state, depth, strategy, evaluator, rng)?;

    Ok(outcome.action)
}
