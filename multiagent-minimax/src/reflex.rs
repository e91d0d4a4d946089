//! A one-step greedy agent, for comparison against the searching ones.

use rand::Rng;
use tracing::debug;
use types::types::{SuccessorGame, MAXIMIZER};

use crate::{
    score::Evaluator,
    select::{Extremum, TiePool},
};

/// Pick the maximizer action whose immediate successor evaluates best
///
/// No adversary replies are considered. Ties are broken uniformly at random with `rng`, and `None`
/// is returned when the maximizer has no legal actions.
///
/// ```rust
/// use multiagent_minimax::{reflex::reflex_action, ScoreEvaluation};
/// use rand::{rngs::StdRng, SeedableRng};
/// use types::{tree_representation::GameTree, types::Direction};
///
/// let tree = GameTree::from_json(r#"{
///     "num_agents": 2,
///     "root": { "children": [
///         { "action": "north", "score": 10, "children": [ { "action": "stop", "score": -500 } ] },
///         { "action": "south", "score": 2 }
///     ] }
/// }"#).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(0);
///
/// // The reflex agent walks straight into the trap behind north
/// assert_eq!(
///     reflex_action(&tree, &ScoreEvaluation, &mut rng),
///     Some(Direction::North)
/// );
/// ```
pub fn reflex_action<GameType, EvaluatorType, R>(
    state: &GameType,
    evaluator: &EvaluatorType,
    rng: &mut R,
) -> Option<GameType::ActionType>
where
    GameType: SuccessorGame,
    EvaluatorType: Evaluator<GameType>,
    R: Rng + ?Sized,
{
    let actions = state.legal_actions(MAXIMIZER);
    if actions.is_empty() {
        debug!("no legal actions for the reflex agent");
        return None;
    }

    let mut pool = TiePool::new(Extremum::Max);
    for action in actions {
        let value = evaluator.evaluate(&state.maximizer_successor(action));
        pool.offer(action, value);
    }

    let (value, action) = pool.choose(rng)?;
    debug!(
        value,
        action = ?action,
        tied = pool.tied().len(),
        "reflex agent chose an action"
    );

    Some(action)
}
