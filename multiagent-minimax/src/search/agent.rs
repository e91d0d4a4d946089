use derivative::Derivative;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use types::types::SearchableGame;

use crate::{score::Evaluator, SearchError};

use super::{run_search, SearchOutcome, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Properties that configure a [SearchAgent]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use multiagent_minimax::{SearchOptions, Strategy};
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.depth, 2);
/// assert_eq!(defaults.strategy, Strategy::Minimax);
/// assert_eq!(defaults.seed, None);
/// ```
///
/// Every field can be left out when deserializing:
/// ```
/// use multiagent_minimax::{SearchOptions, Strategy};
///
/// let options: SearchOptions = serde_json::from_str(r#"{ "strategy": "expectimax" }"#).unwrap();
///
/// assert_eq!(options.depth, 2);
/// assert_eq!(options.strategy, Strategy::Expectimax);
/// ```
pub struct SearchOptions {
    /// How many full rounds to look ahead, one move per agent each
    ///
    /// Defaults to 2
    pub depth: usize,
    /// How the adversaries are modeled
    pub strategy: Strategy,
    /// Seed for breaking ties, [None] draws one from the operating system
    pub seed: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            strategy: Strategy::default(),
            seed: None,
        }
    }
}

impl SearchOptions {
    /// Reject options no search can run with
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth == 0 {
            return Err(SearchError::InvalidDepth { depth: self.depth });
        }

        Ok(())
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = ""))]
/// This is the struct that wraps an evaluation function and a random source and can be used to
/// pick the maximizer's move, one state at a time
///
/// It also outputs traces using the [tracing] crate.
pub struct SearchAgent<EvaluatorType, R = StdRng> {
    options: SearchOptions,
    #[derivative(Debug = "ignore")]
    evaluator: EvaluatorType,
    #[derivative(Debug = "ignore")]
    rng: R,
}

impl<EvaluatorType> SearchAgent<EvaluatorType, StdRng> {
    /// Construct a new `SearchAgent`
    ///
    /// Ties are broken with a [StdRng] seeded from [SearchOptions::seed], or from entropy when
    /// there is no seed.
    ///
    /// ```rust
    /// use multiagent_minimax::{EvaluationFunction, SearchAgent, SearchError, SearchOptions};
    ///
    /// let options = SearchOptions {
    ///     depth: 0,
    ///     ..Default::default()
    /// };
    ///
    /// assert_eq!(
    ///     SearchAgent::new(options, EvaluationFunction::Score).unwrap_err(),
    ///     SearchError::InvalidDepth { depth: 0 }
    /// );
    /// ```
    pub fn new(options: SearchOptions, evaluator: EvaluatorType) -> Result<Self, SearchError> {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::with_rng(options, evaluator, rng)
    }
}

impl<EvaluatorType, R: Rng> SearchAgent<EvaluatorType, R> {
    /// Construct a `SearchAgent` that breaks ties with `rng`, ignoring [SearchOptions::seed]
    pub fn with_rng(
        options: SearchOptions,
        evaluator: EvaluatorType,
        rng: R,
    ) -> Result<Self, SearchError> {
        options.validate()?;

        Ok(Self {
            options,
            evaluator,
            rng,
        })
    }

    #[allow(missing_docs)]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    #[allow(missing_docs)]
    pub fn evaluator(&self) -> &EvaluatorType {
        &self.evaluator
    }

    /// Search `state` and report the chosen action along with its value and the search counters
    pub fn search<GameType>(
        &mut self,
        state: &GameType,
    ) -> Result<SearchOutcome<GameType::ActionType>, SearchError>
    where
        GameType: SearchableGame,
        EvaluatorType: Evaluator<GameType>,
    {
        run_search(
            state,
            self.options.depth,
            self.options.strategy,
            &self.evaluator,
            &mut self.rng,
        )
    }

    /// Pick the maximizer's next action
    ///
    /// Returns `Ok(None)` when the maximizer has no legal actions in `state`.
    pub fn choose_action<GameType>(
        &mut self,
        state: &GameType,
    ) -> Result<Option<GameType::ActionType>, SearchError>
    where
        GameType: SearchableGame,
        EvaluatorType: Evaluator<GameType>,
    {
        Ok(self.search(state)?.action)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use types::{
        tree_representation::GameTree,
        types::{Direction, ScoreGettableGame},
    };

    use super::*;
    use crate::ScoreEvaluation;

    fn tied_tree() -> GameTree {
        GameTree::from_json(
            r#"{
                "num_agents": 2,
                "root": { "children": [
                    { "action": "north", "children": [ { "action": "stop", "score": 1 } ] },
                    { "action": "south", "children": [ { "action": "stop", "score": 1 } ] },
                    { "action": "east", "children": [ { "action": "stop", "score": 1 } ] },
                    { "action": "west", "children": [ { "action": "stop", "score": 0 } ] }
                ] }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_seeded_agents_agree() {
        let options = SearchOptions {
            depth: 1,
            strategy: Strategy::AlphaBeta,
            seed: Some(1234),
        };
        let tree = tied_tree();

        let mut first = SearchAgent::new(options, ScoreEvaluation).unwrap();
        let mut second = SearchAgent::new(options, ScoreEvaluation).unwrap();

        for _ in 0..10 {
            let action = first.choose_action(&tree).unwrap();

            assert_eq!(action, second.choose_action(&tree).unwrap());
            assert_ne!(action, Some(Direction::West));
        }
    }

    #[test]
    fn test_with_rng() {
        let options = SearchOptions {
            depth: 1,
            ..Default::default()
        };
        let mut agent =
            SearchAgent::with_rng(options, ScoreEvaluation, StepRng::new(0, 0)).unwrap();

        let outcome = agent.search(&tied_tree()).unwrap();

        assert_eq!(outcome.value, 1.0);
        assert!(matches!(
            outcome.action,
            Some(Direction::North | Direction::South | Direction::East)
        ));
    }

    #[test]
    fn test_closure_evaluator() {
        let options = SearchOptions {
            depth: 1,
            strategy: Strategy::Minimax,
            seed: Some(0),
        };
        let mut agent =
            SearchAgent::new(options, |state: &GameTree| -state.score()).unwrap();

        assert_eq!(
            agent.choose_action(&tied_tree()).unwrap(),
            Some(Direction::West)
        );
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let options = SearchOptions {
            depth: 0,
            ..Default::default()
        };

        assert_eq!(
            options.validate(),
            Err(SearchError::InvalidDepth { depth: 0 })
        );
        assert!(SearchAgent::with_rng(options, ScoreEvaluation, StepRng::new(0, 1)).is_err());
    }

    #[test]
    fn test_options_from_json() {
        let options: SearchOptions =
            serde_json::from_str(r#"{ "depth": 3, "strategy": "alpha-beta", "seed": 9 }"#)
                .unwrap();

        assert_eq!(
            options,
            SearchOptions {
                depth: 3,
                strategy: Strategy::AlphaBeta,
                seed: Some(9),
            }
        );

        let options: SearchOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SearchOptions::default());
    }

    #[test]
    fn test_debug_skips_evaluator_and_rng() {
        let agent = SearchAgent::new(SearchOptions::default(), ScoreEvaluation).unwrap();
        let debug = format!("{:?}", agent);

        assert!(debug.contains("SearchAgent"));
        assert!(debug.contains("depth: 2"));
        assert!(!debug.contains("rng"));
    }
}
