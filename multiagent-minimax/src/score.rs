//! Static evaluation of a game state, used wherever the search stops expanding.
//!
//! Every evaluator here is a pure function of the state it is given: nothing is cached and nothing
//! is written back, so evaluating the same state twice always gives the same number.

use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use types::types::{
    FoodGettableGame, GridGame, PositionGettableGame, ScoreGettableGame, VictorDeterminableGame,
};

use crate::SearchError;

/// This trait is used to control something that can return a value from a game state
///
/// Any `Fn(&GameType) -> f64` is an evaluator, so closures can be passed straight to the search.
pub trait Evaluator<GameType> {
    /// Convert the given game state into a value, higher being better for the maximizer
    fn evaluate(&self, game: &GameType) -> f64;
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Evaluator<GameType> for FnLike {
    fn evaluate(&self, game: &GameType) -> f64 {
        (self)(game)
    }
}

/// Values a state by its current game score and nothing else
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreEvaluation;

impl<GameType: ScoreGettableGame> Evaluator<GameType> for ScoreEvaluation {
    fn evaluate(&self, game: &GameType) -> f64 {
        game.score()
    }
}

/// Tunable constants of [HeuristicEvaluation]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use multiagent_minimax::HeuristicWeights;
///
/// let defaults: HeuristicWeights = Default::default();
///
/// assert_eq!(defaults.loss_penalty, 100.0);
/// assert_eq!(defaults.proximity_threshold, 6);
/// assert_eq!(defaults.food_distance_weight, 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Subtracted once when the state is lost
    ///
    /// Defaults to 100
    pub loss_penalty: f64,
    /// Subtracted for every adversary standing on the maximizer's square
    ///
    /// Defaults to 100
    pub collision_penalty: f64,
    /// Adversaries count as close when their summed Manhattan distance to the maximizer is below
    /// this
    ///
    /// Defaults to 6
    pub proximity_threshold: u32,
    /// When adversaries are close, `proximity_weight / summed distance` is subtracted
    ///
    /// Defaults to 50
    pub proximity_weight: f64,
    /// `food_count_bonus / (remaining food + 1)` is added, so clearing food pays off
    ///
    /// Defaults to 120
    pub food_count_bonus: f64,
    /// Cost per square of Manhattan distance to each remaining food
    ///
    /// Defaults to 10
    pub food_distance_weight: f64,
    /// Cost per square of Manhattan distance to each remaining capsule
    ///
    /// Defaults to 5
    pub capsule_distance_weight: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            loss_penalty: 100.0,
            collision_penalty: 100.0,
            proximity_threshold: 6,
            proximity_weight: 50.0,
            food_count_bonus: 120.0,
            food_distance_weight: 10.0,
            capsule_distance_weight: 5.0,
        }
    }
}

/// A hand-tuned evaluation for grid games with food, capsules and chasing adversaries
///
/// The value is the game score plus an adjustment: food and capsules further away cost more,
/// fewer food left is worth more, adversaries close by cost sharply more, and a lost state is
/// penalised on top of whatever the game already does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeuristicEvaluation {
    #[allow(missing_docs)]
    pub weights: HeuristicWeights,
}

impl HeuristicEvaluation {
    #[allow(missing_docs)]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    /// The amount added to the game score for `game`
    pub fn adjustment<GameType>(&self, game: &GameType) -> f64
    where
        GameType: VictorDeterminableGame + PositionGettableGame + FoodGettableGame,
    {
        let weights = &self.weights;
        let me = game.maximizer_position();
        let mut adjustment = 0.0;

        if game.is_lose() {
            adjustment -= weights.loss_penalty;
        }

        let adversary_distances = game
            .adversary_positions()
            .iter()
            .map(|p| me.manhattan_distance(p))
            .collect_vec();

        let collisions = adversary_distances.iter().filter(|&&d| d == 0).count();
        adjustment -= weights.collision_penalty * collisions as f64;

        let total_adversary_distance: u64 = adversary_distances.iter().sum();
        if !adversary_distances.is_empty()
            && total_adversary_distance < u64::from(weights.proximity_threshold)
        {
            adjustment -= weights.proximity_weight / total_adversary_distance.max(1) as f64;
        }

        let food = game.food_positions();
        adjustment += weights.food_count_bonus / (food.len() as f64 + 1.0);

        // Summed as f64, any number of far-away squares stays finite
        let food_distance: f64 = food
            .iter()
            .map(|f| me.manhattan_distance(f) as f64)
            .sum();
        let capsule_distance: f64 = game
            .capsule_positions()
            .iter()
            .map(|c| me.manhattan_distance(c) as f64)
            .sum();

        adjustment -= weights.food_distance_weight * food_distance
            + weights.capsule_distance_weight * capsule_distance;

        adjustment
    }
}

impl<GameType> Evaluator<GameType> for HeuristicEvaluation
where
    GameType: ScoreGettableGame + VictorDeterminableGame + PositionGettableGame + FoodGettableGame,
{
    fn evaluate(&self, game: &GameType) -> f64 {
        game.score() + self.adjustment(game)
    }
}

/// The evaluation functions that can be picked by name when configuring a search
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationFunction {
    /// See [ScoreEvaluation]
    #[default]
    Score,
    /// See [HeuristicEvaluation]
    Heuristic(HeuristicWeights),
}

impl<GameType: GridGame> Evaluator<GameType> for EvaluationFunction {
    fn evaluate(&self, game: &GameType) -> f64 {
        match self {
            EvaluationFunction::Score => ScoreEvaluation.evaluate(game),
            EvaluationFunction::Heuristic(weights) => {
                HeuristicEvaluation::new(*weights).evaluate(game)
            }
        }
    }
}

impl fmt::Display for EvaluationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationFunction::Score => write!(f, "score"),
            EvaluationFunction::Heuristic(_) => write!(f, "heuristic"),
        }
    }
}

impl FromStr for EvaluationFunction {
    type Err = SearchError;

    /// Parses `score` or `heuristic`; the heuristic gets the default weights
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(EvaluationFunction::Score),
            "heuristic" => Ok(EvaluationFunction::Heuristic(HeuristicWeights::default())),
            _ => Err(SearchError::UnknownEvaluation(s.to_owned())),
        }
    }
}
