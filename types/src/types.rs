//! Capability traits a game implements so it can be searched, along with the small value types
//! they trade in.
//!
//! Games are treated as values: every transition returns a new state and nothing in here takes
//! `&mut self`.

use std::{fmt, fmt::Debug, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// Index of an agent in the turn order. `0` is always the maximizer
pub type AgentIndex = usize;

/// The agent whose move the search ultimately returns
pub const MAXIMIZER: AgentIndex = 0;

/// The action alphabet of the grid games this crate was built around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[allow(missing_docs)]
    North,
    #[allow(missing_docs)]
    South,
    #[allow(missing_docs)]
    East,
    #[allow(missing_docs)]
    West,
    /// Stay in place
    Stop,
}

impl Direction {
    /// Every direction, in a fixed order
    pub const fn all() -> [Direction; 5] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Stop,
        ]
    }

    /// Position of this direction inside [Direction::all()]
    pub fn as_index(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
            Direction::Stop => 4,
        }
    }

    /// The `(dx, dy)` offset of taking this direction, with north being `+y`
    pub fn to_vector(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        };

        write!(f, "{name}")
    }
}

impl FromStr for Direction {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::all()
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TypesError::UnknownDirection(s.to_owned()))
    }
}

/// A square on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Position {
    #[allow(missing_docs)]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Sum of the absolute coordinate differences
    ///
    /// Widened to `u64` so opposite corners of the `i32` plane still fit
    pub fn manhattan_distance(&self, other: &Position) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// The square reached by moving one step in `direction`
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.to_vector();

        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A game that knows how many agents take part
pub trait AgentCountableGame {
    /// Total number of agents, the maximizer included
    fn num_agents(&self) -> usize;
}

/// A game that can list the moves available to an agent
pub trait ActionableGame {
    /// The token identifying a move
    type ActionType: Copy + Eq + Debug;

    /// The legal moves for `agent` in this state. An empty list means the state is terminal for
    /// that agent
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::ActionType>;
}

/// A game that can produce the state following a move
pub trait SuccessorGame: ActionableGame + Sized {
    /// The state after `agent` plays `action`. `action` must be one of the legal actions for
    /// `agent`
    fn successor(&self, agent: AgentIndex, action: Self::ActionType) -> Self;

    /// The state after the maximizer plays `action`
    ///
    /// Games with a cheaper specialized transition for the maximizer can override this; it must
    /// behave exactly like `successor(MAXIMIZER, action)`
    fn maximizer_successor(&self, action: Self::ActionType) -> Self {
        self.successor(MAXIMIZER, action)
    }
}

/// A game with a running numeric score
pub trait ScoreGettableGame {
    /// The current score, from the maximizer's point of view
    fn score(&self) -> f64;
}

/// A game that can tell whether the maximizer has won or lost
pub trait VictorDeterminableGame {
    #[allow(missing_docs)]
    fn is_win(&self) -> bool;
    #[allow(missing_docs)]
    fn is_lose(&self) -> bool;

    /// Whether the game has been decided either way
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// A game on a grid where agents have positions
pub trait PositionGettableGame {
    /// Where the maximizer currently stands
    fn maximizer_position(&self) -> Position;

    /// Where every adversary currently stands, ordered by agent index starting at agent `1`
    fn adversary_positions(&self) -> Vec<Position>;
}

/// A grid game with food and capsules left to collect
pub trait FoodGettableGame {
    /// Squares that still hold food
    fn food_positions(&self) -> Vec<Position>;

    /// Squares that still hold a capsule
    fn capsule_positions(&self) -> Vec<Position>;
}

/// Everything the tree search needs from a game
pub trait SearchableGame: AgentCountableGame + SuccessorGame + ScoreGettableGame {}

impl<T> SearchableGame for T where T: AgentCountableGame + SuccessorGame + ScoreGettableGame {}

/// A searchable game that also exposes the grid, which the heuristic evaluation reads
pub trait GridGame:
    SearchableGame + VictorDeterminableGame + PositionGettableGame + FoodGettableGame
{
}

impl<T> GridGame for T where
    T: SearchableGame + VictorDeterminableGame + PositionGettableGame + FoodGettableGame
{
}
