use std::fmt::Debug;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
/// This is returned from every node the search visits
pub enum SearchReturn<ActionType> {
    /// A node that was expanded, along with the action chosen at it
    Node {
        /// The value of the node under the strategy's combination rule
        value: f64,
        /// The chosen action
        ///
        /// For a max or min node this is one of the actions attaining `value`. For an expectimax
        /// adversary it is drawn uniformly from every legal action and does not attain `value`.
        action: ActionType,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we run out of plies or when the moving agent has no legal actions
    Leaf {
        #[allow(missing_docs)]
        value: f64,
    },
}

impl<ActionType: Copy> SearchReturn<ActionType> {
    /// Returns the value of this node
    pub fn value(&self) -> f64 {
        match self {
            SearchReturn::Node { value, .. } => *value,
            SearchReturn::Leaf { value } => *value,
        }
    }

    /// Returns the chosen action, or `None` for a leaf
    pub fn action(&self) -> Option<ActionType> {
        match self {
            SearchReturn::Node { action, .. } => Some(*action),
            SearchReturn::Leaf { .. } => None,
        }
    }

    #[allow(missing_docs)]
    pub fn is_leaf(&self) -> bool {
        matches!(self, SearchReturn::Leaf { .. })
    }
}

/// Counters collected over one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SearchStats {
    /// Nodes whose legal actions were generated and searched
    pub nodes_expanded: usize,
    /// Nodes handed to the evaluation function
    pub leaves_evaluated: usize,
    /// Times a node stopped early because its alpha-beta window closed
    pub cutoffs: usize,
}

impl SearchStats {
    /// Every node the search touched, expanded or evaluated
    pub fn nodes_visited(&self) -> usize {
        self.nodes_expanded + self.leaves_evaluated
    }
}

/// The result of a whole search from the root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome<ActionType> {
    /// The value of the root
    pub value: f64,
    /// The maximizer's chosen action, `None` when it had no legal actions at the root
    pub action: Option<ActionType>,
    #[allow(missing_docs)]
    pub stats: SearchStats,
}

impl<ActionType: Copy + Debug> SearchOutcome<ActionType> {
    pub(crate) fn from_root(root: SearchReturn<ActionType>, stats: SearchStats) -> Self {
        Self {
            value: root.value(),
            action: root.action(),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use types::types::Direction;

    use super::*;

    #[test]
    fn test_leaf_has_no_action() {
        let leaf: SearchReturn<Direction> = SearchReturn::Leaf { value: 3.5 };

        assert!(leaf.is_leaf());
        assert_eq!(leaf.value(), 3.5);
        assert_eq!(leaf.action(), None);
    }

    #[test]
    fn test_node_accessors() {
        let node = SearchReturn::Node {
            value: -2.0,
            action: Direction::West,
        };

        assert!(!node.is_leaf());
        assert_eq!(node.value(), -2.0);
        assert_eq!(node.action(), Some(Direction::West));
    }

    #[test]
    fn test_outcome_from_root() {
        let stats = SearchStats {
            nodes_expanded: 3,
            leaves_evaluated: 4,
            cutoffs: 1,
        };
        let outcome = SearchOutcome::from_root(
            SearchReturn::Node {
                value: 1.0,
                action: Direction::North,
            },
            stats,
        );

        assert_eq!(outcome.action, Some(Direction::North));
        assert_eq!(outcome.value, 1.0);
        assert_eq!(outcome.stats.nodes_visited(), 7);
    }
}
