//! An explicit, fully spelled-out game tree.
//!
//! This is not a game simulation: every reachable state is written down ahead of time, usually in
//! a JSON fixture. It implements the search traits so the search can be exercised (and debugged)
//! against trees whose optimal values are known by hand.
//!
//! ```rust
//! use types::{tree_representation::GameTree, types::*};
//!
//! let tree = GameTree::from_json(r#"{
//!     "num_agents": 2,
//!     "root": {
//!         "children": [
//!             { "action": "west", "score": 3 },
//!             { "action": "east", "score": 8, "win": true }
//!         ]
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(tree.legal_actions(MAXIMIZER), vec![Direction::West, Direction::East]);
//! assert_eq!(tree.successor(MAXIMIZER, Direction::East).score(), 8.0);
//! assert!(tree.successor(MAXIMIZER, Direction::East).is_win());
//! ```
//!
//! The children of a node belong to whichever agent is asked about that node; the tree does not
//! record whose turn it is. The search asks in a fixed turn order, so a fixture just has to be
//! written with that order in mind.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use text_trees::StringTreeNode;

use crate::{
    types::{
        ActionableGame, AgentCountableGame, AgentIndex, Direction, ScoreGettableGame,
        SuccessorGame, VictorDeterminableGame,
    },
    TypesError,
};

/// The on-disk representation of a [GameTree]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTree {
    /// Number of agents taking turns in the tree
    pub num_agents: usize,
    #[allow(missing_docs)]
    pub root: WireNode,
}

/// A node of a [WireTree]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireNode {
    /// The action leading from the parent to this node. Only the root may leave it out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Direction>,
    /// The game score in this state
    #[serde(default)]
    pub score: f64,
    #[allow(missing_docs)]
    #[serde(default)]
    pub win: bool,
    #[allow(missing_docs)]
    #[serde(default)]
    pub lose: bool,
    /// The states reachable from this one. Leaving this empty makes the node terminal
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WireNode>,
}

#[derive(Debug, Clone, PartialEq)]
struct TreeNode {
    score: f64,
    win: bool,
    lose: bool,
    children: Vec<(Direction, usize)>,
}

impl TreeNode {
    fn describe(&self) -> String {
        let outcome = if self.win {
            " (win)"
        } else if self.lose {
            " (lose)"
        } else {
            ""
        };

        format!("{:?}{}", self.score, outcome)
    }
}

/// A cursor into an explicit game tree
///
/// Cloning is cheap: all cursors share the same node storage and successors only move the cursor.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Arc<[TreeNode]>,
    num_agents: usize,
    current: usize,
}

impl GameTree {
    /// Parse a [WireTree] from JSON and build the tree
    pub fn from_json(json: &str) -> Result<Self, TypesError> {
        let wire: WireTree = serde_json::from_str(json)?;

        Self::from_wire(&wire)
    }

    /// Build the tree from its wire representation
    ///
    /// Fails if a child is missing its action, or if two siblings share an action
    pub fn from_wire(wire: &WireTree) -> Result<Self, TypesError> {
        let mut nodes = vec![];
        flatten(&wire.root, 0, &mut nodes)?;

        Ok(Self {
            nodes: nodes.into(),
            num_agents: wire.num_agents,
            current: 0,
        })
    }

    /// Total number of nodes in the whole tree, not just below the cursor
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the cursor still points at the root
    pub fn is_root(&self) -> bool {
        self.current == 0
    }

    /// Number of edges on the longest path from the cursor down to a leaf
    pub fn height(&self) -> usize {
        self.height_of(self.current)
    }

    fn height_of(&self, index: usize) -> usize {
        self.nodes[index]
            .children
            .iter()
            .map(|(_, child)| self.height_of(*child) + 1)
            .max()
            .unwrap_or(0)
    }

    /// This returns a visual representation of the tree below the cursor. Each line shows the
    /// action that leads to a node followed by the node's score
    pub fn to_text_tree(&self) -> String {
        let tree_node = self.to_text_tree_node(self.current, "".to_owned());
        format!("{}", tree_node)
    }

    fn to_text_tree_node(&self, index: usize, label: String) -> StringTreeNode {
        let node = &self.nodes[index];
        let mut tree_node = StringTreeNode::new(format!("{}{}", label, node.describe()));

        for (action, child) in &node.children {
            tree_node.push_node(self.to_text_tree_node(*child, format!("{} ", action)));
        }

        tree_node
    }

    fn node(&self) -> &TreeNode {
        &self.nodes[self.current]
    }
}

fn flatten(wire: &WireNode, depth: usize, nodes: &mut Vec<TreeNode>) -> Result<usize, TypesError> {
    let index = nodes.len();
    nodes.push(TreeNode {
        score: wire.score,
        win: wire.win,
        lose: wire.lose,
        children: vec![],
    });

    let mut children: Vec<(Direction, usize)> = Vec::with_capacity(wire.children.len());
    for child in &wire.children {
        let action = child
            .action
            .ok_or(TypesError::MissingAction { depth: depth + 1 })?;

        if children.iter().any(|(a, _)| *a == action) {
            return Err(TypesError::DuplicateAction { action });
        }

        let child_index = flatten(child, depth + 1, nodes)?;
        children.push((action, child_index));
    }

    nodes[index].children = children;

    Ok(index)
}

impl AgentCountableGame for GameTree {
    fn num_agents(&self) -> usize {
        self.num_agents
    }
}

impl ActionableGame for GameTree {
    type ActionType = Direction;

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<Direction> {
        self.node().children.iter().map(|(a, _)| *a).collect()
    }
}

impl SuccessorGame for GameTree {
    /// # Panics
    ///
    /// If `action` does not lead to a child of the current node
    fn successor(&self, _agent: AgentIndex, action: Direction) -> Self {
        let child = self
            .node()
            .children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, child)| *child);

        match child {
            Some(current) => Self {
                nodes: self.nodes.clone(),
                num_agents: self.num_agents,
                current,
            },
            None => panic!("{action} is not a legal action in this game tree"),
        }
    }
}

impl ScoreGettableGame for GameTree {
    fn score(&self) -> f64 {
        self.node().score
    }
}

impl VictorDeterminableGame for GameTree {
    fn is_win(&self) -> bool {
        self.node().win
    }

    fn is_lose(&self) -> bool {
        self.node().lose
    }
}
