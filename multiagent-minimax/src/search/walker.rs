use rand::Rng;
use tracing::{debug, info, info_span, trace};
use types::types::{AgentIndex, SearchableGame, MAXIMIZER};

use crate::{
    score::Evaluator,
    select::{choose_uniform, Extremum, TiePool},
    turn::{Plies, TurnOrder},
    SearchError,
};

use super::{NodeRule, SearchOutcome, SearchReturn, SearchStats, Strategy};

/// The alpha-beta window, passed down by value
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) alpha: f64,
    pub(crate) beta: f64,
}

impl Bounds {
    pub(crate) fn unbounded() -> Self {
        Self {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        }
    }

    /// Fold a child's value into the bound owned by the moving side
    pub(crate) fn tighten(self, extremum: Extremum, value: f64) -> Self {
        match extremum {
            Extremum::Max => Self {
                alpha: self.alpha.max(value),
                ..self
            },
            Extremum::Min => Self {
                beta: self.beta.min(value),
                ..self
            },
        }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.alpha >= self.beta
    }
}

/// One depth-first walk over the game tree
pub(crate) struct Searcher<'a, EvaluatorType, R: Rng + ?Sized> {
    strategy: Strategy,
    turn_order: TurnOrder,
    evaluator: &'a EvaluatorType,
    rng: &'a mut R,
    stats: SearchStats,
}

impl<'a, EvaluatorType, R: Rng + ?Sized> Searcher<'a, EvaluatorType, R> {
    pub(crate) fn new(
        strategy: Strategy,
        turn_order: TurnOrder,
        evaluator: &'a EvaluatorType,
        rng: &'a mut R,
    ) -> Self {
        Self {
            strategy,
            turn_order,
            evaluator,
            rng,
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Value `node`, where `agent` is about to move with `plies` left in the budget
    pub(crate) fn search<GameType>(
        &mut self,
        node: &GameType,
        plies: Plies,
        agent: AgentIndex,
        bounds: Bounds,
    ) -> SearchReturn<GameType::ActionType>
    where
        GameType: SearchableGame,
        EvaluatorType: Evaluator<GameType>,
    {
        if plies.is_cutoff() {
            return self.leaf(node);
        }

        let actions = node.legal_actions(agent);
        if actions.is_empty() {
            return self.leaf(node);
        }

        self.stats.nodes_expanded += 1;

        let child_plies = plies.consume();
        match self.strategy.node_rule(agent) {
            NodeRule::MaxWithTieBreak => {
                self.extremum_node(node, actions, agent, child_plies, bounds, Extremum::Max)
            }
            NodeRule::MinWithTieBreak => {
                self.extremum_node(node, actions, agent, child_plies, bounds, Extremum::Min)
            }
            NodeRule::Mean => self.mean_node(node, actions, agent, child_plies, bounds),
        }
    }

    /// Who moves below a node where `agent` moves, checking that the budget only runs out when
    /// a round closes
    fn next_agent(&self, agent: AgentIndex, child_plies: Plies) -> AgentIndex {
        let turn = self.turn_order.next(agent);
        debug_assert!(
            !child_plies.is_cutoff() || turn.round_complete,
            "search cut off mid-round below agent {agent}"
        );

        turn.agent
    }

    fn leaf<GameType>(&mut self, node: &GameType) -> SearchReturn<GameType::ActionType>
    where
        GameType: SearchableGame,
        EvaluatorType: Evaluator<GameType>,
    {
        self.stats.leaves_evaluated += 1;

        SearchReturn::Leaf {
            value: self.evaluator.evaluate(node),
        }
    }

    fn extremum_node<GameType>(
        &mut self,
        node: &GameType,
        actions: Vec<GameType::ActionType>,
        agent: AgentIndex,
        child_plies: Plies,
        bounds: Bounds,
        extremum: Extremum,
    ) -> SearchReturn<GameType::ActionType>
    where
        GameType: SearchableGame,
        EvaluatorType: Evaluator<GameType>,
    {
        let next_agent = self.next_agent(agent, child_plies);
        let mut bounds = bounds;
        let mut pool = TiePool::new(extremum);

        for action in actions {
            let child = successor(node, agent, action);
            let value = self.search(&child, child_plies, next_agent, bounds).value();
            pool.offer(action, value);

            if self.strategy.prunes() {
                bounds = bounds.tighten(extremum, value);

                if bounds.is_exhausted() {
                    self.stats.cutoffs += 1;
                    trace!(
                        agent,
                        value,
                        alpha = bounds.alpha,
                        beta = bounds.beta,
                        "pruning remaining actions"
                    );
                    break;
                }
            }
        }

        match pool.choose(&mut *self.rng) {
            Some((value, action)) => SearchReturn::Node { value, action },
            None => self.leaf(node),
        }
    }

    fn mean_node<GameType>(
        &mut self,
        node: &GameType,
        actions: Vec<GameType::ActionType>,
        agent: AgentIndex,
        child_plies: Plies,
        bounds: Bounds,
    ) -> SearchReturn<GameType::ActionType>
    where
        GameType: SearchableGame,
        EvaluatorType: Evaluator<GameType>,
    {
        let next_agent = self.next_agent(agent, child_plies);

        let total: f64 = actions
            .iter()
            .map(|action| {
                let child = successor(node, agent, *action);
                self.search(&child, child_plies, next_agent, bounds).value()
            })
            .sum();
        let value = total / actions.len() as f64;

        match choose_uniform(&actions, &mut *self.rng) {
            Some(action) => SearchReturn::Node { value, action },
            None => self.leaf(node),
        }
    }
}

fn successor<GameType: SearchableGame>(
    node: &GameType,
    agent: AgentIndex,
    action: GameType::ActionType,
) -> GameType {
    if agent == MAXIMIZER {
        node.maximizer_successor(action)
    } else {
        node.successor(agent, action)
    }
}

/// Validate the configuration, then search `state` for the maximizer
///
/// The span opened here carries the chosen value and action and the search counters once the
/// walk is done.
pub(crate) fn run_search<GameType, EvaluatorType, R>(
    state: &GameType,
    depth: usize,
    strategy: Strategy,
    evaluator: &EvaluatorType,
    rng: &mut R,
) -> Result<SearchOutcome<GameType::ActionType>, SearchError>
where
    GameType: SearchableGame,
    EvaluatorType: Evaluator<GameType>,
    R: Rng + ?Sized,
{
    let num_agents = state.num_agents();
    let plies = Plies::for_depth(depth, num_agents)?;
    let turn_order = TurnOrder::new(num_agents)?;

    info_span!(
        "choose_action",
        %strategy,
        depth,
        num_agents,
        chosen_value = tracing::field::Empty,
        chosen_action = tracing::field::Empty,
        nodes_expanded = tracing::field::Empty,
        leaves_evaluated = tracing::field::Empty,
        cutoffs = tracing::field::Empty,
    )
    .in_scope(|| {
        let mut searcher = Searcher::new(strategy, turn_order, evaluator, rng);
        let root = searcher.search(state, plies, MAXIMIZER, Bounds::unbounded());

        if root.is_leaf() {
            debug!("the maximizer has no legal actions at the root");
        }

        let outcome = SearchOutcome::from_root(root, searcher.stats());

        let current_span = tracing::Span::current();
        current_span.record("chosen_value", outcome.value);
        current_span.record(
            "chosen_action",
            format!("{:?}", outcome.action).as_str(),
        );
        current_span.record("nodes_expanded", outcome.stats.nodes_expanded);
        current_span.record("leaves_evaluated", outcome.stats.leaves_evaluated);
        current_span.record("cutoffs", outcome.stats.cutoffs);

        info!(
            value = outcome.value,
            nodes_visited = outcome.stats.nodes_visited(),
            "finished search"
        );

        Ok(outcome)
    })
}
