use criterion::{black_box, criterion_group, criterion_main, Criterion};
use multiagent_minimax::{ScoreEvaluation, SearchAgent, SearchOptions, Strategy};
use rand::{rngs::StdRng, Rng, SeedableRng};
use types::{
    tree_representation::{GameTree, WireNode, WireTree},
    types::Direction,
};

/// A complete tree where every node has `branching` children, with scores that vary from leaf to
/// leaf so pruning has something to work with
fn wide_tree(num_agents: usize, branching: usize, height: usize) -> GameTree {
    fn build(
        action: Option<Direction>,
        branching: usize,
        height: usize,
        rng: &mut StdRng,
    ) -> WireNode {
        if height == 0 {
            return WireNode {
                action,
                score: f64::from(rng.gen_range(0..64_u32)),
                ..Default::default()
            };
        }

        WireNode {
            action,
            children: Direction::all()
                .into_iter()
                .take(branching)
                .map(|child| build(Some(child), branching, height - 1, rng))
                .collect(),
            ..Default::default()
        }
    }

    let mut rng = StdRng::seed_from_u64(7);
    let root = build(None, branching, height, &mut rng);

    GameTree::from_wire(&WireTree { num_agents, root }).unwrap()
}

fn bench_strategies(c: &mut Criterion, name: &str, tree: &GameTree, depth: usize) {
    let mut group = c.benchmark_group(name);

    for strategy in Strategy::all() {
        group.bench_function(strategy.to_string(), |b| {
            let options = SearchOptions {
                depth,
                strategy,
                seed: Some(0),
            };
            let mut agent = SearchAgent::new(options, ScoreEvaluation).unwrap();

            b.iter(|| agent.search(black_box(tree)).unwrap())
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let fixture =
        GameTree::from_json(include_str!("../fixtures/two_agent_depth_two.json")).unwrap();
    bench_strategies(c, "Fixture: two agents, depth 2", &fixture, 2);

    let two_agents = wide_tree(2, 5, 6);
    bench_strategies(c, "Wide: two agents, depth 3", &two_agents, 3);

    let four_agents = wide_tree(4, 4, 8);
    bench_strategies(c, "Wide: four agents, depth 2", &four_agents, 2);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
