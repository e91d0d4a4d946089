//! Picking an action among equally good ones.
//!
//! Ties are always broken with a fresh draw from the caller's random source, never by position,
//! so a seeded source makes the whole search reproducible while an unseeded one spreads the
//! choices over every tied action.

use rand::{seq::SliceRandom, Rng};

/// Which end of the value range a node is after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extremum {
    #[allow(missing_docs)]
    Max,
    #[allow(missing_docs)]
    Min,
}

impl Extremum {
    /// The starting value that every real value ties or beats
    pub fn worst(self) -> f64 {
        match self {
            Extremum::Max => f64::NEG_INFINITY,
            Extremum::Min => f64::INFINITY,
        }
    }

    /// Whether `value` is strictly better than `best`
    pub fn improves(self, value: f64, best: f64) -> bool {
        match self {
            Extremum::Max => value > best,
            Extremum::Min => value < best,
        }
    }
}

/// Streaming collection of the actions that attain the best value seen so far
///
/// Offering a strictly better value resets the pool; offering an equal value joins it. Values are
/// compared exactly, with no tolerance.
#[derive(Debug, Clone)]
pub struct TiePool<ActionType> {
    extremum: Extremum,
    best: f64,
    pool: Vec<ActionType>,
    // Only filled while the pool is empty, i.e. every value so far was NaN
    unranked: Vec<ActionType>,
}

impl<ActionType: Copy> TiePool<ActionType> {
    #[allow(missing_docs)]
    pub fn new(extremum: Extremum) -> Self {
        Self {
            extremum,
            best: extremum.worst(),
            pool: vec![],
            unranked: vec![],
        }
    }

    /// Consider `action`, worth `value`
    pub fn offer(&mut self, action: ActionType, value: f64) {
        if self.extremum.improves(value, self.best) {
            self.best = value;
            self.pool.clear();
            self.pool.push(action);
            self.unranked.clear();
        } else if value == self.best {
            self.pool.push(action);
            self.unranked.clear();
        } else if self.pool.is_empty() {
            self.unranked.push(action);
        }
    }

    /// The actions currently tied for best
    pub fn tied(&self) -> &[ActionType] {
        &self.pool
    }

    /// Draw one of the best actions uniformly at random, along with its value
    ///
    /// Returns `None` when nothing was offered. When every offered value was NaN nothing ever
    /// entered the pool; the value is then NaN and the action is drawn from everything offered.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(f64, ActionType)> {
        if let Some(action) = self.pool.choose(rng) {
            return Some((self.best, *action));
        }

        self.unranked.choose(rng).map(|action| (f64::NAN, *action))
    }
}

/// Pick uniformly at random among the candidates attaining the extremum value
pub fn select<ActionType, R>(
    candidates: impl IntoIterator<Item = (ActionType, f64)>,
    extremum: Extremum,
    rng: &mut R,
) -> Option<(f64, ActionType)>
where
    ActionType: Copy,
    R: Rng + ?Sized,
{
    let mut pool = TiePool::new(extremum);
    for (action, value) in candidates {
        pool.offer(action, value);
    }

    pool.choose(rng)
}

/// Pick any of `actions` uniformly at random, ignoring value
pub fn choose_uniform<ActionType, R>(actions: &[ActionType], rng: &mut R) -> Option<ActionType>
where
    ActionType: Copy,
    R: Rng + ?Sized,
{
    actions.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{rngs::StdRng, SeedableRng};
    use types::types::Direction;

    use super::*;

    #[test]
    fn test_select_max_and_min() {
        let mut rng = StdRng::seed_from_u64(7);
        let candidates = vec![
            (Direction::North, 3.0),
            (Direction::South, 9.0),
            (Direction::East, -1.0),
        ];

        assert_eq!(
            select(candidates.clone(), Extremum::Max, &mut rng),
            Some((9.0, Direction::South))
        );
        assert_eq!(
            select(candidates, Extremum::Min, &mut rng),
            Some((-1.0, Direction::East))
        );
    }

    #[test]
    fn test_better_value_resets_the_pool() {
        let mut pool = TiePool::new(Extremum::Max);
        pool.offer(Direction::North, 2.0);
        pool.offer(Direction::South, 2.0);
        assert_eq!(pool.tied(), &[Direction::North, Direction::South]);

        pool.offer(Direction::East, 5.0);
        assert_eq!(pool.tied(), &[Direction::East]);

        pool.offer(Direction::West, 5.0);
        pool.offer(Direction::Stop, 4.0);
        assert_eq!(pool.tied(), &[Direction::East, Direction::West]);
    }

    #[test]
    fn test_infinite_values_still_tie() {
        let mut pool = TiePool::new(Extremum::Max);
        pool.offer(Direction::North, f64::NEG_INFINITY);
        pool.offer(Direction::South, f64::NEG_INFINITY);

        assert_eq!(pool.tied(), &[Direction::North, Direction::South]);

        let mut pool = TiePool::new(Extremum::Min);
        pool.offer(Direction::North, 1.0);
        pool.offer(Direction::South, f64::NEG_INFINITY);

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pool.choose(&mut rng), Some((f64::NEG_INFINITY, Direction::South)));
    }

    #[test]
    fn test_nan_values_fall_back_to_any_offered_action() {
        let mut rng = StdRng::seed_from_u64(3);
        let chosen = select(
            vec![(Direction::North, f64::NAN), (Direction::South, f64::NAN)],
            Extremum::Max,
            &mut rng,
        );

        let (value, action) = chosen.unwrap();
        assert!(value.is_nan());
        assert!(matches!(action, Direction::North | Direction::South));
    }

    #[test]
    fn test_only_nan_offers_are_kept_aside() {
        let mut pool = TiePool::new(Extremum::Min);
        pool.offer(Direction::North, f64::NAN);
        assert_eq!(pool.unranked, vec![Direction::North]);

        pool.offer(Direction::South, 4.0);
        pool.offer(Direction::East, f64::NAN);
        pool.offer(Direction::West, 7.0);
        assert!(pool.unranked.is_empty());
        assert_eq!(pool.tied(), &[Direction::South]);

        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(pool.choose(&mut rng), Some((4.0, Direction::South)));
    }

    #[test]
    fn test_nothing_offered() {
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(
            select(Vec::<(Direction, f64)>::new(), Extremum::Min, &mut rng),
            None
        );
        assert_eq!(choose_uniform::<Direction, _>(&[], &mut rng), None);
    }

    #[test]
    fn test_ties_are_reproducible_with_a_seed() {
        let candidates = vec![
            (Direction::North, 1.0),
            (Direction::South, 1.0),
            (Direction::East, 1.0),
            (Direction::West, 1.0),
        ];

        let draws = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| select(candidates.clone(), Extremum::Max, &mut rng).unwrap().1)
                .collect::<Vec<_>>()
        };

        assert_eq!(draws(42), draws(42));
    }

    #[test]
    fn test_every_tied_action_gets_chosen() {
        let mut rng = StdRng::seed_from_u64(11);
        let candidates = vec![
            (Direction::North, 1.0),
            (Direction::South, 0.0),
            (Direction::East, 1.0),
            (Direction::West, 1.0),
        ];

        let mut counts: HashMap<Direction, usize> = HashMap::new();
        for _ in 0..600 {
            let (_, action) = select(candidates.clone(), Extremum::Max, &mut rng).unwrap();
            *counts.entry(action).or_default() += 1;
        }

        assert_eq!(counts.get(&Direction::South), None);
        for action in [Direction::North, Direction::East, Direction::West] {
            assert!(counts[&action] > 100, "{action} chosen {:?}", counts);
        }
    }

    #[test]
    fn test_choose_uniform_covers_everything() {
        let mut rng = StdRng::seed_from_u64(5);
        let actions = Direction::all();

        let mut seen = [false; 5];
        for _ in 0..200 {
            let action = choose_uniform(&actions, &mut rng).unwrap();
            seen[action.as_index()] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }
}
