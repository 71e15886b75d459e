//! Randomized backtracking DFS for long simple paths.

use crate::graph::{DivGraph, Tile};
use crate::record::{ConsoleSink, PathObserver, RecordTracker};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// ============================================================================
// Configuration
// ============================================================================

/// Search configuration parameters.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Board size: tiles are 1..=n. Must be at least 1. Recursion depth is
    /// bounded by n, so n must stay within native stack limits (tens to low
    /// hundreds is the supported range).
    pub n: usize,
    /// Optional deterministic seed. The full record sequence is a function of
    /// the seed, so it is echoed at startup for reproducibility.
    pub seed: Option<u64>,
    /// Progress display period in dead ends; `None` disables the meter.
    pub notify_every: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            n: 100,
            seed: None,
            notify_every: None,
        }
    }
}

impl SearchConfig {
    /// Rejects configurations the core must never see.
    ///
    /// # Errors
    /// Returns a message if `n` is zero or `notify_every` is `Some(0)`.
    pub fn validate(&self) -> Result<(), String> {
        if self.n == 0 {
            return Err("board size must be a positive integer".to_string());
        }
        if self.notify_every == Some(0) {
            return Err("notify period must be nonzero".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Backtracking DFS over a prebuilt divisibility graph.
///
/// Owns the path buffer and visited flags for the run; both follow a strict
/// push-on-descend / pop-on-backtrack discipline, so they are restored exactly
/// before every recursive call returns.
pub struct SearchEngine<'g> {
    graph: &'g DivGraph,
    seen: Vec<bool>,
    path: Vec<Tile>,
}

impl<'g> SearchEngine<'g> {
    /// Creates an engine for `graph` with empty state.
    pub fn new(graph: &'g DivGraph) -> Self {
        Self {
            graph,
            seen: vec![false; graph.n() + 1],
            path: Vec::with_capacity(graph.n()),
        }
    }

    /// Tries every tile as a starting point, in shuffled order, exploring
    /// each to exhaustion before moving on.
    ///
    /// Paths reachable from several starts are enumerated once per start; no
    /// cross-start deduplication is attempted. For small boards this returns
    /// after the search space is exhausted; for realistic boards it runs until
    /// the process is interrupted.
    pub fn run<R: Rng + ?Sized, O: PathObserver>(&mut self, rng: &mut R, observer: &mut O) {
        let mut starts: Vec<Tile> = (1..=self.graph.n()).collect();
        starts.shuffle(rng);
        for &start in &starts {
            self.seen[start] = true;
            self.path.push(start);
            self.explore(start, observer);
            self.path.pop();
            self.seen[start] = false;
        }
    }

    /// Extends the current path from `tile` along every unvisited neighbor,
    /// in the graph's precomputed order. A tile with no eligible neighbor is
    /// a dead end, i.e. the path is maximal, and goes to the observer.
    fn explore<O: PathObserver>(&mut self, tile: Tile, observer: &mut O) {
        let graph = self.graph;
        let mut dead_end = true;
        for &next in graph.neighbors(tile) {
            if !self.seen[next] {
                dead_end = false;
                self.seen[next] = true;
                self.path.push(next);
                self.explore(next, observer);
                self.path.pop();
                self.seen[next] = false;
            }
        }
        if dead_end {
            observer.observe(&self.path);
        }
    }
}

// ============================================================================
// Public entry point
// ============================================================================

/// Runs the full search: seeds the generator, builds the graph, and drives
/// the engine with a console-reporting record tracker.
///
/// Only returns for small boards; for realistic `n` this runs until the
/// process is interrupted, printing each new record as it is found.
///
/// # Errors
/// Returns a message for invalid configurations (see [`SearchConfig::validate`]).
pub fn run_search(cfg: &SearchConfig) -> Result<(), String> {
    cfg.validate()?;
    let seed = cfg.seed.unwrap_or_else(rand::random::<u64>);

    println!("--------------------------------------------------");
    println!("Factor path search: board 1..={}", cfg.n);
    println!("Seed: {seed}");
    println!("--------------------------------------------------");

    let mut rng = SmallRng::seed_from_u64(seed);
    let graph = DivGraph::build(cfg.n, &mut rng);
    let mut tracker = RecordTracker::new(seed, ConsoleSink, cfg.notify_every);
    let mut engine = SearchEngine::new(&graph);
    engine.run(&mut rng, &mut tracker);

    println!(
        "\rSearch space exhausted after {} dead ends; best length {}",
        tracker.paths_seen(),
        tracker.best()
    );
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::linked;
    use crate::record::RecordSink;
    use rand_xorshift::XorShiftRng;

    /// Observer that captures every dead-end path.
    #[derive(Default)]
    struct CapturingObserver {
        paths: Vec<Vec<Tile>>,
    }

    impl PathObserver for CapturingObserver {
        fn observe(&mut self, path: &[Tile]) {
            self.paths.push(path.to_vec());
        }
    }

    /// Sink that captures the record sequence.
    #[derive(Default)]
    struct CapturingSink {
        records: Vec<(usize, Vec<Tile>)>,
    }

    impl RecordSink for CapturingSink {
        fn report(&mut self, _seed: u64, length: usize, path: &[Tile]) {
            self.records.push((length, path.to_vec()));
        }
    }

    fn exhaust(n: usize, seed: u64) -> CapturingObserver {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let graph = DivGraph::build(n, &mut rng);
        let mut observer = CapturingObserver::default();
        let mut engine = SearchEngine::new(&graph);
        engine.run(&mut rng, &mut observer);
        observer
    }

    /// Independent brute-force longest simple path, straight off the
    /// divisibility predicate rather than the built graph.
    fn brute_force_longest(n: usize) -> usize {
        fn extend(n: usize, path: &mut Vec<Tile>, used: &mut Vec<bool>, best: &mut usize) {
            *best = (*best).max(path.len());
            let last = *path.last().expect("non-empty");
            for next in 1..=n {
                if !used[next] && next != last && linked(last, next) {
                    used[next] = true;
                    path.push(next);
                    extend(n, path, used, best);
                    path.pop();
                    used[next] = false;
                }
            }
        }
        let mut best = 0;
        for start in 1..=n {
            let mut used = vec![false; n + 1];
            used[start] = true;
            extend(n, &mut vec![start], &mut used, &mut best);
        }
        best
    }

    #[test]
    fn single_tile_board_terminates_immediately() {
        let observer = exhaust(1, 99);
        assert_eq!(observer.paths, vec![vec![1]]);
    }

    #[test]
    fn board_of_four_finds_the_true_optimum() {
        // Edges: 1-2, 1-3, 1-4, 2-4. The longest simple path has all four
        // tiles, e.g. 3-1-2-4.
        let observer = exhaust(4, 0x5EED);
        let longest = observer.paths.iter().map(Vec::len).max().unwrap();
        assert_eq!(longest, 4);
        for path in &observer.paths {
            assert!(path.len() <= 4);
        }
    }

    #[test]
    fn observed_paths_are_simple_and_valid() {
        let observer = exhaust(8, 0xC0DE);
        assert!(!observer.paths.is_empty());
        for path in &observer.paths {
            let mut sorted = path.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), path.len(), "repeated tile in {path:?}");
            assert!(path.len() <= 8);
            for w in path.windows(2) {
                assert!(linked(w[0], w[1]), "broken link in {path:?}");
            }
        }
    }

    #[test]
    fn observed_paths_are_maximal() {
        let observer = exhaust(6, 3);
        for path in &observer.paths {
            let last = *path.last().unwrap();
            for next in 1..=6 {
                if next != last && linked(last, next) {
                    assert!(
                        path.contains(&next),
                        "{path:?} could still extend to {next}"
                    );
                }
            }
        }
    }

    #[test]
    fn final_best_matches_brute_force_oracle() {
        for n in 1..=6 {
            let mut rng = XorShiftRng::seed_from_u64(n as u64);
            let graph = DivGraph::build(n, &mut rng);
            let mut tracker = RecordTracker::new(0, CapturingSink::default(), None);
            let mut engine = SearchEngine::new(&graph);
            engine.run(&mut rng, &mut tracker);
            assert_eq!(tracker.best(), brute_force_longest(n), "board size {n}");
        }
    }

    #[test]
    fn record_sequence_is_deterministic_for_fixed_seed() {
        fn record_sequence(seed: u64) -> Vec<(usize, Vec<Tile>)> {
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let graph = DivGraph::build(12, &mut rng);
            let mut tracker = RecordTracker::new(seed, CapturingSink::default(), None);
            let mut engine = SearchEngine::new(&graph);
            engine.run(&mut rng, &mut tracker);
            tracker.into_sink().records
        }

        let a = record_sequence(0xDEAD_BEEF);
        let b = record_sequence(0xDEAD_BEEF);
        assert_eq!(a, b, "same seed must give the same record sequence");
        assert!(!a.is_empty());

        // Records strictly improve.
        for w in a.windows(2) {
            assert!(w[0].0 < w[1].0);
        }
    }

    #[test]
    fn engine_state_is_restored_between_starts() {
        let mut rng = XorShiftRng::seed_from_u64(11);
        let graph = DivGraph::build(5, &mut rng);
        let mut observer = CapturingObserver::default();
        let mut engine = SearchEngine::new(&graph);
        engine.run(&mut rng, &mut observer);
        assert!(engine.path.is_empty());
        assert!(engine.seen.iter().all(|&s| !s));
    }

    #[test]
    fn every_start_is_tried() {
        let observer = exhaust(6, 777);
        for start in 1..=6 {
            assert!(
                observer.paths.iter().any(|p| p[0] == start),
                "no path started from {start}"
            );
        }
    }

    #[test]
    fn config_validation_rejects_bad_input() {
        let cfg = SearchConfig {
            n: 0,
            ..SearchConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SearchConfig {
            notify_every: Some(0),
            ..SearchConfig::default()
        };
        assert!(cfg.validate().is_err());

        assert!(SearchConfig::default().validate().is_ok());
    }
}
