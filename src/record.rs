//! Dead-end observers: record tracking, reporting, and the progress meter.

use crate::graph::Tile;
use std::io::Write;
use std::time::Instant;

// ============================================================================
// Observer contracts
// ============================================================================

/// Callback invoked by the search engine at every dead end.
///
/// The engine hands over the current path by reference; implementations must
/// copy it if they want to keep it, because the engine mutates the buffer as
/// soon as the call returns.
pub trait PathObserver {
    /// Called with a maximal simple path. `path` is never empty.
    fn observe(&mut self, path: &[Tile]);
}

/// External reporting collaborator: renders a new record somewhere a human
/// can see it. The tracker calls this only on strict improvement.
pub trait RecordSink {
    /// Reports a new best path of `length` tiles, found under `seed`.
    fn report(&mut self, seed: u64, length: usize, path: &[Tile]);
}

// ============================================================================
// Console sink
// ============================================================================

/// Renders records to stdout in the historical `<seed>[<length>]t1 t2 ...`
/// line format. The leading carriage return overwrites any progress-meter
/// status line.
#[derive(Clone, Debug, Default)]
pub struct ConsoleSink;

impl RecordSink for ConsoleSink {
    fn report(&mut self, seed: u64, length: usize, path: &[Tile]) {
        print!("\r{seed}[{length}]");
        for tile in path {
            print!("{tile} ");
        }
        println!();
    }
}

// ============================================================================
// Progress meter
// ============================================================================

/// Dead-end counter with periodic rate display.
///
/// Replaces the reference implementation's compile-time debug counter: the
/// notify period is a runtime option, and `None` disables the display while
/// still counting.
#[derive(Clone, Debug)]
pub struct ProgressMeter {
    paths_seen: u64,
    notify_every: Option<u64>,
    started: Instant,
}

impl ProgressMeter {
    /// Creates a meter; `notify_every` is the display period in dead ends.
    pub fn new(notify_every: Option<u64>) -> Self {
        Self {
            paths_seen: 0,
            notify_every,
            started: Instant::now(),
        }
    }

    /// Counts one dead end, printing a status line when the period elapses.
    pub fn tick(&mut self) {
        self.paths_seen += 1;
        if let Some(every) = self.notify_every {
            if self.paths_seen % every == 0 {
                let secs = self.started.elapsed().as_secs_f64();
                let rate = if secs > 0.0 {
                    self.paths_seen as f64 / secs
                } else {
                    0.0
                };
                print!("\r{:.1e}@{rate:.1e}Hz: ", self.paths_seen as f64);
                let _ = std::io::stdout().flush();
            }
        }
    }

    /// Total dead ends seen so far.
    #[inline]
    pub fn paths_seen(&self) -> u64 {
        self.paths_seen
    }
}

// ============================================================================
// Record tracker
// ============================================================================

/// Keeps the best path length seen across the whole run and forwards strict
/// improvements to the sink.
///
/// `best` is monotonically non-decreasing and starts at 0, so the very first
/// dead end always produces a report.
#[derive(Debug)]
pub struct RecordTracker<S> {
    seed: u64,
    best: usize,
    sink: S,
    meter: ProgressMeter,
}

impl<S: RecordSink> RecordTracker<S> {
    /// Creates a tracker for a run under `seed`.
    pub fn new(seed: u64, sink: S, notify_every: Option<u64>) -> Self {
        Self {
            seed,
            best: 0,
            sink,
            meter: ProgressMeter::new(notify_every),
        }
    }

    /// Current record length; 0 until the first dead end is observed.
    #[inline]
    pub fn best(&self) -> usize {
        self.best
    }

    /// Dead ends observed so far.
    #[inline]
    pub fn paths_seen(&self) -> u64 {
        self.meter.paths_seen()
    }

    /// Consumes the tracker, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: RecordSink> PathObserver for RecordTracker<S> {
    fn observe(&mut self, path: &[Tile]) {
        self.meter.tick();
        if path.len() > self.best {
            self.best = path.len();
            self.sink.report(self.seed, path.len(), path);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
