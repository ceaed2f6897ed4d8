//! Exact chromatic number search: time-boxed parallel branch-and-bound.
//!
//! The solver walks a candidate bound `k` downward from the heuristic upper
//! bound toward the clique lower bound. Each round asks a pool of rayon
//! workers whether the graph is `k`-colorable; a round that completes with
//! no coloring and no deadline proves the previous bound optimal.

use crate::bounds::{self, HeuristicColoring};
use crate::coloring::{self, Color};
use crate::domain::ColorSet;
use crate::graph::Graph;
use rayon::prelude::*;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Timer thread wake-up period; bounds how late a cancel can be observed.
const TIMER_SLICE: Duration = Duration::from_millis(25);

// ============================================================================
// Deadline
// ============================================================================

/// A one-shot wall-clock deadline, set by a dedicated timer thread and
/// polled cooperatively by every worker.
pub struct Deadline {
    fired: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
    timer: Option<thread::JoinHandle<()>>,
}

impl Deadline {
    /// Arms the deadline `limit` from now.
    pub fn start(limit: Duration) -> Self {
        let fired = Arc::new(AtomicBool::new(false));
        let cancelled = Arc::new(AtomicBool::new(false));
        let timer = {
            let fired = Arc::clone(&fired);
            let cancelled = Arc::clone(&cancelled);
            thread::spawn(move || {
                let start = Instant::now();
                loop {
                    if cancelled.load(Ordering::Relaxed) {
                        return;
                    }
                    let remaining = limit.saturating_sub(start.elapsed());
                    if remaining.is_zero() {
                        break;
                    }
                    thread::sleep(remaining.min(TIMER_SLICE));
                }
                fired.store(true, Ordering::Relaxed);
            })
        };
        Self {
            fired,
            cancelled,
            timer: Some(timer),
        }
    }

    /// True once the wall-clock limit has elapsed. Never resets.
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::Relaxed)
    }

    /// The flag workers poll inside their recursion.
    pub fn flag(&self) -> &AtomicBool {
        &self.fired
    }

    /// Stops the timer thread without firing.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.cancel();
        if let Some(timer) = self.timer.take() {
            let _ = timer.join();
        }
    }
}

// ============================================================================
// Shared best-coloring slot
// ============================================================================

struct Best {
    coloring: Vec<Color>,
    used: usize,
}

/// State shared across workers: the live pruning bound (read lock-free,
/// staleness tolerated) and the best published coloring (written under a
/// mutex, after re-validation).
struct SharedBest {
    bound: AtomicUsize,
    slot: Mutex<Best>,
}

impl SharedBest {
    fn new(coloring: Vec<Color>, used: usize) -> Self {
        Self {
            bound: AtomicUsize::new(used),
            slot: Mutex::new(Best { coloring, used }),
        }
    }

    /// Publishes a validated coloring; keeps the slot monotonically
    /// improving. A poisoned lock only means another worker panicked after
    /// a consistent write, so the value is still usable.
    fn offer(&self, coloring: Vec<Color>, used: usize) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if used < slot.used {
            slot.coloring = coloring;
            slot.used = used;
        }
        self.bound.fetch_min(used, Ordering::Relaxed);
    }

    fn best_used(&self) -> usize {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .used
    }

    fn into_best(self) -> Best {
        self.slot.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Result of an exact search.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Proven chromatic number, or best color count reached by the deadline.
    pub chromatic_number: usize,
    /// A proper coloring with `chromatic_number` colors.
    pub coloring: Vec<Color>,
    /// True when the bound was proven optimal, false on deadline.
    pub proven: bool,
}

/// Every worker of a round failed for non-deadline reasons, twice.
#[derive(Clone, Debug)]
pub struct SearchError {
    /// The candidate bound whose round failed.
    pub bound: usize,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "all search workers failed twice at candidate bound {}",
            self.bound
        )
    }
}

impl std::error::Error for SearchError {}

/// Searches for colorings below `initial.colors`, down to `lower`.
///
/// `initial` must be a proper coloring; it is the fallback answer when the
/// deadline fires before any improvement. The call blocks until the search
/// completes or the deadline elapses.
///
/// # Errors
///
/// [`SearchError`] when a whole worker round fails for non-deadline
/// reasons and the retry fails too.
pub fn search(
    graph: &Graph,
    lower: usize,
    initial: HeuristicColoring,
    limit: Duration,
    max_workers: usize,
) -> Result<SearchOutcome, SearchError> {
    search_rounds(lower, initial, limit, |k, shared, fired| {
        run_round(k, shared, fired, max_workers, |worker_id| {
            Worker::new(graph, k, shared, fired).run(worker_id)
        })
    })
}

/// Drives the candidate bound downward, one round per bound. An improved
/// round lowers the target; an exhausted round proves the previous bound;
/// a round whose workers all failed is retried once before escalating.
fn search_rounds<F>(
    lower: usize,
    initial: HeuristicColoring,
    limit: Duration,
    mut round: F,
) -> Result<SearchOutcome, SearchError>
where
    F: FnMut(usize, &SharedBest, &AtomicBool) -> RoundOutcome,
{
    if initial.colors <= lower {
        return Ok(SearchOutcome {
            chromatic_number: initial.colors,
            coloring: initial.coloring,
            proven: true,
        });
    }

    let deadline = Deadline::start(limit);
    let shared = SharedBest::new(initial.coloring, initial.colors);
    let mut proven = false;
    let mut retried = false;

    loop {
        let used = shared.best_used();
        if used <= lower {
            proven = true;
            break;
        }
        let k = used - 1;
        match round(k, &shared, deadline.flag()) {
            RoundOutcome::Improved => retried = false,
            RoundOutcome::Exhausted => {
                // No k-coloring exists and the clock had not run out:
                // the best published bound is optimal.
                proven = true;
                break;
            }
            RoundOutcome::Deadline => break,
            RoundOutcome::AllFailed => {
                if retried {
                    return Err(SearchError { bound: k });
                }
                retried = true;
            }
        }
    }

    deadline.cancel();
    let best = shared.into_best();
    Ok(SearchOutcome {
        chromatic_number: best.used,
        coloring: best.coloring,
        proven,
    })
}

// ============================================================================
// Rounds
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RoundOutcome {
    /// At least one worker published a coloring within the bound.
    Improved,
    /// The round completed with no coloring: the bound is infeasible.
    Exhausted,
    /// The deadline fired during the round.
    Deadline,
    /// Every worker panicked; nothing was proven.
    AllFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WorkerOutcome {
    Found,
    Exhausted,
    Cancelled,
    Panicked,
}

/// Runs one round of workers asking whether the graph is `k`-colorable.
fn run_round<W>(
    k: usize,
    shared: &SharedBest,
    fired: &AtomicBool,
    max_workers: usize,
    worker: W,
) -> RoundOutcome
where
    W: Fn(usize) -> WorkerOutcome + Sync,
{
    shared.bound.store(k, Ordering::Relaxed);
    let workers = k.min(max_workers.saturating_mul(2)).max(1);

    let results: Vec<WorkerOutcome> = (0..workers)
        .into_par_iter()
        .map(|worker_id| {
            // A panicking worker is treated as having found nothing; the
            // survivors still decide the round.
            std::panic::catch_unwind(AssertUnwindSafe(|| worker(worker_id)))
                .unwrap_or(WorkerOutcome::Panicked)
        })
        .collect();

    if fired.load(Ordering::Relaxed) {
        return RoundOutcome::Deadline;
    }
    if results.contains(&WorkerOutcome::Found) {
        return RoundOutcome::Improved;
    }
    if results.iter().all(|r| *r == WorkerOutcome::Panicked) {
        return RoundOutcome::AllFailed;
    }
    RoundOutcome::Exhausted
}

// ============================================================================
// Worker
// ============================================================================

enum Dfs {
    Found,
    Exhausted,
    Cancelled,
}

/// One DFS worker with private domains and coloring; the only shared state
/// it touches is the deadline flag and the best-coloring slot.
struct Worker<'a> {
    graph: &'a Graph,
    k: usize,
    shared: &'a SharedBest,
    fired: &'a AtomicBool,
    coloring: Vec<Option<Color>>,
    domains: Vec<ColorSet>,
    usage: Vec<usize>,
}

impl<'a> Worker<'a> {
    fn new(graph: &'a Graph, k: usize, shared: &'a SharedBest, fired: &'a AtomicBool) -> Self {
        let n = graph.order();
        Self {
            graph,
            k,
            shared,
            fired,
            coloring: vec![None; n],
            domains: vec![ColorSet::full(k); n],
            usage: vec![0; k],
        }
    }

    fn run(mut self, worker_id: usize) -> WorkerOutcome {
        if !self.seed(worker_id) {
            // Seeding wiped out a domain: no k-coloring extends it, and the
            // seed was forced, so the worker's search space is empty.
            return WorkerOutcome::Exhausted;
        }
        match self.dfs() {
            Dfs::Found => WorkerOutcome::Found,
            Dfs::Exhausted => WorkerOutcome::Exhausted,
            Dfs::Cancelled => WorkerOutcome::Cancelled,
        }
    }

    /// Pre-colors a top-degree clique with distinct colors, rotated by
    /// `worker_id` so workers start in different branches.
    ///
    /// Restricting the seeds to a clique keeps the round sound: clique
    /// vertices take distinct colors in every proper coloring, so the
    /// seeded assignment is forced up to color renaming and each worker
    /// remains a complete decision procedure for `k`-colorability.
    fn seed(&mut self, worker_id: usize) -> bool {
        if self.k == 0 {
            return true;
        }
        let graph = self.graph;
        let mut seeds: Vec<usize> = Vec::new();
        for v in bounds::degree_order(graph) {
            if seeds.len() == self.k {
                break;
            }
            if seeds.iter().all(|&u| graph.has_edge(u, v)) {
                seeds.push(v);
            }
        }
        for (j, &v) in seeds.iter().enumerate() {
            let c = ((j + worker_id) % self.k) as Color;
            self.assign(v, c);
            if self.forward_check(v, c).is_none() {
                return false;
            }
            // Seed removals stay in place; seeds are never unassigned.
        }
        true
    }

    fn dfs(&mut self) -> Dfs {
        if self.fired.load(Ordering::Relaxed) {
            return Dfs::Cancelled;
        }
        let Some(v) = self.select_vertex() else {
            return if self.publish() {
                Dfs::Found
            } else {
                Dfs::Exhausted
            };
        };
        for c in self.order_colors(v) {
            if self.fired.load(Ordering::Relaxed) {
                return Dfs::Cancelled;
            }
            if c as usize >= self.shared.bound.load(Ordering::Relaxed) {
                continue;
            }
            let Some(touched) = self.forward_check(v, c) else {
                continue;
            };
            self.assign(v, c);
            let step = self.dfs();
            self.unassign(v, c);
            self.undo(c, &touched);
            match step {
                Dfs::Exhausted => {}
                done => return done,
            }
        }
        Dfs::Exhausted
    }

    /// MRV selection: fewest remaining candidate colors, ties broken by
    /// the vertex that constrains the rest of the search most.
    fn select_vertex(&self) -> Option<usize> {
        let graph = self.graph;
        let mut best: Option<(usize, usize, usize)> = None;
        for v in 0..graph.order() {
            if self.coloring[v].is_some() {
                continue;
            }
            let card = self.domains[v].cardinality();
            let impact = 2 * self.uncolored_neighbors(v)
                + coloring::neighbor_color_count(graph, v, &self.coloring);
            let better = match best {
                None => true,
                Some((bc, bi, _)) => card < bc || (card == bc && impact > bi),
            };
            if better {
                best = Some((card, impact, v));
            }
        }
        best.map(|(_, _, v)| v)
    }

    /// Candidate colors below the live shared bound, most-used first, ties
    /// by fewest conflicts induced in neighbor domains, then by index.
    fn order_colors(&self, v: usize) -> Vec<Color> {
        let bound = self.shared.bound.load(Ordering::Relaxed);
        let mut cands: Vec<(Color, usize, usize)> = self.domains[v]
            .iter()
            .filter(|&c| (c as usize) < bound)
            .map(|c| (c, self.usage[c as usize], self.conflicts(v, c)))
            .collect();
        cands.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)).then(a.0.cmp(&b.0)));
        cands.into_iter().map(|(c, _, _)| c).collect()
    }

    fn uncolored_neighbors(&self, v: usize) -> usize {
        self.graph
            .neighbors(v)
            .iter()
            .filter(|&&w| self.coloring[w].is_none())
            .count()
    }

    /// Uncolored neighbors of `v` that still hold `c` in their domain.
    fn conflicts(&self, v: usize, c: Color) -> usize {
        self.graph
            .neighbors(v)
            .iter()
            .filter(|&&w| self.coloring[w].is_none() && self.domains[w].contains(c))
            .count()
    }

    /// Removes `c` from uncolored neighbor domains. On wipeout, restores
    /// the removed bits and reports the dead branch.
    fn forward_check(&mut self, v: usize, c: Color) -> Option<Vec<usize>> {
        let graph = self.graph;
        let mut touched = Vec::new();
        for &w in graph.neighbors(v) {
            if self.coloring[w].is_some() {
                continue;
            }
            if self.domains[w].remove(c) {
                touched.push(w);
                if self.domains[w].is_empty() {
                    self.undo(c, &touched);
                    return None;
                }
            }
        }
        Some(touched)
    }

    /// Strict LIFO restore of the bits a forward check removed.
    fn undo(&mut self, c: Color, touched: &[usize]) {
        for &w in touched.iter().rev() {
            self.domains[w].insert(c);
        }
    }

    #[inline]
    fn assign(&mut self, v: usize, c: Color) {
        self.coloring[v] = Some(c);
        self.usage[c as usize] += 1;
    }

    #[inline]
    fn unassign(&mut self, v: usize, c: Color) {
        self.coloring[v] = None;
        self.usage[c as usize] -= 1;
    }

    /// Re-validates the complete coloring and offers it to the shared
    /// slot. An invalid coloring here is an engine bug; it is dropped and
    /// the branch counts as exhausted.
    fn publish(&self) -> bool {
        let Some(complete) = self.coloring.iter().copied().collect::<Option<Vec<Color>>>()
        else {
            return false;
        };
        if !coloring::is_proper(self.graph, &complete) {
            return false;
        }
        let used = coloring::color_count(&complete);
        self.shared.offer(complete, used);
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
