//! Pipeline coordinator: fast paths, bounds, then the exact solver.

use crate::bounds::{self, HeuristicColoring};
use crate::classify;
use crate::coloring::Color;
use crate::dsatur;
use crate::graph::{Graph, InvalidGraphError};
use crate::solver;
use std::fmt;
use std::time::Duration;

// ============================================================================
// Configuration and results
// ============================================================================

/// Tunables for one solve call.
#[derive(Clone, Debug)]
pub struct SolveConfig {
    /// Wall-clock budget for the exact solver.
    pub deadline: Duration,
    /// Worker-count ceiling; the solver runs at most twice this many
    /// workers per round.
    pub max_workers: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(120),
            max_workers: std::thread::available_parallelism()
                .map(std::num::NonZero::get)
                .unwrap_or(4),
        }
    }
}

/// The answer for one graph: exact when `proven`, best-effort otherwise.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Chromatic number (proven) or best achieved color count.
    pub chromatic_number: usize,
    /// A proper coloring using `chromatic_number` colors.
    pub coloring: Vec<Color>,
    /// True for a proven optimum, false when the deadline cut the search.
    pub proven: bool,
}

/// Heuristic bounds only, skipping the exact solver.
#[derive(Clone, Debug)]
pub struct BoundsReport {
    /// Clique lower bound.
    pub lower: usize,
    /// Witness clique for the lower bound.
    pub clique: Vec<usize>,
    /// Welsh–Powell greedy upper bound.
    pub greedy: usize,
    /// DSATUR upper bound.
    pub dsatur: usize,
    /// The better of the two heuristic colorings.
    pub coloring: Vec<Color>,
}

impl BoundsReport {
    /// The smaller of the two upper bounds.
    pub fn upper(&self) -> usize {
        self.greedy.min(self.dsatur)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure modes of a solve call. A deadline is not a failure; it surfaces
/// as `proven == false` on the [`Solution`].
#[derive(Clone, Debug)]
pub enum SolveError {
    /// The input graph was malformed; nothing ran.
    InvalidGraph(InvalidGraphError),
    /// The search machinery itself broke down.
    EngineFault(String),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGraph(e) => write!(f, "invalid graph: {e}"),
            Self::EngineFault(detail) => write!(f, "engine fault: {detail}"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidGraph(e) => Some(e),
            Self::EngineFault(_) => None,
        }
    }
}

impl From<InvalidGraphError> for SolveError {
    fn from(e: InvalidGraphError) -> Self {
        Self::InvalidGraph(e)
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Computes the chromatic number of `graph`, or the best bound reachable
/// within the configured deadline.
///
/// Stages: recognized-family fast path, clique lower bound, greedy and
/// DSATUR upper bounds, then the exact solver when the bounds disagree.
/// Blocks until the search completes or the deadline elapses.
///
/// # Errors
///
/// [`SolveError::EngineFault`] when the parallel search fails wholesale;
/// never for a deadline.
pub fn solve(graph: &Graph, config: &SolveConfig) -> Result<Solution, SolveError> {
    if let Some((chromatic_number, coloring)) = classify::color_special(graph) {
        return Ok(Solution {
            chromatic_number,
            coloring,
            proven: true,
        });
    }

    let report = heuristic_bounds(graph);
    let upper = report.upper();
    if report.lower == upper {
        return Ok(Solution {
            chromatic_number: upper,
            coloring: report.coloring,
            proven: true,
        });
    }

    let initial = HeuristicColoring {
        colors: upper,
        coloring: report.coloring,
    };
    let outcome = solver::search(
        graph,
        report.lower,
        initial,
        config.deadline,
        config.max_workers,
    )
    .map_err(|e| SolveError::EngineFault(e.to_string()))?;
    Ok(Solution {
        chromatic_number: outcome.chromatic_number,
        coloring: outcome.coloring,
        proven: outcome.proven,
    })
}

/// Validates raw edges and solves; for callers without a [`Graph`] yet.
///
/// # Errors
///
/// [`SolveError::InvalidGraph`] before any computation on malformed input,
/// otherwise as [`solve`].
pub fn solve_edges(
    order: usize,
    edges: Vec<(usize, usize)>,
    config: &SolveConfig,
) -> Result<Solution, SolveError> {
    let graph = Graph::build(order, edges)?;
    solve(&graph, config)
}

/// Runs only the cheap estimators: clique lower bound, greedy and DSATUR
/// upper bounds. Fast approximate answers, no deadline involved.
pub fn heuristic_bounds(graph: &Graph) -> BoundsReport {
    let clique = bounds::clique_lower_bound(graph);
    let greedy = bounds::greedy_upper_bound(graph);
    let ds = dsatur::dsatur(graph);
    let (greedy_colors, dsatur_colors) = (greedy.colors, ds.colors);
    let best = if ds.colors < greedy.colors { ds } else { greedy };
    BoundsReport {
        lower: clique.size,
        clique: clique.vertices,
        greedy: greedy_colors,
        dsatur: dsatur_colors,
        coloring: best.coloring,
    }
}

// ============================================================================
// Tests
// ============================================================================
