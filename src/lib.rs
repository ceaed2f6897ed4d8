//! # Chromatic Number Engine
//!
//! Computes, or tightly bounds, the chromatic number of an undirected
//! simple graph, together with a witnessing coloring.
//!
//! This crate provides:
//! - An immutable graph model with derived adjacency matrix and list.
//! - Cheap bound estimators: a clique-growing lower bound and a
//!   Welsh–Powell greedy upper bound.
//! - The DSATUR saturation heuristic, an independent upper bound.
//! - An exact, time-boxed, parallel branch-and-bound solver with MRV
//!   vertex selection, usage-biased color ordering and forward checking.
//! - A pipeline that recognizes easy graph families and short-circuits
//!   when the bounds already agree.
//!
//! ## Quick Start
//!
//! ```
//! use chromatic::graph::Graph;
//! use chromatic::pipeline::{solve, SolveConfig};
//!
//! // An odd cycle needs three colors.
//! let graph = Graph::cycle(5);
//! let solution = solve(&graph, &SolveConfig::default()).expect("valid graph");
//! assert_eq!(solution.chromatic_number, 3);
//! assert!(solution.proven);
//! ```
//!
//! ## Bounds Without the Exact Search
//!
//! ```
//! use chromatic::graph::Graph;
//! use chromatic::pipeline::heuristic_bounds;
//!
//! let report = heuristic_bounds(&Graph::complete(4));
//! assert_eq!(report.lower, 4);
//! assert_eq!(report.upper(), 4);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Immutable graph model, validation and generators.
//! - [`coloring`]: Color assignments and validity checks.
//! - [`domain`]: Bitset color domains for forward checking.
//! - [`bounds`]: Clique lower bound and greedy upper bound.
//! - [`dsatur`]: DSATUR heuristic coloring.
//! - [`classify`]: Graph-family recognition with closed-form colorings.
//! - [`solver`]: Parallel branch-and-bound search and its deadline.
//! - [`pipeline`]: Coordinator and public entry points.
//!
//! ## Behavior Notes
//!
//! - A solve call is blocking; it returns when the search finishes or the
//!   deadline (default two minutes) fires, whichever is first.
//! - Results are never ambiguous: `proven == true` carries an exact
//!   chromatic number, `proven == false` a labeled best-effort bound.
//! - Every returned coloring is re-validated before publication.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod bounds;
pub mod classify;
pub mod coloring;
pub mod domain;
pub mod dsatur;
pub mod graph;
pub mod pipeline;
pub mod solver;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::bounds::{clique_lower_bound, greedy_upper_bound, CliqueBound};
    pub use crate::coloring::{color_count, is_proper, Color};
    pub use crate::dsatur::dsatur;
    pub use crate::graph::{Graph, InvalidGraphError};
    pub use crate::pipeline::{
        heuristic_bounds, solve, solve_edges, BoundsReport, Solution, SolveConfig, SolveError,
    };
}
