//! Immutable graph model with derived adjacency structures.

use rand::Rng;
use std::fmt;

// ============================================================================
// Errors
// ============================================================================

/// Construction failure for [`Graph::build`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidGraphError {
    /// An edge endpoint references a vertex outside `[0, order)`.
    EndpointOutOfRange {
        /// Position of the offending edge in the input sequence.
        index: usize,
        /// The out-of-range endpoint.
        endpoint: usize,
        /// Number of vertices in the graph.
        order: usize,
    },
    /// An edge joins a vertex to itself.
    SelfLoop {
        /// Position of the offending edge in the input sequence.
        index: usize,
        /// The looped vertex.
        vertex: usize,
    },
}

impl fmt::Display for InvalidGraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndpointOutOfRange {
                index,
                endpoint,
                order,
            } => write!(
                f,
                "edge {index}: endpoint {endpoint} out of range for order {order}"
            ),
            Self::SelfLoop { index, vertex } => {
                write!(f, "edge {index}: self-loop at vertex {vertex}")
            }
        }
    }
}

impl std::error::Error for InvalidGraphError {}

// ============================================================================
// Graph
// ============================================================================

/// An undirected simple graph, immutable once built.
///
/// The adjacency matrix and adjacency list are derived once at construction
/// and stay mutually consistent; there are no mutation operations. Changing
/// the edge set means building a new `Graph`.
#[derive(Clone, Debug)]
pub struct Graph {
    order: usize,
    edges: Vec<(usize, usize)>,
    matrix: Vec<bool>,
    adj: Vec<Vec<usize>>,
}

impl Graph {
    /// Builds a graph from a vertex count and an edge list.
    ///
    /// Edges are 0-based `(u, v)` pairs. Duplicate edges are accepted and
    /// collapse in the derived adjacency structures. Self-loops and
    /// out-of-range endpoints are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGraphError`] for the first offending edge.
    pub fn build(order: usize, edges: Vec<(usize, usize)>) -> Result<Self, InvalidGraphError> {
        for (index, &(u, v)) in edges.iter().enumerate() {
            for endpoint in [u, v] {
                if endpoint >= order {
                    return Err(InvalidGraphError::EndpointOutOfRange {
                        index,
                        endpoint,
                        order,
                    });
                }
            }
            if u == v {
                return Err(InvalidGraphError::SelfLoop { index, vertex: u });
            }
        }
        Ok(Self::from_validated(order, edges))
    }

    /// Derives the matrix and adjacency list. Callers guarantee the edges
    /// are in range and loop-free.
    fn from_validated(order: usize, edges: Vec<(usize, usize)>) -> Self {
        let mut matrix = vec![false; order * order];
        for &(u, v) in &edges {
            matrix[u * order + v] = true;
            matrix[v * order + u] = true;
        }
        let mut adj = vec![Vec::new(); order];
        for u in 0..order {
            for v in 0..order {
                if matrix[u * order + v] {
                    adj[u].push(v);
                }
            }
        }
        Self {
            order,
            edges,
            matrix,
            adj,
        }
    }

    /// The complete graph `K_n`.
    pub fn complete(order: usize) -> Self {
        let mut edges = Vec::new();
        for u in 0..order {
            for v in (u + 1)..order {
                edges.push((u, v));
            }
        }
        Self::from_validated(order, edges)
    }

    /// The cycle `C_n` on vertices `0..n` in walk order. Edgeless for `n < 3`.
    pub fn cycle(order: usize) -> Self {
        if order < 3 {
            return Self::from_validated(order, Vec::new());
        }
        let mut edges: Vec<(usize, usize)> = (0..order - 1).map(|u| (u, u + 1)).collect();
        edges.push((order - 1, 0));
        Self::from_validated(order, edges)
    }

    /// The star with center `0` and leaves `1..n`.
    pub fn star(order: usize) -> Self {
        let edges = (1..order).map(|v| (0, v)).collect();
        Self::from_validated(order, edges)
    }

    /// An Erdős–Rényi random graph: each pair becomes an edge with
    /// probability `p` (clamped to `[0, 1]`).
    pub fn random<R: Rng>(rng: &mut R, order: usize, p: f64) -> Self {
        let p = p.clamp(0.0, 1.0);
        let mut edges = Vec::new();
        for u in 0..order {
            for v in (u + 1)..order {
                if rng.random_bool(p) {
                    edges.push((u, v));
                }
            }
        }
        Self::from_validated(order, edges)
    }

    /// Number of vertices.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// The raw edge sequence the graph was built from.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Adjacency test. Panics if either vertex is out of range.
    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.matrix[u * self.order + v]
    }

    /// Sorted, duplicate-free neighbors of `v`.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    /// Degree of `v` (distinct neighbors).
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    /// Edge density `2·m / (n·(n−1))` over distinct edges, `0.0` for `n <= 1`.
    pub fn density(&self) -> f64 {
        if self.order <= 1 {
            return 0.0;
        }
        let n = self.order as f64;
        2.0 * self.edge_count() as f64 / (n * (n - 1.0))
    }

    /// True when every pair of vertices is adjacent.
    pub fn is_complete(&self) -> bool {
        self.adj.iter().all(|nb| nb.len() == self.order - 1)
    }
}

// ============================================================================
// Tests
// ============================================================================
