//! Color assignments and validity checks.

use crate::graph::Graph;
use std::collections::HashSet;

/// A color index. Valid colorings of an `n`-vertex graph use colors in
/// `0..n`, so `u32` is never a practical limit.
pub type Color = u32;

/// True when `coloring` assigns one color per vertex and no edge joins two
/// same-colored vertices.
pub fn is_proper(graph: &Graph, coloring: &[Color]) -> bool {
    if coloring.len() != graph.order() {
        return false;
    }
    graph
        .edges()
        .iter()
        .all(|&(u, v)| coloring[u] != coloring[v])
}

/// Number of distinct colors used.
pub fn color_count(coloring: &[Color]) -> usize {
    coloring.iter().collect::<HashSet<_>>().len()
}

/// Smallest color not used by any already-colored neighbor of `v`.
///
/// Shared by the greedy and DSATUR heuristics; both color one vertex at a
/// time and always take the lowest free color.
pub fn smallest_free_color(graph: &Graph, v: usize, partial: &[Option<Color>]) -> Color {
    let mut taken = vec![false; graph.degree(v) + 1];
    for &w in graph.neighbors(v) {
        if let Some(c) = partial[w] {
            let c = c as usize;
            if c < taken.len() {
                taken[c] = true;
            }
        }
    }
    for (c, &t) in taken.iter().enumerate() {
        if !t {
            return c as Color;
        }
    }
    // Unreachable: v has degree(v) neighbors, so one of the first
    // degree(v)+1 colors is always free.
    taken.len() as Color
}

/// Distinct colors among the already-colored neighbors of `v`.
pub fn neighbor_color_count(graph: &Graph, v: usize, partial: &[Option<Color>]) -> usize {
    let mut seen = HashSet::new();
    for &w in graph.neighbors(v) {
        if let Some(c) = partial[w] {
            seen.insert(c);
        }
    }
    seen.len()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proper_coloring_is_accepted() {
        let g = Graph::cycle(4);
        assert!(is_proper(&g, &[0, 1, 0, 1]));
        assert!(!is_proper(&g, &[0, 1, 0, 0]));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let g = Graph::cycle(4);
        assert!(!is_proper(&g, &[0, 1, 0]));
        assert!(!is_proper(&g, &[0, 1, 0, 1, 0]));
    }

    #[test]
    fn edgeless_graph_accepts_any_assignment() {
        let g = Graph::build(3, vec![]).unwrap();
        assert!(is_proper(&g, &[5, 5, 5]));
    }

    #[test]
    fn color_count_ignores_gaps() {
        assert_eq!(color_count(&[0, 7, 0, 7, 3]), 3);
        assert_eq!(color_count(&[]), 0);
    }

    #[test]
    fn smallest_free_color_skips_neighbor_colors() {
        let g = Graph::star(4);
        let partial = vec![None, Some(0), Some(1), Some(3)];
        assert_eq!(smallest_free_color(&g, 0, &partial), 2);
        // A leaf only sees the center.
        let partial = vec![Some(0), None, None, None];
        assert_eq!(smallest_free_color(&g, 1, &partial), 1);
    }

    #[test]
    fn smallest_free_color_with_no_colored_neighbors() {
        let g = Graph::cycle(5);
        let partial = vec![None; 5];
        assert_eq!(smallest_free_color(&g, 2, &partial), 0);
    }

    #[test]
    fn neighbor_color_count_is_distinct() {
        let g = Graph::star(5);
        let partial = vec![None, Some(1), Some(1), Some(2), None];
        assert_eq!(neighbor_color_count(&g, 0, &partial), 2);
        assert_eq!(neighbor_color_count(&g, 4, &partial), 0);
    }
}
