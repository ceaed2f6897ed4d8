//! Cheap chromatic bounds: clique lower bound and greedy upper bound.

use crate::coloring::{self, Color};
use crate::graph::Graph;
use std::collections::HashSet;

// ============================================================================
// Clique lower bound
// ============================================================================

/// A clique found by [`clique_lower_bound`], witnessing `chromatic >= size`.
#[derive(Clone, Debug)]
pub struct CliqueBound {
    /// Lower bound on the chromatic number.
    pub size: usize,
    /// Pairwise-adjacent vertices of that size.
    pub vertices: Vec<usize>,
}

/// Grows a frontier of cliques until none can be extended.
///
/// Round `i` holds cliques of size `i + 1`, each stored sorted; extending a
/// clique by every vertex adjacent to all its members produces the next
/// round. Identical extensions collapse through a set, which keeps the
/// frontier from exploding on dense graphs, but the routine is still a
/// heuristic: it is not guaranteed to reach a globally maximum clique on
/// pathological inputs.
pub fn clique_lower_bound(graph: &Graph) -> CliqueBound {
    let n = graph.order();
    if n == 0 {
        return CliqueBound {
            size: 0,
            vertices: Vec::new(),
        };
    }
    if graph.is_complete() {
        return CliqueBound {
            size: n,
            vertices: (0..n).collect(),
        };
    }

    let mut frontier: Vec<Vec<usize>> = (0..n).map(|v| vec![v]).collect();
    loop {
        let mut next: HashSet<Vec<usize>> = HashSet::new();
        for clique in &frontier {
            for v in 0..n {
                if clique.contains(&v) {
                    continue;
                }
                if clique.iter().all(|&u| graph.has_edge(u, v)) {
                    let mut grown = clique.clone();
                    grown.push(v);
                    grown.sort_unstable();
                    next.insert(grown);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next.into_iter().collect();
    }

    // The set leaves frontier order arbitrary; take the lexicographically
    // smallest survivor so the witness is reproducible.
    let vertices = frontier.into_iter().min().unwrap_or_default();
    CliqueBound {
        size: vertices.len(),
        vertices,
    }
}

// ============================================================================
// Greedy upper bound
// ============================================================================

/// A heuristic coloring witnessing `chromatic <= colors`.
#[derive(Clone, Debug)]
pub struct HeuristicColoring {
    /// Number of colors used.
    pub colors: usize,
    /// The witnessing proper coloring.
    pub coloring: Vec<Color>,
}

/// Vertices ordered by descending degree, ties by ascending index.
pub fn degree_order(graph: &Graph) -> Vec<usize> {
    let mut order: Vec<usize> = (0..graph.order()).collect();
    order.sort_by_key(|&v| std::cmp::Reverse(graph.degree(v)));
    order
}

/// Welsh–Powell greedy coloring: highest-degree vertices first, smallest
/// free color each.
pub fn greedy_upper_bound(graph: &Graph) -> HeuristicColoring {
    let n = graph.order();
    let mut partial: Vec<Option<Color>> = vec![None; n];
    let mut max_color = 0;
    for v in degree_order(graph) {
        let c = coloring::smallest_free_color(graph, v, &partial);
        partial[v] = Some(c);
        max_color = max_color.max(c);
    }
    let coloring: Vec<Color> = partial.into_iter().flatten().collect();
    HeuristicColoring {
        colors: if n == 0 { 0 } else { max_color as usize + 1 },
        coloring,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coloring::is_proper;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn assert_is_clique(g: &Graph, vs: &[usize]) {
        for (i, &u) in vs.iter().enumerate() {
            for &v in &vs[i + 1..] {
                assert!(g.has_edge(u, v), "{u} and {v} not adjacent");
            }
        }
    }

    #[test]
    fn clique_bound_on_empty_and_edgeless() {
        assert_eq!(clique_lower_bound(&Graph::build(0, vec![]).unwrap()).size, 0);
        let g = Graph::build(4, vec![]).unwrap();
        let b = clique_lower_bound(&g);
        assert_eq!(b.size, 1);
    }

    #[test]
    fn clique_bound_on_complete_graph() {
        let b = clique_lower_bound(&Graph::complete(6));
        assert_eq!(b.size, 6);
        assert_eq!(b.vertices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn clique_bound_finds_triangle_in_cycle_with_chord() {
        // C5 plus chord (0,2) contains the triangle {0,1,2}.
        let g = Graph::build(5, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2)]).unwrap();
        let b = clique_lower_bound(&g);
        assert_eq!(b.size, 3);
        assert_eq!(b.vertices, vec![0, 1, 2]);
    }

    #[test]
    fn clique_witness_is_reproducible() {
        // Two maximum triangles; the witness must be the lexicographically
        // smallest one on every run, whatever the hash iteration order.
        let mut edges = vec![(0, 1), (1, 2), (2, 0)];
        edges.extend([(3, 4), (4, 5), (5, 3)]);
        let g = Graph::build(6, edges).unwrap();
        let a = clique_lower_bound(&g);
        let b = clique_lower_bound(&g);
        assert_eq!(a.vertices, vec![0, 1, 2]);
        assert_eq!(a.vertices, b.vertices);
    }

    #[test]
    fn clique_bound_on_bipartite_graph_is_two() {
        let g = Graph::star(7);
        let b = clique_lower_bound(&g);
        assert_eq!(b.size, 2);
        assert_is_clique(&g, &b.vertices);
    }

    #[test]
    fn clique_witness_is_always_a_clique() {
        let mut rng = XorShiftRng::seed_from_u64(0xBEEF);
        for _ in 0..10 {
            let g = Graph::random(&mut rng, 12, 0.4);
            let b = clique_lower_bound(&g);
            assert_eq!(b.size, b.vertices.len());
            assert_is_clique(&g, &b.vertices);
        }
    }

    #[test]
    fn degree_order_is_descending_and_stable() {
        let g = Graph::build(4, vec![(0, 1), (0, 2), (0, 3), (1, 2)]).unwrap();
        assert_eq!(degree_order(&g), vec![0, 1, 2, 3]);
    }

    #[test]
    fn greedy_coloring_is_proper() {
        let mut rng = XorShiftRng::seed_from_u64(0x9EED);
        for _ in 0..10 {
            let g = Graph::random(&mut rng, 15, 0.5);
            let ub = greedy_upper_bound(&g);
            assert!(is_proper(&g, &ub.coloring));
            assert!(crate::coloring::color_count(&ub.coloring) <= ub.colors);
        }
    }

    #[test]
    fn greedy_on_complete_graph_uses_n_colors() {
        let ub = greedy_upper_bound(&Graph::complete(5));
        assert_eq!(ub.colors, 5);
    }

    #[test]
    fn greedy_on_star_uses_two_colors() {
        let ub = greedy_upper_bound(&Graph::star(8));
        assert_eq!(ub.colors, 2);
    }

    #[test]
    fn greedy_on_empty_graph() {
        let ub = greedy_upper_bound(&Graph::build(0, vec![]).unwrap());
        assert_eq!(ub.colors, 0);
        assert!(ub.coloring.is_empty());
    }

    #[test]
    fn bounds_bracket_each_other() {
        let mut rng = XorShiftRng::seed_from_u64(0x0DD);
        for _ in 0..10 {
            let g = Graph::random(&mut rng, 12, 0.35);
            let lb = clique_lower_bound(&g);
            let ub = greedy_upper_bound(&g);
            assert!(lb.size <= ub.colors);
        }
    }
}
