//! Recognition of graph families with known chromatic numbers.
//!
//! The pipeline consults this module before running any bound machinery;
//! a recognized family is colored directly with a proven optimum.

use crate::bounds;
use crate::coloring::{self, Color};
use crate::graph::Graph;
use std::collections::VecDeque;

/// Families with a closed-form chromatic number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphKind {
    /// No vertices.
    Empty,
    /// One vertex.
    SingleVertex,
    /// Two or more vertices, no edges.
    Edgeless,
    /// Every pair adjacent.
    Complete,
    /// One center adjacent to all leaves, no other edges.
    Star,
    /// A single cycle.
    Cycle,
    /// A hub adjacent to every vertex of a single rim cycle.
    Wheel,
    /// Connected and acyclic.
    Tree,
    /// Disconnected and acyclic.
    Forest,
    /// Partitionable into a clique and an independent set.
    Split,
    /// Every cycle of length four or more has a chord.
    Chordal,
    /// Two-colorable, none of the above.
    Bipartite,
    /// No fast path applies.
    Unknown,
}

/// Classifies the graph into the most specific recognized family.
pub fn classify(graph: &Graph) -> GraphKind {
    let n = graph.order();
    if n == 0 {
        return GraphKind::Empty;
    }
    if n == 1 {
        return GraphKind::SingleVertex;
    }
    let m = graph.edge_count();
    if m == 0 {
        return GraphKind::Edgeless;
    }
    if graph.is_complete() {
        return GraphKind::Complete;
    }

    let components = component_count(graph);
    if components == 1 {
        if n >= 3 && is_star(graph) {
            return GraphKind::Star;
        }
        if (0..n).all(|v| graph.degree(v) == 2) {
            // Connected and 2-regular.
            return GraphKind::Cycle;
        }
        if n >= 5 && find_rim(graph).is_some() {
            return GraphKind::Wheel;
        }
        if m == n - 1 {
            return GraphKind::Tree;
        }
    } else if m == n - components {
        return GraphKind::Forest;
    }
    // Split before chordal: every split graph is chordal.
    if split_partition(graph).is_some() {
        return GraphKind::Split;
    }
    if elimination_order(graph).is_some() {
        return GraphKind::Chordal;
    }
    if two_color(graph).is_some() {
        return GraphKind::Bipartite;
    }
    GraphKind::Unknown
}

/// Colors a recognized family directly: `(chromatic number, coloring)`.
///
/// Returns `None` for [`GraphKind::Unknown`]; those graphs go through the
/// bound estimators and the exact solver.
pub fn color_special(graph: &Graph) -> Option<(usize, Vec<Color>)> {
    let n = graph.order();
    match classify(graph) {
        GraphKind::Empty => Some((0, Vec::new())),
        GraphKind::SingleVertex => Some((1, vec![0])),
        GraphKind::Edgeless => Some((1, vec![0; n])),
        GraphKind::Complete => Some((n, (0..n).map(|v| v as Color).collect())),
        GraphKind::Star | GraphKind::Tree | GraphKind::Forest | GraphKind::Bipartite => {
            two_color(graph).map(|c| (2, c))
        }
        GraphKind::Cycle => {
            let walk = cycle_walk(graph)?;
            Some(alternate_along(n, &walk, None))
        }
        GraphKind::Wheel => {
            let (hub, rim) = find_rim(graph)?;
            Some(alternate_along(n, &rim, Some(hub)))
        }
        GraphKind::Split => {
            let (clique, rest) = split_partition(graph)?;
            Some(color_split(graph, &clique, &rest))
        }
        GraphKind::Chordal => {
            let order = elimination_order(graph)?;
            Some(greedy_along(graph, &order))
        }
        GraphKind::Unknown => None,
    }
}

/// Parity coloring along a closed walk, with an optional hub taking the
/// next color up. An odd walk needs a third color for its last vertex.
fn alternate_along(n: usize, walk: &[usize], hub: Option<usize>) -> (usize, Vec<Color>) {
    let mut colors = vec![0 as Color; n];
    for (i, &v) in walk.iter().enumerate() {
        colors[v] = (i % 2) as Color;
    }
    let mut used = 2;
    if walk.len() % 2 == 1 {
        colors[walk[walk.len() - 1]] = 2;
        used = 3;
    }
    if let Some(h) = hub {
        colors[h] = used as Color;
        used += 1;
    }
    (used, colors)
}

/// Degree-sequence split partition: `(clique, independent set)`, both in
/// descending degree order. The clique candidate is the longest top-degree
/// prefix whose positions its degrees still cover; explicit verification
/// keeps degree ties honest. A split graph missed through an unlucky tie
/// order still lands in the chordal fast path with the same answer.
fn split_partition(graph: &Graph) -> Option<(Vec<usize>, Vec<usize>)> {
    let order = bounds::degree_order(graph);
    let last = order
        .iter()
        .enumerate()
        .filter(|&(i, &v)| graph.degree(v) >= i)
        .map(|(i, _)| i)
        .next_back()?;
    let (clique, rest) = order.split_at(last + 1);
    for (i, &u) in clique.iter().enumerate() {
        for &v in &clique[i + 1..] {
            if !graph.has_edge(u, v) {
                return None;
            }
        }
    }
    for (i, &u) in rest.iter().enumerate() {
        for &v in &rest[i + 1..] {
            if graph.has_edge(u, v) {
                return None;
            }
        }
    }
    Some((clique.to_vec(), rest.to_vec()))
}

/// Clique vertices take distinct colors; each independent vertex takes its
/// smallest free color. An independent vertex adjacent to the whole clique
/// extends it, so the count still equals the largest clique and is optimal.
fn color_split(graph: &Graph, clique: &[usize], rest: &[usize]) -> (usize, Vec<Color>) {
    let mut partial: Vec<Option<Color>> = vec![None; graph.order()];
    for (i, &v) in clique.iter().enumerate() {
        partial[v] = Some(i as Color);
    }
    let mut max_color = clique.len().saturating_sub(1) as Color;
    for &v in rest {
        let c = coloring::smallest_free_color(graph, v, &partial);
        partial[v] = Some(c);
        max_color = max_color.max(c);
    }
    let colors = partial.into_iter().flatten().collect();
    (max_color as usize + 1, colors)
}

/// Maximum cardinality search order, verified to be a reverse perfect
/// elimination ordering. `Some` exactly when the graph is chordal.
fn elimination_order(graph: &Graph) -> Option<Vec<usize>> {
    let n = graph.order();
    let mut weight = vec![0usize; n];
    let mut pos = vec![usize::MAX; n];
    let mut order = Vec::with_capacity(n);
    for step in 0..n {
        let mut best: Option<usize> = None;
        for v in 0..n {
            if pos[v] == usize::MAX && best.is_none_or(|b| weight[v] > weight[b]) {
                best = Some(v);
            }
        }
        let v = best?;
        pos[v] = step;
        order.push(v);
        for &w in graph.neighbors(v) {
            if pos[w] == usize::MAX {
                weight[w] += 1;
            }
        }
    }
    // Zero fill-in check: each vertex's earlier neighbors, minus the latest
    // of them, must all be adjacent to that latest one.
    for &v in &order {
        let earlier: Vec<usize> = graph
            .neighbors(v)
            .iter()
            .copied()
            .filter(|&w| pos[w] < pos[v])
            .collect();
        let Some(&u) = earlier.iter().max_by_key(|&&w| pos[w]) else {
            continue;
        };
        if earlier.iter().any(|&w| w != u && !graph.has_edge(u, w)) {
            return None;
        }
    }
    Some(order)
}

/// Greedy smallest-free coloring along a fixed order. Along a reverse
/// perfect elimination ordering the earlier neighbors of each vertex form
/// a clique, so the count equals the largest clique and is optimal.
fn greedy_along(graph: &Graph, order: &[usize]) -> (usize, Vec<Color>) {
    let mut partial: Vec<Option<Color>> = vec![None; graph.order()];
    let mut max_color = 0;
    for &v in order {
        let c = coloring::smallest_free_color(graph, v, &partial);
        partial[v] = Some(c);
        max_color = max_color.max(c);
    }
    let colors = partial.into_iter().flatten().collect();
    (max_color as usize + 1, colors)
}

// ============================================================================
// Structure checks
// ============================================================================

fn component_count(graph: &Graph) -> usize {
    let n = graph.order();
    let mut seen = vec![false; n];
    let mut count = 0;
    for start in 0..n {
        if seen[start] {
            continue;
        }
        count += 1;
        seen[start] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            for &w in graph.neighbors(v) {
                if !seen[w] {
                    seen[w] = true;
                    queue.push_back(w);
                }
            }
        }
    }
    count
}

fn is_star(graph: &Graph) -> bool {
    let n = graph.order();
    let mut hubs = 0;
    for v in 0..n {
        match graph.degree(v) {
            d if d == n - 1 => hubs += 1,
            1 => {}
            _ => return false,
        }
    }
    hubs == 1
}

/// Walks the vertices of a connected 2-regular graph in cycle order.
fn cycle_walk(graph: &Graph) -> Option<Vec<usize>> {
    walk_degree_two(graph, (0..graph.order()).collect::<Vec<_>>().as_slice(), None)
}

/// Detects a wheel: one hub adjacent to everything, remaining vertices of
/// degree 3 forming a single rim cycle. Returns the hub and the rim walk.
fn find_rim(graph: &Graph) -> Option<(usize, Vec<usize>)> {
    let n = graph.order();
    let hub = (0..n).find(|&v| graph.degree(v) == n - 1)?;
    if (0..n).any(|v| v != hub && graph.degree(v) != 3) {
        return None;
    }
    let rim: Vec<usize> = (0..n).filter(|&v| v != hub).collect();
    let walk = walk_degree_two(graph, &rim, Some(hub))?;
    Some((hub, walk))
}

/// Follows the unique next neighbor from vertex to vertex, ignoring
/// `skip`. Succeeds only when the walk closes after covering every vertex
/// in `members` exactly once.
fn walk_degree_two(graph: &Graph, members: &[usize], skip: Option<usize>) -> Option<Vec<usize>> {
    let start = *members.first()?;
    let mut walk = vec![start];
    let mut prev = start;
    let mut cur = *graph
        .neighbors(start)
        .iter()
        .find(|&&w| Some(w) != skip)?;
    while cur != start {
        walk.push(cur);
        if walk.len() > members.len() {
            return None;
        }
        let next = graph
            .neighbors(cur)
            .iter()
            .copied()
            .find(|&w| w != prev && Some(w) != skip)?;
        prev = cur;
        cur = next;
    }
    (walk.len() == members.len()).then_some(walk)
}

fn two_color(graph: &Graph) -> Option<Vec<Color>> {
    let n = graph.order();
    let mut colors: Vec<Option<Color>> = vec![None; n];
    for start in 0..n {
        if colors[start].is_some() {
            continue;
        }
        colors[start] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            let c = colors[v]?;
            for &w in graph.neighbors(v) {
                match colors[w] {
                    None => {
                        colors[w] = Some(1 - c);
                        queue.push_back(w);
                    }
                    Some(cw) if cw == c => return None,
                    Some(_) => {}
                }
            }
        }
    }
    colors.into_iter().collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coloring::{color_count, is_proper};

    fn wheel(n: usize) -> Graph {
        // Hub is n-1; rim is the cycle 0..n-1.
        let rim = n - 1;
        let mut edges: Vec<(usize, usize)> = (0..rim - 1).map(|u| (u, u + 1)).collect();
        edges.push((rim - 1, 0));
        for v in 0..rim {
            edges.push((v, rim));
        }
        Graph::build(n, edges).unwrap()
    }

    #[test]
    fn classify_degenerate_graphs() {
        assert_eq!(classify(&Graph::build(0, vec![]).unwrap()), GraphKind::Empty);
        assert_eq!(
            classify(&Graph::build(1, vec![]).unwrap()),
            GraphKind::SingleVertex
        );
        assert_eq!(
            classify(&Graph::build(5, vec![]).unwrap()),
            GraphKind::Edgeless
        );
    }

    #[test]
    fn classify_named_families() {
        assert_eq!(classify(&Graph::complete(4)), GraphKind::Complete);
        // K3 counts as complete, not as a cycle.
        assert_eq!(classify(&Graph::complete(3)), GraphKind::Complete);
        assert_eq!(classify(&Graph::star(6)), GraphKind::Star);
        assert_eq!(classify(&Graph::cycle(5)), GraphKind::Cycle);
        assert_eq!(classify(&wheel(6)), GraphKind::Wheel);
        // W4 is K4.
        assert_eq!(classify(&wheel(4)), GraphKind::Complete);
    }

    #[test]
    fn classify_trees_and_forests() {
        let path = Graph::build(4, vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(classify(&path), GraphKind::Tree);
        let two_paths = Graph::build(6, vec![(0, 1), (1, 2), (3, 4)]).unwrap();
        assert_eq!(classify(&two_paths), GraphKind::Forest);
    }

    #[test]
    fn classify_bipartite_and_unknown() {
        // C4 is a cycle first.
        assert_eq!(classify(&Graph::cycle(4)), GraphKind::Cycle);
        // K23 is bipartite but no smaller family.
        let k23 = Graph::build(5, vec![(0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4)]).unwrap();
        assert_eq!(classify(&k23), GraphKind::Bipartite);
        // C5 next to a triangle is none of the recognized families.
        let mut edges = vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)];
        edges.extend([(5, 6), (6, 7), (7, 5)]);
        let g = Graph::build(8, edges).unwrap();
        assert_eq!(classify(&g), GraphKind::Unknown);
        assert!(color_special(&g).is_none());
    }

    #[test]
    fn classify_split_graphs() {
        // Diamond: triangle clique plus one independent vertex.
        let diamond = Graph::build(4, vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]).unwrap();
        assert_eq!(classify(&diamond), GraphKind::Split);
        // Paw: triangle with a pendant.
        let paw = Graph::build(4, vec![(0, 1), (0, 2), (1, 2), (0, 3)]).unwrap();
        assert_eq!(classify(&paw), GraphKind::Split);
    }

    #[test]
    fn classify_chordal_graphs() {
        // Bowtie: two triangles sharing vertex 2. Its 2K2 of outer edges
        // rules out a split partition.
        let bowtie =
            Graph::build(5, vec![(0, 1), (0, 2), (1, 2), (2, 3), (2, 4), (3, 4)]).unwrap();
        assert_eq!(classify(&bowtie), GraphKind::Chordal);
        // Two disjoint triangles: chordal without being connected.
        let mut edges = vec![(0, 1), (1, 2), (2, 0)];
        edges.extend([(3, 4), (4, 5), (5, 3)]);
        let g = Graph::build(6, edges).unwrap();
        assert_eq!(classify(&g), GraphKind::Chordal);
    }

    #[test]
    fn elimination_order_accepts_exactly_chordal_graphs() {
        assert!(elimination_order(&Graph::cycle(4)).is_none());
        assert!(elimination_order(&Graph::cycle(5)).is_none());
        assert!(elimination_order(&Graph::complete(4)).is_some());
        let path = Graph::build(4, vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        assert!(elimination_order(&path).is_some());
    }

    #[test]
    fn split_coloring_matches_the_clique_size() {
        let diamond = Graph::build(4, vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]).unwrap();
        let (chi, coloring) = color_special(&diamond).unwrap();
        assert_eq!(chi, 3);
        assert!(is_proper(&diamond, &coloring));
        assert_eq!(color_count(&coloring), 3);
        // K4 plus a pendant: the pendant reuses a clique color.
        let edges = vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (0, 4)];
        let g = Graph::build(5, edges).unwrap();
        assert_eq!(classify(&g), GraphKind::Split);
        let (chi, coloring) = color_special(&g).unwrap();
        assert_eq!(chi, 4);
        assert!(is_proper(&g, &coloring));
        assert_eq!(color_count(&coloring), 4);
    }

    #[test]
    fn chordal_coloring_matches_the_largest_clique() {
        let bowtie =
            Graph::build(5, vec![(0, 1), (0, 2), (1, 2), (2, 3), (2, 4), (3, 4)]).unwrap();
        let (chi, coloring) = color_special(&bowtie).unwrap();
        assert_eq!(chi, 3);
        assert!(is_proper(&bowtie, &coloring));
        assert_eq!(color_count(&coloring), 3);
        // Two triangles linked by a bridge.
        let edges = vec![(0, 1), (0, 2), (1, 2), (2, 3), (3, 4), (3, 5), (4, 5)];
        let g = Graph::build(6, edges).unwrap();
        assert_eq!(classify(&g), GraphKind::Chordal);
        let (chi, coloring) = color_special(&g).unwrap();
        assert_eq!(chi, 3);
        assert!(is_proper(&g, &coloring));
    }

    #[test]
    fn hub_with_disconnected_rim_is_not_a_wheel() {
        // Hub 6 over two triangles: degrees match a wheel, rim does not.
        let edges = vec![
            (0, 1),
            (1, 2),
            (2, 0),
            (3, 4),
            (4, 5),
            (5, 3),
            (0, 6),
            (1, 6),
            (2, 6),
            (3, 6),
            (4, 6),
            (5, 6),
        ];
        let g = Graph::build(7, edges).unwrap();
        // Not a wheel, but hub plus triangle is a K4 in a chordal graph.
        assert_eq!(classify(&g), GraphKind::Chordal);
        let (chi, coloring) = color_special(&g).unwrap();
        assert_eq!(chi, 4);
        assert!(is_proper(&g, &coloring));
    }

    #[test]
    fn special_colorings_are_proper_and_tight() {
        let cases: Vec<(Graph, usize)> = vec![
            (Graph::build(1, vec![]).unwrap(), 1),
            (Graph::build(6, vec![]).unwrap(), 1),
            (Graph::complete(5), 5),
            (Graph::star(7), 2),
            (Graph::cycle(8), 2),
            (Graph::cycle(9), 3),
            (wheel(7), 3),
            (wheel(6), 4),
            (Graph::build(5, vec![(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap(), 2),
        ];
        for (g, expected) in cases {
            let (chi, coloring) = color_special(&g).unwrap();
            assert_eq!(chi, expected, "order {}", g.order());
            assert!(is_proper(&g, &coloring));
            assert_eq!(color_count(&coloring), chi);
        }
    }

    #[test]
    fn empty_graph_needs_no_colors() {
        let (chi, coloring) = color_special(&Graph::build(0, vec![]).unwrap()).unwrap();
        assert_eq!(chi, 0);
        assert!(coloring.is_empty());
    }

    #[test]
    fn two_color_rejects_odd_cycles() {
        assert!(two_color(&Graph::cycle(5)).is_none());
        assert!(two_color(&Graph::cycle(6)).is_some());
    }
}
