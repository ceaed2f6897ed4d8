//! DSATUR saturation-degree coloring heuristic.

use crate::bounds::HeuristicColoring;
use crate::coloring::{self, Color};
use crate::graph::Graph;

/// Colors the graph by repeatedly taking the most saturated uncolored
/// vertex (most distinct neighbor colors), breaking ties by higher static
/// degree, then by lower index.
///
/// Saturations of the chosen vertex's uncolored neighbors are recomputed
/// after every assignment rather than decremented; a single assignment can
/// change a neighbor's distinct-color count by more than one.
pub fn dsatur(graph: &Graph) -> HeuristicColoring {
    let n = graph.order();
    let mut partial: Vec<Option<Color>> = vec![None; n];
    let mut saturation = vec![0usize; n];
    let mut max_color = 0;

    for _ in 0..n {
        let Some(v) = select(graph, &partial, &saturation) else {
            break;
        };
        let c = coloring::smallest_free_color(graph, v, &partial);
        partial[v] = Some(c);
        max_color = max_color.max(c);
        for &w in graph.neighbors(v) {
            if partial[w].is_none() {
                saturation[w] = coloring::neighbor_color_count(graph, w, &partial);
            }
        }
    }

    let coloring: Vec<Color> = partial.into_iter().flatten().collect();
    HeuristicColoring {
        colors: if n == 0 { 0 } else { max_color as usize + 1 },
        coloring,
    }
}

/// Next vertex to color. Scanning in index order makes the lowest index win
/// all remaining ties.
fn select(graph: &Graph, partial: &[Option<Color>], saturation: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for v in 0..graph.order() {
        if partial[v].is_some() {
            continue;
        }
        let better = match best {
            None => true,
            Some(b) => {
                (saturation[v], graph.degree(v)) > (saturation[b], graph.degree(b))
            }
        };
        if better {
            best = Some(v);
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
