//! Cycle-safe topological sort: Kahn's algorithm over the folded graph.

use crate::sort_error::SortError;

use super::{ConstraintGraph, Stage};

/// Produce a total order of the graph's nodes, or fail on a cycle.
///
/// The frontier of indegree-0 nodes is a LIFO stack, seeded with the
/// roots reversed. The combination makes roots come out in registration
/// order, while nodes unlocked by a consumed edge come out in *reverse*
/// discovery order. That tie-break is part of the contract; callers rely
/// on the exact sequences it produces.
///
/// No partial result ever escapes: when the frontier drains with nodes
/// still unemitted, the remainder contains at least one cycle and the
/// whole sort fails with [`SortError::CycleFound`].
pub fn sort(graph: &mut ConstraintGraph) -> Result<Vec<usize>, SortError> {
    debug_assert_eq!(graph.stage(), Stage::Folded, "sort requires a folded graph");
    let n = graph.node_count();

    // Indegree per node. Self-edges count: a node that must precede
    // itself can never enter the frontier, which is exactly the cycle
    // failure we want.
    let mut indegree = vec![0usize; n];
    for node in 0..n {
        for &dst in graph.successors(node) {
            indegree[dst] += 1;
        }
    }

    // Roots were discovered in registration order; reverse them so the
    // stack pops them back out in registration order.
    let mut frontier: Vec<usize> = (0..n).filter(|&node| indegree[node] == 0).collect();
    frontier.reverse();

    let mut order = Vec::with_capacity(n);
    while let Some(node) = frontier.pop() {
        order.push(node);
        for &succ in graph.successors(node) {
            indegree[succ] -= 1;
            if indegree[succ] == 0 {
                frontier.push(succ);
            }
        }
    }

    if order.len() == n {
        graph.advance(Stage::Sorted);
        Ok(order)
    } else {
        log::debug!(
            "cycle detected: {} of {} nodes unsortable",
            n - order.len(),
            n
        );
        Err(SortError::CycleFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(n: usize, edges: &[(usize, usize)]) -> ConstraintGraph {
        let mut graph = ConstraintGraph::new(n);
        for &(src, dst) in edges {
            graph.push_edge(src, dst);
        }
        graph.advance(Stage::Folded);
        graph
    }

    #[test]
    fn edgeless_nodes_keep_registration_order() {
        let mut graph = graph_with(4, &[]);
        assert_eq!(sort(&mut graph).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(graph.stage(), Stage::Sorted);
    }

    #[test]
    fn chain_is_followed() {
        let mut graph = graph_with(4, &[(3, 2), (2, 1), (1, 0)]);
        assert_eq!(sort(&mut graph).unwrap(), vec![3, 2, 1, 0]);
    }

    #[test]
    fn unlocked_nodes_emit_in_reverse_discovery_order() {
        // 0 unlocks 1 then 2; the stack emits 2 before 1.
        let mut graph = graph_with(3, &[(0, 1), (0, 2)]);
        assert_eq!(sort(&mut graph).unwrap(), vec![0, 2, 1]);
    }

    #[test]
    fn diamond_quirk_sequence() {
        // Registration A,B,C,D,E with C->A, D->C, E->B, E->D.
        // B is discovered before D but the LIFO frontier emits D's chain
        // first: E, D, C, A, B.
        let mut graph = graph_with(5, &[(2, 0), (3, 2), (4, 1), (4, 3)]);
        assert_eq!(sort(&mut graph).unwrap(), vec![4, 3, 2, 0, 1]);
    }

    #[test]
    fn self_cycle_fails() {
        let mut graph = graph_with(1, &[(0, 0)]);
        assert_eq!(sort(&mut graph), Err(SortError::CycleFound));
        assert_ne!(graph.stage(), Stage::Sorted);
    }

    #[test]
    fn two_cycle_fails() {
        let mut graph = graph_with(2, &[(0, 1), (1, 0)]);
        assert_eq!(sort(&mut graph), Err(SortError::CycleFound));
    }

    #[test]
    fn three_cycle_fails() {
        let mut graph = graph_with(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(sort(&mut graph), Err(SortError::CycleFound));
    }

    #[test]
    fn cycle_with_sortable_prefix_still_fails() {
        // 0 sorts fine, 1 and 2 form a cycle; no partial result escapes.
        let mut graph = graph_with(3, &[(1, 2), (2, 1)]);
        assert_eq!(sort(&mut graph), Err(SortError::CycleFound));
    }

    #[test]
    fn empty_graph_sorts_to_empty() {
        let mut graph = graph_with(0, &[]);
        assert_eq!(sort(&mut graph).unwrap(), Vec::<usize>::new());
    }
}
