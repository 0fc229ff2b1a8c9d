//! Priority folding: numeric tiers become synthetic `before` edges.
//!
//! Items carrying only a numeric priority must be ordered purely by that
//! number, higher first, while coexisting with explicitly-constrained
//! items. Folding makes both commensurable: priority tiers are wired into
//! the constraint graph, after which the priority value is dead as an
//! ordering key and only edges matter.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::registry::Registry;

use super::{ConstraintGraph, Stage};

/// Synthesize `before` edges between adjacent priority tiers.
///
/// Tier membership: items whose caller supplied no `before`/`after`
/// constraint, bucketed by priority (default 0), registration order kept
/// within a bucket. Explicitly-constrained items are left out; their
/// edges alone decide where they land.
///
/// Each item of a tier gets an edge to every item of the next-lower
/// existing tier only; transitivity through the topological engine
/// recovers the full tier-to-tier ordering without an all-pairs blow-up.
pub fn fold<T>(registry: &Registry<T>, graph: &mut ConstraintGraph) {
    if graph.stage() != Stage::Normalized {
        return;
    }
    let mut tiers: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, item) in registry.items().iter().enumerate() {
        if !item.constrained {
            tiers.entry(item.priority).or_default().push(idx);
        }
    }
    for (higher, lower) in tiers.values().rev().tuple_windows() {
        for &src in higher {
            for &dst in lower {
                graph.push_edge(src, dst);
            }
        }
    }
    graph.advance(Stage::Folded);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::normalize::normalize;
    use crate::registry::Constraints;

    fn folded<T>(reg: &Registry<T>) -> ConstraintGraph {
        let mut graph = ConstraintGraph::new(reg.len());
        normalize(reg, &mut graph);
        fold(reg, &mut graph);
        graph
    }

    #[test]
    fn adjacent_tiers_only() {
        let mut reg = Registry::new();
        reg.insert((), Constraints::new().with_id("low").with_priority(1));
        reg.insert((), Constraints::new().with_id("mid").with_priority(2));
        reg.insert((), Constraints::new().with_id("high").with_priority(3));
        let graph = folded(&reg);
        // high -> mid -> low, and no direct high -> low edge
        assert_eq!(graph.successors(2), &[1]);
        assert_eq!(graph.successors(1), &[0]);
        assert_eq!(graph.successors(0), &[] as &[usize]);
    }

    #[test]
    fn default_priority_interleaves_numerically() {
        // {A:1, B:default(0), C:3} -> C's tier precedes A's precedes B's
        let mut reg = Registry::new();
        reg.insert((), Constraints::new().with_id("a").with_priority(1));
        reg.insert((), Constraints::new().with_id("b"));
        reg.insert((), Constraints::new().with_id("c").with_priority(3));
        let graph = folded(&reg);
        assert_eq!(graph.successors(2), &[0]);
        assert_eq!(graph.successors(0), &[1]);
    }

    #[test]
    fn tier_fanout_covers_every_member() {
        let mut reg = Registry::new();
        reg.insert((), Constraints::new().with_id("a").with_priority(2));
        reg.insert((), Constraints::new().with_id("b").with_priority(1));
        reg.insert((), Constraints::new().with_id("c").with_priority(1));
        let graph = folded(&reg);
        assert_eq!(graph.successors(0), &[1, 2]);
    }

    #[test]
    fn constrained_items_are_not_tiered() {
        // "a" carries an edge, so its priority must not wire it into tiers.
        let mut reg = Registry::new();
        reg.insert((), Constraints::new().with_id("a").with_priority(9).before("b"));
        reg.insert((), Constraints::new().with_id("b").with_priority(3));
        reg.insert((), Constraints::new().with_id("c").with_priority(1));
        let graph = folded(&reg);
        assert_eq!(graph.successors(0), &[1]); // explicit edge only
        assert_eq!(graph.successors(1), &[2]); // tier 3 -> tier 1
    }

    #[test]
    fn single_tier_adds_no_edges() {
        let mut reg = Registry::new();
        reg.insert((), Constraints::new().with_id("a"));
        reg.insert((), Constraints::new().with_id("b"));
        let graph = folded(&reg);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.stage(), Stage::Folded);
    }

    #[test]
    fn skipped_when_not_normalized() {
        let mut reg = Registry::new();
        reg.insert((), Constraints::new().with_id("a").with_priority(1));
        reg.insert((), Constraints::new().with_id("b").with_priority(2));
        let mut graph = ConstraintGraph::new(reg.len());
        fold(&reg, &mut graph);
        assert_eq!(graph.stage(), Stage::Unsorted);
        assert_eq!(graph.edge_count(), 0);
    }
}
