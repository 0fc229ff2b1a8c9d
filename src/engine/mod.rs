//! The constraint pipeline: Normalize -> Fold -> Sort.
//!
//! Each sort cycle builds a fresh [`ConstraintGraph`] from the registry's
//! immutable item records, then runs three stages over it:
//!
//! 1. [`normalize`](normalize::normalize): rewrite `after` constraints
//!    into `before` edges and resolve every edge to a dense node index,
//!    dropping references to unregistered ids.
//! 2. [`fold`](fold::fold): synthesize `before` edges between adjacent
//!    priority tiers so priority and explicit ordering compose into one
//!    graph.
//! 3. [`sort`](kahn::sort): Kahn's algorithm with a deterministic
//!    tie-break; fails with [`SortError::CycleFound`] when the constraints
//!    are contradictory.
//!
//! The explicit [`Stage`] enum makes each stage run exactly once per
//! cycle: a stage invoked out of order is a no-op.

use crate::registry::Registry;
use crate::sort_error::SortError;

pub mod fold;
pub mod kahn;
pub mod normalize;

/// Pipeline position of a [`ConstraintGraph`].
///
/// A graph starts `Unsorted` and only moves forward; the owning sorter
/// starts a new cycle (a new graph) after any registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Fresh graph; no edges resolved yet.
    Unsorted,
    /// Directional constraints rewritten to resolved `before` edges.
    Normalized,
    /// Priority tiers folded into synthetic `before` edges.
    Folded,
    /// A total order was produced.
    Sorted,
}

/// Scratch constraint graph for one sort cycle.
///
/// Nodes are dense indices into the registry's registration-order item
/// list. `edges[i]` lists the nodes that must come *after* node `i`
/// (`i` carries a `before` edge to each of them), in insertion order.
/// The edge set is simple: duplicate insertions are ignored.
#[derive(Clone, Debug)]
pub struct ConstraintGraph {
    edges: Vec<Vec<usize>>,
    stage: Stage,
}

impl ConstraintGraph {
    /// An edgeless graph over `node_count` nodes, in stage `Unsorted`.
    pub fn new(node_count: usize) -> Self {
        Self {
            edges: vec![Vec::new(); node_count],
            stage: Stage::Unsorted,
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Current pipeline stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Nodes that must come after `node`, in edge insertion order.
    pub fn successors(&self, node: usize) -> &[usize] {
        &self.edges[node]
    }

    /// Insert `src` -> `dst` ("src before dst"), ignoring duplicates.
    pub(crate) fn push_edge(&mut self, src: usize, dst: usize) {
        if !self.edges[src].contains(&dst) {
            self.edges[src].push(dst);
        }
    }

    pub(crate) fn advance(&mut self, stage: Stage) {
        self.stage = stage;
    }
}

/// Run the full pipeline over the registry's current contents.
///
/// Returns node indices in final order, or the cycle failure. Invoked
/// lazily by the sorter and memoized until the next registration.
pub(crate) fn compute_order<T>(registry: &Registry<T>) -> Result<Vec<usize>, SortError> {
    let mut graph = ConstraintGraph::new(registry.len());
    normalize::normalize(registry, &mut graph);
    fold::fold(registry, &mut graph);
    log::debug!(
        "sorting {} items over {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    kahn::sort(&mut graph)
}
