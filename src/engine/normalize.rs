//! Edge normalization: one direction, dense indices, no dangling targets.
//!
//! After this stage every directional constraint lives in the graph as a
//! resolved `before` edge; the topological engine never consults `after`.

use crate::registry::Registry;

use super::{ConstraintGraph, Stage};

/// Rewrite the registry's directional constraints into resolved edges.
///
/// Two passes, both in registration order so that edge insertion order
/// (and hence the engine's deterministic tie-break) is reproducible:
///
/// 1. every caller-supplied `X before Y` becomes edge `X -> Y`;
/// 2. every caller-supplied `X after Y` becomes edge `Y -> X`.
///
/// Constraints naming an unregistered id are dropped: "comes after
/// something that doesn't exist" is the same as no restriction at all.
/// Running the stage a second time in the same cycle is a no-op.
pub fn normalize<T>(registry: &Registry<T>, graph: &mut ConstraintGraph) {
    if graph.stage() != Stage::Unsorted {
        return;
    }
    for (idx, item) in registry.items().iter().enumerate() {
        for target in &item.before {
            match registry.resolve(target) {
                Some(dst) => graph.push_edge(idx, dst),
                None => log::warn!("item `{}`: dropping dangling `before` -> `{target}`", item.id),
            }
        }
    }
    for (idx, item) in registry.items().iter().enumerate() {
        for source in &item.after {
            match registry.resolve(source) {
                Some(src) => graph.push_edge(src, idx),
                None => log::warn!("item `{}`: dropping dangling `after` -> `{source}`", item.id),
            }
        }
    }
    graph.advance(Stage::Normalized);
}
