//! # Sorter: the combined priority + topological ordering engine
//!
//! This module defines the `Sorter` trait (the `{add, sorted}` capability
//! every ordering engine in this crate exposes) and the production
//! implementation `TopoSorter`, which composes the item registry, the
//! Normalize -> Fold -> Sort pipeline, and the memoized order cache.
//!
//! `TopoSorter` is the type callers want; the alternatives in
//! [`baseline`](crate::baseline) exist for tests and benchmarks only.

use crate::cache::{InvalidateCache, SortCache};
use crate::engine;
use crate::registry::{Constraints, ItemId, Registry};
use crate::sort_error::SortError;

/// The `{add, sorted}` capability of an ordering engine.
///
/// Exactly one production engine implements this: [`TopoSorter`].
pub trait Sorter<T> {
    /// Register one unconstrained item, returning its confirmed unique id.
    fn add(&mut self, item: T) -> ItemId;

    /// Register one item with constraint metadata, returning its
    /// confirmed unique id.
    fn add_with(&mut self, item: T, constraints: Constraints) -> ItemId;

    /// Items in final computed order, or the cycle failure.
    fn sorted_vec(&self) -> Result<Vec<&T>, SortError>;
}

/// Orders opaque items by priority tiers and before/after edges.
///
/// Items are registered as they arrive, each carrying optional priority
/// and/or before/after identifiers (which may name items registered
/// later). On the first ordered read after a registration, the engine
/// normalizes edge directions, folds priority tiers into the constraint
/// graph, runs a cycle-safe Kahn sort, and memoizes the result until the
/// next registration.
///
/// The engine never inspects the payload, only identifiers and
/// constraint metadata, so any payload type works.
///
/// ```rust
/// use topo_order::prelude::*;
///
/// let mut sorter = TopoSorter::new();
/// sorter.add_with("b", Constraints::new().with_id("B"));
/// sorter.add_with("a", Constraints::new().with_id("A").before("B"));
/// let order: Vec<_> = sorter.sorted().unwrap().collect();
/// assert_eq!(order, [&"a", &"b"]);
/// ```
///
/// Exclusive ownership per instance is assumed; wrap in a lock for
/// cross-thread mutation.
#[derive(Clone, Debug)]
pub struct TopoSorter<T> {
    registry: Registry<T>,
    cache: SortCache,
}

impl<T> Default for TopoSorter<T> {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            cache: SortCache::default(),
        }
    }
}

impl<T> TopoSorter<T> {
    /// Create an empty sorter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one unconstrained item (priority 0, no edges), returning
    /// its confirmed unique id.
    pub fn add(&mut self, item: T) -> ItemId {
        self.add_with(item, Constraints::default())
    }

    /// Register one item with constraint metadata, returning its
    /// confirmed unique id.
    ///
    /// Marks the computed order dirty; the next ordered read re-sorts.
    pub fn add_with(&mut self, item: T, constraints: Constraints) -> ItemId {
        self.cache.invalidate();
        self.registry.insert(item, constraints)
    }

    /// Lazy, restartable iterator over payloads in final computed order.
    ///
    /// Triggers the full Normalize -> Fold -> Sort pipeline only when the
    /// item set changed since the last read; otherwise serves the
    /// memoized order. Idempotent between registrations.
    pub fn sorted(&self) -> Result<Sorted<'_, T>, SortError> {
        let order = self.order()?;
        Ok(Sorted {
            registry: &self.registry,
            inner: order.iter(),
        })
    }

    /// Payload references in final computed order.
    pub fn sorted_vec(&self) -> Result<Vec<&T>, SortError> {
        Ok(self.sorted()?.collect())
    }

    /// Confirmed ids in final computed order.
    pub fn sorted_ids(&self) -> Result<Vec<ItemId>, SortError> {
        let order = self.order()?;
        Ok(order
            .iter()
            .map(|&idx| self.registry.id_at(idx).clone())
            .collect())
    }

    fn order(&self) -> Result<&[usize], SortError> {
        self.cache
            .order_or_init(|| engine::compute_order(&self.registry))
    }

    /// Borrow a payload by id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.registry.get(id)
    }

    /// Whether an item with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Confirmed ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.registry.ids()
    }
}

impl<T> Sorter<T> for TopoSorter<T> {
    fn add(&mut self, item: T) -> ItemId {
        TopoSorter::add(self, item)
    }

    fn add_with(&mut self, item: T, constraints: Constraints) -> ItemId {
        TopoSorter::add_with(self, item, constraints)
    }

    fn sorted_vec(&self) -> Result<Vec<&T>, SortError> {
        TopoSorter::sorted_vec(self)
    }
}

impl<T> InvalidateCache for TopoSorter<T> {
    fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }
}

/// Iterator over payloads in final computed order.
///
/// Restartable: cloning rewinds to the start, and a fresh one can be
/// obtained from [`TopoSorter::sorted`] at no recomputation cost while
/// the cache is clean.
#[derive(Debug)]
pub struct Sorted<'a, T> {
    registry: &'a Registry<T>,
    inner: std::slice::Iter<'a, usize>,
}

impl<'a, T> Clone for Sorted<'a, T> {
    fn clone(&self) -> Self {
        Sorted {
            registry: self.registry,
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Sorted<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|&idx| self.registry.payload_at(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Sorted<'_, T> {}

impl<T> DoubleEndedIterator for Sorted<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|&idx| self.registry.payload_at(idx))
    }
}
