//! Item registry: unique-identity assignment and constrained item storage.
//!
//! The registry owns every registered item (payload, confirmed
//! identifier, priority, before/after sets) and guarantees identifier
//! uniqueness for the registry's lifetime. Registration is O(1) amortized
//! hash insertion; there is no remove operation, items live until the
//! registry itself is dropped.

use std::collections::HashMap;

pub mod item;

pub use item::{Constraints, IdList, ItemId};

pub(crate) use item::Item;

/// Storage for registered items, addressed by confirmed-unique ids.
///
/// The registry is the leaf component of the sorter: it knows nothing
/// about edges or priorities beyond storing them verbatim. Items keep
/// their registration order, which downstream stages rely on for
/// deterministic output.
#[derive(Clone, Debug)]
pub struct Registry<T> {
    /// Items in registration order; the index into this vec is the dense
    /// node handle used by the constraint graph.
    items: Vec<Item<T>>,
    /// Confirmed id -> dense index.
    index: HashMap<ItemId, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Registry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one item with its constraint metadata, returning the
    /// confirmed unique id.
    ///
    /// An omitted id is replaced by a generated token; a taken id gets a
    /// `-1`, `-2`, … suffix until unique. An existing entry is never
    /// overwritten.
    pub fn insert(&mut self, payload: T, constraints: Constraints) -> ItemId {
        let Constraints {
            id,
            priority,
            before,
            after,
        } = constraints;
        let constrained = !before.is_empty() || !after.is_empty();
        let id = self.enforce_unique_id(id);
        let item = Item {
            id: id.clone(),
            payload,
            priority: priority.unwrap_or(0),
            constrained,
            before,
            after,
        };
        self.index.insert(id.clone(), self.items.len());
        self.items.push(item);
        id
    }

    /// Resolve a proposed (or absent) id into a confirmed-unique one.
    fn enforce_unique_id(&self, proposed: Option<ItemId>) -> ItemId {
        match proposed {
            Some(id) => {
                if !self.index.contains_key(id.as_str()) {
                    return id;
                }
                let mut counter = 1usize;
                loop {
                    let candidate = id.suffixed(counter);
                    if !self.index.contains_key(candidate.as_str()) {
                        return candidate;
                    }
                    counter += 1;
                }
            }
            None => loop {
                let candidate = ItemId::random();
                if !self.index.contains_key(candidate.as_str()) {
                    return candidate;
                }
            },
        }
    }

    /// Dense node index of a registered id, if any.
    pub(crate) fn resolve(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id.as_str()).copied()
    }

    /// Borrow a payload by id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&idx| &self.items[idx].payload)
    }

    /// Whether an item with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Confirmed ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    pub(crate) fn items(&self) -> &[Item<T>] {
        &self.items
    }

    pub(crate) fn payload_at(&self, idx: usize) -> &T {
        &self.items[idx].payload
    }

    pub(crate) fn id_at(&self, idx: usize) -> &ItemId {
        &self.items[idx].id
    }
}
