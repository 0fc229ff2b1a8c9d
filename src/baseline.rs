//! Reference priority sorters, kept for tests and benchmarks.
//!
//! These implement the priority-only half of the problem with no
//! constraint graph at all. They exist to cross-check the production
//! engine ([`TopoSorter`](crate::sorter::TopoSorter)) on priority-only
//! inputs and to serve as benchmark baselines; they are not peers of the
//! core and deliberately do not implement [`Sorter`](crate::sorter::Sorter).

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use crate::registry::ItemId;

/// Grouped bucket sort: items keyed by priority tier, tiers emitted from
/// highest to lowest, insertion order preserved within a tier.
///
/// This is the "bucket policy" of priority composition: O(n) over the
/// item count plus O(t log t) tier bookkeeping.
#[derive(Clone, Debug)]
pub struct GroupedSorter<T> {
    items: Vec<(ItemId, T)>,
    tiers: BTreeMap<i64, Vec<usize>>,
    index: HashMap<ItemId, usize>,
}

impl<T> Default for GroupedSorter<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            tiers: BTreeMap::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> GroupedSorter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item at priority 0 with a generated id.
    pub fn add(&mut self, item: T) -> ItemId {
        self.add_with(item, None, 0)
    }

    /// Register an item, disambiguating the id the same way the registry
    /// does (`-1`, `-2`, … suffixes, generated token when absent).
    pub fn add_with(&mut self, item: T, id: Option<&str>, priority: i64) -> ItemId {
        let id = self.enforce_unique_id(id);
        let idx = self.items.len();
        self.index.insert(id.clone(), idx);
        self.items.push((id.clone(), item));
        self.tiers.entry(priority).or_default().push(idx);
        id
    }

    fn enforce_unique_id(&self, proposed: Option<&str>) -> ItemId {
        match proposed {
            Some(id) => {
                let id = ItemId::new(id);
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

    /// Payloads from the highest tier down, insertion order within a tier.
    pub fn sorted(&self) -> Vec<&T> {
        self.tiers
            .values()
            .rev()
            .flat_map(|tier| tier.iter().map(|&idx| &self.items[idx].1))
            .collect()
    }

    /// Ids in the same order as [`sorted`](Self::sorted).
    pub fn sorted_ids(&self) -> Vec<ItemId> {
        self.tiers
            .values()
            .rev()
            .flat_map(|tier| tier.iter().map(|&idx| self.items[idx].0.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Naive comparator sort: one flat list, stable-sorted by descending
/// priority on every read. The slowest correct baseline.
#[derive(Clone, Debug)]
pub struct NaiveSorter<T> {
    items: Vec<(ItemId, i64, T)>,
    index: HashMap<ItemId, usize>,
}

impl<T> Default for NaiveSorter<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> NaiveSorter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) -> ItemId {
        self.add_with(item, None, 0)
    }

    pub fn add_with(&mut self, item: T, id: Option<&str>, priority: i64) -> ItemId {
        let id = match id {
            Some(raw) if !self.index.contains_key(raw) => ItemId::new(raw),
            Some(raw) => {
                let base = ItemId::new(raw);
                let mut counter = 1usize;
                loop {
                    let candidate = base.suffixed(counter);
                    if !self.index.contains_key(candidate.as_str()) {
                        break candidate;
                    }
                    counter += 1;
                }
            }
            None => ItemId::random(),
        };
        self.index.insert(id.clone(), self.items.len());
        self.items.push((id.clone(), priority, item));
        id
    }

    /// Payloads by descending priority; the stable sort keeps insertion
    /// order within equal priorities.
    pub fn sorted(&self) -> Vec<&T> {
        let mut refs: Vec<&(ItemId, i64, T)> = self.items.iter().collect();
        refs.sort_by_key(|(_, priority, _)| Reverse(*priority));
        refs.into_iter().map(|(_, _, item)| item).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
