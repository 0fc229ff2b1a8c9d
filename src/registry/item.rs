//! `ItemId`: a strong handle for registered items, plus the constraint
//! metadata attached to them at registration time.
//!
//! Every item in a registry is addressed by a unique, opaque string
//! identifier. `ItemId` wraps a `String` so that identifiers cannot be
//! confused with item payloads or other strings in the API, while still
//! hashing and comparing like the underlying `str` (so maps keyed by
//! `ItemId` can be queried with a plain `&str`).
//!
//! This module provides:
//! - The `ItemId` newtype with constructors, accessors, and common trait
//!   implementations (`Debug`, `Display`, ordering, hashing, serde).
//! - `Constraints`, the optional registration metadata: proposed id,
//!   priority, and before/after sets.
//! - `IdList`, the conversion trait that lets `before`/`after` accept a
//!   single identifier or a collection of them.

use std::borrow::Borrow;
use std::fmt;

/// Unique identifier of a registered item.
///
/// Identifiers are confirmed unique by the registry at registration time:
/// an omitted id is replaced by a generated token, a taken id gets a
/// deterministic `-1`, `-2`, … suffix. The confirmed id is returned from
/// `add` and is the handle used by `before`/`after` constraints.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an `ItemId` from any string-like value.
    #[inline]
    pub fn new(raw: impl Into<String>) -> Self {
        ItemId(raw.into())
    }

    /// Returns the identifier as a borrowed `str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The deterministic disambiguation of this id: `id-1`, `id-2`, …
    pub(crate) fn suffixed(&self, counter: usize) -> ItemId {
        ItemId(format!("{}-{}", self.0, counter))
    }

    /// A fresh random token, used when the caller omits the id entirely.
    /// Uniqueness is still confirmed against the registry by the caller.
    pub(crate) fn random() -> ItemId {
        use rand::Rng;
        let raw: u64 = rand::thread_rng().r#gen();
        ItemId(format!("item-{raw:016x}"))
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ItemId").field(&self.0).finish()
    }
}

/// Prints only the raw identifier, without any wrapper text.
impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        ItemId(raw.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(raw: String) -> Self {
        ItemId(raw)
    }
}

/// Allows `HashMap<ItemId, _>` lookups with a plain `&str`.
impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Conversion into a list of identifiers.
///
/// `before`/`after` constraints accept either a single identifier or a
/// collection of identifiers; this trait covers both shapes without
/// forcing callers to wrap a lone id in a one-element array.
pub trait IdList {
    /// Consume `self` and produce the identifiers it names, in order.
    fn into_ids(self) -> Vec<ItemId>;
}

impl IdList for &str {
    fn into_ids(self) -> Vec<ItemId> {
        vec![ItemId::from(self)]
    }
}

impl IdList for String {
    fn into_ids(self) -> Vec<ItemId> {
        vec![ItemId::from(self)]
    }
}

impl IdList for ItemId {
    fn into_ids(self) -> Vec<ItemId> {
        vec![self]
    }
}

impl IdList for &ItemId {
    fn into_ids(self) -> Vec<ItemId> {
        vec![self.clone()]
    }
}

impl<const N: usize> IdList for [&str; N] {
    fn into_ids(self) -> Vec<ItemId> {
        self.into_iter().map(ItemId::from).collect()
    }
}

impl<const N: usize> IdList for [ItemId; N] {
    fn into_ids(self) -> Vec<ItemId> {
        self.into_iter().collect()
    }
}

impl IdList for &[&str] {
    fn into_ids(self) -> Vec<ItemId> {
        self.iter().copied().map(ItemId::from).collect()
    }
}

impl IdList for Vec<&str> {
    fn into_ids(self) -> Vec<ItemId> {
        self.into_iter().map(ItemId::from).collect()
    }
}

impl IdList for Vec<String> {
    fn into_ids(self) -> Vec<ItemId> {
        self.into_iter().map(ItemId::from).collect()
    }
}

impl IdList for Vec<ItemId> {
    fn into_ids(self) -> Vec<ItemId> {
        self
    }
}

/// Optional registration metadata for one item.
///
/// All fields default to "unconstrained": no proposed id, no explicit
/// priority (effective priority 0), empty before/after sets.
///
/// ```rust
/// use topo_order::registry::Constraints;
///
/// let c = Constraints::new()
///     .with_id("render")
///     .with_priority(5)
///     .after("layout");
/// ```
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Constraints {
    pub(crate) id: Option<ItemId>,
    pub(crate) priority: Option<i64>,
    pub(crate) before: Vec<ItemId>,
    pub(crate) after: Vec<ItemId>,
}

impl Constraints {
    /// An empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Propose an identifier. The registry disambiguates it if taken.
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the numeric priority. Higher values sort earlier among
    /// otherwise-unconstrained items.
    ///
    /// Priority only participates in ordering for items without explicit
    /// `before`/`after` constraints; on a constrained item it is ignored
    /// and the edges alone decide its position.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Require this item to precede the named item(s) in the output.
    ///
    /// Identifiers that are never registered are treated as absent
    /// constraints. Accepts a single id or a collection.
    pub fn before(mut self, ids: impl IdList) -> Self {
        self.before.extend(ids.into_ids());
        self
    }

    /// Require this item to follow the named item(s) in the output.
    ///
    /// Normalized into the equivalent `before` edges prior to sorting;
    /// dangling identifiers are treated as absent constraints.
    pub fn after(mut self, ids: impl IdList) -> Self {
        self.after.extend(ids.into_ids());
        self
    }

    /// True if the caller supplied any directional constraint.
    pub(crate) fn is_constrained(&self) -> bool {
        !self.before.is_empty() || !self.after.is_empty()
    }
}

/// One registered item: payload plus its constraint metadata.
///
/// Records are immutable once stored; the sort pipeline reads them into a
/// scratch graph rather than rewriting them in place, so a later `add`
/// replays cleanly from pristine inputs.
#[derive(Clone, Debug)]
pub(crate) struct Item<T> {
    pub(crate) id: ItemId,
    pub(crate) payload: T,
    /// Effective priority; 0 when the caller gave none.
    pub(crate) priority: i64,
    /// Whether the caller supplied any before/after constraint.
    pub(crate) constrained: bool,
    pub(crate) before: Vec<ItemId>,
    pub(crate) after: Vec<ItemId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_as_str() {
        let id = ItemId::new("alpha");
        assert_eq!(id.as_str(), "alpha");
    }

    #[test]
    fn debug_and_display() {
        let id = ItemId::new("a");
        assert_eq!(format!("{:?}", id), "ItemId(\"a\")");
        assert_eq!(format!("{}", id), "a");
    }

    #[test]
    fn ordering_and_hash() {
        let a = ItemId::new("a");
        let b = ItemId::new("b");
        assert!(a < b);
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(a.clone());
        set.insert(b);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn str_lookup_through_borrow() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(ItemId::new("key"), 7);
        assert_eq!(map.get("key"), Some(&7));
    }

    #[test]
    fn suffixed_counter() {
        let id = ItemId::new("dup");
        assert_eq!(id.suffixed(1).as_str(), "dup-1");
        assert_eq!(id.suffixed(12).as_str(), "dup-12");
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(ItemId::random(), ItemId::random());
    }

    #[test]
    fn constraints_builder_collects_sets() {
        let c = Constraints::new()
            .with_id("x")
            .with_priority(3)
            .before("a")
            .before(["b", "c"])
            .after(vec!["d".to_string()]);
        assert_eq!(c.id.as_ref().unwrap().as_str(), "x");
        assert_eq!(c.priority, Some(3));
        assert_eq!(c.before.len(), 3);
        assert_eq!(c.after.len(), 1);
        assert!(c.is_constrained());
    }

    #[test]
    fn default_constraints_are_unconstrained() {
        let c = Constraints::default();
        assert!(c.id.is_none());
        assert!(c.priority.is_none());
        assert!(!c.is_constrained());
    }

    #[test]
    fn id_list_single_and_collections() {
        assert_eq!("a".into_ids(), vec![ItemId::new("a")]);
        assert_eq!(ItemId::new("b").into_ids(), vec![ItemId::new("b")]);
        assert_eq!(["a", "b"].into_ids().len(), 2);
        assert_eq!(vec![ItemId::new("a")].into_ids().len(), 1);
    }
}
