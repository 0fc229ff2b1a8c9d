//! # topo-order
//!
//! topo-order is a library-shaped constraint-ordering engine. It orders a
//! collection of opaque, caller-supplied items according to two kinds of
//! constraints: relative priority (an integer weight, higher sorts first)
//! and relative ordering (explicit "must come before/after" edges between
//! items). Contradictory constraints are detected as a cycle.
//!
//! ## Features
//! - Confirmed-unique string identity per item (generated or
//!   deterministically disambiguated at registration)
//! - One-direction edge normalization: `after` constraints become `before`
//!   edges before the engine runs
//! - Priority folding: numeric tiers become synthetic edges between
//!   adjacent tiers, so priority and explicit ordering compose into one
//!   constraint graph
//! - Cycle-safe Kahn topological sort with a deterministic tie-break
//! - Lazily recomputed, memoized order, invalidated on registration
//!
//! ## Determinism
//!
//! Output sequences are fully deterministic for a given registration
//! sequence: unconstrained roots (the highest priority tier included)
//! come out in registration order, while items unlocked by consumed edges
//! come out in reverse discovery order. Repeated reads with no
//! intervening registration return identical sequences.
//!
//! ## Usage
//!
//! ```rust
//! use topo_order::prelude::*;
//!
//! let mut sorter = TopoSorter::new();
//! sorter.add_with("render", Constraints::new().with_id("render"));
//! sorter.add_with("layout", Constraints::new().with_id("layout").before("render"));
//! sorter.add_with("parse", Constraints::new().with_id("parse").before(["layout", "render"]));
//!
//! let order: Vec<_> = sorter.sorted()?.collect();
//! assert_eq!(order, [&"parse", &"layout", &"render"]);
//! # Ok::<(), topo_order::SortError>(())
//! ```
//!
//! The only fatal condition is a constraint cycle, surfaced as
//! [`SortError::CycleFound`]; dangling references and duplicate ids are
//! resolved silently.

// Re-export our major subsystems:
pub mod baseline;
pub mod cache;
pub mod engine;
pub mod registry;
pub mod sort_error;
pub mod sorter;

pub use cache::InvalidateCache;
pub use registry::{Constraints, ItemId, Registry};
pub use sort_error::SortError;
pub use sorter::{Sorted, Sorter, TopoSorter};

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::cache::InvalidateCache;
    pub use crate::registry::{Constraints, IdList, ItemId, Registry};
    pub use crate::sort_error::SortError;
    pub use crate::sorter::{Sorted, Sorter, TopoSorter};
}
