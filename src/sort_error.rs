//! SortError: unified error type for topo-order public APIs
//!
//! This error type is used throughout the topo-order library to provide
//! robust, non-panicking error handling for all public APIs.

use thiserror::Error;

/// Unified error type for topo-order operations.
///
/// Cycle detection is the only fatal condition in the core: dangling
/// constraint references are treated as absent constraints, and duplicate
/// identifiers are disambiguated at registration time, so neither surfaces
/// here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SortError {
    /// The constraint graph contains a cycle; no total order satisfies it.
    ///
    /// Retrying without changing the constraints yields the same failure.
    #[error("Graph has a cycle! No topological ordering exists.")]
    CycleFound,
}
