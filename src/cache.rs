//! Cache invalidation utilities and the memoized sort order.

use once_cell::sync::OnceCell;

use crate::sort_error::SortError;

/// Anything that caches derived ordering state (computed orders, folded
/// graphs, …) should implement this.
pub trait InvalidateCache {
    /// Invalidate *all* internal caches so future queries recompute correctly.
    fn invalidate_cache(&mut self);
}

// Blanket impl for Box<T>
impl<T: InvalidateCache + ?Sized> InvalidateCache for Box<T> {
    #[inline]
    fn invalidate_cache(&mut self) {
        (**self).invalidate_cache();
    }
}

/// Memoized outcome of one sort cycle: the node order, or the cycle
/// failure (retrying without new constraints reproduces it either way).
///
/// Invalidated on every registration, recomputed lazily on the next read.
#[derive(Clone, Debug, Default)]
pub(crate) struct SortCache {
    cell: OnceCell<Result<Vec<usize>, SortError>>,
}

impl SortCache {
    /// Borrow the cached order, computing it with `compute` when dirty.
    pub(crate) fn order_or_init<F>(&self, compute: F) -> Result<&[usize], SortError>
    where
        F: FnOnce() -> Result<Vec<usize>, SortError>,
    {
        match self.cell.get_or_init(compute) {
            Ok(order) => Ok(order),
            Err(err) => Err(err.clone()),
        }
    }

    /// Drop the cached outcome so the next read recomputes.
    pub(crate) fn invalidate(&mut self) {
        self.cell.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once_until_invalidated() {
        let mut cache = SortCache::default();
        let mut calls = 0;
        let order = cache
            .order_or_init(|| {
                calls += 1;
                Ok(vec![1, 0])
            })
            .unwrap()
            .to_vec();
        assert_eq!(order, vec![1, 0]);

        // Second read must not recompute.
        let again = cache.order_or_init(|| unreachable!()).unwrap().to_vec();
        assert_eq!(again, order);
        assert_eq!(calls, 1);

        cache.invalidate();
        let fresh = cache.order_or_init(|| Ok(vec![0, 1])).unwrap().to_vec();
        assert_eq!(fresh, vec![0, 1]);
    }

    #[test]
    fn failure_is_memoized_too() {
        let cache = SortCache::default();
        assert_eq!(
            cache.order_or_init(|| Err(SortError::CycleFound)),
            Err(SortError::CycleFound)
        );
        assert_eq!(
            cache.order_or_init(|| unreachable!()),
            Err(SortError::CycleFound)
        );
    }

    #[test]
    fn boxed_invalidate_cache() {
        struct Dummy(u32);
        impl InvalidateCache for Dummy {
            fn invalidate_cache(&mut self) {
                self.0 += 1;
            }
        }
        let mut boxed = Box::new(Dummy(0));
        InvalidateCache::invalidate_cache(&mut boxed);
        assert_eq!(boxed.0, 1);
    }
}
