//! Loop body capabilities.
//!
//! A body is the per-index computation handed to [`loop_over`](crate::loop_over),
//! [`reduce`](crate::reduce), or the [`IndexRange`](crate::IndexRange) builder.
//! The engine borrows the body for the duration of one invocation and shares
//! that borrow across every worker that processes a sub-range, so bodies must
//! be [`Sync`]. Computations for distinct indices must be independent; the
//! engine makes no ordering promise across indices.
//!
//! Plain closures work directly for action loops. Reductions need a compute
//! and a combine operation, so either implement [`ReduceBody`] on your own
//! type or pair two closures with [`Reducer`].

/// A loop body that computes something for an `i32` index.
///
/// Implemented for any `Fn(i32) + Sync` closure, so most callers never name
/// this trait.
pub trait LoopBody: Sync {
    /// Computes for the specified loop index. Side effects only; writes for
    /// distinct indices must not alias.
    fn compute(&self, i: i32);
}

impl<F> LoopBody for F
where
    F: Fn(i32) + Sync,
{
    fn compute(&self, i: i32) {
        self(i)
    }
}

/// A loop body that computes a value for an `i32` index and combines pairs of
/// values.
///
/// `combine` must be associative but may be non-commutative: the engine
/// guarantees that combines compose in left-to-right index order, so the
/// reduction equals the sequential fold of `compute` over the index sequence
/// for any chunk size and any worker count.
pub trait ReduceBody<V: Send>: Sync {
    /// Returns the value computed for the specified loop index.
    fn compute(&self, i: i32) -> V;

    /// Returns the combination of two values. `v1` always holds the result
    /// for lower indices than `v2`.
    fn combine(&self, v1: V, v2: V) -> V;
}

/// Pairs a compute closure with a combine closure to form a [`ReduceBody`].
///
/// # Example
///
/// ```
/// use rangefork::{reduce, Reducer};
///
/// let sum: i64 = reduce(101, Reducer::new(|i: i32| i64::from(i), |a: i64, b: i64| a + b)).unwrap();
/// assert_eq!(sum, 5050);
/// ```
pub struct Reducer<C, M> {
    compute: C,
    combine: M,
}

impl<C, M> Reducer<C, M> {
    /// Builds a reduce body from a per-index `compute` closure and an
    /// associative `combine` closure.
    pub fn new(compute: C, combine: M) -> Self {
        Self { compute, combine }
    }
}

impl<V, C, M> ReduceBody<V> for Reducer<C, M>
where
    V: Send,
    C: Fn(i32) -> V + Sync,
    M: Fn(V, V) -> V + Sync,
{
    fn compute(&self, i: i32) -> V {
        (self.compute)(i)
    }

    fn combine(&self, v1: V, v2: V) -> V {
        (self.combine)(v1, v2)
    }
}
