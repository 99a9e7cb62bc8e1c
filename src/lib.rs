//! # rangefork
//!
//! Parallel loops and reductions over integer index ranges.
//!
//! This crate runs a loop body over `[begin, end)` with a positive stride,
//! recursively splitting the range into disjoint sub-ranges that a shared
//! work-stealing pool processes in parallel. It targets numeric and
//! array-processing workloads where the computation for each index is
//! independent of every other index.
//!
//! ## Loops
//!
//! A serial square-and-store:
//!
//! ```
//! fn sqr_serial(a: &[i32], b: &mut [i32]) {
//!     for i in 0..a.len() {
//!         b[i] = a[i] * a[i];
//!     }
//! }
//! ```
//!
//! becomes, with independent per-index writes expressed through atomics:
//!
//! ```
//! use std::sync::atomic::{AtomicI32, Ordering};
//! use rangefork::loop_over;
//!
//! let a: Vec<i32> = (0..10).collect();
//! let b: Vec<AtomicI32> = (0..10).map(|_| AtomicI32::new(0)).collect();
//! loop_over(10, |i: i32| {
//!     let i = i as usize;
//!     b[i].store(a[i] * a[i], Ordering::Relaxed);
//! })
//! .unwrap();
//! assert_eq!(b[9].load(Ordering::Relaxed), 81);
//! ```
//!
//! The order in which indices run is indeterminate and irrelevant; what is
//! guaranteed is that every index in the range is computed exactly once, and
//! that all memory effects are visible to the caller when the call returns.
//!
//! ## Reductions
//!
//! [`reduce`] folds a value out of the range. The combiner must be
//! associative, but it need not be commutative: combines are composed in
//! left-to-right index order, so the result equals the sequential fold no
//! matter how sub-ranges are scheduled.
//!
//! ```
//! use rangefork::{reduce, Reducer};
//!
//! let a: Vec<f64> = (1..=100).map(f64::from).collect();
//! let sum = reduce(100, Reducer::new(|i: i32| a[i as usize], |x: f64, y: f64| x + y)).unwrap();
//! assert_eq!(sum, 5050.0);
//! ```
//!
//! ## Strides and chunks
//!
//! The [`IndexRange`] builder exposes the general form
//! `for i in (begin..end).step_by(step)` plus an optional `chunk`, the
//! index-span threshold below which a sub-range is processed serially.
//! Tasks are split only above the threshold, so a larger chunk trades
//! parallel slack for lower task overhead. Left unset, the chunk defaults
//! to a value targeting about eight leaf tasks per worker.
//!
//! ## Nesting
//!
//! Loop bodies may themselves call [`loop_over`], [`reduce`], or
//! [`IndexRange`] methods. A nested call on a pool worker is invoked
//! directly on that worker rather than submitted and waited on, so nested
//! parallelism composes without deadlock at any depth. All invocations in
//! the process share one lazily-built worker pool sized to the logical core
//! count (see [`parallelism`] and, for tests, [`set_parallelism`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

mod body;
mod chunk;
mod error;
mod pool;
mod range;
mod split;
mod task;

pub use body::{LoopBody, ReduceBody, Reducer};
pub use error::RangeError;
pub use pool::{parallelism, set_parallelism};
pub use range::IndexRange;

/// Runs `body.compute(i)` for `i = 0, 1, …, end-1` in parallel.
///
/// Shorthand for `IndexRange::to(end).run(body)`; see
/// [`IndexRange::run`] for the full contract.
///
/// # Errors
///
/// Returns [`RangeError::InvalidRange`] when `end <= 0`.
pub fn loop_over<B: LoopBody>(end: i32, body: B) -> Result<(), RangeError> {
    IndexRange::to(end).run(body)
}

/// Reduces `i = 0, 1, …, end-1` to a single value in parallel.
///
/// Shorthand for `IndexRange::to(end).reduce(body)`; see
/// [`IndexRange::reduce`] for the combine-order guarantee.
///
/// # Errors
///
/// Returns [`RangeError::InvalidRange`] when `end <= 0`.
pub fn reduce<V, B>(end: i32, body: B) -> Result<V, RangeError>
where
    V: Send,
    B: ReduceBody<V>,
{
    IndexRange::to(end).reduce(body)
}
