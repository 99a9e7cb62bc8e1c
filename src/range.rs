//! The `IndexRange` builder: argument validation, chunk resolution, and
//! dispatch of the root task.

use crate::body::{LoopBody, ReduceBody};
use crate::chunk;
use crate::error::RangeError;
use crate::pool;
use crate::task::{LoopTask, ReduceTask};

/// A half-open index range `[begin, end)` walked with a positive stride.
///
/// This is the full-control entry point; [`loop_over`](crate::loop_over) and
/// [`reduce`](crate::reduce) cover the common `[0, end)` unit-stride case.
/// Configure with the builder methods, then execute with [`run`](Self::run)
/// or [`reduce`](Self::reduce):
///
/// ```
/// use rangefork::{IndexRange, Reducer};
///
/// // Sum of 2, 5, 8.
/// let sum: i32 = IndexRange::new(2, 11)
///     .step(3)
///     .reduce(Reducer::new(|i: i32| i, |a: i32, b: i32| a + b))
///     .unwrap();
/// assert_eq!(sum, 15);
/// ```
///
/// Arguments are validated when the range executes, not when it is built:
/// `begin < end`, `step > 0`, and any explicit `chunk > 0` must hold, or the
/// matching [`RangeError`] comes back before the body runs for any index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    begin: i32,
    end: i32,
    step: i32,
    chunk: Option<i32>,
}

impl IndexRange {
    /// The range `[0, end)` with unit stride.
    pub fn to(end: i32) -> Self {
        Self::new(0, end)
    }

    /// The range `[begin, end)` with unit stride.
    pub fn new(begin: i32, end: i32) -> Self {
        Self {
            begin,
            end,
            step: 1,
            chunk: None,
        }
    }

    /// Sets the index increment (default 1).
    pub fn step(mut self, step: i32) -> Self {
        self.step = step;
        self
    }

    /// Sets the chunk size: the index-span threshold below which a sub-range
    /// runs sequentially instead of splitting.
    ///
    /// Larger chunks mean fewer tasks and less overhead but less parallel
    /// slack. When unset, a default is computed from the pool's parallelism
    /// and current load. Performance is typically stable over a wide range
    /// of chunk sizes.
    pub fn chunk(mut self, chunk: i32) -> Self {
        self.chunk = Some(chunk);
        self
    }

    /// Validates the loop arguments and resolves the effective chunk size.
    fn resolve_chunk(&self) -> Result<i32, RangeError> {
        if self.begin >= self.end {
            return Err(RangeError::InvalidRange {
                begin: self.begin,
                end: self.end,
            });
        }
        if self.step <= 0 {
            return Err(RangeError::InvalidStep(self.step));
        }
        match self.chunk {
            Some(c) if c <= 0 => Err(RangeError::InvalidChunk(c)),
            Some(c) => Ok(c),
            None => Ok(chunk::default_chunk(self.begin, self.end, self.step)),
        }
    }

    /// Runs `body.compute(i)` once for every index in the range, in parallel.
    ///
    /// Returns once every index has been processed; the caller then observes
    /// all of the body's memory effects. Indices run in no particular order,
    /// so writes for distinct indices must not alias.
    ///
    /// A body may itself call back into this crate; nested invocations run
    /// on the worker that called them and cannot deadlock the pool.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] when `begin >= end`, `step <= 0`, or an
    /// explicit chunk is not positive. A panic in the body propagates to the
    /// caller unchanged; side effects already performed remain.
    pub fn run<B: LoopBody>(&self, body: B) -> Result<(), RangeError> {
        let chunk = self.resolve_chunk()?;
        let task = LoopTask::new(self.begin, self.end, self.step, chunk, &body);
        pool::run_root(|| task.invoke());
        Ok(())
    }

    /// Reduces the range to a single value.
    ///
    /// Equals the sequential left-to-right fold of `body.compute` over the
    /// index sequence under `body.combine`, for any associative combiner,
    /// any chunk size, and any worker count. Commutativity is not assumed;
    /// combine arguments are never reordered.
    ///
    /// # Errors
    ///
    /// Same conditions as [`run`](Self::run).
    pub fn reduce<V, B>(&self, body: B) -> Result<V, RangeError>
    where
        V: Send,
        B: ReduceBody<V>,
    {
        let chunk = self.resolve_chunk()?;
        let task = ReduceTask::new(self.begin, self.end, self.step, chunk, &body);
        Ok(pool::run_root(|| task.invoke()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn rejects_empty_and_reversed_ranges() {
        let body = |_i: i32| {};
        assert_eq!(
            IndexRange::new(5, 5).run(body),
            Err(RangeError::InvalidRange { begin: 5, end: 5 })
        );
        assert_eq!(
            IndexRange::new(9, 3).run(body),
            Err(RangeError::InvalidRange { begin: 9, end: 3 })
        );
    }

    #[test]
    fn rejects_non_positive_step_and_chunk() {
        let body = |_i: i32| {};
        assert_eq!(
            IndexRange::new(0, 10).step(0).run(body),
            Err(RangeError::InvalidStep(0))
        );
        assert_eq!(
            IndexRange::new(0, 10).step(-3).run(body),
            Err(RangeError::InvalidStep(-3))
        );
        assert_eq!(
            IndexRange::new(0, 10).chunk(0).run(body),
            Err(RangeError::InvalidChunk(0))
        );
    }

    #[test]
    fn step_is_checked_before_chunk() {
        let err = IndexRange::new(0, 10).step(0).chunk(-1).run(|_: i32| {}).unwrap_err();
        assert_eq!(err, RangeError::InvalidStep(0));
    }

    #[test]
    fn validation_precedes_any_body_invocation() {
        let calls = AtomicUsize::new(0);
        let body = |_i: i32| {
            calls.fetch_add(1, Ordering::Relaxed);
        };
        let _ = IndexRange::new(10, 0).run(&body);
        let _ = IndexRange::new(0, 10).step(-2).run(&body);
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }
}
