//! Divide-and-conquer tasks over index ranges.
//!
//! A task either processes its range sequentially (when the index span is at
//! or below the chunk threshold) or splits it at a step-aligned midpoint.
//! On a split, the right half is forked onto the pool as a stealable task
//! while the current thread recurses into the left half, then joins the
//! right. Reductions combine the left result with the right result, in that
//! order, as the recursion unwinds; together with the splitter's ordering
//! guarantees this makes the whole reduction equal the sequential
//! left-to-right fold.

use crate::body::{LoopBody, ReduceBody};
use crate::pool;
use crate::split;

/// Fork-join task for an action loop over `[begin, end)`.
pub(crate) struct LoopTask<'a, B> {
    begin: i32,
    end: i32,
    step: i32,
    chunk: i32,
    body: &'a B,
}

impl<'a, B: LoopBody> LoopTask<'a, B> {
    /// A chunk of 0 from the default policy behaves like 1: every leaf holds
    /// a single index.
    pub(crate) fn new(begin: i32, end: i32, step: i32, chunk: i32, body: &'a B) -> Self {
        debug_assert!(begin < end);
        Self {
            begin,
            end,
            step,
            chunk: chunk.max(1),
            body,
        }
    }

    fn subtask(&self, begin: i32, end: i32) -> Self {
        Self {
            begin,
            end,
            step: self.step,
            chunk: self.chunk,
            body: self.body,
        }
    }

    fn is_leaf(&self) -> bool {
        span(self.begin, self.end) <= i64::from(self.chunk) * i64::from(self.step)
    }

    pub(crate) fn invoke(&self) {
        if self.is_leaf() {
            // i64 cursor so the final increment cannot wrap near i32::MAX.
            let end = i64::from(self.end);
            let mut i = i64::from(self.begin);
            while i < end {
                self.body.compute(i as i32);
                i += i64::from(self.step);
            }
        } else {
            let m = split::middle(self.begin, self.end, self.step);
            let left = self.subtask(self.begin, m);
            if m < self.end {
                let right = self.subtask(m, self.end);
                pool::fork_join(|| left.invoke(), || right.invoke());
            } else {
                left.invoke();
            }
        }
    }
}

/// Fork-join task for a reduction over `[begin, end)`.
pub(crate) struct ReduceTask<'a, B> {
    begin: i32,
    end: i32,
    step: i32,
    chunk: i32,
    body: &'a B,
}

impl<'a, B> ReduceTask<'a, B> {
    pub(crate) fn new(begin: i32, end: i32, step: i32, chunk: i32, body: &'a B) -> Self {
        debug_assert!(begin < end);
        Self {
            begin,
            end,
            step,
            chunk: chunk.max(1),
            body,
        }
    }

    fn subtask(&self, begin: i32, end: i32) -> Self {
        Self {
            begin,
            end,
            step: self.step,
            chunk: self.chunk,
            body: self.body,
        }
    }

    fn is_leaf(&self) -> bool {
        span(self.begin, self.end) <= i64::from(self.chunk) * i64::from(self.step)
    }

    pub(crate) fn invoke<V>(&self) -> V
    where
        V: Send,
        B: ReduceBody<V>,
    {
        if self.is_leaf() {
            // The leaf is non-empty by construction, so compute(begin) seeds
            // the accumulator and later indices fold in from the right.
            let mut v = self.body.compute(self.begin);
            let end = i64::from(self.end);
            let mut i = i64::from(self.begin) + i64::from(self.step);
            while i < end {
                let vi = self.body.compute(i as i32);
                v = self.body.combine(v, vi);
                i += i64::from(self.step);
            }
            v
        } else {
            let m = split::middle(self.begin, self.end, self.step);
            let left = self.subtask(self.begin, m);
            if m < self.end {
                let right = self.subtask(m, self.end);
                let (lv, rv) = pool::fork_join(|| left.invoke(), || right.invoke());
                self.body.combine(lv, rv)
            } else {
                left.invoke()
            }
        }
    }
}

fn span(begin: i32, end: i32) -> i64 {
    i64::from(end) - i64::from(begin)
}
