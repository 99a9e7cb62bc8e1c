//! Default chunk sizing for task splitting.
//!
//! When the caller does not specify a chunk, the policy aims for roughly
//! eight times as many leaf tasks as there are workers, minus whatever is
//! already queued on the pool. The surplus gives the work-stealing scheduler
//! slack to balance uneven index costs without drowning it in task overhead.

use crate::pool;

/// Computes the default chunk size for a validated range.
pub(crate) fn default_chunk(begin: i32, end: i32, step: i32) -> i32 {
    let ni = index_count(begin, end, step);
    chunk_for(ni, pool::parallelism(), pool::queued_tasks())
}

/// Number of indices in `[begin, end)` walked with stride `step`.
///
/// Widened to `i64` so ranges spanning most of the `i32` domain stay exact.
pub(crate) fn index_count(begin: i32, end: i32, step: i32) -> i64 {
    1 + (i64::from(end) - i64::from(begin) - 1) / i64::from(step)
}

/// Chunk size for `ni` indices on `nthread` workers with `nqueued` tasks
/// already waiting.
///
/// A single-threaded pool collapses to one chunk. When the queue already
/// holds `8 * nthread` tasks or more, the whole range likewise becomes a
/// single sequential chunk. A result of 0 (more target tasks than indices)
/// is legal; tasks treat it as 1.
pub(crate) fn chunk_for(ni: i64, nthread: usize, nqueued: usize) -> i32 {
    let ntasks = if nthread > 1 {
        nthread as i64 * 8 - nqueued as i64
    } else {
        1
    };
    let chunk = if ntasks > 0 { ni / ntasks } else { ni };
    chunk.min(i64::from(i32::MAX)) as i32
}
