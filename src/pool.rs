//! The shared worker pool and its fork/join and dispatch primitives.
//!
//! All loop and reduce invocations in the process share one rayon thread
//! pool. The pool is built lazily on first use and is never shut down. It is
//! configured with 8 MB worker stacks (vs rayon's 2 MB default) because
//! nested invocations recurse on a single worker's stack.
//!
//! The pool also answers the question at the heart of nested-invocation
//! safety: is the calling thread one of our workers? Workers invoke root
//! tasks directly so they keep making progress; any other thread submits the
//! root task and blocks until it completes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use rayon::ThreadPool;

static POOL: OnceLock<ThreadPool> = OnceLock::new();

/// Worker count applied when the pool is first built; 0 means logical cores.
static CONFIGURED_THREADS: AtomicUsize = AtomicUsize::new(0);

/// Approximate number of forked tasks that no worker has started yet.
static QUEUED: AtomicUsize = AtomicUsize::new(0);

fn pool() -> &'static ThreadPool {
    POOL.get_or_init(|| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(CONFIGURED_THREADS.load(Ordering::Relaxed))
            .stack_size(8 * 1024 * 1024)
            .build()
            .expect("failed to build worker pool")
    })
}

/// Returns the number of worker threads in the shared pool.
///
/// Defaults to the number of logical CPUs and is fixed for the lifetime of
/// the process. First use initializes the pool.
pub fn parallelism() -> usize {
    pool().current_num_threads()
}

/// Sets the worker count used when the pool is first built.
///
/// Intended for tests that need a pool of known size. Returns `false`, with
/// no effect, once the pool exists; call it before any loop or reduce runs.
pub fn set_parallelism(threads: usize) -> bool {
    if POOL.get().is_some() {
        return false;
    }
    CONFIGURED_THREADS.store(threads, Ordering::Relaxed);
    POOL.get().is_none()
}

/// Approximate count of forked tasks currently waiting in worker deques.
///
/// May race with concurrent forks and steals; the chunk policy tolerates
/// staleness.
pub(crate) fn queued_tasks() -> usize {
    QUEUED.load(Ordering::Relaxed)
}

/// Returns `true` when the calling thread is one of the pool's workers.
pub(crate) fn is_worker() -> bool {
    pool().current_thread_index().is_some()
}

/// Runs a root task to completion and returns its result.
///
/// On a worker thread the task is invoked directly: the worker is needed to
/// drive the left spine of its own recursion, and submit-and-block here
/// would deadlock once every worker nested. On any other thread the task is
/// submitted to the pool and the caller blocks until it completes.
pub(crate) fn run_root<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    if is_worker() {
        op()
    } else {
        pool().install(op)
    }
}

/// Decrements the queued-task count when a forked closure starts, or when it
/// is dropped unexecuted while a sibling panic unwinds.
struct ForkGuard;

impl Drop for ForkGuard {
    fn drop(&mut self) {
        QUEUED.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Forks `right` onto the current worker's deque and runs `left` on the
/// current thread, then joins.
///
/// The join is cooperative: a worker waiting on a stolen `right` executes
/// other queued tasks meanwhile. Must only be called from a task already
/// running inside the pool, which `run_root` guarantees. Results are
/// returned as `(left, right)` so reductions can combine in index order.
pub(crate) fn fork_join<L, R, LV, RV>(left: L, right: R) -> (LV, RV)
where
    L: FnOnce() -> LV + Send,
    R: FnOnce() -> RV + Send,
    LV: Send,
    RV: Send,
{
    QUEUED.fetch_add(1, Ordering::Relaxed);
    let guard = ForkGuard;
    rayon::join(left, move || {
        drop(guard);
        right()
    })
}
