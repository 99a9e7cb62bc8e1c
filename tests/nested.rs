//! Nested invocation and shared-pool tests.
//!
//! A loop body is allowed to call back into the engine. These tests pin the
//! liveness property: nested calls run on the worker that issued them, so
//! the pool cannot deadlock even when every worker is occupied by an outer
//! loop whose body is waiting on an inner one.

use std::sync::atomic::{AtomicI32, Ordering};
use std::thread;

use rangefork::{loop_over, parallelism, IndexRange, Reducer};

#[test]
fn nested_loops_fill_a_dense_grid() {
    const N: i32 = 8;
    const M: i32 = 16;
    let out: Vec<AtomicI32> = (0..N * M).map(|_| AtomicI32::new(-1)).collect();
    loop_over(N, |i: i32| {
        loop_over(M, |j: i32| {
            out[(i * M + j) as usize].store(i * M + j, Ordering::Relaxed);
        })
        .unwrap();
    })
    .unwrap();
    for (k, cell) in out.iter().enumerate() {
        assert_eq!(cell.load(Ordering::Relaxed), k as i32);
    }
}

/// Chains nested reductions `level` deep. Forcing chunk 1 makes every level
/// split and fork, so each level holds a worker frame while its inner call
/// runs; a submit-and-block dispatch would stall once the chain is deeper
/// than the pool.
fn nest(level: i32) -> i64 {
    if level == 0 {
        return 1;
    }
    IndexRange::to(2)
        .chunk(1)
        .reduce(Reducer::new(
            move |i: i32| if i == 0 { nest(level - 1) } else { 0 },
            |a: i64, b: i64| a + b,
        ))
        .unwrap()
}

#[test]
fn nesting_deeper_than_the_pool_completes() {
    let depth = parallelism() as i32 + 2;
    assert_eq!(nest(depth), 1);
}

#[test]
fn saturated_nested_loops_complete() {
    let outer = (parallelism() as i32 + 2).min(64);
    let inner = 8;
    let hits: Vec<AtomicI32> = (0..outer * inner).map(|_| AtomicI32::new(0)).collect();
    IndexRange::to(outer)
        .chunk(1)
        .run(|i: i32| {
            IndexRange::to(inner)
                .chunk(1)
                .run(|j: i32| {
                    hits[(i * inner + j) as usize].fetch_add(1, Ordering::Relaxed);
                })
                .unwrap();
        })
        .unwrap();
    for (k, h) in hits.iter().enumerate() {
        assert_eq!(h.load(Ordering::Relaxed), 1, "cell {k}");
    }
}

#[test]
fn reduce_nested_inside_a_loop() {
    let n = 12;
    let totals: Vec<AtomicI32> = (0..n).map(|_| AtomicI32::new(0)).collect();
    loop_over(n, |i: i32| {
        let row_sum: i32 = IndexRange::to(50)
            .reduce(Reducer::new(move |j: i32| i + j, |a: i32, b: i32| a + b))
            .unwrap();
        totals[i as usize].store(row_sum, Ordering::Relaxed);
    })
    .unwrap();
    for i in 0..n {
        let expected = 50 * i + (0..50).sum::<i32>();
        assert_eq!(totals[i as usize].load(Ordering::Relaxed), expected);
    }
}

#[test]
fn library_is_thread_safe() {
    // Concurrent top-level invocations from plain OS threads share the pool.
    let handles: Vec<_> = (0..4)
        .map(|t| {
            thread::spawn(move || {
                IndexRange::to(10_000)
                    .reduce(Reducer::new(
                        move |i: i32| i64::from(i) + i64::from(t),
                        |a: i64, b: i64| a + b,
                    ))
                    .unwrap()
            })
        })
        .collect();
    for (t, handle) in handles.into_iter().enumerate() {
        let expected = 9_999i64 * 10_000 / 2 + 10_000 * t as i64;
        assert_eq!(handle.join().unwrap(), expected);
    }
}
