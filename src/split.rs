//! Range midpoint computation for task splitting.

/// Splits `[begin, end)` at a step-aligned midpoint `m`.
///
/// `m` has the form `begin + k*step` with `k >= 1`, so the left half
/// `[begin, m)` is never empty and every split makes progress. The split
/// rounds toward the left: the left half is never smaller than the right.
/// `m` never exceeds `end`; when `m == end` the right half is empty and the
/// caller creates no right task.
pub(crate) fn middle(begin: i32, end: i32, step: i32) -> i32 {
    let begin = i64::from(begin);
    let end = i64::from(end);
    let step = i64::from(step);
    (begin + step + (end - begin - 1) / 2 / step * step) as i32
}
