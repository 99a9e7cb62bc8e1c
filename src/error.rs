//! Caller-argument errors reported by the loop entry points.

use thiserror::Error;

/// Errors raised when loop arguments violate a precondition.
///
/// Every variant is detected synchronously, before any task is created and
/// before the body runs for any index. The message names the violated
/// predicate along with the offending values.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// The range is empty or reversed.
    #[error("begin<end required, got begin={begin} end={end}")]
    InvalidRange {
        /// The begin index supplied by the caller.
        begin: i32,
        /// The end index supplied by the caller.
        end: i32,
    },

    /// The index increment is zero or negative.
    #[error("step>0 required, got step={0}")]
    InvalidStep(i32),

    /// An explicitly supplied chunk size is zero or negative.
    #[error("chunk>0 required, got chunk={0}")]
    InvalidChunk(i32),
}
