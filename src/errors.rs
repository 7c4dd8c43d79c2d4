use thiserror::Error;

/// Errors produced by the dispatch engine.
///
/// `FrameOutOfRange` is the one kind the calculation contract itself can
/// raise at runtime; the remaining variants guard construction-time and
/// parallel-execution preconditions the engine relies on. Capacity and
/// volume overruns are invariant violations caught by `debug_assert!`
/// rather than represented here, since they indicate a calculator bug
/// rather than a condition a caller can recover from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeritError {
    #[error("frame {frame} out of range [0, {horizon})")]
    FrameOutOfRange { frame: usize, horizon: usize },

    #[error("profile length {actual} does not match horizon {expected}")]
    ProfileLengthMismatch { expected: usize, actual: usize },

    #[error("batch count must divide into at least one non-empty batch, got {batches} batches over {horizon} frames")]
    InvalidBatchCount { batches: usize, horizon: usize },

    #[error("parallel calculation is undefined when storage participants are attached")]
    StorageInParallel,
}
