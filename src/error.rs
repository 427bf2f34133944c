use thiserror::Error;

/// Everything that can go wrong while building a body-part tree.
///
/// Each variant carries the 1-based line number in the normalized input
/// where the condition was detected. Errors are fatal to the whole call:
/// there is no partial tree and no lenient mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmlError {
    #[error("maximum depth of 99 exceeded at line {line}")]
    MaxDepthExceeded { line: usize },

    #[error("invalid content type {value:?} at line {line}")]
    InvalidContentType { line: usize, value: String },

    #[error("multipart type lacking boundary at line {line}")]
    MissingBoundary { line: usize },

    #[error("reached line {line} expecting boundary \"--{boundary}--\", but none was found")]
    ReachedEnd { line: usize, boundary: String },

    #[error("unexpected space at the beginning of line {line}")]
    InvalidHeader { line: usize },

    #[error("decoding failed at line {line}: {reason}")]
    Decode { line: usize, reason: String },
}
