//! Error types for abigen-core
//!
//! Covers the failure modes of ABI extraction and type translation. All of
//! these abort the current contract's generation; whether they abort a batch
//! is the driver's decision.

use thiserror::Error;

/// Errors that can occur during ABI normalization and type translation
#[derive(Debug, Error)]
pub enum Error {
    /// A type descriptor matched none of the translation rules and is not a tuple
    #[error("unknown ABI type: {0}")]
    UnknownType(String),

    /// A tuple descriptor arrived without a usable component list
    #[error("tuple type `{0}` has no components")]
    MalformedTuple(String),

    /// None of the accepted document shapes yielded a non-empty member list
    #[error("no ABI entries found in {0}")]
    MissingAbi(String),

    /// An ABI member did not deserialize into its expected shape
    #[error("malformed ABI entry: {0}")]
    Json(#[from] serde_json::Error),
}
