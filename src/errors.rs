use thiserror::Error;

/// Failure modes of the signature stack.
///
/// Validation failures (`PointNotOnCurve`, `IncorrectSize`) come from
/// untrusted wire bytes; input failures (`ZeroSecretKey`, `EmptyInput`,
/// `EmptyAggregateInput`, `InputLengthMismatch`, `InvalidXmdLength`,
/// `InvalidWindowSize`, `PrecomputesExist`) come from the caller misusing
/// the API. `AggregateSignature::verify_batch` converts validation failures
/// into `false` after its up-front input checks; every other operation
/// propagates them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlsError {
    /// The decoded or supplied point does not satisfy the curve equation.
    #[error("point is not on the curve")]
    PointNotOnCurve,
    /// A byte input has the wrong length for its type.
    #[error("input has incorrect length")]
    IncorrectSize,
    /// A pairing argument was the point at infinity.
    #[error("no pairings at the point of infinity")]
    PairingAtInfinity,
    /// The secret scalar reduced to zero.
    #[error("secret key cannot be zero")]
    ZeroSecretKey,
    /// Aggregation over an empty list of keys or signatures.
    #[error("cannot aggregate an empty input")]
    EmptyAggregateInput,
    /// Batch verification over empty message/key lists.
    #[error("batch input is empty")]
    EmptyInput,
    /// Message and public-key counts differ in batch verification.
    #[error("message count does not match public key count")]
    InputLengthMismatch,
    /// `expand_message_xmd` output length exceeds 255 digest blocks.
    #[error("requested expand_message_xmd output is too long")]
    InvalidXmdLength,
    /// Window size outside the supported 1..=16 range.
    #[error("window size must be between 1 and 16")]
    InvalidWindowSize,
    /// A precompute table is already present; clear it before rebuilding.
    #[error("precomputes already built; clear them first")]
    PrecomputesExist,
}
