use thiserror::Error;

/// Closed error surface for the threshold-Dilithium core.
///
/// Every variant is free of secret coefficient data; failures that could
/// leak which party or which coefficient misbehaved are deliberately
/// collapsed into coarser variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThresholdError {
	#[error("invalid threshold configuration: {0}")]
	InvalidConfig(String),

	#[error("insufficient shares: needed {needed}, got {got}")]
	InsufficientShares { needed: usize, got: usize },

	#[error("invalid share set (duplicate or zero participant id)")]
	InvalidShareSet,

	#[error("share length mismatch: expected {expected}, got {got}")]
	ShareLengthMismatch { expected: usize, got: usize },

	#[error("partial signatures do not share a common challenge")]
	InconsistentSession,

	#[error("combined signature violates the rejection-sampling bound")]
	SigningBoundViolation,

	#[error("Dilithium rejection loop exceeded the attempt cap")]
	RejectionExhausted,

	#[error("signature verification failed")]
	VerificationFailed,
}

pub type Result<T> = std::result::Result<T, ThresholdError>;
