//! Per-security-level Dilithium constants and the ring constants shared by
//! every security level.

use crate::error::ThresholdError;

/// Modulus of the coefficient ring Z_q.
pub const Q: u32 = 8_380_417;

/// Degree of the ring R_q = Z_q[X]/(X^N + 1).
pub const N: usize = 256;

/// Maximum number of rejection-sampling attempts before `sign` gives up.
pub const MAX_SIGN_ATTEMPTS: usize = 64;

/// NIST security levels this crate supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityLevel {
	L2,
	L3,
	L5,
}

impl SecurityLevel {
	pub fn from_u8(level: u8) -> Result<Self, ThresholdError> {
		match level {
			2 => Ok(SecurityLevel::L2),
			3 => Ok(SecurityLevel::L3),
			5 => Ok(SecurityLevel::L5),
			other => Err(ThresholdError::InvalidConfig(format!(
				"unsupported security level {other}, expected 2, 3 or 5"
			))),
		}
	}

	pub fn as_u8(self) -> u8 {
		match self {
			SecurityLevel::L2 => 2,
			SecurityLevel::L3 => 3,
			SecurityLevel::L5 => 5,
		}
	}
}

/// Concrete Dilithium parameter set: matrix shape, noise bound, challenge
/// sparsity, and the rejection-sampling bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameters {
	pub level: SecurityLevel,
	/// Rows of the public matrix A / length of s2 and t.
	pub k: usize,
	/// Columns of the public matrix A / length of s1.
	pub l: usize,
	/// Secret-key coefficient bound: s1, s2 coefficients lie in [-eta, eta].
	pub eta: u32,
	/// Hamming weight of the challenge polynomial c.
	pub tau: usize,
	/// Bound on mask coefficients: y coefficients lie in (-gamma1, gamma1].
	pub gamma1: u32,
	/// Low-order decomposition modulus half-width.
	pub gamma2: u32,
	/// z acceptance bound: tau * eta.
	pub beta: u32,
	/// Number of bits dropped from t when forming t1 (kept for parity with
	/// FIPS 204; the core publishes the undropped t0 too, see `PublicKey`).
	pub d: u32,
	/// Maximum allowed Hamming weight of the hint vector h.
	pub omega: usize,
}

impl Parameters {
	pub const fn for_level(level: SecurityLevel) -> Self {
		match level {
			SecurityLevel::L2 => Parameters {
				level,
				k: 4,
				l: 4,
				eta: 2,
				tau: 39,
				gamma1: 1 << 17,
				gamma2: (Q - 1) / 88,
				beta: 78,
				d: 13,
				omega: 80,
			},
			SecurityLevel::L3 => Parameters {
				level,
				k: 6,
				l: 5,
				eta: 4,
				tau: 49,
				gamma1: 1 << 19,
				gamma2: (Q - 1) / 32,
				beta: 196,
				d: 13,
				omega: 55,
			},
			SecurityLevel::L5 => Parameters {
				level,
				k: 8,
				l: 7,
				eta: 2,
				tau: 60,
				gamma1: 1 << 19,
				gamma2: (Q - 1) / 32,
				beta: 120,
				d: 13,
				omega: 75,
			},
		}
	}
}
