use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::params::SecurityLevel;
use crate::ring::{Polynomial, PolynomialVector};

/// One participant's share of the long-term signing key, plus the public
/// key material every participant needs to take part in a ceremony.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct KeyShare {
	#[zeroize(skip)]
	pub participant_id: u32,
	pub s1_share: PolynomialVector,
	pub s2_share: PolynomialVector,
	#[zeroize(skip)]
	pub public_key: crate::dilithium::PublicKey,
}

/// One participant's contribution to a signing ceremony for a single
/// message, produced by [`crate::threshold::ThresholdSignature::partial_sign`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSignature {
	pub participant_id: u32,
	pub z: PolynomialVector,
	pub r: PolynomialVector,
	pub c: Polynomial,
	pub session_seed: [u8; 32],
}

/// Read-only summary of a configured [`crate::threshold::ThresholdSignature`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdInfo {
	pub threshold: usize,
	pub participants: usize,
	pub security_level: SecurityLevel,
}
