//! A reference (non NTT-accelerated, non constant-time) CRYSTALS-Dilithium
//! signer: keypair generation, the Fiat–Shamir-with-aborts signing loop, and
//! verification, parameterised by [`crate::params::Parameters`].
//!
//! This module treats `(A, s1, s2, t)` as ordinary values rather than
//! session secrets shared across participants; [`crate::threshold`] is
//! where the secret vectors get split across a `(t, n)` Shamir scheme and
//! signing becomes a multi-party protocol.

pub mod challenge;
pub mod decompose;
mod keygen;
mod signing;

pub use keygen::keygen;
pub use signing::{sign, verify};

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::params::{Parameters, SecurityLevel};
use crate::ring::{Matrix, Polynomial, PolynomialVector};
use crate::Result;

/// The signer's public key: the expanded matrix and the high-order half of
/// `t = A*s1 + s2`. This core also carries `t0` (normally kept private in
/// FIPS 204) as public session state, since the threshold combiner needs it
/// to finish hint computation without any single party reconstructing the
/// full secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
	pub level: SecurityLevel,
	pub a: Matrix,
	pub t1: PolynomialVector,
	pub t0: PolynomialVector,
}

/// The signer's secret key. Zeroized on drop; never serialized as part of
/// the public protocol surface (shares of it travel as [`crate::shamir::ShamirShare`]
/// instead).
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct PrivateKey {
	#[zeroize(skip)]
	pub level: SecurityLevel,
	pub s1: PolynomialVector,
	pub s2: PolynomialVector,
}

/// A complete Dilithium signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
	pub z: PolynomialVector,
	pub h: PolynomialVector,
	pub c: Polynomial,
}

/// Single-party reference Dilithium: the non-threshold baseline
/// [`crate::threshold::ThresholdSignature`] reduces to when `t = n = 1`.
/// Exposed mainly so a caller can verify a [`crate::threshold::Signature`]
/// without going through a [`crate::threshold::ThresholdSignature`] handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dilithium {
	params: Parameters,
}

impl Dilithium {
	pub fn new(security_level: u8) -> Result<Self> {
		let level = SecurityLevel::from_u8(security_level)?;
		Ok(Dilithium { params: Parameters::for_level(level) })
	}

	/// Generate a fresh keypair. `seed` pins the RNG for reproducible
	/// tests; omit it to draw fresh entropy.
	pub fn keygen(&self, seed: Option<[u8; 32]>) -> (PublicKey, PrivateKey) {
		let mut rng = match seed {
			Some(seed) => ChaCha20Rng::from_seed(seed),
			None => ChaCha20Rng::from_entropy(),
		};
		keygen::keygen(&mut rng, self.params)
	}

	pub fn sign(&self, message: &[u8], sk: &PrivateKey, pk: &PublicKey) -> Result<Signature> {
		let mut rng = ChaCha20Rng::from_entropy();
		signing::sign(&mut rng, message, sk, pk, self.params)
	}

	pub fn verify(&self, message: &[u8], signature: &Signature, pk: &PublicKey) -> Result<bool> {
		signing::verify(message, signature, pk, self.params)
	}
}
