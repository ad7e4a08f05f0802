//! (t, n) threshold CRYSTALS-Dilithium signatures: a dealer splits a
//! reference keypair's secret vectors across `n` participants via
//! [`crate::shamir::AdaptedShamirSSS`], any `t` of whom can jointly produce
//! a signature that verifies under [`crate::dilithium::verify`] without any
//! single participant reconstructing the long-term secret.

mod ceremony;
mod types;


pub use types::{KeyShare, PartialSignature, ThresholdInfo};

pub use crate::dilithium::{PublicKey, Signature};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::Result;
use crate::params::{Parameters, SecurityLevel};
use crate::shamir::AdaptedShamirSSS;

/// A configured (t, n) threshold signing session for one security level.
/// Stateless beyond its configuration: every ceremony call takes the key
/// material it needs as an explicit argument, so a single `ThresholdSignature`
/// can drive any number of independent keys at the same (t, n, level).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdSignature {
	shamir: AdaptedShamirSSS,
	params: Parameters,
}

impl ThresholdSignature {
	pub fn new(threshold: usize, participants: usize, security_level: u8) -> Result<Self> {
		let level = SecurityLevel::from_u8(security_level)?;
		let shamir = AdaptedShamirSSS::new(threshold, participants)?;
		Ok(ThresholdSignature { shamir, params: Parameters::for_level(level) })
	}

	/// Generate a fresh keypair and split its secret vectors across all
	/// configured participants. `seed` pins the dealer's RNG for
	/// reproducible tests; omit it to draw fresh entropy.
	pub fn distributed_keygen(&self, seed: Option<[u8; 32]>) -> (PublicKey, Vec<KeyShare>) {
		let mut rng = match seed {
			Some(seed) => ChaCha20Rng::from_seed(seed),
			None => ChaCha20Rng::from_entropy(),
		};
		ceremony::distributed_keygen(&mut rng, &self.shamir, self.params)
	}

	/// Produce this participant's contribution to a signature over
	/// `message`. `session_seed` binds every honest participant to the same
	/// deterministic nonce for this message; omit it to draw one at random
	/// (callers must then distribute it out of band before other
	/// participants can respond).
	pub fn partial_sign(
		&self,
		message: &[u8],
		key_share: &KeyShare,
		session_seed: Option<[u8; 32]>,
	) -> PartialSignature {
		let session_seed = session_seed.unwrap_or_else(random_session_seed);
		ceremony::partial_sign(message, key_share, session_seed, self.params)
	}

	/// Verify that a partial signature is exactly what `key_share` should
	/// have produced for this session. See
	/// [`ceremony::verify_partial_signature`] for what this can and cannot
	/// detect.
	pub fn verify_partial_signature(
		&self,
		message: &[u8],
		partial: &PartialSignature,
		key_share: &KeyShare,
	) -> Result<bool> {
		ceremony::verify_partial_signature(message, partial, key_share, self.params)
	}

	/// Combine at least `threshold` partial signatures for the same
	/// message and session into a single valid Dilithium signature.
	pub fn combine_signatures(
		&self,
		partials: &[PartialSignature],
		public_key: &PublicKey,
	) -> Result<Signature> {
		ceremony::combine_signatures(partials, public_key, &self.shamir, self.params)
	}

	/// Verify a combined signature the ordinary (non-threshold) way.
	pub fn verify(&self, message: &[u8], signature: &Signature, public_key: &PublicKey) -> Result<bool> {
		crate::dilithium::verify(message, signature, public_key, self.params)
	}

	/// Rebuild a [`KeyShare`] from its two [`crate::shamir::ShamirShare`]
	/// halves and the shared public key, e.g. after loading them back from
	/// separate storage.
	pub fn key_share_from_parts(
		&self,
		s1: crate::shamir::ShamirShare,
		s2: crate::shamir::ShamirShare,
		public_key: PublicKey,
	) -> Result<KeyShare> {
		ceremony::key_share_from_parts(s1, s2, public_key)
	}

	pub fn get_threshold_info(&self) -> ThresholdInfo {
		ThresholdInfo {
			threshold: self.shamir.threshold(),
			participants: self.shamir.participants(),
			security_level: self.params.level,
		}
	}
}

fn random_session_seed() -> [u8; 32] {
	let mut rng = ChaCha20Rng::from_entropy();
	let mut seed = [0u8; 32];
	rng.fill_bytes(&mut seed);
	seed
}
