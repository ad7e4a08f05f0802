//! Challenge derivation: hash the message and the signer's commitment
//! into a sparse, ±1-coefficient polynomial of Hamming weight `tau`.
//!
//! Uses the same hash-to-scalar shape as other binding-value derivations
//! in this codebase (`blake2::Blake2b::<typenum::U32>` seeded from message
//! and commitment bytes), generalised from a single curve scalar to
//! Dilithium's SampleInBall distribution.

use blake2::digest::Digest;
use blake2::Blake2b;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use typenum::U32;

use crate::params::{N, Q};
use crate::ring::Polynomial;

/// Derive the challenge polynomial from a message and the signer's
/// commitment vector `w1`, via SampleInBall seeded by a Blake2b digest of
/// both.
pub fn derive(message: &[u8], w1_bytes: &[u8], tau: usize) -> Polynomial {
	let mut hasher = Blake2b::<U32>::new();
	hasher.update(b"dilithium-challenge");
	hasher.update(message);
	hasher.update(w1_bytes);
	let digest = hasher.finalize();

	let mut seed = [0u8; 32];
	seed.copy_from_slice(&digest);
	sample_in_ball(seed, tau)
}

/// SampleInBall: a polynomial with exactly `tau` coefficients set to ±1
/// and the rest zero, built via a Fisher–Yates-style swap driven by a
/// CSPRNG seeded from the challenge hash.
fn sample_in_ball(seed: [u8; 32], tau: usize) -> Polynomial {
	let mut rng = ChaCha20Rng::from_seed(seed);
	let mut coeffs = [0u32; N];
	for i in (N - tau)..N {
		let j = rng.gen_range(0..=i);
		coeffs[i] = coeffs[j];
		coeffs[j] = if rng.gen_bool(0.5) { Q - 1 } else { 1 };
	}
	Polynomial::from_coeffs(coeffs)
}
