//! The Fiat–Shamir-with-aborts signing loop and its matching verifier.
//!
//! Both `sign` and `verify` are written against a single `(s1, s2)` /
//! `(A, t1, t0)` keypair; [`crate::threshold::partial_sign`] reuses the
//! same per-coefficient maths against a participant's *share* of `s1, s2`
//! and the shared public key.

use rand::Rng;
use tracing::warn;

use crate::error::{Result, ThresholdError};
use crate::params::Parameters;
use crate::ring::PolynomialVector;

use super::decompose::{hint_weight, high_bits_poly, low_bits_poly, make_hint_poly, use_hint_poly};
use super::{PrivateKey, PublicKey, Signature};

fn serialize_commitment(w1: &PolynomialVector) -> Vec<u8> {
	bincode::serialize(w1.as_slice()).expect("polynomial vector serialization cannot fail")
}

fn high_bits_vector(v: &PolynomialVector, alpha: u32) -> PolynomialVector {
	PolynomialVector::from_polys(v.as_slice().iter().map(|p| high_bits_poly(p, alpha)).collect())
}

fn low_bits_vector(v: &PolynomialVector, alpha: u32) -> PolynomialVector {
	PolynomialVector::from_polys(v.as_slice().iter().map(|p| low_bits_poly(p, alpha)).collect())
}

fn make_hint_vector(z: &PolynomialVector, r: &PolynomialVector, alpha: u32) -> PolynomialVector {
	PolynomialVector::from_polys(
		z.as_slice().iter().zip(r.as_slice()).map(|(z, r)| make_hint_poly(z, r, alpha)).collect(),
	)
}

fn use_hint_vector(h: &PolynomialVector, r: &PolynomialVector, alpha: u32) -> PolynomialVector {
	PolynomialVector::from_polys(
		h.as_slice().iter().zip(r.as_slice()).map(|(h, r)| use_hint_poly(h, r, alpha)).collect(),
	)
}

fn total_hint_weight(h: &PolynomialVector) -> usize {
	h.as_slice().iter().map(hint_weight).sum()
}

/// Sign `message` under `sk`, retrying the commit-challenge-response loop
/// on rejection until a valid signature is found or
/// [`crate::params::MAX_SIGN_ATTEMPTS`] is exhausted.
pub fn sign<R: Rng + ?Sized>(
	rng: &mut R,
	message: &[u8],
	sk: &PrivateKey,
	pk: &PublicKey,
	params: Parameters,
) -> Result<Signature> {
	let alpha = 2 * params.gamma2;
	let z_bound = (params.gamma1 - params.beta) as i64;
	let r_bound = (params.gamma2 - params.beta) as i64;

	for _attempt in 0..crate::params::MAX_SIGN_ATTEMPTS {
		let y = PolynomialVector::random_masked(rng, params.l, params.gamma1);
		let w = pk.a.mul_vector(&y);
		let w1 = high_bits_vector(&w, alpha);
		let c = super::challenge::derive(message, &serialize_commitment(&w1), params.tau);

		let z = y.add(&sk.s1.poly_mul(&c));
		if z.norm_infinity() >= z_bound {
			continue
		}

		let cs2 = sk.s2.poly_mul(&c);
		let r = w.sub(&cs2);
		let r0 = low_bits_vector(&r, alpha);
		if r0.norm_infinity() >= r_bound {
			continue
		}

		let ct0 = pk.t0.poly_mul(&c);
		if ct0.norm_infinity() >= params.gamma2 as i64 {
			continue
		}

		let v = r.add(&ct0);
		let neg_ct0 = PolynomialVector::from_polys(
			ct0.as_slice().iter().map(|p| p.scalar_mul(-1)).collect(),
		);
		let h = make_hint_vector(&neg_ct0, &v, alpha);
		if total_hint_weight(&h) > params.omega {
			continue
		}

		return Ok(Signature { z, h, c })
	}

	warn!(attempts = crate::params::MAX_SIGN_ATTEMPTS, "rejection-sampling attempt cap exhausted");
	Err(ThresholdError::RejectionExhausted)
}

/// Verify `signature` against `message` and `pk`.
pub fn verify(message: &[u8], signature: &Signature, pk: &PublicKey, params: Parameters) -> Result<bool> {
	let alpha = 2 * params.gamma2;
	let z_bound = (params.gamma1 - params.beta) as i64;

	if signature.z.len() != params.l {
		return Err(ThresholdError::ShareLengthMismatch { expected: params.l, got: signature.z.len() })
	}
	if signature.h.len() != params.k {
		return Err(ThresholdError::ShareLengthMismatch { expected: params.k, got: signature.h.len() })
	}
	if signature.z.norm_infinity() >= z_bound {
		return Ok(false)
	}
	if total_hint_weight(&signature.h) > params.omega {
		return Ok(false)
	}

	let shifted_t1 = PolynomialVector::from_polys(
		pk.t1.as_slice().iter().map(|p| p.scalar_mul(1i64 << params.d)).collect(),
	);
	let c_t1 = shifted_t1.poly_mul(&signature.c);
	let az = pk.a.mul_vector(&signature.z);
	let r = az.sub(&c_t1);
	let w1 = use_hint_vector(&signature.h, &r, alpha);

	let expected_c = super::challenge::derive(message, &serialize_commitment(&w1), params.tau);
	Ok(expected_c == signature.c)
}
