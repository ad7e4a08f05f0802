//! Adapted Shamir secret sharing over [`PolynomialVector`]s.
//!
//! The secret is shared coefficient-wise: every one of the `L * N`
//! coefficients of the secret vector gets its own independent degree
//! `t - 1` sharing polynomial over Z_q. Reconstruction uses Lagrange
//! interpolation at x = 0, the same evaluate-then-interpolate shape used
//! for single-scalar DKG secrets, generalised to every coefficient of a
//! polynomial vector at once.

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{Result, ThresholdError};
use crate::params::{N, Q};
use crate::ring::{Polynomial, PolynomialVector};

/// A single participant's evaluation of every sharing polynomial for one
/// secret [`PolynomialVector`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct ShamirShare {
	#[zeroize(skip)]
	pub participant_id: u32,
	pub share_vector: PolynomialVector,
}

impl ShamirShare {
	pub fn vector_length(&self) -> usize {
		self.share_vector.len()
	}
}

/// (t, n) configuration for an adapted Shamir secret sharing instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdaptedShamirSSS {
	threshold: usize,
	participants: usize,
}

impl AdaptedShamirSSS {
	pub fn new(threshold: usize, participants: usize) -> Result<Self> {
		if threshold < 2 {
			return Err(ThresholdError::InvalidConfig(format!(
				"threshold must be at least 2, got {threshold}"
			)))
		}
		if threshold > participants {
			return Err(ThresholdError::InvalidConfig(format!(
				"threshold {threshold} exceeds participant count {participants}"
			)))
		}
		if participants > 255 {
			return Err(ThresholdError::InvalidConfig(format!(
				"participant count {participants} exceeds the 255 id-byte limit"
			)))
		}
		if participants as u32 >= Q {
			return Err(ThresholdError::InvalidConfig(
				"participant count must stay below Q - 1".to_string(),
			))
		}
		Ok(AdaptedShamirSSS { threshold, participants })
	}

	pub fn threshold(&self) -> usize {
		self.threshold
	}

	pub fn participants(&self) -> usize {
		self.participants
	}

	/// Split `secret` into `self.participants()` shares, any `self.threshold()`
	/// of which reconstruct it exactly.
	pub fn split<R: Rng + ?Sized>(&self, rng: &mut R, secret: &PolynomialVector) -> Vec<ShamirShare> {
		let length = secret.len();

		// coefficients[i][j][d] is the degree-d coefficient (d >= 1) of the
		// sharing polynomial for (polynomial i, coefficient j); degree 0 is
		// the secret coefficient itself.
		let mut random_coeffs = vec![vec![vec![0u32; self.threshold - 1]; N]; length];
		for poly_coeffs in random_coeffs.iter_mut() {
			for coeff_coeffs in poly_coeffs.iter_mut() {
				for c in coeff_coeffs.iter_mut() {
					*c = rng.gen_range(0..Q);
				}
			}
		}

		(1..=self.participants as u32)
			.map(|participant_id| {
				let mut polys = Vec::with_capacity(length);
				for i in 0..length {
					let mut coeffs = [0u32; N];
					for j in 0..N {
						let secret_coeff = secret[i].coeff(j);
						let higher = &random_coeffs[i][j];
						coeffs[j] = evaluate_sharing_polynomial(secret_coeff, higher, participant_id);
					}
					polys.push(Polynomial::from_coeffs(coeffs));
				}
				ShamirShare { participant_id, share_vector: PolynomialVector::from_polys(polys) }
			})
			.collect()
	}

	/// Reconstruct the full secret from at least `self.threshold()` shares.
	pub fn reconstruct(&self, shares: &[ShamirShare]) -> Result<PolynomialVector> {
		self.check_shares(shares)?;
		let length = shares[0].vector_length();
		self.partial_reconstruct(shares, &(0..length).collect::<Vec<_>>())
	}

	/// Reconstruct only the polynomials at `indices`, in the order given.
	/// Lets a caller avoid touching parts of the secret it does not need.
	pub fn partial_reconstruct(
		&self,
		shares: &[ShamirShare],
		indices: &[usize],
	) -> Result<PolynomialVector> {
		self.check_shares(shares)?;

		let used: Vec<&ShamirShare> = shares.iter().take(self.threshold).collect();
		let ids: Vec<u32> = used.iter().map(|s| s.participant_id).collect();
		let lambdas: Vec<u64> = ids.iter().map(|&id| lagrange_coefficient(id, &ids)).collect();

		let mut out = Vec::with_capacity(indices.len());
		for &idx in indices {
			let mut coeffs = [0u32; N];
			for j in 0..N {
				let mut acc: u64 = 0;
				for (share, &lambda) in used.iter().zip(&lambdas) {
					let value = share.share_vector[idx].coeff(j) as u64;
					acc = (acc + mulmod(lambda, value)) % Q as u64;
				}
				coeffs[j] = acc as u32;
			}
			out.push(Polynomial::from_coeffs(coeffs));
		}
		Ok(PolynomialVector::from_polys(out))
	}

	/// Deterministic sanity checks shared by `reconstruct` and
	/// `partial_reconstruct`. Does not prove algebraic consistency: that
	/// would require VSS commitments, which are out of scope.
	pub fn verify_shares(&self, shares: &[ShamirShare]) -> Result<()> {
		if shares.len() < self.threshold {
			return Err(ThresholdError::InsufficientShares {
				needed: self.threshold,
				got: shares.len(),
			})
		}

		let mut seen = BTreeSet::new();
		for share in shares {
			if share.participant_id == 0 || share.participant_id >= Q {
				return Err(ThresholdError::InvalidShareSet)
			}
			if !seen.insert(share.participant_id) {
				return Err(ThresholdError::InvalidShareSet)
			}
		}

		let expected_len = shares[0].vector_length();
		for share in shares {
			if share.vector_length() != expected_len {
				return Err(ThresholdError::ShareLengthMismatch {
					expected: expected_len,
					got: share.vector_length(),
				})
			}
			for poly in share.share_vector.as_slice() {
				for &c in poly.coeffs().iter() {
					if c >= Q {
						return Err(ThresholdError::InvalidShareSet)
					}
				}
			}
		}

		Ok(())
	}

	fn check_shares(&self, shares: &[ShamirShare]) -> Result<()> {
		self.verify_shares(shares)
	}
}

/// Evaluate a sharing polynomial P(x) = secret + c_1 x + c_2 x^2 + ... at
/// x = participant_id, all arithmetic in Z_q, via Horner's method.
fn evaluate_sharing_polynomial(secret: u32, higher_coeffs: &[u32], x: u32) -> u32 {
	let x = x as u64;
	let mut acc: u64 = 0;
	for &c in higher_coeffs.iter().rev() {
		acc = (mulmod(acc, x) + c as u64) % Q as u64;
	}
	acc = (mulmod(acc, x) + secret as u64) % Q as u64;
	acc as u32
}

/// Lagrange coefficient λ_u for reconstructing P(0) from shares at the
/// given `ids`, λ_u = Π_{v≠u} (-x_v) * (x_u - x_v)^-1 mod Q.
pub(crate) fn lagrange_coefficient(id: u32, ids: &[u32]) -> u64 {
	let x_u = id as u64;
	let mut num: u64 = 1;
	let mut den: u64 = 1;
	for &v in ids {
		if v == id {
			continue
		}
		let x_v = v as u64;
		num = mulmod(num, (Q as u64 - x_v) % Q as u64);
		let diff = (x_u + Q as u64 - x_v) % Q as u64;
		den = mulmod(den, diff);
	}
	mulmod(num, inv_mod(den))
}

#[inline]
pub(crate) fn mulmod(a: u64, b: u64) -> u64 {
	(a * b) % Q as u64
}

/// Modular exponentiation a^e mod Q.
pub(crate) fn pow_mod(mut a: u64, mut e: u64) -> u64 {
	let mut result: u64 = 1;
	a %= Q as u64;
	while e > 0 {
		if e & 1 == 1 {
			result = mulmod(result, a);
		}
		a = mulmod(a, a);
		e >>= 1;
	}
	result
}

/// Modular inverse via Fermat's little theorem: a^(Q-2) mod Q. Q is prime.
pub(crate) fn inv_mod(a: u64) -> u64 {
	pow_mod(a, Q as u64 - 2)
}
