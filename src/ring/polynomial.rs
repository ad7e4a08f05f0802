use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::params::{N, Q};

use super::{center, reduce};

/// A single element of R_q = Z_q[X]/(X^N + 1): exactly N coefficients in
/// canonical form [0, Q).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct Polynomial {
	coeffs: Box<[u32; N]>,
}

impl Polynomial {
	pub fn zero() -> Self {
		Polynomial { coeffs: Box::new([0u32; N]) }
	}

	pub fn one() -> Self {
		let mut p = Self::zero();
		p.coeffs[0] = 1;
		p
	}

	/// A polynomial with coefficients sampled uniformly from Z_q.
	pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
		let mut coeffs = Box::new([0u32; N]);
		for c in coeffs.iter_mut() {
			*c = rng.gen_range(0..Q);
		}
		Polynomial { coeffs }
	}

	/// A polynomial with coefficients sampled uniformly from [-eta, eta],
	/// represented in canonical form.
	pub fn random_bounded<R: Rng + ?Sized>(rng: &mut R, eta: u32) -> Self {
		let bound = eta as i32;
		let mut coeffs = Box::new([0u32; N]);
		for c in coeffs.iter_mut() {
			let v = rng.gen_range(-bound..=bound);
			*c = reduce(v as i64);
		}
		Polynomial { coeffs }
	}

	/// A masking polynomial with coefficients sampled uniformly from
	/// `(-gamma1, gamma1]`, used for the signer's commitment vector `y`.
	pub fn random_masked<R: Rng + ?Sized>(rng: &mut R, gamma1: u32) -> Self {
		let bound = gamma1 as i32;
		let mut coeffs = Box::new([0u32; N]);
		for c in coeffs.iter_mut() {
			let v = rng.gen_range(-(bound - 1)..=bound);
			*c = reduce(v as i64);
		}
		Polynomial { coeffs }
	}

	pub fn from_coeffs(coeffs: [u32; N]) -> Self {
		let mut p = Self::zero();
		for (dst, src) in p.coeffs.iter_mut().zip(coeffs.iter()) {
			*dst = reduce(*src as i64);
		}
		p
	}

	pub fn coeffs(&self) -> &[u32; N] {
		&self.coeffs
	}

	pub fn coeff(&self, i: usize) -> u32 {
		self.coeffs[i]
	}

	pub fn add(&self, other: &Self) -> Self {
		let mut out = Self::zero();
		for i in 0..N {
			out.coeffs[i] = reduce(self.coeffs[i] as i64 + other.coeffs[i] as i64);
		}
		out
	}

	pub fn sub(&self, other: &Self) -> Self {
		let mut out = Self::zero();
		for i in 0..N {
			out.coeffs[i] = reduce(self.coeffs[i] as i64 - other.coeffs[i] as i64);
		}
		out
	}

	/// Multiply every coefficient by an integer scalar (reduced mod Q).
	pub fn scalar_mul(&self, scalar: i64) -> Self {
		let mut out = Self::zero();
		for i in 0..N {
			out.coeffs[i] = reduce(self.coeffs[i] as i64 * scalar);
		}
		out
	}

	/// Negacyclic convolution mod (X^N + 1): schoolbook multiplication.
	///
	/// An NTT-accelerated multiplication is a drop-in replacement behind
	/// this method for callers that need the speed; this core keeps the
	/// O(N^2) reference implementation for clarity.
	pub fn mul(&self, other: &Self) -> Self {
		let mut acc = [0i64; N];
		for i in 0..N {
			let a = self.coeffs[i] as i64;
			if a == 0 {
				continue
			}
			for j in 0..N {
				let k = i + j;
				let prod = a * other.coeffs[j] as i64;
				if k < N {
					acc[k] += prod;
				} else {
					acc[k - N] -= prod;
				}
			}
		}
		let mut out = Self::zero();
		for i in 0..N {
			out.coeffs[i] = reduce(acc[i]);
		}
		out
	}

	/// Centered infinity norm: max over i of |c_i| where c_i is lifted into
	/// (-Q/2, Q/2].
	pub fn norm_infinity(&self) -> i64 {
		self.coeffs.iter().map(|&c| center(c).abs()).max().unwrap_or(0)
	}

	/// Euclidean norm on the centered coefficients.
	pub fn norm_euclidean(&self) -> f64 {
		let sum: i64 = self.coeffs.iter().map(|&c| center(c).pow(2)).sum();
		(sum as f64).sqrt()
	}

	/// Map every coefficient through a closure, returning a new polynomial
	/// whose coefficients are reduced mod Q. Used by the decomposition
	/// primitives in [`crate::dilithium::decompose`].
	pub fn map_coeffs(&self, mut f: impl FnMut(u32) -> i64) -> Self {
		let mut out = Self::zero();
		for i in 0..N {
			out.coeffs[i] = reduce(f(self.coeffs[i]));
		}
		out
	}
}

impl Default for Polynomial {
	fn default() -> Self {
		Self::zero()
	}
}
