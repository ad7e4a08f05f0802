use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::Polynomial;

/// A length-fixed vector of [`Polynomial`]s. Arithmetic is componentwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct PolynomialVector {
	polys: Vec<Polynomial>,
}

impl PolynomialVector {
	pub fn len(&self) -> usize {
		self.polys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.polys.is_empty()
	}

	pub fn zero(length: usize) -> Self {
		PolynomialVector { polys: (0..length).map(|_| Polynomial::zero()).collect() }
	}

	pub fn random<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Self {
		PolynomialVector { polys: (0..length).map(|_| Polynomial::random(rng)).collect() }
	}

	pub fn random_bounded<R: Rng + ?Sized>(rng: &mut R, length: usize, eta: u32) -> Self {
		PolynomialVector {
			polys: (0..length).map(|_| Polynomial::random_bounded(rng, eta)).collect(),
		}
	}

	pub fn random_masked<R: Rng + ?Sized>(rng: &mut R, length: usize, gamma1: u32) -> Self {
		PolynomialVector {
			polys: (0..length).map(|_| Polynomial::random_masked(rng, gamma1)).collect(),
		}
	}

	pub fn from_polys(polys: Vec<Polynomial>) -> Self {
		PolynomialVector { polys }
	}

	pub fn as_slice(&self) -> &[Polynomial] {
		&self.polys
	}

	/// Panics on length mismatch: callers never construct mismatched
	/// vectors through the public API, so this is a programmer error, not
	/// a recoverable `ThresholdError`.
	fn assert_same_length(&self, other: &Self, op: &str) {
		assert_eq!(
			self.len(),
			other.len(),
			"PolynomialVector length mismatch in {op}: {} vs {}",
			self.len(),
			other.len()
		);
	}

	pub fn add(&self, other: &Self) -> Self {
		self.assert_same_length(other, "add");
		PolynomialVector {
			polys: self.polys.iter().zip(&other.polys).map(|(a, b)| a.add(b)).collect(),
		}
	}

	pub fn sub(&self, other: &Self) -> Self {
		self.assert_same_length(other, "sub");
		PolynomialVector {
			polys: self.polys.iter().zip(&other.polys).map(|(a, b)| a.sub(b)).collect(),
		}
	}

	pub fn scalar_mul(&self, scalar: i64) -> Self {
		PolynomialVector { polys: self.polys.iter().map(|p| p.scalar_mul(scalar)).collect() }
	}

	/// Componentwise polynomial multiplication (used to form c·s1, c·s2).
	pub fn poly_mul(&self, c: &Polynomial) -> Self {
		PolynomialVector { polys: self.polys.iter().map(|p| p.mul(c)).collect() }
	}

	pub fn norm_infinity(&self) -> i64 {
		self.polys.iter().map(|p| p.norm_infinity()).max().unwrap_or(0)
	}
}

impl std::ops::Index<usize> for PolynomialVector {
	type Output = Polynomial;

	fn index(&self, index: usize) -> &Polynomial {
		&self.polys[index]
	}
}
