use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Polynomial, PolynomialVector};

/// A k × l matrix of polynomials. The only operation required by the
/// protocol is matrix–vector multiplication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
	k: usize,
	l: usize,
	rows: Vec<Polynomial>,
}

impl Matrix {
	pub fn k(&self) -> usize {
		self.k
	}

	pub fn l(&self) -> usize {
		self.l
	}

	pub fn random<R: Rng + ?Sized>(rng: &mut R, k: usize, l: usize) -> Self {
		let rows = (0..k * l).map(|_| Polynomial::random(rng)).collect();
		Matrix { k, l, rows }
	}

	pub fn get(&self, i: usize, j: usize) -> &Polynomial {
		&self.rows[i * self.l + j]
	}

	/// A · v -> vector of length k, where each output polynomial is
	/// Σ_j A[i,j] · v[j].
	pub fn mul_vector(&self, v: &PolynomialVector) -> PolynomialVector {
		assert_eq!(v.len(), self.l, "Matrix::mul_vector: vector length does not match columns");
		let mut out = Vec::with_capacity(self.k);
		for i in 0..self.k {
			let mut acc = Polynomial::zero();
			for j in 0..self.l {
				acc = acc.add(&self.get(i, j).mul(&v[j]));
			}
			out.push(acc);
		}
		PolynomialVector::from_polys(out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand_chacha::ChaCha20Rng;

	#[test]
	fn mul_vector_produces_k_length_output() {
		let mut rng = ChaCha20Rng::from_seed([9; 32]);
		let a = Matrix::random(&mut rng, 4, 5);
		let v = PolynomialVector::random(&mut rng, 5);
		let out = a.mul_vector(&v);
		assert_eq!(out.len(), 4);
	}

	#[test]
	fn mul_by_zero_vector_is_zero() {
		let mut rng = ChaCha20Rng::from_seed([10; 32]);
		let a = Matrix::random(&mut rng, 3, 3);
		let zero = PolynomialVector::zero(3);
		let out = a.mul_vector(&zero);
		assert_eq!(out.norm_infinity(), 0);
	}

	#[test]
	fn is_linear_in_the_vector_argument() {
		let mut rng = ChaCha20Rng::from_seed([11; 32]);
		let a = Matrix::random(&mut rng, 3, 3);
		let v1 = PolynomialVector::random(&mut rng, 3);
		let v2 = PolynomialVector::random(&mut rng, 3);
		let sum = v1.add(&v2);

		let lhs = a.mul_vector(&sum);
		let rhs = a.mul_vector(&v1).add(&a.mul_vector(&v2));
		assert_eq!(lhs, rhs);
	}
}
