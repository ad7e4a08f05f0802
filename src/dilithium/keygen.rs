//! Reference Dilithium key generation: sample the public matrix and the
//! secret vectors, and derive t = A*s1 + s2.

use rand::Rng;

use crate::params::Parameters;
use crate::ring::{Matrix, Polynomial, PolynomialVector};

use super::decompose::power2round_poly;
use super::{PrivateKey, PublicKey};

/// Generate a fresh keypair for `params`. The caller supplies the RNG so
/// session determinism (and, for the threshold layer, dealer seeding) stays
/// under its control.
pub fn keygen<R: Rng + ?Sized>(rng: &mut R, params: Parameters) -> (PublicKey, PrivateKey) {
	let a = Matrix::random(rng, params.k, params.l);
	let s1 = PolynomialVector::random_bounded(rng, params.l, params.eta);
	let s2 = PolynomialVector::random_bounded(rng, params.k, params.eta);
	let t = a.mul_vector(&s1).add(&s2);

	let mut t1_polys: Vec<Polynomial> = Vec::with_capacity(params.k);
	let mut t0_polys: Vec<Polynomial> = Vec::with_capacity(params.k);
	for poly in t.as_slice() {
		let (hi, lo) = power2round_poly(poly, params.d);
		t1_polys.push(hi);
		t0_polys.push(lo);
	}

	let public_key = PublicKey {
		level: params.level,
		a,
		t1: PolynomialVector::from_polys(t1_polys),
		t0: PolynomialVector::from_polys(t0_polys),
	};
	let private_key = PrivateKey { level: params.level, s1, s2 };
	(public_key, private_key)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::params::SecurityLevel;
	use rand::SeedableRng;
	use rand_chacha::ChaCha20Rng;

	#[test]
	fn t1_and_t0_recombine_into_a_times_s1_plus_s2() {
		use crate::params::Q;
		use crate::ring::center;

		let mut rng = ChaCha20Rng::from_seed([40; 32]);
		let params = Parameters::for_level(SecurityLevel::L2);
		let (pk, sk) = keygen(&mut rng, params);
		let t = pk.a.mul_vector(&sk.s1).add(&sk.s2);

		let alpha = 1i64 << params.d;
		for (i, expected) in t.as_slice().iter().enumerate() {
			for j in 0..crate::params::N {
				let r1 = pk.t1.as_slice()[i].coeff(j) as i64;
				let r0 = center(pk.t0.as_slice()[i].coeff(j));
				let recombined = ((r1 * alpha + r0).rem_euclid(Q as i64)) as u32;
				assert_eq!(recombined, expected.coeff(j));
			}
		}
	}

	#[test]
	fn secret_vectors_respect_the_eta_bound() {
		let mut rng = ChaCha20Rng::from_seed([41; 32]);
		let params = Parameters::for_level(SecurityLevel::L3);
		let (_, sk) = keygen(&mut rng, params);
		assert_eq!(sk.s1.len(), params.l);
		assert_eq!(sk.s2.len(), params.k);
	}

	#[test]
	fn distinct_seeds_produce_distinct_keys() {
		let params = Parameters::for_level(SecurityLevel::L2);
		let (pk_a, _) = keygen(&mut ChaCha20Rng::from_seed([42; 32]), params);
		let (pk_b, _) = keygen(&mut ChaCha20Rng::from_seed([43; 32]), params);
		assert_ne!(pk_a.t1, pk_b.t1);
	}
}
