//! HighBits / LowBits / MakeHint / UseHint: Dilithium's coefficient
//! decomposition at modulus `alpha = 2 * gamma2`, used for robust
//! verification without leaking the full commitment `w`.
//!
//! This is the textbook (non bit-tricked) decomposition algorithm; a
//! production signer would special-case it per `gamma2` the way the
//! reference Dilithium C implementation does, but this core favours
//! clarity over those constant-time-friendly shortcuts. Bit-exact
//! FIPS 204 conformance is out of scope.

use crate::params::Q;
use crate::ring::Polynomial;

/// r mod± alpha: the representative of `r` modulo `alpha` in
/// (-alpha/2, alpha/2].
fn mod_pm(r: i64, alpha: i64) -> i64 {
	let mut m = r.rem_euclid(alpha);
	if m > alpha / 2 {
		m -= alpha;
	}
	m
}

/// Decompose canonical coefficient `r` into (r1, r0) such that
/// r = r1 * alpha + r0 mod Q, with r0 in (-alpha/2, alpha/2].
pub fn decompose_coeff(r: u32, alpha: u32) -> (i64, i64) {
	let r = r as i64;
	let alpha = alpha as i64;
	let mut r0 = mod_pm(r, alpha);
	let r1 = if r - r0 == Q as i64 - 1 {
		r0 -= 1;
		0
	} else {
		(r - r0) / alpha
	};
	(r1, r0)
}

pub fn high_bits_coeff(r: u32, alpha: u32) -> i64 {
	decompose_coeff(r, alpha).0
}

pub fn low_bits_coeff(r: u32, alpha: u32) -> i64 {
	decompose_coeff(r, alpha).1
}

/// 1 if adding `z` to `r` changes its high bits, 0 otherwise.
pub fn make_hint_coeff(z: i64, r: u32, alpha: u32) -> u32 {
	let r1 = high_bits_coeff(r, alpha);
	let perturbed = (r as i64 + z).rem_euclid(Q as i64) as u32;
	let v1 = high_bits_coeff(perturbed, alpha);
	if r1 != v1 {
		1
	} else {
		0
	}
}

/// Recover HighBits(w) from HighBits(w - c*s2) and the hint bit.
pub fn use_hint_coeff(h: u32, r: u32, alpha: u32) -> i64 {
	let (r1, r0) = decompose_coeff(r, alpha);
	let m = (Q as i64 - 1) / alpha as i64;
	if h == 0 {
		return r1
	}
	if r0 > 0 {
		(r1 + 1).rem_euclid(m)
	} else {
		(r1 - 1).rem_euclid(m)
	}
}

pub fn high_bits_poly(p: &Polynomial, alpha: u32) -> Polynomial {
	p.map_coeffs(|c| high_bits_coeff(c, alpha))
}

pub fn low_bits_poly(p: &Polynomial, alpha: u32) -> Polynomial {
	p.map_coeffs(|c| low_bits_coeff(c, alpha))
}

/// Coefficientwise MakeHint between two polynomials: `z` supplies the
/// perturbation, `r` the base value.
pub fn make_hint_poly(z: &Polynomial, r: &Polynomial, alpha: u32) -> Polynomial {
	let mut out = [0u32; crate::params::N];
	for j in 0..crate::params::N {
		let z_coeff = crate::ring::center(z.coeff(j));
		out[j] = make_hint_coeff(z_coeff, r.coeff(j), alpha);
	}
	Polynomial::from_coeffs(out)
}

/// Coefficientwise UseHint: recover HighBits(r) given the hint bits.
pub fn use_hint_poly(h: &Polynomial, r: &Polynomial, alpha: u32) -> Polynomial {
	let mut out = [0u32; crate::params::N];
	for j in 0..crate::params::N {
		out[j] = use_hint_coeff(h.coeff(j), r.coeff(j), alpha) as u32;
	}
	Polynomial::from_coeffs(out)
}

/// Power2Round: split `r` into (r1, r0) with r = r1 * 2^d + r0 and r0 in
/// (-2^(d-1), 2^(d-1)]. Used to derive the compact public key (t1, t0) from
/// the full product t = A*s1 + s2.
pub fn power2round_coeff(r: u32, d: u32) -> (i64, i64) {
	let alpha = 1i64 << d;
	let r0 = mod_pm(r as i64, alpha);
	let r1 = (r as i64 - r0) / alpha;
	(r1, r0)
}

pub fn power2round_poly(p: &Polynomial, d: u32) -> (Polynomial, Polynomial) {
	let mut hi = [0u32; crate::params::N];
	let mut lo = [0u32; crate::params::N];
	for j in 0..crate::params::N {
		let (r1, r0) = power2round_coeff(p.coeff(j), d);
		hi[j] = r1 as u32;
		lo[j] = crate::ring::reduce(r0);
	}
	(Polynomial::from_coeffs(hi), Polynomial::from_coeffs(lo))
}

/// Hamming weight of a hint polynomial (coefficients in {0, 1}).
pub fn hint_weight(p: &Polynomial) -> usize {
	p.coeffs().iter().filter(|&&c| c == 1).count()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::params::Parameters;
	use crate::params::SecurityLevel;

	#[test]
	fn decompose_reconstructs_the_original_coefficient() {
		let alpha = 2 * Parameters::for_level(SecurityLevel::L3).gamma2;
		for r in [0u32, 1, 12345, Q / 2, Q - 1] {
			let (r1, r0) = decompose_coeff(r, alpha);
			let reconstructed = (r1 * alpha as i64 + r0).rem_euclid(Q as i64) as u32;
			assert_eq!(reconstructed, r, "r={r}");
		}
	}

	#[test]
	fn low_bits_stay_within_half_alpha() {
		let alpha = 2 * Parameters::for_level(SecurityLevel::L2).gamma2;
		for r in 0..Q {
			if r % 997 != 0 {
				continue // sample, not exhaustive
			}
			let (_, r0) = decompose_coeff(r, alpha);
			assert!(r0.abs() <= alpha as i64 / 2);
		}
	}

	#[test]
	fn make_hint_is_false_for_zero_perturbation() {
		let alpha = 2 * Parameters::for_level(SecurityLevel::L3).gamma2;
		assert_eq!(make_hint_coeff(0, 54321, alpha), 0);
	}

	#[test]
	fn use_hint_recovers_high_bits_when_hint_set() {
		let alpha = 2 * Parameters::for_level(SecurityLevel::L3).gamma2;
		let r: u32 = 54321;
		let z: i64 = alpha as i64; // guaranteed to shift the high bits by exactly one step
		let h = make_hint_coeff(z, r, alpha);
		let perturbed = (r as i64 + z).rem_euclid(Q as i64) as u32;
		let expected_high = high_bits_coeff(perturbed, alpha);
		let recovered = use_hint_coeff(h, r, alpha);
		assert_eq!(recovered, expected_high);
	}
}
