//! Threshold CRYSTALS-Dilithium signatures over Shamir-shared secret
//! vectors.
//!
//! [`ThresholdSignature`] is the entry point: configure a `(t, n,
//! security_level)` session, run [`ThresholdSignature::distributed_keygen`]
//! once to split a fresh Dilithium keypair across `n` participants, collect
//! `t` [`PartialSignature`]s for a message via
//! [`ThresholdSignature::partial_sign`], and combine them with
//! [`ThresholdSignature::combine_signatures`] into a [`Signature`] that
//! verifies under the ordinary, single-party [`dilithium::verify`].
//!
//! See `DESIGN.md` at the crate root for the rationale behind the choices
//! that deviate from stock Dilithium / FIPS 204.

pub mod dilithium;
pub mod error;
pub mod params;
pub mod ring;
pub mod shamir;
pub mod threshold;

pub use dilithium::Dilithium;
pub use error::{Result, ThresholdError};
pub use params::SecurityLevel;
pub use threshold::{KeyShare, PartialSignature, PublicKey, Signature, ThresholdInfo, ThresholdSignature};
