#![warn(missing_docs, unused_imports)]

//! The Castagnos-Laguillaumie linearly homomorphic encryption scheme.
//!
//! A ciphertext of `m` under the public key `pk = gq^sk` is
//! `(c1, c2) = (gq^r, f^m · pk^r)` for a fresh randomizer `r`. Ciphertexts
//! can be added (encrypting the sum of the plaintexts) and multiplied by a
//! public scalar. Decryption recovers the group element `f^m`.
//!
//! The scheme provides no ciphertext integrity: a substituted or malformed
//! ciphertext made of valid group elements decrypts to an unrelated element.

mod ciphertext;
mod keys;
mod ops;
mod parameters;
mod plaintext;

#[cfg(test)]
pub(crate) mod test_utils;

pub mod traits;
pub use ciphertext::Ciphertext;
pub use keys::{KeyPair, PublicKey, SecretKey};
pub use parameters::{ClParameters, ClParametersBuilder};
pub use plaintext::Plaintext;

pub use clhe_math::curve::GroupElement;
