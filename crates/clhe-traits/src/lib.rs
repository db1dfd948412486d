#![crate_name = "clhe_traits"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Traits for linearly homomorphic encryption schemes.

use rand::{CryptoRng, RngCore};
use std::sync::Arc;

/// The parameters of a linearly homomorphic encryption scheme.
pub trait LheParameters {}

/// Indicates that an object is parametrized.
pub trait LheParametrized {
    /// The type of the parameters.
    type Parameters: LheParameters;
}

/// Indicates that an object is a plaintext of the scheme.
pub trait LhePlaintext
where
    Self: Sized + LheParametrized,
{
}

/// Indicates that an object is a ciphertext of the scheme.
pub trait LheCiphertext
where
    Self: Sized + Serialize + LheParametrized + DeserializeParametrized,
{
}

/// Encrypt a plaintext into a ciphertext.
///
/// The randomness is always provided by the caller.
pub trait LheEncrypter<
    P: LhePlaintext<Parameters = Self::Parameters>,
    C: LheCiphertext<Parameters = Self::Parameters>,
>: LheParametrized
{
    /// The type of error returned.
    type Error;

    /// Try to encrypt a plaintext, drawing a fresh randomizer from `rng`.
    fn try_encrypt<R: RngCore + CryptoRng>(&self, pt: &P, rng: &mut R) -> Result<C, Self::Error>;
}

/// Decrypt a ciphertext.
///
/// The output type `E` is not necessarily the plaintext type: a scheme may
/// only recover an encoding of the plaintext.
pub trait LheDecrypter<E, C: LheCiphertext<Parameters = Self::Parameters>>:
    LheParametrized
{
    /// The type of error returned.
    type Error;

    /// Try to decrypt a ciphertext.
    fn try_decrypt(&self, ct: &C) -> Result<E, Self::Error>;
}

/// Serialization.
pub trait Serialize {
    /// Serialize `Self` into a vector of bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// Deserialization of a parametrized value.
pub trait DeserializeParametrized
where
    Self: Sized,
    Self: LheParametrized,
{
    /// The type of error returned.
    type Error;

    /// Attempt to deserialize from a vector of bytes
    fn from_bytes(bytes: &[u8], par: &Arc<Self::Parameters>) -> Result<Self, Self::Error>;
}

/// Deserialization without context.
pub trait Deserialize
where
    Self: Sized,
{
    /// The type of error returned.
    type Error;

    /// Attempt to deserialize from a vector of bytes
    fn try_deserialize(bytes: &[u8]) -> Result<Self, Self::Error>;
}

/// Deserialization setting an explicit context.
pub trait DeserializeWithContext
where
    Self: Sized,
{
    /// The type of error returned.
    type Error;

    /// The type of context.
    type Context;

    /// Attempt to deserialize from a vector of bytes
    fn from_bytes(bytes: &[u8], ctx: &Arc<Self::Context>) -> Result<Self, Self::Error>;
}
