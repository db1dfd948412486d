use super::{PublicKey, SecretKey};
use crate::cl::ClParameters;
use crate::Result;
use rand::{CryptoRng, RngCore};
use std::sync::Arc;
use tracing::debug;

/// A secret key together with its public key `pk = gq^sk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    sk: SecretKey,
    pk: PublicKey,
}

impl KeyPair {
    /// Generate a fresh key pair.
    pub fn generate<R: RngCore + CryptoRng>(par: &Arc<ClParameters>, rng: &mut R) -> Result<Self> {
        let sk = SecretKey::random(par, rng)?;
        let pk = PublicKey::new(&sk);
        debug!("generated a CL key pair");
        Ok(Self { sk, pk })
    }

    /// Returns the secret key.
    pub fn sk(&self) -> &SecretKey {
        &self.sk
    }

    /// Returns the public key.
    pub fn pk(&self) -> &PublicKey {
        &self.pk
    }
}
