//! Public keys for the CL encryption scheme

use crate::cl::{Ciphertext, ClParameters, Plaintext};
use crate::proto::cl::PublicKey as PublicKeyProto;
use crate::{Error, Result};
use clhe_math::curve::GroupElement;
use clhe_traits::{
    DeserializeParametrized, DeserializeWithContext, LheEncrypter, LheParametrized, Serialize,
};
use num_bigint_dig::BigUint;
use prost::Message;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

use super::SecretKey;

/// Public key for the CL encryption scheme: the element `pk = gq^sk`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PublicKey {
    /// The CL parameters
    pub(crate) par: Arc<ClParameters>,
    /// The public key element
    pub(crate) pk: GroupElement,
}

impl PublicKey {
    /// Generate the [`PublicKey`] of a [`SecretKey`].
    pub fn new(sk: &SecretKey) -> Self {
        Self {
            par: sk.par.clone(),
            pk: sk.par.gq.pow(&sk.s),
        }
    }

    /// Returns the group element `gq^sk`.
    pub fn element(&self) -> &GroupElement {
        &self.pk
    }

    /// Encrypt a plaintext with the randomizer `r`.
    ///
    /// The same randomizer must never be used twice with the same key.
    pub fn encrypt_with_randomizer(&self, pt: &Plaintext, r: &BigUint) -> Result<Ciphertext> {
        if self.par != pt.par {
            return Err(Error::DefaultError(
                "Incompatible CL parameters".to_string(),
            ));
        }

        let c1 = self.par.gq.pow(r);
        let mut c2 = pt.encode();
        c2 *= &self.pk.pow(r);

        Ok(Ciphertext {
            par: self.par.clone(),
            c1,
            c2,
        })
    }

    /// Encrypt a batch of plaintexts in parallel.
    ///
    /// Each plaintext is encrypted with its own ChaCha20 stream seeded from
    /// `rng`, so the output only depends on `rng`.
    pub fn par_encrypt<R: RngCore + CryptoRng>(
        &self,
        pts: &[Plaintext],
        rng: &mut R,
    ) -> Result<Vec<Ciphertext>> {
        debug!(count = pts.len(), "encrypting a batch of plaintexts");
        let seeds = pts
            .iter()
            .map(|_| {
                let mut seed = <ChaCha20Rng as SeedableRng>::Seed::default();
                rng.try_fill_bytes(&mut seed).map(|_| Zeroizing::new(seed))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        pts.par_iter()
            .zip(seeds.par_iter())
            .map(|(pt, seed)| self.try_encrypt(pt, &mut ChaCha20Rng::from_seed(**seed)))
            .collect()
    }
}

impl LheParametrized for PublicKey {
    type Parameters = ClParameters;
}

impl LheEncrypter<Plaintext, Ciphertext> for PublicKey {
    type Error = Error;

    /// Encrypt a plaintext with a fresh randomizer `r` uniform in `Z_N`:
    /// `(c1, c2) = (gq^r, f^m · pk^r)`.
    fn try_encrypt<R: RngCore + CryptoRng>(
        &self,
        pt: &Plaintext,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        let r = Zeroizing::new(self.par.exponents.random(rng)?);
        self.encrypt_with_randomizer(pt, &r)
    }
}

impl From<&PublicKey> for PublicKeyProto {
    fn from(pk: &PublicKey) -> Self {
        PublicKeyProto {
            pk: pk.pk.to_bytes(),
        }
    }
}

impl Serialize for PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        PublicKeyProto::from(self).encode_to_vec()
    }
}

impl DeserializeParametrized for PublicKey {
    type Error = Error;

    /// Deserialize a public key, checking that it is a non-identity element
    /// of the subgroup Gq.
    fn from_bytes(bytes: &[u8], par: &Arc<ClParameters>) -> Result<Self> {
        let proto: PublicKeyProto =
            Message::decode(bytes).map_err(|_| Error::SerializationError)?;
        let pk = GroupElement::from_bytes(&proto.pk, par.group())?;
        if pk.is_identity() {
            return Err(Error::DefaultError(
                "The public key is the identity".to_string(),
            ));
        }

        let p2 = &par.group().factors()[ClParameters::HARD_SUBGROUP];
        if !pk.pow(p2).is_identity() {
            return Err(Error::DefaultError(
                "The public key is not in the subgroup Gq".to_string(),
            ));
        }
        Ok(Self {
            par: par.clone(),
            pk,
        })
    }
}
