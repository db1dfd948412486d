//! Secret keys for the CL encryption scheme

use crate::cl::{Ciphertext, ClParameters};
use crate::{Error, Result};
use clhe_math::curve::GroupElement;
use clhe_traits::{LheDecrypter, LheParametrized};
use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};
use std::fmt::Debug;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Secret key for the CL encryption scheme: a scalar `sk ∈ Z_N`.
#[derive(PartialEq, Eq, Clone)]
pub struct SecretKey {
    /// The CL parameters
    pub(crate) par: Arc<ClParameters>,
    /// The secret scalar
    pub(crate) s: BigUint,
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("par", &self.par)
            .finish_non_exhaustive()
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.s.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl SecretKey {
    /// Generate a random [`SecretKey`], uniform in `Z_N`.
    pub fn random<R: RngCore + CryptoRng>(par: &Arc<ClParameters>, rng: &mut R) -> Result<Self> {
        Ok(Self {
            par: par.clone(),
            s: par.exponents.random(rng)?,
        })
    }

    /// Generate a [`SecretKey`] from a scalar, reduced modulo `N`.
    pub fn new(s: &BigUint, par: &Arc<ClParameters>) -> Self {
        Self {
            par: par.clone(),
            s: par.exponents.reduce(s),
        }
    }
}

impl LheParametrized for SecretKey {
    type Parameters = ClParameters;
}

impl LheDecrypter<GroupElement, Ciphertext> for SecretKey {
    type Error = Error;

    /// Decrypt a ciphertext into the group element `f^m = c2 · (c1^sk)^-1`.
    ///
    /// The ciphertext is not authenticated: any pair of group elements
    /// decrypts to some element.
    fn try_decrypt(&self, ct: &Ciphertext) -> Result<GroupElement> {
        if self.par != ct.par {
            return Err(Error::DefaultError(
                "Incompatible CL parameters".to_string(),
            ));
        }

        let mask = Zeroizing::new(ct.c1.pow(&self.s));
        Ok(&ct.c2 * &mask.invert())
    }
}
