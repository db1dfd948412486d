//! Plaintext type in the CL encryption scheme.

use crate::cl::ClParameters;
use crate::Result;
use clhe_math::curve::GroupElement;
use clhe_traits::{LhePlaintext, LheParametrized};
use num_bigint_dig::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use std::ops::{Add, Mul};
use std::sync::Arc;
use zeroize_derive::{Zeroize, ZeroizeOnDrop};

/// A plaintext of the CL encryption scheme: an exponent `m ∈ Z_N`.
///
/// Encryption hides the group element `f^m` of the message subgroup, and
/// decryption returns that element. Recovering `m` from `f^m` requires a
/// discrete logarithm in the subgroup of order `p1`, which is left to the
/// caller.
#[derive(Debug, Clone, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Plaintext {
    /// The parameters of the underlying CL encryption scheme.
    #[zeroize(skip)]
    pub(crate) par: Arc<ClParameters>,

    /// The exponent, reduced modulo `N`.
    pub(crate) m: BigUint,
}

impl Plaintext {
    /// Create a plaintext from an integer, reduced modulo `N`.
    pub fn new(m: &BigUint, par: &Arc<ClParameters>) -> Self {
        Self {
            par: par.clone(),
            m: par.exponents.reduce(m),
        }
    }

    /// Create a plaintext from a `u64`, reduced modulo `N`.
    pub fn from_u64(m: u64, par: &Arc<ClParameters>) -> Self {
        Self::new(&BigUint::from(m), par)
    }

    /// The plaintext encrypting nothing.
    pub fn zero(par: &Arc<ClParameters>) -> Self {
        Self {
            par: par.clone(),
            m: BigUint::zero(),
        }
    }

    /// Sample a uniform plaintext of `Z_N`.
    pub fn random<R: RngCore + CryptoRng>(par: &Arc<ClParameters>, rng: &mut R) -> Result<Self> {
        Ok(Self {
            par: par.clone(),
            m: par.exponents.random(rng)?,
        })
    }

    /// Returns the exponent `m`.
    pub fn value(&self) -> &BigUint {
        &self.m
    }

    /// Returns the group element `f^m` that decryption recovers.
    pub fn encode(&self) -> GroupElement {
        self.par.f.pow(&self.m)
    }
}

impl PartialEq for Plaintext {
    fn eq(&self, other: &Self) -> bool {
        let mut eq = self.par == other.par;
        eq &= self.m == other.m;
        eq
    }
}

impl LheParametrized for Plaintext {
    type Parameters = ClParameters;
}

impl LhePlaintext for Plaintext {}

impl Add<&Plaintext> for &Plaintext {
    type Output = Plaintext;

    fn add(self, rhs: &Plaintext) -> Plaintext {
        assert_eq!(self.par, rhs.par);
        Plaintext {
            par: self.par.clone(),
            m: self.par.exponents.add(&self.m, &rhs.m),
        }
    }
}

impl Mul<&Plaintext> for &Plaintext {
    type Output = Plaintext;

    fn mul(self, rhs: &Plaintext) -> Plaintext {
        assert_eq!(self.par, rhs.par);
        Plaintext {
            par: self.par.clone(),
            m: self.par.exponents.mul(&self.m, &rhs.m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Plaintext;
    use crate::cl::test_utils::test_params;
    use crate::cl::ClParameters;
    use num_bigint_dig::BigUint;
    use rand::thread_rng;
    use std::error::Error;

    #[test]
    fn reduced_modulo_n() {
        let params = test_params();
        let n = params.order();

        let pt = Plaintext::new(&(n + 5u32), &params);
        assert_eq!(pt.value(), &BigUint::from(5u32));
        assert_eq!(pt, Plaintext::from_u64(5, &params));

        assert_eq!(Plaintext::new(n, &params), Plaintext::zero(&params));
    }

    #[test]
    fn encode() -> Result<(), Box<dyn Error>> {
        let params = test_params();
        assert!(Plaintext::zero(&params).encode().is_identity());
        assert_eq!(&Plaintext::from_u64(1, &params).encode(), params.f());

        // f has order p1, so the encoding only depends on m modulo p1.
        let p1 = &params.group().factors()[ClParameters::MESSAGE_SUBGROUP];
        let m = Plaintext::random(&params, &mut thread_rng())?;
        let shifted = Plaintext::new(&(m.value() + p1), &params);
        assert_eq!(m.encode(), shifted.encode());
        Ok(())
    }

    #[test]
    fn arithmetic() {
        let params = test_params();
        let n = params.order();
        let a = Plaintext::new(&(n - 1u32), &params);
        let b = Plaintext::from_u64(3, &params);

        assert_eq!((&a + &b).value(), &BigUint::from(2u32));
        assert_eq!((&a * &b).value(), &(n - 3u32));
        assert_eq!(&(&a + &b).encode(), &(&a.encode() * &b.encode()));
    }
}
