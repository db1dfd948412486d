//! The exponent domain `Z_N` of a group of order `N`.

use crate::{Error, Result};
use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

/// Integers modulo `N`, used as exponents of group elements.
///
/// Values are represented by their canonical representative in `[0, N)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExponentDomain {
    modulus: BigUint,
}

impl ExponentDomain {
    /// Create the domain of integers modulo `modulus`.
    ///
    /// Returns an error if the modulus is smaller than 2.
    pub fn new(modulus: BigUint) -> Result<Self> {
        if modulus <= BigUint::one() {
            Err(Error::InvalidParameters(
                "The exponent modulus must be at least 2".to_string(),
            ))
        } else {
            Ok(Self { modulus })
        }
    }

    /// Returns the modulus `N`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Returns whether `a` is a canonical representative.
    pub fn contains(&self, a: &BigUint) -> bool {
        a < &self.modulus
    }

    /// Reduce `a` modulo `N`.
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.modulus
    }

    /// Modular addition of canonical representatives.
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        debug_assert!(self.contains(a) && self.contains(b));
        let s = a + b;
        if s >= self.modulus {
            s - &self.modulus
        } else {
            s
        }
    }

    /// Modular subtraction of canonical representatives.
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        debug_assert!(self.contains(a) && self.contains(b));
        if a >= b {
            a - b
        } else {
            a + &self.modulus - b
        }
    }

    /// Modular negation of a canonical representative.
    pub fn neg(&self, a: &BigUint) -> BigUint {
        debug_assert!(self.contains(a));
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.modulus - a
        }
    }

    /// Modular multiplication.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Sample a uniform element of `Z_N`.
    pub fn random<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<BigUint> {
        Ok(clhe_util::sample_below(&self.modulus, rng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::ExponentDomain;
    use num_bigint_dig::BigUint;
    use proptest::prelude::*;
    use rand::thread_rng;

    #[test]
    fn constructor() {
        assert!(ExponentDomain::new(BigUint::from(0u8)).is_err());
        assert!(ExponentDomain::new(BigUint::from(1u8)).is_err());
        assert!(ExponentDomain::new(BigUint::from(2u8)).is_ok());
    }

    #[test]
    fn random_is_reduced() {
        let zn = ExponentDomain::new(BigUint::from(1009u32 * 1013)).unwrap();
        let mut rng = thread_rng();
        for _ in 0..100 {
            assert!(zn.contains(&zn.random(&mut rng).unwrap()));
        }
    }

    proptest! {
        #[test]
        fn arithmetic(n in 2u64..u32::MAX as u64, a: u64, b: u64) {
            let zn = ExponentDomain::new(BigUint::from(n)).unwrap();
            let (a_mod, b_mod) = (a % n, b % n);
            let a = zn.reduce(&BigUint::from(a));
            let b = zn.reduce(&BigUint::from(b));

            prop_assert_eq!(zn.add(&a, &b), BigUint::from((a_mod as u128 + b_mod as u128) % n as u128));
            prop_assert_eq!(zn.sub(&a, &b), BigUint::from((a_mod as u128 + n as u128 - b_mod as u128) % n as u128));
            prop_assert_eq!(zn.mul(&a, &b), BigUint::from((a_mod as u128 * b_mod as u128) % n as u128));
            prop_assert_eq!(zn.add(&a, &zn.neg(&a)), BigUint::from(0u8));
        }
    }
}
