//! Parameters of the Type A1 composite-order group and their generation.

use crate::{Error, Result};
use clhe_util::{is_prime, sample_distinct_primes};
use itertools::Itertools;
use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

/// Parameters of a Type A1 group.
///
/// The group order is `N = ∏ factors`, the field prime is
/// `q = cofactor · N - 1` with `cofactor ≡ 0 (mod 4)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Parameters {
    q: BigUint,
    order: BigUint,
    factors: Box<[BigUint]>,
    cofactor: BigUint,
}

impl A1Parameters {
    /// Build parameters from the field prime, the prime factors of the order
    /// and the cofactor.
    ///
    /// Returns an error if the factors are not distinct odd primes, if the
    /// cofactor is not a positive multiple of 4, if `q ≠ cofactor · N - 1` or
    /// if `q` is not prime.
    pub fn new(q: BigUint, factors: &[BigUint], cofactor: BigUint) -> Result<Self> {
        if factors.is_empty() {
            return Err(Error::InvalidParameters(
                "At least one prime factor is required".to_string(),
            ));
        }
        if !factors.iter().all_unique() {
            return Err(Error::InvalidParameters(
                "The prime factors must be distinct".to_string(),
            ));
        }
        if let Some(f) = factors
            .iter()
            .find(|f| !is_prime(f) || *f == &BigUint::from(2u32))
        {
            return Err(Error::InvalidParameters(format!(
                "The factor {} is not an odd prime",
                f
            )));
        }
        if cofactor.is_zero() || !(&cofactor % 4u32).is_zero() {
            return Err(Error::InvalidParameters(
                "The cofactor must be a positive multiple of 4".to_string(),
            ));
        }

        let params = Self::from_parts(q, factors.to_vec(), cofactor);
        if params.q != &params.cofactor * &params.order - BigUint::one() {
            return Err(Error::InvalidParameters(
                "The field prime does not match the group order".to_string(),
            ));
        }
        if !is_prime(&params.q) {
            return Err(Error::InvalidParameters(
                "The field modulus is not prime".to_string(),
            ));
        }
        Ok(params)
    }

    fn from_parts(q: BigUint, factors: Vec<BigUint>, cofactor: BigUint) -> Self {
        let order = factors.iter().fold(BigUint::one(), |acc, f| acc * f);
        Self {
            q,
            order,
            factors: factors.into_boxed_slice(),
            cofactor,
        }
    }

    /// Returns the field prime `q`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Returns the group order `N`.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Returns the prime factors of the group order.
    pub fn factors(&self) -> &[BigUint] {
        &self.factors
    }

    /// Returns the cofactor `l` such that `q + 1 = l · N`.
    pub fn cofactor(&self) -> &BigUint {
        &self.cofactor
    }
}

/// Generator of [`A1Parameters`] for a number of prime factors of a given
/// bit length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct A1Generator {
    num_primes: usize,
    bits: usize,
}

impl A1Generator {
    /// Smallest supported bit length of a prime factor.
    pub const MIN_FACTOR_BITS: usize = 8;

    /// Number of cofactor candidates tried before giving up.
    pub const MAX_COFACTOR_CANDIDATES: usize = 1 << 16;

    /// Create a generator for `num_primes` prime factors of `bits` bits.
    pub fn new(num_primes: usize, bits: usize) -> Self {
        Self { num_primes, bits }
    }

    /// Generate fresh parameters.
    ///
    /// The cofactor is the smallest multiple of 4 making `l·N - 1` prime.
    pub fn generate<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<A1Parameters> {
        if self.num_primes == 0 {
            return Err(Error::InvalidParameters(
                "At least one prime factor is required".to_string(),
            ));
        }
        if self.bits < Self::MIN_FACTOR_BITS {
            return Err(Error::InvalidParameters(format!(
                "The prime factors must have at least {} bits",
                Self::MIN_FACTOR_BITS
            )));
        }

        debug!(
            num_primes = self.num_primes,
            bits = self.bits,
            "generating type A1 parameters"
        );
        let factors = sample_distinct_primes(self.num_primes, self.bits, rng)?;
        let order = factors.iter().fold(BigUint::one(), |acc, f| acc * f);

        let four = BigUint::from(4u32);
        let step = &order * &four;
        let mut cofactor = four.clone();
        let mut q = &step - BigUint::one();
        for _ in 0..Self::MAX_COFACTOR_CANDIDATES {
            if is_prime(&q) {
                debug!(
                    q_bits = q.bits(),
                    cofactor = %cofactor,
                    "found type A1 field prime"
                );
                return Ok(A1Parameters::from_parts(q, factors, cofactor));
            }
            trace!(cofactor = %cofactor, "cofactor rejected");
            q += &step;
            cofactor += &four;
        }
        Err(Error::NoPrimeFound(Self::MAX_COFACTOR_CANDIDATES))
    }
}
