//! Create parameters for the CL encryption scheme

use crate::proto::cl::Parameters;
use crate::{Error, ParametersError, Result};
use clhe_math::{
    curve::{A1Generator, A1Parameters, CurveGroup, GroupElement},
    zn::ExponentDomain,
};
use clhe_traits::{Deserialize, DeserializeWithContext, LheParameters, Serialize};
use num_bigint_dig::BigUint;
use prost::Message;
use rand::{thread_rng, CryptoRng, RngCore};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, trace};

/// Parameters for the CL encryption scheme.
///
/// Holds the composite-order group `G` of order `N = p1·p2`, a generator `g`
/// of `G`, the generator `f = g^p2` of the message subgroup `F` (order `p1`)
/// and the generator `gq = g^p1` of the subgroup `Gq` (order `p2`).
#[derive(PartialEq, Eq)]
pub struct ClParameters {
    /// Bit size of each prime factor of the group order.
    factor_size: usize,

    /// The composite-order group.
    group: Arc<CurveGroup>,

    /// Exponents modulo the group order.
    pub(crate) exponents: ExponentDomain,

    /// Generator of the full group.
    g: GroupElement,

    /// Generator of the message subgroup F.
    pub(crate) f: GroupElement,

    /// Generator of the subgroup Gq.
    pub(crate) gq: GroupElement,
}

impl Debug for ClParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClParameters")
            .field("factor_size", &self.factor_size)
            .field("group", &self.group)
            .finish()
    }
}

impl LheParameters for ClParameters {}

impl ClParameters {
    /// Number of prime factors of the group order.
    pub const NUM_PRIMES: usize = 2;

    /// Index of the prime factor of the message subgroup F.
    pub const MESSAGE_SUBGROUP: usize = 0;

    /// Index of the prime factor of the subgroup Gq.
    pub const HARD_SUBGROUP: usize = 1;

    /// Returns the bit size of the prime factors.
    pub const fn factor_size(&self) -> usize {
        self.factor_size
    }

    /// Returns the number of prime factors of the group order.
    pub const fn num_primes(&self) -> usize {
        Self::NUM_PRIMES
    }

    /// Returns the composite-order group.
    pub fn group(&self) -> &Arc<CurveGroup> {
        &self.group
    }

    /// Returns the group order `N`.
    pub fn order(&self) -> &BigUint {
        self.group.order()
    }

    /// Returns the exponent domain `Z_N`.
    pub fn exponent_domain(&self) -> &ExponentDomain {
        &self.exponents
    }

    /// Returns the generator `g` of the full group.
    pub fn g(&self) -> &GroupElement {
        &self.g
    }

    /// Returns the generator `f` of the message subgroup.
    pub fn f(&self) -> &GroupElement {
        &self.f
    }

    /// Returns the generator `gq` of the subgroup of unknown order.
    pub fn gq(&self) -> &GroupElement {
        &self.gq
    }

    /// Returns parameters with prime factors of `factor_size` bits, generated
    /// from the thread-local random generator.
    ///
    /// Aborts if the parameters cannot be generated.
    pub fn default_arc(factor_size: usize) -> Arc<Self> {
        ClParametersBuilder::new()
            .set_factor_size(factor_size)
            .build_arc(&mut thread_rng())
            .unwrap()
    }

    /// Derive the subgroup generators from a generator `g` of the group.
    ///
    /// Returns `Error::SetupFailure` if `g` is not in the order-`N` group or
    /// if one of the subgroup generators is the identity.
    fn from_generator(factor_size: usize, g: GroupElement) -> Result<Self> {
        let group = g.group().clone();
        if !g.pow(group.order()).is_identity() {
            return Err(Error::SetupFailure(
                "The generator is not in the group of order N".to_string(),
            ));
        }

        let f = g.subgroup_generator(Self::MESSAGE_SUBGROUP)?;
        let gq = g.subgroup_generator(Self::HARD_SUBGROUP)?;
        if f.is_identity() || gq.is_identity() {
            return Err(Error::SetupFailure(
                "The generator does not generate the full group".to_string(),
            ));
        }

        let exponents = ExponentDomain::new(group.order().clone())?;
        Ok(Self {
            factor_size,
            group,
            exponents,
            g,
            f,
            gq,
        })
    }
}

/// Builder for parameters for the CL encryption scheme.
#[derive(Debug)]
pub struct ClParametersBuilder {
    num_primes: usize,
    factor_size: usize,
}

impl ClParametersBuilder {
    /// Smallest supported size of the prime factors.
    pub const MIN_FACTOR_SIZE: usize = 16;

    /// Largest supported size of the prime factors.
    pub const MAX_FACTOR_SIZE: usize = 2048;

    /// Number of generators tried before the setup is declared failed.
    pub const MAX_GENERATOR_ATTEMPTS: usize = 16;

    /// Creates a new instance of the builder, with two prime factors of 128
    /// bits.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            num_primes: ClParameters::NUM_PRIMES,
            factor_size: 128,
        }
    }

    /// Sets the number of prime factors of the group order. Building fails
    /// unless it is equal to 2.
    pub fn set_num_primes(&mut self, num_primes: usize) -> &mut Self {
        self.num_primes = num_primes;
        self
    }

    /// Sets the bit size of each prime factor. Building fails if the size is
    /// not between `MIN_FACTOR_SIZE` and `MAX_FACTOR_SIZE`.
    pub fn set_factor_size(&mut self, factor_size: usize) -> &mut Self {
        self.factor_size = factor_size;
        self
    }

    /// Build a new `ClParameters` inside an `Arc`.
    pub fn build_arc<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<Arc<ClParameters>> {
        self.build(rng).map(Arc::new)
    }

    /// Build a new `ClParameters`.
    ///
    /// Generates the composite-order group, samples a random generator `g`
    /// and derives `f = g^(N/p1)` and `gq = g^(N/p2)`.
    pub fn build<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<ClParameters> {
        if self.num_primes != ClParameters::NUM_PRIMES {
            return Err(Error::ParametersError(ParametersError::InvalidNumPrimes(
                self.num_primes,
                ClParameters::NUM_PRIMES,
            )));
        }
        if self.factor_size < Self::MIN_FACTOR_SIZE || self.factor_size > Self::MAX_FACTOR_SIZE {
            return Err(Error::ParametersError(ParametersError::InvalidFactorSize(
                self.factor_size,
                Self::MIN_FACTOR_SIZE,
                Self::MAX_FACTOR_SIZE,
            )));
        }

        debug!(
            num_primes = self.num_primes,
            factor_size = self.factor_size,
            "building CL parameters"
        );
        let params = A1Generator::new(self.num_primes, self.factor_size)
            .generate(rng)
            .map_err(setup_failure)?;
        let group = CurveGroup::new_arc(params);

        for attempt in 0..Self::MAX_GENERATOR_ATTEMPTS {
            let g = GroupElement::random(&group, rng)?;
            match ClParameters::from_generator(self.factor_size, g) {
                Ok(par) => {
                    debug!(attempt, "CL parameters ready");
                    return Ok(par);
                }
                Err(Error::SetupFailure(reason)) => {
                    trace!(attempt, %reason, "resampling the generator");
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::SetupFailure(format!(
            "No generator of the full group after {} attempts",
            Self::MAX_GENERATOR_ATTEMPTS
        )))
    }
}

fn setup_failure(e: clhe_math::Error) -> Error {
    match e {
        clhe_math::Error::Randomness(reason) => Error::RandomnessFailure(reason),
        e => Error::SetupFailure(e.to_string()),
    }
}

impl Serialize for ClParameters {
    fn to_bytes(&self) -> Vec<u8> {
        let a1 = self.group.parameters();
        Parameters {
            q: a1.q().to_bytes_be(),
            factors: a1.factors().iter().map(|p| p.to_bytes_be()).collect(),
            cofactor: a1.cofactor().to_bytes_be(),
            g: self.g.to_bytes(),
            factor_size: self.factor_size as u32,
        }
        .encode_to_vec()
    }
}

impl Deserialize for ClParameters {
    type Error = Error;

    /// Deserializes the parameters, validating the group and the generator.
    fn try_deserialize(bytes: &[u8]) -> Result<Self> {
        let params: Parameters = Message::decode(bytes).map_err(|_| Error::SerializationError)?;

        if params.factors.len() != ClParameters::NUM_PRIMES {
            return Err(Error::ParametersError(ParametersError::InvalidNumPrimes(
                params.factors.len(),
                ClParameters::NUM_PRIMES,
            )));
        }
        let factor_size = params.factor_size as usize;
        if !(ClParametersBuilder::MIN_FACTOR_SIZE..=ClParametersBuilder::MAX_FACTOR_SIZE)
            .contains(&factor_size)
        {
            return Err(Error::ParametersError(ParametersError::InvalidFactorSize(
                factor_size,
                ClParametersBuilder::MIN_FACTOR_SIZE,
                ClParametersBuilder::MAX_FACTOR_SIZE,
            )));
        }
        let factors = params
            .factors
            .iter()
            .map(|p| BigUint::from_bytes_be(p))
            .collect::<Vec<_>>();
        if factors.iter().any(|p| p.bits() != factor_size) {
            return Err(Error::ParametersError(ParametersError::InvalidFactorSize(
                factor_size,
                ClParametersBuilder::MIN_FACTOR_SIZE,
                ClParametersBuilder::MAX_FACTOR_SIZE,
            )));
        }

        let a1 = A1Parameters::new(
            BigUint::from_bytes_be(&params.q),
            &factors,
            BigUint::from_bytes_be(&params.cofactor),
        )?;
        let group = CurveGroup::new_arc(a1);
        let g = GroupElement::from_bytes(&params.g, &group)?;
        ClParameters::from_generator(factor_size, g)
    }
}

#[cfg(test)]
mod tests {
    use super::{ClParameters, ClParametersBuilder};
    use crate::cl::test_utils::FailingRng;
    use crate::proto::cl::Parameters;
    use crate::{Error, ParametersError};
    use clhe_traits::{Deserialize, Serialize};
    use num_bigint_dig::BigUint;
    use prost::Message;
    use rand::{thread_rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::error::Error as StdError;

    #[test]
    fn default() {
        let params = ClParameters::default_arc(32);
        assert_eq!(params.factor_size(), 32);
        assert_eq!(params.num_primes(), 2);
        assert_eq!(params.group().factors().len(), 2);
        assert!(params.group().factors().iter().all(|p| p.bits() == 32));
        assert_eq!(params.exponent_domain().modulus(), params.order());
    }

    #[test]
    fn generators() {
        let params = ClParameters::default_arc(32);
        let factors = params.group().factors();
        let (p1, p2) = (&factors[0], &factors[1]);

        assert!(!params.g().is_identity());
        assert!(params.g().pow(params.order()).is_identity());

        // f generates the subgroup of order p1, gq the one of order p2.
        assert!(!params.f().is_identity());
        assert!(!params.gq().is_identity());
        assert!(params.f().pow(p1).is_identity());
        assert!(params.gq().pow(p2).is_identity());
        assert_eq!(params.f(), &params.g().pow(p2));
        assert_eq!(params.gq(), &params.g().pow(p1));

        // The subgroups are disjoint.
        assert_ne!(params.f(), params.gq());
        assert!(!params.f().pow(p2).is_identity());
        assert!(!params.gq().pow(p1).is_identity());
    }

    #[test]
    fn deterministic_build() -> Result<(), Box<dyn StdError>> {
        let mut builder = ClParametersBuilder::new();
        builder.set_factor_size(24);
        let a = builder.build(&mut ChaCha8Rng::seed_from_u64(1))?;
        let b = builder.build(&mut ChaCha8Rng::seed_from_u64(1))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn invalid_builder() {
        let mut rng = thread_rng();
        assert_eq!(
            ClParametersBuilder::new()
                .set_num_primes(3)
                .set_factor_size(32)
                .build(&mut rng)
                .err(),
            Some(Error::ParametersError(ParametersError::InvalidNumPrimes(3, 2)))
        );
        assert_eq!(
            ClParametersBuilder::new()
                .set_factor_size(8)
                .build(&mut rng)
                .err(),
            Some(Error::ParametersError(ParametersError::InvalidFactorSize(
                8, 16, 2048
            )))
        );
        assert_eq!(
            ClParametersBuilder::new()
                .set_factor_size(4096)
                .build(&mut rng)
                .err(),
            Some(Error::ParametersError(ParametersError::InvalidFactorSize(
                4096, 16, 2048
            )))
        );
    }

    #[test]
    fn failing_rng() {
        assert!(matches!(
            ClParametersBuilder::new()
                .set_factor_size(32)
                .build(&mut FailingRng),
            Err(Error::RandomnessFailure(_))
        ));
        // Invalid sizes are reported before any randomness is drawn.
        assert_eq!(
            ClParametersBuilder::new()
                .set_factor_size(8)
                .build(&mut FailingRng)
                .err(),
            Some(Error::ParametersError(ParametersError::InvalidFactorSize(
                8, 16, 2048
            )))
        );
    }

    #[test]
    fn serialize() -> Result<(), Box<dyn StdError>> {
        let params = ClParameters::default_arc(32);
        let bytes = params.to_bytes();
        assert_eq!(ClParameters::try_deserialize(&bytes)?, *params);
        Ok(())
    }

    #[test]
    fn deserialize_rejects_tampering() {
        let params = ClParameters::default_arc(32);
        let proto = Parameters::decode(params.to_bytes().as_slice()).unwrap();

        assert_eq!(
            ClParameters::try_deserialize(&[0xff; 7]).err(),
            Some(Error::SerializationError)
        );

        let mut wrong_q = proto.clone();
        let q = BigUint::from_bytes_be(&wrong_q.q) + 4u32;
        wrong_q.q = q.to_bytes_be();
        assert!(ClParameters::try_deserialize(&wrong_q.encode_to_vec()).is_err());

        let mut one_factor = proto.clone();
        one_factor.factors.pop();
        assert_eq!(
            ClParameters::try_deserialize(&one_factor.encode_to_vec()).err(),
            Some(Error::ParametersError(ParametersError::InvalidNumPrimes(1, 2)))
        );

        let mut wrong_size = proto.clone();
        wrong_size.factor_size = 33;
        assert!(matches!(
            ClParameters::try_deserialize(&wrong_size.encode_to_vec()),
            Err(Error::ParametersError(ParametersError::InvalidFactorSize(33, _, _)))
        ));

        // A well-formed toy group whose factors are below the minimum size.
        let toy = Parameters {
            q: BigUint::from(139u32).to_bytes_be(),
            factors: vec![vec![5], vec![7]],
            cofactor: vec![4],
            g: vec![0x00],
            factor_size: 3,
        };
        assert_eq!(
            ClParameters::try_deserialize(&toy.encode_to_vec()).err(),
            Some(Error::ParametersError(ParametersError::InvalidFactorSize(
                3, 16, 2048
            )))
        );

        let mut oversized = proto.clone();
        oversized.factor_size = 4096;
        assert_eq!(
            ClParameters::try_deserialize(&oversized.encode_to_vec()).err(),
            Some(Error::ParametersError(ParametersError::InvalidFactorSize(
                4096, 16, 2048
            )))
        );

        let mut identity = proto;
        identity.g = vec![0x00];
        assert!(matches!(
            ClParameters::try_deserialize(&identity.encode_to_vec()),
            Err(Error::SetupFailure(_))
        ));
    }
}
