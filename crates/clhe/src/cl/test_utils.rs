//! Helpers shared by the unit tests of the CL scheme.

use super::{ClParameters, ClParametersBuilder};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, OnceLock};

/// Parameters with 32-bit prime factors, generated once per test binary.
pub(crate) fn test_params() -> Arc<ClParameters> {
    static PARAMS: OnceLock<Arc<ClParameters>> = OnceLock::new();
    PARAMS
        .get_or_init(|| {
            ClParametersBuilder::new()
                .set_factor_size(32)
                .build_arc(&mut ChaCha8Rng::seed_from_u64(7))
                .unwrap()
        })
        .clone()
}

/// A random generator whose entropy source is unavailable.
///
/// Only the fallible `try_fill_bytes` may be used; the infallible methods
/// panic.
pub(crate) struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        unreachable!("only try_fill_bytes may be called")
    }

    fn next_u64(&mut self) -> u64 {
        unreachable!("only try_fill_bytes may be called")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unreachable!("only try_fill_bytes may be called")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source is down"))
    }
}

impl CryptoRng for FailingRng {}
