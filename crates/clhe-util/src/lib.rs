#![crate_name = "clhe_util"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Utilities for the clhe.rs library: uniform sampling of big integers and
//! prime generation from caller-provided randomness.

use num_bigint_dig::{prime::probably_prime, BigUint, RandPrime};
use num_traits::Zero;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::trace;

/// Number of Miller-Rabin rounds used by [`is_prime`].
pub const MILLER_RABIN_ROUNDS: usize = 20;

/// Returns whether `n` is a probable prime.
pub fn is_prime(n: &BigUint) -> bool {
    probably_prime(n, MILLER_RABIN_ROUNDS)
}

/// Sample an integer uniformly in `[0, bound)` by rejection sampling.
///
/// Randomness is drawn with [`RngCore::try_fill_bytes`] so that a failing
/// entropy source is reported instead of silently producing a value.
///
/// Aborts if `bound` is zero.
pub fn sample_below<R: RngCore + CryptoRng + ?Sized>(
    bound: &BigUint,
    rng: &mut R,
) -> Result<BigUint, rand::Error> {
    assert!(!bound.is_zero(), "cannot sample below zero");

    let bits = bound.bits();
    let num_bytes = bits.div_ceil(8);
    let excess_bits = num_bytes * 8 - bits;
    let mut buffer = vec![0u8; num_bytes];
    loop {
        rng.try_fill_bytes(&mut buffer)?;
        buffer[0] &= 0xff >> excess_bits;
        let candidate = BigUint::from_bytes_be(&buffer);
        if &candidate < bound {
            buffer.iter_mut().for_each(|b| *b = 0);
            return Ok(candidate);
        }
    }
}

/// Sample a prime of exactly `bits` bits.
///
/// Aborts if `bits < 2`.
pub fn sample_prime<R: RngCore + CryptoRng + ?Sized>(bits: usize, rng: &mut R) -> BigUint {
    assert!(bits >= 2, "a prime has at least two bits");
    rng.gen_prime(bits)
}

/// Sample `count` pairwise distinct primes of exactly `bits` bits.
///
/// The primes are generated in parallel; each worker owns a ChaCha20 stream
/// seeded from `rng`, so the output is a deterministic function of `rng`.
pub fn sample_distinct_primes<R: RngCore + CryptoRng + ?Sized>(
    count: usize,
    bits: usize,
    rng: &mut R,
) -> Result<Vec<BigUint>, rand::Error> {
    let mut primes: Vec<BigUint> = Vec::with_capacity(count);
    while primes.len() < count {
        let seeds = (primes.len()..count)
            .map(|_| {
                let mut seed = <ChaCha20Rng as SeedableRng>::Seed::default();
                rng.try_fill_bytes(&mut seed).map(|_| seed)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let candidates: Vec<BigUint> = seeds
            .into_par_iter()
            .map(|seed| sample_prime(bits, &mut ChaCha20Rng::from_seed(seed)))
            .collect();

        for p in candidates {
            if primes.contains(&p) {
                trace!(bits, "discarding repeated prime");
            } else {
                primes.push(p);
            }
        }
    }
    Ok(primes)
}
