use num_bigint_dig::{BigUint, ModInverse};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::Result;

/// Arithmetic in a prime field `F_q` with `q ≡ 3 (mod 4)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrimeField {
    q: BigUint,
    /// (q + 1) / 4
    sqrt_exponent: BigUint,
}

impl PrimeField {
    pub(crate) fn new(q: &BigUint) -> Self {
        debug_assert_eq!(q % 4u32, BigUint::from(3u32));
        Self {
            q: q.clone(),
            sqrt_exponent: (q + BigUint::one()) >> 2,
        }
    }

    pub(crate) fn modulus(&self) -> &BigUint {
        &self.q
    }

    pub(crate) fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let s = a + b;
        if s >= self.q {
            s - &self.q
        } else {
            s
        }
    }

    pub(crate) fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if a >= b {
            a - b
        } else {
            a + &self.q - b
        }
    }

    pub(crate) fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.q - a
        }
    }

    pub(crate) fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.q
    }

    /// Inverse modulo `q`; `None` for zero.
    pub(crate) fn inv(&self, a: &BigUint) -> Option<BigUint> {
        if a.is_zero() {
            return None;
        }
        a.mod_inverse(&self.q)?.to_biguint()
    }

    /// Square root of `a` if `a` is a square.
    pub(crate) fn sqrt(&self, a: &BigUint) -> Option<BigUint> {
        let r = a.modpow(&self.sqrt_exponent, &self.q);
        if self.mul(&r, &r) == *a {
            Some(r)
        } else {
            None
        }
    }

    /// Right-hand side of the curve equation, `x³ + x`.
    pub(crate) fn curve_rhs(&self, x: &BigUint) -> BigUint {
        let x2 = self.mul(x, x);
        self.add(&self.mul(&x2, x), x)
    }

    pub(crate) fn random<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<BigUint> {
        Ok(clhe_util::sample_below(&self.q, rng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::PrimeField;
    use num_bigint_dig::BigUint;
    use rand::thread_rng;

    #[test]
    fn sqrt_and_inv() {
        // 1000003 = 3 mod 4
        let field = PrimeField::new(&BigUint::from(1000003u32));
        let mut rng = thread_rng();
        let mut squares = 0;
        for _ in 0..200 {
            let a = field.random(&mut rng).unwrap();
            if let Some(r) = field.sqrt(&a) {
                assert_eq!(field.mul(&r, &r), a);
                squares += 1;
            }
            if let Some(a_inv) = field.inv(&a) {
                assert_eq!(field.mul(&a, &a_inv), BigUint::from(1u8));
            }
        }
        assert!(squares > 0);
        assert!(field.inv(&BigUint::from(0u8)).is_none());
    }

    #[test]
    fn inv_small_field() {
        let field = PrimeField::new(&BigUint::from(23u8));
        for a in 1u8..23 {
            let a = BigUint::from(a);
            let a_inv = field.inv(&a).unwrap();
            assert!(a_inv < BigUint::from(23u8));
            assert_eq!(field.mul(&a, &a_inv), BigUint::from(1u8));
        }
        assert_eq!(field.inv(&BigUint::from(22u8)), Some(BigUint::from(22u8)));
    }

    #[test]
    fn add_sub_neg() {
        let field = PrimeField::new(&BigUint::from(23u8));
        let a = BigUint::from(20u8);
        let b = BigUint::from(7u8);
        assert_eq!(field.add(&a, &b), BigUint::from(4u8));
        assert_eq!(field.sub(&b, &a), BigUint::from(10u8));
        assert_eq!(field.add(&a, &field.neg(&a)), BigUint::from(0u8));
        assert_eq!(field.neg(&BigUint::from(0u8)), BigUint::from(0u8));
    }
}
