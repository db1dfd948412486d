//! Homomorphic operations on CL ciphertexts.

use super::{Ciphertext, Plaintext};
use num_bigint_dig::BigUint;
use std::ops::{Add, AddAssign, Mul, MulAssign};
use std::sync::Arc;

impl Add<&Ciphertext> for &Ciphertext {
    type Output = Ciphertext;

    fn add(self, rhs: &Ciphertext) -> Ciphertext {
        let mut self_clone = self.clone();
        self_clone += rhs;
        self_clone
    }
}

impl Add<&Ciphertext> for Ciphertext {
    type Output = Ciphertext;

    fn add(mut self, rhs: &Ciphertext) -> Ciphertext {
        self += rhs;
        self
    }
}

/// Componentwise product: the result encrypts the sum of the plaintexts.
///
/// The components are not checked to lie in the expected subgroups.
impl AddAssign<&Ciphertext> for Ciphertext {
    fn add_assign(&mut self, rhs: &Ciphertext) {
        debug_assert!(Arc::ptr_eq(&self.par, &rhs.par) || self.par == rhs.par);
        self.c1 *= &rhs.c1;
        self.c2 *= &rhs.c2;
    }
}

impl Mul<&BigUint> for &Ciphertext {
    type Output = Ciphertext;

    fn mul(self, rhs: &BigUint) -> Ciphertext {
        let mut self_clone = self.clone();
        self_clone *= rhs;
        self_clone
    }
}

impl Mul<&Plaintext> for &Ciphertext {
    type Output = Ciphertext;

    fn mul(self, rhs: &Plaintext) -> Ciphertext {
        let mut self_clone = self.clone();
        self_clone *= rhs;
        self_clone
    }
}

/// Componentwise exponentiation: the result encrypts the plaintext times
/// the scalar.
impl MulAssign<&BigUint> for Ciphertext {
    fn mul_assign(&mut self, rhs: &BigUint) {
        self.c1 = self.c1.pow(rhs);
        self.c2 = self.c2.pow(rhs);
    }
}

impl MulAssign<&Plaintext> for Ciphertext {
    fn mul_assign(&mut self, rhs: &Plaintext) {
        debug_assert!(Arc::ptr_eq(&self.par, &rhs.par) || self.par == rhs.par);
        *self *= &rhs.m;
    }
}
