use super::field::PrimeField;
use super::{A1Parameters, Point};
use crate::{Error, Result};
use num_bigint_dig::BigUint;
use num_traits::Zero;
use std::fmt::Debug;
use std::sync::Arc;

/// The order-`N` subgroup of the curve `y² = x³ + x` over `F_q`.
///
/// Holds the arithmetic of the group; elements refer to it through an `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct CurveGroup {
    params: A1Parameters,
    pub(crate) field: PrimeField,
    /// Number of bytes of a serialized coordinate.
    pub(crate) coordinate_size: usize,
}

impl Debug for CurveGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurveGroup")
            .field("q", self.params.q())
            .field("order", self.params.order())
            .field("cofactor", self.params.cofactor())
            .finish()
    }
}

impl CurveGroup {
    /// Creates the group defined by the parameters.
    pub fn new(params: A1Parameters) -> Self {
        let field = PrimeField::new(params.q());
        let coordinate_size = params.q().bits().div_ceil(8);
        Self {
            params,
            field,
            coordinate_size,
        }
    }

    /// Creates the group in an `Arc`.
    pub fn new_arc(params: A1Parameters) -> Arc<Self> {
        Arc::new(Self::new(params))
    }

    /// Returns the parameters of the group.
    pub fn parameters(&self) -> &A1Parameters {
        &self.params
    }

    /// Returns the group order `N`.
    pub fn order(&self) -> &BigUint {
        self.params.order()
    }

    /// Returns the prime factors of the group order.
    pub fn factors(&self) -> &[BigUint] {
        self.params.factors()
    }

    /// Returns the exponent that maps the group onto the subgroup of order
    /// `factors[index]`, i.e. the product of all the other factors.
    pub fn subgroup_cofactor(&self, index: usize) -> Result<BigUint> {
        let factors = self.factors();
        if index >= factors.len() {
            return Err(Error::InvalidSubgroupIndex(index, factors.len()));
        }
        Ok(factors
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .fold(BigUint::from(1u32), |acc, (_, f)| acc * f))
    }

    /// Returns whether the affine coordinates satisfy the curve equation.
    pub fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        let q = self.field.modulus();
        x < q && y < q && self.field.mul(y, y) == self.field.curve_rhs(x)
    }

    pub(crate) fn neg_point(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: self.field.neg(y),
            },
        }
    }

    pub(crate) fn double_point(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => {
                if y.is_zero() {
                    return Point::Infinity;
                }
                let fd = &self.field;
                // λ = (3x² + 1) / 2y
                let x2 = fd.mul(x, x);
                let num = fd.add(&fd.add(&fd.add(&x2, &x2), &x2), &BigUint::from(1u32));
                let den = fd.add(y, y);
                let lambda = match fd.inv(&den) {
                    Some(inv) => fd.mul(&num, &inv),
                    None => return Point::Infinity,
                };
                self.finish_addition(&lambda, x, y, x)
            }
        }
    }

    pub(crate) fn add_points(&self, a: &Point, b: &Point) -> Point {
        match (a, b) {
            (Point::Infinity, _) => b.clone(),
            (_, Point::Infinity) => a.clone(),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                let fd = &self.field;
                if x1 == x2 {
                    if y1 == y2 {
                        return self.double_point(a);
                    }
                    // y1 = -y2
                    return Point::Infinity;
                }
                let num = fd.sub(y2, y1);
                let den = fd.sub(x2, x1);
                let lambda = match fd.inv(&den) {
                    Some(inv) => fd.mul(&num, &inv),
                    None => return Point::Infinity,
                };
                self.finish_addition(&lambda, x1, y1, x2)
            }
        }
    }

    /// x3 = λ² - x1 - x2, y3 = λ(x1 - x3) - y1
    fn finish_addition(&self, lambda: &BigUint, x1: &BigUint, y1: &BigUint, x2: &BigUint) -> Point {
        let fd = &self.field;
        let x3 = fd.sub(&fd.sub(&fd.mul(lambda, lambda), x1), x2);
        let y3 = fd.sub(&fd.mul(lambda, &fd.sub(x1, &x3)), y1);
        Point::Affine { x: x3, y: y3 }
    }

    /// Left-to-right double-and-add.
    ///
    /// The running time depends on the exponent.
    pub(crate) fn mul_point(&self, p: &Point, k: &BigUint) -> Point {
        let mut acc = Point::Infinity;
        if k.is_zero() || p.is_infinity() {
            return acc;
        }
        for byte in k.to_bytes_be() {
            for i in (0..8).rev() {
                acc = self.double_point(&acc);
                if (byte >> i) & 1 == 1 {
                    acc = self.add_points(&acc, p);
                }
            }
        }
        acc
    }
}
