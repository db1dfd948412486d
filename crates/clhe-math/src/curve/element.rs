//! Elements of the composite-order group.

use super::CurveGroup;
use crate::{Error, Result};
use clhe_traits::{DeserializeWithContext, Serialize};
use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};
use std::fmt::{Debug, Display};
use std::ops::{Mul, MulAssign};
use std::sync::Arc;
use tracing::trace;
use zeroize::Zeroize;

const TAG_IDENTITY: u8 = 0x00;
const TAG_AFFINE: u8 = 0x04;

/// A point of the curve, in affine coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Point {
    /// The point at infinity, i.e. the identity of the group.
    Infinity,
    /// An affine point `(x, y)`.
    Affine {
        /// The x coordinate.
        x: BigUint,
        /// The y coordinate.
        y: BigUint,
    },
}

impl Point {
    /// Returns whether the point is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }
}

impl Zeroize for Point {
    fn zeroize(&mut self) {
        if let Point::Affine { x, y } = self {
            x.zeroize();
            y.zeroize();
        }
        *self = Point::Infinity;
    }
}

/// An element of the order-`N` group, written multiplicatively.
#[derive(Clone)]
pub struct GroupElement {
    group: Arc<CurveGroup>,
    point: Point,
}

impl GroupElement {
    /// The identity element of the group.
    pub fn identity(group: &Arc<CurveGroup>) -> Self {
        Self {
            group: group.clone(),
            point: Point::Infinity,
        }
    }

    /// Creates an element from affine coordinates.
    ///
    /// Returns an error if the point is not on the curve. Membership in the
    /// order-`N` subgroup is not checked.
    pub fn new(x: BigUint, y: BigUint, group: &Arc<CurveGroup>) -> Result<Self> {
        if !group.is_on_curve(&x, &y) {
            return Err(Error::NotOnCurve);
        }
        Ok(Self {
            group: group.clone(),
            point: Point::Affine { x, y },
        })
    }

    /// Samples a random element of the order-`N` group.
    ///
    /// A random point of the curve is multiplied by the cofactor `l`.
    pub fn random<R: RngCore + CryptoRng>(group: &Arc<CurveGroup>, rng: &mut R) -> Result<Self> {
        let field = &group.field;
        let cofactor = group.parameters().cofactor();
        loop {
            let x = field.random(rng)?;
            let Some(mut y) = field.sqrt(&field.curve_rhs(&x)) else {
                continue;
            };
            let mut sign = [0u8; 1];
            rng.try_fill_bytes(&mut sign)?;
            if sign[0] & 1 == 1 {
                y = field.neg(&y);
            }
            let point = group.mul_point(&Point::Affine { x, y }, cofactor);
            if point.is_infinity() {
                trace!("random point killed by the cofactor, resampling");
                continue;
            }
            return Ok(Self {
                group: group.clone(),
                point,
            });
        }
    }

    /// Returns the generator of the subgroup of order `factors[index]`
    /// obtained from `self`, i.e. `self` raised to the product of the other
    /// prime factors.
    pub fn subgroup_generator(&self, index: usize) -> Result<Self> {
        Ok(self.pow(&self.group.subgroup_cofactor(index)?))
    }

    /// Returns the group of this element.
    pub fn group(&self) -> &Arc<CurveGroup> {
        &self.group
    }

    /// Returns the underlying curve point.
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Returns whether this is the identity element.
    pub fn is_identity(&self) -> bool {
        self.point.is_infinity()
    }

    /// Exponentiation by an arbitrary non-negative integer.
    ///
    /// This operation runs in variable time with respect to the exponent.
    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self {
            group: self.group.clone(),
            point: self.group.mul_point(&self.point, exponent),
        }
    }

    /// The inverse element.
    pub fn invert(&self) -> Self {
        Self {
            group: self.group.clone(),
            point: self.group.neg_point(&self.point),
        }
    }
}

/// Zeroizing an element overwrites its coordinates and leaves the identity.
impl Zeroize for GroupElement {
    fn zeroize(&mut self) {
        self.point.zeroize();
    }
}

impl PartialEq for GroupElement {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.group, &other.group) || self.group == other.group)
            && self.point == other.point
    }
}

impl Eq for GroupElement {}

impl Debug for GroupElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupElement")
            .field("point", &self.point)
            .finish()
    }
}

/// Textual form `x,y` in decimal, or `O` for the identity.
impl Display for GroupElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.point {
            Point::Infinity => write!(f, "O"),
            Point::Affine { x, y } => write!(f, "{},{}", x, y),
        }
    }
}

impl Mul<&GroupElement> for &GroupElement {
    type Output = GroupElement;

    fn mul(self, rhs: &GroupElement) -> GroupElement {
        debug_assert_eq!(self.group, rhs.group);
        GroupElement {
            group: self.group.clone(),
            point: self.group.add_points(&self.point, &rhs.point),
        }
    }
}

impl Mul<&GroupElement> for GroupElement {
    type Output = GroupElement;

    fn mul(self, rhs: &GroupElement) -> GroupElement {
        &self * rhs
    }
}

impl MulAssign<&GroupElement> for GroupElement {
    fn mul_assign(&mut self, rhs: &GroupElement) {
        debug_assert_eq!(self.group, rhs.group);
        self.point = self.group.add_points(&self.point, &rhs.point);
    }
}

/// Encoding: a single `0x00` byte for the identity, otherwise `0x04`
/// followed by the big-endian coordinates padded to the size of `q`.
impl Serialize for GroupElement {
    fn to_bytes(&self) -> Vec<u8> {
        match &self.point {
            Point::Infinity => vec![TAG_IDENTITY],
            Point::Affine { x, y } => {
                let size = self.group.coordinate_size;
                let mut bytes = vec![0u8; 1 + 2 * size];
                bytes[0] = TAG_AFFINE;
                let x_bytes = x.to_bytes_be();
                let y_bytes = y.to_bytes_be();
                bytes[1 + size - x_bytes.len()..1 + size].copy_from_slice(&x_bytes);
                bytes[1 + 2 * size - y_bytes.len()..].copy_from_slice(&y_bytes);
                bytes
            }
        }
    }
}

impl DeserializeWithContext for GroupElement {
    type Error = Error;
    type Context = CurveGroup;

    fn from_bytes(bytes: &[u8], ctx: &Arc<CurveGroup>) -> Result<Self> {
        let size = ctx.coordinate_size;
        match bytes.first() {
            Some(&TAG_IDENTITY) if bytes.len() == 1 => Ok(Self::identity(ctx)),
            Some(&TAG_AFFINE) if bytes.len() == 1 + 2 * size => {
                let x = BigUint::from_bytes_be(&bytes[1..1 + size]);
                let y = BigUint::from_bytes_be(&bytes[1 + size..]);
                Self::new(x, y, ctx)
            }
            _ => Err(Error::SerializationError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GroupElement, Point};
    use crate::curve::{A1Generator, CurveGroup};
    use crate::Error;
    use clhe_traits::{DeserializeWithContext, Serialize};
    use num_bigint_dig::BigUint;
    use proptest::prelude::*;
    use rand::{thread_rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::sync::{Arc, OnceLock};
    use zeroize::Zeroize;

    fn test_group() -> Arc<CurveGroup> {
        static GROUP: OnceLock<Arc<CurveGroup>> = OnceLock::new();
        GROUP
            .get_or_init(|| {
                let params = A1Generator::new(2, 32)
                    .generate(&mut ChaCha8Rng::seed_from_u64(42))
                    .unwrap();
                CurveGroup::new_arc(params)
            })
            .clone()
    }

    #[test]
    fn random_has_order_dividing_n() {
        let group = test_group();
        let mut rng = thread_rng();
        for _ in 0..10 {
            let g = GroupElement::random(&group, &mut rng).unwrap();
            assert!(!g.is_identity());
            assert!(g.pow(group.order()).is_identity());
        }
    }

    #[test]
    fn subgroup_generators() {
        let group = test_group();
        let g = GroupElement::random(&group, &mut thread_rng()).unwrap();
        let factors = group.factors();

        let f = g.subgroup_generator(0).unwrap();
        let gq = g.subgroup_generator(1).unwrap();
        assert!(!f.is_identity());
        assert!(!gq.is_identity());
        assert!(f.pow(&factors[0]).is_identity());
        assert!(gq.pow(&factors[1]).is_identity());
        assert!(!f.pow(&factors[1]).is_identity());
        assert!(!gq.pow(&factors[0]).is_identity());
        assert_eq!(g.pow(&factors[1]), f);

        assert_eq!(g.subgroup_generator(2).err(), Some(Error::InvalidSubgroupIndex(2, 2)));
    }

    #[test]
    fn inverse_and_identity() {
        let group = test_group();
        let g = GroupElement::random(&group, &mut thread_rng()).unwrap();
        let one = GroupElement::identity(&group);
        assert!((&g * &g.invert()).is_identity());
        assert_eq!(&g * &one, g);
        assert_eq!(one.invert(), one);
        assert_eq!(g.pow(&BigUint::from(0u32)), one);

        let mut h = g.clone();
        h *= &g;
        assert_eq!(h, g.pow(&BigUint::from(2u32)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]
        #[test]
        fn pow_is_homomorphic(a: u64, b: u64) {
            let group = test_group();
            let g = GroupElement::random(&group, &mut thread_rng()).unwrap();
            let (a, b) = (BigUint::from(a), BigUint::from(b));
            prop_assert_eq!(g.pow(&(&a + &b)), &g.pow(&a) * &g.pow(&b));
            prop_assert_eq!(g.pow(&(&a * &b)), g.pow(&a).pow(&b));
        }
    }

    #[test]
    fn serialize() {
        let group = test_group();
        let g = GroupElement::random(&group, &mut thread_rng()).unwrap();
        let one = GroupElement::identity(&group);
        for e in [&g, &one] {
            assert_eq!(&GroupElement::from_bytes(&e.to_bytes(), &group).unwrap(), e);
        }

        let mut bytes = g.to_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 1;
        assert_eq!(GroupElement::from_bytes(&bytes, &group), Err(Error::NotOnCurve));
        assert_eq!(
            GroupElement::from_bytes(&bytes[..last], &group),
            Err(Error::SerializationError)
        );
        assert_eq!(GroupElement::from_bytes(&[], &group), Err(Error::SerializationError));
        assert_eq!(
            GroupElement::from_bytes(&[0x00, 0x00], &group),
            Err(Error::SerializationError)
        );
    }

    #[test]
    fn zeroize() {
        let group = test_group();
        let mut g = GroupElement::random(&group, &mut thread_rng()).unwrap();
        g.zeroize();
        assert!(g.is_identity());
    }

    #[test]
    fn display() {
        let group = test_group();
        assert_eq!(GroupElement::identity(&group).to_string(), "O");
        let g = GroupElement::random(&group, &mut thread_rng()).unwrap();
        let Point::Affine { x, y } = g.point() else {
            panic!("random elements are not the identity");
        };
        assert_eq!(g.to_string(), format!("{},{}", x, y));
    }
}
