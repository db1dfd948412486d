//! The Type A1 composite-order group.
//!
//! The group `G` is the order-`N` subgroup of the points of the supersingular
//! curve `E: y² = x³ + x` over `F_q`, where `q = l·N - 1` is prime and
//! `q ≡ 3 (mod 4)`, so that `#E(F_q) = q + 1 = l·N`. The group law is written
//! multiplicatively, matching the usage of pairing libraries.

mod element;
mod field;
mod group;
mod params;

pub use element::{GroupElement, Point};
pub use group::CurveGroup;
pub use params::{A1Generator, A1Parameters};
