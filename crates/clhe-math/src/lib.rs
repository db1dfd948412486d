#![crate_name = "clhe_math"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Mathematical utilities for the clhe.rs library.
//!
//! This crate provides a group of composite order `N = p1·p2 ⋯` built from a
//! supersingular curve `y² = x³ + x` over a prime field `F_q` with
//! `q = l·N - 1` (the "Type A1" construction), together with the exponent
//! domain `Z_N`.

mod errors;
pub mod curve;
pub mod zn;

pub use errors::{Error, Result};
