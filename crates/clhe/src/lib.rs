#![crate_name = "clhe"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Linearly homomorphic encryption from DDH, following Castagnos and
//! Laguillaumie, [Linearly Homomorphic Encryption from DDH](https://eprint.iacr.org/2015/047.pdf)
//! (CT-RSA 2015), instantiated over a composite-order group.

mod errors;

pub mod cl;
pub mod proto;

pub use errors::{Error, ParametersError, Result};

// Test the source code included in the README.
#[cfg(doctest)]
#[macro_use]
extern crate doc_comment;
#[cfg(doctest)]
doctest!("../README.md");
