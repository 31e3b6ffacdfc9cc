//! # quintus-rings
//!
//! Base coefficient layer for the Quintus polynomial engine.
//!
//! This crate provides:
//! - Arbitrary precision integers (`Integer`, a thin wrapper over `dashu`)
//! - The residue ring Z/nZ with a runtime modulus (`ModRing`), which is
//!   *not* assumed to be a field
//! - Dense univariate polynomials over Z/nZ (`ModPoly`) with division,
//!   GCD and evaluation
//! - The [`CoefficientRing`] trait describing the narrow ring interface
//!   the multivariate layer consumes

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod integer;
pub mod modular;
pub mod poly;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use error::Error;
pub use integer::Integer;
pub use modular::ModRing;
pub use poly::ModPoly;
pub use traits::CoefficientRing;
