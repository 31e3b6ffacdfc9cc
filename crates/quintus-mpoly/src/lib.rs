//! # quintus-mpoly
//!
//! Sparse multivariate polynomial arithmetic over Z/nZ.
//!
//! This crate provides:
//! - Bit-packed exponent vectors with configurable monomial orderings
//!   (lex, deglex, degrevlex) compared by a single masked word compare
//! - A canonical sparse polynomial container (`MPoly`) over a shared
//!   ring context (`Ctx`)
//! - Heap-merge (Monagan-Pearce) multiplication, exact division,
//!   division with remainder, and division by several divisors at once
//! - Modular GCD by evaluation and interpolation (Brown's algorithm,
//!   bivariate base case)
//!
//! Exponent packing widths grow on demand: an operation that overflows
//! the current width is restarted from scratch at the next width, never
//! patched up partially.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ctx;
pub mod div;
pub mod divrem_ideal;
pub mod gcd;
mod heap;
pub mod mul;
pub mod pack;
pub mod poly;
pub(crate) mod univar;

#[cfg(test)]
mod proptests;

pub use ctx::{Ctx, MonomialOrder};
pub use poly::MPoly;
pub use quintus_rings::{Error, Integer, ModRing};
