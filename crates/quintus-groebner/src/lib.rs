//! # quintus-groebner
//!
//! Ideal bases and a naive Buchberger driver over the sparse
//! multivariate polynomials of `quintus-mpoly`.
//!
//! The driver processes S-polynomial pairs in index order with no
//! pair-elimination criteria, bounded by caller-supplied limits on
//! basis length and polynomial size, and keeps the basis monic. The
//! verification predicates ([`is_groebner`], [`is_autoreduced`]) serve
//! as the correctness oracle for the driver.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buchberger;
pub mod ideal;

#[cfg(test)]
mod proptests;

pub use buchberger::{
    buchberger, buchberger_with_limits, is_autoreduced, is_groebner, normal_form, reduce_monic,
    spoly,
};
pub use ideal::PolyVec;
