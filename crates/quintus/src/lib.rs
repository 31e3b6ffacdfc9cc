//! # Quintus
//!
//! Sparse multivariate polynomial arithmetic over Z/nZ.
//!
//! Quintus packs exponent vectors into machine words, merges terms
//! through heaps, and rebuilds GCDs by evaluation and interpolation.
//!
//! ## Features
//!
//! - **Packed Monomials**: lex / deglex / degrevlex compared by one
//!   masked word comparison, with adaptive width promotion
//! - **Heap Arithmetic**: Monagan-Pearce multiplication, exact
//!   division, divrem, and division by several divisors at once
//! - **Modular GCD**: Brown's evaluation-interpolation algorithm with
//!   exact cofactors (bivariate base case)
//! - **Groebner Bases**: a naive, bounded Buchberger driver with
//!   verification predicates
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quintus::prelude::*;
//!
//! let ctx = Ctx::new(2, MonomialOrder::Lex, Integer::new(7));
//! let x = MPoly::gen(&ctx, 0);
//! let y = MPoly::gen(&ctx, 1);
//! let p = x.mul(&ctx, &y)?.add(&ctx, &MPoly::one(&ctx));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use quintus_groebner as groebner;
pub use quintus_mpoly as mpoly;
pub use quintus_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use quintus_groebner::{buchberger, is_groebner, normal_form, spoly, PolyVec};
    pub use quintus_mpoly::{Ctx, MPoly, MonomialOrder};
    pub use quintus_rings::{Error, Integer, ModPoly, ModRing};
}
