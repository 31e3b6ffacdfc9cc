//! Error type shared across the Quintus workspace.

use thiserror::Error;

use crate::integer::Integer;

/// Errors surfaced by ring and polynomial operations.
///
/// Expected local failures (a division that does not come out even, an
/// unlucky evaluation point) are *not* errors; they are ordinary return
/// values or internal retries. Only failures with no defined recovery
/// reach the caller through this type.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum Error {
    /// Division by the zero polynomial or the zero residue.
    #[error("division by zero")]
    DivideByZero,

    /// An element used as a division pivot has no inverse modulo n.
    ///
    /// Only possible when the modulus is composite; there is no
    /// well-defined recovery inside the algorithm that hit it.
    #[error("{value} is not invertible modulo {modulus}")]
    NonInvertible {
        /// The residue with no inverse.
        value: Integer,
        /// The ring modulus.
        modulus: Integer,
    },

    /// A configured size limit was exceeded (e.g. the Buchberger basis
    /// length bound). Recoverable by the caller; not a fault.
    #[error("size limit of {limit} exceeded")]
    CapacityExceeded {
        /// The limit that was hit.
        limit: usize,
    },

    /// The GCD engine exhausted its supply of evaluation points without
    /// reaching a consistent interpolant.
    #[error("gcd evaluation points exhausted")]
    EvaluationPointsExhausted,

    /// The operation is outside the supported parameter range.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}
