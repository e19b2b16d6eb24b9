//! General type definitions
pub mod cell;

pub use cell::ReferenceCellType;

use num::ToPrimitive;
use std::fmt::Debug;

/// Exact rational numbers
pub type Rational = num::BigRational;

/// A scalar that transformation operators can be built from and applied to
pub trait Scalar: Clone + Debug + PartialOrd + num::Signed + Send + Sync + 'static {
    /// Convert an exact rational to this type
    fn from_rational(value: &Rational) -> Self;
}

impl Scalar for Rational {
    fn from_rational(value: &Rational) -> Self {
        value.clone()
    }
}

impl Scalar for f64 {
    fn from_rational(value: &Rational) -> Self {
        value.to_f64().unwrap_or(f64::NAN)
    }
}

impl Scalar for f32 {
    fn from_rational(value: &Rational) -> Self {
        value.to_f32().unwrap_or(f32::NAN)
    }
}

/// The map type used by a DOF functional
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MapType {
    /// Identity map
    Identity = 0,
    /// Covariant Piola map (tangential continuity)
    CovariantPiola = 1,
    /// Contravariant Piola map (normal continuity)
    ContravariantPiola = 2,
    /// L2 Piola map
    L2Piola = 3,
}

/// Continuity type
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Continuity {
    /// The element has standard continuity between cells
    ///
    /// For some element, this option does not indicate that the values are fully continuous.
    /// For example, for Raviart-Thomas elements it only indicates that the normal components
    /// are continuous across edges
    Continuous = 0,
    /// The element is discontinuous betweeen cells
    Discontinuous = 1,
}

/// The family of an element
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Family {
    /// Lagrange
    Lagrange = 0,
    /// Nedelec (first kind)
    NedelecFirstKind = 1,
    /// Raviart-Thomas
    RaviartThomas = 2,
    /// An element created directly from a polynomial set and functionals
    Custom = 255,
}

/// Errors raised while building elements or transformations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The reference is not in its default coordinates
    #[error("Computing transformations is not supported for non-default references")]
    UnsupportedReference,
    /// The cell is not recognised or has no symmetry table
    #[error("Unsupported cell: {0}")]
    UnsupportedCell(String),
    /// The element family does not support this cell or degree
    #[error("Unsupported element: {0}")]
    UnsupportedElement(String),
    /// The DOF functionals of an element use more than one map type
    #[error("DOF transformations are not implemented for elements with mixed mapping types ({0:?} and {1:?})")]
    MixedMapping(MapType, MapType),
    /// The Jacobian of a map is singular
    #[error("Map is not invertible")]
    SingularMap,
    /// The Jacobian of a map is not constant
    #[error("Map is not affine")]
    NonAffineMap,
    /// No nonzero pivot was found during elimination
    #[error("Matrix is singular")]
    SingularMatrix,
    /// No transformation with this name exists for the cell
    #[error("Unknown transformation: {0}")]
    UnknownTransformation(String),
    /// A list of indices is not a permutation
    #[error("Not a permutation: {0:?}")]
    InvalidPermutation(Vec<usize>),
    /// A size did not match the size required
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// The required size
        expected: usize,
        /// The size that was passed in
        actual: usize,
    },
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
