//! Exact symbolic algebra
pub mod matrix;
pub mod polynomial;

pub use matrix::{independent_rows, LuDecomposition, Matrix};
pub use polynomial::{independent_subset, Monomial, Polynomial, MAX_VARIABLES};
