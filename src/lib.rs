//! Exact DOF transformations for finite elements
//!
//! This crate computes how the degrees of freedom of a finite element change when a sub-entity
//! of its reference cell is reflected or rotated, and applies the resulting matrices to
//! coefficient data in place.
//!
//! ```
//! use ndtransform::element::ciarlet::lagrange;
//! use ndtransform::transformations::PreparedTransformations;
//! use ndtransform::types::{Continuity, ReferenceCellType};
//!
//! let element = lagrange::create(ReferenceCellType::Triangle, 3, Continuity::Continuous).unwrap();
//! let transformations = PreparedTransformations::<f64>::from_element(&element).unwrap();
//! let mut data = vec![1.0, 2.0];
//! transformations.apply("interval reflection", &mut data).unwrap();
//! assert_eq!(data, vec![2.0, 1.0]);
//! ```
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod compact;
pub mod element;
pub mod reference_cell;
pub mod symbolic;
pub mod traits;
pub mod transformations;
pub mod types;

pub use compact::CompactOperator;
pub use transformations::{compute_transformations, TransformationCache};
