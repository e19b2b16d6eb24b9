//! Finite elements

pub mod ciarlet;
pub mod functionals;
pub mod map;

pub use ciarlet::{
    CiarletElement, LagrangeElementFamily, NedelecFirstKindElementFamily,
    RaviartThomasElementFamily,
};
pub use functionals::{Functional, FunctionalKind};
