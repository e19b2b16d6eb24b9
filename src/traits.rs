//! Trait definitions

mod element;

pub use element::{ElementFamily, FiniteElement, Map};
