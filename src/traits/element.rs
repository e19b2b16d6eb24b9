//! Finite element definitions

use crate::element::Functional;
use crate::symbolic::{Matrix, Polynomial};
use crate::types::{Continuity, Error, Family, MapType, Rational, ReferenceCellType, Result};

pub trait FiniteElement {
    //! A finite element defined on a reference cell

    /// The reference cell type
    fn cell_type(&self) -> ReferenceCellType;

    /// The polynomial degree
    fn degree(&self) -> usize;

    /// The highest degree n such that a Lagrange (or vector Lagrange) element's polynomial space is a subspace of this element's polynomial space
    fn embedded_superdegree(&self) -> usize;

    /// The element family
    fn family(&self) -> Family;

    /// The shape of the values returned by functions in this element
    fn value_shape(&self) -> &[usize];

    /// The number of values returned
    ///
    /// If (for example) `value_shape` is `[3, 4]` then `value_size` is $3\times4 = 12$.
    /// If `value_shape` returns an empty array, then `value_size` returns 1
    fn value_size(&self) -> usize;

    /// The continuity of the element
    fn continuity(&self) -> Continuity;

    /// The number of basis functions
    fn dim(&self) -> usize;

    /// The DOF functionals, in DOF order
    fn dofs(&self) -> &[Functional];

    /// The basis functions, in DOF order
    ///
    /// Each basis function is a list of `value_size` polynomials.
    fn basis(&self) -> &[Vec<Polynomial>];

    /// The DOFs that are associated with a subentity of the reference cell
    fn entity_dofs(&self, entity_dim: usize, entity_number: usize) -> Option<&[usize]>;

    /// Tabulate the values of the basis functions at a set of points
    ///
    /// Item `p` of the output holds the values at point `p`, indexed by `[basis function, component]`.
    fn tabulate(&self, points: &[Vec<Rational>]) -> Result<Vec<Matrix<Rational>>>;

    /// The map type shared by all of the element's DOF functionals
    fn map_type(&self) -> Result<MapType> {
        let mut dofs = self.dofs().iter();
        let first = match dofs.next() {
            Some(dof) => dof.map_type(),
            None => return Ok(MapType::Identity),
        };
        for dof in dofs {
            if dof.map_type() != first {
                return Err(Error::MixedMapping(first, dof.map_type()));
            }
        }
        Ok(first)
    }
}

pub trait ElementFamily {
    //! A family of finite elements
    /// The type of the elements in the family
    type FiniteElement: FiniteElement + 'static;
    /// Get an element of this family on a cell
    fn element(&self, cell_type: ReferenceCellType) -> Result<Self::FiniteElement>;
}

pub trait Map {
    //! A push forward map
    /// The map type
    fn map_type(&self) -> MapType;

    /// Push a function forward through an affine map
    ///
    /// `jacobian` is the Jacobian of the forward map and `backward` is its inverse.
    fn push_forward(
        &self,
        function: &[Polynomial],
        jacobian: &Matrix<Rational>,
        backward: &[Polynomial],
    ) -> Result<Vec<Polynomial>>;
}
