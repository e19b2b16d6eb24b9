//! DOF transformations
//!
//! When a sub-entity of a cell is shared by two cells, the two cells may disagree on the
//! orientation of the sub-entity. A DOF transformation describes how the DOFs associated with
//! the sub-entity change when the sub-entity is reflected or rotated.
pub mod cache;
pub mod catalog;
pub mod maps;

pub use cache::{DofTransformation, PreparedTransformations, TransformationCache};
pub use catalog::{
    cell_symmetries, sub_entity_symmetries, sub_entity_symmetries_by_name, Remap,
    SubEntitySymmetry,
};
pub use maps::{build_maps, ForwardBackwardMap};

use crate::element::map::get_map;
use crate::reference_cell::Reference;
use crate::symbolic::Matrix;
use crate::traits::{FiniteElement, Map};
use crate::types::{Error, Rational, Result};
use log::debug;
use std::collections::HashMap;

/// The matrix of one symmetry
///
/// Entry `[i, j]` is the result of applying DOF functional `j` of the sub-entity to the push
/// forward of basis function `i` of the sub-entity.
fn transformation_matrix<E: FiniteElement + ?Sized>(
    element: &E,
    map: &dyn Map,
    symmetry: &SubEntitySymmetry,
    tdim: usize,
) -> Result<Matrix<Rational>> {
    let (entity_dim, entity_number) = symmetry.entity;
    let maps = build_maps(symmetry.remap, tdim)?;
    let dofs = element
        .entity_dofs(entity_dim, entity_number)
        .ok_or_else(|| {
            Error::UnsupportedElement(format!(
                "element has no DOFs on sub-entity ({entity_dim}, {entity_number})"
            ))
        })?;
    let functionals = element.dofs();
    let basis = element.basis();
    let rows = dofs
        .iter()
        .map(|j| {
            let pushed = map.push_forward(&basis[*j], &maps.jacobian, &maps.backward)?;
            dofs.iter()
                .map(|i| functionals[*i].evaluate(&pushed))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    Matrix::from_rows(rows)
}

/// Compute the DOF transformations of an element, in the order the symmetries are listed for the cell
pub fn compute_transformation_list<E: FiniteElement + ?Sized>(
    element: &E,
) -> Result<Vec<(SubEntitySymmetry, Matrix<Rational>)>> {
    let map_type = element.map_type()?;
    let reference = Reference::new(element.cell_type());
    let symmetries = sub_entity_symmetries(&reference)?;
    debug!(
        "Computing {} DOF transformations for a degree {} {:?} element on a {}",
        symmetries.len(),
        element.degree(),
        element.family(),
        reference.name()
    );
    let map = get_map(map_type);
    symmetries
        .iter()
        .map(|symmetry| {
            let matrix = transformation_matrix(element, map.as_ref(), symmetry, reference.dim())?;
            debug!(
                "{} of sub-entity {:?}: {}x{}",
                symmetry.name,
                symmetry.entity,
                matrix.shape()[0],
                matrix.shape()[1]
            );
            Ok((*symmetry, matrix))
        })
        .collect()
}

/// Compute the DOF transformations of an element
///
/// The result maps the name of each symmetry to its matrix. Fails with
/// [`Error::MixedMapping`] if the element's DOFs do not all use the same map type.
pub fn compute_transformations<E: FiniteElement + ?Sized>(
    element: &E,
) -> Result<HashMap<&'static str, Matrix<Rational>>> {
    Ok(compute_transformation_list(element)?
        .into_iter()
        .map(|(symmetry, matrix)| (symmetry.name, matrix))
        .collect())
}
