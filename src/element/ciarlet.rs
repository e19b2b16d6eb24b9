//! Finite element definitions

use crate::element::Functional;
use crate::reference_cell;
use crate::symbolic::{Matrix, Monomial, Polynomial};
use crate::traits::FiniteElement;
use crate::types::{Continuity, Error, Family, Rational, ReferenceCellType, Result};
use itertools::Itertools;
use log::debug;
use num::Zero;

pub mod lagrange;
pub mod nedelec;
pub mod raviart_thomas;
pub use lagrange::LagrangeElementFamily;
pub use nedelec::NedelecFirstKindElementFamily;
pub use raviart_thomas::RaviartThomasElementFamily;

/// The functionals associated with each sub-entity, indexed by `[dim][entity]`
pub type EntityFunctionals = [Vec<Vec<Functional>>; 4];

/// The exponents of the monomials that span the degree `degree` Lagrange space on a cell
pub fn monomials(cell_type: ReferenceCellType, degree: usize) -> Result<Vec<Monomial>> {
    let tdim = reference_cell::dim(cell_type);
    if tdim == 0 {
        return Ok(vec![[0; 3]]);
    }
    if cell_type == ReferenceCellType::Pyramid && degree > 0 {
        return Err(Error::UnsupportedElement(format!(
            "degree {degree} polynomials on a pyramid"
        )));
    }
    Ok((0..tdim)
        .map(|_| 0..degree + 1)
        .multi_cartesian_product()
        .filter(|a| match cell_type {
            ReferenceCellType::Quadrilateral | ReferenceCellType::Hexahedron => true,
            ReferenceCellType::Prism => a[0] + a[1] <= degree,
            _ => a.iter().sum::<usize>() <= degree,
        })
        .sorted_by_key(|a| a.iter().sum::<usize>())
        .map(|a| {
            let mut m = [0; 3];
            m[..tdim].copy_from_slice(&a);
            m
        })
        .collect())
}

/// A Ciarlet element
#[derive(Debug, Clone)]
pub struct CiarletElement {
    family: Family,
    cell_type: ReferenceCellType,
    degree: usize,
    embedded_superdegree: usize,
    value_shape: Vec<usize>,
    value_size: usize,
    continuity: Continuity,
    dofs: Vec<Functional>,
    basis: Vec<Vec<Polynomial>>,
    entity_dofs: [Vec<Vec<usize>>; 4],
}

impl CiarletElement {
    /// Create a Ciarlet element
    ///
    /// `polynomial_set` spans the element's polynomial space; each member has `value_size`
    /// components. The basis is the set of functions in this space that are dual to the
    /// functionals.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        family: Family,
        cell_type: ReferenceCellType,
        degree: usize,
        value_shape: Vec<usize>,
        polynomial_set: Vec<Vec<Polynomial>>,
        functionals: EntityFunctionals,
        continuity: Continuity,
        embedded_superdegree: usize,
    ) -> Result<Self> {
        let tdim = reference_cell::dim(cell_type);
        let entity_counts = reference_cell::entity_counts(cell_type);
        let value_size = value_shape.iter().product::<usize>();

        for (d, entity_functionals) in functionals.iter().enumerate() {
            let expected = if d <= tdim { entity_counts[d] } else { 0 };
            if entity_functionals.len() != expected {
                return Err(Error::ShapeMismatch {
                    expected,
                    actual: entity_functionals.len(),
                });
            }
        }
        for p in &polynomial_set {
            if p.len() != value_size {
                return Err(Error::ShapeMismatch {
                    expected: value_size,
                    actual: p.len(),
                });
            }
        }

        let mut entity_dofs = [vec![], vec![], vec![], vec![]];
        let mut dofs = vec![];
        for (d, entity_functionals) in functionals.into_iter().enumerate() {
            for fs in entity_functionals {
                entity_dofs[d].push((dofs.len()..dofs.len() + fs.len()).collect::<Vec<_>>());
                dofs.extend(fs);
            }
        }
        let dim = dofs.len();
        if dim != polynomial_set.len() {
            return Err(Error::ShapeMismatch {
                expected: polynomial_set.len(),
                actual: dim,
            });
        }

        if continuity == Continuity::Discontinuous {
            for (d, e_dofs) in entity_dofs.iter_mut().enumerate().take(tdim) {
                *e_dofs = vec![vec![]; entity_counts[d]];
            }
            entity_dofs[tdim] = vec![(0..dim).collect()];
        }

        // Compute the dual matrix
        let mut dual_rows = Vec::with_capacity(dim);
        for l in &dofs {
            dual_rows.push(
                polynomial_set
                    .iter()
                    .map(|p| l.evaluate(p))
                    .collect::<Result<Vec<_>>>()?,
            );
        }
        let coefficients = Matrix::from_rows(dual_rows)?.transpose().inverse()?;

        let basis: Vec<Vec<Polynomial>> = (0..dim)
            .map(|j| {
                (0..value_size)
                    .map(|c| {
                        polynomial_set
                            .iter()
                            .enumerate()
                            .filter(|(k, _)| !coefficients[[j, *k]].is_zero())
                            .map(|(k, p)| p[c].scale(&coefficients[[j, k]]))
                            .sum::<Polynomial>()
                    })
                    .collect()
            })
            .collect();

        debug!(
            "Created {family:?} element on {cell_type} of degree {degree} with {dim} DOFs"
        );

        Ok(Self {
            family,
            cell_type,
            degree,
            embedded_superdegree,
            value_shape,
            value_size,
            continuity,
            dofs,
            basis,
            entity_dofs,
        })
    }
}

impl FiniteElement for CiarletElement {
    fn cell_type(&self) -> ReferenceCellType {
        self.cell_type
    }
    fn degree(&self) -> usize {
        self.degree
    }
    fn embedded_superdegree(&self) -> usize {
        self.embedded_superdegree
    }
    fn family(&self) -> Family {
        self.family
    }
    fn value_shape(&self) -> &[usize] {
        &self.value_shape
    }
    fn value_size(&self) -> usize {
        self.value_size
    }
    fn continuity(&self) -> Continuity {
        self.continuity
    }
    fn dim(&self) -> usize {
        self.dofs.len()
    }
    fn dofs(&self) -> &[Functional] {
        &self.dofs
    }
    fn basis(&self) -> &[Vec<Polynomial>] {
        &self.basis
    }
    fn entity_dofs(&self, entity_dim: usize, entity_number: usize) -> Option<&[usize]> {
        if entity_dim < 4 && entity_number < self.entity_dofs[entity_dim].len() {
            Some(&self.entity_dofs[entity_dim][entity_number])
        } else {
            None
        }
    }
    fn tabulate(&self, points: &[Vec<Rational>]) -> Result<Vec<Matrix<Rational>>> {
        let tdim = reference_cell::dim(self.cell_type);
        points
            .iter()
            .map(|p| {
                if p.len() != tdim {
                    return Err(Error::ShapeMismatch {
                        expected: tdim,
                        actual: p.len(),
                    });
                }
                Ok(Matrix::from_fn([self.dim(), self.value_size], |[b, c]| {
                    self.basis[b][c].evaluate(p)
                }))
            })
            .collect()
    }
}
