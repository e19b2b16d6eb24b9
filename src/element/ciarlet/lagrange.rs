//! Lagrange elements

use crate::element::ciarlet::{monomials, CiarletElement, EntityFunctionals};
use crate::element::Functional;
use crate::reference_cell::{self, Reference};
use crate::symbolic::Polynomial;
use crate::traits::{ElementFamily, FiniteElement};
use crate::types::{Continuity, Error, Family, MapType, Rational, ReferenceCellType, Result};
use itertools::Itertools;
use num::BigInt;

/// The parameters of the lattice points in the interior of a cell
///
/// The last axis varies slowest.
pub fn interior_lattice(cell_type: ReferenceCellType, degree: usize) -> Vec<Vec<Rational>> {
    let tdim = reference_cell::dim(cell_type);
    if tdim == 0 {
        return vec![vec![]];
    }
    // Each item lists the lattice indices from the last axis to the first
    (0..tdim)
        .map(|_| 1..degree)
        .multi_cartesian_product()
        .filter(|a| match cell_type {
            ReferenceCellType::Quadrilateral | ReferenceCellType::Hexahedron => true,
            ReferenceCellType::Prism => a[1] + a[2] < degree,
            ReferenceCellType::Pyramid => a[0] + a[1] < degree && a[0] + a[2] < degree,
            _ => a.iter().sum::<usize>() < degree,
        })
        .map(|a| {
            a.iter()
                .rev()
                .map(|i| Rational::new(BigInt::from(*i), BigInt::from(degree)))
                .collect()
        })
        .collect()
}

/// Create a Lagrange element
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement> {
    let tdim = reference_cell::dim(cell_type);
    let reference = Reference::new(cell_type);
    let entity_counts = reference_cell::entity_counts(cell_type);

    let mut functionals: EntityFunctionals = [vec![], vec![], vec![], vec![]];
    if degree == 0 {
        if continuity == Continuity::Continuous {
            return Err(Error::UnsupportedElement(String::from(
                "Cannot create continuous degree 0 Lagrange element",
            )));
        }
        for (d, count) in entity_counts.iter().enumerate().take(tdim) {
            functionals[d] = vec![vec![]; *count];
        }
        functionals[tdim].push(vec![Functional::point_evaluation(
            reference_cell::midpoint(cell_type),
            MapType::Identity,
        )]);
    } else {
        if cell_type == ReferenceCellType::Pyramid {
            return Err(Error::UnsupportedElement(format!(
                "degree {degree} Lagrange on a pyramid"
            )));
        }
        for (d, count) in entity_counts.iter().enumerate().take(tdim + 1) {
            for e in 0..*count {
                if d == 0 {
                    functionals[0].push(vec![Functional::point_evaluation(
                        reference.vertices()[e].clone(),
                        MapType::Identity,
                    )]);
                } else {
                    let sub_type = reference.sub_entity_type(d, e)?;
                    functionals[d].push(
                        interior_lattice(sub_type, degree)
                            .iter()
                            .map(|s| {
                                Ok(Functional::point_evaluation(
                                    reference.sub_entity_point(d, e, s)?,
                                    MapType::Identity,
                                ))
                            })
                            .collect::<Result<Vec<_>>>()?,
                    );
                }
            }
        }
    }

    let polynomial_set = monomials(cell_type, degree)?
        .into_iter()
        .map(|m| vec![Polynomial::monomial(m)])
        .collect();
    CiarletElement::create(
        Family::Lagrange,
        cell_type,
        degree,
        vec![],
        polynomial_set,
        functionals,
        continuity,
        degree,
    )
}

/// The basis functions of a scalar Lagrange element
///
/// Degree 0 uses the discontinuous element.
pub fn scalar_basis(cell_type: ReferenceCellType, degree: usize) -> Result<Vec<Polynomial>> {
    let continuity = if degree == 0 {
        Continuity::Discontinuous
    } else {
        Continuity::Continuous
    };
    Ok(create(cell_type, degree, continuity)?
        .basis()
        .iter()
        .map(|b| b[0].clone())
        .collect())
}

/// The basis functions of a vector Lagrange element
///
/// Each scalar basis function is multiplied by each unit vector in turn.
pub fn vector_basis(cell_type: ReferenceCellType, degree: usize) -> Result<Vec<Vec<Polynomial>>> {
    let tdim = reference_cell::dim(cell_type);
    Ok(scalar_basis(cell_type, degree)?
        .into_iter()
        .flat_map(|b| {
            (0..tdim).map(move |d| {
                let mut v = vec![Polynomial::zero(); tdim];
                v[d] = b.clone();
                v
            })
        })
        .collect())
}

/// Lagrange element family
#[derive(Debug, Clone, Copy)]
pub struct LagrangeElementFamily {
    degree: usize,
    continuity: Continuity,
}

impl LagrangeElementFamily {
    /// Create new family
    pub fn new(degree: usize, continuity: Continuity) -> Self {
        Self { degree, continuity }
    }
}

impl ElementFamily for LagrangeElementFamily {
    type FiniteElement = CiarletElement;
    fn element(&self, cell_type: ReferenceCellType) -> Result<CiarletElement> {
        create(cell_type, self.degree, self.continuity)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_triangle_lattice_order() {
        assert_eq!(
            interior_lattice(ReferenceCellType::Triangle, 4),
            vec![
                vec![r(1, 4), r(1, 4)],
                vec![r(2, 4), r(1, 4)],
                vec![r(1, 4), r(2, 4)],
            ]
        );
    }

    #[test]
    fn test_lattice_sizes() {
        assert_eq!(interior_lattice(ReferenceCellType::Interval, 4).len(), 3);
        assert_eq!(interior_lattice(ReferenceCellType::Quadrilateral, 4).len(), 9);
        assert_eq!(interior_lattice(ReferenceCellType::Tetrahedron, 4).len(), 1);
        assert_eq!(interior_lattice(ReferenceCellType::Tetrahedron, 5).len(), 4);
        assert_eq!(interior_lattice(ReferenceCellType::Hexahedron, 3).len(), 8);
        assert_eq!(interior_lattice(ReferenceCellType::Prism, 4).len(), 9);
        assert_eq!(interior_lattice(ReferenceCellType::Triangle, 1).len(), 0);
    }

    #[test]
    fn test_dof_points_degree_2_triangle() {
        let e = create(ReferenceCellType::Triangle, 2, Continuity::Continuous).unwrap();
        // Edge 0 joins vertices 1 and 2
        let midpoint = vec![r(1, 2), r(1, 2)];
        let dof = e.entity_dofs(1, 0).unwrap()[0];
        assert_eq!(
            e.dofs()[dof],
            Functional::point_evaluation(midpoint, MapType::Identity)
        );
    }

    #[test]
    fn test_family() {
        let family = LagrangeElementFamily::new(2, Continuity::Continuous);
        let e = family.element(ReferenceCellType::Quadrilateral).unwrap();
        assert_eq!(e.dim(), 9);
        assert_eq!(e.embedded_superdegree(), 2);
        assert!(family.element(ReferenceCellType::Pyramid).is_err());
    }

    #[test]
    fn test_vector_basis() {
        let basis = vector_basis(ReferenceCellType::Triangle, 1).unwrap();
        assert_eq!(basis.len(), 6);
        assert!(basis[0][1].is_zero());
        assert_eq!(basis[1][1], basis[0][0]);
        assert_eq!(scalar_basis(ReferenceCellType::Interval, 0).unwrap(), vec![Polynomial::one()]);
    }
}
