//! Nedelec elements of the first kind
//!
//! On quadrilaterals and hexahedra these are the tensor product (Qcurl) elements, whose face and
//! interior moments are taken against Raviart-Thomas (Qdiv) elements of one degree lower.

use crate::element::ciarlet::lagrange::{scalar_basis, vector_basis};
use crate::element::ciarlet::{monomials, raviart_thomas, CiarletElement, EntityFunctionals};
use crate::element::Functional;
use crate::reference_cell::{self, Reference};
use crate::symbolic::{independent_subset, Monomial, Polynomial};
use crate::traits::{ElementFamily, FiniteElement};
use crate::types::{Continuity, Error, Family, MapType, ReferenceCellType, Result};

/// A vector with one nonzero component
fn unit(tdim: usize, direction: usize, value: Polynomial) -> Vec<Polynomial> {
    let mut v = vec![Polynomial::zero(); tdim];
    v[direction] = value;
    v
}

/// Vectors of polynomials of degree at most `degree`
pub(crate) fn vector_polynomials(
    cell_type: ReferenceCellType,
    degree: usize,
) -> Result<Vec<Vec<Polynomial>>> {
    let tdim = reference_cell::dim(cell_type);
    Ok(monomials(cell_type, degree)?
        .into_iter()
        .flat_map(|m| (0..tdim).map(move |d| unit(tdim, d, Polynomial::monomial(m))))
        .collect())
}

/// Monomials of degree exactly `degree`
pub(crate) fn homogeneous_monomials(
    cell_type: ReferenceCellType,
    degree: usize,
) -> Result<Vec<Monomial>> {
    Ok(monomials(cell_type, degree)?
        .into_iter()
        .filter(|m| m.iter().sum::<usize>() == degree)
        .collect())
}

/// Vectors of monomials on a quadrilateral or hexahedron
///
/// Component `d` has degree at most `own` in `x_d` and at most `other` in every other variable.
pub(crate) fn tensor_vector_polynomials(
    cell_type: ReferenceCellType,
    own: usize,
    other: usize,
) -> Result<Vec<Vec<Polynomial>>> {
    let tdim = reference_cell::dim(cell_type);
    let all = monomials(cell_type, own.max(other))?;
    let all = &all;
    Ok((0..tdim)
        .flat_map(|d| {
            all.iter()
                .filter(move |m| (0..tdim).all(|j| m[j] <= if j == d { own } else { other }))
                .map(move |m| unit(tdim, d, Polynomial::monomial(*m)))
        })
        .collect())
}

/// The basis functions of a Raviart-Thomas element, or nothing for degree 0
fn raviart_thomas_basis(
    cell_type: ReferenceCellType,
    degree: usize,
) -> Result<Vec<Vec<Polynomial>>> {
    if degree == 0 {
        Ok(vec![])
    } else {
        Ok(raviart_thomas::create(cell_type, degree, Continuity::Continuous)?
            .basis()
            .to_vec())
    }
}

fn polynomial_set(cell_type: ReferenceCellType, degree: usize) -> Result<Vec<Vec<Polynomial>>> {
    if !reference_cell::is_simplex(cell_type) {
        return tensor_vector_polynomials(cell_type, degree - 1, degree);
    }
    let x = Polynomial::variables(3);
    let mut set = vector_polynomials(cell_type, degree - 1)?;
    for m in homogeneous_monomials(cell_type, degree - 1)? {
        let p = Polynomial::monomial(m);
        if cell_type == ReferenceCellType::Triangle {
            set.push(vec![-(&x[1] * &p), &x[0] * &p]);
        } else {
            for d in 0..3 {
                let q = unit(3, d, p.clone());
                set.push(vec![
                    &x[1] * &q[2] - &x[2] * &q[1],
                    &x[2] * &q[0] - &x[0] * &q[2],
                    &x[0] * &q[1] - &x[1] * &q[0],
                ]);
            }
        }
    }
    Ok(independent_subset(&set)
        .into_iter()
        .map(|i| set[i].clone())
        .collect())
}

/// Create a Nedelec (first kind) element
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement> {
    if !matches!(
        cell_type,
        ReferenceCellType::Triangle
            | ReferenceCellType::Tetrahedron
            | ReferenceCellType::Quadrilateral
            | ReferenceCellType::Hexahedron
    ) {
        return Err(Error::UnsupportedElement(format!(
            "Nedelec elements on a {cell_type}"
        )));
    }
    if degree < 1 {
        return Err(Error::UnsupportedElement(String::from(
            "Nedelec elements must have degree at least 1",
        )));
    }
    let tdim = reference_cell::dim(cell_type);
    let simplex = reference_cell::is_simplex(cell_type);
    let reference = Reference::new(cell_type);
    let entity_counts = reference_cell::entity_counts(cell_type);

    let mut functionals: EntityFunctionals = [vec![], vec![], vec![], vec![]];
    functionals[0] = vec![vec![]; entity_counts[0]];

    // Tangential moments on edges
    let edge_basis = scalar_basis(ReferenceCellType::Interval, degree - 1)?;
    for e in 0..entity_counts[1] {
        let (_, axes) = reference.axes(1, e)?;
        functionals[1].push(
            edge_basis
                .iter()
                .map(|q| {
                    let weights = axes[0].iter().map(|t| q.scale(t)).collect();
                    Functional::integral_moment(&reference, 1, e, weights, MapType::CovariantPiola)
                })
                .collect::<Result<Vec<_>>>()?,
        );
    }

    // Moments against vector functions tangential to faces
    if tdim == 3 {
        let face_basis = if !simplex {
            raviart_thomas_basis(ReferenceCellType::Quadrilateral, degree - 1)?
        } else if degree >= 2 {
            vector_basis(ReferenceCellType::Triangle, degree - 2)?
        } else {
            vec![]
        };
        for f in 0..entity_counts[2] {
            let (_, axes) = reference.axes(2, f)?;
            functionals[2].push(
                face_basis
                    .iter()
                    .map(|q| {
                        let weights = (0..3)
                            .map(|c| q[0].scale(&axes[0][c]) + q[1].scale(&axes[1][c]))
                            .collect();
                        Functional::integral_moment(
                            &reference,
                            2,
                            f,
                            weights,
                            MapType::CovariantPiola,
                        )
                    })
                    .collect::<Result<Vec<_>>>()?,
            );
        }
    }

    // Interior moments
    let interior_basis = if !simplex {
        raviart_thomas_basis(cell_type, degree - 1)?
    } else if degree >= tdim {
        vector_basis(cell_type, degree - tdim)?
    } else {
        vec![]
    };
    functionals[tdim].push(
        interior_basis
            .into_iter()
            .map(|q| Functional::integral_moment(&reference, tdim, 0, q, MapType::CovariantPiola))
            .collect::<Result<Vec<_>>>()?,
    );

    CiarletElement::create(
        Family::NedelecFirstKind,
        cell_type,
        degree,
        vec![tdim],
        polynomial_set(cell_type, degree)?,
        functionals,
        continuity,
        degree,
    )
}

/// Nedelec (first kind) element family
#[derive(Debug, Clone, Copy)]
pub struct NedelecFirstKindElementFamily {
    degree: usize,
    continuity: Continuity,
}

impl NedelecFirstKindElementFamily {
    /// Create new family
    pub fn new(degree: usize, continuity: Continuity) -> Self {
        Self { degree, continuity }
    }
}

impl ElementFamily for NedelecFirstKindElementFamily {
    type FiniteElement = CiarletElement;
    fn element(&self, cell_type: ReferenceCellType) -> Result<CiarletElement> {
        create(cell_type, self.degree, self.continuity)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_dimensions() {
        for degree in 1..4 {
            let e = create(ReferenceCellType::Triangle, degree, Continuity::Continuous).unwrap();
            assert_eq!(e.dim(), degree * (degree + 2));
            for edge in 0..3 {
                assert_eq!(e.entity_dofs(1, edge).unwrap().len(), degree);
            }
            assert_eq!(e.entity_dofs(2, 0).unwrap().len(), degree * (degree - 1));
        }
        let e = create(ReferenceCellType::Tetrahedron, 3, Continuity::Continuous).unwrap();
        assert_eq!(e.dim(), 45);
        assert_eq!(e.entity_dofs(1, 0).unwrap().len(), 3);
        assert_eq!(e.entity_dofs(2, 0).unwrap().len(), 6);
        assert_eq!(e.entity_dofs(3, 0).unwrap().len(), 3);
    }

    #[test]
    fn test_unsupported() {
        assert!(create(ReferenceCellType::Prism, 1, Continuity::Continuous).is_err());
        assert!(create(ReferenceCellType::Triangle, 0, Continuity::Continuous).is_err());
        assert!(create(ReferenceCellType::Quadrilateral, 0, Continuity::Continuous).is_err());
        assert!(NedelecFirstKindElementFamily::new(1, Continuity::Continuous)
            .element(ReferenceCellType::Pyramid)
            .is_err());
    }

    #[test]
    fn test_tensor_product_dimensions() {
        for degree in 1..4 {
            let e = create(ReferenceCellType::Quadrilateral, degree, Continuity::Continuous)
                .unwrap();
            assert_eq!(e.dim(), 2 * degree * (degree + 1));
            assert_eq!(e.entity_dofs(1, 3).unwrap().len(), degree);
            assert_eq!(e.entity_dofs(2, 0).unwrap().len(), 2 * degree * (degree - 1));
        }
        let e = create(ReferenceCellType::Hexahedron, 2, Continuity::Continuous).unwrap();
        assert_eq!(e.dim(), 54);
        assert_eq!(e.entity_dofs(1, 11).unwrap().len(), 2);
        assert_eq!(e.entity_dofs(2, 5).unwrap().len(), 4);
        assert_eq!(e.entity_dofs(3, 0).unwrap().len(), 6);
    }

    #[test]
    fn test_tensor_product_polynomials() {
        // Qcurl of degree 1 on a quadrilateral: (1, 0), (x1, 0), (0, 1), (0, x0)
        let set = tensor_vector_polynomials(ReferenceCellType::Quadrilateral, 0, 1).unwrap();
        let x = Polynomial::variables(2);
        assert_eq!(set.len(), 4);
        assert!(set.contains(&vec![x[1].clone(), Polynomial::zero()]));
        assert!(set.contains(&vec![Polynomial::zero(), x[0].clone()]));
        assert!(!set.contains(&vec![x[0].clone(), Polynomial::zero()]));
    }
}
