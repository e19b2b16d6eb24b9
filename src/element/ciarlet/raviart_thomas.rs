//! Raviart-Thomas elements
//!
//! On quadrilaterals and hexahedra these are the tensor product (Qdiv) elements.

use crate::element::ciarlet::lagrange::{scalar_basis, vector_basis};
use crate::element::ciarlet::nedelec::{
    self, homogeneous_monomials, tensor_vector_polynomials, vector_polynomials,
};
use crate::element::ciarlet::{CiarletElement, EntityFunctionals};
use crate::element::Functional;
use crate::reference_cell::{self, Reference};
use crate::symbolic::Polynomial;
use crate::traits::{ElementFamily, FiniteElement};
use crate::types::{Continuity, Error, Family, MapType, Rational, ReferenceCellType, Result};

/// The (unnormalised) normal to a facet, computed from its axes
fn facet_normal(axes: &[Vec<Rational>]) -> Vec<Rational> {
    if axes.len() == 1 {
        let t = &axes[0];
        vec![-t[1].clone(), t[0].clone()]
    } else {
        let (a, b) = (&axes[0], &axes[1]);
        vec![
            &a[1] * &b[2] - &a[2] * &b[1],
            &a[2] * &b[0] - &a[0] * &b[2],
            &a[0] * &b[1] - &a[1] * &b[0],
        ]
    }
}

/// Create a Raviart-Thomas element
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
            "Raviart-Thomas elements on a {cell_type}"
        )));
    }
    if degree < 1 {
        return Err(Error::UnsupportedElement(String::from(
            "Raviart-Thomas elements must have degree at least 1",
        )));
    }
    let tdim = reference_cell::dim(cell_type);
    let simplex = reference_cell::is_simplex(cell_type);
    let reference = Reference::new(cell_type);
    let entity_counts = reference_cell::entity_counts(cell_type);
    let facet_type = match (tdim, simplex) {
        (2, _) => ReferenceCellType::Interval,
        (_, true) => ReferenceCellType::Triangle,
        (_, false) => ReferenceCellType::Quadrilateral,
    };

    let polynomial_set = if simplex {
        let x = Polynomial::variables(tdim);
        let mut set = vector_polynomials(cell_type, degree - 1)?;
        for m in homogeneous_monomials(cell_type, degree - 1)? {
            let p = Polynomial::monomial(m);
            set.push(x.iter().map(|xi| xi * &p).collect());
        }
        set
    } else {
        tensor_vector_polynomials(cell_type, degree, degree - 1)?
    };

    let mut functionals: EntityFunctionals = [vec![], vec![], vec![], vec![]];
    for (d, count) in entity_counts.iter().enumerate().take(tdim - 1) {
        functionals[d] = vec![vec![]; *count];
    }

    // Normal moments on facets
    let facet_basis = scalar_basis(facet_type, degree - 1)?;
    for f in 0..entity_counts[tdim - 1] {
        let (_, axes) = reference.axes(tdim - 1, f)?;
        let normal = facet_normal(&axes);
        functionals[tdim - 1].push(
            facet_basis
                .iter()
                .map(|q| {
                    let weights = normal.iter().map(|n| q.scale(n)).collect();
                    Functional::integral_moment(
                        &reference,
                        tdim - 1,
                        f,
                        weights,
                        MapType::ContravariantPiola,
                    )
                })
                .collect::<Result<Vec<_>>>()?,
        );
    }

    // Interior moments
    let interior_basis = if degree < 2 {
        vec![]
    } else if !simplex {
        nedelec::create(cell_type, degree - 1, Continuity::Continuous)?
            .basis()
            .to_vec()
    } else {
        vector_basis(cell_type, degree - 2)?
    };
    functionals[tdim].push(
        interior_basis
            .into_iter()
            .map(|q| {
                Functional::integral_moment(&reference, tdim, 0, q, MapType::ContravariantPiola)
            })
            .collect::<Result<Vec<_>>>()?,
    );

    CiarletElement::create(
        Family::RaviartThomas,
        cell_type,
        degree,
        vec![tdim],
        polynomial_set,
        functionals,
        continuity,
        degree,
    )
}

/// Raviart-Thomas element family
#[derive(Debug, Clone, Copy)]
pub struct RaviartThomasElementFamily {
    degree: usize,
    continuity: Continuity,
}

impl RaviartThomasElementFamily {
    /// Create new family
    pub fn new(degree: usize, continuity: Continuity) -> Self {
        Self { degree, continuity }
    }
}

impl ElementFamily for RaviartThomasElementFamily {
    type FiniteElement = CiarletElement;
    fn element(&self, cell_type: ReferenceCellType) -> Result<CiarletElement> {
        create(cell_type, self.degree, self.continuity)
    }
}
