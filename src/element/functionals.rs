//! DOF functionals
use crate::reference_cell::Reference;
use crate::symbolic::Polynomial;
use crate::types::{Error, MapType, Rational, ReferenceCellType, Result};
use num::Zero;

/// How a functional acts on a function
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionalKind {
    /// `l(f) = sum_c weights[c] f_c(point)`
    PointEvaluation {
        /// The point
        point: Vec<Rational>,
        /// The weight of each component
        weights: Vec<Rational>,
    },
    /// `l(f) = integral over s of sum_c f_c(origin + sum_a s_a axes[a]) weights[c](s)`
    ///
    /// The integral is taken over the default reference cell of type `domain`.
    IntegralMoment {
        /// The cell type of the sub-entity
        domain: ReferenceCellType,
        /// The first vertex of the sub-entity
        origin: Vec<Rational>,
        /// The axes of the sub-entity
        axes: Vec<Vec<Rational>>,
        /// The weight of each component, as polynomials in the sub-entity's parameters
        weights: Vec<Polynomial>,
    },
}

/// A DOF functional
#[derive(Debug, Clone, PartialEq)]
pub struct Functional {
    kind: FunctionalKind,
    map_type: MapType,
}

impl Functional {
    /// Evaluation of a scalar function at a point
    pub fn point_evaluation(point: Vec<Rational>, map_type: MapType) -> Self {
        Self::weighted_point_evaluation(point, vec![Rational::from_integer(1.into())], map_type)
    }

    /// Evaluation of a weighted sum of the components of a function at a point
    pub fn weighted_point_evaluation(
        point: Vec<Rational>,
        weights: Vec<Rational>,
        map_type: MapType,
    ) -> Self {
        Self {
            kind: FunctionalKind::PointEvaluation { point, weights },
            map_type,
        }
    }

    /// An integral moment against a weight function over a sub-entity of a reference cell
    pub fn integral_moment(
        reference: &Reference,
        entity_dim: usize,
        entity_number: usize,
        weights: Vec<Polynomial>,
        map_type: MapType,
    ) -> Result<Self> {
        let domain = reference.sub_entity_type(entity_dim, entity_number)?;
        let (origin, axes) = reference.axes(entity_dim, entity_number)?;
        Ok(Self {
            kind: FunctionalKind::IntegralMoment {
                domain,
                origin,
                axes,
                weights,
            },
            map_type,
        })
    }

    /// The map type used to push functions forward for this functional
    pub fn map_type(&self) -> MapType {
        self.map_type
    }

    /// How the functional acts on a function
    pub fn kind(&self) -> &FunctionalKind {
        &self.kind
    }

    /// The number of components of the functions this functional acts on
    pub fn value_size(&self) -> usize {
        match &self.kind {
            FunctionalKind::PointEvaluation { weights, .. } => weights.len(),
            FunctionalKind::IntegralMoment { weights, .. } => weights.len(),
        }
    }

    /// Apply the functional to a function
    pub fn evaluate(&self, function: &[Polynomial]) -> Result<Rational> {
        if function.len() != self.value_size() {
            return Err(Error::ShapeMismatch {
                expected: self.value_size(),
                actual: function.len(),
            });
        }
        match &self.kind {
            FunctionalKind::PointEvaluation { point, weights } => Ok(function
                .iter()
                .zip(weights)
                .filter(|(_, w)| !w.is_zero())
                .map(|(f, w)| f.evaluate(point) * w)
                .sum()),
            FunctionalKind::IntegralMoment {
                domain,
                origin,
                axes,
                weights,
            } => {
                let s = Polynomial::variables(axes.len());
                let parametrisation = origin
                    .iter()
                    .enumerate()
                    .map(|(i, o)| {
                        axes.iter().zip(&s).fold(Polynomial::constant(o.clone()), |acc, (a, v)| {
                            acc + v.scale(&a[i])
                        })
                    })
                    .collect::<Vec<_>>();
                let integrand = function
                    .iter()
                    .zip(weights)
                    .filter(|(_, w)| !w.is_zero())
                    .map(|(f, w)| f.substitute(&parametrisation) * w)
                    .sum::<Polynomial>();
                Ok(integrand.integrate(*domain))
            }
        }
    }
}
