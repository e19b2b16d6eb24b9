//! Forward and backward maps built from coordinate remaps
use crate::element::map::jacobian;
use crate::symbolic::{Matrix, Polynomial, MAX_VARIABLES};
use crate::types::{Error, Rational, Result};
use num::Zero;

/// An affine map together with its inverse
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardBackwardMap {
    /// The map, one polynomial per coordinate
    pub forward: Vec<Polynomial>,
    /// The inverse of the map
    pub backward: Vec<Polynomial>,
    /// The Jacobian of the forward map
    pub jacobian: Matrix<Rational>,
}

/// Build the forward map of a remap and its exact inverse
///
/// The remap is always given all `MAX_VARIABLES` coordinates. It must return `tdim` polynomials
/// that are affine in the first `tdim` coordinates and do not depend on the others.
pub fn build_maps(
    remap: impl Fn(&[Polynomial]) -> Vec<Polynomial>,
    tdim: usize,
) -> Result<ForwardBackwardMap> {
    if tdim > MAX_VARIABLES {
        return Err(Error::ShapeMismatch {
            expected: MAX_VARIABLES,
            actual: tdim,
        });
    }
    let all = Polynomial::variables(MAX_VARIABLES);
    let forward = remap(&all);
    if forward.len() != tdim {
        return Err(Error::ShapeMismatch {
            expected: tdim,
            actual: forward.len(),
        });
    }
    if let Some(used) = (tdim..all.len())
        .rev()
        .find(|k| forward.iter().any(|f| !f.diff(*k).is_zero()))
    {
        return Err(Error::ShapeMismatch {
            expected: tdim,
            actual: used + 1,
        });
    }
    let x = &all[..tdim];
    let j = jacobian(&forward)?;
    let inverse = j.inverse().map_err(|_| Error::SingularMap)?;

    let origin = vec![Rational::zero(); tdim];
    let shifted = forward
        .iter()
        .zip(x)
        .map(|(f, xi)| xi - Polynomial::constant(f.evaluate(&origin)))
        .collect::<Vec<_>>();
    let backward = (0..tdim)
        .map(|i| {
            shifted
                .iter()
                .enumerate()
                .map(|(k, s)| s.scale(&inverse[[i, k]]))
                .sum::<Polynomial>()
        })
        .collect();

    Ok(ForwardBackwardMap {
        forward,
        backward,
        jacobian: j,
    })
}
