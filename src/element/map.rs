//! Push forward maps
use crate::symbolic::{Matrix, Polynomial};
use crate::traits::Map;
use crate::types::{Error, MapType, Rational, Result};
use num::Zero;

/// The Jacobian of an affine map
///
/// Fails with [`Error::NonAffineMap`] if any derivative is not constant.
pub fn jacobian(forward: &[Polynomial]) -> Result<Matrix<Rational>> {
    let tdim = forward.len();
    let mut entries = Vec::with_capacity(tdim);
    for f in forward {
        let mut row = Vec::with_capacity(tdim);
        for j in 0..tdim {
            row.push(f.diff(j).as_constant().ok_or(Error::NonAffineMap)?);
        }
        entries.push(row);
    }
    Matrix::from_rows(entries)
}

fn compose(function: &[Polynomial], backward: &[Polynomial]) -> Vec<Polynomial> {
    function.iter().map(|f| f.substitute(backward)).collect()
}

fn check_vector(function: &[Polynomial], jacobian: &Matrix<Rational>) -> Result<()> {
    let tdim = jacobian.square_dim()?;
    if function.len() == tdim {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            expected: tdim,
            actual: function.len(),
        })
    }
}

fn determinant(jacobian: &Matrix<Rational>) -> Result<Rational> {
    let det = jacobian.determinant()?;
    if det.is_zero() {
        Err(Error::SingularMap)
    } else {
        Ok(det)
    }
}

/// Identity map
///
/// The identity map is used to push forward scalar-valued functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMap {}

impl Map for IdentityMap {
    fn map_type(&self) -> MapType {
        MapType::Identity
    }
    fn push_forward(
        &self,
        function: &[Polynomial],
        _jacobian: &Matrix<Rational>,
        backward: &[Polynomial],
    ) -> Result<Vec<Polynomial>> {
        Ok(compose(function, backward))
    }
}

/// Covariant Piola map
///
/// Maps `f` to `J^{-T} (f o B)`. This preserves tangential components.
#[derive(Debug, Clone, Copy, Default)]
pub struct CovariantPiolaMap {}

impl Map for CovariantPiolaMap {
    fn map_type(&self) -> MapType {
        MapType::CovariantPiola
    }
    fn push_forward(
        &self,
        function: &[Polynomial],
        jacobian: &Matrix<Rational>,
        backward: &[Polynomial],
    ) -> Result<Vec<Polynomial>> {
        check_vector(function, jacobian)?;
        let inverse = jacobian.inverse().map_err(|_| Error::SingularMap)?;
        let composed = compose(function, backward);
        Ok((0..composed.len())
            .map(|i| {
                composed
                    .iter()
                    .enumerate()
                    .map(|(j, g)| g.scale(&inverse[[j, i]]))
                    .sum::<Polynomial>()
            })
            .collect())
    }
}

/// Contravariant Piola map
///
/// Maps `f` to `J (f o B) / det(J)`. This preserves normal components.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContravariantPiolaMap {}

impl Map for ContravariantPiolaMap {
    fn map_type(&self) -> MapType {
        MapType::ContravariantPiola
    }
    fn push_forward(
        &self,
        function: &[Polynomial],
        jacobian: &Matrix<Rational>,
        backward: &[Polynomial],
    ) -> Result<Vec<Polynomial>> {
        check_vector(function, jacobian)?;
        let det = determinant(jacobian)?;
        let composed = compose(function, backward);
        Ok((0..composed.len())
            .map(|i| {
                composed
                    .iter()
                    .enumerate()
                    .map(|(j, g)| g.scale(&(&jacobian[[i, j]] / &det)))
                    .sum::<Polynomial>()
            })
            .collect())
    }
}

/// L2 Piola map
///
/// Maps `f` to `(f o B) / det(J)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct L2PiolaMap {}

impl Map for L2PiolaMap {
    fn map_type(&self) -> MapType {
        MapType::L2Piola
    }
    fn push_forward(
        &self,
        function: &[Polynomial],
        jacobian: &Matrix<Rational>,
        backward: &[Polynomial],
    ) -> Result<Vec<Polynomial>> {
        let scale = determinant(jacobian)?.recip();
        Ok(compose(function, backward)
            .iter()
            .map(|g| g.scale(&scale))
            .collect())
    }
}

/// The map implementing a map type
pub fn get_map(map_type: MapType) -> Box<dyn Map> {
    match map_type {
        MapType::Identity => Box::new(IdentityMap {}),
        MapType::CovariantPiola => Box::new(CovariantPiolaMap {}),
        MapType::ContravariantPiola => Box::new(ContravariantPiolaMap {}),
        MapType::L2Piola => Box::new(L2PiolaMap {}),
    }
}

/// Push a function forward through an affine map using the rule for a map type
pub fn push_forward(
    map_type: MapType,
    function: &[Polynomial],
    forward: &[Polynomial],
    backward: &[Polynomial],
) -> Result<Vec<Polynomial>> {
    get_map(map_type).push_forward(function, &jacobian(forward)?, backward)
}
