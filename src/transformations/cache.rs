//! Prepared DOF transformations and a cache of them
use crate::compact::CompactOperator;
use crate::symbolic::Matrix;
use crate::traits::FiniteElement;
use crate::transformations::compute_transformation_list;
use crate::types::{Continuity, Error, Family, Rational, ReferenceCellType, Result, Scalar};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// The transformation of the DOFs of one sub-entity under one symmetry
#[derive(Debug, Clone)]
pub struct DofTransformation<T: Scalar> {
    /// The name of the symmetry
    pub name: &'static str,
    /// The dimension and index of the sub-entity
    pub entity: (usize, usize),
    /// The exact transformation matrix
    pub matrix: Matrix<Rational>,
    /// The matrix prepared for in-place application
    pub operator: CompactOperator<T>,
}

/// All the DOF transformations of an element
#[derive(Debug, Clone)]
pub struct PreparedTransformations<T: Scalar> {
    transformations: Vec<DofTransformation<T>>,
}

impl<T: Scalar> PreparedTransformations<T> {
    /// Compute and prepare the transformations of an element
    ///
    /// Operators are prepared in exact arithmetic and then converted to `T`.
    pub fn from_element<E: FiniteElement + ?Sized>(element: &E) -> Result<Self> {
        let transformations = compute_transformation_list(element)?
            .into_iter()
            .map(|(symmetry, matrix)| {
                let operator = CompactOperator::prepare(&matrix)?.cast::<T>();
                Ok(DofTransformation {
                    name: symmetry.name,
                    entity: symmetry.entity,
                    matrix,
                    operator,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { transformations })
    }

    /// Get a transformation by name
    pub fn get(&self, name: &str) -> Result<&DofTransformation<T>> {
        self.transformations
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::UnknownTransformation(name.to_string()))
    }

    /// The names of the transformations
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.transformations.iter().map(|t| t.name)
    }

    /// Iterate over the transformations
    pub fn iter(&self) -> impl Iterator<Item = &DofTransformation<T>> {
        self.transformations.iter()
    }

    /// The number of transformations
    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    /// Are there no transformations?
    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }

    /// Apply a transformation to the coefficients of the DOFs of one sub-entity
    pub fn apply(&self, name: &str, data: &mut [T]) -> Result<()> {
        self.get(name)?.operator.apply(data)
    }
}

type CacheKey = (Family, ReferenceCellType, usize, Continuity);

/// A thread-safe cache of prepared transformations
///
/// Entries are keyed by family, cell type, degree and continuity.
#[derive(Debug)]
pub struct TransformationCache<T: Scalar> {
    entries: RwLock<HashMap<CacheKey, Arc<PreparedTransformations<T>>>>,
}

impl<T: Scalar> Default for TransformationCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> TransformationCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get the transformations of an element, computing them if they are not cached
    ///
    /// Elements of the family [`Family::Custom`] are not identified by their key, so their
    /// transformations are computed every time and not stored.
    pub fn get_or_compute<E: FiniteElement + ?Sized>(
        &self,
        element: &E,
    ) -> Result<Arc<PreparedTransformations<T>>> {
        if element.family() == Family::Custom {
            warn!("Transformations of custom elements are not cached");
            return Ok(Arc::new(PreparedTransformations::from_element(element)?));
        }
        let key = (
            element.family(),
            element.cell_type(),
            element.degree(),
            element.continuity(),
        );
        if let Some(prepared) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(prepared));
        }
        debug!("Transformation cache miss for {key:?}");
        let prepared = Arc::new(PreparedTransformations::from_element(element)?);
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(entries.entry(key).or_insert(prepared)))
    }

    /// The number of cached entries
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
