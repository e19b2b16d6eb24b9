//! In-place application of invertible matrices
//!
//! A [`CompactOperator`] stores the LU factors of the transpose of a matrix, folded into a single
//! square array, together with a permutation that can be applied by a single pass of swaps. The
//! operator can then be applied to a vector in place without allocating.
use crate::symbolic::Matrix;
use crate::types::{Error, Rational, Result, Scalar};
use log::trace;
use rayon::prelude::*;

/// Convert a permutation into the format used by [`apply_permutation`]
///
/// After preparation, swapping `data[i]` and `data[perm[i]]` for each `i` in order applies
/// the original permutation.
pub fn prepare_permutation(permutation: &[usize]) -> Result<Vec<usize>> {
    let n = permutation.len();
    let mut seen = vec![false; n];
    for p in permutation {
        if *p >= n || seen[*p] {
            return Err(Error::InvalidPermutation(permutation.to_vec()));
        }
        seen[*p] = true;
    }
    let mut perm = permutation.to_vec();
    for i in 0..n {
        while perm[i] < i {
            perm[i] = perm[perm[i]];
        }
    }
    Ok(perm)
}

/// Apply a prepared permutation to some data
pub fn apply_permutation<T>(permutation: &[usize], data: &mut [T]) -> Result<()> {
    if data.len() != permutation.len() {
        return Err(Error::ShapeMismatch {
            expected: permutation.len(),
            actual: data.len(),
        });
    }
    for (i, j) in permutation.iter().enumerate() {
        data.swap(i, *j);
    }
    Ok(())
}

/// An invertible matrix prepared for in-place application
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompactOperator<T> {
    packed: Matrix<T>,
    permutation: Vec<usize>,
}

impl<T: Scalar> CompactOperator<T> {
    /// Prepare a matrix
    ///
    /// The matrix is not modified. Fails with [`Error::SingularMatrix`] if the matrix is not
    /// invertible.
    pub fn prepare(matrix: &Matrix<T>) -> Result<Self> {
        let dim = matrix.square_dim()?;
        trace!("Preparing a {dim}x{dim} compact operator");
        let lu = matrix.transpose().lu()?;
        let packed = Matrix::from_fn([dim, dim], |[i, j]| {
            if j > i {
                lu.lower[[j, i]].clone()
            } else {
                lu.upper[[j, i]].clone()
            }
        });
        let mut permutation = (0..dim).collect::<Vec<_>>();
        for (a, b) in &lu.swaps {
            permutation.swap(*a, *b);
        }
        let permutation = prepare_permutation(&permutation)?;
        Ok(Self {
            packed,
            permutation,
        })
    }

    /// The dimension of the matrix
    pub fn dim(&self) -> usize {
        self.permutation.len()
    }

    /// The folded LU factors
    pub fn packed_matrix(&self) -> &Matrix<T> {
        &self.packed
    }

    /// The prepared permutation
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Multiply `data` by the matrix in place
    pub fn apply(&self, data: &mut [T]) -> Result<()> {
        apply_permutation(&self.permutation, data)?;
        self.apply_factors(data);
        Ok(())
    }

    fn apply_factors(&self, data: &mut [T]) {
        let n = self.dim();
        for i in 0..n {
            for j in i + 1..n {
                let update = self.packed[[i, j]].clone() * data[j].clone();
                data[i] = data[i].clone() + update;
            }
        }
        for i in (0..n).rev() {
            data[i] = data[i].clone() * self.packed[[i, i]].clone();
            for j in 0..i {
                let update = self.packed[[i, j]].clone() * data[j].clone();
                data[i] = data[i].clone() + update;
            }
        }
    }

    /// Multiply each block of `dim()` consecutive entries of `data` by the matrix in place
    ///
    /// Blocks are processed in parallel. If the length of `data` is not a multiple of `dim()`, the
    /// error reports the block size as `expected`.
    pub fn apply_batch(&self, data: &mut [T]) -> Result<()> {
        let n = self.dim();
        if n == 0 {
            return if data.is_empty() {
                Ok(())
            } else {
                Err(Error::ShapeMismatch {
                    expected: 0,
                    actual: data.len(),
                })
            };
        }
        if data.len() % n != 0 {
            return Err(Error::ShapeMismatch {
                expected: n,
                actual: data.len(),
            });
        }
        trace!("Applying a {n}x{n} compact operator to {} blocks", data.len() / n);
        data.par_chunks_mut(n).for_each(|block| {
            for (i, j) in self.permutation.iter().enumerate() {
                block.swap(i, *j);
            }
            self.apply_factors(block);
        });
        Ok(())
    }
}

impl CompactOperator<Rational> {
    /// Convert an exact operator to another scalar type
    pub fn cast<S: Scalar>(&self) -> CompactOperator<S> {
        CompactOperator {
            packed: self.packed.map(S::from_rational),
            permutation: self.permutation.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use num::BigInt;

    fn exact(rows: &[&[i64]]) -> Matrix<Rational> {
        Matrix::from_rows(
            rows.iter()
                .map(|r| {
                    r.iter()
                        .map(|v| Rational::from_integer(BigInt::from(*v)))
                        .collect()
                })
                .collect(),
        )
        .unwrap()
    }

    fn exact_vec(values: &[i64]) -> Vec<Rational> {
        values
            .iter()
            .map(|v| Rational::from_integer(BigInt::from(*v)))
            .collect()
    }

    #[test]
    fn test_prepare_permutation() {
        assert_eq!(prepare_permutation(&[2, 0, 1]).unwrap(), vec![2, 2, 2]);
        assert_eq!(prepare_permutation(&[1, 2, 0]).unwrap(), vec![1, 2, 2]);
        let mut data = vec![0, 1, 2];
        apply_permutation(&prepare_permutation(&[2, 0, 1]).unwrap(), &mut data).unwrap();
        assert_eq!(data, vec![2, 0, 1]);
    }

    #[test]
    fn test_invalid_permutation() {
        assert!(prepare_permutation(&[0, 0]).is_err());
        assert!(prepare_permutation(&[0, 2]).is_err());
        assert_eq!(
            apply_permutation(&[0, 1], &mut [1.0]),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_apply() {
        let m = exact(&[&[0, 1, 0], &[-1, 0, 0], &[0, 0, 1]]);
        let op = CompactOperator::prepare(&m).unwrap();
        let mut data = exact_vec(&[1, 2, 3]);
        op.apply(&mut data).unwrap();
        assert_eq!(data, exact_vec(&[2, -1, 3]));
    }

    #[test]
    fn test_prepare_does_not_modify() {
        let m = exact(&[&[2, 1], &[4, 3]]);
        let copy = m.clone();
        let op = CompactOperator::prepare(&m).unwrap();
        assert_eq!(m, copy);
        assert_eq!(op.dim(), 2);
        assert_eq!(op.permutation().len(), 2);
        assert_eq!(op.packed_matrix().shape(), [2, 2]);
    }

    #[test]
    fn test_singular() {
        let m = exact(&[&[1, 2], &[2, 4]]);
        assert_eq!(CompactOperator::prepare(&m), Err(Error::SingularMatrix));
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(CompactOperator::prepare(&m).is_err());
    }

    #[test]
    fn test_wrong_length() {
        let op = CompactOperator::prepare(&exact(&[&[1, 1], &[0, 1]])).unwrap();
        let mut data = exact_vec(&[1, 2, 3]);
        assert_eq!(
            op.apply(&mut data),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            op.apply_batch(&mut data),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_batch_error_reports_block_size() {
        let op = CompactOperator::prepare(&exact(&[&[0, 1, 0], &[1, 0, 0], &[0, 0, 1]])).unwrap();
        let mut data = exact_vec(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            op.apply_batch(&mut data),
            Err(Error::ShapeMismatch {
                expected: 3,
                actual: 7
            })
        );
        assert_eq!(data, exact_vec(&[1, 2, 3, 4, 5, 6, 7]));
    }

    #[test]
    fn test_apply_batch() {
        let m = exact(&[&[1, 2], &[3, 4]]);
        let op = CompactOperator::prepare(&m).unwrap();
        let mut data = exact_vec(&[1, 0, 0, 1, 1, 1]);
        op.apply_batch(&mut data).unwrap();
        assert_eq!(data, exact_vec(&[1, 3, 2, 4, 3, 7]));
    }
}
