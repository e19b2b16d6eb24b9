//! Dense matrices
use crate::types::{Error, Result, Scalar};
use std::ops::{Index, IndexMut};

/// A dense row-major matrix
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix<T> {
    data: Vec<T>,
    shape: [usize; 2],
}

/// The factors of an LU decomposition with partial pivoting
///
/// If the row swaps are applied in order to the rows of the original matrix, the result is
/// `lower * upper`.
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    /// Unit lower triangular factor
    pub lower: Matrix<T>,
    /// Upper triangular factor
    pub upper: Matrix<T>,
    /// The row swaps performed, in order
    pub swaps: Vec<(usize, usize)>,
}

impl<T> Matrix<T> {
    /// Create a matrix from its rows
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(Error::ShapeMismatch {
                    expected: ncols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            shape: [nrows, ncols],
        })
    }

    /// Create a matrix by evaluating a function at every index
    pub fn from_fn(shape: [usize; 2], mut f: impl FnMut([usize; 2]) -> T) -> Self {
        let mut data = Vec::with_capacity(shape[0] * shape[1]);
        for i in 0..shape[0] {
            for j in 0..shape[1] {
                data.push(f([i, j]));
            }
        }
        Self { data, shape }
    }

    /// The shape of the matrix
    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    /// Is the matrix square?
    pub fn is_square(&self) -> bool {
        self.shape[0] == self.shape[1]
    }

    /// The dimension of a square matrix
    pub fn square_dim(&self) -> Result<usize> {
        if self.is_square() {
            Ok(self.shape[0])
        } else {
            Err(Error::ShapeMismatch {
                expected: self.shape[0],
                actual: self.shape[1],
            })
        }
    }

    /// Get an entry, or `None` if the index is out of bounds
    pub fn get(&self, index: [usize; 2]) -> Option<&T> {
        if index[0] < self.shape[0] && index[1] < self.shape[1] {
            self.data.get(index[0] * self.shape[1] + index[1])
        } else {
            None
        }
    }

    /// Get a mutable entry, or `None` if the index is out of bounds
    pub fn get_mut(&mut self, index: [usize; 2]) -> Option<&mut T> {
        if index[0] < self.shape[0] && index[1] < self.shape[1] {
            self.data.get_mut(index[0] * self.shape[1] + index[1])
        } else {
            None
        }
    }

    /// A row of the matrix
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.shape[1]..(i + 1) * self.shape[1]]
    }

    /// Iterate over the rows of the matrix
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.shape[0]).map(|i| self.row(i))
    }

    /// Apply a function to every entry
    pub fn map<S>(&self, f: impl FnMut(&T) -> S) -> Matrix<S> {
        Matrix {
            data: self.data.iter().map(f).collect(),
            shape: self.shape,
        }
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            for j in 0..self.shape[1] {
                self.data.swap(a * self.shape[1] + j, b * self.shape[1] + j);
            }
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// The transpose
    pub fn transpose(&self) -> Self {
        Self::from_fn([self.shape[1], self.shape[0]], |[i, j]| self[[j, i]].clone())
    }
}

impl<T: Scalar> Matrix<T> {
    /// A matrix of zeros
    pub fn zeros(shape: [usize; 2]) -> Self {
        Self::from_fn(shape, |_| T::zero())
    }

    /// The identity matrix
    pub fn identity(n: usize) -> Self {
        Self::from_fn([n, n], |[i, j]| if i == j { T::one() } else { T::zero() })
    }

    /// Matrix-matrix product
    pub fn mat_mul(&self, other: &Self) -> Result<Self> {
        if self.shape[1] != other.shape[0] {
            return Err(Error::ShapeMismatch {
                expected: self.shape[1],
                actual: other.shape[0],
            });
        }
        Ok(Self::from_fn([self.shape[0], other.shape[1]], |[i, j]| {
            (0..self.shape[1]).fold(T::zero(), |acc, k| {
                acc + self[[i, k]].clone() * other[[k, j]].clone()
            })
        }))
    }

    /// Matrix-vector product
    pub fn mat_vec(&self, v: &[T]) -> Result<Vec<T>> {
        if self.shape[1] != v.len() {
            return Err(Error::ShapeMismatch {
                expected: self.shape[1],
                actual: v.len(),
            });
        }
        Ok(self
            .rows()
            .map(|row| {
                row.iter()
                    .zip(v)
                    .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
            })
            .collect())
    }

    /// The row (at or below `k`) with the largest entry in column `k`
    fn pivot_row(&self, k: usize) -> Result<usize> {
        let mut pivot = k;
        for r in k + 1..self.shape[0] {
            if self[[r, k]].abs() > self[[pivot, k]].abs() {
                pivot = r;
            }
        }
        if self[[pivot, k]].is_zero() {
            Err(Error::SingularMatrix)
        } else {
            Ok(pivot)
        }
    }

    /// LU decomposition with partial pivoting
    pub fn lu(&self) -> Result<LuDecomposition<T>> {
        let n = self.square_dim()?;
        let mut upper = self.clone();
        let mut lower = Self::zeros([n, n]);
        let mut swaps = vec![];
        for k in 0..n {
            let pivot = upper.pivot_row(k)?;
            if pivot != k {
                upper.swap_rows(k, pivot);
                for j in 0..k {
                    lower.data.swap(k * n + j, pivot * n + j);
                }
                swaps.push((k, pivot));
            }
            lower[[k, k]] = T::one();
            for r in k + 1..n {
                let factor = upper[[r, k]].clone() / upper[[k, k]].clone();
                if factor.is_zero() {
                    continue;
                }
                for j in k + 1..n {
                    upper[[r, j]] = upper[[r, j]].clone() - factor.clone() * upper[[k, j]].clone();
                }
                upper[[r, k]] = T::zero();
                lower[[r, k]] = factor;
            }
        }
        Ok(LuDecomposition {
            lower,
            upper,
            swaps,
        })
    }

    /// The inverse, computed by Gauss-Jordan elimination
    pub fn inverse(&self) -> Result<Self> {
        let n = self.square_dim()?;
        let mut a = self.clone();
        let mut inverse = Self::identity(n);
        for k in 0..n {
            let pivot = a.pivot_row(k)?;
            a.swap_rows(k, pivot);
            inverse.swap_rows(k, pivot);
            let p = a[[k, k]].clone();
            for j in 0..n {
                a[[k, j]] = a[[k, j]].clone() / p.clone();
                inverse[[k, j]] = inverse[[k, j]].clone() / p.clone();
            }
            for r in 0..n {
                if r == k || a[[r, k]].is_zero() {
                    continue;
                }
                let factor = a[[r, k]].clone();
                for j in 0..n {
                    a[[r, j]] = a[[r, j]].clone() - factor.clone() * a[[k, j]].clone();
                    inverse[[r, j]] =
                        inverse[[r, j]].clone() - factor.clone() * inverse[[k, j]].clone();
                }
            }
        }
        Ok(inverse)
    }

    /// The determinant
    pub fn determinant(&self) -> Result<T> {
        self.square_dim()?;
        match self.lu() {
            Ok(lu) => {
                let diagonal = (0..self.shape[0])
                    .fold(T::one(), |acc, i| acc * lu.upper[[i, i]].clone());
                if lu.swaps.len() % 2 == 0 {
                    Ok(diagonal)
                } else {
                    Ok(-diagonal)
                }
            }
            Err(Error::SingularMatrix) => Ok(T::zero()),
            Err(e) => Err(e),
        }
    }
}

impl<T> Index<[usize; 2]> for Matrix<T> {
    type Output = T;
    fn index(&self, index: [usize; 2]) -> &T {
        debug_assert!(index[0] < self.shape[0] && index[1] < self.shape[1]);
        &self.data[index[0] * self.shape[1] + index[1]]
    }
}

impl<T> IndexMut<[usize; 2]> for Matrix<T> {
    fn index_mut(&mut self, index: [usize; 2]) -> &mut T {
        debug_assert!(index[0] < self.shape[0] && index[1] < self.shape[1]);
        &mut self.data[index[0] * self.shape[1] + index[1]]
    }
}

/// Select a maximal linearly independent subset of rows
///
/// Rows are taken greedily in order; the indices of the selected rows are returned.
pub fn independent_rows<T: Scalar>(rows: &[Vec<T>]) -> Vec<usize> {
    let mut echelon: Vec<(usize, Vec<T>)> = vec![];
    let mut selected = vec![];
    for (index, row) in rows.iter().enumerate() {
        let mut r = row.clone();
        for (p, b) in &echelon {
            if !r[*p].is_zero() {
                let factor = r[*p].clone() / b[*p].clone();
                for (rj, bj) in r.iter_mut().zip(b) {
                    *rj = rj.clone() - factor.clone() * bj.clone();
                }
            }
        }
        if let Some(p) = r.iter().position(|v| !v.is_zero()) {
            echelon.push((p, r));
            selected.push(index);
        }
    }
    selected
}
