use std::fmt;

use crate::error::{Error, Result};

/// Immutable dense 2-D array of `f64` with shape-checked algebra.
///
/// Every operation returns a fresh matrix; shape violations surface as
/// [`Error`] values carrying the conflicting dimensions.
#[derive(Debug, Clone)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    fn check_dims(rows: usize, cols: usize) -> Result<()> {
        if rows < 1 || cols < 1 {
            return Err(Error::IllegalDimensions { rows, cols });
        }
        Ok(())
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix> {
        Matrix::check_dims(rows, cols)?;
        Ok(Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        })
    }

    pub fn ones(rows: usize, cols: usize) -> Result<Matrix> {
        Matrix::from_fn(rows, cols, |_, _| 1.0)
    }

    pub fn identity(dim: usize) -> Result<Matrix> {
        Matrix::from_fn(dim, dim, |r, c| if r == c { 1.0 } else { 0.0 })
    }

    /// Builds a matrix by evaluating `init` at every `(row, col)` position,
    /// row by row. The generator may be stateful (e.g. draw from an RNG).
    pub fn from_fn<F>(rows: usize, cols: usize, mut init: F) -> Result<Matrix>
    where
        F: FnMut(usize, usize) -> f64,
    {
        Matrix::check_dims(rows, cols)?;
        let mut data = Vec::with_capacity(rows);
        for r in 0..rows {
            let mut row = Vec::with_capacity(cols);
            for c in 0..cols {
                row.push(init(r, c));
            }
            data.push(row);
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix from a raw row grid. The grid must be non-empty and
    /// rectangular.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        Matrix::check_dims(rows, cols)?;
        for row in &data {
            if row.len() != cols {
                return Err(Error::IllegalDimensions {
                    rows,
                    cols: row.len(),
                });
            }
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the element at `(row, col)`. Out-of-range access panics the
    /// way `Vec` indexing does; bounds are the caller's responsibility.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn scale(&self, s: f64) -> Matrix {
        self.apply(|x| s * x)
    }

    pub fn apply<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(|&x| f(x)).collect())
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    fn check_same_shape(&self, other: &Matrix, op: &'static str) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Error::ShapeMismatch {
                op,
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: other.rows,
                rhs_cols: other.cols,
            });
        }
        Ok(())
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other, "+")?;
        let mut res = self.clone();
        for (res_row, other_row) in res.data.iter_mut().zip(&other.data) {
            for (x, y) in res_row.iter_mut().zip(other_row) {
                *x += y;
            }
        }
        Ok(res)
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other, "-")?;
        let mut res = self.clone();
        for (res_row, other_row) in res.data.iter_mut().zip(&other.data) {
            for (x, y) in res_row.iter_mut().zip(other_row) {
                *x -= y;
            }
        }
        Ok(res)
    }

    /// Standard matrix product; requires `self.cols == rhs.rows`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(Error::ShapeMismatch {
                op: "*",
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: rhs.rows,
                rhs_cols: rhs.cols,
            });
        }
        let mut data = vec![vec![0.0; rhs.cols]; self.rows];
        for r in 0..self.rows {
            for c in 0..rhs.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.data[r][k] * rhs.data[k][c];
                }
                data[r][c] = sum;
            }
        }
        Ok(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            data,
        })
    }

    /// Combines two same-shape matrices element by element.
    pub fn element_wise<F>(&self, other: &Matrix, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_same_shape(other, "element-wise")?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(lhs, rhs)| lhs.iter().zip(rhs).map(|(&x, &y)| f(x, y)).collect())
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    pub fn add_element_wise(&self, other: &Matrix) -> Result<Matrix> {
        self.element_wise(other, |x, y| x + y)
    }

    pub fn subtract_element_wise(&self, other: &Matrix) -> Result<Matrix> {
        self.element_wise(other, |x, y| x - y)
    }

    pub fn multiply_element_wise(&self, other: &Matrix) -> Result<Matrix> {
        self.element_wise(other, |x, y| x * y)
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = vec![vec![0.0; self.rows]; self.cols];
        for r in 0..self.rows {
            for c in 0..self.cols {
                data[c][r] = self.data[r][c];
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Spreads a row or column vector along the diagonal of a square matrix,
    /// zero elsewhere. Fails unless one dimension equals 1.
    pub fn diagonalize(&self) -> Result<Matrix> {
        if self.rows != 1 && self.cols != 1 {
            return Err(Error::NotVector {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows > self.cols {
            Matrix::from_fn(self.rows, self.rows, |r, c| {
                if r == c {
                    self.data[r][0]
                } else {
                    0.0
                }
            })
        } else {
            Matrix::from_fn(self.cols, self.cols, |r, c| {
                if r == c {
                    self.data[0][c]
                } else {
                    0.0
                }
            })
        }
    }
}

/// Equality is bit-exact: same shape and every pair of elements identical
/// under `f64::to_bits`. `0.0` and `-0.0` are distinct, equal NaN payloads
/// compare equal.
impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.data.iter().zip(&other.data).all(|(lhs, rhs)| {
                lhs.iter()
                    .zip(rhs)
                    .all(|(x, y)| x.to_bits() == y.to_bits())
            })
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            f.write_str(if r == 0 { "[" } else { " " })?;
            for c in 0..self.cols {
                if c > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:.4}", self.data[r][c])?;
            }
            f.write_str(if r == self.rows - 1 { "]" } else { "\n" })?;
        }
        Ok(())
    }
}
