//! COO (Coordinate) input format for 2-D matrices
//!
//! Triplet storage `(row, col, value)` used as an alternative entry point
//! into BCSR conversion. Flexible to build, validated once at construction.
//! Duplicate coordinates are allowed and sum on densification and during
//! block assembly.
//!
//! # Examples
//!
//! ```
//! use bcsr::coo::CooMatrix;
//!
//! let coo = CooMatrix::new(
//!     vec![0, 1, 2],
//!     vec![1, 2, 0],
//!     vec![2.5, 3.0, 1.5],
//!     (3, 4),
//! ).unwrap();
//!
//! assert_eq!(coo.nnz(), 3);
//! assert_eq!(coo.shape(), (3, 4));
//! ```

use crate::error::{BcsrError, BcsrResult};
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::Float;

/// 2-D sparse matrix in coordinate (triplet) form
#[derive(Debug, Clone)]
pub struct CooMatrix<T> {
    shape: (usize, usize),
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<T>,
}

impl<T: Float> CooMatrix<T> {
    /// Create a COO matrix from its triplet arrays
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has a zero dimension, the three arrays
    /// have differing lengths, or a coordinate lies outside the shape.
    pub fn new(
        rows: Vec<usize>,
        cols: Vec<usize>,
        values: Vec<T>,
        shape: (usize, usize),
    ) -> BcsrResult<Self> {
        if shape.0 == 0 || shape.1 == 0 {
            return Err(BcsrError::InvalidDimension(format!(
                "COO shape is {} x {}",
                shape.0, shape.1
            )));
        }

        if rows.len() != values.len() || cols.len() != values.len() {
            return Err(BcsrError::TripletLengthMismatch {
                rows: rows.len(),
                cols: cols.len(),
                values: values.len(),
            });
        }

        for (&i, &j) in rows.iter().zip(cols.iter()) {
            if i >= shape.0 || j >= shape.1 {
                return Err(BcsrError::IndexOutOfBounds {
                    row: i,
                    col: j,
                    shape,
                });
            }
        }

        Ok(Self {
            shape,
            rows,
            cols,
            values,
        })
    }

    /// Matrix shape in elements
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of stored triplets (duplicates counted individually)
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterate triplets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.rows
            .iter()
            .zip(self.cols.iter())
            .zip(self.values.iter())
            .map(|((&i, &j), &v)| (i, j, v))
    }

    /// Densify, summing duplicate coordinates
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::zeros(self.shape);
        for (i, j, v) in self.iter() {
            dense[[i, j]] = dense[[i, j]] + v;
        }
        dense
    }
}
