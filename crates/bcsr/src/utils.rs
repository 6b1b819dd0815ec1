//! Helper utilities for building inputs and summarizing block structure
//!
//! # Examples
//!
//! ```
//! use bcsr::utils::dense_from_rows;
//!
//! let dense = dense_from_rows(vec![
//!     vec![1.0, 0.0],
//!     vec![0.0, 2.0],
//! ]).unwrap();
//!
//! assert_eq!(dense.nrows(), 2);
//! assert_eq!(dense[[1, 1]], 2.0);
//! ```

use crate::bcsr::BcsrMatrix;
use crate::error::{BcsrError, BcsrResult};
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::Float;

/// Build a dense matrix from row vectors
///
/// This is the ragged-input guard: `Array2` is rectangular by construction,
/// so the unequal-row-length case is rejected here, before conversion.
///
/// # Errors
///
/// Returns [`BcsrError::InvalidDimension`] if there are no rows, no
/// columns, or a row whose length differs from the first row's.
pub fn dense_from_rows<T: Float>(rows: Vec<Vec<T>>) -> BcsrResult<Array2<T>> {
    if rows.is_empty() {
        return Err(BcsrError::InvalidDimension("matrix has no rows".to_string()));
    }
    let ncols = rows[0].len();
    if ncols == 0 {
        return Err(BcsrError::InvalidDimension(
            "matrix has no columns".to_string(),
        ));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != ncols {
            return Err(BcsrError::InvalidDimension(format!(
                "row {i} has {} entries, expected {ncols}",
                row.len()
            )));
        }
    }

    let nrows = rows.len();
    let flat: Vec<T> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|e| BcsrError::InvalidDimension(e.to_string()))
}

/// Block-level occupancy statistics for a BCSR matrix
#[derive(Debug, Clone)]
pub struct BlockStats {
    /// Number of stored (non-zero) blocks
    pub nnzb: usize,
    /// Total block grid slots
    pub total_blocks: usize,
    /// nnzb / total_blocks
    pub block_density: f64,
    /// Matrix shape in elements
    pub shape: (usize, usize),
    /// Nominal block side length
    pub block_size: usize,
}

impl BlockStats {
    /// Compute statistics from a BCSR matrix
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::array;
    /// use bcsr::{utils::BlockStats, BcsrMatrix};
    ///
    /// let dense = array![[1.0, 0.0], [0.0, 0.0]];
    /// let bcsr = BcsrMatrix::from_dense(&dense.view(), 1, 0.0).unwrap();
    ///
    /// let stats = BlockStats::from_bcsr(&bcsr);
    /// assert_eq!(stats.nnzb, 1);
    /// assert_eq!(stats.total_blocks, 4);
    /// assert!((stats.block_density - 0.25).abs() < 1e-12);
    /// ```
    pub fn from_bcsr<T: Float>(bcsr: &BcsrMatrix<T>) -> Self {
        let total_blocks = bcsr.num_block_rows() * bcsr.num_block_cols();
        Self {
            nnzb: bcsr.nnzb(),
            total_blocks,
            block_density: bcsr.block_density(),
            shape: bcsr.shape(),
            block_size: bcsr.block_size(),
        }
    }
}
