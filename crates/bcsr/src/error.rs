//! Error types for BCSR conversion and validation
//!
//! All failure paths in this crate are reported synchronously to the caller
//! through [`BcsrError`]; nothing is retried, logged-and-continued, or
//! swallowed. The conversion entry points fail fast, before any grid pass
//! begins.
//!
//! # Examples
//!
//! ```
//! use bcsr::error::{BcsrError, BcsrResult};
//!
//! fn validate_block_size(b: usize) -> BcsrResult<()> {
//!     if b == 0 {
//!         return Err(BcsrError::InvalidBlockSize(b));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_block_size(0).is_err());
//! assert!(validate_block_size(2).is_ok());
//! ```

use thiserror::Error;

/// Top-level error type for BCSR construction and operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BcsrError {
    /// Matrix has zero rows, zero columns, or rows of unequal length
    #[error("Invalid matrix dimension: {0}")]
    InvalidDimension(String),

    /// Block size must be at least 1
    #[error("Invalid block size: {0} (must be >= 1)")]
    InvalidBlockSize(usize),

    /// The encode pass produced a different non-zero block count than the
    /// count pass. Unreachable unless the input is mutated mid-conversion.
    #[error("Internal inconsistency: encode pass produced {got} blocks but count pass found {expected}")]
    InternalInconsistency { expected: usize, got: usize },

    /// Row pointer array has the wrong length for the block-row count
    #[error("Invalid row pointers: length {len} for {nb} block rows (expected {expected})")]
    InvalidRowPtr {
        len: usize,
        nb: usize,
        expected: usize,
    },

    /// Row pointer array is not monotonically non-decreasing
    #[error("Row pointer not sorted at index {idx}: {curr} > {next}")]
    RowPtrNotSorted {
        idx: usize,
        curr: usize,
        next: usize,
    },

    /// Row pointer endpoints do not bracket the stored blocks
    #[error("Row pointer range mismatch: first {first}, last {last}, {nnzb} blocks stored")]
    RowPtrRangeMismatch {
        first: usize,
        last: usize,
        nnzb: usize,
    },

    /// A block's column start lies outside the matrix
    #[error("Column start out of bounds: {col_start} >= {ncols}")]
    ColStartOutOfBounds { col_start: usize, ncols: usize },

    /// A block's column start is not on the block grid
    #[error("Column start {col_start} is not a multiple of block size {block_size}")]
    ColStartUnaligned { col_start: usize, block_size: usize },

    /// Blocks within a block-row are out of order or duplicated
    #[error("Column starts not strictly increasing in block row {block_row}: {prev} then {curr}")]
    ColStartNotIncreasing {
        block_row: usize,
        prev: usize,
        curr: usize,
    },

    /// A block buffer does not have the padded `block_size * block_size` length
    #[error("Block buffer length {len} does not match block size {block_size} (expected {expected})")]
    InvalidBlockBuffer {
        len: usize,
        block_size: usize,
        expected: usize,
    },

    /// A block's stored (height, width) disagrees with its clipped extent
    #[error("Block extent mismatch in block row {block_row}: stored {stored:?}, clipped extent is {clipped:?}")]
    BlockExtentMismatch {
        block_row: usize,
        stored: (usize, usize),
        clipped: (usize, usize),
    },

    /// A stored block is all-zero within its actual extent
    #[error("All-zero block stored in block row {block_row} at column start {col_start}")]
    AllZeroBlock { block_row: usize, col_start: usize },

    /// Operand shapes are incompatible (SpMV, COO input)
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// COO triplet arrays have differing lengths
    #[error("Length mismatch: {rows} row indices, {cols} column indices, {values} values")]
    TripletLengthMismatch {
        rows: usize,
        cols: usize,
        values: usize,
    },

    /// A COO coordinate lies outside the matrix shape
    #[error("Index out of bounds: ({row}, {col}) exceeds shape {shape:?}")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        shape: (usize, usize),
    },
}

/// Result type alias for BCSR operations
pub type BcsrResult<T> = Result<T, BcsrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_block_size_message() {
        let err = BcsrError::InvalidBlockSize(0);
        assert_eq!(err.to_string(), "Invalid block size: 0 (must be >= 1)");
    }

    #[test]
    fn test_internal_inconsistency_message() {
        let err = BcsrError::InternalInconsistency {
            expected: 3,
            got: 4,
        };
        assert_eq!(
            err.to_string(),
            "Internal inconsistency: encode pass produced 4 blocks but count pass found 3"
        );
    }

    #[test]
    fn test_row_ptr_not_sorted_message() {
        let err = BcsrError::RowPtrNotSorted {
            idx: 1,
            curr: 5,
            next: 2,
        };
        assert_eq!(err.to_string(), "Row pointer not sorted at index 1: 5 > 2");
    }

    #[test]
    fn test_index_out_of_bounds_message() {
        let err = BcsrError::IndexOutOfBounds {
            row: 7,
            col: 1,
            shape: (4, 4),
        };
        assert_eq!(
            err.to_string(),
            "Index out of bounds: (7, 1) exceeds shape (4, 4)"
        );
    }
}
