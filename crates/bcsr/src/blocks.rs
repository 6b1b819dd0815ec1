//! Block extraction and the pre-sized block store
//!
//! This module holds the two leaf pieces of the dense → BCSR pipeline:
//!
//! - [`extract_block`]: copies one logical block out of a dense matrix into
//!   a freshly zeroed `b × b` buffer, clipping at the matrix edge so ragged
//!   blocks get their true `(height, width)` extent.
//! - [`BlockStore`]: an append-only container sized to exactly the non-zero
//!   block count, so the encode pass never reallocates and an overflow is
//!   surfaced as an internal-consistency error instead of silent growth.
//!
//! # Examples
//!
//! ```
//! use scirs2_core::ndarray_ext::array;
//! use bcsr::blocks::extract_block;
//!
//! let dense = array![[1.0, 0.0, 2.0], [0.0, 0.0, 0.0], [0.0, 0.0, 3.0]];
//!
//! // Interior block, fully inside the matrix
//! let patch = extract_block(&dense.view(), 0, 0, 2, 0.0);
//! assert!(patch.nonzero);
//! assert_eq!((patch.height, patch.width), (2, 2));
//!
//! // Bottom-right corner block of a 3×3 matrix with b = 2 is ragged
//! let corner = extract_block(&dense.view(), 2, 2, 2, 0.0);
//! assert_eq!((corner.height, corner.width), (1, 1));
//! assert_eq!(corner.data, vec![3.0, 0.0, 0.0, 0.0]);
//! ```

use crate::error::{BcsrError, BcsrResult};
use scirs2_core::ndarray_ext::ArrayView2;
use scirs2_core::numeric::Float;

/// One non-zero block of a BCSR matrix
///
/// Fuses the value buffer, actual extent, and literal column start that the
/// format keeps in lock-step: every stored block carries its own metadata
/// instead of relying on parallel arrays staying aligned by convention.
///
/// The value buffer is row-major with stride equal to the nominal block
/// size; cells beyond `height × width` are zero padding.
#[derive(Debug, Clone, PartialEq)]
pub struct BcsrBlock<T> {
    col_start: usize,
    height: usize,
    width: usize,
    data: Vec<T>,
}

impl<T: Float> BcsrBlock<T> {
    /// Create a block from its column start, clipped extent, and padded buffer
    ///
    /// The buffer length is validated by [`crate::BcsrMatrix::new`], not here.
    pub fn new(col_start: usize, height: usize, width: usize, data: Vec<T>) -> Self {
        Self {
            col_start,
            height,
            width,
            data,
        }
    }

    /// Literal column index (not block-column index) where this block begins
    pub fn col_start(&self) -> usize {
        self.col_start
    }

    /// Actual block height, clipped at the matrix's bottom edge
    pub fn height(&self) -> usize {
        self.height
    }

    /// Actual block width, clipped at the matrix's right edge
    pub fn width(&self) -> usize {
        self.width
    }

    /// Padded row-major value buffer (length `block_size * block_size`)
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Value at `(r, c)` within the block, given the nominal block size
    pub fn value_at(&self, r: usize, c: usize, block_size: usize) -> T {
        self.data[r * block_size + c]
    }

    /// Accumulate a value into the buffer. Used during COO assembly, where
    /// duplicate triplets sum.
    pub(crate) fn accumulate(&mut self, r: usize, c: usize, block_size: usize, value: T) {
        let idx = r * block_size + c;
        self.data[idx] = self.data[idx] + value;
    }

    /// True iff some cell within the actual extent exceeds `tol` in magnitude
    pub(crate) fn has_nonzero(&self, block_size: usize, tol: T) -> bool {
        for r in 0..self.height {
            for c in 0..self.width {
                if self.data[r * block_size + c].abs() > tol {
                    return true;
                }
            }
        }
        false
    }
}

/// Result of extracting one logical block from a dense matrix
#[derive(Debug, Clone)]
pub struct BlockPatch<T> {
    /// True iff at least one visited cell exceeds the tolerance in magnitude
    pub nonzero: bool,
    /// Freshly zeroed `block_size * block_size` buffer, row-major, padded
    pub data: Vec<T>,
    /// `min(block_size, rows - row_start)`
    pub height: usize,
    /// `min(block_size, cols - col_start)`
    pub width: usize,
}

/// Extract the block whose top-left corner is `(row_start, col_start)`
///
/// Pure with respect to the matrix: the buffer is freshly zero-initialized
/// on every call, so no state leaks between extractions. Iteration is
/// clipped to `min(row_start + block_size, rows)` and
/// `min(col_start + block_size, cols)`; cells outside the matrix stay zero.
///
/// Callers must pass `row_start < rows` and `col_start < cols`, both on the
/// block grid.
pub fn extract_block<T: Float>(
    dense: &ArrayView2<T>,
    row_start: usize,
    col_start: usize,
    block_size: usize,
    tol: T,
) -> BlockPatch<T> {
    let (rows, cols) = (dense.nrows(), dense.ncols());
    let height = block_size.min(rows - row_start);
    let width = block_size.min(cols - col_start);

    let mut data = vec![T::zero(); block_size * block_size];
    let mut nonzero = false;

    for r in 0..height {
        for c in 0..width {
            let value = dense[[row_start + r, col_start + c]];
            data[r * block_size + c] = value;
            if value.abs() > tol {
                nonzero = true;
            }
        }
    }

    BlockPatch {
        nonzero,
        data,
        height,
        width,
    }
}

/// Count non-zero blocks in one row-major pass over the block grid
///
/// The result sizes the [`BlockStore`] exactly, so the encode pass never
/// grows its allocation.
pub fn count_nonzero_blocks<T: Float>(dense: &ArrayView2<T>, block_size: usize, tol: T) -> usize {
    let (rows, cols) = (dense.nrows(), dense.ncols());
    let mut count = 0;

    for row_start in (0..rows).step_by(block_size) {
        for col_start in (0..cols).step_by(block_size) {
            if extract_block(dense, row_start, col_start, block_size, tol).nonzero {
                count += 1;
            }
        }
    }

    count
}

/// Append-only block container pre-sized to the non-zero block count
///
/// Appending past the pre-computed capacity means the count pass and the
/// encode pass disagree about the matrix, which is an internal-consistency
/// error rather than a reason to grow.
#[derive(Debug)]
pub struct BlockStore<T> {
    blocks: Vec<BcsrBlock<T>>,
    capacity: usize,
}

impl<T: Float> BlockStore<T> {
    /// Create a store that accepts exactly `nnzb` blocks
    pub fn with_capacity(nnzb: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(nnzb),
            capacity: nnzb,
        }
    }

    /// Append the next block in insertion order
    pub fn append(&mut self, block: BcsrBlock<T>) -> BcsrResult<()> {
        if self.blocks.len() == self.capacity {
            return Err(BcsrError::InternalInconsistency {
                expected: self.capacity,
                got: self.capacity + 1,
            });
        }
        self.blocks.push(block);
        Ok(())
    }

    /// Number of blocks appended so far
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True iff no block has been appended yet
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Consume the store, yielding blocks in insertion order
    pub fn into_blocks(self) -> Vec<BcsrBlock<T>> {
        self.blocks
    }
}
