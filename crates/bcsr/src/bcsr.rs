//! BCSR (Block Compressed Sparse Row) format
//!
//! Block-based sparse matrix storage: the matrix is partitioned into a grid
//! of nominal `b × b` blocks and only blocks containing at least one
//! non-zero entry are kept. Each stored block carries its flattened values,
//! its actual (possibly clipped) extent, and the literal column index where
//! it begins; a row-pointer array marks where each block-row's blocks start
//! in the stored sequence.
//!
//! Unlike formats that require the matrix shape to divide evenly by the
//! block size, edge blocks here are ragged: a `3×3` matrix with `b = 2`
//! stores `(1,1)`, `(1,2)` and `(2,1)` blocks along its bottom and right
//! edges, with the value buffers zero-padded to the nominal size.
//!
//! # Structure
//!
//! - **block_size**: nominal side length `b` of each block
//! - **row_ptr**: per-block-row offsets into the block sequence
//!   (length `num_block_rows + 1`)
//! - **blocks**: [`BcsrBlock`] records in block-row-major order, each with
//!   `{col_start, height, width, data}`
//!
//! # Examples
//!
//! ```
//! use scirs2_core::ndarray_ext::Array2;
//! use bcsr::BcsrMatrix;
//!
//! let dense = Array2::from_shape_vec((4, 4), vec![
//!     1.0, 4.0, 0.0, 0.0,
//!     0.0, 0.0, 0.0, 2.0,
//!     0.0, 0.0, 3.0, 0.0,
//!     0.0, 0.0, 0.0, 1.0,
//! ]).unwrap();
//!
//! let bcsr = BcsrMatrix::from_dense(&dense.view(), 2, 0.0).unwrap();
//!
//! assert_eq!(bcsr.nnzb(), 3);
//! assert_eq!(bcsr.row_ptr(), &[0, 2, 3]);
//! assert_eq!(bcsr.col_starts(), vec![0, 2, 2]);
//! ```

use crate::blocks::{count_nonzero_blocks, extract_block, BcsrBlock, BlockStore};
use crate::coo::CooMatrix;
use crate::error::{BcsrError, BcsrResult};
use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView1, ArrayView2};
use scirs2_core::numeric::Float;
use std::collections::BTreeMap;

/// Block Compressed Sparse Row matrix with ragged edge blocks
///
/// Built in one conversion call and read-only afterwards. Values are copied
/// out of the input matrix; nothing aliases the source after conversion.
#[derive(Debug, Clone)]
pub struct BcsrMatrix<T> {
    /// Matrix shape in elements (not blocks)
    shape: (usize, usize),

    /// Nominal block side length
    block_size: usize,

    /// Row pointers for block rows (length = num_block_rows + 1)
    row_ptr: Vec<usize>,

    /// Non-zero blocks in block-row-major, then left-to-right order
    blocks: Vec<BcsrBlock<T>>,
}

impl<T: Float> BcsrMatrix<T> {
    /// Create a BCSR matrix from its parts, with full structural validation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the shape has a zero dimension or the block size is zero
    /// - `row_ptr` has the wrong length, is not sorted, or its endpoints do
    ///   not bracket the stored blocks
    /// - a block's column start is out of bounds, off the block grid, or not
    ///   strictly increasing within its block-row
    /// - a block's buffer or extent disagrees with the block size and shape
    /// - a block is all-zero within its actual extent
    pub fn new(
        shape: (usize, usize),
        block_size: usize,
        row_ptr: Vec<usize>,
        blocks: Vec<BcsrBlock<T>>,
    ) -> BcsrResult<Self> {
        if block_size == 0 {
            return Err(BcsrError::InvalidBlockSize(block_size));
        }
        if shape.0 == 0 || shape.1 == 0 {
            return Err(BcsrError::InvalidDimension(format!(
                "matrix shape is {} x {}",
                shape.0, shape.1
            )));
        }

        // Block-row count is the ceiling, so a ragged final block-row still
        // gets its row-pointer slot.
        let nb = shape.0.div_ceil(block_size);
        if row_ptr.len() != nb + 1 {
            return Err(BcsrError::InvalidRowPtr {
                len: row_ptr.len(),
                nb,
                expected: nb + 1,
            });
        }

        for idx in 0..row_ptr.len() - 1 {
            if row_ptr[idx] > row_ptr[idx + 1] {
                return Err(BcsrError::RowPtrNotSorted {
                    idx,
                    curr: row_ptr[idx],
                    next: row_ptr[idx + 1],
                });
            }
        }

        if row_ptr[0] != 0 || row_ptr[nb] != blocks.len() {
            return Err(BcsrError::RowPtrRangeMismatch {
                first: row_ptr[0],
                last: row_ptr[nb],
                nnzb: blocks.len(),
            });
        }

        let expected_len = block_size * block_size;
        for block_row in 0..nb {
            let mut prev_col: Option<usize> = None;

            for block in &blocks[row_ptr[block_row]..row_ptr[block_row + 1]] {
                let col_start = block.col_start();

                if block.data().len() != expected_len {
                    return Err(BcsrError::InvalidBlockBuffer {
                        len: block.data().len(),
                        block_size,
                        expected: expected_len,
                    });
                }
                if col_start >= shape.1 {
                    return Err(BcsrError::ColStartOutOfBounds {
                        col_start,
                        ncols: shape.1,
                    });
                }
                if !col_start.is_multiple_of(block_size) {
                    return Err(BcsrError::ColStartUnaligned {
                        col_start,
                        block_size,
                    });
                }
                if let Some(prev) = prev_col {
                    if col_start <= prev {
                        return Err(BcsrError::ColStartNotIncreasing {
                            block_row,
                            prev,
                            curr: col_start,
                        });
                    }
                }
                prev_col = Some(col_start);

                let clipped = (
                    block_size.min(shape.0 - block_row * block_size),
                    block_size.min(shape.1 - col_start),
                );
                let stored = (block.height(), block.width());
                if stored != clipped {
                    return Err(BcsrError::BlockExtentMismatch {
                        block_row,
                        stored,
                        clipped,
                    });
                }

                if !block.has_nonzero(block_size, T::zero()) {
                    return Err(BcsrError::AllZeroBlock {
                        block_row,
                        col_start,
                    });
                }
            }
        }

        Ok(Self {
            shape,
            block_size,
            row_ptr,
            blocks,
        })
    }

    /// Convert a dense matrix to BCSR
    ///
    /// A block is kept iff some entry exceeds `tol` in magnitude; pass
    /// `tol = 0` for exact non-zero detection.
    ///
    /// The conversion runs three sequential passes over the block grid:
    /// a count pass sizing the block store to exactly `nnzb`, an encode pass
    /// extracting blocks in row-major grid order, and a row-pointer pass
    /// that recomputes the non-zero test while recording the running count
    /// on entering each block-row. A divergence between the passes is
    /// reported as [`BcsrError::InternalInconsistency`].
    pub fn from_dense(dense: &ArrayView2<T>, block_size: usize, tol: T) -> BcsrResult<Self> {
        let (rows, cols) = (dense.nrows(), dense.ncols());
        if block_size == 0 {
            return Err(BcsrError::InvalidBlockSize(block_size));
        }
        if rows == 0 || cols == 0 {
            return Err(BcsrError::InvalidDimension(format!(
                "matrix shape is {rows} x {cols}"
            )));
        }

        // Pass 1: count non-zero blocks to size the store exactly.
        let nnzb = count_nonzero_blocks(dense, block_size, tol);

        // Pass 2: extract and store blocks in row-major grid order.
        let mut store = BlockStore::with_capacity(nnzb);
        for row_start in (0..rows).step_by(block_size) {
            for col_start in (0..cols).step_by(block_size) {
                let patch = extract_block(dense, row_start, col_start, block_size, tol);
                if patch.nonzero {
                    store.append(BcsrBlock::new(
                        col_start,
                        patch.height,
                        patch.width,
                        patch.data,
                    ))?;
                }
            }
        }
        if store.len() != nnzb {
            return Err(BcsrError::InternalInconsistency {
                expected: nnzb,
                got: store.len(),
            });
        }

        // Pass 3: row pointers, recording the running count on entering
        // each block-row and the total after the last one.
        let nb = rows.div_ceil(block_size);
        let mut row_ptr = Vec::with_capacity(nb + 1);
        let mut count = 0usize;
        for row_start in (0..rows).step_by(block_size) {
            row_ptr.push(count);
            for col_start in (0..cols).step_by(block_size) {
                if extract_block(dense, row_start, col_start, block_size, tol).nonzero {
                    count += 1;
                }
            }
        }
        row_ptr.push(count);

        if count != nnzb {
            return Err(BcsrError::InternalInconsistency {
                expected: nnzb,
                got: count,
            });
        }

        Self::new((rows, cols), block_size, row_ptr, store.into_blocks())
    }

    /// Convert a COO matrix to BCSR
    ///
    /// Triplets are scattered into blocks keyed by block coordinate;
    /// duplicate coordinates sum, explicit zeros are skipped, and a block
    /// whose accumulated values cancel to all-zero is dropped. Blocks are
    /// emitted in block-row-major, then left-to-right order.
    pub fn from_coo(coo: &CooMatrix<T>, block_size: usize) -> BcsrResult<Self> {
        if block_size == 0 {
            return Err(BcsrError::InvalidBlockSize(block_size));
        }
        let (rows, cols) = coo.shape();

        let mut blockmap: BTreeMap<(usize, usize), BcsrBlock<T>> = BTreeMap::new();
        for (i, j, v) in coo.iter() {
            if v == T::zero() {
                continue;
            }

            let (block_row, block_col) = (i / block_size, j / block_size);
            let block = blockmap.entry((block_row, block_col)).or_insert_with(|| {
                BcsrBlock::new(
                    block_col * block_size,
                    block_size.min(rows - block_row * block_size),
                    block_size.min(cols - block_col * block_size),
                    vec![T::zero(); block_size * block_size],
                )
            });
            block.accumulate(i % block_size, j % block_size, block_size, v);
        }

        let nb = rows.div_ceil(block_size);
        let mut row_ptr = Vec::with_capacity(nb + 1);
        let mut blocks = Vec::with_capacity(blockmap.len());
        let mut count = 0usize;

        for block_row in 0..nb {
            row_ptr.push(count);
            for (_, block) in blockmap.range((block_row, 0)..(block_row + 1, 0)) {
                // Summed duplicates may cancel; never store an all-zero block.
                if block.has_nonzero(block_size, T::zero()) {
                    blocks.push(block.clone());
                    count += 1;
                }
            }
        }
        row_ptr.push(count);

        Self::new((rows, cols), block_size, row_ptr, blocks)
    }

    /// Matrix shape in elements
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.shape.0
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.shape.1
    }

    /// Nominal block side length
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of block rows (ceiling of `rows / block_size`)
    pub fn num_block_rows(&self) -> usize {
        self.shape.0.div_ceil(self.block_size)
    }

    /// Number of block columns (ceiling of `cols / block_size`)
    pub fn num_block_cols(&self) -> usize {
        self.shape.1.div_ceil(self.block_size)
    }

    /// Number of stored (non-zero) blocks
    pub fn nnzb(&self) -> usize {
        self.blocks.len()
    }

    /// Number of non-zero elements within the stored blocks' actual extents
    pub fn nnz(&self) -> usize {
        let b = self.block_size;
        let mut nnz = 0;
        for block in &self.blocks {
            for r in 0..block.height() {
                for c in 0..block.width() {
                    if block.value_at(r, c, b) != T::zero() {
                        nnz += 1;
                    }
                }
            }
        }
        nnz
    }

    /// Row pointers
    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Stored blocks in block-row-major order
    pub fn blocks(&self) -> &[BcsrBlock<T>] {
        &self.blocks
    }

    /// Literal column starts of the stored blocks, in storage order
    pub fn col_starts(&self) -> Vec<usize> {
        self.blocks.iter().map(|b| b.col_start()).collect()
    }

    /// Fraction of block grid slots that hold a stored block
    pub fn block_density(&self) -> f64 {
        let total = self.num_block_rows() * self.num_block_cols();
        self.nnzb() as f64 / total as f64
    }

    /// Get the stored block at a block-grid coordinate
    ///
    /// Returns `None` if the block is all-zero (not stored).
    pub fn get_block(&self, block_row: usize, block_col: usize) -> Option<&BcsrBlock<T>> {
        let start = self.row_ptr[block_row];
        let end = self.row_ptr[block_row + 1];
        let col_start = block_col * self.block_size;

        self.blocks[start..end]
            .iter()
            .find(|b| b.col_start() == col_start)
    }

    /// Reconstruct the dense matrix
    ///
    /// Each block's actual `height × width` window lands at
    /// `(block_row * block_size, col_start)`; everything else is zero.
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::zeros(self.shape);
        let b = self.block_size;

        for block_row in 0..self.num_block_rows() {
            let row_start = block_row * b;

            for block in &self.blocks[self.row_ptr[block_row]..self.row_ptr[block_row + 1]] {
                for r in 0..block.height() {
                    for c in 0..block.width() {
                        dense[[row_start + r, block.col_start() + c]] = block.value_at(r, c, b);
                    }
                }
            }
        }

        dense
    }

    /// Sparse matrix-vector multiply: y = A * x
    ///
    /// Block-oriented: each stored block contributes a small dense
    /// matrix-vector product, clipped to its actual extent so ragged edge
    /// blocks never read past the input vector.
    ///
    /// # Complexity
    ///
    /// Time: O(nnzb * block_size²), Space: O(nrows)
    pub fn spmv(&self, x: &ArrayView1<T>) -> BcsrResult<Array1<T>> {
        if x.len() != self.ncols() {
            return Err(BcsrError::ShapeMismatch(format!(
                "vector length {} does not match matrix columns {}",
                x.len(),
                self.ncols()
            )));
        }

        let mut y = Array1::zeros(self.nrows());
        let b = self.block_size;

        for block_row in 0..self.num_block_rows() {
            let row_start = block_row * b;

            for block in &self.blocks[self.row_ptr[block_row]..self.row_ptr[block_row + 1]] {
                for r in 0..block.height() {
                    let mut sum = T::zero();
                    for c in 0..block.width() {
                        sum = sum + block.value_at(r, c, b) * x[block.col_start() + c];
                    }
                    y[row_start + r] = y[row_start + r] + sum;
                }
            }
        }

        Ok(y)
    }
}
