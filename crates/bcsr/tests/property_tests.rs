//! Property-based tests for BCSR conversion
//!
//! These tests use proptest to verify the format invariants and the
//! round-trip identity against dense baselines, across random shapes,
//! densities and block sizes (including ragged edge configurations).

use bcsr::{count_nonzero_blocks, BcsrMatrix, CooMatrix};
use proptest::prelude::*;
use scirs2_core::ndarray_ext::{Array1, Array2};

// ============================================================================
// Test Utilities
// ============================================================================

// Type alias for the generated input: flat values plus (rows, cols, block)
type DenseMatrixData = (Vec<f64>, usize, usize, usize);

/// Generate a random dense matrix with ~25% non-zero entries, plus a block
/// size that usually does not divide the shape evenly
fn dense_matrix_strategy(max_dim: usize, max_block: usize) -> impl Strategy<Value = DenseMatrixData> {
    (1..=max_dim, 1..=max_dim, 1..=max_block).prop_flat_map(|(rows, cols, block)| {
        (
            prop::collection::vec(
                prop_oneof![3 => Just(0.0), 1 => -100.0..100.0f64],
                rows * cols,
            ),
            Just(rows),
            Just(cols),
            Just(block),
        )
    })
}

fn to_array(values: &[f64], rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_vec((rows, cols), values.to_vec()).unwrap()
}

// ============================================================================
// Conversion Properties
// ============================================================================

proptest! {
    /// Property: from_dense → to_dense reproduces the matrix exactly
    #[test]
    fn prop_dense_roundtrip((values, rows, cols, block) in dense_matrix_strategy(12, 5)) {
        let dense = to_array(&values, rows, cols);
        let bcsr = BcsrMatrix::from_dense(&dense.view(), block, 0.0).unwrap();
        let recovered = bcsr.to_dense();

        for i in 0..rows {
            for j in 0..cols {
                prop_assert_eq!(dense[[i, j]], recovered[[i, j]]);
            }
        }
    }

    /// Property: nnzb matches an independent count of non-zero blocks
    #[test]
    fn prop_count_consistency((values, rows, cols, block) in dense_matrix_strategy(12, 5)) {
        let dense = to_array(&values, rows, cols);
        let bcsr = BcsrMatrix::from_dense(&dense.view(), block, 0.0).unwrap();

        prop_assert_eq!(bcsr.nnzb(), count_nonzero_blocks(&dense.view(), block, 0.0));
    }

    /// Property: row pointers are well-formed
    #[test]
    fn prop_row_ptr_well_formed((values, rows, cols, block) in dense_matrix_strategy(12, 5)) {
        let dense = to_array(&values, rows, cols);
        let bcsr = BcsrMatrix::from_dense(&dense.view(), block, 0.0).unwrap();

        let nb = rows.div_ceil(block);
        let row_ptr = bcsr.row_ptr();
        prop_assert_eq!(row_ptr.len(), nb + 1);
        prop_assert_eq!(row_ptr[0], 0);
        prop_assert_eq!(row_ptr[nb], bcsr.nnzb());
        for w in row_ptr.windows(2) {
            prop_assert!(w[0] <= w[1]);
        }
    }

    /// Property: within each block-row, column starts are strictly
    /// increasing, grid-aligned and in bounds
    #[test]
    fn prop_col_starts_ordered((values, rows, cols, block) in dense_matrix_strategy(12, 5)) {
        let dense = to_array(&values, rows, cols);
        let bcsr = BcsrMatrix::from_dense(&dense.view(), block, 0.0).unwrap();

        let row_ptr = bcsr.row_ptr();
        for block_row in 0..bcsr.num_block_rows() {
            let mut prev: Option<usize> = None;
            for b in &bcsr.blocks()[row_ptr[block_row]..row_ptr[block_row + 1]] {
                prop_assert!(b.col_start() < cols);
                prop_assert_eq!(b.col_start() % block, 0);
                if let Some(p) = prev {
                    prop_assert!(b.col_start() > p);
                }
                prev = Some(b.col_start());
            }
        }
    }

    /// Property: every stored block has a non-zero within its actual extent,
    /// and its extent equals the clipped block size
    #[test]
    fn prop_no_all_zero_blocks((values, rows, cols, block) in dense_matrix_strategy(12, 5)) {
        let dense = to_array(&values, rows, cols);
        let bcsr = BcsrMatrix::from_dense(&dense.view(), block, 0.0).unwrap();

        let row_ptr = bcsr.row_ptr();
        for block_row in 0..bcsr.num_block_rows() {
            for b in &bcsr.blocks()[row_ptr[block_row]..row_ptr[block_row + 1]] {
                prop_assert_eq!(b.height(), block.min(rows - block_row * block));
                prop_assert_eq!(b.width(), block.min(cols - b.col_start()));

                let mut any_nonzero = false;
                for r in 0..b.height() {
                    for c in 0..b.width() {
                        if b.value_at(r, c, block) != 0.0 {
                            any_nonzero = true;
                        }
                    }
                }
                prop_assert!(any_nonzero);
            }
        }
    }

    /// Property: block SpMV agrees with the dense product
    #[test]
    fn prop_spmv_matches_dense((values, rows, cols, block) in dense_matrix_strategy(10, 4)) {
        let dense = to_array(&values, rows, cols);
        let bcsr = BcsrMatrix::from_dense(&dense.view(), block, 0.0).unwrap();

        let x = Array1::from_shape_fn(cols, |j| (j as f64) - 2.5);
        let y = bcsr.spmv(&x.view()).unwrap();
        let expected = dense.dot(&x);

        for i in 0..rows {
            prop_assert!((y[i] - expected[i]).abs() < 1e-8);
        }
    }

    /// Property: the COO route and the dense route produce the same matrix
    #[test]
    fn prop_from_coo_matches_from_dense((values, rows, cols, block) in dense_matrix_strategy(10, 4)) {
        let dense = to_array(&values, rows, cols);

        let mut ti = Vec::new();
        let mut tj = Vec::new();
        let mut tv = Vec::new();
        for i in 0..rows {
            for j in 0..cols {
                if dense[[i, j]] != 0.0 {
                    ti.push(i);
                    tj.push(j);
                    tv.push(dense[[i, j]]);
                }
            }
        }

        let coo = CooMatrix::new(ti, tj, tv, (rows, cols)).unwrap();
        let from_coo = BcsrMatrix::from_coo(&coo, block).unwrap();
        let from_dense = BcsrMatrix::from_dense(&dense.view(), block, 0.0).unwrap();

        prop_assert_eq!(from_coo.nnzb(), from_dense.nnzb());
        prop_assert_eq!(from_coo.row_ptr(), from_dense.row_ptr());
        prop_assert_eq!(from_coo.col_starts(), from_dense.col_starts());

        let recovered = from_coo.to_dense();
        for i in 0..rows {
            for j in 0..cols {
                prop_assert_eq!(dense[[i, j]], recovered[[i, j]]);
            }
        }
    }
}
