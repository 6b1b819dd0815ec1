//! Textual rendering of BCSR structures
//!
//! Read-only reporting over a conversion result: a full dump of the matrix
//! and its block decomposition, and a compact ASCII view of the block grid.
//!
//! # Examples
//!
//! ```
//! use scirs2_core::ndarray_ext::array;
//! use bcsr::{viz, BcsrMatrix};
//!
//! let dense = array![[1.0, 0.0], [0.0, 0.0]];
//! let bcsr = BcsrMatrix::from_dense(&dense.view(), 1, 0.0).unwrap();
//!
//! let report = viz::dump(&dense.view(), &bcsr);
//! assert!(report.contains("nnzb = 1"));
//!
//! let pattern = viz::ascii_block_pattern(&bcsr);
//! assert!(pattern.contains('█'));
//! assert!(pattern.contains('·'));
//! ```

use crate::bcsr::BcsrMatrix;
use scirs2_core::ndarray_ext::ArrayView2;
use scirs2_core::numeric::Float;
use std::fmt::{Display, Write};

/// Render the matrix, block list, row pointers and column starts
///
/// Consumes the bundle and the original matrix read-only; the caller keeps
/// both.
pub fn dump<T: Float + Display>(dense: &ArrayView2<T>, bcsr: &BcsrMatrix<T>) -> String {
    let mut out = String::new();
    let b = bcsr.block_size();

    let _ = writeln!(
        out,
        "*** Matrix ({} x {}) ***",
        dense.nrows(),
        dense.ncols()
    );
    for i in 0..dense.nrows() {
        out.push('[');
        for j in 0..dense.ncols() {
            if j > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", dense[[i, j]]);
        }
        out.push_str("]\n");
    }

    let _ = writeln!(out, "*** Non-zero blocks (nnzb = {}) ***", bcsr.nnzb());
    for block_row in 0..bcsr.num_block_rows() {
        let start = bcsr.row_ptr()[block_row];
        let end = bcsr.row_ptr()[block_row + 1];

        for (idx, block) in bcsr.blocks()[start..end].iter().enumerate() {
            let _ = write!(
                out,
                "block {}: row {}, col {}, size {} x {}, values [",
                start + idx,
                block_row * b,
                block.col_start(),
                block.height(),
                block.width()
            );
            for (k, v) in block.data().iter().enumerate() {
                if k > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{v}");
            }
            out.push_str("]\n");
        }
    }

    let _ = writeln!(out, "*** Block row pointers ***");
    let _ = writeln!(out, "{:?}", bcsr.row_ptr());

    let _ = writeln!(out, "*** Column starts ***");
    let _ = writeln!(out, "{:?}", bcsr.col_starts());

    out
}

/// ASCII view of the block grid: '█' for a stored block, '·' for an empty slot
pub fn ascii_block_pattern<T: Float>(bcsr: &BcsrMatrix<T>) -> String {
    let (nb_rows, nb_cols) = (bcsr.num_block_rows(), bcsr.num_block_cols());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Block pattern ({} x {} blocks of {}, {:.2}% occupied)",
        nb_rows,
        nb_cols,
        bcsr.block_size(),
        bcsr.block_density() * 100.0
    );

    for block_row in 0..nb_rows {
        out.push('│');
        for block_col in 0..nb_cols {
            out.push(if bcsr.get_block(block_row, block_col).is_some() {
                '█'
            } else {
                '·'
            });
        }
        out.push('│');
        out.push('\n');
    }

    out
}
