//! Dense → BCSR conversion demo
//!
//! Converts a small hardcoded matrix to BCSR and dumps the resulting
//! structures, then runs the same conversion from COO triplets.
//!
//! Run with: cargo run --example convert_demo

use bcsr::utils::{dense_from_rows, BlockStats};
use bcsr::{viz, BcsrMatrix, CooMatrix};

fn main() -> anyhow::Result<()> {
    println!("=== BCSR: Dense Conversion Demo ===\n");

    // 1. Convert a 4x4 matrix with 2x2 blocks
    let dense = dense_from_rows(vec![
        vec![1.0, 4.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 2.0],
        vec![0.0, 0.0, 3.0, 0.0],
        vec![0.0, 0.0, 0.0, 1.0],
    ])?;

    let bcsr = BcsrMatrix::from_dense(&dense.view(), 2, 0.0)?;
    println!("{}", viz::dump(&dense.view(), &bcsr));
    println!("{}", viz::ascii_block_pattern(&bcsr));

    // 2. A ragged shape: 3x3 with 2x2 blocks clips the edge blocks
    println!("=== Ragged 3x3 matrix, block size 2 ===\n");
    let ragged = dense_from_rows(vec![
        vec![1.0, 0.0, 2.0],
        vec![0.0, 0.0, 0.0],
        vec![0.0, 5.0, 3.0],
    ])?;

    let ragged_bcsr = BcsrMatrix::from_dense(&ragged.view(), 2, 0.0)?;
    println!("{}", viz::dump(&ragged.view(), &ragged_bcsr));

    // 3. The same conversion starting from COO triplets
    println!("=== COO -> BCSR (6x6, block size 2) ===\n");
    let coo = CooMatrix::new(
        vec![0, 0, 1, 1, 2, 2, 2, 3, 4, 4],
        vec![0, 1, 2, 4, 0, 3, 4, 3, 1, 2],
        vec![0.1, 0.2, 0.3, 0.5, 0.1, 0.4, 0.5, 0.4, 0.2, 0.3],
        (6, 6),
    )?;

    let from_coo = BcsrMatrix::from_coo(&coo, 2)?;
    println!("{}", viz::ascii_block_pattern(&from_coo));

    let stats = BlockStats::from_bcsr(&from_coo);
    println!(
        "nnzb = {} of {} block slots ({:.1}% occupied)",
        stats.nnzb,
        stats.total_blocks,
        stats.block_density * 100.0
    );

    Ok(())
}
