//! # bcsr
//!
//! Conversion of dense and COO matrices into BCSR (Block Compressed Sparse
//! Row) form, with support for ragged edge blocks when the matrix shape is
//! not a multiple of the block size.
//!
//! This crate provides:
//! - [`BcsrMatrix`]: the format type, with dense and COO conversion,
//!   reconstruction, and block SpMV
//! - [`blocks`]: block extraction and the pre-sized block store
//! - [`coo`]: 2-D coordinate (triplet) input
//! - [`viz`]: textual dumps of a conversion result
//!
//! All array operations use `scirs2_core::ndarray_ext`.

#![deny(warnings)]

pub mod bcsr;
pub mod blocks;
pub mod coo;
pub mod error;
pub mod utils;
pub mod viz;

// Re-exports
pub use bcsr::*;
pub use blocks::*;
pub use coo::*;
pub use error::*;
