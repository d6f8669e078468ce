//! Shared building blocks for the hough workspace: a row-major matrix
//! buffer and the array helpers the detection pipeline leans on.

pub mod array_ops;
pub mod buffer2;

pub use array_ops::{amax, cat_columns};
pub use buffer2::Buffer2;
