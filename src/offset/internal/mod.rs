//! Internal offset modules made public for benchmarking and testing
//! purposes. The public functions in [`crate::offset`] wrap these with the
//! usual resolve and recombine steps.

pub mod raw_offset;
pub mod variable_offset;

pub use raw_offset::safety_offset;
