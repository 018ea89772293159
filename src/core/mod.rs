//! Core module has common/shared math and the scaled coordinate model.

pub mod math;
