//! Command handlers for the croptree binary.

pub mod apply;
pub mod common;
pub mod tree;
