//! Spatial indexing for neighbor searches over residue reference frames.
//!
//! Provides a generic binary tree node and, built on top of it, a 3D k-d
//! tree over labeled points. The pair finding pipeline indexes every
//! residue's frame origin once and then asks for all neighbors within a
//! distance cutoff instead of scanning every residue pair.

mod tree;
pub use tree::*;

pub mod kd_tree;
