//! Geometric primitives for the base pair identification crates.
//!
//! The crate provides a small, self-contained toolbox for the numerical work
//! the pair finding pipeline needs: a [`Vec3`](Vec3) type with in-place operators,
//! a row-major [`Matrix3x3`](Matrix3x3), Rodrigues rotation about an arbitrary axis
//! and the Kabsch superposition used both for reference frame fitting and
//! template alignment.
//!
//! # Superimposing point sets
//! ```
//! use basepairs_geometry::{kabsch, rmsd, Vec3};
//! let source = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
//! // same shape, translated by 5 along x
//! let target = vec![Vec3::new(5.0, 0.0, 0.0), Vec3::new(6.0, 0.0, 0.0), Vec3::new(5.0, 1.0, 0.0)];
//! let sup = kabsch(&source, &target).unwrap();
//! let moved: Vec<Vec3> = source.iter().map(|p| sup.transform(p)).collect();
//! assert!(rmsd(&moved, &target) < 1e-9);
//! ```

#![allow(clippy::needless_return)]

mod vec3;
mod matrix;
mod rototranslation;
mod kabsch;
mod assertions;

pub use vec3::{Vec3, angle_between_deg};
pub use matrix::Matrix3x3;
pub use rototranslation::rotate_about_axis;
pub use kabsch::{kabsch, rmsd, Superposition};
