//! Chemistry-aware building blocks for nucleic acid pair identification.
//!
//! The crate provides the [`Residue`](Residue) model consumed by the detection pipeline,
//! the static donor/acceptor capacity and connectivity tables, the standard
//! base geometry used for reference frame fitting, and a minimal reader for
//! PDB-format coordinate records.
//!
//! # Capacity lookups
//! ```
//! use basepairs_chem::{acceptor_capacity, connectivity, donor_capacity};
//! // the amino group of adenine donates two hydrogens
//! assert_eq!(donor_capacity("A", "N6"), Some(2));
//! // the carbonyl oxygen of guanine accepts on two lone pairs
//! assert_eq!(acceptor_capacity("G", "O6"), Some(2));
//! // O6 is bonded to C6, which directs the lone pairs
//! assert_eq!(connectivity("G", "O6"), Some(&["C6"][..]));
//! ```

#![allow(clippy::needless_return)]

mod residue;
mod capacity;
mod standard_bases;
mod load_pdb;
mod chem_error;

pub use residue::{Residue, is_purine, is_pyrimidine, parent_base_type};
pub use capacity::*;
pub use standard_bases::standard_ring_atoms;
pub use load_pdb::{load_residues, load_residues_from_file, parse_atom_line, PdbAtomLine};
pub use chem_error::ChemError;
