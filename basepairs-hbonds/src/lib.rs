//! Discovers and describes hydrogen bonds between nucleic acid residues.
//!
//! Detection is slot-based: every donor atom exposes one hydrogen slot per
//! donatable proton and every acceptor atom one slot per lone pair, each with
//! a preferred direction derived from the local covalent geometry. Candidate
//! donor-acceptor contacts are scored by how well they line up with those
//! slots and selected greedily, shortest first, while the slots keep track of
//! their own saturation and of bifurcation (one proton or lone pair shared by
//! two bonds).
//!
//! ```
//! use basepairs_chem::{standard_ring_atoms, Residue};
//! use basepairs_geometry::Vec3;
//! use basepairs_hbonds::HBondFinder;
//!
//! // guanine in the standard frame and a fake acceptor residue 2.9 A away from N1
//! let mut gua = Residue::new("A-G-1", "G");
//! for (name, pos) in standard_ring_atoms("G").unwrap() { gua.add_atom(name, *pos); }
//! let mut other = Residue::new("A-C-2", "C");
//! other.add_atom("N3", Vec3::new(-0.7, 0.641 - 2.9, 0.0));
//! other.add_atom("C2", Vec3::new(-1.9, 0.641 - 3.5, 0.0));
//! other.add_atom("C4", Vec3::new(0.5, 0.641 - 3.5, 0.0));
//!
//! let mut finder = HBondFinder::new();
//! let bonds = finder.find_between(&gua, &other);
//! assert!(bonds.iter().any(|hb| hb.donor_atom == "N1" && hb.acceptor_atom == "N3"));
//! ```

#![allow(clippy::needless_return)]

mod slots;
mod slot_geometry;
mod finder;
mod extended;

pub use slots::Slot;
pub use slot_geometry::{compute_base_normal, predict_h_slots, predict_lp_slots};
pub use finder::{HBond, HBondCandidate, HBondFinder};
pub use extended::{find_extended_hbonds, merge_extended_hbonds, EXTENDED_MAX_DISTANCE, EXTENDED_MIN_ALIGNMENT};

/// Default maximum donor-acceptor distance to still record a hydrogen bond (Angstroms)
pub const MAX_DONOR_ACCEPTOR_DISTANCE: f64 = 4.0;

/// Default minimum summed slot-alignment score (on the -2..2 scale) for a non-bifurcated bond
pub const MIN_ALIGNMENT: f64 = 0.3;

/// Default minimum angle between two bonds sharing one slot (degrees)
pub const MIN_BIFURCATION_ANGLE: f64 = 45.0;

/// Default, stricter alignment floor applied to bifurcated bonds
pub const MIN_BIFURCATION_ALIGNMENT: f64 = 0.5;

/// Below this donor-acceptor distance the alignment floor is waived (Angstroms)
pub const SHORT_DISTANCE_THRESHOLD: f64 = 3.2;
