//! Identifies base pairs in nucleic acid structures.
//!
//! The crate assembles the full pair identification pipeline on top of the
//! lower level crates: per-residue reference frames fitted to the standard
//! bases, geometric validation of candidate pairs, template alignment for
//! Leontis-Westhof classification, composite quality scoring and the final
//! mutual-best selection. The [`PairFinder`](PairFinder) facade runs the whole chain over
//! one structure:
//!
//! ```no_run
//! use basepairs_chem::load_residues_from_file;
//! use basepairs_pairs::{FinderConfig, PairFinder};
//! use std::path::Path;
//!
//! let residues = load_residues_from_file(Path::new("1ehz.pdb"), None).unwrap();
//! let mut finder = PairFinder::new(FinderConfig::default());
//! let result = finder.find_pairs(&residues);
//! for pair in &result.pairs {
//!     println!("{} - {} {} score {:.3}", pair.res_id1, pair.res_id2,
//!              pair.sequence(), pair.quality_score);
//! }
//! ```

#![allow(clippy::needless_return)]

mod frame;
mod thresholds;
mod validation;
mod templates;
mod aligner;
mod scorer;
mod strategy;
mod pair_cache;
mod finder;
mod pairs_error;

pub use frame::{extract_frame, ReferenceFrame};
pub use thresholds::ValidationThresholds;
pub use validation::{GeometricValidator, ValidationResult};
pub use templates::TemplateLibrary;
pub use aligner::{AlignmentResult, ClassificationResult, TemplateAligner, LW_CLASSES};
pub use scorer::{expected_hbond_count, QualityScorer, ScoreComponents};
pub use strategy::{GreedyBestStrategy, MutualBestStrategy, SelectionResult};
pub use pair_cache::{CandidateInfo, PairCandidates};
pub use finder::{FinderConfig, FinderResult, PairFinder};
pub use pairs_error::PairsError;
