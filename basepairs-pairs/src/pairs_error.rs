use std::path::PathBuf;
use thiserror::Error;

use basepairs_chem::ChemError;

/// Errors raised at the template repository boundary.
///
/// A template that simply does not exist is not an error: lookups report it
/// as an infinite RMSD so that scoring can treat the class as a poor fit.
#[derive(Debug, Error)]
pub enum PairsError {
    /// A template file exists but could not be read
    #[error("I/O error while reading template {path}: {source}")]
    TemplateIo { path: PathBuf, source: std::io::Error },
    /// A template file parsed but did not yield the expected two residues
    #[error("Template {path} does not contain two residues")]
    InvalidTemplate { path: PathBuf },
    /// A coordinate record inside a template could not be parsed
    #[error("{0}")]
    Chem(#[from] ChemError),
}
