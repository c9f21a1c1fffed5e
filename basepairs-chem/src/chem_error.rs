use thiserror::Error;

/// Errors reported while reading coordinate records.
#[derive(Debug, Error)]
pub enum ChemError {
    /// An `ATOM`/`HETATM` record that is too short or carries unparsable fields
    #[error("Invalid coordinate record: {line}")]
    InvalidAtomLine { line: String },
    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
