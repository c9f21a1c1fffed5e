use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use basepairs_geometry::Vec3;

use crate::chem_error::ChemError;
use crate::residue::{parent_base_type, Residue};

/// Fields of a single `ATOM` / `HETATM` coordinate record.
#[derive(Debug, Clone)]
pub struct PdbAtomLine {
    pub atom_name: String,
    pub alt_loc: char,
    pub res_name: String,
    pub chain_id: String,
    pub res_seq: i32,
    pub i_code: char,
    pub pos: Vec3,
}

fn field(line: &str, begin: usize, end: usize) -> &str {
    line.get(begin..end.min(line.len())).unwrap_or("")
}

/// Parses a fixed-column `ATOM` or `HETATM` record.
///
/// Only the fields the pair finding pipeline consumes are extracted: atom
/// name, alternate location, residue name, chain, sequence number, insertion
/// code and coordinates.
///
/// # Example
/// ```
/// use basepairs_chem::parse_atom_line;
/// let line = "ATOM      2  C1'   G A   1      52.241  47.733  47.268  1.00 39.61           C";
/// let atom = parse_atom_line(line).unwrap();
/// assert_eq!(atom.atom_name, "C1'");
/// assert_eq!(atom.res_name, "G");
/// assert_eq!(atom.chain_id, "A");
/// assert_eq!(atom.res_seq, 1);
/// assert!((atom.pos.x - 52.241).abs() < 1e-9);
/// ```
pub fn parse_atom_line(line: &str) -> Result<PdbAtomLine, ChemError> {

    if line.len() < 54 {
        return Err(ChemError::InvalidAtomLine { line: line.to_string() });
    }

    let bad_line = || ChemError::InvalidAtomLine { line: line.to_string() };

    let x: f64 = field(line, 30, 38).trim().parse().map_err(|_| bad_line())?;
    let y: f64 = field(line, 38, 46).trim().parse().map_err(|_| bad_line())?;
    let z: f64 = field(line, 46, 54).trim().parse().map_err(|_| bad_line())?;
    let res_seq: i32 = field(line, 22, 26).trim().parse().map_err(|_| bad_line())?;

    Ok(PdbAtomLine {
        atom_name: field(line, 12, 16).trim().to_string(),
        alt_loc: line.chars().nth(16).unwrap_or(' '),
        res_name: field(line, 17, 20).trim().to_string(),
        chain_id: field(line, 21, 22).trim().to_string(),
        res_seq,
        i_code: line.chars().nth(26).unwrap_or(' '),
        pos: Vec3::new(x, y, z),
    })
}

fn is_coordinate_record(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETATM")
}

/// Reads residues from PDB-format coordinate records.
///
/// Atoms are grouped by chain, sequence number and insertion code; the residue
/// identifier becomes `chain-parent-seq[icode]`, e.g. `A-G-1`. Residue names
/// are normalized to a parent base letter through the optional registry of
/// modified nucleotides. Only the first conformer of each atom is kept:
/// an alternate location for an atom already present is skipped.
///
/// Unparsable records abort the whole read, so one structure never yields a
/// silently truncated residue set.
pub fn load_residues<R: BufRead>(reader: R, registry: Option<&HashMap<String, String>>) -> Result<Vec<Residue>, ChemError> {

    let mut residues: Vec<Residue> = vec![];
    let mut last_key: Option<(String, i32, char)> = None;

    for line in reader.lines() {
        let line = line?;
        if !is_coordinate_record(&line) { continue; }
        let atom = parse_atom_line(&line)?;

        let key = (atom.chain_id.clone(), atom.res_seq, atom.i_code);
        if last_key.as_ref() != Some(&key) {
            let base_type = parent_base_type(&atom.res_name, registry);
            let i_code = if atom.i_code == ' ' { String::new() } else { atom.i_code.to_string() };
            let res_id = format!("{}-{}-{}{}", atom.chain_id, base_type, atom.res_seq, i_code);
            residues.push(Residue::with_code3(&res_id, &base_type, &atom.res_name));
            last_key = Some(key);
        }

        let current = residues.last_mut().unwrap();
        if current.has_atom(&atom.atom_name) {
            debug!("Skipping alternate location {} for atom {} of {}", atom.alt_loc, atom.atom_name, current.res_id());
            continue;
        }
        current.add_atom(&atom.atom_name, atom.pos);
    }

    return Ok(residues);
}

/// Reads residues from a PDB-format file; see [`load_residues()`](load_residues()).
pub fn load_residues_from_file(path: &Path, registry: Option<&HashMap<String, String>>) -> Result<Vec<Residue>, ChemError> {
    debug!("Reading residues from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    return load_residues(reader, registry);
}
