use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;

use basepairs_chem::parse_atom_line;
use basepairs_geometry::Vec3;

use crate::pairs_error::PairsError;

/// Atom maps of the two residues of a base pair template.
pub type TemplateAtoms = (HashMap<String, Vec3>, HashMap<String, Vec3>);

/// Repository of base pair template coordinates.
///
/// Templates are two-residue PDB files keyed by sequence and Leontis-Westhof
/// class, spread over a directory of idealized pairs (one subdirectory per
/// class) and a flat directory of exemplars with several naming conventions.
/// Parsed templates are cached by path, so repeated classification of many
/// pairs reads each file once.
pub struct TemplateLibrary {
    idealized_dir: PathBuf,
    exemplar_dir: PathBuf,
    cache: HashMap<PathBuf, TemplateAtoms>,
}

impl TemplateLibrary {

    /// Creates a library looking up templates in the two given directories.
    pub fn new(idealized_dir: &Path, exemplar_dir: &Path) -> TemplateLibrary {
        TemplateLibrary {
            idealized_dir: idealized_dir.to_path_buf(),
            exemplar_dir: exemplar_dir.to_path_buf(),
            cache: HashMap::new(),
        }
    }

    /// Locates the template file for a sequence and LW class, if any exists.
    ///
    /// The filename patterns are probed in a fixed order: the idealized
    /// layouts `{lw}/{seq}.pdb` and `{lw}/{seq0}_{seq1,lowercase}.pdb`, then
    /// the exemplar spellings `{seq0}-{seq1}-{lw}.pdb`,
    /// `{seq0}plus{seq1}-{lw}.pdb`, `{seq0,lowercase}-{seq1}-{lw}.pdb` and
    /// `{seq}-{lw}.pdb`.
    pub fn find_template(&self, sequence: &str, lw_class: &str) -> Option<PathBuf> {

        let mut chars = sequence.chars();
        let first = chars.next()?;
        let second = chars.next()?;

        let candidates = [
            self.idealized_dir.join(lw_class).join(format!("{}.pdb", sequence)),
            self.idealized_dir.join(lw_class).join(format!("{}_{}.pdb", first, second.to_lowercase())),
            self.exemplar_dir.join(format!("{}-{}-{}.pdb", first, second, lw_class)),
            self.exemplar_dir.join(format!("{}plus{}-{}.pdb", first, second, lw_class)),
            self.exemplar_dir.join(format!("{}-{}-{}.pdb", first.to_lowercase(), second, lw_class)),
            self.exemplar_dir.join(format!("{}-{}.pdb", sequence, lw_class)),
        ];

        for path in candidates {
            if path.exists() { return Some(path); }
        }
        return None;
    }

    /// Reads (or retrieves from the cache) the atom maps of a template.
    pub fn load_template(&mut self, path: &Path) -> Result<&TemplateAtoms, PairsError> {

        if !self.cache.contains_key(path) {
            let parsed = parse_template_pdb(path)?;
            debug!("Loaded template {} ({} + {} atoms)", path.display(), parsed.0.len(), parsed.1.len());
            self.cache.insert(path.to_path_buf(), parsed);
        }
        return Ok(&self.cache[path]);
    }
}

/// Parses a two-residue template PDB file.
///
/// Residue 1 carries sequence number 1, residue 2 sequence number 2; any
/// other record is ignored.
fn parse_template_pdb(path: &Path) -> Result<TemplateAtoms, PairsError> {

    let file = File::open(path).map_err(|source| PairsError::TemplateIo { path: path.to_path_buf(), source })?;
    let reader = BufReader::new(file);

    let mut res1_atoms: HashMap<String, Vec3> = HashMap::new();
    let mut res2_atoms: HashMap<String, Vec3> = HashMap::new();

    for line in reader.lines() {
        let line = line.map_err(|source| PairsError::TemplateIo { path: path.to_path_buf(), source })?;
        if !line.starts_with("ATOM") && !line.starts_with("HETATM") { continue; }
        let atom = parse_atom_line(&line)?;
        match atom.res_seq {
            1 => { res1_atoms.entry(atom.atom_name).or_insert(atom.pos); }
            2 => { res2_atoms.entry(atom.atom_name).or_insert(atom.pos); }
            _ => {}
        }
    }

    if res1_atoms.is_empty() || res2_atoms.is_empty() {
        return Err(PairsError::InvalidTemplate { path: path.to_path_buf() });
    }
    return Ok((res1_atoms, res2_atoms));
}
