use std::collections::HashMap;
use std::fmt;

use basepairs_geometry::Vec3;

use crate::capacity::{glycosidic_nitrogen, PURINE_RING_ATOMS, PYRIMIDINE_RING_ATOMS};

/// A nucleotide residue: an opaque identifier, a parent base letter and a map
/// of atom names to Cartesian positions.
///
/// Atomic content is immutable once a residue has been assembled by a parser;
/// hydrogen/lone-pair slot caches live in the detector, not here, so a residue
/// may be shared freely between detector runs.
///
/// # Example
/// ```
/// use basepairs_chem::Residue;
/// use basepairs_geometry::Vec3;
/// let mut res = Residue::new("A-G-1", "G");
/// res.add_atom("N1", Vec3::new(-0.7, 0.641, 0.0));
/// assert!(res.has_atom("N1"));
/// assert_eq!(res.count_atoms(), 1);
/// ```
#[derive(Clone)]
pub struct Residue {
    res_id: String,
    base_type: String,
    code3: String,
    atoms: HashMap<String, Vec3>,
}

impl fmt::Debug for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Residue({}, {}, {} atoms)", self.res_id, self.base_type, self.atoms.len())
    }
}

impl Residue {

    /// Creates an empty residue for a given identifier and parent base letter.
    pub fn new(res_id: &str, base_type: &str) -> Residue {
        Residue {
            res_id: res_id.to_string(),
            base_type: base_type.to_string(),
            code3: base_type.to_string(),
            atoms: HashMap::new(),
        }
    }

    /// Creates an empty residue, also recording the residue name as deposited (e.g. `2MG`).
    pub fn with_code3(res_id: &str, base_type: &str, code3: &str) -> Residue {
        let mut res = Residue::new(res_id, base_type);
        res.code3 = code3.to_string();
        return res;
    }

    /// The opaque identifier of this residue
    pub fn res_id(&self) -> &str { &self.res_id }

    /// The canonical parent base letter, e.g. `G` for a 2MG residue
    pub fn base_type(&self) -> &str { &self.base_type }

    /// The residue name as deposited in the coordinate file
    pub fn code3(&self) -> &str { &self.code3 }

    /// Adds an atom; an atom of the same name that is already present is replaced
    pub fn add_atom(&mut self, name: &str, pos: Vec3) {
        self.atoms.insert(name.trim().to_string(), pos);
    }

    /// Position of a named atom, if present
    pub fn atom(&self, name: &str) -> Option<&Vec3> { self.atoms.get(name) }

    /// Checks whether a named atom is present
    pub fn has_atom(&self, name: &str) -> bool { self.atoms.contains_key(name) }

    /// All atoms of this residue
    pub fn atoms(&self) -> &HashMap<String, Vec3> { &self.atoms }

    /// The number of atoms in this residue
    pub fn count_atoms(&self) -> usize { self.atoms.len() }

    /// Position of the glycosidic nitrogen: N9 for purines, N1 for pyrimidines.
    pub fn glycosidic_n(&self) -> Option<&Vec3> {
        glycosidic_nitrogen(&self.base_type).and_then(|name| self.atoms.get(name))
    }

    /// Ring atoms present in this residue, as `(name, position)` pairs in the canonical order.
    ///
    /// Purines report up to nine atoms, pyrimidines up to six; atoms missing
    /// from the structure are simply skipped.
    pub fn ring_atoms(&self) -> Vec<(&str, Vec3)> {
        let names: &[&str] = if is_purine(&self.base_type) { &PURINE_RING_ATOMS } else { &PYRIMIDINE_RING_ATOMS };
        let mut out = vec![];
        for name in names {
            if let Some(pos) = self.atoms.get(*name) {
                out.push((*name, *pos));
            }
        }
        return out;
    }
}

/// Checks if a base letter denotes a purine (A, G, I and the DNA variants)
pub fn is_purine(base_type: &str) -> bool {
    matches!(base_type, "A" | "G" | "I" | "DA" | "DG")
}

/// Checks if a base letter denotes a pyrimidine (C, U, T, pseudouridine and the DNA variants)
pub fn is_pyrimidine(base_type: &str) -> bool {
    matches!(base_type, "C" | "U" | "T" | "P" | "DC" | "DT")
}

/// Normalizes a residue name to its canonical parent base letter.
///
/// Standard letters and the DNA variants pass through unchanged. Other names
/// are resolved through the caller-supplied registry of modified nucleotides
/// (3-letter code to parent letter); when that fails, the first letter is
/// used if it denotes a standard base, otherwise the name is returned as-is.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use basepairs_chem::parent_base_type;
/// let registry = HashMap::from([("2MG".to_string(), "G".to_string())]);
/// assert_eq!(parent_base_type("2MG", Some(&registry)), "G");
/// assert_eq!(parent_base_type("DG", None), "DG");
/// assert_eq!(parent_base_type("U", None), "U");
/// ```
pub fn parent_base_type(residue_name: &str, registry: Option<&HashMap<String, String>>) -> String {

    let name = residue_name.trim().to_uppercase();

    if is_purine(&name) || is_pyrimidine(&name) || name == "I" || name == "P" {
        return name;
    }

    if let Some(map) = registry {
        if let Some(parent) = map.get(&name) {
            return parent.clone();
        }
    }

    if let Some(first) = name.get(0..1) {
        if is_purine(first) || is_pyrimidine(first) {
            return first.to_string();
        }
    }

    return name;
}
