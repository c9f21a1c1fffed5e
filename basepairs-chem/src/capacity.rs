use std::collections::{HashMap, HashSet};
use once_cell::sync::Lazy;

/// How many hydrogens each donor atom can donate, keyed by base letter and atom name.
///
/// Amino groups (N6, N4, N2) carry two hydrogens, imino nitrogens and the
/// ribose hydroxyl carry one.
const DONOR_ENTRIES: &[(&str, &str, usize)] = &[
    // --- amino NH2 groups
    ("A", "N6", 2), ("C", "N4", 2), ("G", "N2", 2),
    // --- imino NH
    ("G", "N1", 1), ("U", "N3", 1), ("T", "N3", 1),
    // --- ribose O2' hydroxyl
    ("A", "O2'", 1), ("G", "O2'", 1), ("C", "O2'", 1), ("U", "O2'", 1), ("T", "O2'", 1),
    ("P", "O2'", 1), ("I", "O2'", 1),
    // --- pseudouridine
    ("P", "N1", 1), ("P", "N3", 1),
    // --- inosine
    ("I", "N1", 1),
    // --- DNA bases (deoxyribose, no O2')
    ("DA", "N6", 2), ("DG", "N1", 1), ("DG", "N2", 2), ("DC", "N4", 2), ("DT", "N3", 1),
];

/// How many lone pairs each acceptor atom offers, keyed by base letter and atom name.
const ACCEPTOR_ENTRIES: &[(&str, &str, usize)] = &[
    // --- sp2 carbonyl oxygens
    ("G", "O6", 2), ("U", "O2", 2), ("U", "O4", 2), ("C", "O2", 2), ("T", "O2", 2), ("T", "O4", 2),
    // --- sp2 ring nitrogens
    ("A", "N1", 1), ("A", "N3", 1), ("A", "N7", 1),
    ("G", "N3", 1), ("G", "N7", 1), ("C", "N3", 1),
    // --- ribose oxygens
    ("A", "O2'", 2), ("G", "O2'", 2), ("C", "O2'", 2), ("U", "O2'", 2),
    ("A", "O4'", 1), ("G", "O4'", 1), ("C", "O4'", 1), ("U", "O4'", 1), ("T", "O4'", 1),
    // --- phosphate oxygens, both OP1/OP2 and the legacy O1P/O2P spelling
    ("A", "OP1", 3), ("G", "OP1", 3), ("C", "OP1", 3), ("U", "OP1", 3),
    ("A", "OP2", 3), ("G", "OP2", 3), ("C", "OP2", 3), ("U", "OP2", 3),
    ("A", "O1P", 3), ("G", "O1P", 3), ("C", "O1P", 3), ("U", "O1P", 3),
    ("A", "O2P", 3), ("G", "O2P", 3), ("C", "O2P", 3), ("U", "O2P", 3),
    // --- pseudouridine
    ("P", "O2", 2), ("P", "O4", 2), ("P", "O2'", 2), ("P", "O4'", 1),
    ("P", "OP1", 3), ("P", "OP2", 3), ("P", "O1P", 3), ("P", "O2P", 3),
    // --- inosine
    ("I", "O6", 2), ("I", "N3", 1), ("I", "N7", 1), ("I", "O2'", 2), ("I", "O4'", 1),
    ("I", "OP1", 3), ("I", "OP2", 3), ("I", "O1P", 3), ("I", "O2P", 3),
    // --- DNA bases
    ("DA", "N1", 1), ("DA", "N3", 1), ("DA", "N7", 1), ("DA", "O4'", 1),
    ("DA", "OP1", 3), ("DA", "OP2", 3), ("DA", "O1P", 3), ("DA", "O2P", 3),
    ("DG", "O6", 2), ("DG", "N3", 1), ("DG", "N7", 1), ("DG", "O4'", 1),
    ("DG", "OP1", 3), ("DG", "OP2", 3), ("DG", "O1P", 3), ("DG", "O2P", 3),
    ("DC", "O2", 2), ("DC", "N3", 1), ("DC", "O4'", 1),
    ("DC", "OP1", 3), ("DC", "OP2", 3), ("DC", "O1P", 3), ("DC", "O2P", 3),
    ("DT", "O2", 2), ("DT", "O4", 2), ("DT", "O4'", 1),
];

/// Atoms covalently bonded to each donor/acceptor; their positions direct the
/// hydrogen and lone pair slots.
const CONNECTIVITY_ENTRIES: &[(&str, &str, &[&str])] = &[
    // --- adenine
    ("A", "N6", &["C6"]), ("A", "N1", &["C2", "C6"]), ("A", "N3", &["C2", "C4"]), ("A", "N7", &["C5", "C8"]),
    // --- guanine
    ("G", "N1", &["C2", "C6"]), ("G", "N2", &["C2"]), ("G", "O6", &["C6"]),
    ("G", "N3", &["C2", "C4"]), ("G", "N7", &["C5", "C8"]),
    // --- cytosine
    ("C", "N4", &["C4"]), ("C", "N3", &["C2", "C4"]), ("C", "O2", &["C2"]),
    // --- uracil and thymine
    ("U", "N3", &["C2", "C4"]), ("U", "O2", &["C2"]), ("U", "O4", &["C4"]),
    ("T", "N3", &["C2", "C4"]), ("T", "O2", &["C2"]), ("T", "O4", &["C4"]),
    // --- pseudouridine
    ("P", "N1", &["C2", "C6"]), ("P", "N3", &["C2", "C4"]), ("P", "O2", &["C2"]), ("P", "O4", &["C4"]),
    // --- inosine
    ("I", "N1", &["C2", "C6"]), ("I", "O6", &["C6"]), ("I", "N3", &["C2", "C4"]), ("I", "N7", &["C5", "C8"]),
    // --- ribose and backbone oxygens, common to all ribonucleotides
    ("A", "O2'", &["C2'"]), ("G", "O2'", &["C2'"]), ("C", "O2'", &["C2'"]),
    ("U", "O2'", &["C2'"]), ("T", "O2'", &["C2'"]), ("P", "O2'", &["C2'"]), ("I", "O2'", &["C2'"]),
    ("A", "O4'", &["C1'", "C4'"]), ("G", "O4'", &["C1'", "C4'"]), ("C", "O4'", &["C1'", "C4'"]),
    ("U", "O4'", &["C1'", "C4'"]), ("T", "O4'", &["C1'", "C4'"]),
    ("P", "O4'", &["C1'", "C4'"]), ("I", "O4'", &["C1'", "C4'"]),
    ("A", "O3'", &["C3'"]), ("G", "O3'", &["C3'"]), ("C", "O3'", &["C3'"]),
    ("U", "O3'", &["C3'"]), ("T", "O3'", &["C3'"]), ("P", "O3'", &["C3'"]), ("I", "O3'", &["C3'"]),
    ("A", "O5'", &["C5'"]), ("G", "O5'", &["C5'"]), ("C", "O5'", &["C5'"]),
    ("U", "O5'", &["C5'"]), ("T", "O5'", &["C5'"]), ("P", "O5'", &["C5'"]), ("I", "O5'", &["C5'"]),
    // --- DNA bases
    ("DA", "N6", &["C6"]), ("DA", "N1", &["C2", "C6"]), ("DA", "N3", &["C2", "C4"]), ("DA", "N7", &["C5", "C8"]),
    ("DG", "N1", &["C2", "C6"]), ("DG", "N2", &["C2"]), ("DG", "O6", &["C6"]),
    ("DG", "N3", &["C2", "C4"]), ("DG", "N7", &["C5", "C8"]),
    ("DC", "N4", &["C4"]), ("DC", "N3", &["C2", "C4"]), ("DC", "O2", &["C2"]),
    ("DT", "N3", &["C2", "C4"]), ("DT", "O2", &["C2"]), ("DT", "O4", &["C4"]),
    ("DA", "O4'", &["C1'", "C4'"]), ("DG", "O4'", &["C1'", "C4'"]),
    ("DC", "O4'", &["C1'", "C4'"]), ("DT", "O4'", &["C1'", "C4'"]),
    ("DA", "O3'", &["C3'"]), ("DG", "O3'", &["C3'"]), ("DC", "O3'", &["C3'"]), ("DT", "O3'", &["C3'"]),
    ("DA", "O5'", &["C5'"]), ("DG", "O5'", &["C5'"]), ("DC", "O5'", &["C5'"]), ("DT", "O5'", &["C5'"]),
];

static DONOR_CAPACITY: Lazy<HashMap<&'static str, HashMap<&'static str, usize>>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, HashMap<&'static str, usize>> = HashMap::new();
    for &(base, atom, n) in DONOR_ENTRIES {
        map.entry(base).or_default().insert(atom, n);
    }
    map
});

static ACCEPTOR_CAPACITY: Lazy<HashMap<&'static str, HashMap<&'static str, usize>>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, HashMap<&'static str, usize>> = HashMap::new();
    for &(base, atom, n) in ACCEPTOR_ENTRIES {
        map.entry(base).or_default().insert(atom, n);
    }
    map
});

static CONNECTIVITY: Lazy<HashMap<&'static str, HashMap<&'static str, &'static [&'static str]>>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, HashMap<&'static str, &'static [&'static str]>> = HashMap::new();
    for &(base, atom, antecedents) in CONNECTIVITY_ENTRIES {
        map.entry(base).or_default().insert(atom, antecedents);
    }
    map
});

/// Nitrogen and oxygen atoms of the nucleobase itself; contacts between two of
/// these atoms within a single residue are covalent, not hydrogen bonds.
static BASE_ATOMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["N1", "N2", "N3", "N4", "N6", "N7", "N9", "O2", "O4", "O6"])
});

/// The number of hydrogens a donor atom can donate, or `None` if the atom is not a donor.
pub fn donor_capacity(base_type: &str, atom_name: &str) -> Option<usize> {
    DONOR_CAPACITY.get(base_type).and_then(|m| m.get(atom_name)).copied()
}

/// The number of lone pairs an acceptor atom offers, or `None` if the atom is not an acceptor.
pub fn acceptor_capacity(base_type: &str, atom_name: &str) -> Option<usize> {
    ACCEPTOR_CAPACITY.get(base_type).and_then(|m| m.get(atom_name)).copied()
}

/// Names of the atoms covalently bonded to a given donor or acceptor.
pub fn connectivity(base_type: &str, atom_name: &str) -> Option<&'static [&'static str]> {
    CONNECTIVITY.get(base_type).and_then(|m| m.get(atom_name)).copied()
}

/// All `(base, atom)` pairs known to the donor table
pub fn donor_keys() -> impl Iterator<Item = (&'static str, &'static str)> {
    DONOR_ENTRIES.iter().map(|&(base, atom, _)| (base, atom))
}

/// All `(base, atom)` pairs known to the acceptor table
pub fn acceptor_keys() -> impl Iterator<Item = (&'static str, &'static str)> {
    ACCEPTOR_ENTRIES.iter().map(|&(base, atom, _)| (base, atom))
}

/// True for nitrogen/oxygen atoms that belong to the nucleobase ring system
pub fn is_base_atom(atom_name: &str) -> bool { BASE_ATOMS.contains(atom_name) }

/// True for the anionic phosphate oxygens, in either spelling convention
pub fn is_phosphate_oxygen(atom_name: &str) -> bool {
    matches!(atom_name, "OP1" | "OP2" | "O1P" | "O2P")
}

/// True for the sugar oxygens of a (deoxy)ribose
pub fn is_ribose_oxygen(atom_name: &str) -> bool {
    matches!(atom_name, "O2'" | "O3'" | "O4'" | "O5'")
}

/// Ring atoms of a purine base, in the order used for template fitting
pub const PURINE_RING_ATOMS: [&str; 9] = ["N9", "C8", "N7", "C5", "C6", "N1", "C2", "N3", "C4"];

/// Ring atoms of a pyrimidine base, in the order used for template fitting
pub const PYRIMIDINE_RING_ATOMS: [&str; 6] = ["N1", "C2", "N3", "C4", "C5", "C6"];

/// Name of the glycosidic nitrogen: N9 for purines, N1 for pyrimidines.
///
/// Returns `None` for unrecognized base letters.
/// ```
/// use basepairs_chem::glycosidic_nitrogen;
/// assert_eq!(glycosidic_nitrogen("G"), Some("N9"));
/// assert_eq!(glycosidic_nitrogen("U"), Some("N1"));
/// assert_eq!(glycosidic_nitrogen("X"), None);
/// ```
pub fn glycosidic_nitrogen(base_type: &str) -> Option<&'static str> {
    match base_type {
        "A" | "G" | "I" | "DA" | "DG" => Some("N9"),
        "C" | "U" | "T" | "P" | "DC" | "DT" => Some("N1"),
        _ => None,
    }
}
