use std::collections::HashMap;
use once_cell::sync::Lazy;

use basepairs_geometry::Vec3;

// Ring atom coordinates of the standard bases in the standard reference frame
// (Olson et al., J Mol Biol 313:229, 2001 convention). The base plane is z = 0.
const ADENINE: &[(&str, [f64; 3])] = &[
    ("N9", [-1.291, 4.498, 0.000]),
    ("C8", [0.024, 4.897, 0.000]),
    ("N7", [0.877, 3.902, 0.000]),
    ("C5", [0.071, 2.771, 0.000]),
    ("C6", [0.369, 1.398, 0.000]),
    ("N1", [-0.668, 0.532, 0.000]),
    ("C2", [-1.912, 1.023, 0.000]),
    ("N3", [-2.320, 2.290, 0.000]),
    ("C4", [-1.267, 3.124, 0.000]),
];

const GUANINE: &[(&str, [f64; 3])] = &[
    ("N9", [-1.289, 4.551, 0.000]),
    ("C8", [0.023, 4.962, 0.000]),
    ("N7", [0.870, 3.969, 0.000]),
    ("C5", [0.071, 2.833, 0.000]),
    ("C6", [0.424, 1.460, 0.000]),
    ("N1", [-0.700, 0.641, 0.000]),
    ("C2", [-1.999, 1.087, 0.000]),
    ("N3", [-2.342, 2.364, 0.001]),
    ("C4", [-1.265, 3.177, 0.000]),
];

const CYTOSINE: &[(&str, [f64; 3])] = &[
    ("N1", [-1.285, 4.542, 0.000]),
    ("C2", [-1.472, 3.158, 0.000]),
    ("N3", [-0.391, 2.344, 0.000]),
    ("C4", [0.837, 2.868, 0.000]),
    ("C5", [1.056, 4.275, 0.000]),
    ("C6", [-0.023, 5.068, 0.000]),
];

const URACIL: &[(&str, [f64; 3])] = &[
    ("N1", [-1.284, 4.500, 0.000]),
    ("C2", [-1.462, 3.131, 0.000]),
    ("N3", [-0.302, 2.397, 0.000]),
    ("C4", [0.989, 2.884, 0.000]),
    ("C5", [1.089, 4.311, 0.000]),
    ("C6", [-0.024, 5.053, 0.000]),
];

const THYMINE: &[(&str, [f64; 3])] = &[
    ("N1", [-1.284, 4.500, 0.000]),
    ("C2", [-1.462, 3.135, 0.000]),
    ("N3", [-0.298, 2.407, 0.000]),
    ("C4", [0.994, 2.897, 0.000]),
    ("C5", [1.106, 4.338, 0.000]),
    ("C6", [-0.024, 5.057, 0.000]),
];

static STANDARD_BASES: Lazy<HashMap<&'static str, Vec<(&'static str, Vec3)>>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (letter, table) in [("A", ADENINE), ("G", GUANINE), ("C", CYTOSINE), ("U", URACIL), ("T", THYMINE)] {
        let atoms: Vec<(&'static str, Vec3)> = table.iter()
            .map(|(name, xyz)| (*name, Vec3::from_array(xyz)))
            .collect();
        map.insert(letter, atoms);
    }
    map
});

/// Ring atoms of the standard base for a given base letter, in the standard
/// reference frame.
///
/// Base variants resolve to their parent geometry: inosine shares the guanine
/// ring, pseudouridine the uracil ring and the DNA letters their RNA parents.
/// Returns `None` for unrecognized letters.
///
/// # Example
/// ```
/// use basepairs_chem::standard_ring_atoms;
/// let guanine = standard_ring_atoms("G").unwrap();
/// assert_eq!(guanine.len(), 9);
/// // all standard bases are planar: the frame z axis is the base normal
/// assert!(guanine.iter().all(|(_, pos)| pos.z.abs() < 0.01));
/// assert_eq!(standard_ring_atoms("DT").unwrap().len(), 6);
/// ```
pub fn standard_ring_atoms(base_type: &str) -> Option<&'static [(&'static str, Vec3)]> {
    let parent = match base_type {
        "I" => "G",
        "P" => "U",
        "DA" => "A",
        "DG" => "G",
        "DC" => "C",
        "DT" => "T",
        other => other,
    };
    STANDARD_BASES.get(parent).map(|v| v.as_slice())
}
