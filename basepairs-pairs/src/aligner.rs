use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use log::debug;

use basepairs_chem::Residue;
use basepairs_geometry::{kabsch, rmsd, Vec3};

use crate::templates::TemplateLibrary;

/// The twelve Leontis-Westhof base pair classes
pub const LW_CLASSES: [&str; 12] = ["cWW", "tWW", "cWH", "tWH", "cWS", "tWS",
                                    "cHH", "tHH", "cHS", "tHS", "cSS", "tSS"];

// Ring atoms shared between purines and pyrimidines, used for superposition
const ALIGNMENT_RING_ATOMS: [&str; 9] = ["C2", "C4", "C5", "C6", "N1", "N3", "N7", "C8", "N9"];

// Alignments over fewer atoms than this are penalized in the ranking
const PREFERRED_ATOM_COUNT: usize = 10;

/// Result of aligning one candidate pair to one template.
#[derive(Debug, Clone)]
pub struct AlignmentResult {
    pub lw_class: String,
    pub sequence: String,
    /// RMSD after optimal superposition; infinite when no template matched
    pub rmsd: f64,
    pub num_atoms_aligned: usize,
    pub template_path: Option<PathBuf>,
    /// true when the candidate residues were swapped to match the template
    pub reversed: bool,
}

impl AlignmentResult {

    /// Ranking score combining RMSD and atom count; lower is better.
    ///
    /// RMSD alone is not enough: six atoms fitting at 0.01 A say less than
    /// fifteen atoms fitting at 0.15 A, so sparse alignments pay half an
    /// Angstrom per missing atom below ten.
    pub fn score(&self) -> f64 {
        if self.num_atoms_aligned < PREFERRED_ATOM_COUNT {
            return self.rmsd + (PREFERRED_ATOM_COUNT - self.num_atoms_aligned) as f64 * 0.5;
        }
        return self.rmsd;
    }
}

/// Result of classifying a pair by trying all LW class templates.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub res_id1: String,
    pub res_id2: String,
    pub sequence: String,
    pub best_lw: String,
    pub best_rmsd: f64,
    pub second_lw: Option<String>,
    pub second_rmsd: Option<f64>,
    /// every attempted alignment, best score first
    pub all_results: Vec<AlignmentResult>,
}

impl ClassificationResult {

    /// Confidence from the gap between the two best template fits.
    ///
    /// A gap of half an Angstrom or more counts as full confidence.
    pub fn confidence(&self) -> f64 {
        match self.second_rmsd {
            None => 1.0,
            Some(second) => ((second - self.best_rmsd) / 0.5).min(1.0),
        }
    }
}

/// Aligns candidate pairs onto base pair templates and classifies them.
pub struct TemplateAligner {
    library: TemplateLibrary,
}

impl TemplateAligner {

    /// Creates an aligner over the given template directories.
    pub fn new(idealized_dir: &Path, exemplar_dir: &Path) -> TemplateAligner {
        TemplateAligner { library: TemplateLibrary::new(idealized_dir, exemplar_dir) }
    }

    /// Read-only access to the underlying template library
    pub fn library(&self) -> &TemplateLibrary { &self.library }

    /// Superimposes a template onto a candidate pair over the common ring atoms.
    ///
    /// Returns `(rmsd, number_of_atoms_aligned)`; the RMSD is infinite when
    /// the template cannot be read or fewer than four ring atoms are shared.
    pub fn align_to_template(&mut self, res1: &Residue, res2: &Residue,
                             template_path: &Path) -> (f64, usize) {

        let (template_res1, template_res2) = match self.library.load_template(template_path) {
            Ok((res1_atoms, res2_atoms)) => (res1_atoms, res2_atoms),
            Err(error) => {
                debug!("Template {} unusable: {}", template_path.display(), error);
                return (f64::INFINITY, 0);
            }
        };

        let mut template_points: Vec<Vec3> = vec![];
        let mut target_points: Vec<Vec3> = vec![];
        for atom_name in ALIGNMENT_RING_ATOMS {
            if let (Some(t), Some(m)) = (template_res1.get(atom_name), res1.atom(atom_name)) {
                template_points.push(*t);
                target_points.push(*m);
            }
            if let (Some(t), Some(m)) = (template_res2.get(atom_name), res2.atom(atom_name)) {
                template_points.push(*t);
                target_points.push(*m);
            }
        }

        if template_points.len() < 4 { return (f64::INFINITY, 0); }

        let sup = match kabsch(&template_points, &target_points) {
            Some(sup) => sup,
            None => return (f64::INFINITY, 0),
        };
        let aligned: Vec<Vec3> = template_points.iter().map(|p| sup.transform(p)).collect();
        return (rmsd(&aligned, &target_points), template_points.len());
    }

    /// Convenience lookup-and-align for one sequence and LW class.
    ///
    /// An absent template is reported as an infinite RMSD, never an error.
    pub fn align_to_class(&mut self, res1: &Residue, res2: &Residue,
                          sequence: &str, lw_class: &str) -> (f64, usize) {
        match self.library.find_template(sequence, lw_class) {
            Some(path) => self.align_to_template(res1, res2, &path),
            None => (f64::INFINITY, 0),
        }
    }

    /// Classifies a pair by aligning it to every LW class template.
    ///
    /// For each class both orientations are tried: the forward sequence, and
    /// the reversed sequence with the candidate residues swapped. Results are
    /// ranked by the atom-count-penalized [`score()`](AlignmentResult::score()).
    pub fn classify_pair(&mut self, res1: &Residue, res2: &Residue) -> ClassificationResult {

        let sequence = format!("{}{}", res1.base_type(), res2.base_type());
        let rev_sequence = format!("{}{}", res2.base_type(), res1.base_type());
        let mut results: Vec<AlignmentResult> = vec![];

        for lw in LW_CLASSES {
            if let Some(path) = self.library.find_template(&sequence, lw) {
                let (rmsd, num_atoms) = self.align_to_template(res1, res2, &path);
                results.push(AlignmentResult {
                    lw_class: lw.to_string(),
                    sequence: sequence.clone(),
                    rmsd,
                    num_atoms_aligned: num_atoms,
                    template_path: Some(path),
                    reversed: false,
                });
            }

            if let Some(path) = self.library.find_template(&rev_sequence, lw) {
                let (rmsd, num_atoms) = self.align_to_template(res2, res1, &path);
                results.push(AlignmentResult {
                    lw_class: lw.to_string(),
                    sequence: rev_sequence.clone(),
                    rmsd,
                    num_atoms_aligned: num_atoms,
                    template_path: Some(path),
                    reversed: true,
                });
            }
        }

        results.sort_by(|a, b| a.score().partial_cmp(&b.score()).unwrap_or(Ordering::Equal));

        if results.is_empty() {
            return ClassificationResult {
                res_id1: res1.res_id().to_string(),
                res_id2: res2.res_id().to_string(),
                sequence,
                best_lw: "unknown".to_string(),
                best_rmsd: f64::INFINITY,
                second_lw: None,
                second_rmsd: None,
                all_results: results,
            };
        }

        let best = results[0].clone();
        let second = results.get(1).cloned();
        return ClassificationResult {
            res_id1: res1.res_id().to_string(),
            res_id2: res2.res_id().to_string(),
            sequence,
            best_lw: best.lw_class,
            best_rmsd: best.rmsd,
            second_lw: second.as_ref().map(|r| r.lw_class.clone()),
            second_rmsd: second.as_ref().map(|r| r.rmsd),
            all_results: results,
        };
    }
}
