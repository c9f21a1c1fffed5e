use std::collections::HashMap;

use log::debug;

use basepairs_chem::Residue;
use basepairs_datastructures::kd_tree::{create_kd_tree, find_within, LabeledPoint};
use basepairs_hbonds::HBond;

use crate::frame::{extract_frame, ReferenceFrame};
use crate::validation::{GeometricValidator, ValidationResult};

/// A validated candidate pair, ready for scoring and selection.
#[derive(Debug, Clone)]
pub struct CandidateInfo {
    pub res_id1: String,
    pub res_id2: String,
    /// parent base letter of the first residue
    pub res_name1: String,
    /// parent base letter of the second residue
    pub res_name2: String,
    pub frame1: ReferenceFrame,
    pub frame2: ReferenceFrame,
    pub validation: ValidationResult,
    /// overall quality in [0, 1], HIGHER is better; assigned by the scorer
    pub quality_score: f64,
    /// Leontis-Westhof class, when classification ran
    pub lw_class: Option<String>,
    /// hydrogen bonds found between the two residues
    pub hbonds: Vec<HBond>,
}

impl CandidateInfo {
    /// Two-letter sequence code of this pair
    pub fn sequence(&self) -> String {
        format!("{}{}", self.res_name1, self.res_name2)
    }
}

/// Candidate pairs of one structure, discovered through a spatial index.
///
/// Reference frames are extracted for every residue, indexed in a k-d tree
/// by origin, and every unordered pair of residues whose origins lie within
/// the cutoff is validated geometrically. Both valid and invalid candidates
/// are kept, so rejection diagnostics stay complete.
pub struct PairCandidates {
    frames: HashMap<String, ReferenceFrame>,
    candidates: Vec<CandidateInfo>,
}

impl PairCandidates {

    /// Builds the candidate list for a set of residues.
    ///
    /// Residues without a usable frame (unknown base letter, fewer than three
    /// ring atoms) or without a glycosidic nitrogen are skipped.
    pub fn build(residues: &[Residue], max_distance: f64,
                 validator: &GeometricValidator) -> PairCandidates {

        let mut frames: HashMap<String, ReferenceFrame> = HashMap::new();
        let mut framed: Vec<&Residue> = vec![];
        for res in residues {
            match extract_frame(res) {
                Some(frame) => {
                    frames.insert(res.res_id().to_string(), frame);
                    framed.push(res);
                }
                None => { debug!("No reference frame for {}", res.res_id()); }
            }
        }

        let mut points: Vec<LabeledPoint> = framed.iter().enumerate()
            .map(|(i, res)| {
                let origin = frames[res.res_id()].origin();
                LabeledPoint::new(i, [origin.x, origin.y, origin.z])
            })
            .collect();

        let mut candidates: Vec<CandidateInfo> = vec![];
        let root = match create_kd_tree(&mut points) {
            Some(root) => root,
            None => return PairCandidates { frames, candidates },
        };

        for (i, res1) in framed.iter().enumerate() {
            let frame1 = &frames[res1.res_id()];
            let origin = frame1.origin();
            let mut neighbors = find_within(&root, &[origin.x, origin.y, origin.z], max_distance);
            neighbors.sort();

            for j in neighbors {
                if j <= i { continue; }
                let res2 = framed[j];
                let frame2 = &frames[res2.res_id()];

                let (gly1, gly2) = match (res1.glycosidic_n(), res2.glycosidic_n()) {
                    (Some(a), Some(b)) => (a, b),
                    _ => {
                        debug!("Skipping {} - {}: glycosidic nitrogen missing", res1.res_id(), res2.res_id());
                        continue;
                    }
                };

                let validation = validator.validate(frame1, frame2, gly1, gly2);
                candidates.push(CandidateInfo {
                    res_id1: res1.res_id().to_string(),
                    res_id2: res2.res_id().to_string(),
                    res_name1: res1.base_type().to_string(),
                    res_name2: res2.base_type().to_string(),
                    frame1: frame1.clone(),
                    frame2: frame2.clone(),
                    validation,
                    quality_score: 0.0,
                    lw_class: None,
                    hbonds: vec![],
                });
            }
        }

        debug!("Found {} candidate pairs among {} framed residues", candidates.len(), framed.len());
        return PairCandidates { frames, candidates };
    }

    /// Reference frames by residue identifier
    pub fn frames(&self) -> &HashMap<String, ReferenceFrame> { &self.frames }

    /// All candidates, valid and invalid
    pub fn candidates(&self) -> &[CandidateInfo] { &self.candidates }

    /// Mutable access for the scoring pass
    pub fn candidates_mut(&mut self) -> &mut [CandidateInfo] { &mut self.candidates }

    /// Consumes the cache, yielding the candidate list
    pub fn into_candidates(self) -> Vec<CandidateInfo> { self.candidates }

    /// Candidates that passed geometric validation
    pub fn valid_candidates(&self) -> Vec<&CandidateInfo> {
        self.candidates.iter().filter(|c| c.validation.is_valid).collect()
    }
}
