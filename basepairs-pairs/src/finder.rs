use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};

use basepairs_chem::Residue;
use basepairs_hbonds::{find_extended_hbonds, merge_extended_hbonds, HBondFinder,
                       EXTENDED_MAX_DISTANCE, EXTENDED_MIN_ALIGNMENT,
                       MAX_DONOR_ACCEPTOR_DISTANCE, MIN_ALIGNMENT, MIN_BIFURCATION_ALIGNMENT,
                       MIN_BIFURCATION_ANGLE, SHORT_DISTANCE_THRESHOLD};

use crate::aligner::TemplateAligner;
use crate::pair_cache::{CandidateInfo, PairCandidates};
use crate::scorer::{expected_hbond_count, QualityScorer};
use crate::strategy::{MutualBestStrategy, SelectionResult};
use crate::thresholds::ValidationThresholds;
use crate::validation::GeometricValidator;

// A pair whose cWW fit is worse than this is not worth a relaxed re-search
const EXTENDED_SEARCH_MAX_RMSD: f64 = 1.0;

// Nor is one whose base planes tilt beyond this angle (degrees)
const EXTENDED_SEARCH_MAX_PLANE_ANGLE: f64 = 30.0;

/// Configuration of the pair finding pipeline.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// neighbor search radius between frame origins (Angstroms)
    pub max_pair_distance: f64,
    /// minimum quality score a pair must reach to be selected
    pub min_score: f64,
    /// require the mutual-best criterion during selection
    pub require_mutual: bool,
    pub rmsd_weight: f64,
    pub coverage_weight: f64,
    pub quality_weight: f64,
    pub thresholds: ValidationThresholds,
    /// donor-acceptor cutoff handed to the hydrogen bond finder (Angstroms)
    pub max_hbond_distance: f64,
    /// alignment floor for non-bifurcated hydrogen bonds
    pub min_hbond_alignment: f64,
    /// angular separation required between bonds sharing one slot (degrees)
    pub min_bifurcation_angle: f64,
    /// stricter alignment floor for bifurcated hydrogen bonds
    pub min_bifurcation_alignment: f64,
    /// below this donor-acceptor distance the alignment floor is waived
    pub short_distance_threshold: f64,
    /// classify selected pairs over all twelve LW classes (needs templates)
    pub classify_lw: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        FinderConfig {
            max_pair_distance: 15.0,
            min_score: 0.0,
            require_mutual: true,
            rmsd_weight: 0.3,
            coverage_weight: 0.4,
            quality_weight: 0.3,
            thresholds: ValidationThresholds::default(),
            max_hbond_distance: MAX_DONOR_ACCEPTOR_DISTANCE,
            min_hbond_alignment: MIN_ALIGNMENT,
            min_bifurcation_angle: MIN_BIFURCATION_ANGLE,
            min_bifurcation_alignment: MIN_BIFURCATION_ALIGNMENT,
            short_distance_threshold: SHORT_DISTANCE_THRESHOLD,
            classify_lw: true,
        }
    }
}

impl FinderConfig {

    /// Stricter configuration: tighter geometry limits and a score floor.
    pub fn strict() -> FinderConfig {
        FinderConfig {
            min_score: 0.5,
            thresholds: ValidationThresholds::strict(),
            ..FinderConfig::default()
        }
    }
}

/// Result of a pair finding run over one structure.
#[derive(Debug, Clone)]
pub struct FinderResult {
    /// the selected pairs
    pub pairs: Vec<CandidateInfo>,
    /// number of candidate pairs examined
    pub candidates_total: usize,
    /// number of candidates that passed geometric validation
    pub candidates_valid: usize,
    /// full selection outcome, including rejection diagnostics
    pub selection: SelectionResult,
}

/// High-level facade running the whole pair identification pipeline.
///
/// One structure at a time: frames are extracted and spatially indexed,
/// nearby pairs validated, hydrogen bonds detected (with a relaxed re-search
/// for clean but sparse pairs), templates aligned, scores assigned, and the
/// final set selected under the mutual-best rule. Structures are independent,
/// so batch drivers may simply run one finder per worker.
pub struct PairFinder {
    config: FinderConfig,
    validator: GeometricValidator,
    scorer: QualityScorer,
    strategy: MutualBestStrategy,
    hbond_finder: HBondFinder,
    aligner: Option<TemplateAligner>,
}

impl PairFinder {

    /// Creates a finder without a template repository.
    ///
    /// Scoring then falls back to the composite geometry metric in place of
    /// template RMSDs, and LW classification is unavailable.
    pub fn new(config: FinderConfig) -> PairFinder {
        Self::assemble(config, None)
    }

    /// Creates a finder with a template repository for RMSD scoring and LW
    /// classification.
    pub fn with_templates(config: FinderConfig, idealized_dir: &Path, exemplar_dir: &Path) -> PairFinder {
        Self::assemble(config, Some(TemplateAligner::new(idealized_dir, exemplar_dir)))
    }

    fn assemble(config: FinderConfig, aligner: Option<TemplateAligner>) -> PairFinder {
        let validator = GeometricValidator::new(config.thresholds.clone());
        let scorer = QualityScorer::new(config.rmsd_weight, config.coverage_weight, config.quality_weight);
        let strategy = MutualBestStrategy::new(config.min_score, config.require_mutual);
        let hbond_finder = HBondFinder::with_all_thresholds(
            config.max_hbond_distance, config.min_hbond_alignment, config.min_bifurcation_angle,
            config.min_bifurcation_alignment, config.short_distance_threshold);
        PairFinder {
            config,
            validator,
            scorer,
            strategy,
            hbond_finder,
            aligner,
        }
    }

    /// The configuration this finder runs with
    pub fn config(&self) -> &FinderConfig { &self.config }

    /// Finds base pairs among the given residues.
    pub fn find_pairs(&mut self, residues: &[Residue]) -> FinderResult {

        let cache = PairCandidates::build(residues, self.config.max_pair_distance, &self.validator);
        let mut candidates = cache.into_candidates();
        let candidates_total = candidates.len();

        let by_id: HashMap<&str, &Residue> = residues.iter().map(|r| (r.res_id(), r)).collect();
        for candidate in candidates.iter_mut() {
            if !candidate.validation.is_valid { continue; }
            let res1 = match by_id.get(candidate.res_id1.as_str()) { Some(r) => *r, None => continue };
            let res2 = match by_id.get(candidate.res_id2.as_str()) { Some(r) => *r, None => continue };
            self.score_candidate(candidate, res1, res2);
        }

        let candidates_valid = candidates.iter().filter(|c| c.validation.is_valid).count();
        let selection = self.strategy.select_with_details(candidates);
        info!("Selected {} pairs out of {} candidates ({} valid)",
              selection.selected.len(), candidates_total, candidates_valid);

        return FinderResult {
            pairs: selection.selected.clone(),
            candidates_total,
            candidates_valid,
            selection,
        };
    }

    fn score_candidate(&mut self, candidate: &mut CandidateInfo, res1: &Residue, res2: &Residue) {

        let sequence = candidate.sequence();
        let mut hbonds = self.hbond_finder.find_between(res1, res2);

        let rmsd = match self.aligner.as_mut() {
            Some(aligner) => {
                let (rmsd, _) = aligner.align_to_class(res1, res2, &sequence, "cWW");
                if rmsd.is_finite() { Some(rmsd) } else { None }
            }
            None => None,
        };

        // clean geometry with missing bonds: re-run relaxed to catch
        // stretched contacts before coverage is judged
        if let Some(rmsd_cww) = rmsd {
            if rmsd_cww < EXTENDED_SEARCH_MAX_RMSD
                    && candidate.validation.plane_angle < EXTENDED_SEARCH_MAX_PLANE_ANGLE {
                let found = hbonds.iter().filter(|hb| hb.is_base_base()).count();
                if found < expected_hbond_count(&sequence) {
                    debug!("Extended H-bond search for {} - {}", candidate.res_id1, candidate.res_id2);
                    let extended = find_extended_hbonds(res1, res2, EXTENDED_MAX_DISTANCE, EXTENDED_MIN_ALIGNMENT);
                    hbonds = merge_extended_hbonds(&hbonds, extended);
                }
            }
        }

        if self.config.classify_lw {
            if let Some(aligner) = self.aligner.as_mut() {
                let classification = aligner.classify_pair(res1, res2);
                if classification.best_rmsd.is_finite() {
                    candidate.lw_class = Some(classification.best_lw);
                }
            }
        }

        candidate.quality_score = self.scorer.compute_score(&candidate.validation, &sequence, &hbonds, rmsd);
        candidate.hbonds = hbonds;
    }
}
