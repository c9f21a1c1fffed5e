use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use log::debug;

use crate::pair_cache::CandidateInfo;
use crate::validation::first_failed_metric;

/// Outcome of a pair selection run.
#[derive(Debug, Clone)]
pub struct SelectionResult {
    /// pairs accepted into the final set
    pub selected: Vec<CandidateInfo>,
    /// every rejected candidate with its reason code: `failed_geometry:<metric>`,
    /// `insufficient_score`, `residue_already_used` or `not_mutual_best`
    pub rejected: Vec<(CandidateInfo, String)>,
    /// residues consumed by the selected pairs
    pub used_residues: HashSet<String>,
}

// score-descending with a deterministic residue-id tie break
fn sort_by_score(candidates: &mut [CandidateInfo]) {
    candidates.sort_by(|a, b| {
        b.quality_score.partial_cmp(&a.quality_score).unwrap_or(Ordering::Equal)
            .then_with(|| a.res_id1.cmp(&b.res_id1))
            .then_with(|| a.res_id2.cmp(&b.res_id2))
    });
}

fn split_valid(candidates: Vec<CandidateInfo>, min_score: f64,
               rejected: &mut Vec<(CandidateInfo, String)>) -> Vec<CandidateInfo> {
    let mut valid = vec![];
    for c in candidates {
        if !c.validation.is_valid {
            let reason = format!("failed_geometry:{}", first_failed_metric(&c.validation));
            rejected.push((c, reason));
        } else if c.quality_score < min_score {
            rejected.push((c, "insufficient_score".to_string()));
        } else {
            valid.push(c);
        }
    }
    return valid;
}

/// Greedy selection with the mutual-best criterion.
///
/// A candidate pair is accepted only when it has valid geometry, meets the
/// score floor, neither of its residues is consumed yet and, when
/// `require_mutual` is on, each residue's best remaining partner is the other
/// residue of the pair.
///
/// # Example
/// ```no_run
/// use basepairs_pairs::MutualBestStrategy;
/// let strategy = MutualBestStrategy::new(0.0, true);
/// # let candidates = vec![];
/// let result = strategy.select_with_details(candidates);
/// for (candidate, reason) in &result.rejected {
///     println!("{} - {}: {}", candidate.res_id1, candidate.res_id2, reason);
/// }
/// ```
pub struct MutualBestStrategy {
    min_score: f64,
    require_mutual: bool,
}

impl Default for MutualBestStrategy {
    fn default() -> Self { MutualBestStrategy::new(0.0, true) }
}

impl MutualBestStrategy {

    /// Creates a strategy with a score floor and the mutual-best switch.
    pub fn new(min_score: f64, require_mutual: bool) -> MutualBestStrategy {
        MutualBestStrategy { min_score, require_mutual }
    }

    /// Selects pairs, discarding the diagnostics.
    pub fn select(&self, candidates: Vec<CandidateInfo>) -> Vec<CandidateInfo> {
        self.select_with_details(candidates).selected
    }

    /// Selects pairs, reporting every rejection with its reason code.
    pub fn select_with_details(&self, candidates: Vec<CandidateInfo>) -> SelectionResult {

        let mut rejected: Vec<(CandidateInfo, String)> = vec![];
        let mut valid = split_valid(candidates, self.min_score, &mut rejected);
        sort_by_score(&mut valid);

        // each residue's best candidate is the first one it appears in
        let mut best: HashMap<String, usize> = HashMap::new();
        for (i, c) in valid.iter().enumerate() {
            best.entry(c.res_id1.clone()).or_insert(i);
            best.entry(c.res_id2.clone()).or_insert(i);
        }

        let mut selected: Vec<CandidateInfo> = vec![];
        let mut used: HashSet<String> = HashSet::new();

        for (i, c) in valid.iter().enumerate() {
            if used.contains(&c.res_id1) || used.contains(&c.res_id2) {
                rejected.push((c.clone(), "residue_already_used".to_string()));
                continue;
            }

            if self.require_mutual {
                let mutual = best.get(&c.res_id1) == Some(&i) && best.get(&c.res_id2) == Some(&i);
                if !mutual {
                    rejected.push((c.clone(), "not_mutual_best".to_string()));
                    continue;
                }
            }

            used.insert(c.res_id1.clone());
            used.insert(c.res_id2.clone());
            best.remove(&c.res_id1);
            best.remove(&c.res_id2);
            selected.push(c.clone());
        }

        debug!("Selection kept {} of {} candidates", selected.len(), selected.len() + rejected.len());
        return SelectionResult { selected, rejected, used_residues: used };
    }
}

/// Plain greedy selection by score, without the mutual check.
///
/// Simpler than [`MutualBestStrategy`](MutualBestStrategy) and occasionally keeps a pair the
/// mutual rule would reject, at the cost of more marginal selections.
pub struct GreedyBestStrategy {
    min_score: f64,
}

impl GreedyBestStrategy {

    /// Creates a strategy with a score floor.
    pub fn new(min_score: f64) -> GreedyBestStrategy {
        GreedyBestStrategy { min_score }
    }

    /// Selects pairs in descending score order, skipping any candidate whose
    /// residues were already consumed.
    pub fn select(&self, candidates: Vec<CandidateInfo>) -> Vec<CandidateInfo> {

        let mut rejected = vec![];
        let mut valid = split_valid(candidates, self.min_score, &mut rejected);
        sort_by_score(&mut valid);

        let mut selected: Vec<CandidateInfo> = vec![];
        let mut used: HashSet<String> = HashSet::new();

        for c in valid {
            if used.contains(&c.res_id1) || used.contains(&c.res_id2) { continue; }
            used.insert(c.res_id1.clone());
            used.insert(c.res_id2.clone());
            selected.push(c);
        }
        return selected;
    }
}
