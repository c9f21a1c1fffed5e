use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::iproduct;
use log::debug;

use basepairs_chem::{acceptor_capacity, donor_capacity, is_base_atom, Residue};
use basepairs_geometry::Vec3;

use crate::slot_geometry::{compute_base_normal, predict_h_slots, predict_lp_slots};
use crate::slots::Slot;
use crate::{MAX_DONOR_ACCEPTOR_DISTANCE, MIN_ALIGNMENT, MIN_BIFURCATION_ALIGNMENT,
            MIN_BIFURCATION_ANGLE, SHORT_DISTANCE_THRESHOLD};

/// A potential hydrogen bond, before selection.
///
/// Scoring fills in the indexes of the best-matching hydrogen and lone pair
/// slots, plus the summed slot alignment on the -2..2 scale (higher is
/// better).
#[derive(Debug, Clone)]
pub struct HBondCandidate {
    pub donor_res_id: String,
    pub acceptor_res_id: String,
    pub donor_atom: String,
    pub acceptor_atom: String,
    /// donor-acceptor distance in Angstroms
    pub distance: f64,
    pub donor_pos: Vec3,
    pub acceptor_pos: Vec3,
    pub h_slot_idx: usize,
    pub lp_slot_idx: usize,
    pub alignment_score: f64,
}

/// An accepted hydrogen bond with its frozen slot assignment.
#[derive(Debug, Clone)]
pub struct HBond {
    pub donor_res_id: String,
    pub acceptor_res_id: String,
    pub donor_atom: String,
    pub acceptor_atom: String,
    /// donor-acceptor distance in Angstroms
    pub distance: f64,
    pub h_slot_idx: usize,
    pub lp_slot_idx: usize,
    /// summed slot alignment on the -2..2 scale; higher is better
    pub alignment_score: f64,
    /// true for bonds recovered by the relaxed re-search pass
    pub extended: bool,
}

impl HBond {
    /// True when both partners are nucleobase atoms, i.e. the bond ties the
    /// two base edges together rather than the sugars or phosphates.
    pub fn is_base_base(&self) -> bool {
        is_base_atom(&self.donor_atom) && is_base_atom(&self.acceptor_atom)
    }
}

pub(crate) fn score_alignment(donor_pos: &Vec3, acceptor_pos: &Vec3,
                              h_slots: &[Slot], lp_slots: &[Slot]) -> (usize, usize, f64) {

    let d_hat = Vec3::sub_s(acceptor_pos, donor_pos).normalized();
    let mut c_hat = d_hat.clone();
    c_hat.opposite();

    let mut best_h_score = -2.0;
    let mut best_h_idx = 0;
    for (i, slot) in h_slots.iter().enumerate() {
        let alignment = Vec3::dot(slot.direction(), &d_hat);
        if alignment > best_h_score {
            best_h_score = alignment;
            best_h_idx = i;
        }
    }

    let mut best_lp_score = -2.0;
    let mut best_lp_idx = 0;
    for (i, slot) in lp_slots.iter().enumerate() {
        let alignment = Vec3::dot(slot.direction(), &c_hat);
        if alignment > best_lp_score {
            best_lp_score = alignment;
            best_lp_idx = i;
        }
    }

    return (best_h_idx, best_lp_idx, best_h_score + best_lp_score);
}

fn find_alternative_slots(candidate: &mut HBondCandidate, h_slots: &[Slot], lp_slots: &[Slot],
                          d_hat: &Vec3, c_hat: &Vec3, min_bifurcation_angle: f64,
                          min_alignment: f64, min_bifurcation_alignment: f64) -> Result<(), &'static str> {

    for (hi, hs) in h_slots.iter().enumerate() {
        if !hs.can_add_bond(d_hat, min_bifurcation_angle) { continue; }

        for (li, ls) in lp_slots.iter().enumerate() {
            if !ls.can_add_bond(c_hat, min_bifurcation_angle) { continue; }

            let alt_score = Vec3::dot(hs.direction(), d_hat) + Vec3::dot(ls.direction(), c_hat);
            let alt_bifurcated = !hs.bond_directions().is_empty() || !ls.bond_directions().is_empty();
            let floor = if alt_bifurcated { min_bifurcation_alignment } else { min_alignment };
            if alt_score >= floor {
                candidate.h_slot_idx = hi;
                candidate.lp_slot_idx = li;
                candidate.alignment_score = alt_score;
                return Ok(());
            }
        }
    }

    if !lp_slots.iter().any(|s| s.can_add_bond(c_hat, min_bifurcation_angle)) {
        return Err("overloaded_acceptor");
    }
    if !h_slots.iter().any(|s| s.can_add_bond(d_hat, min_bifurcation_angle)) {
        return Err("overloaded_donor");
    }
    return Err("poor_alignment");
}

fn try_select_bond(candidate: &mut HBondCandidate, h_slots: &mut [Slot], lp_slots: &mut [Slot],
                   min_bifurcation_angle: f64, min_alignment: f64,
                   min_bifurcation_alignment: f64, short_distance_threshold: f64) -> Result<(), &'static str> {

    if candidate.h_slot_idx >= h_slots.len() || candidate.lp_slot_idx >= lp_slots.len() {
        return Err("no_slots");
    }

    let d_hat = Vec3::sub_s(&candidate.acceptor_pos, &candidate.donor_pos).normalized();
    let mut c_hat = d_hat.clone();
    c_hat.opposite();

    let h_can_use = h_slots[candidate.h_slot_idx].can_add_bond(&d_hat, min_bifurcation_angle);
    let lp_can_use = lp_slots[candidate.lp_slot_idx].can_add_bond(&c_hat, min_bifurcation_angle);

    if !(h_can_use && lp_can_use) {
        find_alternative_slots(candidate, h_slots, lp_slots, &d_hat, &c_hat,
                               min_bifurcation_angle, min_alignment, min_bifurcation_alignment)?;
    }

    let is_bifurcated = !h_slots[candidate.h_slot_idx].bond_directions().is_empty()
        || !lp_slots[candidate.lp_slot_idx].bond_directions().is_empty();

    // bonds shorter than the threshold are accepted on geometry alone
    if candidate.distance >= short_distance_threshold {
        let floor = if is_bifurcated { min_bifurcation_alignment } else { min_alignment };
        if candidate.alignment_score < floor { return Err("poor_alignment"); }
    }

    h_slots[candidate.h_slot_idx].add_bond(&d_hat);
    lp_slots[candidate.lp_slot_idx].add_bond(&c_hat);
    return Ok(());
}

/// Finds hydrogen bonds between residues using greedy, slot-aware selection.
///
/// The finder owns the per-run slot caches; they are cleared at the start of
/// every selection, so repeated calls on the same residues are idempotent.
/// All thresholds default to the crate-level constants.
pub struct HBondFinder {
    max_distance: f64,
    min_alignment: f64,
    min_bifurcation_angle: f64,
    min_bifurcation_alignment: f64,
    short_distance_threshold: f64,
    h_slots: HashMap<(String, String), Vec<Slot>>,
    lp_slots: HashMap<(String, String), Vec<Slot>>,
    base_normals: HashMap<String, Vec3>,
}

impl Default for HBondFinder {
    fn default() -> Self { HBondFinder::new() }
}

impl HBondFinder {

    /// Creates a finder with the default thresholds.
    pub fn new() -> HBondFinder {
        HBondFinder {
            max_distance: MAX_DONOR_ACCEPTOR_DISTANCE,
            min_alignment: MIN_ALIGNMENT,
            min_bifurcation_angle: MIN_BIFURCATION_ANGLE,
            min_bifurcation_alignment: MIN_BIFURCATION_ALIGNMENT,
            short_distance_threshold: SHORT_DISTANCE_THRESHOLD,
            h_slots: HashMap::new(),
            lp_slots: HashMap::new(),
            base_normals: HashMap::new(),
        }
    }

    /// Creates a finder with a custom distance cutoff and alignment floor,
    /// keeping the remaining thresholds at their defaults.
    pub fn with_thresholds(max_distance: f64, min_alignment: f64) -> HBondFinder {
        let mut finder = HBondFinder::new();
        finder.max_distance = max_distance;
        finder.min_alignment = min_alignment;
        return finder;
    }

    /// Creates a finder with every threshold spelled out.
    pub fn with_all_thresholds(max_distance: f64, min_alignment: f64, min_bifurcation_angle: f64,
                               min_bifurcation_alignment: f64, short_distance_threshold: f64) -> HBondFinder {
        let mut finder = HBondFinder::new();
        finder.max_distance = max_distance;
        finder.min_alignment = min_alignment;
        finder.min_bifurcation_angle = min_bifurcation_angle;
        finder.min_bifurcation_alignment = min_bifurcation_alignment;
        finder.short_distance_threshold = short_distance_threshold;
        return finder;
    }

    /// The distance cutoff this finder applies to donor-acceptor contacts
    pub fn max_distance(&self) -> f64 { self.max_distance }

    /// Hydrogen slots computed for a donor atom during the last run
    pub fn h_slots_for(&self, res_id: &str, atom_name: &str) -> Option<&[Slot]> {
        self.h_slots.get(&(res_id.to_string(), atom_name.to_string())).map(|v| v.as_slice())
    }

    /// Lone pair slots computed for an acceptor atom during the last run
    pub fn lp_slots_for(&self, res_id: &str, atom_name: &str) -> Option<&[Slot]> {
        self.lp_slots.get(&(res_id.to_string(), atom_name.to_string())).map(|v| v.as_slice())
    }

    /// Enumerates all donor-acceptor contacts between two residues within the
    /// distance cutoff, in both directions.
    ///
    /// Contacts joining two nucleobase atoms of the same residue are covalent
    /// neighbors, not hydrogen bonds, and are excluded.
    pub fn find_candidates(&self, res1: &Residue, res2: &Residue) -> Vec<HBondCandidate> {
        let mut candidates = vec![];
        self.add_directional_candidates(res1, res2, &mut candidates);
        self.add_directional_candidates(res2, res1, &mut candidates);
        return candidates;
    }

    fn add_directional_candidates(&self, donor_res: &Residue, acceptor_res: &Residue,
                                  candidates: &mut Vec<HBondCandidate>) {

        let same_residue = donor_res.res_id() == acceptor_res.res_id();

        for ((donor_atom, donor_pos), (acceptor_atom, acceptor_pos)) in
                iproduct!(donor_res.atoms().iter(), acceptor_res.atoms().iter()) {

            if donor_capacity(donor_res.base_type(), donor_atom).is_none() { continue; }
            if acceptor_capacity(acceptor_res.base_type(), acceptor_atom).is_none() { continue; }

            if same_residue {
                if donor_atom == acceptor_atom { continue; }
                if is_base_atom(donor_atom) && is_base_atom(acceptor_atom) { continue; }
            }

            let dist = donor_pos.distance_to(acceptor_pos);
            if dist <= self.max_distance {
                candidates.push(HBondCandidate {
                    donor_res_id: donor_res.res_id().to_string(),
                    acceptor_res_id: acceptor_res.res_id().to_string(),
                    donor_atom: donor_atom.clone(),
                    acceptor_atom: acceptor_atom.clone(),
                    distance: dist,
                    donor_pos: *donor_pos,
                    acceptor_pos: *acceptor_pos,
                    h_slot_idx: 0,
                    lp_slot_idx: 0,
                    alignment_score: 0.0,
                });
            }
        }
    }

    fn base_normal_for(&mut self, res: &Residue) -> Vec3 {
        if let Some(normal) = self.base_normals.get(res.res_id()) { return *normal; }
        let normal = compute_base_normal(res.atoms());
        self.base_normals.insert(res.res_id().to_string(), normal);
        return normal;
    }

    fn ensure_h_slots(&mut self, res: &Residue, atom_name: &str) {
        let key = (res.res_id().to_string(), atom_name.to_string());
        if !self.h_slots.contains_key(&key) {
            let normal = self.base_normal_for(res);
            let slots = predict_h_slots(res.base_type(), atom_name, res.atoms(), &normal);
            self.h_slots.insert(key, slots);
        }
    }

    fn ensure_lp_slots(&mut self, res: &Residue, atom_name: &str) {
        let key = (res.res_id().to_string(), atom_name.to_string());
        if !self.lp_slots.contains_key(&key) {
            let normal = self.base_normal_for(res);
            let slots = predict_lp_slots(res.base_type(), atom_name, res.atoms(), &normal);
            self.lp_slots.insert(key, slots);
        }
    }

    fn compute_alignments(&mut self, candidates: &mut [HBondCandidate],
                          residues: &HashMap<&str, &Residue>) {

        for c in candidates.iter_mut() {
            let donor_res = match residues.get(c.donor_res_id.as_str()) { Some(r) => *r, None => continue };
            let acceptor_res = match residues.get(c.acceptor_res_id.as_str()) { Some(r) => *r, None => continue };

            self.ensure_h_slots(donor_res, &c.donor_atom);
            self.ensure_lp_slots(acceptor_res, &c.acceptor_atom);

            let h_key = (c.donor_res_id.clone(), c.donor_atom.clone());
            let lp_key = (c.acceptor_res_id.clone(), c.acceptor_atom.clone());
            let h_slots = &self.h_slots[&h_key];
            let lp_slots = &self.lp_slots[&lp_key];

            if !h_slots.is_empty() && !lp_slots.is_empty() {
                let (h_idx, lp_idx, score) = score_alignment(&c.donor_pos, &c.acceptor_pos, h_slots, lp_slots);
                c.h_slot_idx = h_idx;
                c.lp_slot_idx = lp_idx;
                c.alignment_score = score;
            }
        }
    }

    fn sort_candidates(candidates: &mut [HBondCandidate]) {
        // shortest first; full lexicographic tie-break keeps the order total
        candidates.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal)
                .then_with(|| a.donor_res_id.cmp(&b.donor_res_id))
                .then_with(|| a.donor_atom.cmp(&b.donor_atom))
                .then_with(|| a.acceptor_res_id.cmp(&b.acceptor_res_id))
                .then_with(|| a.acceptor_atom.cmp(&b.acceptor_atom))
        });
    }

    /// Greedy slot-aware selection over a candidate list.
    ///
    /// Candidates are processed shortest-distance first; each one is accepted
    /// only while its slots have spare capacity, every bond sharing a slot is
    /// separated by at least the bifurcation angle, and the alignment floor
    /// (waived below the short-distance threshold) is met. Rejected
    /// candidates are reported with a reason code: `no_slots`,
    /// `missing_residue`, `overloaded_acceptor`, `overloaded_donor` or
    /// `poor_alignment`.
    pub fn select_optimal(&mut self, mut candidates: Vec<HBondCandidate>,
                          residues: &HashMap<&str, &Residue>) -> (Vec<HBond>, Vec<(HBondCandidate, String)>) {

        if candidates.is_empty() { return (vec![], vec![]); }

        // clear-on-run semantics: repeated calls never see stale saturation
        self.h_slots.clear();
        self.lp_slots.clear();
        self.base_normals.clear();

        self.compute_alignments(&mut candidates, residues);
        Self::sort_candidates(&mut candidates);

        let mut selected = vec![];
        let mut rejected = vec![];

        for mut c in candidates {
            if !residues.contains_key(c.donor_res_id.as_str())
                    || !residues.contains_key(c.acceptor_res_id.as_str()) {
                rejected.push((c, "missing_residue".to_string()));
                continue;
            }

            let h_key = (c.donor_res_id.clone(), c.donor_atom.clone());
            let lp_key = (c.acceptor_res_id.clone(), c.acceptor_atom.clone());
            let h_slots = self.h_slots.get_mut(&h_key);
            let lp_slots = self.lp_slots.get_mut(&lp_key);
            let (h_slots, lp_slots) = match (h_slots, lp_slots) {
                (Some(h), Some(l)) if !h.is_empty() && !l.is_empty() => (h, l),
                _ => {
                    rejected.push((c, "no_slots".to_string()));
                    continue;
                }
            };

            match try_select_bond(&mut c, h_slots, lp_slots, self.min_bifurcation_angle,
                                  self.min_alignment, self.min_bifurcation_alignment,
                                  self.short_distance_threshold) {
                Ok(()) => {
                    selected.push(HBond {
                        donor_res_id: c.donor_res_id.clone(),
                        acceptor_res_id: c.acceptor_res_id.clone(),
                        donor_atom: c.donor_atom.clone(),
                        acceptor_atom: c.acceptor_atom.clone(),
                        distance: c.distance,
                        h_slot_idx: c.h_slot_idx,
                        lp_slot_idx: c.lp_slot_idx,
                        alignment_score: c.alignment_score,
                        extended: false,
                    });
                }
                Err(reason) => { rejected.push((c, reason.to_string())); }
            }
        }

        debug!("H-bond selection: {} accepted, {} rejected", selected.len(), rejected.len());
        return (selected, rejected);
    }

    /// Finds the hydrogen bonds between two residues.
    ///
    /// Never fails: residues with missing atoms or degenerate rings simply
    /// contribute fewer (or zero) bonds.
    pub fn find_between(&mut self, res1: &Residue, res2: &Residue) -> Vec<HBond> {
        self.find_between_with_details(res1, res2).0
    }

    /// Finds the hydrogen bonds between two residues, also reporting every
    /// rejected candidate together with its reason code.
    pub fn find_between_with_details(&mut self, res1: &Residue, res2: &Residue)
            -> (Vec<HBond>, Vec<(HBondCandidate, String)>) {

        let candidates = self.find_candidates(res1, res2);
        let mut residues: HashMap<&str, &Residue> = HashMap::new();
        residues.insert(res1.res_id(), res1);
        residues.insert(res2.res_id(), res2);
        return self.select_optimal(candidates, &residues);
    }
}
