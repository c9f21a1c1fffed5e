use std::cmp::Ordering;
use std::collections::HashSet;

use itertools::iproduct;
use log::debug;

use basepairs_chem::{acceptor_capacity, donor_capacity, Residue};

use crate::finder::{score_alignment, HBond};
use crate::slot_geometry::{compute_base_normal, predict_h_slots, predict_lp_slots};

/// Distance cutoff of the relaxed re-search pass (Angstroms)
pub const EXTENDED_MAX_DISTANCE: f64 = 5.0;

/// Alignment floor of the relaxed re-search pass; very lenient, a stretched
/// bond with plausible distance is kept even when poorly aligned
pub const EXTENDED_MIN_ALIGNMENT: f64 = 0.1;

// Base atoms that can take part in Watson-Crick edge hydrogen bonds
const WC_DONOR_ATOMS: [&str; 5] = ["N1", "N2", "N3", "N4", "N6"];
const WC_ACCEPTOR_ATOMS: [&str; 5] = ["N1", "N3", "O2", "O4", "O6"];

fn add_directional(donor_res: &Residue, acceptor_res: &Residue, max_distance: f64,
                   min_alignment: f64, out: &mut Vec<HBond>) {

    let donor_normal = compute_base_normal(donor_res.atoms());
    let acceptor_normal = compute_base_normal(acceptor_res.atoms());

    for ((donor_atom, donor_pos), (acceptor_atom, acceptor_pos)) in
            iproduct!(donor_res.atoms().iter(), acceptor_res.atoms().iter()) {

        if !WC_DONOR_ATOMS.contains(&donor_atom.as_str()) { continue; }
        if donor_capacity(donor_res.base_type(), donor_atom).is_none() { continue; }
        if !WC_ACCEPTOR_ATOMS.contains(&acceptor_atom.as_str()) { continue; }
        if acceptor_capacity(acceptor_res.base_type(), acceptor_atom).is_none() { continue; }

        let dist = donor_pos.distance_to(acceptor_pos);
        if dist > max_distance { continue; }

        let h_slots = predict_h_slots(donor_res.base_type(), donor_atom, donor_res.atoms(), &donor_normal);
        let lp_slots = predict_lp_slots(acceptor_res.base_type(), acceptor_atom, acceptor_res.atoms(), &acceptor_normal);

        let (h_idx, lp_idx, alignment) = if !h_slots.is_empty() && !lp_slots.is_empty() {
            score_alignment(donor_pos, acceptor_pos, &h_slots, &lp_slots)
        } else {
            (0, 0, 0.0)
        };
        if alignment < min_alignment { continue; }

        out.push(HBond {
            donor_res_id: donor_res.res_id().to_string(),
            acceptor_res_id: acceptor_res.res_id().to_string(),
            donor_atom: donor_atom.clone(),
            acceptor_atom: acceptor_atom.clone(),
            distance: dist,
            h_slot_idx: h_idx,
            lp_slot_idx: lp_idx,
            alignment_score: alignment,
            extended: true,
        });
    }
}

/// Relaxed hydrogen bond search over the Watson-Crick edges of two residues.
///
/// Used when a pair shows clean overall geometry but fewer hydrogen bonds
/// than its sequence promises; the wider distance cutoff recovers bonds
/// stretched by poor refinement. Returned bonds carry the `extended` flag so
/// that scoring can down-weight them. Saturation is not tracked here: the
/// caller merges the result against the strict-pass bonds.
pub fn find_extended_hbonds(res1: &Residue, res2: &Residue,
                            max_distance: f64, min_alignment: f64) -> Vec<HBond> {

    let mut bonds = vec![];
    add_directional(res1, res2, max_distance, min_alignment, &mut bonds);
    add_directional(res2, res1, max_distance, min_alignment, &mut bonds);

    bonds.sort_by(|a, b| {
        a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal)
            .then_with(|| a.donor_res_id.cmp(&b.donor_res_id))
            .then_with(|| a.donor_atom.cmp(&b.donor_atom))
            .then_with(|| a.acceptor_atom.cmp(&b.acceptor_atom))
    });
    return bonds;
}

/// Merges extended-search bonds into a strict-pass bond list.
///
/// Bonds found by the strict pass always win; an extended bond is appended
/// only when its (donor atom, acceptor atom) pairing is new.
pub fn merge_extended_hbonds(existing: &[HBond], extended: Vec<HBond>) -> Vec<HBond> {

    let mut merged: Vec<HBond> = existing.to_vec();
    let seen: HashSet<(String, String)> = existing.iter()
        .map(|hb| (hb.donor_atom.clone(), hb.acceptor_atom.clone()))
        .collect();

    let mut added = 0;
    for hb in extended {
        if !seen.contains(&(hb.donor_atom.clone(), hb.acceptor_atom.clone())) {
            merged.push(hb);
            added += 1;
        }
    }
    if added > 0 { debug!("Extended search recovered {} stretched H-bond(s)", added); }
    return merged;
}
