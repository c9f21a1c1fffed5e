use std::collections::HashMap;

use basepairs_chem::{acceptor_capacity, connectivity, donor_capacity, is_phosphate_oxygen,
                     is_ribose_oxygen};
use basepairs_geometry::{rotate_about_axis, Vec3};

use crate::slots::Slot;

/// Computes the normal vector of the base plane.
///
/// Uses the ring atoms shared by purines and pyrimidines (C2, C4, C6, N1,
/// N3); the first three that are present span the plane. When fewer than
/// three remain the z versor is returned, so a heavily disordered residue
/// still gets processed.
pub fn compute_base_normal(atoms: &HashMap<String, Vec3>) -> Vec3 {

    let mut positions: Vec<Vec3> = vec![];
    for name in ["C2", "C4", "C6", "N1", "N3"] {
        if let Some(pos) = atoms.get(name) { positions.push(*pos); }
    }
    if positions.len() < 3 { return Vec3::new(0.0, 0.0, 1.0); }

    let v1 = Vec3::sub_s(&positions[1], &positions[0]);
    let v2 = Vec3::sub_s(&positions[2], &positions[0]);
    return Vec3::cross(&v1, &v2).normalized();
}

fn antecedent_positions(base_type: &str, atom_name: &str, atoms: &HashMap<String, Vec3>) -> Vec<Vec3> {
    let mut positions = vec![];
    if let Some(names) = connectivity(base_type, atom_name) {
        for name in names {
            if let Some(pos) = atoms.get(*name) { positions.push(*pos); }
        }
    }
    return positions;
}

/// Predicts the hydrogen slots of a donor atom.
///
/// The slot directions follow the hybridization of the donor:
/// * an sp2 amino group (capacity 2, one antecedent) gets two slots, the
///   antecedent-to-donor vector rotated by +/-120 degrees about the base normal,
/// * an sp2 imino nitrogen (capacity 1, two antecedents) gets one slot
///   pointing away from the average of its neighbors,
/// * any other capacity-1 donor gets one slot opposite its single antecedent.
///
/// An atom that is not a donor, is absent from the residue, or has lost all
/// its antecedent atoms yields an empty list.
pub fn predict_h_slots(base_type: &str, atom_name: &str, atoms: &HashMap<String, Vec3>,
                       base_normal: &Vec3) -> Vec<Slot> {

    let capacity = match donor_capacity(base_type, atom_name) {
        Some(n) => n,
        None => return vec![],
    };
    let donor_pos = match atoms.get(atom_name) {
        Some(pos) => *pos,
        None => return vec![],
    };
    let antecedents = antecedent_positions(base_type, atom_name, atoms);
    if antecedents.is_empty() { return vec![]; }

    let mut slots = vec![];
    if capacity == 2 && antecedents.len() == 1 {
        // sp2 NH2: two hydrogens at 120 degrees from the C-N bond
        let ant_to_donor = Vec3::sub_s(&donor_pos, &antecedents[0]).normalized();
        slots.push(Slot::new(rotate_about_axis(&ant_to_donor, base_normal, 120.0)));
        slots.push(Slot::new(rotate_about_axis(&ant_to_donor, base_normal, -120.0)));
    } else if capacity == 1 && antecedents.len() == 2 {
        // sp2 imino NH: the hydrogen points away from the ring
        let avg = Vec3::centroid(&antecedents);
        slots.push(Slot::new(Vec3::sub_s(&donor_pos, &avg)));
    } else if capacity == 1 && antecedents.len() == 1 {
        slots.push(Slot::new(Vec3::sub_s(&donor_pos, &antecedents[0])));
    }

    return slots;
}

// Isotropic model for the anionic phosphate oxygens: three orthogonal slots
// along the world axes, each allowed to hold up to three bonds.
fn phosphate_lp_slots() -> Vec<Slot> {
    vec![
        Slot::with_max_bonds(Vec3::new(1.0, 0.0, 0.0), 3),
        Slot::with_max_bonds(Vec3::new(0.0, 1.0, 0.0), 3),
        Slot::with_max_bonds(Vec3::new(0.0, 0.0, 1.0), 3),
    ]
}

// Sugar oxygens rotate freely with the ribose pucker, so two orthogonal
// in-plane directions stand in for the actual lone pairs.
fn ribose_lp_slots(base_normal: &Vec3) -> Vec<Slot> {
    let mut perp1 = Vec3::cross(base_normal, &Vec3::new(1.0, 0.0, 0.0));
    if perp1.length() < 0.1 {
        perp1 = Vec3::cross(base_normal, &Vec3::new(0.0, 1.0, 0.0));
    }
    let perp1 = perp1.normalized();
    let perp2 = Vec3::cross(base_normal, &perp1);
    return vec![Slot::new(perp1), Slot::new(perp2)];
}

// Last resort for acceptors whose antecedents are all missing
fn fallback_lp_slots(capacity: usize) -> Vec<Slot> {
    let mut slots = vec![Slot::new(Vec3::new(1.0, 0.0, 0.0))];
    if capacity >= 2 {
        slots.push(Slot::new(Vec3::new(0.0, 1.0, 0.0)));
    }
    return slots;
}

/// Predicts the lone pair slots of an acceptor atom.
///
/// Phosphate oxygens use the isotropic three-slot model and ribose oxygens
/// two in-plane slots; for base atoms the directions follow the sp2 geometry:
/// a carbonyl oxygen gets two slots at +/-120 degrees from the C=O bond and a
/// ring nitrogen a single slot pointing out of the ring, with `max_bonds` of
/// one so that it never bifurcates.
pub fn predict_lp_slots(base_type: &str, atom_name: &str, atoms: &HashMap<String, Vec3>,
                        base_normal: &Vec3) -> Vec<Slot> {

    let capacity = match acceptor_capacity(base_type, atom_name) {
        Some(n) => n,
        None => return vec![],
    };
    let acceptor_pos = match atoms.get(atom_name) {
        Some(pos) => *pos,
        None => return vec![],
    };

    if is_phosphate_oxygen(atom_name) { return phosphate_lp_slots(); }
    if is_ribose_oxygen(atom_name) { return ribose_lp_slots(base_normal); }

    let antecedents = antecedent_positions(base_type, atom_name, atoms);
    if antecedents.is_empty() { return fallback_lp_slots(capacity); }

    let mut slots = vec![];
    if capacity == 2 && antecedents.len() == 1 {
        // sp2 carbonyl: two lone pairs at 120 degrees from the C=O bond
        let ant_to_acc = Vec3::sub_s(&acceptor_pos, &antecedents[0]).normalized();
        slots.push(Slot::new(rotate_about_axis(&ant_to_acc, base_normal, 120.0)));
        slots.push(Slot::new(rotate_about_axis(&ant_to_acc, base_normal, -120.0)));
    } else if capacity == 1 && antecedents.len() == 2 {
        // sp2 ring nitrogen: one lone pair pointing out of the ring, no bifurcation
        let avg = Vec3::centroid(&antecedents);
        slots.push(Slot::with_max_bonds(Vec3::sub_s(&acceptor_pos, &avg), 1));
    } else if capacity == 1 && antecedents.len() == 1 {
        slots.push(Slot::new(Vec3::sub_s(&acceptor_pos, &antecedents[0])));
    }

    return slots;
}
