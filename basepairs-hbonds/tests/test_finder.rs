use basepairs_chem::{standard_ring_atoms, Residue};
use basepairs_geometry::Vec3;

/// Builds a residue from the standard base geometry, adding the exocyclic
/// donor/acceptor atoms of the Watson-Crick edge.
pub fn standard_residue(res_id: &str, base: &str) -> Residue {
    let mut res = Residue::new(res_id, base);
    for (name, pos) in standard_ring_atoms(base).unwrap() {
        res.add_atom(name, *pos);
    }
    match base {
        "G" => {
            res.add_atom("O6", Vec3::new(1.554, 0.955, 0.0));
            res.add_atom("N2", Vec3::new(-2.949, 0.139, 0.0));
        }
        "C" => {
            res.add_atom("O2", Vec3::new(-2.628, 2.709, 0.0));
            res.add_atom("N4", Vec3::new(1.875, 2.027, 0.0));
        }
        "A" => {
            res.add_atom("N6", Vec3::new(1.611, 0.909, 0.0));
        }
        "U" => {
            res.add_atom("O2", Vec3::new(-2.563, 2.608, 0.0));
            res.add_atom("O4", Vec3::new(1.935, 2.094, 0.0));
        }
        _ => {}
    }
    res
}

/// Places a residue across the pair axis: in the standard reference frame the
/// second base of a canonical cis Watson-Crick pair is related to the first
/// by flipping the y and z axes.
pub fn paired_residue(res_id: &str, base: &str) -> Residue {
    let template = standard_residue("tmp", base);
    let mut res = Residue::new(res_id, base);
    for (name, pos) in template.atoms() {
        res.add_atom(name, Vec3::new(pos.x, -pos.y, -pos.z));
    }
    res
}

#[cfg(test)]
mod test_hbond_finder {
    use std::collections::HashMap;
    use basepairs_chem::Residue;
    use basepairs_geometry::{angle_between_deg, Vec3};
    use basepairs_hbonds::HBondFinder;
    use crate::{paired_residue, standard_residue};

    #[test]
    fn canonical_gc_pair_has_three_hbonds() {
        let gua = standard_residue("A-G-1", "G");
        let cyt = paired_residue("A-C-72", "C");

        let mut finder = HBondFinder::new();
        let bonds = finder.find_between(&gua, &cyt);

        assert_eq!(bonds.len(), 3);
        let pairs: Vec<(String, String)> = bonds.iter()
            .map(|hb| (hb.donor_atom.clone(), hb.acceptor_atom.clone()))
            .collect();
        assert!(pairs.contains(&("N1".to_string(), "N3".to_string())));
        assert!(pairs.contains(&("N2".to_string(), "O2".to_string())));
        assert!(pairs.contains(&("N4".to_string(), "O6".to_string())));

        for hb in &bonds {
            assert!(hb.distance <= 4.0);
            assert!(hb.is_base_base());
            assert!(!hb.extended);
        }

        // the central N1-N3 bond is almost perfectly aligned with both slots
        let n1n3 = bonds.iter().find(|hb| hb.donor_atom == "N1").unwrap();
        assert!(n1n3.alignment_score > 1.9, "alignment = {}", n1n3.alignment_score);
    }

    #[test]
    fn repeated_runs_are_idempotent() {
        let gua = standard_residue("A-G-1", "G");
        let cyt = paired_residue("A-C-72", "C");
        let mut finder = HBondFinder::new();

        let first = finder.find_between(&gua, &cyt);
        let second = finder.find_between(&gua, &cyt);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.donor_atom, b.donor_atom);
            assert_eq!(a.acceptor_atom, b.acceptor_atom);
            assert!((a.alignment_score - b.alignment_score).abs() < 1e-12);
        }
    }

    #[test]
    fn slot_invariants_hold_after_a_run() {
        let gua = standard_residue("A-G-1", "G");
        let cyt = paired_residue("A-C-72", "C");
        let mut finder = HBondFinder::new();
        let bonds = finder.find_between(&gua, &cyt);
        assert!(!bonds.is_empty());

        for (res_id, atom) in [("A-G-1", "N1"), ("A-G-1", "N2"), ("A-C-72", "N4")] {
            let slots = finder.h_slots_for(res_id, atom).unwrap();
            for slot in slots {
                assert!(slot.bond_directions().len() <= slot.max_bonds());
                for (i, d1) in slot.bond_directions().iter().enumerate() {
                    for d2 in &slot.bond_directions()[i + 1..] {
                        assert!(angle_between_deg(d1, d2) >= 45.0);
                    }
                }
            }
        }
        for (res_id, atom) in [("A-C-72", "N3"), ("A-C-72", "O2"), ("A-G-1", "O6")] {
            let slots = finder.lp_slots_for(res_id, atom).unwrap();
            for slot in slots {
                assert!(slot.bond_directions().len() <= slot.max_bonds());
            }
        }
    }

    #[test]
    fn distance_exactly_at_cutoff_is_accepted() {
        // an isolated imino donor aimed straight at a ring nitrogen acceptor
        let mut donor = Residue::new("A-G-1", "G");
        donor.add_atom("N1", Vec3::new(0.0, 0.0, 0.0));
        donor.add_atom("C2", Vec3::new(-1.2, 0.7, 0.0));
        donor.add_atom("C6", Vec3::new(1.2, 0.7, 0.0));

        let mut acceptor = Residue::new("A-C-2", "C");
        acceptor.add_atom("N3", Vec3::new(0.0, -4.0, 0.0));
        acceptor.add_atom("C2", Vec3::new(-1.2, -4.7, 0.0));
        acceptor.add_atom("C4", Vec3::new(1.2, -4.7, 0.0));

        let mut finder = HBondFinder::new();
        let bonds = finder.find_between(&donor, &acceptor);
        assert_eq!(bonds.len(), 1);
        assert!((bonds[0].distance - 4.0).abs() < 1e-12);

        // one hundredth of an Angstrom further and the candidate disappears
        let mut too_far = Residue::new("A-C-3", "C");
        too_far.add_atom("N3", Vec3::new(0.0, -4.01, 0.0));
        too_far.add_atom("C2", Vec3::new(-1.2, -4.71, 0.0));
        too_far.add_atom("C4", Vec3::new(1.2, -4.71, 0.0));
        assert!(finder.find_between(&donor, &too_far).is_empty());
    }

    #[test]
    fn overloaded_acceptor_is_reported() {
        // three imino donors converge on one carbonyl oxygen; approach vectors
        // are 30 degrees apart, so only two bonds fit the 45-degree rule
        let mut acceptor = Residue::new("A-U-10", "U");
        acceptor.add_atom("O4", Vec3::new(0.0, 0.0, 0.0));
        acceptor.add_atom("C4", Vec3::new(0.0, -1.23, 0.0));
        acceptor.add_atom("C2", Vec3::new(-2.4, -1.9, 0.0));
        acceptor.add_atom("C6", Vec3::new(1.2, -2.0, 0.0));

        let mut donors = vec![];
        for (i, (angle_deg, dist)) in [(75.0f64, 2.9), (135.0, 2.95), (105.0, 3.0)].iter().enumerate() {
            let u = Vec3::new(angle_deg.to_radians().cos(), angle_deg.to_radians().sin(), 0.0);
            let v = Vec3::new(-u.y, u.x, 0.0);
            let mut n1 = u.clone();
            n1 *= *dist;
            let mut donor = Residue::new(&format!("A-G-{}", i + 1), "G");
            donor.add_atom("N1", n1);
            // antecedents behind the donor so the hydrogen points at the acceptor
            let mut c2 = n1.clone(); c2 += &Vec3::new(u.x * 0.7 + v.x * 1.2, u.y * 0.7 + v.y * 1.2, 0.0);
            let mut c6 = n1.clone(); c6 += &Vec3::new(u.x * 0.7 - v.x * 1.2, u.y * 0.7 - v.y * 1.2, 0.0);
            donor.add_atom("C2", c2);
            donor.add_atom("C6", c6);
            donors.push(donor);
        }

        let mut finder = HBondFinder::new();
        let mut candidates = vec![];
        for donor in &donors {
            candidates.extend(finder.find_candidates(donor, &acceptor));
        }
        let mut residues: HashMap<&str, &Residue> = HashMap::new();
        residues.insert(acceptor.res_id(), &acceptor);
        for donor in &donors { residues.insert(donor.res_id(), donor); }

        let (selected, rejected) = finder.select_optimal(candidates, &residues);

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].donor_res_id, "A-G-1");
        assert_eq!(selected[1].donor_res_id, "A-G-2");

        let overloaded: Vec<_> = rejected.iter()
            .filter(|(_, reason)| reason == "overloaded_acceptor").collect();
        assert_eq!(overloaded.len(), 1);
        assert_eq!(overloaded[0].0.donor_res_id, "A-G-3");
    }

    #[test]
    fn degenerate_ring_still_processes() {
        // the donor lost both antecedents of its imino nitrogen
        let mut broken = Residue::new("A-G-5", "G");
        broken.add_atom("N1", Vec3::new(0.0, 0.0, 0.0));
        broken.add_atom("C4", Vec3::new(1.5, 1.0, 0.0));
        broken.add_atom("N3", Vec3::new(0.3, 1.8, 0.0));

        let mut acceptor = Residue::new("A-C-6", "C");
        acceptor.add_atom("N3", Vec3::new(0.0, -3.0, 0.0));
        acceptor.add_atom("C2", Vec3::new(-1.2, -3.7, 0.0));
        acceptor.add_atom("C4", Vec3::new(1.2, -3.7, 0.0));

        let mut finder = HBondFinder::new();
        let (bonds, rejected) = finder.find_between_with_details(&broken, &acceptor);
        assert!(bonds.is_empty());
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].1, "no_slots");
    }

    #[test]
    fn no_candidates_is_a_normal_result() {
        let gua = standard_residue("A-G-1", "G");
        let template = paired_residue("B-C-50", "C");
        let mut far = Residue::new("B-C-50", "C");
        for (name, pos) in template.atoms() {
            far.add_atom(name, Vec3::new(pos.x + 60.0, pos.y, pos.z));
        }

        let mut finder = HBondFinder::new();
        assert!(finder.find_between(&gua, &far).is_empty());
    }
}
