#[cfg(test)]
mod test_capacity_tables {
    use basepairs_chem::{acceptor_capacity, acceptor_keys, connectivity, donor_capacity,
                         donor_keys, glycosidic_nitrogen, is_base_atom, is_phosphate_oxygen,
                         is_ribose_oxygen};

    #[test]
    fn watson_crick_donors_and_acceptors() {
        // the three H-bonds of a GC pair: G.N1->C.N3, G.N2->C.O2, C.N4->G.O6
        assert_eq!(donor_capacity("G", "N1"), Some(1));
        assert_eq!(donor_capacity("G", "N2"), Some(2));
        assert_eq!(donor_capacity("C", "N4"), Some(2));
        assert_eq!(acceptor_capacity("C", "N3"), Some(1));
        assert_eq!(acceptor_capacity("C", "O2"), Some(2));
        assert_eq!(acceptor_capacity("G", "O6"), Some(2));

        // the two H-bonds of an AU pair
        assert_eq!(donor_capacity("A", "N6"), Some(2));
        assert_eq!(acceptor_capacity("U", "O4"), Some(2));
        assert_eq!(donor_capacity("U", "N3"), Some(1));
        assert_eq!(acceptor_capacity("A", "N1"), Some(1));
    }

    #[test]
    fn phosphate_and_ribose_oxygens() {
        assert_eq!(acceptor_capacity("A", "OP1"), Some(3));
        assert_eq!(acceptor_capacity("A", "O1P"), Some(3));
        assert_eq!(acceptor_capacity("U", "O2'"), Some(2));
        assert_eq!(acceptor_capacity("U", "O4'"), Some(1));
        assert_eq!(donor_capacity("U", "O2'"), Some(1));

        assert!(is_phosphate_oxygen("OP2"));
        assert!(is_phosphate_oxygen("O2P"));
        assert!(!is_phosphate_oxygen("O2'"));
        assert!(is_ribose_oxygen("O4'"));
        assert!(!is_ribose_oxygen("O4"));
    }

    #[test]
    fn dna_bases_have_no_ribose_hydroxyl() {
        assert_eq!(donor_capacity("DA", "N6"), Some(2));
        assert_eq!(donor_capacity("DA", "O2'"), None);
        assert_eq!(acceptor_capacity("DG", "O6"), Some(2));
        assert_eq!(acceptor_capacity("DC", "O2'"), None);
        assert_eq!(acceptor_capacity("DT", "O4"), Some(2));
    }

    #[test]
    fn base_variants() {
        // pseudouridine donates from both N1 and N3
        assert_eq!(donor_capacity("P", "N1"), Some(1));
        assert_eq!(donor_capacity("P", "N3"), Some(1));
        // inosine looks like guanine without the amino group
        assert_eq!(donor_capacity("I", "N1"), Some(1));
        assert_eq!(donor_capacity("I", "N2"), None);
        assert_eq!(acceptor_capacity("I", "O6"), Some(2));
    }

    #[test]
    fn connectivity_directs_slots() {
        assert_eq!(connectivity("A", "N6"), Some(&["C6"][..]));
        assert_eq!(connectivity("G", "N1"), Some(&["C2", "C6"][..]));
        assert_eq!(connectivity("U", "O4'"), Some(&["C1'", "C4'"][..]));
        assert_eq!(connectivity("A", "XX"), None);
    }

    #[test]
    fn every_base_entry_has_connectivity() {
        // every donor/acceptor that is not a phosphate or sugar oxygen must
        // name at least one antecedent atom
        for (base, atom) in donor_keys().chain(acceptor_keys()) {
            if is_phosphate_oxygen(atom) { continue; }
            let conn = connectivity(base, atom);
            assert!(conn.is_some(), "missing connectivity for ({}, {})", base, atom);
            assert!(!conn.unwrap().is_empty(), "empty connectivity for ({}, {})", base, atom);
        }
    }

    #[test]
    fn base_atoms_and_glycosidic_nitrogens() {
        assert!(is_base_atom("N1"));
        assert!(is_base_atom("O6"));
        assert!(!is_base_atom("O2'"));
        assert!(!is_base_atom("OP1"));

        assert_eq!(glycosidic_nitrogen("A"), Some("N9"));
        assert_eq!(glycosidic_nitrogen("DG"), Some("N9"));
        assert_eq!(glycosidic_nitrogen("C"), Some("N1"));
        assert_eq!(glycosidic_nitrogen("P"), Some("N1"));
    }
}
