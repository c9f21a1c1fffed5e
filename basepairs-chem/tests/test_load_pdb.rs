const TWO_RESIDUES: &str = "\
ATOM      1  P     G A   1      50.626  49.730  50.573  1.00100.19           P
ATOM      2  OP1   G A   1      49.854  50.756  51.372  1.00100.19           O
ATOM      3  C1'   G A   1      50.901  44.752  48.735  1.00 44.81           C
ATOM      4  N9    G A   1      50.161  43.802  47.903  1.00 41.10           N
ATOM      5  C8    G A   1      49.407  44.052  46.782  1.00 39.91           C
ATOM      6  N1    G A   1      49.039  40.736  46.109  1.00 39.91           N
ATOM      7  N1 A  C A   2      46.513  45.904  50.744  1.00 38.01           N
ATOM      8  N1 B  C A   2      46.600  45.900  50.700  1.00 38.01           N
ATOM      9  C2    C A   2      45.851  46.905  50.094  1.00 38.21           C
HETATM   10  N1  2MG A   3      43.333  47.321  51.060  1.00 37.11           N
";

#[cfg(test)]
mod test_load_pdb {
    use std::collections::HashMap;
    use std::io::BufReader;
    use basepairs_chem::{load_residues, parse_atom_line};
    use crate::TWO_RESIDUES;

    #[test]
    fn atom_line_fields() {
        let line = "ATOM      4  N9    G A   1      50.161  43.802  47.903  1.00 41.10           N";
        let atom = parse_atom_line(line).unwrap();
        assert_eq!(atom.atom_name, "N9");
        assert_eq!(atom.res_name, "G");
        assert_eq!(atom.chain_id, "A");
        assert_eq!(atom.res_seq, 1);
        assert_eq!(atom.i_code, ' ');
        assert!((atom.pos.y - 43.802).abs() < 1e-9);
    }

    #[test]
    fn truncated_lines_are_rejected() {
        assert!(parse_atom_line("ATOM      4  N9    G A   1").is_err());
        assert!(parse_atom_line("ATOM      4  N9    G A   X      50.161  43.802  47.903").is_err());
    }

    #[test]
    fn residues_are_grouped_and_named() {
        let registry = HashMap::from([("2MG".to_string(), "G".to_string())]);
        let reader = BufReader::new(TWO_RESIDUES.as_bytes());
        let residues = load_residues(reader, Some(&registry)).unwrap();

        assert_eq!(residues.len(), 3);
        assert_eq!(residues[0].res_id(), "A-G-1");
        assert_eq!(residues[0].base_type(), "G");
        assert_eq!(residues[0].count_atoms(), 6);

        // the modified nucleotide resolves to its parent, keeping the deposited name
        assert_eq!(residues[2].res_id(), "A-G-3");
        assert_eq!(residues[2].code3(), "2MG");
    }

    #[test]
    fn only_first_alt_loc_is_kept() {
        let reader = BufReader::new(TWO_RESIDUES.as_bytes());
        let residues = load_residues(reader, None).unwrap();
        let cytosine = &residues[1];
        assert_eq!(cytosine.count_atoms(), 2);
        // conformer A came first and wins
        assert!((cytosine.atom("N1").unwrap().x - 46.513).abs() < 1e-9);
    }
}
