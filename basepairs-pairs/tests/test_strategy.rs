use basepairs_geometry::{Matrix3x3, Vec3};
use basepairs_pairs::{CandidateInfo, ReferenceFrame, ValidationResult};

pub fn validation(is_valid: bool) -> ValidationResult {
    ValidationResult {
        dorg: if is_valid { 8.8 } else { 16.5 },
        d_v: 0.3, plane_angle: 12.0, d_nn: 8.9,
        dir_x: 1.0, dir_y: -1.0, dir_z: -1.0,
        quality_score: 9.3,
        distance_check: is_valid,
        d_v_check: true, plane_angle_check: true, d_nn_check: true,
        is_valid,
        rejection_reason: if is_valid { None } else { Some("Failed: dorg".to_string()) },
    }
}

pub fn candidate(res_id1: &str, res_id2: &str, score: f64) -> CandidateInfo {
    let frame = ReferenceFrame::new(Vec3::from_float(0.0), Matrix3x3::identity(), 0.0);
    CandidateInfo {
        res_id1: res_id1.to_string(),
        res_id2: res_id2.to_string(),
        res_name1: "G".to_string(),
        res_name2: "C".to_string(),
        frame1: frame.clone(),
        frame2: frame,
        validation: validation(true),
        quality_score: score,
        lw_class: None,
        hbonds: vec![],
    }
}

#[cfg(test)]
mod test_selection {
    use basepairs_pairs::{GreedyBestStrategy, MutualBestStrategy};
    use crate::{candidate, validation};

    #[test]
    fn mutual_best_tie_break() {
        // pair scores: A-B = 0.80, A-C = 0.90, B-C = 0.85
        let candidates = vec![
            candidate("A", "B", 0.80),
            candidate("A", "C", 0.90),
            candidate("B", "C", 0.85),
        ];

        let strategy = MutualBestStrategy::new(0.0, true);
        let result = strategy.select_with_details(candidates);

        assert_eq!(result.selected.len(), 1);
        assert_eq!(result.selected[0].res_id1, "A");
        assert_eq!(result.selected[0].res_id2, "C");

        // B-C loses C to the selected pair, A-B loses A
        assert_eq!(result.rejected.len(), 2);
        for (_, reason) in &result.rejected {
            assert_eq!(reason, "residue_already_used");
        }
        assert!(result.used_residues.contains("A"));
        assert!(result.used_residues.contains("C"));
        assert!(!result.used_residues.contains("B"));
    }

    #[test]
    fn non_mutual_pair_is_rejected() {
        // D's best partner is E, but E pairs with F; D-G never becomes
        // mutual because D keeps preferring the dead D-E candidate
        let candidates = vec![
            candidate("E", "F", 0.9),
            candidate("D", "E", 0.7),
            candidate("D", "G", 0.5),
        ];
        let strategy = MutualBestStrategy::new(0.0, true);
        let result = strategy.select_with_details(candidates);

        let ids: Vec<(&str, &str)> = result.selected.iter()
            .map(|c| (c.res_id1.as_str(), c.res_id2.as_str())).collect();
        assert_eq!(ids, vec![("E", "F")]);

        let reasons: Vec<&str> = result.rejected.iter().map(|(_, r)| r.as_str()).collect();
        assert_eq!(reasons, vec!["residue_already_used", "not_mutual_best"]);
    }

    #[test]
    fn mutual_check_blocks_second_best_partners() {
        // with only D-E and E-F present and E-F stronger, D-E is not mutual:
        // E prefers F, so D stays unpaired
        let candidates = vec![
            candidate("E", "F", 0.9),
            candidate("D", "E", 0.7),
        ];
        let result = MutualBestStrategy::new(0.0, true).select_with_details(candidates);
        assert_eq!(result.selected.len(), 1);
        assert_eq!(result.rejected[0].1, "residue_already_used");

        // when E-F is removed, D-E becomes mutual best and is kept
        let candidates = vec![candidate("D", "E", 0.7)];
        let result = MutualBestStrategy::new(0.0, true).select_with_details(candidates);
        assert_eq!(result.selected.len(), 1);
    }

    #[test]
    fn not_mutual_best_reason_code() {
        // B appears in a better pair that is itself blocked by an even better
        // one, leaving A-B non-mutual at its turn
        let candidates = vec![
            candidate("B", "C", 0.9),
            candidate("C", "D", 0.95),
            candidate("A", "B", 0.5),
        ];
        let result = MutualBestStrategy::new(0.0, true).select_with_details(candidates);

        // C-D selected; B-C loses C; A-B is rejected as not mutual because
        // B's best pair (B-C) was never selected
        let ids: Vec<(&str, &str)> = result.selected.iter()
            .map(|c| (c.res_id1.as_str(), c.res_id2.as_str())).collect();
        assert_eq!(ids, vec![("C", "D")]);

        let mut reasons: Vec<&str> = result.rejected.iter().map(|(_, r)| r.as_str()).collect();
        reasons.sort();
        assert_eq!(reasons, vec!["not_mutual_best", "residue_already_used"]);
    }

    #[test]
    fn invalid_and_low_scoring_candidates_carry_reason_codes() {
        let mut invalid = candidate("A", "B", 0.9);
        invalid.validation = validation(false);
        let weak = candidate("C", "D", 0.2);
        let good = candidate("E", "F", 0.8);

        let strategy = MutualBestStrategy::new(0.5, true);
        let result = strategy.select_with_details(vec![invalid, weak, good]);

        assert_eq!(result.selected.len(), 1);
        assert_eq!(result.selected[0].res_id1, "E");

        let mut reasons: Vec<&str> = result.rejected.iter().map(|(_, r)| r.as_str()).collect();
        reasons.sort();
        assert_eq!(reasons, vec!["failed_geometry:dorg", "insufficient_score"]);
    }

    #[test]
    fn selected_residues_are_disjoint() {
        let candidates = vec![
            candidate("A", "B", 0.9),
            candidate("B", "C", 0.8),
            candidate("C", "D", 0.7),
            candidate("D", "E", 0.6),
        ];
        let result = MutualBestStrategy::new(0.0, true).select_with_details(candidates);

        let mut seen = std::collections::HashSet::new();
        for c in &result.selected {
            assert!(seen.insert(c.res_id1.clone()), "residue {} used twice", c.res_id1);
            assert!(seen.insert(c.res_id2.clone()), "residue {} used twice", c.res_id2);
        }
    }

    #[test]
    fn greedy_strategy_skips_the_mutual_check() {
        let candidates = vec![
            candidate("E", "F", 0.9),
            candidate("D", "E", 0.7),
        ];
        let selected = GreedyBestStrategy::new(0.0).select(candidates.clone());
        assert_eq!(selected.len(), 1);

        // greedy picks D-E once E-F is out of the way
        let candidates = vec![
            candidate("D", "E", 0.7),
            candidate("D", "G", 0.6),
        ];
        let selected = GreedyBestStrategy::new(0.0).select(candidates);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].res_id2, "E");
    }

    #[test]
    fn deterministic_order_for_tied_scores() {
        let candidates = vec![
            candidate("X", "Y", 0.8),
            candidate("P", "Q", 0.8),
        ];
        let first = MutualBestStrategy::new(0.0, true).select_with_details(candidates.clone());
        let second = MutualBestStrategy::new(0.0, true).select_with_details(candidates);
        assert_eq!(first.selected.len(), 2);
        assert_eq!(first.selected[0].res_id1, second.selected[0].res_id1);
        // ties break on residue ids: P-Q sorts ahead of X-Y
        assert_eq!(first.selected[0].res_id1, "P");
    }
}
