use basepairs_hbonds::HBond;

use crate::validation::ValidationResult;

// Donor-acceptor distances inside this band score a full 1.0
const IDEAL_DISTANCE_MIN: f64 = 2.7;
const IDEAL_DISTANCE_MAX: f64 = 3.2;

// Coverage credit granted to a bond recovered by the extended search
const EXTENDED_BOND_WEIGHT: f64 = 0.85;

/// Canonical hydrogen bond count for a two-letter sequence.
///
/// ```
/// use basepairs_pairs::expected_hbond_count;
/// assert_eq!(expected_hbond_count("GC"), 3);
/// assert_eq!(expected_hbond_count("UA"), 2);
/// assert_eq!(expected_hbond_count("AC"), 2);
/// ```
pub fn expected_hbond_count(sequence: &str) -> usize {
    match sequence {
        "GC" | "CG" => 3,
        _ => 2,
    }
}

/// The three components of a pair quality score, each already rounded.
#[derive(Debug, Clone, Copy)]
pub struct ScoreComponents {
    pub rmsd: f64,
    pub coverage: f64,
    pub quality: f64,
}

fn round3(x: f64) -> f64 { (x * 1000.0).round() / 1000.0 }

/// Computes composite 0-1 quality scores for pair ranking; higher is better.
///
/// The score blends three components: how closely the pair matches its
/// canonical template (RMSD), how many of the expected hydrogen bonds were
/// found (coverage) and how good those bonds look geometrically (quality).
pub struct QualityScorer {
    rmsd_weight: f64,
    coverage_weight: f64,
    quality_weight: f64,
}

impl Default for QualityScorer {
    fn default() -> Self { QualityScorer::new(0.3, 0.4, 0.3) }
}

impl QualityScorer {

    /// Creates a scorer with explicit component weights.
    pub fn new(rmsd_weight: f64, coverage_weight: f64, quality_weight: f64) -> QualityScorer {
        QualityScorer { rmsd_weight, coverage_weight, quality_weight }
    }

    /// Scores a validated candidate pair.
    ///
    /// Only base-base hydrogen bonds enter the coverage and quality
    /// components. When no template RMSD is available the composite geometry
    /// metric of the validation stands in, scaled down by ten. An invalid
    /// candidate always scores 0.
    pub fn compute_score(&self, validation: &ValidationResult, sequence: &str,
                         hbonds: &[HBond], rmsd: Option<f64>) -> f64 {

        if !validation.is_valid { return 0.0; }

        let rmsd = rmsd.unwrap_or(validation.quality_score / 10.0);
        let base_base: Vec<&HBond> = hbonds.iter().filter(|hb| hb.is_base_base()).collect();
        return self.compute_bp_score(sequence, rmsd, &base_base).0;
    }

    /// Scores a pair from its sequence, template RMSD and base-base bonds.
    ///
    /// Returns the total in [0, 1] together with the individual components;
    /// everything is rounded to three decimals.
    pub fn compute_bp_score(&self, sequence: &str, rmsd: f64,
                            hbonds: &[&HBond]) -> (f64, ScoreComponents) {

        let expected = expected_hbond_count(sequence);

        let rmsd_score = Self::rmsd_score(rmsd);
        let coverage_score = Self::coverage_score(hbonds, expected);
        let quality_score = Self::hbond_quality(hbonds, rmsd);

        let total = self.rmsd_weight * rmsd_score
            + self.coverage_weight * coverage_score
            + self.quality_weight * quality_score;

        let components = ScoreComponents {
            rmsd: round3(rmsd_score),
            coverage: round3(coverage_score),
            quality: round3(quality_score),
        };
        return (round3(total), components);
    }

    // 1.0 up to 0.3 A, 0.0 from 1.0 A, linear in between
    fn rmsd_score(rmsd: f64) -> f64 {
        if rmsd <= 0.3 { return 1.0; }
        if rmsd >= 1.0 { return 0.0; }
        return 1.0 - (rmsd - 0.3) / 0.7;
    }

    // found/expected, capped at 1; extended bonds earn partial credit
    fn coverage_score(hbonds: &[&HBond], expected: usize) -> f64 {
        if expected == 0 { return 0.0; }
        let found: f64 = hbonds.iter()
            .map(|hb| if hb.extended { EXTENDED_BOND_WEIGHT } else { 1.0 })
            .sum();
        return (found / expected as f64).min(1.0);
    }

    fn hbond_quality(hbonds: &[&HBond], rmsd: f64) -> f64 {
        if hbonds.is_empty() { return 0.0; }

        let leniency = Self::geometry_leniency(rmsd);
        let mut total = 0.0;
        for hb in hbonds {
            let dist_score = Self::distance_score(hb.distance, leniency);
            let align_score = Self::alignment_score(hb.alignment_score);
            total += 0.7 * dist_score + 0.3 * align_score;
        }
        return total / hbonds.len() as f64;
    }

    // a clean template fit buys slack for stretched bonds
    fn geometry_leniency(rmsd: f64) -> f64 {
        if rmsd <= 0.5 { return 1.0; }
        if rmsd >= 0.8 { return 0.0; }
        return 1.0 - (rmsd - 0.5) / 0.3;
    }

    fn distance_score(dist: f64, leniency: f64) -> f64 {
        if (IDEAL_DISTANCE_MIN..=IDEAL_DISTANCE_MAX).contains(&dist) { return 1.0; }

        if dist < IDEAL_DISTANCE_MIN {
            return (1.0 - (IDEAL_DISTANCE_MIN - dist) / 0.5).max(0.5);
        }

        let lenient_max = IDEAL_DISTANCE_MAX + leniency;
        if dist <= lenient_max { return 1.0; }
        return (1.0 - (dist - lenient_max) / 0.5).max(0.0);
    }

    // The detector reports slot alignment on a -2..2 scale where HIGHER is
    // better; the scorer works on the inverted 0..4 scale (2 - raw), where
    // anything at or below 1.0 is perfect and 2.0 or above scores zero.
    fn alignment_score(raw_alignment: f64) -> f64 {
        let inverted = 2.0 - raw_alignment;
        if inverted <= 1.0 { return 1.0; }
        if inverted >= 2.0 { return 0.0; }
        return 1.0 - (inverted - 1.0);
    }

    /// Letter grade for diagnostics output.
    ///
    /// ```
    /// use basepairs_pairs::QualityScorer;
    /// assert_eq!(QualityScorer::score_to_grade(0.93), 'A');
    /// assert_eq!(QualityScorer::score_to_grade(0.65), 'D');
    /// assert_eq!(QualityScorer::score_to_grade(0.2), 'F');
    /// ```
    pub fn score_to_grade(score: f64) -> char {
        if score >= 0.9 { return 'A'; }
        if score >= 0.8 { return 'B'; }
        if score >= 0.7 { return 'C'; }
        if score >= 0.6 { return 'D'; }
        return 'F';
    }
}
