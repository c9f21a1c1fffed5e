use basepairs_geometry::Vec3;

use crate::frame::ReferenceFrame;
use crate::thresholds::ValidationThresholds;

/// Outcome of the geometric validation of one candidate pair.
///
/// Carries the raw measurements, the per-threshold booleans, the composite
/// geometry metric (lower is better) and, on failure, a reason string naming
/// the failed checks.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// distance between the two frame origins (Angstroms)
    pub dorg: f64,
    /// vertical distance along the average helix axis (Angstroms)
    pub d_v: f64,
    /// angle between the base plane normals, in [0, 90] degrees
    pub plane_angle: f64,
    /// distance between the glycosidic nitrogens (Angstroms)
    pub d_nn: f64,
    /// dot product of the two x axes
    pub dir_x: f64,
    /// dot product of the two y axes
    pub dir_y: f64,
    /// dot product of the two z axes
    pub dir_z: f64,
    /// composite geometry metric; lower is better
    pub quality_score: f64,
    pub distance_check: bool,
    pub d_v_check: bool,
    pub plane_angle_check: bool,
    pub d_nn_check: bool,
    pub is_valid: bool,
    pub rejection_reason: Option<String>,
}

/// Validates base pair geometry from two reference frames.
///
/// # Example
/// ```
/// use basepairs_geometry::{Matrix3x3, Vec3};
/// use basepairs_pairs::{GeometricValidator, ReferenceFrame};
///
/// let frame1 = ReferenceFrame::new(Vec3::new(0.0, 0.0, 0.0), Matrix3x3::identity(), 0.0);
/// // a coplanar partner 9 A away, antiparallel about the x axis
/// let flipped = Matrix3x3::from_array([1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0]);
/// let frame2 = ReferenceFrame::new(Vec3::new(9.0, 0.0, 0.0), flipped, 0.0);
///
/// let validator = GeometricValidator::new(Default::default());
/// let result = validator.validate(&frame1, &frame2,
///                                 &Vec3::new(1.0, 0.0, 0.0), &Vec3::new(8.0, 0.0, 0.0));
/// assert!(result.is_valid);
/// assert!(result.plane_angle < 1e-9);
/// ```
pub struct GeometricValidator {
    thresholds: ValidationThresholds,
}

impl Default for GeometricValidator {
    fn default() -> Self { GeometricValidator::new(ValidationThresholds::default()) }
}

impl GeometricValidator {

    /// Creates a validator with the given thresholds.
    pub fn new(thresholds: ValidationThresholds) -> GeometricValidator {
        GeometricValidator { thresholds }
    }

    /// The thresholds this validator applies
    pub fn thresholds(&self) -> &ValidationThresholds { &self.thresholds }

    /// Validates the geometry between two base frames.
    ///
    /// `gly_n_pos1` and `gly_n_pos2` are the positions of the glycosidic
    /// nitrogens (N1 for pyrimidines, N9 for purines).
    pub fn validate(&self, frame1: &ReferenceFrame, frame2: &ReferenceFrame,
                    gly_n_pos1: &Vec3, gly_n_pos2: &Vec3) -> ValidationResult {

        let dorg_vec = Vec3::sub_s(frame1.origin(), frame2.origin());
        let dorg = dorg_vec.length();

        let dir_x = Vec3::dot(&frame1.x_axis(), &frame2.x_axis());
        let dir_y = Vec3::dot(&frame1.y_axis(), &frame2.y_axis());
        let dir_z = Vec3::dot(&frame1.z_axis(), &frame2.z_axis());

        let zave = Self::average_z_axis(frame1, frame2, dir_z);
        let d_v = Vec3::dot(&dorg_vec, &zave).abs();
        let plane_angle = dir_z.clamp(-1.0, 1.0).abs().acos().to_degrees();
        let d_nn = gly_n_pos1.distance_to(gly_n_pos2);
        let quality_score = self.thresholds.compute_quality_score(dorg, d_v, plane_angle);

        let distance_check = dorg <= self.thresholds.max_dorg;
        let d_v_check = d_v <= self.thresholds.max_d_v;
        let plane_angle_check = plane_angle <= self.thresholds.max_plane_angle;
        let d_nn_check = d_nn >= self.thresholds.min_d_nn;
        let is_valid = distance_check && d_v_check && plane_angle_check && d_nn_check;

        let rejection_reason = if is_valid { None } else {
            let mut failed: Vec<&str> = vec![];
            if !distance_check { failed.push("dorg"); }
            if !d_v_check { failed.push("d_v"); }
            if !plane_angle_check { failed.push("plane_angle"); }
            if !d_nn_check { failed.push("dNN"); }
            Some(format!("Failed: {}", failed.join(", ")))
        };

        return ValidationResult {
            dorg, d_v, plane_angle, d_nn,
            dir_x, dir_y, dir_z,
            quality_score,
            distance_check, d_v_check, plane_angle_check, d_nn_check,
            is_valid,
            rejection_reason,
        };
    }

    // Average helix axis from the two base plane normals; when the normals
    // cancel out, the first frame's normal stands in.
    fn average_z_axis(frame1: &ReferenceFrame, frame2: &ReferenceFrame, dir_z: f64) -> Vec3 {
        let z1 = frame1.z_axis();
        let z2 = frame2.z_axis();
        let zave = if dir_z > 0.0 { Vec3::add_s(&z1, &z2) } else { Vec3::sub_s(&z2, &z1) };
        if zave.length() > 1e-10 { return zave.normalized(); }
        return z1;
    }
}

/// Name of the first failed check of a validation, for diagnostics codes.
pub(crate) fn first_failed_metric(validation: &ValidationResult) -> &'static str {
    if !validation.distance_check { return "dorg"; }
    if !validation.d_v_check { return "d_v"; }
    if !validation.plane_angle_check { return "plane_angle"; }
    if !validation.d_nn_check { return "dNN"; }
    return "none";
}
