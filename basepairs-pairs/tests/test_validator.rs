#[cfg(test)]
mod test_geometric_validator {
    use basepairs_geometry::{assert_delta, Matrix3x3, Vec3};
    use basepairs_pairs::{GeometricValidator, ReferenceFrame, ValidationThresholds};

    fn frame_at(x: f64, y: f64, z: f64) -> ReferenceFrame {
        ReferenceFrame::new(Vec3::new(x, y, z), Matrix3x3::identity(), 0.0)
    }

    fn rotated_about_x(origin: Vec3, angle_deg: f64) -> ReferenceFrame {
        let a = angle_deg.to_radians();
        let rotation = Matrix3x3::from_array([
            1.0, 0.0, 0.0,
            0.0, a.cos(), -a.sin(),
            0.0, a.sin(), a.cos(),
        ]);
        ReferenceFrame::new(origin, rotation, 0.0)
    }

    #[test]
    fn coplanar_pair_is_valid() {
        let validator = GeometricValidator::default();
        let result = validator.validate(&frame_at(0.0, 0.0, 0.0), &frame_at(9.0, 0.0, 0.0),
                                        &Vec3::new(1.0, 0.0, 0.0), &Vec3::new(8.0, 0.0, 0.0));
        assert!(result.is_valid);
        assert!(result.rejection_reason.is_none());
        assert_delta!(result.dorg, 9.0, 1e-9);
        assert_delta!(result.d_v, 0.0, 1e-9);
        assert_delta!(result.plane_angle, 0.0, 1e-9);
        assert_delta!(result.d_nn, 7.0, 1e-9);
        assert_delta!(result.dir_z, 1.0, 1e-9);
    }

    #[test]
    fn origins_16_angstroms_apart_fail_the_distance_check() {
        let validator = GeometricValidator::default();
        let result = validator.validate(&frame_at(0.0, 0.0, 0.0), &frame_at(16.0, 0.0, 0.0),
                                        &Vec3::new(1.0, 0.0, 0.0), &Vec3::new(15.0, 0.0, 0.0));
        assert!(!result.distance_check);
        assert!(!result.is_valid);
        assert!(result.rejection_reason.unwrap().contains("dorg"));
    }

    #[test]
    fn vertical_offset_fails_the_stagger_check() {
        let validator = GeometricValidator::default();
        let result = validator.validate(&frame_at(0.0, 0.0, 0.0), &frame_at(0.0, 0.0, 3.0),
                                        &Vec3::new(0.0, 0.0, 0.0), &Vec3::new(0.0, 5.0, 0.0));
        assert!(!result.d_v_check);
        assert_delta!(result.d_v, 3.0, 1e-9);
        assert!(result.rejection_reason.unwrap().contains("d_v"));
    }

    #[test]
    fn tilted_planes_fail_the_angle_check() {
        let validator = GeometricValidator::default();
        let tilted = rotated_about_x(Vec3::new(8.0, 0.0, 0.0), 70.0);
        let result = validator.validate(&frame_at(0.0, 0.0, 0.0), &tilted,
                                        &Vec3::new(1.0, 0.0, 0.0), &Vec3::new(7.0, 0.0, 0.0));
        assert_delta!(result.plane_angle, 70.0, 1e-6);
        assert!(!result.plane_angle_check);
        assert!(result.rejection_reason.unwrap().contains("plane_angle"));
    }

    #[test]
    fn close_glycosidic_nitrogens_fail_the_dnn_check() {
        let validator = GeometricValidator::default();
        let result = validator.validate(&frame_at(0.0, 0.0, 0.0), &frame_at(9.0, 0.0, 0.0),
                                        &Vec3::new(3.0, 0.0, 0.0), &Vec3::new(6.0, 0.0, 0.0));
        assert!(!result.d_nn_check);
        assert!(result.rejection_reason.unwrap().contains("dNN"));
    }

    #[test]
    fn all_failed_checks_are_listed() {
        let validator = GeometricValidator::default();
        let result = validator.validate(&frame_at(0.0, 0.0, 0.0), &frame_at(0.0, 0.0, 20.0),
                                        &Vec3::new(1.0, 0.0, 0.0), &Vec3::new(8.0, 0.0, 0.0));
        let reason = result.rejection_reason.unwrap();
        assert!(reason.contains("dorg"));
        assert!(reason.contains("d_v"));
    }

    #[test]
    fn plane_angle_stays_within_0_and_90() {
        let validator = GeometricValidator::default();
        // an antiparallel partner: z axes point in opposite directions, but
        // the planes coincide
        let antiparallel = rotated_about_x(Vec3::new(9.0, 0.0, 0.0), 180.0);
        let result = validator.validate(&frame_at(0.0, 0.0, 0.0), &antiparallel,
                                        &Vec3::new(1.0, 0.0, 0.0), &Vec3::new(8.0, 0.0, 0.0));
        assert_delta!(result.dir_z, -1.0, 1e-9);
        assert_delta!(result.plane_angle, 0.0, 1e-6);
        assert!(result.is_valid);

        let perpendicular = rotated_about_x(Vec3::new(9.0, 0.0, 0.0), 90.0);
        let result = validator.validate(&frame_at(0.0, 0.0, 0.0), &perpendicular,
                                        &Vec3::new(1.0, 0.0, 0.0), &Vec3::new(8.0, 0.0, 0.0));
        assert_delta!(result.plane_angle, 90.0, 1e-6);
    }

    #[test]
    fn is_valid_is_the_conjunction_of_the_four_checks() {
        let validator = GeometricValidator::default();
        for (dx, dz, tilt) in [(9.0, 0.0, 0.0), (16.0, 0.0, 0.0), (9.0, 3.0, 0.0), (9.0, 0.0, 70.0)] {
            let frame2 = rotated_about_x(Vec3::new(dx, 0.0, dz), tilt);
            let result = validator.validate(&frame_at(0.0, 0.0, 0.0), &frame2,
                                            &Vec3::new(1.0, 0.0, 0.0), &Vec3::new(8.0, 0.0, 0.0));
            let expected = result.distance_check && result.d_v_check
                && result.plane_angle_check && result.d_nn_check;
            assert_eq!(result.is_valid, expected);
        }
    }

    #[test]
    fn quality_metric_and_presets() {
        let thresholds = ValidationThresholds::default();
        assert_delta!(thresholds.compute_quality_score(8.5, 1.2, 15.0), 10.383333333333333, 1e-12);

        let strict = ValidationThresholds::strict();
        assert_delta!(strict.max_dorg, 12.0, 1e-12);
        assert_delta!(strict.max_d_v, 2.0, 1e-12);
        assert_delta!(strict.max_plane_angle, 45.0, 1e-12);

        let relaxed = ValidationThresholds::relaxed();
        assert_delta!(relaxed.max_dorg, 18.0, 1e-12);
        assert_delta!(relaxed.max_plane_angle, 75.0, 1e-12);
        assert_delta!(relaxed.min_d_nn, 4.5, 1e-12);
    }
}
