#[cfg(test)]
mod test_vec3 {
    use basepairs_geometry::{angle_between_deg, assert_delta, Vec3};

    #[test]
    fn basic_arithmetics() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v += &Vec3::new(1.0, 1.0, 1.0);
        assert_delta!(v.x, 2.0, 1e-9);
        v -= &Vec3::new(2.0, 3.0, 4.0);
        assert_delta!(v.length(), 0.0, 1e-9);

        let mut w = Vec3::new(1.0, 2.0, 4.0);
        w /= 2.0;
        assert_delta!(w.z, 2.0, 1e-9);
        w *= 2.0;
        assert_delta!(w.y, 2.0, 1e-9);
    }

    #[test]
    fn normalization_is_idempotent() {
        let v = Vec3::new(3.0, -2.0, 1.0);
        let u = v.normalized();
        assert_delta!(u.length(), 1.0, 1e-9);
        let uu = u.normalized();
        assert_delta!(u.distance_to(&uu), 0.0, 1e-9);
    }

    #[test]
    fn degenerate_vector_is_returned_unchanged() {
        let tiny = Vec3::new(1e-12, 0.0, 0.0);
        let n = tiny.normalized();
        assert_eq!(n, tiny);
    }

    #[test]
    fn angles_between_vectors() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 5.0, 0.0);
        assert_delta!(angle_between_deg(&x, &y), 90.0, 1e-9);

        let mut neg_x = x.clone();
        neg_x.opposite();
        assert_delta!(angle_between_deg(&x, &neg_x), 180.0, 1e-9);

        // parallel vectors of different length: the clamp keeps acos() finite
        let long_x = Vec3::new(7.0, 0.0, 0.0);
        assert_delta!(angle_between_deg(&x, &long_x), 0.0, 1e-9);
    }

    #[test]
    fn cross_products_follow_right_hand_rule() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = Vec3::cross(&x, &y);
        assert_delta!(z.z, 1.0, 1e-9);
        let minus_z = Vec3::cross(&y, &x);
        assert_delta!(minus_z.z, -1.0, 1e-9);
    }

    #[test]
    fn centroid_of_cube_corners() {
        let corners: Vec<Vec3> = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]]
            .iter().map(|p| Vec3::from_array(p)).collect();
        let center = Vec3::centroid(&corners);
        assert_delta!(center.distance_to(&Vec3::from_float(0.5)), 0.0, 1e-9);
    }
}
