#[cfg(test)]
mod test_kd_tree {
    use basepairs_datastructures::kd_tree::{create_kd_tree, find_within, LabeledPoint};

    fn grid_points(n: usize) -> Vec<LabeledPoint> {
        // n x n x n grid with unit spacing, labeled in row-major order
        let mut points = vec![];
        let mut label = 0;
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    points.push(LabeledPoint::new(label, [i as f64, j as f64, k as f64]));
                    label += 1;
                }
            }
        }
        points
    }

    #[test]
    fn empty_input_gives_no_tree() {
        let mut points: Vec<LabeledPoint> = vec![];
        assert!(create_kd_tree(&mut points).is_none());
    }

    #[test]
    fn single_point_tree() {
        let mut points = vec![LabeledPoint::new(17, [1.0, 2.0, 3.0])];
        let root = create_kd_tree(&mut points).unwrap();
        assert!(root.is_leaf());
        assert_eq!(find_within(&root, &[1.0, 2.0, 3.0], 0.1), vec![17]);
        assert!(find_within(&root, &[5.0, 5.0, 5.0], 0.1).is_empty());
    }

    #[test]
    fn neighbors_on_a_grid() {
        let mut points = grid_points(5);
        let root = create_kd_tree(&mut points).unwrap();

        // query at a grid node: the node itself plus its 6 face neighbors at distance 1
        let mut hits = find_within(&root, &[2.0, 2.0, 2.0], 1.01);
        hits.sort();
        assert_eq!(hits.len(), 7);

        // points exactly at the radius are included
        let hits = find_within(&root, &[2.0, 2.0, 2.0], 1.0);
        assert_eq!(hits.len(), 7);
    }

    #[test]
    fn all_points_found_with_large_radius() {
        let mut points = grid_points(4);
        let n_all = points.len();
        let root = create_kd_tree(&mut points).unwrap();
        let hits = find_within(&root, &[1.5, 1.5, 1.5], 100.0);
        assert_eq!(hits.len(), n_all);
    }
}
