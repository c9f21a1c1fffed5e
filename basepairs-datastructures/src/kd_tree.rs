//! A 3D k-d tree over labeled points.
//!
//! The tree splits space along one coordinate axis per level, cycling x, y, z
//! with depth. Every stored point carries an integer label, and a range query
//! hands those labels back, so the caller can map hits onto residues (or
//! whatever else the labels index). The pair finding pipeline feeds in one
//! point per residue reference frame and asks for all origins within a
//! cutoff.
//!
//! ```rust
//! use basepairs_datastructures::kd_tree::{create_kd_tree, find_within, LabeledPoint};
//! let mut points = vec![
//!     LabeledPoint::new(0, [0.1, 0.2, 0.0]),
//!     LabeledPoint::new(1, [0.2, 0.2, 0.0]),
//!     LabeledPoint::new(2, [1.1, 1.2, 0.0]),
//!     LabeledPoint::new(3, [2.2, 2.2, 0.0]),
//! ];
//! let root = create_kd_tree(&mut points).unwrap();
//! let mut neighbors = find_within(&root, &[0.3, 0.3, 0.0], 0.5);
//! neighbors.sort();
//! assert_eq!(neighbors, vec![0, 1]);
//! ```

use crate::BinaryTreeNode;

/// A 3D point tagged with an integer label.
#[derive(Clone, Copy, Debug)]
pub struct LabeledPoint {
    /// the label carried by this point, e.g. an index into a residue list
    pub label: usize,
    /// Cartesian coordinates of the point
    pub coords: [f64; 3],
}

impl LabeledPoint {
    /// Creates a new labeled point
    pub fn new(label: usize, coords: [f64; 3]) -> LabeledPoint {
        LabeledPoint { label, coords }
    }
}

/// Data stored in each node of a k-d tree
pub struct KdTreeData {
    /// the point this node branches on
    pub value: LabeledPoint,
    /// which coordinate axis the split runs along
    pub split_axis: usize,
}

fn distance_squared(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    return dx * dx + dy * dy + dz * dz;
}

// Median split: order the slice along the level's axis, branch on the middle
// point, hand each half to the next level.
fn build(points: &mut [LabeledPoint], depth: usize) -> Option<Box<BinaryTreeNode<KdTreeData>>> {

    if points.is_empty() { return None; }

    let axis = depth % 3;
    points.sort_by(|a, b| a.coords[axis].partial_cmp(&b.coords[axis]).unwrap());
    let mid = points.len() / 2;
    let pivot = points[mid];

    let mut node = BinaryTreeNode::new(KdTreeData { value: pivot, split_axis: axis });
    let (lower, upper) = points.split_at_mut(mid);
    node.left = build(lower, depth + 1);
    node.right = build(&mut upper[1..], depth + 1);
    return Some(Box::new(node));
}

/// Builds a k-d tree from a set of labeled points.
///
/// The input slice is re-ordered during the build. Returns `None` for an
/// empty input.
pub fn create_kd_tree(data: &mut [LabeledPoint]) -> Option<Box<BinaryTreeNode<KdTreeData>>> {
    return build(data, 0);
}

fn collect_within(node: &BinaryTreeNode<KdTreeData>, query: &[f64; 3],
                  radius_squared: f64, hits: &mut Vec<usize>) {

    let point = &node.value.value;
    if distance_squared(&point.coords, query) <= radius_squared {
        hits.push(point.label);
    }

    // the half holding the query is always searched; the other half only
    // when the splitting plane itself lies within the radius
    let offset = query[node.value.split_axis] - point.coords[node.value.split_axis];
    let (near, far) = if offset < 0.0 {
        (&node.left, &node.right)
    } else {
        (&node.right, &node.left)
    };

    if let Some(child) = near {
        collect_within(child, query, radius_squared, hits);
    }
    if offset * offset <= radius_squared {
        if let Some(child) = far {
            collect_within(child, query, radius_squared, hits);
        }
    }
}

/// Finds the labels of all points within a given radius from a query point.
///
/// Points exactly at the radius are included.
///
/// # Arguments
/// * `tree_root` - root of a tree built by [`create_kd_tree()`](create_kd_tree())
/// * `query` - Cartesian coordinates of the query point
/// * `radius` - the search distance cutoff (not squared)
pub fn find_within(tree_root: &Box<BinaryTreeNode<KdTreeData>>, query: &[f64; 3], radius: f64) -> Vec<usize> {
    let mut hits: Vec<usize> = vec![];
    collect_within(tree_root, query, radius * radius, &mut hits);
    return hits;
}
