use nalgebra::{Matrix3, Vector3, SVD};

use crate::matrix::Matrix3x3;
use crate::vec3::Vec3;

/// Optimal rigid superposition of one point set onto another.
///
/// A [`Superposition`](Superposition) maps a source point `p` onto the target set as
/// `R * (p - centroid_source) + centroid_target`; see [`kabsch()`](kabsch()).
#[derive(Debug, Clone)]
pub struct Superposition {
    rotation: Matrix3x3,
    centroid_source: Vec3,
    centroid_target: Vec3,
}

impl Superposition {

    /// Read-only access to the optimal rotation matrix; its determinant is always +1
    pub fn rotation(&self) -> &Matrix3x3 { &self.rotation }

    /// Centroid of the source point set
    pub fn centroid_source(&self) -> &Vec3 { &self.centroid_source }

    /// Centroid of the target point set
    pub fn centroid_target(&self) -> &Vec3 { &self.centroid_target }

    /// Applies this superposition to a point.
    pub fn transform(&self, p: &Vec3) -> Vec3 {
        let mut v = p.clone();
        v -= &self.centroid_source;
        self.rotation.mul_vec_mut(&mut v);
        v += &self.centroid_target;
        return v;
    }
}

// Internal conversions between Vec3 and nalgebra types
fn to_na(v: &Vec3) -> Vector3<f64> { Vector3::new(v.x, v.y, v.z) }

fn to_matrix3x3(m: &Matrix3<f64>) -> Matrix3x3 {
    Matrix3x3::from_array([
        m[(0, 0)], m[(0, 1)], m[(0, 2)],
        m[(1, 0)], m[(1, 1)], m[(1, 2)],
        m[(2, 0)], m[(2, 1)], m[(2, 2)],
    ])
}

/// Finds the rigid transformation that optimally superimposes `source` onto `target`.
///
/// Implements the Kabsch algorithm: both sets are centered, the covariance
/// matrix is decomposed by SVD and the rotation is assembled from the singular
/// vectors. When the raw rotation comes out as a reflection, the last column
/// of the right singular vectors is flipped, so the returned rotation always
/// has determinant +1.
///
/// Returns `None` when the sets differ in size or contain fewer than three points.
///
/// # Example
/// ```
/// use basepairs_geometry::{kabsch, rotate_about_axis, rmsd, Vec3};
/// let source = vec![Vec3::new(1.2, 0.0, 0.3), Vec3::new(0.0, 1.5, 0.0),
///                   Vec3::new(-0.7, 0.2, 1.0), Vec3::new(0.4, -0.9, -0.5)];
/// let axis = Vec3::new(1.0, 2.0, 3.0);
/// let target: Vec<Vec3> = source.iter().map(|p| rotate_about_axis(p, &axis, 35.0)).collect();
/// let sup = kabsch(&source, &target).unwrap();
/// let moved: Vec<Vec3> = source.iter().map(|p| sup.transform(p)).collect();
/// assert!(rmsd(&moved, &target) < 1e-6);
/// assert!((sup.rotation().det() - 1.0).abs() < 1e-9);
/// ```
pub fn kabsch(source: &[Vec3], target: &[Vec3]) -> Option<Superposition> {

    if source.len() != target.len() || source.len() < 3 { return None; }

    let centroid_source = Vec3::centroid(source);
    let centroid_target = Vec3::centroid(target);

    // --- covariance matrix of the centered sets
    let cs = to_na(&centroid_source);
    let ct = to_na(&centroid_target);
    let mut cov = Matrix3::<f64>::zeros();
    for (p, q) in source.iter().zip(target.iter()) {
        let pc = to_na(p) - cs;
        let qc = to_na(q) - ct;
        cov += pc * qc.transpose();
    }

    let svd = SVD::new(cov, true, true);
    let u = svd.u?;
    let v_t = svd.v_t?;
    let mut v = v_t.transpose();
    let mut rotation = v * u.transpose();

    // --- reflection correction: flip the last right singular vector
    if rotation.determinant() < 0.0 {
        let flipped = -v.column(2);
        v.set_column(2, &flipped);
        rotation = v * u.transpose();
    }

    return Some(Superposition {
        rotation: to_matrix3x3(&rotation),
        centroid_source,
        centroid_target,
    });
}

/// Root-mean-square deviation between two point sets of the same size.
///
/// The sets are compared as given; no superposition is performed here.
///
/// # Example
/// ```
/// use basepairs_geometry::{rmsd, Vec3};
/// let a = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
/// let b = vec![Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 1.0)];
/// assert!((rmsd(&a, &b) - 1.0).abs() < 1e-9);
/// ```
pub fn rmsd(a: &[Vec3], b: &[Vec3]) -> f64 {

    assert_eq!(a.len(), b.len(), "Point sets must have the same size");
    assert!(!a.is_empty(), "RMSD of empty point sets is undefined");

    let mut sum = 0.0;
    for (p, q) in a.iter().zip(b.iter()) {
        sum += p.distance_square_to(q);
    }
    return (sum / a.len() as f64).sqrt();
}
