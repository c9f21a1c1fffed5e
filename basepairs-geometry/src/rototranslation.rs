use crate::matrix::Matrix3x3;
use crate::vec3::Vec3;

/// Rotates a vector about an arbitrary axis.
///
/// The rotation matrix is computed using the [Rodrigues' rotation formula](https://en.wikipedia.org/wiki/Rodrigues%27_rotation_formula):
/// ```math
/// R = \cos\theta I + \sin\theta K + (1 - \cos\theta) u u^T
/// ```
/// where `K` is the cross-product matrix of the (normalized) rotation axis `u`.
///
/// # Example
/// ```
/// use basepairs_geometry::{rotate_about_axis, Vec3};
/// let x = Vec3::new(1.0, 0.0, 0.0);
/// let z = Vec3::new(0.0, 0.0, 1.0);
/// let y = rotate_about_axis(&x, &z, 90.0);
/// assert!((y.y - 1.0).abs() < 1e-9);
/// // rotating back recovers the input
/// let back = rotate_about_axis(&y, &z, -90.0);
/// assert!(back.distance_to(&x) < 1e-9);
/// ```
pub fn rotate_about_axis(v: &Vec3, axis: &Vec3, angle_deg: f64) -> Vec3 {

    let u = axis.normalized();
    let angle_rad = angle_deg.to_radians();
    let cos_theta = angle_rad.cos();
    let sin_theta = angle_rad.sin();

    let mut u_dot = Vec3::outer(&u, &u);
    let mut u_cross = Matrix3x3::from_array(
        [0.0, -u.z, u.y,
         u.z, 0.0, -u.x,
         -u.y, u.x, 0.0]
    );

    let mut u_rot = Matrix3x3::identity();
    u_rot *= cos_theta;
    u_cross *= sin_theta;
    u_dot *= 1.0 - cos_theta;
    u_rot += &u_cross;
    u_rot += &u_dot;

    return Matrix3x3::mul_vec_s(&u_rot, v);
}
