use basepairs_chem::{standard_ring_atoms, Residue};
use basepairs_geometry::{kabsch, rmsd, Matrix3x3, Vec3};

/// Reference frame of a nucleotide base.
///
/// The frame is obtained by least-squares fitting the standard base onto the
/// measured ring atoms; the columns of the rotation matrix are the frame
/// axes, with the z axis normal to the base plane, and the origin sits at the
/// centroid of the measured ring. The residual RMSD of the fit is kept as a
/// quality metric.
#[derive(Debug, Clone)]
pub struct ReferenceFrame {
    origin: Vec3,
    rotation: Matrix3x3,
    rmsd_fit: f64,
}

impl ReferenceFrame {

    /// Assembles a frame from its parts.
    pub fn new(origin: Vec3, rotation: Matrix3x3, rmsd_fit: f64) -> ReferenceFrame {
        ReferenceFrame { origin, rotation, rmsd_fit }
    }

    /// Position of the frame origin
    pub fn origin(&self) -> &Vec3 { &self.origin }

    /// The rotation matrix; frame axes are its columns
    pub fn rotation(&self) -> &Matrix3x3 { &self.rotation }

    /// Residual RMSD of the template fit that produced this frame
    pub fn rmsd_fit(&self) -> f64 { self.rmsd_fit }

    /// First axis of the reference frame
    pub fn x_axis(&self) -> Vec3 { self.rotation.column(0) }

    /// Second axis of the reference frame
    pub fn y_axis(&self) -> Vec3 { self.rotation.column(1) }

    /// Third axis of the reference frame; the base plane normal
    pub fn z_axis(&self) -> Vec3 { self.rotation.column(2) }
}

/// Fits the standard base onto a residue's ring atoms and derives its frame.
///
/// Returns `None` when the base letter has no standard geometry or fewer than
/// three ring atoms are present in the structure.
///
/// # Example
/// ```
/// use basepairs_chem::{standard_ring_atoms, Residue};
/// use basepairs_pairs::extract_frame;
/// // a residue built directly from the standard geometry fits perfectly
/// let mut res = Residue::new("A-G-1", "G");
/// for (name, pos) in standard_ring_atoms("G").unwrap() { res.add_atom(name, *pos); }
/// let frame = extract_frame(&res).unwrap();
/// assert!(frame.rmsd_fit() < 1e-9);
/// // the standard base lies in the z = 0 plane, so z is the frame normal
/// assert!((frame.z_axis().z.abs() - 1.0).abs() < 1e-9);
/// ```
pub fn extract_frame(res: &Residue) -> Option<ReferenceFrame> {

    let template = standard_ring_atoms(res.base_type())?;

    let mut template_points: Vec<Vec3> = vec![];
    let mut measured_points: Vec<Vec3> = vec![];
    for (name, template_pos) in template {
        if let Some(measured_pos) = res.atom(name) {
            template_points.push(*template_pos);
            measured_points.push(*measured_pos);
        }
    }
    if template_points.len() < 3 { return None; }

    let sup = kabsch(&template_points, &measured_points)?;
    let fitted: Vec<Vec3> = template_points.iter().map(|p| sup.transform(p)).collect();
    let rmsd_fit = rmsd(&fitted, &measured_points);

    return Some(ReferenceFrame {
        origin: *sup.centroid_target(),
        rotation: *sup.rotation(),
        rmsd_fit,
    });
}
