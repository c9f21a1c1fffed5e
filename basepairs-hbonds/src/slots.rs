use basepairs_geometry::{angle_between_deg, Vec3};

/// One seat on an atom for a donated hydrogen or for an accepting lone pair.
///
/// A slot points in the chemically preferred direction and remembers the
/// bonds already assigned to it, so that saturation and bifurcation rules can
/// be enforced. The same struct serves both roles; a donor's slots live in
/// the hydrogen cache of the finder, an acceptor's in the lone-pair cache.
///
/// # Example
/// ```
/// use basepairs_geometry::Vec3;
/// use basepairs_hbonds::Slot;
/// let mut slot = Slot::new(Vec3::new(0.0, 2.0, 0.0));
/// assert!((slot.direction().length() - 1.0).abs() < 1e-9);
/// assert!(slot.is_available());
/// slot.add_bond(&Vec3::new(0.1, 1.0, 0.0));
/// // a second bond only 6 degrees away would clash with the first
/// assert!(!slot.can_add_bond(&Vec3::new(0.0, 1.0, 0.0), 45.0));
/// assert!(slot.can_add_bond(&Vec3::new(1.0, 0.3, 0.0), 45.0));
/// ```
#[derive(Debug, Clone)]
pub struct Slot {
    direction: Vec3,
    max_bonds: usize,
    bond_directions: Vec<Vec3>,
}

impl Slot {

    /// Creates a slot pointing along a given direction, with the default capacity of two bonds.
    ///
    /// The direction is normalized on construction.
    pub fn new(direction: Vec3) -> Slot {
        Slot { direction: direction.normalized(), max_bonds: 2, bond_directions: vec![] }
    }

    /// Creates a slot with an explicit bond capacity.
    ///
    /// Ring-nitrogen lone pairs use capacity 1 (no bifurcation), the
    /// isotropic phosphate slots use capacity 3.
    pub fn with_max_bonds(direction: Vec3, max_bonds: usize) -> Slot {
        Slot { direction: direction.normalized(), max_bonds, bond_directions: vec![] }
    }

    /// The preferred direction of this slot; always unit length
    pub fn direction(&self) -> &Vec3 { &self.direction }

    /// The maximum number of bonds this slot can hold
    pub fn max_bonds(&self) -> usize { self.max_bonds }

    /// Directions of the bonds already recorded on this slot
    pub fn bond_directions(&self) -> &[Vec3] { &self.bond_directions }

    /// Checks if the slot can hold yet another bond
    pub fn is_available(&self) -> bool { self.bond_directions.len() < self.max_bonds }

    /// A slot is saturated once it holds as many bonds as its capacity allows
    pub fn is_saturated(&self) -> bool { !self.is_available() }

    /// Checks whether a bond along `new_direction` may be added.
    ///
    /// The first bond is always allowed. A further bond requires spare
    /// capacity and an angular separation of at least `min_angle_deg` from
    /// every bond already recorded here.
    pub fn can_add_bond(&self, new_direction: &Vec3, min_angle_deg: f64) -> bool {
        if self.bond_directions.is_empty() { return true; }
        if self.bond_directions.len() >= self.max_bonds { return false; }

        for existing in &self.bond_directions {
            if angle_between_deg(existing, new_direction) < min_angle_deg {
                return false;
            }
        }
        return true;
    }

    /// Records a bond using this slot; the stored direction is normalized.
    pub fn add_bond(&mut self, direction: &Vec3) {
        self.bond_directions.push(direction.normalized());
    }

    /// Forgets all recorded bonds, making the slot fresh again
    pub fn clear_bonds(&mut self) {
        self.bond_directions.clear();
    }
}
