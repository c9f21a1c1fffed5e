use std::fmt;
use std::ops::{Index, IndexMut, AddAssign, MulAssign};
use crate::vec3::Vec3;

/// Represents a 3x3 matrix, e.g. for linear 3D transformations.
///
/// Internally the matrix elements are stored as an `[f64; 9]` array in the order as follows:
/// ```text
///     | 0 1 2 |
/// m = | 3 4 5 |
///     | 6 7 8 |
/// ```
///
/// # Example
/// ```rust
/// use basepairs_geometry::{Matrix3x3, Vec3};
///
/// let vx = Vec3::new(0.0, 3.0, 6.0);
/// let vy = Vec3::new(1.0, 4.0, 7.0);
/// let vz = Vec3::new(2.0, 5.0, 8.0);
/// let mtx = Matrix3x3::from_column_vectors(&vx, &vy, &vz);
/// assert_eq!(mtx[0], 0.0); assert_eq!(mtx[3], 3.0); assert_eq!(mtx[7], 7.0);
/// ```
#[derive(Clone, Copy, Default)]
pub struct Matrix3x3 {
    array: [f64; 9],
}

impl Index<usize> for Matrix3x3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.array[i]
    }
}

impl IndexMut<usize> for Matrix3x3 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.array[i]
    }
}

impl fmt::Debug for Matrix3x3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "[ [{:.2}, {:.2}, {:.2}], [{:.2}, {:.2}, {:.2}], [{:.2}, {:.2}, {:.2}] ]",
            self.array[0], self.array[1], self.array[2], self.array[3], self.array[4],
            self.array[5], self.array[6], self.array[7], self.array[8]
        )
    }
}

impl AddAssign<&Matrix3x3> for Matrix3x3 {
    /// The `+=` operator, adding another matrix element-wise.
    fn add_assign(&mut self, rhs: &Matrix3x3) {
        for i in 0..9 { self[i] += rhs[i]; }
    }
}

impl MulAssign<f64> for Matrix3x3 {
    /// The `*=` operator, scaling every element by a constant.
    fn mul_assign(&mut self, scalar: f64) {
        for i in 0..9 { self[i] *= scalar; }
    }
}

impl PartialEq for Matrix3x3 {
    fn eq(&self, other: &Self) -> bool {
        self.array.iter().zip(other.array.iter()).all(|(a, b)| a == b)
    }
}

impl Matrix3x3 {

    /// Constructs a new Matrix3x3 object from an array of 9 elements given in row-major order.
    pub fn from_array(m: [f64; 9]) -> Self {
        Matrix3x3 { array: m }
    }

    /// Creates a Matrix3x3 from three vectors, representing the columns of the matrix.
    pub fn from_column_vectors(a: &Vec3, b: &Vec3, c: &Vec3) -> Self {
        Self::from_array([a.x, b.x, c.x, a.y, b.y, c.y, a.z, b.z, c.z])
    }

    /// Creates a Matrix3x3 from three vectors, representing the rows of the matrix.
    pub fn from_row_vectors(a: &Vec3, b: &Vec3, c: &Vec3) -> Self {
        Self::from_array([a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z])
    }

    /// Two-index access into the row-major storage.
    pub fn elem(&self, row: usize, col: usize) -> f64 {
        self[row * 3 + col]
    }

    /// Returns a column of this matrix as a vector.
    ///
    /// # Example
    /// ```
    /// use basepairs_geometry::{Matrix3x3, Vec3};
    /// let m = Matrix3x3::identity();
    /// assert_eq!(m.column(2), Vec3::new(0.0, 0.0, 1.0));
    /// ```
    pub fn column(&self, col: usize) -> Vec3 {
        Vec3::new(self[col], self[3 + col], self[6 + col])
    }

    /// Returns a row of this matrix as a vector.
    pub fn row(&self, row: usize) -> Vec3 {
        Vec3::new(self.elem(row, 0), self.elem(row, 1), self.elem(row, 2))
    }

    /// Applies this matrix to a vector, storing the product back in `rhs`.
    pub fn mul_vec_mut(&self, rhs: &mut Vec3) {
        *rhs = Matrix3x3::mul_vec_s(self, rhs);
    }

    /// Matrix-by-vector product as a new vector.
    ///
    /// Each output component is the dot product of the corresponding matrix
    /// row with the input vector.
    ///
    /// # Example
    /// ```rust
    /// use basepairs_geometry::{Matrix3x3, Vec3};
    ///
    /// let mat = Matrix3x3::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    /// let vec = Vec3::new(1.0, 2.0, 3.0);
    /// let result = Matrix3x3::mul_vec_s(&mat, &vec);
    /// assert_eq!(result, Vec3::new(14.0, 32.0, 50.0));
    /// ```
    pub fn mul_vec_s(mat: &Matrix3x3, vec: &Vec3) -> Vec3 {
        return Vec3::new(
            Vec3::dot(&mat.row(0), vec),
            Vec3::dot(&mat.row(1), vec),
            Vec3::dot(&mat.row(2), vec),
        );
    }

    /// Determinant, evaluated as the scalar triple product of the rows.
    ///
    /// For a rotation matrix this is +1; a reflection gives -1.
    pub fn det(&self) -> f64 {
        return Vec3::dot(&self.row(0), &Vec3::cross(&self.row(1), &self.row(2)));
    }

    /// Transposes this matrix in-place by swapping the off-diagonal pairs.
    ///
    /// # Example
    /// ```
    /// use basepairs_geometry::{Matrix3x3, Vec3};
    /// let mut m = Matrix3x3::from_row_vectors(&Vec3::new(1.0, 2.0, 3.0),
    ///     &Vec3::new(4.0, 5.0, 6.0), &Vec3::new(7.0, 8.0, 9.0));
    /// m.transpose();
    /// assert_eq!(m.row(0), Vec3::new(1.0, 4.0, 7.0));
    /// ```
    pub fn transpose(&mut self) {
        self.array.swap(1, 3);
        self.array.swap(2, 6);
        self.array.swap(5, 7);
    }

    /// Returns a 3x3 identity matrix.
    pub fn identity() -> Self {
        let mut m = Matrix3x3::default();
        m[0] = 1.0;
        m[4] = 1.0;
        m[8] = 1.0;
        return m;
    }
}
