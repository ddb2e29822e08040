use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use crate::feq;
use crate::tuple::Tuple;

/// Row-major storage and `(row, col)` indexing shared by every matrix size.
macro_rules! square_matrix {
    ($name:ident, $n:expr) => {
        impl $name {
            /// A matrix of zeros.
            pub fn zero() -> $name {
                $name { rows: [[0.0; $n]; $n] }
            }
        }

        impl From<[[f64; $n]; $n]> for $name {
            fn from(rows: [[f64; $n]; $n]) -> $name {
                $name { rows }
            }
        }

        impl Index<(usize, usize)> for $name {
            type Output = f64;

            fn index(&self, (row, col): (usize, usize)) -> &f64 {
                &self.rows[row][col]
            }
        }

        impl IndexMut<(usize, usize)> for $name {
            fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
                &mut self.rows[row][col]
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &$name) -> bool {
                self.rows.iter().flatten()
                    .zip(other.rows.iter().flatten())
                    .all(|(a, b)| feq(*a, *b))
            }
        }
    };
}

/// Copies `src` into `dst`, skipping one row and one column.
macro_rules! drop_row_col {
    ($src:expr, $dst:expr, $n:expr, $row:expr, $col:expr) => {{
        for (r, src_row) in (0..$n).filter(|r| *r != $row).enumerate() {
            for (c, src_col) in (0..$n).filter(|c| *c != $col).enumerate() {
                $dst[(r, c)] = $src[(src_row, src_col)];
            }
        }
    }};
}

fn sign(row: usize, col: usize) -> f64 {
    if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
}

/// A 2x2 matrix, the base case of cofactor expansion.
#[derive(Copy, Clone, Debug)]
pub struct Matrix2 {
    rows: [[f64; 2]; 2],
}

square_matrix!(Matrix2, 2);

impl Matrix2 {
    pub fn determinant(&self) -> f64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

/// A 3x3 matrix. Only produced as a submatrix of a 4x4 matrix.
#[derive(Copy, Clone, Debug)]
pub struct Matrix3 {
    rows: [[f64; 3]; 3],
}

square_matrix!(Matrix3, 3);

impl Matrix3 {
    pub fn submatrix(&self, row: usize, col: usize) -> Matrix2 {
        let mut sub = Matrix2::zero();
        drop_row_col!(self, sub, 3, row, col);
        sub
    }

    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        self.minor(row, col) * sign(row, col)
    }

    pub fn determinant(&self) -> f64 {
        (0..3).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }
}

/// A 4x4 matrix over homogeneous coordinates.
///
/// Matrices are value objects: every operation returns a new matrix, nothing
/// mutates in place after construction. Code that needs an inverse over and
/// over (shapes, patterns, the camera) computes it once when its transform is
/// assigned and keeps it next to the original.
///
/// # Examples
///
/// ```
/// # use phong_tracer::matrix::Matrix;
/// # use phong_tracer::transform::translation;
/// let m = translation(1.0, 2.0, 3.0);
/// let inv = m.inverse().unwrap();
/// assert_eq!(m * inv, Matrix::identity());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Matrix {
    rows: [[f64; 4]; 4],
}

square_matrix!(Matrix, 4);

impl Default for Matrix {
    fn default() -> Matrix {
        Matrix::identity()
    }
}

impl From<[f64; 16]> for Matrix {
    fn from(data: [f64; 16]) -> Matrix {
        let mut m = Matrix::zero();
        for (i, v) in data.iter().enumerate() {
            m[(i / 4, i % 4)] = *v;
        }

        m
    }
}

impl Matrix {
    pub fn identity() -> Matrix {
        let mut m = Matrix::zero();
        for i in 0..4 {
            m[(i, i)] = 1.0;
        }

        m
    }

    pub fn at(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    /// Element-wise comparison with an explicit tolerance.
    ///
    /// `==` uses the crate-wide epsilon; this is for callers that need a
    /// tighter or looser bound.
    pub fn approx_eq(&self, other: &Matrix, epsilon: f64) -> bool {
        self.rows.iter().flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix::zero();
        for r in 0..4 {
            for c in 0..4 {
                t[(c, r)] = self[(r, c)];
            }
        }

        t
    }

    /// The 3x3 matrix left over after deleting `row` and `col`.
    pub fn submatrix(&self, row: usize, col: usize) -> Matrix3 {
        let mut sub = Matrix3::zero();
        drop_row_col!(self, sub, 4, row, col);
        sub
    }

    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        self.minor(row, col) * sign(row, col)
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        (0..4).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// The inverse, built from the transposed cofactor matrix divided by the
    /// determinant. `None` when the determinant is zero.
    pub fn inverse(&self) -> Option<Matrix> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }

        let mut inv = Matrix::zero();
        for r in 0..4 {
            for c in 0..4 {
                inv[(c, r)] = self.cofactor(r, c) / det;
            }
        }

        Some(inv)
    }
}

/// Matrix product. Transforms compose right to left: in `a * b`, `b` is
/// applied first.
impl Mul<Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, other: Matrix) -> Matrix {
        let mut m = Matrix::zero();
        for r in 0..4 {
            for c in 0..4 {
                m[(r, c)] = (0..4).map(|k| self[(r, k)] * other[(k, c)]).sum();
            }
        }

        m
    }
}

impl Mul<Tuple> for Matrix {
    type Output = Tuple;

    fn mul(self, t: Tuple) -> Tuple {
        let row = |r: usize| {
            self[(r, 0)] * t.x
                + self[(r, 1)] * t.y
                + self[(r, 2)] * t.z
                + self[(r, 3)] * t.w
        };

        Tuple::new(row(0), row(1), row(2), row(3))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "|")?;
            for v in row.iter() {
                write!(f, " {} |", v)?;
            }

            if i != 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn construct_and_inspect() {
    let m: Matrix = [  1.0,  2.0,  3.0,  4.0,
                       5.5,  6.5,  7.5,  8.5,
                       9.0, 10.0, 11.0, 12.0,
                      13.5, 14.5, 15.5, 16.5, ].into();

    assert_eq!(m.at(0, 3), 4.0);
    assert_eq!(m.at(1, 0), 5.5);
    assert_eq!(m.at(3, 2), 15.5);
}

#[test]
fn matrix_equality_uses_tolerance() {
    let a = Matrix::identity();
    let mut b = Matrix::identity();
    b[(2, 1)] = 0.00001;

    assert_eq!(a, b);
    assert!(!a.approx_eq(&b, 0.000001));

    b[(2, 1)] = 0.1;
    assert_ne!(a, b);
}

#[test]
fn multiply_matrices() {
    let a: Matrix = [ 1.0, 2.0, 3.0, 4.0,
                      5.0, 6.0, 7.0, 8.0,
                      9.0, 8.0, 7.0, 6.0,
                      5.0, 4.0, 3.0, 2.0, ].into();

    let b: Matrix = [ -2.0, 1.0, 2.0,  3.0,
                       3.0, 2.0, 1.0, -1.0,
                       4.0, 3.0, 6.0,  5.0,
                       1.0, 2.0, 7.0,  8.0, ].into();

    let p: Matrix = [ 20.0, 22.0,  50.0,  48.0,
                      44.0, 54.0, 114.0, 108.0,
                      40.0, 58.0, 110.0, 102.0,
                      16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(a * b, p);
}

#[test]
fn multiply_matrix_by_tuple() {
    let a: Matrix = [ 1.0, 2.0, 3.0, 4.0,
                      2.0, 4.0, 4.0, 2.0,
                      8.0, 6.0, 4.0, 1.0,
                      0.0, 0.0, 0.0, 1.0, ].into();

    assert_eq!(a * Tuple::new(1.0, 2.0, 3.0, 1.0),
        Tuple::new(18.0, 24.0, 33.0, 1.0));
}

#[test]
fn identity_is_neutral() {
    let a: Matrix = [ 0.0, 1.0,  2.0,  4.0,
                      1.0, 2.0,  4.0,  8.0,
                      2.0, 4.0,  8.0, 16.0,
                      4.0, 8.0, 16.0, 32.0, ].into();
    let t = Tuple::new(1.0, 2.0, 3.0, 4.0);

    assert_eq!(Matrix::identity() * a, a);
    assert_eq!(a * Matrix::identity(), a);
    assert_eq!(Matrix::identity() * t, t);
}

#[test]
fn transpose() {
    let a: Matrix = [ 0.0, 9.0, 3.0, 0.0,
                      9.0, 8.0, 0.0, 8.0,
                      1.0, 8.0, 5.0, 3.0,
                      0.0, 0.0, 5.0, 8.0, ].into();

    let t: Matrix = [ 0.0, 9.0, 1.0, 0.0,
                      9.0, 8.0, 8.0, 0.0,
                      3.0, 0.0, 5.0, 5.0,
                      0.0, 8.0, 3.0, 8.0, ].into();

    assert_eq!(a.transpose(), t);
    assert_eq!(Matrix::identity().transpose(), Matrix::identity());
}

#[test]
fn determinant_2x2() {
    let a: Matrix2 = [[1.0, 5.0], [-3.0, 2.0]].into();

    assert_eq!(a.determinant(), 17.0);
}

#[test]
fn submatrices() {
    let a: Matrix3 = [[ 1.0, 5.0,  0.0],
                      [-3.0, 2.0,  7.0],
                      [ 0.0, 6.0, -3.0]].into();
    let s: Matrix2 = [[-3.0, 2.0], [0.0, 6.0]].into();
    assert_eq!(a.submatrix(0, 2), s);

    let b: Matrix = [ -6.0, 1.0,  1.0, 6.0,
                      -8.0, 5.0,  8.0, 6.0,
                      -1.0, 0.0,  8.0, 2.0,
                      -7.0, 1.0, -1.0, 1.0, ].into();
    let t: Matrix3 = [[-6.0,  1.0, 6.0],
                      [-8.0,  8.0, 6.0],
                      [-7.0, -1.0, 1.0]].into();
    assert_eq!(b.submatrix(2, 1), t);
}

#[test]
fn minors_and_cofactors_3x3() {
    let a: Matrix3 = [[3.0,  5.0,  0.0],
                      [2.0, -1.0, -7.0],
                      [6.0, -1.0,  5.0]].into();

    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn determinant_3x3() {
    let a: Matrix3 = [[ 1.0, 2.0,  6.0],
                      [-5.0, 8.0, -4.0],
                      [ 2.0, 6.0,  4.0]].into();

    assert_eq!(a.cofactor(0, 0), 56.0);
    assert_eq!(a.cofactor(0, 1), 12.0);
    assert_eq!(a.cofactor(0, 2), -46.0);
    assert_eq!(a.determinant(), -196.0);
}

#[test]
fn determinant_4x4() {
    let a: Matrix = [ -2.0, -8.0,  3.0,  5.0,
                      -3.0,  1.0,  7.0,  3.0,
                       1.0,  2.0, -9.0,  6.0,
                      -6.0,  7.0,  7.0, -9.0, ].into();

    assert_eq!(a.cofactor(0, 0), 690.0);
    assert_eq!(a.cofactor(0, 1), 447.0);
    assert_eq!(a.cofactor(0, 2), 210.0);
    assert_eq!(a.cofactor(0, 3), 51.0);
    assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn invertibility() {
    let a: Matrix = [ 6.0,  4.0, 4.0,  4.0,
                      5.0,  5.0, 7.0,  6.0,
                      4.0, -9.0, 3.0, -7.0,
                      9.0,  1.0, 7.0, -6.0, ].into();

    let b: Matrix = [ -4.0,  2.0, -2.0, -3.0,
                       9.0,  6.0,  2.0,  6.0,
                       0.0, -5.0,  1.0, -5.0,
                       0.0,  0.0,  0.0,  0.0, ].into();

    assert_eq!(a.determinant(), -2120.0);
    assert!(a.is_invertible());
    assert_eq!(b.determinant(), 0.0);
    assert!(!b.is_invertible());
    assert!(b.inverse().is_none());
}

#[test]
fn inverse() {
    let a: Matrix = [ -5.0,  2.0,  6.0, -8.0,
                       1.0, -5.0,  1.0,  8.0,
                       7.0,  7.0, -6.0, -7.0,
                       1.0, -3.0,  7.0,  4.0, ].into();

    let i: Matrix = [  0.21805,  0.45113,  0.24060, -0.04511,
                      -0.80827, -1.45677, -0.44361,  0.52068,
                      -0.07895, -0.22368, -0.05263,  0.19737,
                      -0.52256, -0.81391, -0.30075,  0.30639, ].into();

    let b = a.inverse().unwrap();
    assert_eq!(a.determinant(), 532.0);
    assert_eq!(a.cofactor(2, 3), -160.0);
    assert!(feq(b.at(3, 2), -160.0 / 532.0));
    assert_eq!(b, i);
}

#[test]
fn inverse_round_trip() {
    let a: Matrix = [  3.0, -9.0,  7.0,  3.0,
                       3.0, -8.0,  2.0, -9.0,
                      -4.0,  4.0,  4.0,  1.0,
                      -6.0,  5.0, -1.0,  1.0, ].into();

    let b: Matrix = [ 8.0,  2.0, 2.0, 2.0,
                      3.0, -1.0, 7.0, 0.0,
                      7.0,  0.0, 5.0, 4.0,
                      6.0, -2.0, 0.0, 5.0, ].into();

    let inv_a = a.inverse().unwrap();
    assert!((a * inv_a).approx_eq(&Matrix::identity(), 1e-5));
    assert!((a * b * b.inverse().unwrap()).approx_eq(&a, 1e-5));
}

#[test]
fn transpose_and_inverse_commute() {
    let a: Matrix = [ 9.0,  3.0,  0.0,  9.0,
                     -5.0, -2.0, -6.0, -3.0,
                     -4.0,  9.0,  6.0,  4.0,
                     -7.0,  6.0,  6.0,  2.0, ].into();

    let lhs = a.transpose().inverse().unwrap();
    let rhs = a.inverse().unwrap().transpose();
    assert!(lhs.approx_eq(&rhs, 1e-5));
}

#[test]
fn display_rows() {
    let s = format!("{}", Matrix::identity());

    assert_eq!(s.lines().count(), 4);
    assert!(s.starts_with("| 1 | 0 | 0 | 0 |"));
}
