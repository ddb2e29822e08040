use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;

/// A homogeneous 4-component tuple.
///
/// Points carry `w == 1.0` and directions (vectors) carry `w == 0.0`. The
/// arithmetic below is plain component-wise arithmetic, which is exactly what
/// keeps the tag consistent: a point minus a point is a vector, a point plus a
/// vector is a point, and a vector plus a vector is a vector.
///
/// # Examples
///
/// ```
/// # use phong_tracer::tuple::Tuple;
/// let p = Tuple::point(3.0, 2.0, 1.0);
/// let v = Tuple::vector(5.0, 6.0, 7.0);
///
/// assert!((p + v).is_point());
/// assert!((p - Tuple::point(0.0, 0.0, 0.0)).is_vector());
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Tuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Tuple) -> bool {
        feq(self.x, other.x)
            && feq(self.y, other.y)
            && feq(self.z, other.z)
            && feq(self.w, other.w)
    }
}

impl Tuple {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Tuple {
        Tuple { x, y, z, w }
    }

    /// A position in space (`w == 1`).
    pub fn point(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, w: 1.0 }
    }

    /// A direction in space (`w == 0`).
    pub fn vector(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, w: 0.0 }
    }

    pub fn origin() -> Tuple {
        Tuple::point(0.0, 0.0, 0.0)
    }

    pub fn is_point(&self) -> bool {
        feq(self.w, 1.0)
    }

    pub fn is_vector(&self) -> bool {
        feq(self.w, 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scales the tuple to unit length.
    ///
    /// A zero-length tuple has no direction; normalizing one divides by zero
    /// and yields NaN components. Callers must not pass one in.
    pub fn normalize(&self) -> Tuple {
        *self / self.magnitude()
    }

    pub fn dot(&self, other: &Tuple) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// The 3-component cross product. `w` is ignored and the result is
    /// always a vector.
    pub fn cross(&self, other: &Tuple) -> Tuple {
        Tuple::vector(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Reflects `self` around `normal`: `v - n * 2 * dot(v, n)`.
    pub fn reflect(&self, normal: &Tuple) -> Tuple {
        *self - *normal * (2.0 * self.dot(normal))
    }
}

impl Add for Tuple {
    type Output = Tuple;

    fn add(self, other: Tuple) -> Tuple {
        Tuple::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl Sub for Tuple {
    type Output = Tuple;

    fn sub(self, other: Tuple) -> Tuple {
        Tuple::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl Neg for Tuple {
    type Output = Tuple;

    fn neg(self) -> Tuple {
        Tuple::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f64> for Tuple {
    type Output = Tuple;

    fn mul(self, s: f64) -> Tuple {
        Tuple::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

/// Scalar left-multiplication, so `t * ray.direction` reads naturally.
impl Mul<Tuple> for f64 {
    type Output = Tuple;

    fn mul(self, t: Tuple) -> Tuple {
        t * self
    }
}

impl Div<f64> for Tuple {
    type Output = Tuple;

    fn div(self, s: f64) -> Tuple {
        Tuple::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

impl From<[f64; 3]> for Tuple {
    /// Interprets a bare triple as a point.
    fn from(v: [f64; 3]) -> Tuple {
        Tuple::point(v[0], v[1], v[2])
    }
}

#[test]
fn point_has_w_of_one() {
    let a = Tuple::new(4.3, -4.2, 3.1, 1.0);

    assert!(a.is_point());
    assert!(!a.is_vector());
    assert_eq!(a, Tuple::point(4.3, -4.2, 3.1));
}

#[test]
fn vector_has_w_of_zero() {
    let a = Tuple::new(4.3, -4.2, 3.1, 0.0);

    assert!(a.is_vector());
    assert!(!a.is_point());
    assert_eq!(a, Tuple::vector(4.3, -4.2, 3.1));
}

#[test]
fn point_plus_vector_is_point() {
    let p = Tuple::point(3.0, -2.0, 5.0);
    let v = Tuple::vector(-2.0, 3.0, 1.0);

    assert_eq!(p + v, Tuple::point(1.0, 1.0, 6.0));
    assert!((v + v).is_vector());
}

#[test]
fn point_minus_point_is_vector() {
    let p1 = Tuple::point(3.0, 2.0, 1.0);
    let p2 = Tuple::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple::vector(-2.0, -4.0, -6.0));
}

#[test]
fn point_minus_vector_is_point() {
    let p = Tuple::point(3.0, 2.0, 1.0);
    let v = Tuple::vector(5.0, 6.0, 7.0);

    assert_eq!(p - v, Tuple::point(-2.0, -4.0, -6.0));
}

#[test]
fn negate_and_scale() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(-a, Tuple::new(-1.0, 2.0, -3.0, 4.0));
    assert_eq!(a * 3.5, Tuple::new(3.5, -7.0, 10.5, -14.0));
    assert_eq!(0.5 * a, Tuple::new(0.5, -1.0, 1.5, -2.0));
    assert_eq!(a / 2.0, Tuple::new(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn magnitude_of_vectors() {
    assert_eq!(Tuple::vector(0.0, 1.0, 0.0).magnitude(), 1.0);
    assert_eq!(Tuple::vector(-1.0, -2.0, -3.0).magnitude(), 14.0f64.sqrt());
}

#[test]
fn normalized_vectors_have_unit_length() {
    let vs = [
        Tuple::vector(4.0, 0.0, 0.0),
        Tuple::vector(1.0, 2.0, 3.0),
        Tuple::vector(-0.001, 250.0, 7.5),
    ];

    for v in vs.iter() {
        assert!((v.normalize().magnitude() - 1.0).abs() < 1e-6);
    }

    let s = 14.0f64.sqrt();
    assert_eq!(Tuple::vector(1.0, 2.0, 3.0).normalize(),
        Tuple::vector(1.0 / s, 2.0 / s, 3.0 / s));
}

#[test]
fn dot_and_cross() {
    let a = Tuple::vector(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
    assert_eq!(a.cross(&b), Tuple::vector(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Tuple::vector(1.0, -2.0, 1.0));
}

#[test]
fn cross_ignores_w() {
    let a = Tuple::point(1.0, 0.0, 0.0);
    let b = Tuple::point(0.0, 1.0, 0.0);

    assert_eq!(a.cross(&b), Tuple::vector(0.0, 0.0, 1.0));
}

#[test]
fn reflect_approaching_at_45_degrees() {
    let v = Tuple::vector(1.0, -1.0, 0.0);
    let n = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple::vector(1.0, 1.0, 0.0));
}

#[test]
fn reflect_off_slanted_surface() {
    let v = Tuple::vector(0.0, -1.0, 0.0);
    let n = Tuple::vector(2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple::vector(1.0, 0.0, 0.0));
}
