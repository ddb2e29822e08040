use crate::tuple::Tuple;
use crate::matrix::Matrix;

/// A parametric line `origin + t * direction`.
///
/// The direction is not required to be unit length. Transforming a ray into
/// a scaled shape's object space deliberately leaves it unnormalized so that
/// `t` values stay comparable between object and world space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Tuple,
    pub direction: Tuple,
}

impl Ray {
    pub fn new(origin: Tuple, direction: Tuple) -> Ray {
        Ray { origin, direction }
    }

    /// The point at distance `t` along the ray.
    pub fn position(&self, t: f64) -> Tuple {
        self.origin + t * self.direction
    }

    /// Applies `m` to both the origin and the direction.
    pub fn transform(&self, m: &Matrix) -> Ray {
        Ray {
            origin: *m * self.origin,
            direction: *m * self.direction,
        }
    }
}

#[test]
fn ray_position() {
    let r = Ray::new(Tuple::point(2.0, 3.0, 4.0), Tuple::vector(1.0, 0.0, 0.0));

    assert_eq!(r.position(0.0), Tuple::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple::point(4.5, 3.0, 4.0));
}

#[test]
fn translate_ray() {
    use crate::transform::translation;

    let r = Ray::new(Tuple::point(1.0, 2.0, 3.0), Tuple::vector(0.0, 1.0, 0.0));
    let t = r.transform(&translation(3.0, 4.0, 5.0));

    assert_eq!(t.origin, Tuple::point(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 1.0, 0.0));
}

#[test]
fn scale_ray() {
    use crate::transform::scaling;

    let r = Ray::new(Tuple::point(1.0, 2.0, 3.0), Tuple::vector(0.0, 1.0, 0.0));
    let t = r.transform(&scaling(2.0, 3.0, 4.0));

    assert_eq!(t.origin, Tuple::point(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 3.0, 0.0));
}
