use crate::consts::FEQ_EPSILON;
use crate::tuple::Tuple;
use crate::ray::Ray;

/// The object-space definition of a surface.
///
/// Each variant only knows how to intersect a ray and compute a normal in its
/// own fixed frame. Placement in the world is always done by the `Shape`
/// that wraps it, which converts rays and points before calling in here.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Geometry {
    /// The unit sphere centered at the object-space origin.
    Sphere,

    /// The object-space xz plane (`y == 0`), extending forever.
    Plane,
}

impl Geometry {
    /// Returns the `t` values at which an object-space ray meets the surface.
    pub fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        match self {
            Geometry::Sphere => intersect_sphere(ray),
            Geometry::Plane => intersect_plane(ray),
        }
    }

    /// The surface normal at an object-space point on the surface.
    pub fn local_normal_at(&self, point: &Tuple) -> Tuple {
        match self {
            Geometry::Sphere => (*point - Tuple::origin()).normalize(),
            Geometry::Plane => Tuple::vector(0.0, 1.0, 0.0),
        }
    }
}

/// Solves `|O + tD|^2 = 1` for `t`.
///
/// A tangent ray still produces two (equal) roots; both are returned so a
/// hit always comes as an entry/exit pair.
fn intersect_sphere(ray: &Ray) -> Vec<f64> {
    let sphere_to_ray = ray.origin - Tuple::origin();

    let a = ray.direction.dot(&ray.direction);
    let b = 2.0 * ray.direction.dot(&sphere_to_ray);
    let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }

    let root = discriminant.sqrt();
    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);

    if t1 <= t2 { vec![t1, t2] } else { vec![t2, t1] }
}

/// A ray with (almost) no vertical motion is parallel to the plane, or lies
/// inside it. Both count as a miss.
fn intersect_plane(ray: &Ray) -> Vec<f64> {
    if ray.direction.y.abs() < FEQ_EPSILON {
        return Vec::new();
    }

    vec![-ray.origin.y / ray.direction.y]
}

#[test]
fn ray_through_sphere_center() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(Geometry::Sphere.local_intersect(&r), vec![4.0, 6.0]);
}

#[test]
fn ray_tangent_to_sphere() {
    let r = Ray::new(Tuple::point(0.0, 1.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(Geometry::Sphere.local_intersect(&r), vec![5.0, 5.0]);
}

#[test]
fn ray_misses_sphere() {
    let r = Ray::new(Tuple::point(0.0, 2.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert!(Geometry::Sphere.local_intersect(&r).is_empty());
}

#[test]
fn ray_starts_inside_sphere() {
    let r = Ray::new(Tuple::origin(), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(Geometry::Sphere.local_intersect(&r), vec![-1.0, 1.0]);
}

#[test]
fn sphere_behind_ray() {
    let r = Ray::new(Tuple::point(0.0, 0.0, 5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(Geometry::Sphere.local_intersect(&r), vec![-6.0, -4.0]);
}

#[test]
fn sphere_normals() {
    let s = Geometry::Sphere;
    let k = 3.0f64.sqrt() / 3.0;

    assert_eq!(s.local_normal_at(&Tuple::point(1.0, 0.0, 0.0)),
        Tuple::vector(1.0, 0.0, 0.0));
    assert_eq!(s.local_normal_at(&Tuple::point(0.0, 1.0, 0.0)),
        Tuple::vector(0.0, 1.0, 0.0));
    assert_eq!(s.local_normal_at(&Tuple::point(0.0, 0.0, 1.0)),
        Tuple::vector(0.0, 0.0, 1.0));

    let n = s.local_normal_at(&Tuple::point(k, k, k));
    assert_eq!(n, Tuple::vector(k, k, k));
    assert_eq!(n, n.normalize());
}

#[test]
fn plane_normal_is_constant() {
    let p = Geometry::Plane;

    for at in [
        Tuple::point(0.0, 0.0, 0.0),
        Tuple::point(10.0, 0.0, -10.0),
        Tuple::point(-5.0, 0.0, 150.0),
    ].iter() {
        assert_eq!(p.local_normal_at(at), Tuple::vector(0.0, 1.0, 0.0));
    }
}

#[test]
fn ray_parallel_to_plane() {
    let r = Ray::new(Tuple::point(0.0, 10.0, 0.0), Tuple::vector(0.0, 0.0, 1.0));

    assert!(Geometry::Plane.local_intersect(&r).is_empty());
}

#[test]
fn coplanar_ray_misses_plane() {
    let r = Ray::new(Tuple::origin(), Tuple::vector(0.0, 0.0, 1.0));

    assert!(Geometry::Plane.local_intersect(&r).is_empty());
}

#[test]
fn ray_hits_plane_from_above_and_below() {
    let above = Ray::new(Tuple::point(0.0, 1.0, 0.0), Tuple::vector(0.0, -1.0, 0.0));
    let below = Ray::new(Tuple::point(0.0, -1.0, 0.0), Tuple::vector(0.0, 1.0, 0.0));

    assert_eq!(Geometry::Plane.local_intersect(&above), vec![1.0]);
    assert_eq!(Geometry::Plane.local_intersect(&below), vec![1.0]);
}
