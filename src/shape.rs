use crate::error::{ Result, TracerError };
use crate::tuple::Tuple;
use crate::ray::Ray;
use crate::matrix::Matrix;
use crate::material::Material;
use crate::geometry::Geometry;
use crate::intersect::{ Intersection, Intersections };

/// A surface placed in a scene.
///
/// A `Shape` pairs an object-space `Geometry` with the transform that puts
/// it in the world and the material it is shaded with. All conversion between
/// world space and object space happens here, once, for every kind of
/// geometry.
///
/// The inverse of the transform is computed whenever the transform is
/// assigned, so it is never recomputed per ray. A transform with no inverse
/// is accepted; the shape just becomes invisible.
///
/// # Examples
///
/// ```
/// # use phong_tracer::shape::Shape;
/// # use phong_tracer::ray::Ray;
/// # use phong_tracer::tuple::Tuple;
/// # use phong_tracer::transform::scaling;
/// let s = Shape::sphere().with_transform(scaling(2.0, 2.0, 2.0));
/// let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
///
/// let xs = s.intersect(&r);
/// assert_eq!(xs.len(), 2);
/// assert_eq!(xs[0].t, 3.0);
/// assert_eq!(xs[1].t, 7.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    pub material: Material,

    transform: Matrix,
    inverse: Option<Matrix>,
}

impl Shape {
    /// A shape with the identity transform and the default material.
    pub fn new(geometry: Geometry) -> Shape {
        Shape {
            geometry,
            material: Material::default(),
            transform: Matrix::identity(),
            inverse: Some(Matrix::identity()),
        }
    }

    pub fn sphere() -> Shape {
        Shape::new(Geometry::Sphere)
    }

    pub fn plane() -> Shape {
        Shape::new(Geometry::Plane)
    }

    pub fn with_transform(mut self, transform: Matrix) -> Shape {
        self.set_transform(transform);
        self
    }

    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    /// The object-to-world transform.
    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Matrix) {
        self.transform = transform;
        self.inverse = transform.inverse();
    }

    /// The world-to-object transform, if the shape's transform is invertible.
    pub fn inverse_transform(&self) -> Option<&Matrix> {
        self.inverse.as_ref()
    }

    pub fn is_renderable(&self) -> bool {
        self.inverse.is_some()
    }

    /// Maps a world-space point into this shape's object space.
    pub fn world_to_object(&self, point: Tuple) -> Result<Tuple> {
        let inv = self.inverse.ok_or(TracerError::NonInvertible)?;
        Ok(inv * point)
    }

    /// Intersects a world-space ray with this shape.
    ///
    /// The ray is carried into object space and handed to the geometry; the
    /// resulting `t` values are valid along the original world ray. A shape
    /// with a degenerate transform is never hit.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        let inv = match self.inverse {
            Some(ref inv) => inv,
            None => return Intersections::new(),
        };

        let local_ray = ray.transform(inv);
        self.geometry.local_intersect(&local_ray)
            .into_iter()
            .map(|t| Intersection::new(t, self))
            .collect()
    }

    /// The world-space surface normal at a world-space point.
    ///
    /// Normals are carried back to world space with the transposed inverse,
    /// which can leave junk in `w` when the transform translates; `w` is
    /// forced back to zero before normalizing.
    pub fn normal_at(&self, world_point: Tuple) -> Result<Tuple> {
        let inv = self.inverse.ok_or(TracerError::NonInvertible)?;

        let local_point = inv * world_point;
        let local_normal = self.geometry.local_normal_at(&local_point);

        let mut world_normal = inv.transpose() * local_normal;
        world_normal.w = 0.0;

        Ok(world_normal.normalize())
    }
}

#[cfg(test)]
use crate::transform::{ translation, scaling, rotation_z };

#[test]
fn default_transform_is_identity() {
    let s = Shape::sphere();

    assert_eq!(*s.transform(), Matrix::identity());
    assert_eq!(s.material, Material::default());
}

#[test]
fn assigning_transform_updates_inverse() {
    let mut s = Shape::sphere();
    s.set_transform(translation(2.0, 3.0, 4.0));

    assert_eq!(*s.transform(), translation(2.0, 3.0, 4.0));
    assert_eq!(*s.inverse_transform().unwrap(), translation(-2.0, -3.0, -4.0));
}

#[test]
fn intersect_scaled_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere().with_transform(scaling(2.0, 2.0, 2.0));
    let xs = s.intersect(&r);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 3.0);
    assert_eq!(xs[1].t, 7.0);
}

#[test]
fn intersect_translated_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere().with_transform(translation(5.0, 0.0, 0.0));

    assert!(s.intersect(&r).is_empty());
}

#[test]
fn intersections_are_tagged_with_the_shape() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere();
    let xs = s.intersect(&r);

    assert!(xs.iter().all(|i| std::ptr::eq(i.object, &s)));
}

#[test]
fn degenerate_transform_is_never_hit() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere().with_transform(scaling(1.0, 0.0, 1.0));

    assert!(!s.is_renderable());
    assert!(s.intersect(&r).is_empty());
    assert!(matches!(s.normal_at(Tuple::origin()), Err(TracerError::NonInvertible)));
}

#[test]
fn intersect_plane_from_above() {
    let r = Ray::new(Tuple::point(0.0, 1.0, 0.0), Tuple::vector(0.0, -1.0, 0.0));
    let p = Shape::plane();
    let xs = p.intersect(&r);

    assert_eq!(xs.len(), 1);
    assert_eq!(xs[0].t, 1.0);
    assert!(std::ptr::eq(xs[0].object, &p));
}

#[test]
fn normal_on_translated_sphere() {
    let s = Shape::sphere().with_transform(translation(0.0, 1.0, 0.0));
    let n = s.normal_at(Tuple::point(0.0, 1.70711, -0.70711)).unwrap();

    assert_eq!(n, Tuple::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn normal_on_transformed_sphere() {
    let s = Shape::sphere().with_transform(
        scaling(1.0, 0.5, 1.0) * rotation_z(std::f64::consts::PI / 5.0)
    );
    let h = 2.0f64.sqrt() / 2.0;
    let n = s.normal_at(Tuple::point(0.0, h, -h)).unwrap();

    assert_eq!(n, Tuple::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn normal_is_normalized_vector() {
    let s = Shape::sphere().with_transform(scaling(3.0, 1.0, 2.0));
    let n = s.normal_at(Tuple::point(3.0, 0.0, 0.0)).unwrap();

    assert!(n.is_vector());
    assert!((n.magnitude() - 1.0).abs() < 1e-6);
}

#[test]
fn normal_on_rotated_plane() {
    let p = Shape::plane().with_transform(rotation_z(std::f64::consts::FRAC_PI_2));
    let n = p.normal_at(Tuple::point(0.0, 3.0, 0.0)).unwrap();

    assert_eq!(n, Tuple::vector(-1.0, 0.0, 0.0));
}

#[test]
fn world_to_object_applies_inverse() {
    let s = Shape::sphere().with_transform(scaling(2.0, 2.0, 2.0));

    assert_eq!(s.world_to_object(Tuple::point(4.0, 2.0, 0.0)).unwrap(),
        Tuple::point(2.0, 1.0, 0.0));
}
