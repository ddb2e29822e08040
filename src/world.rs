use crate::error::{ Result, TracerError };
use crate::tuple::Tuple;
use crate::color::Color;
use crate::ray::Ray;
use crate::light::PointLight;
use crate::shape::Shape;
use crate::intersect::{ Intersections, Computations };

/// A world with objects and light.
///
/// Worlds collect all objects as well as the light for rendering. Most
/// shading logic is performed here. A world must not be edited while it is
/// being rendered; the borrow checker enforces this for a single `render`
/// call.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub objects: Vec<Shape>,
    pub light: Option<PointLight>,
}

impl World {
    /// Creates an empty world with no objects and no light.
    pub fn new() -> World {
        Default::default()
    }

    pub fn with_light(mut self, light: PointLight) -> World {
        self.light = Some(light);
        self
    }

    pub fn with_object(mut self, object: Shape) -> World {
        self.objects.push(object);
        self
    }

    /// The world's light, which shading requires.
    pub fn light(&self) -> Result<&PointLight> {
        self.light.as_ref().ok_or(TracerError::MissingLight)
    }

    /// Intersects a ray against all objects in the world, sorted by `t`.
    pub fn intersect(&self, r: &Ray) -> Intersections<'_> {
        let mut intersections = Intersections::new();
        for obj in self.objects.iter() {
            intersections.append(&mut obj.intersect(r));
        }

        intersections.sort();
        intersections
    }

    /// Determines whether a point is shadowed.
    ///
    /// The shadow ray's direction is left unnormalized, so `t == 1` lands on
    /// the light. Only hits strictly before it count.
    pub fn is_shadowed(&self, p: Tuple) -> Result<bool> {
        let light = self.light()?;
        let r = Ray::new(p, light.position - p);

        Ok(match self.intersect(&r).hit() {
            Some(i) => i.t < 1.0,
            None => false,
        })
    }

    /// Calculates the color for a prepared hit, based on shadows and light.
    pub fn shade_hit(&self, comps: &Computations) -> Result<Color> {
        let light = self.light()?;
        let in_shadow = self.is_shadowed(comps.over_point)?;

        comps.object.material.lighting(comps.object, light,
            comps.over_point, comps.eyev, comps.normalv, in_shadow)
    }

    /// Determines the color seen along a ray.
    ///
    /// A ray that hits nothing is black, even in a world without a light.
    pub fn color_at(&self, r: &Ray) -> Result<Color> {
        match self.intersect(r).hit() {
            None => Ok(Color::black()),
            Some(i) => {
                let comps = i.prepare(r)?;
                self.shade_hit(&comps)
            },
        }
    }
}

/// Two concentric spheres lit from the upper left.
#[cfg(test)]
pub(crate) fn default_world() -> World {
    use crate::material::Material;
    use crate::transform::scaling;

    let outer = Shape::sphere().with_material(Material {
        color: Color::rgb(0.8, 1.0, 0.6),
        diffuse: 0.7,
        specular: 0.2,
        ..Default::default()
    });
    let inner = Shape::sphere().with_transform(scaling(0.5, 0.5, 0.5));

    World::new()
        .with_light(PointLight::new(Tuple::point(-10.0, 10.0, -10.0), Color::white()))
        .with_object(outer)
        .with_object(inner)
}

#[cfg(test)]
use crate::intersect::Intersection;

#[test]
fn new_world_is_empty() {
    let w = World::new();

    assert!(w.objects.is_empty());
    assert!(w.light.is_none());
}

#[test]
fn intersect_default_world_with_ray() {
    let w = default_world();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = w.intersect(&r);

    let ts: Vec<f64> = xs.iter().map(|i| i.t).collect();
    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn shade_intersection_from_outside() {
    let w = default_world();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    let comps = Intersection::new(4.0, &w.objects[0]).prepare(&r).unwrap();

    assert_eq!(w.shade_hit(&comps).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    let mut w = default_world();
    w.light = Some(PointLight::new(Tuple::point(0.0, 0.25, 0.0), Color::white()));
    let r = Ray::new(Tuple::origin(), Tuple::vector(0.0, 0.0, 1.0));

    let comps = Intersection::new(0.5, &w.objects[1]).prepare(&r).unwrap();

    assert_eq!(w.shade_hit(&comps).unwrap(), Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shade_intersection_in_shadow() {
    use crate::transform::translation;

    let w = World::new()
        .with_light(PointLight::new(Tuple::point(0.0, 0.0, -10.0), Color::white()))
        .with_object(Shape::sphere())
        .with_object(Shape::sphere().with_transform(translation(0.0, 0.0, 10.0)));
    let r = Ray::new(Tuple::point(0.0, 0.0, 5.0), Tuple::vector(0.0, 0.0, 1.0));

    let comps = Intersection::new(4.0, &w.objects[1]).prepare(&r).unwrap();

    assert_eq!(w.shade_hit(&comps).unwrap(), Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn shading_without_light_fails() {
    let mut w = default_world();
    w.light = None;
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert!(matches!(w.color_at(&r), Err(TracerError::MissingLight)));
    assert!(matches!(w.is_shadowed(Tuple::origin()), Err(TracerError::MissingLight)));
}

#[test]
fn color_ray_miss() {
    let w = default_world();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 1.0, 0.0));

    assert_eq!(w.color_at(&r).unwrap(), Color::black());
}

#[test]
fn miss_is_black_without_light() {
    let w = World::new();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(w.color_at(&r).unwrap(), Color::black());
}

#[test]
fn color_ray_hit() {
    let w = default_world();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(w.color_at(&r).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_behind_ray() {
    let mut w = default_world();
    w.objects[0].material.ambient = 1.0;
    w.objects[1].material.ambient = 1.0;
    let r = Ray::new(Tuple::point(0.0, 0.0, 0.75), Tuple::vector(0.0, 0.0, -1.0));

    assert_eq!(w.color_at(&r).unwrap(), w.objects[1].material.color);
}

#[test]
fn shadow_collinear_point_and_light() {
    let w = default_world();

    assert!(!w.is_shadowed(Tuple::point(0.0, 10.0, 0.0)).unwrap());
}

#[test]
fn shadow_object_between_point_and_light() {
    let w = default_world();

    assert!(w.is_shadowed(Tuple::point(10.0, -10.0, 10.0)).unwrap());
}

#[test]
fn shadow_object_behind_light() {
    let w = default_world();

    assert!(!w.is_shadowed(Tuple::point(-20.0, 20.0, -20.0)).unwrap());
}

#[test]
fn shadow_object_behind_point() {
    let w = default_world();

    assert!(!w.is_shadowed(Tuple::point(-2.0, 2.0, -2.0)).unwrap());
}

#[test]
fn degenerate_shape_is_skipped() {
    use crate::transform::scaling;

    let mut w = default_world();
    w.objects.push(Shape::sphere().with_transform(scaling(0.0, 0.0, 0.0)));
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(w.intersect(&r).len(), 4);
    assert_eq!(w.color_at(&r).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}
