use std::ops::Index;
use std::iter::FromIterator;

use crate::consts::SHADOW_BIAS;
use crate::error::Result;
use crate::tuple::Tuple;
use crate::ray::Ray;
use crate::shape::Shape;

/// An intersection.
///
/// Records that some ray met `object` at distance `t` along it. `t` may be
/// negative when the surface lies behind the ray origin.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub object: &'a Shape,
}

/// Two intersections are equal if their offsets match and they point at the
/// very same shape (not merely an identical one).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.object, other.object)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, object: &'a Shape) -> Intersection<'a> {
        Intersection { t, object }
    }

    /// Precomputes the state needed to shade this intersection.
    ///
    /// The normal always faces the eye: if the ray started inside the shape,
    /// it is flipped and `inside` is set.
    pub fn prepare(&self, ray: &Ray) -> Result<Computations<'a>> {
        let point = ray.position(self.t);
        let eyev = -ray.direction;
        let mut normalv = self.object.normal_at(point)?;

        let inside = normalv.dot(&eyev) < 0.0;
        if inside {
            normalv = -normalv;
        }

        Ok(Computations {
            t: self.t,
            object: self.object,
            point,
            over_point: point + normalv * SHADOW_BIAS,
            eyev,
            normalv,
            inside,
        })
    }
}

/// A collection of intersections.
///
/// Mostly a wrapper for a vector of `Intersection` objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intersections<'a> {
    intersections: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection<'a>> {
        self.intersections.iter()
    }

    /// Moves every intersection of `other` into this collection.
    pub fn append(&mut self, other: &mut Intersections<'a>) {
        self.intersections.append(&mut other.intersections);
    }

    /// Sorts the intersections by ascending `t`.
    ///
    /// The sort is stable, so equal offsets keep the order they were added
    /// in. NaN offsets compare as equal to everything.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
        );
    }

    /// The visible intersection: the one with the smallest non-negative `t`.
    ///
    /// Returns `None` when every intersection lies behind the ray. The input
    /// need not be sorted; among equal offsets the earliest one wins.
    ///
    /// ```
    /// # use phong_tracer::shape::Shape;
    /// # use phong_tracer::intersect::{ Intersection, Intersections };
    /// let s = Shape::sphere();
    /// let xs: Intersections = vec![
    ///     Intersection::new(5.0, &s),
    ///     Intersection::new(-3.0, &s),
    ///     Intersection::new(2.0, &s),
    /// ].into_iter().collect();
    ///
    /// assert_eq!(xs.hit().map(|i| i.t), Some(2.0));
    /// ```
    pub fn hit(&self) -> Option<Intersection<'a>> {
        self.intersections.iter()
            .filter(|i| i.t >= 0.0)
            .min_by(|a, b|
                a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
            )
            .copied()
    }
}

impl<'a> FromIterator<Intersection<'a>> for Intersections<'a> {
    fn from_iter<I: IntoIterator<Item = Intersection<'a>>>(iter: I)
        -> Intersections<'a> {
        Intersections { intersections: iter.into_iter().collect() }
    }
}

impl<'a> Index<usize> for Intersections<'a> {
    type Output = Intersection<'a>;

    fn index(&self, i: usize) -> &Intersection<'a> {
        &self.intersections[i]
    }
}

/// A record for computations associated with an `Intersection`.
#[derive(Clone, Debug)]
pub struct Computations<'a> {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// The object being intersected.
    pub object: &'a Shape,

    /// The point where the intersection occurs.
    pub point: Tuple,

    /// `point` nudged slightly off the surface along the normal. Shadow rays
    /// start here so a surface never shadows itself.
    pub over_point: Tuple,

    pub eyev: Tuple,

    /// The surface normal, flipped to face the eye.
    pub normalv: Tuple,

    /// Whether the ray originated inside the object.
    pub inside: bool,
}

#[cfg(test)]
use crate::transform::translation;

#[test]
fn intersection_holds_t_and_object() {
    let s = Shape::sphere();
    let i = Intersection::new(3.5, &s);

    assert_eq!(i.t, 3.5);
    assert!(std::ptr::eq(i.object, &s));
}

#[test]
fn equal_shapes_are_distinct_objects() {
    let s1 = Shape::sphere();
    let s2 = Shape::sphere();

    assert_eq!(s1, s2);
    assert_ne!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s2));
}

#[test]
fn hit_all_positive() {
    let s = Shape::sphere();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let xs: Intersections = vec![i2, i1].into_iter().collect();

    assert_eq!(xs.hit(), Some(i1));
}

#[test]
fn hit_some_negative() {
    let s = Shape::sphere();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new(1.0, &s);
    let xs: Intersections = vec![i2, i1].into_iter().collect();

    assert_eq!(xs.hit(), Some(i2));
}

#[test]
fn hit_all_negative() {
    let s = Shape::sphere();
    let xs: Intersections = vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ].into_iter().collect();

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_is_lowest_nonnegative() {
    let s = Shape::sphere();
    let i1 = Intersection::new(5.0, &s);
    let i2 = Intersection::new(7.0, &s);
    let i3 = Intersection::new(-3.0, &s);
    let i4 = Intersection::new(2.0, &s);
    let xs: Intersections = vec![i1, i2, i3, i4].into_iter().collect();

    assert_eq!(xs.hit(), Some(i4));
}

#[test]
fn hit_at_zero_counts() {
    let s = Shape::sphere();
    let i = Intersection::new(0.0, &s);
    let xs: Intersections = vec![Intersection::new(-0.5, &s), i].into_iter().collect();

    assert_eq!(xs.hit(), Some(i));
}

#[test]
fn hit_tie_goes_to_first_added() {
    let s1 = Shape::sphere();
    let s2 = Shape::plane();
    let xs: Intersections = vec![
        Intersection::new(3.0, &s1),
        Intersection::new(-1.0, &s2),
        Intersection::new(3.0, &s2),
    ].into_iter().collect();

    let hit = xs.hit().unwrap();
    assert!(std::ptr::eq(hit.object, &s1));

    let xs: Intersections = vec![
        Intersection::new(3.0, &s2),
        Intersection::new(3.0, &s1),
    ].into_iter().collect();

    assert!(std::ptr::eq(xs.hit().unwrap().object, &s2));
}

#[test]
fn hit_on_empty_is_none() {
    assert_eq!(Intersections::new().hit(), None);
}

#[test]
fn sort_orders_by_t() {
    let s = Shape::sphere();
    let mut xs: Intersections = vec![
        Intersection::new(6.0, &s),
        Intersection::new(-1.0, &s),
        Intersection::new(4.0, &s),
    ].into_iter().collect();
    xs.sort();

    let ts: Vec<f64> = xs.iter().map(|i| i.t).collect();
    assert_eq!(ts, vec![-1.0, 4.0, 6.0]);
}

#[test]
fn prepare_outside_hit() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere();
    let comps = Intersection::new(4.0, &s).prepare(&r).unwrap();

    assert_eq!(comps.t, 4.0);
    assert!(std::ptr::eq(comps.object, &s));
    assert_eq!(comps.point, Tuple::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple::vector(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn prepare_inside_hit() {
    let r = Ray::new(Tuple::origin(), Tuple::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere();
    let comps = Intersection::new(1.0, &s).prepare(&r).unwrap();

    assert_eq!(comps.point, Tuple::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);
    assert_eq!(comps.normalv, Tuple::vector(0.0, 0.0, -1.0));
}

#[test]
fn prepare_offsets_over_point() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere().with_transform(translation(0.0, 0.0, 1.0));
    let comps = Intersection::new(5.0, &s).prepare(&r).unwrap();

    assert!(comps.over_point.z < -SHADOW_BIAS / 2.0);
    assert!(comps.point.z > comps.over_point.z);
}
