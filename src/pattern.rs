use crate::error::{ Result, TracerError };
use crate::tuple::Tuple;
use crate::color::Color;
use crate::matrix::Matrix;
use crate::shape::Shape;

/// The procedural rule a `Pattern` follows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PatternKind {
    /// Alternates `a` and `b` in unit-wide bands along X.
    Stripe,

    /// Blends linearly from `a` to `b` across each unit of X.
    Gradient,

    /// Concentric unit-wide rings around the Y axis.
    Ring,

    /// Alternating unit cubes in all three dimensions.
    Checkers,
}

/// A procedural color field sampled in pattern space.
///
/// A pattern has its own transform, layered on top of the transform of the
/// shape it is applied to. A world point is carried into object space by the
/// shape's inverse transform and then into pattern space by the pattern's.
///
/// # Examples
///
/// ```
/// # use phong_tracer::color::Color;
/// # use phong_tracer::tuple::Tuple;
/// # use phong_tracer::pattern::Pattern;
/// let stripes = Pattern::stripe(Color::white(), Color::black());
/// assert_eq!(stripes.pattern_at(Tuple::point(0.5, 0.0, 0.0)), Color::white());
/// assert_eq!(stripes.pattern_at(Tuple::point(1.5, 0.0, 0.0)), Color::black());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pattern {
    pub kind: PatternKind,
    pub a: Color,
    pub b: Color,

    transform: Matrix,
    inverse: Matrix,
}

impl Pattern {
    pub fn new(kind: PatternKind, a: Color, b: Color) -> Pattern {
        Pattern {
            kind, a, b,
            transform: Matrix::identity(),
            inverse: Matrix::identity(),
        }
    }

    pub fn stripe(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Stripe, a, b)
    }

    pub fn gradient(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Gradient, a, b)
    }

    pub fn ring(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Ring, a, b)
    }

    pub fn checkers(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Checkers, a, b)
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Sets the object-to-pattern transform. Unlike shapes, a pattern cannot
    /// live with a degenerate transform, since every sample needs its
    /// inverse.
    pub fn set_transform(&mut self, transform: Matrix) -> Result<()> {
        self.inverse = transform.inverse().ok_or(TracerError::NonInvertible)?;
        self.transform = transform;
        Ok(())
    }

    pub fn with_transform(mut self, transform: Matrix) -> Result<Pattern> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Samples the pattern at a point already in pattern space.
    pub fn pattern_at(&self, p: Tuple) -> Color {
        match self.kind {
            PatternKind::Stripe => self.pick(p.x.floor()),
            PatternKind::Gradient => self.a + (self.b - self.a) * (p.x % 1.0),
            PatternKind::Ring => self.pick(p.x.hypot(p.z).floor()),
            PatternKind::Checkers => {
                self.pick(p.x.floor() + p.y.floor() + p.z.floor())
            },
        }
    }

    /// Samples the pattern at a world-space point on `object`.
    pub fn pattern_at_object(&self, object: &Shape, world_point: Tuple)
        -> Result<Color> {
        let object_point = object.world_to_object(world_point)?;
        Ok(self.pattern_at(self.inverse * object_point))
    }

    /// `a` on even cells, `b` on odd ones (negative cells included).
    fn pick(&self, cell: f64) -> Color {
        if cell.rem_euclid(2.0) == 0.0 { self.a } else { self.b }
    }
}

#[cfg(test)]
use crate::transform::{ scaling, translation };

#[test]
fn stripe_is_constant_in_y_and_z() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    for v in [0.0, 1.0, 2.0].iter() {
        assert_eq!(pattern.pattern_at(Tuple::point(0.0, *v, 0.0)), Color::white());
        assert_eq!(pattern.pattern_at(Tuple::point(0.0, 0.0, *v)), Color::white());
    }
}

#[test]
fn stripe_alternates_in_x() {
    let pattern = Pattern::stripe(Color::white(), Color::black());
    let at = |x| pattern.pattern_at(Tuple::point(x, 0.0, 0.0));

    assert_eq!(at(0.0), Color::white());
    assert_eq!(at(0.9), Color::white());
    assert_eq!(at(1.0), Color::black());
    assert_eq!(at(-0.1), Color::black());
    assert_eq!(at(-1.0), Color::black());
    assert_eq!(at(-1.1), Color::white());
}

#[test]
fn stripes_with_object_transform() {
    let object = Shape::sphere().with_transform(scaling(2.0, 2.0, 2.0));
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at_object(&object, Tuple::point(1.5, 0.0, 0.0)).unwrap(),
        Color::white());
}

#[test]
fn stripes_with_pattern_transform() {
    let object = Shape::sphere();
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(scaling(2.0, 2.0, 2.0))
        .unwrap();

    assert_eq!(pattern.pattern_at_object(&object, Tuple::point(1.5, 0.0, 0.0)).unwrap(),
        Color::white());
}

#[test]
fn stripes_with_object_and_pattern_transform() {
    let object = Shape::sphere().with_transform(scaling(2.0, 2.0, 2.0));
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(translation(0.5, 0.0, 0.0))
        .unwrap();

    assert_eq!(pattern.pattern_at_object(&object, Tuple::point(2.5, 0.0, 0.0)).unwrap(),
        Color::white());
}

#[test]
fn gradient_interpolates_in_x() {
    let pattern = Pattern::gradient(Color::white(), Color::black());
    let at = |x| pattern.pattern_at(Tuple::point(x, 0.0, 0.0));

    assert_eq!(at(0.0), Color::white());
    assert_eq!(at(0.25), Color::rgb(0.75, 0.75, 0.75));
    assert_eq!(at(0.5), Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(at(0.75), Color::rgb(0.25, 0.25, 0.25));
}

#[test]
fn ring_extends_in_x_and_z() {
    let pattern = Pattern::ring(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple::point(0.0, 0.0, 0.0)), Color::white());
    assert_eq!(pattern.pattern_at(Tuple::point(1.0, 0.0, 0.0)), Color::black());
    assert_eq!(pattern.pattern_at(Tuple::point(0.0, 0.0, 1.0)), Color::black());
    assert_eq!(pattern.pattern_at(Tuple::point(0.708, 0.0, 0.708)), Color::black());
}

#[test]
fn checkers_repeat_in_each_dimension() {
    let pattern = Pattern::checkers(Color::white(), Color::black());
    let at = |x, y, z| pattern.pattern_at(Tuple::point(x, y, z));

    assert_eq!(at(0.0, 0.0, 0.0), Color::white());
    assert_eq!(at(0.99, 0.0, 0.0), Color::white());
    assert_eq!(at(1.01, 0.0, 0.0), Color::black());
    assert_eq!(at(0.0, 0.99, 0.0), Color::white());
    assert_eq!(at(0.0, 1.01, 0.0), Color::black());
    assert_eq!(at(0.0, 0.0, 0.99), Color::white());
    assert_eq!(at(0.0, 0.0, 1.01), Color::black());
    assert_eq!(at(-0.5, -0.5, 0.5), Color::white());
}

#[test]
fn degenerate_pattern_transform_is_rejected() {
    let mut pattern = Pattern::ring(Color::white(), Color::black());

    assert!(pattern.set_transform(scaling(0.0, 1.0, 1.0)).is_err());
    assert_eq!(*pattern.transform(), Matrix::identity());
}
