//! Builders for the affine transforms used to place shapes, patterns and the
//! camera.
//!
//! Every function here is pure and returns a fresh `Matrix`. Chain them with
//! `*`; the rightmost transform is applied first, so
//! `translation(..) * scaling(..)` scales an object and then moves it.

use crate::matrix::Matrix;
use crate::tuple::Tuple;

pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
    [ 1.0, 0.0, 0.0,   x,
      0.0, 1.0, 0.0,   y,
      0.0, 0.0, 1.0,   z,
      0.0, 0.0, 0.0, 1.0, ].into()
}

pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
    [   x, 0.0, 0.0, 0.0,
      0.0,   y, 0.0, 0.0,
      0.0, 0.0,   z, 0.0,
      0.0, 0.0, 0.0, 1.0, ].into()
}

/// Rotation about the X axis by `r` radians (right-handed).
///
/// ```
/// # use phong_tracer::tuple::Tuple;
/// # use phong_tracer::transform::rotation_x;
/// let quarter = rotation_x(std::f64::consts::FRAC_PI_2);
/// assert_eq!(quarter * Tuple::point(0.0, 1.0, 0.0), Tuple::point(0.0, 0.0, 1.0));
/// ```
pub fn rotation_x(r: f64) -> Matrix {
    let (s, c) = r.sin_cos();

    [ 1.0, 0.0, 0.0, 0.0,
      0.0,   c,  -s, 0.0,
      0.0,   s,   c, 0.0,
      0.0, 0.0, 0.0, 1.0, ].into()
}

/// Rotation about the Y axis by `r` radians (right-handed).
pub fn rotation_y(r: f64) -> Matrix {
    let (s, c) = r.sin_cos();

    [   c, 0.0,   s, 0.0,
      0.0, 1.0, 0.0, 0.0,
       -s, 0.0,   c, 0.0,
      0.0, 0.0, 0.0, 1.0, ].into()
}

/// Rotation about the Z axis by `r` radians (right-handed).
pub fn rotation_z(r: f64) -> Matrix {
    let (s, c) = r.sin_cos();

    [   c,  -s, 0.0, 0.0,
        s,   c, 0.0, 0.0,
      0.0, 0.0, 1.0, 0.0,
      0.0, 0.0, 0.0, 1.0, ].into()
}

/// A shear. Each parameter moves one coordinate in proportion to another;
/// `xy` moves `x` in proportion to `y`, and so on.
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
    -> Matrix {
    [ 1.0,  xy,  xz, 0.0,
       yx, 1.0,  yz, 0.0,
       zx,  zy, 1.0, 0.0,
      0.0, 0.0, 0.0, 1.0, ].into()
}

/// Orients the world relative to an eye at `from` looking at `to`.
///
/// `up` only needs to point roughly upward; the true up vector is recomputed
/// from the forward and left vectors. `from` and `to` must not coincide.
pub fn view_transform(from: Tuple, to: Tuple, up: Tuple) -> Matrix {
    let forward = (to - from).normalize();
    let left = forward.cross(&up.normalize());
    let true_up = left.cross(&forward);

    let orientation: Matrix = [
            left.x,     left.y,     left.z, 0.0,
         true_up.x,  true_up.y,  true_up.z, 0.0,
        -forward.x, -forward.y, -forward.z, 0.0,
               0.0,        0.0,        0.0, 1.0,
    ].into();

    orientation * translation(-from.x, -from.y, -from.z)
}

#[cfg(test)]
use std::f64::consts::{ FRAC_PI_2, FRAC_PI_4 };

#[test]
fn translate_point() {
    let transform = translation(5.0, -3.0, 2.0);
    let p = Tuple::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * p, Tuple::point(2.0, 1.0, 7.0));
    assert_eq!(transform.inverse().unwrap() * p, Tuple::point(-8.0, 7.0, 3.0));
}

#[test]
fn translation_ignores_vectors() {
    let v = Tuple::vector(-3.0, 4.0, 5.0);

    assert_eq!(translation(5.0, -3.0, 2.0) * v, v);
}

#[test]
fn scale_point_and_vector() {
    let transform = scaling(2.0, 3.0, 4.0);

    assert_eq!(transform * Tuple::point(-4.0, 6.0, 8.0),
        Tuple::point(-8.0, 18.0, 32.0));
    assert_eq!(transform * Tuple::vector(-4.0, 6.0, 8.0),
        Tuple::vector(-8.0, 18.0, 32.0));
    assert_eq!(transform.inverse().unwrap() * Tuple::vector(-4.0, 6.0, 8.0),
        Tuple::vector(-2.0, 2.0, 2.0));
}

#[test]
fn reflection_is_negative_scaling() {
    assert_eq!(scaling(-1.0, 1.0, 1.0) * Tuple::point(2.0, 3.0, 4.0),
        Tuple::point(-2.0, 3.0, 4.0));
}

#[test]
fn rotate_about_x() {
    let p = Tuple::point(0.0, 1.0, 0.0);
    let h = 2.0f64.sqrt() / 2.0;

    assert_eq!(rotation_x(FRAC_PI_4) * p, Tuple::point(0.0, h, h));
    assert_eq!(rotation_x(FRAC_PI_2) * p, Tuple::point(0.0, 0.0, 1.0));
    assert_eq!(rotation_x(FRAC_PI_4).inverse().unwrap() * p,
        Tuple::point(0.0, h, -h));
}

#[test]
fn rotate_about_y() {
    let p = Tuple::point(0.0, 0.0, 1.0);
    let h = 2.0f64.sqrt() / 2.0;

    assert_eq!(rotation_y(FRAC_PI_4) * p, Tuple::point(h, 0.0, h));
    assert_eq!(rotation_y(FRAC_PI_2) * p, Tuple::point(1.0, 0.0, 0.0));
}

#[test]
fn rotate_about_z() {
    let p = Tuple::point(0.0, 1.0, 0.0);
    let h = 2.0f64.sqrt() / 2.0;

    assert_eq!(rotation_z(FRAC_PI_4) * p, Tuple::point(-h, h, 0.0));
    assert_eq!(rotation_z(FRAC_PI_2) * p, Tuple::point(-1.0, 0.0, 0.0));
}

#[test]
fn shear_each_axis() {
    let p = Tuple::point(2.0, 3.0, 4.0);

    assert_eq!(shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0) * p, Tuple::point(5.0, 3.0, 4.0));
    assert_eq!(shearing(0.0, 1.0, 0.0, 0.0, 0.0, 0.0) * p, Tuple::point(6.0, 3.0, 4.0));
    assert_eq!(shearing(0.0, 0.0, 1.0, 0.0, 0.0, 0.0) * p, Tuple::point(2.0, 5.0, 4.0));
    assert_eq!(shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0) * p, Tuple::point(2.0, 7.0, 4.0));
    assert_eq!(shearing(0.0, 0.0, 0.0, 0.0, 1.0, 0.0) * p, Tuple::point(2.0, 3.0, 6.0));
    assert_eq!(shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0) * p, Tuple::point(2.0, 3.0, 7.0));
}

#[test]
fn chained_transforms_apply_right_to_left() {
    let a = rotation_x(FRAC_PI_2);
    let b = scaling(5.0, 5.0, 5.0);
    let c = translation(10.0, 5.0, 7.0);
    let p = Tuple::point(1.0, 0.0, 1.0);

    assert_eq!((c * b * a) * p, Tuple::point(15.0, 0.0, 7.0));
}

#[test]
fn default_orientation_is_identity() {
    let view = view_transform(
        Tuple::point(0.0, 0.0, 0.0),
        Tuple::point(0.0, 0.0, -1.0),
        Tuple::vector(0.0, 1.0, 0.0),
    );

    assert_eq!(view, Matrix::identity());
}

#[test]
fn looking_down_positive_z_mirrors() {
    let view = view_transform(
        Tuple::point(0.0, 0.0, 0.0),
        Tuple::point(0.0, 0.0, 1.0),
        Tuple::vector(0.0, 1.0, 0.0),
    );

    assert_eq!(view, scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_transform_moves_the_world() {
    let view = view_transform(
        Tuple::point(0.0, 0.0, 8.0),
        Tuple::point(0.0, 0.0, 0.0),
        Tuple::vector(0.0, 1.0, 0.0),
    );

    assert_eq!(view, translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view_transform() {
    let view = view_transform(
        Tuple::point(1.0, 3.0, 2.0),
        Tuple::point(4.0, -2.0, 8.0),
        Tuple::vector(1.0, 1.0, 0.0),
    );

    let expected: Matrix = [ -0.50709, 0.50709,  0.67612, -2.36643,
                              0.76772, 0.60609,  0.12122, -2.82843,
                             -0.35857, 0.59761, -0.71714,  0.00000,
                              0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(view, expected);
}
