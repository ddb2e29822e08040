use std::ops::{ Add, Sub, Mul };

use crate::feq;

/// An RGB color sample.
///
/// Components are unbounded while tracing; values above `1.0` (bright
/// specular highlights) or below `0.0` are only clamped when the canvas is
/// serialized.
///
/// # Examples
///
/// ```
/// # use phong_tracer::color::Color;
/// let yellow = Color::rgb(1.0, 1.0, 0.0);
/// let purple = Color::rgb(1.0, 0.0, 1.0);
/// assert_eq!(yellow * purple, Color::rgb(1.0, 0.0, 0.0));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) && feq(self.g, other.g) && feq(self.b, other.b)
    }
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    pub fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    pub fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    /// Component-wise product of two colors.
    ///
    /// This is how a surface color is filtered by the color of the light
    /// hitting it. `c1 * c2` is shorthand for the same thing.
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        Color::rgb(c1.r * c2.r, c1.g * c2.g, c1.b * c2.b)
    }
}

impl From<[f64; 3]> for Color {
    fn from(v: [f64; 3]) -> Color {
        Color::rgb(v[0], v[1], v[2])
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color::rgb(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Color {
        Color::rgb(self.r - other.r, self.g - other.g, self.b - other.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, s: f64) -> Color {
        Color::rgb(self.r * s, self.g * s, self.b * s)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, c: Color) -> Color {
        c * self
    }
}

impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Color {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 + c2, Color::rgb(1.6, 0.7, 1.0));
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 - c2, Color::rgb(0.2, 0.5, 0.5));
}

#[test]
fn scale_color() {
    assert_eq!(Color::rgb(0.2, 0.3, 0.4) * 2.0, Color::rgb(0.4, 0.6, 0.8));
    assert_eq!(2.0 * Color::rgb(0.2, 0.3, 0.4), Color::rgb(0.4, 0.6, 0.8));
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn colors_are_not_clamped() {
    let c = Color::rgb(0.8, 0.8, 0.8) + Color::rgb(0.9, -0.9, 0.0);

    assert_eq!(c, Color::rgb(1.7, -0.1, 0.8));
}
