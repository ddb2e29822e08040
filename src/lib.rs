pub mod consts;
pub mod error;

pub mod tuple;
pub mod color;
pub mod matrix;
pub mod transform;
pub mod ray;

pub mod geometry;
pub mod shape;
pub mod pattern;
pub mod light;
pub mod material;
pub mod intersect;

pub mod world;
pub mod camera;
pub mod canvas;
pub mod scene;

pub use error::{ Result, TracerError };

use consts::FEQ_EPSILON;

/// Approximate equality for floating point values.
///
/// Every `PartialEq` implementation on tuples, colors and matrices goes
/// through this function, so accumulated rounding error never makes two
/// geometrically equal values compare unequal.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}

#[test]
fn feq_tolerates_rounding() {
    assert!(feq(0.1 + 0.2, 0.3));
    assert!(feq(1.0, 1.00001));
    assert!(!feq(1.0, 1.001));
}
