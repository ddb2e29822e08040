use crate::color::Color;
use crate::tuple::Tuple;

/// A point light.
///
/// Light is emitted equally in every direction from `position`, with no
/// falloff over distance.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub position: Tuple,
    pub intensity: Color,
}

impl PointLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(mut position: Tuple, intensity: Color) -> PointLight {
        if !position.is_point() {
            position.w = 1.0;
        }

        PointLight { position, intensity }
    }
}

#[test]
fn light_has_position_and_intensity() {
    let light = PointLight::new(Tuple::point(0.0, 0.0, 0.0), Color::white());

    assert_eq!(light.position, Tuple::origin());
    assert_eq!(light.intensity, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn light_position_is_forced_to_point() {
    let light = PointLight::new(Tuple::vector(1.0, 2.0, 3.0), Color::white());

    assert!(light.position.is_point());
    assert_eq!(light.position, Tuple::point(1.0, 2.0, 3.0));
}
