use crate::error::Result;
use crate::tuple::Tuple;
use crate::color::Color;
use crate::light::PointLight;
use crate::pattern::Pattern;
use crate::shape::Shape;

/// Surface properties for the Phong reflection model.
///
/// When `pattern` is set it replaces `color` as the surface color; the
/// pattern is sampled at the shaded point in the owning shape's space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub pattern: Option<Pattern>,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),
            pattern: None,

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
        }
    }
}

impl Material {
    /// The unlit surface color at a world-space point on `object`.
    pub fn color_at(&self, object: &Shape, point: Tuple) -> Result<Color> {
        match self.pattern {
            Some(ref pattern) => pattern.pattern_at_object(object, point),
            None => Ok(self.color),
        }
    }

    /// Shades a single point lit by `light`, seen along `eyev`.
    ///
    /// A shadowed point only gets the ambient term. The specular term is the
    /// reflect-eye cosine raised to `shininess`, dropped when that power is
    /// not positive.
    ///
    /// ```
    /// # use phong_tracer::color::Color;
    /// # use phong_tracer::tuple::Tuple;
    /// # use phong_tracer::light::PointLight;
    /// # use phong_tracer::shape::Shape;
    /// let s = Shape::sphere();
    /// let light = PointLight::new(Tuple::point(0.0, 0.0, -10.0), Color::white());
    /// let eyev = Tuple::vector(0.0, 0.0, -1.0);
    /// let normalv = Tuple::vector(0.0, 0.0, -1.0);
    ///
    /// let c = s.material.lighting(&s, &light, Tuple::origin(), eyev, normalv, false)
    ///     .unwrap();
    /// assert_eq!(c, Color::rgb(1.9, 1.9, 1.9));
    /// ```
    pub fn lighting(&self, object: &Shape, light: &PointLight, point: Tuple,
        eyev: Tuple, normalv: Tuple, in_shadow: bool) -> Result<Color> {
        let effective_color = self.color_at(object, point)? * light.intensity;
        let ambient = effective_color * self.ambient;

        if in_shadow {
            return Ok(ambient);
        }

        let lightv = (light.position - point).normalize();
        let light_dot_normal = lightv.dot(&normalv);

        // Light is behind the surface.
        if light_dot_normal < 0.0 {
            return Ok(ambient);
        }

        let diffuse = effective_color * self.diffuse * light_dot_normal;

        let reflectv = (-lightv).reflect(&normalv);
        let reflect_dot_eye = reflectv.dot(&eyev).powf(self.shininess);

        let specular = if reflect_dot_eye <= 0.0 {
            Color::black()
        } else {
            light.intensity * self.specular * reflect_dot_eye
        };

        Ok(ambient + diffuse + specular)
    }
}

#[cfg(test)]
fn shade(light: Tuple, eyev: Tuple, in_shadow: bool) -> Color {
    let s = Shape::sphere();
    let light = PointLight::new(light, Color::white());
    let normalv = Tuple::vector(0.0, 0.0, -1.0);

    s.material.lighting(&s, &light, Tuple::origin(), eyev, normalv, in_shadow)
        .unwrap()
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.pattern, None);
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
}

#[test]
fn eye_between_light_and_surface() {
    let c = shade(Tuple::point(0.0, 0.0, -10.0), Tuple::vector(0.0, 0.0, -1.0), false);

    assert_eq!(c, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_offset_45_degrees() {
    let h = 2.0f64.sqrt() / 2.0;
    let c = shade(Tuple::point(0.0, 0.0, -10.0), Tuple::vector(0.0, h, -h), false);

    assert_eq!(c, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn light_offset_45_degrees() {
    let c = shade(Tuple::point(0.0, 10.0, -10.0), Tuple::vector(0.0, 0.0, -1.0), false);

    assert_eq!(c, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let h = 2.0f64.sqrt() / 2.0;
    let c = shade(Tuple::point(0.0, 10.0, -10.0), Tuple::vector(0.0, -h, -h), false);

    assert_eq!(c, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let c = shade(Tuple::point(0.0, 0.0, 10.0), Tuple::vector(0.0, 0.0, -1.0), false);

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn grazing_light_with_even_shininess() {
    // Light along the surface; the reflected ray points straight away from
    // the eye, and (-1)^200 keeps the highlight.
    let c = shade(Tuple::point(10.0, 0.0, 0.0), Tuple::vector(1.0, 0.0, 0.0), false);

    assert_eq!(c, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn surface_in_shadow() {
    let c = shade(Tuple::point(0.0, 0.0, -10.0), Tuple::vector(0.0, 0.0, -1.0), true);

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn pattern_replaces_color() {
    let m = Material {
        color: Color::rgb(0.5, 0.5, 0.5),
        pattern: Some(Pattern::stripe(Color::white(), Color::black())),

        // Ambient only, so the result is the pattern color itself.
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,
        ..Default::default()
    };

    let s = Shape::sphere().with_material(m);
    let eyev = Tuple::vector(0.0, 0.0, -1.0);
    let normalv = Tuple::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(Tuple::point(0.0, 0.0, -10.0), Color::white());

    let c1 = m.lighting(&s, &light, Tuple::point(0.9, 0.0, 0.0), eyev, normalv, false);
    let c2 = m.lighting(&s, &light, Tuple::point(1.1, 0.0, 0.0), eyev, normalv, false);

    assert_eq!(c1.unwrap(), Color::white());
    assert_eq!(c2.unwrap(), Color::black());
}
