use std::time::Instant;

use tracing::{ debug_span, info };

use crate::error::{ Result, TracerError };
use crate::ray::Ray;
use crate::tuple::Tuple;
use crate::matrix::Matrix;
use crate::world::World;
use crate::canvas::Canvas;

/// A camera record for generating a canvas.
///
/// The camera sits at the origin looking down -Z, with a canvas one unit in
/// front of it. `transform` (typically a view transformation) orients the
/// world relative to the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    hsize: usize,
    vsize: usize,
    field_of_view: f64,

    half_width: f64,
    half_height: f64,
    pixel_size: f64,

    transform: Matrix,
    inverse: Matrix,
}

impl Camera {
    /// Creates a camera with the identity transform.
    ///
    /// The longer side of the canvas spans the full field of view.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Camera {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = (hsize as f64) / (vsize as f64);

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Camera {
            hsize,
            vsize,
            field_of_view,
            half_width,
            half_height,
            pixel_size: half_width * 2.0 / (hsize as f64),
            transform: Matrix::identity(),
            inverse: Matrix::identity(),
        }
    }

    pub fn hsize(&self) -> usize {
        self.hsize
    }

    pub fn vsize(&self) -> usize {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    /// The world-space width of one pixel on the canvas.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Orients the camera. Every ray needs the inverse, so a degenerate
    /// transform is rejected and the old one kept.
    pub fn set_transform(&mut self, transform: Matrix) -> Result<()> {
        self.inverse = transform.inverse().ok_or(TracerError::NonInvertible)?;
        self.transform = transform;
        Ok(())
    }

    pub fn with_transform(mut self, transform: Matrix) -> Result<Camera> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// The world-space ray through the center of pixel (`px`, `py`).
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        // Offsets from the edge of the canvas to the pixel's center
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // Canvas y grows downward, world y grows upward
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * Tuple::point(world_x, world_y, -1.0);
        let origin = self.inverse * Tuple::origin();
        let direction = (pixel - origin).normalize();

        Ray::new(origin, direction)
    }

    /// Renders `w` one pixel at a time into a new canvas.
    ///
    /// The world is borrowed immutably for the whole render, so it cannot
    /// change underneath it. The output depends only on the world and the
    /// camera; rendering twice gives identical canvases.
    pub fn render(&self, w: &World) -> Result<Canvas> {
        let span = debug_span!("render", width = self.hsize, height = self.vsize);
        let _enter = span.enter();

        info!(width = self.hsize, height = self.vsize, objects = w.objects.len(),
            "rendering");
        let start = Instant::now();

        let mut image = Canvas::new(self.hsize, self.vsize);
        for y in 0..self.vsize {
            for x in 0..self.hsize {
                let ray = self.ray_for_pixel(x, y);
                let color = w.color_at(&ray)?;
                image.write_pixel(x, y, &color);
            }
        }

        info!(elapsed = start.elapsed().as_secs_f64(), "render finished");
        Ok(image)
    }
}

#[cfg(test)]
use std::f64::consts::{ FRAC_PI_2, FRAC_PI_4 };

#[cfg(test)]
use crate::transform::{ rotation_y, translation, scaling, view_transform };

#[test]
fn construct_camera() {
    let c = Camera::new(160, 120, FRAC_PI_2);

    assert_eq!(c.hsize(), 160);
    assert_eq!(c.vsize(), 120);
    assert_eq!(c.field_of_view(), FRAC_PI_2);
    assert_eq!(*c.transform(), Matrix::identity());
}

#[test]
fn pixel_size_horizontal_canvas() {
    let c = Camera::new(200, 125, FRAC_PI_2);

    assert!(crate::feq(c.pixel_size(), 0.01));
}

#[test]
fn pixel_size_vertical_canvas() {
    let c = Camera::new(125, 200, FRAC_PI_2);

    assert!(crate::feq(c.pixel_size(), 0.01));
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, FRAC_PI_2);
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Tuple::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, FRAC_PI_2);
    let r = c.ray_for_pixel(0, 0);

    assert_eq!(r.origin, Tuple::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let c = Camera::new(201, 101, FRAC_PI_2)
        .with_transform(rotation_y(FRAC_PI_4) * translation(0.0, -2.0, 5.0))
        .unwrap();
    let r = c.ray_for_pixel(100, 50);
    let h = 2.0f64.sqrt() / 2.0;

    assert_eq!(r.origin, Tuple::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction, Tuple::vector(h, 0.0, -h));
}

#[test]
fn degenerate_camera_transform_is_rejected() {
    let mut c = Camera::new(10, 10, FRAC_PI_2);

    assert!(matches!(c.set_transform(scaling(0.0, 1.0, 1.0)),
        Err(TracerError::NonInvertible)));
    assert_eq!(*c.transform(), Matrix::identity());
}

#[cfg(test)]
fn default_view(c: Camera) -> Camera {
    let from = Tuple::point(0.0, 0.0, -5.0);
    let to = Tuple::point(0.0, 0.0, 0.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    c.with_transform(view_transform(from, to, up)).unwrap()
}

#[test]
fn render_world_with_camera() {
    use crate::color::Color;
    use crate::world::default_world;

    let w = default_world();
    let c = default_view(Camera::new(11, 11, FRAC_PI_2));

    let image = c.render(&w).unwrap();
    assert_eq!(image.width, 11);
    assert_eq!(image.height, 11);
    assert_eq!(image.pixel_at(5, 5).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn render_is_deterministic() {
    use crate::world::default_world;

    let w = default_world();
    let c = default_view(Camera::new(9, 7, FRAC_PI_2));

    assert_eq!(c.render(&w).unwrap(), c.render(&w).unwrap());
}

#[test]
fn render_without_light_fails() {
    use crate::world::default_world;

    let mut w = default_world();
    w.light = None;
    let c = default_view(Camera::new(11, 11, FRAC_PI_2));

    assert!(matches!(c.render(&w), Err(TracerError::MissingLight)));
}
